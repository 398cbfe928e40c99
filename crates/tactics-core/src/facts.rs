use std::borrow::{Borrow, Cow};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of a world fact, e.g. `"hasAmmo"`.
///
/// Static names are stored without allocating; names built at runtime (config files, tooling) are
/// owned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FactKey(Cow<'static, str>);

impl FactKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FactKey {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for FactKey {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl Borrow<str> for FactKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of a world fact.
///
/// GOAP facts are small enumerations in practice, so the set of value kinds is closed. Values of
/// different kinds never compare equal (`Int(1) != Bool(true)`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum FactValue {
    Bool(bool),
    Int(i64),
    Symbol(Cow<'static, str>),
}

impl FactValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FactValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FactValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            FactValue::Symbol(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        FactValue::Bool(value)
    }
}

impl From<i64> for FactValue {
    fn from(value: i64) -> Self {
        FactValue::Int(value)
    }
}

impl From<i32> for FactValue {
    fn from(value: i32) -> Self {
        FactValue::Int(value.into())
    }
}

impl From<&'static str> for FactValue {
    fn from(value: &'static str) -> Self {
        FactValue::Symbol(Cow::Borrowed(value))
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        FactValue::Symbol(Cow::Owned(value))
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Bool(v) => write!(f, "{v}"),
            FactValue::Int(v) => write!(f, "{v}"),
            FactValue::Symbol(v) => f.write_str(v),
        }
    }
}

/// Read access to a set of facts.
///
/// Implemented by [`FactSet`] and by planner-internal state snapshots, so condition checks are
/// written once.
pub trait FactView {
    fn fact(&self, key: &FactKey) -> Option<&FactValue>;

    /// True when every condition key is present with an equal value.
    ///
    /// A missing key fails the check: "unknown" never satisfies a requirement.
    fn satisfies(&self, conditions: &FactSet) -> bool {
        conditions
            .iter()
            .all(|(key, required)| self.fact(key) == Some(required))
    }
}

/// A world state (or a partial one: preconditions, effects, goals).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FactSet {
    facts: BTreeMap<FactKey, FactValue>,
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<FactKey>, value: impl Into<FactValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<FactKey>,
        value: impl Into<FactValue>,
    ) -> Option<FactValue> {
        self.facts.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FactValue> {
        self.facts.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FactValue> {
        self.facts.remove(key)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FactKey, FactValue> {
        self.facts.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, FactKey, FactValue> {
        self.facts.keys()
    }

    /// Merge `effects` into this set. Effect keys overwrite, other keys persist.
    pub fn apply(&mut self, effects: &FactSet) {
        for (key, value) in effects.iter() {
            self.facts.insert(key.clone(), value.clone());
        }
    }

    pub fn applied(&self, effects: &FactSet) -> FactSet {
        let mut out = self.clone();
        out.apply(effects);
        out
    }
}

impl FactView for FactSet {
    fn fact(&self, key: &FactKey) -> Option<&FactValue> {
        self.facts.get(key)
    }
}

impl<K, V> FromIterator<(K, V)> for FactSet
where
    K: Into<FactKey>,
    V: Into<FactValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = FactSet::new();
        out.extend(iter);
        out
    }
}

impl<K, V> Extend<(K, V)> for FactSet
where
    K: Into<FactKey>,
    V: Into<FactValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a FactSet {
    type Item = (&'a FactKey, &'a FactValue);
    type IntoIter = btree_map::Iter<'a, FactKey, FactValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

impl fmt::Display for FactSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.facts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
