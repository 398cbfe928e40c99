use tactics_core::{ActionSpec, FactSet, FactValue, FactView, InvalidCost};

#[test]
fn missing_key_does_not_satisfy_a_condition() {
    let state = FactSet::new().with("hasAmmo", true);
    let conditions = FactSet::new().with("hasTarget", false);

    assert!(!state.satisfies(&conditions));
}

#[test]
fn mismatching_value_does_not_satisfy_a_condition() {
    let state = FactSet::new().with("hasAmmo", false);
    let conditions = FactSet::new().with("hasAmmo", true);

    assert!(!state.satisfies(&conditions));
}

#[test]
fn empty_conditions_are_always_satisfied() {
    assert!(FactSet::new().satisfies(&FactSet::new()));
    assert!(FactSet::new().with("x", 1).satisfies(&FactSet::new()));
}

#[test]
fn values_of_different_kinds_never_match() {
    let state = FactSet::new().with("count", 1);
    assert!(!state.satisfies(&FactSet::new().with("count", true)));
    assert!(state.satisfies(&FactSet::new().with("count", 1i64)));
}

#[test]
fn apply_overwrites_effect_keys_and_keeps_the_rest() {
    let state = FactSet::new()
        .with("hasAmmo", true)
        .with("hasTarget", true)
        .with("team", "blue");
    let effects = FactSet::new()
        .with("hasAmmo", false)
        .with("targetIsDead", true);

    let next = state.applied(&effects);

    assert_eq!(next.get("hasAmmo"), Some(&FactValue::Bool(false)));
    assert_eq!(next.get("hasTarget"), Some(&FactValue::Bool(true)));
    assert_eq!(next.get("targetIsDead"), Some(&FactValue::Bool(true)));
    assert_eq!(next.get("team").and_then(FactValue::as_symbol), Some("blue"));
    // The source snapshot is untouched.
    assert_eq!(state.get("hasAmmo"), Some(&FactValue::Bool(true)));
    assert!(!state.contains_key("targetIsDead"));
}

#[test]
fn action_spec_applicability_checks_every_precondition() {
    let shoot = ActionSpec::new("Shoot", 1.0)
        .with_precondition("hasAmmo", true)
        .with_precondition("hasTarget", true)
        .with_effect("targetIsDead", true);

    let armed = FactSet::new().with("hasAmmo", true);
    let ready = armed.clone().with("hasTarget", true);

    assert!(!shoot.is_applicable(&armed));
    assert!(shoot.is_applicable(&ready));
}

#[test]
#[should_panic(expected = "action cost must be finite")]
fn negative_action_cost_is_rejected() {
    let _ = ActionSpec::new("Broken", -1.0);
}

#[test]
fn try_new_reports_invalid_costs() {
    assert_eq!(ActionSpec::try_new("Broken", -1.0), Err(InvalidCost(-1.0)));
    assert!(ActionSpec::try_new("Broken", f32::INFINITY).is_err());
    assert!(ActionSpec::try_new("Broken", f32::NAN).is_err());
    assert_eq!(
        ActionSpec::try_new("Free", 0.0).map(|spec| spec.cost()),
        Ok(0.0)
    );
}

#[test]
fn display_lists_facts_in_key_order() {
    let state: FactSet = [("b", 2), ("a", 1)].into_iter().collect();
    assert_eq!(state.to_string(), "{a: 1, b: 2}");
}

#[cfg(feature = "serde")]
#[test]
fn fact_set_roundtrips_via_serde() {
    let state = FactSet::new()
        .with("hasAmmo", true)
        .with("shells", 3)
        .with("team", "red");

    let json = serde_json::to_string(&state).expect("serialize facts");
    assert_eq!(json, r#"{"hasAmmo":true,"shells":3,"team":"red"}"#);

    let back: FactSet = serde_json::from_str(&json).expect("deserialize facts");
    assert_eq!(back, state);
}

#[cfg(feature = "serde")]
#[test]
fn action_spec_loads_from_json() {
    let spec: ActionSpec = serde_json::from_str(
        r#"{"name":"Shoot","cost":1.5,"preconditions":{"hasAmmo":true},"effects":{"targetIsDead":true}}"#,
    )
    .expect("deserialize action");
    assert_eq!(
        spec,
        ActionSpec::new("Shoot", 1.5)
            .with_precondition("hasAmmo", true)
            .with_effect("targetIsDead", true)
    );

    let minimal: ActionSpec =
        serde_json::from_str(r#"{"name":"Idle","cost":0.0}"#).expect("defaults");
    assert!(minimal.preconditions().is_empty());
    assert!(minimal.effects().is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn action_spec_with_negative_cost_fails_to_load() {
    let err = serde_json::from_str::<ActionSpec>(
        r#"{"name":"Bad","cost":-5.0,"preconditions":{},"effects":{"done":true}}"#,
    )
    .expect_err("negative cost");
    assert!(
        err.to_string().contains("action cost must be finite"),
        "{err}"
    );
}
