//! Reference actions for a tank that hunts an enemy: collect ammo, find a target, shoot.
//!
//! The actions only see the tank through [`TankContext`], so the same set drives a game entity, a
//! headless simulation or a test double.

use tactics_core::{ActionSpec, FactKey, FactSet, GoapAction, Plannable};

pub const HAS_AMMO: FactKey = FactKey::from_static("hasAmmo");
pub const HAS_TARGET: FactKey = FactKey::from_static("hasTarget");
pub const TARGET_IS_DEAD: FactKey = FactKey::from_static("targetIsDead");

/// Progress of a movement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    Moving,
    Arrived,
}

/// What the tank actions need from the tank they drive.
pub trait TankContext {
    fn has_ammo(&self) -> bool;

    fn has_target(&self) -> bool;

    /// Move one step toward the nearest ammo pickup, collecting it on arrival.
    ///
    /// `None` when no pickup exists or none is reachable.
    fn approach_ammo(&mut self) -> Option<Approach>;

    /// Lock onto an enemy in line of sight. Returns whether one was found.
    fn acquire_target(&mut self) -> bool;

    /// Move somewhere else to look for enemies.
    fn wander(&mut self);

    /// Fire one shell at the current target, spending ammo.
    fn fire(&mut self);
}

/// The tank's world state as planner facts.
pub fn observe<C: TankContext + ?Sized>(tank: &C) -> FactSet {
    FactSet::new()
        .with(HAS_AMMO, tank.has_ammo())
        .with(HAS_TARGET, tank.has_target())
        .with(TARGET_IS_DEAD, false)
}

pub fn kill_target_goal() -> FactSet {
    FactSet::new().with(TARGET_IS_DEAD, true)
}

/// `[PickUpAmmo, FindTarget, Shoot]`, boxed for a heterogeneous action list.
pub fn tank_actions<C>() -> Vec<Box<dyn GoapAction<C>>>
where
    C: TankContext + ?Sized + 'static,
{
    vec![
        Box::new(PickUpAmmo::new()),
        Box::new(FindTarget::new()),
        Box::new(Shoot::new()),
    ]
}

#[derive(Debug, Clone)]
pub struct PickUpAmmo {
    spec: ActionSpec,
    done: bool,
}

impl PickUpAmmo {
    pub fn new() -> Self {
        Self {
            spec: ActionSpec::new("PickUpAmmo", 1.0)
                .with_precondition(HAS_AMMO, false)
                .with_effect(HAS_AMMO, true),
            done: false,
        }
    }
}

impl Default for PickUpAmmo {
    fn default() -> Self {
        Self::new()
    }
}

impl Plannable for PickUpAmmo {
    fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    fn reset(&mut self) {
        self.done = false;
    }
}

impl<C: TankContext + ?Sized> GoapAction<C> for PickUpAmmo {
    fn is_done(&self) -> bool {
        self.done
    }

    fn perform(&mut self, tank: &mut C) -> bool {
        if tank.has_ammo() {
            return false;
        }
        match tank.approach_ammo() {
            None => false,
            Some(Approach::Moving) => true,
            Some(Approach::Arrived) => {
                self.done = true;
                true
            }
        }
    }

    fn requires_in_range(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct FindTarget {
    spec: ActionSpec,
    done: bool,
}

impl FindTarget {
    pub fn new() -> Self {
        Self {
            spec: ActionSpec::new("FindTarget", 1.0)
                .with_precondition(HAS_TARGET, false)
                .with_effect(HAS_TARGET, true),
            done: false,
        }
    }
}

impl Default for FindTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Plannable for FindTarget {
    fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    fn reset(&mut self) {
        self.done = false;
    }
}

impl<C: TankContext + ?Sized> GoapAction<C> for FindTarget {
    fn is_done(&self) -> bool {
        self.done
    }

    // Never fails: without a target in sight the tank keeps searching.
    fn perform(&mut self, tank: &mut C) -> bool {
        if tank.acquire_target() {
            self.done = true;
        } else {
            tank.wander();
        }
        true
    }

    fn requires_in_range(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct Shoot {
    spec: ActionSpec,
    done: bool,
}

impl Shoot {
    pub fn new() -> Self {
        Self {
            spec: ActionSpec::new("Shoot", 1.0)
                .with_precondition(HAS_AMMO, true)
                .with_precondition(HAS_TARGET, true)
                .with_effect(HAS_AMMO, false)
                .with_effect(TARGET_IS_DEAD, true),
            done: false,
        }
    }
}

impl Default for Shoot {
    fn default() -> Self {
        Self::new()
    }
}

impl Plannable for Shoot {
    fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    fn reset(&mut self) {
        self.done = false;
    }
}

impl<C: TankContext + ?Sized> GoapAction<C> for Shoot {
    fn is_done(&self) -> bool {
        self.done
    }

    fn perform(&mut self, tank: &mut C) -> bool {
        if !tank.has_ammo() || !tank.has_target() {
            return false;
        }
        tank.fire();
        self.done = true;
        true
    }
}
