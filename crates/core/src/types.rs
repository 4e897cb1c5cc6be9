use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

/// One resource reading (health, shield or energy) as supplied by the arena.
///
/// `percent` is kept as reported rather than recomputed, so a reading taken
/// from the engine is used verbatim by the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vital {
    pub percent: u8,
    pub actual: u32,
    pub maximum: u32,
}

impl Vital {
    pub fn from_parts(percent: u8, actual: u32, maximum: u32) -> Self {
        Self { percent, actual, maximum }
    }

    /// Builds a reading with `percent == round(100 * actual / maximum)`.
    pub fn new(actual: u32, maximum: u32) -> Self {
        let maximum = maximum.max(1);
        let actual = actual.min(maximum);
        let (actual_wide, maximum_wide) = (u64::from(actual), u64::from(maximum));
        let percent = ((actual_wide * 200 + maximum_wide) / (maximum_wide * 2)) as u8;
        Self { percent, actual, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn missing(&self) -> u32 {
        self.maximum.saturating_sub(self.actual)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub health: Vital,
    pub shield: Vital,
    pub energy: Vital,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Idle,
    MoveTowards(Pos),
    MoveAwayFrom(Pos),
    Attack(Enemy),
    RechargeBattery,
    RechargeShield(u32),
}

/// Which rule of the turn policy produced an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionReason {
    NoEnemies,
    BatteryCritical,
    SafeShieldTopUp,
    SafeBatteryTopUp,
    ShieldCriticalRecharge,
    ShieldCriticalBattery,
    Retreat,
    Engage,
    Approach,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub reason: DecisionReason,
}
