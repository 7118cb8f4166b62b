//! Fitness scoring and status bands.
//!
//! Pure functions over the primary physiological variables. The engine wraps
//! these as methods; task schedulers use the levels to gate work assignment.

use serde::{Deserialize, Serialize};

use crate::complaint::ComplaintType;

/// Hunger above this counts as hungry.
pub const HUNGER_THRESHOLD: f64 = 250.0;
/// Energy reserve below this counts as hungry, kJ.
pub const ENERGY_THRESHOLD: f64 = 2_525.0;
/// Thirst above this counts as thirsty.
pub const THIRST_THRESHOLD: f64 = 150.0;
/// Fatigue above this counts as sleepy.
pub const FATIGUE_THRESHOLD: f64 = 750.0;
/// Stress above this counts as stressed out.
pub const STRESS_THRESHOLD: f64 = 75.0;
/// Problems at or above this seriousness zero the fitness level.
pub const SERIOUS_PROBLEM_THRESHOLD: u32 = 50;

pub fn is_hungry(hunger: f64, energy: f64) -> bool {
    hunger > HUNGER_THRESHOLD || energy < ENERGY_THRESHOLD
}

pub fn is_doubly_hungry(hunger: f64, energy: f64) -> bool {
    hunger > 2.0 * HUNGER_THRESHOLD || energy < 2.0 * ENERGY_THRESHOLD
}

pub fn is_thirsty(thirst: f64) -> bool {
    thirst > THIRST_THRESHOLD
}

pub fn is_doubly_thirsty(thirst: f64) -> bool {
    thirst > 2.0 * THIRST_THRESHOLD
}

pub fn is_sleepy(fatigue: f64) -> bool {
    fatigue > FATIGUE_THRESHOLD
}

/// High pain tolerance widens the band before a colonist reads as
/// stressed out.
pub fn is_stressed_out(stress: f64, pain_tolerance_factor: f64) -> bool {
    stress > STRESS_THRESHOLD * pain_tolerance_factor
}

/// Overall fitness on a 0..=5 ladder.
///
/// * `fatigue`, `stress`, `hunger`, `thirst`, `energy` - current levels.
/// * `serious_problem` - any active problem at or above
///   [`SERIOUS_PROBLEM_THRESHOLD`] seriousness forces level 0.
///
/// Every variable must clear a tier's bound for the tier to hold, so one
/// runaway index drags the whole level down.
pub fn fitness_level(
    fatigue: f64,
    stress: f64,
    hunger: f64,
    thirst: f64,
    energy: f64,
    serious_problem: bool,
) -> u32 {
    if serious_problem {
        return 0;
    }
    if fatigue < 100.0 && stress < 10.0 && hunger < 100.0 && thirst < 50.0 && energy > 12_000.0 {
        5
    } else if fatigue < 250.0
        && stress < 25.0
        && hunger < 250.0
        && thirst < 125.0
        && energy > 10_000.0
    {
        4
    } else if fatigue < 500.0
        && stress < 50.0
        && hunger < 500.0
        && thirst < 250.0
        && energy > 8_000.0
    {
        3
    } else if fatigue < 800.0
        && stress < 65.0
        && hunger < 800.0
        && thirst < 400.0
        && energy > 6_000.0
    {
        2
    } else if fatigue < 1_200.0
        && stress < 80.0
        && hunger < 1_200.0
        && thirst < 600.0
        && energy > 4_000.0
    {
        1
    } else {
        0
    }
}

/// Composite wellbeing score in [0, 100]. Each variable contributes its
/// distance from nominal; performance contributes directly.
pub fn health_score(fatigue: f64, stress: f64, hunger: f64, thirst: f64, performance: f64) -> f64 {
    let parts = [
        (100.0 - fatigue / 10.0).max(0.0),
        (100.0 - stress).max(0.0),
        (100.0 - hunger / 10.0).max(0.0),
        (100.0 - thirst / 5.0).max(0.0),
        (performance * 100.0).clamp(0.0, 100.0),
    ];
    parts.iter().sum::<f64>() / parts.len() as f64
}

/// User-visible health summary band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealthStatus {
    Well,
    /// Carrying the most serious active problem.
    Sick(ComplaintType),
    /// Dead, with the cause label.
    Dead(String),
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Well => f.write_str("Well"),
            HealthStatus::Sick(kind) => f.write_str(kind.label()),
            HealthStatus::Dead(cause) => write!(f, "Dead ({})", cause),
        }
    }
}
