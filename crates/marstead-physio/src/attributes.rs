//! Natural attributes and derived body characteristics.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ColonistProfile, ConfigError, PhysioConfig};
use crate::randutil;

/// Natural attributes on a 0..=100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub endurance: u32,
    pub agility: u32,
}

impl Attributes {
    pub fn new(strength: u32, endurance: u32, agility: u32) -> Self {
        Self {
            strength,
            endurance,
            agility,
        }
    }

    /// Endurance-weighted composite in [0, 2]; 1.0 at all-50 attributes.
    /// Scales muscle development and recurrence immunity.
    pub fn composite_score(&self) -> f64 {
        (1.5 * self.endurance as f64 + 0.75 * self.strength as f64 + 0.75 * self.agility as f64)
            / 150.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("strength", self.strength),
            ("endurance", self.endurance),
            ("agility", self.agility),
        ] {
            if value > 100 {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                    min: 0.0,
                    max: 100.0,
                });
            }
        }
        Ok(())
    }
}

/// Body measurements plus the per-colonist mass deviation sampled once at
/// creation. The deviation scales thirst/hunger growth and deprivation
/// thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyProfile {
    /// Height in cm.
    pub height: f64,
    /// Base mass in kg.
    pub mass: f64,
    /// Gaussian factor near 1.0 for an average build.
    pub mass_deviation: f64,
}

impl BodyProfile {
    pub fn derive(profile: &ColonistProfile, config: &PhysioConfig, rng: &mut impl Rng) -> Self {
        let ratio = (profile.mass / config.average_mass * profile.height / config.average_height)
            .sqrt();
        Self {
            height: profile.height,
            mass: profile.mass,
            mass_deviation: randutil::gaussian_positive(rng, ratio, 0.4),
        }
    }

    /// Body mass index, kg/m^2.
    pub fn bmi(&self) -> f64 {
        let meters = self.height / 100.0;
        self.mass / (meters * meters)
    }
}
