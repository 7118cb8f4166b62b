//! Engine configuration and per-colonist profiles.
//!
//! All rates and thresholds are supplied at construction and never change
//! afterwards. There are no global registries: callers build a
//! [`PhysioContext`] once and pass it by reference into every engine call.

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::complaint::{ComplaintCatalog, ComplaintType};

/// Global physiological rates and thresholds.
///
/// Values are per sol unless noted. The defaults describe a healthy adult
/// under settlement conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysioConfig {
    /// O2 consumption while performing a resting task, kg/sol.
    pub low_o2_rate: f64,
    /// O2 consumption under normal workload, kg/sol.
    pub nominal_o2_rate: f64,
    /// Water consumption, kg/sol.
    pub water_rate: f64,
    /// Food consumption, kg/sol.
    pub food_rate: f64,
    /// Dessert consumption, kg/sol.
    pub dessert_rate: f64,
    /// Minimum survivable air pressure, kPa.
    pub min_air_pressure: f64,
    /// Minimum survivable temperature, Celsius.
    pub min_temperature: f64,
    /// Maximum survivable temperature, Celsius.
    pub max_temperature: f64,
    /// Sols without food before starvation sets in (population mean).
    pub starvation_start_sols: f64,
    /// Sols without water before dehydration sets in (population mean).
    pub dehydration_start_sols: f64,
    /// Standard daily energy intake, kJ.
    pub standard_daily_energy_intake: f64,
    /// Population average body mass, kg.
    pub average_mass: f64,
    /// Population average height, cm.
    pub average_height: f64,
    /// Retained entries in the cured-problem history.
    pub cured_history_cap: usize,
}

impl Default for PhysioConfig {
    fn default() -> Self {
        Self {
            low_o2_rate: 0.42,
            nominal_o2_rate: 0.84,
            water_rate: 2.0,
            food_rate: 0.62,
            dessert_rate: 0.3,
            min_air_pressure: 25.0,
            min_temperature: 0.0,
            max_temperature: 48.0,
            starvation_start_sols: 2.0,
            dehydration_start_sols: 1.0,
            standard_daily_energy_intake: 10_100.0,
            average_mass: 62.5,
            average_height: 169.5,
            cured_history_cap: 20,
        }
    }
}

impl PhysioConfig {
    /// Checks every rate and bound. Construction of an engine fails on the
    /// first violation; no fallback value is synthesized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("low_o2_rate", self.low_o2_rate),
            ("nominal_o2_rate", self.nominal_o2_rate),
            ("water_rate", self.water_rate),
            ("food_rate", self.food_rate),
            ("dessert_rate", self.dessert_rate),
            ("min_air_pressure", self.min_air_pressure),
            ("starvation_start_sols", self.starvation_start_sols),
            ("dehydration_start_sols", self.dehydration_start_sols),
            ("standard_daily_energy_intake", self.standard_daily_energy_intake),
            ("average_mass", self.average_mass),
            ("average_height", self.average_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.max_temperature <= self.min_temperature {
            return Err(ConfigError::InvertedBounds {
                field: "temperature",
                min: self.min_temperature,
                max: self.max_temperature,
            });
        }
        if self.cured_history_cap == 0 {
            return Err(ConfigError::NonPositive {
                field: "cured_history_cap",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Fixed traits of one colonist, supplied by the demographic generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonistProfile {
    pub name: String,
    /// Age in Earth years.
    pub age: u32,
    /// Height in cm.
    pub height: f64,
    /// Base body mass in kg.
    pub mass: f64,
    pub attributes: Attributes,
    /// Meal preference score in [-10, 10]; feeds appetite.
    pub meal_preference: f64,
}

impl ColonistProfile {
    /// A 35-year-old colonist of average build. Handy for tests and the
    /// headless harness.
    pub fn nominal(name: &str) -> Self {
        Self {
            name: name.to_string(),
            age: 35,
            height: 169.5,
            mass: 62.5,
            attributes: Attributes::new(50, 50, 50),
            meal_preference: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.age == 0 || self.age > 120 {
            return Err(ConfigError::OutOfRange {
                field: "age",
                value: self.age as f64,
                min: 1.0,
                max: 120.0,
            });
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "height",
                value: self.height,
            });
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "mass",
                value: self.mass,
            });
        }
        self.attributes.validate()?;
        if !(-10.0..=10.0).contains(&self.meal_preference) {
            return Err(ConfigError::OutOfRange {
                field: "meal_preference",
                value: self.meal_preference,
                min: -10.0,
                max: 10.0,
            });
        }
        Ok(())
    }
}

/// Everything the engine reads but never writes: rates plus the complaint
/// catalog. Built once, passed by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysioContext {
    pub config: PhysioConfig,
    pub catalog: ComplaintCatalog,
}

impl PhysioContext {
    pub fn new(config: PhysioConfig, catalog: ComplaintCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, catalog })
    }

    /// Default rates with the standard complaint catalog.
    pub fn standard() -> Self {
        Self {
            config: PhysioConfig::default(),
            catalog: ComplaintCatalog::standard(),
        }
    }
}

/// Invalid construction input. Always fatal; the engine cannot run on a
/// partial configuration.
#[derive(Debug)]
pub enum ConfigError {
    NonPositive {
        field: &'static str,
        value: f64,
    },
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    InvertedBounds {
        field: &'static str,
        min: f64,
        max: f64,
    },
    EmptyCatalog,
    /// A complaint's next phase names a type missing from the catalog.
    MissingComplaint(ComplaintType),
    BadComplaintField {
        kind: ComplaintType,
        field: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "config field {} must be positive, got {}", field, value)
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "config field {} out of range: {} not in [{}, {}]",
                field, value, min, max
            ),
            ConfigError::InvertedBounds { field, min, max } => {
                write!(f, "config bounds for {} inverted: min {} >= max {}", field, min, max)
            }
            ConfigError::EmptyCatalog => write!(f, "complaint catalog is empty"),
            ConfigError::MissingComplaint(kind) => {
                write!(f, "complaint catalog is missing {}", kind.label())
            }
            ConfigError::BadComplaintField { kind, field } => {
                write!(f, "complaint {} has invalid {}", kind.label(), field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PhysioConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let config = PhysioConfig {
            water_rate: -1.0,
            ..PhysioConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "water_rate", .. })
        ));
    }

    #[test]
    fn test_inverted_temperature_bounds_rejected() {
        let config = PhysioConfig {
            min_temperature: 50.0,
            max_temperature: 10.0,
            ..PhysioConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_nominal_profile_is_valid() {
        assert!(ColonistProfile::nominal("Tester").validate().is_ok());
    }

    #[test]
    fn test_profile_age_bounds() {
        let mut profile = ColonistProfile::nominal("Tester");
        profile.age = 0;
        assert!(profile.validate().is_err());
        profile.age = 121;
        assert!(profile.validate().is_err());
        profile.age = 80;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_context_standard_builds() {
        let ctx = PhysioContext::standard();
        assert!(ctx.config.validate().is_ok());
        assert!(!ctx.catalog.is_empty());
    }
}
