//! Life support boundary.
//!
//! The engine never touches settlement stores directly. It asks the
//! caller-supplied provider for oxygen and reads pressure and temperature;
//! the provider decides what it can actually deliver.

use serde::{Deserialize, Serialize};

/// Per-tick life support handle for one colonist's environment.
pub trait LifeSupport {
    /// Request `amount` kg of oxygen; returns the amount actually supplied.
    /// May be less than requested when stores run short.
    fn provide_oxygen(&mut self, amount: f64) -> f64;

    /// Ambient air pressure in kPa.
    fn air_pressure(&self) -> f64;

    /// Ambient temperature in Celsius.
    fn temperature(&self) -> f64;
}

/// A fixed environment backed by a finite oxygen store. Used by the headless
/// harness and tests to script nominal conditions or faults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmbientConditions {
    /// Remaining oxygen in kg.
    pub oxygen_available: f64,
    /// kPa.
    pub pressure: f64,
    /// Celsius.
    pub temperature: f64,
}

impl AmbientConditions {
    /// Habitat-normal conditions with ample oxygen.
    pub fn nominal() -> Self {
        Self {
            oxygen_available: 1_000.0,
            pressure: 34.0,
            temperature: 22.5,
        }
    }

    /// Vacuum-adjacent failure: nothing to breathe, no pressure, deep cold.
    pub fn depressurized() -> Self {
        Self {
            oxygen_available: 0.0,
            pressure: 0.7,
            temperature: -60.0,
        }
    }
}

impl Default for AmbientConditions {
    fn default() -> Self {
        Self::nominal()
    }
}

impl LifeSupport for AmbientConditions {
    fn provide_oxygen(&mut self, amount: f64) -> f64 {
        let supplied = amount.max(0.0).min(self.oxygen_available);
        self.oxygen_available -= supplied;
        supplied
    }

    fn air_pressure(&self) -> f64 {
        self.pressure
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }
}
