//! Compact circadian proxy: paired satiety hormones feeding appetite.
//!
//! Ghrelin climbs with waking time and falls on eating; leptin does the
//! opposite. The engine reads only the surplus, which shifts appetite by up
//! to a couple of percent either way per the appetite formula.

use serde::{Deserialize, Serialize};

const HORMONE_MAX: f64 = 400.0;
const BASELINE: f64 = 200.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CircadianRhythm {
    leptin: f64,
    ghrelin: f64,
}

impl CircadianRhythm {
    pub fn new() -> Self {
        Self {
            leptin: BASELINE,
            ghrelin: BASELINE,
        }
    }

    /// Hunger-hormone surplus, positive when overdue for a meal.
    pub fn surplus(&self) -> f64 {
        self.ghrelin - self.leptin
    }

    pub fn leptin(&self) -> f64 {
        self.leptin
    }

    pub fn ghrelin(&self) -> f64 {
        self.ghrelin
    }

    /// Waking drift: ghrelin rises, leptin falls.
    pub fn advance(&mut self, elapsed: f64) {
        self.ghrelin = (self.ghrelin + elapsed * 0.15).min(HORMONE_MAX);
        self.leptin = (self.leptin - elapsed * 0.10).max(0.0);
    }

    /// Eating response, scaled by energy gained in MJ.
    pub fn eat_food(&mut self, energy_mj: f64) {
        self.leptin = (self.leptin + energy_mj * 100.0).min(HORMONE_MAX);
        self.ghrelin = (self.ghrelin - energy_mj * 80.0).max(0.0);
    }

    /// Overnight renormalization toward baseline.
    pub fn new_sol(&mut self) {
        self.leptin += (BASELINE - self.leptin) * 0.1;
        self.ghrelin += (BASELINE - self.ghrelin) * 0.1;
    }
}

impl Default for CircadianRhythm {
    fn default() -> Self {
        Self::new()
    }
}
