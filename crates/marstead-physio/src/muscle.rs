//! Musculoskeletal condition.
//!
//! Three slow-moving indices in [0, 100]. Exercise builds tolerance and
//! health and works soreness off; idle time drifts the other way. The
//! derived factors feed stress handling and the performance calculation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound for each index.
const INDEX_MAX: f64 = 100.0;
/// Per-millisol drift scale for exercise and atrophy.
const DRIFT_RATE: f64 = 0.001;

/// Pain tolerance, soreness, and overall muscle health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleModel {
    pain_tolerance: f64,
    soreness: f64,
    health: f64,
}

impl MuscleModel {
    /// Rolls a starting condition from the composite attribute score.
    /// Stronger colonists start with more tolerance and less soreness.
    pub fn new(score: f64, rng: &mut impl Rng) -> Self {
        let r1: f64 = rng.gen_range(0.0..1.0);
        let r2: f64 = rng.gen_range(0.0..1.0);
        let r3: f64 = rng.gen_range(0.0..1.0);
        let pain_tolerance = ((0.5 + r1 * 0.5) * 50.0 * score).clamp(0.0, INDEX_MAX);
        let soreness = ((0.5 + r2 * 0.5) * (INDEX_MAX - pain_tolerance)).clamp(0.0, INDEX_MAX);
        let base_health = (50.0 + pain_tolerance - soreness).clamp(0.0, INDEX_MAX);
        let health = ((0.5 + r3 * 0.5) * base_health).clamp(0.0, INDEX_MAX);
        Self {
            pain_tolerance,
            soreness,
            health,
        }
    }

    pub fn pain_tolerance(&self) -> f64 {
        self.pain_tolerance
    }

    pub fn soreness(&self) -> f64 {
        self.soreness
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    /// Hypertrophy from a workout of `duration` millisols.
    pub fn exercise(&mut self, duration: f64, score: f64) {
        let delta = (1.0 + score / 4.0) * DRIFT_RATE * duration;
        self.pain_tolerance = (self.pain_tolerance + delta).min(INDEX_MAX);
        self.health = (self.health + delta).min(INDEX_MAX);
        self.soreness = (self.soreness - delta / 2.0).max(0.0);
    }

    /// Atrophy over `duration` millisols of rest.
    pub fn relax(&mut self, duration: f64, score: f64) {
        let delta = (1.0 - score / 4.0) * DRIFT_RATE * duration;
        self.pain_tolerance = (self.pain_tolerance - delta).max(0.0);
        self.health = (self.health - delta / 2.0).max(0.0);
        self.soreness = (self.soreness + delta / 2.0).min(INDEX_MAX);
    }

    /// Divides stress gain and multiplies stress relief, in [1, 1.5].
    pub fn pain_tolerance_factor(&self) -> f64 {
        1.0 + self.pain_tolerance / 200.0
    }

    /// Multiplies the performance result before the final clamp.
    pub fn soreness_factor(&self) -> f64 {
        1.0 + self.soreness / 200.0
    }

    pub fn health_factor(&self) -> f64 {
        1.0 + self.health / 200.0
    }
}
