//! Rolling per-sol consumption totals.
//!
//! The engine records what a colonist actually consumed; limits and rationing
//! policy belong to the caller. Frames older than [`MAX_SOLS`] are evicted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Retained history depth, sols, counting today's partial frame.
pub const MAX_SOLS: usize = 7;

/// Tracked consumable categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceCategory {
    Food,
    Meal,
    Dessert,
    Water,
    Oxygen,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 5] = [
        ResourceCategory::Food,
        ResourceCategory::Meal,
        ResourceCategory::Dessert,
        ResourceCategory::Water,
        ResourceCategory::Oxygen,
    ];

    fn index(&self) -> usize {
        match self {
            ResourceCategory::Food => 0,
            ResourceCategory::Meal => 1,
            ResourceCategory::Dessert => 2,
            ResourceCategory::Water => 3,
            ResourceCategory::Oxygen => 4,
        }
    }
}

/// Totals for one sol, indexed by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SolFrame {
    totals: [f64; 5],
}

/// Per-colonist rolling consumption window. Newest frame is today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionLedger {
    frames: VecDeque<SolFrame>,
}

impl ConsumptionLedger {
    pub fn new() -> Self {
        let mut frames = VecDeque::with_capacity(MAX_SOLS);
        frames.push_back(SolFrame::default());
        Self { frames }
    }

    /// Adds into today's frame. Non-positive amounts are ignored.
    pub fn record(&mut self, category: ResourceCategory, amount: f64) {
        if amount <= 0.0 || !amount.is_finite() {
            return;
        }
        if let Some(frame) = self.frames.back_mut() {
            frame.totals[category.index()] += amount;
        }
    }

    /// Rotates the window on a sol boundary.
    pub fn start_sol(&mut self) {
        self.frames.push_back(SolFrame::default());
        while self.frames.len() > MAX_SOLS {
            self.frames.pop_front();
        }
    }

    /// Total consumed so far today.
    pub fn today(&self, category: ResourceCategory) -> f64 {
        self.frames
            .back()
            .map(|frame| frame.totals[category.index()])
            .unwrap_or(0.0)
    }

    /// Weighted per-sol average over the retained window. The newest frame
    /// carries the greatest linear weight, so recent habits dominate.
    pub fn daily_average(&self, category: ResourceCategory) -> f64 {
        let n = self.frames.len();
        if n == 0 {
            return 0.0;
        }
        let idx = category.index();
        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for (i, frame) in self.frames.iter().enumerate() {
            // Oldest frame gets weight 1, today gets weight n.
            let weight = (i + 1) as f64;
            weighted += frame.totals[idx] * weight;
            weight_sum += weight;
        }
        weighted / weight_sum
    }

    /// True when today's total exceeds a caller-supplied limit.
    pub fn exceeded_daily_limit(&self, category: ResourceCategory, limit: f64) -> bool {
        self.today(category) > limit
    }

    /// Retained frame count, including today.
    pub fn sols_retained(&self) -> usize {
        self.frames.len()
    }
}

impl Default for ConsumptionLedger {
    fn default() -> Self {
        Self::new()
    }
}
