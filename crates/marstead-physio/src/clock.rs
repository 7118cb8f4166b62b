//! Simulation time pulses.
//!
//! The scheduler that owns colonists hands the engine one [`SimPulse`] per
//! tick: an elapsed span in millisols plus calendar markers. One sol is
//! 1000 millisols. The engine never keeps its own wall clock.

use serde::{Deserialize, Serialize};

/// Millisols per sol.
pub const MSOLS_PER_SOL: f64 = 1000.0;

/// One simulation tick handed to the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimPulse {
    /// Elapsed time in millisols since the previous pulse.
    pub elapsed: f64,
    /// True on the first pulse of a new sol.
    pub is_new_sol: bool,
    /// True when the integer millisol advanced with this pulse.
    pub is_new_msol: bool,
    /// Integer millisol of the current sol, 0..=999.
    pub msol_int: i32,
    /// Mission sol count, starting at 1.
    pub mission_sol: i32,
}

impl SimPulse {
    /// Rejects pulses a scheduler should never produce. A negative elapsed
    /// span is an upstream bug and must not be clamped away.
    pub fn validate(&self) -> Result<(), TickError> {
        if !self.elapsed.is_finite() {
            return Err(TickError::NonFiniteElapsed);
        }
        if self.elapsed < 0.0 {
            return Err(TickError::NegativeElapsed(self.elapsed));
        }
        Ok(())
    }
}

/// Invalid tick input.
#[derive(Debug)]
pub enum TickError {
    NegativeElapsed(f64),
    NonFiniteElapsed,
}

impl std::fmt::Display for TickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickError::NegativeElapsed(e) => {
                write!(f, "negative elapsed time in pulse: {}", e)
            }
            TickError::NonFiniteElapsed => write!(f, "non-finite elapsed time in pulse"),
        }
    }
}

impl std::error::Error for TickError {}

/// Fixed-step pulse generator for tests and headless runs.
///
/// Derives the calendar markers the same way the host scheduler does: a new
/// integer millisol when the integer part advances, a new sol on rollover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseClock {
    time_msol: f64,
    last_msol_int: i32,
    last_sol: i32,
}

impl PulseClock {
    pub fn new() -> Self {
        Self {
            time_msol: 0.0,
            last_msol_int: 0,
            last_sol: 1,
        }
    }

    /// Total mission time in millisols.
    pub fn mission_msol(&self) -> f64 {
        self.time_msol
    }

    pub fn mission_sol(&self) -> i32 {
        1 + (self.time_msol / MSOLS_PER_SOL) as i32
    }

    pub fn msol_int(&self) -> i32 {
        (self.time_msol % MSOLS_PER_SOL) as i32
    }

    /// Advance by `elapsed` millisols and produce the pulse for that step.
    pub fn advance(&mut self, elapsed: f64) -> SimPulse {
        self.time_msol += elapsed;
        let sol = self.mission_sol();
        let msol = self.msol_int();

        let pulse = SimPulse {
            elapsed,
            is_new_sol: sol != self.last_sol,
            is_new_msol: msol != self.last_msol_int,
            msol_int: msol,
            mission_sol: sol,
        };
        self.last_sol = sol;
        self.last_msol_int = msol;
        pulse
    }
}

impl Default for PulseClock {
    fn default() -> Self {
        Self::new()
    }
}
