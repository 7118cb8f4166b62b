//! Cumulative radiation dose tracking.
//!
//! Counters are kept per body region over three horizons. The engine only
//! consumes the cached [`RadiationExposure::is_sick`] flag; dose bookkeeping
//! is driven by whatever environment model the caller runs.

use serde::{Deserialize, Serialize};

use crate::clock::SimPulse;

/// Sols in the rolling thirty-day window.
const THIRTY_DAY_WINDOW: f64 = 30.0;
/// Sols in one Mars year, for annual-counter decay.
const SOLS_PER_YEAR: f64 = 668.0;

/// Dose-significant body regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyRegion {
    /// Blood-forming organs.
    BFO,
    Ocular,
    Skin,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 3] = [BodyRegion::BFO, BodyRegion::Ocular, BodyRegion::Skin];
}

/// Accumulated dose for one region, mSv.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DoseRecord {
    pub thirty_day: f64,
    pub annual: f64,
    pub career: f64,
}

/// Exposure limits for one region, mSv.
#[derive(Debug, Clone, Copy)]
pub struct DoseLimits {
    pub thirty_day: f64,
    pub annual: f64,
    pub career: f64,
}

const BFO_LIMITS: DoseLimits = DoseLimits {
    thirty_day: 250.0,
    annual: 500.0,
    career: 1000.0,
};
const OCULAR_LIMITS: DoseLimits = DoseLimits {
    thirty_day: 1000.0,
    annual: 2000.0,
    career: 4000.0,
};
const SKIN_LIMITS: DoseLimits = DoseLimits {
    thirty_day: 1500.0,
    annual: 3000.0,
    career: 6000.0,
};

pub fn limits_for(region: BodyRegion) -> DoseLimits {
    match region {
        BodyRegion::BFO => BFO_LIMITS,
        BodyRegion::Ocular => OCULAR_LIMITS,
        BodyRegion::Skin => SKIN_LIMITS,
    }
}

/// Per-colonist dose counters plus the cached over-limit flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadiationExposure {
    bfo: DoseRecord,
    ocular: DoseRecord,
    skin: DoseRecord,
    sick: bool,
}

impl RadiationExposure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dose(&self, region: BodyRegion) -> &DoseRecord {
        match region {
            BodyRegion::BFO => &self.bfo,
            BodyRegion::Ocular => &self.ocular,
            BodyRegion::Skin => &self.skin,
        }
    }

    fn dose_mut(&mut self, region: BodyRegion) -> &mut DoseRecord {
        match region {
            BodyRegion::BFO => &mut self.bfo,
            BodyRegion::Ocular => &mut self.ocular,
            BodyRegion::Skin => &mut self.skin,
        }
    }

    /// Adds dose to every horizon of a region and refreshes the sick flag.
    pub fn add_dose(&mut self, region: BodyRegion, msv: f64) {
        if msv <= 0.0 {
            return;
        }
        let record = self.dose_mut(region);
        record.thirty_day += msv;
        record.annual += msv;
        record.career += msv;
        self.refresh_sick_flag();
    }

    /// Removes dose (treatment), floored at zero per horizon.
    pub fn reduce_dose(&mut self, region: BodyRegion, msv: f64) {
        if msv <= 0.0 {
            return;
        }
        let record = self.dose_mut(region);
        record.thirty_day = (record.thirty_day - msv).max(0.0);
        record.annual = (record.annual - msv).max(0.0);
        record.career = (record.career - msv).max(0.0);
        self.refresh_sick_flag();
    }

    /// Decays the windowed counters on sol boundaries. Career dose never
    /// decays.
    pub fn advance(&mut self, pulse: &SimPulse) {
        if !pulse.is_new_sol {
            return;
        }
        for region in BodyRegion::ALL {
            let record = self.dose_mut(region);
            record.thirty_day -= record.thirty_day / THIRTY_DAY_WINDOW;
            record.annual -= record.annual / SOLS_PER_YEAR;
        }
        self.refresh_sick_flag();
    }

    /// True while any region exceeds a horizon limit.
    pub fn is_sick(&self) -> bool {
        self.sick
    }

    fn refresh_sick_flag(&mut self) {
        self.sick = BodyRegion::ALL.into_iter().any(|region| {
            let record = self.dose(region);
            let limits = limits_for(region);
            record.thirty_day > limits.thirty_day
                || record.annual > limits.annual
                || record.career > limits.career
        });
    }
}
