//! Medications with a limited active duration.

use serde::{Deserialize, Serialize};

use crate::complaint::ComplaintType;

/// Standard duration of a radioprotective dose, millisols.
pub const RADIOPROTECTIVE_DURATION: f64 = 1_000.0;
/// Standard duration of an anxiety medication dose, millisols.
pub const ANXIETY_MEDICATION_DURATION: f64 = 200.0;

/// Kinds of medication the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicationKind {
    /// Drives recovery from radiation sickness while active.
    RadioprotectiveAgent,
    /// Drives recovery from a panic attack while active.
    AnxietyMedication,
}

impl MedicationKind {
    /// Complaint this medication treats.
    pub fn treats(&self) -> ComplaintType {
        match self {
            MedicationKind::RadioprotectiveAgent => ComplaintType::RadiationSickness,
            MedicationKind::AnxietyMedication => ComplaintType::PanicAttack,
        }
    }

    pub fn standard_duration(&self) -> f64 {
        match self {
            MedicationKind::RadioprotectiveAgent => RADIOPROTECTIVE_DURATION,
            MedicationKind::AnxietyMedication => ANXIETY_MEDICATION_DURATION,
        }
    }
}

/// One administered dose, counting down to expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub kind: MedicationKind,
    /// Remaining active time, millisols.
    pub remaining: f64,
}

impl Medication {
    pub fn new(kind: MedicationKind) -> Self {
        Self {
            kind,
            remaining: kind.standard_duration(),
        }
    }

    pub fn advance(&mut self, elapsed: f64) {
        self.remaining -= elapsed;
    }

    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }
}
