//! Per-tick health events.
//!
//! Every lifecycle transition the engine performs is reported back to the
//! caller through these values; nothing is published through globals.

use serde::{Deserialize, Serialize};

use crate::complaint::ComplaintType;

/// Life-support shortfall detected during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifeSupportFault {
    OxygenShortfall { required: f64, supplied: f64 },
    PressureLow(f64),
    TemperatureLow(f64),
    TemperatureHigh(f64),
}

impl std::fmt::Display for LifeSupportFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifeSupportFault::OxygenShortfall { required, supplied } => {
                write!(f, "oxygen shortfall ({:.4} of {:.4} kg)", supplied, required)
            }
            LifeSupportFault::PressureLow(kpa) => write!(f, "air pressure low ({:.1} kPa)", kpa),
            LifeSupportFault::TemperatureLow(c) => write!(f, "temperature low ({:.1} C)", c),
            LifeSupportFault::TemperatureHigh(c) => write!(f, "temperature high ({:.1} C)", c),
        }
    }
}

/// One entry in a tick's outcome, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealthEvent {
    ComplaintOnset(ComplaintType),
    RecoveryStarted(ComplaintType),
    ComplaintCured(ComplaintType),
    ComplaintProgressed {
        from: ComplaintType,
        to: ComplaintType,
    },
    LifeSupportFault(LifeSupportFault),
    Death {
        cause: String,
        problem: ComplaintType,
    },
    Revived,
}

impl std::fmt::Display for HealthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthEvent::ComplaintOnset(kind) => write!(f, "onset of {}", kind),
            HealthEvent::RecoveryStarted(kind) => write!(f, "recovery from {} started", kind),
            HealthEvent::ComplaintCured(kind) => write!(f, "cured of {}", kind),
            HealthEvent::ComplaintProgressed { from, to } => {
                write!(f, "{} progressed to {}", from, to)
            }
            HealthEvent::LifeSupportFault(fault) => write!(f, "life support fault: {}", fault),
            HealthEvent::Death { cause, .. } => write!(f, "death: {}", cause),
            HealthEvent::Revived => write!(f, "revived"),
        }
    }
}
