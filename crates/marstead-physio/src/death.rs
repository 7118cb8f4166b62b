//! Death records.
//!
//! The engine snapshots a [`DeathInfo`] at the moment of death; dependent
//! systems read it from the event stream or from the condition afterwards.

use serde::{Deserialize, Serialize};

use crate::complaint::ComplaintType;

/// What killed the colonist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// A health problem ran its course.
    Complaint(ComplaintType),
    /// Death ordered from outside the simulation, citing a nominal problem.
    PlayerTriggered(ComplaintType),
}

impl DeathCause {
    pub fn problem_type(&self) -> ComplaintType {
        match self {
            DeathCause::Complaint(kind) | DeathCause::PlayerTriggered(kind) => *kind,
        }
    }

    pub fn triggered_by_player(&self) -> bool {
        matches!(self, DeathCause::PlayerTriggered(_))
    }

    pub fn label(&self) -> String {
        match self {
            DeathCause::Complaint(kind) => kind.label().to_string(),
            DeathCause::PlayerTriggered(kind) => {
                format!("Player-triggered ({})", kind.label())
            }
        }
    }
}

impl std::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Snapshot taken when a colonist dies. Cleared again on revival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathInfo {
    pub cause: DeathCause,
    pub last_words: Option<String>,
    /// Mission time of death, millisols.
    pub time_of_death: f64,
    /// Mission sol of death.
    pub sol: i32,
}

impl DeathInfo {
    /// User-visible one-line account of the death.
    pub fn summary(&self) -> String {
        match &self.last_words {
            Some(words) => format!(
                "Died of {} on sol {}. Last words: \"{}\"",
                self.cause, self.sol, words
            ),
            None => format!("Died of {} on sol {}.", self.cause, self.sol),
        }
    }
}
