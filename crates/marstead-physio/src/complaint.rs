//! Medical complaint templates.
//!
//! A [`Complaint`] is the static description of a condition: how serious it
//! is, how it progresses, and how it caps performance. Active instances live
//! in the medical record as health problems; this module only defines the
//! catalog the engine draws from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Closed set of conditions the engine can produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ComplaintType {
    // Environment and deprivation, created by the engine's own checks.
    Suffocation,
    Decompression,
    Freezing,
    HeatStroke,
    Starvation,
    Dehydration,
    PanicAttack,
    RadiationSickness,
    // Random ailments.
    PulledMuscle,
    Laceration,
    MinorBurns,
    Appendicitis,
    RupturedAppendix,
    Flu,
    FoodPoisoning,
    HighFatigueCollapse,
}

impl ComplaintType {
    pub const ALL: [ComplaintType; 16] = [
        ComplaintType::Suffocation,
        ComplaintType::Decompression,
        ComplaintType::Freezing,
        ComplaintType::HeatStroke,
        ComplaintType::Starvation,
        ComplaintType::Dehydration,
        ComplaintType::PanicAttack,
        ComplaintType::RadiationSickness,
        ComplaintType::PulledMuscle,
        ComplaintType::Laceration,
        ComplaintType::MinorBurns,
        ComplaintType::Appendicitis,
        ComplaintType::RupturedAppendix,
        ComplaintType::Flu,
        ComplaintType::FoodPoisoning,
        ComplaintType::HighFatigueCollapse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintType::Suffocation => "Suffocation",
            ComplaintType::Decompression => "Decompression",
            ComplaintType::Freezing => "Freezing",
            ComplaintType::HeatStroke => "Heat Stroke",
            ComplaintType::Starvation => "Starvation",
            ComplaintType::Dehydration => "Dehydration",
            ComplaintType::PanicAttack => "Panic Attack",
            ComplaintType::RadiationSickness => "Radiation Sickness",
            ComplaintType::PulledMuscle => "Pulled Muscle",
            ComplaintType::Laceration => "Laceration",
            ComplaintType::MinorBurns => "Minor Burns",
            ComplaintType::Appendicitis => "Appendicitis",
            ComplaintType::RupturedAppendix => "Ruptured Appendix",
            ComplaintType::Flu => "Flu",
            ComplaintType::FoodPoisoning => "Food Poisoning",
            ComplaintType::HighFatigueCollapse => "High Fatigue Collapse",
        }
    }
}

impl std::fmt::Display for ComplaintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical effort classes, ordered. A complaint gated on `High` cannot fire
/// while the colonist performs a `Low` or `None` effort task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PhysicalEffort {
    None,
    Low,
    High,
}

/// Static template for one condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub kind: ComplaintType,
    /// 1..=100; drives most-serious selection.
    pub seriousness: u32,
    /// Millisols in the degrading state before autonomous progression.
    /// Zero means the state is owned by a detector or the environment.
    pub degrade_period: f64,
    /// Millisols from recovery start to cure.
    pub recovery_period: f64,
    /// Performance cap while degrading, in [0, 1].
    pub performance_factor: f64,
    /// Base probability per ailment window; zero disables random onset.
    pub random_probability: f64,
    /// Minimum task effort for random onset.
    pub effort_influence: PhysicalEffort,
    /// Worse condition this one progresses into when the degrade period
    /// runs out.
    pub next_phase: Option<ComplaintType>,
    /// Degrade completion with no next phase kills instead of recovering.
    pub fatal_if_unresolved: bool,
}

/// Validated template table, keyed and iterated in a stable order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintCatalog {
    entries: BTreeMap<ComplaintType, Complaint>,
}

impl ComplaintCatalog {
    /// Builds a catalog from templates, rejecting inconsistent tables.
    pub fn from_entries(entries: Vec<Complaint>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.seriousness == 0 || entry.seriousness > 100 {
                return Err(ConfigError::BadComplaintField {
                    kind: entry.kind,
                    field: "seriousness",
                });
            }
            if !(0.0..=1.0).contains(&entry.performance_factor) {
                return Err(ConfigError::BadComplaintField {
                    kind: entry.kind,
                    field: "performance_factor",
                });
            }
            if !entry.degrade_period.is_finite() || entry.degrade_period < 0.0 {
                return Err(ConfigError::BadComplaintField {
                    kind: entry.kind,
                    field: "degrade_period",
                });
            }
            if !entry.recovery_period.is_finite() || entry.recovery_period < 0.0 {
                return Err(ConfigError::BadComplaintField {
                    kind: entry.kind,
                    field: "recovery_period",
                });
            }
            if !entry.random_probability.is_finite() || entry.random_probability < 0.0 {
                return Err(ConfigError::BadComplaintField {
                    kind: entry.kind,
                    field: "random_probability",
                });
            }
            map.insert(entry.kind, entry);
        }
        for entry in map.values() {
            if let Some(next) = entry.next_phase {
                if !map.contains_key(&next) {
                    return Err(ConfigError::MissingComplaint(next));
                }
            }
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, kind: ComplaintType) -> Option<&Complaint> {
        self.entries.get(&kind)
    }

    /// Templates in stable key order, so random-ailment sweeps are
    /// reproducible under a seeded RNG.
    pub fn entries(&self) -> impl Iterator<Item = &Complaint> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The standard table covering every [`ComplaintType`].
    pub fn standard() -> Self {
        let make = |kind,
                    seriousness,
                    degrade_period,
                    recovery_period,
                    performance_factor,
                    random_probability,
                    effort_influence,
                    next_phase,
                    fatal_if_unresolved| Complaint {
            kind,
            seriousness,
            degrade_period,
            recovery_period,
            performance_factor,
            random_probability,
            effort_influence,
            next_phase,
            fatal_if_unresolved,
        };

        use ComplaintType::*;
        use PhysicalEffort as E;
        let entries = vec![
            make(Suffocation, 100, 25.0, 80.0, 0.1, 0.0, E::None, None, true),
            make(Decompression, 100, 15.0, 60.0, 0.1, 0.0, E::None, None, true),
            make(Freezing, 80, 200.0, 200.0, 0.3, 0.0, E::None, None, true),
            make(HeatStroke, 80, 200.0, 200.0, 0.3, 0.0, E::None, None, true),
            make(Starvation, 60, 0.0, 500.0, 0.5, 0.0, E::None, None, false),
            make(Dehydration, 60, 0.0, 300.0, 0.5, 0.0, E::None, None, false),
            make(PanicAttack, 30, 0.0, 200.0, 0.6, 0.0, E::None, None, false),
            make(RadiationSickness, 70, 0.0, 400.0, 0.4, 0.0, E::None, None, false),
            make(PulledMuscle, 15, 300.0, 600.0, 0.8, 15.0, E::High, None, false),
            make(Laceration, 20, 200.0, 500.0, 0.85, 8.0, E::Low, None, false),
            make(MinorBurns, 25, 250.0, 700.0, 0.8, 5.0, E::Low, None, false),
            make(
                Appendicitis,
                60,
                1500.0,
                2000.0,
                0.5,
                1.5,
                E::None,
                Some(RupturedAppendix),
                false,
            ),
            make(RupturedAppendix, 95, 3000.0, 4000.0, 0.2, 0.0, E::None, None, true),
            make(Flu, 30, 1000.0, 2000.0, 0.75, 4.0, E::None, None, false),
            make(FoodPoisoning, 40, 400.0, 800.0, 0.6, 3.0, E::None, None, false),
            make(HighFatigueCollapse, 35, 100.0, 500.0, 0.3, 2.0, E::High, None, false),
        ];

        let mut map = BTreeMap::new();
        for entry in entries {
            map.insert(entry.kind, entry);
        }
        Self { entries: map }
    }
}
