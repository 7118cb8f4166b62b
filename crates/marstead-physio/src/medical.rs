//! Per-colonist medical record.
//!
//! Owns the active problem list, the bounded cured history, medications, and
//! per-complaint lifetime counts. All list mutation during lifecycle
//! iteration is staged: outcomes are collected first, then applied, so a cure
//! or progression never invalidates the iteration that found it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::complaint::{ComplaintCatalog, ComplaintType};
use crate::medication::{Medication, MedicationKind};
use crate::problem::{CuredProblem, HealthProblem, ProblemState, ProblemTick};

/// State transition produced by one lifecycle pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleChange {
    StartedRecovery(ComplaintType),
    Cured(ComplaintType),
    Progressed {
        from: ComplaintType,
        to: ComplaintType,
    },
    /// The engine routes fatal outcomes into death handling.
    Fatal(ComplaintType),
}

/// Active problems, cured history, medications, and recurrence counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    problems: Vec<HealthProblem>,
    cured_history: Vec<CuredProblem>,
    medications: Vec<Medication>,
    occurrence_counts: BTreeMap<ComplaintType, u32>,
    history_cap: usize,
}

impl MedicalRecord {
    pub fn new(history_cap: usize) -> Self {
        Self {
            problems: Vec::new(),
            cured_history: Vec::new(),
            medications: Vec::new(),
            occurrence_counts: BTreeMap::new(),
            history_cap,
        }
    }

    /// Registers a new problem. Idempotent: returns `false` without touching
    /// anything when a problem of that type is already on the record.
    pub fn add(&mut self, kind: ComplaintType, now_msol: f64) -> bool {
        if self.problems.iter().any(|p| p.complaint_type() == kind) {
            return false;
        }
        self.problems.push(HealthProblem::new(kind, now_msol));
        *self.occurrence_counts.entry(kind).or_insert(0) += 1;
        true
    }

    /// Advances every problem and medication by one pulse, staged.
    pub fn tick(
        &mut self,
        elapsed: f64,
        now_msol: f64,
        catalog: &ComplaintCatalog,
    ) -> Vec<LifecycleChange> {
        // Collect.
        let mut outcomes: Vec<(usize, ProblemTick)> = Vec::new();
        for (idx, problem) in self.problems.iter_mut().enumerate() {
            let Some(template) = catalog.get(problem.complaint_type()) else {
                continue;
            };
            match problem.advance(elapsed, template) {
                ProblemTick::Continue => {}
                outcome => outcomes.push((idx, outcome)),
            }
        }

        // Apply.
        let mut changes = Vec::new();
        let mut remove: Vec<usize> = Vec::new();
        let mut successors: Vec<ComplaintType> = Vec::new();
        for (idx, outcome) in outcomes {
            let kind = self.problems[idx].complaint_type();
            match outcome {
                ProblemTick::StartedRecovery => {
                    changes.push(LifecycleChange::StartedRecovery(kind));
                }
                ProblemTick::Cured => {
                    changes.push(LifecycleChange::Cured(kind));
                    remove.push(idx);
                }
                ProblemTick::Progressed(next) => {
                    changes.push(LifecycleChange::Progressed { from: kind, to: next });
                    remove.push(idx);
                    successors.push(next);
                }
                ProblemTick::Fatal => {
                    changes.push(LifecycleChange::Fatal(kind));
                }
                ProblemTick::Continue => {}
            }
        }
        for idx in remove.into_iter().rev() {
            let resolved = self.problems.remove(idx);
            self.archive(&resolved, now_msol);
        }
        for next in successors {
            self.add(next, now_msol);
        }

        // Medications run down with time; a dose whose target was just cured
        // has nothing left to treat.
        for med in &mut self.medications {
            med.advance(elapsed);
        }
        let cured: Vec<ComplaintType> = changes
            .iter()
            .filter_map(|change| match change {
                LifecycleChange::Cured(kind) => Some(*kind),
                _ => None,
            })
            .collect();
        self.medications
            .retain(|med| !med.expired() && !cured.contains(&med.kind.treats()));

        changes
    }

    /// Immediate cure, used by the threshold detectors. Archives the problem
    /// and drops medications that targeted it.
    pub fn cure(&mut self, kind: ComplaintType, now_msol: f64) -> bool {
        let Some(idx) = self.problems.iter().position(|p| {
            p.complaint_type() == kind && p.state() != ProblemState::Dead
        }) else {
            return false;
        };
        let mut resolved = self.problems.remove(idx);
        resolved.cure();
        self.archive(&resolved, now_msol);
        self.medications.retain(|med| med.kind.treats() != kind);
        true
    }

    /// Moves a degrading problem of the given type into recovery.
    pub fn start_recovery(&mut self, kind: ComplaintType) -> bool {
        for problem in &mut self.problems {
            if problem.complaint_type() == kind && problem.state() == ProblemState::Degrading {
                problem.start_recovery();
                return true;
            }
        }
        false
    }

    /// Administers a dose. An active problem matching the medication's target
    /// is flagged for recovery when its degrade period runs out.
    pub fn add_medication(&mut self, med: Medication) {
        let target = med.kind.treats();
        for problem in &mut self.problems {
            if problem.complaint_type() == target && problem.is_active() {
                problem.seek_recovery();
            }
        }
        self.medications.push(med);
    }

    /// Highest-seriousness problem on the record; first onset wins ties.
    /// A problem that has killed outranks every live one.
    pub fn most_serious(&self, catalog: &ComplaintCatalog) -> Option<&HealthProblem> {
        let mut best: Option<(&HealthProblem, (bool, u32))> = None;
        for problem in &self.problems {
            let Some(template) = catalog.get(problem.complaint_type()) else {
                continue;
            };
            let rank = (
                problem.state() == ProblemState::Dead,
                problem.seriousness(template),
            );
            match best {
                Some((_, r)) if r >= rank => {}
                _ => best = Some((problem, rank)),
            }
        }
        best.map(|(problem, _)| problem)
    }

    pub fn problems(&self) -> &[HealthProblem] {
        &self.problems
    }

    pub fn problem(&self, kind: ComplaintType) -> Option<&HealthProblem> {
        self.problems.iter().find(|p| p.complaint_type() == kind)
    }

    pub fn problem_mut(&mut self, kind: ComplaintType) -> Option<&mut HealthProblem> {
        self.problems.iter_mut().find(|p| p.complaint_type() == kind)
    }

    pub fn cured_history(&self) -> &[CuredProblem] {
        &self.cured_history
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn is_active(&self, kind: ComplaintType) -> bool {
        self.problem(kind).map(|p| p.is_active()).unwrap_or(false)
    }

    pub fn state_of(&self, kind: ComplaintType) -> Option<ProblemState> {
        self.problem(kind).map(|p| p.state())
    }

    pub fn medication_active(&self, kind: MedicationKind) -> bool {
        self.medications
            .iter()
            .any(|med| med.kind == kind && !med.expired())
    }

    /// Lifetime onset count for a complaint, recurrence-tendency input.
    pub fn occurrence_count(&self, kind: ComplaintType) -> u32 {
        self.occurrence_counts.get(&kind).copied().unwrap_or(0)
    }

    fn archive(&mut self, problem: &HealthProblem, now_msol: f64) {
        self.cured_history.push(CuredProblem {
            complaint_type: problem.complaint_type(),
            onset_msol: problem.onset_msol(),
            cured_msol: now_msol,
        });
        while self.cured_history.len() > self.history_cap {
            self.cured_history.remove(0);
        }
    }
}
