//! Health problem state machine.
//!
//! A problem is one active instance of a complaint. Problems with a positive
//! degrade period progress on their own clock; zero-period problems
//! (deprivation, environment, radiation) are moved between states by the
//! engine's detectors. Recovery always completes on the problem's own clock.

use serde::{Deserialize, Serialize};

use crate::complaint::{Complaint, ComplaintType};

/// Lifecycle states of an active problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemState {
    Degrading,
    Recovering,
    Cured,
    Dead,
}

/// Outcome of advancing one problem by one pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemTick {
    Continue,
    StartedRecovery,
    Cured,
    /// Degraded into a worse condition; the record swaps the instances.
    Progressed(ComplaintType),
    /// Ran its degrade period out with no successor and no recovery.
    Fatal,
}

/// One active instance of a complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProblem {
    complaint_type: ComplaintType,
    state: ProblemState,
    /// Mission time at onset, millisols.
    onset_msol: f64,
    /// Time accumulated in the current state, millisols.
    time_in_state: f64,
    /// Treatment flag: a treated problem recovers when its degrade period
    /// runs out instead of progressing or turning fatal.
    recovery_sought: bool,
}

impl HealthProblem {
    pub fn new(complaint_type: ComplaintType, onset_msol: f64) -> Self {
        Self {
            complaint_type,
            state: ProblemState::Degrading,
            onset_msol,
            time_in_state: 0.0,
            recovery_sought: false,
        }
    }

    pub fn complaint_type(&self) -> ComplaintType {
        self.complaint_type
    }

    pub fn state(&self) -> ProblemState {
        self.state
    }

    pub fn onset_msol(&self) -> f64 {
        self.onset_msol
    }

    pub fn time_in_state(&self) -> f64 {
        self.time_in_state
    }

    pub fn recovery_sought(&self) -> bool {
        self.recovery_sought
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ProblemState::Degrading | ProblemState::Recovering)
    }

    /// Template seriousness, for most-serious selection.
    pub fn seriousness(&self, template: &Complaint) -> u32 {
        template.seriousness
    }

    /// Performance cap imposed by this problem in its current state.
    /// Recovering grants half the distance back to full capability.
    pub fn performance_factor(&self, template: &Complaint) -> f64 {
        match self.state {
            ProblemState::Degrading => template.performance_factor,
            ProblemState::Recovering => (template.performance_factor + 1.0) / 2.0,
            ProblemState::Cured => 1.0,
            ProblemState::Dead => 0.0,
        }
    }

    /// Advances the problem's own clock against its template.
    pub fn advance(&mut self, elapsed: f64, template: &Complaint) -> ProblemTick {
        match self.state {
            ProblemState::Degrading => {
                self.time_in_state += elapsed;
                if template.degrade_period <= 0.0 {
                    // Detector-owned: transitions come from outside.
                    return ProblemTick::Continue;
                }
                if self.time_in_state < template.degrade_period {
                    return ProblemTick::Continue;
                }
                if self.recovery_sought {
                    self.begin_recovery();
                    return ProblemTick::StartedRecovery;
                }
                if let Some(next) = template.next_phase {
                    return ProblemTick::Progressed(next);
                }
                if template.fatal_if_unresolved {
                    return ProblemTick::Fatal;
                }
                self.begin_recovery();
                ProblemTick::StartedRecovery
            }
            ProblemState::Recovering => {
                self.time_in_state += elapsed;
                if self.time_in_state >= template.recovery_period {
                    self.state = ProblemState::Cured;
                    return ProblemTick::Cured;
                }
                ProblemTick::Continue
            }
            ProblemState::Cured | ProblemState::Dead => ProblemTick::Continue,
        }
    }

    /// Marks the problem as under treatment.
    pub fn seek_recovery(&mut self) {
        self.recovery_sought = true;
    }

    /// Moves a degrading problem into recovery. No-op in any other state.
    pub fn start_recovery(&mut self) {
        if self.state == ProblemState::Degrading {
            self.begin_recovery();
        }
    }

    /// Ends the problem immediately.
    pub fn cure(&mut self) {
        if self.state != ProblemState::Dead {
            self.state = ProblemState::Cured;
        }
    }

    /// Marks the problem as the one the colonist died of.
    pub fn set_dead(&mut self) {
        self.state = ProblemState::Dead;
    }

    /// Resets a dead problem to degrading, for revival handling.
    pub fn reset_degrading(&mut self) {
        self.state = ProblemState::Degrading;
        self.time_in_state = 0.0;
    }

    fn begin_recovery(&mut self) {
        self.state = ProblemState::Recovering;
        self.time_in_state = 0.0;
    }
}

/// Archived record of a resolved problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuredProblem {
    pub complaint_type: ComplaintType,
    pub onset_msol: f64,
    pub cured_msol: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complaint::ComplaintCatalog;

    fn template(kind: ComplaintType) -> Complaint {
        match ComplaintCatalog::standard().get(kind) {
            Some(t) => t.clone(),
            None => panic!("missing template for {}", kind.label()),
        }
    }

    #[test]
    fn test_degrade_progresses_to_next_phase() {
        let t = template(ComplaintType::Appendicitis);
        let mut p = HealthProblem::new(ComplaintType::Appendicitis, 0.0);
        assert_eq!(p.advance(t.degrade_period - 1.0, &t), ProblemTick::Continue);
        assert_eq!(
            p.advance(1.0, &t),
            ProblemTick::Progressed(ComplaintType::RupturedAppendix)
        );
        // State swap is the record's job; the instance stays degrading.
        assert_eq!(p.state(), ProblemState::Degrading);
    }

    #[test]
    fn test_degrade_turns_fatal_without_successor() {
        let t = template(ComplaintType::Suffocation);
        let mut p = HealthProblem::new(ComplaintType::Suffocation, 0.0);
        assert_eq!(p.advance(t.degrade_period, &t), ProblemTick::Fatal);
    }

    #[test]
    fn test_degrade_recovers_naturally_when_not_fatal() {
        let t = template(ComplaintType::Flu);
        let mut p = HealthProblem::new(ComplaintType::Flu, 0.0);
        assert_eq!(p.advance(t.degrade_period, &t), ProblemTick::StartedRecovery);
        assert_eq!(p.state(), ProblemState::Recovering);
        assert_eq!(p.time_in_state(), 0.0, "recovery clock should restart");
    }

    #[test]
    fn test_treated_problem_recovers_instead_of_progressing() {
        let t = template(ComplaintType::Appendicitis);
        let mut p = HealthProblem::new(ComplaintType::Appendicitis, 0.0);
        p.seek_recovery();
        assert_eq!(p.advance(t.degrade_period, &t), ProblemTick::StartedRecovery);
    }

    #[test]
    fn test_recovery_completes_to_cured() {
        let t = template(ComplaintType::Starvation);
        let mut p = HealthProblem::new(ComplaintType::Starvation, 0.0);
        p.start_recovery();
        assert_eq!(p.advance(t.recovery_period - 1.0, &t), ProblemTick::Continue);
        assert_eq!(p.advance(1.0, &t), ProblemTick::Cured);
        assert_eq!(p.state(), ProblemState::Cured);
    }

    #[test]
    fn test_detector_owned_problem_never_self_progresses() {
        let t = template(ComplaintType::Starvation);
        let mut p = HealthProblem::new(ComplaintType::Starvation, 0.0);
        assert_eq!(p.advance(100_000.0, &t), ProblemTick::Continue);
        assert_eq!(p.state(), ProblemState::Degrading);
    }

    #[test]
    fn test_start_recovery_only_from_degrading() {
        let t = template(ComplaintType::Dehydration);
        let mut p = HealthProblem::new(ComplaintType::Dehydration, 0.0);
        p.start_recovery();
        p.advance(10.0, &t);
        let elapsed = p.time_in_state();
        p.start_recovery();
        assert_eq!(
            p.time_in_state(),
            elapsed,
            "repeated start_recovery should not reset the clock"
        );
    }

    #[test]
    fn test_performance_factor_by_state() {
        let t = template(ComplaintType::Starvation);
        let mut p = HealthProblem::new(ComplaintType::Starvation, 0.0);
        assert_eq!(p.performance_factor(&t), 0.5);
        p.start_recovery();
        assert_eq!(p.performance_factor(&t), 0.75);
        p.cure();
        assert_eq!(p.performance_factor(&t), 1.0);
        p.set_dead();
        assert_eq!(p.performance_factor(&t), 0.0);
    }
}
