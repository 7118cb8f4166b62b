//! The per-colonist physiological engine.
//!
//! One [`ColonistCondition`] owns every piece of a colonist's physical state:
//! the continuous indices (fatigue, hunger, thirst, stress, energy), the
//! derived performance multiplier, the medical record, and the death
//! lifecycle. The scheduler calls [`ColonistCondition::advance`] once per
//! pulse; everything else is accessors and mutators for collaborating
//! systems (meals, sleep, exercise, medical care).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attributes::{Attributes, BodyProfile};
use crate::circadian::CircadianRhythm;
use crate::clock::{SimPulse, TickError, MSOLS_PER_SOL};
use crate::complaint::{ComplaintCatalog, ComplaintType, PhysicalEffort};
use crate::config::{ColonistProfile, ConfigError, PhysioConfig, PhysioContext};
use crate::death::{DeathCause, DeathInfo};
use crate::events::{HealthEvent, LifeSupportFault};
use crate::fitness::{
    self, HealthStatus, ENERGY_THRESHOLD, HUNGER_THRESHOLD, SERIOUS_PROBLEM_THRESHOLD,
    STRESS_THRESHOLD, THIRST_THRESHOLD,
};
use crate::ledger::{ConsumptionLedger, ResourceCategory};
use crate::life_support::LifeSupport;
use crate::medical::{LifecycleChange, MedicalRecord};
use crate::medication::{Medication, MedicationKind};
use crate::muscle::MuscleModel;
use crate::problem::ProblemState;
use crate::radiation::RadiationExposure;
use crate::randutil;

/// Fatigue cap.
pub const MAX_FATIGUE: f64 = 40_000.0;
/// Hunger cap; reaching it while starving is fatal.
pub const MAX_HUNGER: f64 = 40_000.0;
/// Thirst cap; reaching it while dehydrated is fatal.
pub const MAX_THIRST: f64 = 7_000.0;
/// Energy reserve floor, kJ.
pub const MIN_ENERGY: f64 = 250.0;
/// Energy content of standard food, kJ per kg.
pub const FOOD_COMPOSITION_ENERGY_RATIO: f64 = 16_290.323;
/// Dilution applied when converting food energy into reserve energy.
const ENERGY_FACTOR: f64 = 15.0;
/// Eating never leaves hunger above this level.
const HUNGER_CEILING_UPON_EATING: f64 = 750.0;
/// Drinking never leaves thirst above this level.
const THIRST_CEILING_UPON_DRINKING: f64 = 500.0;
/// Elapsed-time divisor in the random ailment probability.
const RANDOM_AILMENT_WINDOW: f64 = 100_000.0;
/// Integer-millisol cadence of the threshold detectors.
const DETECTOR_INTERVAL: i32 = 7;
/// Slack for life-support comparisons, absorbing float noise.
const RESOURCE_EPSILON: f64 = 0.000_1;
/// Fatigue level a revived colonist wakes up with.
const REVIVAL_FATIGUE: f64 = 1_000.0;

/// Canned last words recorded on a starvation death.
const STARVATION_LAST_WORDS: &str = "Save my share for the others.";
/// Canned last words recorded on a dehydration death.
const DEHYDRATION_LAST_WORDS: &str = "Water is the first wealth.";

/// What the colonist is doing during a pulse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActivityLoad {
    /// Resting tasks halve the physiological cost of time.
    pub resting: bool,
    pub effort: PhysicalEffort,
    /// Outside the habitat in a suit.
    pub eva: bool,
}

impl ActivityLoad {
    pub fn rest() -> Self {
        Self {
            resting: true,
            effort: PhysicalEffort::None,
            eva: false,
        }
    }

    pub fn working(effort: PhysicalEffort) -> Self {
        Self {
            resting: false,
            effort,
            eva: false,
        }
    }

    pub fn eva(effort: PhysicalEffort) -> Self {
        Self {
            resting: false,
            effort,
            eva: true,
        }
    }
}

/// Result of one engine tick.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub alive: bool,
    /// Lifecycle transitions and faults, in the order they happened.
    pub events: Vec<HealthEvent>,
}

/// Where a detector-driven condition stands, derived from the problem set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeprivationState {
    Healthy,
    Onset,
    Recovering,
    Cured,
}

/// Direction of a life-support adequacy bound.
#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

/// Everything the engine knows about one colonist's body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonistCondition {
    name: String,
    age: u32,
    attributes: Attributes,
    meal_preference: f64,
    body: BodyProfile,

    fatigue: f64,
    hunger: f64,
    thirst: f64,
    stress: f64,
    /// Caloric reserve, kJ.
    energy: f64,
    performance: f64,
    appetite: f64,
    personal_max_energy: f64,
    base_energy_intake: f64,

    /// Hunger level at which starvation sets in for this colonist.
    starvation_start: f64,
    /// Thirst level at which dehydration sets in for this colonist.
    dehydration_start: f64,

    muscles: MuscleModel,
    circadian: CircadianRhythm,
    radiation: RadiationExposure,
    medical: MedicalRecord,
    ledger: ConsumptionLedger,

    alive: bool,
    death: Option<DeathInfo>,

    /// Simulated time this condition has lived through, millisols.
    mission_msol: f64,
}

impl ColonistCondition {
    /// Builds the condition for a new colonist. Starting indices are
    /// randomized close to nominal; per-person deprivation thresholds are
    /// drawn once around the configured population means.
    pub fn new(
        profile: &ColonistProfile,
        ctx: &PhysioContext,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        ctx.config.validate()?;
        profile.validate()?;
        if ctx.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let body = BodyProfile::derive(profile, &ctx.config, rng);
        let deviation = body.mass_deviation;
        let starvation_start = MSOLS_PER_SOL
            * randutil::gaussian_positive(rng, ctx.config.starvation_start_sols, deviation / 5.0);
        let dehydration_start = MSOLS_PER_SOL
            * randutil::gaussian_positive(rng, ctx.config.dehydration_start_sols, deviation / 5.0);

        let thirst = randutil::random_regression(rng, 50.0);
        let fatigue = randutil::random_regression(rng, 50.0);
        let stress = randutil::random_regression(rng, 10.0);
        let hunger = randutil::random_regression(rng, 50.0);
        let energy = 10_000.0 + (50.0 - hunger) * 100.0;
        let performance = (1.0
            - (50.0 - fatigue) * 0.002
            - (20.0 - stress) * 0.002
            - (50.0 - hunger) * 0.002
            - (50.0 - thirst) * 0.002)
            .clamp(0.0, 1.0);

        let mut condition = Self {
            name: profile.name.clone(),
            age: profile.age,
            attributes: profile.attributes,
            meal_preference: profile.meal_preference,
            body,
            fatigue,
            hunger,
            thirst,
            stress,
            energy,
            performance,
            appetite: 0.0,
            personal_max_energy: 0.0,
            base_energy_intake: ctx.config.standard_daily_energy_intake,
            starvation_start,
            dehydration_start,
            muscles: MuscleModel::new(profile.attributes.composite_score(), rng),
            circadian: CircadianRhythm::new(),
            radiation: RadiationExposure::new(),
            medical: MedicalRecord::new(ctx.config.cured_history_cap),
            ledger: ConsumptionLedger::new(),
            alive: true,
            death: None,
            mission_msol: 0.0,
        };
        condition.update_appetite(&ctx.config);
        Ok(condition)
    }

    /// Advances this colonist by one pulse.
    ///
    /// Order within a tick: sol rollover housekeeping, integer-millisol work
    /// (performance, radiation, detectors on a seven-millisol cadence), life
    /// support checks, problem lifecycle, random ailments, then the
    /// continuous index drift. A fatal outcome anywhere ends the tick early.
    pub fn advance(
        &mut self,
        pulse: &SimPulse,
        activity: ActivityLoad,
        support: &mut impl LifeSupport,
        ctx: &PhysioContext,
        rng: &mut impl Rng,
    ) -> Result<TickOutcome, TickError> {
        pulse.validate()?;
        if !self.alive {
            return Ok(TickOutcome {
                alive: false,
                events: Vec::new(),
            });
        }

        let elapsed = pulse.elapsed;
        self.mission_msol += elapsed;
        let mut events = Vec::new();

        if pulse.is_new_sol {
            self.circadian.new_sol();
            self.update_appetite(&ctx.config);
            self.ledger.start_sol();
        }

        if pulse.is_new_msol {
            self.recalculate_performance(&ctx.catalog);
            self.radiation.advance(pulse);
            if pulse.msol_int % DETECTOR_INTERVAL == 0 {
                log::debug!(
                    "{}: detector pass at msol {}: hunger {:.0} thirst {:.0} stress {:.0} energy {:.0}",
                    self.name, pulse.msol_int, self.hunger, self.thirst, self.stress, self.energy
                );
                self.check_starvation(&mut events);
                self.check_dehydration(&mut events);
                self.check_stress_breakdown(&mut events);
                self.check_radiation_sickness(&mut events);
            }
        }
        if !self.alive {
            return Ok(TickOutcome { alive: false, events });
        }

        self.check_life_support(pulse, activity, support, &ctx.config, &mut events);
        self.advance_problems(elapsed, &ctx.catalog, &mut events);
        if !self.alive {
            return Ok(TickOutcome { alive: false, events });
        }

        if !activity.resting {
            self.check_random_ailments(elapsed, activity, &ctx.catalog, rng, &mut events);
        }

        // Rest halves the physiological cost of time and doubles stress
        // relief.
        let factor = if activity.resting { 2.0 } else { 1.0 };
        let deviation = self.body.mass_deviation;
        self.reduce_stress(elapsed / 10.0 * factor);
        self.increase_thirst(elapsed * deviation * 0.75 / factor);
        self.increase_fatigue(elapsed * 1.1 / factor);
        self.increase_hunger(elapsed * deviation * 0.75 / factor);
        self.reduce_energy(elapsed);

        if activity.resting {
            self.muscles.relax(elapsed, self.attributes.composite_score());
        }
        self.circadian.advance(elapsed);

        Ok(TickOutcome {
            alive: self.alive,
            events,
        })
    }

    // ----- detectors -----

    /// Starvation keyed on hunger, with the energy reserve as an escape
    /// hatch: a recently fed colonist is not starving however long ago the
    /// hunger index last saw a meal.
    fn check_starvation(&mut self, events: &mut Vec<HealthEvent>) {
        if !self.alive {
            return;
        }
        match self.medical.state_of(ComplaintType::Starvation) {
            None => {
                if self.hunger > self.starvation_start {
                    self.onset(ComplaintType::Starvation, events);
                }
            }
            Some(ProblemState::Degrading) => {
                if self.hunger < HUNGER_THRESHOLD || self.energy > ENERGY_THRESHOLD {
                    self.detector_cure(ComplaintType::Starvation, events);
                } else if self.hunger < 2.0 * HUNGER_THRESHOLD
                    || self.energy > 2.0 * ENERGY_THRESHOLD
                {
                    self.detector_recovery(ComplaintType::Starvation, events);
                } else if self.hunger >= MAX_HUNGER {
                    self.die_of(ComplaintType::Starvation, Some(STARVATION_LAST_WORDS), events);
                }
            }
            // Recovering runs on the problem's own clock; Dead needs nothing.
            Some(_) => {}
        }
    }

    fn check_dehydration(&mut self, events: &mut Vec<HealthEvent>) {
        if !self.alive {
            return;
        }
        match self.medical.state_of(ComplaintType::Dehydration) {
            None => {
                if self.thirst > self.dehydration_start {
                    self.onset(ComplaintType::Dehydration, events);
                }
            }
            Some(ProblemState::Degrading) => {
                if self.thirst < THIRST_THRESHOLD / 2.0 {
                    self.detector_cure(ComplaintType::Dehydration, events);
                } else if self.thirst < 2.0 * THIRST_THRESHOLD {
                    self.detector_recovery(ComplaintType::Dehydration, events);
                } else if self.thirst >= MAX_THIRST {
                    self.die_of(ComplaintType::Dehydration, Some(DEHYDRATION_LAST_WORDS), events);
                }
            }
            Some(_) => {}
        }
    }

    /// A breakdown only begins at the stress ceiling; it clears once stress
    /// falls back under the stressed-out band.
    fn check_stress_breakdown(&mut self, events: &mut Vec<HealthEvent>) {
        if !self.alive {
            return;
        }
        match self.medical.state_of(ComplaintType::PanicAttack) {
            None => {
                if self.stress >= 100.0 {
                    self.onset(ComplaintType::PanicAttack, events);
                }
            }
            Some(ProblemState::Degrading) => {
                if self.stress < STRESS_THRESHOLD {
                    self.detector_cure(ComplaintType::PanicAttack, events);
                }
            }
            Some(_) => {}
        }
    }

    /// Driven by the dose tracker's sick flag. A radioprotective dose moves
    /// a sick colonist into recovery instead of waiting for the flag.
    fn check_radiation_sickness(&mut self, events: &mut Vec<HealthEvent>) {
        if !self.alive {
            return;
        }
        match self.medical.state_of(ComplaintType::RadiationSickness) {
            None => {
                if self.radiation.is_sick() {
                    self.onset(ComplaintType::RadiationSickness, events);
                }
            }
            Some(ProblemState::Degrading) => {
                if !self.radiation.is_sick() {
                    self.detector_cure(ComplaintType::RadiationSickness, events);
                } else if self.medical.medication_active(MedicationKind::RadioprotectiveAgent) {
                    self.detector_recovery(ComplaintType::RadiationSickness, events);
                }
            }
            Some(_) => {}
        }
    }

    fn onset(&mut self, kind: ComplaintType, events: &mut Vec<HealthEvent>) {
        if self.medical.add(kind, self.mission_msol) {
            log::info!("{}: onset of {}", self.name, kind);
            events.push(HealthEvent::ComplaintOnset(kind));
        }
    }

    fn detector_cure(&mut self, kind: ComplaintType, events: &mut Vec<HealthEvent>) {
        if self.medical.cure(kind, self.mission_msol) {
            log::info!("{}: cured of {}", self.name, kind);
            events.push(HealthEvent::ComplaintCured(kind));
        }
    }

    fn detector_recovery(&mut self, kind: ComplaintType, events: &mut Vec<HealthEvent>) {
        if self.medical.start_recovery(kind) {
            log::info!("{}: recovery from {} started", self.name, kind);
            events.push(HealthEvent::RecoveryStarted(kind));
        }
    }

    fn die_of(
        &mut self,
        kind: ComplaintType,
        last_words: Option<&str>,
        events: &mut Vec<HealthEvent>,
    ) {
        if let Some(event) = self.record_death(kind, false, last_words, self.mission_msol) {
            events.push(event);
        }
    }

    // ----- life support -----

    fn check_life_support(
        &mut self,
        pulse: &SimPulse,
        activity: ActivityLoad,
        support: &mut impl LifeSupport,
        config: &PhysioConfig,
        events: &mut Vec<HealthEvent>,
    ) {
        let rate = if activity.resting {
            config.low_o2_rate
        } else {
            config.nominal_o2_rate
        };
        let required = rate * pulse.elapsed / MSOLS_PER_SOL;
        let supplied = support.provide_oxygen(required);
        self.ledger.record(ResourceCategory::Oxygen, supplied);
        if self.check_resource(supplied, required, Bound::Min, ComplaintType::Suffocation, events)
        {
            log::warn!(
                "{}: oxygen shortfall, needed {:.5} kg got {:.5} kg",
                self.name, required, supplied
            );
            events.push(HealthEvent::LifeSupportFault(
                LifeSupportFault::OxygenShortfall { required, supplied },
            ));
        }

        let pressure = support.air_pressure();
        if self.check_resource(
            pressure,
            config.min_air_pressure,
            Bound::Min,
            ComplaintType::Decompression,
            events,
        ) {
            log::warn!("{}: air pressure down to {:.1} kPa", self.name, pressure);
            events.push(HealthEvent::LifeSupportFault(LifeSupportFault::PressureLow(
                pressure,
            )));
        }

        let temperature = support.temperature();
        if self.check_resource(
            temperature,
            config.min_temperature,
            Bound::Min,
            ComplaintType::Freezing,
            events,
        ) {
            log::warn!("{}: temperature down to {:.1} C", self.name, temperature);
            events.push(HealthEvent::LifeSupportFault(
                LifeSupportFault::TemperatureLow(temperature),
            ));
        }
        if self.check_resource(
            temperature,
            config.max_temperature,
            Bound::Max,
            ComplaintType::HeatStroke,
            events,
        ) {
            log::warn!("{}: temperature up to {:.1} C", self.name, temperature);
            events.push(HealthEvent::LifeSupportFault(
                LifeSupportFault::TemperatureHigh(temperature),
            ));
        }
    }

    /// One adequacy check. A violated bound raises the complaint; a restored
    /// bound moves an existing problem into recovery. Returns `true` only on
    /// a fresh onset so the caller can attach the fault detail once.
    fn check_resource(
        &mut self,
        actual: f64,
        required: f64,
        bound: Bound,
        kind: ComplaintType,
        events: &mut Vec<HealthEvent>,
    ) -> bool {
        let breached = match bound {
            Bound::Min => actual < required - RESOURCE_EPSILON,
            Bound::Max => actual > required + RESOURCE_EPSILON,
        };
        if breached {
            if self.medical.add(kind, self.mission_msol) {
                log::info!("{}: onset of {}", self.name, kind);
                events.push(HealthEvent::ComplaintOnset(kind));
                return true;
            }
        } else if self.medical.start_recovery(kind) {
            log::info!("{}: recovery from {} started", self.name, kind);
            events.push(HealthEvent::RecoveryStarted(kind));
        }
        false
    }

    // ----- problem lifecycle -----

    fn advance_problems(
        &mut self,
        elapsed: f64,
        catalog: &ComplaintCatalog,
        events: &mut Vec<HealthEvent>,
    ) {
        let changes = self.medical.tick(elapsed, self.mission_msol, catalog);
        for change in changes {
            match change {
                LifecycleChange::StartedRecovery(kind) => {
                    log::info!("{}: recovery from {} started", self.name, kind);
                    events.push(HealthEvent::RecoveryStarted(kind));
                }
                LifecycleChange::Cured(kind) => {
                    log::info!("{}: cured of {}", self.name, kind);
                    events.push(HealthEvent::ComplaintCured(kind));
                }
                LifecycleChange::Progressed { from, to } => {
                    log::warn!("{}: {} progressed to {}", self.name, from, to);
                    events.push(HealthEvent::ComplaintProgressed { from, to });
                }
                LifecycleChange::Fatal(kind) => {
                    self.die_of(kind, None, events);
                }
            }
        }
    }

    // ----- random ailments -----

    fn check_random_ailments(
        &mut self,
        elapsed: f64,
        activity: ActivityLoad,
        catalog: &ComplaintCatalog,
        rng: &mut impl Rng,
        events: &mut Vec<HealthEvent>,
    ) {
        fn agility_adjust(modifier: f64, agility: f64) -> f64 {
            if agility > 50.0 {
                0.75 * modifier - 0.25 * agility / 100.0
            } else {
                0.75 * modifier + 0.25 * (50.0 - agility) / 50.0
            }
        }

        let immunity = (self.attributes.strength + self.attributes.endurance) as f64;
        let agility = self.attributes.agility as f64;
        let sol = 1 + (self.mission_msol / MSOLS_PER_SOL) as i32;
        for template in catalog.entries() {
            if template.random_probability <= 0.0 {
                continue;
            }
            let kind = template.kind;
            if self.medical.problem(kind).is_some() {
                continue;
            }
            if template.effort_influence > activity.effort {
                continue;
            }

            // Past occurrences raise the odds; a rugged constitution lowers
            // them.
            let occurrences = self.medical.occurrence_count(kind);
            let mut tendency = if occurrences > 0 && sol > 3 {
                0.5 + occurrences as f64 / sol as f64
            } else {
                1.0
            };
            if immunity > 100.0 {
                tendency = 0.75 * tendency - 0.25 * immunity / 100.0;
            } else {
                tendency = 0.75 * tendency + 0.25 * (100.0 - immunity) / 100.0;
            }
            tendency = tendency.clamp(0.000_1, 2.0);

            let mut task_modifier = 1.0;
            if activity.effort == PhysicalEffort::High
                && template.effort_influence != PhysicalEffort::None
            {
                task_modifier = agility_adjust(1.2, agility);
            } else if activity.effort == template.effort_influence
                && activity.effort == PhysicalEffort::Low
            {
                task_modifier = agility_adjust(task_modifier, agility);
            } else if activity.eva {
                task_modifier = 1.3;
            }

            let chance = template.random_probability * task_modifier * tendency * elapsed
                / RANDOM_AILMENT_WINDOW;
            if rng.gen_range(0.0..100.0) <= chance {
                self.onset(kind, events);
            }
        }
    }

    // ----- performance -----

    /// Worst active problem sets the ceiling; the continuous indices add
    /// penalties (or a small energy bonus) under it. Nothing lifts the
    /// result above the ceiling.
    fn recalculate_performance(&mut self, catalog: &ComplaintCatalog) {
        let baseline = self
            .medical
            .problems()
            .iter()
            .filter_map(|p| catalog.get(p.complaint_type()).map(|t| p.performance_factor(t)))
            .fold(1.0_f64, f64::min);

        let mut p = baseline;
        if self.thirst > 800.0 {
            p -= (self.thirst - 800.0) * 0.000_15 / 2.0;
        } else if self.thirst > 400.0 {
            p -= (self.thirst - 400.0) * 0.000_15 / 4.0;
        }
        if self.hunger > 1_600.0 {
            p -= (self.hunger - 1_600.0) * 0.000_1 / 2.0;
        } else if self.hunger > 800.0 {
            p -= (self.hunger - 800.0) * 0.000_1 / 4.0;
        }
        if self.fatigue > 1_500.0 {
            p -= (self.fatigue - 1_500.0) * 0.000_5 / 2.0;
        } else if self.fatigue > 700.0 {
            p -= (self.fatigue - 700.0) * 0.000_5 / 4.0;
        }
        if self.stress > 75.0 {
            p -= (self.stress - 75.0) * 0.000_75 / 2.0;
        } else if self.stress > 50.0 {
            p -= (self.stress - 50.0) * 0.000_75 / 4.0;
        }
        if self.energy > 7_500.0 {
            p += (self.energy - 7_500.0) * 0.000_1 / 8.0;
        } else if self.energy < 400.0 {
            p -= 400_000.0 / self.energy * 0.000_1 / 4.0;
        }
        p *= self.muscles.soreness_factor();

        self.performance = p.clamp(0.0, baseline.min(1.0));
    }

    // ----- appetite -----

    /// Appetite blends the age curve, body mass relative to the population
    /// average, meal preference, and the hunger-hormone surplus. The
    /// personal energy ceiling follows it.
    fn update_appetite(&mut self, config: &PhysioConfig) {
        let age_factor = (35.0 + (35.0 - self.age as f64)) / 70.0;
        let mass_change = (self.body.mass - config.average_mass) / config.average_mass;
        let preference = self.meal_preference / 10.0;
        let hormones = self.circadian.surplus() / 200.0;
        self.appetite = (age_factor + mass_change + preference + hormones).clamp(0.0, 1.0);

        let base = self.base_energy_intake;
        self.personal_max_energy =
            (base * (1.0 + self.appetite / 2.0)).clamp(base / 10.0, base * 2.0);
    }

    // ----- mutators -----

    pub fn set_fatigue(&mut self, value: f64) {
        if !self.alive {
            return;
        }
        self.fatigue = value.clamp(-100.0, MAX_FATIGUE);
    }

    pub fn increase_fatigue(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        self.fatigue = (self.fatigue + delta).min(MAX_FATIGUE);
    }

    /// Sleep relief. Floors slightly below zero so a full night banks a
    /// small credit.
    pub fn reduce_fatigue(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        self.fatigue = (self.fatigue - delta).max(-50.0);
    }

    pub fn set_hunger(&mut self, value: f64) {
        if !self.alive {
            return;
        }
        self.hunger = value.clamp(-100.0, MAX_HUNGER);
    }

    /// Hunger growth scales with appetite.
    pub fn increase_hunger(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        let scaled = delta * (self.appetite * 0.75 + 0.75);
        self.hunger = (self.hunger + scaled).min(MAX_HUNGER);
    }

    /// Eating relief. However starved, a meal leaves hunger at no more than
    /// the post-meal ceiling.
    pub fn reduce_hunger(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        self.hunger = (self.hunger - delta)
            .max(-100.0)
            .min(HUNGER_CEILING_UPON_EATING);
    }

    pub fn set_thirst(&mut self, value: f64) {
        if !self.alive {
            return;
        }
        self.thirst = value.clamp(-50.0, MAX_THIRST);
    }

    pub fn increase_thirst(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        self.thirst = (self.thirst + delta).min(MAX_THIRST);
    }

    /// Drinking relief, with the post-drink ceiling.
    pub fn reduce_thirst(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        self.thirst = (self.thirst - delta)
            .max(-50.0)
            .min(THIRST_CEILING_UPON_DRINKING);
    }

    /// Stress gain, damped by pain tolerance.
    pub fn add_stress(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        let adjusted = delta / self.muscles.pain_tolerance_factor();
        self.set_stress_clamped(self.stress + adjusted);
    }

    /// Stress relief, amplified by pain tolerance.
    pub fn reduce_stress(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        let adjusted = delta * self.muscles.pain_tolerance_factor();
        self.set_stress_clamped(self.stress - adjusted);
    }

    fn set_stress_clamped(&mut self, value: f64) {
        self.stress = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
    }

    /// Converts eaten food into reserve energy. Gains taper steeply as the
    /// reserve fills; a colonist who is not hungry at all snaps straight to
    /// the personal maximum.
    pub fn add_energy(&mut self, food_kg: f64) {
        if !self.alive {
            return;
        }
        let xdelta =
            food_kg * FOOD_COMPOSITION_ENERGY_RATIO * (0.75 + 0.75 * self.appetite) / ENERGY_FACTOR;
        if self.hunger <= 0.0 {
            self.energy = self.personal_max_energy;
        } else {
            let gain = if self.energy > 19_000.0 {
                xdelta * 0.035
            } else if self.energy > 17_000.0 {
                xdelta * 0.06
            } else if self.energy > 15_000.0 {
                xdelta * 0.15
            } else if self.energy > 13_000.0 {
                xdelta * 0.2
            } else if self.energy > 11_000.0 {
                xdelta * 0.25
            } else if self.energy > 9_000.0 {
                xdelta * 0.3
            } else if self.energy > 7_000.0 {
                xdelta * 0.45
            } else if self.energy > 5_000.0 {
                xdelta * 0.55
            } else if self.energy > 4_000.0 {
                xdelta * 0.65
            } else if self.energy > 3_000.0 {
                xdelta * 0.75
            } else if self.energy > ENERGY_THRESHOLD {
                xdelta * 0.85
            } else if self.energy > ENERGY_THRESHOLD / 2.0 {
                xdelta * 0.95
            } else if self.energy > ENERGY_THRESHOLD / 4.0 {
                xdelta * 1.1
            } else if self.energy > ENERGY_THRESHOLD / 8.0 {
                xdelta * 1.3
            } else {
                ENERGY_THRESHOLD / 8.0
            };
            self.energy += gain;
        }
        self.circadian.eat_food(xdelta / 1_000.0);
        if self.energy > self.personal_max_energy {
            self.energy = self.personal_max_energy;
        }
    }

    /// Metabolic drain over elapsed time. Loss rates taper as the reserve
    /// empties; the reserve never drops below the floor.
    pub fn reduce_energy(&mut self, elapsed: f64) {
        if !self.alive {
            return;
        }
        let xdelta = elapsed * self.base_energy_intake / 1_000.0;
        let rate = if self.energy < 500.0 {
            0.2
        } else if self.energy < 1_000.0 {
            0.25
        } else if self.energy < 3_000.0 {
            0.3
        } else if self.energy < 5_000.0 {
            0.35
        } else if self.energy < 7_000.0 {
            0.4
        } else if self.energy < 9_000.0 {
            0.45
        } else if self.energy < 11_000.0 {
            0.5
        } else if self.energy < 13_000.0 {
            0.55
        } else if self.energy < 15_000.0 {
            0.6
        } else if self.energy < 17_000.0 {
            0.65
        } else {
            0.7
        };
        self.energy = (self.energy - xdelta * rate).max(MIN_ENERGY);
    }

    /// Workout: builds muscle and costs water.
    pub fn track_exercise(&mut self, duration: f64) {
        if !self.alive {
            return;
        }
        self.muscles
            .exercise(duration, self.attributes.composite_score());
        self.increase_thirst(duration / 5.0);
    }

    /// Idle-time muscle atrophy, applied by the engine while resting and
    /// available to sleep tasks directly.
    pub fn relax_muscles(&mut self, duration: f64) {
        if !self.alive {
            return;
        }
        self.muscles
            .relax(duration, self.attributes.composite_score());
    }

    /// Registers a complaint from an outside source, such as an accident or
    /// a medical review. Idempotent per type; performance is recalculated
    /// immediately so callers see the new ceiling.
    pub fn add_complaint(
        &mut self,
        kind: ComplaintType,
        catalog: &ComplaintCatalog,
    ) -> Option<HealthEvent> {
        if !self.alive {
            return None;
        }
        if !self.medical.add(kind, self.mission_msol) {
            return None;
        }
        log::info!("{}: onset of {}", self.name, kind);
        self.recalculate_performance(catalog);
        Some(HealthEvent::ComplaintOnset(kind))
    }

    /// Moves a degrading problem into recovery, the effect of treatment at
    /// a medical station.
    pub fn start_complaint_recovery(&mut self, kind: ComplaintType) -> Option<HealthEvent> {
        if !self.alive {
            return None;
        }
        if !self.medical.start_recovery(kind) {
            return None;
        }
        log::info!("{}: recovery from {} started", self.name, kind);
        Some(HealthEvent::RecoveryStarted(kind))
    }

    pub fn add_medication(&mut self, med: Medication) {
        if !self.alive {
            return;
        }
        log::info!("{}: administered {:?}", self.name, med.kind);
        self.medical.add_medication(med);
    }

    pub fn record_food_consumption(&mut self, amount: f64, category: ResourceCategory) {
        if !self.alive {
            return;
        }
        self.ledger.record(category, amount);
    }

    // ----- death & revival -----

    /// Ends the colonist's life. Idempotent: a second call returns `None`
    /// and changes nothing. The triggering problem is added if absent and
    /// marked dead, which pins performance to zero.
    pub fn record_death(
        &mut self,
        kind: ComplaintType,
        triggered_by_player: bool,
        last_words: Option<&str>,
        now_msol: f64,
    ) -> Option<HealthEvent> {
        if !self.alive {
            return None;
        }
        self.alive = false;
        self.performance = 0.0;
        self.medical.add(kind, now_msol);
        if let Some(problem) = self.medical.problem_mut(kind) {
            problem.set_dead();
        }
        let cause = if triggered_by_player {
            DeathCause::PlayerTriggered(kind)
        } else {
            DeathCause::Complaint(kind)
        };
        let info = DeathInfo {
            cause: cause.clone(),
            last_words: last_words.map(str::to_string),
            time_of_death: now_msol,
            sol: 1 + (now_msol / MSOLS_PER_SOL) as i32,
        };
        log::info!("{}: {}", self.name, info.summary());
        self.death = Some(info);
        Some(HealthEvent::Death {
            cause: cause.label(),
            problem: kind,
        })
    }

    /// Reverses a death. The formerly fatal problem restarts in recovery;
    /// performance stays at zero and fatigue is raised, so the comeback is
    /// slow rather than instant.
    pub fn revive(&mut self) -> Option<HealthEvent> {
        if self.alive {
            return None;
        }
        let info = self.death.take()?;
        let kind = info.cause.problem_type();
        self.alive = true;
        if let Some(problem) = self.medical.problem_mut(kind) {
            problem.reset_degrading();
            problem.start_recovery();
        }
        self.performance = 0.0;
        self.fatigue = self.fatigue.max(REVIVAL_FATIGUE);
        log::info!("{}: revived, recovering from {}", self.name, kind);
        Some(HealthEvent::Revived)
    }

    // ----- accessors -----

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn fatigue(&self) -> f64 {
        self.fatigue
    }

    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    pub fn thirst(&self) -> f64 {
        self.thirst
    }

    pub fn stress(&self) -> f64 {
        self.stress
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn performance(&self) -> f64 {
        self.performance
    }

    pub fn appetite(&self) -> f64 {
        self.appetite
    }

    pub fn personal_max_energy(&self) -> f64 {
        self.personal_max_energy
    }

    pub fn starvation_start(&self) -> f64 {
        self.starvation_start
    }

    pub fn dehydration_start(&self) -> f64 {
        self.dehydration_start
    }

    pub fn body(&self) -> &BodyProfile {
        &self.body
    }

    pub fn muscles(&self) -> &MuscleModel {
        &self.muscles
    }

    pub fn radiation(&self) -> &RadiationExposure {
        &self.radiation
    }

    /// Dose bookkeeping is the environment model's job; it writes through
    /// here.
    pub fn radiation_mut(&mut self) -> &mut RadiationExposure {
        &mut self.radiation
    }

    pub fn medical(&self) -> &MedicalRecord {
        &self.medical
    }

    pub fn ledger(&self) -> &ConsumptionLedger {
        &self.ledger
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn death_info(&self) -> Option<&DeathInfo> {
        self.death.as_ref()
    }

    pub fn mission_msol(&self) -> f64 {
        self.mission_msol
    }

    /// Where a detector-driven condition stands, from the problem set alone.
    pub fn deprivation_state(&self, kind: ComplaintType) -> DeprivationState {
        match self.medical.state_of(kind) {
            Some(ProblemState::Degrading) | Some(ProblemState::Dead) => DeprivationState::Onset,
            Some(ProblemState::Recovering) => DeprivationState::Recovering,
            Some(ProblemState::Cured) => DeprivationState::Cured,
            None => {
                if self
                    .medical
                    .cured_history()
                    .iter()
                    .any(|c| c.complaint_type == kind)
                {
                    DeprivationState::Cured
                } else {
                    DeprivationState::Healthy
                }
            }
        }
    }

    pub fn is_starving(&self) -> bool {
        self.deprivation_state(ComplaintType::Starvation) == DeprivationState::Onset
    }

    pub fn is_dehydrated(&self) -> bool {
        self.deprivation_state(ComplaintType::Dehydration) == DeprivationState::Onset
    }

    pub fn is_radiation_poisoned(&self) -> bool {
        self.deprivation_state(ComplaintType::RadiationSickness) == DeprivationState::Onset
    }

    pub fn is_hungry(&self) -> bool {
        fitness::is_hungry(self.hunger, self.energy)
    }

    pub fn is_doubly_hungry(&self) -> bool {
        fitness::is_doubly_hungry(self.hunger, self.energy)
    }

    pub fn is_thirsty(&self) -> bool {
        fitness::is_thirsty(self.thirst)
    }

    pub fn is_doubly_thirsty(&self) -> bool {
        fitness::is_doubly_thirsty(self.thirst)
    }

    /// Solid food, meals and desserts all count against the daily ration.
    pub fn ate_too_much(&self, config: &PhysioConfig) -> bool {
        let eaten = self.ledger.today(ResourceCategory::Food)
            + self.ledger.today(ResourceCategory::Meal)
            + self.ledger.today(ResourceCategory::Dessert);
        eaten >= config.food_rate * 1.5 && self.hunger < HUNGER_THRESHOLD
    }

    pub fn drank_enough_water(&self, config: &PhysioConfig) -> bool {
        self.ledger.today(ResourceCategory::Water) >= config.water_rate * 1.5
            && self.thirst < THIRST_THRESHOLD
    }

    pub fn is_sleepy(&self) -> bool {
        fitness::is_sleepy(self.fatigue)
    }

    pub fn is_stressed_out(&self) -> bool {
        fitness::is_stressed_out(self.stress, self.muscles.pain_tolerance_factor())
    }

    pub fn fitness_level(&self, catalog: &ComplaintCatalog) -> u32 {
        let serious = self.medical.problems().iter().any(|p| {
            p.is_active()
                && catalog
                    .get(p.complaint_type())
                    .map(|t| t.seriousness >= SERIOUS_PROBLEM_THRESHOLD)
                    .unwrap_or(false)
        });
        fitness::fitness_level(
            self.fatigue,
            self.stress,
            self.hunger,
            self.thirst,
            self.energy,
            serious,
        )
    }

    pub fn is_fit(&self, required_level: u32, catalog: &ComplaintCatalog) -> bool {
        self.fitness_level(catalog) >= required_level
    }

    pub fn is_unfit(&self, required_level: u32, catalog: &ComplaintCatalog) -> bool {
        !self.is_fit(required_level, catalog)
    }

    pub fn is_eva_fit(&self, catalog: &ComplaintCatalog) -> bool {
        self.is_fit(3, catalog)
    }

    pub fn is_nominally_fit(&self, catalog: &ComplaintCatalog) -> bool {
        self.is_fit(2, catalog)
    }

    pub fn health_score(&self) -> f64 {
        fitness::health_score(
            self.fatigue,
            self.stress,
            self.hunger,
            self.thirst,
            self.performance,
        )
    }

    /// User-visible status band.
    pub fn status_label(&self, catalog: &ComplaintCatalog) -> HealthStatus {
        if !self.alive {
            let cause = self
                .death
                .as_ref()
                .map(|d| d.cause.label())
                .unwrap_or_else(|| "Unknown".to_string());
            return HealthStatus::Dead(cause);
        }
        match self.medical.most_serious(catalog) {
            Some(problem) if problem.is_active() => HealthStatus::Sick(problem.complaint_type()),
            _ => HealthStatus::Well,
        }
    }
}
