//! Marstead Physio - Colonist Physiology Engine
//!
//! A tick-driven simulation of one colonist's body: fatigue, hunger,
//! thirst, stress, and caloric reserve, the performance multiplier derived
//! from them, and a full health-problem lifecycle from onset through
//! recovery, cure, or death.
//!
//! # Architecture
//!
//! The engine is a pure state machine:
//! - **No globals**: every rate and threshold lives in a [`config::PhysioContext`]
//!   built once and passed by reference.
//! - **Pulses in, events out**: the host scheduler hands
//!   [`clock::SimPulse`] values to [`condition::ColonistCondition::advance`]
//!   and receives lifecycle events back; the engine publishes nothing.
//! - **Boundaries as traits**: the habitat supplies oxygen, pressure, and
//!   temperature through [`life_support::LifeSupport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use marstead_physio::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = PhysioContext::standard();
//! let mut rng = StdRng::seed_from_u64(42);
//! let profile = ColonistProfile::nominal("Ada Obi");
//! let mut colonist = ColonistCondition::new(&profile, &ctx, &mut rng)?;
//!
//! let mut clock = PulseClock::new();
//! let mut habitat = AmbientConditions::nominal();
//!
//! // One millisol per pulse
//! loop {
//!     let pulse = clock.advance(1.0);
//!     let outcome = colonist.advance(
//!         &pulse,
//!         ActivityLoad::working(PhysicalEffort::Low),
//!         &mut habitat,
//!         &ctx,
//!         &mut rng,
//!     )?;
//!     for event in &outcome.events {
//!         println!("{}", event);
//!     }
//!     if !outcome.alive {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod attributes;
pub mod randutil;

pub mod complaint;
pub mod problem;
pub mod medication;
pub mod medical;

pub mod radiation;
pub mod muscle;
pub mod circadian;
pub mod ledger;
pub mod fitness;

pub mod life_support;
pub mod events;
pub mod death;
pub mod condition;
pub mod snapshot;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::clock::{PulseClock, SimPulse, TickError, MSOLS_PER_SOL};
    pub use crate::complaint::{ComplaintCatalog, ComplaintType, PhysicalEffort};
    pub use crate::condition::{ActivityLoad, ColonistCondition, DeprivationState, TickOutcome};
    pub use crate::config::{ColonistProfile, ConfigError, PhysioConfig, PhysioContext};
    pub use crate::death::{DeathCause, DeathInfo};
    pub use crate::events::{HealthEvent, LifeSupportFault};
    pub use crate::fitness::HealthStatus;
    pub use crate::ledger::ResourceCategory;
    pub use crate::life_support::{AmbientConditions, LifeSupport};
    pub use crate::medication::{Medication, MedicationKind};
    pub use crate::radiation::BodyRegion;
}
