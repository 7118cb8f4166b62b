//! Save/load for colonist physiological state.
//!
//! Uses bincode for compact binary serialization. A version header is
//! written ahead of the body so an incompatible file is rejected before any
//! state is decoded.

use std::io::{Read, Write};

use crate::condition::ColonistCondition;

/// Snapshot format version (increment when the layout changes).
const SNAPSHOT_VERSION: u32 = 1;

/// Writes one colonist's full physiological state.
pub fn save_condition<W: Write>(
    mut writer: W,
    condition: &ColonistCondition,
) -> Result<(), SnapshotError> {
    bincode::serialize_into(&mut writer, &SNAPSHOT_VERSION)?;
    bincode::serialize_into(writer, condition)?;
    Ok(())
}

/// Reads a colonist state previously written by [`save_condition`].
pub fn load_condition<R: Read>(mut reader: R) -> Result<ColonistCondition, SnapshotError> {
    let version: u32 = bincode::deserialize_from(&mut reader)?;
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: version,
        });
    }
    let condition = bincode::deserialize_from(reader)?;
    Ok(condition)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Bincode(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::PulseClock;
    use crate::complaint::PhysicalEffort;
    use crate::condition::ActivityLoad;
    use crate::config::{ColonistProfile, PhysioContext};
    use crate::ledger::ResourceCategory;
    use crate::life_support::AmbientConditions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lived_in_colonist() -> ColonistCondition {
        let ctx = PhysioContext::standard();
        let mut rng = StdRng::seed_from_u64(77);
        let profile = ColonistProfile::nominal("Snapshot Subject");
        let mut condition = ColonistCondition::new(&profile, &ctx, &mut rng)
            .expect("nominal profile should build");
        let mut env = AmbientConditions::nominal();
        let mut clock = PulseClock::new();
        for _ in 0..50 {
            let pulse = clock.advance(1.0);
            condition
                .advance(&pulse, ActivityLoad::working(PhysicalEffort::Low), &mut env, &ctx, &mut rng)
                .expect("valid pulse");
        }
        condition
    }

    #[test]
    fn test_save_load_round_trip() {
        let original = lived_in_colonist();
        let mut buffer = Vec::new();
        save_condition(&mut buffer, &original).expect("save should succeed");

        let restored = load_condition(buffer.as_slice()).expect("load should succeed");
        assert_eq!(restored.name(), original.name());
        assert_eq!(restored.hunger(), original.hunger());
        assert_eq!(restored.thirst(), original.thirst());
        assert_eq!(restored.fatigue(), original.fatigue());
        assert_eq!(restored.energy(), original.energy());
        assert_eq!(restored.performance(), original.performance());
        assert_eq!(restored.mission_msol(), original.mission_msol());
        assert_eq!(restored.is_alive(), original.is_alive());
        assert_eq!(
            restored.medical().problems().len(),
            original.medical().problems().len()
        );
        assert_eq!(
            restored.ledger().today(ResourceCategory::Oxygen),
            original.ledger().today(ResourceCategory::Oxygen)
        );
    }

    #[test]
    fn test_serde_model_keeps_state_fields() {
        let condition = lived_in_colonist();
        let value = serde_json::to_value(&condition).expect("condition should serialize");
        let object = value.as_object().expect("condition serializes to a map");
        for key in [
            "name", "fatigue", "hunger", "thirst", "stress", "energy", "alive", "medical",
            "ledger", "mission_msol",
        ] {
            assert!(object.contains_key(key), "field {} missing from model", key);
        }
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let original = lived_in_colonist();
        let mut buffer = Vec::new();
        bincode::serialize_into(&mut buffer, &99_u32).expect("header write");
        bincode::serialize_into(&mut buffer, &original).expect("body write");

        match load_condition(buffer.as_slice()) {
            Err(SnapshotError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SNAPSHOT_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_truncated_snapshot_fails() {
        let original = lived_in_colonist();
        let mut buffer = Vec::new();
        save_condition(&mut buffer, &original).expect("save should succeed");
        buffer.truncate(buffer.len() / 2);

        assert!(matches!(
            load_condition(buffer.as_slice()),
            Err(SnapshotError::Bincode(_))
        ));
    }
}
