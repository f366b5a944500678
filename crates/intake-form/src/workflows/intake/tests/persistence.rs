use std::sync::Arc;

use super::common::*;
use crate::workflows::intake::domain::FormState;
use crate::workflows::intake::persistence::{
    Autosave, FileSnapshotSlot, MemorySnapshotSlot, SnapshotError, SnapshotSlot, SNAPSHOT_KEY,
};
use crate::workflows::intake::store::FormStore;

struct BrokenSlot;

impl SnapshotSlot for BrokenSlot {
    fn load(&self, _key: &str) -> Result<Option<String>, SnapshotError> {
        Err(SnapshotError::Unavailable("disk offline".to_string()))
    }

    fn save(&self, _key: &str, _payload: &str) -> Result<(), SnapshotError> {
        Err(SnapshotError::Unavailable("disk offline".to_string()))
    }

    fn clear(&self, _key: &str) -> Result<(), SnapshotError> {
        Err(SnapshotError::Unavailable("disk offline".to_string()))
    }
}

#[test]
fn every_mutation_is_written_to_the_slot() {
    let autosave = Arc::new(Autosave::new(MemorySnapshotSlot::default()));
    let mut store = FormStore::restore(autosave.clone());
    assert_eq!(autosave.slot().payload(SNAPSHOT_KEY), None);

    store.set_personal_info(personal_info());
    store.add_experience(experience("2020-01-01", "2020-06-01"));

    let payload = autosave
        .slot()
        .payload(SNAPSHOT_KEY)
        .expect("snapshot written");
    let saved: FormState = serde_json::from_str(&payload).expect("snapshot decodes");
    assert_eq!(saved, *store.snapshot());
    assert!(payload.contains("\"fullName\":\"Ada Lovelace\""));
    assert!(payload.contains("\"skipReferences\":false"));
}

#[test]
fn restore_picks_up_previous_progress() {
    let slot = MemorySnapshotSlot::default();
    let previous = FormState {
        step: 3,
        personal_info: personal_info(),
        experiences: vec![experience("2020-01-01", "2020-06-01")],
        ..FormState::default()
    };
    slot.save(SNAPSHOT_KEY, &serde_json::to_string(&previous).expect("encodes"))
        .expect("memory save");

    let store = FormStore::restore(Arc::new(Autosave::new(slot)));
    assert_eq!(*store.snapshot(), previous);
}

#[test]
fn shape_mismatch_restores_as_fresh_state() {
    let slot = MemorySnapshotSlot::default();
    slot.save(SNAPSHOT_KEY, r#"{"step":"two","legacy":true}"#)
        .expect("memory save");
    let autosave = Autosave::new(slot);
    assert_eq!(autosave.restore(), None);

    let store = FormStore::restore(Arc::new(autosave));
    assert_eq!(*store.snapshot(), FormState::default());
}

#[test]
fn restored_step_is_clamped() {
    let slot = MemorySnapshotSlot::default();
    let mut raw = serde_json::to_value(FormState::default()).expect("encodes");
    raw["step"] = serde_json::json!(9);
    slot.save(SNAPSHOT_KEY, &raw.to_string()).expect("memory save");

    let restored = Autosave::new(slot).restore().expect("shape matches");
    assert_eq!(restored.step, 7);
}

#[test]
fn failing_slot_never_blocks_the_form() {
    let autosave = Arc::new(Autosave::new(BrokenSlot));
    let mut store = FormStore::restore(autosave);
    store.set_skip_references(true);
    store.next_step();
    assert!(store.state().skip_references);
    assert_eq!(store.state().step, 2);
}

#[test]
fn file_slot_round_trips_and_clears() {
    let dir = tempfile::tempdir().expect("temp dir");
    let slot = FileSnapshotSlot::new(dir.path().join("nested"));
    assert_eq!(slot.load(SNAPSHOT_KEY).expect("missing is fine"), None);

    slot.save(SNAPSHOT_KEY, "{}").expect("writes");
    assert!(dir.path().join("nested").join("formState.json").exists());
    assert_eq!(
        slot.load(SNAPSHOT_KEY).expect("reads").as_deref(),
        Some("{}")
    );

    slot.clear(SNAPSHOT_KEY).expect("clears");
    slot.clear(SNAPSHOT_KEY).expect("clearing twice is fine");
    assert_eq!(slot.load(SNAPSHOT_KEY).expect("reads"), None);
}

#[test]
fn failed_file_save_leaves_no_staging_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::create_dir(dir.path().join("formState.json")).expect("blocking directory");
    let slot = FileSnapshotSlot::new(dir.path());

    assert!(slot.save(SNAPSHOT_KEY, "{}").is_err());
    assert!(!dir.path().join("formState.json.tmp").exists());
}

#[test]
fn file_slot_rejects_unsafe_keys() {
    let dir = tempfile::tempdir().expect("temp dir");
    let slot = FileSnapshotSlot::new(dir.path());
    match slot.save("../outside", "{}") {
        Err(SnapshotError::InvalidKey(key)) => assert_eq!(key, "../outside"),
        other => panic!("expected invalid key, got {other:?}"),
    }
}
