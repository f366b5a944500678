use std::sync::Arc;

use super::common::*;
use crate::workflows::intake::domain::{FormState, Skill, Step};
use crate::workflows::intake::store::{FormStore, StoreError};

#[test]
fn starts_with_defaults() {
    let store = FormStore::new();
    let state = store.snapshot();
    assert_eq!(state.step, 1);
    assert_eq!(*state, FormState::default());
    assert_eq!(store.revision(), 0);
    assert_eq!(store.current_step(), Step::Personal);
}

#[test]
fn mutations_publish_new_snapshots_and_keep_old_ones_intact() {
    let (mut store, sink) = recording_store();
    let before = store.snapshot();

    store.add_experience(experience("2020-01-01", "2020-06-01"));
    let after = store.snapshot();

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(before.experiences.is_empty());
    assert_eq!(after.experiences.len(), 1);
    assert_eq!(store.revision(), 1);
    assert_eq!(sink.snapshots().len(), 1);
    assert_eq!(sink.snapshots()[0], *after);
}

#[test]
fn positional_updates_and_removals() {
    let mut store = FormStore::new();
    store.add_education(education());
    store.add_reference(reference());
    store.add_reference(reference());

    let mut changed = education();
    changed.degree = "MSc".to_string();
    store.update_education(0, changed).expect("position exists");
    assert_eq!(store.state().educations[0].degree, "MSc");

    store.remove_reference(0).expect("position exists");
    assert_eq!(store.state().references.len(), 1);

    let revision = store.revision();
    assert_eq!(
        store.remove_experience(0),
        Err(StoreError::PositionOutOfRange {
            section: "experience",
            position: 0,
            len: 0,
        })
    );
    assert!(store.update_reference(5, reference()).is_err());
    assert_eq!(store.revision(), revision, "failed mutations commit nothing");
}

#[test]
fn store_does_not_validate() {
    let mut store = FormStore::new();
    store.add_experience(experience("", ""));
    store.set_skills(vec![Skill::named("Go"), Skill::named("go")]);
    assert_eq!(store.state().experiences.len(), 1);
    assert_eq!(store.state().skills.len(), 2);
}

#[test]
fn step_moves_are_clamped() {
    let (mut store, sink) = recording_store();
    store.prev_step();
    assert_eq!(store.state().step, 1);
    assert!(sink.snapshots().is_empty(), "no-op moves are not committed");

    store.go_to_step(42);
    assert_eq!(store.current_step(), Step::Submit);
    store.next_step();
    assert_eq!(store.state().step, 7);

    store.go_to_step(0);
    assert_eq!(store.state().step, 1);
    store.next_step();
    assert_eq!(store.current_step(), Step::Experience);
}

#[test]
fn from_state_clamps_out_of_range_steps() {
    let state = FormState {
        step: 12,
        ..FormState::default()
    };
    assert_eq!(FormStore::from_state(state).state().step, 7);
}

#[test]
fn reset_returns_to_defaults() {
    let mut store = FormStore::new();
    store.set_personal_info(personal_info());
    store.set_skip_references(true);
    store.go_to_step(4);
    store.reset();
    assert_eq!(*store.snapshot(), FormState::default());
}
