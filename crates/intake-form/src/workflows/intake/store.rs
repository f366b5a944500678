use std::sync::Arc;

use tracing::debug;

use super::domain::{
    clamp_step, Education, Experience, FormState, PersonalInfo, Reference, Skill, Step,
};
use super::persistence::{Autosave, SnapshotSlot};

/// Observer notified with every snapshot the store settles on.
pub trait SnapshotSink: Send + Sync {
    fn persist(&self, state: &FormState);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{section} entry at position {position} does not exist ({len} entries)")]
    PositionOutOfRange {
        section: &'static str,
        position: usize,
        len: usize,
    },
}

/// Single owner of the form aggregate.
///
/// Mutations never edit the current snapshot in place: each builds a new `FormState`
/// and swaps the shared pointer, so holders of an older `Arc` keep an unchanged view and
/// can detect change with [`Arc::ptr_eq`]. The store performs no validation.
pub struct FormStore {
    state: Arc<FormState>,
    revision: u64,
    sinks: Vec<Arc<dyn SnapshotSink>>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        Self::from_state(FormState::default())
    }

    pub fn from_state(mut state: FormState) -> Self {
        state.step = clamp_step(state.step);
        Self {
            state: Arc::new(state),
            revision: 0,
            sinks: Vec::new(),
        }
    }

    /// Restore the last saved snapshot (or start fresh) and autosave from then on.
    pub fn restore<S>(autosave: Arc<Autosave<S>>) -> Self
    where
        S: SnapshotSlot + 'static,
    {
        let state = autosave.restore().unwrap_or_default();
        let mut store = Self::from_state(state);
        store.subscribe(autosave);
        store
    }

    pub fn subscribe(&mut self, sink: Arc<dyn SnapshotSink>) {
        self.sinks.push(sink);
    }

    pub fn snapshot(&self) -> Arc<FormState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Count of committed mutations since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step()
    }

    pub fn set_personal_info(&mut self, info: PersonalInfo) {
        self.apply(|state| state.personal_info = info);
    }

    pub fn add_experience(&mut self, experience: Experience) {
        self.apply(|state| state.experiences.push(experience));
    }

    pub fn update_experience(
        &mut self,
        position: usize,
        experience: Experience,
    ) -> Result<(), StoreError> {
        check_position("experience", position, self.state.experiences.len())?;
        self.apply(|state| state.experiences[position] = experience);
        Ok(())
    }

    pub fn remove_experience(&mut self, position: usize) -> Result<(), StoreError> {
        check_position("experience", position, self.state.experiences.len())?;
        self.apply(|state| {
            state.experiences.remove(position);
        });
        Ok(())
    }

    pub fn add_education(&mut self, education: Education) {
        self.apply(|state| state.educations.push(education));
    }

    pub fn update_education(
        &mut self,
        position: usize,
        education: Education,
    ) -> Result<(), StoreError> {
        check_position("education", position, self.state.educations.len())?;
        self.apply(|state| state.educations[position] = education);
        Ok(())
    }

    pub fn remove_education(&mut self, position: usize) -> Result<(), StoreError> {
        check_position("education", position, self.state.educations.len())?;
        self.apply(|state| {
            state.educations.remove(position);
        });
        Ok(())
    }

    /// Replace the skills collection wholesale.
    pub fn set_skills(&mut self, skills: Vec<Skill>) {
        self.apply(|state| state.skills = skills);
    }

    pub fn add_reference(&mut self, reference: Reference) {
        self.apply(|state| state.references.push(reference));
    }

    pub fn update_reference(
        &mut self,
        position: usize,
        reference: Reference,
    ) -> Result<(), StoreError> {
        check_position("reference", position, self.state.references.len())?;
        self.apply(|state| state.references[position] = reference);
        Ok(())
    }

    pub fn remove_reference(&mut self, position: usize) -> Result<(), StoreError> {
        check_position("reference", position, self.state.references.len())?;
        self.apply(|state| {
            state.references.remove(position);
        });
        Ok(())
    }

    pub fn set_skip_references(&mut self, skip: bool) {
        self.apply(|state| state.skip_references = skip);
    }

    pub fn next_step(&mut self) {
        self.move_to(self.state.step.saturating_add(1));
    }

    pub fn prev_step(&mut self) {
        self.move_to(self.state.step.saturating_sub(1));
    }

    /// Set the step directly; values outside `[1, 7]` are clamped.
    pub fn go_to_step(&mut self, step: u8) {
        self.move_to(step);
    }

    /// Discard everything collected and return to the first step.
    pub fn reset(&mut self) {
        self.commit(FormState::default());
    }

    fn move_to(&mut self, step: u8) {
        let step = clamp_step(step);
        if step == self.state.step {
            return;
        }
        self.apply(|state| state.step = step);
    }

    fn apply(&mut self, mutate: impl FnOnce(&mut FormState)) {
        let mut next = FormState::clone(&self.state);
        mutate(&mut next);
        self.commit(next);
    }

    fn commit(&mut self, next: FormState) {
        self.state = Arc::new(next);
        self.revision += 1;
        debug!(
            revision = self.revision,
            step = self.state.step,
            "form state committed"
        );
        for sink in &self.sinks {
            sink.persist(&self.state);
        }
    }
}

fn check_position(section: &'static str, position: usize, len: usize) -> Result<(), StoreError> {
    if position < len {
        Ok(())
    } else {
        Err(StoreError::PositionOutOfRange {
            section,
            position,
            len,
        })
    }
}
