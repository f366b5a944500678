use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use super::cross_entry::{
    overlaps_on_replace, overlaps_with_existing, section_requirement, SectionError,
};
use super::domain::{Education, Experience, FormState, Reference, Skill, Step};
use super::report::{summarize, FormSummary};
use super::skills::{with_skill_added, with_skill_years, without_skill};
use super::store::{FormStore, StoreError};
use super::validation::{validate_aggregate, FieldErrors, Validate, ValidationContext};

const TERMS_NOT_ACCEPTED: &str = "You must agree to the terms and conditions";

/// In-progress entry for a step that collects a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Experience(Experience),
    Education(Education),
    Reference(Reference),
}

impl Draft {
    pub const fn step(&self) -> Step {
        match self {
            Draft::Experience(_) => Step::Experience,
            Draft::Education(_) => Step::Education,
            Draft::Reference(_) => Step::References,
        }
    }
}

/// Local confirmation produced by a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub submitted_on: NaiveDate,
    pub summary: FormSummary,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StepError {
    #[error("{step} has invalid fields: {errors}")]
    InvalidEntry { step: Step, errors: FieldErrors },
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error("Experience dates overlap with existing entries")]
    Overlap,
    #[error("{step} does not collect {draft} entries")]
    DraftNotAccepted { step: Step, draft: Step },
    #[error("cannot jump to {target} from {current}; jumping is only available from the summary")]
    JumpNotPermitted { current: Step, target: Step },
    #[error("{0} is the final step")]
    FinalStep(Step),
    #[error("submission is only available from the submit step (currently at {current})")]
    NotAtSubmitStep { current: Step },
    #[error("submission rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StepError {
    /// Field errors carried by an invalid draft, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            StepError::InvalidEntry { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Drives progression through the seven steps on top of a [`FormStore`].
///
/// Every check happens here; the store only applies changes that already passed.
pub struct StepController {
    store: FormStore,
    reference_date: Option<NaiveDate>,
    receipt: Option<SubmissionReceipt>,
}

impl StepController {
    pub fn new(store: FormStore) -> Self {
        Self {
            store,
            reference_date: None,
            receipt: None,
        }
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn context(&self) -> ValidationContext {
        ValidationContext::new(self.today())
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// Direct store access for field-level edits from the presentation layer.
    pub fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    pub fn into_store(self) -> FormStore {
        self.store
    }

    pub fn snapshot(&self) -> Arc<FormState> {
        self.store.snapshot()
    }

    pub fn current_step(&self) -> Step {
        self.store.current_step()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.receipt.is_some()
    }

    /// Validate and append an experience, refusing entries that overlap existing ones.
    pub fn add_experience(&mut self, draft: Experience) -> Result<(), StepError> {
        let experience = self.checked(Step::Experience, &draft)?;
        if overlaps_with_existing(&self.store.state().experiences, &experience, self.today()) {
            return Err(StepError::Overlap);
        }
        self.store.add_experience(experience);
        Ok(())
    }

    pub fn update_experience(&mut self, position: usize, draft: Experience) -> Result<(), StepError> {
        let experience = self.checked(Step::Experience, &draft)?;
        let existing = &self.store.state().experiences;
        if position < existing.len()
            && overlaps_on_replace(existing, position, &experience, self.today())
        {
            return Err(StepError::Overlap);
        }
        self.store.update_experience(position, experience)?;
        Ok(())
    }

    pub fn add_education(&mut self, draft: Education) -> Result<(), StepError> {
        let education = self.checked(Step::Education, &draft)?;
        self.store.add_education(education);
        Ok(())
    }

    pub fn update_education(&mut self, position: usize, draft: Education) -> Result<(), StepError> {
        let education = self.checked(Step::Education, &draft)?;
        self.store.update_education(position, education)?;
        Ok(())
    }

    pub fn add_reference(&mut self, draft: Reference) -> Result<(), StepError> {
        let reference = self.checked(Step::References, &draft)?;
        self.store.add_reference(reference);
        Ok(())
    }

    pub fn update_reference(&mut self, position: usize, draft: Reference) -> Result<(), StepError> {
        let reference = self.checked(Step::References, &draft)?;
        self.store.update_reference(position, reference)?;
        Ok(())
    }

    /// Add a skill chip; a case-insensitive repeat is refused and nothing changes.
    pub fn add_skill(&mut self, name: &str) -> Result<(), StepError> {
        let skill = self.checked(Step::Skills, &Skill::named(name))?;
        let skills = with_skill_added(&self.store.state().skills, &skill.name)
            .ok_or_else(|| SectionError::DuplicateSkill(skill.name.clone()))?;
        self.store.set_skills(skills);
        Ok(())
    }

    pub fn remove_skill(&mut self, position: usize) -> Result<(), StepError> {
        let skills = &self.store.state().skills;
        let next = without_skill(skills, position).ok_or(StoreError::PositionOutOfRange {
            section: "skill",
            position,
            len: skills.len(),
        })?;
        self.store.set_skills(next);
        Ok(())
    }

    pub fn set_skill_years(&mut self, position: usize, years: Option<i32>) -> Result<(), StepError> {
        let skills = &self.store.state().skills;
        let next = with_skill_years(skills, position, years).ok_or(
            StoreError::PositionOutOfRange {
                section: "skill",
                position,
                len: skills.len(),
            },
        )?;
        self.checked(Step::Skills, &next[position])?;
        self.store.set_skills(next);
        Ok(())
    }

    /// Leave the current step for the next one.
    ///
    /// A pending draft is validated and committed first; the step's minimum-entry rule
    /// is then checked against the committed collection. Nothing moves on failure.
    pub fn advance(&mut self, draft: Option<Draft>) -> Result<Step, StepError> {
        let current = self.current_step();
        if current == Step::Submit {
            return Err(StepError::FinalStep(current));
        }

        if current == Step::Personal {
            self.checked(Step::Personal, &self.store.state().personal_info)?;
        }

        if let Some(draft) = draft {
            if draft.step() != current {
                return Err(StepError::DraftNotAccepted {
                    step: current,
                    draft: draft.step(),
                });
            }
            match draft {
                Draft::Experience(experience) => self.add_experience(experience)?,
                Draft::Education(education) => self.add_education(education)?,
                Draft::Reference(reference) => self.add_reference(reference)?,
            }
        }

        section_requirement(current, self.store.state())?;

        self.store.next_step();
        let next = self.current_step();
        info!(from = %current, to = %next, "advanced intake step");
        Ok(next)
    }

    /// Go back one step. Never validates.
    pub fn retreat(&mut self) -> Step {
        self.store.prev_step();
        let step = self.current_step();
        debug!(to = %step, "retreated intake step");
        step
    }

    /// Jump from the summary straight to `target` for an edit; later steps are not re-checked.
    pub fn jump_to(&mut self, target: Step) -> Result<Step, StepError> {
        let current = self.current_step();
        if current != Step::Summary {
            return Err(StepError::JumpNotPermitted { current, target });
        }
        self.store.go_to_step(target.number());
        info!(from = %current, to = %target, "jumped to intake step");
        Ok(target)
    }

    pub fn summary(&self) -> FormSummary {
        summarize(self.store.state(), self.today())
    }

    /// Every outstanding problem across the whole form, in form order.
    pub fn validate_all(&self) -> Vec<String> {
        validate_aggregate(self.store.state(), &self.context())
    }

    /// Final confirmation. All rules are replayed before terms acceptance is considered.
    pub fn submit(&mut self, terms_accepted: bool) -> Result<SubmissionReceipt, StepError> {
        let current = self.current_step();
        if current != Step::Submit {
            return Err(StepError::NotAtSubmitStep { current });
        }

        let messages = self.validate_all();
        if !messages.is_empty() {
            info!(problems = messages.len(), "submission rejected");
            return Err(StepError::Rejected(messages));
        }
        if !terms_accepted {
            return Err(StepError::Rejected(vec![TERMS_NOT_ACCEPTED.to_string()]));
        }

        let today = self.today();
        let receipt = SubmissionReceipt {
            submitted_on: today,
            summary: summarize(self.store.state(), today),
        };
        self.receipt = Some(receipt.clone());
        info!(submitted_on = %today, "intake form submitted");
        Ok(receipt)
    }

    fn checked<T: Validate>(&self, step: Step, entity: &T) -> Result<T, StepError> {
        entity
            .validate(&self.context())
            .map_err(|errors| StepError::InvalidEntry { step, errors })
    }
}
