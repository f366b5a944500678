//! Multi-step application intake: entity validation, cross-entry rules, the form store,
//! step progression, review summary and snapshot persistence.

pub mod catalog;
pub mod controller;
pub mod cross_entry;
pub mod domain;
pub mod persistence;
pub mod report;
pub mod skills;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use controller::{Draft, StepController, StepError, SubmissionReceipt};
pub use cross_entry::{detect_overlap, SectionError};
pub use domain::{
    Certificate, Education, EducationLevel, EmploymentType, Experience, FormState, Gender,
    PersonalInfo, Reference, Skill, Step, STEP_COUNT,
};
pub use persistence::{
    Autosave, FileSnapshotSlot, MemorySnapshotSlot, SnapshotError, SnapshotSlot, SNAPSHOT_KEY,
};
pub use report::{age, total_experience_years, FormSummary};
pub use store::{FormStore, SnapshotSink, StoreError};
pub use validation::{FieldError, FieldErrors, Validate, ValidationContext};
