use super::{Validate, ValidationContext};
use crate::workflows::intake::cross_entry::{detect_overlap, duplicate_skill, SectionError};
use crate::workflows::intake::domain::FormState;

/// Replay every entity and section rule over the whole form.
///
/// Messages come out in form order; an empty list means the form may be submitted.
pub fn validate_aggregate(state: &FormState, context: &ValidationContext) -> Vec<String> {
    let mut messages = Vec::new();

    if state.personal_info.validate(context).is_err() {
        messages.push("Personal Information is incomplete or invalid".to_string());
    }

    if state.experiences.is_empty() {
        messages.push(SectionError::MissingExperience.to_string());
    } else {
        for (idx, experience) in state.experiences.iter().enumerate() {
            if experience.validate(context).is_err() {
                messages.push(format!("Experience entry {} is invalid", idx + 1));
            }
        }
        if detect_overlap(&state.experiences, context.today) {
            messages.push("Experience dates overlap with existing entries".to_string());
        }
    }

    if state.personal_info.requires_education() && state.educations.is_empty() {
        messages.push(SectionError::MissingEducation.to_string());
    } else {
        for (idx, education) in state.educations.iter().enumerate() {
            if education.validate(context).is_err() {
                messages.push(format!("Education entry {} is invalid", idx + 1));
            }
        }
    }

    for (idx, skill) in state.skills.iter().enumerate() {
        if skill.validate(context).is_err() {
            messages.push(format!("Skill entry {} is invalid", idx + 1));
        }
    }
    if let Some(skill) = duplicate_skill(&state.skills) {
        messages.push(SectionError::DuplicateSkill(skill.name.clone()).to_string());
    }

    if !state.skip_references {
        if state.references.is_empty() {
            messages.push(SectionError::MissingReference.to_string());
        } else {
            for (idx, reference) in state.references.iter().enumerate() {
                if reference.validate(context).is_err() {
                    messages.push(format!("Reference entry {} is invalid", idx + 1));
                }
            }
        }
    }

    messages
}
