use chrono::NaiveDate;

use super::super::cross_entry::experience_interval;
use super::super::domain::{Experience, FormState, Step};
use super::super::validation::{parse_date, validate_aggregate, ValidationContext};
use super::views::{
    EducationView, ExperienceView, FormSummary, PersonalSummaryView, ReferenceView,
    StepProgressEntry,
};

pub const DAYS_PER_YEAR: f64 = 365.25;

/// Whole years since `dob`.
///
/// An absent or unreadable date of birth reports 0 rather than an error, as does a
/// date of birth after `today`.
pub fn age(dob: &str, today: NaiveDate) -> u32 {
    let Some(born) = parse_date(dob) else {
        return 0;
    };
    let days = (today - born).num_days();
    if days <= 0 {
        return 0;
    }
    (days as f64 / DAYS_PER_YEAR).floor() as u32
}

/// Fractional years covered by one entry; current roles run until `today`.
pub fn experience_years(experience: &Experience, today: NaiveDate) -> f64 {
    experience_interval(experience, today)
        .map(|(start, end)| (end - start).num_days() as f64 / DAYS_PER_YEAR)
        .unwrap_or(0.0)
}

/// Unrounded sum of [`experience_years`] across the collection.
pub fn total_experience_years(experiences: &[Experience], today: NaiveDate) -> f64 {
    experiences
        .iter()
        .map(|experience| experience_years(experience, today))
        .sum()
}

/// Project the form into its review view. Recomputed on every call.
pub fn summarize(state: &FormState, today: NaiveDate) -> FormSummary {
    let current = state.current_step();
    let progress = Step::ordered()
        .into_iter()
        .map(|step| StepProgressEntry {
            step,
            step_number: step.number(),
            step_label: step.label(),
            reached: step <= current,
            current: step == current,
        })
        .collect();

    let info = &state.personal_info;
    let age = info
        .dob
        .as_deref()
        .filter(|dob| !dob.trim().is_empty())
        .map(|dob| age(dob, today));
    let personal = PersonalSummaryView {
        full_name: info.full_name.clone(),
        email: info.email.clone(),
        phone: info.phone.clone(),
        gender_label: info.gender.label(),
        location: info.location.clone(),
        education_level_label: info.education_level.map(|level| level.label()),
        age,
    };

    let experiences = state
        .experiences
        .iter()
        .map(|experience| ExperienceView {
            job_title: experience.job_title.clone(),
            company: experience.company.clone(),
            employment_type_label: experience.employment_type.label(),
            period: experience.period_label(),
            currently_working: experience.currently_working,
            responsibilities: experience.responsibilities.clone(),
            years: experience_years(experience, today),
        })
        .collect();

    let educations = state
        .educations
        .iter()
        .map(|education| EducationView {
            school: education.school.clone(),
            degree: education.degree.clone(),
            field: education.field.clone(),
            period: education.period_label(),
            grade: education.grade.clone(),
            certificates: education
                .certificates
                .iter()
                .map(|certificate| certificate.name.clone())
                .collect(),
        })
        .collect();

    let references = if state.skip_references || state.references.is_empty() {
        None
    } else {
        Some(
            state
                .references
                .iter()
                .map(|reference| ReferenceView {
                    name: reference.name.clone(),
                    relationship: reference.relationship.clone(),
                    company: reference.company.clone(),
                    contact: reference.contact.clone(),
                })
                .collect(),
        )
    };

    FormSummary {
        current_step: current,
        progress,
        personal,
        experiences,
        total_experience_years: total_experience_years(&state.experiences, today),
        educations,
        skills: state.skills.iter().map(|skill| skill.label()).collect(),
        references,
        outstanding: validate_aggregate(state, &ValidationContext::new(today)),
    }
}
