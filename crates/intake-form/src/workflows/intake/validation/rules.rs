use super::patterns::{
    is_contact_email, is_email, is_four_digit_year, is_international_phone, is_person_name,
    parse_date,
};
use super::{FieldErrors, ValidationContext};
use crate::workflows::intake::domain::{Education, Experience, PersonalInfo, Reference, Skill};

const EARLIEST_YEAR: i32 = 1900;
const FUTURE_YEAR_ALLOWANCE: i32 = 10;
const MAX_SKILL_YEARS: i32 = 50;

/// Required text only has to be non-empty; whitespace counts as content.
fn is_missing(value: &str) -> bool {
    value.is_empty()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn optional_text(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|text| !is_blank(text)).cloned()
}

pub fn validate_personal_info(
    info: &PersonalInfo,
    _context: &ValidationContext,
) -> Result<PersonalInfo, FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_missing(&info.full_name) {
        errors.reject("fullName", "Full name is required");
    } else if !is_person_name(&info.full_name) {
        errors.reject("fullName", "Only letters & spaces are allowed");
    }

    if is_missing(&info.email) {
        errors.reject("email", "Email is required");
    } else if !is_email(&info.email) {
        errors.reject("email", "Invalid email address");
    }

    if is_missing(&info.phone) {
        errors.reject("phone", "Phone number is required");
    } else if !is_international_phone(&info.phone) {
        errors.reject("phone", "Invalid phone number");
    }

    if let Some(dob) = info.dob.as_deref().filter(|dob| !is_blank(dob)) {
        if parse_date(dob).is_none() {
            errors.reject("dob", "Invalid date of birth");
        }
    }

    if is_missing(&info.location) {
        errors.reject("location", "Location is required");
    }

    errors.finish(info.clone())
}

pub fn validate_experience(
    experience: &Experience,
    _context: &ValidationContext,
) -> Result<Experience, FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_missing(&experience.job_title) {
        errors.reject("jobTitle", "Job title is required");
    }
    if is_missing(&experience.company) {
        errors.reject("company", "Company is required");
    }

    let start = if is_missing(&experience.start_date) {
        errors.reject("startDate", "Start date is required");
        None
    } else {
        let parsed = parse_date(&experience.start_date);
        if parsed.is_none() {
            errors.reject("startDate", "Invalid start date");
        }
        parsed
    };

    let end_date = experience.end_date();
    if !experience.currently_working {
        match end_date {
            None => errors.reject("endDate", "End date is required unless currently working"),
            Some(raw) => match (start, parse_date(raw)) {
                (_, None) => errors.reject("endDate", "Invalid end date"),
                (Some(start), Some(end)) if end < start => {
                    errors.reject("endDate", "End date must be on or after start date")
                }
                _ => {}
            },
        }
    }

    if is_missing(&experience.responsibilities) {
        errors.reject("responsibilities", "Responsibilities are required");
    }

    let normalized = Experience {
        end_date: if experience.currently_working {
            None
        } else {
            end_date.map(str::to_string)
        },
        ..experience.clone()
    };
    errors.finish(normalized)
}

fn check_year(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
    required_message: &str,
    latest: i32,
    range_message: &str,
) -> Option<i32> {
    if is_missing(raw) {
        errors.reject(field, required_message);
        return None;
    }
    if !is_four_digit_year(raw) {
        errors.reject(field, "Must be a 4-digit year");
        return None;
    }
    let year: i32 = raw.parse().ok()?;
    if !(EARLIEST_YEAR..=latest).contains(&year) {
        errors.reject(field, range_message);
        return None;
    }
    Some(year)
}

pub fn validate_education(
    education: &Education,
    context: &ValidationContext,
) -> Result<Education, FieldErrors> {
    let mut errors = FieldErrors::new();
    let current_year = context.current_year();

    if is_missing(&education.school) {
        errors.reject("school", "School / University name is required");
    }
    if is_missing(&education.degree) {
        errors.reject("degree", "Degree is required");
    }
    if is_missing(&education.field) {
        errors.reject("field", "Field of study is required");
    }

    let start = check_year(
        &mut errors,
        "startYear",
        &education.start_year,
        "Start year is required",
        current_year,
        "Must be between 1900 and current year",
    );
    let end = check_year(
        &mut errors,
        "endYear",
        &education.end_year,
        "End year is required",
        current_year + FUTURE_YEAR_ALLOWANCE,
        "Must be between 1900 and a reasonable future year",
    );
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.reject("endYear", "End year must be after start year");
        }
    }

    if education
        .certificates
        .iter()
        .any(|certificate| is_missing(&certificate.name))
    {
        errors.reject("certificates", "Certificate name is required");
    }

    let normalized = Education {
        grade: optional_text(&education.grade),
        ..education.clone()
    };
    errors.finish(normalized)
}

pub fn validate_skill(skill: &Skill, _context: &ValidationContext) -> Result<Skill, FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_blank(&skill.name) {
        errors.reject("name", "Skill name is required");
    }
    if let Some(years) = skill.years {
        if !(0..=MAX_SKILL_YEARS).contains(&years) {
            errors.reject("years", "Years must be between 0 and 50");
        }
    }

    let normalized = Skill {
        name: skill.name.trim().to_string(),
        years: skill.years,
    };
    errors.finish(normalized)
}

pub fn validate_reference(
    reference: &Reference,
    _context: &ValidationContext,
) -> Result<Reference, FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_missing(&reference.name) {
        errors.reject("name", "Reference name is required");
    }
    if is_missing(&reference.relationship) {
        errors.reject("relationship", "Relationship is required");
    }
    if is_missing(&reference.company) {
        errors.reject("company", "Company name is required");
    }

    if is_missing(&reference.contact) {
        errors.reject("contact", "Contact (phone/email) is required");
    } else if !is_contact_email(&reference.contact)
        && !is_international_phone(&reference.contact)
    {
        errors.reject("contact", "Enter a valid phone or email");
    }

    errors.finish(reference.clone())
}
