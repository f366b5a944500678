use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use intake_form::config::AppConfig;
use intake_form::workflows::intake::validation;
use intake_form::workflows::intake::{
    Autosave, EducationLevel, EmploymentType, FileSnapshotSlot, FormStore, Gender, Step,
    StepController,
};

/// A restored form plus the autosave feeding its slot.
pub(crate) struct Session {
    pub(crate) controller: StepController,
    pub(crate) autosave: Arc<Autosave<FileSnapshotSlot>>,
}

impl Session {
    /// Restore the last snapshot from the configured slot; every mutation autosaves.
    pub(crate) fn open(
        config: &AppConfig,
        snapshot_dir: Option<PathBuf>,
        today: Option<NaiveDate>,
    ) -> Self {
        let dir = snapshot_dir.unwrap_or_else(|| config.snapshot.dir.clone());
        let autosave = Arc::new(Autosave::with_key(
            FileSnapshotSlot::new(dir),
            config.snapshot.key.clone(),
        ));
        let store = FormStore::restore(autosave.clone());
        let mut controller = StepController::new(store);
        if let Some(today) = today {
            controller = controller.with_reference_date(today);
        }
        Self {
            controller,
            autosave,
        }
    }
}

/// Same date format the validators accept.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    validation::parse_date(raw).ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD"))
}

/// One-based position as typed by the user, returned as a zero-based index.
pub(crate) fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position > 0 => Ok(position - 1),
        _ => Err(format!("'{raw}' is not a position (expected 1, 2, 3, ...)")),
    }
}

pub(crate) fn parse_step(raw: &str) -> Result<Step, String> {
    let key = normalize(raw);
    if let Ok(number) = key.parse::<u8>() {
        return Step::from_number(number)
            .ok_or_else(|| format!("step {number} does not exist (expected 1-7)"));
    }
    Step::ordered()
        .into_iter()
        .find(|step| normalize(step.label()) == key || key == normalize(&format!("{step:?}")))
        .ok_or_else(|| format!("unknown step '{raw}'"))
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    match normalize(raw).as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        "prefer-not-to-say" => Ok(Gender::PreferNotToSay),
        _ => Err(format!(
            "unknown gender '{raw}' (male, female, other, prefer-not-to-say)"
        )),
    }
}

pub(crate) fn parse_education_level(raw: &str) -> Result<EducationLevel, String> {
    match normalize(raw).as_str() {
        "high-school" => Ok(EducationLevel::HighSchool),
        "undergraduate" => Ok(EducationLevel::Undergraduate),
        "graduate" | "graduate-or-higher" => Ok(EducationLevel::GraduateOrHigher),
        _ => Err(format!(
            "unknown education level '{raw}' (high-school, undergraduate, graduate-or-higher)"
        )),
    }
}

pub(crate) fn parse_employment_type(raw: &str) -> Result<EmploymentType, String> {
    match normalize(raw).as_str() {
        "full-time" => Ok(EmploymentType::FullTime),
        "part-time" => Ok(EmploymentType::PartTime),
        "internship" => Ok(EmploymentType::Internship),
        "contract" => Ok(EmploymentType::Contract),
        "freelance" => Ok(EmploymentType::Freelance),
        _ => Err(format!(
            "unknown employment type '{raw}' (full-time, part-time, internship, contract, freelance)"
        )),
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '_'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_follow_the_validator_format() {
        assert_eq!(
            parse_date(" 2024-02-29 "),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date"))
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(parse_position("1"), Ok(0));
        assert_eq!(parse_position(" 3 "), Ok(2));
        assert!(parse_position("0").is_err());
        assert!(parse_position("first").is_err());
    }

    #[test]
    fn steps_parse_by_number_or_name() {
        assert_eq!(parse_step("3"), Ok(Step::Education));
        assert_eq!(parse_step("personal information"), Ok(Step::Personal));
        assert_eq!(parse_step("Personal"), Ok(Step::Personal));
        assert_eq!(parse_step("references"), Ok(Step::References));
        assert!(parse_step("8").is_err());
        assert!(parse_step("payment").is_err());
    }

    #[test]
    fn labelled_enums_accept_their_form_wording() {
        assert_eq!(parse_gender("Prefer not to say"), Ok(Gender::PreferNotToSay));
        assert_eq!(
            parse_education_level("Graduate or higher"),
            Ok(EducationLevel::GraduateOrHigher)
        );
        assert_eq!(parse_employment_type("Part-Time"), Ok(EmploymentType::PartTime));
        assert!(parse_employment_type("volunteer").is_err());
    }
}
