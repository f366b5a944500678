use serde::Serialize;

use super::super::domain::Step;

#[derive(Debug, Clone, Serialize)]
pub struct StepProgressEntry {
    pub step: Step,
    pub step_number: u8,
    pub step_label: &'static str,
    pub reached: bool,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalSummaryView {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender_label: &'static str,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceView {
    pub job_title: String,
    pub company: String,
    pub employment_type_label: &'static str,
    pub period: String,
    pub currently_working: bool,
    pub responsibilities: String,
    pub years: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationView {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceView {
    pub name: String,
    pub relationship: String,
    pub company: String,
    pub contact: String,
}

/// Read-only projection of the whole form for the review step.
#[derive(Debug, Clone, Serialize)]
pub struct FormSummary {
    pub current_step: Step,
    pub progress: Vec<StepProgressEntry>,
    pub personal: PersonalSummaryView,
    pub experiences: Vec<ExperienceView>,
    pub total_experience_years: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub educations: Vec<EducationView>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<ReferenceView>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outstanding: Vec<String>,
}

impl FormSummary {
    pub fn ready_for_submission(&self) -> bool {
        self.outstanding.is_empty()
    }

    pub fn total_experience_label(&self) -> String {
        format!("{:.1} years", self.total_experience_years)
    }
}
