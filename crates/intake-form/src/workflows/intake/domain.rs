use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of steps in the intake flow.
pub const STEP_COUNT: u8 = 7;

/// Stages of the sequential intake flow, numbered 1 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Personal,
    Experience,
    Education,
    Skills,
    References,
    Summary,
    Submit,
}

impl Step {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Personal,
            Self::Experience,
            Self::Education,
            Self::Skills,
            Self::References,
            Self::Summary,
            Self::Submit,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::Personal => 1,
            Self::Experience => 2,
            Self::Education => 3,
            Self::Skills => 4,
            Self::References => 5,
            Self::Summary => 6,
            Self::Submit => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|step| step.number() == number)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::References => "References",
            Self::Summary => "Summary",
            Self::Submit => "Submit",
        }
    }

    /// Steps that collect entries through an add-another-entry draft.
    pub const fn accepts_drafts(self) -> bool {
        matches!(self, Self::Experience | Self::Education | Self::References)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp a raw step number into the valid `[1, STEP_COUNT]` range.
pub fn clamp_step(number: u8) -> u8 {
    number.clamp(1, STEP_COUNT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    Undergraduate,
    #[serde(rename = "Graduate or higher")]
    GraduateOrHigher,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighSchool => "High School",
            Self::Undergraduate => "Undergraduate",
            Self::GraduateOrHigher => "Graduate or higher",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    Internship,
    Contract,
    Freelance,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-Time",
            Self::PartTime => "Part-Time",
            Self::Internship => "Internship",
            Self::Contract => "Contract",
            Self::Freelance => "Freelance",
        }
    }
}

/// Applicant identity and contact details. Exactly one per form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    pub gender: Gender,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<EducationLevel>,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            dob: None,
            gender: Gender::PreferNotToSay,
            location: String::new(),
            education_level: Some(EducationLevel::HighSchool),
        }
    }
}

impl PersonalInfo {
    pub fn requires_education(&self) -> bool {
        self.education_level == Some(EducationLevel::GraduateOrHigher)
    }
}

/// One position in the applicant's work history. Dates are ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    pub employment_type: EmploymentType,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub currently_working: bool,
    pub responsibilities: String,
}

impl Experience {
    /// End date as entered, treating an empty string the same as no value.
    pub fn end_date(&self) -> Option<&str> {
        self.end_date
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn period_label(&self) -> String {
        let end = if self.currently_working {
            "Present"
        } else {
            self.end_date().unwrap_or("")
        };
        format!("{} - {}", self.start_date, end)
    }
}

/// Certificate attached to an education entry; the file is an opaque reference only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_year: String,
    pub end_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

impl Education {
    pub fn period_label(&self) -> String {
        format!("{} - {}", self.start_year, self.end_year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<i32>,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            years: None,
        }
    }

    pub fn matches_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    pub fn label(&self) -> String {
        match self.years {
            Some(years) if years > 0 => format!("{} ({} yrs)", self.name, years),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub name: String,
    pub relationship: String,
    pub company: String,
    pub contact: String,
}

/// The complete aggregate collected by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub step: u8,
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub skills: Vec<Skill>,
    pub references: Vec<Reference>,
    pub skip_references: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            step: 1,
            personal_info: PersonalInfo::default(),
            experiences: Vec::new(),
            educations: Vec::new(),
            skills: Vec::new(),
            references: Vec::new(),
            skip_references: false,
        }
    }
}

impl FormState {
    /// Current step; out-of-range numbers resolve to the nearest valid step.
    pub fn current_step(&self) -> Step {
        Step::from_number(clamp_step(self.step)).unwrap_or(Step::Personal)
    }
}
