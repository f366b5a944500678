use chrono::NaiveDate;

use super::domain::{Experience, FormState, Skill, Step};
use super::validation::parse_date;

/// Collection-level requirement that is not met.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("At least one experience is required")]
    MissingExperience,
    #[error("At least one education entry is required")]
    MissingEducation,
    #[error("At least one reference is required unless skipped")]
    MissingReference,
    #[error("Skill \"{0}\" is listed more than once")]
    DuplicateSkill(String),
}

/// Start and effective end of an experience; `None` when either date cannot be read.
pub fn experience_interval(experience: &Experience, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = parse_date(&experience.start_date)?;
    let end = if experience.currently_working {
        today
    } else {
        parse_date(experience.end_date()?)?
    };
    Some((start, end))
}

/// First pair of positions whose closed date intervals intersect.
pub fn overlapping_pair(experiences: &[Experience], today: NaiveDate) -> Option<(usize, usize)> {
    let intervals: Vec<_> = experiences
        .iter()
        .map(|experience| experience_interval(experience, today))
        .collect();

    for (i, first) in intervals.iter().enumerate() {
        let Some((start1, end1)) = first else {
            continue;
        };
        for (j, second) in intervals.iter().enumerate().skip(i + 1) {
            let Some((start2, end2)) = second else {
                continue;
            };
            if start1 <= end2 && start2 <= end1 {
                return Some((i, j));
            }
        }
    }
    None
}

pub fn detect_overlap(experiences: &[Experience], today: NaiveDate) -> bool {
    overlapping_pair(experiences, today).is_some()
}

/// Whether inserting `candidate` would make the collection overlap.
pub fn overlaps_with_existing(
    existing: &[Experience],
    candidate: &Experience,
    today: NaiveDate,
) -> bool {
    let mut hypothetical = existing.to_vec();
    hypothetical.push(candidate.clone());
    detect_overlap(&hypothetical, today)
}

/// Same as [`overlaps_with_existing`] but with `candidate` replacing the entry at `position`.
pub fn overlaps_on_replace(
    existing: &[Experience],
    position: usize,
    candidate: &Experience,
    today: NaiveDate,
) -> bool {
    let hypothetical: Vec<Experience> = existing
        .iter()
        .enumerate()
        .map(|(idx, experience)| {
            if idx == position {
                candidate.clone()
            } else {
                experience.clone()
            }
        })
        .collect();
    detect_overlap(&hypothetical, today)
}

/// First skill whose name repeats an earlier one, compared case-insensitively.
pub fn duplicate_skill(skills: &[Skill]) -> Option<&Skill> {
    skills.iter().enumerate().find_map(|(idx, skill)| {
        skills[..idx]
            .iter()
            .any(|earlier| earlier.matches_name(&skill.name))
            .then_some(skill)
    })
}

/// Minimum-count rule that gates leaving `step`.
pub fn section_requirement(step: Step, state: &FormState) -> Result<(), SectionError> {
    match step {
        Step::Experience if state.experiences.is_empty() => Err(SectionError::MissingExperience),
        Step::Education
            if state.personal_info.requires_education() && state.educations.is_empty() =>
        {
            Err(SectionError::MissingEducation)
        }
        Step::Skills => match duplicate_skill(&state.skills) {
            Some(skill) => Err(SectionError::DuplicateSkill(skill.name.clone())),
            None => Ok(()),
        },
        Step::References if !state.skip_references && state.references.is_empty() => {
            Err(SectionError::MissingReference)
        }
        _ => Ok(()),
    }
}
