//! Skill chip operations. Each returns a fresh collection for the store to take wholesale.

use super::domain::Skill;

pub const PREDEFINED_SKILLS: [&str; 6] = [
    "React",
    "Node.js",
    "Python",
    "Docker",
    "TypeScript",
    "JavaScript",
];

pub fn contains_skill(skills: &[Skill], name: &str) -> bool {
    skills.iter().any(|skill| skill.matches_name(name))
}

/// Append `name` unless it is blank or already present (case-insensitive).
pub fn with_skill_added(skills: &[Skill], name: &str) -> Option<Vec<Skill>> {
    let name = name.trim();
    if name.is_empty() || contains_skill(skills, name) {
        return None;
    }
    let mut next = skills.to_vec();
    next.push(Skill::named(name));
    Some(next)
}

pub fn without_skill(skills: &[Skill], position: usize) -> Option<Vec<Skill>> {
    if position >= skills.len() {
        return None;
    }
    Some(
        skills
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != position)
            .map(|(_, skill)| skill.clone())
            .collect(),
    )
}

pub fn with_skill_years(skills: &[Skill], position: usize, years: Option<i32>) -> Option<Vec<Skill>> {
    if position >= skills.len() {
        return None;
    }
    Some(
        skills
            .iter()
            .enumerate()
            .map(|(idx, skill)| {
                if idx == position {
                    Skill {
                        years,
                        ..skill.clone()
                    }
                } else {
                    skill.clone()
                }
            })
            .collect(),
    )
}

/// Predefined skills containing `input`, minus those already chosen.
pub fn suggest_skills(input: &str, chosen: &[Skill]) -> Vec<&'static str> {
    let needle = input.to_lowercase();
    PREDEFINED_SKILLS
        .into_iter()
        .filter(|skill| skill.to_lowercase().contains(&needle))
        .filter(|skill| !contains_skill(chosen, skill))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_ignores_case_insensitive_duplicates() {
        let skills = with_skill_added(&[], "React").expect("first add");
        assert!(with_skill_added(&skills, "react").is_none());
        assert!(with_skill_added(&skills, "  ").is_none());
        let skills = with_skill_added(&skills, "Rust").expect("distinct skill");
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn remove_and_years_address_by_position() {
        let skills = vec![Skill::named("React"), Skill::named("Python")];
        let updated = with_skill_years(&skills, 1, Some(4)).expect("in range");
        assert_eq!(updated[1].years, Some(4));
        assert_eq!(updated[0].years, None);

        let trimmed = without_skill(&updated, 0).expect("in range");
        assert_eq!(trimmed, vec![Skill { name: "Python".into(), years: Some(4) }]);
        assert!(without_skill(&trimmed, 3).is_none());
    }

    #[test]
    fn suggestions_filter_by_substring_and_exclude_chosen() {
        let chosen = vec![Skill::named("javascript")];
        assert_eq!(suggest_skills("script", &chosen), vec!["TypeScript"]);
        assert_eq!(suggest_skills("", &[]).len(), PREDEFINED_SKILLS.len());
    }
}
