use intake_form::error::AppError;
use intake_form::workflows::intake::skills::suggest_skills;
use intake_form::workflows::intake::{
    Certificate, Education, Experience, PersonalInfo, Reference, Validate,
};
use tracing::info;

use crate::cli::{
    EducationArgs, EducationCommand, ExperienceArgs, ExperienceCommand, FormCommand,
    PersonalArgs, ReferenceArgs, ReferencesCommand, SkillsCommand,
};
use crate::infra::Session;
use crate::render::{render_field_errors, render_receipt, render_status, render_summary};

/// Apply one command to the restored form and return what should be printed.
pub(crate) fn execute(command: FormCommand, session: &mut Session) -> Result<String, AppError> {
    let controller = &mut session.controller;
    match command {
        FormCommand::Status => Ok(render_status(controller)),
        FormCommand::Personal(args) => {
            let info = merge_personal(controller.store().state().personal_info.clone(), args);
            controller.store_mut().set_personal_info(info.clone());
            let mut out = String::from("Personal information saved\n");
            if let Err(errors) = info.validate(&controller.context()) {
                out.push_str("Still needed before moving on:\n");
                out.push_str(&render_field_errors(&errors));
            }
            Ok(out)
        }
        FormCommand::Experience { command } => match command {
            ExperienceCommand::Add(args) => {
                controller.add_experience(args.into())?;
                Ok(format!(
                    "Experience added ({} total)\n",
                    controller.store().state().experiences.len()
                ))
            }
            ExperienceCommand::Update { position, entry } => {
                controller.update_experience(position, entry.into())?;
                Ok(format!("Experience {} updated\n", position + 1))
            }
            ExperienceCommand::Remove { position } => {
                controller.store_mut().remove_experience(position)?;
                Ok(format!("Experience {} removed\n", position + 1))
            }
        },
        FormCommand::Education { command } => match command {
            EducationCommand::Add(args) => {
                controller.add_education(args.into())?;
                Ok(format!(
                    "Education added ({} total)\n",
                    controller.store().state().educations.len()
                ))
            }
            EducationCommand::Remove { position } => {
                controller.store_mut().remove_education(position)?;
                Ok(format!("Education {} removed\n", position + 1))
            }
        },
        FormCommand::Skills { command } => match command {
            SkillsCommand::Add { name } => {
                controller.add_skill(&name)?;
                Ok(format!("Skill {} added\n", name.trim()))
            }
            SkillsCommand::Remove { position } => {
                controller.remove_skill(position)?;
                Ok(format!("Skill {} removed\n", position + 1))
            }
            SkillsCommand::Years { position, years } => {
                controller.set_skill_years(position, years)?;
                let skill = &controller.store().state().skills[position];
                Ok(format!("Skill updated: {}\n", skill.label()))
            }
            SkillsCommand::Suggest { input } => {
                let suggestions = suggest_skills(&input, &controller.store().state().skills);
                if suggestions.is_empty() {
                    Ok("No suggestions\n".to_string())
                } else {
                    Ok(format!("{}\n", suggestions.join("\n")))
                }
            }
        },
        FormCommand::References { command } => match command {
            ReferencesCommand::Add(args) => {
                controller.add_reference(args.into())?;
                Ok(format!(
                    "Reference added ({} total)\n",
                    controller.store().state().references.len()
                ))
            }
            ReferencesCommand::Remove { position } => {
                controller.store_mut().remove_reference(position)?;
                Ok(format!("Reference {} removed\n", position + 1))
            }
            ReferencesCommand::Skip { undo } => {
                controller.store_mut().set_skip_references(!undo);
                if undo {
                    Ok("References are required again\n".to_string())
                } else {
                    Ok("References skipped\n".to_string())
                }
            }
        },
        FormCommand::Next => {
            let step = controller.advance(None)?;
            Ok(format!("Moved to step {}: {}\n", step.number(), step))
        }
        FormCommand::Back => {
            let step = controller.retreat();
            Ok(format!("Back at step {}: {}\n", step.number(), step))
        }
        FormCommand::Goto { step } => {
            let step = controller.jump_to(step)?;
            Ok(format!("Editing step {}: {}\n", step.number(), step))
        }
        FormCommand::Summary { json } => {
            let summary = controller.summary();
            if json {
                let payload = serde_json::to_string_pretty(&summary)?;
                Ok(format!("{payload}\n"))
            } else {
                Ok(render_summary(&summary))
            }
        }
        FormCommand::Submit { accept_terms } => {
            let receipt = controller.submit(accept_terms)?;
            Ok(render_receipt(&receipt))
        }
        FormCommand::Reset => {
            controller.store_mut().reset();
            session.autosave.clear()?;
            info!("intake form reset");
            Ok("Form reset to step 1\n".to_string())
        }
    }
}

fn merge_personal(mut info: PersonalInfo, args: PersonalArgs) -> PersonalInfo {
    let PersonalArgs {
        full_name,
        email,
        phone,
        dob,
        gender,
        location,
        education_level,
        clear_education_level,
    } = args;

    if let Some(full_name) = full_name {
        info.full_name = full_name;
    }
    if let Some(email) = email {
        info.email = email;
    }
    if let Some(phone) = phone {
        info.phone = phone;
    }
    if let Some(dob) = dob {
        info.dob = Some(dob).filter(|value| !value.trim().is_empty());
    }
    if let Some(gender) = gender {
        info.gender = gender;
    }
    if let Some(location) = location {
        info.location = location;
    }
    if education_level.is_some() {
        info.education_level = education_level;
    } else if clear_education_level {
        info.education_level = None;
    }
    info
}

impl From<ExperienceArgs> for Experience {
    fn from(args: ExperienceArgs) -> Self {
        Experience {
            job_title: args.job_title,
            company: args.company,
            employment_type: args.employment_type,
            start_date: args.start_date,
            end_date: args.end_date,
            currently_working: args.currently_working,
            responsibilities: args.responsibilities,
        }
    }
}

impl From<EducationArgs> for Education {
    fn from(args: EducationArgs) -> Self {
        let certificates = args
            .certificates
            .iter()
            .map(|raw| match raw.split_once('=') {
                Some((name, file)) => Certificate {
                    name: name.trim().to_string(),
                    file: Some(file.trim().to_string()).filter(|file| !file.is_empty()),
                },
                None => Certificate {
                    name: raw.trim().to_string(),
                    file: None,
                },
            })
            .collect();
        Education {
            school: args.school,
            degree: args.degree,
            field: args.field,
            start_year: args.start_year,
            end_year: args.end_year,
            grade: args.grade,
            certificates,
        }
    }
}

impl From<ReferenceArgs> for Reference {
    fn from(args: ReferenceArgs) -> Self {
        Reference {
            name: args.name,
            relationship: args.relationship,
            company: args.company,
            contact: args.contact,
        }
    }
}
