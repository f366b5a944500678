use std::sync::Arc;

use chrono::{Datelike, Local, Months, NaiveDate};
use clap::Args;
use intake_form::error::AppError;
use intake_form::workflows::intake::skills::suggest_skills;
use intake_form::workflows::intake::{
    Autosave, Certificate, Draft, Education, EducationLevel, EmploymentType, Experience,
    FormStore, Gender, MemorySnapshotSlot, PersonalInfo, Reference, Step, StepController,
    StepError, SNAPSHOT_KEY,
};

use crate::render::{render_field_errors, render_receipt, render_summary};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the references step instead of adding a reference
    #[arg(long)]
    pub(crate) skip_references: bool,
    /// Print the review summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs, today: Option<NaiveDate>) -> Result<(), AppError> {
    walk_through(args, today).map(|_| ())
}

/// Walk a throwaway in-memory form through all seven steps, including the rejections
/// an applicant would hit along the way. Returns the submitted form.
fn walk_through(args: DemoArgs, today: Option<NaiveDate>) -> Result<StepController, AppError> {
    let DemoArgs {
        skip_references,
        json,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let autosave = Arc::new(Autosave::new(MemorySnapshotSlot::default()));
    let mut controller =
        StepController::new(FormStore::restore(autosave.clone())).with_reference_date(today);

    println!("Application intake demo (evaluated {today})");

    println!("\n{}", Step::Personal);
    report("blank form", controller.advance(None));
    controller.store_mut().set_personal_info(demo_personal_info());
    report("details filled in", controller.advance(None));

    println!("\n{}", Step::Experience);
    report("no entries yet", controller.advance(None));
    controller.add_experience(demo_experience(
        months_before(today, 72),
        Some(months_before(today, 36)),
    ))?;
    println!("- added a past role");
    let overlapping = demo_experience(months_before(today, 48), Some(months_before(today, 24)));
    match controller.add_experience(overlapping) {
        Ok(()) => println!("- overlapping role accepted"),
        Err(err) => println!("- overlapping role refused: {err}"),
    }
    let current = demo_experience(months_before(today, 35), None);
    report(
        "current role as draft",
        controller.advance(Some(Draft::Experience(current))),
    );

    println!("\n{}", Step::Education);
    report("graduate applicant without entries", controller.advance(None));
    let year = today.year();
    let reversed = demo_education(year - 6, year - 10);
    report(
        "years out of order",
        controller.advance(Some(Draft::Education(reversed))),
    );
    let education = demo_education(year - 10, year - 6);
    report(
        "degree as draft",
        controller.advance(Some(Draft::Education(education))),
    );

    println!("\n{}", Step::Skills);
    controller.add_skill("Rust")?;
    match controller.add_skill("rust") {
        Ok(()) => println!("- duplicate skill accepted"),
        Err(err) => println!("- duplicate skill refused: {err}"),
    }
    controller.add_skill("Python")?;
    controller.set_skill_years(0, Some(6))?;
    let suggestions = suggest_skills("script", &controller.store().state().skills);
    println!("- suggestions for \"script\": {}", suggestions.join(", "));
    report("chips chosen", controller.advance(None));

    println!("\n{}", Step::References);
    if skip_references {
        controller.store_mut().set_skip_references(true);
        report("references skipped", controller.advance(None));
    } else {
        report("no references yet", controller.advance(None));
        report(
            "reference as draft",
            controller.advance(Some(Draft::Reference(demo_reference()))),
        );
    }

    println!("\n{}", Step::Summary);
    controller.jump_to(Step::Skills)?;
    controller.add_skill("Docker")?;
    controller.advance(None)?;
    controller.advance(None)?;
    println!("- jumped back to add Docker, then returned to the summary");
    let summary = controller.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }
    report("continue", controller.advance(None));

    println!("\n{}", Step::Submit);
    match controller.submit(false) {
        Ok(_) => println!("- submitted without accepting terms"),
        Err(err) => println!("- terms not accepted: {err}"),
    }
    let receipt = controller.submit(true)?;
    print!("{}", render_receipt(&receipt));

    let saved = autosave
        .slot()
        .payload(SNAPSHOT_KEY)
        .map(|payload| payload.len())
        .unwrap_or(0);
    println!("Autosaved snapshot: {saved} bytes");
    Ok(controller)
}

fn report(label: &str, outcome: Result<Step, StepError>) {
    match outcome {
        Ok(step) => println!("- {label}: moved to {step}"),
        Err(err) => {
            println!("- {label}: blocked");
            match err.field_errors() {
                Some(errors) => print!("{}", render_field_errors(errors)),
                None => println!("  ! {err}"),
            }
        }
    }
}

fn months_before(today: NaiveDate, months: u32) -> NaiveDate {
    today.checked_sub_months(Months::new(months)).unwrap_or(today)
}

fn demo_personal_info() -> PersonalInfo {
    PersonalInfo {
        full_name: "Grace Hopper".to_string(),
        email: "grace@navy.example.org".to_string(),
        phone: "+12025550143".to_string(),
        dob: Some("1986-12-09".to_string()),
        gender: Gender::Female,
        location: "Arlington".to_string(),
        education_level: Some(EducationLevel::GraduateOrHigher),
    }
}

fn demo_experience(start: NaiveDate, end: Option<NaiveDate>) -> Experience {
    Experience {
        job_title: "Compiler Engineer".to_string(),
        company: "Remington Rand".to_string(),
        employment_type: if end.is_some() {
            EmploymentType::FullTime
        } else {
            EmploymentType::Contract
        },
        start_date: start.to_string(),
        end_date: end.map(|date| date.to_string()),
        currently_working: end.is_none(),
        responsibilities: "Designed the A-0 system".to_string(),
    }
}

fn demo_education(start_year: i32, end_year: i32) -> Education {
    Education {
        school: "Yale University".to_string(),
        degree: "PhD".to_string(),
        field: "Mathematics".to_string(),
        start_year: start_year.to_string(),
        end_year: end_year.to_string(),
        grade: None,
        certificates: vec![Certificate {
            name: "Sigma Xi".to_string(),
            file: None,
        }],
    }
}

fn demo_reference() -> Reference {
    Reference {
        name: "Howard Aiken".to_string(),
        relationship: "Supervisor".to_string(),
        company: "Harvard Computation Lab".to_string(),
        contact: "aiken@harvard.example.edu".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    #[test]
    fn walkthrough_submits_the_form_with_references() {
        let controller = walk_through(DemoArgs::default(), Some(today())).expect("demo runs");
        assert_eq!(controller.current_step(), Step::Submit);
        let receipt = controller.receipt().expect("form submitted");
        assert_eq!(receipt.submitted_on, today());
        assert!(receipt.summary.ready_for_submission());
        assert_eq!(
            receipt.summary.skills,
            vec![
                "Rust (6 yrs)".to_string(),
                "Python".to_string(),
                "Docker".to_string()
            ]
        );
        assert_eq!(receipt.summary.experiences.len(), 2);
        assert_eq!(receipt.summary.references.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn walkthrough_can_skip_references() {
        let args = DemoArgs {
            skip_references: true,
            json: true,
        };
        let controller = walk_through(args, Some(today())).expect("demo runs");
        let state = controller.snapshot();
        assert!(state.skip_references);
        assert!(state.references.is_empty());
        assert!(controller
            .receipt()
            .is_some_and(|receipt| receipt.summary.references.is_none()));
    }
}
