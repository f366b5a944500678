//! End-to-end behavior of the intake form through its public facade: step progression,
//! cross-entry rules, the review summary, submission and autosave restore.

mod common {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use intake_form::workflows::intake::{
        Autosave, EducationLevel, EmploymentType, Experience, FormStore, Gender,
        MemorySnapshotSlot, PersonalInfo, Reference, StepController,
    };

    pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    pub(super) fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    pub(super) fn personal_info() -> PersonalInfo {
        PersonalInfo {
            full_name: "Grace Hopper".to_string(),
            email: "grace@navy.example.org".to_string(),
            phone: "+12025550143".to_string(),
            dob: Some("1986-12-09".to_string()),
            gender: Gender::Female,
            location: "Arlington".to_string(),
            education_level: Some(EducationLevel::Undergraduate),
        }
    }

    pub(super) fn experience(start: &str, end: &str) -> Experience {
        Experience {
            job_title: "Compiler Engineer".to_string(),
            company: "Remington Rand".to_string(),
            employment_type: EmploymentType::FullTime,
            start_date: start.to_string(),
            end_date: Some(end.to_string()),
            currently_working: false,
            responsibilities: "Maintained the A-0 toolchain".to_string(),
        }
    }

    pub(super) fn reference() -> Reference {
        Reference {
            name: "Howard Aiken".to_string(),
            relationship: "Supervisor".to_string(),
            company: "Harvard Computation Lab".to_string(),
            contact: "+16175550100".to_string(),
        }
    }

    pub(super) fn autosaved_controller() -> (StepController, Arc<Autosave<MemorySnapshotSlot>>) {
        let autosave = Arc::new(Autosave::new(MemorySnapshotSlot::default()));
        let store = FormStore::restore(autosave.clone());
        let controller = StepController::new(store).with_reference_date(today());
        (controller, autosave)
    }
}

use common::*;
use intake_form::workflows::intake::{
    age, detect_overlap, Draft, FormState, FormStore, SectionError, Step, StepController,
    StepError, SNAPSHOT_KEY,
};

#[test]
fn applicant_walks_every_step_and_submits() {
    let (mut controller, autosave) = autosaved_controller();
    assert_eq!(controller.current_step(), Step::Personal);

    let err = controller.advance(None).expect_err("blank personal info blocks step 1");
    let errors = err.field_errors().expect("field errors reported");
    assert_eq!(errors.get("fullName"), Some("Full name is required"));
    assert_eq!(controller.current_step(), Step::Personal);

    controller.store_mut().set_personal_info(personal_info());
    assert_eq!(controller.advance(None), Ok(Step::Experience));

    assert_eq!(
        controller.advance(None),
        Err(StepError::Section(SectionError::MissingExperience))
    );
    let draft = Draft::Experience(experience("2020-01-01", "2021-01-01"));
    assert_eq!(controller.advance(Some(draft)), Ok(Step::Education));

    // Undergraduates may leave education empty.
    assert_eq!(controller.advance(None), Ok(Step::Skills));

    controller.add_skill("Rust").expect("first skill");
    assert_eq!(
        controller.add_skill("rust"),
        Err(StepError::Section(SectionError::DuplicateSkill(
            "rust".to_string()
        )))
    );
    controller.set_skill_years(0, Some(6)).expect("years in range");
    assert_eq!(controller.advance(None), Ok(Step::References));

    assert_eq!(
        controller.advance(None),
        Err(StepError::Section(SectionError::MissingReference))
    );
    controller.store_mut().set_skip_references(true);
    assert_eq!(controller.advance(None), Ok(Step::Summary));

    let summary = controller.summary();
    assert_eq!(summary.personal.age, Some(37));
    assert_eq!(summary.skills, vec!["Rust (6 yrs)".to_string()]);
    assert!(summary.references.is_none());
    assert!(summary.ready_for_submission());
    assert_eq!(summary.total_experience_label(), "1.0 years");

    assert_eq!(controller.advance(None), Ok(Step::Submit));
    assert_eq!(
        controller.submit(false).map(|receipt| receipt.submitted_on),
        Err(StepError::Rejected(vec![
            "You must agree to the terms and conditions".to_string()
        ]))
    );
    assert!(!controller.is_submitted());

    let receipt = controller.submit(true).expect("complete form submits");
    assert_eq!(receipt.submitted_on, today());
    assert!(controller.is_submitted());

    let payload = autosave
        .slot()
        .payload(SNAPSHOT_KEY)
        .expect("autosave wrote the form");
    let saved: FormState = serde_json::from_str(&payload).expect("snapshot decodes");
    assert_eq!(saved.step, 7);
    assert_eq!(saved, *controller.snapshot());
}

#[test]
fn summary_edit_round_trip_keeps_later_steps_intact() {
    let (mut controller, _autosave) = autosaved_controller();
    controller.store_mut().set_personal_info(personal_info());
    controller
        .add_experience(experience("2020-01-01", "2021-01-01"))
        .expect("valid experience");
    controller.add_reference(reference()).expect("valid reference");
    controller.store_mut().go_to_step(Step::Summary.number());

    assert_eq!(controller.jump_to(Step::Experience), Ok(Step::Experience));
    assert_eq!(
        controller.add_experience(experience("2020-06-01", "2020-12-31")),
        Err(StepError::Overlap)
    );
    controller
        .add_experience(experience("2021-02-01", "2022-01-31"))
        .expect("disjoint experience");

    assert_eq!(
        controller.jump_to(Step::Skills),
        Err(StepError::JumpNotPermitted {
            current: Step::Experience,
            target: Step::Skills,
        })
    );

    for expected in [Step::Education, Step::Skills, Step::References, Step::Summary] {
        assert_eq!(controller.advance(None), Ok(expected));
    }
    let summary = controller.summary();
    assert_eq!(summary.experiences.len(), 2);
    assert_eq!(summary.references.as_ref().map(Vec::len), Some(1));
}

#[test]
fn submission_replays_every_rule() {
    let state = FormState {
        step: 7,
        experiences: vec![experience("2020-01-01", "2021-01-01")],
        references: vec![reference()],
        ..FormState::default()
    };
    let mut controller =
        StepController::new(FormStore::from_state(state)).with_reference_date(today());

    match controller.submit(true) {
        Err(StepError::Rejected(messages)) => {
            assert_eq!(
                messages,
                vec!["Personal Information is incomplete or invalid".to_string()]
            );
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(controller.receipt().is_none());
}

#[test]
fn progress_survives_a_restart() {
    let (mut controller, autosave) = autosaved_controller();
    controller.store_mut().set_personal_info(personal_info());
    controller.advance(None).expect("personal info valid");
    controller
        .advance(Some(Draft::Experience(experience("2019-03-01", "2019-09-30"))))
        .expect("experience valid");
    let before = controller.snapshot();

    let restored = FormStore::restore(autosave);
    assert_eq!(restored.current_step(), Step::Education);
    assert_eq!(*restored.snapshot(), *before);
}

#[test]
fn overlap_and_age_follow_calendar_days() {
    let today = today();
    assert!(detect_overlap(
        &[
            experience("2020-01-01", "2021-01-01"),
            experience("2020-06-01", "2020-12-31"),
        ],
        today
    ));
    assert!(!detect_overlap(
        &[
            experience("2020-01-01", "2020-12-31"),
            experience("2021-01-01", "2021-06-30"),
        ],
        today
    ));

    assert_eq!(age("2000-01-01", date(2024, 1, 1)), 24);
    assert_eq!(age("", today), 0);
}
