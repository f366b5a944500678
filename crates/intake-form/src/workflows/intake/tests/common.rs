use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::intake::domain::{
    Certificate, Education, EducationLevel, EmploymentType, Experience, FormState, Gender,
    PersonalInfo, Reference,
};
use crate::workflows::intake::store::{FormStore, SnapshotSink};
use crate::workflows::intake::validation::ValidationContext;
use crate::workflows::intake::StepController;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2024, 6, 15)
}

pub(super) fn context() -> ValidationContext {
    ValidationContext::new(today())
}

pub(super) fn personal_info() -> PersonalInfo {
    PersonalInfo {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+447700900123".to_string(),
        dob: Some("1990-12-10".to_string()),
        gender: Gender::Female,
        location: "London".to_string(),
        education_level: Some(EducationLevel::Undergraduate),
    }
}

pub(super) fn experience(start: &str, end: &str) -> Experience {
    Experience {
        job_title: "Backend Engineer".to_string(),
        company: "Analytical Engines Ltd".to_string(),
        employment_type: EmploymentType::FullTime,
        start_date: start.to_string(),
        end_date: Some(end.to_string()),
        currently_working: false,
        responsibilities: "Built billing pipelines".to_string(),
    }
}

pub(super) fn current_experience(start: &str) -> Experience {
    Experience {
        end_date: None,
        currently_working: true,
        ..experience(start, "")
    }
}

pub(super) fn education() -> Education {
    Education {
        school: "University of London".to_string(),
        degree: "BSc".to_string(),
        field: "Mathematics".to_string(),
        start_year: "2015".to_string(),
        end_year: "2019".to_string(),
        grade: Some("First".to_string()),
        certificates: vec![Certificate {
            name: "Dean's List".to_string(),
            file: Some("deans-list.pdf".to_string()),
        }],
    }
}

pub(super) fn reference() -> Reference {
    Reference {
        name: "Charles Babbage".to_string(),
        relationship: "Manager".to_string(),
        company: "Analytical Engines Ltd".to_string(),
        contact: "charles@engines.co.uk".to_string(),
    }
}

pub(super) fn controller() -> StepController {
    StepController::new(FormStore::new()).with_reference_date(today())
}

/// Controller holding a fully valid form, parked at `step`.
pub(super) fn complete_controller(step: u8) -> StepController {
    let mut state = FormState {
        personal_info: personal_info(),
        experiences: vec![experience("2019-08-01", "2022-07-31")],
        educations: vec![education()],
        references: vec![reference()],
        ..FormState::default()
    };
    state.step = step;
    StepController::new(FormStore::from_state(state)).with_reference_date(today())
}

#[derive(Default)]
pub(super) struct RecordingSink {
    snapshots: Mutex<Vec<FormState>>,
}

impl RecordingSink {
    pub(super) fn snapshots(&self) -> Vec<FormState> {
        self.snapshots.lock().expect("sink mutex poisoned").clone()
    }
}

impl SnapshotSink for RecordingSink {
    fn persist(&self, state: &FormState) {
        self.snapshots
            .lock()
            .expect("sink mutex poisoned")
            .push(state.clone());
    }
}

pub(super) fn recording_store() -> (FormStore, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let mut store = FormStore::new();
    store.subscribe(sink.clone());
    (store, sink)
}
