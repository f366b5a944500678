use intake_form::workflows::intake::{FieldErrors, FormSummary, StepController, SubmissionReceipt};

pub(crate) fn render_status(controller: &StepController) -> String {
    let summary = controller.summary();
    let state = controller.snapshot();
    let current = summary.current_step;

    let mut out = format!("Step {} of 7: {}\n", current.number(), current);
    for entry in &summary.progress {
        let marker = if entry.current {
            ">"
        } else if entry.reached {
            "x"
        } else {
            " "
        };
        out.push_str(&format!(
            "  [{}] {}. {}\n",
            marker, entry.step_number, entry.step_label
        ));
    }

    let references = if state.skip_references {
        "skipped".to_string()
    } else {
        state.references.len().to_string()
    };
    out.push_str(&format!(
        "Entries: {} experience | {} education | {} skills | references {}\n",
        state.experiences.len(),
        state.educations.len(),
        state.skills.len(),
        references
    ));
    if controller.is_submitted() {
        out.push_str("Submitted\n");
    }
    out
}

pub(crate) fn render_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for error in errors.iter() {
        out.push_str(&format!("  ! {}: {}\n", error.field, error.message));
    }
    out
}

pub(crate) fn render_summary(summary: &FormSummary) -> String {
    let personal = &summary.personal;
    let mut out = String::from("Personal Information\n");
    out.push_str(&format!("  Name: {}\n", personal.full_name));
    out.push_str(&format!("  Email: {}\n", personal.email));
    out.push_str(&format!("  Phone: {}\n", personal.phone));
    out.push_str(&format!("  Gender: {}\n", personal.gender_label));
    out.push_str(&format!("  Location: {}\n", personal.location));
    if let Some(level) = personal.education_level_label {
        out.push_str(&format!("  Education level: {}\n", level));
    }
    if let Some(age) = personal.age {
        out.push_str(&format!("  Age: {}\n", age));
    }

    out.push_str(&format!(
        "\nExperience ({})\n",
        summary.total_experience_label()
    ));
    if summary.experiences.is_empty() {
        out.push_str("  none\n");
    }
    for experience in &summary.experiences {
        out.push_str(&format!(
            "  - {} at {} ({}) {}\n",
            experience.job_title,
            experience.company,
            experience.employment_type_label,
            experience.period
        ));
    }

    if !summary.educations.is_empty() {
        out.push_str("\nEducation\n");
        for education in &summary.educations {
            out.push_str(&format!(
                "  - {} in {}, {} ({})",
                education.degree, education.field, education.school, education.period
            ));
            if let Some(grade) = &education.grade {
                out.push_str(&format!(", grade {}", grade));
            }
            out.push('\n');
            if !education.certificates.is_empty() {
                out.push_str(&format!(
                    "    Certificates: {}\n",
                    education.certificates.join(", ")
                ));
            }
        }
    }

    out.push_str("\nSkills\n");
    if summary.skills.is_empty() {
        out.push_str("  none\n");
    } else {
        out.push_str(&format!("  {}\n", summary.skills.join(", ")));
    }

    if let Some(references) = &summary.references {
        out.push_str("\nReferences\n");
        for reference in references {
            out.push_str(&format!(
                "  - {} ({}, {}): {}\n",
                reference.name, reference.relationship, reference.company, reference.contact
            ));
        }
    }

    if summary.ready_for_submission() {
        out.push_str("\nReady for submission\n");
    } else {
        out.push_str("\nOutstanding\n");
        for message in &summary.outstanding {
            out.push_str(&format!("  - {}\n", message));
        }
    }
    out
}

pub(crate) fn render_receipt(receipt: &SubmissionReceipt) -> String {
    format!(
        "Application submitted on {} for {}\n",
        receipt.submitted_on, receipt.summary.personal.full_name
    )
}
