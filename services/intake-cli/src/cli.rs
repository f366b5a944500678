use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use intake_form::config::AppConfig;
use intake_form::error::AppError;
use intake_form::telemetry;
use intake_form::workflows::intake::{EducationLevel, EmploymentType, Gender, Step};
use tracing::debug;

use crate::commands;
use crate::demo::{run_demo, DemoArgs};
use crate::infra::{
    parse_date, parse_education_level, parse_employment_type, parse_gender, parse_position,
    parse_step, Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "intake-cli",
    about = "Fill in the multi-step application intake form from the command line",
    version
)]
struct Cli {
    /// Directory holding the autosaved form (overrides INTAKE_SNAPSHOT_DIR)
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,
    /// Reference date for age, overlap and year checks (defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Form(FormCommand),
    /// Walk an in-memory form through every step and print the result
    Demo(DemoArgs),
}

/// Commands operating on the autosaved form.
#[derive(Subcommand, Debug)]
pub(crate) enum FormCommand {
    /// Show the current step and progress (default command)
    Status,
    /// Set any subset of the personal information fields
    Personal(PersonalArgs),
    /// Manage work experience entries
    Experience {
        #[command(subcommand)]
        command: ExperienceCommand,
    },
    /// Manage education entries
    Education {
        #[command(subcommand)]
        command: EducationCommand,
    },
    /// Manage skill chips
    Skills {
        #[command(subcommand)]
        command: SkillsCommand,
    },
    /// Manage references
    References {
        #[command(subcommand)]
        command: ReferencesCommand,
    },
    /// Validate the current step and move to the next one
    Next,
    /// Go back one step without validating
    Back,
    /// Jump from the summary to another step for an edit
    Goto {
        /// Step number (1-7) or name
        #[arg(value_parser = parse_step)]
        step: Step,
    },
    /// Print the review summary
    Summary {
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit the completed form
    Submit {
        /// Agree to the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },
    /// Discard the saved form and start over
    Reset,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PersonalArgs {
    #[arg(long)]
    pub(crate) full_name: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    /// Date of birth (YYYY-MM-DD); pass an empty string to clear
    #[arg(long)]
    pub(crate) dob: Option<String>,
    #[arg(long, value_parser = parse_gender)]
    pub(crate) gender: Option<Gender>,
    #[arg(long)]
    pub(crate) location: Option<String>,
    #[arg(long, value_parser = parse_education_level)]
    pub(crate) education_level: Option<EducationLevel>,
    /// Remove the education level
    #[arg(long, conflicts_with = "education_level")]
    pub(crate) clear_education_level: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ExperienceCommand {
    /// Validate and append an experience
    Add(ExperienceArgs),
    /// Replace the experience at a position
    Update {
        #[arg(value_parser = parse_position)]
        position: usize,
        #[command(flatten)]
        entry: ExperienceArgs,
    },
    /// Remove the experience at a position
    Remove {
        #[arg(value_parser = parse_position)]
        position: usize,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ExperienceArgs {
    #[arg(long)]
    pub(crate) job_title: String,
    #[arg(long)]
    pub(crate) company: String,
    #[arg(long, value_parser = parse_employment_type, default_value = "full-time")]
    pub(crate) employment_type: EmploymentType,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) start_date: String,
    /// End date (YYYY-MM-DD); omit when currently working
    #[arg(long)]
    pub(crate) end_date: Option<String>,
    #[arg(long)]
    pub(crate) currently_working: bool,
    #[arg(long)]
    pub(crate) responsibilities: String,
}

#[derive(Subcommand, Debug)]
pub(crate) enum EducationCommand {
    /// Validate and append an education entry
    Add(EducationArgs),
    /// Remove the education entry at a position
    Remove {
        #[arg(value_parser = parse_position)]
        position: usize,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct EducationArgs {
    #[arg(long)]
    pub(crate) school: String,
    #[arg(long)]
    pub(crate) degree: String,
    #[arg(long)]
    pub(crate) field: String,
    #[arg(long)]
    pub(crate) start_year: String,
    #[arg(long)]
    pub(crate) end_year: String,
    #[arg(long)]
    pub(crate) grade: Option<String>,
    /// Certificate as NAME or NAME=FILE; repeatable
    #[arg(long = "certificate")]
    pub(crate) certificates: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum SkillsCommand {
    /// Add a skill chip
    Add { name: String },
    /// Remove the skill at a position
    Remove {
        #[arg(value_parser = parse_position)]
        position: usize,
    },
    /// Set (or clear, when omitted) the years for the skill at a position
    Years {
        #[arg(value_parser = parse_position)]
        position: usize,
        #[arg(allow_negative_numbers = true)]
        years: Option<i32>,
    },
    /// List predefined skills matching the input
    Suggest {
        #[arg(default_value = "")]
        input: String,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum ReferencesCommand {
    /// Validate and append a reference
    Add(ReferenceArgs),
    /// Remove the reference at a position
    Remove {
        #[arg(value_parser = parse_position)]
        position: usize,
    },
    /// Skip the references step
    Skip {
        /// Require references again
        #[arg(long)]
        undo: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ReferenceArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) relationship: String,
    #[arg(long)]
    pub(crate) company: String,
    /// Phone number or email address
    #[arg(long)]
    pub(crate) contact: String,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command.unwrap_or(Command::Form(FormCommand::Status)) {
        Command::Demo(args) => run_demo(args, cli.today),
        Command::Form(command) => {
            let mut session = Session::open(&config, cli.snapshot_dir, cli.today);
            let output = commands::execute(command, &mut session)?;
            print!("{output}");
            Ok(())
        }
    }
}
