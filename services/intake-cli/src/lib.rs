mod cli;
mod commands;
mod demo;
mod infra;
mod render;

use intake_form::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
