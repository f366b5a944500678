mod summary;
pub mod views;

pub use summary::{age, experience_years, summarize, total_experience_years, DAYS_PER_YEAR};
pub use views::FormSummary;
