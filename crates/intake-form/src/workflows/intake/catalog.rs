use chrono::{Datelike, NaiveDate};

pub const DEFAULT_PAST_YEARS: i32 = 50;
pub const DEFAULT_FUTURE_YEARS: i32 = 1;

/// Selectable years, newest first, from `year + future` down to `year - past`.
pub fn year_options(today: NaiveDate, past: i32, future: i32) -> Vec<i32> {
    let current = today.year();
    ((current - past)..=(current + future)).rev().collect()
}

pub fn default_year_options(today: NaiveDate) -> Vec<i32> {
    year_options(today, DEFAULT_PAST_YEARS, DEFAULT_FUTURE_YEARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_options_run_newest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid");
        let years = year_options(today, 2, 1);
        assert_eq!(years, vec![2025, 2024, 2023, 2022]);

        let defaults = default_year_options(today);
        assert_eq!(defaults.first(), Some(&2025));
        assert_eq!(defaults.last(), Some(&1974));
        assert_eq!(defaults.len(), 52);
    }
}
