//! Display formatting for terminal output
//!
//! Turns engine results into text. Nothing here computes; every function
//! takes a finished value and the user's display settings.

pub mod assignment;
pub mod bills;
pub mod payoff;
pub mod schedule;

pub use assignment::format_assignment;
pub use bills::{format_bill_list, format_flags};
pub use payoff::{format_payoff, format_portfolio};
pub use schedule::{format_amortization, format_paychecks};

use chrono::NaiveDate;

use crate::config::settings::Settings;

/// Format a date with the user's strftime preference
pub fn format_date(date: NaiveDate, settings: &Settings) -> String {
    date.format(&settings.date_format).to_string()
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.24), "5.2%");
        assert_eq!(format_percentage(87.6), "88%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Electric", 20), "Electric");
        assert_eq!(truncate("Homeowners insurance", 10), "Homeown...");
        assert_eq!(truncate("Rent", 2), "..");
    }

    #[test]
    fn test_format_date_uses_settings() {
        let mut settings = Settings::default();
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(format_date(date, &settings), "2024-02-01");
        settings.date_format = "%m/%d/%Y".into();
        assert_eq!(format_date(date, &settings), "02/01/2024");
    }
}
