//! Test cycle scheduling window
//!
//! New cycles run from today for a fixed number of days. ZAPI wants both
//! dates as `DD/Mon/YY` in the server's English month abbreviations.

use chrono::{Days, Local, NaiveDate};

/// Length of a freshly created cycle
pub const CYCLE_LENGTH_DAYS: u64 = 30;

/// `strftime` pattern ZAPI accepts for cycle dates, e.g. `05/Jan/24`
pub const ZAPI_DATE_FORMAT: &str = "%d/%b/%y";

/// Formatted start and end dates of a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWindow {
    pub start_date: String,
    pub end_date: String,
}

impl CycleWindow {
    /// Window beginning on `start`
    pub fn starting(start: NaiveDate) -> Self {
        let end = start + Days::new(CYCLE_LENGTH_DAYS);
        Self {
            start_date: format_zapi_date(start),
            end_date: format_zapi_date(end),
        }
    }

    /// Window beginning today, local time
    pub fn from_today() -> Self {
        Self::starting(Local::now().date_naive())
    }
}

pub fn format_zapi_date(date: NaiveDate) -> String {
    date.format(ZAPI_DATE_FORMAT).to_string()
}
