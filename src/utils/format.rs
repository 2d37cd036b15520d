//! Formatting utilities for the account views.

use walletgate_core::Direction;

/// Format Unix timestamp as ISO date (YYYY-MM-DD).
///
/// Properly calculates year/month/day accounting for leap years.
pub fn format_date_iso(timestamp: u64) -> String {
    let mut remaining_days = (timestamp / 86400) as i64;
    let mut year = 1970i64;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let february = if is_leap_year(year) { 29 } else { 28 };
    let days_in_months = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut month = 1;
    for days_in_month in days_in_months {
        if remaining_days < days_in_month {
            break;
        }
        remaining_days -= days_in_month;
        month += 1;
    }

    format!("{:04}-{:02}-{:02}", year, month, remaining_days + 1)
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Signed ETH amount, e.g. `+1.5 ETH` or `-0.25 ETH`.
pub fn format_amount(direction: Direction, amount: &str) -> String {
    let sign = match direction {
        Direction::Received => '+',
        Direction::Sent => '-',
    };
    format!("{}{} ETH", sign, amount)
}
