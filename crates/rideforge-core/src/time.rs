//! UTC timestamp helpers
//!
//! Record timestamps need second precision at most, so the date math is
//! done by hand rather than pulling in a calendar dependency.

use std::time::{SystemTime, UNIX_EPOCH};

fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Split seconds-since-epoch into (year, month, day, hour, minute, second)
fn split_epoch(secs: u64) -> (i64, u32, u32, u32, u32, u32) {
    let days = (secs / 86400) as i64;
    let time_secs = secs % 86400;
    let hours = (time_secs / 3600) as u32;
    let mins = ((time_secs % 3600) / 60) as u32;
    let s = (time_secs % 60) as u32;

    let mut year = 1970i64;
    let mut remaining = days;
    loop {
        let in_year = if is_leap(year) { 366 } else { 365 };
        if remaining < in_year {
            break;
        }
        remaining -= in_year;
        year += 1;
    }

    let month_days = [
        31,
        if is_leap(year) { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 0u32;
    for (i, &md) in month_days.iter().enumerate() {
        if remaining < md {
            month = i as u32;
            break;
        }
        remaining -= md;
    }

    (year, month + 1, remaining as u32 + 1, hours, mins, s)
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Current UTC time as an ISO-8601 string, e.g. "2026-08-06T14:03:21Z"
pub fn now_iso8601() -> String {
    let (y, m, d, hh, mm, ss) = split_epoch(epoch_secs());
    format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z", y, m, d, hh, mm, ss)
}

/// Current UTC date as "YYYY-MM-DD"
pub fn today() -> String {
    let (y, m, d, _, _, _) = split_epoch(epoch_secs());
    format!("{:04}-{:02}-{:02}", y, m, d)
}
