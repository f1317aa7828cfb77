use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate};

use crate::error::HeaderDateError;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parses a table header like `"Monday, January 20, 2026"`.
///
/// The weekday is not checked against the date.
pub fn parse_header_date(text: &str) -> Result<NaiveDate, HeaderDateError> {
    let shape = || HeaderDateError::Shape(text.to_owned());

    let mut parts = text.trim().split(", ");
    let (Some(_weekday), Some(month_day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(shape());
    };
    let Some((month, day)) = month_day.split_once(' ') else {
        return Err(shape());
    };

    let Some(month0) = MONTHS.iter().position(|&m| m == month) else {
        return Err(HeaderDateError::UnknownMonth(month.to_owned()));
    };
    let month = month0 as u32 + 1;
    let day = day.parse::<u32>()?;
    let year = year.parse::<i32>()?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(HeaderDateError::OutOfRange { year, month, day })
}

/// `Tue, 20 Jan 2026 20:00:00 GMT`
pub fn http_date(now: DateTime<Local>) -> String {
    httpdate::fmt_http_date(SystemTime::from(now))
}

/// Local calendar day of a stored HTTP-date string.
pub fn local_day(date: &str) -> Option<NaiveDate> {
    let time = httpdate::parse_http_date(date).ok()?;
    let local = DateTime::<Local>::from(time);
    tracing::debug!(target: "time-converter", "{date:?} -> {local}");
    Some(local.date_naive())
}
