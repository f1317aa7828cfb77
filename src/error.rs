use std::{num::ParseIntError, path::PathBuf};

use chrono::NaiveDate;

/// Why a single header cell could not be read as a date.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HeaderDateError {
    #[error("expected \"<Weekday>, <Month> <Day>, <Year>\", got {0:?}")]
    Shape(String),
    #[error("unknown month {0:?}")]
    UnknownMonth(String),
    #[error("bad number: {0}")]
    Number(#[from] ParseIntError),
    #[error("no such day: {year}-{month}-{day}")]
    OutOfRange { year: i32, month: u32, day: u32 },
}

/// The fetched page does not look like the burn-day table we know.
#[derive(Debug, thiserror::Error)]
pub enum PageShapeError {
    #[error("region row not found")]
    MissingRegionRow,
    #[error("unexpected region cell {0:?}")]
    UnexpectedRegion(String),
    #[error("no header column matches {0}")]
    NoDateColumn(NaiveDate),
    #[error("region row has no cell in column {0}")]
    MissingDateCell(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path:?} is not a burn-day history: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path:?} has an entry with unreadable date {date:?}")]
    BadDate { path: PathBuf, date: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
    #[error("page was not as expected, selectors likely need adjusting: {0}")]
    PageShape(#[from] PageShapeError),
    #[error("history: {0}")]
    History(#[from] HistoryError),
}
