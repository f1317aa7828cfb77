use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    error::HistoryError,
    util::{http_date, local_day},
};

/// One day's determination. `date` is when the check ran, as an HTTP-date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnRecord {
    pub date: String,
    pub allowedBurn: bool,
}

impl BurnRecord {
    pub fn new(now: DateTime<Local>, allowedBurn: bool) -> Self {
        Self {
            date: http_date(now),
            allowedBurn,
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> HistoryError + '_ {
    move |source| HistoryError::Io {
        path: path.to_owned(),
        source,
    }
}

/// Writes through a sibling temp file so a crash never leaves half a document behind.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), HistoryError> {
    let mut body = serde_json::to_string_pretty(value).map_err(|source| HistoryError::Corrupt {
        path: path.to_owned(),
        source,
    })?;
    body.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, body).map_err(io_err(&tmp))?;
    fs::rename(&tmp, path).map_err(io_err(path))
}

pub fn load(path: &Path) -> Result<Vec<BurnRecord>, HistoryError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(target: "history", "{path:?} does not exist yet, starting a new history");
            return Ok(Vec::new());
        }
        Err(e) => return Err(io_err(path)(e)),
    };
    serde_json::from_str(&data).map_err(|source| HistoryError::Corrupt {
        path: path.to_owned(),
        source,
    })
}

/// Appends today's record unless the history already has one for this calendar day.
///
/// Returns whether a record was written.
pub fn append_if_absent(path: &Path, allowedBurn: bool, now: DateTime<Local>) -> Result<bool, HistoryError> {
    let mut records = load(path)?;
    let today = now.date_naive();

    for record in &records {
        let Some(day) = local_day(&record.date) else {
            return Err(HistoryError::BadDate {
                path: path.to_owned(),
                date: record.date.clone(),
            });
        };
        if day == today {
            tracing::info!(target: "history", "already recorded {today} at {:?}", record.date);
            return Ok(false);
        }
    }

    records.push(BurnRecord::new(now, allowedBurn));
    write_json(path, &records)?;

    tracing::info!(target: "history", "\x1b[36m{path:?}: {} records, appended allowedBurn = {allowedBurn}\x1b[0m", records.len());
    Ok(true)
}

/// Replaces the snapshot with the latest determination.
pub fn overwrite_latest(path: &Path, allowedBurn: bool, now: DateTime<Local>) -> Result<(), HistoryError> {
    write_json(path, &BurnRecord::new(now, allowedBurn))?;
    tracing::info!(target: "history", "\x1b[36m{path:?}: allowedBurn = {allowedBurn}\x1b[0m");
    Ok(())
}
