use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use scraper::Html;

use crate::{
    error::{Error, HistoryError},
    history,
    page::{self, Evaluation, Layout},
};

pub const HISTORY_FILE: &str = "burnday-history.json";
pub const SNAPSHOT_FILE: &str = "burnday.json";

pub struct Paths {
    pub history: PathBuf,
    pub snapshot: PathBuf,
}

impl Paths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            history: dir.join(HISTORY_FILE),
            snapshot: dir.join(SNAPSHOT_FILE),
        }
    }
}

pub fn record(paths: &Paths, allowedBurn: bool, now: DateTime<Local>) -> Result<(), HistoryError> {
    history::append_if_absent(&paths.history, allowedBurn, now)?;
    history::overwrite_latest(&paths.snapshot, allowedBurn, now)
}

/// Decides today's burn status from a fetched page and persists it.
///
/// Nothing is written when the page is not recognised.
pub fn check_page(html: &str, layout: &Layout, paths: &Paths, now: DateTime<Local>) -> Result<Evaluation, Error> {
    let html = Html::parse_document(html);
    tracing::info!(target: "page", "parsing finished.");

    let eval = page::evaluate(&html, layout, now.date_naive())?;
    record(paths, eval.status.allowed(), now)?;
    Ok(eval)
}
