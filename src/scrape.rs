use core::time::Duration;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use httpdate::parse_http_date;
use reqwest::{header::DATE, Client as Request};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

pub fn basic() -> reqwest::Result<Request> {
    Request::builder().timeout(FETCH_TIMEOUT).build()
}

/// GETs `url` and returns its body, with the server's `Date` header when it sent a readable one.
pub async fn fetch(client: &Request, url: &str) -> reqwest::Result<(String, Option<SystemTime>)> {
    tracing::info!(target: "fetch", "GET {url}");

    let res = client.get(url).send().await?.error_for_status()?;
    let date = res
        .headers()
        .get(DATE)
        .and_then(|s| s.to_str().ok())
        .and_then(|s| parse_http_date(s).ok());
    match date {
        Some(date) => tracing::info!(target: "fetch", "server date {}", DateTime::<Local>::from(date)),
        None => tracing::warn!(target: "fetch", "no/wrong date"),
    }

    let body = res.text().await?;
    tracing::info!(target: "fetch", "fetching finished: {} bytes", body.len());
    Ok((body, date))
}
