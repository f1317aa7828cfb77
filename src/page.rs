use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::{
    error::{HeaderDateError, PageShapeError},
    util::parse_header_date,
};

const TABLE: &str = "body > div.container.body-content > div > table";

/// Where things live on the burn-day page.
pub struct Layout {
    pub sel_th: Selector,
    pub sel_region_tr: Selector,
    pub expected_region: &'static str,
    pub skipped_headers: [&'static str; 2],
    /// Lowercase; matched against the lowercased permit info cell.
    pub ban_phrases: [(&'static str, Status); 2],
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            sel_th: Selector::parse(&format!("{TABLE} > thead > tr > th")).unwrap(),
            sel_region_tr: Selector::parse(&format!("{TABLE} > tbody > tr:nth-child(1)")).unwrap(),
            expected_region: "Western Placer County (West of Cisco Grove)",
            skipped_headers: ["Area", "Permit Info."],
            ban_phrases: [
                ("burn ban in effect until further notice", Status::BurnBan),
                ("cal fire permit suspension", Status::PermitSuspension),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    BurnBan,
    PermitSuspension,
    Allowed,
    NotAllowed,
}

impl Status {
    #[inline]
    pub const fn allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub status: Status,
    /// 1-based column the status was read from; `None` when a ban notice decided it.
    pub column: Option<usize>,
}

fn text_of(elem: ElementRef) -> String {
    elem.text().collect::<String>().trim().to_owned()
}

/// Body cells of the first table row, in order.
fn region_cells<'a>(html: &'a Html, layout: &Layout) -> Option<Vec<ElementRef<'a>>> {
    let tr = html.select(&layout.sel_region_tr).next()?;
    Some(tr.child_elements().filter(|c| c.value().name() == "td").collect())
}

/// Header cells paired with their 1-based column and parsed date.
pub fn header_dates<'a>(
    html: &'a Html,
    layout: &'a Layout,
) -> impl Iterator<Item = (usize, Result<NaiveDate, HeaderDateError>)> + 'a {
    html.select(&layout.sel_th)
        .enumerate()
        .filter_map(move |(i, th)| {
            let text = text_of(th);
            if layout.skipped_headers.iter().any(|&h| h == text) {
                None
            } else {
                Some((i + 1, parse_header_date(&text)))
            }
        })
}

pub fn resolve_date_column(html: &Html, layout: &Layout, today: NaiveDate) -> Option<usize> {
    header_dates(html, layout).find_map(|(column, date)| match date {
        Ok(date) if date == today => Some(column),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(target: "page", "header #{column} skipped: {e}");
            None
        }
    })
}

/// First body row, first cell, must name the Western Placer region.
pub fn check_region(html: &Html, layout: &Layout) -> Result<(), PageShapeError> {
    let cells = region_cells(html, layout).ok_or(PageShapeError::MissingRegionRow)?;
    let Some(&first) = cells.first() else {
        return Err(PageShapeError::MissingRegionRow);
    };
    let region = text_of(first);
    if region.contains(layout.expected_region) {
        Ok(())
    } else {
        Err(PageShapeError::UnexpectedRegion(region))
    }
}

/// A burn ban or permit suspension in the permit info cell overrides the day's column.
pub fn ban_notice(html: &Html, layout: &Layout) -> Option<Status> {
    let cells = region_cells(html, layout)?;
    let info = text_of(*cells.get(1)?).to_lowercase();
    layout
        .ban_phrases
        .iter()
        .find(|(phrase, _)| info.contains(phrase))
        .map(|&(_, status)| status)
}

pub fn classify(cell: Option<&str>) -> Status {
    match cell.map(str::trim) {
        None | Some("") => Status::NotAllowed,
        Some(text) if text.contains("No ") => Status::NotAllowed,
        Some(_) => Status::Allowed,
    }
}

pub fn evaluate(html: &Html, layout: &Layout, today: NaiveDate) -> Result<Evaluation, PageShapeError> {
    if let Some(status) = ban_notice(html, layout) {
        tracing::info!(target: "page", "permit info overrides the day: {status:?}");
        return Ok(Evaluation { status, column: None });
    }

    check_region(html, layout)?;

    let column = resolve_date_column(html, layout, today).ok_or(PageShapeError::NoDateColumn(today))?;
    let cells = region_cells(html, layout).ok_or(PageShapeError::MissingRegionRow)?;
    let cell = cells.get(column - 1).ok_or(PageShapeError::MissingDateCell(column))?;
    let text = text_of(*cell);
    let status = classify(Some(&text));
    tracing::info!(target: "page", "column #{column} ({today}): {text:?} -> {status:?}");

    Ok(Evaluation { status, column: Some(column) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(headers: &[&str], row: &[&str]) -> String {
        let th = headers.iter().map(|h| format!("<th>{h}</th>")).collect::<String>();
        let td = row.iter().map(|d| format!("<td>\n  {d}\n</td>")).collect::<String>();
        format!(
            "<html><body><div class=\"container body-content\"><div><table>\
             <thead><tr>{th}</tr></thead>\
             <tbody><tr>{td}</tr><tr><td>Eastern Placer County</td></tr></tbody>\
             </table></div></body></html>"
        )
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    const REGION: &str = "Western Placer County (West of Cisco Grove)";

    #[test]
    fn resolves_todays_column() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info.", "Monday, January 19, 2026", "Tuesday, January 20, 2026"],
            &[REGION, "", "Burning Allowed", "No Burning"],
        ));
        let layout = Layout::default();
        assert_eq!(resolve_date_column(&html, &layout, jan(19)), Some(3));
        assert_eq!(resolve_date_column(&html, &layout, jan(20)), Some(4));
        assert_eq!(resolve_date_column(&html, &layout, jan(21)), None);
    }

    #[test]
    fn malformed_headers_do_not_stop_the_scan() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info.", "Tomorrow", "Monday, Janvier 20, 2026", "Monday, January 20, 2026"],
            &[REGION, "", "", "", "Burning Allowed"],
        ));
        assert_eq!(resolve_date_column(&html, &Layout::default(), jan(20)), Some(5));
    }

    #[test]
    fn first_match_wins() {
        let html = Html::parse_document(&page(
            &["Area", "Monday, January 20, 2026", "Monday, January 20, 2026"],
            &[REGION, "", ""],
        ));
        assert_eq!(resolve_date_column(&html, &Layout::default(), jan(20)), Some(2));
    }

    #[test]
    fn classifier() {
        assert_eq!(classify(Some("No Burning Allowed")), Status::NotAllowed);
        assert_eq!(classify(Some("  No Burning \n")), Status::NotAllowed);
        assert_eq!(classify(Some("Burning Allowed")), Status::Allowed);
        assert_eq!(classify(Some("   ")), Status::NotAllowed);
        assert_eq!(classify(None), Status::NotAllowed);
        assert_eq!(classify(Some("no burning")), Status::Allowed);
    }

    #[test]
    fn burn_ban_beats_the_column() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info.", "Monday, January 20, 2026"],
            &[REGION, "Burn Ban In Effect Until Further Notice", "Burning Allowed"],
        ));
        let eval = evaluate(&html, &Layout::default(), jan(20)).unwrap();
        assert_eq!(eval, Evaluation { status: Status::BurnBan, column: None });
        assert!(!eval.status.allowed());
    }

    #[test]
    fn suspension_needs_no_date_column() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info."],
            &["Somewhere else", "CAL FIRE permit suspension for the season"],
        ));
        let eval = evaluate(&html, &Layout::default(), jan(20)).unwrap();
        assert_eq!(eval.status, Status::PermitSuspension);
    }

    #[test]
    fn region_must_match() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info.", "Monday, January 20, 2026"],
            &["Eastern Placer County", "", "Burning Allowed"],
        ));
        assert!(matches!(
            evaluate(&html, &Layout::default(), jan(20)),
            Err(PageShapeError::UnexpectedRegion(r)) if r == "Eastern Placer County"
        ));

        let empty = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        assert!(matches!(
            evaluate(&empty, &Layout::default(), jan(20)),
            Err(PageShapeError::MissingRegionRow)
        ));
    }

    #[test]
    fn stale_page_is_an_error() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info.", "Monday, January 19, 2026"],
            &[REGION, "", "Burning Allowed"],
        ));
        assert!(matches!(
            evaluate(&html, &Layout::default(), jan(20)),
            Err(PageShapeError::NoDateColumn(d)) if d == jan(20)
        ));
    }

    #[test]
    fn short_row_is_an_error() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info.", "Monday, January 20, 2026"],
            &[REGION, ""],
        ));
        assert!(matches!(
            evaluate(&html, &Layout::default(), jan(20)),
            Err(PageShapeError::MissingDateCell(3))
        ));
    }

    #[test]
    fn allowed_day() {
        let html = Html::parse_document(&page(
            &["Area", "Permit Info.", "Monday, January 20, 2026"],
            &[REGION, "Open", "Burning Allowed"],
        ));
        assert_eq!(
            evaluate(&html, &Layout::default(), jan(20)).unwrap(),
            Evaluation { status: Status::Allowed, column: Some(3) }
        );
    }
}
