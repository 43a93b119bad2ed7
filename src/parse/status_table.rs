use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};

use super::{cell, Error, Result};
use crate::{static_regex, static_selector, status::StatusRow};

/// The two table layouts the site serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Plain,
    Deadline,
}

impl Layout {
    fn detect(row: ElementRef) -> Self {
        static_selector!(DEADLINE_LINK <- r#"td[href*="javascript:vs"], a[href*="javascript:vs"]"#);
        if row.select(&DEADLINE_LINK).next().is_some() {
            Self::Deadline
        } else {
            Self::Plain
        }
    }

    /// Columns before the first resident.
    const fn leading_columns(self) -> usize {
        match self {
            Self::Plain => 1,
            Self::Deadline => 2,
        }
    }

    fn timestamp(self, markup: &str) -> Result<DateTime<Utc>> {
        static_regex!(PLAIN_DATE <- r"javascript:k\(([0-9]*),([-0-9]*),([-0-9]*)\);");
        static_regex!(DEADLINE_DATE <- r"javascript:vs\(([0-9]*)\);");
        let pattern = match self {
            Self::Plain => &PLAIN_DATE,
            Self::Deadline => &DEADLINE_DATE,
        };
        let seconds: i64 = pattern
            .captures(markup)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| Error::pattern_error("Cannot find date of status row."))?;
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| Error::pattern_error("Date of status row is out of range."))
    }
}

/// Walks the dinner table, nearest day first, stopping after `limit` rows.
pub fn status_rows(document: &Html, limit: Option<usize>) -> Result<Vec<StatusRow>> {
    static_selector!(MARKER <- r#"table[width="80"], tbody[width="80"], tr[width="80"], th[width="80"]"#);
    static_selector!(ROW <- "tr");
    static_selector!(HEADER <- "th");
    static_selector!(CELL <- "td");

    let table = document
        .select(&MARKER)
        .next()
        .and_then(|marker| marker.parent())
        .and_then(|row| row.parent())
        .and_then(ElementRef::wrap)
        .ok_or_else(|| Error::html_parse_error("Cannot parse status table."))?;

    let mut layout = Layout::Plain;
    let mut results: Vec<StatusRow> = Vec::new();

    for row in table.select(&ROW) {
        if limit.is_some_and(|limit| results.len() >= limit) {
            break;
        }
        if row.select(&HEADER).next().is_some() {
            continue;
        }
        if results.is_empty() {
            layout = Layout::detect(row);
        }

        let timestamp = layout.timestamp(&row.inner_html())?;
        // only the nearest day carries "last changed" hints
        let last_changed_for = results.is_empty().then_some(timestamp);

        let statuses = row
            .select(&CELL)
            .skip(layout.leading_columns())
            .map(|td| cell::from_html_element(td, last_changed_for))
            .collect::<Result<Vec<_>>>()?;

        let deadline = (layout == Layout::Deadline).then_some(timestamp);
        results.push(StatusRow::new(timestamp, deadline, statuses));
    }

    Ok(results)
}
