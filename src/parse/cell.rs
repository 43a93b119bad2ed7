use chrono::{DateTime, Utc};
use scraper::ElementRef;

use super::{timezone, Error, Result};
use crate::{static_regex, status::Status};

const NOP: &str = "nop.gif";
const KOOK: &str = "kook.gif";
const EET: &str = "eet.gif";
const LEEG: &str = "leeg.gif";

/// Icon tallies found in one status cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Icons {
    pub nop: u32,
    pub kook: u32,
    pub eet: u32,
    pub leeg: u32,
}

impl Icons {
    pub fn count(markup: &str) -> Self {
        let tally = |icon: &str| u32::try_from(markup.matches(icon).count()).unwrap_or(u32::MAX);
        Self {
            nop: tally(NOP),
            kook: tally(KOOK),
            eet: tally(EET),
            leeg: tally(LEEG),
        }
    }

    /// The site draws at most a handful of icons and prints the rest of the
    /// count as a number next to them.
    pub fn value(self, extra: u32) -> Result<Option<i32>> {
        let as_i32 = |n: u32| {
            i32::try_from(n).map_err(|_| Error::status_parse_error("Status count out of range."))
        };
        if self.nop > 0 {
            Ok(Some(0))
        } else if self.kook > 0 && self.eet == 0 {
            Ok(Some(as_i32(self.kook)?))
        } else if self.kook > 0 && self.eet > 0 {
            Ok(Some(as_i32(self.kook.saturating_add(self.eet.saturating_mul(extra)))?))
        } else if self.eet > 0 {
            Ok(Some(-as_i32(self.eet.saturating_mul(extra))?))
        } else if self.leeg > 0 {
            Ok(None)
        } else {
            Err(Error::status_parse_error("Cannot parse diner status."))
        }
    }
}

/// First number in the visible text of the cell, 1 if there is none.
pub fn extra(text: &str) -> Result<u32> {
    static_regex!(DIGITS <- r"\d+");
    DIGITS.find(text).map_or(Ok(1), |m| {
        m.as_str()
            .parse()
            .map_err(|_| Error::status_parse_error("Status count out of range."))
    })
}

/// Maps the raw markup and visible text of a cell to a status value.
pub fn classify(markup: &str, text: &str) -> Result<Option<i32>> {
    Icons::count(markup).value(extra(text)?)
}

/// "onveranderd sinds HH:MM" as found in the icon titles, if present.
pub fn unchanged_since(markup: &str) -> Option<(u32, u32)> {
    static_regex!(LAST_CHANGED <- r"onveranderd sinds ([0-9]+):([0-9]+)");
    let lower = markup.to_lowercase();
    let captures = LAST_CHANGED.captures(&lower)?;
    let hour = captures.get(1)?.as_str().parse().ok()?;
    let minute = captures.get(2)?.as_str().parse().ok()?;
    Some((hour, minute))
}

/// Parses one status cell. `last_changed_for` is the row timestamp when the
/// row is the nearest one, the only row the site annotates.
pub fn from_html_element(
    cell: ElementRef,
    last_changed_for: Option<DateTime<Utc>>,
) -> Result<Status> {
    let markup = cell.inner_html();
    let text: String = cell.text().collect();
    let value = classify(&markup, &text)?;
    let last_changed = last_changed_for
        .map(|timestamp| timezone::local_clock_to_utc(timestamp, unchanged_since(&markup)));
    Ok(Status::new(value, last_changed))
}
