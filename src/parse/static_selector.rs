use std::sync::OnceLock;

use scraper::Selector;

/// A CSS selector that is parsed on first use and then shared.
#[derive(Debug)]
pub(crate) struct StaticSelector {
    cell: OnceLock<Selector>,
    source: &'static str,
}

impl StaticSelector {
    pub(crate) const fn new(source: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            source,
        }
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        self.cell
            .get_or_init(|| match Selector::parse(self.source) {
                Ok(sel) => sel,
                Err(e) => panic!("Error parsing static selector {}: {:?}", self.source, e),
            })
    }
}

/// Same idea for regular expressions used while scraping.
#[derive(Debug)]
pub(crate) struct StaticRegex {
    cell: OnceLock<regex::Regex>,
    source: &'static str,
}

impl StaticRegex {
    pub(crate) const fn new(source: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            source,
        }
    }
}

impl core::ops::Deref for StaticRegex {
    type Target = regex::Regex;

    fn deref(&self) -> &Self::Target {
        self.cell.get_or_init(|| match regex::Regex::new(self.source) {
            Ok(re) => re,
            Err(e) => panic!("Error compiling static regex {}: {e}", self.source),
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}

#[macro_export]
macro_rules! static_regex {
    ($x: ident <- $re: literal) => {
        static $x: $crate::parse::static_selector::StaticRegex =
            $crate::parse::static_selector::StaticRegex::new($re);
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_static_selector_matches() {
        static_selector!(BOLD <- "nobr > b");
        let html = scraper::Html::parse_fragment("<nobr><b>Unknown1</b></nobr>");
        let names: Vec<String> = html
            .select(&BOLD)
            .map(|b| b.text().collect())
            .collect();
        assert_eq!(names, vec!["Unknown1".to_string()]);
    }

    #[test]
    fn test_static_regex_is_shared() {
        static_regex!(DIGITS <- r"\d+");
        let first: *const regex::Regex = &*DIGITS;
        let second: *const regex::Regex = &*DIGITS;
        assert_eq!(first, second);
        assert!(DIGITS.is_match("x12"));
    }
}
