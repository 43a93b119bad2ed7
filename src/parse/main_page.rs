use scraper::Html;

use super::{status_table, Error, Result};
use crate::{static_selector, status::StatusRow};

const TITLE_PREFIX: &str = "Eetlijst.nl - ";
const NOTICEBOARD_TITLE: &str = "Klik hier als je het prikbord wilt aanpassen";

/// A parsed `main.php` document.
#[derive(Debug)]
pub struct MainPage(Html);

impl MainPage {
    pub fn parse(content: &str) -> Self {
        Self(Html::parse_document(content))
    }

    /// Name of the list, taken from the page title.
    pub fn name(&self) -> Result<String> {
        static_selector!(TITLE <- "head > title");
        let title: String = self
            .0
            .select(&TITLE)
            .next()
            .ok_or_else(|| Error::html_parse_error("Page has no title."))?
            .text()
            .collect();
        Ok(title.replacen(TITLE_PREFIX, "", 1).trim().to_string())
    }

    /// Display names in table order. Removed residents are not listed.
    pub fn residents(&self) -> Result<Vec<String>> {
        static_selector!(RESIDENT <- r#"th[title*="Meer informatie over"], a[title*="Meer informatie over"]"#);
        static_selector!(NAME <- "nobr b");
        self.0
            .select(&RESIDENT)
            .map(|resident| {
                resident
                    .select(&NAME)
                    .next()
                    .map(|name| name.text().collect::<String>())
                    .ok_or_else(|| Error::text_node_parse_error("Resident should have a name."))
            })
            .collect()
    }

    /// Noticeboard contents with the markup stripped.
    pub fn noticeboard(&self) -> Result<String> {
        static_selector!(NOTICEBOARD <- r#"a[title="Klik hier als je het prikbord wilt aanpassen"]"#);
        let board = self
            .0
            .select(&NOTICEBOARD)
            .next()
            .ok_or_else(|| {
                Error::html_parse_error(&format!("No link titled '{NOTICEBOARD_TITLE}'."))
            })?;
        Ok(board.text().collect())
    }

    pub fn status_rows(&self, limit: Option<usize>) -> Result<Vec<StatusRow>> {
        status_table::status_rows(&self.0, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page(name: &str) -> MainPage {
        let html = fs::read_to_string(format!("./src/parse/html_examples/{name}")).unwrap();
        MainPage::parse(&html)
    }

    #[test]
    fn test_name() {
        assert_eq!(page("main.html").name().unwrap(), "Test-eetlijst");
    }

    #[test]
    fn test_residents() {
        assert_eq!(
            page("main.html").residents().unwrap(),
            vec!["Unknown1", "Unknown2", "Unknown3", "Unknown4", "Unknown5"]
        );
    }

    #[test]
    fn test_noticeboard() {
        assert_eq!(
            page("main.html").noticeboard().unwrap(),
            "This is a test message!"
        );
    }

    #[test]
    fn test_noticeboard_html() {
        assert_eq!(
            page("main2.html").noticeboard().unwrap(),
            "This is a test message!\n\n\nwww.github.com/basilfx"
        );
    }

    #[test]
    fn test_residents_match_columns() {
        for name in ["main.html", "main3.html", "main4.html"] {
            let page = page(name);
            let residents = page.residents().unwrap();
            let rows = page.status_rows(None).unwrap();
            assert!(!rows.is_empty());
            assert!(rows.iter().all(|row| row.statuses.len() == residents.len()));
        }
    }

    #[test]
    fn test_login_page_has_no_board() {
        let page = page("login_failed.html");
        assert!(page.noticeboard().is_err());
        assert_eq!(page.residents().unwrap(), Vec::<String>::new());
    }
}
