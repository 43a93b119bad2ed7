use std::fmt::Display;

/// Raised when the page no longer looks the way the scraper expects it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    TextNodeParse(String),
    StatusParse(String),
    Pattern(String),
    Url(String),
}

impl Error {
    pub fn html_parse_error(msg: &str) -> Self {
        Self::HtmlParse(msg.to_string())
    }
    pub fn text_node_parse_error(msg: &str) -> Self {
        Self::TextNodeParse(msg.to_string())
    }
    pub fn status_parse_error(msg: &str) -> Self {
        Self::StatusParse(msg.to_string())
    }
    pub fn pattern_error(msg: &str) -> Self {
        Self::Pattern(msg.to_string())
    }

    pub fn url_error(msg: &str) -> Self {
        Self::Url(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "HTML Parse Error: {}", msg),
            Self::TextNodeParse(msg) => write!(f, "Text Node Parse Error: {}", msg),
            Self::StatusParse(msg) => write!(f, "Status Parse Error: {}", msg),
            Self::Pattern(msg) => write!(f, "Pattern Error: {msg}"),
            Self::Url(msg) => write!(f, "URL Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
