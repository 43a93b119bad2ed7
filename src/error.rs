use crate::parse;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    /// Bad credentials, or no way to log in at all.
    Login(String),
    /// Unexpected HTTP status, or a session that could not be renewed.
    Session(String),
    /// The page did not have the expected structure.
    Scraping(parse::Error),
    /// Arguments rejected before anything was sent.
    InvalidInput(String),
    Request(reqwest::Error),
}

impl Error {
    pub fn login_error(msg: &str) -> Self {
        Self::Login(msg.to_string())
    }

    pub fn session_error(msg: &str) -> Self {
        Self::Session(msg.to_string())
    }

    pub fn invalid_input(msg: &str) -> Self {
        Self::InvalidInput(msg.to_string())
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Scraping(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Login(msg) => write!(f, "Login error: {}", msg),
            Error::Session(msg) => write!(f, "Session error: {}", msg),
            Error::Scraping(e) => write!(f, "Scraping error: {}", e),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Request(e) => write!(f, "Request error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Scraping(e) => Some(e),
            Error::Request(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
