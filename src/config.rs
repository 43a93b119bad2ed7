use std::env;

use chrono::Duration;
use url::Url;

pub const BASE_URL: &str = "https://www.eetlijst.nl/";
pub const SESSION_TIMEOUT: Duration = Duration::seconds(60 * 5);
pub const CACHE_TIMEOUT: Duration = Duration::seconds(60 * 5 / 2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
    /// How long a session id stays usable after its last use.
    pub session_ttl: Duration,
    /// How long a fetched page may be served from memory.
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_ttl: SESSION_TIMEOUT,
            cache_ttl: CACHE_TIMEOUT,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(BASE_URL).expect("base url should be valid!")
}

impl Config {
    /// Reads `EETLIJST_BASE_URL`, `EETLIJST_SESSION_TTL` and
    /// `EETLIJST_CACHE_TTL` (seconds). Unset or invalid values keep the
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup("EETLIJST_BASE_URL") {
            match Url::parse(&raw) {
                Ok(url) => config.base_url = url,
                Err(e) => log::warn!("ignoring EETLIJST_BASE_URL={raw}: {e}"),
            }
        }
        if let Some(ttl) = seconds(&lookup, "EETLIJST_SESSION_TTL") {
            config.session_ttl = ttl;
        }
        if let Some(ttl) = seconds(&lookup, "EETLIJST_CACHE_TTL") {
            config.cache_ttl = ttl;
        }
        config
    }

    pub(crate) fn endpoint(&self, page: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(page)
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<i64>() {
        Ok(secs) if secs >= 0 => Some(Duration::seconds(secs)),
        _ => {
            log::warn!("ignoring {key}={raw}: expected a number of seconds");
            None
        }
    }
}
