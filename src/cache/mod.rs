mod session;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

pub use session::Session;

pub const MAIN_PAGE: &str = "main_page";

#[derive(Debug, Clone)]
struct Entry {
    content: String,
    valid_until: DateTime<Utc>,
}

/// Short-lived memo of fetched pages. Never consulted for writes.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<&'static str, Entry>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached page, unless it expired. A miss is not an error.
    #[must_use]
    pub fn fetch(&self, key: &str, now: DateTime<Utc>) -> Option<&str> {
        self.entries
            .get(key)
            .filter(|entry| now < entry.valid_until)
            .map(|entry| entry.content.as_str())
    }

    pub fn store(&mut self, key: &'static str, content: String, now: DateTime<Utc>, ttl: Duration) {
        self.entries.insert(
            key,
            Entry {
                content,
                valid_until: now + ttl,
            },
        );
    }

    /// Pushes the expiry of a live entry to `now + ttl`.
    pub fn touch(&mut self, key: &str, now: DateTime<Utc>, ttl: Duration) {
        if let Some(entry) = self.entries.get_mut(key).filter(|entry| now < entry.valid_until) {
            entry.valid_until = now + ttl;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 3, 28, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = PageCache::new();
        cache.store(MAIN_PAGE, "page".into(), t0(), Duration::seconds(150));
        assert_eq!(cache.fetch(MAIN_PAGE, t0()), Some("page"));
        assert_eq!(
            cache.fetch(MAIN_PAGE, t0() + Duration::seconds(149)),
            Some("page")
        );
    }

    #[test]
    fn test_miss_after_ttl() {
        let mut cache = PageCache::new();
        cache.store(MAIN_PAGE, "page".into(), t0(), Duration::seconds(150));
        assert_eq!(cache.fetch(MAIN_PAGE, t0() + Duration::seconds(150)), None);
        assert_eq!(cache.fetch("other", t0()), None);
    }

    #[test]
    fn test_store_overwrites() {
        let mut cache = PageCache::new();
        cache.store(MAIN_PAGE, "old".into(), t0(), Duration::seconds(1));
        let later = t0() + Duration::seconds(10);
        cache.store(MAIN_PAGE, "new".into(), later, Duration::seconds(1));
        assert_eq!(cache.fetch(MAIN_PAGE, later), Some("new"));
    }

    #[test]
    fn test_touch_extends_live_entry() {
        let mut cache = PageCache::new();
        let ttl = Duration::seconds(2);
        cache.store(MAIN_PAGE, "page".into(), t0(), ttl);
        let later = t0() + Duration::seconds(1);
        cache.touch(MAIN_PAGE, later, ttl);
        assert_eq!(cache.fetch(MAIN_PAGE, t0() + Duration::seconds(2)), Some("page"));
        assert_eq!(cache.fetch(MAIN_PAGE, later + ttl), None);
    }

    #[test]
    fn test_touch_ignores_expired_entry() {
        let mut cache = PageCache::new();
        let ttl = Duration::seconds(2);
        cache.store(MAIN_PAGE, "page".into(), t0(), ttl);
        let later = t0() + Duration::seconds(5);
        cache.touch(MAIN_PAGE, later, ttl);
        assert_eq!(cache.fetch(MAIN_PAGE, later), None);
    }

    #[test]
    fn test_clear() {
        let mut cache = PageCache::new();
        cache.store(MAIN_PAGE, "page".into(), t0(), Duration::seconds(150));
        cache.store("other", "x".into(), t0(), Duration::seconds(150));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.fetch(MAIN_PAGE, t0()), None);
    }
}
