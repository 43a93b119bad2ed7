use chrono::{DateTime, Duration, Utc};

/// A session id and the moment it stops being trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    valid_until: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: id.into(),
            valid_until: now + ttl,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until < now
    }

    /// Slides the expiry forward after a successful use.
    pub fn touch(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.valid_until = now + ttl;
    }
}
