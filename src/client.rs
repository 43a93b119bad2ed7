use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use url::Url;

use crate::{
    cache::{PageCache, Session, MAIN_PAGE},
    clock::{Clock, SystemClock},
    config::Config,
    error::{Error, Result},
    fetch::{query_param, with_query, Form, HttpTransport, Transport},
    parse::{self, MainPage},
    status::{self, StatusRow},
};

const LOGIN_PAGE: &str = "login.php";
const MAIN_PHP: &str = "main.php";

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug)]
enum Request {
    Get,
    Post(Form),
}

/// Builds an [`Eetlijst`] client. At least a username and password or a
/// session id is required.
#[derive(Debug, Default)]
pub struct Builder {
    username: Option<String>,
    password: Option<String>,
    session_id: Option<String>,
    config: Option<Config>,
}

impl Builder {
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// A session id known to be valid. It is trusted until the site says
    /// otherwise.
    #[must_use]
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Eetlijst> {
        self.build_with(HttpTransport::default(), SystemClock)
    }

    pub fn build_with<T: Transport, C: Clock>(self, transport: T, clock: C) -> Result<Eetlijst<T, C>> {
        let credentials = match (self.username, self.password) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            _ => {
                return Err(Error::login_error(
                    "Username and password must be given together.",
                ))
            }
        };
        if credentials.is_none() && self.session_id.is_none() {
            return Err(Error::login_error(
                "No username/password or session identifier provided.",
            ));
        }

        let config = self.config.unwrap_or_default();
        let session = self
            .session_id
            .map(|id| Session::new(id, clock.now(), config.session_ttl));

        Ok(Eetlijst {
            transport,
            clock,
            config,
            credentials,
            session,
            cache: PageCache::new(),
        })
    }
}

/// Client for one dinner list.
///
/// Nothing is sent until the first call that needs the site. Reads of the
/// main page are memoized for a short while; writes always go out.
///
/// There is no locking on the site's side: reading a status, waiting, and
/// writing it back can overwrite someone else's change in between.
#[derive(Debug)]
pub struct Eetlijst<T: Transport = HttpTransport, C: Clock = SystemClock> {
    transport: T,
    clock: C,
    config: Config,
    credentials: Option<Credentials>,
    session: Option<Session>,
    cache: PageCache,
}

impl Eetlijst {
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl<T: Transport, C: Clock> Eetlijst<T, C> {
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Logs in now instead of on first use. With a session id this fetches
    /// the main page once, which checks the id (and renews it when
    /// credentials are known).
    pub async fn connect(&mut self) -> Result<()> {
        if self.session.is_some() {
            self.main_page(Request::Get).await?;
        } else {
            self.session().await?;
        }
        Ok(())
    }

    /// The current session id, if there is a live one. Never logs in.
    pub fn session_id(&self) -> Option<&str> {
        let now = self.clock.now();
        self.session
            .as_ref()
            .filter(|session| !session.is_expired(now))
            .map(Session::id)
    }

    /// Forgets the session and every cached page.
    pub fn clear_cache(&mut self) {
        self.session = None;
        self.cache.clear();
    }

    pub async fn name(&mut self) -> Result<String> {
        let content = self.main_page(Request::Get).await?;
        Ok(MainPage::parse(&content).name()?)
    }

    pub async fn residents(&mut self) -> Result<Vec<String>> {
        let content = self.main_page(Request::Get).await?;
        Ok(MainPage::parse(&content).residents()?)
    }

    pub async fn noticeboard(&mut self) -> Result<String> {
        let content = self.main_page(Request::Get).await?;
        Ok(MainPage::parse(&content).noticeboard()?)
    }

    pub async fn set_noticeboard(&mut self, message: &str) -> Result<()> {
        let fields = vec![
            ("Aanpassen.x", "20".to_string()),
            ("Aanpassen.y", "20".to_string()),
            ("messageboard", message.to_string()),
        ];
        self.main_page(Request::Post(fields)).await?;
        Ok(())
    }

    /// Dinner statuses starting today, nearest day first, at most `limit`
    /// rows.
    pub async fn statuses(&mut self, limit: Option<usize>) -> Result<Vec<StatusRow>> {
        let content = self.main_page(Request::Get).await?;
        Ok(MainPage::parse(&content).status_rows(limit)?)
    }

    /// Value of one resident on the row at exactly `timestamp`.
    pub async fn status<Tz: TimeZone>(
        &mut self,
        resident_index: usize,
        timestamp: &DateTime<Tz>,
    ) -> Result<Option<i32>> {
        let timestamp = self.future_timestamp(timestamp)?;
        let rows = self.statuses(None).await?;
        let row = rows
            .iter()
            .find(|row| row.timestamp == timestamp)
            .ok_or_else(|| Error::invalid_input("No status row at the given timestamp."))?;
        row.statuses
            .get(resident_index)
            .map(|status| status.value)
            .ok_or_else(|| Error::invalid_input("Resident index out of range."))
    }

    /// Sets the status of a resident for the row at `timestamp`, which must be
    /// in the future and match a row exactly. The result is not read back.
    pub async fn set_status<Tz: TimeZone>(
        &mut self,
        resident_index: usize,
        value: Option<i32>,
        timestamp: &DateTime<Tz>,
    ) -> Result<()> {
        let timestamp = self.future_timestamp(timestamp)?;
        for what in status::steps(value) {
            log::debug!("setting resident {resident_index} to {what} on {timestamp}");
            let fields = vec![
                ("day[]", timestamp.timestamp().to_string()),
                ("submittype", "0".to_string()),
                ("submitwithform.x", "20".to_string()),
                ("submitwithform.y", "20".to_string()),
                ("what", what.to_string()),
                ("who", resident_index.to_string()),
            ];
            self.main_page(Request::Post(fields)).await?;
        }
        Ok(())
    }

    fn future_timestamp<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> Result<DateTime<Utc>> {
        let timestamp = timestamp.with_timezone(&Utc);
        if timestamp < self.clock.now() {
            return Err(Error::invalid_input("Timestamp cannot be in the past."));
        }
        Ok(timestamp)
    }

    fn endpoint(&self, page: &str) -> Result<Url> {
        self.config
            .endpoint(page)
            .map_err(|e| parse::Error::url_error(&format!("Invalid endpoint {page}: {e}")).into())
    }

    async fn login(&mut self) -> Result<()> {
        let Some(credentials) = &self.credentials else {
            return Err(Error::login_error(
                "Cannot login without username and password.",
            ));
        };
        let url = with_query(
            self.endpoint(LOGIN_PAGE)?,
            &[
                ("login", credentials.username.as_str()),
                ("pass", credentials.password.as_str()),
            ],
        );
        log::debug!("logging in as {}", credentials.username);
        let response = self.transport.get(url).await?;

        if response.status != 200 {
            return Err(Error::Session(format!(
                "Unexpected status code: {}",
                response.status
            )));
        }
        if response.url.as_str().contains("r=failed") {
            return Err(Error::login_error(
                "Unable to login. Username and/or password incorrect.",
            ));
        }
        let id = query_param(&response.url, "session_id").ok_or_else(|| {
            parse::Error::url_error("Unable to strip session identifier from URL.")
        })?;

        // the login redirects to the main page, keep it
        let now = self.clock.now();
        self.session = Some(Session::new(id, now, self.config.session_ttl));
        self.cache
            .store(MAIN_PAGE, response.body, now, self.config.cache_ttl);
        Ok(())
    }

    /// A live session id, logging in when there is none. An expired session
    /// is renewed once; if that one is expired as well, give up.
    async fn session(&mut self) -> Result<String> {
        let mut is_retry = false;
        loop {
            if self.session.is_none() {
                self.login().await?;
            }
            let now = self.clock.now();
            let Some(session) = &self.session else {
                return Err(Error::session_error("No session after login."));
            };
            if !session.is_expired(now) {
                return Ok(session.id().to_string());
            }
            if is_retry {
                return Err(Error::session_error("Unable to renew session."));
            }
            log::debug!("session expired at {}, renewing", session.valid_until());
            self.session = None;
            is_retry = true;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        if let Some(session) = self.session.as_mut() {
            session.touch(now, self.config.session_ttl);
        }
    }

    async fn main_page(&mut self, request: Request) -> Result<String> {
        let mut is_retry = false;
        loop {
            let session_id = self.session().await?;
            let response = match &request {
                Request::Get => {
                    let now = self.clock.now();
                    if let Some(page) = self.cache.fetch(MAIN_PAGE, now) {
                        log::debug!("main page served from cache");
                        let page = page.to_string();
                        self.touch(now);
                        self.cache.touch(MAIN_PAGE, now, self.config.cache_ttl);
                        return Ok(page);
                    }
                    let url = with_query(self.endpoint(MAIN_PHP)?, &[("session_id", session_id.as_str())]);
                    self.transport.get(url).await?
                }
                Request::Post(fields) => {
                    let url = self.endpoint(MAIN_PHP)?;
                    let form = post_form(&session_id, fields);
                    self.transport.post(url, &form).await?
                }
            };

            if response.status != 200 {
                return Err(Error::Session(format!(
                    "Unexpected status code: {}",
                    response.status
                )));
            }
            if response.url.as_str().contains(LOGIN_PAGE) {
                log::warn!("session {session_id} rejected by the site");
                self.clear_cache();
                if is_retry {
                    return Err(Error::session_error("Unable to retrieve page: main.php"));
                }
                is_retry = true;
                continue;
            }

            let now = self.clock.now();
            self.touch(now);
            self.cache
                .store(MAIN_PAGE, response.body.clone(), now, self.config.cache_ttl);
            return Ok(response.body);
        }
    }
}

/// The full form `main.php` expects, with `fields` overriding the defaults.
fn post_form(session_id: &str, fields: &Form) -> Form {
    let mut form: Form = vec![
        ("day[]", String::new()),
        ("messageboard", String::new()),
        ("nieuwetijd", String::new()),
        ("session_id", session_id.to_string()),
        ("submittype", "2".to_string()),
        ("veranderdag", String::new()),
        ("what", "-1".to_string()),
        ("who", "-1".to_string()),
    ];
    for (key, value) in fields {
        match form.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.clone(),
            None => form.push((*key, value.clone())),
        }
    }
    form
}
