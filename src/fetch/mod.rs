use reqwest::{Client, Error as RequestError};
use tracing::{instrument, Level};
use url::Url;

/// What the client needs from an HTTP response: where the redirects ended,
/// the status, and the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub url: Url,
    pub status: u16,
    pub body: String,
}

pub type Form = Vec<(&'static str, String)>;

/// HTTP collaborator. Redirects must be followed and the final URL reported
/// in [`Response::url`]; the session lives in the URL, not in cookies.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: Url) -> Result<Response, RequestError>;
    async fn post(&self, url: Url, form: &Form) -> Result<Response, RequestError>;
}

pub fn make_client() -> Client {
    Client::builder()
        .gzip(true)
        .build()
        .expect("client creation should succeed")
}

#[derive(Debug, Clone)]
pub struct HttpTransport(Client);

impl HttpTransport {
    pub const fn new(client: Client) -> Self {
        Self(client)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self(make_client())
    }
}

async fn into_response(res: reqwest::Response) -> Result<Response, RequestError> {
    let url = res.url().clone();
    let status = res.status().as_u16();
    let start = std::time::Instant::now();
    let body = res.text().await?;
    log::trace!("Got body of {url} in \t {:?}", start.elapsed());
    Ok(Response { url, status, body })
}

impl Transport for HttpTransport {
    #[instrument(skip(self, url), fields(path = %url.path()), level = Level::TRACE)]
    async fn get(&self, url: Url) -> Result<Response, RequestError> {
        let res = self.0.get(url).send().await?;
        into_response(res).await
    }

    #[instrument(skip(self, url, form), fields(path = %url.path()), level = Level::TRACE)]
    async fn post(&self, url: Url, form: &Form) -> Result<Response, RequestError> {
        let res = self.0.post(url).form(form).send().await?;
        into_response(res).await
    }
}

/// Appends `pairs` to the query string of `url`.
pub fn with_query(mut url: Url, pairs: &[(&str, &str)]) -> Url {
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
    url
}

/// Value of the first `key` parameter in the query string of `url`.
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query() {
        let url: Url = "https://www.eetlijst.nl/login.php".parse().unwrap();
        let url = with_query(url, &[("login", "test"), ("pass", "a b&c")]);
        assert_eq!(
            url.as_str(),
            "https://www.eetlijst.nl/login.php?login=test&pass=a+b%26c"
        );
    }

    #[test]
    fn test_query_param() {
        let url: Url = "https://www.eetlijst.nl/main.php?session_id=bc731753a2d0fecccf12518759108b5b"
            .parse()
            .unwrap();
        assert_eq!(
            query_param(&url, "session_id").as_deref(),
            Some("bc731753a2d0fecccf12518759108b5b")
        );
        assert_eq!(query_param(&url, "r"), None);
    }

    #[tokio::test]
    #[ignore = "talks to the live site"]
    async fn test_fetch_login_page() {
        let transport = HttpTransport::default();
        let url: Url = "https://www.eetlijst.nl/login.php".parse().unwrap();
        let page = transport.get(url).await.unwrap();
        assert_eq!(page.status, 200);
    }
}
