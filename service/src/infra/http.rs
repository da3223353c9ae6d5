//! HTTP [`Transport`] shared by remote clients.

use std::{future::Future, time::Duration};

use derive_more::{Display, Error as StdError, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;
use url::Url;

use crate::domain::user::session::AccessToken;

/// Transport sending [`Request`]s to a remote HTTP API.
pub trait Transport {
    /// Sends the provided [`Request`] and returns its [`Response`].
    ///
    /// Non-2xx statuses are not errors on this level.
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, Traced<Error>>>;
}

/// HTTP method of a [`Request`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Method {
    /// `GET` method.
    #[display("GET")]
    Get,

    /// `POST` method.
    #[display("POST")]
    Post,

    /// `DELETE` method.
    #[display("DELETE")]
    Delete,
}

/// HTTP request to a remote API.
#[derive(Clone, Debug)]
pub struct Request {
    /// [`Method`] of this [`Request`].
    pub method: Method,

    /// Path relative to the API base URL, like `/items/properties`.
    pub path: String,

    /// Query parameters of this [`Request`].
    pub query: Vec<(&'static str, String)>,

    /// [`AccessToken`] to authorize this [`Request`] with.
    pub bearer: Option<SecretBox<AccessToken>>,

    /// JSON body of this [`Request`].
    pub body: Option<serde_json::Value>,
}

impl Request {
    /// Creates a new [`Request`] without parameters.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    /// Adds the provided query parameters to this [`Request`].
    #[must_use]
    pub fn query(
        mut self,
        params: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Self {
        self.query.extend(params);
        self
    }

    /// Sets the JSON body of this [`Request`].
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the value of the first query parameter with the provided
    /// `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find_map(|(k, v)| (*k == name).then_some(v.as_str()))
    }
}

/// HTTP response of a remote API.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,

    /// JSON body, or [`serde_json::Value::Null`] if there is none.
    pub body: serde_json::Value,
}

impl Response {
    /// Indicates whether this [`Response`] has a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// [`Transport`] backed by [`reqwest`].
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    client: reqwest::Client,

    /// Base URL every [`Request::path`] is relative to.
    base: Url,
}

impl Http {
    /// Creates a new [`Http`] transport for the API at the provided `base`
    /// URL.
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, Traced<Error>> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self { client, base })
    }

    /// Returns the base URL of this [`Http`] transport.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the full [`Url`] of the provided [`Request`].
    fn url(&self, request: &Request) -> Result<Url, Error> {
        let mut url = Url::parse(&format!(
            "{}{}",
            self.base.as_str().trim_end_matches('/'),
            request.path,
        ))?;
        if !request.query.is_empty() {
            _ = url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl Transport for Http {
    async fn send(&self, request: Request) -> Result<Response, Traced<Error>> {
        let url = self.url(&request).map_err(tracerr::wrap!())?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };
        tracing::debug!(%method, path = %request.path, "sending request");

        let mut builder = self.client.request(method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose_secret().as_ref());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::debug!(status, "response body is not JSON: {e}");
                serde_json::Value::Null
            })
        };
        Ok(Response { status, body })
    }
}

/// [`Transport`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`reqwest`] failed to perform a request.
    #[display("HTTP request failed: {_0}")]
    Request(reqwest::Error),

    /// [`Request`] URL is invalid.
    #[display("Invalid request URL: {_0}")]
    Url(url::ParseError),
}


#[cfg(test)]
mod spec {
    use std::time::Duration;

    use url::Url;

    use super::{Http, Method, Request};

    #[test]
    fn joins_base_url_and_path() {
        let http = Http::new(
            Url::parse("https://cms.example.com/").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        let req = Request::new(Method::Get, "/items/properties").query([
            ("fields", "id,name".to_owned()),
            ("page", "1".to_owned()),
        ]);

        assert_eq!(
            http.url(&req).unwrap().as_str(),
            "https://cms.example.com/items/properties?fields=id%2Cname&page=1",
        );
        assert_eq!(req.param("page"), Some("1"));
        assert_eq!(req.param("limit"), None);
    }
}
