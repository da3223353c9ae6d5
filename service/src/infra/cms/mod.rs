//! [`Cms`]-related definitions.

#[cfg(feature = "directus")]
pub mod directus;
pub mod predicate;
pub mod query;

use derive_more::{Display, Error as StdError, From};
use secrecy::SecretBox;

use crate::{domain::user::session::AccessToken, infra::http};

#[cfg(feature = "directus")]
pub use self::directus::Directus;
pub use self::{
    predicate::Predicate,
    query::{Collection, CollectionQuery},
};

/// Operation of a headless content management system.
pub use common::Handler as Cms;

/// [`Cms`] operation performed on behalf of a user.
#[derive(Clone, Debug)]
pub struct Authorized<T> {
    /// [`AccessToken`] of the user.
    pub token: SecretBox<AccessToken>,

    /// Operation to perform.
    pub op: T,
}

/// [`Cms`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`http::Transport`] failed to deliver a request.
    #[display("Transport failed: {_0}")]
    Transport(http::Error),

    /// Remote side responded with an error.
    #[display("{_0}")]
    Remote(RemoteFetchError),

    /// Remote side responded with an unexpected payload.
    #[display("{_0}")]
    Malformed(MalformedRecord),

    /// Session has expired and cannot be refreshed anymore.
    #[display("Session has expired")]
    #[from(ignore)]
    SessionExpired,
}

impl Error {
    /// Returns the [`RemoteFetchError`], if this [`Error`] is one.
    #[must_use]
    pub fn remote(&self) -> Option<&RemoteFetchError> {
        match self {
            Self::Remote(e) => Some(e),
            Self::Transport(_) | Self::Malformed(_) | Self::SessionExpired => {
                None
            }
        }
    }

    /// Checks whether this [`Error`] carries the provided error `code`.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.remote()
            .and_then(|e| e.code.as_deref())
            .is_some_and(|c| c == code)
    }
}

/// Non-2xx response of the remote side.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
#[display("Remote responded with `{status}`: {message}")]
pub struct RemoteFetchError {
    /// HTTP status code.
    pub status: u16,

    /// Machine-readable error code, like `RECORD_NOT_UNIQUE`.
    pub code: Option<String>,

    /// Human-readable error message.
    pub message: String,
}

impl RemoteFetchError {
    /// Creates a new [`RemoteFetchError`] from the provided error response
    /// `body`.
    ///
    /// Directus reports errors as `{"errors": [{"message", "extensions":
    /// {"code"}}]}`.
    #[must_use]
    pub fn from_body(status: u16, body: &serde_json::Value) -> Self {
        let first = body.pointer("/errors/0");
        let message = first
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| format!("HTTP status {status}"), ToOwned::to_owned);
        let code = first
            .and_then(|e| e.pointer("/extensions/code"))
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
        Self {
            status,
            code,
            message,
        }
    }
}

/// Record that cannot be narrowed into a domain type.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
#[display("Malformed `{collection}` record: {reason}")]
pub struct MalformedRecord {
    /// Collection of the record.
    pub collection: &'static str,

    /// Reason of the failure.
    pub reason: String,
}

impl MalformedRecord {
    /// Creates a new [`MalformedRecord`].
    #[must_use]
    pub fn new(collection: &'static str, reason: impl ToString) -> Self {
        Self {
            collection,
            reason: reason.to_string(),
        }
    }
}
