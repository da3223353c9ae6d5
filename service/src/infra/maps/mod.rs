//! [`Maps`]-related definitions.

#[cfg(feature = "google")]
pub mod google;

use derive_more::{Display, Error as StdError, From};

use crate::infra::http;

#[cfg(feature = "google")]
pub use self::google::Google;

/// Operation of a maps provider: routing and place search.
pub use common::Handler as Maps;

/// [`Maps`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`http::Transport`] failed to deliver a request.
    #[display("Transport failed: {_0}")]
    Transport(http::Error),

    /// Provider refused to answer.
    #[display("{_0}")]
    Provider(ProviderError),

    /// Provider answered with an unexpected payload.
    #[display("Malformed maps response: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),
}

/// Non-`OK` status reported by a maps provider.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
#[display("Maps provider responded with `{status}`: {message}")]
pub struct ProviderError {
    /// Provider status, like `ZERO_RESULTS` or `NOT_FOUND`.
    pub status: String,

    /// Human-readable message.
    pub message: String,
}
