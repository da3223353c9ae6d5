//! [`Error`]-related definitions.

use std::fmt;

use axum_extra::typed_header::TypedHeaderRejection;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use service::infra::{cms, maps};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// GraphQL API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let mut ext = juniper::Object::with_capacity(1);
        drop(
            ext.add_field("code", juniper::Value::scalar(self.code.to_owned())),
        );
        drop(
            ext.add_field(
                "backtrace",
                juniper::Value::list(
                    self.backtrace
                        .iter()
                        .flat_map(|trace| trace.iter())
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            ),
        );
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for TypedHeaderRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "BAD_REQUEST",
            status_code: http::StatusCode::BAD_REQUEST,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for cms::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "SESSION_EXPIRED"]
                #[status = UNAUTHORIZED]
                #[message = "Session has expired, sign in again"]
                SessionExpired,

                #[code = "CMS_UNAVAILABLE"]
                #[status = BAD_GATEWAY]
                #[message = "Content is temporarily unavailable"]
                Unavailable,
            }
        }

        match self {
            Self::SessionExpired => Some(Error::SessionExpired.into()),
            Self::Transport(_) => Some(Error::Unavailable.into()),
            Self::Remote(e) if e.status >= 500 => {
                Some(Error::Unavailable.into())
            }
            Self::Remote(_) | Self::Malformed(_) => None,
        }
    }
}

impl AsError for maps::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Provider(e) => Some(Error {
                code: "MAPS_PROVIDER_FAILED",
                status_code: http::StatusCode::BAD_GATEWAY,
                message: e.to_string(),
                backtrace: None,
            }),
            Self::Transport(_) => Some(Error {
                code: "MAPS_UNAVAILABLE",
                status_code: http::StatusCode::BAD_GATEWAY,
                message: "Maps are temporarily unavailable".to_owned(),
                backtrace: None,
            }),
            Self::Malformed(_) => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::infra::{
        cms::{self, RemoteFetchError},
        maps::{self, ProviderError},
    };

    use super::AsError as _;

    #[test]
    fn expired_session_has_own_code() {
        let e = cms::Error::SessionExpired.as_error();

        assert_eq!(e.code, "SESSION_EXPIRED");
        assert_eq!(e.status_code, http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unexpected_cms_errors_are_internal() {
        let e = cms::Error::Remote(RemoteFetchError {
            status: 400,
            code: Some("INVALID_QUERY".into()),
            message: "bad filter".into(),
        })
        .as_error();
        assert_eq!(e.code, "INTERNAL_SERVER_ERROR");

        let e = cms::Error::Remote(RemoteFetchError {
            status: 503,
            code: None,
            message: "maintenance".into(),
        })
        .as_error();
        assert_eq!(e.code, "CMS_UNAVAILABLE");
    }

    #[test]
    fn names_maps_provider_status() {
        let e = maps::Error::Provider(ProviderError {
            status: "ZERO_RESULTS".into(),
            message: "no route".into(),
        })
        .as_error();

        assert_eq!(e.code, "MAPS_PROVIDER_FAILED");
        assert!(e.message.contains("ZERO_RESULTS"), "{}", e.message);
    }
}
