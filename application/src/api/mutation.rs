//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use secrecy::SecretBox;
use service::{
    command,
    domain::{
        enquiry::{self, Enquiry},
        user::{session::RefreshToken, Credentials},
        SavedPropertyLink,
    },
    Command as _,
};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Signs the `User` in with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_session(
        email: api::user::Email,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateSession {
                credentials: Credentials {
                    email: email.into(),
                    password: SecretBox::init_with(move || password.into()),
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            token: output.tokens.access.clone(),
            user: output.user.clone(),
        })
        .await;

        Ok(output.into())
    }

    /// Exchanges the provided refresh token for new `SessionTokens`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SESSION_EXPIRED` - the refresh token is expired or revoked.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "refreshSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn refresh_session(
        refresh_token: String,
        ctx: &Context,
    ) -> Result<api::user::session::SessionTokens, Error> {
        let token = refresh_token_secret(refresh_token).map_err(ctx.error())?;

        ctx.service()
            .execute(command::RefreshSession { token })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Signs the `User` out, revoking the provided refresh token.
    ///
    /// Always returns `true` on success.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_session(
        refresh_token: String,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let token = refresh_token_secret(refresh_token).map_err(ctx.error())?;

        ctx.service()
            .execute(command::DeleteSession { token })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Saves the `Listing` to the current `User`'s favorites.
    ///
    /// Saving an already saved `Listing` is a no-op, so a single
    /// `deleteSavedProperty` afterwards removes it from the favorites anyway.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `SESSION_EXPIRED` - the access token has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "saveProperty",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn save_property(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let session = ctx.current_session().await?;

        ctx.service()
            .execute(command::SaveProperty {
                token: session.token,
                link: SavedPropertyLink {
                    user_id: session.user.id,
                    property_id: listing_id.into(),
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Removes the `Listing` from the current `User`'s favorites.
    ///
    /// Removing a `Listing` that isn't saved is a no-op.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `SESSION_EXPIRED` - the access token has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteSavedProperty",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_saved_property(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let session = ctx.current_session().await?;

        ctx.service()
            .execute(command::DeleteSavedProperty {
                token: session.token,
                link: SavedPropertyLink {
                    user_id: session.user.id,
                    property_id: listing_id.into(),
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Submits a contact form enquiry, optionally about a `Listing`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_NAME` - the name is blank or too long;
    /// - `INVALID_MESSAGE` - the message is blank or too long.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "submitEnquiry",
            listing_id = ?listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn submit_enquiry(
        name: String,
        email: api::user::Email,
        phone: Option<api::user::Phone>,
        message: String,
        listing_id: Option<api::listing::Id>,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let enquiry = enquiry_of(name, email, phone, message, listing_id)
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::SubmitEnquiry(enquiry))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }
}

/// Wraps the raw `token` into a secret [`RefreshToken`].
fn refresh_token_secret(
    token: String,
) -> Result<SecretBox<RefreshToken>, Error> {
    define_error! {
        enum Error {
            #[code = "SESSION_EXPIRED"]
            #[status = UNAUTHORIZED]
            #[message = "Session has expired, please sign in again"]
            SessionExpired,
        }
    }

    RefreshToken::secret(token).ok_or_else(|| Error::SessionExpired.into())
}

/// Validates the contact form input into an [`Enquiry`].
fn enquiry_of(
    name: String,
    email: api::user::Email,
    phone: Option<api::user::Phone>,
    message: String,
    listing_id: Option<api::listing::Id>,
) -> Result<Enquiry, Error> {
    define_error! {
        enum Error {
            #[code = "INVALID_NAME"]
            #[status = BAD_REQUEST]
            #[message = "Name must be non-blank and at most 256 bytes long"]
            InvalidName,

            #[code = "INVALID_MESSAGE"]
            #[status = BAD_REQUEST]
            #[message = "Message must be non-blank and at most 5000 \
                         bytes long"]
            InvalidMessage,
        }
    }

    Ok(Enquiry {
        name: enquiry::Name::new(name.trim()).ok_or(Error::InvalidName)?,
        email: email.into(),
        phone: phone.map(Into::into),
        message: enquiry::Message::new(message).ok_or(Error::InvalidMessage)?,
        property_id: listing_id.map(Into::into),
    })
}

impl AsError for command::create_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any `User`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Cms(e) => e.try_as_error(),
            Self::WrongCredentials => Some(Error::WrongCredentials.into()),
        }
    }
}

impl AsError for command::refresh_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Cms(e) => e.try_as_error(),
            Self::SessionExpired => {
                service::infra::cms::Error::SessionExpired.try_as_error()
            }
        }
    }
}

impl AsError for command::delete_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Cms(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::save_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Cms(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_saved_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Cms(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::submit_enquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Cms(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{command, domain::user};

    use crate::{api, AsError as _};

    use super::{enquiry_of, refresh_token_secret};

    fn email() -> api::user::Email {
        user::Email::new("buyer@example.com").unwrap().into()
    }

    #[test]
    fn validates_enquiry() {
        let enquiry = enquiry_of(
            "Jane".into(),
            email(),
            None,
            "Is it still available?".into(),
            Some(api::listing::Id::from(service::domain::listing::Id::from(
                42,
            ))),
        )
        .unwrap();
        assert_eq!(enquiry.name.as_ref(), "Jane");
        assert_eq!(enquiry.property_id.map(u64::from), Some(42));

        let err = enquiry_of("  ".into(), email(), None, "Hi".into(), None)
            .unwrap_err();
        assert_eq!(err.code, "INVALID_NAME");

        let err =
            enquiry_of("Jane".into(), email(), None, String::new(), None)
                .unwrap_err();
        assert_eq!(err.code, "INVALID_MESSAGE");
    }

    #[test]
    fn rejects_empty_refresh_token() {
        let err = refresh_token_secret(String::new()).unwrap_err();
        assert_eq!(err.code, "SESSION_EXPIRED");
        assert_eq!(err.status_code, http::StatusCode::UNAUTHORIZED);

        assert!(refresh_token_secret("token".into()).is_ok());
    }

    #[test]
    fn maps_command_errors_to_codes() {
        let e = command::create_session::ExecutionError::WrongCredentials;
        assert_eq!(e.as_error().code, "WRONG_CREDENTIALS");

        let e = command::refresh_session::ExecutionError::SessionExpired;
        assert_eq!(e.as_error().code, "SESSION_EXPIRED");
    }
}
