//! [`User`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// Registered user of the website.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct User {
    /// Unique identifier of this `User`.
    pub id: Id,

    /// First name of this `User`.
    pub first_name: Option<String>,

    /// Last name of this `User`.
    pub last_name: Option<String>,

    /// Email of this `User`.
    pub email: Option<Email>,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        let domain::User {
            id,
            first_name,
            last_name,
            email,
        } = user;
        Self {
            id: id.into(),
            first_name,
            last_name,
            email: email.map(Into::into),
        }
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(Uuid);

/// Email of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserEmail",
    with = scalar::Via::<domain::user::Email>,
)]
pub struct Email(domain::user::Email);

/// Password of a `User`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserPassword",
    with = scalar::Via::<domain::user::Password>,
)]
pub struct Password(domain::user::Password);

/// Phone number.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "Phone", with = scalar::Via::<domain::user::Phone>)]
pub struct Phone(domain::user::Phone);

pub mod session {
    //! [`Session`]-related definitions.
    //!
    //! [`Session`]: crate::Session

    use juniper::GraphQLObject;
    use secrecy::ExposeSecret as _;
    use service::{command, domain::user::Tokens};

    use crate::{api, Context};

    /// Bearer tokens of a `User` session.
    #[derive(Clone, Debug, GraphQLObject)]
    #[graphql(name = "SessionTokens", context = Context)]
    pub struct SessionTokens {
        /// Short-living token to put into the `Authorization: Bearer`
        /// header.
        pub access_token: String,

        /// Long-living token to exchange for new `SessionTokens`, if any.
        pub refresh_token: Option<String>,

        /// Lifetime of the `accessToken` in seconds, if known.
        pub expires_in: Option<i32>,
    }

    impl From<Tokens> for SessionTokens {
        fn from(tokens: Tokens) -> Self {
            Self {
                access_token: tokens.access.expose_secret().as_ref().to_owned(),
                refresh_token: tokens
                    .refresh
                    .map(|t| t.expose_secret().as_ref().to_owned()),
                expires_in: tokens
                    .expires_in
                    .map(|d| i32::try_from(d.as_secs()).unwrap_or(i32::MAX)),
            }
        }
    }

    /// Result of a `User` session creation.
    #[derive(Clone, Debug, GraphQLObject)]
    #[graphql(name = "CreateSessionResult", context = Context)]
    pub struct CreateResult {
        /// Tokens of the created session.
        pub tokens: SessionTokens,

        /// `User` the session has been created for.
        pub user: api::User,
    }

    impl From<command::create_session::Output> for CreateResult {
        fn from(output: command::create_session::Output) -> Self {
            let command::create_session::Output { tokens, user } = output;
            Self {
                tokens: tokens.into(),
                user: user.into(),
            }
        }
    }
}
