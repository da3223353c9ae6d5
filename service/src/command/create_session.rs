//! [`Command`] for creating a session.

use common::operations::{By, Perform, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        user::{Credentials, Tokens},
        User,
    },
    infra::{
        cms::{self, Authorized},
        Cms,
    },
    Service,
};

use super::Command;

/// [`Command`] for signing a [`User`] into the CMS with their
/// [`Credentials`].
#[derive(Clone, Debug)]
pub struct CreateSession {
    /// [`Credentials`] of the [`User`].
    pub credentials: Credentials,
}

/// Output of [`CreateSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Tokens`] of the created session.
    pub tokens: Tokens,

    /// [`User`] whose session has been created.
    pub user: User,
}

impl<C, M> Command<CreateSession> for Service<C, M>
where
    C: Cms<Perform<Credentials>, Ok = Tokens, Err = Traced<cms::Error>>
        + Cms<
            Authorized<Select<By<User, ()>>>,
            Ok = User,
            Err = Traced<cms::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tokens = match self.cms().execute(Perform(cmd.credentials)).await {
            Ok(tokens) => tokens,
            Err(e) if rejects_credentials(e.as_ref()) => {
                return Err(tracerr::new!(E::WrongCredentials));
            }
            Err(e) => return Err(e).map_err(tracerr::map_from_and_wrap!(=> E)),
        };

        let user = self
            .cms()
            .execute(Authorized {
                token: tokens.access.clone(),
                op: Select(By::new(())),
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output { tokens, user })
    }
}

/// Checks whether the provided [`cms::Error`] means the [`Credentials`] are
/// wrong.
fn rejects_credentials(e: &cms::Error) -> bool {
    e.has_code("INVALID_CREDENTIALS")
        || e.remote().is_some_and(|r| r.status == 401)
}

/// Error of [`CreateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),

    /// [`CreateSession`] contains wrong [`Credentials`].
    #[display("Wrong `User` credentials")]
    WrongCredentials,
}

#[cfg(test)]
mod spec {
    use secrecy::{ExposeSecret as _, SecretBox};
    use serde_json::json;

    use crate::{
        domain::user::{Credentials, Email, Password},
        infra::http::mock::{bearer, respond, Scripted},
        query::listings::spec::service,
        Command as _,
    };

    use super::{CreateSession, ExecutionError};

    fn sign_in() -> CreateSession {
        CreateSession {
            credentials: Credentials {
                email: Email::new("buyer@example.com").unwrap(),
                password: SecretBox::new(Box::new(
                    Password::new("correct horse").unwrap(),
                )),
            },
        }
    }

    #[tokio::test]
    async fn signs_in_and_fetches_user() {
        let transport = Scripted::new(|req| match req.path.as_str() {
            "/auth/login" => respond(
                200,
                json!({ "data": {
                    "access_token": "access",
                    "refresh_token": "refresh",
                    "expires": 900_000,
                } }),
            ),
            _ => respond(
                200,
                json!({ "data": {
                    "id": "00000000-0000-0000-0000-000000000001",
                    "first_name": "Ada",
                    "email": "buyer@example.com",
                } }),
            ),
        });
        let service = service(transport.clone());

        let out = service.execute(sign_in()).await.unwrap();

        assert_eq!(out.user.first_name.as_deref(), Some("Ada"));
        assert_eq!(
            AsRef::<str>::as_ref(out.tokens.access.expose_secret()),
            "access",
        );
        let requests = transport.requests();
        assert_eq!(requests[1].path, "/users/me");
        assert_eq!(bearer(&requests[1]).as_deref(), Some("access"));
    }

    #[tokio::test]
    async fn rejects_wrong_credentials() {
        let transport = Scripted::new(|_| {
            respond(
                401,
                json!({ "errors": [{
                    "message": "Invalid user credentials.",
                    "extensions": { "code": "INVALID_CREDENTIALS" },
                }] }),
            )
        });
        let service = service(transport.clone());

        let err = service.execute(sign_in()).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
        assert_eq!(transport.requests().len(), 1);
    }
}
