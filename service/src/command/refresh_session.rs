//! [`Command`] for refreshing a session.

use common::operations::Perform;
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::user::{session::RefreshToken, Tokens},
    infra::{cms, Cms},
    Service,
};

use super::Command;

/// [`Command`] for exchanging a [`RefreshToken`] for new [`Tokens`].
#[derive(Clone, Debug)]
pub struct RefreshSession {
    /// [`RefreshToken`] of the session.
    pub token: SecretBox<RefreshToken>,
}

impl<C, M> Command<RefreshSession> for Service<C, M>
where
    C: Cms<
        Perform<SecretBox<RefreshToken>>,
        Ok = Tokens,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = Tokens;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RefreshSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        match self.cms().execute(Perform(cmd.token)).await {
            Ok(tokens) => Ok(tokens),
            Err(e) if e.as_ref().remote().is_some_and(|r| r.status == 401) => {
                Err(tracerr::new!(E::SessionExpired))
            }
            Err(e) => Err(e).map_err(tracerr::map_from_and_wrap!(=> E)),
        }
    }
}

/// Error of [`RefreshSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),

    /// [`RefreshToken`] is expired or revoked.
    #[display("Session has expired")]
    SessionExpired,
}

#[cfg(test)]
mod spec {
    use secrecy::ExposeSecret as _;
    use serde_json::json;

    use crate::{
        domain::user::session::RefreshToken,
        infra::http::mock::{respond, Scripted},
        query::listings::spec::service,
        Command as _,
    };

    use super::{ExecutionError, RefreshSession};

    fn refresh() -> RefreshSession {
        RefreshSession {
            token: RefreshToken::secret("refresh").unwrap(),
        }
    }

    #[tokio::test]
    async fn exchanges_refresh_token() {
        let transport = Scripted::new(|_| {
            respond(
                200,
                json!({ "data": {
                    "access_token": "access-2",
                    "refresh_token": "refresh-2",
                } }),
            )
        });
        let service = service(transport.clone());

        let tokens = service.execute(refresh()).await.unwrap();

        let refresh = tokens.refresh.unwrap();
        assert_eq!(AsRef::<str>::as_ref(refresh.expose_secret()), "refresh-2");
        assert_eq!(transport.requests()[0].path, "/auth/refresh");
    }

    #[tokio::test]
    async fn expires_on_rejected_token() {
        let transport = Scripted::new(|_| {
            respond(
                401,
                json!({ "errors": [{
                    "message": "Invalid user credentials.",
                    "extensions": { "code": "INVALID_CREDENTIALS" },
                }] }),
            )
        });
        let service = service(transport);

        let err = service.execute(refresh()).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::SessionExpired));
    }
}
