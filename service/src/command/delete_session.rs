//! [`Command`] for deleting a session.

use common::operations::Delete;
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::user::session::RefreshToken,
    infra::{cms, Cms},
    Service,
};

use super::Command;

/// [`Command`] for signing out by revoking a [`RefreshToken`].
#[derive(Clone, Debug)]
pub struct DeleteSession {
    /// [`RefreshToken`] of the session.
    pub token: SecretBox<RefreshToken>,
}

impl<C, M> Command<DeleteSession> for Service<C, M>
where
    C: Cms<Delete<SecretBox<RefreshToken>>, Ok = (), Err = Traced<cms::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteSession) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.cms()
            .execute(Delete(cmd.token))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),
}
