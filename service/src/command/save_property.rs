//! [`Command`] for saving a property.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::{user::session::AccessToken, SavedPropertyLink},
    infra::{
        cms::{self, Authorized},
        Cms,
    },
    Service,
};

use super::Command;

/// [`Command`] for saving a property for a [`User`].
///
/// Saving an already saved property succeeds without changes. Saved
/// properties form a set rather than a counter, so a single
/// [`DeleteSavedProperty`] afterwards unsaves it regardless of how many times
/// it has been saved.
///
/// [`DeleteSavedProperty`]: crate::command::DeleteSavedProperty
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct SaveProperty {
    /// [`AccessToken`] of the [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub token: SecretBox<AccessToken>,

    /// [`SavedPropertyLink`] to create.
    pub link: SavedPropertyLink,
}

impl<C, M> Command<SaveProperty> for Service<C, M>
where
    C: Cms<
        Authorized<Insert<SavedPropertyLink>>,
        Ok = (),
        Err = Traced<cms::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SaveProperty) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveProperty { token, link } = cmd;
        match self
            .cms()
            .execute(Authorized {
                token,
                op: Insert(link),
            })
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if e.as_ref().has_code("RECORD_NOT_UNIQUE") => {
                tracing::debug!(
                    user_id = %link.user_id,
                    property_id = %link.property_id,
                    "property is saved already",
                );
                Ok(())
            }
            Err(e) => Err(e).map_err(tracerr::map_from_and_wrap!(=> E)),
        }
    }
}

/// Error of [`SaveProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),
}
