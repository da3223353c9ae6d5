//! [`Command`] for deleting a saved property.

use common::operations::Delete;
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

/// [`Command`] for deleting a property saved by a [`User`].
///
/// Deleting a property that isn't saved succeeds without changes.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct DeleteSavedProperty {
    /// [`AccessToken`] of the [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub token: SecretBox<AccessToken>,

    /// [`SavedPropertyLink`] to delete.
    pub link: SavedPropertyLink,
}

impl<C, M> Command<DeleteSavedProperty> for Service<C, M>
where
    C: Cms<
        Authorized<Delete<SavedPropertyLink>>,
        Ok = (),
        Err = Traced<cms::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteSavedProperty { token, link }: DeleteSavedProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.cms()
            .execute(Authorized {
                token,
                op: Delete(link),
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteSavedProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),
}

#[cfg(test)]
mod spec {
    use std::cell::{Cell, RefCell};

    use common::operations::{By, Delete, Insert, Select};
    use tracerr::Traced;
    use uuid::Uuid;

    use crate::{
        command::SaveProperty,
        domain::{
            listing,
            user::{self, session::AccessToken},
            SavedPropertyLink,
        },
        infra::{
            cms::{self, Authorized},
            Cms,
        },
        query::{listings::spec::config, saved_properties::Ids},
        read::SavedSet,
        Command as _, Query as _, Service,
    };

    use super::DeleteSavedProperty;

    /// In-memory [`Cms`] of saved properties.
    #[derive(Default)]
    struct Saved {
        set: RefCell<SavedSet>,
        inserts: Cell<usize>,
        deletes: Cell<usize>,
    }

    impl Cms<Authorized<Insert<SavedPropertyLink>>> for Saved {
        type Ok = ();
        type Err = Traced<cms::Error>;

        async fn execute(
            &self,
            op: Authorized<Insert<SavedPropertyLink>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.inserts.set(self.inserts.get() + 1);
            if self.set.borrow_mut().insert(op.op.0.property_id) {
                Ok(())
            } else {
                Err(tracerr::new!(cms::Error::Remote(cms::RemoteFetchError {
                    status: 400,
                    code: Some("RECORD_NOT_UNIQUE".into()),
                    message: "Value has to be unique".into(),
                })))
            }
        }
    }

    impl Cms<Authorized<Delete<SavedPropertyLink>>> for Saved {
        type Ok = ();
        type Err = Traced<cms::Error>;

        async fn execute(
            &self,
            op: Authorized<Delete<SavedPropertyLink>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.deletes.set(self.deletes.get() + 1);
            _ = self.set.borrow_mut().remove(op.op.0.property_id);
            Ok(())
        }
    }

    impl Cms<Authorized<Select<By<SavedSet, user::Id>>>> for Saved {
        type Ok = SavedSet;
        type Err = Traced<cms::Error>;

        async fn execute(
            &self,
            _: Authorized<Select<By<SavedSet, user::Id>>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.set.borrow().clone())
        }
    }

    #[tokio::test]
    async fn save_then_delete_restores_saved_set() {
        let saved = Saved::default();
        _ = saved.set.borrow_mut().insert(listing::Id::from(1));
        let service = Service::new(config(), saved, ());

        let user_id = user::Id::from(Uuid::from_u128(5));
        let token = || AccessToken::secret("user-token").unwrap();
        let link = SavedPropertyLink {
            user_id,
            property_id: listing::Id::from(2),
        };
        let ids = || Ids {
            token: token(),
            user_id,
        };
        let before = service.execute(ids()).await.unwrap();

        service
            .execute(SaveProperty {
                token: token(),
                link,
            })
            .await
            .unwrap();
        assert!(service.execute(ids()).await.unwrap().contains(link.property_id));

        service
            .execute(DeleteSavedProperty {
                token: token(),
                link,
            })
            .await
            .unwrap();

        assert_eq!(service.execute(ids()).await.unwrap(), before);
        assert_eq!(service.cms().inserts.get(), 1);
        assert_eq!(service.cms().deletes.get(), 1);
    }

    #[tokio::test]
    async fn delete_after_repeated_save_unsaves() {
        let saved = Saved::default();
        _ = saved.set.borrow_mut().insert(listing::Id::from(2));
        let service = Service::new(config(), saved, ());

        let user_id = user::Id::from(Uuid::from_u128(5));
        let token = || AccessToken::secret("user-token").unwrap();
        let link = SavedPropertyLink {
            user_id,
            property_id: listing::Id::from(2),
        };

        service
            .execute(SaveProperty {
                token: token(),
                link,
            })
            .await
            .unwrap();
        service
            .execute(DeleteSavedProperty {
                token: token(),
                link,
            })
            .await
            .unwrap();

        let ids = service
            .execute(Ids {
                token: token(),
                user_id,
            })
            .await
            .unwrap();
        assert!(!ids.contains(link.property_id));
    }
}
