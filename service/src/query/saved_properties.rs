//! Saved [`Listing`]s queries definitions.

use common::{
    operations::{By, Select},
    pagination::Page,
};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::{
        user::{self, session::AccessToken},
        Language,
    },
    infra::{
        cms::{self, Authorized, Predicate},
        Cms,
    },
    read::{
        listing::{
            list::{self, Search, Section},
            DisplayListing,
        },
        SavedSet,
    },
    Service,
};

use super::{
    listings::{Browse, ExecutionError},
    Query,
};

/// Queries the [`SavedSet`] of a [`User`].
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct Ids {
    /// [`AccessToken`] of the [`User`].
    pub token: SecretBox<AccessToken>,

    /// [`user::Id`] of the [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,
}

impl<C, M> Query<Ids> for Service<C, M>
where
    C: Cms<
        Authorized<Select<By<SavedSet, user::Id>>>,
        Ok = SavedSet,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = SavedSet;
    type Err = Traced<cms::Error>;

    async fn execute(&self, query: Ids) -> Result<Self::Ok, Self::Err> {
        self.cms()
            .execute(Authorized {
                token: query.token,
                op: Select(By::new(query.user_id)),
            })
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries a [`Page`] of [`DisplayListing`]s saved by a [`User`] and matching
/// a [`list::Filter`].
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct ForUser {
    /// [`AccessToken`] of the [`User`].
    pub token: SecretBox<AccessToken>,

    /// [`user::Id`] of the [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`list::Arguments`] of the [`Page`].
    pub arguments: list::Arguments,

    /// [`list::Filter`] narrowing the saved [`DisplayListing`]s.
    pub filter: list::Filter,

    /// [`Language`] to show the [`DisplayListing`]s in.
    pub language: Option<Language>,
}

impl<C, M> Query<ForUser> for Service<C, M>
where
    C: Cms<
            Authorized<Select<By<SavedSet, user::Id>>>,
            Ok = SavedSet,
            Err = Traced<cms::Error>,
        > + Cms<
            Select<By<list::Page, (list::Arguments, Predicate)>>,
            Ok = list::Page,
            Err = Traced<cms::Error>,
        >,
{
    type Ok = Page<DisplayListing>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ForUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ForUser {
            token,
            user_id,
            arguments,
            filter,
            language,
        } = query;

        let saved = self
            .execute(Ids { token, user_id })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.execute(Browse {
            selector: list::Selector {
                arguments,
                filter: Search {
                    section: Section::Saved(saved.into()),
                    filter,
                },
            },
            language,
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
