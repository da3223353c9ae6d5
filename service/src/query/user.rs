//! [`User`] queries definitions.

use common::operations::{By, Select};
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, session::AccessToken},
        User,
    },
    infra::{
        cms::{self, Authorized},
        Cms,
    },
    Service,
};

use super::{CmsQuery, Query};

/// Queries a [`User`] by its [`user::Id`].
pub type ById = CmsQuery<By<Option<User>, user::Id>>;

/// Queries the [`User`] owning the provided [`AccessToken`].
#[derive(Clone, Debug)]
pub struct Me {
    /// [`AccessToken`] of the [`User`].
    pub token: SecretBox<AccessToken>,
}

impl<C, M> Query<Me> for Service<C, M>
where
    C: Cms<
        Authorized<Select<By<User, ()>>>,
        Ok = User,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = User;
    type Err = Traced<cms::Error>;

    async fn execute(&self, Me { token }: Me) -> Result<Self::Ok, Self::Err> {
        self.cms()
            .execute(Authorized {
                token,
                op: Select(By::new(())),
            })
            .await
            .map_err(tracerr::wrap!())
    }
}
