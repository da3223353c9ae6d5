//! Team [`Member`] queries definitions.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        team::{self, Member},
        Language,
    },
    infra::{cms, Cms},
    read::team::Profile,
    Service,
};

use super::Query;

/// Queries [`Profile`]s of all the team [`Member`]s, in their display order.
#[derive(Clone, Debug, Default)]
pub struct List {
    /// [`Language`] to show the [`Profile`]s in.
    ///
    /// [`Config::default_language`] is used if [`None`].
    ///
    /// [`Config::default_language`]: crate::Config::default_language
    pub language: Option<Language>,
}

impl<C, M> Query<List> for Service<C, M>
where
    C: Cms<
        Select<By<Vec<Member>, ()>>,
        Ok = Vec<Member>,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = Vec<Profile>;
    type Err = Traced<cms::Error>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        let lang = query
            .language
            .unwrap_or_else(|| self.config().default_language.clone());
        let members = self
            .cms()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(members.iter().map(|m| Profile::adapt(m, &lang)).collect())
    }
}

/// Queries a [`Profile`] of a team [`Member`] by its [`team::Id`].
#[derive(Clone, Debug)]
pub struct ById {
    /// [`team::Id`] of the [`Member`].
    pub id: team::Id,

    /// [`Language`] to show the [`Profile`] in.
    pub language: Option<Language>,
}

impl<C, M> Query<ById> for Service<C, M>
where
    C: Cms<
        Select<By<Option<Member>, team::Id>>,
        Ok = Option<Member>,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = Option<Profile>;
    type Err = Traced<cms::Error>;

    async fn execute(&self, query: ById) -> Result<Self::Ok, Self::Err> {
        let lang = query
            .language
            .unwrap_or_else(|| self.config().default_language.clone());
        let member = self
            .cms()
            .execute(Select(By::new(query.id)))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(member.map(|m| Profile::adapt(&m, &lang)))
    }
}
