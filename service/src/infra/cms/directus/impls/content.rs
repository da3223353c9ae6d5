//! [`Cms`] implementations of the content sections: news, team and
//! Club Diamondz.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{club, news, team},
    infra::{
        cms::{
            self,
            query::{Limit, Sort},
            CollectionQuery,
        },
        http::Transport,
        Cms,
    },
    read,
};

use super::{
    super::{schema, Directus},
    narrow,
};

impl<T: Transport>
    Cms<Select<By<read::news::list::Page, read::news::list::Arguments>>>
    for Directus<T>
{
    type Ok = read::news::list::Page;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::news::list::Page, read::news::list::Arguments>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let query = CollectionQuery::new(schema::ARTICLE_FIELDS)
            .sort([Sort::Desc("date_published"), Sort::Desc("id")]);
        self.fetch_page::<schema::Article, _>(
            schema::NEWS,
            query,
            by.into_inner(),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Select<By<Option<news::Article>, news::Id>>>
    for Directus<T>
{
    type Ok = Option<news::Article>;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<news::Article>, news::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.fetch_item::<schema::Article>(
            schema::NEWS,
            by.into_inner(),
            schema::ARTICLE_FIELDS,
        )
        .await
        .map_err(tracerr::wrap!())?
        .map(news::Article::try_from)
        .transpose()
        .map_err(tracerr::from_and_wrap!(=> cms::Error))
    }
}

impl<T: Transport> Cms<Select<By<Vec<team::Member>, ()>>> for Directus<T> {
    type Ok = Vec<team::Member>;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<team::Member>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let query = CollectionQuery::new(schema::MEMBER_FIELDS)
            .sort([Sort::Asc("sort"), Sort::Asc("id")])
            .limit(Limit::All);
        let collection = self
            .fetch_collection::<schema::Member>(schema::TEAM, &query)
            .await
            .map_err(tracerr::wrap!())?;
        narrow(collection.data).map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Select<By<Option<team::Member>, team::Id>>>
    for Directus<T>
{
    type Ok = Option<team::Member>;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<team::Member>, team::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.fetch_item::<schema::Member>(
            schema::TEAM,
            by.into_inner(),
            schema::MEMBER_FIELDS,
        )
        .await
        .map_err(tracerr::wrap!())?
        .map(team::Member::try_from)
        .transpose()
        .map_err(tracerr::from_and_wrap!(=> cms::Error))
    }
}

impl<T: Transport>
    Cms<Select<By<read::club::list::Page, read::club::list::Arguments>>>
    for Directus<T>
{
    type Ok = read::club::list::Page;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::club::list::Page, read::club::list::Arguments>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let query = CollectionQuery::new(schema::OFFER_FIELDS)
            .sort([Sort::Asc("id")]);
        self.fetch_page::<schema::Offer, club::Offer>(
            schema::CLUB_DIAMONDZ,
            query,
            by.into_inner(),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}
