//! [`Listing`]-related [`Cms`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{
        cms::{
            self,
            query::{Limit, Sort},
            CollectionQuery, Predicate,
        },
        http::Transport,
        Cms,
    },
    read::listing::list,
};

use super::{
    super::{schema, Directus},
    narrow,
};

impl<T: Transport> Cms<Select<By<list::Page, (list::Arguments, Predicate)>>>
    for Directus<T>
{
    type Ok = list::Page;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, (list::Arguments, Predicate)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (arguments, predicate) = by.into_inner();
        let query = CollectionQuery::new(schema::PROPERTY_FIELDS)
            .filter(predicate)
            .sort([Sort::Desc("id")]);
        self.fetch_page::<schema::Property, _>(
            schema::PROPERTIES,
            query,
            arguments,
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Select<By<Vec<Listing>, Predicate>>> for Directus<T> {
    type Ok = Vec<Listing>;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Predicate>>,
    ) -> Result<Self::Ok, Self::Err> {
        let query = CollectionQuery::new(schema::PROPERTY_FIELDS)
            .filter(by.into_inner())
            .sort([Sort::Desc("id")])
            .limit(Limit::All);

        let collection = self
            .fetch_collection::<schema::Property>(schema::PROPERTIES, &query)
            .await
            .map_err(tracerr::wrap!())?;
        narrow(collection.data).map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Select<By<Option<Listing>, listing::Id>>>
    for Directus<T>
{
    type Ok = Option<Listing>;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.fetch_item::<schema::Property>(
            schema::PROPERTIES,
            by.into_inner(),
            schema::PROPERTY_FIELDS,
        )
        .await
        .map_err(tracerr::wrap!())?
        .map(Listing::try_from)
        .transpose()
        .map_err(tracerr::from_and_wrap!(=> cms::Error))
    }
}
