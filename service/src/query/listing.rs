//! [`Listing`] query definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Status},
        Language, Listing,
    },
    infra::{cms, Cms},
    read::{self, listing::DisplayListing},
    Service,
};

use super::Query;

/// Queries a [`DisplayListing`] by its [`listing::Id`].
///
/// [`Status::Inactive`] [`Listing`]s are never shown.
#[derive(Clone, Debug)]
pub struct Display {
    /// [`listing::Id`] of the [`Listing`].
    pub id: listing::Id,

    /// [`Language`] to show the [`DisplayListing`] in.
    pub language: Option<Language>,
}

impl<C, M> Query<Display> for Service<C, M>
where
    C: Cms<
        Select<By<Option<Listing>, listing::Id>>,
        Ok = Option<Listing>,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = Option<DisplayListing>;
    type Err = Traced<cms::Error>;

    async fn execute(&self, query: Display) -> Result<Self::Ok, Self::Err> {
        let lang = query
            .language
            .unwrap_or_else(|| self.config().default_language.clone());
        let listing = self
            .cms()
            .execute(Select(By::new(query.id)))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(listing.filter(|l| l.status != Status::Inactive).map(|l| {
            read::listing::adapt(&l, &lang, &self.config().features)
        }))
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::listing,
        infra::http::mock::{respond, Scripted},
        query::listings::spec::service,
        Query as _,
    };

    use super::Display;

    fn by_id(id: u64) -> Display {
        Display {
            id: listing::Id::from(id),
            language: None,
        }
    }

    #[tokio::test]
    async fn shows_listing_by_id() {
        let transport = Scripted::new(|_| {
            respond(
                200,
                json!({ "data": {
                    "id": 3,
                    "name": "Garden Cottage",
                    "price": "650000",
                    "is_price_displayable": false,
                    "status": "sold",
                } }),
            )
        });
        let service = service(transport.clone());

        let shown = service.execute(by_id(3)).await.unwrap().unwrap();

        assert_eq!(shown.name, "Garden Cottage");
        assert_eq!(shown.price.to_string(), "Request for Price");
        assert_eq!(transport.requests()[0].path, "/items/properties/3");
    }

    #[tokio::test]
    async fn hides_inactive_listing() {
        let transport = Scripted::new(|_| {
            respond(200, json!({ "data": { "id": 3, "status": "inactive" } }))
        });
        let service = service(transport);

        assert_eq!(service.execute(by_id(3)).await.unwrap(), None);
    }
}
