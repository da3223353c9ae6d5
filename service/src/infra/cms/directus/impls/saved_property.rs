//! [`SavedPropertyLink`]-related [`Cms`] implementations.

use common::operations::{By, Delete, Insert, Select};
use serde_json::json;
use tracerr::Traced;

use crate::{
    domain::{user, SavedPropertyLink},
    infra::{
        cms::{self, query::Limit, CollectionQuery, Predicate},
        http::{Method, Request, Transport},
        Cms,
    },
    read::SavedSet,
};

use super::super::{schema, Directus};

impl SavedPropertyLink {
    /// Returns the [`Predicate`] matching this [`SavedPropertyLink`].
    fn to_predicate(self) -> Predicate {
        Predicate::And(vec![
            Predicate::eq("user_id", self.user_id.to_string()),
            Predicate::eq("property_id", u64::from(self.property_id)),
        ])
    }
}

impl<T: Transport> Cms<Select<By<SavedSet, user::Id>>> for Directus<T> {
    type Ok = SavedSet;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<SavedSet, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let query = CollectionQuery::new(&["property_id"])
            .filter(Predicate::eq("user_id", by.into_inner().to_string()))
            .limit(Limit::All);

        Ok(self
            .fetch_collection::<schema::SavedProperty>(
                schema::SAVED_PROPERTIES,
                &query,
            )
            .await
            .map_err(tracerr::wrap!())?
            .data
            .into_iter()
            .filter_map(|r| r.property_id)
            .collect())
    }
}

impl<T: Transport> Cms<Insert<SavedPropertyLink>> for Directus<T> {
    type Ok = ();
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Insert(link): Insert<SavedPropertyLink>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = json!({
            "user_id": link.user_id.to_string(),
            "property_id": u64::from(link.property_id),
            "unique_id": link.unique_id(),
        });
        let path = format!("/items/{}", schema::SAVED_PROPERTIES);
        self.send(Request::new(Method::Post, path).json(body))
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Delete<SavedPropertyLink>> for Directus<T> {
    type Ok = ();
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Delete(link): Delete<SavedPropertyLink>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = json!({ "query": { "filter": link.to_predicate().to_json() } });
        let path = format!("/items/{}", schema::SAVED_PROPERTIES);
        self.send(Request::new(Method::Delete, path).json(body))
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select};
    use serde_json::json;
    use uuid::Uuid;

    use crate::{
        domain::{listing, user, SavedPropertyLink},
        infra::{
            http::{
                mock::{respond, Scripted},
                Method,
            },
            Cms, Directus,
        },
        read::SavedSet,
    };

    fn link() -> SavedPropertyLink {
        SavedPropertyLink {
            user_id: user::Id::from(Uuid::from_u128(1)),
            property_id: listing::Id::from(42),
        }
    }

    #[tokio::test]
    async fn inserts_link_with_unique_id() {
        let transport = Scripted::new(|_| respond(200, json!({ "data": {} })));
        let cms = Directus::new(transport.clone());

        cms.execute(Insert(link())).await.unwrap();

        let req = &transport.requests()[0];
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/items/saved_properties");
        assert_eq!(
            req.body,
            Some(json!({
                "user_id": "00000000-0000-0000-0000-000000000001",
                "property_id": 42,
                "unique_id": "00000000-0000-0000-0000-000000000001-42",
            })),
        );
    }

    #[tokio::test]
    async fn deletes_link_by_query() {
        let transport = Scripted::new(|_| respond(204, json!(null)));
        let cms = Directus::new(transport.clone());

        cms.execute(Delete(link())).await.unwrap();

        let req = &transport.requests()[0];
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.path, "/items/saved_properties");
        assert_eq!(
            req.body,
            Some(json!({ "query": { "filter": { "_and": [
                { "user_id": { "_eq": "00000000-0000-0000-0000-000000000001" } },
                { "property_id": { "_eq": 42 } },
            ] } } })),
        );
    }

    #[tokio::test]
    async fn selects_saved_ids_of_user() {
        let transport = Scripted::new(|_| {
            respond(
                200,
                json!({ "data": [
                    { "property_id": 42 },
                    { "property_id": null },
                    { "property_id": 7 },
                ] }),
            )
        });
        let cms = Directus::new(transport.clone());

        let set = cms
            .execute(Select(By::<SavedSet, _>::new(link().user_id)))
            .await
            .unwrap();

        assert!(set.contains(listing::Id::from(42)));
        assert!(set.contains(listing::Id::from(7)));
        assert_eq!(set.ids().len(), 2);
        assert_eq!(transport.requests()[0].param("fields"), Some("property_id"));
    }
}
