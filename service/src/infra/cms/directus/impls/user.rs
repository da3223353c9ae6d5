//! [`User`]-related [`Cms`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        cms::{self, MalformedRecord},
        http::Transport,
        Cms,
    },
};

use super::super::{schema, Directus};

impl<T: Transport> Cms<Select<By<User, ()>>> for Directus<T> {
    type Ok = User;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        _: Select<By<User, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.fetch_one::<schema::DirectusUser>(
            "users",
            "/users/me".to_owned(),
            schema::USER_FIELDS,
        )
        .await
        .map_err(tracerr::wrap!())?
        .map(User::from)
        .ok_or_else(|| {
            tracerr::new!(cms::Error::Malformed(MalformedRecord::new(
                "users",
                "no current user",
            )))
        })
    }
}

impl<T: Transport> Cms<Select<By<Option<User>, user::Id>>> for Directus<T> {
    type Ok = Option<User>;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .fetch_one::<schema::DirectusUser>(
                "users",
                format!("/users/{}", by.into_inner()),
                schema::USER_FIELDS,
            )
            .await
            .map_err(tracerr::wrap!())?
            .map(User::from))
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use serde_json::json;
    use uuid::Uuid;

    use crate::{
        domain::{user, User},
        infra::{
            http::mock::{respond, Scripted},
            Cms, Directus,
        },
    };

    #[tokio::test]
    async fn fetches_current_user() {
        let transport = Scripted::new(|_| {
            respond(
                200,
                json!({ "data": {
                    "id": "00000000-0000-0000-0000-000000000001",
                    "first_name": "Jane",
                    "last_name": null,
                    "email": "jane@example.com",
                } }),
            )
        });
        let cms = Directus::new(transport.clone());

        let me = cms.execute(Select(By::<User, _>::new(()))).await.unwrap();

        assert_eq!(me.id, user::Id::from(Uuid::from_u128(1)));
        assert_eq!(me.first_name.as_deref(), Some("Jane"));
        assert_eq!(me.last_name, None);
        assert_eq!(transport.requests()[0].path, "/users/me");
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let transport = Scripted::new(|_| respond(404, json!(null)));
        let cms = Directus::new(transport.clone());

        let found = cms
            .execute(Select(By::<Option<User>, _>::new(user::Id::from(
                Uuid::from_u128(2),
            ))))
            .await
            .unwrap();

        assert!(found.is_none());
        assert_eq!(
            transport.requests()[0].path,
            "/users/00000000-0000-0000-0000-000000000002",
        );
    }
}
