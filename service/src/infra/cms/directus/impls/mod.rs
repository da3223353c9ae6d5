//! [`Cms`] implementations.

mod content;
mod enquiry;
mod listing;
mod saved_property;
mod user;

use common::{
    operations::{Delete, Perform},
    pagination::{self, PageState},
};
use secrecy::SecretBox;
use serde::de::DeserializeOwned;
use tracerr::Traced;

use crate::{
    domain::user::{
        session::{RefreshToken, Tokens},
        Credentials,
    },
    infra::{
        cms::{self, Authorized, CollectionQuery, MalformedRecord},
        http::Transport,
        Cms,
    },
};

use super::{Directus, Session};

impl<T, Op> Cms<Authorized<Op>> for Directus<T>
where
    T: Transport + Clone,
    Self: Cms<Op, Err = Traced<cms::Error>>,
{
    type Ok = <Self as Cms<Op>>::Ok;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Authorized { token, op }: Authorized<Op>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with_session(Session::new(Tokens::access_only(token)))
            .execute(op)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Perform<Credentials>> for Directus<T> {
    type Ok = Tokens;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Perform(credentials): Perform<Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        self.login(&credentials).await.map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Perform<SecretBox<RefreshToken>>> for Directus<T> {
    type Ok = Tokens;
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Perform(token): Perform<SecretBox<RefreshToken>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.exchange(token).await.map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Cms<Delete<SecretBox<RefreshToken>>> for Directus<T> {
    type Ok = ();
    type Err = Traced<cms::Error>;

    async fn execute(
        &self,
        Delete(token): Delete<SecretBox<RefreshToken>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.logout(token).await.map_err(tracerr::wrap!())
    }
}

impl<T: Transport> Directus<T> {
    /// Fetches a [`pagination::Page`] of the provided `collection`.
    async fn fetch_page<R, D>(
        &self,
        collection: &'static str,
        query: CollectionQuery,
        arguments: pagination::Arguments,
    ) -> Result<pagination::Page<D>, Traced<cms::Error>>
    where
        R: DeserializeOwned,
        D: TryFrom<R, Error = MalformedRecord>,
    {
        let collection = self
            .fetch_collection::<R>(collection, &query.paged(arguments))
            .await
            .map_err(tracerr::wrap!())?;
        let items = narrow(collection.data).map_err(tracerr::wrap!())?;

        let seen = arguments.index.0 * arguments.size.get() + items.len();
        let total = collection.meta.and_then(|m| m.count()).unwrap_or(seen);
        Ok(pagination::Page {
            items,
            state: PageState::clamped(arguments.index, arguments.size, total),
        })
    }
}

/// Narrows all the provided raw `records` into domain types.
///
/// Fails on the first record that cannot be narrowed.
fn narrow<R, D>(records: Vec<R>) -> Result<Vec<D>, Traced<cms::Error>>
where
    D: TryFrom<R, Error = MalformedRecord>,
{
    records
        .into_iter()
        .map(D::try_from)
        .collect::<Result<_, _>>()
        .map_err(tracerr::from_and_wrap!(=> cms::Error))
}

#[cfg(test)]
mod spec {
    use std::collections::HashMap;

    use common::operations::{By, Select};
    use serde_json::json;

    use crate::{
        domain::{
            listing,
            user::session::{AccessToken, RefreshToken},
            Listing,
        },
        infra::{
            cms::{
                directus::{session::Status, Session},
                Authorized, Error,
            },
            http::mock::{bearer, respond, Scripted},
            Cms, Directus,
        },
    };

    use super::Tokens;

    fn tokens(access: &str, refresh: &str) -> Tokens {
        Tokens {
            access: AccessToken::secret(access).unwrap(),
            refresh: RefreshToken::secret(refresh),
            expires_in: None,
        }
    }

    fn property(id: u64) -> serde_json::Value {
        json!({ "id": id, "name": "Home", "status": "current" })
    }

    /// CMS accepting only the `new` access token, and exchanging the `r1`
    /// refresh token for it.
    fn rotating_cms() -> Scripted {
        Scripted::new(|req| match req.path.as_str() {
            "/auth/refresh" => {
                assert_eq!(req.body.as_ref().unwrap()["refresh_token"], "r1");
                respond(
                    200,
                    json!({ "data": {
                        "access_token": "new",
                        "refresh_token": "r2",
                        "expires": 900_000,
                    } }),
                )
            }
            path => {
                if bearer(req).as_deref() != Some("new") {
                    return respond(
                        401,
                        json!({ "errors": [{
                            "message": "Token expired.",
                            "extensions": { "code": "TOKEN_EXPIRED" },
                        }] }),
                    );
                }
                let id = path.rsplit('/').next().unwrap().parse().unwrap();
                respond(200, json!({ "data": property(id) }))
            }
        })
    }

    #[tokio::test]
    async fn refreshes_expired_token_once_for_concurrent_requests() {
        let transport = rotating_cms();
        let cms = Directus::new(transport.clone())
            .with_session(Session::new(tokens("old", "r1")));

        let get = |id: u64| {
            cms.execute(Select(By::<Option<Listing>, _>::new(
                listing::Id::from(id),
            )))
        };
        let (a, b, c) = futures::join!(get(1), get(2), get(3));

        for (res, id) in [(a, 1), (b, 2), (c, 3)] {
            assert_eq!(res.unwrap().unwrap().id, listing::Id::from(id));
        }

        let requests = transport.requests();
        let refreshes = requests
            .iter()
            .filter(|r| r.path == "/auth/refresh")
            .count();
        assert_eq!(refreshes, 1);

        let mut attempts = HashMap::<_, Vec<_>>::new();
        for r in requests.iter().filter(|r| r.path != "/auth/refresh") {
            attempts.entry(r.path.clone()).or_default().push(bearer(r));
        }
        assert_eq!(attempts.len(), 3);
        for tokens in attempts.values() {
            assert_eq!(
                tokens,
                &[Some("old".to_owned()), Some("new".to_owned())],
            );
        }
        assert_eq!(cms.session().status(), Status::Active);
    }

    #[tokio::test]
    async fn expires_session_when_refresh_fails() {
        let transport = Scripted::new(|req| match req.path.as_str() {
            "/auth/refresh" => respond(
                401,
                json!({ "errors": [{
                    "message": "Invalid user credentials.",
                    "extensions": { "code": "INVALID_CREDENTIALS" },
                }] }),
            ),
            _ => respond(401, json!({ "errors": [] })),
        });
        let cms = Directus::new(transport.clone())
            .with_session(Session::new(tokens("old", "r1")));
        let status = cms.session().subscribe();

        let err = cms
            .execute(Select(By::<Option<Listing>, _>::new(listing::Id::from(1))))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), Error::SessionExpired));
        assert_eq!(*status.borrow(), Status::Expired);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn authorizes_with_user_token_without_touching_own_session() {
        let transport = Scripted::new(|req| {
            assert_eq!(bearer(req).as_deref(), Some("user"));
            respond(200, json!({ "data": property(4) }))
        });
        let cms = Directus::new(transport.clone())
            .with_session(Session::new(tokens("service", "r1")));

        let found = cms
            .execute(Authorized {
                token: AccessToken::secret("user").unwrap(),
                op: Select(By::<Option<Listing>, _>::new(listing::Id::from(4))),
            })
            .await
            .unwrap();

        assert!(found.is_some());
        assert_eq!(
            cms.session().credentials().0.map(|t| {
                AsRef::<str>::as_ref(secrecy::ExposeSecret::expose_secret(&t))
                    .to_owned()
            }),
            Some("service".to_owned()),
        );
    }

    #[tokio::test]
    async fn user_token_rejection_is_session_expired() {
        let transport = Scripted::new(|_| respond(401, json!(null)));
        let cms = Directus::new(transport.clone());

        let err = cms
            .execute(Authorized {
                token: AccessToken::secret("user").unwrap(),
                op: Select(By::<Option<Listing>, _>::new(listing::Id::from(4))),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), Error::SessionExpired));
        assert_eq!(transport.requests().len(), 1);
    }
}
