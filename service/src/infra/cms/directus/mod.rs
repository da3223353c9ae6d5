//! [Directus] [`Cms`] implementation.
//!
//! [Directus]: https://directus.io

mod impls;
mod schema;
pub mod session;

use std::{fmt, sync::Arc};

use secrecy::{ExposeSecret as _, SecretBox};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Cms;
use crate::{
    domain::user::{
        session::{RefreshToken, Tokens},
        Credentials,
    },
    infra::{
        cms::{
            Collection, CollectionQuery, Error, MalformedRecord,
            RemoteFetchError,
        },
        http::{Method, Request, Response, Transport},
        Http,
    },
};

pub use self::session::Session;

/// [Directus] [`Cms`] client.
///
/// Every request is authorized with the access token of its [`Session`]. A
/// `401 Unauthorized` response triggers a single [`Session::refresh()`] and
/// exactly one retry of the request.
///
/// [Directus]: https://directus.io
#[derive(Debug)]
pub struct Directus<T = Http> {
    /// [`Transport`] of this [`Directus`] client.
    transport: T,

    /// [`Session`] of this [`Directus`] client.
    session: Arc<Session>,
}

impl<T: Clone> Clone for Directus<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            session: Arc::clone(&self.session),
        }
    }
}

impl<T> Directus<T> {
    /// Creates a new [`Directus`] client with an anonymous [`Session`].
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            session: Arc::new(Session::anonymous()),
        }
    }

    /// Returns the [`Session`] of this [`Directus`] client.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Creates a new [`Directus`] client sharing the [`Transport`] of this
    /// one, but using the provided [`Session`].
    #[must_use]
    pub fn with_session(&self, session: Session) -> Self
    where
        T: Clone,
    {
        Self {
            transport: self.transport.clone(),
            session: Arc::new(session),
        }
    }
}

impl<T: Transport> Directus<T> {
    /// Signs into the CMS with the provided [`Credentials`] and initializes
    /// the [`Session`] of this [`Directus`] client.
    ///
    /// # Errors
    ///
    /// If the [`Credentials`] are rejected, or the CMS is unreachable.
    pub async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<(), Traced<Error>> {
        let tokens = self.login(credentials).await.map_err(tracerr::wrap!())?;
        self.session.init(tokens);
        Ok(())
    }

    /// Signs out of the CMS and tears down the [`Session`] of this
    /// [`Directus`] client.
    ///
    /// # Errors
    ///
    /// If the CMS fails to revoke the [`RefreshToken`]. The [`Session`] is
    /// torn down anyway.
    pub async fn sign_out(&self) -> Result<(), Traced<Error>> {
        match self.session.teardown() {
            Some(token) => self.logout(token).await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }

    /// Exchanges the provided [`Credentials`] for new [`Tokens`].
    pub(crate) async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Tokens, Traced<Error>> {
        let body = json!({
            "email": credentials.email.as_ref(),
            "password": credentials.password.expose_secret().as_ref(),
        });
        self.authenticate(Request::new(Method::Post, "/auth/login").json(body))
            .await
    }

    /// Exchanges the provided [`RefreshToken`] for new [`Tokens`].
    pub(crate) async fn exchange(
        &self,
        token: SecretBox<RefreshToken>,
    ) -> Result<Tokens, Traced<Error>> {
        let body = json!({
            "refresh_token": token.expose_secret().as_ref(),
            "mode": "json",
        });
        self.authenticate(Request::new(Method::Post, "/auth/refresh").json(body))
            .await
    }

    /// Revokes the provided [`RefreshToken`].
    pub(crate) async fn logout(
        &self,
        token: SecretBox<RefreshToken>,
    ) -> Result<(), Traced<Error>> {
        let body = json!({ "refresh_token": token.expose_secret().as_ref() });
        let response = self
            .transport
            .send(Request::new(Method::Post, "/auth/logout").json(body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        Self::check(response).map(drop).map_err(tracerr::wrap!())
    }

    /// Sends the provided authentication [`Request`] and decodes its
    /// [`Tokens`].
    async fn authenticate(
        &self,
        request: Request,
    ) -> Result<Tokens, Traced<Error>> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        let body = Self::check(response).map_err(tracerr::wrap!())?;
        let schema::Envelope { data } =
            Self::decode::<schema::Envelope<schema::AuthTokens>>("auth", body)
                .map_err(tracerr::wrap!())?;
        Tokens::try_from(data).map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Fetches items of the provided `collection` matching the
    /// [`CollectionQuery`].
    ///
    /// # Errors
    ///
    /// If the request fails, or the response cannot be decoded.
    pub async fn fetch_collection<R: DeserializeOwned>(
        &self,
        collection: &'static str,
        query: &CollectionQuery,
    ) -> Result<Collection<R>, Traced<Error>> {
        let request = Request::new(Method::Get, format!("/items/{collection}"))
            .query(query.to_params());
        let body = self.send(request).await.map_err(tracerr::wrap!())?;
        Self::decode(collection, body).map_err(tracerr::wrap!())
    }

    /// Fetches a single item of the provided `collection` by its `id`.
    ///
    /// [`None`] is returned if there is no such item.
    ///
    /// # Errors
    ///
    /// If the request fails, or the response cannot be decoded.
    pub async fn fetch_item<R: DeserializeOwned>(
        &self,
        collection: &'static str,
        id: impl fmt::Display,
        fields: &[&'static str],
    ) -> Result<Option<R>, Traced<Error>> {
        self.fetch_one(collection, format!("/items/{collection}/{id}"), fields)
            .await
            .map_err(tracerr::wrap!())
    }

    /// Fetches a single record of the `kind` at the provided `path`.
    ///
    /// A `404 Not Found` response is [`None`].
    async fn fetch_one<R: DeserializeOwned>(
        &self,
        kind: &'static str,
        path: String,
        fields: &[&'static str],
    ) -> Result<Option<R>, Traced<Error>> {
        let request = Request::new(Method::Get, path)
            .query(CollectionQuery::new(fields).to_params());
        match self.send(request).await {
            Ok(body) => Self::decode::<schema::Envelope<R>>(kind, body)
                .map(|e| Some(e.data))
                .map_err(tracerr::wrap!()),
            Err(e) if e.as_ref().remote().is_some_and(|r| r.status == 404) => {
                Ok(None)
            }
            Err(e) => Err(e).map_err(tracerr::wrap!()),
        }
    }

    /// Sends the provided [`Request`] authorized by the [`Session`],
    /// refreshing it once on a `401 Unauthorized` response.
    ///
    /// Returns the body of a successful response.
    async fn send(
        &self,
        request: Request,
    ) -> Result<serde_json::Value, Traced<Error>> {
        let mut retried = false;
        loop {
            let (token, generation) = self.session.credentials();
            let authorized = token.is_some();
            let response = self
                .transport
                .send(Request {
                    bearer: token,
                    ..request.clone()
                })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;

            if response.status == 401 && authorized && !retried {
                tracing::debug!(path = %request.path, "access token rejected");
                self.session
                    .refresh(generation, |token| self.exchange(token))
                    .await
                    .map_err(tracerr::wrap!())?;
                retried = true;
                continue;
            }
            return Self::check(response).map_err(tracerr::wrap!());
        }
    }

    /// Checks the provided [`Response`] to be successful.
    fn check(response: Response) -> Result<serde_json::Value, Traced<Error>> {
        if response.is_success() {
            return Ok(response.body);
        }
        let e = RemoteFetchError::from_body(response.status, &response.body);
        tracing::debug!("CMS request failed: {e}");
        Err(tracerr::new!(Error::Remote(e)))
    }

    /// Decodes the provided response `body` of the `collection`.
    fn decode<R: DeserializeOwned>(
        collection: &'static str,
        body: serde_json::Value,
    ) -> Result<R, Traced<Error>> {
        serde_json::from_value(body)
            .map_err(|e| MalformedRecord::new(collection, e))
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}
