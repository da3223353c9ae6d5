//! [`Session`] of a [`Directus`] client.

use std::{
    future::Future,
    sync::{PoisonError, RwLock},
};

use derive_more::Display;
use secrecy::SecretBox;
use tokio::sync::{watch, Mutex};
use tracerr::Traced;

#[cfg(doc)]
use super::Directus;
use crate::{
    domain::user::session::{AccessToken, RefreshToken, Tokens},
    infra::cms::Error,
};

/// Status of a [`Session`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Status {
    /// No [`Tokens`] have been issued yet, or they have been torn down.
    Anonymous,

    /// [`Tokens`] are present and may be used.
    Active,

    /// [`Tokens`] could not be refreshed and have been cleared.
    Expired,
}

/// Generation of [`Tokens`] held by a [`Session`].
///
/// Grows every time the [`Tokens`] are replaced or cleared.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Generation(u64);

/// Authentication session of a [`Directus`] client.
///
/// Lifecycle: [`Session::init()`] on sign in, [`Session::refresh()`] on an
/// expired access token, [`Session::teardown()`] on sign out.
///
/// Refreshing is single-flight: concurrent callers that observed the same
/// [`Generation`] are serialized, and only the first one exchanges the
/// [`RefreshToken`]. The rest find the [`Tokens`] already replaced.
#[derive(Debug)]
pub struct Session {
    /// Current [`Tokens`] along with their [`Generation`].
    state: RwLock<State>,

    /// Lock serializing refreshes.
    refresh: Mutex<()>,

    /// Publisher of [`Status`] changes.
    status: watch::Sender<Status>,
}

/// State of a [`Session`].
#[derive(Debug)]
struct State {
    /// Current [`Tokens`], if any.
    tokens: Option<Tokens>,

    /// [`Generation`] of the current [`Tokens`].
    generation: Generation,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    /// Creates a new [`Status::Anonymous`] [`Session`].
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            state: RwLock::new(State {
                tokens: None,
                generation: Generation(0),
            }),
            refresh: Mutex::new(()),
            status: watch::channel(Status::Anonymous).0,
        }
    }

    /// Creates a new [`Status::Active`] [`Session`] with the provided
    /// [`Tokens`].
    #[must_use]
    pub fn new(tokens: Tokens) -> Self {
        let session = Self::anonymous();
        session.init(tokens);
        session
    }

    /// Initializes this [`Session`] with the provided [`Tokens`].
    pub fn init(&self, tokens: Tokens) {
        self.replace(Some(tokens), Status::Active);
    }

    /// Returns the current [`AccessToken`] (if any) along with its
    /// [`Generation`].
    #[must_use]
    pub fn credentials(&self) -> (Option<SecretBox<AccessToken>>, Generation) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        (
            state.tokens.as_ref().map(|t| t.access.clone()),
            state.generation,
        )
    }

    /// Returns the current [`Status`] of this [`Session`].
    #[must_use]
    pub fn status(&self) -> Status {
        *self.status.borrow()
    }

    /// Subscribes to [`Status`] changes of this [`Session`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    /// Refreshes the [`Tokens`] of the `observed` [`Generation`] via the
    /// provided `exchange`.
    ///
    /// If the [`Tokens`] have been replaced since the `observed`
    /// [`Generation`], nothing is exchanged and the caller should simply
    /// retry with the current ones.
    ///
    /// # Errors
    ///
    /// With [`Error::SessionExpired`] if there is nothing to refresh, or the
    /// `exchange` fails. In both cases the [`Tokens`] are cleared, and this
    /// [`Session`] becomes [`Status::Expired`].
    pub async fn refresh<F, Fut>(
        &self,
        observed: Generation,
        exchange: F,
    ) -> Result<(), Traced<Error>>
    where
        F: FnOnce(SecretBox<RefreshToken>) -> Fut,
        Fut: Future<Output = Result<Tokens, Traced<Error>>>,
    {
        let _guard = self.refresh.lock().await;

        let refresh_token = {
            let state =
                self.state.read().unwrap_or_else(PoisonError::into_inner);
            if state.generation != observed {
                return if state.tokens.is_some() {
                    Ok(())
                } else {
                    Err(tracerr::new!(Error::SessionExpired))
                };
            }
            state.tokens.as_ref().and_then(|t| t.refresh.clone())
        };
        let Some(refresh_token) = refresh_token else {
            self.replace(None, Status::Expired);
            return Err(tracerr::new!(Error::SessionExpired));
        };

        match exchange(refresh_token).await {
            Ok(tokens) => {
                tracing::debug!("session refreshed");
                self.init(tokens);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to refresh session: {e}");
                self.replace(None, Status::Expired);
                Err(tracerr::new!(Error::SessionExpired))
            }
        }
    }

    /// Tears down this [`Session`], returning its [`RefreshToken`] (if any)
    /// to be revoked.
    pub fn teardown(&self) -> Option<SecretBox<RefreshToken>> {
        self.replace(None, Status::Anonymous)
            .and_then(|tokens| tokens.refresh)
    }

    /// Replaces the [`Tokens`] of this [`Session`], bumping its
    /// [`Generation`] and publishing the new [`Status`].
    fn replace(&self, tokens: Option<Tokens>, status: Status) -> Option<Tokens> {
        let previous = {
            let mut state =
                self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.generation = Generation(state.generation.0 + 1);
            std::mem::replace(&mut state.tokens, tokens)
        };
        _ = self.status.send_replace(status);
        previous
    }
}

#[cfg(test)]
mod spec {
    use std::cell::Cell;

    use secrecy::ExposeSecret as _;

    use crate::{
        domain::user::session::{AccessToken, RefreshToken, Tokens},
        infra::cms::Error,
    };

    use super::{Session, Status};

    fn tokens(access: &str, refresh: Option<&str>) -> Tokens {
        Tokens {
            access: AccessToken::secret(access).unwrap(),
            refresh: refresh.map(|r| RefreshToken::secret(r).unwrap()),
            expires_in: None,
        }
    }

    fn access(session: &Session) -> Option<String> {
        session
            .credentials()
            .0
            .map(|t| t.expose_secret().as_ref().to_owned())
    }

    #[tokio::test]
    async fn refreshes_observed_generation() {
        let session = Session::new(tokens("a1", Some("r1")));
        let (_, observed) = session.credentials();

        session
            .refresh(observed, |refresh| async move {
                assert_eq!(refresh.expose_secret().as_ref(), "r1");
                Ok(tokens("a2", Some("r2")))
            })
            .await
            .unwrap();

        assert_eq!(access(&session).as_deref(), Some("a2"));
        assert_ne!(session.credentials().1, observed);
        assert_eq!(session.status(), Status::Active);
    }

    #[tokio::test]
    async fn skips_exchange_for_stale_generation() {
        let session = Session::new(tokens("a1", Some("r1")));
        let (_, observed) = session.credentials();
        session.init(tokens("a2", Some("r2")));

        let exchanged = Cell::new(false);
        session
            .refresh(observed, |_| async {
                exchanged.set(true);
                Ok(tokens("a3", Some("r3")))
            })
            .await
            .unwrap();

        assert!(!exchanged.get());
        assert_eq!(access(&session).as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn failed_exchange_expires_session() {
        let session = Session::new(tokens("a1", Some("r1")));
        let mut status = session.subscribe();
        let (_, observed) = session.credentials();

        let err = session
            .refresh(observed, |_| async {
                Err(tracerr::new!(Error::SessionExpired))
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), Error::SessionExpired));
        assert_eq!(access(&session), None);
        assert!(status.has_changed().unwrap());
        assert_eq!(*status.borrow_and_update(), Status::Expired);

        let (_, observed) = session.credentials();
        let err = session
            .refresh(observed, |_| async { Ok(tokens("a2", None)) })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), Error::SessionExpired));
    }

    #[tokio::test]
    async fn access_only_session_cannot_refresh() {
        let session = Session::new(Tokens::access_only(
            AccessToken::secret("a1").unwrap(),
        ));
        let (_, observed) = session.credentials();

        let err = session
            .refresh(observed, |_| async { Ok(tokens("a2", None)) })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), Error::SessionExpired));
        assert_eq!(session.status(), Status::Expired);
    }

    #[test]
    fn teardown_returns_refresh_token() {
        let session = Session::new(tokens("a1", Some("r1")));

        let refresh = session.teardown().unwrap();

        assert_eq!(refresh.expose_secret().as_ref(), "r1");
        assert_eq!(access(&session), None);
        assert_eq!(session.status(), Status::Anonymous);
        assert!(session.teardown().is_none());
    }
}
