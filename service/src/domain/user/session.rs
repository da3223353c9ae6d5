//! Session [`Tokens`] definitions.

use std::time::Duration;

use secrecy::{zeroize::Zeroize, CloneableSecret, SecretBox};

/// Bearer token pair of an authenticated session.
#[derive(Clone, Debug)]
pub struct Tokens {
    /// [`AccessToken`] authorizing requests.
    pub access: SecretBox<AccessToken>,

    /// [`RefreshToken`] exchanging for a new [`Tokens`] pair, if any.
    pub refresh: Option<SecretBox<RefreshToken>>,

    /// Lifetime of the [`AccessToken`], if known.
    pub expires_in: Option<Duration>,
}

impl Tokens {
    /// Creates new [`Tokens`] holding only the provided [`AccessToken`].
    ///
    /// Such [`Tokens`] cannot be refreshed.
    #[must_use]
    pub fn access_only(access: SecretBox<AccessToken>) -> Self {
        Self {
            access,
            refresh: None,
            expires_in: None,
        }
    }
}

macro_rules! define_token {
    ($(#[doc = $doc:literal])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub struct $name(String);

        impl $name {
            /// Creates a new token if the given `token` is not blank.
            #[must_use]
            pub fn new(token: impl Into<String>) -> Option<Self> {
                let token = token.into();
                (!token.trim().is_empty()).then_some(Self(token))
            }

            /// Creates a new secret token if the given `token` is not
            /// blank.
            #[must_use]
            pub fn secret(token: impl Into<String>) -> Option<SecretBox<Self>> {
                Self::new(token).map(|t| SecretBox::new(Box::new(t)))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl CloneableSecret for $name {}
        impl Zeroize for $name {
            fn zeroize(&mut self) {
                self.0.zeroize();
            }
        }
    };
}

define_token! {
    /// Short-living token authorizing requests to the CMS.
    AccessToken
}

define_token! {
    /// Long-living token exchanging for a new [`Tokens`] pair.
    RefreshToken
}

#[cfg(test)]
mod spec {
    use secrecy::ExposeSecret as _;

    use super::{AccessToken, Tokens};

    #[test]
    fn rejects_blank_tokens() {
        assert!(AccessToken::new("").is_none());
        assert!(AccessToken::new("   ").is_none());
        assert_eq!(
            AccessToken::secret("abc").unwrap().expose_secret().as_ref(),
            "abc",
        );
    }

    #[test]
    fn access_only_tokens_cannot_refresh() {
        let tokens = Tokens::access_only(AccessToken::secret("abc").unwrap());

        assert!(tokens.refresh.is_none());
        assert!(tokens.expires_in.is_none());
    }
}
