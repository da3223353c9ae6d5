//! [`User`] definitions.

pub mod session;

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret, SecretBox};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::session::Tokens;

/// Website user, registered in the CMS.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// First name of this [`User`].
    pub first_name: Option<String>,

    /// Last name of this [`User`].
    pub last_name: Option<String>,

    /// [`Email`] of this [`User`].
    pub email: Option<Email>,
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(Uuid);

/// Credentials a [`User`] signs in with.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`Email`] of the [`User`].
    pub email: Email,

    /// [`Password`] of the [`User`].
    pub password: SecretBox<Password>,
}

/// Password of a [`User`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        !password.is_empty() && password.len() <= 256
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Email address.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
            )
            .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    ///
    /// Accepts Australian landline and mobile formats, like `0412 345 678`,
    /// `(02) 9876 5432` or `+61 412 345 678`.
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\+\d{1,3}[\s-]?)?(\(\d{1,4}\)[\s-]?)?\d[\d\s-]{5,14}\d$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Password, Phone};

    #[test]
    fn validates_password() {
        assert!(Password::new("correct horse").is_some());
        assert!(Password::new("").is_none());
        assert!(Password::new("x".repeat(257)).is_none());

        assert!("".parse::<Password>().is_err());
        assert!("".parse::<Email>().is_err());
        assert_eq!(
            "hunter2".parse::<Password>().unwrap().as_ref(),
            "hunter2",
        );
    }

    #[test]
    fn validates_email() {
        assert!(Email::new("jane.doe@example.com.au").is_some());
        assert!(Email::new("j+news@example.com").is_some());
        assert!(Email::new("jane@localhost").is_none());
        assert!(Email::new("jane.example.com").is_none());
        assert!(Email::new("").is_none());
    }

    #[test]
    fn validates_phone() {
        assert!(Phone::new("0412 345 678").is_some());
        assert!(Phone::new("(02) 9876 5432").is_some());
        assert!(Phone::new("+61 412 345 678").is_some());
        assert!(Phone::new("+61-2-9876-5432").is_some());
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new("123").is_none());
    }
}
