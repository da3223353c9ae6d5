//! [`Language`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
use serde::{Deserialize, Deserializer, Serialize};

/// Language code of a translation, like `en` or `cn`.
///
/// Always lowercase.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str)]
pub struct Language(String);

impl Language {
    /// Creates a new [`Language`] if the given `code` is valid.
    ///
    /// The `code` is lowercased.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Option<Self> {
        let code = code.as_ref().to_ascii_lowercase();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Language`].
    fn check(code: &str) -> bool {
        (2..=16).contains(&code.len())
            && code.starts_with(|c: char| c.is_ascii_alphabetic())
            && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("en".into())
    }
}

impl FromStr for Language {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Language`")
    }
}

impl Serialize for Language {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let s = <std::borrow::Cow<'de, str>>::deserialize(d)?;
        Self::new(&*s).ok_or_else(|| D::Error::custom("invalid `Language`"))
    }
}

/// Record translated into a [`Language`].
pub trait Translation {
    /// Returns the [`Language`] of this [`Translation`].
    fn language(&self) -> &Language;
}

/// Picks the [`Translation`] for the provided [`Language`].
///
/// Falls back to the first available [`Translation`] if there is no exact
/// match, and returns [`None`] only if there are no translations at all.
#[must_use]
pub fn pick<'t, T: Translation>(
    translations: &'t [T],
    language: &Language,
) -> Option<&'t T> {
    translations
        .iter()
        .find(|t| t.language() == language)
        .or_else(|| translations.first())
}
