//! Team [`Member`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{
    language::{self, Language},
    media::FileId,
    user::Email,
};

/// Member of the agency team.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    /// ID of this [`Member`].
    pub id: Id,

    /// Full name of this [`Member`].
    pub name: String,

    /// Position of this [`Member`] in the default language.
    pub position: Option<String>,

    /// Biography of this [`Member`] in the default language.
    pub bio: Option<String>,

    /// Contact [`Email`] of this [`Member`].
    pub email: Option<Email>,

    /// Contact phone of this [`Member`].
    pub phone: Option<String>,

    /// Photo of this [`Member`].
    pub photo: Option<FileId>,

    /// Manual sort order of this [`Member`].
    pub sort: Option<i32>,

    /// [`Translation`]s of this [`Member`] profile.
    pub translations: Vec<Translation>,
}

/// ID of a [`Member`].
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
pub struct Id(u32);

/// Translated texts of a [`Member`] profile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Translation {
    /// [`Language`] of this [`Translation`].
    pub language: Language,

    /// Translated position, if any.
    pub position: Option<String>,

    /// Translated biography, if any.
    pub bio: Option<String>,
}

impl language::Translation for Translation {
    fn language(&self) -> &Language {
        &self.language
    }
}
