//! News [`Article`] definitions.

use common::DateTime;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::media::FileId;

/// News article published by the agency.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Article {
    /// ID of this [`Article`].
    pub id: Id,

    /// Title of this [`Article`].
    pub title: String,

    /// Short summary of this [`Article`].
    pub summary: Option<String>,

    /// HTML body of this [`Article`].
    pub body: String,

    /// Cover image of this [`Article`].
    pub image: Option<FileId>,

    /// [`DateTime`] when this [`Article`] was published.
    pub published_at: DateTime,
}

/// ID of an [`Article`].
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
