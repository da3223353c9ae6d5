//! Club Diamondz [`Offer`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::media::FileId;

/// Partner offer available to Club Diamondz members.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    /// ID of this [`Offer`].
    pub id: Id,

    /// Title of this [`Offer`].
    pub title: String,

    /// Description of this [`Offer`].
    pub description: Option<String>,

    /// Name of the partner providing this [`Offer`].
    pub partner: Option<String>,

    /// External link of this [`Offer`].
    pub link: Option<String>,

    /// Image of this [`Offer`].
    pub image: Option<FileId>,
}

/// ID of an [`Offer`].
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
