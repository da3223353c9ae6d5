//! [`Listing`] definitions.

use common::{define_kind, Price};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{
    feature::Feature,
    geo::{Coordinates, LocationId, LocationName},
    language::{self, Language},
    media::{FileId, Media},
    team,
};

/// Property listed for sale by the agency.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// Name of this [`Listing`] in the default language.
    pub name: String,

    /// Description of this [`Listing`] in the default language.
    pub description: Option<String>,

    /// [`Address`] of this [`Listing`].
    pub address: Address,

    /// Asking [`Price`] of this [`Listing`], if any.
    pub price: Option<Price>,

    /// Indicator whether the [`Price`] may be shown to visitors.
    pub is_price_displayable: bool,

    /// [`Coordinates`] of this [`Listing`], if it's geocoded.
    pub coordinates: Option<Coordinates>,

    /// Ordered [`Media`] of this [`Listing`].
    pub media: Vec<Media>,

    /// [`Feature`]s of this [`Listing`].
    pub features: Vec<Feature>,

    /// [`Type`] of this [`Listing`], if any.
    pub property_type: Option<Type>,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// [`Agent`]s responsible for this [`Listing`].
    pub agents: Vec<Agent>,

    /// [`Translation`]s of this [`Listing`].
    pub translations: Vec<Translation>,
}

/// ID of a [`Listing`].
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
pub struct Id(u64);

/// Postal address of a [`Listing`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Address {
    /// Street with a house number, like `12 Smith St`.
    pub street: Option<String>,

    /// Suburb, like `Chatswood`.
    pub suburb: Option<LocationName>,

    /// State, like `NSW`.
    pub state: Option<String>,

    /// Postcode, like `2067`.
    pub postcode: Option<LocationId>,
}

impl Address {
    /// Formats this [`Address`] as a single line, skipping missing parts.
    #[must_use]
    pub fn line(&self) -> String {
        let locality = [
            self.suburb.as_ref().map(AsRef::as_ref),
            self.state.as_deref(),
            self.postcode.as_ref().map(AsRef::as_ref),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<&str>>()
        .join(" ");

        [self.street.as_deref(), Some(locality.as_str())]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Type of a [`Listing`], like a house or an apartment.
#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    /// [`TypeId`] of this [`Type`].
    pub id: TypeId,

    /// Label of this [`Type`] in the default language.
    pub label: String,

    /// [`TypeTranslation`]s of the label.
    pub translations: Vec<TypeTranslation>,
}

/// ID of a [`Listing`] [`Type`].
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
pub struct TypeId(u32);

/// Translated label of a [`Listing`] [`Type`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeTranslation {
    /// [`Language`] of this [`TypeTranslation`].
    pub language: Language,

    /// Translated label.
    pub label: String,
}

impl language::Translation for TypeTranslation {
    fn language(&self) -> &Language {
        &self.language
    }
}

define_kind! {
    #[doc = "Status of a [`Listing`]."]
    #[case = "lowercase"]
    enum Status {
        #[doc = "[`Listing`] is on the market."]
        Current = 1,

        #[doc = "[`Listing`] has been sold."]
        Sold = 2,

        #[doc = "[`Listing`] is sold privately, off the market."]
        Offmarket = 3,

        #[doc = "[`Listing`] is hidden from visitors."]
        Inactive = 4,
    }
}

/// Agent of the agency responsible for a [`Listing`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Agent {
    /// [`team::Id`] of the agent's profile.
    pub id: team::Id,

    /// Name of the agent.
    pub name: String,

    /// Photo of the agent, if any.
    pub photo: Option<FileId>,
}

/// Translated texts of a [`Listing`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Translation {
    /// [`Language`] of this [`Translation`].
    pub language: Language,

    /// Translated name, if any.
    pub name: Option<String>,

    /// Translated description, if any.
    pub description: Option<String>,
}

impl language::Translation for Translation {
    fn language(&self) -> &Language {
        &self.language
    }
}
