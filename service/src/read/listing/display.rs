//! [`DisplayListing`] definitions.

use common::{DisplayPrice, Price};

use crate::domain::{
    feature::{self, Key},
    geo::Coordinates,
    language::{self, Language},
    listing::{self, Address, Agent, Status},
    media::{FileId, Kind, Media},
    Listing,
};

/// [`Listing`] prepared for showing to website visitors.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayListing {
    /// ID of the [`Listing`].
    pub id: listing::Id,

    /// Translated name.
    pub name: String,

    /// Translated description, if any.
    pub description: Option<String>,

    /// [`Address`] of the [`Listing`].
    pub address: Address,

    /// [`Address`] formatted as a single line.
    pub address_line: String,

    /// [`DisplayPrice`] of the [`Listing`].
    pub price: DisplayPrice,

    /// [`Status`] of the [`Listing`].
    pub status: Status,

    /// Translated label of the [`listing::Type`], if any.
    pub property_type: Option<String>,

    /// Resolved [`Features`].
    pub features: Features,

    /// Attached [`Media`], in their CMS order.
    pub media: Vec<Media>,

    /// First image of the [`Listing`], if any.
    pub thumbnail: Option<FileId>,

    /// Location of the [`Listing`] on a map, if known.
    pub coordinates: Option<Coordinates>,

    /// [`Agent`]s responsible for the [`Listing`].
    pub agents: Vec<Agent>,
}

/// Features of a [`DisplayListing`], resolved via a [`feature::Table`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Features {
    /// Number of bedrooms.
    pub bedrooms: Option<String>,

    /// Number of bathrooms.
    pub bathrooms: Option<String>,

    /// Number of parking spaces.
    pub parking: Option<String>,

    /// Number of floors.
    pub floors: Option<String>,

    /// Number of rooms.
    pub rooms: Option<String>,

    /// Additional free-form features.
    pub additional: Option<String>,
}

impl Features {
    /// Returns the slot of the provided [`Key`].
    fn slot(&mut self, key: Key) -> &mut Option<String> {
        match key {
            Key::Bedrooms => &mut self.bedrooms,
            Key::Bathrooms => &mut self.bathrooms,
            Key::Parking => &mut self.parking,
            Key::Floors => &mut self.floors,
            Key::Rooms => &mut self.rooms,
            Key::Additional => &mut self.additional,
        }
    }

    /// Resolves [`Features`] from the raw [`feature::Feature`]s.
    ///
    /// Features with IDs unknown to the `table` are skipped. If a feature is
    /// repeated, its first value wins.
    fn resolve(raw: &[feature::Feature], table: &feature::Table) -> Self {
        let mut features = Self::default();
        for f in raw {
            if let Some(key) = table.key(f.id) {
                let slot = features.slot(key);
                if slot.is_none() {
                    *slot = Some(f.value.clone());
                }
            }
        }
        features
    }
}

/// Adapts the provided [`Listing`] for showing in the provided [`Language`].
///
/// Never fails: missing translations fall back to the first available one,
/// and then to the [`Listing`]'s own fields.
#[must_use]
pub fn adapt(
    listing: &Listing,
    lang: &Language,
    features: &feature::Table,
) -> DisplayListing {
    let translation = language::pick(&listing.translations, lang);
    let name = translation
        .and_then(|t| t.name.clone())
        .unwrap_or_else(|| listing.name.clone());
    let description = translation
        .and_then(|t| t.description.clone())
        .or_else(|| listing.description.clone());

    let property_type = listing.property_type.as_ref().map(|ty| {
        language::pick(&ty.translations, lang)
            .map_or_else(|| ty.label.clone(), |t| t.label.clone())
    });

    DisplayListing {
        id: listing.id,
        name,
        description,
        address_line: listing.address.line(),
        address: listing.address.clone(),
        price: display_price(listing.price, listing.is_price_displayable),
        status: listing.status,
        property_type,
        features: Features::resolve(&listing.features, features),
        thumbnail: listing
            .media
            .iter()
            .find(|m| m.kind == Kind::Image)
            .map(|m| m.file.clone()),
        media: listing.media.clone(),
        coordinates: listing.coordinates,
        agents: listing.agents.clone(),
    }
}

/// Decides how the provided `price` is shown.
fn display_price(price: Option<Price>, displayable: bool) -> DisplayPrice {
    match price {
        Some(p) if displayable => DisplayPrice::Amount(p),
        Some(_) | None => DisplayPrice::OnRequest,
    }
}
