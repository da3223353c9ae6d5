//! [`Overlay`] of listings on a map.

use common::DisplayPrice;

use crate::domain::{
    geo::{Bounds, Coordinates},
    listing,
    media::FileId,
};

use super::listing::DisplayListing;

/// Markers of [`DisplayListing`]s on a map, with their info popups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    /// [`Marker`]s of the located [`DisplayListing`]s.
    markers: Vec<Marker>,

    /// [`Bounds`] containing all the [`Marker`]s.
    bounds: Option<Bounds>,
}

/// Map marker of a single [`DisplayListing`].
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// ID of the marked listing.
    pub listing_id: listing::Id,

    /// Position of this [`Marker`].
    pub position: Coordinates,

    /// [`Popup`] shown when this [`Marker`] is selected.
    pub popup: Popup,
}

/// Info popup of a [`Marker`].
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// Name of the listing.
    pub title: String,

    /// Thumbnail image of the listing, if any.
    pub thumbnail: Option<FileId>,

    /// Single-line address of the listing.
    pub address: String,

    /// [`DisplayPrice`] of the listing.
    pub price: DisplayPrice,

    /// Path of the listing detail page.
    pub link: String,
}

impl Overlay {
    /// Builds an [`Overlay`] of the provided [`DisplayListing`]s.
    ///
    /// Listings without [`Coordinates`] get no [`Marker`].
    #[must_use]
    pub fn from_listings<'l>(
        listings: impl IntoIterator<Item = &'l DisplayListing>,
    ) -> Self {
        let markers = listings
            .into_iter()
            .filter_map(|l| {
                Some(Marker {
                    listing_id: l.id,
                    position: l.coordinates?,
                    popup: Popup {
                        title: l.name.clone(),
                        thumbnail: l.thumbnail.clone(),
                        address: l.address_line.clone(),
                        price: l.price,
                        link: format!("/properties/{}", l.id),
                    },
                })
            })
            .collect::<Vec<_>>();
        let bounds = Bounds::containing(markers.iter().map(|m| m.position));
        Self { markers, bounds }
    }

    /// Returns the [`Marker`]s of this [`Overlay`].
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns [`Bounds`] to fit the map to, if there are any [`Marker`]s.
    #[must_use]
    pub const fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Selects the [`Marker`] of the listing with the provided `id`,
    /// returning its [`Popup`].
    #[must_use]
    pub fn select(&self, id: listing::Id) -> Option<&Popup> {
        self.markers
            .iter()
            .find(|m| m.listing_id == id)
            .map(|m| &m.popup)
    }
}
