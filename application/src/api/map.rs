//! [`Overlay`]-related definitions.

use juniper::{graphql_object, GraphQLObject};
use service::read::{self, map};

use crate::{
    api::{
        geo::{Bounds, Coordinates},
        listing,
    },
    Context,
};

/// Markers of `Listing`s on a map.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    /// Underlying [`read::Overlay`].
    overlay: read::Overlay,

    /// User-visible message describing why the markers couldn't be loaded.
    error: Option<String>,
}

impl Overlay {
    /// Creates a new empty [`Overlay`] describing the failure.
    #[must_use]
    pub fn failed(error: impl ToString) -> Self {
        Self {
            overlay: read::Overlay::default(),
            error: Some(error.to_string()),
        }
    }
}

impl From<read::Overlay> for Overlay {
    fn from(overlay: read::Overlay) -> Self {
        Self {
            overlay,
            error: None,
        }
    }
}

/// Markers of `Listing`s on a map.
#[graphql_object(name = "ListingMap", context = Context)]
impl Overlay {
    /// Markers of the located `Listing`s.
    ///
    /// `Listing`s without coordinates are not marked.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.overlay.markers().iter().cloned().map(Into::into).collect()
    }

    /// Bounds to fit the map to, if there are any markers.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.overlay.bounds().map(Into::into)
    }

    /// Popup of the marker of the `Listing` with the provided ID, if it's
    /// marked.
    #[must_use]
    pub fn popup(&self, listing_id: listing::Id) -> Option<Popup> {
        self.overlay.select(listing_id.into()).cloned().map(Into::into)
    }

    /// Message describing why the markers couldn't be loaded.
    ///
    /// There are no markers whenever this is set.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Map marker of a single `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingMarker", context = Context)]
pub struct Marker {
    /// ID of the marked `Listing`.
    pub listing_id: listing::Id,

    /// Position of this marker.
    pub position: Coordinates,

    /// Popup shown when this marker is selected.
    pub popup: Popup,
}

impl From<map::Marker> for Marker {
    fn from(m: map::Marker) -> Self {
        Self {
            listing_id: m.listing_id.into(),
            position: m.position.into(),
            popup: m.popup.into(),
        }
    }
}

/// Info popup of a `ListingMarker`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingPopup", context = Context)]
pub struct Popup {
    /// Name of the `Listing`.
    pub title: String,

    /// ID of the thumbnail asset of the `Listing`, if any.
    pub thumbnail: Option<String>,

    /// Single-line address of the `Listing`.
    pub address: String,

    /// Price of the `Listing` as shown to visitors.
    pub price: String,

    /// Path of the `Listing` detail page.
    pub link: String,
}

impl From<map::Popup> for Popup {
    fn from(p: map::Popup) -> Self {
        Self {
            title: p.title,
            thumbnail: p.thumbnail.map(|t| t.to_string()),
            address: p.address,
            price: p.price.to_string(),
            link: p.link,
        }
    }
}
