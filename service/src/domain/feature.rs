//! Listing [`Feature`] definitions.

use common::define_kind;
use derive_more::{Display, From, Into};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Raw feature value of a listing, as stored in the CMS.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature {
    /// [`Id`] of this [`Feature`] in the CMS lookup collection.
    pub id: Id,

    /// Value of this [`Feature`], like `3` bedrooms.
    pub value: String,
}

/// ID of a [`Feature`] in the CMS lookup collection.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq,
)]
#[serde(transparent)]
pub struct Id(u32);

define_kind! {
    #[doc = "Semantic meaning of a [`Feature`]."]
    #[case = "lowercase"]
    enum Key {
        #[doc = "Number of bedrooms."]
        Bedrooms = 1,

        #[doc = "Number of bathrooms."]
        Bathrooms = 2,

        #[doc = "Number of parking spaces."]
        Parking = 3,

        #[doc = "Number of floors."]
        Floors = 4,

        #[doc = "Number of rooms."]
        Rooms = 5,

        #[doc = "Additional free-form features."]
        Additional = 6,
    }
}

/// Lookup table resolving [`Feature`] [`Id`]s into their [`Key`]s.
///
/// The CMS schema owns the IDs, so they are configurable.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, SmartDefault)]
#[serde(default)]
pub struct Table {
    /// [`Id`] of the [`Key::Bedrooms`] feature.
    #[default(Id(1))]
    pub bedrooms: Id,

    /// [`Id`] of the [`Key::Bathrooms`] feature.
    #[default(Id(2))]
    pub bathrooms: Id,

    /// [`Id`] of the [`Key::Parking`] feature.
    #[default(Id(3))]
    pub parking: Id,

    /// [`Id`] of the [`Key::Floors`] feature.
    #[default(Id(4))]
    pub floors: Id,

    /// [`Id`] of the [`Key::Rooms`] feature.
    #[default(Id(5))]
    pub rooms: Id,

    /// [`Id`] of the [`Key::Additional`] feature.
    #[default(Id(20))]
    pub additional: Id,
}

impl Table {
    /// Returns the [`Id`] of the provided [`Key`].
    #[must_use]
    pub const fn id(&self, key: Key) -> Id {
        match key {
            Key::Bedrooms => self.bedrooms,
            Key::Bathrooms => self.bathrooms,
            Key::Parking => self.parking,
            Key::Floors => self.floors,
            Key::Rooms => self.rooms,
            Key::Additional => self.additional,
        }
    }

    /// Resolves the [`Key`] of the provided [`Id`], if it's known.
    #[must_use]
    pub fn key(&self, id: Id) -> Option<Key> {
        Key::ALL.iter().copied().find(|k| self.id(*k) == id)
    }
}

#[cfg(test)]
mod spec {
    use super::{Id, Key, Table};

    #[test]
    fn default_table() {
        let table = Table::default();

        assert_eq!(table.key(Id::from(1)), Some(Key::Bedrooms));
        assert_eq!(table.key(Id::from(2)), Some(Key::Bathrooms));
        assert_eq!(table.key(Id::from(3)), Some(Key::Parking));
        assert_eq!(table.key(Id::from(4)), Some(Key::Floors));
        assert_eq!(table.key(Id::from(5)), Some(Key::Rooms));
        assert_eq!(table.key(Id::from(20)), Some(Key::Additional));
        assert_eq!(table.key(Id::from(6)), None);
    }

    #[test]
    fn resolves_reconfigured_ids() {
        let table = Table {
            bedrooms: Id::from(7),
            ..Table::default()
        };

        assert_eq!(table.id(Key::Bedrooms), Id::from(7));
        assert_eq!(table.key(Id::from(7)), Some(Key::Bedrooms));
        assert_eq!(table.key(Id::from(1)), None);
    }
}
