//! [`Listing`] list definitions.

mod predicate;
mod query_string;

use std::collections::BTreeSet;

use common::{define_pagination, Price};
use derive_more::{AsRef, Display};

#[cfg(doc)]
use crate::domain::Listing;
use crate::domain::{geo::Location, listing};

define_pagination!(listing::Listing, Search);

/// Default upper [`PriceBound`] shown by price sliders.
///
/// Only ever displayed, never sent as a predicate.
pub const PRICE_CEILING: u32 = 50_000_000;

/// Bound of a price range.
pub type PriceBound = Price;

/// Number of bedrooms.
pub type Bedrooms = u8;

/// Search of [`Listing`]s within a [`Section`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Search {
    /// [`Section`] being searched.
    pub section: Section,

    /// [`Filter`] of the [`Listing`]s.
    pub filter: Filter,
}

/// Section of the website listing [`Listing`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Section {
    /// Properties for sale.
    #[default]
    Buy,

    /// Recently sold properties.
    Sold,

    /// Properties saved by a user.
    Saved(BTreeSet<listing::Id>),
}

/// User's search criteria of [`Listing`]s.
///
/// Lives entirely in the URL query string of a listing page: see
/// [`Filter::to_query_string()`] and [`Filter::from_query_string()`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// [`Location`] the [`Listing`]s are located at.
    pub location: Option<Location>,

    /// [`listing::TypeId`] of the [`Listing`]s.
    pub property_type: Option<listing::TypeId>,

    /// Number of bedrooms in the [`Listing`]s.
    pub bedrooms: Option<Bedrooms>,

    /// Lower [`PriceBound`].
    price_min: Option<PriceBound>,

    /// Upper [`PriceBound`].
    price_max: Option<PriceBound>,

    /// [`FeatureTag`]s all the [`Listing`]s must have.
    pub features: BTreeSet<FeatureTag>,
}

impl Filter {
    /// Sets the price range of this [`Filter`].
    ///
    /// [`None`] is returned if `min` is greater than `max`.
    #[must_use]
    pub fn with_price_range(
        self,
        min: Option<PriceBound>,
        max: Option<PriceBound>,
    ) -> Option<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return None;
            }
        }
        Some(Self {
            price_min: min,
            price_max: max,
            ..self
        })
    }

    /// Returns the lower [`PriceBound`] of this [`Filter`].
    #[must_use]
    pub const fn price_min(&self) -> Option<PriceBound> {
        self.price_min
    }

    /// Returns the upper [`PriceBound`] of this [`Filter`].
    #[must_use]
    pub const fn price_max(&self) -> Option<PriceBound> {
        self.price_max
    }

    /// Returns the upper [`PriceBound`] to display, falling back to the
    /// provided `ceiling` if none is set.
    #[must_use]
    pub fn price_max_or(&self, ceiling: PriceBound) -> PriceBound {
        self.price_max.unwrap_or(ceiling)
    }
}

/// Tag of a [`Listing`] feature, like `pool`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str)]
pub struct FeatureTag(String);

impl FeatureTag {
    /// Creates a new [`FeatureTag`] if the given `tag` is valid.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Option<Self> {
        let tag = tag.into();
        Self::check(&tag).then_some(Self(tag))
    }

    /// Checks whether the given `tag` is a valid [`FeatureTag`].
    fn check(tag: &str) -> bool {
        tag.trim() == tag && !tag.is_empty() && tag.len() <= 64
    }
}

impl std::str::FromStr for FeatureTag {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FeatureTag`")
    }
}

#[cfg(test)]
mod spec {
    use common::Price;

    use super::{Filter, PRICE_CEILING};

    #[test]
    fn price_range_keeps_order() {
        let f = Filter::default()
            .with_price_range(Some(Price::from(100)), Some(Price::from(200)))
            .unwrap();
        assert_eq!(f.price_min(), Some(Price::from(100)));
        assert_eq!(f.price_max(), Some(Price::from(200)));

        assert!(Filter::default()
            .with_price_range(Some(Price::from(300)), Some(Price::from(200)))
            .is_none());
        assert!(Filter::default()
            .with_price_range(Some(Price::from(300)), None)
            .is_some());
    }

    #[test]
    fn ceiling_is_display_only() {
        let ceiling = Price::from(PRICE_CEILING);
        let f = Filter::default()
            .with_price_range(Some(Price::from(5_000_000)), None)
            .unwrap();

        assert_eq!(f.price_max_or(ceiling), ceiling);
        assert_eq!(f.price_max(), None);
    }
}
