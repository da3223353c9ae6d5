//! URL query string representation of a [`Filter`].

use std::str::FromStr as _;

use url::form_urlencoded;

use crate::domain::{
    geo::{Location, LocationId, LocationName},
    listing,
};

use super::{Bedrooms, FeatureTag, Filter, PriceBound};

/// URL parameter of [`Filter::location`], as `{id}:{name}`.
const CITY: &str = "city";

/// URL parameter of [`Filter::property_type`].
const TYPE: &str = "type";

/// URL parameter of [`Filter::bedrooms`].
const BEDROOM: &str = "bedroom";

/// URL parameter of [`Filter::price_min()`].
const PRICE_MIN: &str = "price_min";

/// URL parameter of [`Filter::price_max()`].
const PRICE_MAX: &str = "price_max";

/// Repeatable URL parameter of [`Filter::features`].
const FEATURES: &str = "features";

impl Filter {
    /// Serializes this [`Filter`] into a URL query string (without a leading
    /// `?`).
    ///
    /// Parameters always go in the same order, so equal [`Filter`]s produce
    /// equal strings.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(Location { id, name }) = &self.location {
            _ = query.append_pair(CITY, &format!("{id}:{name}"));
        }
        if let Some(ty) = self.property_type {
            _ = query.append_pair(TYPE, &ty.to_string());
        }
        if let Some(n) = self.bedrooms {
            _ = query.append_pair(BEDROOM, &n.to_string());
        }
        if let Some(min) = self.price_min {
            _ = query.append_pair(PRICE_MIN, &min.to_string());
        }
        if let Some(max) = self.price_max {
            _ = query.append_pair(PRICE_MAX, &max.to_string());
        }
        for tag in &self.features {
            _ = query.append_pair(FEATURES, tag.as_ref());
        }
        query.finish()
    }

    /// Parses a [`Filter`] from the provided URL query string.
    ///
    /// A leading `?` is allowed. Unknown parameters and invalid values are
    /// ignored, so any string produces some [`Filter`]. A price range with
    /// the lower bound above the upper one is dropped entirely.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut filter = Self::default();
        let (mut min, mut max) = (None, None);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                CITY => {
                    if let Some(location) = parse_location(&value) {
                        filter.location = Some(location);
                    }
                }
                TYPE => {
                    if let Ok(ty) = listing::TypeId::from_str(&value) {
                        filter.property_type = Some(ty);
                    }
                }
                BEDROOM => {
                    if let Ok(n) = Bedrooms::from_str(&value) {
                        filter.bedrooms = Some(n);
                    }
                }
                PRICE_MIN => {
                    if let Ok(p) = PriceBound::from_str(&value) {
                        min = Some(p);
                    }
                }
                PRICE_MAX => {
                    if let Ok(p) = PriceBound::from_str(&value) {
                        max = Some(p);
                    }
                }
                FEATURES => {
                    if let Some(tag) = FeatureTag::new(value) {
                        _ = filter.features.insert(tag);
                    }
                }
                _ => {}
            }
        }

        filter.clone().with_price_range(min, max).unwrap_or(filter)
    }
}

/// Parses a [`Location`] from its `{id}:{name}` representation.
fn parse_location(value: &str) -> Option<Location> {
    let (id, name) = value.split_once(':')?;
    Some(Location {
        id: LocationId::new(id)?,
        name: LocationName::new(name)?,
    })
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::Price;

    use crate::domain::{
        geo::{Location, LocationId, LocationName},
        listing,
    };

    use super::super::{FeatureTag, Filter};

    fn full() -> Filter {
        Filter {
            location: Some(Location {
                id: LocationId::new("2067").unwrap(),
                name: LocationName::new("Chatswood West").unwrap(),
            }),
            property_type: Some(listing::TypeId::from(3)),
            bedrooms: Some(4),
            features: ["pool", "garden & shed"]
                .into_iter()
                .map(|t| FeatureTag::new(t).unwrap())
                .collect(),
            ..Filter::default()
        }
        .with_price_range(Some(Price::from(900_000)), Some(Price::from(2_500_000)))
        .unwrap()
    }

    #[test]
    fn serializes_in_fixed_order() {
        assert_eq!(
            full().to_query_string(),
            "city=2067%3AChatswood+West&type=3&bedroom=4\
             &price_min=900000&price_max=2500000\
             &features=garden+%26+shed&features=pool",
        );
        assert_eq!(Filter::default().to_query_string(), "");
    }

    #[test]
    fn round_trips() {
        let filters = [
            Filter::default(),
            full(),
            Filter {
                bedrooms: Some(0),
                ..Filter::default()
            },
            Filter::default()
                .with_price_range(Some(Price::from(5_000_000)), None)
                .unwrap(),
            Filter::default()
                .with_price_range(None, "999.5".parse().ok())
                .unwrap(),
            Filter {
                features: BTreeSet::from([FeatureTag::new("a=b").unwrap()]),
                ..Filter::default()
            },
        ];
        for f in filters {
            let qs = f.to_query_string();
            assert_eq!(Filter::from_query_string(&qs), f, "query = {qs}");
        }
    }

    #[test]
    fn accepts_leading_question_mark() {
        assert_eq!(
            Filter::from_query_string(&format!("?{}", full().to_query_string())),
            full(),
        );
    }

    #[test]
    fn ignores_garbage() {
        let f = Filter::from_query_string(
            "city=nocolon&type=house&bedroom=-1&price_min=cheap\
             &features=&utm_source=mail&features=pool",
        );

        assert_eq!(
            f,
            Filter {
                features: BTreeSet::from([FeatureTag::new("pool").unwrap()]),
                ..Filter::default()
            },
        );
    }

    #[test]
    fn drops_inverted_price_range() {
        let f = Filter::from_query_string("price_min=300&price_max=200&bedroom=2");

        assert_eq!(f.price_min(), None);
        assert_eq!(f.price_max(), None);
        assert_eq!(f.bedrooms, Some(2));
    }
}
