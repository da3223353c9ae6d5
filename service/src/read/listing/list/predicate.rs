//! Compilation of a [`Search`] into a CMS [`Predicate`].

use crate::{
    domain::{
        feature::{self, Key},
        listing::Status,
    },
    infra::cms::Predicate,
};

use super::{Filter, Search, Section};

impl Search {
    /// Compiles this [`Search`] into a CMS [`Predicate`], resolving feature
    /// IDs with the provided [`feature::Table`].
    #[must_use]
    pub fn to_predicate(&self, features: &feature::Table) -> Predicate {
        self.filter.to_predicate(&self.section, features)
    }
}

impl Section {
    /// Returns the [`Predicate`] clauses selecting this [`Section`].
    fn clauses(&self) -> Vec<Predicate> {
        match self {
            Self::Buy => {
                vec![Predicate::eq("status", Status::Current.to_string())]
            }
            Self::Sold => {
                vec![Predicate::eq("status", Status::Sold.to_string())]
            }
            Self::Saved(ids) => vec![
                Predicate::is_in("id", ids.iter().map(|id| u64::from(*id))),
                Predicate::neq("status", Status::Inactive.to_string()),
            ],
        }
    }
}

impl Filter {
    /// Compiles this [`Filter`] within the provided [`Section`] into a CMS
    /// [`Predicate`].
    ///
    /// Unset criteria produce no clauses at all: an unset price bound is
    /// omitted rather than defaulted, so listings without a price are not
    /// excluded by accident.
    #[must_use]
    pub fn to_predicate(
        &self,
        section: &Section,
        features: &feature::Table,
    ) -> Predicate {
        let mut clauses = section.clauses();

        if let Some(location) = &self.location {
            clauses.push(Predicate::eq("postcode", location.id.to_string()));
            clauses.push(Predicate::eq("suburb", location.name.to_string()));
        }
        if let Some(ty) = self.property_type {
            clauses.push(Predicate::eq("type", u32::from(ty)));
        }
        if let Some(n) = self.bedrooms {
            clauses.push(Predicate::related(
                "features",
                Predicate::And(vec![
                    Predicate::eq(
                        "feature_id",
                        u32::from(features.id(Key::Bedrooms)),
                    ),
                    Predicate::eq("value", n.to_string()),
                ]),
            ));
        }
        if let Some(min) = self.price_min {
            clauses.push(Predicate::gte("price", min.to_string()));
        }
        if let Some(max) = self.price_max {
            clauses.push(Predicate::lte("price", max.to_string()));
        }
        clauses.extend(
            self.features
                .iter()
                .map(|tag| Predicate::eq("tags.tags_id", tag.to_string())),
        );

        Predicate::And(clauses)
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::Price;
    use serde_json::json;

    use crate::{
        domain::{
            feature,
            geo::{Location, LocationId, LocationName},
            listing,
        },
        infra::cms::predicate::Operator,
    };

    use super::super::{FeatureTag, Filter, Search, Section};

    fn table() -> feature::Table {
        feature::Table::default()
    }

    #[test]
    fn omits_absent_upper_price_bound() {
        let f = Filter::default()
            .with_price_range(Some(Price::from(5_000_000)), None)
            .unwrap();

        let p = f.to_predicate(&Section::Buy, &table());

        assert_eq!(
            p.operators("price").collect::<Vec<_>>(),
            [&Operator::Gte("5000000".into())],
        );
    }

    #[test]
    fn omits_absent_lower_price_bound() {
        let f = Filter::default()
            .with_price_range(None, Some(Price::from(800_000)))
            .unwrap();

        let p = f.to_predicate(&Section::Buy, &table());

        assert_eq!(
            p.operators("price").collect::<Vec<_>>(),
            [&Operator::Lte("800000".into())],
        );
    }

    #[test]
    fn empty_filter_selects_section_only() {
        let p = Filter::default().to_predicate(&Section::Sold, &table());

        assert_eq!(
            p.to_json(),
            json!({ "_and": [{ "status": { "_eq": "sold" } }] }),
        );
    }

    #[test]
    fn saved_section_excludes_inactive() {
        let ids = BTreeSet::from([listing::Id::from(42), listing::Id::from(7)]);

        let p = Filter::default().to_predicate(&Section::Saved(ids), &table());

        assert_eq!(
            p.to_json(),
            json!({ "_and": [
                { "id": { "_in": [7, 42] } },
                { "status": { "_neq": "inactive" } },
            ] }),
        );
    }

    #[test]
    fn compiles_every_criterion() {
        let search = Search {
            section: Section::Buy,
            filter: Filter {
                location: Some(Location {
                    id: LocationId::new("2067").unwrap(),
                    name: LocationName::new("Chatswood").unwrap(),
                }),
                property_type: Some(listing::TypeId::from(3)),
                bedrooms: Some(4),
                features: BTreeSet::from([
                    FeatureTag::new("pool").unwrap(),
                    FeatureTag::new("garden").unwrap(),
                ]),
                ..Filter::default()
            }
            .with_price_range(Some(Price::from(1)), Some(Price::from(2)))
            .unwrap(),
        };
        let table = feature::Table {
            bedrooms: feature::Id::from(11),
            ..table()
        };

        assert_eq!(
            search.to_predicate(&table).to_json(),
            json!({ "_and": [
                { "status": { "_eq": "current" } },
                { "postcode": { "_eq": "2067" } },
                { "suburb": { "_eq": "Chatswood" } },
                { "type": { "_eq": 3 } },
                { "features": { "_and": [
                    { "feature_id": { "_eq": 11 } },
                    { "value": { "_eq": "4" } },
                ] } },
                { "price": { "_gte": "1" } },
                { "price": { "_lte": "2" } },
                { "tags": { "tags_id": { "_eq": "garden" } } },
                { "tags": { "tags_id": { "_eq": "pool" } } },
            ] }),
        );
    }

    #[test]
    fn compiles_idempotently() {
        let search = Search {
            section: Section::Buy,
            filter: Filter::from_query_string(
                "city=2067:Chatswood&bedroom=3&price_min=100&features=pool",
            ),
        };
        let before = search.clone();

        let first = search.to_predicate(&table());
        let second = search.to_predicate(&table());

        assert_eq!(first, second);
        assert_eq!(search, before);
    }
}
