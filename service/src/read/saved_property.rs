//! [`SavedSet`] definitions.

use std::collections::BTreeSet;

use crate::domain::listing;

/// Set of [`listing::Id`]s saved by a single user.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SavedSet(BTreeSet<listing::Id>);

impl SavedSet {
    /// Indicates whether the listing with the provided `id` is saved.
    #[must_use]
    pub fn contains(&self, id: listing::Id) -> bool {
        self.0.contains(&id)
    }

    /// Returns the saved [`listing::Id`]s in ascending order.
    #[must_use]
    pub const fn ids(&self) -> &BTreeSet<listing::Id> {
        &self.0
    }

    /// Indicates whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds the provided `id`, returning `false` if it was already saved.
    pub fn insert(&mut self, id: listing::Id) -> bool {
        self.0.insert(id)
    }

    /// Removes the provided `id`, returning `false` if it wasn't saved.
    pub fn remove(&mut self, id: listing::Id) -> bool {
        self.0.remove(&id)
    }
}

impl FromIterator<listing::Id> for SavedSet {
    fn from_iter<I: IntoIterator<Item = listing::Id>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<SavedSet> for BTreeSet<listing::Id> {
    fn from(set: SavedSet) -> Self {
        set.0
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::listing;

    use super::SavedSet;

    #[test]
    fn deduplicates_ids() {
        let mut set = [3, 1, 3]
            .into_iter()
            .map(listing::Id::from)
            .collect::<SavedSet>();

        assert_eq!(set.ids().len(), 2);
        assert!(!set.insert(listing::Id::from(1)));
        assert!(set.insert(listing::Id::from(2)));
        assert!(set.remove(listing::Id::from(3)));
        assert!(!set.contains(listing::Id::from(3)));
        assert_eq!(
            set.ids().iter().copied().map(u64::from).collect::<Vec<_>>(),
            [1, 2],
        );
    }
}
