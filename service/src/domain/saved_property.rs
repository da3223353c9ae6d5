//! [`SavedPropertyLink`] definitions.

use crate::domain::{listing, user};

/// [`listing::Id`] saved by a [`User`].
///
/// [`User`]: crate::domain::User
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SavedPropertyLink {
    /// [`user::Id`] of the owner.
    pub user_id: user::Id,

    /// [`listing::Id`] of the saved property.
    pub property_id: listing::Id,
}

impl SavedPropertyLink {
    /// Returns the key identifying this [`SavedPropertyLink`] uniquely.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.user_id, self.property_id)
    }
}
