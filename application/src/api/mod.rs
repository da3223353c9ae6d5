//! GraphQL API definitions.

pub mod content;
pub mod geo;
pub mod listing;
pub mod map;
mod mutation;
mod query;
pub mod scalar;
pub mod user;

use common::pagination::PageState;
use juniper::{graphql_object, EmptySubscription};

use crate::{define_error, Context};

pub use self::{
    listing::Listing, map::Overlay, mutation::Mutation, query::Query,
    user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "`page` must not be negative and `pageSize` must be \
                     positive"]
        Invalid,

        #[code = "PAGE_OUT_OF_RANGE"]
        #[status = NOT_FOUND]
        #[message = "Requested page lies beyond the last one"]
        OutOfRange,
    }
}

/// Information about a page of a list.
#[derive(Clone, Copy, Debug)]
pub struct PageInfo(PageState);

impl From<PageState> for PageInfo {
    fn from(state: PageState) -> Self {
        Self(state)
    }
}

/// Information about a page of a list.
#[graphql_object(context = Context)]
impl PageInfo {
    /// Zero-based index of this page.
    #[must_use]
    pub fn index(&self) -> i32 {
        to_int(self.0.index().0)
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub fn size(&self) -> i32 {
        to_int(self.0.size().get())
    }

    /// Total number of items in the list.
    #[must_use]
    pub fn total_count(&self) -> i32 {
        to_int(self.0.total_count())
    }

    /// Total number of pages in the list.
    #[must_use]
    pub fn total_pages(&self) -> i32 {
        to_int(self.0.total_pages())
    }

    /// Indicator whether there is a next page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.0.has_next()
    }

    /// Indicator whether there is a previous page.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.0.has_previous()
    }
}

/// Converts the provided count into a GraphQL `Int`, saturating.
fn to_int(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod spec {
    use common::pagination::{PageIndex, PageSize, PageState};

    use super::PageInfo;

    #[test]
    fn describes_page_position() {
        let info = PageInfo::from(
            PageState::new(PageIndex(1), PageSize::GRID, 25).unwrap(),
        );

        assert_eq!(info.index(), 1);
        assert_eq!(info.size(), 12);
        assert_eq!(info.total_count(), 25);
        assert_eq!(info.total_pages(), 3);
        assert!(info.has_next_page());
        assert!(info.has_previous_page());
    }
}
