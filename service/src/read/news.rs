//! News [`Article`]-related read definitions.

#[cfg(doc)]
use crate::domain::news::Article;

pub mod list {
    //! [`Article`] list definitions.
    //!
    //! [`Article`]: crate::domain::news::Article

    use common::define_pagination;

    use crate::domain::news;

    define_pagination!(news::Article, ());
}
