//! Club Diamondz [`Offer`]-related read definitions.

#[cfg(doc)]
use crate::domain::club::Offer;

pub mod list {
    //! [`Offer`] list definitions.
    //!
    //! [`Offer`]: crate::domain::club::Offer

    use common::define_pagination;

    use crate::domain::club;

    define_pagination!(club::Offer, ());
}
