//! [`Listing`]-related read definitions.

pub mod display;
pub mod list;

#[cfg(doc)]
use crate::domain::Listing;

pub use self::display::{adapt, DisplayListing};
