//! Domain definitions.

pub mod club;
pub mod enquiry;
pub mod feature;
pub mod geo;
pub mod language;
pub mod listing;
pub mod media;
pub mod news;
pub mod saved_property;
pub mod team;
pub mod user;

pub use self::{
    enquiry::Enquiry, language::Language, listing::Listing,
    saved_property::SavedPropertyLink, user::User,
};
