//! Read entities definitions.

pub mod club;
pub mod listing;
pub mod map;
pub mod news;
pub mod saved_property;
pub mod team;

pub use self::{map::Overlay, saved_property::SavedSet};
