//! [`Command`] definition.

pub mod create_session;
pub mod delete_saved_property;
pub mod delete_session;
pub mod refresh_session;
pub mod save_property;
pub mod submit_enquiry;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_session::CreateSession,
    delete_saved_property::DeleteSavedProperty, delete_session::DeleteSession,
    refresh_session::RefreshSession, save_property::SaveProperty,
    submit_enquiry::SubmitEnquiry,
};
