//! [`club::Offer`] queries definitions.

use common::operations::By;

#[cfg(doc)]
use crate::domain::club;
use crate::read;

use super::CmsQuery;

/// Queries a [`read::club::list::Page`] of Club Diamondz [`club::Offer`]s.
pub type List =
    CmsQuery<By<read::club::list::Page, read::club::list::Arguments>>;
