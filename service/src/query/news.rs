//! [`news::Article`] queries definitions.

use common::operations::By;

use crate::{domain::news, read};

use super::CmsQuery;

/// Queries a [`read::news::list::Page`] of the newest [`news::Article`]s.
pub type List =
    CmsQuery<By<read::news::list::Page, read::news::list::Arguments>>;

/// Queries a [`news::Article`] by its [`news::Id`].
pub type ById = CmsQuery<By<Option<news::Article>, news::Id>>;
