//! [`CollectionQuery`] definitions.

use std::fmt;

use common::{
    define_kind,
    pagination::{Arguments, PageNumber},
};
use serde::Deserialize;

use super::Predicate;

/// Query of a CMS collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionQuery {
    /// Fields to select, like `id` or `images.file.*`.
    pub fields: Vec<&'static str>,

    /// [`Predicate`] to filter items with.
    pub filter: Option<Predicate>,

    /// [`Sort`] order of items.
    pub sort: Vec<Sort>,

    /// [`Limit`] of the returned items.
    pub limit: Option<Limit>,

    /// [`PageNumber`] to return.
    pub page: Option<PageNumber>,

    /// [`Meta`] counts to return along with items.
    pub meta: Vec<Meta>,
}

impl CollectionQuery {
    /// Creates a new [`CollectionQuery`] selecting the provided `fields`.
    #[must_use]
    pub fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
            ..Self::default()
        }
    }

    /// Filters items with the provided [`Predicate`].
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Sorts items by the provided [`Sort`] order.
    #[must_use]
    pub fn sort(mut self, sort: impl IntoIterator<Item = Sort>) -> Self {
        self.sort.extend(sort);
        self
    }

    /// Limits the items to the provided [`Limit`].
    #[must_use]
    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Selects a single page described by the pagination [`Arguments`],
    /// along with the counts required to paginate further.
    #[must_use]
    pub fn paged(mut self, arguments: Arguments) -> Self {
        self.limit = Some(Limit::Items(arguments.size.get()));
        self.page = Some(arguments.index.to_page_number());
        self.meta = vec![Meta::FilterCount, Meta::TotalCount];
        self
    }

    /// Converts this [`CollectionQuery`] into URL query parameters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(6);
        if !self.fields.is_empty() {
            params.push(("fields", self.fields.join(",")));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter", filter.to_json().to_string()));
        }
        if !self.sort.is_empty() {
            params.push(("sort", join(&self.sort)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if !self.meta.is_empty() {
            params.push(("meta", join(&self.meta)));
        }
        params
    }
}

/// Joins the provided `items` with commas.
fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Sort order of a [`CollectionQuery`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sort {
    /// Ascending by the named field.
    Asc(&'static str),

    /// Descending by the named field.
    Desc(&'static str),
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc(field) => f.write_str(field),
            Self::Desc(field) => write!(f, "-{field}"),
        }
    }
}

/// Limit of items returned by a [`CollectionQuery`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Limit {
    /// At most the provided number of items.
    Items(usize),

    /// All the matching items.
    All,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items(n) => write!(f, "{n}"),
            Self::All => f.write_str("-1"),
        }
    }
}

define_kind! {
    #[doc = "Count returned along with the items of a [`CollectionQuery`]."]
    #[case = "snake_case"]
    enum Meta {
        #[doc = "Number of items matching the filter."]
        FilterCount = 1,

        #[doc = "Number of items in the whole collection."]
        TotalCount = 2,
    }
}

/// Items returned by a [`CollectionQuery`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Collection<R> {
    /// Returned items.
    pub data: Vec<R>,

    /// Requested [`Metadata`].
    #[serde(default)]
    pub meta: Option<Metadata>,
}

/// Counts returned along with a [`Collection`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Metadata {
    /// Number of items matching the filter.
    #[serde(default)]
    pub filter_count: Option<usize>,

    /// Number of items in the whole collection.
    #[serde(default)]
    pub total_count: Option<usize>,
}

impl Metadata {
    /// Returns the number of items the pagination is calculated from.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        self.filter_count.or(self.total_count)
    }
}
