//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use common::Price;

#[cfg(doc)]
use infra::{Cms, Maps};

use self::domain::{feature, Language};
pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [`feature::Table`] resolving listing features.
    pub features: feature::Table,

    /// [`Language`] content is shown in, unless requested otherwise.
    pub default_language: Language,

    /// Upper bound of price sliders, used when no upper price bound is set.
    pub price_ceiling: Price,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<C, M> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Cms`] of this [`Service`].
    cms: C,

    /// [`Maps`] provider of this [`Service`].
    maps: M,
}

impl<C, M> Service<C, M> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, cms: C, maps: M) -> Self {
        Self { config, cms, maps }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Cms`] of this [`Service`].
    #[must_use]
    pub const fn cms(&self) -> &C {
        &self.cms
    }

    /// Returns [`Maps`] provider of this [`Service`].
    #[must_use]
    pub const fn maps(&self) -> &M {
        &self.maps
    }
}
