//! [`Listing`]s queries definitions.

use common::{
    operations::{By, Select},
    pagination::{Page, PageIndex},
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{Language, Listing},
    infra::{
        cms::{self, Predicate},
        Cms,
    },
    read::{
        self,
        listing::{
            list::{self, Section},
            DisplayListing,
        },
        Overlay,
    },
    Service,
};

use super::Query;

/// Queries a [`Page`] of [`DisplayListing`]s matching a [`list::Search`].
#[derive(Clone, Debug)]
pub struct Browse {
    /// [`list::Selector`] of the [`Page`].
    pub selector: list::Selector,

    /// [`Language`] to show the [`DisplayListing`]s in.
    ///
    /// [`Config::default_language`] is used if [`None`].
    ///
    /// [`Config::default_language`]: crate::Config::default_language
    pub language: Option<Language>,
}

impl<C, M> Query<Browse> for Service<C, M>
where
    C: Cms<
        Select<By<list::Page, (list::Arguments, Predicate)>>,
        Ok = list::Page,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = Page<DisplayListing>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Browse) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Browse {
            selector: list::Selector { arguments, filter },
            language,
        } = query;
        let lang =
            language.unwrap_or_else(|| self.config().default_language.clone());

        if matches!(&filter.section, Section::Saved(ids) if ids.is_empty()) {
            if arguments.index != PageIndex::FIRST {
                return Err(tracerr::new!(E::PageOutOfRange(arguments.index)));
            }
            return Ok(Page::empty(arguments.size));
        }

        let predicate = filter.to_predicate(&self.config().features);
        let page = self
            .cms()
            .execute(Select(By::new((arguments, predicate))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if page.state.index() != arguments.index {
            return Err(tracerr::new!(E::PageOutOfRange(arguments.index)));
        }

        let features = &self.config().features;
        Ok(page.map(|l| read::listing::adapt(&l, &lang, features)))
    }
}

/// Queries an [`Overlay`] of all the [`Listing`]s matching a
/// [`list::Search`].
#[derive(Clone, Debug, Default)]
pub struct Map {
    /// [`list::Search`] of the [`Listing`]s.
    pub search: list::Search,

    /// [`Language`] to show the popups in.
    pub language: Option<Language>,
}

impl<C, M> Query<Map> for Service<C, M>
where
    C: Cms<
        Select<By<Vec<Listing>, Predicate>>,
        Ok = Vec<Listing>,
        Err = Traced<cms::Error>,
    >,
{
    type Ok = Overlay;
    type Err = Traced<cms::Error>;

    async fn execute(&self, query: Map) -> Result<Self::Ok, Self::Err> {
        let Map { search, language } = query;
        let lang =
            language.unwrap_or_else(|| self.config().default_language.clone());

        if matches!(&search.section, Section::Saved(ids) if ids.is_empty()) {
            return Ok(Overlay::default());
        }

        let features = &self.config().features;
        let listings = self
            .cms()
            .execute(Select(By::new(search.to_predicate(features))))
            .await
            .map_err(tracerr::wrap!())?;
        let shown = listings
            .iter()
            .map(|l| read::listing::adapt(l, &lang, features))
            .collect::<Vec<_>>();
        Ok(Overlay::from_listings(&shown))
    }
}

/// Error of [`Browse`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Cms`] error.
    #[display("`Cms` operation failed: {_0}")]
    Cms(cms::Error),

    /// Requested page lies beyond the last one.
    #[display("Page `{_0}` is out of range")]
    #[from(ignore)]
    PageOutOfRange(#[error(not(source))] PageIndex),
}
