//! Abstractions for page-number pagination.
//!
//! The application addresses pages with a zero-based [`PageIndex`], while
//! remote stores number pages from one ([`PageNumber`]). The only place the
//! two are converted is [`PageIndex::to_page_number()`] and
//! [`PageNumber::to_page_index()`].

mod paginator;

use std::num::NonZeroUsize;

use derive_more::Display;

pub use self::paginator::{Paginator, Request, RequestId, Status};

/// Positive number of items on a single page.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// [`PageSize`] of listing grids.
    pub const GRID: Self = Self(NonZeroUsize::MIN.saturating_add(11));

    /// [`PageSize`] of carousels.
    pub const CAROUSEL: Self = Self(NonZeroUsize::MIN.saturating_add(3));

    /// Creates a new [`PageSize`], if the provided `size` is positive.
    #[must_use]
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// Returns this [`PageSize`] as a [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::GRID
    }
}

/// Zero-based index of a page.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct PageIndex(pub usize);

impl PageIndex {
    /// Index of the first page.
    pub const FIRST: Self = Self(0);

    /// Converts this [`PageIndex`] into the one-based [`PageNumber`] used on
    /// the wire.
    #[must_use]
    pub const fn to_page_number(self) -> PageNumber {
        PageNumber(NonZeroUsize::MIN.saturating_add(self.0))
    }
}

/// One-based number of a page, as remote stores expect it.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// Creates a new [`PageNumber`], if the provided `number` is positive.
    #[must_use]
    pub fn new(number: usize) -> Option<Self> {
        NonZeroUsize::new(number).map(Self)
    }

    /// Returns this [`PageNumber`] as a [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Converts this [`PageNumber`] into the zero-based [`PageIndex`] used
    /// by the application.
    #[must_use]
    pub const fn to_page_index(self) -> PageIndex {
        PageIndex(self.0.get() - 1)
    }
}

/// Position of a page within a result set of a known size.
///
/// Always satisfies `index < max(total_pages, 1)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PageState {
    /// [`PageIndex`] of the current page.
    index: PageIndex,

    /// [`PageSize`] of every page.
    size: PageSize,

    /// Total number of items reported by the remote store.
    total_count: usize,
}

impl PageState {
    /// Creates a new [`PageState`].
    ///
    /// [`None`] is returned if the `index` is outside the existing pages.
    #[must_use]
    pub fn new(
        index: PageIndex,
        size: PageSize,
        total_count: usize,
    ) -> Option<Self> {
        (index.0 < Self::pages(size, total_count).max(1)).then_some(Self {
            index,
            size,
            total_count,
        })
    }

    /// Creates a new [`PageState`] clamping the `index` to the last existing
    /// page.
    #[must_use]
    pub fn clamped(index: PageIndex, size: PageSize, total_count: usize) -> Self {
        let last = Self::pages(size, total_count).saturating_sub(1);
        Self {
            index: PageIndex(index.0.min(last)),
            size,
            total_count,
        }
    }

    /// Returns [`PageIndex`] of the current page.
    #[must_use]
    pub const fn index(&self) -> PageIndex {
        self.index
    }

    /// Returns [`PageSize`] of the pages.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Returns total number of items.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns total number of pages, `ceil(total_count / size)`.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        Self::pages(self.size, self.total_count)
    }

    /// Indicates whether a page exists after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.index.0 + 1 < self.total_pages()
    }

    /// Indicates whether a page exists before the current one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.index.0 > 0
    }

    /// Returns the [`PageState`] of the page at the provided `index`, if it
    /// exists.
    #[must_use]
    pub fn jump(&self, index: PageIndex) -> Option<Self> {
        Self::new(index, self.size, self.total_count)
    }

    /// Returns the [`PageState`] of the next page, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.jump(PageIndex(self.index.0 + 1))
    }

    /// Returns the [`PageState`] of the previous page, if any.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.index.0.checked_sub(1).and_then(|i| self.jump(PageIndex(i)))
    }

    /// Calculates number of pages for the provided parameters.
    const fn pages(size: PageSize, total_count: usize) -> usize {
        total_count.div_ceil(size.get())
    }
}

/// A page of `T` items.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// [`PageState`] this [`Page`] was fetched at.
    pub state: PageState,
}

impl<T> Page<T> {
    /// Maps the items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            state: self.state,
        }
    }

    /// Creates an empty [`Page`] of the provided [`PageSize`].
    #[must_use]
    pub fn empty(size: PageSize) -> Self {
        Self {
            items: Vec::new(),
            state: PageState::clamped(PageIndex::FIRST, size, 0),
        }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// [`PageIndex`] of the requested page.
    pub index: PageIndex,

    /// [`PageSize`] of the requested page.
    pub size: PageSize,
}

impl Arguments {
    /// Creates new [`Arguments`] from the optional raw API values.
    ///
    /// [`None`] is returned if the values are negative or zero-sized.
    pub fn new<Num>(
        index: Option<Num>,
        size: Option<Num>,
        default_size: PageSize,
    ) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        Some(Self {
            index: PageIndex(match index {
                Some(i) => i.try_into().ok()?,
                None => 0,
            }),
            size: match size {
                Some(s) => PageSize::new(s.try_into().ok()?)?,
                None => default_size,
            },
        })
    }
}

/// Pagination selector.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, PageIndex, PageNumber, PageSize, PageState};

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    #[test]
    fn converts_page_index_to_page_number() {
        assert_eq!(PageIndex(0).to_page_number().get(), 1);
        assert_eq!(PageIndex(2).to_page_number().get(), 3);

        assert_eq!(PageNumber::new(1).unwrap().to_page_index(), PageIndex(0));
        assert_eq!(PageNumber::new(3).unwrap().to_page_index(), PageIndex(2));
        assert!(PageNumber::new(0).is_none());
    }

    #[test]
    fn page_size_presets() {
        assert_eq!(PageSize::GRID.get(), 12);
        assert_eq!(PageSize::CAROUSEL.get(), 4);
        assert!(PageSize::new(0).is_none());
    }

    #[test]
    fn total_pages_is_ceiling() {
        let cases = [(0, 12, 0), (1, 12, 1), (12, 12, 1), (13, 12, 2)];
        for (total, per_page, pages) in cases {
            let state =
                PageState::new(PageIndex(0), size(per_page), total).unwrap();
            assert_eq!(state.total_pages(), pages, "total = {total}");
        }

        let state = PageState::new(PageIndex(0), size(12), 25).unwrap();
        assert_eq!(state.total_pages(), 3);
    }

    #[test]
    fn index_stays_within_pages() {
        for total in 0..40_usize {
            for per_page in 1..8 {
                let pages = total.div_ceil(per_page);
                for index in 0..pages.max(1) + 3 {
                    let state =
                        PageState::new(PageIndex(index), size(per_page), total);
                    assert_eq!(state.is_some(), index < pages.max(1));

                    let clamped = PageState::clamped(
                        PageIndex(index),
                        size(per_page),
                        total,
                    );
                    assert!(clamped.index().0 <= pages.saturating_sub(1));
                }
            }
        }
    }

    #[test]
    fn empty_result_has_single_page_position() {
        let state = PageState::new(PageIndex(0), size(12), 0).unwrap();

        assert_eq!(state.total_pages(), 0);
        assert!(!state.has_next());
        assert!(!state.has_previous());
        assert!(PageState::new(PageIndex(1), size(12), 0).is_none());
    }

    #[test]
    fn navigates_between_pages() {
        let first = PageState::new(PageIndex(0), size(12), 25).unwrap();
        assert!(first.previous().is_none());

        let second = first.next().unwrap();
        assert_eq!(second.index(), PageIndex(1));
        assert!(second.has_next());
        assert!(second.has_previous());

        let last = second.next().unwrap();
        assert_eq!(last.index(), PageIndex(2));
        assert!(last.next().is_none());
        assert_eq!(last.previous(), Some(second));

        assert!(first.jump(PageIndex(3)).is_none());
        assert_eq!(first.jump(PageIndex(2)), Some(last));
    }

    #[test]
    fn parses_api_arguments() {
        let args = Arguments::new(None::<i32>, None, PageSize::GRID).unwrap();
        assert_eq!(args.index, PageIndex(0));
        assert_eq!(args.size, PageSize::GRID);

        let args = Arguments::new(Some(2), Some(4), PageSize::GRID).unwrap();
        assert_eq!(args.index, PageIndex(2));
        assert_eq!(args.size, PageSize::CAROUSEL);

        assert!(Arguments::new(Some(-1), None, PageSize::GRID).is_none());
        assert!(Arguments::new(None, Some(0), PageSize::GRID).is_none());
    }
}
