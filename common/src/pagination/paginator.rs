//! [`Paginator`] state machine.
//!
//! The GraphQL API is stateless: every list query carries its own page
//! arguments and returns a self-describing [`Page`]. [`Paginator`] is the
//! consuming side of that contract for Rust clients of the backend (like a
//! server-rendered frontend). It keeps the current filter and page, issues
//! [`Request`]s and runs them through any [`Handler`] of [`Selector`]s.

use std::fmt;

use derive_more::Display;

use crate::Handler;

use super::{Arguments, Page, PageIndex, PageSize, PageState, Selector};

/// Status of a [`Paginator`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// Nothing has been requested yet.
    Idle,

    /// A [`Request`] is outstanding.
    Loading,

    /// The last [`Request`] succeeded.
    Loaded,

    /// The last [`Request`] failed with the contained message.
    Errored(String),
}

/// Identifier of a [`Request`] issued by a [`Paginator`].
///
/// Identifiers grow monotonically, so only the latest one is ever current.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RequestId(u64);

/// Request for a page issued by a [`Paginator`].
#[derive(Clone, Debug, PartialEq)]
pub struct Request<F> {
    /// [`RequestId`] to [`Paginator::complete()`] this [`Request`] with.
    pub id: RequestId,

    /// [`Selector`] of the requested page.
    pub selector: Selector<F>,
}

/// Page-by-page browser of a filtered result set.
///
/// Transitions:
/// - `Idle | Errored --load--> Loading`;
/// - `any --change_filter--> Loading` (back to the first page);
/// - `Loaded --change_page(n)--> Loading` if `n < total_pages`;
/// - `Loading --complete(Ok)--> Loaded`;
/// - `Loading --complete(Err)--> Errored`.
///
/// Completions of superseded [`Request`]s are discarded, so a slow earlier
/// response never overwrites a later one.
#[derive(Clone, Debug, PartialEq)]
pub struct Paginator<F, T> {
    /// Current filter.
    filter: F,

    /// [`PageSize`] of every requested page.
    size: PageSize,

    /// Current [`Status`].
    status: Status,

    /// [`PageState`] of the last loaded page.
    state: Option<PageState>,

    /// Items of the last loaded page.
    items: Vec<T>,

    /// Sequence number of the latest issued [`Request`].
    sequence: u64,
}

impl<F, T> Paginator<F, T>
where
    F: Clone,
{
    /// Creates a new idle [`Paginator`].
    #[must_use]
    pub fn new(filter: F, size: PageSize) -> Self {
        Self {
            filter,
            size,
            status: Status::Idle,
            state: None,
            items: Vec::new(),
            sequence: 0,
        }
    }

    /// Returns the current [`Status`].
    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Returns the current filter.
    #[must_use]
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Returns [`PageState`] of the last loaded page, if any.
    #[must_use]
    pub fn page(&self) -> Option<&PageState> {
        self.state.as_ref()
    }

    /// Returns items of the last loaded page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Starts loading the first page.
    ///
    /// [`None`] is returned unless this [`Paginator`] is [`Status::Idle`] or
    /// [`Status::Errored`].
    pub fn load(&mut self) -> Option<Request<F>> {
        match self.status {
            Status::Idle | Status::Errored(_) => {
                Some(self.issue(PageIndex::FIRST))
            }
            Status::Loading | Status::Loaded => None,
        }
    }

    /// Replaces the filter and starts loading its first page.
    pub fn change_filter(&mut self, filter: F) -> Request<F> {
        self.filter = filter;
        self.issue(PageIndex::FIRST)
    }

    /// Starts loading the page at the provided `index`.
    ///
    /// [`None`] is returned and nothing changes unless this [`Paginator`] is
    /// [`Status::Loaded`] and the page exists.
    pub fn change_page(&mut self, index: PageIndex) -> Option<Request<F>> {
        if self.status != Status::Loaded {
            return None;
        }
        let state = self.state?;
        if index.0 >= state.total_pages() {
            return None;
        }
        Some(self.issue(index))
    }

    /// Starts loading the next page, if any.
    pub fn next_page(&mut self) -> Option<Request<F>> {
        let index = self.state?.next()?.index();
        self.change_page(index)
    }

    /// Starts loading the previous page, if any.
    pub fn previous_page(&mut self) -> Option<Request<F>> {
        let index = self.state?.previous()?.index();
        self.change_page(index)
    }

    /// Completes the [`Request`] with the provided `id`.
    ///
    /// Returns `false` if the [`Request`] has been superseded and its
    /// `result` is discarded.
    pub fn complete<E>(
        &mut self,
        id: RequestId,
        result: Result<Page<T>, E>,
    ) -> bool
    where
        E: fmt::Display,
    {
        if id != RequestId(self.sequence) || self.status != Status::Loading {
            return false;
        }
        match result {
            Ok(page) => {
                self.state = Some(page.state);
                self.items = page.items;
                self.status = Status::Loaded;
            }
            Err(e) => {
                self.state = None;
                self.items.clear();
                self.status = Status::Errored(e.to_string());
            }
        }
        true
    }

    /// Executes the provided [`Request`] with the `handler` and completes it.
    ///
    /// Returns `false` if the [`Request`] has been superseded meanwhile.
    pub async fn run<H>(&mut self, handler: &H, request: Request<F>) -> bool
    where
        H: Handler<Selector<F>, Ok = Page<T>>,
        H::Err: fmt::Display,
    {
        let Request { id, selector } = request;
        let result = handler.execute(selector).await;
        self.complete(id, result)
    }

    /// Issues a new [`Request`] for the page at the provided `index`.
    fn issue(&mut self, index: PageIndex) -> Request<F> {
        self.sequence += 1;
        self.status = Status::Loading;
        Request {
            id: RequestId(self.sequence),
            selector: Selector {
                arguments: Arguments {
                    index,
                    size: self.size,
                },
                filter: self.filter.clone(),
            },
        }
    }
}

#[cfg(test)]
mod spec {
    use std::cell::RefCell;

    use derive_more::Display;

    use crate::{
        pagination::{Page, PageIndex, PageSize, PageState, Selector},
        Handler,
    };

    use super::{Paginator, Status};

    /// Serves pages of `0..total` numbers greater or equal to the filter.
    struct Numbers {
        total: usize,
        requests: RefCell<Vec<Selector<usize>>>,
    }

    #[derive(Debug, Display)]
    #[display("store is down")]
    struct Down;

    impl Numbers {
        fn new(total: usize) -> Self {
            Self {
                total,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Handler<Selector<usize>> for Numbers {
        type Ok = Page<usize>;
        type Err = Down;

        async fn execute(
            &self,
            selector: Selector<usize>,
        ) -> Result<Self::Ok, Self::Err> {
            self.requests.borrow_mut().push(selector.clone());
            let all = (selector.filter..self.total).collect::<Vec<_>>();
            let size = selector.arguments.size;
            let state = PageState::new(
                selector.arguments.index,
                size,
                all.len(),
            )
            .ok_or(Down)?;
            Ok(Page {
                items: all
                    .into_iter()
                    .skip(state.index().0 * size.get())
                    .take(size.get())
                    .collect(),
                state,
            })
        }
    }

    fn loaded(total: usize) -> Paginator<usize, usize> {
        let mut p = Paginator::new(0, PageSize::GRID);
        let req = p.load().unwrap();
        let page = Page {
            items: (0..total.min(12)).collect(),
            state: PageState::new(req.selector.arguments.index, PageSize::GRID, total)
                .unwrap(),
        };
        assert!(p.complete::<Down>(req.id, Ok(page)));
        p
    }

    #[test]
    fn loads_from_idle_only_once() {
        let mut p = Paginator::<usize, usize>::new(0, PageSize::GRID);
        assert_eq!(p.status(), &Status::Idle);

        let req = p.load().unwrap();
        assert_eq!(req.selector.arguments.index, PageIndex(0));
        assert_eq!(p.status(), &Status::Loading);
        assert!(p.load().is_none());
    }

    #[test]
    fn ignores_out_of_range_page() {
        let mut p = loaded(25);
        assert_eq!(p.page().unwrap().total_pages(), 3);

        let before = p.clone();
        assert!(p.change_page(PageIndex(3)).is_none());
        assert_eq!(p, before);

        assert!(p.change_page(PageIndex(2)).is_some());
        assert_eq!(p.status(), &Status::Loading);
    }

    #[test]
    fn ignores_page_change_unless_loaded() {
        let mut p = Paginator::<usize, usize>::new(0, PageSize::GRID);
        assert!(p.change_page(PageIndex(0)).is_none());

        _ = p.load().unwrap();
        assert!(p.change_page(PageIndex(0)).is_none());
    }

    #[test]
    fn ignores_pages_of_empty_result() {
        let mut p = loaded(0);

        assert!(p.change_page(PageIndex(0)).is_none());
        assert!(p.next_page().is_none());
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut p = loaded(25);
        let req = p.change_page(PageIndex(2)).unwrap();
        assert_eq!(req.selector.arguments.index, PageIndex(2));

        let req = p.change_filter(5);
        assert_eq!(req.selector.arguments.index, PageIndex(0));
        assert_eq!(req.selector.filter, 5);
        assert_eq!(p.status(), &Status::Loading);
    }

    #[test]
    fn discards_stale_responses() {
        let mut p = loaded(25);
        let slow = p.change_page(PageIndex(1)).unwrap();
        let fast = p.change_filter(20);

        let fast_page = Page {
            items: vec![20, 21, 22, 23, 24],
            state: PageState::new(PageIndex(0), PageSize::GRID, 5).unwrap(),
        };
        assert!(p.complete::<Down>(fast.id, Ok(fast_page)));

        let slow_page = Page {
            items: (12..24).collect(),
            state: PageState::new(PageIndex(1), PageSize::GRID, 25).unwrap(),
        };
        assert!(!p.complete::<Down>(slow.id, Ok(slow_page)));

        assert_eq!(p.items(), &[20, 21, 22, 23, 24]);
        assert_eq!(p.page().unwrap().total_count(), 5);
    }

    #[test]
    fn failure_falls_back_to_empty_result() {
        let mut p = loaded(25);
        let req = p.next_page().unwrap();

        assert!(p.complete(req.id, Err::<Page<usize>, _>(Down)));
        assert_eq!(p.status(), &Status::Errored("store is down".into()));
        assert!(p.items().is_empty());
        assert!(p.page().is_none());

        assert!(p.load().is_some());
    }

    #[tokio::test]
    async fn runs_requests_through_handler() {
        let store = Numbers::new(30);
        let mut p = Paginator::new(0, PageSize::GRID);

        let req = p.load().unwrap();
        assert!(p.run(&store, req).await);
        assert_eq!(p.items(), (0..12).collect::<Vec<_>>().as_slice());

        let req = p.next_page().unwrap();
        assert!(p.run(&store, req).await);
        assert_eq!(p.page().unwrap().index(), PageIndex(1));
        assert_eq!(p.items(), (12..24).collect::<Vec<_>>().as_slice());

        let req = p.change_filter(25);
        assert!(p.run(&store, req).await);
        assert_eq!(p.items(), &[25, 26, 27, 28, 29]);
        assert_eq!(p.page().unwrap().total_pages(), 1);

        let requests = store.requests.borrow();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].arguments.index, PageIndex(1));
        assert_eq!(requests[2].arguments.index, PageIndex(0));
    }

    #[tokio::test]
    async fn walks_back_to_previous_page() {
        let store = Numbers::new(30);
        let mut p = Paginator::new(0, PageSize::GRID);

        assert!(p.previous_page().is_none());

        let req = p.load().unwrap();
        assert!(p.run(&store, req).await);
        assert!(p.previous_page().is_none());

        let req = p.change_page(PageIndex(2)).unwrap();
        assert!(p.run(&store, req).await);
        assert_eq!(p.items(), (24..30).collect::<Vec<_>>().as_slice());
        assert!(p.next_page().is_none());

        let req = p.previous_page().unwrap();
        assert_eq!(req.selector.arguments.index, PageIndex(1));
        assert!(p.run(&store, req).await);
        assert_eq!(p.items(), (12..24).collect::<Vec<_>>().as_slice());
        assert_eq!(p.status(), &Status::Loaded);
    }
}
