//! GraphQL [`Query`]s definitions.

use common::pagination::{PageSize, PageState};
use juniper::graphql_object;
use service::{
    infra::cms,
    query::{self, listings},
    read::listing::list,
    Query as _,
};
use tracerr::Traced;

use crate::{
    api::{self, content, geo, listing::ListingPage, scalar},
    define_error, AsError, Context, Error,
};

/// Message shown instead of a list that couldn't be loaded.
const LOAD_FAILED: &str = "Failed to load, please try again later";

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Searches `Listing`s of the provided section.
    ///
    /// `search` is the URL query string of a listing page, like
    /// `city=2067:Chatswood&bedroom=3&price_min=500000`. Unknown parameters
    /// and invalid values are ignored.
    ///
    /// Never fails on unavailable content: an empty page with an `error` is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - `page` is negative or `pageSize` is
    ///                                    not positive;
    /// - `PAGE_OUT_OF_RANGE` - `page` lies beyond the last one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
            search = ?search,
            section = ?section,
        ),
    )]
    pub async fn listings(
        section: Option<api::listing::Section>,
        search: Option<String>,
        page: Option<i32>,
        page_size: Option<i32>,
        lang: Option<scalar::Language>,
        ctx: &Context,
    ) -> Result<ListingPage, Error> {
        let arguments = list::Arguments::new(page, page_size, PageSize::GRID)
            .ok_or_else(|| api::PaginationError::Invalid.into())
            .map_err(ctx.error())?;
        let filter = list::Filter::from_query_string(
            search.as_deref().unwrap_or_default(),
        );
        let ceiling = ctx.service().config().price_ceiling;

        let result = ctx
            .service()
            .execute(listings::Browse {
                selector: list::Selector {
                    arguments,
                    filter: list::Search {
                        section: section.unwrap_or_default().into(),
                        filter: filter.clone(),
                    },
                },
                language: lang.map(Into::into),
            })
            .await;
        match result {
            Ok(page) => Ok(ListingPage::fetched(
                page.map(Into::into),
                filter,
                ceiling,
            )),
            Err(e) => match e.as_ref() {
                listings::ExecutionError::Cms(err) => {
                    tracing::warn!("failed to browse listings: {err}");
                    Ok(ListingPage::failed(
                        arguments,
                        filter,
                        ceiling,
                        LOAD_FAILED,
                    ))
                }
                listings::ExecutionError::PageOutOfRange(_) => {
                    Err(e.into_error()).map_err(ctx.error())
                }
            },
        }
    }

    /// Returns the `Listing` with the specified ID.
    ///
    /// Hidden `Listing`s are never returned.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        lang: Option<scalar::Language>,
        ctx: &Context,
    ) -> Result<Option<api::Listing>, Error> {
        ctx.service()
            .execute(query::listing::Display {
                id: id.into(),
                language: lang.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|l| l.map(Into::into))
    }

    /// Returns map markers of all the `Listing`s matching the search.
    ///
    /// `search` is the same URL query string as in `listings`.
    ///
    /// Never fails on unavailable content: an empty map with an `error` is
    /// returned instead.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listingMap",
            otel.name = Self::SPAN_NAME,
            search = ?search,
            section = ?section,
        ),
    )]
    pub async fn listing_map(
        section: Option<api::listing::Section>,
        search: Option<String>,
        lang: Option<scalar::Language>,
        ctx: &Context,
    ) -> Result<api::Overlay, Error> {
        let result = ctx
            .service()
            .execute(listings::Map {
                search: list::Search {
                    section: section.unwrap_or_default().into(),
                    filter: list::Filter::from_query_string(
                        search.as_deref().unwrap_or_default(),
                    ),
                },
                language: lang.map(Into::into),
            })
            .await;
        recover(result, "listing map", api::Overlay::failed)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Searches `Listing`s saved by the current `User`.
    ///
    /// Never fails on unavailable content: an empty page with an `error` is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `SESSION_EXPIRED` - the access token has expired;
    /// - `INVALID_PAGINATION_ARGUMENTS` - `page` is negative or `pageSize` is
    ///                                    not positive;
    /// - `PAGE_OUT_OF_RANGE` - `page` lies beyond the last one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "savedProperties",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
            search = ?search,
        ),
    )]
    pub async fn saved_properties(
        search: Option<String>,
        page: Option<i32>,
        page_size: Option<i32>,
        lang: Option<scalar::Language>,
        ctx: &Context,
    ) -> Result<ListingPage, Error> {
        let arguments = list::Arguments::new(page, page_size, PageSize::GRID)
            .ok_or_else(|| api::PaginationError::Invalid.into())
            .map_err(ctx.error())?;
        let filter = list::Filter::from_query_string(
            search.as_deref().unwrap_or_default(),
        );
        let ceiling = ctx.service().config().price_ceiling;
        let session = ctx.current_session().await?;

        let result = ctx
            .service()
            .execute(query::saved_properties::ForUser {
                token: session.token,
                user_id: session.user.id,
                arguments,
                filter: filter.clone(),
                language: lang.map(Into::into),
            })
            .await;
        match result {
            Ok(page) => Ok(ListingPage::fetched(
                page.map(Into::into),
                filter,
                ceiling,
            )),
            Err(e) => match e.as_ref() {
                listings::ExecutionError::Cms(cms::Error::SessionExpired)
                | listings::ExecutionError::PageOutOfRange(_) => {
                    Err(e.into_error()).map_err(ctx.error())
                }
                listings::ExecutionError::Cms(err) => {
                    tracing::warn!("failed to browse saved listings: {err}");
                    Ok(ListingPage::failed(
                        arguments,
                        filter,
                        ceiling,
                        LOAD_FAILED,
                    ))
                }
            },
        }
    }

    /// Fetches the page of `NewsArticle`s, newest first.
    ///
    /// Never fails on unavailable content: an empty page with an `error` is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - `page` is negative or `pageSize` is
    ///                                    not positive;
    /// - `PAGE_OUT_OF_RANGE` - `page` lies beyond the last one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "news",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
        ),
    )]
    pub async fn news(
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<content::NewsPage, Error> {
        let arguments = list::Arguments::new(page, page_size, PageSize::GRID)
            .ok_or_else(|| api::PaginationError::Invalid.into())
            .map_err(ctx.error())?;

        match ctx
            .service()
            .execute(query::news::List::by(arguments))
            .await
        {
            Ok(page) => {
                check_page(&page.state, arguments).map_err(ctx.error())?;
                Ok(page.into())
            }
            Err(e) => {
                tracing::warn!("failed to fetch news: {e}");
                Ok(content::NewsPage::failed(arguments.size, LOAD_FAILED))
            }
        }
    }

    /// Returns the `NewsArticle` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "newsArticle",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn news_article(
        id: content::NewsArticleId,
        ctx: &Context,
    ) -> Result<Option<content::NewsArticle>, Error> {
        ctx.service()
            .execute(query::news::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|a| a.map(Into::into))
    }

    /// Returns all the `TeamMember`s, in their display order.
    ///
    /// Never fails on unavailable content: an empty list with an `error` is
    /// returned instead.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "teamMembers",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn team_members(
        lang: Option<scalar::Language>,
        ctx: &Context,
    ) -> Result<content::TeamMemberList, Error> {
        let result = ctx
            .service()
            .execute(query::team::List {
                language: lang.map(Into::into),
            })
            .await;
        recover(result, "team members", content::TeamMemberList::failed)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the `TeamMember` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "teamMember",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn team_member(
        id: content::TeamMemberId,
        lang: Option<scalar::Language>,
        ctx: &Context,
    ) -> Result<Option<content::TeamMember>, Error> {
        ctx.service()
            .execute(query::team::ById {
                id: id.into(),
                language: lang.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|m| m.map(Into::into))
    }

    /// Fetches the page of Club Diamondz `ClubOffer`s.
    ///
    /// Never fails on unavailable content: an empty page with an `error` is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - `page` is negative or `pageSize` is
    ///                                    not positive;
    /// - `PAGE_OUT_OF_RANGE` - `page` lies beyond the last one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "clubOffers",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
        ),
    )]
    pub async fn club_offers(
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<content::ClubOfferPage, Error> {
        let arguments = list::Arguments::new(page, page_size, PageSize::GRID)
            .ok_or_else(|| api::PaginationError::Invalid.into())
            .map_err(ctx.error())?;

        match ctx
            .service()
            .execute(query::club::List::by(arguments))
            .await
        {
            Ok(page) => {
                check_page(&page.state, arguments).map_err(ctx.error())?;
                Ok(page.into())
            }
            Err(e) => {
                tracing::warn!("failed to fetch club offers: {e}");
                Ok(content::ClubOfferPage::failed(arguments.size, LOAD_FAILED))
            }
        }
    }

    /// Returns the currently authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `SESSION_EXPIRED` - the access token has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        Ok(ctx.current_session().await?.user.into())
    }

    /// Returns the `User` with the specified ID, if it's visible to the
    /// current one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "user",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|u| u.map(Into::into))
    }

    /// Computes a `Route` from the provided origin to the `Listing`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ORIGIN` - not exactly one of the origin fields is provided;
    /// - `INVALID_COORDINATES` - origin coordinates are out of range;
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist;
    /// - `LISTING_NOT_LOCATED` - the `Listing` has no coordinates;
    /// - `MAPS_PROVIDER_FAILED` - the routing provider couldn't build a
    ///                            route, its status is named in the message.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "directions",
            listing_id = %listing_id,
            mode = ?mode,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn directions(
        origin: geo::OriginInput,
        listing_id: api::listing::Id,
        mode: Option<geo::TravelMode>,
        ctx: &Context,
    ) -> Result<geo::Route, Error> {
        let origin = origin
            .try_into()
            .map_err(|e: geo::GeoError| e.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::Directions {
                origin,
                listing_id: listing_id.into(),
                mode: mode.unwrap_or_default().into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Searches places to filter `Listing`s by, like suburbs or postcodes.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `MAPS_PROVIDER_FAILED` - the place search provider refused to
    ///                            answer.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "searchLocations",
            otel.name = Self::SPAN_NAME,
            text = %text,
        ),
    )]
    pub async fn search_locations(
        text: String,
        ctx: &Context,
    ) -> Result<Vec<geo::Location>, Error> {
        ctx.service()
            .execute(query::SearchLocations { text })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ls| ls.into_iter().map(Into::into).collect())
    }
}

/// Converts the fetched `result`, replacing a CMS failure with `failed`
/// content carrying a user-visible message.
///
/// An expired session is not recovered, so the client may sign in again.
fn recover<T, U>(
    result: Result<T, Traced<cms::Error>>,
    what: &str,
    failed: impl FnOnce(&'static str) -> U,
) -> Result<U, Traced<cms::Error>>
where
    T: Into<U>,
{
    match result {
        Ok(fetched) => Ok(fetched.into()),
        Err(e) if matches!(e.as_ref(), cms::Error::SessionExpired) => Err(e),
        Err(e) => {
            tracing::warn!("failed to load {what}: {e}");
            Ok(failed(LOAD_FAILED))
        }
    }
}

/// Checks the fetched page to be the requested one.
///
/// Remote stores clamp pages beyond the last one.
fn check_page(
    state: &PageState,
    arguments: list::Arguments,
) -> Result<(), Error> {
    if state.index() == arguments.index {
        Ok(())
    } else {
        Err(api::PaginationError::OutOfRange.into())
    }
}

impl AsError for listings::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Cms(e) => e.try_as_error(),
            Self::PageOutOfRange(_) => {
                Some(api::PaginationError::OutOfRange.into())
            }
        }
    }
}

impl AsError for query::directions::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "LISTING_NOT_LOCATED"]
                #[status = UNPROCESSABLE_ENTITY]
                #[message = "`Listing` has no coordinates to route to"]
                NotLocated,
            }
        }

        match self {
            Self::Cms(e) => e.try_as_error(),
            Self::Maps(e) => e.try_as_error(),
            Self::ListingNotExists(_) => Some(Error::ListingNotExists.into()),
            Self::NotLocated(_) => Some(Error::NotLocated.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::{Arguments, PageIndex, PageSize, PageState};
    use service::{
        infra::cms,
        query::{directions, listings},
        read::{self, team::Profile},
    };

    use crate::{
        api::{self, content},
        AsError as _,
    };

    use super::{check_page, recover, LOAD_FAILED};

    fn unavailable() -> tracerr::Traced<cms::Error> {
        tracerr::new!(cms::Error::Remote(cms::RemoteFetchError {
            status: 503,
            code: None,
            message: "Service Unavailable".into(),
        }))
    }

    #[test]
    fn unavailable_map_is_empty() {
        let map = recover::<read::Overlay, _>(
            Err(unavailable()),
            "listing map",
            api::Overlay::failed,
        )
        .unwrap();

        assert!(map.markers().is_empty());
        assert!(map.bounds().is_none());
        assert_eq!(map.error(), Some(LOAD_FAILED));

        let map = recover::<_, api::Overlay>(
            Ok(read::Overlay::default()),
            "listing map",
            api::Overlay::failed,
        )
        .unwrap();
        assert!(map.error().is_none());
    }

    #[test]
    fn unavailable_team_is_empty() {
        let team = recover::<Vec<Profile>, _>(
            Err(unavailable()),
            "team members",
            content::TeamMemberList::failed,
        )
        .unwrap();

        assert!(team.items.is_empty());
        assert_eq!(team.error.as_deref(), Some(LOAD_FAILED));

        let team = recover::<_, content::TeamMemberList>(
            Ok(Vec::<Profile>::new()),
            "team members",
            content::TeamMemberList::failed,
        )
        .unwrap();
        assert!(team.error.is_none());
    }

    #[test]
    fn raises_expired_session_instead_of_recovering() {
        let err = recover::<read::Overlay, _>(
            Err(tracerr::new!(cms::Error::SessionExpired)),
            "listing map",
            api::Overlay::failed,
        )
        .unwrap_err();

        assert_eq!(err.as_error().code, "SESSION_EXPIRED");
    }

    #[test]
    fn detects_clamped_pages() {
        let state = PageState::clamped(PageIndex(4), PageSize::GRID, 13);
        let arguments = Arguments {
            index: PageIndex(4),
            size: PageSize::GRID,
        };

        let err = check_page(&state, arguments).unwrap_err();
        assert_eq!(err.code, "PAGE_OUT_OF_RANGE");

        let state = PageState::clamped(PageIndex(1), PageSize::GRID, 13);
        assert!(check_page(
            &state,
            Arguments {
                index: PageIndex(1),
                ..arguments
            },
        )
        .is_ok());
    }

    #[test]
    fn maps_query_errors_to_codes() {
        let e = listings::ExecutionError::PageOutOfRange(PageIndex(3));
        assert_eq!(e.as_error().code, "PAGE_OUT_OF_RANGE");

        let e = directions::ExecutionError::NotLocated(7.into());
        assert_eq!(e.as_error().code, "LISTING_NOT_LOCATED");

        let e = directions::ExecutionError::ListingNotExists(7.into());
        assert_eq!(
            e.as_error().status_code,
            http::StatusCode::NOT_FOUND,
        );
    }
}
