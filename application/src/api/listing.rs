//! [`Listing`]-related definitions.

use common::{DisplayPrice, Price};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::{
    domain::{listing, media},
    read::listing::{display, list, DisplayListing},
};

use crate::{
    api::{self, geo::Coordinates, scalar},
    Context, Error,
};

/// Property listed for sale by the agency.
#[derive(Clone, Debug, From)]
pub struct Listing(DisplayListing);

/// Property listed for sale by the agency.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Listing`, translated if possible.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Description of this `Listing`, translated if possible.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Postal address of this `Listing`.
    #[must_use]
    pub fn address(&self) -> Address {
        self.0.address.clone().into()
    }

    /// Postal address of this `Listing` as a single line.
    #[must_use]
    pub fn address_line(&self) -> &str {
        &self.0.address_line
    }

    /// Price of this `Listing` as shown to visitors, like `$1,250,000` or
    /// `Request for Price`.
    #[must_use]
    pub fn price(&self) -> String {
        self.0.price.to_string()
    }

    /// Asking price of this `Listing`, if it may be shown.
    #[must_use]
    pub fn price_amount(&self) -> Option<Price> {
        match self.0.price {
            DisplayPrice::Amount(p) => Some(p),
            DisplayPrice::OnRequest => None,
        }
    }

    /// Status of this `Listing`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Type of this `Listing`, like `House`, translated if possible.
    #[must_use]
    pub fn property_type(&self) -> Option<&str> {
        self.0.property_type.as_deref()
    }

    /// Features of this `Listing`.
    #[must_use]
    pub fn features(&self) -> Features {
        self.0.features.clone().into()
    }

    /// Media attached to this `Listing`, in their display order.
    #[must_use]
    pub fn media(&self) -> Vec<Media> {
        self.0.media.iter().cloned().map(Into::into).collect()
    }

    /// ID of the asset to show as a thumbnail of this `Listing`.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.0.thumbnail.as_ref().map(AsRef::as_ref)
    }

    /// Location of this `Listing` on a map, if known.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.0.coordinates.map(Into::into)
    }

    /// Agents responsible for this `Listing`.
    #[must_use]
    pub fn agents(&self) -> Vec<Agent> {
        self.0.agents.iter().cloned().map(Into::into).collect()
    }

    /// Indicator whether the current `User` has saved this `Listing`.
    ///
    /// Always `false` for anonymous requests.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.isSaved",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_saved(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(ctx.saved().await?.contains(self.0.id))
    }
}

/// Unique identifier of a `Listing`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ListingId", with = scalar::Via::<listing::Id>)]
pub struct Id(listing::Id);

/// Postal address of a `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Address {
    /// Street with a house number, like `12 Smith St`.
    pub street: Option<String>,

    /// Suburb, like `Chatswood`.
    pub suburb: Option<String>,

    /// State, like `NSW`.
    pub state: Option<String>,

    /// Postcode, like `2067`.
    pub postcode: Option<String>,
}

impl From<listing::Address> for Address {
    fn from(a: listing::Address) -> Self {
        Self {
            street: a.street,
            suburb: a.suburb.map(|s| s.to_string()),
            state: a.state,
            postcode: a.postcode.map(|p| p.to_string()),
        }
    }
}

/// Status of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingStatus")]
pub enum Status {
    /// `Listing` is on the market.
    Current,

    /// `Listing` has been sold.
    Sold,

    /// `Listing` is sold privately, off the market.
    Offmarket,

    /// `Listing` is hidden from visitors.
    Inactive,
}

impl From<listing::Status> for Status {
    fn from(status: listing::Status) -> Self {
        match status {
            listing::Status::Current => Self::Current,
            listing::Status::Sold => Self::Sold,
            listing::Status::Offmarket => Self::Offmarket,
            listing::Status::Inactive => Self::Inactive,
        }
    }
}

/// Features of a `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingFeatures", context = Context)]
pub struct Features {
    /// Number of bedrooms.
    pub bedrooms: Option<String>,

    /// Number of bathrooms.
    pub bathrooms: Option<String>,

    /// Number of parking spaces.
    pub parking: Option<String>,

    /// Number of floors.
    pub floors: Option<String>,

    /// Number of rooms.
    pub rooms: Option<String>,

    /// Additional free-form features.
    pub additional: Option<String>,
}

impl From<display::Features> for Features {
    fn from(f: display::Features) -> Self {
        let display::Features {
            bedrooms,
            bathrooms,
            parking,
            floors,
            rooms,
            additional,
        } = f;
        Self {
            bedrooms,
            bathrooms,
            parking,
            floors,
            rooms,
            additional,
        }
    }
}

/// Media file attached to a `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Media {
    /// ID of the asset in the CMS storage.
    pub file: String,

    /// Kind of this media.
    pub kind: MediaKind,

    /// Title of this media, if any.
    pub title: Option<String>,
}

impl From<media::Media> for Media {
    fn from(m: media::Media) -> Self {
        Self {
            file: m.file.to_string(),
            kind: m.kind.into(),
            title: m.title,
        }
    }
}

/// Kind of a `Media`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum MediaKind {
    /// Still image.
    Image,

    /// Video clip.
    Video,
}

impl From<media::Kind> for MediaKind {
    fn from(kind: media::Kind) -> Self {
        match kind {
            media::Kind::Image => Self::Image,
            media::Kind::Video => Self::Video,
        }
    }
}

/// Agent responsible for a `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingAgent", context = Context)]
pub struct Agent {
    /// ID of the agent's `TeamMember` profile.
    pub id: api::content::TeamMemberId,

    /// Name of the agent.
    pub name: String,

    /// ID of the agent's photo asset, if any.
    pub photo: Option<String>,
}

impl From<listing::Agent> for Agent {
    fn from(a: listing::Agent) -> Self {
        Self {
            id: a.id.into(),
            name: a.name,
            photo: a.photo.map(|p| p.to_string()),
        }
    }
}

/// Section of the website listing `Listing`s.
#[derive(Clone, Copy, Debug, Default, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingSection")]
pub enum Section {
    /// Properties for sale.
    #[default]
    Buy,

    /// Recently sold properties.
    Sold,
}

impl From<Section> for list::Section {
    fn from(section: Section) -> Self {
        match section {
            Section::Buy => Self::Buy,
            Section::Sold => Self::Sold,
        }
    }
}

pub mod page {
    //! Definitions related to a [`Listing`] page.

    use common::pagination::Page;
    use juniper::graphql_object;
    use service::read::listing::list;

    use crate::{api, Context};

    use super::Listing;

    /// Page of [`Listing`]s matching a search.
    #[derive(Clone, Debug)]
    pub struct ListingPage {
        /// Fetched [`Listing`]s.
        items: Vec<Listing>,

        /// [`api::PageInfo`] of this [`ListingPage`].
        info: api::PageInfo,

        /// [`list::Filter`] the [`Listing`]s were searched with.
        filter: list::Filter,

        /// Upper bound of price sliders.
        price_ceiling: list::PriceBound,

        /// User-visible message describing why the [`Listing`]s couldn't be
        /// fetched.
        error: Option<String>,
    }

    impl ListingPage {
        /// Creates a new [`ListingPage`] out of the fetched `page`.
        #[must_use]
        pub fn fetched(
            page: Page<Listing>,
            filter: list::Filter,
            price_ceiling: list::PriceBound,
        ) -> Self {
            Self {
                items: page.items,
                info: page.state.into(),
                filter,
                price_ceiling,
                error: None,
            }
        }

        /// Creates a new empty [`ListingPage`] describing the failure.
        #[must_use]
        pub fn failed(
            arguments: list::Arguments,
            filter: list::Filter,
            price_ceiling: list::PriceBound,
            error: impl ToString,
        ) -> Self {
            Self {
                items: vec![],
                info: Page::<Listing>::empty(arguments.size).state.into(),
                filter,
                price_ceiling,
                error: Some(error.to_string()),
            }
        }
    }

    /// Page of `Listing`s matching a search.
    #[graphql_object(context = Context)]
    impl ListingPage {
        /// `Listing`s on this page.
        #[must_use]
        pub fn items(&self) -> &[Listing] {
            &self.items
        }

        /// Information about this page.
        #[must_use]
        pub fn page_info(&self) -> api::PageInfo {
            self.info
        }

        /// Message describing why `Listing`s couldn't be loaded.
        ///
        /// The page is empty whenever this is set.
        #[must_use]
        pub fn error(&self) -> Option<&str> {
            self.error.as_deref()
        }

        /// Normalized search query string, to be put into the page URL.
        #[must_use]
        pub fn search_query(&self) -> String {
            self.filter.to_query_string()
        }

        /// Lower price bound of the search, if any.
        #[must_use]
        pub fn price_min(&self) -> Option<list::PriceBound> {
            self.filter.price_min()
        }

        /// Upper price bound to show on a price slider.
        ///
        /// Falls back to the slider ceiling if the search has no upper
        /// bound.
        #[must_use]
        pub fn price_max(&self) -> list::PriceBound {
            self.filter.price_max_or(self.price_ceiling)
        }
    }
}

pub use self::page::ListingPage;

#[cfg(test)]
mod spec {
    use common::{
        pagination::{Arguments, PageIndex, PageSize},
        Price,
    };
    use service::read::listing::list::Filter;

    use super::ListingPage;

    #[test]
    fn failed_page_is_empty_with_error() {
        let filter = Filter::from_query_string("?bedroom=3&price_min=500000");

        let page = ListingPage::failed(
            Arguments {
                index: PageIndex(2),
                size: PageSize::GRID,
            },
            filter,
            Price::from(50_000_000),
            "Failed to load listings",
        );

        assert!(page.items().is_empty());
        assert_eq!(page.error(), Some("Failed to load listings"));
        assert_eq!(page.page_info().total_count(), 0);
        assert_eq!(page.page_info().index(), 0);
        assert_eq!(page.search_query(), "bedroom=3&price_min=500000");
        assert_eq!(page.price_min(), Some(Price::from(500_000)));
        assert_eq!(page.price_max(), Price::from(50_000_000));
    }
}
