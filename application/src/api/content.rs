//! Definitions of the website content sections: news, team and Club
//! Diamondz.

use common::{pagination::Page, DateTime};
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::{
    domain::{club, news, team},
    read::team::Profile,
};

use crate::{
    api::{self, scalar},
    Context,
};

/// Defines a GraphQL page of the provided item type.
macro_rules! define_page {
    ($(#[doc = $doc:literal])* $name:ident($gql:literal) of $item:ty) => {
        $(#[doc = $doc])*
        #[derive(Clone, Debug, GraphQLObject)]
        #[graphql(name = $gql, context = Context)]
        pub struct $name {
            /// Items on this page.
            pub items: Vec<$item>,

            /// Information about this page.
            pub page_info: api::PageInfo,

            /// Message describing why the items couldn't be loaded.
            ///
            /// The page is empty whenever this is set.
            pub error: Option<String>,
        }

        impl<T: Into<$item>> From<Page<T>> for $name {
            fn from(page: Page<T>) -> Self {
                Self {
                    items: page.items.into_iter().map(Into::into).collect(),
                    page_info: page.state.into(),
                    error: None,
                }
            }
        }

        impl $name {
            /// Creates an empty page describing the failure.
            #[must_use]
            pub fn failed(
                size: common::pagination::PageSize,
                error: impl ToString,
            ) -> Self {
                Self {
                    items: vec![],
                    page_info: Page::<$item>::empty(size).state.into(),
                    error: Some(error.to_string()),
                }
            }
        }
    };
}

/// Unique identifier of a `NewsArticle`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "NewsArticleId", with = scalar::Via::<news::Id>)]
pub struct NewsArticleId(news::Id);

/// Article in the news section.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct NewsArticle {
    /// Unique identifier of this `NewsArticle`.
    pub id: NewsArticleId,

    /// Title of this `NewsArticle`.
    pub title: String,

    /// Short summary shown in the list of articles.
    pub summary: Option<String>,

    /// HTML body of this `NewsArticle`.
    pub body: String,

    /// ID of the cover image asset, if any.
    pub image: Option<String>,

    /// `DateTime` this `NewsArticle` was published at.
    pub published_at: DateTime,
}

impl From<news::Article> for NewsArticle {
    fn from(a: news::Article) -> Self {
        Self {
            id: a.id.into(),
            title: a.title,
            summary: a.summary,
            body: a.body,
            image: a.image.map(|i| i.to_string()),
            published_at: a.published_at,
        }
    }
}

define_page! {
    /// Page of `NewsArticle`s, newest first.
    NewsPage("NewsPage") of NewsArticle
}

/// Unique identifier of a `TeamMember`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "TeamMemberId", with = scalar::Via::<team::Id>)]
pub struct TeamMemberId(team::Id);

/// Member of the agency team.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct TeamMember {
    /// Unique identifier of this `TeamMember`.
    pub id: TeamMemberId,

    /// Full name.
    pub name: String,

    /// Position in the agency, translated if possible.
    pub position: Option<String>,

    /// Biography, translated if possible.
    pub bio: Option<String>,

    /// Contact email.
    pub email: Option<String>,

    /// Contact phone.
    pub phone: Option<String>,

    /// ID of the photo asset, if any.
    pub photo: Option<String>,
}

impl From<Profile> for TeamMember {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id.into(),
            name: p.name,
            position: p.position,
            bio: p.bio,
            email: p.email.map(|e| e.to_string()),
            phone: p.phone,
            photo: p.photo.map(|f| f.to_string()),
        }
    }
}

/// All the `TeamMember`s of the agency.
#[derive(Clone, Debug, Default, GraphQLObject)]
#[graphql(context = Context)]
pub struct TeamMemberList {
    /// `TeamMember`s in their display order.
    pub items: Vec<TeamMember>,

    /// Message describing why the `TeamMember`s couldn't be loaded.
    ///
    /// The list is empty whenever this is set.
    pub error: Option<String>,
}

impl TeamMemberList {
    /// Creates an empty list describing the failure.
    #[must_use]
    pub fn failed(error: impl ToString) -> Self {
        Self {
            items: vec![],
            error: Some(error.to_string()),
        }
    }
}

impl From<Vec<Profile>> for TeamMemberList {
    fn from(profiles: Vec<Profile>) -> Self {
        Self {
            items: profiles.into_iter().map(Into::into).collect(),
            error: None,
        }
    }
}

/// Unique identifier of a `ClubOffer`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClubOfferId", with = scalar::Via::<club::Id>)]
pub struct ClubOfferId(club::Id);

/// Offer of a Club Diamondz partner.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct ClubOffer {
    /// Unique identifier of this `ClubOffer`.
    pub id: ClubOfferId,

    /// Title of this `ClubOffer`.
    pub title: String,

    /// Description of this `ClubOffer`.
    pub description: Option<String>,

    /// Name of the partner making this `ClubOffer`.
    pub partner: Option<String>,

    /// Link to the partner's website.
    pub link: Option<String>,

    /// ID of the image asset, if any.
    pub image: Option<String>,
}

impl From<club::Offer> for ClubOffer {
    fn from(o: club::Offer) -> Self {
        Self {
            id: o.id.into(),
            title: o.title,
            description: o.description,
            partner: o.partner,
            link: o.link,
            image: o.image.map(|i| i.to_string()),
        }
    }
}

define_page! {
    /// Page of Club Diamondz `ClubOffer`s.
    ClubOfferPage("ClubOfferPage") of ClubOffer
}
