//! Raw Directus collection schemas, and their narrowing into domain types.
//!
//! Every field the CMS may omit or null out is an [`Option`] here. Records
//! are validated once, while being converted into domain types, so nothing
//! past this module deals with loosely-typed payloads.

use common::{DateTime, Price};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{
        club, feature,
        geo::{Coordinates, LocationId, LocationName},
        listing,
        media::{self, FileId, Media},
        news, team,
        user::{self, session, Email, User},
        Language, Listing,
    },
    infra::cms::MalformedRecord,
};

/// Name of the listings collection.
pub(super) const PROPERTIES: &str = "properties";

/// Name of the saved properties collection.
pub(super) const SAVED_PROPERTIES: &str = "saved_properties";

/// Name of the news collection.
pub(super) const NEWS: &str = "news";

/// Name of the team collection.
pub(super) const TEAM: &str = "team";

/// Name of the Club Diamondz offers collection.
pub(super) const CLUB_DIAMONDZ: &str = "club_diamondz";

/// Name of the contact enquiries collection.
pub(super) const ENQUIRIES: &str = "enquiries";

/// Fields selected for a [`Property`].
pub(super) const PROPERTY_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "street",
    "suburb",
    "state",
    "postcode",
    "price",
    "is_price_displayable",
    "latitude",
    "longitude",
    "status",
    "type.id",
    "type.name",
    "type.translations.languages_code",
    "type.translations.name",
    "images.file.id",
    "images.file.type",
    "images.file.title",
    "features.feature_id",
    "features.value",
    "agents.team_id.id",
    "agents.team_id.name",
    "agents.team_id.photo",
    "translations.languages_code",
    "translations.name",
    "translations.description",
];

/// Fields selected for an [`Article`].
pub(super) const ARTICLE_FIELDS: &[&str] =
    &["id", "title", "summary", "body", "image", "date_published"];

/// Fields selected for a [`Member`].
pub(super) const MEMBER_FIELDS: &[&str] = &[
    "id",
    "name",
    "position",
    "bio",
    "email",
    "phone",
    "photo",
    "sort",
    "translations.languages_code",
    "translations.position",
    "translations.bio",
];

/// Fields selected for an [`Offer`].
pub(super) const OFFER_FIELDS: &[&str] =
    &["id", "title", "description", "partner", "link", "image"];

/// Fields selected for a [`DirectusUser`].
pub(super) const USER_FIELDS: &[&str] =
    &["id", "first_name", "last_name", "email"];

/// Envelope of every Directus response.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    /// Payload of the response.
    pub(super) data: T,
}

/// Payload of the `/auth/login` and `/auth/refresh` responses.
#[derive(Debug, Deserialize)]
pub(super) struct AuthTokens {
    /// Access token.
    access_token: String,

    /// Refresh token.
    refresh_token: Option<String>,

    /// Lifetime of the access token in milliseconds.
    expires: Option<u64>,
}

impl TryFrom<AuthTokens> for session::Tokens {
    type Error = MalformedRecord;

    fn try_from(raw: AuthTokens) -> Result<Self, Self::Error> {
        let malformed = |reason| MalformedRecord::new("auth", reason);
        Ok(Self {
            access: session::AccessToken::secret(raw.access_token)
                .ok_or_else(|| malformed("blank `access_token`"))?,
            refresh: raw
                .refresh_token
                .map(|t| {
                    session::RefreshToken::secret(t)
                        .ok_or_else(|| malformed("blank `refresh_token`"))
                })
                .transpose()?,
            expires_in: raw.expires.map(std::time::Duration::from_millis),
        })
    }
}

/// Raw [`Listing`] record.
#[derive(Debug, Deserialize)]
pub(super) struct Property {
    id: listing::Id,
    name: Option<String>,
    description: Option<String>,
    street: Option<String>,
    suburb: Option<String>,
    state: Option<String>,
    postcode: Option<Value>,
    price: Option<Decimal>,
    is_price_displayable: Option<bool>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: Option<String>,
    #[serde(rename = "type")]
    property_type: Option<PropertyType>,
    #[serde(default)]
    images: Option<Vec<PropertyImage>>,
    #[serde(default)]
    features: Option<Vec<PropertyFeature>>,
    #[serde(default)]
    agents: Option<Vec<PropertyAgent>>,
    #[serde(default)]
    translations: Option<Vec<PropertyTranslation>>,
}

/// Raw [`listing::Type`] record.
#[derive(Debug, Deserialize)]
struct PropertyType {
    id: listing::TypeId,
    name: Option<String>,
    #[serde(default)]
    translations: Option<Vec<TypeTranslation>>,
}

/// Raw [`listing::TypeTranslation`] record.
#[derive(Debug, Deserialize)]
struct TypeTranslation {
    languages_code: Option<String>,
    name: Option<String>,
}

/// Raw junction record of a [`Listing`] image.
#[derive(Debug, Deserialize)]
struct PropertyImage {
    file: Option<File>,
}

/// Raw file record.
#[derive(Debug, Deserialize)]
struct File {
    id: String,
    #[serde(rename = "type")]
    mime: Option<String>,
    title: Option<String>,
}

/// Raw [`feature::Feature`] record.
#[derive(Debug, Deserialize)]
struct PropertyFeature {
    feature_id: Option<feature::Id>,
    value: Option<Value>,
}

/// Raw junction record of a [`listing::Agent`].
#[derive(Debug, Deserialize)]
struct PropertyAgent {
    team_id: Option<Agent>,
}

/// Raw [`listing::Agent`] record.
#[derive(Debug, Deserialize)]
struct Agent {
    id: team::Id,
    name: Option<String>,
    photo: Option<String>,
}

/// Raw [`listing::Translation`] record.
#[derive(Debug, Deserialize)]
struct PropertyTranslation {
    languages_code: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

/// Converts a scalar JSON `value` into a string.
///
/// The CMS stores numeric-looking values (postcodes, feature values) either
/// as numbers or as strings.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            None
        }
    }
}

/// Drops blank strings.
fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

impl TryFrom<Property> for Listing {
    type Error = MalformedRecord;

    fn try_from(raw: Property) -> Result<Self, Self::Error> {
        let malformed = |reason: String| MalformedRecord::new(PROPERTIES, reason);

        let status = raw
            .status
            .as_deref()
            .ok_or_else(|| malformed(format!("`{}` has no `status`", raw.id)))?;
        let status = status.parse::<listing::Status>().map_err(|_| {
            malformed(format!("`{}` has unknown `status`: {status}", raw.id))
        })?;
        let price = raw
            .price
            .map(|p| {
                Price::new(p).ok_or_else(|| {
                    malformed(format!("`{}` has negative `price`", raw.id))
                })
            })
            .transpose()?;

        Ok(Self {
            id: raw.id,
            name: non_blank(raw.name).unwrap_or_default(),
            description: non_blank(raw.description),
            address: listing::Address {
                street: non_blank(raw.street),
                suburb: raw.suburb.and_then(LocationName::new),
                state: non_blank(raw.state),
                postcode: raw
                    .postcode
                    .and_then(scalar_to_string)
                    .and_then(LocationId::new),
            },
            price,
            is_price_displayable: raw.is_price_displayable.unwrap_or(false),
            coordinates: raw
                .latitude
                .zip(raw.longitude)
                .and_then(|(lat, lng)| Coordinates::new(lat, lng)),
            media: raw
                .images
                .unwrap_or_default()
                .into_iter()
                .filter_map(|i| i.file)
                .filter_map(|f| {
                    Some(Media {
                        kind: media::Kind::from_mime(f.mime.as_deref()),
                        file: FileId::new(f.id)?,
                        title: non_blank(f.title),
                    })
                })
                .collect(),
            features: raw
                .features
                .unwrap_or_default()
                .into_iter()
                .filter_map(|f| {
                    Some(feature::Feature {
                        id: f.feature_id?,
                        value: f.value.and_then(scalar_to_string)?,
                    })
                })
                .collect(),
            property_type: raw.property_type.map(|t| listing::Type {
                id: t.id,
                label: t.name.unwrap_or_default(),
                translations: t
                    .translations
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|tr| {
                        Some(listing::TypeTranslation {
                            language: Language::new(tr.languages_code?)?,
                            label: non_blank(tr.name)?,
                        })
                    })
                    .collect(),
            }),
            status,
            agents: raw
                .agents
                .unwrap_or_default()
                .into_iter()
                .filter_map(|a| a.team_id)
                .map(|a| listing::Agent {
                    id: a.id,
                    name: a.name.unwrap_or_default(),
                    photo: a.photo.and_then(FileId::new),
                })
                .collect(),
            translations: raw
                .translations
                .unwrap_or_default()
                .into_iter()
                .filter_map(|tr| {
                    Some(listing::Translation {
                        language: Language::new(tr.languages_code?)?,
                        name: non_blank(tr.name),
                        description: non_blank(tr.description),
                    })
                })
                .collect(),
        })
    }
}

/// Raw saved property record.
#[derive(Debug, Deserialize)]
pub(super) struct SavedProperty {
    pub(super) property_id: Option<listing::Id>,
}

/// Raw [`news::Article`] record.
#[derive(Debug, Deserialize)]
pub(super) struct Article {
    id: news::Id,
    title: Option<String>,
    summary: Option<String>,
    body: Option<String>,
    image: Option<String>,
    date_published: Option<String>,
}

impl TryFrom<Article> for news::Article {
    type Error = MalformedRecord;

    fn try_from(raw: Article) -> Result<Self, Self::Error> {
        let published_at = raw
            .date_published
            .as_deref()
            .ok_or_else(|| {
                MalformedRecord::new(
                    NEWS,
                    format!("`{}` has no `date_published`", raw.id),
                )
            })?
            .parse::<DateTime>()
            .map_err(|e| MalformedRecord::new(NEWS, e))?;

        Ok(Self {
            id: raw.id,
            title: non_blank(raw.title).ok_or_else(|| {
                MalformedRecord::new(NEWS, format!("`{}` has no `title`", raw.id))
            })?,
            summary: non_blank(raw.summary),
            body: raw.body.unwrap_or_default(),
            image: raw.image.and_then(FileId::new),
            published_at,
        })
    }
}

/// Raw [`team::Member`] record.
#[derive(Debug, Deserialize)]
pub(super) struct Member {
    id: team::Id,
    name: Option<String>,
    position: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    photo: Option<String>,
    sort: Option<i32>,
    #[serde(default)]
    translations: Option<Vec<MemberTranslation>>,
}

/// Raw [`team::Translation`] record.
#[derive(Debug, Deserialize)]
struct MemberTranslation {
    languages_code: Option<String>,
    position: Option<String>,
    bio: Option<String>,
}

impl TryFrom<Member> for team::Member {
    type Error = MalformedRecord;

    fn try_from(raw: Member) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            name: non_blank(raw.name).ok_or_else(|| {
                MalformedRecord::new(TEAM, format!("`{}` has no `name`", raw.id))
            })?,
            position: non_blank(raw.position),
            bio: non_blank(raw.bio),
            email: raw.email.and_then(Email::new),
            phone: non_blank(raw.phone),
            photo: raw.photo.and_then(FileId::new),
            sort: raw.sort,
            translations: raw
                .translations
                .unwrap_or_default()
                .into_iter()
                .filter_map(|tr| {
                    Some(team::Translation {
                        language: Language::new(tr.languages_code?)?,
                        position: non_blank(tr.position),
                        bio: non_blank(tr.bio),
                    })
                })
                .collect(),
        })
    }
}

/// Raw [`club::Offer`] record.
#[derive(Debug, Deserialize)]
pub(super) struct Offer {
    id: club::Id,
    title: Option<String>,
    description: Option<String>,
    partner: Option<String>,
    link: Option<String>,
    image: Option<String>,
}

impl TryFrom<Offer> for club::Offer {
    type Error = MalformedRecord;

    fn try_from(raw: Offer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            title: non_blank(raw.title).ok_or_else(|| {
                MalformedRecord::new(
                    CLUB_DIAMONDZ,
                    format!("`{}` has no `title`", raw.id),
                )
            })?,
            description: non_blank(raw.description),
            partner: non_blank(raw.partner),
            link: non_blank(raw.link),
            image: raw.image.and_then(FileId::new),
        })
    }
}

/// Raw [`User`] record.
#[derive(Debug, Deserialize)]
pub(super) struct DirectusUser {
    id: user::Id,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

impl From<DirectusUser> for User {
    fn from(raw: DirectusUser) -> Self {
        Self {
            id: raw.id,
            first_name: non_blank(raw.first_name),
            last_name: non_blank(raw.last_name),
            email: raw.email.and_then(Email::new),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Price;
    use serde_json::json;

    use crate::domain::{feature, listing, media, team, Language, Listing};

    use super::Property;

    fn narrow(value: serde_json::Value) -> Result<Listing, String> {
        let raw = serde_json::from_value::<Property>(value)
            .map_err(|e| e.to_string())?;
        Listing::try_from(raw).map_err(|e| e.to_string())
    }

    #[test]
    fn narrows_full_record() {
        let listing = narrow(json!({
            "id": 42,
            "name": "Harbour View",
            "street": "12 Smith St",
            "suburb": "Chatswood",
            "state": "NSW",
            "postcode": 2067,
            "price": "1250000.00",
            "is_price_displayable": true,
            "latitude": -33.79,
            "longitude": 151.18,
            "status": "current",
            "type": {
                "id": 3,
                "name": "House",
                "translations": [{ "languages_code": "cn", "name": "别墅" }],
            },
            "images": [
                { "file": { "id": "f1", "type": "image/jpeg", "title": "Front" } },
                { "file": null },
                { "file": { "id": "f2", "type": "video/mp4", "title": null } },
            ],
            "features": [
                { "feature_id": 1, "value": "3" },
                { "feature_id": 2, "value": 2 },
                { "feature_id": 3, "value": null },
            ],
            "agents": [{ "team_id": { "id": 5, "name": "Jane", "photo": null } }],
            "translations": [
                { "languages_code": "en", "name": "Harbour View", "description": "Nice" },
                { "languages_code": null, "name": "?", "description": null },
            ],
        }))
        .unwrap();

        assert_eq!(listing.id, listing::Id::from(42));
        assert_eq!(listing.address.postcode.unwrap().to_string(), "2067");
        assert_eq!(listing.price, Some(Price::from(1_250_000)));
        assert!(listing.coordinates.is_some());
        assert_eq!(listing.status, listing::Status::Current);
        assert_eq!(listing.media.len(), 2);
        assert_eq!(listing.media[1].kind, media::Kind::Video);
        assert_eq!(
            listing.features,
            [
                feature::Feature {
                    id: feature::Id::from(1),
                    value: "3".into(),
                },
                feature::Feature {
                    id: feature::Id::from(2),
                    value: "2".into(),
                },
            ],
        );
        let ty = listing.property_type.unwrap();
        assert_eq!(ty.translations[0].language, Language::new("cn").unwrap());
        assert_eq!(listing.agents[0].id, team::Id::from(5));
        assert_eq!(listing.translations.len(), 1);
    }

    #[test]
    fn narrows_sparse_record() {
        let listing = narrow(json!({ "id": 7, "status": "sold" })).unwrap();

        assert_eq!(listing.name, "");
        assert_eq!(listing.price, None);
        assert!(!listing.is_price_displayable);
        assert!(listing.coordinates.is_none());
        assert!(listing.media.is_empty());
        assert!(listing.translations.is_empty());
    }

    #[test]
    fn rejects_unknown_status() {
        let err = narrow(json!({ "id": 7, "status": "archived" })).unwrap_err();

        assert!(err.contains("unknown `status`"), "{err}");
        assert!(narrow(json!({ "id": 7 })).is_err());
        assert!(narrow(json!({ "id": 7, "status": "current", "price": -1 }))
            .is_err());
    }
}
