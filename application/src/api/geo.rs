//! Geospatial definitions: coordinates, routes and places.

use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use service::domain::geo;

use crate::{define_error, Context};

/// Point on the Earth surface.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl From<geo::Coordinates> for Coordinates {
    fn from(c: geo::Coordinates) -> Self {
        Self {
            latitude: c.latitude(),
            longitude: c.longitude(),
        }
    }
}

/// Point on the Earth surface, as an input.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
pub struct CoordinatesInput {
    /// Latitude in degrees, within `[-90; 90]`.
    pub latitude: f64,

    /// Longitude in degrees, within `[-180; 180]`.
    pub longitude: f64,
}

impl TryFrom<CoordinatesInput> for geo::Coordinates {
    type Error = GeoError;

    fn try_from(input: CoordinatesInput) -> Result<Self, Self::Error> {
        Self::new(input.latitude, input.longitude)
            .ok_or(GeoError::InvalidCoordinates)
    }
}

/// Rectangle on a map.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Bounds {
    /// South-west corner.
    pub south_west: Coordinates,

    /// North-east corner.
    pub north_east: Coordinates,
}

impl From<geo::Bounds> for Bounds {
    fn from(b: geo::Bounds) -> Self {
        Self {
            south_west: b.south_west.into(),
            north_east: b.north_east.into(),
        }
    }
}

/// Starting point of a `Route`.
///
/// Exactly one of the fields must be provided.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct OriginInput {
    /// Free-text place, like an address.
    pub place: Option<String>,

    /// Exact coordinates, like a device geolocation.
    pub coordinates: Option<CoordinatesInput>,
}

impl TryFrom<OriginInput> for geo::Origin {
    type Error = GeoError;

    fn try_from(input: OriginInput) -> Result<Self, Self::Error> {
        match (input.place, input.coordinates) {
            (Some(place), None) if !place.trim().is_empty() => {
                Ok(Self::Place(place.trim().to_owned()))
            }
            (None, Some(c)) => c.try_into().map(Self::Coordinates),
            (Some(_) | None, Some(_) | None) => Err(GeoError::InvalidOrigin),
        }
    }
}

/// Mode of travelling along a `Route`.
#[derive(Clone, Copy, Debug, Default, GraphQLEnum)]
pub enum TravelMode {
    /// By car.
    #[default]
    Driving,

    /// On foot.
    Walking,

    /// By bicycle.
    Bicycling,

    /// By public transport.
    Transit,
}

impl From<TravelMode> for geo::TravelMode {
    fn from(mode: TravelMode) -> Self {
        match mode {
            TravelMode::Driving => Self::Driving,
            TravelMode::Walking => Self::Walking,
            TravelMode::Bicycling => Self::Bicycling,
            TravelMode::Transit => Self::Transit,
        }
    }
}

/// Route from an origin to a `Listing`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Route {
    /// Encoded polyline of the whole route.
    pub polyline: String,

    /// Total distance of the route.
    pub distance: Distance,

    /// Total time of travelling along the route.
    pub duration: TravelTime,

    /// Turn-by-turn steps of the route.
    pub steps: Vec<Step>,
}

impl From<geo::Route> for Route {
    fn from(route: geo::Route) -> Self {
        let geo::Route {
            polyline,
            distance,
            duration,
            steps,
        } = route;
        Self {
            polyline,
            distance: distance.into(),
            duration: duration.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}

/// Turn-by-turn step of a `Route`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Step {
    /// Textual instruction, like `Turn left onto George St`.
    pub instruction: String,

    /// Distance of this step.
    pub distance: Distance,

    /// Time of travelling this step.
    pub duration: TravelTime,
}

impl From<geo::Step> for Step {
    fn from(step: geo::Step) -> Self {
        Self {
            instruction: step.instruction,
            distance: step.distance.into(),
            duration: step.duration.into(),
        }
    }
}

/// Distance along a `Route`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Distance {
    /// Distance in meters.
    pub meters: i32,

    /// Human-readable text, like `1.2 km`.
    pub text: String,
}

impl From<geo::Distance> for Distance {
    fn from(d: geo::Distance) -> Self {
        Self {
            meters: i32::try_from(d.meters).unwrap_or(i32::MAX),
            text: d.text,
        }
    }
}

/// Time of travelling along a `Route`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct TravelTime {
    /// Time in seconds.
    pub seconds: i32,

    /// Human-readable text, like `5 mins`.
    pub text: String,
}

impl From<geo::TravelTime> for TravelTime {
    fn from(t: geo::TravelTime) -> Self {
        Self {
            seconds: i32::try_from(t.seconds).unwrap_or(i32::MAX),
            text: t.text,
        }
    }
}

/// Place to search `Listing`s around, like a suburb.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Location {
    /// Postcode of this place.
    pub id: String,

    /// Name of this place, like `Chatswood`.
    pub name: String,

    /// Value of the `city` parameter of a listing search query string.
    pub search_value: String,
}

impl From<geo::Location> for Location {
    fn from(l: geo::Location) -> Self {
        Self {
            search_value: format!("{}:{}", l.id, l.name),
            id: l.id.to_string(),
            name: l.name.to_string(),
        }
    }
}

define_error! {
    enum GeoError {
        #[code = "INVALID_COORDINATES"]
        #[status = BAD_REQUEST]
        #[message = "Latitude must be within [-90; 90] and longitude within \
                     [-180; 180]"]
        InvalidCoordinates,

        #[code = "INVALID_ORIGIN"]
        #[status = BAD_REQUEST]
        #[message = "Either a non-blank `place` or `coordinates` must be \
                     provided"]
        InvalidOrigin,
    }
}

#[cfg(test)]
mod spec {
    use service::domain::geo::{self, LocationId, LocationName};

    use super::{CoordinatesInput, GeoError, Location, OriginInput};

    #[test]
    fn origin_needs_exactly_one_field() {
        let place = OriginInput {
            place: Some(" Town Hall ".into()),
            coordinates: None,
        };
        assert_eq!(
            geo::Origin::try_from(place).unwrap(),
            geo::Origin::Place("Town Hall".into()),
        );

        let both = OriginInput {
            place: Some("Town Hall".into()),
            coordinates: Some(CoordinatesInput {
                latitude: -33.87,
                longitude: 151.2,
            }),
        };
        assert!(matches!(
            geo::Origin::try_from(both),
            Err(GeoError::InvalidOrigin),
        ));

        let blank = OriginInput {
            place: Some("  ".into()),
            coordinates: None,
        };
        assert!(geo::Origin::try_from(blank).is_err());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let origin = OriginInput {
            place: None,
            coordinates: Some(CoordinatesInput {
                latitude: 95.0,
                longitude: 0.0,
            }),
        };

        assert!(matches!(
            geo::Origin::try_from(origin),
            Err(GeoError::InvalidCoordinates),
        ));
    }

    #[test]
    fn location_carries_search_value() {
        let l = Location::from(geo::Location {
            id: LocationId::new("2067").unwrap(),
            name: LocationName::new("Chatswood").unwrap(),
        });

        assert_eq!(l.search_value, "2067:Chatswood");
    }
}
