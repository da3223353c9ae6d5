//! Geospatial definitions.

use std::{fmt, str::FromStr};

use common::define_kind;
use derive_more::{AsRef, Display};

/// Point on the Earth surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees, within `[-90; 90]`.
    latitude: f64,

    /// Longitude in degrees, within `[-180; 180]`.
    longitude: f64,
}

impl Coordinates {
    /// Creates new [`Coordinates`] if the provided values are within range.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        ((-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude))
        .then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude of these [`Coordinates`].
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude of these [`Coordinates`].
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    /// Formats as `latitude,longitude`, the way routing providers accept it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Rectangle on a map containing a set of [`Coordinates`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// South-west corner.
    pub south_west: Coordinates,

    /// North-east corner.
    pub north_east: Coordinates,
}

impl Bounds {
    /// Calculates the smallest [`Bounds`] containing all the provided
    /// `points`.
    ///
    /// [`None`] is returned if there are no `points`.
    pub fn containing(
        points: impl IntoIterator<Item = Coordinates>,
    ) -> Option<Self> {
        points.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => Self {
                    south_west: p,
                    north_east: p,
                },
                Some(Self {
                    south_west: sw,
                    north_east: ne,
                }) => Self {
                    south_west: Coordinates {
                        latitude: sw.latitude.min(p.latitude),
                        longitude: sw.longitude.min(p.longitude),
                    },
                    north_east: Coordinates {
                        latitude: ne.latitude.max(p.latitude),
                        longitude: ne.longitude.max(p.longitude),
                    },
                },
            })
        })
    }

    /// Checks whether these [`Bounds`] contain the provided `point`.
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south_west.latitude..=self.north_east.latitude)
            .contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude)
                .contains(&point.longitude)
    }
}

/// Place a user may search listings around, like a suburb.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Location {
    /// [`LocationId`] of this [`Location`].
    pub id: LocationId,

    /// Human-readable name of this [`Location`], like `Chatswood`.
    pub name: LocationName,
}

/// Identifier of a [`Location`], which is its postcode.
///
/// Never contains a `:`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str)]
pub struct LocationId(String);

impl LocationId {
    /// Creates a new [`LocationId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`LocationId`].
    fn check(id: &str) -> bool {
        id.trim() == id && !id.is_empty() && id.len() <= 16 && !id.contains(':')
    }
}

impl FromStr for LocationId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `LocationId`")
    }
}

/// Name of a [`Location`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str)]
pub struct LocationName(String);

impl LocationName {
    /// Creates a new [`LocationName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`LocationName`].
    fn check(name: &str) -> bool {
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for LocationName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `LocationName`")
    }
}

define_kind! {
    #[doc = "Mode of travelling along a [`Route`]."]
    #[case = "lowercase"]
    enum TravelMode {
        #[doc = "By car."]
        Driving = 1,

        #[doc = "On foot."]
        Walking = 2,

        #[doc = "By bicycle."]
        Bicycling = 3,

        #[doc = "By public transport."]
        Transit = 4,
    }
}

/// Starting point of a [`Route`].
#[derive(Clone, Debug, PartialEq)]
pub enum Origin {
    /// Free-text place, like an address typed by a user.
    Place(String),

    /// Exact [`Coordinates`], like a device geolocation.
    Coordinates(Coordinates),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place(place) => f.write_str(place),
            Self::Coordinates(c) => write!(f, "{c}"),
        }
    }
}

/// Route computed by a routing provider.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Encoded polyline of the whole [`Route`].
    pub polyline: String,

    /// Total [`Distance`] of the [`Route`].
    pub distance: Distance,

    /// Total [`TravelTime`] of the [`Route`].
    pub duration: TravelTime,

    /// Turn-by-turn [`Step`]s of the [`Route`].
    pub steps: Vec<Step>,
}

/// Single turn-by-turn step of a [`Route`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Textual instruction, like `Turn left onto George St`.
    pub instruction: String,

    /// [`Distance`] of this [`Step`].
    pub distance: Distance,

    /// [`TravelTime`] of this [`Step`].
    pub duration: TravelTime,
}

/// Distance along a [`Route`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Distance {
    /// Distance in meters.
    pub meters: u64,

    /// Human-readable text, like `1.2 km`.
    pub text: String,
}

/// Time of travelling along a [`Route`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TravelTime {
    /// Time in seconds.
    pub seconds: u64,

    /// Human-readable text, like `5 mins`.
    pub text: String,
}
