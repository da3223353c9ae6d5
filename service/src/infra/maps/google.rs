//! [Google Maps Platform] [`Maps`] implementation.
//!
//! [Google Maps Platform]: https://developers.google.com/maps

use std::sync::LazyLock;

use common::operations::{By, Select};
use derive_more::{AsRef, Display};
use regex::Regex;
use secrecy::{
    zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox,
};
use serde::{de::DeserializeOwned, Deserialize};
use tracerr::Traced;

use crate::{
    domain::geo::{Coordinates, Location, Origin, Route, TravelMode},
    infra::{
        http::{Method, Request, Transport},
        maps::{Error, ProviderError},
        Http, Maps,
    },
};

/// API key of the [Google Maps Platform].
///
/// [Google Maps Platform]: https://developers.google.com/maps
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new [`ApiKey`] if the given `key` is not blank.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        (!key.trim().is_empty()).then_some(Self(key))
    }

    /// Creates a new secret [`ApiKey`] if the given `key` is not blank.
    #[must_use]
    pub fn secret(key: impl Into<String>) -> Option<SecretBox<Self>> {
        Self::new(key).map(|k| SecretBox::new(Box::new(k)))
    }
}

impl CloneableSecret for ApiKey {}
impl Zeroize for ApiKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// [Google Maps Platform] [`Maps`] client.
///
/// [Google Maps Platform]: https://developers.google.com/maps
#[derive(Clone, Debug)]
pub struct Google<T = Http> {
    /// [`Transport`] of this [`Google`] client.
    transport: T,

    /// [`ApiKey`] every request is signed with.
    api_key: SecretBox<ApiKey>,

    /// Region code biasing place search, like `au`.
    region: Option<String>,
}

impl<T> Google<T> {
    /// Creates a new [`Google`] client.
    #[must_use]
    pub fn new(
        transport: T,
        api_key: SecretBox<ApiKey>,
        region: Option<String>,
    ) -> Self {
        Self {
            transport,
            api_key,
            region,
        }
    }
}

impl<T: Transport> Google<T> {
    /// Sends a `GET` request to the provided API `path` and decodes its
    /// payload, checking the provider status.
    ///
    /// `ZERO_RESULTS` is only accepted if `allow_empty` is set.
    async fn call<R: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
        allow_empty: bool,
    ) -> Result<R, Traced<Error>> {
        params.push(("key", self.api_key.expose_secret().to_string()));
        let response = self
            .transport
            .send(Request::new(Method::Get, path).query(params))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        if !response.is_success() {
            return Err(tracerr::new!(Error::Provider(ProviderError {
                status: format!("HTTP {}", response.status),
                message: "request failed".to_owned(),
            })));
        }

        let status = Status::deserialize(&response.body)
            .map_err(|e| tracerr::new!(Error::Malformed(e.to_string())))?;
        match status.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" if allow_empty => {}
            _ => {
                tracing::debug!(path, status = %status.status, "maps failed");
                return Err(tracerr::new!(Error::Provider(ProviderError {
                    message: status
                        .error_message
                        .unwrap_or_else(|| status.status.clone()),
                    status: status.status,
                })));
            }
        }
        R::deserialize(response.body)
            .map_err(|e| tracerr::new!(Error::Malformed(e.to_string())))
    }
}

impl<T: Transport> Maps<Select<By<Route, (Origin, Coordinates, TravelMode)>>>
    for Google<T>
{
    type Ok = Route;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Route, (Origin, Coordinates, TravelMode)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (origin, destination, mode) = by.into_inner();
        let params = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", mode.to_string()),
        ];
        let raw: schema::Directions = self
            .call("/maps/api/directions/json", params, false)
            .await
            .map_err(tracerr::wrap!())?;
        raw.try_into()
            .map_err(|e: String| tracerr::new!(Error::Malformed(e)))
    }
}

impl<T: Transport> Maps<Select<By<Vec<Location>, String>>> for Google<T> {
    type Ok = Vec<Location>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Location>, String>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut params = vec![("address", by.into_inner())];
        if let Some(region) = &self.region {
            params.push(("region", region.clone()));
            params.push(("components", format!("country:{region}")));
        }
        let raw: schema::Geocoding = self
            .call("/maps/api/geocode/json", params, true)
            .await
            .map_err(tracerr::wrap!())?;

        let mut locations = Vec::<Location>::new();
        for location in raw.results.into_iter().filter_map(|r| r.location()) {
            if !locations.contains(&location) {
                locations.push(location);
            }
        }
        Ok(locations)
    }
}

/// Status envelope of every Google Maps response.
#[derive(Debug, Deserialize)]
struct Status {
    status: String,
    error_message: Option<String>,
}

/// Strips HTML tags off the provided `html` instruction.
fn strip_tags(html: &str) -> String {
    /// Regular expression matching an HTML tag.
    static TAG: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("<[^>]*>").expect("valid regex"));
    TAG.replace_all(html, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

mod schema {
    //! Raw Google Maps response schemas.

    use serde::Deserialize;

    use crate::domain::geo::{
        Distance, Location, LocationId, LocationName, Route, Step, TravelTime,
    };

    use super::strip_tags;

    #[derive(Debug, Deserialize)]
    pub(super) struct Directions {
        #[serde(default)]
        routes: Vec<DirectionsRoute>,
    }

    #[derive(Debug, Deserialize)]
    struct DirectionsRoute {
        overview_polyline: Polyline,
        #[serde(default)]
        legs: Vec<Leg>,
    }

    #[derive(Debug, Deserialize)]
    struct Polyline {
        points: String,
    }

    #[derive(Debug, Deserialize)]
    struct Leg {
        distance: Value,
        duration: Value,
        #[serde(default)]
        steps: Vec<LegStep>,
    }

    #[derive(Debug, Deserialize)]
    struct LegStep {
        #[serde(default)]
        html_instructions: String,
        distance: Value,
        duration: Value,
    }

    /// Measured value along with its human-readable text.
    #[derive(Debug, Deserialize)]
    struct Value {
        value: u64,
        text: String,
    }

    impl TryFrom<Directions> for Route {
        type Error = String;

        fn try_from(raw: Directions) -> Result<Self, Self::Error> {
            let route = raw
                .routes
                .into_iter()
                .next()
                .ok_or("no routes in `OK` response")?;
            let (mut meters, mut seconds) = (0, 0);
            let mut steps = Vec::new();
            for leg in &route.legs {
                meters += leg.distance.value;
                seconds += leg.duration.value;
            }
            let texts = match route.legs.as_slice() {
                [leg] => {
                    Some((leg.distance.text.clone(), leg.duration.text.clone()))
                }
                _ => None,
            };
            for leg in route.legs {
                steps.extend(leg.steps.into_iter().map(|s| Step {
                    instruction: strip_tags(&s.html_instructions),
                    distance: Distance {
                        meters: s.distance.value,
                        text: s.distance.text,
                    },
                    duration: TravelTime {
                        seconds: s.duration.value,
                        text: s.duration.text,
                    },
                }));
            }
            let (distance_text, duration_text) = texts.unwrap_or_else(|| {
                (format!("{meters} m"), format!("{} mins", seconds.div_ceil(60)))
            });

            Ok(Self {
                polyline: route.overview_polyline.points,
                distance: Distance {
                    meters,
                    text: distance_text,
                },
                duration: TravelTime {
                    seconds,
                    text: duration_text,
                },
                steps,
            })
        }
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Geocoding {
        #[serde(default)]
        pub(super) results: Vec<GeocodingResult>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct GeocodingResult {
        #[serde(default)]
        address_components: Vec<AddressComponent>,
    }

    #[derive(Debug, Deserialize)]
    struct AddressComponent {
        long_name: String,
        #[serde(default)]
        types: Vec<String>,
    }

    impl GeocodingResult {
        /// Extracts the [`Location`] of this result, if it has both a
        /// postcode and a locality.
        pub(super) fn location(&self) -> Option<Location> {
            let component = |kind: &str| {
                self.address_components
                    .iter()
                    .find(|c| c.types.iter().any(|t| t == kind))
                    .map(|c| c.long_name.clone())
            };
            Some(Location {
                id: LocationId::new(component("postal_code")?)?,
                name: LocationName::new(component("locality")?)?,
            })
        }
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use serde_json::json;

    use crate::{
        domain::geo::{Coordinates, Location, Origin, Route, TravelMode},
        infra::{
            http::mock::{respond, Scripted},
            maps::Error,
            Maps,
        },
    };

    use super::{ApiKey, Google};

    fn google(transport: Scripted) -> Google<Scripted> {
        Google::new(
            transport,
            ApiKey::secret("secret-key").unwrap(),
            Some("au".to_owned()),
        )
    }

    fn route_to(
        mode: TravelMode,
    ) -> Select<By<Route, (Origin, Coordinates, TravelMode)>> {
        Select(By::new((
            Origin::Place("Central Station, Sydney".into()),
            Coordinates::new(-33.8, 151.18).unwrap(),
            mode,
        )))
    }

    #[tokio::test]
    async fn computes_route() {
        let transport = Scripted::new(|_| {
            respond(
                200,
                json!({
                    "status": "OK",
                    "routes": [{
                        "overview_polyline": { "points": "a~l~Fjk~uOwHJy@P" },
                        "legs": [{
                            "distance": { "value": 12_300, "text": "12.3 km" },
                            "duration": { "value": 1_260, "text": "21 mins" },
                            "steps": [{
                                "html_instructions": "Head <b>north</b> on <b>Eddy Ave</b>",
                                "distance": { "value": 300, "text": "0.3 km" },
                                "duration": { "value": 60, "text": "1 min" },
                            }],
                        }],
                    }],
                }),
            )
        });
        let maps = google(transport.clone());

        let route = maps.execute(route_to(TravelMode::Walking)).await.unwrap();

        assert_eq!(route.polyline, "a~l~Fjk~uOwHJy@P");
        assert_eq!(route.distance.meters, 12_300);
        assert_eq!(route.duration.text, "21 mins");
        assert_eq!(route.steps[0].instruction, "Head north on Eddy Ave");

        let req = &transport.requests()[0];
        assert_eq!(req.path, "/maps/api/directions/json");
        assert_eq!(req.param("origin"), Some("Central Station, Sydney"));
        assert_eq!(req.param("destination"), Some("-33.8,151.18"));
        assert_eq!(req.param("mode"), Some("walking"));
        assert_eq!(req.param("key"), Some("secret-key"));
    }

    #[tokio::test]
    async fn names_provider_status_on_failure() {
        let transport = Scripted::new(|_| {
            respond(200, json!({ "status": "ZERO_RESULTS", "routes": [] }))
        });
        let maps = google(transport);

        let err = maps
            .execute(route_to(TravelMode::Transit))
            .await
            .unwrap_err();

        match err.as_ref() {
            Error::Provider(e) => assert_eq!(e.status, "ZERO_RESULTS"),
            e => panic!("unexpected error: {e}"),
        }
    }

    #[tokio::test]
    async fn finds_locations_with_postcode_and_locality() {
        let transport = Scripted::new(|_| {
            respond(
                200,
                json!({
                    "status": "OK",
                    "results": [
                        { "address_components": [
                            { "long_name": "Chatswood", "types": ["locality", "political"] },
                            { "long_name": "2067", "types": ["postal_code"] },
                        ] },
                        { "address_components": [
                            { "long_name": "New South Wales", "types": ["administrative_area_level_1"] },
                        ] },
                        { "address_components": [
                            { "long_name": "2067", "types": ["postal_code"] },
                            { "long_name": "Chatswood", "types": ["locality"] },
                        ] },
                    ],
                }),
            )
        });
        let maps = google(transport.clone());

        let found = maps
            .execute(Select(By::<Vec<Location>, _>::new("chatswood".to_owned())))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.to_string(), "2067");
        assert_eq!(found[0].name.to_string(), "Chatswood");
        let req = &transport.requests()[0];
        assert_eq!(req.param("region"), Some("au"));
    }

    #[tokio::test]
    async fn finds_nothing_on_zero_results() {
        let transport = Scripted::new(|_| {
            respond(200, json!({ "status": "ZERO_RESULTS", "results": [] }))
        });
        let maps = google(transport);

        let found = maps
            .execute(Select(By::<Vec<Location>, _>::new("nowhere".to_owned())))
            .await
            .unwrap();

        assert!(found.is_empty());
    }
}
