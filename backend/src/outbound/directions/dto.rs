//! DTOs for decoding directions provider JSON.
//!
//! The adapter decodes the envelope first, checks `status`, then maps the
//! first route's first leg into a domain [`RouteResult`] in one pass. Every
//! field the domain needs is optional here so that a missing value becomes a
//! descriptive error instead of an opaque serde failure.

use serde::Deserialize;

use crate::domain::instruction_text::to_plain_text;
use crate::domain::polyline;
use crate::domain::ports::RouteError;
use crate::domain::{GeoPoint, RouteBounds, RouteQuery, RouteResult, RouteStep};

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsResponseDto {
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) error_message: Option<String>,
    #[serde(default)]
    pub(super) routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RouteDto {
    #[serde(default)]
    legs: Vec<LegDto>,
    overview_polyline: Option<PolylineDto>,
    bounds: Option<BoundsDto>,
}

#[derive(Debug, Deserialize)]
struct PolylineDto {
    points: String,
}

#[derive(Debug, Deserialize)]
struct BoundsDto {
    northeast: LatLngDto,
    southwest: LatLngDto,
}

#[derive(Debug, Deserialize)]
struct LegDto {
    distance: Option<TextValueDto>,
    duration: Option<TextValueDto>,
    #[serde(default)]
    start_address: String,
    #[serde(default)]
    end_address: String,
    #[serde(default)]
    steps: Vec<StepDto>,
}

#[derive(Debug, Deserialize)]
struct StepDto {
    html_instructions: Option<String>,
    distance: Option<TextValueDto>,
    duration: Option<TextValueDto>,
    start_location: Option<LatLngDto>,
    end_location: Option<LatLngDto>,
}

#[derive(Debug, Deserialize)]
struct TextValueDto {
    text: String,
    value: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLngDto {
    lat: f64,
    lng: f64,
}

fn malformed(message: impl Into<String>) -> RouteError {
    RouteError::malformed_provider_response(message)
}

impl DirectionsResponseDto {
    /// Normalise the first route's first leg.
    ///
    /// Callers must have checked `status` beforehand.
    pub(super) fn into_route_result(self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| malformed("response contains no routes"))?;
        route.into_route_result(query)
    }
}

impl RouteDto {
    fn into_route_result(self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        let leg = self
            .legs
            .into_iter()
            .next()
            .ok_or_else(|| malformed("route contains no legs"))?;
        let encoded_path = self
            .overview_polyline
            .ok_or_else(|| malformed("route is missing overview_polyline"))?
            .points;
        polyline::decode(&encoded_path)?;
        let bounds = self.bounds.map(BoundsDto::into_domain).transpose()?;

        let distance = leg
            .distance
            .ok_or_else(|| malformed("leg is missing distance"))?;
        let duration = leg
            .duration
            .ok_or_else(|| malformed("leg is missing duration"))?;
        let steps = leg
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| step.into_domain(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteResult {
            distance_meters: whole_units(distance.value, "leg distance")?,
            duration_seconds: whole_units(duration.value, "leg duration")?,
            distance_text: distance.text,
            duration_text: duration.text,
            steps,
            encoded_path,
            mode: query.mode,
            start_address: leg.start_address,
            end_address: leg.end_address,
            bounds,
        })
    }
}

impl BoundsDto {
    fn into_domain(self) -> Result<RouteBounds, RouteError> {
        Ok(RouteBounds {
            northeast: self.northeast.into_point("bounds.northeast")?,
            southwest: self.southwest.into_point("bounds.southwest")?,
        })
    }
}

impl StepDto {
    fn into_domain(self, index: usize) -> Result<RouteStep, RouteError> {
        let missing = |field: &str| malformed(format!("step {index} is missing {field}"));
        let distance = self.distance.ok_or_else(|| missing("distance"))?;
        let duration = self.duration.ok_or_else(|| missing("duration"))?;
        let start = self.start_location.ok_or_else(|| missing("start_location"))?;
        let end = self.end_location.ok_or_else(|| missing("end_location"))?;
        Ok(RouteStep {
            instruction: self
                .html_instructions
                .as_deref()
                .map(to_plain_text)
                .unwrap_or_default(),
            distance_text: distance.text,
            duration_text: duration.text,
            start_location: start.into_point(&format!("step {index} start_location"))?,
            end_location: end.into_point(&format!("step {index} end_location"))?,
        })
    }
}

impl LatLngDto {
    fn into_point(self, field: &str) -> Result<GeoPoint, RouteError> {
        GeoPoint::new(self.lat, self.lng).map_err(|error| malformed(format!("{field}: {error}")))
    }
}

fn whole_units(value: f64, field: &str) -> Result<u64, RouteError> {
    if !value.is_finite() || value < 0.0 {
        return Err(malformed(format!("{field} must be a non-negative number, got {value}")));
    }
    let rounded = value.round();
    if rounded > u64::MAX as f64 {
        return Err(malformed(format!("{field} is too large: {value}")));
    }
    Ok(rounded as u64)
}

#[cfg(test)]
mod tests {
    //! Normalisation coverage for provider payloads.
    use super::*;
    use crate::domain::TravelMode;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn query() -> RouteQuery {
        RouteQuery::new(
            GeoPoint::new(34.0689, -118.4452).expect("origin"),
            GeoPoint::new(34.0700, -118.4440).expect("destination"),
            TravelMode::Bicycling,
        )
    }

    #[fixture]
    fn payload() -> Value {
        json!({
            "status": "OK",
            "routes": [{
                "bounds": {
                    "northeast": {"lat": 34.0701, "lng": -118.4439},
                    "southwest": {"lat": 34.0688, "lng": -118.4453}
                },
                "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"},
                "legs": [{
                    "distance": {"text": "0.2 mi", "value": 321.6},
                    "duration": {"text": "2 mins", "value": 118},
                    "start_address": "Royce Hall, Los Angeles",
                    "end_address": "Powell Library, Los Angeles",
                    "steps": [
                        {
                            "html_instructions": "Head <b>north</b> on Dickson&nbsp;Ct",
                            "distance": {"text": "0.1 mi", "value": 160},
                            "duration": {"text": "1 min", "value": 60},
                            "start_location": {"lat": 34.0689, "lng": -118.4452},
                            "end_location": {"lat": 34.0695, "lng": -118.4447}
                        },
                        {
                            "distance": {"text": "0.1 mi", "value": 161},
                            "duration": {"text": "1 min", "value": 58},
                            "start_location": {"lat": 34.0695, "lng": -118.4447},
                            "end_location": {"lat": 34.0700, "lng": -118.4440}
                        }
                    ]
                }]
            }]
        })
    }

    fn normalise(payload: Value, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        let dto: DirectionsResponseDto = serde_json::from_value(payload).expect("envelope decodes");
        dto.into_route_result(query)
    }

    #[rstest]
    fn normalises_first_leg(payload: Value, query: RouteQuery) {
        let route = normalise(payload, &query).expect("route normalises");

        assert_eq!(route.distance_meters, 322);
        assert_eq!(route.duration_seconds, 118);
        assert_eq!(route.distance_text, "0.2 mi");
        assert_eq!(route.mode, TravelMode::Bicycling);
        assert_eq!(route.start_address, "Royce Hall, Los Angeles");
        assert_eq!(route.steps.len(), 2);
        assert_eq!(route.steps[0].instruction, "Head north on Dickson Ct");
        assert_eq!(route.steps[1].instruction, "", "missing instructions become empty");
        assert!(route.bounds.is_some());
        assert_eq!(route.decoded_path().expect("path decodes").len(), 3);
    }

    #[rstest]
    #[case::no_routes("/routes", json!([]))]
    #[case::no_legs("/routes/0/legs", json!([]))]
    #[case::no_polyline("/routes/0/overview_polyline", Value::Null)]
    #[case::no_leg_distance("/routes/0/legs/0/distance", Value::Null)]
    #[case::negative_duration("/routes/0/legs/0/duration/value", json!(-4))]
    #[case::step_without_end("/routes/0/legs/0/steps/0/end_location", Value::Null)]
    #[case::bounds_out_of_range("/routes/0/bounds/northeast/lat", json!(123.0))]
    fn rejects_incomplete_payloads(
        mut payload: Value,
        query: RouteQuery,
        #[case] pointer: &str,
        #[case] replacement: Value,
    ) {
        *payload.pointer_mut(pointer).expect("pointer exists") = replacement;
        let error = normalise(payload, &query).expect_err("payload rejected");
        assert!(
            matches!(error, RouteError::MalformedProviderResponse { .. }),
            "{pointer}: {error:?}"
        );
    }

    #[rstest]
    fn undecodable_polyline_is_reported(mut payload: Value, query: RouteQuery) {
        *payload
            .pointer_mut("/routes/0/overview_polyline/points")
            .expect("pointer exists") = json!("_p~iF~ps|");
        let error = normalise(payload, &query).expect_err("polyline rejected");
        assert!(matches!(error, RouteError::MalformedPolyline { .. }), "{error:?}");
    }

    #[rstest]
    fn bounds_are_optional(mut payload: Value, query: RouteQuery) {
        payload["routes"][0]
            .as_object_mut()
            .expect("route object")
            .remove("bounds");
        let route = normalise(payload, &query).expect("route normalises");
        assert!(route.bounds.is_none());
    }
}
