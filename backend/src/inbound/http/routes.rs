//! Route calculation API handlers.
//!
//! ```text
//! GET    /api/v1/routes/directions  Calculate a walking or cycling route
//! DELETE /api/v1/routes/cache       Drop every cached route
//! ```

use actix_web::{HttpResponse, delete, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, GeoPoint, RouteBounds, RouteRequestInput, RouteResult, RouteStep};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string accepted by [`get_directions`].
///
/// Coordinates stay textual here; the domain validator reports which one is
/// missing or malformed.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DirectionsQuery {
    /// Origin latitude in decimal degrees.
    #[param(example = "34.0689")]
    pub origin_lat: Option<String>,
    /// Origin longitude in decimal degrees.
    #[param(example = "-118.4452")]
    pub origin_lng: Option<String>,
    /// Destination latitude in decimal degrees.
    #[param(example = "34.0700")]
    pub dest_lat: Option<String>,
    /// Destination longitude in decimal degrees.
    #[param(example = "-118.4440")]
    pub dest_lng: Option<String>,
    /// `true` for a cycling route; walking otherwise.
    #[param(example = "false")]
    pub bike_mode: Option<String>,
}

impl DirectionsQuery {
    fn into_input(self) -> Result<RouteRequestInput, Error> {
        let bike_mode = parse_flag(self.bike_mode.as_deref()).ok_or_else(|| {
            Error::invalid_request("bikeMode must be true or false").with_details(json!({
                "field": "bikeMode",
                "kind": "invalid_request",
            }))
        })?;
        Ok(RouteRequestInput {
            origin_lat: self.origin_lat,
            origin_lng: self.origin_lng,
            dest_lat: self.dest_lat,
            dest_lng: self.dest_lng,
            bike_mode,
        })
    }
}

fn parse_flag(raw: Option<&str>) -> Option<bool> {
    let Some(value) = raw.map(str::trim) else {
        return Some(false);
    };
    if value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false") {
        Some(false)
    } else if value == "1" || value.eq_ignore_ascii_case("true") {
        Some(true)
    } else {
        None
    }
}

/// Query extractor configuration for the route endpoints.
///
/// Query strings serde cannot decode (duplicate keys, broken percent
/// encoding) are answered with the JSON error payload instead of actix's
/// plain-text default.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}"))
            .with_details(json!({"kind": "invalid_request"}))
            .into()
    })
}

/// Coordinate pair as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LatLngDto {
    #[schema(example = 34.0689)]
    pub lat: f64,
    #[schema(example = -118.4452)]
    pub lng: f64,
}

impl From<GeoPoint> for LatLngDto {
    fn from(point: GeoPoint) -> Self {
        Self {
            lat: point.latitude(),
            lng: point.longitude(),
        }
    }
}

/// One turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteStepDto {
    /// Plain-text instruction.
    #[schema(example = "Head north on Dickson Ct")]
    pub instruction: String,
    /// Provider-formatted step distance.
    #[schema(example = "0.1 mi")]
    pub distance: String,
    /// Provider-formatted step duration.
    #[schema(example = "1 min")]
    pub duration: String,
    pub start_location: LatLngDto,
    pub end_location: LatLngDto,
}

impl From<&RouteStep> for RouteStepDto {
    fn from(step: &RouteStep) -> Self {
        Self {
            instruction: step.instruction.clone(),
            distance: step.distance_text.clone(),
            duration: step.duration_text.clone(),
            start_location: step.start_location.into(),
            end_location: step.end_location.into(),
        }
    }
}

/// Viewport enclosing the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteBoundsDto {
    pub northeast: LatLngDto,
    pub southwest: LatLngDto,
}

impl From<RouteBounds> for RouteBoundsDto {
    fn from(bounds: RouteBounds) -> Self {
        Self {
            northeast: bounds.northeast.into(),
            southwest: bounds.southwest.into(),
        }
    }
}

/// Normalised route returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    /// Total distance in metres.
    #[schema(example = 322)]
    pub distance: u64,
    /// Total duration in seconds.
    #[schema(example = 118)]
    pub duration: u64,
    #[schema(example = "0.2 mi")]
    pub distance_text: String,
    #[schema(example = "2 mins")]
    pub duration_text: String,
    pub steps: Vec<RouteStepDto>,
    /// Encoded overview polyline (5-decimal precision).
    #[schema(example = "_p~iF~ps|U_ulLnnqC_mqNvxq`@")]
    pub polyline: String,
    pub bike_mode: bool,
    pub start_address: String,
    pub end_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<RouteBoundsDto>,
}

impl From<&RouteResult> for RouteDto {
    fn from(route: &RouteResult) -> Self {
        Self {
            distance: route.distance_meters,
            duration: route.duration_seconds,
            distance_text: route.distance_text.clone(),
            duration_text: route.duration_text.clone(),
            steps: route.steps.iter().map(RouteStepDto::from).collect(),
            polyline: route.encoded_path.clone(),
            bike_mode: route.mode.is_bicycling(),
            start_address: route.start_address.clone(),
            end_address: route.end_address.clone(),
            bounds: route.bounds.map(RouteBoundsDto::from),
        }
    }
}

/// Successful directions response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DirectionsResponse {
    /// Always `true`; failures use the error payload instead.
    pub success: bool,
    pub route: RouteDto,
}

/// Calculate a route between two points.
///
/// Answers repeat requests for nearby coordinates (same four decimals) from
/// the route cache for five minutes.
#[utoipa::path(
    get,
    path = "/api/v1/routes/directions",
    params(DirectionsQuery),
    responses(
        (status = 200, description = "Route calculated", body = DirectionsResponse),
        (status = 400, description = "Invalid coordinates or request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No route or location found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 429, description = "Provider quota exceeded", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 502, description = "Provider failure", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Provider unreachable", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 504, description = "Provider timed out", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["routes"],
    operation_id = "getDirections"
)]
#[get("/routes/directions")]
pub async fn get_directions(
    state: web::Data<HttpState>,
    query: web::Query<DirectionsQuery>,
) -> ApiResult<HttpResponse> {
    let input = query.into_inner().into_input()?;
    let route = state.route_calculator.calculate(input).await?;
    Ok(HttpResponse::Ok().json(DirectionsResponse {
        success: true,
        route: RouteDto::from(route.as_ref()),
    }))
}

/// Drop every cached route.
#[utoipa::path(
    delete,
    path = "/api/v1/routes/cache",
    responses((status = 204, description = "Route cache cleared")),
    tags = ["routes"],
    operation_id = "clearRouteCache"
)]
#[delete("/routes/cache")]
pub async fn clear_route_cache(state: web::Data<HttpState>) -> HttpResponse {
    state.route_calculator.clear_cache();
    info!("route cache cleared via API");
    HttpResponse::NoContent().finish()
}
