//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the route and health endpoints plus the
//! framework-free schema wrappers for the domain error payload. The document
//! backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::routes::{
    DirectionsResponse, LatLngDto, RouteBoundsDto, RouteDto, RouteStepDto,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wayfinder route API",
        description = "Walking and cycling directions between campus locations, with short-lived caching of provider answers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::routes::get_directions,
        crate::inbound::http::routes::clear_route_cache,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DirectionsResponse,
        RouteDto,
        RouteStepDto,
        RouteBoundsDto,
        LatLngDto,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "routes", description = "Route calculation and cache control"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
