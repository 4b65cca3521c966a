//! Domain primitives, services, and ports.
//!
//! Purpose: hold everything about route calculation that does not depend on
//! a transport or provider. Inbound adapters drive the domain through
//! [`ports::RouteCalculator`]; outbound adapters implement
//! [`ports::DirectionsSource`] and [`ports::RouteCache`].
//!
//! Public surface:
//! - GeoPoint, TravelMode, RouteQuery: validated coordinate value types.
//! - RouteRequestInput: raw inbound coordinates and their validator.
//! - RouteResult, RouteStep, RouteBounds: the normalised provider answer.
//! - RoutePlanner: the cache-aside route calculation service.
//! - Error, ErrorCode: transport-agnostic error payload.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod geo;
pub mod instruction_text;
pub mod polyline;
pub mod ports;
pub mod route;
pub mod route_planner;
pub mod route_request;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::geo::{GeoPoint, GeoPointValidationError, RouteQuery, TravelMode};
pub use self::route::{RouteBounds, RouteResult, RouteStep};
pub use self::route_planner::RoutePlanner;
pub use self::route_request::RouteRequestInput;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
