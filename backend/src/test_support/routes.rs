//! Canned route results keyed to a query.

use crate::domain::polyline;
use crate::domain::{RouteQuery, RouteResult, RouteStep};

/// A two-step route from `query.origin` to `query.destination`.
///
/// Addresses echo the endpoints so callers can tell results apart.
pub fn sample_route(query: &RouteQuery) -> RouteResult {
    RouteResult {
        distance_meters: 450,
        duration_seconds: 330,
        distance_text: "0.3 mi".to_owned(),
        duration_text: "6 mins".to_owned(),
        steps: vec![
            RouteStep {
                instruction: "Head north on Bruin Walk".to_owned(),
                distance_text: "0.2 mi".to_owned(),
                duration_text: "4 mins".to_owned(),
                start_location: query.origin,
                end_location: query.destination,
            },
            RouteStep {
                instruction: "Destination will be on the left".to_owned(),
                distance_text: "0.1 mi".to_owned(),
                duration_text: "2 mins".to_owned(),
                start_location: query.destination,
                end_location: query.destination,
            },
        ],
        encoded_path: polyline::encode(&[query.origin, query.destination]),
        mode: query.mode,
        start_address: query.origin.to_string(),
        end_address: query.destination.to_string(),
        bounds: None,
    }
}
