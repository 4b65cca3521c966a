//! Directions provider outbound adapters.
//!
//! Provides the reqwest implementation of the `DirectionsSource` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_DIRECTIONS_TIMEOUT, DEFAULT_DIRECTIONS_UNITS, DirectionsHttpSource};
