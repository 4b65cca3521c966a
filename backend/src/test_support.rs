//! Shared test doubles for the crate's unit tests.
//!
//! Only compiled under `cfg(test)`.

pub mod clock;
pub mod logs;
pub mod routes;

pub use clock::MutableClock;
pub use logs::CapturedLogs;
pub use routes::sample_route;
