//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **cache**: bounded in-memory route cache
//! - **directions**: reqwest client for the directions provider
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod cache;
pub mod directions;
