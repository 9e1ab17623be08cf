//! HTTP server
//!
//! A [`ServerBuilder`] assembles a [`ServerHost`] (catalog, schema and
//! authentication) and exposes it through the GraphQL router.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::{GraphQLExposure, health_routes};
pub use host::ServerHost;
