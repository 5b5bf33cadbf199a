//! Recipe backend library modules.
//!
//! Hexagonal layout: [`domain`] holds the entity, use cases, dispatcher and
//! ports; [`outbound`] implements the ports; [`inbound`] exposes them over
//! HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
