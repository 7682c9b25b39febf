//! Chirp backend library: domain model, ports and adapters.

pub mod doc;
pub mod domain;
#[cfg(any(test, feature = "example-data"))]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
