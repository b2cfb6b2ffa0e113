//! HTTP API for the patient and doctor clients.
//!
//! Routes are nested under `/api/`. Everything except the health check and
//! login sits behind bearer-token auth. The router is composable:
//! `api_router()` returns a `Router` that can be mounted on any axum server.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::ApiContext;
