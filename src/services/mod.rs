//! External Services
//!
//! - api: background worker that runs QR service requests off the UI loop

pub mod api;

pub use api::{spawn_api_service, ApiRequest, ApiResponse};
