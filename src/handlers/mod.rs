//! Event Handlers
//!
//! This module contains handlers for the two event sources of the main loop:
//! - api: responses from the background request worker
//! - keyboard: user keyboard input
//!
//! Handlers are functions that take &mut App and process one event.

pub mod api;
pub mod keyboard;

// Re-export for convenience
pub use api::handle_api_response;
pub use keyboard::handle_key;
