//! QR code generator TUI library
//!
//! Exposes modules for the binary and for testing

pub mod api;
pub mod app;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::{App, AppSettings};
