//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Error classification and user-facing messages
//! - filenames: Client-side names for downloaded files
//! - grid: Batch grid geometry and cursor movement
//! - ui: UI state transitions and text fitting
//! - urls: API base selection and relative URL resolution
//! - validation: URL and spreadsheet checks done before any request

pub mod errors;
pub mod filenames;
pub mod grid;
pub mod ui;
pub mod urls;
pub mod validation;
