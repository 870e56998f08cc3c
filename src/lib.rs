//! Stixis
//!
//! Halftone circle renderer: CLI, HTTP upload service and configuration
//! around the `halftone` engine crate.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
