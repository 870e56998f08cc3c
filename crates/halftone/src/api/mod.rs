//! Public API for the halftone crate.
//!
//! This module provides the high-level API: the [`HalftoneEngine`]
//! orchestrator, the one-shot [`process`] function and the unified
//! [`HalftoneError`] type.

mod engine;
mod error;

pub use engine::{process, HalftoneEngine, RenderReport};
pub use error::HalftoneError;
