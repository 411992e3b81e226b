#![forbid(unsafe_code)]

//! Adaptive text fitting for fixed text regions.
//!
//! Given a validated [`FormatSet`] (per-line-count geometry and font bounds)
//! and a [`TextMeasurer`] supplied by the rendering environment, the engine
//! computes, for every line of user-entered text, the largest font size that
//! fits the line's region — shrinking, truncating, and balancing across
//! lines as needed. It renders nothing and persists nothing; callers read the
//! per-line results back and paint them.
//!
//! Entry points:
//! - [`LineManager`]: the full multi-line engine (format switching, keystroke
//!   dispatch, balancing)
//! - [`catalog`]: the grow-only pass used for listing thumbnails
//! - [`editor`]: interactive geometry editing with drag-friendly numeric
//!   semantics

pub mod catalog;
pub mod editor;
pub mod line;
pub mod manager;
pub mod measure;

pub use fitline_core::*;

pub use line::{Line, TextChange};
pub use manager::LineManager;
pub use measure::{DeterministicTextMeasurer, MeasureError, TextMeasurer};

use std::sync::Arc;

/// Engine configuration supplied by the caller.
#[derive(Clone)]
pub struct FitOptions {
    pub measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Render all active lines at one shared size (the smallest best fit)
    /// instead of each line's own. Stored per product by the host.
    pub balance: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            measurer: Arc::new(DeterministicTextMeasurer::default()),
            balance: true,
        }
    }
}

#[cfg(test)]
mod tests;
