#![forbid(unsafe_code)]

//! Layout format model for adaptive SVG text fitting.
//!
//! A layout stores one [`Format`] per supported line count; each format lists
//! the geometry and font bounds of every simultaneously visible text line.
//! This crate owns that model plus the compact wire form the host stores it
//! in. The fitting engine itself lives in the `fitline` crate.
//!
//! Design goals:
//! - validated-once formats: every invariant is checked at construction, so
//!   binding a format to a live line can never fail
//! - deterministic, testable outputs (no rendering substrate required)

pub mod error;
pub mod format;
pub mod geom;

pub use error::{Error, Result};
pub use format::{
    Align, Format, FormatSet, LineFormat, MAX_LINES, NoPaths, PATH_LENGTH_MARGIN, PathResolver,
    TextPath,
};
