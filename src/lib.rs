//! Cover-fit image resizing
//!
//! Scales an encoded image uniformly until it covers a target box, crops the
//! overflow around the center and re-encodes it in its original format.

pub mod app;
pub mod data_url;
pub mod error;
pub mod geometry;
pub mod mime;
pub mod models;
pub mod preview;
pub mod resize;

pub use error::{Error, Result};
