//! Shared types for noxmap.
//!
//! Plain data consumed by both the engine and anything that draws it:
//! zone geometry, bounding boxes and the persisted application config.

pub mod config;
pub mod geometry;

pub use config::{AppConfig, TailerSettings};
pub use geometry::{Bounds, MapLabel, MapLine, Point3, Rgb};
