//! Zone map geometry.
//!
//! Coordinates are already in map space: `x` is the first source field of a
//! map file entry, `y` the second, `z` the elevation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color for line segments that carry no color fields.
    pub const DEFAULT_LINE: Rgb = Rgb::new(150, 150, 150);

    /// Substitute for an explicit `0, 0, 0` color, which would be invisible
    /// on the dark map background.
    pub const ZEROED_FALLBACK: Rgb = Rgb::new(130, 130, 130);

    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::DEFAULT_LINE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// A single `L` entry from a map file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLine {
    pub start: Point3,
    pub end: Point3,
    pub color: Rgb,
}

impl MapLine {
    /// True if either endpoint lies within `range` of elevation `z`.
    pub fn touches_z(&self, z: f64, range: f64) -> bool {
        (self.start.z - z).abs() <= range || (self.end.z - z).abs() <= range
    }
}

/// A single `P` entry from a map file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLabel {
    pub position: Point3,
    pub color: Rgb,
    /// Font size hint (map files use 0-3).
    pub size: i32,
    pub text: String,
}

/// Axis-aligned 2-D bounding box over map-space x/y.
///
/// Starts inverted so the first [`Bounds::include`] collapses it onto that
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    pub const fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// No point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn include_line(&mut self, line: &MapLine) {
        self.include(line.start.x, line.start.y);
        self.include(line.end.x, line.end.y);
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_x - self.min_x }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_y - self.min_y }
    }

    pub fn center(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        Some((
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ))
    }
}
