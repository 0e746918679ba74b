//! Zone maps
//!
//! EverQuest map files are plain text, one `L` (line segment) or `P` (point
//! label) entry per line. A zone has a base file `<code>.txt` plus optional
//! layers `<code>_1.txt` .. `<code>_3.txt`; [`load_zone`] merges them all
//! into one [`ZoneMap`].

mod loader;
mod lookup;
mod parse;
pub mod prune;

pub use loader::{LAYER_SUFFIXES, load_zone, load_zone_for};
pub use lookup::ZoneLookup;
pub use parse::{parse_map_file, parse_map_text};

use noxmap_types::{Bounds, MapLabel, MapLine};

/// All geometry for one zone. Replaced wholesale on the next zone change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZoneMap {
    pub name: String,
    pub lines: Vec<MapLine>,
    pub labels: Vec<MapLabel>,
    /// Covers every line endpoint. Labels do not widen it.
    pub bounds: Bounds,
}

impl ZoneMap {
    /// An empty map carrying only the zone name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
            labels: Vec::new(),
            bounds: Bounds::empty(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.lines.len() + self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub(crate) fn push_line(&mut self, line: MapLine) {
        self.bounds.include_line(&line);
        self.lines.push(line);
    }

    pub(crate) fn push_label(&mut self, label: MapLabel) {
        self.labels.push(label);
    }

    /// Bounds over only the segments with an endpoint within `range` of
    /// elevation `z`, so a multi-level zone can be framed on the player's
    /// floor. Falls back to the full bounds when nothing is that close.
    pub fn bounds_near_z(&self, z: f64, range: f64) -> Bounds {
        let mut bounds = Bounds::empty();
        for line in self.lines.iter().filter(|l| l.touches_z(z, range)) {
            bounds.include_line(line);
        }
        if bounds.is_empty() { self.bounds } else { bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noxmap_types::{Point3, Rgb};

    fn segment(x1: f64, y1: f64, x2: f64, y2: f64, z: f64) -> MapLine {
        MapLine {
            start: Point3::new(x1, y1, z),
            end: Point3::new(x2, y2, z),
            color: Rgb::DEFAULT_LINE,
        }
    }

    #[test]
    fn test_bounds_near_z_picks_current_floor() {
        let mut map = ZoneMap::new("tower");
        map.push_line(segment(0.0, 0.0, 100.0, 100.0, 0.0));
        map.push_line(segment(40.0, 40.0, 60.0, 60.0, 50.0));

        let upper = map.bounds_near_z(48.0, 5.0);
        assert_eq!((upper.min_x, upper.max_x), (40.0, 60.0));

        let whole = map.bounds_near_z(500.0, 5.0);
        assert_eq!(whole, map.bounds);
        assert_eq!((whole.min_x, whole.max_x), (0.0, 100.0));
    }

    #[test]
    fn test_labels_do_not_move_bounds() {
        let mut map = ZoneMap::new("labels");
        map.push_label(MapLabel {
            position: Point3::new(999.0, 999.0, 0.0),
            color: Rgb::DEFAULT_LINE,
            size: 2,
            text: "far away".to_string(),
        });
        assert!(map.bounds.is_empty());
        assert_eq!(map.item_count(), 1);
    }
}
