use std::fs;
use std::io;
use std::path::Path;

use noxmap_types::{MapLabel, MapLine, Point3, Rgb};

use super::ZoneMap;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse one map file into `map`, returning how many items it added.
pub fn parse_map_file(path: &Path, map: &mut ZoneMap) -> io::Result<usize> {
    let bytes = fs::read(path)?;
    Ok(parse_map_text(&String::from_utf8_lossy(&bytes), map))
}

/// Parse map file contents into `map`, returning how many items it added.
///
/// Entry format (fields after the command letter, comma separated):
/// - `L x1, y1, z1, x2, y2, z2[, r, g, b]`
/// - `P x, y, z, r, g, b, size[, text...]`
///
/// Lines without a command letter or with too few fields are skipped.
/// Numeric fields that fail to parse read as zero.
pub fn parse_map_text(text: &str, map: &mut ZoneMap) -> usize {
    let mut count = 0;

    for raw in text.lines() {
        let line = raw.replace(BYTE_ORDER_MARK, "");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((command, fields)) = split_command(line) else {
            continue;
        };

        match command {
            Command::Line => {
                if let Some(segment) = parse_segment(&fields) {
                    map.push_line(segment);
                    count += 1;
                }
            }
            Command::Point => {
                if let Some(label) = parse_label(&fields) {
                    map.push_label(label);
                    count += 1;
                }
            }
        }
    }

    count
}

enum Command {
    Line,
    Point,
}

/// Find the first `L`/`P` (any case) and split what follows into fields.
fn split_command(line: &str) -> Option<(Command, Vec<&str>)> {
    let (idx, command) = line.char_indices().find_map(|(i, c)| match c {
        'L' | 'l' => Some((i, Command::Line)),
        'P' | 'p' => Some((i, Command::Point)),
        _ => None,
    })?;

    let content = line[idx + 1..].trim_start_matches([' ', ',']);
    Some((command, content.split(',').collect()))
}

fn parse_segment(fields: &[&str]) -> Option<MapLine> {
    if fields.len() < 6 {
        return None;
    }
    let color = if fields.len() >= 9 {
        parse_color(fields[6], fields[7], fields[8])
    } else {
        Rgb::DEFAULT_LINE
    };

    Some(MapLine {
        start: parse_point(&fields[0..3]),
        end: parse_point(&fields[3..6]),
        color,
    })
}

fn parse_label(fields: &[&str]) -> Option<MapLabel> {
    if fields.len() < 7 {
        return None;
    }
    let text = if fields.len() > 7 {
        fields[7..].join(",").trim().replace('_', " ")
    } else {
        String::new()
    };

    Some(MapLabel {
        position: parse_point(&fields[0..3]),
        color: parse_color(fields[3], fields[4], fields[5]),
        size: parse_int(fields[6]),
        text,
    })
}

/// Map files store the two horizontal axes in the order the map is drawn,
/// so no swapping happens here.
fn parse_point(fields: &[&str]) -> Point3 {
    Point3::new(
        parse_float(fields[0]),
        parse_float(fields[1]),
        parse_float(fields[2]),
    )
}

fn parse_float(s: &str) -> f64 {
    s.trim().parse().unwrap_or_default()
}

fn parse_int(s: &str) -> i32 {
    s.trim().parse().unwrap_or_default()
}

fn parse_channel(s: &str) -> u8 {
    parse_int(s).clamp(0, 255) as u8
}

fn parse_color(r: &str, g: &str, b: &str) -> Rgb {
    let color = Rgb::new(parse_channel(r), parse_channel(g), parse_channel(b));
    if color.is_black() {
        Rgb::ZEROED_FALLBACK
    } else {
        color
    }
}
