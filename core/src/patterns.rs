//! Recognizers for the EverQuest log lines the engine cares about.
//!
//! All matching is plain substring scanning; the log format is fixed text
//! so there is no need for a regex engine.

use memchr::memmem;

const LOCATION_PREFIX: &str = "Your Location is ";
const ZONE_PREFIX: &str = "You have entered ";
const SLAIN_MARKER: &str = "You have been slain";

const RECOVERY_MARKERS: &[&str] = &[
    "You receive a resurrection",
    "You have been resurrected",
    "corpse decays",
    "You summon your corpse",
];

fn find(haystack: &str, needle: &str) -> Option<usize> {
    memmem::find(haystack.as_bytes(), needle.as_bytes())
}

/// `Your Location is <a>, <b>, <c>` as the three raw log values, in log
/// order. Coordinate conversion is the caller's job.
///
/// A numeric token is a run of digits, `.` and `-`; a token that does not
/// form a valid number reads as zero.
pub fn location(line: &str) -> Option<(f64, f64, f64)> {
    let start = find(line, LOCATION_PREFIX)? + LOCATION_PREFIX.len();
    let rest = &line[start..];

    let (first, rest) = numeric_token(rest)?;
    let rest = rest.strip_prefix(", ")?;
    let (second, rest) = numeric_token(rest)?;
    let rest = rest.strip_prefix(", ")?;
    let (third, _) = numeric_token(rest)?;

    Some((parse_lenient(first), parse_lenient(second), parse_lenient(third)))
}

fn numeric_token(input: &str) -> Option<(&str, &str)> {
    let end = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some(input.split_at(end))
}

fn parse_lenient(token: &str) -> f64 {
    token.parse().unwrap_or_default()
}

/// Zone name from `You have entered <name>.`, taken up to the last period.
/// Status annotations are returned too; see [`is_zone_annotation`].
pub fn zone_entered(line: &str) -> Option<&str> {
    let start = find(line, ZONE_PREFIX)? + ZONE_PREFIX.len();
    let rest = &line[start..];
    let end = rest.rfind('.')?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}

/// `entered` messages that report an area status (PvP, arenas) rather than
/// a zone transition.
pub fn is_zone_annotation(name: &str) -> bool {
    name.contains("(PvP)") || name.ends_with(" area")
}

/// Like [`zone_entered`] but drops status annotations.
pub fn real_zone_entered(line: &str) -> Option<&str> {
    zone_entered(line).filter(|name| !is_zone_annotation(name))
}

pub fn is_death(line: &str) -> bool {
    find(line, SLAIN_MARKER).is_some()
}

pub fn is_corpse_recovery(line: &str) -> bool {
    if find(line, "Summoning").is_some() && find(line, "corpse").is_some() {
        return true;
    }
    RECOVERY_MARKERS.iter().any(|m| find(line, m).is_some())
}
