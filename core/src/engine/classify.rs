use crate::patterns;

/// What a single log line means to the player state.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    /// Raw `/loc` values in log order; not yet converted to map space.
    Location { first: f64, second: f64, z: f64 },
    ZoneEntered(String),
    /// `You have entered ...` reporting an area status, not a zone change.
    ZoneAnnotation,
    Slain,
    CorpseRecovered,
}

type Classifier = fn(&str) -> Option<LogEvent>;

/// Evaluated in order; the first match wins.
const CLASSIFIERS: &[Classifier] = &[location, zone, death, recovery];

pub fn classify(line: &str) -> Option<LogEvent> {
    CLASSIFIERS.iter().find_map(|classifier| classifier(line))
}

fn location(line: &str) -> Option<LogEvent> {
    let (first, second, z) = patterns::location(line)?;
    Some(LogEvent::Location { first, second, z })
}

fn zone(line: &str) -> Option<LogEvent> {
    let name = patterns::zone_entered(line)?;
    if patterns::is_zone_annotation(name) {
        Some(LogEvent::ZoneAnnotation)
    } else {
        Some(LogEvent::ZoneEntered(name.to_string()))
    }
}

fn death(line: &str) -> Option<LogEvent> {
    patterns::is_death(line).then_some(LogEvent::Slain)
}

fn recovery(line: &str) -> Option<LogEvent> {
    patterns::is_corpse_recovery(line).then_some(LogEvent::CorpseRecovered)
}
