use chrono::{Local, NaiveDateTime};

/// One non-empty, trimmed line read from the active log file.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub text: String,
    /// When the tailer read the line, not when the game wrote it.
    pub received_at: NaiveDateTime,
}

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            received_at: Local::now().naive_local(),
        }
    }

    /// Game time from the `[Wed Oct 15 12:00:00 2026]` prefix, if present.
    pub fn game_timestamp(&self) -> Option<NaiveDateTime> {
        let (stamp, _) = split_prefix(&self.text)?;
        NaiveDateTime::parse_from_str(stamp, "%a %b %d %H:%M:%S %Y").ok()
    }

    /// Text after the timestamp prefix, or the whole line without one.
    pub fn message(&self) -> &str {
        match split_prefix(&self.text) {
            Some((_, rest)) => rest,
            None => &self.text,
        }
    }
}

fn split_prefix(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('[')?;
    let end = inner.find(']')?;
    Some((&inner[..end], inner[end + 1..].trim_start()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_game_timestamp_and_message() {
        let line = LogLine::new("[Thu Oct 15 21:04:33 2026] You have entered The Nexus.");
        let ts = line.game_timestamp().expect("timestamp should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2026, 10, 15));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (21, 4, 33));
        assert_eq!(line.message(), "You have entered The Nexus.");
    }

    #[test]
    fn test_line_without_prefix() {
        let line = LogLine::new("You have been slain by a gnoll!");
        assert_eq!(line.game_timestamp(), None);
        assert_eq!(line.message(), "You have been slain by a gnoll!");
    }
}
