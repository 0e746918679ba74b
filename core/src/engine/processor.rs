use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::classify::{LogEvent, classify};
use super::signal::{GameSignal, SignalHandler};
use super::state::{Corpse, PlayerState, PlayerStateHandle};
use crate::tailer::LogLine;

/// Movement below this on both axes leaves the heading alone.
const HEADING_NOISE: f64 = 0.1;

/// Single consumer of the tailer's lines and sole writer of [`PlayerState`].
pub struct StateEngine {
    state: PlayerState,
    /// Previous converted (x, y); `None` until the first `/loc`.
    last_position: Option<(f64, f64)>,
    shared: PlayerStateHandle,
    signal_handlers: Vec<Box<dyn SignalHandler + Send + Sync>>,
}

impl Default for StateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateEngine {
    pub fn new() -> Self {
        Self {
            state: PlayerState::default(),
            last_position: None,
            shared: PlayerStateHandle::new(),
            signal_handlers: Vec::new(),
        }
    }

    /// Handle for readers; clone it freely before calling [`Self::run`].
    pub fn state_handle(&self) -> PlayerStateHandle {
        self.shared.clone()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Register a signal handler to receive state changes
    pub fn add_signal_handler(&mut self, handler: Box<dyn SignalHandler + Send + Sync>) {
        self.signal_handlers.push(handler);
    }

    /// Start from the zone the tailer found in log history, so the map can
    /// load before the next `You have entered` line.
    pub fn seed_zone(&mut self, zone: Option<&str>) {
        if let Some(zone) = zone.filter(|z| !z.is_empty()) {
            tracing::info!(zone = %zone, "Starting with zone");
            self.state.zone = zone.to_string();
        }
    }

    /// Apply one line to the working state. Returns the resulting signal, or
    /// `None` if the line changed nothing.
    pub fn process_line(&mut self, line: &str) -> Option<GameSignal> {
        match classify(line)? {
            LogEvent::Location { first, second, z } => Some(self.apply_location(first, second, z)),
            LogEvent::ZoneEntered(name) => self.apply_zone(name),
            LogEvent::ZoneAnnotation => None,
            LogEvent::Slain => Some(self.apply_death()),
            LogEvent::CorpseRecovered => self.apply_recovery(),
        }
    }

    /// `/loc` prints the two horizontal axes swapped and negated relative
    /// to map files.
    fn apply_location(&mut self, first: f64, second: f64, z: f64) -> GameSignal {
        let x = -second;
        let y = -first;

        match self.last_position {
            None => {
                tracing::debug!(log_x = first, log_y = second, x, y, "First position");
            }
            Some((last_x, last_y)) => {
                let dx = x - last_x;
                let dy = y - last_y;
                if dx.abs() > HEADING_NOISE || dy.abs() > HEADING_NOISE {
                    self.state.heading = dy.atan2(dx);
                }
            }
        }

        self.state.x = x;
        self.state.y = y;
        self.state.z = z;
        self.last_position = Some((x, y));

        GameSignal::PositionUpdated {
            x,
            y,
            z,
            heading: self.state.heading,
        }
    }

    fn apply_zone(&mut self, name: String) -> Option<GameSignal> {
        if name == self.state.zone {
            return None;
        }
        tracing::info!(from = %self.state.zone, to = %name, "Zone changed");
        let from = std::mem::replace(&mut self.state.zone, name.clone());
        Some(GameSignal::ZoneChanged { from, to: name })
    }

    fn apply_death(&mut self) -> GameSignal {
        let corpse = Corpse {
            x: self.state.x,
            y: self.state.y,
            z: self.state.z,
            zone: self.state.zone.clone(),
        };
        tracing::info!(x = corpse.x, y = corpse.y, zone = %corpse.zone, "Player died");
        self.state.corpse = Some(corpse.clone());
        GameSignal::PlayerDied(corpse)
    }

    fn apply_recovery(&mut self) -> Option<GameSignal> {
        self.state.corpse.take()?;
        tracing::info!("Corpse recovered");
        Some(GameSignal::CorpseRecovered)
    }

    fn dispatch_signal(&mut self, signal: &GameSignal) {
        for handler in &mut self.signal_handlers {
            handler.handle_signal(signal);
        }
    }

    /// Consume lines until the tailer goes away, one at a time in arrival
    /// order.
    pub async fn run(mut self, mut lines: mpsc::Receiver<LogLine>) {
        self.shared.publish(&self.state).await;

        while let Some(line) = lines.recv().await {
            let Some(signal) = self.process_line(&line.text) else {
                continue;
            };
            self.shared.publish(&self.state).await;
            self.dispatch_signal(&signal);
        }

        tracing::debug!("Line stream closed, state engine stopping");
    }

    pub fn spawn(self, lines: mpsc::Receiver<LogLine>) -> JoinHandle<()> {
        tokio::spawn(self.run(lines))
    }
}
