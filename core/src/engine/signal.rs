use super::state::Corpse;

/// State changes the engine announces after applying a line.
#[derive(Debug, Clone, PartialEq)]
pub enum GameSignal {
    PositionUpdated {
        x: f64,
        y: f64,
        z: f64,
        heading: f64,
    },
    /// The player moved to a different zone; consumers reload the map.
    /// `from` is empty before the first zone is known.
    ZoneChanged { from: String, to: String },
    PlayerDied(Corpse),
    CorpseRecovered,
}

/// Receives engine signals on the engine's task, in line order.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &GameSignal);

    fn handle_signals(&mut self, signals: &[GameSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
