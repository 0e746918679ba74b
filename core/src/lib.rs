pub mod config;
pub mod engine;
pub mod error;
pub mod maps;
pub mod patterns;
pub mod tailer;

// Re-exports for convenience
pub use config::{AppConfigExt, resolve_data_path};
pub use engine::{GameSignal, PlayerState, PlayerStateHandle, SignalHandler, StateEngine};
pub use error::{ConfigError, LookupError, MapError};
pub use maps::{ZoneLookup, ZoneMap, load_zone, load_zone_for};
pub use tailer::{LogLine, LogTailer, TailerConfig, TailerHandle};
