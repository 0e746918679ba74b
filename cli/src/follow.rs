use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use noxmap_core::{
    GameSignal, LogTailer, PlayerState, SignalHandler, StateEngine, TailerConfig, ZoneLookup,
    ZoneMap, load_zone_for, resolve_data_path,
};
use noxmap_types::AppConfig;
use tokio::sync::mpsc;

/// Forwards zone changes out of the engine task so maps load elsewhere.
struct ZoneChangeForwarder(mpsc::UnboundedSender<String>);

impl SignalHandler for ZoneChangeForwarder {
    fn handle_signal(&mut self, signal: &GameSignal) {
        if let GameSignal::ZoneChanged { to, .. } = signal {
            if self.0.send(to.clone()).is_err() {
                tracing::debug!("Zone change receiver dropped");
            }
        }
    }
}

pub fn load_lookup(config: &AppConfig) -> ZoneLookup {
    let path = resolve_data_path(&config.zone_lookup_path);
    match ZoneLookup::load(&path) {
        Ok(lookup) => lookup,
        Err(e) => {
            tracing::warn!(error = %e, "No zone lookup, using zone names as file codes");
            ZoneLookup::default()
        }
    }
}

fn describe(state: &PlayerState) -> String {
    let mut line = format!(
        "{} @ ({:.1}, {:.1}, {:.1}) heading {:.0}°",
        state.zone().unwrap_or("<unknown zone>"),
        state.x,
        state.y,
        state.z,
        state.heading.to_degrees()
    );
    if let Some(corpse) = &state.corpse {
        line.push_str(&format!(
            " | corpse in {} @ ({:.1}, {:.1})",
            corpse.zone, corpse.x, corpse.y
        ));
    }
    line
}

async fn load_map(map_dir: PathBuf, lookup: Arc<ZoneLookup>, zone: String) -> Option<ZoneMap> {
    let result =
        tokio::task::spawn_blocking(move || load_zone_for(&map_dir, &lookup, &zone)).await;
    match result {
        Ok(Ok(map)) => Some(map),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Keeping previous map");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Map loader task failed");
            None
        }
    }
}

/// Follow the log until Ctrl-C, loading the map for every zone entered.
pub async fn run(config: &AppConfig, status_every: Duration) -> Result<(), String> {
    if config.log_directory.is_empty() {
        return Err(
            "No EverQuest directory configured; run `noxmap set-directory --path <dir>`".into(),
        );
    }

    let map_dir = resolve_data_path(&config.map_directory);
    let lookup = Arc::new(load_lookup(config));

    let tailer = LogTailer::new(&config.log_directory, TailerConfig::from(&config.tailer));
    let handle = tailer.start().await;

    let (zone_tx, mut zone_rx) = mpsc::unbounded_channel();
    if let Some(zone) = &handle.initial_zone {
        zone_tx.send(zone.clone()).ok();
    }

    let mut engine = StateEngine::new();
    engine.seed_zone(handle.initial_zone.as_deref());
    engine.add_signal_handler(Box::new(ZoneChangeForwarder(zone_tx)));
    let state = engine.state_handle();
    let engine_task = engine.spawn(handle.lines);

    println!("Watching {} (Ctrl-C to stop)", config.log_directory);

    let mut current_map: Option<ZoneMap> = None;
    let mut status = tokio::time::interval(status_every);
    let mut last_status = String::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(zone) = zone_rx.recv() => {
                if let Some(map) = load_map(map_dir.clone(), Arc::clone(&lookup), zone).await {
                    println!(
                        "Map: {} ({} lines, {} labels)",
                        map.name,
                        map.lines.len(),
                        map.labels.len()
                    );
                    current_map = Some(map);
                }
            }
            _ = status.tick() => {
                let line = describe(&state.snapshot().await);
                if line != last_status {
                    println!("{}", line);
                    last_status = line;
                }
            }
            _ = &mut shutdown => {
                println!("quitting...");
                break;
            }
        }
    }

    engine_task.abort();
    if let Some(map) = current_map {
        tracing::debug!(zone = %map.name, "Discarding map on exit");
    }
    Ok(())
}
