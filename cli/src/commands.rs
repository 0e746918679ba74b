use std::path::Path;

use chrono::{DateTime, Local};
use noxmap_core::config::config_path;
use noxmap_core::maps::prune::{remove_files, stale_map_files};
use noxmap_core::tailer::list_logs;
use noxmap_core::{AppConfigExt, load_zone_for, resolve_data_path};
use noxmap_types::AppConfig;

use crate::follow::load_lookup;

pub fn show_settings(config: &AppConfig) -> Result<(), String> {
    if let Some(path) = config_path() {
        println!("Config file: {}", path.display());
    }
    println!("Log directory: {}", display_or_unset(&config.log_directory));
    println!(
        "Map directory: {}",
        resolve_data_path(&config.map_directory).display()
    );
    println!(
        "Zone lookup: {}",
        resolve_data_path(&config.zone_lookup_path).display()
    );
    let t = &config.tailer;
    println!(
        "Tailer: poll {}ms, idle {}ms, queue {}",
        t.poll_interval_ms, t.idle_sleep_ms, t.queue_capacity
    );
    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "<not set>" } else { value }
}

pub fn set_directory(path: &str, config: &mut AppConfig) -> Result<(), String> {
    if !Path::new(path).is_dir() {
        return Err(format!("{} is not a directory", path));
    }
    config.log_directory = path.to_string();
    config.save().map_err(|e| e.to_string())?;
    println!("Log directory set to {}", path);
    Ok(())
}

pub fn list_files(config: &AppConfig) -> Result<(), String> {
    if config.log_directory.is_empty() {
        return Err("No EverQuest directory configured".into());
    }
    let logs = list_logs(Path::new(&config.log_directory));
    if logs.is_empty() {
        println!("No eqlog files found in {}", config.log_directory);
        return Ok(());
    }
    for log in logs {
        let modified: DateTime<Local> = log.modified.into();
        println!(
            "{}  {}  {}",
            modified.format("%Y-%m-%d %H:%M"),
            log.display_name(),
            log.path.display()
        );
    }
    Ok(())
}

pub fn load_zone(name: &str, config: &AppConfig) -> Result<(), String> {
    let map_dir = resolve_data_path(&config.map_directory);
    let lookup = load_lookup(config);
    let map = load_zone_for(&map_dir, &lookup, name).map_err(|e| e.to_string())?;

    println!("{}", map.name);
    println!("  lines:  {}", map.lines.len());
    println!("  labels: {}", map.labels.len());
    let b = map.bounds;
    if !b.is_empty() {
        println!(
            "  bounds: x {:.1}..{:.1}, y {:.1}..{:.1} ({:.0} x {:.0})",
            b.min_x,
            b.max_x,
            b.min_y,
            b.max_y,
            b.width(),
            b.height()
        );
    }
    Ok(())
}

pub fn prune_maps(delete: bool, config: &AppConfig) -> Result<(), String> {
    let map_dir = resolve_data_path(&config.map_directory);
    let lookup = load_lookup(config);
    if lookup.is_empty() {
        return Err("Zone lookup is empty; refusing to treat every map as stale".into());
    }
    let stale = stale_map_files(&map_dir, &lookup).map_err(|e| e.to_string())?;
    if stale.is_empty() {
        println!("No stale map files in {}", map_dir.display());
        return Ok(());
    }

    for path in &stale {
        println!("{}", path.display());
    }
    if delete {
        let removed = remove_files(&stale);
        println!("Deleted {} of {} files", removed, stale.len());
    } else {
        println!("{} stale files (run with --delete to remove)", stale.len());
    }
    Ok(())
}
