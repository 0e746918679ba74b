use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader as AsyncBufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

use super::discovery::{LogFileInfo, find_latest_log};
use super::{LogLine, TailerConfig};
use crate::patterns;

/// Last zone entered in the final `scan_bytes` of the newest log under
/// `root`. Any failure reads as "unknown".
pub fn detect_initial_zone(root: &Path, scan_bytes: u64) -> Option<String> {
    let path = find_latest_log(root)?;
    match last_zone_in_file(&path, scan_bytes) {
        Ok(zone) => zone,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Initial zone scan failed");
            None
        }
    }
}

pub fn last_zone_in_file(path: &Path, scan_bytes: u64) -> io::Result<Option<String>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    file.seek(SeekFrom::Start(len.saturating_sub(scan_bytes)))?;

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut last = None;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let (line, _, _) = WINDOWS_1252.decode(&buf);
        if let Some(zone) = patterns::real_zone_entered(line.trim()) {
            last = Some(zone.to_string());
        }
    }
    Ok(last)
}

/// Decode a raw line, trimming whitespace. Blank lines yield `None`.
pub(super) fn decode_line(raw: &[u8]) -> Option<String> {
    let (text, _, _) = WINDOWS_1252.decode(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

struct OpenLog {
    path: PathBuf,
    reader: AsyncBufReader<tokio::fs::File>,
}

impl OpenLog {
    async fn open(path: PathBuf, seek_back: u64) -> io::Result<Self> {
        let mut file = tokio::fs::File::open(&path).await?;
        let len = file.metadata().await?.len();
        // Re-read a little history so a zone line written during login is
        // not skipped.
        file.seek(SeekFrom::Start(len.saturating_sub(seek_back)))
            .await?;
        Ok(Self {
            path,
            reader: AsyncBufReader::new(file),
        })
    }
}

async fn discover(root: &Path) -> Option<PathBuf> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || find_latest_log(&root))
        .await
        .ok()
        .flatten()
}

/// Background loop: poll for the newest log, read appended lines, and push
/// them onto `tx`. Runs until the receiver is dropped.
pub(super) async fn follow_logs(root: PathBuf, config: TailerConfig, tx: mpsc::Sender<LogLine>) {
    let mut current: Option<OpenLog> = None;
    let mut last_check: Option<Instant> = None;
    // Bytes of a line whose newline has not been written yet.
    let mut pending: Vec<u8> = Vec::new();

    loop {
        if tx.is_closed() {
            tracing::debug!("Line receiver dropped, tailer stopping");
            return;
        }
        let due =
            current.is_none() || last_check.is_none_or(|t| t.elapsed() >= config.poll_interval);
        if due {
            if let Some(latest) = discover(&root).await {
                let switched = current.as_ref().is_none_or(|log| log.path != latest);
                if switched {
                    match OpenLog::open(latest.clone(), config.switch_seek_back).await {
                        Ok(log) => {
                            let who = LogFileInfo::from_path(&latest)
                                .map(|info| info.display_name())
                                .unwrap_or_default();
                            tracing::info!(
                                path = %latest.display(),
                                character = %who,
                                "Following log"
                            );
                            current = Some(log);
                            pending.clear();
                        }
                        Err(e) => {
                            tracing::warn!(path = %latest.display(), error = %e, "Failed to open log");
                        }
                    }
                }
            }
            last_check = Some(Instant::now());
        }

        let Some(log) = current.as_mut() else {
            sleep(config.no_file_sleep).await;
            continue;
        };

        match log.reader.read_until(b'\n', &mut pending).await {
            Ok(0) => sleep(config.idle_sleep).await,
            Ok(_) if pending.last() != Some(&b'\n') => {
                // Writer is mid-line; keep the fragment and wait for the rest.
                sleep(config.idle_sleep).await;
            }
            Ok(_) => {
                let line = decode_line(&pending);
                pending.clear();
                if let Some(text) = line {
                    if tx.send(LogLine::new(text)).await.is_err() {
                        tracing::debug!("Line receiver dropped, tailer stopping");
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %log.path.display(), error = %e, "Error reading log line");
                sleep(config.idle_sleep).await;
            }
        }
    }
}
