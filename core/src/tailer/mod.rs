//! Log tailer
//!
//! Follows whichever `eqlog_*.txt` is newest, switching files when another
//! character logs in, and pushes each new line onto a bounded queue.
//!
//! ```text
//!   discovery (every poll interval)
//!        │  newer file?  ──► reopen, seek to len - switch_seek_back
//!        ▼
//!   read_until('\n')  ──► LogLine ──► mpsc (bounded, FIFO) ──► StateEngine
//!        │ EOF
//!        └─► sleep idle, retry
//! ```

mod discovery;
mod follow;
mod line;


pub use discovery::{LogFileInfo, find_latest_log, is_log_file_name, list_logs, parse_log_filename};
pub use follow::{detect_initial_zone, last_zone_in_file};
pub use line::LogLine;

use std::path::PathBuf;
use std::time::Duration;

use noxmap_types::TailerSettings;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct TailerConfig {
    pub poll_interval: Duration,
    pub idle_sleep: Duration,
    pub no_file_sleep: Duration,
    pub switch_seek_back: u64,
    pub initial_scan_bytes: u64,
    pub queue_capacity: usize,
}

impl Default for TailerConfig {
    fn default() -> Self {
        Self::from(&TailerSettings::default())
    }
}

impl From<&TailerSettings> for TailerConfig {
    fn from(s: &TailerSettings) -> Self {
        Self {
            poll_interval: Duration::from_millis(s.poll_interval_ms),
            idle_sleep: Duration::from_millis(s.idle_sleep_ms),
            no_file_sleep: Duration::from_millis(s.no_file_sleep_ms),
            switch_seek_back: s.switch_seek_back_bytes,
            initial_scan_bytes: s.initial_scan_bytes,
            queue_capacity: s.queue_capacity.max(1),
        }
    }
}

pub struct LogTailer {
    root: PathBuf,
    config: TailerConfig,
}

impl LogTailer {
    /// `root` is the EverQuest install directory.
    pub fn new(root: impl Into<PathBuf>, config: TailerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Scan the newest log for the last zone entered, then start following
    /// in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(self) -> TailerHandle {
        let root = self.root.clone();
        let scan_bytes = self.config.initial_scan_bytes;
        let initial_zone = tokio::task::spawn_blocking(move || detect_initial_zone(&root, scan_bytes))
            .await
            .ok()
            .flatten();

        if let Some(zone) = &initial_zone {
            tracing::info!(zone = %zone, "Detected initial zone from log history");
        }

        let (tx, rx) = mpsc::channel(self.config.queue_capacity);
        let task = tokio::spawn(follow::follow_logs(self.root, self.config, tx));

        TailerHandle {
            lines: rx,
            initial_zone,
            task,
        }
    }
}

/// Output side of a running tailer.
pub struct TailerHandle {
    /// Lines in file order. Only one consumer may read it.
    pub lines: mpsc::Receiver<LogLine>,
    /// Last zone entered according to the log history at startup.
    pub initial_zone: Option<String>,
    task: JoinHandle<()>,
}

impl TailerHandle {
    /// Stop the background task. Lines already queued stay readable.
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
