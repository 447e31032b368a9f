//! File-based delivery of external navigation events.
//!
//! Other applications deliver events by dropping `*.json` files into
//! the spool directory. A filesystem watcher picks each file up,
//! publishes the parsed event on the bus, and removes the file.
//! Malformed files are logged and removed; they never become errors.

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::bus::{EventBus, NavigationEvent};

pub struct EventSpool {
    _watcher: RecommendedWatcher,
    receiver: Receiver<std::result::Result<Event, notify::Error>>,
    dir: PathBuf,
    bus: Arc<EventBus>,
}

impl EventSpool {
    /// Watch `dir` for incoming event files. The directory is created
    /// if missing; files already present are published immediately.
    pub fn new(dir: PathBuf, bus: Arc<EventBus>) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create event spool directory {}", dir.display()))?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let spool = Self {
            _watcher: watcher,
            receiver: rx,
            dir,
            bus,
        };

        // Events delivered while no instance was running are still valid.
        spool.scan();

        Ok(spool)
    }

    /// Process watcher activity accumulated since the last call.
    /// Non-blocking; called once per event-loop tick.
    pub fn poll(&self) {
        let mut touched = false;
        while let Ok(result) = self.receiver.try_recv() {
            if let Ok(event) = result {
                touched |= event
                    .paths
                    .iter()
                    .any(|p| p.extension().is_some_and(|e| e == "json"));
            }
        }
        if touched {
            self.scan();
        }
    }

    /// Publish and remove every event file currently in the spool.
    pub fn scan(&self) {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(dir = %self.dir.display(), %err, "cannot read event spool");
                return;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "json"))
            .collect();
        // Spool filenames embed a creation-ordered prefix; sort so
        // events are published in delivery order.
        files.sort();

        for path in files {
            self.ingest(&path);
        }
    }

    fn ingest(&self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<NavigationEvent>(&raw) {
                Ok(event) => {
                    let delivered = self.bus.publish(&event);
                    tracing::info!(
                        file = %path.display(),
                        route = %event.route,
                        delivered,
                        "spooled navigation event published"
                    );
                }
                Err(err) => {
                    tracing::warn!(file = %path.display(), %err, "malformed event file skipped");
                }
            },
            Err(err) => {
                tracing::warn!(file = %path.display(), %err, "unreadable event file skipped");
            }
        }

        if let Err(err) = std::fs::remove_file(path) {
            tracing::warn!(file = %path.display(), %err, "failed to remove spooled event file");
        }
    }
}

/// Write an event into a spool directory, the way an external
/// application would. Used by `covwalk emit`.
pub fn write_event(dir: &Path, event: &NavigationEvent) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create event spool directory {}", dir.display()))?;

    let millis = chrono::Utc::now().timestamp_millis();
    let filename = format!("nav-{millis}-{}.json", Uuid::new_v4());
    let path = dir.join(filename);

    // Write-then-rename so the watcher never sees a half-written file.
    let tmp = path.with_extension("tmp");
    let payload = serde_json::to_string_pretty(event).context("Failed to serialize event")?;
    std::fs::write(&tmp, payload)
        .with_context(|| format!("Failed to write event file {}", tmp.display()))?;
    std::fs::rename(&tmp, &path)
        .with_context(|| format!("Failed to finalize event file {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn event(route: &str) -> NavigationEvent {
        NavigationEvent {
            source_app_id: Some("LoanApp".to_string()),
            route: route.to_string(),
            timestamp: Some(1_700_000_000_000),
            data: None,
        }
    }

    #[test]
    fn test_startup_scan_publishes_existing_files() {
        let dir = TempDir::new().unwrap();
        write_event(dir.path(), &event("/dscr-trend")).unwrap();

        let bus = EventBus::new();
        let sub = bus.subscribe();
        let _spool = EventSpool::new(dir.path().to_path_buf(), Arc::clone(&bus)).unwrap();

        let received = sub.try_recv().expect("spooled event published");
        assert_eq!(received.route, "/dscr-trend");
    }

    #[test]
    fn test_scan_consumes_files() {
        let dir = TempDir::new().unwrap();
        let bus = EventBus::new();
        let spool = EventSpool::new(dir.path().to_path_buf(), Arc::clone(&bus)).unwrap();

        let sub = bus.subscribe();
        let path = write_event(dir.path(), &event("/welcome")).unwrap();
        spool.scan();

        assert_eq!(sub.try_recv().unwrap().route, "/welcome");
        assert!(!path.exists(), "event file should be removed after publish");
    }

    #[test]
    fn test_scan_publishes_in_delivery_order() {
        let dir = TempDir::new().unwrap();
        let bus = EventBus::new();
        let spool = EventSpool::new(dir.path().to_path_buf(), Arc::clone(&bus)).unwrap();

        let sub = bus.subscribe();
        std::fs::write(
            dir.path().join("nav-001.json"),
            serde_json::to_string(&event("/welcome")).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("nav-002.json"),
            serde_json::to_string(&event("/dscr-trend")).unwrap(),
        )
        .unwrap();
        spool.scan();

        assert_eq!(sub.try_recv().unwrap().route, "/welcome");
        assert_eq!(sub.try_recv().unwrap().route, "/dscr-trend");
    }

    #[test]
    fn test_malformed_file_is_skipped_and_removed() {
        let dir = TempDir::new().unwrap();
        let bus = EventBus::new();
        let spool = EventSpool::new(dir.path().to_path_buf(), Arc::clone(&bus)).unwrap();

        let sub = bus.subscribe();
        let bad = dir.path().join("nav-garbage.json");
        std::fs::write(&bad, "not json").unwrap();
        spool.scan();

        assert!(sub.try_recv().is_none());
        assert!(!bad.exists());
    }

    #[test]
    fn test_non_json_files_are_left_alone() {
        let dir = TempDir::new().unwrap();
        let bus = EventBus::new();
        let spool = EventSpool::new(dir.path().to_path_buf(), Arc::clone(&bus)).unwrap();

        let readme = dir.path().join("README.txt");
        std::fs::write(&readme, "spool directory").unwrap();
        spool.scan();

        assert!(readme.exists());
    }

    #[test]
    fn test_write_event_round_trips() {
        let dir = TempDir::new().unwrap();
        let original = event("/covenant-monitoring");
        let path = write_event(dir.path(), &original).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: NavigationEvent = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, original);
    }
}
