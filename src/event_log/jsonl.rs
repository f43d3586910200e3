use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use super::event::DebateEvent;
use super::{EventLogError, EventSink};

/// Writes events to `run-YYYYMMDD-HHMMSS.jsonl`, syncing after every line.
#[derive(Debug)]
pub struct JsonlEventLog {
    path: PathBuf,
    file: File,
}

impl JsonlEventLog {
    /// Creates a fresh log file inside `dir`, creating the directory if needed.
    ///
    /// Runs started within the same second get a numeric suffix.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, EventLogError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
        let mut suffix = 0u32;
        loop {
            let name = match suffix {
                0 => format!("run-{stamp}.jsonl"),
                n => format!("run-{stamp}-{n}.jsonl"),
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok(Self { path, file }),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => suffix += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Appends to an existing or new file at an explicit path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, EventLogError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for JsonlEventLog {
    fn record(&mut self, event: &DebateEvent) -> Result<(), EventLogError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.file.flush()?;
        self.file.sync_data()?;
        log::trace!("recorded {} event to {}", event.kind(), self.path.display());
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::debate::{DebateConfig, DebateState};

    #[test]
    fn writes_one_line_per_event() {
        let dir = tempdir().expect("tempdir");
        let mut log = JsonlEventLog::create(dir.path().join("runs")).expect("create");
        log.record(&DebateEvent::run_started("t", &DebateConfig::default()))
            .expect("record");
        log.record(&DebateEvent::run_stopped(1, DebateState::StoppedByStopPhrase))
            .expect("record");

        let contents = fs::read_to_string(log.path()).expect("read");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"kind\":\"run_started\""));
        assert!(lines[1].contains("\"state\":\"stopped_by_stop_phrase\""));
    }

    #[test]
    fn file_name_follows_run_timestamp_pattern() {
        let dir = tempdir().expect("tempdir");
        let log = JsonlEventLog::create(dir.path()).expect("create");
        let name = log
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name");
        assert!(name.starts_with("run-"));
        assert!(name.ends_with(".jsonl"));
        assert_eq!(log.location(), Some(log.path()));
    }

    #[test]
    fn runs_in_the_same_second_get_distinct_files() {
        let dir = tempdir().expect("tempdir");
        let first = JsonlEventLog::create(dir.path()).expect("create");
        let second = JsonlEventLog::create(dir.path()).expect("create");
        assert_ne!(first.path(), second.path());
    }
}
