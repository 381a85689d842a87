//! Journal Recorder
//!
//! Append-only JSONL writer for guard events, one file per rotation.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::event::GuardEvent;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Maximum file size before rotation (50 MB)
const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Journal file extension
const JOURNAL_EXT: &str = "jsonl";

// ============================================================================
// RECORDER
// ============================================================================

pub struct JournalRecorder {
    writer: BufWriter<File>,
    current_file: PathBuf,
    current_size: u64,
    max_file_size: u64,
    base_dir: PathBuf,
}

impl JournalRecorder {
    /// Create a recorder writing into `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        Self::with_max_file_size(base_dir, MAX_FILE_SIZE)
    }

    pub fn with_max_file_size(base_dir: impl Into<PathBuf>, max_file_size: u64) -> std::io::Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        let (file_path, file) = Self::open_new_file(&base_dir)?;

        Ok(Self {
            writer: BufWriter::new(file),
            current_file: file_path,
            current_size: 0,
            max_file_size,
            base_dir,
        })
    }

    fn open_new_file(base_dir: &Path) -> std::io::Result<(PathBuf, File)> {
        let now = Utc::now();
        let mut file_path = base_dir.join(format!(
            "guard_{}.{}",
            now.format("%Y%m%d_%H%M%S_%6f"),
            JOURNAL_EXT
        ));
        // Two rotations within the same microsecond
        let mut suffix = 1;
        while file_path.exists() {
            file_path = base_dir.join(format!(
                "guard_{}_{}.{}",
                now.format("%Y%m%d_%H%M%S_%6f"),
                suffix,
                JOURNAL_EXT
            ));
            suffix += 1;
        }

        let file = OpenOptions::new().create(true).append(true).open(&file_path)?;

        log::info!("Opened guard journal: {:?}", file_path);
        Ok((file_path, file))
    }

    /// Append one event, flushed before returning.
    ///
    /// Blocking I/O. The guard calls this while holding its write lock, so a
    /// slow disk stalls every writer and reader of the shared guard.
    pub fn record(&mut self, event: &GuardEvent) -> std::io::Result<()> {
        let line = event.to_jsonl();
        let bytes = line.as_bytes();

        if self.current_size > 0 && self.current_size + bytes.len() as u64 + 1 > self.max_file_size {
            self.rotate()?;
        }

        self.writer.write_all(bytes)?;
        self.writer.write_all(b"\n")?;
        self.current_size += bytes.len() as u64 + 1;
        self.writer.flush()?;
        Ok(())
    }

    fn rotate(&mut self) -> std::io::Result<()> {
        self.writer.flush()?;

        let (new_path, new_file) = Self::open_new_file(&self.base_dir)?;
        self.writer = BufWriter::new(new_file);

        log::info!("Rotated journal from {:?} to {:?}", self.current_file, new_path);
        self.current_file = new_path;
        self.current_size = 0;
        Ok(())
    }

    pub fn current_file(&self) -> &Path {
        &self.current_file
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl std::fmt::Debug for JournalRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JournalRecorder")
            .field("current_file", &self.current_file)
            .field("current_size", &self.current_size)
            .finish()
    }
}

// ============================================================================
// READING
// ============================================================================

/// Read every event from one journal file. Malformed lines are skipped.
pub fn read_events(path: &Path) -> std::io::Result<Vec<GuardEvent>> {
    let reader = BufReader::new(File::open(path)?);
    let mut events = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<GuardEvent>(&line) {
            Ok(event) => events.push(event),
            Err(e) => log::warn!("Skipping malformed journal line in {:?}: {}", path, e),
        }
    }
    Ok(events)
}

/// Journal files in a directory, oldest first
pub fn list_journal_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == JOURNAL_EXT))
        .collect();
    files.sort();
    Ok(files)
}

// ============================================================================
// TESTS
// ============================================================================
