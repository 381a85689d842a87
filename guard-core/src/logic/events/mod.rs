//! Event Journal
//!
//! - `event` - event types
//! - `recorder` - append-only JSONL files
//!
//! `EventLog` keeps a bounded in-memory history and forwards every event to
//! the recorder when one is attached. Recorder failures are logged and
//! counted; they never undo a committed mutation.

pub mod event;
pub mod recorder;

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

pub use event::{EventKind, GuardEvent};
pub use recorder::{list_journal_files, read_events, JournalRecorder};

#[derive(Debug)]
pub struct EventLog {
    recent: VecDeque<GuardEvent>,
    limit: usize,
    next_sequence: u64,
    recorder: Option<JournalRecorder>,
    write_failures: u64,
}

impl EventLog {
    pub fn new(limit: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(limit.min(1024)),
            limit,
            next_sequence: 1,
            recorder: None,
            write_failures: 0,
        }
    }

    pub fn with_recorder(mut self, recorder: JournalRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn emit(&mut self, kind: EventKind, at: DateTime<Utc>) -> GuardEvent {
        let event = GuardEvent::new(self.next_sequence, at, kind);
        self.next_sequence += 1;

        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.record(&event) {
                self.write_failures += 1;
                log::error!("Failed to journal event {}: {}", event.sequence, e);
            }
        }

        log::debug!("Event #{} {}", event.sequence, event.kind.as_str());
        if self.limit > 0 {
            if self.recent.len() == self.limit {
                self.recent.pop_front();
            }
            self.recent.push_back(event.clone());
        }
        event
    }

    /// Newest first
    pub fn recent(&self, limit: usize) -> Vec<GuardEvent> {
        self.recent.iter().rev().take(limit).cloned().collect()
    }

    /// Sequence number of the last emitted event, 0 if none
    pub fn last_sequence(&self) -> u64 {
        self.next_sequence - 1
    }

    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }

    pub fn is_journaled(&self) -> bool {
        self.recorder.is_some()
    }
}
