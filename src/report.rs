//! User-facing progress messages.
//!
//! The orchestrator and validator never print directly; they go through a
//! [`Reporter`] so tests can capture what a run would have said.

use std::cell::RefCell;

pub trait Reporter {
    /// Progress or informational message
    fn info(&self, message: &str);

    /// Non-fatal problem the user should know about
    fn warn(&self, message: &str);
}

/// Writes messages to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

/// Message level captured by [`RecordingReporter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: RefCell<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.by_level(Level::Warn)
    }

    pub fn infos(&self) -> Vec<String> {
        self.by_level(Level::Info)
    }

    fn by_level(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push((Level::Info, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push((Level::Warn, message.to_string()));
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
}
