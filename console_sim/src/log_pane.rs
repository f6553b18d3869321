use std::collections::VecDeque;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Logger which keeps the last few records for the TUI instead of writing to stdout,
/// which is owned by the terminal backend.
pub struct LogPane {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogPane {
    /// Keeps at least one line
    fn new(capacity: usize) -> LogPane {
        let capacity = capacity.max(1);
        LogPane {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn install(capacity: usize, level: LevelFilter) -> Result<&'static LogPane, SetLoggerError> {
        let pane: &'static LogPane = Box::leak(Box::new(LogPane::new(capacity)));
        log::set_logger(pane)?;
        log::set_max_level(level);
        Ok(pane)
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            while lines.len() >= self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Oldest first
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Log for LogPane {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.push(format!("{:<5} {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod test {
    use crate::log_pane::LogPane;

    #[test]
    fn keeps_the_latest_lines() {
        let pane = LogPane::new(2);
        for line in &["one", "two", "three"] {
            pane.push(line.to_string());
        }
        assert_eq!(pane.lines(), vec!["two", "three"]);
    }

    #[test]
    fn zero_capacity_keeps_one_line() {
        let pane = LogPane::new(0);
        for line in &["one", "two", "three"] {
            pane.push(line.to_string());
        }
        assert_eq!(pane.lines(), vec!["three"]);
    }
}
