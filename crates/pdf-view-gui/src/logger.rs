use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Keeps the most recent log records in memory for the log panel
#[derive(Clone)]
pub struct AppLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    max_entries: usize,
    level: LevelFilter,
}

impl AppLogger {
    pub fn new(max_entries: usize) -> Self {
        let level = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            max_entries,
            level,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Latest message at info level or above, for the status bar
    pub fn latest_message(&self) -> Option<String> {
        self.lock()
            .iter()
            .rev()
            .find(|entry| entry.level <= Level::Info)
            .map(|entry| entry.message.clone())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl log::Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (metadata.target().starts_with("pdf_view") || metadata.level() <= Level::Warn)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = LogEntry {
                timestamp: Local::now(),
                level: record.level(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            };

            let mut entries = self.lock();
            entries.push(entry);

            // Keep only the most recent entries
            if entries.len() > self.max_entries {
                let excess = entries.len() - self.max_entries;
                entries.drain(0..excess);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn record(logger: &AppLogger, level: Level, target: &str, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target(target)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_keeps_most_recent_entries() {
        let logger = AppLogger::new(2);
        record(&logger, Level::Info, "pdf_view", "one");
        record(&logger, Level::Info, "pdf_view", "two");
        record(&logger, Level::Info, "pdf_view", "three");

        let messages: Vec<String> = logger.get_entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_latest_message_skips_debug() {
        let logger = AppLogger::new(10);
        record(&logger, Level::Info, "pdf_view::controller", "Opened book.pdf");
        record(&logger, Level::Debug, "pdf_view::animation", "Flip tick");
        assert_eq!(logger.latest_message().as_deref(), Some("Opened book.pdf"));

        logger.clear();
        assert_eq!(logger.latest_message(), None);
    }

    #[test]
    fn test_foreign_targets_only_above_warn() {
        let logger = AppLogger::new(10);
        record(&logger, Level::Info, "wgpu_core", "adapter chosen");
        record(&logger, Level::Warn, "eframe", "vsync unsupported");
        let entries = logger.get_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "eframe");
    }
}
