//! Component-tagged request log.
//!
//! Every entry is appended to a JSONL file and mirrored to `tracing` so it
//! also shows up on the console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            component: component.into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, ctx: serde_json::Value) -> Self {
        self.context = Some(ctx);
        self
    }

    fn trace(&self) {
        let context = self.context.as_ref().map(ToString::to_string).unwrap_or_default();
        match self.level {
            LogLevel::Debug => tracing::debug!(component = %self.component, %context, "{}", self.message),
            LogLevel::Info => tracing::info!(component = %self.component, %context, "{}", self.message),
            LogLevel::Warn => tracing::warn!(component = %self.component, %context, "{}", self.message),
            LogLevel::Error => tracing::error!(component = %self.component, %context, "{}", self.message),
        }
    }
}

pub struct Logger {
    writer: BufWriter<File>,
}

impl Logger {
    pub fn new(file_path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file_path = file_path.as_ref();

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn log(&mut self, entry: &LogEntry) {
        if let Ok(json) = serde_json::to_string(entry) {
            let _ = writeln!(self.writer, "{}", json);
            let _ = self.writer.flush();
        }
    }
}

#[derive(Clone)]
pub struct SharedLogger(Arc<Mutex<Logger>>);

impl SharedLogger {
    pub fn new(file_path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self(Arc::new(Mutex::new(Logger::new(file_path)?))))
    }

    pub fn log(&self, entry: LogEntry) {
        entry.trace();
        if let Ok(mut logger) = self.0.lock() {
            logger.log(&entry);
        }
    }

    pub fn info(&self, component: impl Into<String>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    pub fn warn(&self, component: impl Into<String>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    pub fn error(&self, component: impl Into<String>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }

    pub fn debug(&self, component: impl Into<String>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    pub fn log_with_context(
        &self,
        level: LogLevel,
        component: impl Into<String>,
        message: impl Into<String>,
        context: serde_json::Value,
    ) {
        self.log(LogEntry::new(level, component, message).with_context(context));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_entries_written_as_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("proxy.log");
        let logger = SharedLogger::new(&path).unwrap();

        logger.info("server", "first");
        logger.log_with_context(
            LogLevel::Warn,
            "proxy",
            "second",
            serde_json::json!({"status": 502}),
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<LogEntry> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].message, "first");
        assert_eq!(lines[0].level, LogLevel::Info);
        assert!(lines[0].context.is_none());
        assert_eq!(lines[1].component, "proxy");
        assert_eq!(lines[1].context.as_ref().unwrap()["status"], 502);
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("proxy.log");

        SharedLogger::new(&path).unwrap().info("startup", "first run");
        SharedLogger::new(&path).unwrap().error("proxy", "second run");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first run"));
        assert!(lines[1].contains("\"level\":\"error\""));
    }
}
