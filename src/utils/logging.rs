use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::config::Config;

/// Transcript logging driven by `/log` and `--log`.
///
/// The log mirrors what the user sees: prompt lines prefixed with the
/// display name, reply lines as-is, with blank-line spacing between
/// entries. Pausing keeps the file path so logging can resume.
pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Self {
        let is_active = log_file.is_some();
        LoggingState {
            file_path: log_file,
            is_active,
        }
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        // Test if we can create/write to the file
        self.test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;

        Ok(format!("Logging enabled to: {path}"))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                self.is_active = !self.is_active;
                if self.is_active {
                    Ok(format!("Logging resumed to: {path}"))
                } else {
                    Ok(format!("Logging paused (file: {path})"))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active || self.file_path.is_none() {
            return Ok(());
        }

        self.write_to_log(content)
    }

    fn write_to_log(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let file_path = self.file_path.as_ref().expect("checked by log_message");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        let mut writer = BufWriter::new(file);

        // Write each line of content, preserving the exact formatting
        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Empty line after each message for spacing, matching the display
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            (Some(path), false) => format!(
                "paused ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

/// Diagnostic logging. A TUI owns the terminal, so tracing output goes to a
/// file under the data dir, and only when `OSGOOD_DEBUG_LOG` is set.
pub fn init_debug_log() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("OSGOOD_DEBUG_LOG").is_none() {
        return Ok(());
    }
    let dir = Config::data_dir();
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("osgood-debug.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_log_file_starts_active() {
        let logging = LoggingState::new(Some("chat.log".into()));
        assert!(logging.is_active());
        assert!(LoggingState::new(None).get_status_string() == "disabled");
    }

    #[test]
    fn toggle_requires_a_file() {
        let mut logging = LoggingState::new(None);
        assert!(logging.toggle_logging().is_err());
    }

    #[test]
    fn messages_are_appended_with_spacing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let mut logging = LoggingState::new(None);
        logging
            .set_log_file(path.to_string_lossy().into_owned())
            .unwrap();

        logging.log_message("You: hello").unwrap();
        logging.log_message("line one\nline two").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "You: hello\n\nline one\nline two\n\n");
    }

    #[test]
    fn paused_logging_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let mut logging = LoggingState::new(None);
        logging
            .set_log_file(path.to_string_lossy().into_owned())
            .unwrap();
        logging.toggle_logging().unwrap();
        logging.log_message("dropped").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        assert!(logging.get_status_string().starts_with("paused"));
    }
}
