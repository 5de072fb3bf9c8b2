/* The parsed runtime configuration. The argument parser fills this in and the
   forwarding engine consumes it; a non-empty error report means "do not run". */

use std::io;

use crate::errors::ParseError;
use crate::logger::{FileSinks, Logger, BYTES_SUFFIX, STRING_SUFFIX};

/// Read buffer size used when capturing traffic, in bytes.
pub const DEFAULT_BUFFER_SIZE: i32 = 8192;
/// Encoding used to decode captured bytes into text.
pub const DEFAULT_ENCODING: &str = "UTF-8";
/// Base path for the remote -> local capture file.
pub const DEFAULT_DOWN_PATH: &str = "tcptap_down";
/// Base path for the local -> remote capture file.
pub const DEFAULT_UP_PATH: &str = "tcptap_up";

/// Everything the tool needs to know to run, as parsed from the command line.
///
/// Port and buffer size fields are plain `i32` on purpose: the parser stores
/// whatever number the user typed, even an out-of-range one, so the combined
/// error report can name it. A config with a non-empty [`Config::error_report`]
/// must never reach the forwarding engine.
#[derive(Debug)]
pub struct Config {
    pub buffer_size: i32,
    pub encoding: String,
    pub down_path: String,
    pub up_path: String,
    pub source_port: i32,
    pub remote_host: String,
    pub remote_port: i32,
    /// False once --help was given; the caller should stop without running.
    pub should_run: bool,
    pub loggers: Vec<Logger>,
    pub errors: Vec<ParseError>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            buffer_size: DEFAULT_BUFFER_SIZE,
            encoding: DEFAULT_ENCODING.to_string(),
            down_path: DEFAULT_DOWN_PATH.to_string(),
            up_path: DEFAULT_UP_PATH.to_string(),
            source_port: 0,
            remote_host: String::new(),
            remote_port: 0,
            should_run: true,
            loggers: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl Config {
    /// Adds a logger that prints decoded text to stdout/stderr.
    pub fn enable_string_console_logger(&mut self) {
        self.loggers.push(Logger::ConsoleString);
    }

    /// Adds a logger that prints byte values to stdout/stderr.
    pub fn enable_byte_console_logger(&mut self, hex: bool) {
        self.loggers.push(Logger::ConsoleBytes { hex });
    }

    /// Adds a logger writing decoded text to the configured down/up paths.
    /// Creates the `.txt` files right away.
    pub fn enable_string_file_logger(&mut self) -> io::Result<()> {
        let sinks = FileSinks::create(&self.down_path, &self.up_path, STRING_SUFFIX)?;
        self.loggers.push(Logger::FileString(sinks));
        Ok(())
    }

    /// Adds a logger writing raw bytes to the configured down/up paths.
    /// Creates the `.bytes` files right away.
    pub fn enable_byte_file_logger(&mut self) -> io::Result<()> {
        let sinks = FileSinks::create(&self.down_path, &self.up_path, BYTES_SUFFIX)?;
        self.loggers.push(Logger::FileBytes(sinks));
        Ok(())
    }

    /// True when parsing found no problems.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All collected problems as one newline-joined report, with no trailing
    /// newline. Empty string means success.
    pub fn error_report(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortKind;

    #[test]
    fn defaults_are_runnable_and_empty() {
        let config = Config::default();
        assert_eq!(config.buffer_size, 8192);
        assert_eq!(config.encoding, "UTF-8");
        assert_eq!(config.down_path, "tcptap_down");
        assert_eq!(config.up_path, "tcptap_up");
        assert!(config.should_run);
        assert!(config.loggers.is_empty());
        assert!(config.is_valid());
        assert_eq!(config.error_report(), "");
    }

    #[test]
    fn report_joins_errors_without_trailing_newline() {
        let mut config = Config::default();
        config.errors.push(ParseError::InvalidOption("--bad".to_string()));
        config.errors.push(ParseError::PortOutOfRange {
            kind: PortKind::Remote,
            port: 0,
        });

        let report = config.error_report();
        assert_eq!(
            report,
            "Invalid option '--bad'.\nPort numbers have to be in range 1-65535, remote port was: 0."
        );
        assert!(!report.ends_with('\n'));
    }

    #[test]
    fn file_loggers_create_their_sinks_at_enable_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            down_path: dir.path().join("d").to_string_lossy().into_owned(),
            up_path: dir.path().join("u").to_string_lossy().into_owned(),
            ..Config::default()
        };

        config.enable_string_file_logger().unwrap();
        config.enable_byte_file_logger().unwrap();

        assert!(dir.path().join("d.txt").exists());
        assert!(dir.path().join("u.txt").exists());
        assert!(dir.path().join("d.bytes").exists());
        assert!(dir.path().join("u.bytes").exists());
        assert_eq!(config.loggers.len(), 2);
    }
}
