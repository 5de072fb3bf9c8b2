/* The capture sinks a user can pick with --logger. The parser only selects
   and parameterizes these; the forwarding engine writes the traffic. */

use std::fs::File;
use std::io;
use std::path::PathBuf;

/// File name suffix for text sinks.
pub const STRING_SUFFIX: &str = ".txt";
/// File name suffix for raw byte sinks.
pub const BYTES_SUFFIX: &str = ".bytes";

/// One configured traffic logger.
///
/// Console variants send upstream data (local -> remote) to stdout and
/// downstream data (remote -> local) to stderr. File variants write one file
/// per direction; the files are created the moment the logger is enabled so
/// that a bad path is reported before any traffic flows.
#[derive(Debug)]
pub enum Logger {
    /// Traffic decoded to text with the configured encoding.
    ConsoleString,
    /// Raw byte values, printed as integers or as hex when `hex` is set.
    ConsoleBytes { hex: bool },
    /// Decoded text written to `.txt` files.
    FileString(FileSinks),
    /// Raw binary written to `.bytes` files.
    FileBytes(FileSinks),
}

impl Logger {
    /// The type name as it appears on the command line.
    pub fn type_name(&self) -> &'static str {
        match self {
            Logger::ConsoleString => "console-string",
            Logger::ConsoleBytes { .. } => "console-bytes",
            Logger::FileString(_) => "file-string",
            Logger::FileBytes(_) => "file-bytes",
        }
    }
}

/// A pair of per-direction output files backing a file logger.
#[derive(Debug)]
pub struct FileSinks {
    pub down_path: PathBuf,
    pub up_path: PathBuf,
    pub down: File,
    pub up: File,
}

impl FileSinks {
    /// Creates both sink files, appending `suffix` to the configured paths.
    pub fn create(down: &str, up: &str, suffix: &str) -> io::Result<Self> {
        let down_path = PathBuf::from(format!("{down}{suffix}"));
        let up_path = PathBuf::from(format!("{up}{suffix}"));
        let down = File::create(&down_path)?;
        let up = File::create(&up_path)?;
        Ok(FileSinks {
            down_path,
            up_path,
            down,
            up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinks_are_created_with_the_given_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let down = dir.path().join("down").to_string_lossy().into_owned();
        let up = dir.path().join("up").to_string_lossy().into_owned();

        let sinks = FileSinks::create(&down, &up, STRING_SUFFIX).unwrap();
        assert!(sinks.down_path.ends_with("down.txt"));
        assert!(sinks.up_path.ends_with("up.txt"));
        assert!(sinks.down_path.exists());
        assert!(sinks.up_path.exists());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let result = FileSinks::create("/no/such/dir/down", "/no/such/dir/up", BYTES_SUFFIX);
        assert!(result.is_err());
    }
}
