/* Everything that can go wrong while reading the command line. */

use std::fmt;

use thiserror::Error;

/// Which of the two port parameters an error talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Source,
    Remote,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::Source => write!(f, "source"),
            PortKind::Remote => write!(f, "remote"),
        }
    }
}

/// One discrete problem found on the command line.
///
/// Parsing never stops at the first problem; it collects all of these and
/// reports them in one go. The `Display` strings are exactly the lines the
/// user sees in the combined report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No value given for option {0}. Please provide one.")]
    MissingValue(String),

    #[error("Invalid option '{0}'.")]
    InvalidOption(String),

    #[error("Invalid number for 'buffersize': {0}.")]
    BadBufferSize(String),

    #[error("Buffer size has to be > 0, was: {0}.")]
    BufferSizeRange(i32),

    #[error("Unsupported encoding: '{0}'.")]
    UnsupportedEncoding(String),

    #[error("Unknown logger type: '{0}'.")]
    UnknownLoggerType(String),

    #[error("Unable to create string file logger: {0}")]
    StringFileLogger(String),

    #[error("Unable to create byte file logger: {0}")]
    ByteFileLogger(String),

    #[error("Too few arguments. Need 3, got {}: {0:?}.", .0.len())]
    TooFewArguments(Vec<String>),

    #[error("Too many arguments. Need 3, got {}: {0:?}.", .0.len())]
    TooManyArguments(Vec<String>),

    #[error("Unable to parse {kind} port from: '{value}'.")]
    PortNotNumeric { kind: PortKind, value: String },

    #[error("Port numbers have to be in range 1-65535, {kind} port was: {port}.")]
    PortOutOfRange { kind: PortKind, port: i32 },
}
