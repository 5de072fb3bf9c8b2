/* Command-line parsing. Tokens starting with "--" are options, everything
   else is a positional parameter (source port, remote host, remote port).
   Problems are collected instead of aborting, so the user sees every mistake
   in one combined report. */

use log::debug;

use crate::config::Config;
use crate::errors::{ParseError, PortKind};

/// Marker that makes a token an option.
const OPT_MARKER: &str = "--";

/// A `--name value` pair pulled off the command line. Standalone flags
/// (--hex, --help) carry the synthetic value "true".
#[derive(Debug, Clone)]
struct Opt {
    name: String,
    value: String,
}

impl Opt {
    fn new(name: &str, value: &str) -> Self {
        Opt {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parses the given argument tokens into a [`Config`].
///
/// Always returns exactly one config. Validation failures do not abort
/// parsing; they land in the config's error list and the caller decides not
/// to run when the report is non-empty. Invoking with no tokens at all is
/// the same as asking for `--help`.
pub fn parse_args(args: &[String]) -> Config {
    let help_only = [String::from("--help")];
    let args = if args.is_empty() { &help_only[..] } else { args };

    let mut config = Config::default();
    let mut errors = Vec::new();

    let (options, positionals) = split_tokens(args, &mut errors);
    debug!(
        "split command line into {} option(s) and {} parameter(s)",
        options.len(),
        positionals.len()
    );

    let mut errors = apply_options(options, &mut config, errors);

    // --help turns should_run off and makes the rest of the line irrelevant
    if config.should_run {
        errors = check_positionals(&positionals, &mut config, errors);
    }

    config.errors = errors;
    config
}

/// Partitions the tokens into options and positional parameters, keeping the
/// relative order within each group.
fn split_tokens(args: &[String], errors: &mut Vec<ParseError>) -> (Vec<Opt>, Vec<String>) {
    let mut options = Vec::new();
    let mut positionals = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if !arg.starts_with(OPT_MARKER) {
            positionals.push(arg.clone());
            i += 1;
            continue;
        }
        if arg == "--hex" || arg == "--help" {
            // standalone options take no value token
            options.push(Opt::new(arg, "true"));
            i += 1;
            continue;
        }
        match args.get(i + 1) {
            Some(value) => {
                options.push(Opt::new(arg, value));
                i += 2;
            }
            None => {
                // a value-taking option at the end of the line; nothing left
                // to consume, so stop here
                errors.push(ParseError::MissingValue(arg.clone()));
                break;
            }
        }
    }
    (options, positionals)
}

/// Validates and applies the collected options.
///
/// Runs in two passes: the first applies everything except --logger while
/// tracking the hex flag and how many loggers were asked for, the second
/// enables the loggers. Loggers have to go last so they see the hex flag and
/// the final down/up paths no matter where they sat on the command line.
fn apply_options(
    mut options: Vec<Opt>,
    config: &mut Config,
    mut errors: Vec<ParseError>,
) -> Vec<ParseError> {
    let mut hex = false;
    let mut loggers = 0;

    for option in &options {
        match option.name.as_str() {
            "--buffersize" => match option.value.parse::<i32>() {
                Ok(size) => {
                    // stored even when out of range, so the report can name it
                    config.buffer_size = size;
                    if size <= 0 {
                        errors.push(ParseError::BufferSizeRange(size));
                    }
                }
                Err(_) => errors.push(ParseError::BadBufferSize(option.value.clone())),
            },
            "--encoding" => {
                config.encoding = option.value.clone();
                if encoding_rs::Encoding::for_label(option.value.as_bytes()).is_none() {
                    errors.push(ParseError::UnsupportedEncoding(option.value.clone()));
                }
            }
            "--down" => config.down_path = option.value.clone(),
            "--up" => config.up_path = option.value.clone(),
            "--hex" => hex = true,
            "--help" => {
                // help always wins: print it, stop the run, and forget every
                // problem seen so far
                println!("{}", help());
                config.should_run = false;
                return Vec::new();
            }
            "--logger" => loggers += 1,
            other => errors.push(ParseError::InvalidOption(other.to_string())),
        }
    }

    if loggers == 0 {
        options.push(Opt::new("--logger", "console-string"));
    }
    for option in &options {
        if option.name == "--logger" {
            add_logger(config, &option.value, hex, &mut errors);
        }
    }
    errors
}

/// Enables the logger named by `kind` on the config, or records why not.
fn add_logger(config: &mut Config, kind: &str, hex: bool, errors: &mut Vec<ParseError>) {
    match kind {
        "console-string" => config.enable_string_console_logger(),
        "console-bytes" => config.enable_byte_console_logger(hex),
        "file-string" => {
            if let Err(e) = config.enable_string_file_logger() {
                errors.push(ParseError::StringFileLogger(e.to_string()));
            }
        }
        "file-bytes" => {
            if let Err(e) = config.enable_byte_file_logger() {
                errors.push(ParseError::ByteFileLogger(e.to_string()));
            }
        }
        other => errors.push(ParseError::UnknownLoggerType(other.to_string())),
    }
}

/// Validates the positional parameters: source port, remote host, remote port.
fn check_positionals(
    positionals: &[String],
    config: &mut Config,
    mut errors: Vec<ParseError>,
) -> Vec<ParseError> {
    if positionals.len() < 3 {
        errors.push(ParseError::TooFewArguments(positionals.to_vec()));
        return errors;
    }
    if positionals.len() > 3 {
        errors.push(ParseError::TooManyArguments(positionals.to_vec()));
        return errors;
    }

    if let Some(port) = parse_port(&positionals[0], PortKind::Source, &mut errors) {
        config.source_port = port;
    }
    // any string is accepted as a host, resolution failures surface at connect time
    config.remote_host = positionals[1].clone();
    if let Some(port) = parse_port(&positionals[2], PortKind::Remote, &mut errors) {
        config.remote_port = port;
    }
    errors
}

/// Parses one port value. An out-of-range port is reported but still
/// returned so it ends up stored on the config.
fn parse_port(value: &str, kind: PortKind, errors: &mut Vec<ParseError>) -> Option<i32> {
    match value.parse::<i32>() {
        Ok(port) => {
            if !(1..=65535).contains(&port) {
                errors.push(ParseError::PortOutOfRange { kind, port });
            }
            Some(port)
        }
        Err(_) => {
            errors.push(ParseError::PortNotNumeric {
                kind,
                value: value.to_string(),
            });
            None
        }
    }
}

/// The static help text printed for --help.
pub fn help() -> String {
    use crate::config::{DEFAULT_BUFFER_SIZE, DEFAULT_DOWN_PATH, DEFAULT_ENCODING, DEFAULT_UP_PATH};
    format!(
        "A proxy that sits between a local port and a remote host and captures the data\n\
         flowing each way. Nothing fancy, no certificate handling.\n\
         \n\
         Usage: tcptap [options] <sourceport> <remotehost> <remoteport>\n\
         Parameters:\n\
         \x20 <sourceport> : The local port to bind and wait for connections on.\n\
         \x20 <remotehost> : The host to connect to and forward traffic to when someone connects to <sourceport>.\n\
         \x20 <remoteport> : The port on <remotehost> to connect to.\n\
         \n\
         Options:\n\
         \x20 --buffersize <bytes> : Size of the buffer used to read captured data. Defaults to {DEFAULT_BUFFER_SIZE} bytes.\n\
         \x20 --encoding <name> : Encoding used to decode captured bytes into text. Defaults to {DEFAULT_ENCODING}.\n\
         \x20 --down <path> : Write the remote->local stream to <path>. Defaults to {DEFAULT_DOWN_PATH}. Suffix depends on the logger.\n\
         \x20 --up <path> : Write the local->remote stream to <path>. Defaults to {DEFAULT_UP_PATH}. Suffix depends on the logger.\n\
         \x20 --logger <type> : Add a logger of the given type. May be repeated. Defaults to 'console-string'.\n\
         \x20 --hex : Print bytes as hex instead of integers in the console-bytes logger.\n\
         \x20 --help : Print this help and exit.\n\
         \n\
         Logger types:\n\
         \x20 console-string : Decoded text, upstream to stdout and downstream to stderr.\n\
         \x20 console-bytes : Byte values (integers, or hex with --hex), upstream to stdout and downstream to stderr.\n\
         \x20 file-string : Decoded text, one .txt file per direction at the --down/--up paths.\n\
         \x20 file-bytes : Raw bytes, one .bytes file per direction at the --down/--up paths."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn missing_value_stops_token_consumption() {
        let mut errors = Vec::new();
        let (options, positionals) = split_tokens(&argv(&["--down"]), &mut errors);
        assert!(options.is_empty());
        assert!(positionals.is_empty());
        assert_eq!(
            errors,
            vec![ParseError::MissingValue("--down".to_string())]
        );
    }

    #[test]
    fn standalone_flags_get_a_synthetic_value() {
        let mut errors = Vec::new();
        let (options, positionals) =
            split_tokens(&argv(&["--hex", "8080", "--help", "host"]), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].name, "--hex");
        assert_eq!(options[0].value, "true");
        assert_eq!(options[1].name, "--help");
        assert_eq!(positionals, argv(&["8080", "host"]));
    }

    #[test]
    fn positionals_keep_their_order_around_options() {
        let mut errors = Vec::new();
        let (options, positionals) = split_tokens(
            &argv(&["8080", "--buffersize", "100", "host", "9090"]),
            &mut errors,
        );
        assert!(errors.is_empty());
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "100");
        assert_eq!(positionals, argv(&["8080", "host", "9090"]));
    }

    #[test]
    fn help_text_covers_all_options_and_logger_types() {
        let text = help();
        for needle in [
            "--buffersize", "--encoding", "--down", "--up", "--logger", "--hex", "--help",
            "console-string", "console-bytes", "file-string", "file-bytes", "8192",
        ] {
            assert!(text.contains(needle), "help text is missing {needle}");
        }
    }
}
