/* Tie everything together: initialize logging, parse the command line, and
   hand the validated configuration over. */

use std::process::ExitCode;

use log::info;
use tcptap::logger::Logger;
use tcptap::{logging, parse_args};

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args);

    if !config.is_valid() {
        eprintln!("{}", config.error_report());
        return ExitCode::FAILURE;
    }
    if !config.should_run {
        // --help was given and already printed
        return ExitCode::SUCCESS;
    }

    let loggers: Vec<&str> = config.loggers.iter().map(Logger::type_name).collect();
    info!(
        "Forwarding localhost:{} -> {}:{} (buffer {} bytes, encoding {}, loggers: {})",
        config.source_port,
        config.remote_host,
        config.remote_port,
        config.buffer_size,
        config.encoding,
        loggers.join(", ")
    );
    ExitCode::SUCCESS
}
