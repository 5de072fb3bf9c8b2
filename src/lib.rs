/* tcptap - a TCP proxy that captures the traffic flowing through it.
   This crate is the command-line front-end: it turns the raw argument
   vector into one validated Config (or a combined error report) that the
   forwarding engine and the selected loggers consume. */

pub mod args;
pub mod config;
pub mod errors;
pub mod logger;
pub mod logging;

pub use args::parse_args;
pub use config::Config;
