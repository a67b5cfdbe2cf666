//! Logging setup.
//!
//! Library code only talks to the `log` facade; `init_logging` installs the
//! `env_logger` backend for hosts that want one.

mod init;

pub use init::{init_logging, LoggingConfig};
