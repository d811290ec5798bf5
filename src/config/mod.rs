//! Configuration file support

mod config;

pub use config::{Config, CONFIG_DIR_ENV, CONFIG_FILE};
