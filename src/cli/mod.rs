//! CLI argument parsing

pub mod args;

// Re-exports
pub use args::{Args, CodeArgs, Command, ExecArgs, LogFormat};
