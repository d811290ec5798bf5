//! CLI argument definitions using clap
//!
//! The request is read from stdin (or `--input`); the subcommand decides
//! whether it is printed as Python code or executed.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::client::ExecOptions;
use crate::codegen::{Layout, RenderOptions};
use crate::import::{InputFormat, ParseOptions};

/// convert-to-requests - convert "copy as cURL"/"copy as fetch" to Python requests code
#[derive(Parser, Debug, Clone)]
#[command(name = "convert-to-requests", version, about, long_about = None)]
pub struct Args {
    /// Parse fetch instead of curl (cookies and User-Agent are not part of "copy as fetch")
    #[arg(long = "fetch", global = true, action = ArgAction::SetTrue)]
    pub fetch: bool,

    /// Parse bash-style $'' strings (as argument to --data-raw)
    #[arg(long = "parse-bash-strings", global = true, action = ArgAction::SetTrue)]
    pub parse_bash_strings: bool,

    /// Read the command from FILE instead of stdin ("-" for stdin)
    #[arg(long = "input", value_name = "FILE", global = true)]
    pub input: Option<PathBuf>,

    /// Output format for diagnostics on stderr
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Debug mode: verbose logging and detailed errors
    #[arg(long = "debug", global = true, action = ArgAction::SetTrue)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the Python code
    Code(CodeArgs),
    /// Execute the request
    Exec(ExecArgs),
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct CodeArgs {
    /// Lay out headers one per line
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pub pretty: bool,

    /// Print a complete script that sends the request and prints the body
    #[arg(long = "script", action = ArgAction::SetTrue)]
    pub script: bool,
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct ExecArgs {
    /// Print the request and response status line on stderr
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long = "timeout", value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<f64>,
}

/// Log format for diagnostics
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

impl Args {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            format: if self.fetch { InputFormat::Fetch } else { InputFormat::Curl },
            dollar_strings: self.parse_bash_strings,
        }
    }
}

impl CodeArgs {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            layout: if self.pretty { Layout::Pretty } else { Layout::Compact },
            script: self.script,
        }
    }
}

impl ExecArgs {
    /// `default_timeout` (seconds) applies when `--timeout` is not given
    pub fn exec_options(&self, default_timeout: Option<f64>) -> ExecOptions {
        ExecOptions {
            verbose: self.verbose,
            timeout: self.timeout.or(default_timeout).map(Duration::from_secs_f64),
        }
    }
}

/// Positive, finite number of seconds
pub fn parse_timeout(s: &str) -> Result<f64, String> {
    let secs: f64 = s.trim().parse().map_err(|_| format!("invalid number of seconds: {s}"))?;
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err(format!("timeout must be a positive number of seconds: {s}"))
    }
}
