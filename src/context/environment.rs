//! Environment struct (stdin/stdout/etc.)

use std::io::{self, Read, Stdin, Stdout};
use std::path::Path;

/// Execution environment
pub struct Environment {
    pub stdin: Stdin,
    pub stdout: Stdout,
    pub stdin_isatty: bool,
    pub program_name: String,
}

impl Environment {
    pub fn init() -> Self {
        Self::default()
    }

    /// Read the whole input: `path` if given (`-` is stdin), else stdin
    pub fn read_input(&self, path: Option<&Path>) -> io::Result<String> {
        match path {
            Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
            _ => {
                let mut input = String::new();
                self.stdin.lock().read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            stdin_isatty: atty::is(atty::Stream::Stdin),
            program_name: "convert-to-requests".to_string(),
        }
    }
}
