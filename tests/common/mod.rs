//! Common test utilities for convert-to-requests integration tests
//!
//! Every invocation gets its own empty config directory, so a config file
//! on the machine running the tests never leaks in.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub const BIN: &str = env!("CARGO_BIN_EXE_convert-to-requests");

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CliResponse {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// `Warning: ignoring ...` lines, in order
    pub fn warnings(&self) -> Vec<&str> {
        self.stderr
            .lines()
            .filter_map(|l| l.strip_prefix("Warning: ignoring "))
            .collect()
    }
}

/// Isolated environment for running the CLI
pub struct MockEnvironment {
    config_dir: TempDir,
    env_vars: HashMap<String, String>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self {
            config_dir,
            env_vars: HashMap::new(),
        }
    }

    /// Write `config.toml` into the config directory
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.config_dir.path().join("config.toml"), content)
            .expect("Failed to write config file");
        self
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().to_path_buf()
    }

    /// A `Command` for the binary, wired to this environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(BIN);
        cmd.env("CONVERT_TO_REQUESTS_CONFIG_DIR", self.config_path());
        cmd.env_remove("CONVERT_TO_REQUESTS_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Run the CLI with `stdin` as input
pub fn run(args: &[&str], stdin: &str) -> CliResponse {
    run_with_env(args, stdin, &MockEnvironment::new())
}

pub fn run_with_env(args: &[&str], stdin: &str, env: &MockEnvironment) -> CliResponse {
    let mut cmd = env.command();
    cmd.args(args);
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to spawn command");
    {
        let mut pipe = child.stdin.take().expect("Failed to open stdin");
        // the CLI may exit before reading (e.g. on a usage error)
        let _ = pipe.write_all(stdin.as_bytes());
    }
    let output = child.wait_with_output().expect("Failed to wait for command");
    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(1),
    }
}

/// Write `content` to a file in a fresh temp directory
pub fn create_temp_file(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("request.txt");
    std::fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}
