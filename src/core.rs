use std::io::Write;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, LogFormat};
use crate::client;
use crate::codegen;
use crate::config::Config;
use crate::context::Environment;
use crate::errors::{ConvertError, Result};
use crate::import;
use crate::status::ExitStatus;

/// Log filter override, in `tracing_subscriber::EnvFilter` syntax
pub const LOG_ENV: &str = "CONVERT_TO_REQUESTS_LOG";

/// Main entry point for the CLI.
///
/// Loads the config file, parses arguments, reads the request from the
/// input and prints or executes it.
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    if let Some(name) = args.first() {
        if let Some(basename) = std::path::Path::new(name).file_stem() {
            env.program_name = basename.to_string_lossy().to_string();
        }
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}", e);
            Config::default()
        }
    };

    let merged_args = merge_default_options(args, &config);

    let parsed = match Args::try_parse_from(&merged_args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(parsed.debug, parsed.log_format.unwrap_or_default());
    debug!(config_dir = %config.config_dir.display(), args = ?parsed, "Starting");

    let traceback = parsed.debug;
    match program(&parsed, &config, &env) {
        Ok(status) => status,
        Err(e) => handle_error(e, traceback),
    }
}

pub fn program(args: &Args, config: &Config, env: &Environment) -> Result<ExitStatus> {
    if args.input.is_none() && env.stdin_isatty {
        eprintln!("usage: {} [--fetch] [--parse-bash-strings] {{code,exec}} < REQUEST", env.program_name);
        eprintln!("\nFor more information, run: {} --help", env.program_name);
        return Ok(ExitStatus::Error);
    }

    let text = env.read_input(args.input.as_deref())?;
    let req = import::parse(&text, &args.parse_options())?;
    debug!(method = %req.method, url = %req.url, headers = req.headers.len(), "Parsed request");

    for entry in &req.ignored {
        eprintln!("Warning: ignoring {}", entry);
    }

    match &args.command {
        Command::Code(code) => {
            let source = codegen::to_python_code(&req, &code.render_options());
            let mut stdout = env.stdout.lock();
            writeln!(stdout, "{}", source)?;
            stdout.flush()?;
        }
        Command::Exec(exec) => {
            let response = client::execute(&req, &exec.exec_options(config.exec_timeout))?;
            response.raise_for_status()?;
            let mut stdout = env.stdout.lock();
            stdout.write_all(response.text().as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(ExitStatus::Success)
}

fn init_logging(debug: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if debug { "convert_to_requests=debug,warn" } else { "warn" })
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(debug);

    // a subscriber may already be installed when embedded
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn merge_default_options(args: Vec<String>, config: &Config) -> Vec<String> {
    if config.default_options.is_empty() {
        return args;
    }

    let (flags, positional): (Vec<_>, Vec<_>) = config.default_options.iter()
        .partition(|opt| opt.starts_with('-'));

    if !positional.is_empty() {
        eprintln!("Warning: Positional arguments in default_options are ignored: {:?}", positional);
        eprintln!("Only flags (starting with -) can be used in default_options.");
    }

    if flags.is_empty() {
        return args;
    }

    let mut merged = Vec::with_capacity(args.len() + flags.len());

    if let Some(program) = args.first() {
        merged.push(program.clone());
    }

    merged.extend(flags.into_iter().cloned());
    merged.extend(args.into_iter().skip(1));

    merged
}

fn handle_error(error: ConvertError, traceback: bool) -> ExitStatus {
    if traceback {
        eprintln!("Error: {:?}", error);
    } else {
        eprintln!("Error: {}", error);
    }

    ExitStatus::Error
}
