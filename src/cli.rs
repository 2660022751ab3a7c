use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pyjs::service::{self, ServiceConfig};
use pyjs::{Error, TranslateOptions};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "pyjs", about = "Translate a subset of Python into JavaScript")]
pub struct Cli {
    /// Log more (`-v` for debug, `-vv` for trace). `PYJS_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a Python file, or literal source text, into JavaScript.
    Translate {
        /// A `.py` path, or the source text itself.
        input: String,
        /// Where to write the program.
        #[arg(short, long, default_value = "output.js")]
        output: PathBuf,
        /// Spaces per nesting level.
        #[arg(long, default_value_t = 4)]
        indent: usize,
    },
    /// Run the static pre-check and print its diagnostics.
    Check {
        /// A `.py` path, or the source text itself.
        input: String,
    },
    /// Serve `POST /compile` over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
        /// Seconds one request may spend translating.
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
        /// Largest accepted request body.
        #[arg(long, default_value_t = service::DEFAULT_MAX_BODY_BYTES)]
        max_body_bytes: usize,
        /// Spaces per nesting level.
        #[arg(long, default_value_t = 4)]
        indent: usize,
    },
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Translate {
            input,
            output,
            indent,
        } => cmd_translate(&input, &output, indent),
        Command::Check { input } => cmd_check(&input),
        Command::Serve {
            addr,
            timeout_secs,
            max_body_bytes,
            indent,
        } => cmd_serve(ServiceConfig {
            addr,
            timeout: Duration::from_secs(timeout_secs),
            max_body_bytes,
            options: TranslateOptions { indent },
        }),
    }
}

/// Arguments ending in `.py` name a file; anything else is source text.
fn read_input(input: &str) -> Result<String> {
    if input.ends_with(".py") {
        debug!(path = input, "reading source file");
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    } else {
        Ok(input.to_string())
    }
}

fn cmd_translate(input: &str, output: &Path, indent: usize) -> Result<ExitCode> {
    let source = read_input(input)?;
    let program = match pyjs::translate_with(&source, TranslateOptions { indent }) {
        Ok(program) => program,
        Err(Error::Parse(errors)) => {
            for error in errors.iter() {
                eprintln!("{}", error.display_with_source(&source));
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(error) => return Err(error.into()),
    };

    fs::write(output, &program)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), bytes = program.len(), "wrote program");
    print!("{program}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(input: &str) -> Result<ExitCode> {
    let source = read_input(input)?;
    let diagnostics = pyjs::check(&source);
    for line in &diagnostics {
        println!("{line}");
    }
    Ok(if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_serve(config: ServiceConfig) -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(service::serve(config))?;
    Ok(ExitCode::SUCCESS)
}
