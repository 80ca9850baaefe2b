//! `cmm`: static checker for C-- programs.
//!
//! Reads one source file, runs it through the front end and type analysis,
//! and prints every error found with the offending source line.

use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use cminusminus::{
    ast::unparse::unparse_typed, config::Config, display_error, errors::errors::Report,
    lexer::lexer::tokenize, name_analysis::name_analysis, parser::parser::parse,
    type_checker::type_analysis,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "cmm")]
#[command(about = "Static type checker for C-- programs")]
#[command(version)]
struct Cli {
    /// Source file to check
    file: PathBuf,

    /// Configuration file path (defaults to ./cmm.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the program with every expression annotated with its type
    #[arg(short = 't', long)]
    show_types: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print at most this many errors
    #[arg(short, long)]
    max_diagnostics: Option<usize>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.show_types {
        config.show_types = true;
    }
    if let Some(max) = cli.max_diagnostics {
        config.max_diagnostics = max;
    }

    init_logging(&config, cli.verbose)?;

    let source = read_to_string(&cli.file)
        .with_context(|| format!("Failed to read source file: {}", cli.file.display()))?;
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    if check(&source, file_name, &config) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()?
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Runs the whole pipeline, returning true when the program type checks.
fn check(source: &str, file_name: String, config: &Config) -> bool {
    let start = Instant::now();

    let tokens = match tokenize(source.to_string(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            report(&[error], source, config);
            return false;
        }
    };
    debug!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let (_, program) = parse(tokens, Rc::new(file_name));
    let program = match program {
        Ok(program) => program,
        Err(error) => {
            report(&[error], source, config);
            return false;
        }
    };
    debug!(elapsed = ?start.elapsed(), "parsed");

    let names = match name_analysis::analyze(program) {
        Ok(names) => names,
        Err(errors) => {
            report(&errors, source, config);
            eprintln!("Name analysis failed");
            return false;
        }
    };
    debug!(symbols = names.symbols.len(), elapsed = ?start.elapsed(), "names resolved");

    let analysis = match type_analysis::analyze(&names) {
        Ok(analysis) => analysis,
        Err(diagnostics) => {
            report(&diagnostics, source, config);
            eprintln!("Type check failed");
            return false;
        }
    };
    info!(elapsed = ?start.elapsed(), "type check passed");

    if config.show_types {
        match unparse_typed(&names.program, &analysis) {
            Ok(text) => print!("{}", text),
            Err(error) => {
                eprintln!("Error: {}", error);
                return false;
            }
        }
    }

    true
}

fn report<R: Report>(errors: &[R], source: &str, config: &Config) {
    let shown = config.diagnostic_limit(errors.len());

    for error in &errors[..shown] {
        display_error(error, source);
    }

    if shown < errors.len() {
        eprintln!("... and {} more", errors.len() - shown);
    }
}
