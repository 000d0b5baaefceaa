use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tally::{evaluate_with, Calculator, Config, Key};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with limits and display settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one expression and print the result.
    Eval {
        /// e.g. "(2+3)*4"
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Press calculator buttons in order and print the display.
    Press {
        /// Button labels: 0-9, 00, ., + - * /, ( ), C, =
        #[arg(required = true, allow_hyphen_values = true)]
        labels: Vec<String>,
    },
    /// Read expressions from stdin, one per line. `C` clears.
    Repl,
}

#[mutants::skip] // Process setup only; `run` holds the logic.
fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    tracing::trace!("CLI args = {:?}", args);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.command {
        Command::Eval { expression } => {
            match evaluate_with(&expression, &config.eval) {
                Ok(value) => {
                    writeln!(out, "{:.*}", config.eval.significant_digits, value)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    writeln!(out, "{}", config.error_text)?;
                    eprintln!("{:?}", err);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Press { labels } => {
            let mut calc = Calculator::with_config(config);
            for label in &labels {
                if !calc.press_label(label) {
                    anyhow::bail!("'{label}' is not a calculator button");
                }
            }
            writeln!(out, "{}", calc.display())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Repl => {
            let stdin = io::stdin();
            repl(stdin.lock(), &mut out, Calculator::with_config(config))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse_config(text: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(text)?;
    if config.eval.significant_digits == 0 {
        anyhow::bail!("significant_digits must be at least 1");
    }
    Ok(config)
}

/// Each line replaces the display and is evaluated, as if typed and followed
/// by Enter. Diagnostics for errors go after the display line.
fn repl(input: impl BufRead, out: &mut impl Write, mut calc: Calculator) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "C" {
            calc.press(Key::Clear);
        } else {
            calc.set_display(line);
            calc.press(Key::Evaluate);
        }
        writeln!(out, "{}", calc.display())?;
        if let Some(err) = calc.last_error() {
            writeln!(out, "  {:?}", err)?;
        }
    }
    Ok(())
}
