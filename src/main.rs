//! cppedit - highlight C++ source in the terminal

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use cppedit::config::Config;
use cppedit::render::{dump_spans, Renderer};
use cppedit::{prompt, Error, Result};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    spans: bool,
    edit: bool,
    line_numbers: bool,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let Some(options) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };

    let config = match &options.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };
    let highlighter = config.highlighter()?;
    let theme = config.theme()?;

    if options.edit {
        return prompt::run(&highlighter, &theme, &config);
    }

    let source = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    tracing::debug!(bytes = source.len(), "highlighting input");

    let mut stdout = io::stdout().lock();
    if options.spans {
        return dump_spans(&mut stdout, &highlighter, &source);
    }

    let max_width = if io::stdout().is_terminal() {
        crossterm::terminal::size().ok().map(|(cols, _)| cols as usize)
    } else {
        None
    };
    Renderer::new(&theme)
        .with_line_numbers(options.line_numbers || config.line_numbers)
        .with_max_width(max_width)
        .paint_document(&mut stdout, &highlighter, &source)
}

/// Parse arguments; `None` means help or version was printed
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Options>> {
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("cppedit {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--spans" | "-s" => options.spans = true,
            "--edit" | "-e" => options.edit = true,
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| Error::Message("--config requires a path".to_string()))?;
                options.config = Some(PathBuf::from(path));
            }
            "-" => options.file = None,
            other if other.starts_with('-') => {
                return Err(Error::Message(format!("unknown option: {other}")));
            }
            other => options.file = Some(PathBuf::from(other)),
        }
    }

    Ok(Some(options))
}

fn print_usage() {
    println!("cppedit {} - C++ syntax highlighting in the terminal", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: cppedit [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or stdin) and prints it highlighted.");
    println!();
    println!("Options:");
    println!("  -s, --spans          Print tagged spans instead of colored text");
    println!("  -n, --line-numbers   Show line numbers");
    println!("  -e, --edit           Interactive prompt with auto-closing and completion");
    println!("  -c, --config PATH    Use PATH instead of ~/.cppedit.toml");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Set RUST_LOG=debug to trace rule registration and config loading.");
}
