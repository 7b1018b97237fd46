//! Command-line interface for sqlmark
//! Runs one highlighting pass over a C# file and prints the classified SQL ranges, or prints the
//! style sheet the configuration resolves to.
//!
//! Usage:
//!   sqlmark `<path>` [--format text|json|yaml] [--config `<file>`] [-v]   - Highlight a file
//!   sqlmark --styles [--format `<format>`] [--config `<file>`]             - Print resolved styles

mod error;
mod formats;

use clap::{Arg, ArgAction, ArgMatches, Command};
use error::CliError;
use formats::{render_highlights, render_styles, Format};
use sqlmark_config::{Loader, SqlmarkConfig, StyleSheet};
use sqlmark_parser::highlight;
use sqlmark_parser::sqlmark::document::SourceDocument;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("sqlmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Highlights SQL inside marked C# string literals")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the C# source file")
                .required_unless_present("styles")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text, json or yaml")
                .default_value("text"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("styles")
                .long("styles")
                .help("Print the resolved style of every category")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pass details to stderr (repeat for more)")
                .action(ArgAction::Count),
        )
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_config(path: Option<&String>) -> Result<SqlmarkConfig, CliError> {
    let loader = match path {
        Some(path) => {
            tracing::debug!(%path, "loading configuration file");
            Loader::new().with_file(path)
        }
        None => Loader::new(),
    };
    Ok(loader.build()?)
}

fn handle_highlight_command(path: &Path, format: Format) -> Result<String, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read source file");
    let doc = SourceDocument::new(source);
    let highlights = highlight(&doc);
    tracing::debug!(tokens = highlights.tokens().len(), ?format, "rendering highlights");
    render_highlights(&doc, &highlights, format)
}

fn run(matches: &ArgMatches) -> Result<String, CliError> {
    let format: Format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse()?;
    let config = load_config(matches.get_one::<String>("config"))?;

    if matches.get_flag("styles") {
        return render_styles(&StyleSheet::from_config(&config), format);
    }

    match matches.get_one::<String>("path") {
        Some(path) => handle_highlight_command(Path::new(path), format),
        None => Ok(String::new()),
    }
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => print!("{}", output),
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    }
}
