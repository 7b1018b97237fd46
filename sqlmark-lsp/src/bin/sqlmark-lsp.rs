//! Language server binary for sqlmark
//!
//! Usage:
//!   sqlmark-lsp [-c|--config `<file>`]   - Serve on stdin/stdout

use std::process;
use std::sync::Arc;

use clap::{Arg, Command};
use sqlmark_config::Loader;
use sqlmark_lsp::server::DefaultFeatureProvider;
use sqlmark_lsp::SqlmarkLanguageServer;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("sqlmark-lsp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Language server that highlights SQL inside marked C# string literals")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let loader = match matches.get_one::<String>("config") {
        Some(path) => {
            tracing::debug!(%path, "loading configuration file");
            Loader::new().with_file(path)
        }
        None => Loader::new(),
    };
    // Fail early on a broken config file rather than on the first edit.
    if let Err(error) = loader.clone().build() {
        eprintln!("Error: {error}");
        process::exit(1);
    }

    let (service, socket) = LspService::new(move |client| {
        match SqlmarkLanguageServer::with_loader(
            client.clone(),
            Arc::new(DefaultFeatureProvider::new()),
            loader,
        ) {
            Ok(server) => server,
            Err(error) => {
                tracing::warn!(%error, "falling back to default configuration");
                SqlmarkLanguageServer::new(client)
            }
        }
    });
    Server::new(stdin(), stdout(), socket).serve(service).await;
}
