//! # Radish CLI
//!
//! Issue a single `put` or `get` against a radish cache server and print the
//! outcome. Set `RUST_LOG=radish_client=debug` to see the frames on the wire.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use radish_client::{CacheClient, ClientConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "radish-cli", version, about = "Store and fetch values on a radish cache server")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Server hostname; overrides the config file.
    #[arg(long)]
    host: Option<String>,

    /// Server port; overrides the config file.
    #[arg(long)]
    port: Option<u16>,

    /// JSON client configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a value under a key.
    Put {
        key: String,
        value: String,
    },
    /// Fetch the value stored under a key.
    Get {
        key: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let client = CacheClient::with_config(config);

    match cli.command {
        Command::Put { key, value } => {
            client
                .try_put(&key, &value)
                .with_context(|| format!("PUT {} failed", key))?;
            println!("OK");
        }
        Command::Get { key } => {
            let value = client
                .try_get(&key)
                .with_context(|| format!("GET {} failed", key))?;
            match value {
                Some(value) => println!("\"{}\"", value),
                None => println!("(nil)"),
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ClientConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ClientConfig::default(),
    };
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_put() {
        let cli = Cli::try_parse_from(["radish-cli", "put", "test_key", "test_value"]).unwrap();
        match cli.command {
            Command::Put { key, value } => {
                assert_eq!(key, "test_key");
                assert_eq!(value, "test_value");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["radish-cli", "--host", "10.1.2.3", "--port", "9000", "get", "k"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.host, "10.1.2.3");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn defaults_to_local_server() {
        let cli = Cli::try_parse_from(["radish-cli", "get", "k"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["radish-cli", "--config", "/nonexistent/radish.json", "get", "k"]).unwrap();
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn rejects_put_without_value() {
        assert!(Cli::try_parse_from(["radish-cli", "put", "only_key"]).is_err());
    }
}
