//! Umbra daemon: entry point for running the DAO API node.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use umbra_node::{init_logging, DaoNode, NodeConfig};

#[derive(Parser, Debug)]
#[command(name = "umbra-daemon", about = "Umbra privacy-preserving DAO service")]
struct Cli {
    /// Interface to bind the API server to.
    #[arg(long, env = "UMBRA_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// API server port.
    #[arg(long, env = "UMBRA_PORT")]
    port: Option<u16>,

    /// Milliseconds a bridge transfer stays pending before it confirms.
    #[arg(long, env = "UMBRA_SETTLEMENT_DELAY_MS")]
    settlement_delay_ms: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, env = "UMBRA_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "UMBRA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Allowed CORS origins (comma-separated). Empty allows any origin.
    #[arg(long, env = "UMBRA_ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "UMBRA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the node (the default).
    Run,
    /// Print the effective configuration as TOML and exit.
    PrintConfig,
}

impl Cli {
    /// File (or defaults) as the base, explicit flags on top.
    fn resolve_config(&self) -> anyhow::Result<NodeConfig> {
        let base = match &self.config {
            Some(path) => NodeConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => NodeConfig::default(),
        };

        Ok(NodeConfig {
            bind_address: self.bind_address.clone().unwrap_or(base.bind_address),
            port: self.port.unwrap_or(base.port),
            settlement_delay_ms: self.settlement_delay_ms.unwrap_or(base.settlement_delay_ms),
            log_format: self.log_format.clone().unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            allowed_origins: if self.allowed_origins.is_empty() {
                base.allowed_origins
            } else {
                self.allowed_origins.clone()
            },
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if cli.command == Some(Command::PrintConfig) {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    init_logging(config.log_format()?, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let node = DaoNode::new(config)?;
    let running = node.start().await?;

    let shutdown = node.shutdown_controller();
    tokio::spawn(async move { shutdown.wait_for_signal().await });

    running.wait().await?;
    tracing::info!("Umbra daemon exited cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["umbra-daemon", "--port", "8080", "--log-format", "json"])
            .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, "json");
        assert_eq!(config.settlement_delay_ms, 2_000);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn flags_override_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port = 7000\nsettlement_delay_ms = 10\nallowed_origins = [\"http://a\"]"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["umbra-daemon", "--config", &path, "--port", "9000"])
            .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.settlement_delay_ms, 10);
        assert_eq!(config.allowed_origins, vec!["http://a".to_string()]);
    }

    #[test]
    fn unreadable_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["umbra-daemon", "--config", "/nonexistent.toml"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn print_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["umbra-daemon", "print-config"]).unwrap();
        assert_eq!(cli.command, Some(Command::PrintConfig));
    }
}
