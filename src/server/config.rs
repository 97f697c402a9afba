//! Server configuration: CLI flags layered over environment variables.

use clap::Parser;

/// Command-line options for the Roost server.
#[derive(Debug, Parser)]
#[command(name = "roost", version, about = "Personal X dashboard core")]
pub struct Cli {
    /// Address to bind (overrides ROOST_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides ROOST_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// SQLite database path (overrides ROOST_DATABASE)
    #[arg(long)]
    pub database: Option<String>,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
}

impl AppConfig {
    /// Resolve configuration: CLI flag, then environment, then default.
    pub fn load(cli: Cli) -> Self {
        let host = cli
            .host
            .or_else(|| std::env::var("ROOST_HOST").ok())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let port = cli
            .port
            .or_else(|| {
                std::env::var("ROOST_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
            })
            .unwrap_or(8686);
        let database_path = cli
            .database
            .or_else(|| std::env::var("ROOST_DATABASE").ok())
            .unwrap_or_else(|| "./data/roost.db".to_string());

        Self {
            host,
            port,
            database_path,
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_win_over_defaults() {
        let cli = Cli {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            database: Some("/tmp/t.db".to_string()),
        };
        let config = AppConfig::load(cli);
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.database_path, "/tmp/t.db");
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let cli = Cli {
            host: None,
            port: None,
            database: None,
        };
        std::env::remove_var("ROOST_HOST");
        std::env::remove_var("ROOST_PORT");
        std::env::remove_var("ROOST_DATABASE");
        let config = AppConfig::load(cli);
        assert_eq!(config.bind_addr(), "127.0.0.1:8686");
    }
}
