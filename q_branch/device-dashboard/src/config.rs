//! Command-line and environment configuration.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "computer_prices_all.csv";
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "device-dashboard")]
#[command(about = "Device price analytics dashboard API")]
#[command(version)]
pub struct Cli {
    /// CSV file with one row per device
    #[arg(long, env = "DEVICE_DASHBOARD_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Address to listen on
    #[arg(long, env = "DEVICE_DASHBOARD_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port for the HTTP server
    #[arg(short, long, env = "DEVICE_DASHBOARD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Cli {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            addr: SocketAddr::new(self.host, self.port),
        }
    }
}

/// Settings of the HTTP listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        assert_eq!(ServerConfig::default().addr.to_string(), "127.0.0.1:5001");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "device-dashboard",
            "--data",
            "/srv/prices.csv",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
        ])
        .unwrap();

        assert_eq!(cli.data, PathBuf::from("/srv/prices.csv"));
        assert_eq!(cli.server_config().addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_values_when_unset() {
        // skip when the environment overrides a default
        if std::env::var_os("DEVICE_DASHBOARD_DATA").is_some()
            || std::env::var_os("DEVICE_DASHBOARD_PORT").is_some()
            || std::env::var_os("DEVICE_DASHBOARD_HOST").is_some()
        {
            return;
        }
        let cli = Cli::try_parse_from(["device-dashboard"]).unwrap();
        assert_eq!(cli.data, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cli.port, DEFAULT_PORT);
        assert_eq!(cli.server_config(), ServerConfig::default());
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["device-dashboard", "--port", "70000"]).is_err());
        assert!(Cli::try_parse_from(["device-dashboard", "--host", "not-an-ip"]).is_err());
    }
}
