use clap::Parser;
use log::{debug, warn};
use std::net::IpAddr;
use std::path::PathBuf;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Command line surface. The bind address lives in config.ini, not here;
/// these flags only relocate the working files.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding config.ini, readme.txt and index.html
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Path to the config file (default: config.ini under the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Bind address of the listener, read once at startup from the `[Server]`
/// section of the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Parses the `[Server]` section of an INI document. Parsing is lenient:
    /// a missing or malformed value falls back to the default for that key,
    /// unknown sections and keys are skipped, `;` and `#` start comments.
    pub fn from_ini(raw: &str) -> Self {
        let mut config = Self::default();
        let mut in_server_section = false;

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                in_server_section = line[1..line.len() - 1].trim() == "Server";
                continue;
            }

            if !in_server_section {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!("Ignoring malformed config line: {}", line);
                continue;
            };

            match (key.trim(), value.trim()) {
                ("IP", value) => match value.parse::<IpAddr>() {
                    Ok(ip) => config.address = ip.to_string(),
                    Err(_) => warn!(
                        "Invalid Server.IP {:?}, falling back to {}",
                        value, DEFAULT_ADDRESS
                    ),
                },
                ("Port", value) => match value.parse::<u16>() {
                    Ok(port) if port != 0 => config.port = port,
                    _ => warn!(
                        "Invalid Server.Port {:?}, falling back to {}",
                        value, DEFAULT_PORT
                    ),
                },
                (key, _) => debug!("Ignoring unknown config key Server.{}", key),
            }
        }

        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
