//! Service configuration from CLI flags and environment.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Dataset location relative to the crate root.
const DATA_FILE: &[&str] = &["data", "half_ppr_adp.csv"];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Serve half-PPR ADP data as JSON
#[derive(Parser, Debug, Clone)]
#[command(
    name = "adp-server",
    about = "Serve half-PPR ADP data as JSON",
    version
)]
pub struct Settings {
    /// Address to bind
    #[arg(long, env = "ADP_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "ADP_PORT", default_value_t = 5000)]
    pub port: u16,

    /// ADP CSV file (defaults to the bundled dataset)
    #[arg(long, env = "ADP_DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "ADP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Settings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn resolved_data_path(&self) -> PathBuf {
        self.data_path.clone().unwrap_or_else(default_data_path)
    }
}

/// The bundled dataset, resolved from the crate's own location rather than
/// the working directory.
pub fn default_data_path() -> PathBuf {
    DATA_FILE
        .iter()
        .fold(Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf(), |p, part| p.join(part))
}
