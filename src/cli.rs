// src/cli.rs
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ndvi-calc")]
#[command(about = "NDVI analysis service for uploaded rasters", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServerConfig),

    /// Compute NDVI for a local raster and print the result as JSON
    Ndvi {
        /// Input raster (GeoTIFF or any GDAL-readable format)
        #[arg(short, long)]
        input: PathBuf,

        /// Red band number (1-indexed)
        #[arg(short, long)]
        red_band: usize,

        /// Near-infrared band number (1-indexed)
        #[arg(short, long)]
        nir_band: usize,

        /// Print only statistics and shape, without the array
        #[arg(long)]
        stats_only: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "NDVI_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "NDVI_PORT", default_value = "8001")]
    pub port: u16,

    /// Allowed CORS origin, repeatable; "*" allows any origin
    #[arg(long = "cors-origin", env = "NDVI_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Maximum accepted upload size in megabytes
    #[arg(long, env = "NDVI_MAX_UPLOAD_MB", default_value = "256")]
    pub max_upload_mb: usize,

    /// Runtime worker threads (defaults to the number of CPUs)
    #[arg(long, env = "NDVI_WORKERS")]
    pub workers: Option<usize>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn worker_threads(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            cors_origins: vec!["*".to_string()],
            max_upload_mb: 256,
            workers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_defaults() {
        let cli = Cli::try_parse_from(["ndvi-calc", "serve"]).unwrap();
        let Commands::Serve(config) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(config.port, 8001);
        assert!(config.allows_any_origin());
        assert_eq!(config.max_upload_bytes(), 256 * 1024 * 1024);
        assert_eq!(config.socket_addr().unwrap().port(), 8001);
    }

    #[test]
    fn parses_cors_list() {
        let cli = Cli::try_parse_from([
            "ndvi-calc",
            "serve",
            "--cors-origin",
            "http://localhost,http://localhost:3000",
        ])
        .unwrap();
        let Commands::Serve(config) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(config.cors_origins.len(), 2);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn parses_ndvi_command() {
        let cli = Cli::try_parse_from([
            "ndvi-calc", "ndvi", "-i", "scene.tif", "-r", "3", "-n", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Ndvi {
                red_band, nir_band, stats_only, ..
            } => {
                assert_eq!((red_band, nir_band), (3, 4));
                assert!(!stats_only);
            }
            Commands::Serve(_) => panic!("expected ndvi"),
        }
    }
}
