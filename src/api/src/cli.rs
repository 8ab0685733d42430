//! Command line flags for climate-api.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(version, about = "Climate API: read-only JSON over the Hawaii climate store", long_about = None)]
pub struct Cli {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the SQLite store
    #[arg(short, long, value_name = "FILE")]
    pub database: Option<String>,

    /// Verbose request and query logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Default log filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "climate_api=debug,tower_http=debug"
        } else {
            "climate_api=info,tower_http=info"
        }
    }
}
