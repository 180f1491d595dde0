#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the analyze binary)
pub use app::App;
pub use config::PERSISTENCE;
pub use domain::{BinWidth, DailyPoint, DataSource, DataSourceConfig};

// CLI argument parsing
use {chrono::NaiveDate, clap::Parser};

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Where VIX history comes from (S&P 500 and futures are always read from Yahoo)
    #[arg(long, value_enum)]
    pub source: Option<DataSource>,

    /// Read every series from a proxy instead, e.g. http://localhost:3000/api
    #[arg(long)]
    pub proxy_url: Option<String>,

    /// First day of history to request (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of history to request (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl Cli {
    /// Fetch settings for this session; `fallback` is used when no `--source` was given.
    pub fn data_source_config(&self, fallback: DataSource) -> DataSourceConfig {
        let mut config = DataSourceConfig::new(self.source.unwrap_or(fallback));
        config.proxy_base_url = self.proxy_url.clone();
        if let Some(start) = self.start {
            config.start_date = start;
        }
        config.end_date = self.end;
        config
    }
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
