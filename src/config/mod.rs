//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod analysis;
mod debug;
mod persistence;
mod provider;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, HistogramConfig, RangeSelectorConfig};
pub use debug::DF;
pub use persistence::PERSISTENCE;
pub use plot::PLOT_CONFIG;
pub use provider::{PROVIDER, ProviderConfig};
