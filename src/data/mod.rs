mod cboe;
mod error;
mod fetch_slot;
mod http;
mod provider;
mod proxy;
mod runner;
mod yahoo;

pub use {
    cboe::CboeProvider,
    error::FetchError,
    fetch_slot::{FetchSlot, FetchTicket},
    provider::{HistoryRequest, MarketDataProvider, SharedProvider, provider_for},
    proxy::ProxyProvider,
    runner::{MaybeSend, TaskRunner},
    yahoo::YahooProvider,
};

/// Turns a successful but empty fetch into [`FetchError::EmptySeries`].
pub fn require_points<T>(points: Vec<T>, what: &'static str) -> Result<Vec<T>, FetchError> {
    if points.is_empty() {
        return Err(FetchError::EmptySeries { what });
    }
    Ok(points)
}
