mod root;
mod state;
mod views;

pub(crate) use state::{Preferences, View, ViewStatus};
pub(crate) use views::{
    CorrelationView, DashboardView, DistributionView, FetchContext, FuturesView,
};

pub use root::App;
