use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

use crate::{
    data::FetchError,
    domain::{BinWidth, DataSource, TimeRange},
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, Display)]
pub(crate) enum View {
    #[default]
    Distribution,
    Correlation,
    Futures,
}

/// What a view should be showing right now.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum ViewStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready,
    /// The fetch worked but nothing usable came back.
    Empty,
    Failed(FetchError),
}

impl ViewStatus {
    pub(crate) fn from_error(err: FetchError) -> Self {
        if err.is_empty_series() {
            Self::Empty
        } else {
            Self::Failed(err)
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Remembered across sessions. Market data is never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub(crate) struct Preferences {
    pub(crate) view: View,
    pub(crate) source: DataSource,
    pub(crate) bin_width: BinWidth,
    pub(crate) time_range: TimeRange,
}
