use serde::{Deserialize, Serialize};

pub const SPOT_LABEL: &str = "Spot";

/// One point on the VIX futures curve: "Spot" followed by "M1".."M7".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FuturesPoint {
    pub month: String,
    pub price: f64,
}

impl FuturesPoint {
    pub fn spot(price: f64) -> Self {
        Self {
            month: SPOT_LABEL.to_string(),
            price,
        }
    }

    /// `M{n}` where `n` counts from 1.
    pub fn contract(n: usize, price: f64) -> Self {
        Self {
            month: format!("M{}", n),
            price,
        }
    }

    pub fn is_spot(&self) -> bool {
        self.month == SPOT_LABEL
    }
}
