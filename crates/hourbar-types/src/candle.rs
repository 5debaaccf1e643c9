//! Open/high/low/close candle.

use serde::{Deserialize, Serialize};

/// Open/high/low/close summary of one hour bucket, in integer price units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candle {
    /// Price of the first trade in the bucket.
    pub open: i64,
    /// Highest traded price.
    pub high: i64,
    /// Lowest traded price.
    pub low: i64,
    /// Price of the last trade in the bucket.
    pub close: i64,
}

impl Candle {
    /// Creates a candle from explicit prices.
    #[must_use]
    pub const fn new(open: i64, high: i64, low: i64, close: i64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Creates the candle for a bucket's first trade.
    #[must_use]
    pub const fn from_price(price: i64) -> Self {
        Self::new(price, price, price, price)
    }

    /// Folds the next trade of the bucket into the candle.
    pub const fn update(&mut self, price: i64) {
        if price > self.high {
            self.high = price;
        }
        if price < self.low {
            self.low = price;
        }
        self.close = price;
    }

}
