use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::DepositId;

/// A deposit (warehouse) holding product stock.
///
/// `product_count` counts the distinct products with a stock row in this
/// deposit. `associated_at` is set on create and refreshed on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: DepositId,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub product_count: u32,
    pub associated_at: DateTime<Utc>,
}

impl Deposit {
    pub fn increment_product_count(&mut self) {
        self.product_count += 1;
    }

    /// No-op when the counter is already zero.
    pub fn decrement_product_count(&mut self) {
        self.product_count = self.product_count.saturating_sub(1);
    }
}
