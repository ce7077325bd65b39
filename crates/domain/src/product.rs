use serde::{Deserialize, Serialize};

use stockroom_core::{BrandId, CategoryId, Money, ProductId};

/// A catalog product.
///
/// Each product references exactly one brand and one category.
/// `deposits_count` is a denormalized counter over the stock ledger: the
/// number of deposits this product currently has a stock row in. The deposit
/// *set* itself is derived from the ledger on read and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub brand_id: BrandId,
    pub category_id: CategoryId,
    pub deposits_count: u32,
}

impl Product {
    pub fn increment_deposits_count(&mut self) {
        self.deposits_count += 1;
    }

    /// No-op when the counter is already zero.
    pub fn decrement_deposits_count(&mut self) {
        self.deposits_count = self.deposits_count.saturating_sub(1);
    }
}
