use serde::{Deserialize, Serialize};

use stockroom_core::CategoryId;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub associated_product_count: u32,
}

impl Category {
    pub fn increment_associated_product_count(&mut self) {
        self.associated_product_count += 1;
    }

    /// No-op when the counter is already zero.
    pub fn decrement_associated_product_count(&mut self) {
        self.associated_product_count = self.associated_product_count.saturating_sub(1);
    }
}
