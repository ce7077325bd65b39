use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::BrandId;

/// A product brand.
///
/// `associated_product_count` is a denormalized counter kept equal to the
/// number of products referencing this brand; it is mutated only through the
/// increment/decrement helpers below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub description: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub associated_product_count: u32,
}

impl Brand {
    pub fn increment_associated_product_count(&mut self) {
        self.associated_product_count += 1;
    }

    /// No-op when the counter is already zero.
    pub fn decrement_associated_product_count(&mut self) {
        self.associated_product_count = self.associated_product_count.saturating_sub(1);
    }
}
