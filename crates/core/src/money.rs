//! Monetary values: a currency code plus a decimal amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A (currency, amount) pair, as carried on product purchase/sale prices.
///
/// Compared by value. The inventory core treats prices as opaque; no
/// arithmetic or currency conversion is exposed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub amount: Decimal,
}

impl Money {
    pub fn new(currency: impl Into<String>, amount: Decimal) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }
}
