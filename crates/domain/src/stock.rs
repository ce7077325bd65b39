use serde::{Deserialize, Serialize};

use stockroom_core::{DepositId, ProductId, StockId};

/// One stock ledger row: the quantity of one product present in one deposit.
///
/// At most one row exists per (product, deposit) pair: the pair is the
/// ledger's logical primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: StockId,
    pub product_id: ProductId,
    pub deposit_id: DepositId,
    pub quantity: i64,
}
