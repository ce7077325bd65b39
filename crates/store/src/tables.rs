//! Entity tables and predicate lookups.

use std::collections::BTreeMap;

use stockroom_core::{BrandId, CategoryId, DepositId, MovementId, ProductId, StockId, UserId};
use stockroom_domain::{Brand, Category, Deposit, Product, Stock, StockMovement, User};

/// One entity table: rows keyed by raw id (insertion order preserved for
/// listings), plus the id sequence for this table.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    /// Allocate the next id in this table's sequence (1-based).
    pub fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn insert(&mut self, id: i64, row: T) {
        self.rows.insert(id, row);
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All entity tables. Services receive this through a unit-of-work guard and
/// never hold references across operations.
#[derive(Debug, Default)]
pub struct Tables {
    pub brands: Table<Brand>,
    pub categories: Table<Category>,
    pub deposits: Table<Deposit>,
    pub products: Table<Product>,
    pub stock: Table<Stock>,
    pub movements: Table<StockMovement>,
    pub users: Table<User>,
}

impl Tables {
    // Typed primary-key accessors.

    pub fn brand(&self, id: BrandId) -> Option<&Brand> {
        self.brands.get(id.as_i64())
    }

    pub fn brand_mut(&mut self, id: BrandId) -> Option<&mut Brand> {
        self.brands.get_mut(id.as_i64())
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.as_i64())
    }

    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.get_mut(id.as_i64())
    }

    pub fn deposit(&self, id: DepositId) -> Option<&Deposit> {
        self.deposits.get(id.as_i64())
    }

    pub fn deposit_mut(&mut self, id: DepositId) -> Option<&mut Deposit> {
        self.deposits.get_mut(id.as_i64())
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(id.as_i64())
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(id.as_i64())
    }

    pub fn stock_row(&self, id: StockId) -> Option<&Stock> {
        self.stock.get(id.as_i64())
    }

    pub fn movement(&self, id: MovementId) -> Option<&StockMovement> {
        self.movements.get(id.as_i64())
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(id.as_i64())
    }

    // Name/email lookups, case-insensitive.

    pub fn brand_by_name_ci(&self, name: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn category_by_name_ci(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn deposit_by_name_ci(&self, name: &str) -> Option<&Deposit> {
        self.deposits
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn product_by_name_ci(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn user_by_email_ci(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    // Existence checks keyed by foreign id.

    pub fn any_product_with_brand(&self, id: BrandId) -> bool {
        self.products.iter().any(|p| p.brand_id == id)
    }

    pub fn any_product_with_category(&self, id: CategoryId) -> bool {
        self.products.iter().any(|p| p.category_id == id)
    }

    // Stock ledger lookups. (product, deposit) is the ledger's logical key.

    pub fn stock_for(&self, product_id: ProductId, deposit_id: DepositId) -> Option<&Stock> {
        self.stock
            .iter()
            .find(|s| s.product_id == product_id && s.deposit_id == deposit_id)
    }

    pub fn stock_exists(&self, product_id: ProductId, deposit_id: DepositId) -> bool {
        self.stock_for(product_id, deposit_id).is_some()
    }

    pub fn stock_rows_for_product(&self, product_id: ProductId) -> impl Iterator<Item = &Stock> {
        self.stock.iter().filter(move |s| s.product_id == product_id)
    }

    pub fn stock_rows_for_deposit(&self, deposit_id: DepositId) -> impl Iterator<Item = &Stock> {
        self.stock.iter().filter(move |s| s.deposit_id == deposit_id)
    }

    /// The deposit set of a product, derived from the ledger (never stored).
    pub fn deposits_for_product(&self, product_id: ProductId) -> Vec<DepositId> {
        self.stock_rows_for_product(product_id)
            .map(|s| s.deposit_id)
            .collect()
    }
}
