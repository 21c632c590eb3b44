use serde::{Deserialize, Serialize};

use recordkeep_core::Record;

const ID_WIDTH: usize = 8;
const NAME_WIDTH: usize = 20;
const QTY_WIDTH: usize = 8;
const PRICE_WIDTH: usize = 8;
const TOTAL_WIDTH: usize = 10;

/// A stocked product.
///
/// Plain data: nothing here validates. `Product::default()` is always
/// constructible; [`crate::ProductList`] decides whether it is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: Option<String>,
    pub quantity: i32,
    pub price: f64,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, quantity: i32, price: f64) -> Self {
        Self {
            id,
            name: Some(name.into()),
            quantity,
            price,
        }
    }

    /// `price * quantity`, computed on every call.
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl Record for Product {
    fn id(&self) -> i32 {
        self.id
    }

    fn header() -> String {
        format!(
            "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:>QTY_WIDTH$} {:>PRICE_WIDTH$} {:>TOTAL_WIDTH$}",
            "ID", "Name", "Quantity", "Price", "Total"
        )
    }

    fn info(&self) -> String {
        format!(
            "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:>QTY_WIDTH$} {:>PRICE_WIDTH$} {:>TOTAL_WIDTH$}",
            self.id,
            self.name.as_deref().unwrap_or_default(),
            self.quantity,
            format!("{:.2}$", self.price),
            format!("{:.2}$", self.total()),
        )
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.info())
    }
}
