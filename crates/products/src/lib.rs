//! Products record store.
//!
//! In-memory product list with validated CRUD, synchronous notifications and
//! bulk loading from `id/name/quantity/price` flat files.

pub mod list;
pub mod product;

pub use list::{ProductList, ProductPatch};
pub use product::Product;
