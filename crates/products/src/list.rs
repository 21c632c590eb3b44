//! Product store.

use std::path::Path;

use tracing::debug;

use recordkeep_core::validate::{
    self, is_non_blank, is_non_negative, is_non_negative_int, is_valid_id,
};
use recordkeep_core::{
    FlatFileFormat, IngestError, IngestReport, LineError, RecordError, RecordResult, ingest_file,
    Record, parse_field, require,
};
use recordkeep_events::{ObserverId, Observers, StoreEvent};

use crate::product::Product;

/// id, name, quantity, price.
const RECORD_FIELDS: usize = 4;

/// Partial update for [`ProductList::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Ordered in-memory product collection.
///
/// Records keep insertion order and ids may repeat; lookups by id act on the
/// first match.
#[derive(Debug, Default)]
pub struct ProductList {
    products: Vec<Product>,
    observers: Observers<ProductList, Product>,
    format: FlatFileFormat,
}

impl ProductList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose flat files separate the four fields with `delimiter`
    /// instead of `/`.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            format: FlatFileFormat {
                delimiter,
                fields: RECORD_FIELDS,
            },
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First product carrying `id`.
    pub fn get(&self, id: i32) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn subscribe<F>(&mut self, kind: StoreEvent, handler: F) -> ObserverId
    where
        F: Fn(&ProductList, &Product) + 'static,
    {
        self.observers.subscribe(kind, handler)
    }

    pub fn subscribe_all<F>(&mut self, handler: F) -> ObserverId
    where
        F: Fn(StoreEvent, &ProductList, &Product) + 'static,
    {
        self.observers.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Validate and append. Duplicate ids are accepted.
    pub fn create(&mut self, product: Option<Product>) -> bool {
        let Some(product) = product else {
            debug!("create rejected: no product given");
            return false;
        };

        if let Err(err) = Self::validate(&product) {
            debug!(id = product.id, %err, "create rejected");
            return false;
        }

        debug!(id = product.id, "product created");
        self.products.push(product);
        if let Some(created) = self.products.last() {
            self.observers.notify(StoreEvent::Created, self, created);
        }
        true
    }

    /// Shorthand for `create(Some(product))`.
    pub fn add(&mut self, product: Product) -> bool {
        self.create(Some(product))
    }

    /// Notify `Read` observers about `product`.
    ///
    /// Does not look anything up; the store only checks a product was given.
    pub fn read(&self, product: Option<&Product>) -> bool {
        let Some(product) = product else {
            return false;
        };
        self.observers.notify(StoreEvent::Read, self, product);
        true
    }

    /// Apply every present and valid field of `patch` to the first product
    /// with `id`.
    ///
    /// Once a product is found this always notifies `Updated` and returns
    /// `true`, even when the patch changed nothing.
    pub fn update(&mut self, id: i32, patch: ProductPatch) -> bool {
        let index = match self.locate(id) {
            Ok(index) => index,
            Err(err) => {
                debug!(%err, "update rejected");
                return false;
            }
        };

        let product = &mut self.products[index];
        if let Some(name) = patch.name {
            if is_non_blank(Some(name.as_str())) {
                product.name = Some(name);
            } else {
                debug!(id, "ignoring blank name");
            }
        }
        if let Some(quantity) = patch.quantity {
            if is_non_negative_int(quantity) {
                product.quantity = quantity;
            } else {
                debug!(id, quantity, "ignoring invalid quantity");
            }
        }
        if let Some(price) = patch.price {
            if is_non_negative(price) {
                product.price = price;
            } else {
                debug!(id, price, "ignoring invalid price");
            }
        }

        let product = &self.products[index];
        self.observers.notify(StoreEvent::Updated, self, product);
        true
    }

    /// Remove the first product with `id`.
    pub fn delete(&mut self, id: i32) -> bool {
        let index = match self.locate(id) {
            Ok(index) => index,
            Err(err) => {
                debug!(%err, "delete rejected");
                return false;
            }
        };

        let removed = self.products.remove(index);
        debug!(id, "product deleted");
        self.observers.notify(StoreEvent::Deleted, self, &removed);
        true
    }

    /// Load products from a flat file, returning `false` only when the file
    /// does not exist.
    pub fn initialize(&mut self, path: impl AsRef<Path>) -> bool {
        self.ingest(path).is_ok()
    }

    /// Load products from a flat file and report per-line outcomes.
    pub fn ingest(&mut self, path: impl AsRef<Path>) -> Result<IngestReport, IngestError> {
        let format = self.format;
        ingest_file(path, &format, |_, fields| self.ingest_line(fields))
    }

    // Field order: id, quantity, price. The name is taken as is and left to
    // `create`.
    fn ingest_line(&mut self, fields: &[&str]) -> Result<(), LineError> {
        let (raw_id, name, raw_qty, raw_price) = match fields {
            [id, name, qty, price] => (*id, *name, *qty, *price),
            _ => {
                return Err(LineError::MissingData {
                    expected: RECORD_FIELDS,
                    found: fields.len(),
                });
            }
        };

        let id: i32 = parse_field(raw_id, "id")?;
        require(is_valid_id(id), "id", raw_id)?;

        let quantity: i32 = parse_field(raw_qty, "quantity")?;
        require(is_non_negative_int(quantity), "quantity", raw_qty)?;

        let price: f64 = parse_field(raw_price, "price")?;
        require(is_non_negative(price), "price", raw_price)?;

        if self.create(Some(Product::new(id, name, quantity, price))) {
            Ok(())
        } else {
            Err(LineError::Rejected)
        }
    }

    fn locate(&self, id: i32) -> RecordResult<usize> {
        self.products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(RecordError::not_found(id))
    }

    fn validate(product: &Product) -> RecordResult<()> {
        validate::check_id(product.id)?;
        validate::check(is_non_blank(product.name.as_deref()), "name")?;
        validate::check(is_non_negative_int(product.quantity), "quantity")?;
        validate::check(is_non_negative(product.price), "price")?;
        Ok(())
    }
}
