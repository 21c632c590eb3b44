//! Store lifecycle notifications.
//!
//! Stores raise a [`StoreEvent`] after each successful operation and hand it,
//! together with the store and the affected record, to every matching observer
//! registered in their [`Observers`] list.

pub mod event;
pub mod observers;

pub use event::StoreEvent;
pub use observers::{ObserverId, Observers};
