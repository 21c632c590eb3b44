//! Synchronous observer registry.
//!
//! Unlike a bus there is no queue and no transport: `notify` calls each
//! matching handler in place, on the caller's thread, in registration order.

use tracing::trace;

use crate::event::StoreEvent;

type Handler<S, T> = Box<dyn Fn(StoreEvent, &S, &T)>;

/// Handle returned by `subscribe*`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Entry<S, T> {
    id: ObserverId,
    /// `None` listens to every kind.
    kind: Option<StoreEvent>,
    handler: Handler<S, T>,
}

/// Observers of a store `S` holding records `T`.
pub struct Observers<S, T> {
    entries: Vec<Entry<S, T>>,
    next_id: u64,
}

impl<S: 'static, T: 'static> Observers<S, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one kind of event.
    pub fn subscribe<F>(&mut self, kind: StoreEvent, handler: F) -> ObserverId
    where
        F: Fn(&S, &T) + 'static,
    {
        self.push(
            Some(kind),
            Box::new(move |_: StoreEvent, store: &S, record: &T| handler(store, record)),
        )
    }

    /// Listen to every kind; the handler is told which one fired.
    pub fn subscribe_all<F>(&mut self, handler: F) -> ObserverId
    where
        F: Fn(StoreEvent, &S, &T) + 'static,
    {
        self.push(None, Box::new(handler))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&self, kind: StoreEvent, store: &S, record: &T) {
        trace!(%kind, observers = self.entries.len(), "notifying observers");
        for entry in &self.entries {
            if entry.kind.is_none_or(|k| k == kind) {
                (entry.handler)(kind, store, record);
            }
        }
    }

    fn push(&mut self, kind: Option<StoreEvent>, handler: Handler<S, T>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, kind, handler });
        id
    }
}

impl<S, T> Default for Observers<S, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<S, T> core::fmt::Debug for Observers<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}
