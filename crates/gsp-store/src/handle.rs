use crate::tables::Tables;
use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

/// A checked-out, exclusively-owned reference to one row.
///
/// Acquiring a handle removes the row from the table for the handle's
/// lifetime, enforcing the "exclusively own the right to mutate" rule —
/// a second checkout of the same key panics rather than silently
/// aliasing. Dropping the handle writes the row back, since the row
/// was physically removed on checkout and has nowhere else to live;
/// `discard()` is the explicit opt-out for callers deleting the row
/// outright. `dirty` is tracked for callers that want to short-circuit
/// expensive change-detection elsewhere, not to gate the write-back
/// itself.
///
/// Rust has destructors, so the write-back happens in `Drop` directly
/// rather than through an explicit `commit()`/`discard()` API.
pub struct Handle<T> {
    pub(crate) key: (&'static str, u64),
    pub(crate) value: Option<T>,
    pub(crate) dirty: bool,
    pub(crate) tables: Rc<RefCell<Tables>>,
    pub(crate) writeback: fn(&mut Tables, (&'static str, u64), T),
}

impl<T> Handle<T> {
    /// Explicitly marks the handle dirty even if the caller only read
    /// through `Deref`. Rarely needed — `DerefMut` already marks dirty —
    /// but useful when a caller mutates through interior mutability.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Drops the handle without writing back, even if dirty. Used when
    /// a row is being deleted outright (kill processing, building
    /// destruction) rather than updated.
    pub fn discard(mut self) {
        self.dirty = false;
        let mut tables = self.tables.borrow_mut();
        tables.release(self.key);
        self.value = None;
    }
}

impl<T> Deref for Handle<T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.value.as_ref().expect("handle value present until drop")
    }
}

impl<T> DerefMut for Handle<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.dirty = true;
        self.value.as_mut().expect("handle value present until drop")
    }
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        let mut tables = self.tables.borrow_mut();
        tables.release(self.key);
        // Checkout physically removed the row from its table, so the
        // ordinary path always writes it back — `dirty` only decides
        // whether the row changed, not whether it still exists.
        // `discard()` is the one legitimate way to drop a row for good;
        // it already took `value` and cleared `dirty` before this runs.
        if let Some(value) = self.value.take() {
            (self.writeback)(&mut tables, self.key, value);
        }
    }
}
