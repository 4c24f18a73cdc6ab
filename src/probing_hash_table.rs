//! ProbingHashTable: string keys to borrowed values, open addressing with
//! linear probing and grow-by-doubling.

use crate::error::TableError;
use crate::slots::{alloc_slots, duplicate_key, insert_slot, lookup, probe, Slot};
use core::fmt;
use core::iter::FusedIterator;

/// Capacity of a freshly created table.
pub const INITIAL_CAPACITY: usize = 16;

/// Multiplier applied to the capacity on every resize.
pub const GROWTH_FACTOR: usize = 2;

/// Associative table from owned string keys to caller-owned values.
///
/// The table copies each key on first insert and releases the copies when
/// dropped. Values are stored as `&'v V` and are never dereferenced or
/// dropped by the table. Use `V = dyn Any` (or another trait object) for
/// heterogeneous payloads.
///
/// Invariants:
/// - `capacity()` is a power of two, starting at [`INITIAL_CAPACITY`].
/// - After every successful `set`, `len() * 2 <= capacity()`.
pub struct ProbingHashTable<'v, V: ?Sized> {
    slots: Vec<Slot<'v, V>>,
    len: usize,
}

impl<'v, V: ?Sized> ProbingHashTable<'v, V> {
    /// Creates an empty table, aborting on allocation failure like the std
    /// collections do.
    pub fn new() -> Self {
        Self {
            slots: core::iter::repeat_with(|| None).take(INITIAL_CAPACITY).collect(),
            len: 0,
        }
    }

    /// Creates an empty table, reporting allocation failure.
    pub fn try_new() -> Result<Self, TableError> {
        Ok(Self {
            slots: alloc_slots(INITIAL_CAPACITY)?,
            len: 0,
        })
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the arena.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, key: &str) -> Option<&'v V> {
        lookup(&self.slots, key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or updates `key -> value` and returns the key as stored.
    ///
    /// Updating an existing key replaces only the value and never resizes.
    /// A new key is copied first; only then is the table doubled if it is
    /// half full. A failed call leaves the table unchanged.
    pub fn set(&mut self, key: &str, value: &'v V) -> Result<&str, TableError> {
        if self.slots[probe(&self.slots, key)].is_some() {
            return insert_slot(&mut self.slots, key, value, Some(&mut self.len));
        }

        let key = duplicate_key(key)?;
        if self.len >= self.capacity() / 2 {
            self.grow()?;
        }
        match insert_slot(&mut self.slots, key, value, Some(&mut self.len)) {
            Ok(stored) => Ok(stored),
            Err(never) => match never {},
        }
    }

    /// Like [`set`](Self::set), but accepts a nullable value.
    ///
    /// `None` is rejected with [`TableError::NullValue`] before any mutation.
    pub fn set_option(&mut self, key: &str, value: Option<&'v V>) -> Result<&str, TableError> {
        let value = value.ok_or(TableError::NullValue)?;
        self.set(key, value)
    }

    /// Iterates occupied slots in arena order.
    ///
    /// The iterator borrows the table, so `set` cannot run (and resize the
    /// arena) while it is alive.
    pub fn iter(&self) -> Iter<'_, 'v, V> {
        Iter {
            table: self,
            index: 0,
            remaining: self.len,
        }
    }

    fn grow(&mut self) -> Result<(), TableError> {
        self.resize_to(next_capacity(self.capacity())?)
    }

    // Re-homes every entry into a fresh arena of `new_capacity` slots. The
    // new arena is allocated before the old one is touched.
    fn resize_to(&mut self, new_capacity: usize) -> Result<(), TableError> {
        debug_assert!(new_capacity.is_power_of_two() && new_capacity > self.len);
        let mut slots = match alloc_slots(new_capacity) {
            Ok(slots) => slots,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    capacity = self.capacity(),
                    new_capacity,
                    error = %e,
                    "resize allocation failed"
                );
                return Err(e);
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            capacity = self.capacity(),
            new_capacity,
            len = self.len,
            "resizing probing table"
        );

        for entry in core::mem::take(&mut self.slots).into_iter().flatten() {
            match insert_slot(&mut slots, entry.key, entry.value, None) {
                Ok(_) => {}
                Err(never) => match never {},
            }
        }
        self.slots = slots;
        Ok(())
    }
}

fn next_capacity(capacity: usize) -> Result<usize, TableError> {
    capacity
        .checked_mul(GROWTH_FACTOR)
        .ok_or(TableError::CapacityOverflow { capacity })
}

impl<V: ?Sized> Default for ProbingHashTable<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized + fmt::Debug> fmt::Debug for ProbingHashTable<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Forward cursor over a table's occupied slots.
pub struct Iter<'t, 'v, V: ?Sized> {
    table: &'t ProbingHashTable<'v, V>,
    index: usize,
    remaining: usize,
}

impl<'t, 'v, V: ?Sized> Iterator for Iter<'t, 'v, V> {
    type Item = (&'t str, &'v V);

    fn next(&mut self) -> Option<Self::Item> {
        let slots: &'t [Slot<'v, V>] = &self.table.slots;
        while let Some(slot) = slots.get(self.index) {
            self.index += 1;
            if let Some(entry) = slot {
                self.remaining -= 1;
                return Some((&*entry.key, entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V: ?Sized> ExactSizeIterator for Iter<'_, '_, V> {}

impl<V: ?Sized> FusedIterator for Iter<'_, '_, V> {}

impl<'t, 'v, V: ?Sized> IntoIterator for &'t ProbingHashTable<'v, V> {
    type Item = (&'t str, &'v V);
    type IntoIter = Iter<'t, 'v, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
