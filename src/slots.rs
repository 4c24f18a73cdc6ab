//! Slot arena: a flat, power-of-two array of tagged slots probed linearly.
//!
//! The arena never holds tombstones. Each occupied slot exclusively owns its
//! key; values are borrowed from the caller and never dropped here.

use crate::djb2::{djb2, slot_index};
use crate::error::TableError;
use core::convert::Infallible;

/// Occupied slot payload.
#[derive(Debug)]
pub(crate) struct Entry<'v, V: ?Sized> {
    pub(crate) key: Box<str>,
    pub(crate) value: &'v V,
}

/// `None` is an empty slot, `Some` an occupied one.
pub(crate) type Slot<'v, V> = Option<Entry<'v, V>>;

/// Key handed to `insert_slot`.
///
/// A borrowed `&str` is copied into fresh storage if it takes a new slot,
/// which can fail. A `Box<str>` is already owned by the table and is moved
/// verbatim, so its `Error` is `Infallible`.
pub(crate) trait SlotKey {
    type Error;

    fn as_str(&self) -> &str;

    fn into_owned(self) -> Result<Box<str>, Self::Error>;
}

impl SlotKey for &str {
    type Error = TableError;

    fn as_str(&self) -> &str {
        self
    }

    fn into_owned(self) -> Result<Box<str>, TableError> {
        duplicate_key(self)
    }
}

impl SlotKey for Box<str> {
    type Error = Infallible;

    fn as_str(&self) -> &str {
        self
    }

    fn into_owned(self) -> Result<Box<str>, Infallible> {
        Ok(self)
    }
}

/// Allocates `capacity` empty slots, reporting allocation failure instead of
/// aborting.
pub(crate) fn alloc_slots<'v, V: ?Sized>(capacity: usize) -> Result<Vec<Slot<'v, V>>, TableError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

/// Copies `key` into storage owned by the table.
pub(crate) fn duplicate_key(key: &str) -> Result<Box<str>, TableError> {
    let mut owned = String::new();
    owned.try_reserve_exact(key.len())?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

/// Returns the index of the slot holding `key`, or of the first empty slot
/// on its probe sequence.
///
/// The arena must contain at least one empty slot or a slot holding `key`;
/// the load factor bound on the table guarantees this.
pub(crate) fn probe<V: ?Sized>(slots: &[Slot<'_, V>], key: &str) -> usize {
    let capacity = slots.len();
    let mut index = slot_index(djb2(key), capacity);
    let mut steps = 0usize;
    loop {
        match &slots[index] {
            None => return index,
            Some(entry) if *entry.key == *key => return index,
            Some(_) => {}
        }
        steps += 1;
        debug_assert!(steps < capacity, "probe wrapped a full arena");
        index = (index + 1) & (capacity - 1);
    }
}

/// Looks up the value stored under `key`.
pub(crate) fn lookup<'v, V: ?Sized>(slots: &[Slot<'v, V>], key: &str) -> Option<&'v V> {
    slots[probe(slots, key)].as_ref().map(|entry| entry.value)
}

/// Stores `key -> value`, shared by live inserts and resize migration.
///
/// A slot already holding `key` gets its value replaced; its key storage is
/// kept and `length` is left alone. Otherwise the first empty slot on the
/// probe sequence is filled and `length`, when given, is incremented.
/// Migration passes owned `Box<str>` keys with no counter, so nothing is
/// allocated or counted twice and the call cannot fail.
///
/// Returns the key as stored in the arena.
pub(crate) fn insert_slot<'s, 'v, V: ?Sized, K: SlotKey>(
    slots: &'s mut [Slot<'v, V>],
    key: K,
    value: &'v V,
    length: Option<&mut usize>,
) -> Result<&'s str, K::Error> {
    let index = probe(slots, key.as_str());
    let slot = &mut slots[index];
    let entry = match slot {
        Some(entry) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(key = &*entry.key, index, "updating value in place");
            entry.value = value;
            entry
        }
        None => {
            let key = key.into_owned()?;
            if let Some(length) = length {
                *length += 1;
            }
            slot.insert(Entry { key, value })
        }
    };
    Ok(&*entry.key)
}
