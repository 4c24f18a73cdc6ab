//! probing-hashmap: a single-threaded table from string keys to borrowed
//! values, built on open addressing with linear probing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the whole container small enough that each invariant can be
//!   read off one function.
//! - Layers:
//!   - `djb2`: string -> u64 digest, and digest -> slot index by masking.
//!   - `slots`: the flat arena of tagged slots (`None` = empty), fallible
//!     arena allocation, probing, and the insertion primitive shared by
//!     live inserts and resize migration.
//!   - `ProbingHashTable<'v, V>`: public API; owns the arena and the length
//!     counter, applies the growth policy on `set`.
//!
//! Constraints
//! - Capacity is always a power of two so `digest & (capacity - 1)` equals
//!   `digest % capacity`.
//! - Load factor never exceeds 1/2 after a successful `set`; this is what
//!   guarantees every probe sequence reaches an empty slot.
//! - No deletion, hence no tombstones.
//!
//! Ownership
//! - Each occupied slot owns its key as a `Box<str>`, copied on first
//!   insert. Updates replace only the value. Resizing moves the boxes into
//!   the new arena, so a key is allocated once and released once.
//! - Values are `&'v V`. The table never reads through, clones, or drops
//!   them; the borrow checker ties their lifetime to the table's.
//!
//! Failure semantics
//! - Arena and key allocations go through `try_reserve_exact`, so
//!   allocation failure and capacity overflow surface as `TableError`
//!   instead of aborting. `set` copies a new key before deciding to grow,
//!   so a failed `set` leaves capacity, length and entries untouched.
//!
//! Iteration
//! - `Iter` is a cursor over slot indices holding a shared borrow of the
//!   table. Resizing needs `&mut`, so an outstanding iterator can never
//!   observe a freed arena.
//!
//! Notes and non-goals
//! - No removal, no shrinking, no pluggable hasher.
//! - `&mut self` on `set` is the only concurrency discipline; callers
//!   sharing a table across threads must bring their own lock.

mod djb2;
mod error;
mod probing_hash_table;
mod probing_hash_table_proptest;
mod slots;

// Public surface
pub use djb2::djb2;
pub use error::TableError;
pub use probing_hash_table::{Iter, ProbingHashTable, GROWTH_FACTOR, INITIAL_CAPACITY};
