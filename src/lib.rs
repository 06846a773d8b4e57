//! long-hashmap: a single-threaded hash map keyed by `i64`, with
//! separately chained buckets whose nodes live in a slot arena.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: O(1) expected insert/lookup/remove for any distribution of
//!   64-bit keys, including negative and widely strided ones.
//! - Layers:
//!   - `LongMapConfig`: initial capacity, load factor and growth factor,
//!     validated once at construction.
//!   - `LongHashMap<V>`: bucket table of chain heads plus a `SlotMap`
//!     arena of `(key, value, next)` nodes.
//!
//! Constraints
//! - Single-threaded: no internal locking. Mutation requires `&mut self`;
//!   share across threads only behind an external lock.
//! - Table length is always a power of two (at least `MIN_CAPACITY`).
//! - Keys are always present `i64`s. Values may be "empty" only through
//!   `V = Option<T>`, which keeps "stored `None`" distinct from "missing".
//!
//! Bucketing
//! - A key is reinterpreted as `u64`, multiplied by 2^64 / phi and the top
//!   `log2(capacity)` bits select the bucket. The index is non-negative
//!   for every key sign, and consecutive keys spread across buckets.
//!
//! Growth policy
//! - After an insert of a new key, if `len > capacity * load_factor` the
//!   table is multiplied by the growth factor and every node is relinked
//!   into its new bucket. Nodes are moved, not reallocated.
//! - Growth is one-directional: `remove` and `clear` never shrink the
//!   table. Once `MAX_CAPACITY` is reached chains absorb further load.
//!
//! Ordering
//! - `keys()`/`values()` are snapshots in bucket order. They agree index
//!   for index when no mutation happens between the two calls; nothing
//!   else about their order is promised.

mod config;
pub mod long_hash_map;
mod long_hash_map_proptest;

// Public surface
pub use config::{
    ConfigError, LongMapConfig, DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR, DEFAULT_LOAD_FACTOR,
    MAX_CAPACITY, MIN_CAPACITY, MIN_LOAD_FACTOR,
};
pub use long_hash_map::LongHashMap;
