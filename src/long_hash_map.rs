//! LongHashMap: separately chained table keyed by `i64`, chains stored in a slot arena.

use crate::config::{ConfigError, LongMapConfig};
use core::fmt;
use core::mem;
use core::ops::Index;
use slotmap::{DefaultKey, SlotMap};

/// 2^64 divided by the golden ratio. Multiplying by it scatters consecutive
/// and strided keys across the high bits, which `bucket_index` keeps.
const FIBONACCI_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Map a key to a bucket of a table with `64 - shift` index bits.
///
/// The key is reinterpreted as two's-complement `u64`, so negative keys
/// land in `[0, capacity)` like any other.
#[inline]
fn bucket_index(key: i64, shift: u32) -> usize {
    ((key as u64).wrapping_mul(FIBONACCI_MULTIPLIER) >> shift) as usize
}

/// Shift that keeps `log2(capacity)` high bits of a 64-bit hash.
#[inline]
fn shift_for(capacity: usize) -> u32 {
    debug_assert!(capacity.is_power_of_two() && capacity >= 2);
    u64::BITS - capacity.trailing_zeros()
}

#[derive(Debug, Clone)]
struct Node<V> {
    key: i64,
    value: V,
    next: Option<DefaultKey>,
}

/// Hash map from `i64` keys to `V`, resolving collisions by chaining.
///
/// Every bucket holds the head of a singly linked chain; the links are
/// arena keys into a `SlotMap`, so removing an entry frees its slot for
/// reuse and resizing relinks existing nodes without reallocating them.
///
/// The table grows by the configured growth factor whenever an insert
/// leaves more than `capacity * load_factor` entries. It never shrinks:
/// neither `remove` nor `clear` gives buckets back.
///
/// `keys()` and `values()` return snapshots in bucket order, which is
/// unrelated to insertion order and changes when the table grows. Two
/// snapshots taken without a mutation in between line up index for index.
///
/// There is no internal synchronization. Mutation goes through `&mut self`,
/// so sharing a map across threads needs an external lock; the map is
/// `Send`/`Sync` exactly when `V` is.
#[derive(Clone)]
pub struct LongHashMap<V> {
    buckets: Vec<Option<DefaultKey>>,
    nodes: SlotMap<DefaultKey, Node<V>>,
    shift: u32,
    threshold: usize,
    config: LongMapConfig,
}

impl<V> LongHashMap<V> {
    /// Empty map with `DEFAULT_CAPACITY` buckets and `DEFAULT_LOAD_FACTOR`.
    pub fn new() -> Self {
        Self::from_valid_config(LongMapConfig::default())
    }

    /// Empty map whose table starts with `capacity` buckets, rounded up to a
    /// power of two (and to at least `MIN_CAPACITY`).
    pub fn with_capacity(capacity: usize) -> Self {
        let config = LongMapConfig::default().with_initial_capacity(capacity.max(1));
        Self::from_valid_config(config)
    }

    /// Validate `config` and allocate its table. A table that validates but
    /// cannot be allocated is reported as `ConfigError::CapacityOverflow`.
    pub fn with_config(config: LongMapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.table_capacity();
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(capacity)
            .map_err(|_| ConfigError::CapacityOverflow)?;
        buckets.resize(capacity, None);
        Ok(Self::from_parts(config, buckets))
    }

    fn from_valid_config(config: LongMapConfig) -> Self {
        let buckets = vec![None; config.table_capacity()];
        Self::from_parts(config, buckets)
    }

    fn from_parts(config: LongMapConfig, buckets: Vec<Option<DefaultKey>>) -> Self {
        let capacity = buckets.len();
        Self {
            buckets,
            nodes: SlotMap::with_key(),
            shift: shift_for(capacity),
            threshold: config.threshold_for(capacity),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of buckets in the table.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Current ratio of entries to buckets.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &LongMapConfig {
        &self.config
    }

    /// Bucket `key` maps to at the current capacity.
    pub fn bucket_of(&self, key: i64) -> usize {
        bucket_index(key, self.shift)
    }

    fn find_node(&self, key: i64) -> Option<DefaultKey> {
        let mut cur = self.buckets[self.bucket_of(key)];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    pub fn get(&self, key: i64) -> Option<&V> {
        self.find_node(key).map(|k| &self.nodes[k].value)
    }

    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let k = self.find_node(key)?;
        Some(&mut self.nodes[k].value)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.find_node(key).is_some()
    }

    /// Insert `value` under `key`, returning the value it replaced.
    ///
    /// A replaced value keeps its entry in place and leaves `len` unchanged.
    /// A new key is pushed onto the front of its chain and may trigger one
    /// resize before this returns.
    pub fn insert(&mut self, key: i64, value: V) -> Option<V> {
        if let Some(k) = self.find_node(key) {
            return Some(mem::replace(&mut self.nodes[k].value, value));
        }
        let b = self.bucket_of(key);
        let next = self.buckets[b];
        let k = self.nodes.insert(Node { key, value, next });
        self.buckets[b] = Some(k);
        if self.nodes.len() > self.threshold {
            self.grow();
        }
        None
    }

    /// Remove `key`, returning its value. The table keeps its capacity.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let b = self.bucket_of(key);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[b];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key == key {
                let next = node.next;
                match prev {
                    None => self.buckets[b] = next,
                    Some(p) => self.nodes[p].next = next,
                }
                return self.nodes.remove(k).map(|n| n.value);
            }
            prev = cur;
            cur = node.next;
        }
        None
    }

    /// Drop every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.fill(None);
    }

    /// Snapshot of all keys in bucket order.
    pub fn keys(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.walk().map(|(k, _)| k));
        out
    }

    /// Snapshot of all values, positioned like the keys from `keys()`.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.walk().map(|(_, v)| v.clone()));
        out
    }

    /// Linear scan for an entry whose value equals `value`.
    ///
    /// Only as meaningful as `V`'s `PartialEq`; values compared by identity
    /// or with a partial `eq` give the corresponding answer.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.walk().any(|(_, v)| v == value)
    }

    fn walk(&self) -> Walk<'_, V> {
        Walk {
            buckets: self.buckets.iter(),
            nodes: &self.nodes,
            cur: None,
        }
    }

    /// Relink every node into a table `growth_factor` times larger.
    fn grow(&mut self) {
        let Some(capacity) = self.config.grown_capacity(self.buckets.len()) else {
            // Table is at its ceiling; chains take the remaining load.
            self.threshold = usize::MAX;
            return;
        };
        let shift = shift_for(capacity);
        let old = mem::replace(&mut self.buckets, vec![None; capacity]);
        let mut moved = 0usize;
        for head in old {
            let mut cur = head;
            while let Some(k) = cur {
                let node = &mut self.nodes[k];
                cur = node.next;
                let b = bucket_index(node.key, shift);
                node.next = self.buckets[b];
                self.buckets[b] = Some(k);
                moved += 1;
            }
        }
        debug_assert_eq!(moved, self.nodes.len(), "resize lost or duplicated nodes");
        self.shift = shift;
        self.threshold = self.config.threshold_for(capacity);
    }

    /// Walk the whole structure and panic on any broken invariant.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        let capacity = self.buckets.len();
        assert!(capacity.is_power_of_two() && capacity >= crate::config::MIN_CAPACITY);
        assert_eq!(self.shift, shift_for(capacity));
        assert!(
            self.threshold == self.config.threshold_for(capacity) || self.threshold == usize::MAX,
            "threshold {} out of step with capacity {}",
            self.threshold,
            capacity
        );

        let mut seen = HashSet::with_capacity(self.nodes.len());
        for (b, head) in self.buckets.iter().enumerate() {
            let mut cur = *head;
            while let Some(k) = cur {
                let node = self.nodes.get(k).expect("chain link points at a live slot");
                assert_eq!(bucket_index(node.key, self.shift), b, "key {} off its home bucket", node.key);
                assert!(seen.insert(node.key), "key {} reachable twice", node.key);
                assert!(seen.len() <= self.nodes.len(), "cycle in bucket {b}");
                cur = node.next;
            }
        }
        assert_eq!(seen.len(), self.nodes.len(), "unreachable nodes in arena");
    }
}

impl<V> Default for LongHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket-order traversal backing the snapshots, `Debug` and equality.
struct Walk<'a, V> {
    buckets: core::slice::Iter<'a, Option<DefaultKey>>,
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Walk<'a, V> {
    type Item = (i64, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let node = &self.nodes[k];
                self.cur = node.next;
                return Some((node.key, &node.value));
            }
            self.cur = *self.buckets.next()?;
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for LongHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.walk()).finish()
    }
}

impl<V: PartialEq> PartialEq for LongHashMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.walk().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<V: Eq> Eq for LongHashMap<V> {}

impl<V> Index<i64> for LongHashMap<V> {
    type Output = V;

    /// Panics if `key` is not present.
    fn index(&self, key: i64) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key {key} not present in LongHashMap"),
        }
    }
}

impl<V> Extend<(i64, V)> for LongHashMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<V> FromIterator<(i64, V)> for LongHashMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}
