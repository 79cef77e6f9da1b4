//! Single-writer LRU cache with byte accounting.

use std::collections::HashMap;
use std::fmt;

use hoard_core::ByteSize;
use smol_str::SmolStr;
use tracing::trace;

use crate::builder::LruCacheBuilder;
use crate::metrics;

/// Callback invoked with every entry removed by [`LruCache::remove_oldest`].
///
/// It runs synchronously on the thread that triggered the eviction, while
/// the cache is mutably borrowed, so it cannot re-enter the cache.
pub type EvictionCallback<V> = Box<dyn FnMut(&str, V) + Send>;

struct Node<V> {
    key: SmolStr,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A least-recently-used cache bounded by the bytes its entries occupy.
///
/// Entries are ordered by recency: every [`get`](Self::get) hit and every
/// [`add`](Self::add) moves the touched entry to the front. When the sum of
/// `key.len() + value.byte_size()` over all entries exceeds `max_bytes`,
/// entries are evicted from the back until it fits again, possibly
/// including the entry that was just added.
///
/// Recency is kept in a doubly linked list whose nodes live in a slab,
/// indexed by key, so lookup, promotion and eviction are all O(1).
///
/// `LruCache` is not internally synchronized: even `get` mutates recency
/// order and takes `&mut self`. Use [`SyncLruCache`](crate::SyncLruCache)
/// to share one between threads.
///
/// # Example
///
/// ```
/// use hoard_lru::LruCache;
///
/// let mut cache = LruCache::new(0);
/// cache.add("key1", String::from("1234"));
///
/// assert_eq!(cache.get("key1").map(String::as_str), Some("1234"));
/// assert!(cache.get("key2").is_none());
/// assert_eq!(cache.used_bytes(), 8);
/// ```
pub struct LruCache<V> {
    max_bytes: i64,
    used_bytes: usize,
    index: HashMap<SmolStr, usize>,
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    on_evicted: Option<EvictionCallback<V>>,
    label: SmolStr,
}

impl<V: ByteSize> LruCache<V> {
    /// Creates a cache holding at most `max_bytes` bytes.
    ///
    /// A non-positive `max_bytes` means the cache never evicts on its own.
    pub fn new(max_bytes: i64) -> Self {
        Self::builder().max_bytes(max_bytes).build()
    }

    /// Creates a cache without a byte budget.
    pub fn unbounded() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder for `LruCache`.
    pub fn builder() -> LruCacheBuilder<V> {
        LruCacheBuilder::new()
    }

    pub(crate) fn from_parts(
        max_bytes: i64,
        on_evicted: Option<EvictionCallback<V>>,
        label: SmolStr,
    ) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            on_evicted,
            label,
        }
    }

    /// Looks up `key` and marks it as most recently used.
    ///
    /// A miss has no side effects.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_front(idx);
        self.slots[idx].as_ref().map(|node| &node.value)
    }

    /// Looks up `key` without touching recency order.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.slots[idx].as_ref().map(|node| &node.value)
    }

    /// Returns `true` if `key` is cached. Does not touch recency order.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or replaces the value for `key` and marks it most recently used.
    ///
    /// Afterwards, while a byte budget is set and exceeded, the least
    /// recently used entry is evicted.
    pub fn add(&mut self, key: impl Into<SmolStr>, value: V) {
        let key = key.into();
        let new_size = value.byte_size();

        if let Some(&idx) = self.index.get(&key) {
            if let Some(node) = self.slots[idx].as_mut() {
                let old_size = node.value.byte_size();
                node.value = value;
                self.used_bytes = self.used_bytes - old_size + new_size;
            }
            self.move_to_front(idx);
        } else {
            self.used_bytes += key.len() + new_size;
            let idx = self.alloc(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.push_front(idx);
            self.index.insert(key, idx);
        }

        // unlink every victim before any callback runs, so a panicking
        // callback cannot leave the cache over budget
        let mut evicted = Vec::new();
        while self.over_budget() {
            match self.evict_oldest() {
                Some(entry) => evicted.push(entry),
                None => break,
            }
        }

        metrics::record_capacity(&self.label, self.len() as u64, self.used_bytes as u64);

        for (key, value) in evicted {
            self.notify_evicted(&key, value);
        }
    }

    /// Removes the least recently used entry, if any.
    ///
    /// The eviction callback, when configured, receives the removed key and
    /// value before this method returns.
    pub fn remove_oldest(&mut self) {
        let Some((key, value)) = self.evict_oldest() else {
            return;
        };
        metrics::record_capacity(&self.label, self.len() as u64, self.used_bytes as u64);
        self.notify_evicted(&key, value);
    }

    /// Unlinks the tail entry and settles its accounting.
    fn evict_oldest(&mut self) -> Option<(SmolStr, V)> {
        let idx = self.tail?;
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.index.remove(&node.key);
        self.used_bytes -= node.key.len() + node.value.byte_size();

        trace!(cache = %self.label, key = %node.key, "evicted cache entry");
        metrics::record_eviction(&self.label);
        Some((node.key, node.value))
    }

    fn notify_evicted(&mut self, key: &str, value: V) {
        if let Some(callback) = self.on_evicted.as_mut() {
            callback(key, value);
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the bytes currently accounted for live entries.
    #[inline]
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Returns the configured byte budget (non-positive means unlimited).
    #[inline]
    pub fn max_bytes(&self) -> i64 {
        self.max_bytes
    }

    /// Returns the label used for logs and metrics.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Iterates over keys from most to least recently used.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys {
            cache: self,
            cursor: self.head,
        }
    }

    fn over_budget(&self) -> bool {
        self.max_bytes > 0 && self.used_bytes as u64 > self.max_bytes as u64
    }

    fn alloc(&mut self, node: Node<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.slots[head].as_mut() {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };
        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("label", &self.label)
            .field("len", &self.index.len())
            .field("used_bytes", &self.used_bytes)
            .field("max_bytes", &self.max_bytes)
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}

/// Iterator over cache keys, most recently used first.
///
/// Created by [`LruCache::keys`].
pub struct Keys<'a, V> {
    cache: &'a LruCache<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.cache.slots[idx].as_ref()?;
        self.cursor = node.next;
        Some(node.key.as_str())
    }
}
