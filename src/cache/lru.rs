//! Recency List Module
//!
//! Implements the recency-ordered sequence of entries backing LRU eviction.
//!
//! Entries live in a vector-backed arena of slots linked into a doubly-linked
//! list. A [`Handle`] is the slot index, so the index map can point straight
//! at a node and relocate it in O(1) without aliasing pointers.

use crate::cache::CacheEntry;

/// Position of an entry inside a [`RecencyList`].
///
/// Only valid until the entry it was returned for is removed.
pub(crate) type Handle = usize;

#[derive(Debug)]
struct Node<K, V> {
    entry: CacheEntry<K, V>,
    prev: Option<Handle>,
    next: Option<Handle>,
}

#[derive(Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<Handle> },
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Front (head) = most recently used
/// - Back (tail) = least recently used
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    free_head: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty recency list.
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries before reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used and returns its handle.
    pub(crate) fn push_front(&mut self, entry: CacheEntry<K, V>) -> Handle {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };

        let handle = match self.free_head {
            Some(free) => {
                if let Slot::Vacant { next_free } = self.slots[free] {
                    self.free_head = next_free;
                }
                self.slots[free] = Slot::Occupied(node);
                free
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks the entry at `handle` as most recently used.
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);

        let old_head = self.head;
        {
            let node = self.node_mut(handle);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.node_mut(old_head).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    // == Remove ==
    /// Removes the entry at `handle` and returns it. The slot is recycled.
    pub(crate) fn remove(&mut self, handle: Handle) -> CacheEntry<K, V> {
        self.unlink(handle);

        let slot = std::mem::replace(
            &mut self.slots[handle],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(handle);
        self.len -= 1;

        match slot {
            Slot::Occupied(node) => node.entry,
            Slot::Vacant { .. } => unreachable!("removed a vacant recency slot"),
        }
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub(crate) fn pop_back(&mut self) -> Option<CacheEntry<K, V>> {
        self.tail.map(|tail| self.remove(tail))
    }

    // == Peek Back ==
    /// Returns the least recently used entry without removing it.
    #[cfg(test)]
    pub(crate) fn peek_back(&self) -> Option<&CacheEntry<K, V>> {
        self.tail.map(|tail| &self.node(tail).entry)
    }

    /// Returns the entry stored at `handle`.
    pub(crate) fn get(&self, handle: Handle) -> &CacheEntry<K, V> {
        &self.node(handle).entry
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry and releases all slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free_head = None;
        self.len = 0;
    }

    /// Iterates entries from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let node = self.node(handle);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn node(&self, handle: Handle) -> &Node<K, V> {
        match &self.slots[handle] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("stale recency handle {handle}"),
        }
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        match &mut self.slots[handle] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("stale recency handle {handle}"),
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<Handle>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let node = self.list.node(handle);
        self.cursor = node.next;
        Some(&node.entry)
    }
}
