/*!
 * Entry Store
 * Bounded, recency-ordered wake lock entry store
 *
 * An arena of slots holds the entries; recency order is an intrusive
 * doubly-linked list of slot indices (front = most recently touched), and a
 * key index maps (name, pid) to a slot. Slot indices are stable for the
 * lifetime of an entry, so the order links and the key index never hold a
 * dangling reference. All operations are O(1) except `snapshot` and
 * `roll_forward`, which are O(len) over a bounded capacity.
 *
 * Recency is driven purely by acquire/release activity: no read promotes an
 * entry, so eviction priority reflects wake lock activity, not query
 * frequency.
 */

use super::types::{WakeLockInfo, WakeLockKey};
use crate::core::types::TimestampMs;
use crate::monitoring::{DiagnosticSink, Payload, Severity, StatsEvent};
use ahash::RandomState;
use std::collections::HashMap;

/// Stable handle to an arena slot
type SlotId = usize;

#[derive(Debug)]
struct Slot {
    entry: WakeLockInfo,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Bounded LRU store of native wake lock entries
#[derive(Debug)]
pub(crate) struct EntryStore {
    capacity: usize,
    slots: Vec<Option<Slot>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    index: HashMap<WakeLockKey, SlotId, RandomState>,
}

impl EntryStore {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert as most-recently-used. The key must not already be present;
    /// callers updating an existing entry remove the stale one first.
    pub fn insert_front(&mut self, entry: WakeLockInfo) {
        let key = entry.key();
        debug_assert!(!self.index.contains_key(&key));

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(Slot {
                    entry,
                    prev: None,
                    next: self.head,
                });
                id
            }
            None => {
                self.slots.push(Some(Slot {
                    entry,
                    prev: None,
                    next: self.head,
                }));
                self.slots.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            if let Some(slot) = self.slots[old_head].as_mut() {
                slot.prev = Some(id);
            }
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.index.insert(key, id);
    }

    /// Remove the entry for `key`; no-op if absent.
    pub fn remove(&mut self, key: &WakeLockKey) -> Option<WakeLockInfo> {
        let id = self.index.remove(key)?;
        self.take_slot(id)
    }

    /// If at capacity, drop the least-recently-used entry so one insert can
    /// proceed, reporting the dropped key.
    pub fn evict_if_full(&mut self, sink: &dyn DiagnosticSink) {
        if self.len() < self.capacity {
            return;
        }
        if let Some(evicted) = self.tail.and_then(|tail_id| self.take_slot(tail_id)) {
            self.index.remove(&evicted.key());
            sink.report(StatsEvent::new(
                Severity::Warn,
                Payload::EntryEvicted {
                    name: evicted.name,
                    pid: evicted.pid,
                },
            ));
        }
    }

    /// Ordered copy of all entries, most-recently-used first
    pub fn snapshot(&self) -> Vec<WakeLockInfo> {
        let mut out = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if let Some(slot) = self.slots[id].as_ref() {
                out.push(slot.entry.clone());
                cursor = slot.next;
            } else {
                break;
            }
        }
        out
    }

    /// Fold elapsed time into every currently-active entry.
    ///
    /// Inactive entries are untouched, so repeated queries with no
    /// intervening activity observe identical durations.
    pub fn roll_forward(&mut self, now: TimestampMs) {
        for slot in self.slots.iter_mut().flatten() {
            let entry = &mut slot.entry;
            if entry.is_active {
                let delta = now - entry.last_change;
                entry.active_time += delta;
                entry.max_time = entry.max_time.max(entry.active_time);
                entry.total_time += delta;
                entry.last_change = now;
            }
        }
    }

    /// Unlink a slot from the order list and free it, returning its entry.
    /// The key index is not touched; callers keep it in lock-step.
    fn take_slot(&mut self, id: SlotId) -> Option<WakeLockInfo> {
        let slot = self.slots[id].take()?;

        match slot.prev {
            Some(prev) => {
                if let Some(p) = self.slots[prev].as_mut() {
                    p.next = slot.next;
                }
            }
            None => self.head = slot.next,
        }
        match slot.next {
            Some(next) => {
                if let Some(n) = self.slots[next].as_mut() {
                    n.prev = slot.prev;
                }
            }
            None => self.tail = slot.prev,
        }

        self.free.push(id);
        Some(slot.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::CollectingSink;

    fn entry(name: &str, pid: i32) -> WakeLockInfo {
        WakeLockInfo::native(name, pid, 0)
    }

    fn names(store: &EntryStore) -> Vec<String> {
        store.snapshot().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn insert_front_orders_most_recent_first() {
        let mut store = EntryStore::new(4);
        store.insert_front(entry("a", 1));
        store.insert_front(entry("b", 1));
        store.insert_front(entry("c", 2));
        assert_eq!(names(&store), vec!["c", "b", "a"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_keeps_order_links_consistent() {
        let mut store = EntryStore::new(4);
        store.insert_front(entry("a", 1));
        store.insert_front(entry("b", 1));
        store.insert_front(entry("c", 1));

        // Middle, then head, then tail.
        assert!(store.remove(&("b".to_string(), 1)).is_some());
        assert_eq!(names(&store), vec!["c", "a"]);
        assert!(store.remove(&("c".to_string(), 1)).is_some());
        assert_eq!(names(&store), vec!["a"]);
        assert!(store.remove(&("a".to_string(), 1)).is_some());
        assert!(names(&store).is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut store = EntryStore::new(2);
        store.insert_front(entry("a", 1));
        assert!(store.remove(&("a".to_string(), 2)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn evict_drops_tail_and_reports() {
        let sink = CollectingSink::new();
        let mut store = EntryStore::new(2);
        store.insert_front(entry("a", 1));
        store.insert_front(entry("b", 1));

        store.evict_if_full(&sink);
        assert_eq!(names(&store), vec!["b"]);
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, Severity::Warn);
        assert_eq!(
            events[0].payload,
            Payload::EntryEvicted {
                name: "a".to_string(),
                pid: 1
            }
        );
    }

    #[test]
    fn evict_below_capacity_is_noop() {
        let sink = CollectingSink::new();
        let mut store = EntryStore::new(2);
        store.insert_front(entry("a", 1));
        store.evict_if_full(&sink);
        assert_eq!(store.len(), 1);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut store = EntryStore::new(2);
        for i in 0..100 {
            let sink = CollectingSink::new();
            store.evict_if_full(&sink);
            store.insert_front(entry(&format!("wl{}", i), 1));
        }
        // Arena never grows past capacity worth of live slots plus one
        // freed slot awaiting reuse.
        assert!(store.slots.len() <= 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn roll_forward_touches_only_active_entries() {
        let mut store = EntryStore::new(4);
        store.insert_front(entry("active", 1));
        let mut released = entry("idle", 1);
        released.is_active = false;
        released.last_change = 0;
        store.insert_front(released);

        store.roll_forward(250);

        let snapshot = store.snapshot();
        let idle = snapshot.iter().find(|e| e.name == "idle").unwrap();
        assert_eq!(idle.active_time, 0);
        assert_eq!(idle.total_time, 0);
        assert_eq!(idle.last_change, 0);

        let active = snapshot.iter().find(|e| e.name == "active").unwrap();
        assert_eq!(active.active_time, 250);
        assert_eq!(active.total_time, 250);
        assert_eq!(active.max_time, 250);
        assert_eq!(active.last_change, 250);
    }
}
