/*!
This module provides access to the MutablePriorityQueue, a binary min-heap over dense `usize` identifiers.
Identifiers double as indices into a position table, so any entry can be located in O(1) and then removed or re-keyed in O(log n).

# Example usage
```rust
use greedy_cover::mutable_pqueue::MutablePriorityQueue;

let mut pqueue = MutablePriorityQueue::with_capacity(3);
pqueue.push(0, 1.0);
pqueue.push(1, 0.5);
pqueue.push(2, 2.0);
assert_eq!(pqueue.min_id(), Some(1));

// set 1 got more expensive, so 0 takes over
pqueue.increase_key(1, 4.0);
assert_eq!(pqueue.min_id(), Some(0));

// arbitrary removal
pqueue.remove(0);
assert_eq!(pqueue.pop(), Some((2, 2.0)));
assert_eq!(pqueue.pop(), Some((1, 4.0)));
assert!(pqueue.is_empty());
```
*/

use std::cmp::Ordering;

use crate::cover_config::TieBreak;

/// A single heap slot, the current key and the identifier it belongs to
#[derive(Clone, Copy, Debug, PartialEq)]
struct HeapEntry {
    key: f64,
    id: usize
}

/// Minimum priority queue that supports removal and key changes for arbitrary identifiers.
/// All mis-use (pushing a present id, touching an absent id, NaN keys) is treated as a logic error and will panic.
#[derive(Clone, Debug, Default)]
pub struct MutablePriorityQueue {
    /// The heap itself, the minimum is always at index 0
    heap: Vec<HeapEntry>,
    /// For each identifier, the current index into `heap` if present
    positions: Vec<Option<usize>>,
    /// How equal keys are ordered
    tie_break: TieBreak
}

impl MutablePriorityQueue {
    /// Creates an empty queue with room for identifiers in `0..capacity`, equal keys resolve to the lowest identifier.
    /// Identifiers outside of that range are still allowed, the position table will just grow.
    /// # Arguments
    /// * `capacity` - the expected number of distinct identifiers
    pub fn with_capacity(capacity: usize) -> MutablePriorityQueue {
        Self::with_tie_break(capacity, TieBreak::LowestIndex)
    }

    /// Creates an empty queue with a specific rule for ordering equal keys.
    /// # Arguments
    /// * `capacity` - the expected number of distinct identifiers
    /// * `tie_break` - the rule for ordering equal keys
    pub fn with_tie_break(capacity: usize, tie_break: TieBreak) -> MutablePriorityQueue {
        MutablePriorityQueue {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
            tie_break
        }
    }

    /// Inserts a new identifier with the given key.
    /// # Arguments
    /// * `id` - the identifier, must not currently be in the queue
    /// * `key` - the priority, smaller comes out first
    /// # Panics
    /// * if `id` is already present or `key` is NaN
    pub fn push(&mut self, id: usize, key: f64) {
        assert!(!key.is_nan(), "NaN key pushed for id {id}");
        if id >= self.positions.len() {
            self.positions.resize(id + 1, None);
        }
        assert!(self.positions[id].is_none(), "id {id} is already in the queue");

        let position = self.heap.len();
        self.heap.push(HeapEntry { key, id });
        self.positions[id] = Some(position);
        self.sift_up(position);
    }

    /// Returns the identifier with the smallest key without removing it, or None if empty.
    pub fn min_id(&self) -> Option<usize> {
        self.heap.first().map(|e| e.id)
    }

    /// Returns the smallest key without removing it, or None if empty.
    pub fn min_key(&self) -> Option<f64> {
        self.heap.first().map(|e| e.key)
    }

    /// Removes and returns the identifier with the smallest key along with that key.
    pub fn pop(&mut self) -> Option<(usize, f64)> {
        let id = self.min_id()?;
        let key = self.remove(id);
        Some((id, key))
    }

    /// Removes an identifier from anywhere in the queue and returns the key it had.
    /// # Arguments
    /// * `id` - the identifier to remove
    /// # Panics
    /// * if `id` is not in the queue
    pub fn remove(&mut self, id: usize) -> f64 {
        let position = self.position(id);
        let last = self.heap.len() - 1;
        self.swap(position, last);

        let removed = self.heap.pop().unwrap();
        debug_assert_eq!(removed.id, id);
        self.positions[id] = None;

        // the entry that filled the hole can need to move either way
        if position < self.heap.len() {
            let position = self.sift_up(position);
            self.sift_down(position);
        }
        removed.key
    }

    /// Changes the key of an identifier in either direction and restores the heap order.
    /// Returns the previous key.
    /// # Arguments
    /// * `id` - the identifier to update
    /// * `key` - the new key
    /// # Panics
    /// * if `id` is not in the queue or `key` is NaN
    pub fn change_key(&mut self, id: usize, key: f64) -> f64 {
        assert!(!key.is_nan(), "NaN key given for id {id}");
        let position = self.position(id);
        let previous = self.heap[position].key;
        self.heap[position].key = key;

        let position = self.sift_up(position);
        self.sift_down(position);
        previous
    }

    /// Raises the key of an identifier, moving it towards the bottom of the heap.
    /// Returns the previous key.
    /// # Panics
    /// * if `id` is not in the queue or `key` is smaller than the current key
    pub fn increase_key(&mut self, id: usize, key: f64) -> f64 {
        let current = self.heap[self.position(id)].key;
        assert!(current.total_cmp(&key) != Ordering::Greater, "increase_key for id {id} went from {current} down to {key}");
        self.change_key(id, key)
    }

    /// Lowers the key of an identifier, moving it towards the top of the heap.
    /// Returns the previous key.
    /// # Panics
    /// * if `id` is not in the queue or `key` is larger than the current key
    pub fn decrease_key(&mut self, id: usize, key: f64) -> f64 {
        let current = self.heap[self.position(id)].key;
        assert!(current.total_cmp(&key) != Ordering::Less, "decrease_key for id {id} went from {current} up to {key}");
        self.change_key(id, key)
    }

    /// Returns true if the identifier is currently in the queue.
    pub fn contains(&self, id: usize) -> bool {
        self.positions.get(id).map_or(false, |p| p.is_some())
    }

    /// Returns the current key for an identifier, or None if absent.
    pub fn key(&self, id: usize) -> Option<f64> {
        self.positions.get(id)
            .copied()
            .flatten()
            .map(|p| self.heap[p].key)
    }

    /// Removes everything, the position table keeps its size.
    pub fn clear(&mut self) {
        for entry in self.heap.drain(..) {
            self.positions[entry.id] = None;
        }
    }

    // Getters
    /// Number of identifiers currently in the queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is queued, O(1)
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The rule used for ordering equal keys
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Looks up the heap index of a present identifier.
    fn position(&self, id: usize) -> usize {
        match self.positions.get(id).copied().flatten() {
            Some(p) => p,
            None => panic!("id {id} is not in the queue")
        }
    }

    /// Returns true if heap slot `i` must be above heap slot `j`.
    fn precedes(&self, i: usize, j: usize) -> bool {
        let a = &self.heap[i];
        let b = &self.heap[j];
        let ordering = a.key.total_cmp(&b.key)
            .then_with(|| match self.tie_break {
                TieBreak::LowestIndex => a.id.cmp(&b.id),
                TieBreak::HighestIndex => b.id.cmp(&a.id)
            });
        ordering == Ordering::Less
    }

    /// Swaps two heap slots and keeps the position table in sync.
    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions[self.heap[i].id] = Some(i);
        self.positions[self.heap[j].id] = Some(j);
    }

    /// Moves a slot up until its parent precedes it, returns the final index.
    fn sift_up(&mut self, mut position: usize) -> usize {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.precedes(position, parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
        position
    }

    /// Moves a slot down until it precedes both children, returns the final index.
    fn sift_down(&mut self, mut position: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut best = position;
            if left < len && self.precedes(left, best) {
                best = left;
            }
            if right < len && self.precedes(right, best) {
                best = right;
            }
            if best == position {
                return position;
            }
            self.swap(position, best);
            position = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use priority_queue::PriorityQueue;
    use rand::{Rng, SeedableRng};
    use std::cmp::Reverse;

    /// Checks the heap property and the position table against each other
    fn check_invariants(pqueue: &MutablePriorityQueue) {
        for i in 1..pqueue.heap.len() {
            assert!(!pqueue.precedes(i, (i - 1) / 2));
        }
        for (i, entry) in pqueue.heap.iter().enumerate() {
            assert_eq!(pqueue.positions[entry.id], Some(i));
        }
        let tracked = pqueue.positions.iter().filter(|p| p.is_some()).count();
        assert_eq!(tracked, pqueue.len());
    }

    #[test]
    fn test_push_pop_order() {
        let mut pqueue = MutablePriorityQueue::with_capacity(5);
        let keys = [3.0, 1.0, 4.0, 1.5, 0.25];
        for (id, &key) in keys.iter().enumerate() {
            pqueue.push(id, key);
            check_invariants(&pqueue);
        }
        assert_eq!(pqueue.len(), 5);
        assert_eq!(pqueue.min_key(), Some(0.25));

        let order: Vec<usize> = std::iter::from_fn(|| pqueue.pop().map(|(id, _key)| id)).collect();
        assert_eq!(order, vec![4, 1, 3, 0, 2]);
        assert!(pqueue.is_empty());
        assert_eq!(pqueue.min_id(), None);
        assert_eq!(pqueue.pop(), None);
    }

    #[test]
    fn test_remove_arbitrary() {
        let mut pqueue = MutablePriorityQueue::with_capacity(4);
        pqueue.push(0, 2.0);
        pqueue.push(1, 1.0);
        pqueue.push(2, 3.0);
        pqueue.push(3, 0.5);

        // remove the current minimum and something in the middle
        assert_eq!(pqueue.remove(3), 0.5);
        check_invariants(&pqueue);
        assert_eq!(pqueue.min_id(), Some(1));
        assert_eq!(pqueue.remove(0), 2.0);
        check_invariants(&pqueue);
        assert!(!pqueue.contains(0));
        assert!(pqueue.contains(2));
        assert_eq!(pqueue.key(2), Some(3.0));
        assert_eq!(pqueue.key(0), None);
        assert_eq!(pqueue.len(), 2);

        // an identifier can come back after removal
        pqueue.push(0, 0.1);
        assert_eq!(pqueue.min_id(), Some(0));
    }

    #[test]
    fn test_key_changes() {
        let mut pqueue = MutablePriorityQueue::with_capacity(3);
        pqueue.push(0, 1.0);
        pqueue.push(1, 2.0);
        pqueue.push(2, 3.0);

        assert_eq!(pqueue.increase_key(0, 5.0), 1.0);
        check_invariants(&pqueue);
        assert_eq!(pqueue.min_id(), Some(1));

        assert_eq!(pqueue.decrease_key(2, 0.5), 3.0);
        check_invariants(&pqueue);
        assert_eq!(pqueue.min_id(), Some(2));

        // either direction through the general call
        assert_eq!(pqueue.change_key(2, 10.0), 0.5);
        assert_eq!(pqueue.change_key(0, 1.5), 5.0);
        check_invariants(&pqueue);
        assert_eq!(pqueue.pop(), Some((0, 1.5)));
        assert_eq!(pqueue.pop(), Some((1, 2.0)));
        assert_eq!(pqueue.pop(), Some((2, 10.0)));
    }

    #[test]
    fn test_tie_breaks() {
        let mut lowest = MutablePriorityQueue::with_capacity(0);
        let mut highest = MutablePriorityQueue::with_tie_break(0, TieBreak::HighestIndex);
        for id in [2, 0, 3, 1] {
            lowest.push(id, 1.0);
            highest.push(id, 1.0);
        }
        assert_eq!(lowest.tie_break(), TieBreak::LowestIndex);
        let lowest_order: Vec<usize> = std::iter::from_fn(|| lowest.pop().map(|(id, _key)| id)).collect();
        let highest_order: Vec<usize> = std::iter::from_fn(|| highest.pop().map(|(id, _key)| id)).collect();
        assert_eq!(lowest_order, vec![0, 1, 2, 3]);
        assert_eq!(highest_order, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_grows_past_capacity() {
        let mut pqueue = MutablePriorityQueue::with_capacity(1);
        pqueue.push(10, 1.0);
        pqueue.push(0, 2.0);
        assert_eq!(pqueue.min_id(), Some(10));
        assert!(!pqueue.contains(100));

        pqueue.clear();
        assert!(pqueue.is_empty());
        assert!(!pqueue.contains(10));
        pqueue.push(10, 3.0);
        check_invariants(&pqueue);
    }

    #[test]
    #[should_panic]
    fn test_double_push() {
        let mut pqueue = MutablePriorityQueue::with_capacity(1);
        pqueue.push(0, 1.0);
        pqueue.push(0, 2.0);
    }

    #[test]
    #[should_panic]
    fn test_remove_absent() {
        let mut pqueue = MutablePriorityQueue::with_capacity(2);
        pqueue.push(0, 1.0);
        pqueue.remove(1);
    }

    #[test]
    #[should_panic]
    fn test_increase_key_absent() {
        let mut pqueue = MutablePriorityQueue::with_capacity(2);
        pqueue.increase_key(5, 1.0);
    }

    #[test]
    #[should_panic]
    fn test_increase_key_wrong_direction() {
        let mut pqueue = MutablePriorityQueue::with_capacity(1);
        pqueue.push(0, 1.0);
        pqueue.increase_key(0, 0.5);
    }

    #[test]
    #[should_panic]
    fn test_nan_key() {
        let mut pqueue = MutablePriorityQueue::with_capacity(1);
        pqueue.push(0, f64::NAN);
    }

    #[test]
    fn test_against_reference_queue() {
        // integer valued keys so the reference can order them exactly
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let num_ids = 64;
        let mut pqueue = MutablePriorityQueue::with_capacity(num_ids);
        let mut reference: PriorityQueue<usize, Reverse<(u32, usize)>> = PriorityQueue::new();

        for _step in 0..5000 {
            let id = rng.gen_range(0..num_ids);
            let key: u32 = rng.gen_range(0..20);
            match rng.gen_range(0..4) {
                0 | 1 => {
                    if pqueue.contains(id) {
                        pqueue.change_key(id, key as f64);
                        reference.change_priority(&id, Reverse((key, id)));
                    } else {
                        pqueue.push(id, key as f64);
                        reference.push(id, Reverse((key, id)));
                    }
                },
                2 => {
                    if pqueue.contains(id) {
                        let removed = pqueue.remove(id);
                        let (_ref_id, Reverse((ref_key, _))) = reference.remove(&id).unwrap();
                        assert_eq!(removed, ref_key as f64);
                    } else {
                        assert!(reference.get(&id).is_none());
                    }
                },
                3 => {
                    let popped = pqueue.pop();
                    let ref_popped = reference.pop().map(|(i, Reverse((k, _)))| (i, k as f64));
                    assert_eq!(popped, ref_popped);
                },
                _ => panic!("no impl")
            }

            assert_eq!(pqueue.len(), reference.len());
            assert_eq!(pqueue.min_id(), reference.peek().map(|(&i, _p)| i));
        }
        check_invariants(&pqueue);
    }
}
