use std::fmt::Debug;

use crate::{Error, Result};

/// A min-priority-queue over vertex ids with decrease-key support
///
/// The heap lives in a plain array of `(item, priority)` entries. A side table
/// maps each item to its current slot, which is what makes `update` O(log n):
/// the entry is found directly instead of by scanning. Every swap inside the
/// heap rewrites both affected slots of that table.
///
/// Items are dense `usize` ids (graph vertex ids). The position table grows on
/// demand, so `with_capacity` is only a sizing hint.
#[derive(Debug, Clone)]
pub struct IndexedMinPriorityQueue<P>
where
    P: Ord + Copy + Debug,
{
    /// Heap-ordered entries
    heap: Vec<(usize, P)>,

    /// item -> slot in `heap`, `None` when the item is not queued
    positions: Vec<Option<usize>>,
}

impl<P> Default for IndexedMinPriorityQueue<P>
where
    P: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> IndexedMinPriorityQueue<P>
where
    P: Ord + Copy + Debug,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        IndexedMinPriorityQueue {
            heap: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Creates an empty queue sized for items `0..capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedMinPriorityQueue {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Returns the number of elements in the priority queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the priority queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true if `item` is currently queued
    pub fn contains(&self, item: usize) -> bool {
        self.position(item).is_some()
    }

    /// Slot of `item` in the backing array
    pub fn position(&self, item: usize) -> Option<usize> {
        self.positions.get(item).copied().flatten()
    }

    /// Current priority of a queued item
    pub fn priority(&self, item: usize) -> Option<P> {
        self.position(item).map(|slot| self.heap[slot].1)
    }

    /// Returns the minimum entry without removing it
    pub fn peek(&self) -> Option<(usize, P)> {
        self.heap.first().copied()
    }

    /// Entries in backing-array order, so `iter().nth(i)` is slot `i`
    pub fn iter(&self) -> impl Iterator<Item = (usize, P)> + '_ {
        self.heap.iter().copied()
    }

    /// Clears the priority queue
    pub fn clear(&mut self) {
        for &(item, _) in &self.heap {
            self.positions[item] = None;
        }
        self.heap.clear();
    }

    /// Inserts `item`; an item that is already queued must go through `update`
    pub fn push(&mut self, item: usize, priority: P) -> Result<()> {
        if self.contains(item) {
            return Err(Error::AlreadyQueued(item));
        }
        if item >= self.positions.len() {
            self.positions.resize(item + 1, None);
        }

        let slot = self.heap.len();
        self.heap.push((item, priority));
        self.positions[item] = Some(slot);
        self.sift_up(slot);
        Ok(())
    }

    /// Removes and returns the entry with the smallest priority
    pub fn pop(&mut self) -> Result<(usize, P)> {
        if self.heap.is_empty() {
            return Err(Error::EmptyQueue);
        }

        let last = self.heap.len() - 1;
        self.swap_entries(0, last);

        let (item, priority) = self.heap.pop().ok_or(Error::EmptyQueue)?;
        self.positions[item] = None;

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Ok((item, priority))
    }

    /// Changes the priority of a queued item and restores heap order
    pub fn update(&mut self, item: usize, priority: P) -> Result<()> {
        let slot = self.position(item).ok_or(Error::NotQueued(item))?;
        let old = self.heap[slot].1;
        self.heap[slot].1 = priority;

        if priority < old {
            self.sift_up(slot);
        } else if priority > old {
            self.sift_down(slot);
        }
        Ok(())
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].1 >= self.heap[parent].1 {
                break;
            }
            self.swap_entries(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut smallest = slot;

            if left < len && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }
            if right < len && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }

            if smallest == slot {
                break;
            }
            self.swap_entries(slot, smallest);
            slot = smallest;
        }
    }

    /// Swap two heap slots and update the position table for both items
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].0] = Some(a);
        self.positions[self.heap[b].0] = Some(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_positions_consistent(queue: &IndexedMinPriorityQueue<u32>) {
        for (slot, &(item, _)) in queue.heap.iter().enumerate() {
            assert_eq!(queue.positions[item], Some(slot), "item {} misplaced", item);
        }
        let queued = queue.positions.iter().filter(|p| p.is_some()).count();
        assert_eq!(queued, queue.heap.len());
    }

    #[test]
    fn positions_follow_every_swap() {
        let mut queue = IndexedMinPriorityQueue::with_capacity(4);
        for (item, priority) in [(0, 50), (1, 40), (2, 30), (3, 20), (4, 10), (5, 60)] {
            queue.push(item, priority).unwrap();
            assert_positions_consistent(&queue);
        }

        queue.update(5, 1).unwrap();
        assert_positions_consistent(&queue);
        queue.update(4, 70).unwrap();
        assert_positions_consistent(&queue);

        while !queue.is_empty() {
            queue.pop().unwrap();
            assert_positions_consistent(&queue);
        }
    }

    #[test]
    fn clear_forgets_positions() {
        let mut queue = IndexedMinPriorityQueue::new();
        queue.push(3, 7u32).unwrap();
        queue.push(1, 2).unwrap();
        queue.clear();

        assert!(queue.is_empty());
        assert!(!queue.contains(3));
        assert_positions_consistent(&queue);
    }
}
