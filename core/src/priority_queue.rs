use std::collections::HashMap;
use std::hash::Hash;

/// Binary min-heap whose entries are addressed by value.
///
/// An index map `value → heap slot` is updated on every swap, so an existing
/// value can have its priority changed in O(log n) without a linear scan.
/// Each value appears at most once.
///
/// `Clone` is the copy constructor: the clone owns its own heap and index map,
/// which is what search snapshots rely on.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<V> {
    heap: Vec<(V, f64)>,
    indices: HashMap<V, usize>,
}

impl<V: Hash + Eq + Clone> IndexedPriorityQueue<V> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            indices: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.indices.contains_key(value)
    }

    /// Current priority of `value`, if queued.
    pub fn priority(&self, value: &V) -> Option<f64> {
        self.indices.get(value).map(|&i| self.heap[i].1)
    }

    /// Insert `value`, or overwrite its priority if it is already queued.
    ///
    /// The overwrite is unconditional: a worse priority replaces a better one.
    pub fn enqueue(&mut self, value: V, priority: f64) {
        match self.indices.get(&value) {
            Some(&index) => {
                self.heap[index].1 = priority;
                let index = self.sift_up(index);
                self.sift_down(index);
            }
            None => {
                let index = self.heap.len();
                self.indices.insert(value.clone(), index);
                self.heap.push((value, priority));
                self.sift_up(index);
            }
        }
    }

    /// The minimum entry, without removing it.
    pub fn peek(&self) -> Option<(&V, f64)> {
        self.heap.first().map(|(v, p)| (v, *p))
    }

    /// Remove and return the minimum entry.
    pub fn dequeue(&mut self) -> Option<(V, f64)> {
        if self.heap.is_empty() {
            return None;
        }

        let top = self.heap.swap_remove(0);
        self.indices.remove(&top.0);
        if let Some((moved, _)) = self.heap.first() {
            self.indices.insert(moved.clone(), 0);
            self.sift_down(0);
        }

        Some(top)
    }

    /// All entries in heap-array order (not sorted).
    pub fn items(&self) -> impl Iterator<Item = (&V, f64)> + '_ {
        self.heap.iter().map(|(v, p)| (v, *p))
    }

    /// Swap two slots and keep the index map in step.
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        if let Some(slot) = self.indices.get_mut(&self.heap[a].0) {
            *slot = a;
        }
        if let Some(slot) = self.indices.get_mut(&self.heap[b].0) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent].1 <= self.heap[index].1 {
                break;
            }
            self.swap(parent, index);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        loop {
            let mut smallest = index;
            let left = index * 2 + 1;
            let right = left + 1;

            if left < len && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }
            if right < len && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }
            if smallest == index {
                return index;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<V: Hash + Eq + Clone> Default for IndexedPriorityQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<V: Hash + Eq + Clone>(queue: &mut IndexedPriorityQueue<V>) -> Vec<(V, f64)> {
        std::iter::from_fn(|| queue.dequeue()).collect()
    }

    /// Every slot recorded in the index map points back at its own value.
    fn assert_indices_consistent(queue: &IndexedPriorityQueue<&str>) {
        assert_eq!(queue.indices.len(), queue.heap.len());
        for (value, &index) in &queue.indices {
            assert_eq!(queue.heap[index].0, *value);
        }
    }

    #[test]
    fn test_dequeue_returns_minimum_first() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue("c", 3.0);
        q.enqueue("a", 1.0);
        q.enqueue("d", 4.0);
        q.enqueue("b", 2.0);

        let order: Vec<&str> = drain(&mut q).into_iter().map(|(v, _)| v).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_empty_queue_returns_none() {
        let mut q: IndexedPriorityQueue<u32> = IndexedPriorityQueue::new();
        assert!(q.peek().is_none());
        assert!(q.dequeue().is_none());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue(7u32, 0.5);
        q.enqueue(8u32, 0.25);
        assert_eq!(q.peek(), Some((&8, 0.25)));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_decrease_key_moves_value_to_front() {
        let mut q = IndexedPriorityQueue::new();
        for (i, v) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
            q.enqueue(v, 10.0 + i as f64);
        }
        q.enqueue("e", 1.0);

        assert_eq!(q.len(), 5);
        assert_eq!(q.peek(), Some((&"e", 1.0)));
        assert_indices_consistent(&q);
    }

    // Re-enqueueing overwrites the priority even when the new one is worse.
    #[test]
    fn test_enqueue_existing_value_accepts_worse_priority() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue("a", 1.0);
        q.enqueue("b", 2.0);
        q.enqueue("a", 5.0);

        assert_eq!(q.len(), 2);
        assert_eq!(q.priority(&"a"), Some(5.0));
        assert_eq!(q.dequeue(), Some(("b", 2.0)));
        assert_eq!(q.dequeue(), Some(("a", 5.0)));
    }

    #[test]
    fn test_indices_track_swaps() {
        let mut q = IndexedPriorityQueue::new();
        let values = ["m", "k", "z", "a", "q", "b", "y"];
        for (i, v) in values.iter().enumerate() {
            q.enqueue(*v, ((i * 7) % 5) as f64);
            assert_indices_consistent(&q);
        }
        q.enqueue("z", -1.0);
        assert_indices_consistent(&q);
        q.dequeue();
        q.dequeue();
        assert_indices_consistent(&q);
        assert!(!q.contains(&"z"));
    }

    #[test]
    fn test_items_lists_every_entry() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue(1u8, 3.0);
        q.enqueue(2u8, 1.0);
        q.enqueue(3u8, 2.0);

        let mut items: Vec<(u8, f64)> = q.items().map(|(v, p)| (*v, p)).collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(items, vec![(1, 3.0), (2, 1.0), (3, 2.0)]);
        // A second call starts over.
        assert_eq!(q.items().count(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue("a", 1.0);
        q.enqueue("b", 2.0);

        let snapshot = q.clone();
        q.dequeue();
        q.enqueue("c", 0.0);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.peek(), Some((&"a", 1.0)));
        assert!(!snapshot.contains(&"c"));
    }

    #[test]
    fn test_single_element_round_trip() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue("only", 42.0);
        assert_eq!(q.dequeue(), Some(("only", 42.0)));
        assert!(q.is_empty());
        assert!(!q.contains(&"only"));
    }
}
