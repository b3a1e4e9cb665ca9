/// Double-ended queue over a growable ring buffer.
///
/// `start` is the slot of the front element and `end` the slot one past the
/// back element. When the buffer fills up it is relinearized so the front
/// lands at slot 0, then its capacity is doubled.
#[derive(Debug, Clone)]
pub struct Dequeue<T> {
    buffer: Vec<Option<T>>,
    start: usize,
    end: usize,
    size: usize,
}

const MIN_CAPACITY: usize = 4;

impl<T> Dequeue<T> {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            start: 0,
            end: 0,
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(capacity);
        buffer.resize_with(capacity, || None);
        Self {
            buffer,
            start: 0,
            end: 0,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Push to the back.
    pub fn enqueue(&mut self, item: T) {
        self.reserve_one();
        self.buffer[self.end] = Some(item);
        self.end = (self.end + 1) % self.buffer.len();
        self.size += 1;
    }

    /// Push to the front.
    pub fn enqueue_front(&mut self, item: T) {
        self.reserve_one();
        let cap = self.buffer.len();
        self.start = (self.start + cap - 1) % cap;
        self.buffer[self.start] = Some(item);
        self.size += 1;
    }

    /// Pop from the front. `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let item = self.buffer[self.start].take();
        self.start = (self.start + 1) % self.buffer.len();
        self.size -= 1;
        item
    }

    /// Pop from the back. `None` when empty.
    pub fn dequeue_back(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let cap = self.buffer.len();
        self.end = (self.end + cap - 1) % cap;
        self.size -= 1;
        self.buffer[self.end].take()
    }

    pub fn front(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.buffer[self.start].as_ref()
    }

    pub fn back(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        let cap = self.buffer.len();
        self.buffer[(self.end + cap - 1) % cap].as_ref()
    }

    /// Element `index` positions from the front.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.size {
            return None;
        }
        self.buffer[(self.start + index) % self.buffer.len()].as_ref()
    }

    /// Front-to-back iteration over the held elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let cap = self.buffer.len();
        (0..self.size).filter_map(move |offset| self.buffer[(self.start + offset) % cap].as_ref())
    }

    /// Make room for one more element, relinearizing and doubling when full.
    fn reserve_one(&mut self) {
        let cap = self.buffer.len();
        if self.size < cap {
            return;
        }

        let new_cap = (cap * 2).max(MIN_CAPACITY);
        let mut buffer: Vec<Option<T>> = Vec::with_capacity(new_cap);
        for offset in 0..self.size {
            buffer.push(self.buffer[(self.start + offset) % cap].take());
        }
        buffer.resize_with(new_cap, || None);

        self.buffer = buffer;
        self.start = 0;
        self.end = self.size;
    }
}

impl<T> Default for Dequeue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Dequeue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut dequeue = Dequeue::new();
        dequeue.extend(iter);
        dequeue
    }
}

impl<T> Extend<T> for Dequeue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Dequeue<T> {
    type Item = &'a T;
    type IntoIter = Box<dyn Iterator<Item = &'a T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_and_back_ordering() {
        let mut d = Dequeue::new();
        d.enqueue(1);
        d.enqueue(2);
        d.enqueue_front(0);

        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(d.dequeue_back(), Some(2));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_fifo_drain() {
        let mut d: Dequeue<u32> = (0..10).collect();
        let drained: Vec<u32> = std::iter::from_fn(|| d.dequeue()).collect();
        assert_eq!(drained, (0..10).collect::<Vec<_>>());
        assert!(d.is_empty());
    }

    #[test]
    fn test_empty_pops_return_none() {
        let mut d: Dequeue<u8> = Dequeue::new();
        assert_eq!(d.dequeue(), None);
        assert_eq!(d.dequeue_back(), None);
        assert!(d.front().is_none());
        assert!(d.back().is_none());
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn test_growth_preserves_order_when_wrapped() {
        let mut d = Dequeue::with_capacity(4);
        d.enqueue(2);
        d.enqueue(3);
        d.enqueue_front(1);
        d.enqueue_front(0);
        // Full and wrapped around the physical end of the buffer.
        assert_eq!(d.capacity(), 4);
        d.enqueue(4);

        assert_eq!(d.capacity(), 8);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(d.front(), Some(&0));
        assert_eq!(d.back(), Some(&4));
    }

    #[test]
    fn test_get_is_relative_to_front() {
        let mut d = Dequeue::with_capacity(4);
        d.extend([1, 2, 3]);
        d.dequeue();
        d.enqueue(4);
        d.enqueue(5);
        // Logical [2, 3, 4, 5] wraps physically.
        assert_eq!(d.get(0), Some(&2));
        assert_eq!(d.get(3), Some(&5));
        assert_eq!(d.get(4), None);
    }

    #[test]
    fn test_interleaved_ends() {
        let mut d = Dequeue::new();
        for i in 0..100 {
            if i % 3 == 0 {
                d.enqueue_front(i);
            } else {
                d.enqueue(i);
            }
            if i % 5 == 0 {
                d.dequeue_back();
            }
        }
        let mut model = std::collections::VecDeque::new();
        for i in 0..100 {
            if i % 3 == 0 {
                model.push_front(i);
            } else {
                model.push_back(i);
            }
            if i % 5 == 0 {
                model.pop_back();
            }
        }
        assert_eq!(d.iter().collect::<Vec<_>>(), model.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_iteration_restarts_each_call() {
        let d: Dequeue<&str> = ["a", "b"].into_iter().collect();
        assert_eq!(d.iter().count(), 2);
        assert_eq!((&d).into_iter().count(), 2);
    }

    #[test]
    fn test_zero_capacity_grows() {
        let mut d = Dequeue::with_capacity(0);
        d.enqueue_front("x");
        assert_eq!(d.dequeue(), Some("x"));
    }
}
