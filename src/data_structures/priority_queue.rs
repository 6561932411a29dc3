use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-priority queue of `(vertex, distance)` entries for Dijkstra.
///
/// Entries with equal distance pop in insertion order, which keeps search
/// output reproducible. Stale entries are not removed; callers skip them
/// on pop.
#[derive(Debug, Default)]
pub struct Frontier {
    /// Ordered by distance, then by push sequence
    heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u64, usize)>>,
    pushed: u64,
}

impl Frontier {
    /// Creates a new empty frontier
    pub fn new() -> Self {
        Frontier::default()
    }

    /// Returns true if the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes since creation
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    pub fn push(&mut self, vertex: usize, distance: f64) {
        self.heap
            .push(Reverse((OrderedFloat(distance), self.pushed, vertex)));
        self.pushed += 1;
    }

    /// Removes the entry with the smallest distance
    pub fn pop(&mut self) -> Option<(usize, f64)> {
        self.heap
            .pop()
            .map(|Reverse((distance, _, vertex))| (vertex, distance.into_inner()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_first() {
        let mut f = Frontier::new();
        f.push(1, 5.0);
        f.push(2, 1.5);
        f.push(3, 3.0);
        assert_eq!(f.pop(), Some((2, 1.5)));
        assert_eq!(f.pop(), Some((3, 3.0)));
        assert_eq!(f.pop(), Some((1, 5.0)));
        assert!(f.pop().is_none());
    }

    #[test]
    fn ties_pop_in_push_order() {
        let mut f = Frontier::new();
        for v in [9, 4, 7, 0] {
            f.push(v, 2.0);
        }
        let order: Vec<usize> = std::iter::from_fn(|| f.pop().map(|(v, _)| v)).collect();
        assert_eq!(order, vec![9, 4, 7, 0]);
        assert_eq!(f.pushed(), 4);
        assert!(f.is_empty());
    }
}
