use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::position::Position;

/// A pending candidate of the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierEntry<C = f64> {
    pub position: Position,
    /// Cost of the path found so far.
    pub g: C,
    /// `g` plus the heuristic estimate of the remaining cost.
    pub f: C,
}

impl<C: Float> FrontierEntry<C> {
    pub fn new(position: Position, g: C, h: C) -> FrontierEntry<C> {
        FrontierEntry {
            position,
            g,
            f: g + h,
        }
    }
}

#[derive(Debug)]
struct SmallestCostHolder<C> {
    entry: FrontierEntry<C>,
    sequence: u64,
}

impl<C: Float> Eq for SmallestCostHolder<C> {}

impl<C: Float> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Float> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Float> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimated cost first, then earliest insertion
        match other
            .entry
            .f
            .partial_cmp(&self.entry.f)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Min-priority queue of [FrontierEntry] values keyed on `f`, ties going to the entry inserted
/// first.
///
/// There is no decrease-key: a cheaper route to a cell is pushed as an additional entry and the
/// outdated ones stay in the queue. Callers have to recognise those when they come out, by
/// comparing `f` with the best cost recorded for the cell.
#[derive(Debug)]
pub struct OpenFrontier<C = f64> {
    heap: BinaryHeap<SmallestCostHolder<C>>,
    next_sequence: u64,
}

impl<C: Float> Default for OpenFrontier<C> {
    fn default() -> Self {
        OpenFrontier::new()
    }
}

impl<C: Float> OpenFrontier<C> {
    pub fn new() -> OpenFrontier<C> {
        OpenFrontier {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn insert(&mut self, entry: FrontierEntry<C>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(SmallestCostHolder { entry, sequence });
    }

    pub fn extract_min(&mut self) -> Option<FrontierEntry<C>> {
        self.heap.pop().map(|holder| holder.entry)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, outdated ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}
