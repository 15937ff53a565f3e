//! Binary heap merger.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::iter::FusedIterator;

/// Next unconsumed item of one of the merged lists.
struct Candidate<'a, T> {
    value: &'a T,
    list_id: usize,
    position: usize,
}

impl<'a, T: Ord> Ord for Candidate<'a, T> {
    // binary heap is max-heap by default so the order is reversed to turn it into a min-heap,
    // equal values are popped lowest list first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .value
            .cmp(self.value)
            .then_with(|| other.list_id.cmp(&self.list_id))
    }
}

impl<'a, T: Ord> PartialOrd for Candidate<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T: Ord> PartialEq for Candidate<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<'a, T: Ord> Eq for Candidate<'a, T> {}

/// Binary heap merger implementation.
/// Merges multiple sorted lists into a single sorted output.
/// Time complexity is *m* \* log(*n*) in worst case where *m* is the number of items,
/// *n* is the number of lists. The heap never holds more than one item per list.
pub struct BinaryHeapMerger<'a, T: Ord> {
    lists: Vec<&'a [T]>,
    candidates: BinaryHeap<Candidate<'a, T>>,
    remaining: usize,
}

impl<'a, T: Ord> BinaryHeapMerger<'a, T> {
    /// Creates an instance of a binary heap merger using lists as inputs.
    /// List items should be sorted in ascending order otherwise the result order is undefined.
    ///
    /// # Arguments
    /// * `lists` - Lists to be merged in a single sorted one
    pub fn new<I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'a L>,
        L: AsRef<[T]> + ?Sized + 'a,
    {
        let lists = Vec::from_iter(lists.into_iter().map(|l| l.as_ref()));
        let mut candidates = BinaryHeap::with_capacity(lists.len());

        for (list_id, list) in lists.iter().enumerate() {
            if let Some(value) = list.first() {
                candidates.push(Candidate {
                    value,
                    list_id,
                    position: 0,
                });
            }
        }

        let remaining = lists.iter().map(|l| l.len()).sum();

        return BinaryHeapMerger {
            lists,
            candidates,
            remaining,
        };
    }
}

impl<'a, T: Ord> Iterator for BinaryHeapMerger<'a, T> {
    type Item = &'a T;

    /// Returns the next item from the inputs in ascending order.
    fn next(&mut self) -> Option<Self::Item> {
        let Candidate {
            value,
            list_id,
            position,
        } = self.candidates.pop()?;

        let position = position + 1;
        if let Some(next) = self.lists[list_id].get(position) {
            self.candidates.push(Candidate {
                value: next,
                list_id,
                position,
            });
        }
        self.remaining -= 1;

        return Some(value);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: Ord> ExactSizeIterator for BinaryHeapMerger<'a, T> {}

impl<'a, T: Ord> FusedIterator for BinaryHeapMerger<'a, T> {}

/// Merges sorted lists into a newly allocated sorted vector.
/// Inputs are left untouched, an empty set of lists (or a set of empty lists) gives an empty vector.
pub fn merge<T, L>(lists: &[L]) -> Vec<T>
where
    T: Ord + Clone,
    L: AsRef<[T]>,
{
    let merger = BinaryHeapMerger::new(lists);
    log::trace!("merging {} lists ({} items)", lists.len(), merger.len());

    let mut result = Vec::with_capacity(merger.len());
    result.extend(merger.cloned());

    return result;
}
