//! Construction and lifecycle logic for UnrolledList.
//!
//! Creating a list never allocates; the first node appears with the first
//! insertion. Clearing or dropping the list releases every node at once
//! through its arena.

use crate::compact_arena::{CompactArena, NULL_NODE};
use crate::error::{ListResult, ListResultExt};
use crate::types::{UnrolledList, MIN_CAPACITY};

impl<T, const N: usize> UnrolledList<T, N> {
    /// Evaluated on first use of a given `N`; rejects capacities the
    /// rebalance arithmetic cannot handle.
    const VALID_CAPACITY: () = assert!(
        N >= MIN_CAPACITY,
        "UnrolledList needs at least 2 elements per node"
    );

    /// Create an empty list. No memory is allocated until the first insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let list = UnrolledList::<u32>::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.node_count(), 0);
    /// ```
    pub const fn new() -> Self {
        let () = Self::VALID_CAPACITY;
        Self {
            len: 0,
            first: NULL_NODE,
            last: NULL_NODE,
            arena: CompactArena::new(),
        }
    }

    /// Create an empty list that will never hold more than `max_nodes` nodes.
    ///
    /// Once the limit is reached, any insertion that needs a new node fails
    /// with [`ListError::AllocationError`](crate::ListError::AllocationError)
    /// and leaves the list unchanged.
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list: UnrolledList<u8, 2> = UnrolledList::with_node_limit(1);
    /// list.insert_end(1).unwrap();
    /// list.insert_end(2).unwrap();
    /// assert!(list.insert_end(3).is_err());
    /// assert_eq!(list.len(), 2);
    /// ```
    pub const fn with_node_limit(max_nodes: usize) -> Self {
        let () = Self::VALID_CAPACITY;
        Self {
            len: 0,
            first: NULL_NODE,
            last: NULL_NODE,
            arena: CompactArena::with_limit(max_nodes),
        }
    }

    /// Remove every element and release all nodes.
    ///
    /// Any node limit set with [`with_node_limit`](Self::with_node_limit)
    /// still applies afterwards.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.len = 0;
        self.first = NULL_NODE;
        self.last = NULL_NODE;
        self.debug_check("clear");
    }

    /// Exchange the entire contents of two lists in O(1).
    ///
    /// No node is copied. Cursors taken from either list keep their
    /// positions but now refer to the other list.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
        self.debug_check("swap");
        other.debug_check("swap");
    }

    /// Append every item of `iter`, stopping at the first allocation failure.
    ///
    /// Items inserted before the failure stay in the list.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> ListResult<()> {
        for value in iter {
            self.insert_end(value).with_operation("extend")?;
        }
        Ok(())
    }
}

impl<T, const N: usize> Default for UnrolledList<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Extend<T> for UnrolledList<T, N> {
    /// # Panics
    ///
    /// Panics if a node cannot be allocated.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(e) = self.try_extend(iter) {
            panic!("{}", e);
        }
    }
}

impl<'a, T: Copy + 'a, const N: usize> Extend<&'a T> for UnrolledList<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> FromIterator<T> for UnrolledList<T, N> {
    /// # Panics
    ///
    /// Panics if a node cannot be allocated.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
