//! DELETE operations for UnrolledList.
//!
//! This module contains element removal, the rebalancing that keeps
//! interior nodes at least half full (merging, redistributing and
//! borrowing between neighbours), and unlinking of emptied nodes.
//!
//! Removal never allocates: nodes only ever get freed here, and the arena
//! keeps room to record every freed node.

use crate::compact_arena::{NodeId, NULL_NODE};
use crate::types::{Cursor, UnrolledList};

impl<T, const N: usize> UnrolledList<T, N> {
    /// Remove and return the element at `cursor`.
    ///
    /// Afterwards the cursor points at the element that followed the removed
    /// one, or at the end if it was the last. Returns `None` and leaves the
    /// list alone if the cursor does not denote an element.
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut list: UnrolledList<i32, 4> = (0..10).collect();
    /// let mut cursor = list.first();
    /// list.move_next(&mut cursor);
    /// assert_eq!(list.remove(&mut cursor), Some(1));
    /// assert_eq!(list.get(&cursor), Some(&2));
    /// ```
    pub fn remove(&mut self, cursor: &mut Cursor) -> Option<T> {
        let id = cursor.node;
        let value = self.get_node_mut(id)?.remove_at(cursor.offset)?;
        self.len -= 1;

        let (node, offset) = self.rebalance(id, cursor.offset as isize);
        *cursor = self.fixup_cursor(node, offset);

        self.debug_check("remove");
        self.debug_check_cursor(cursor, "remove");
        Some(value)
    }

    /// Remove and return the first element.
    pub fn remove_beginning(&mut self) -> Option<T> {
        let first = self.first;
        let node = self.get_node_mut(first)?;
        let value = node.remove_at(0)?;
        let emptied = node.is_empty();
        self.len -= 1;
        if emptied {
            self.unlink_node(first);
        }
        self.debug_check("remove_beginning");
        Some(value)
    }

    /// Remove and return the last element.
    pub fn remove_end(&mut self) -> Option<T> {
        let last = self.last;
        let node = self.get_node_mut(last)?;
        let value = node.pop_back()?;
        let emptied = node.is_empty();
        self.len -= 1;
        if emptied {
            self.unlink_node(last);
        }
        self.debug_check("remove_end");
        Some(value)
    }

    // ============================================================================
    // REBALANCING
    // ============================================================================

    /// Restore node fill after an element was taken out of node `id` at
    /// `offset`.
    ///
    /// Returns the position of the element that followed the removed one as
    /// a possibly out-of-range `(node, offset)` pair for `fixup_cursor`.
    fn rebalance(&mut self, id: NodeId, offset: isize) -> (NodeId, isize) {
        let Some(node) = self.get_node(id) else {
            return (id, offset);
        };
        let (prev, next) = (node.prev, node.next);

        if prev == NULL_NODE || next == NULL_NODE {
            if node.is_empty() {
                // Resolve the position while the node is still linked.
                let cursor = self.fixup_cursor(id, offset);
                self.unlink_node(id);
                return (cursor.node, cursor.offset as isize);
            }
            return (id, offset);
        }

        let prev_len = self.node_len(prev);
        let len = node.len();
        let next_len = self.node_len(next);
        let sum = prev_len + len + next_len;

        if sum <= N {
            self.merge_neighbours(prev, id, next);
            (id, offset + prev_len as isize)
        } else if sum <= 2 * N {
            let shift = self.redistribute_neighbours(prev, id, next, sum);
            (id, offset + shift)
        } else if len < N / 2 {
            let shift = self.borrow_from_neighbour(prev, id, next);
            (id, offset + shift)
        } else {
            (id, offset)
        }
    }

    /// Move everything from `prev` and `next` into `id` and free both.
    fn merge_neighbours(&mut self, prev: NodeId, id: NodeId, next: NodeId) {
        debug_assert!(self.node_len(prev) + self.node_len(id) + self.node_len(next) <= N);
        if let Some((center, before)) = self.arena.get_pair_mut(id, prev) {
            center.prepend(before);
        }
        if let Some((center, after)) = self.arena.get_pair_mut(id, next) {
            center.append(after);
        }
        trace!("merged nodes {} and {} into {}", prev, next, id);
        self.unlink_node(prev);
        self.unlink_node(next);
    }

    /// Spread the `sum` elements of three neighbours over `prev` and `id`,
    /// with `prev` getting `sum / 2`, then free `next`.
    ///
    /// Returns how far the elements that stayed in `id` moved within it.
    fn redistribute_neighbours(
        &mut self,
        prev: NodeId,
        id: NodeId,
        next: NodeId,
        sum: usize,
    ) -> isize {
        let target = sum / 2;
        let prev_len = self.node_len(prev);
        let shift = if prev_len < target {
            let needed = target - prev_len;
            let from_center = needed.min(self.node_len(id));
            if let Some((center, before)) = self.arena.get_pair_mut(id, prev) {
                center.move_front_to_back_of(from_center, before);
            }
            if needed > from_center {
                if let Some((after, before)) = self.arena.get_pair_mut(next, prev) {
                    after.move_front_to_back_of(needed - from_center, before);
                }
            }
            -(needed as isize)
        } else {
            let surplus = prev_len - target;
            if let Some((before, center)) = self.arena.get_pair_mut(prev, id) {
                before.move_back_to_front_of(surplus, center);
            }
            surplus as isize
        };
        if let Some((center, after)) = self.arena.get_pair_mut(id, next) {
            center.append(after);
        }
        trace!("redistributed {} elements over nodes {} and {}", sum, prev, id);
        self.unlink_node(next);
        shift
    }

    /// Even out an underfull `id` with whichever neighbour holds more.
    ///
    /// Only reached when the three nodes hold more than `2 * N` elements, so
    /// the pair always has more than `N` and both halves stay at least half
    /// full. Returns how far the elements of `id` moved within it.
    fn borrow_from_neighbour(&mut self, prev: NodeId, id: NodeId, next: NodeId) -> isize {
        let len = self.node_len(id);
        let prev_len = self.node_len(prev);
        let next_len = self.node_len(next);

        if prev_len >= next_len {
            let surplus = prev_len - (prev_len + len) / 2;
            if let Some((before, center)) = self.arena.get_pair_mut(prev, id) {
                before.move_back_to_front_of(surplus, center);
            }
            trace!("node {} borrowed {} elements from {}", id, surplus, prev);
            surplus as isize
        } else {
            let needed = (len + next_len) / 2 - len;
            if let Some((after, center)) = self.arena.get_pair_mut(next, id) {
                after.move_front_to_back_of(needed, center);
            }
            trace!("node {} borrowed {} elements from {}", id, needed, next);
            0
        }
    }

    /// Unlink node `id` from the chain and free it.
    fn unlink_node(&mut self, id: NodeId) {
        let Some(node) = self.arena.deallocate(id) else {
            return;
        };
        debug_assert!(node.is_empty(), "unlinking a node that still holds elements");
        match self.get_node_mut(node.prev) {
            Some(prev) => prev.next = node.next,
            None => self.first = node.next,
        }
        match self.get_node_mut(node.next) {
            Some(next) => next.prev = node.prev,
            None => self.last = node.prev,
        }
        trace!("unlinked node {}", id);
    }
}
