//! GET operations for UnrolledList.
//!
//! Element access is cursor based: there is deliberately no index
//! operator, since a position inside a node says nothing about the
//! element's global index.

use crate::compact_arena::{CompactArenaStats, NodeId};
use crate::error::{ListError, ListResult};
use crate::types::{Cursor, Node, UnrolledList};

impl<T, const N: usize> UnrolledList<T, N> {
    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes currently in the chain.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns the number of elements each node can hold.
    pub const fn node_capacity(&self) -> usize {
        N
    }

    /// Returns the first element, if any.
    pub fn front(&self) -> Option<&T> {
        self.get(&self.first())
    }

    /// Returns the last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.get(&self.last())
    }

    /// Returns a mutable reference to the first element, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let cursor = self.first();
        self.get_mut(&cursor)
    }

    /// Returns a mutable reference to the last element, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let cursor = self.last();
        self.get_mut(&cursor)
    }

    /// Returns the element at `cursor`, or `None` at the end position.
    ///
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let list: UnrolledList<char, 4> = "abc".chars().collect();
    /// let mut cursor = list.first();
    /// assert_eq!(list.get(&cursor), Some(&'a'));
    /// list.move_next(&mut cursor);
    /// list.move_next(&mut cursor);
    /// list.move_next(&mut cursor);
    /// assert_eq!(list.get(&cursor), None);
    /// ```
    pub fn get(&self, cursor: &Cursor) -> Option<&T> {
        self.get_node(cursor.node)?.get(cursor.offset)
    }

    /// Returns a mutable reference to the element at `cursor`.
    pub fn get_mut(&mut self, cursor: &Cursor) -> Option<&mut T> {
        self.get_node_mut(cursor.node)?.get_mut(cursor.offset)
    }

    /// Overwrite the element at `cursor`, returning the previous value.
    ///
    /// Returns `Err(value)` if the cursor does not denote an element.
    pub fn replace(&mut self, cursor: &Cursor, value: T) -> Result<T, T> {
        match self.get_mut(cursor) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    /// Get statistics for the node arena.
    pub fn arena_stats(&self) -> CompactArenaStats {
        self.arena.stats()
    }

    // ============================================================================
    // NODE ACCESS
    // ============================================================================

    pub(crate) fn get_node(&self, id: NodeId) -> Option<&Node<T, N>> {
        self.arena.get(id)
    }

    pub(crate) fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node<T, N>> {
        self.arena.get_mut(id)
    }

    /// Node `id`, or a corruption error if it is not allocated.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> ListResult<&mut Node<T, N>> {
        self.arena.get_mut(id).ok_or_else(|| {
            ListError::corrupted_list("Node chain", &format!("node {} is not allocated", id))
        })
    }

    /// Length of node `id`, zero if it does not exist.
    pub(crate) fn node_len(&self, id: NodeId) -> usize {
        self.get_node(id).map(Node::len).unwrap_or(0)
    }
}
