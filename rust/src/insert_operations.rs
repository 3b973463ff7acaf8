//! INSERT operations for UnrolledList.
//!
//! Every insertion that needs a new node reserves arena space before any
//! element moves, so an allocation failure returns early with the list
//! exactly as it was.

use crate::compact_arena::{NodeId, NULL_NODE};
use crate::error::ListResult;
use crate::types::{Cursor, Node, UnrolledList};

impl<T, const N: usize> UnrolledList<T, N> {
    /// Insert `value` before the first element.
    ///
    /// If the first node is full a new, otherwise empty node becomes the
    /// first node.
    pub fn insert_beginning(&mut self, value: T) -> ListResult<()> {
        if self.first == NULL_NODE {
            self.insert_sole_node()?;
        } else if self.node_len(self.first) >= N {
            self.insert_empty_node_before(self.first)?;
        }
        let first = self.first;
        self.node_mut(first)?.insert_at(0, value);
        self.len += 1;
        self.debug_check("insert_beginning");
        Ok(())
    }

    /// Insert `value` after the last element.
    ///
    /// If the last node is full a new, otherwise empty node becomes the
    /// last node.
    pub fn insert_end(&mut self, value: T) -> ListResult<()> {
        if self.last == NULL_NODE {
            self.insert_sole_node()?;
        } else if self.node_len(self.last) >= N {
            self.insert_empty_node_after(self.last)?;
        }
        let last = self.last;
        self.node_mut(last)?.push_back(value);
        self.len += 1;
        self.debug_check("insert_end");
        Ok(())
    }

    /// Insert `value` right after the element at `cursor`.
    ///
    /// The cursor keeps pointing at the element it pointed at before; the
    /// new element is the one after it.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is the end cursor or does not denote an element.
    pub fn insert_after(&mut self, cursor: &mut Cursor, value: T) -> ListResult<()> {
        self.assert_element_cursor(cursor, "insert_after");
        if self.node_len(cursor.node) >= N {
            self.split_node(cursor)?;
        }
        let offset = cursor.offset + 1;
        self.node_mut(cursor.node)?.insert_at(offset, value);
        self.len += 1;
        self.debug_check("insert_after");
        self.debug_check_cursor(cursor, "insert_after");
        Ok(())
    }

    /// Insert `value` right before the element at `cursor`.
    ///
    /// The cursor keeps pointing at the element it pointed at before. On the
    /// end cursor this is [`insert_end`](Self::insert_end).
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is neither the end cursor nor denotes an element.
    pub fn insert_before(&mut self, cursor: &mut Cursor, value: T) -> ListResult<()> {
        if cursor.is_end() {
            return self.insert_end(value);
        }
        self.assert_element_cursor(cursor, "insert_before");
        if self.node_len(cursor.node) >= N {
            self.split_node(cursor)?;
        }
        let offset = cursor.offset;
        self.node_mut(cursor.node)?.insert_at(offset, value);
        cursor.offset += 1;
        self.len += 1;
        self.debug_check("insert_before");
        self.debug_check_cursor(cursor, "insert_before");
        Ok(())
    }

    // ============================================================================
    // HELPERS FOR INSERT OPERATIONS
    // ============================================================================

    fn assert_element_cursor(&self, cursor: &Cursor, operation: &str) {
        assert!(
            cursor.offset < self.node_len(cursor.node),
            "{} needs a cursor at an element, got {:?}",
            operation,
            cursor
        );
    }

    /// Split the full node under `cursor` in two, moving the upper half to
    /// a new node linked right after it. The cursor follows its element.
    fn split_node(&mut self, cursor: &mut Cursor) -> ListResult<()> {
        let id = cursor.node;
        self.arena.reserve()?;

        let node = self.node_mut(id)?;
        debug_assert!(node.is_full());
        let right = node.split();
        let retained = node.len();

        let right_id = self.arena.allocate(right);
        self.link_after(id, right_id);
        trace!("split node {}: kept {}, rest moved to node {}", id, retained, right_id);

        if cursor.offset >= retained {
            cursor.node = right_id;
            cursor.offset -= retained;
        }
        Ok(())
    }

    /// Allocate the only node of an empty list.
    fn insert_sole_node(&mut self) -> ListResult<NodeId> {
        self.arena.reserve()?;
        let id = self.arena.allocate(Node::new());
        self.first = id;
        self.last = id;
        Ok(id)
    }

    /// Allocate an empty node and link it right after `id`.
    fn insert_empty_node_after(&mut self, id: NodeId) -> ListResult<NodeId> {
        self.arena.reserve()?;
        let new_id = self.arena.allocate(Node::new());
        self.link_after(id, new_id);
        Ok(new_id)
    }

    /// Allocate an empty node and link it right before `id`.
    fn insert_empty_node_before(&mut self, id: NodeId) -> ListResult<NodeId> {
        self.arena.reserve()?;
        let new_id = self.arena.allocate(Node::new());
        self.link_before(id, new_id);
        Ok(new_id)
    }

    fn link_after(&mut self, id: NodeId, new_id: NodeId) {
        let next = self.get_node(id).map(|node| node.next).unwrap_or(NULL_NODE);
        if let Some(new_node) = self.get_node_mut(new_id) {
            new_node.prev = id;
            new_node.next = next;
        }
        if let Some(node) = self.get_node_mut(id) {
            node.next = new_id;
        }
        match self.get_node_mut(next) {
            Some(next_node) => next_node.prev = new_id,
            None => self.last = new_id,
        }
    }

    fn link_before(&mut self, id: NodeId, new_id: NodeId) {
        let prev = self.get_node(id).map(|node| node.prev).unwrap_or(NULL_NODE);
        if let Some(new_node) = self.get_node_mut(new_id) {
            new_node.prev = prev;
            new_node.next = id;
        }
        if let Some(node) = self.get_node_mut(id) {
            node.prev = new_id;
        }
        match self.get_node_mut(prev) {
            Some(prev_node) => prev_node.next = new_id,
            None => self.first = new_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<const N: usize>(list: &UnrolledList<i32, N>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_insert_end_fills_nodes_in_order() {
        let mut list: UnrolledList<i32, 4> = UnrolledList::new();
        for i in 0..10 {
            list.insert_end(i).unwrap();
        }
        assert_eq!(list.node_sizes(), [4, 4, 2]);
        assert_eq!(contents(&list), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_insert_beginning_adds_front_node() {
        let mut list: UnrolledList<i32, 4> = UnrolledList::new();
        for i in (0..6).rev() {
            list.insert_beginning(i).unwrap();
        }
        assert_eq!(list.node_sizes(), [2, 4]);
        assert_eq!(contents(&list), [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_insert_into_full_node_splits() {
        let mut list: UnrolledList<i32, 4> = [10, 20, 30, 40].into_iter().collect();
        assert_eq!(list.node_sizes(), [4]);

        let mut cursor = list.first();
        list.move_next(&mut cursor);
        list.insert_after(&mut cursor, 25).unwrap();

        assert_eq!(list.node_sizes(), [3, 2]);
        assert_eq!(contents(&list), [10, 20, 25, 30, 40]);
        assert_eq!(list.get(&cursor), Some(&20));
    }

    #[test]
    fn test_split_moves_cursor_to_new_node() {
        let mut list: UnrolledList<i32, 4> = [1, 2, 3, 4].into_iter().collect();
        let first_node = list.first;

        let mut cursor = list.last();
        list.insert_before(&mut cursor, 35).unwrap();

        assert_ne!(cursor.node, first_node);
        assert_eq!(cursor.offset, 2);
        assert_eq!(list.get(&cursor), Some(&4));
        assert_eq!(contents(&list), [1, 2, 3, 35, 4]);
        assert_eq!(list.node_sizes(), [2, 3]);
    }

    #[test]
    fn test_insert_before_end_appends() {
        let mut list: UnrolledList<i32, 3> = (0..3).collect();
        let mut cursor = list.end();
        list.insert_before(&mut cursor, 3).unwrap();
        assert!(cursor.is_end());
        assert_eq!(contents(&list), [0, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "insert_after needs a cursor at an element")]
    fn test_insert_after_end_panics() {
        let mut list: UnrolledList<i32, 3> = (0..3).collect();
        let mut cursor = list.end();
        let _ = list.insert_after(&mut cursor, 3);
    }

    #[test]
    fn test_failed_split_leaves_list_untouched() {
        let mut list: UnrolledList<i32, 4> = UnrolledList::with_node_limit(1);
        list.try_extend(0..4).unwrap();
        let mut cursor = list.first();
        list.move_next(&mut cursor);
        let before = cursor;

        let err = list.insert_after(&mut cursor, 99).unwrap_err();
        assert!(err.is_allocation_error());
        assert_eq!(cursor, before);
        assert_eq!(contents(&list), [0, 1, 2, 3]);
        assert_eq!(list.node_sizes(), [4]);
        assert!(list.check_invariants());
    }

    #[test]
    fn test_failed_first_node_allocation() {
        let mut list: UnrolledList<i32, 4> = UnrolledList::with_node_limit(0);
        assert!(list.insert_beginning(1).unwrap_err().is_allocation_error());
        assert!(list.insert_end(1).unwrap_err().is_allocation_error());
        assert!(list.is_empty());
        assert_eq!(list.node_count(), 0);
    }
}
