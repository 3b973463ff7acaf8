//! Validation and debugging utilities for UnrolledList.
//!
//! This module contains invariant checking for the node chain, cursor
//! validation, and the helpers tests use to inspect node layout.

use crate::compact_arena::NULL_NODE;
use crate::error::{ListError, ListResult, ListResultExt};
use crate::types::{Cursor, UnrolledList};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<T, const N: usize> UnrolledList<T, N> {
    /// Check if the list maintains its structural invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> ListResult<()> {
        self.check_chain_ends()?;

        let mut count = 0;
        let mut nodes = 0;
        let mut prev = NULL_NODE;
        let mut id = self.first;
        while id != NULL_NODE {
            if nodes >= self.arena.len() {
                return Err(ListError::corrupted_list(
                    "Node chain",
                    &format!("walked {} nodes without reaching the end", nodes),
                ));
            }
            let node = self.get_node(id).ok_or_else(|| {
                ListError::corrupted_list("Node chain", &format!("node {} is not allocated", id))
            })?;

            if node.prev != prev {
                return Err(ListError::corrupted_list(
                    "Node chain",
                    &format!("node {} links back to {} instead of {}", id, node.prev, prev),
                ));
            }
            if node.is_empty() || node.len() > N {
                return Err(ListError::data_integrity(
                    "Node size",
                    &format!("node {} holds {} elements, capacity {}", id, node.len(), N),
                ));
            }
            if node.elements().count() != node.len() {
                return Err(ListError::data_integrity(
                    "Node slots",
                    &format!("node {} has holes among its first {} slots", id, node.len()),
                ));
            }
            if id != self.first && id != self.last && node.is_underfull() {
                return Err(ListError::data_integrity(
                    "Node fill",
                    &format!("interior node {} holds {} of at least {}", id, node.len(), N / 2),
                ));
            }

            count += node.len();
            nodes += 1;
            prev = id;
            id = node.next;
        }

        if prev != self.last {
            return Err(ListError::corrupted_list(
                "Node chain",
                &format!("chain ends at {} but last is {}", prev, self.last),
            ));
        }
        if count != self.len {
            return Err(ListError::data_integrity(
                "Element count",
                &format!("{} in nodes vs {} recorded", count, self.len),
            ));
        }
        if nodes != self.arena.len() {
            return Err(ListError::data_integrity(
                "Arena consistency",
                &format!("{} nodes in chain vs {} in arena", nodes, self.arena.len()),
            ));
        }
        // Every node but the two ends is at least half full.
        if nodes > 2 && count < (nodes - 2) * (N / 2) {
            return Err(ListError::data_integrity(
                "Node count",
                &format!("{} nodes for only {} elements", nodes, count),
            ));
        }
        Ok(())
    }

    fn check_chain_ends(&self) -> ListResult<()> {
        let empty = self.len == 0;
        if empty != (self.first == NULL_NODE) || empty != (self.last == NULL_NODE) {
            return Err(ListError::corrupted_list(
                "List ends",
                &format!(
                    "len {} with first {} and last {}",
                    self.len, self.first, self.last
                ),
            ));
        }
        if let Some(first) = self.get_node(self.first) {
            if first.prev != NULL_NODE {
                return Err(ListError::corrupted_list("List ends", "first node has a predecessor"));
            }
        }
        if let Some(last) = self.get_node(self.last) {
            if last.next != NULL_NODE {
                return Err(ListError::corrupted_list("List ends", "last node has a successor"));
            }
        }
        Ok(())
    }

    /// Check that `cursor` is the end cursor or denotes an element of this
    /// list.
    pub fn check_cursor(&self, cursor: &Cursor) -> ListResult<()> {
        if cursor.is_end() {
            return Ok(());
        }
        let node = self.get_node(cursor.node).ok_or_else(|| {
            ListError::invalid_cursor(&format!("node {} is not allocated", cursor.node))
        })?;
        if cursor.offset >= node.len() {
            return Err(ListError::invalid_cursor(&format!(
                "offset {} outside node {} of {} elements",
                cursor.offset,
                cursor.node,
                node.len()
            )));
        }

        let mut id = self.first;
        let mut steps = 0;
        while id != NULL_NODE && steps <= self.arena.len() {
            if id == cursor.node {
                return Ok(());
            }
            id = self.get_node(id).map(|node| node.next).unwrap_or(NULL_NODE);
            steps += 1;
        }
        Err(ListError::invalid_cursor(&format!(
            "node {} is not in the chain",
            cursor.node
        )))
    }

    /// Alias for check_invariants_detailed.
    pub fn validate(&self) -> ListResult<()> {
        self.check_invariants_detailed()
    }

    /// Returns the element count of each node in chain order.
    pub fn node_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut id = self.first;
        while let Some(node) = self.get_node(id) {
            sizes.push(node.len());
            id = node.next;
        }
        sizes
    }

    /// Prints the node chain for debugging.
    pub fn print_node_chain(&self)
    where
        T: std::fmt::Debug,
    {
        println!("UnrolledList ({} elements, {} nodes):", self.len, self.node_count());
        let mut id = self.first;
        while let Some(node) = self.get_node(id) {
            println!("  node {}: {:?}", id, node.elements().collect::<Vec<_>>());
            id = node.next;
        }
    }

    /// Validate the list after an operation, tagging any error with its name.
    pub fn validate_for_operation(&self, operation: &str) -> ListResult<()> {
        self.check_invariants_detailed().with_operation(operation)
    }

    /// Panics if `operation` left the list broken. Only active in tests and
    /// with the `testing` feature.
    #[inline]
    pub(crate) fn debug_check(&self, operation: &str) {
        if cfg!(any(test, feature = "testing")) {
            if let Err(e) = self.validate_for_operation(operation) {
                panic!("{}", e);
            }
        }
    }

    #[inline]
    pub(crate) fn debug_check_cursor(&self, cursor: &Cursor, operation: &str) {
        if cfg!(any(test, feature = "testing")) {
            if let Err(e) = self.check_cursor(cursor).with_operation(operation) {
                panic!("{}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_lists_validate() {
        let empty: UnrolledList<i32, 4> = UnrolledList::new();
        assert!(empty.validate().is_ok());
        assert!(empty.node_sizes().is_empty());

        let list: UnrolledList<i32, 4> = (0..20).collect();
        assert!(list.check_invariants());
        assert_eq!(list.node_sizes(), [4, 4, 4, 4, 4]);
    }

    #[test]
    fn test_detects_wrong_length() {
        let mut list: UnrolledList<i32, 4> = (0..6).collect();
        list.len = 7;
        match list.check_invariants_detailed() {
            Err(ListError::DataIntegrityError(msg)) => assert!(msg.contains("Element count")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_detects_broken_back_link() {
        let mut list: UnrolledList<i32, 2> = (0..6).collect();
        let last = list.last;
        list.get_node_mut(last).unwrap().prev = NULL_NODE;
        assert!(matches!(
            list.check_invariants_detailed(),
            Err(ListError::CorruptedList(_))
        ));
    }

    #[test]
    fn test_detects_underfull_interior_node() {
        let mut list: UnrolledList<i32, 4> = (0..12).collect();
        let middle = list.get_node(list.first).unwrap().next;
        list.get_node_mut(middle).unwrap().pop_back();
        list.get_node_mut(middle).unwrap().pop_back();
        list.get_node_mut(middle).unwrap().pop_back();
        list.len -= 3;
        assert!(matches!(
            list.check_invariants_detailed(),
            Err(ListError::DataIntegrityError(msg)) if msg.contains("Node fill")
        ));
    }

    #[test]
    fn test_check_cursor() {
        let list: UnrolledList<i32, 3> = (0..5).collect();
        assert!(list.check_cursor(&list.first()).is_ok());
        assert!(list.check_cursor(&list.last()).is_ok());
        assert!(list.check_cursor(&Cursor::END).is_ok());
        assert!(matches!(
            list.check_cursor(&Cursor::new(list.first, 3)),
            Err(ListError::InvalidCursor(_))
        ));
        assert!(list.check_cursor(&Cursor::new(1000, 0)).is_err());
    }

    #[test]
    fn test_validate_for_operation_names_operation() {
        let mut list: UnrolledList<i32, 3> = (0..5).collect();
        list.len = 0;
        let err = list.validate_for_operation("remove").unwrap_err();
        assert!(err.to_string().contains("Operation 'remove'"));
    }
}
