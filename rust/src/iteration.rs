//! Cursor navigation and iterator implementations for UnrolledList.
//!
//! Cursors step one element at a time and cross node boundaries
//! transparently. The borrowing iterator is built on the same stepping, so
//! it visits nodes in chain order and slots in order within each node.

use std::iter::FusedIterator;

use crate::compact_arena::{NodeId, NULL_NODE};
use crate::types::{Cursor, UnrolledList};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over references to the elements of an [`UnrolledList`].
#[derive(Debug)]
pub struct Iter<'a, T, const N: usize> {
    list: &'a UnrolledList<T, N>,
    front: Cursor,
    back: Cursor,
    remaining: usize,
}

/// Owning iterator over the elements of an [`UnrolledList`].
#[derive(Debug)]
pub struct IntoIter<T, const N: usize> {
    list: UnrolledList<T, N>,
}

// ============================================================================
// CURSOR NAVIGATION
// ============================================================================

impl<T, const N: usize> UnrolledList<T, N> {
    /// Cursor at the first element, or the end cursor if the list is empty.
    pub fn first(&self) -> Cursor {
        if self.first == NULL_NODE {
            Cursor::END
        } else {
            Cursor::new(self.first, 0)
        }
    }

    /// Cursor at the last element, or the end cursor if the list is empty.
    pub fn last(&self) -> Cursor {
        match self.get_node(self.last) {
            Some(node) if !node.is_empty() => Cursor::new(self.last, node.len() - 1),
            _ => Cursor::END,
        }
    }

    /// The end cursor, one past the last element.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Returns true if `cursor` is past the last element.
    pub fn is_at_end(&self, cursor: &Cursor) -> bool {
        cursor.is_end()
    }

    /// Returns true if `cursor` is at the first element. In an empty list
    /// the end cursor is also the beginning.
    pub fn is_at_beginning(&self, cursor: &Cursor) -> bool {
        cursor.node == self.first && cursor.offset == 0
    }

    /// Step `cursor` forward by one element.
    ///
    /// Stepping from the last element reaches the end cursor. Returns false
    /// and leaves the cursor alone if it was already at the end.
    pub fn move_next(&self, cursor: &mut Cursor) -> bool {
        let Some(node) = self.get_node(cursor.node) else {
            return false;
        };
        if cursor.offset + 1 < node.len() {
            cursor.offset += 1;
        } else if node.next == NULL_NODE {
            *cursor = Cursor::END;
        } else {
            *cursor = Cursor::new(node.next, 0);
        }
        true
    }

    /// Step `cursor` backward by one element.
    ///
    /// From the end cursor this reaches the last element. Returns false and
    /// leaves the cursor alone if it was already at the first element.
    pub fn move_prev(&self, cursor: &mut Cursor) -> bool {
        if cursor.is_end() {
            let last = self.last();
            if last.is_end() {
                return false;
            }
            *cursor = last;
            return true;
        }
        let Some(node) = self.get_node(cursor.node) else {
            return false;
        };
        if cursor.offset > 0 {
            cursor.offset -= 1;
            return true;
        }
        match self.node_len(node.prev) {
            0 => false,
            prev_len => {
                *cursor = Cursor::new(node.prev, prev_len - 1);
                true
            }
        }
    }

    /// Bring a `(node, offset)` pair whose offset may lie outside its node
    /// back to a canonical cursor for the same logical position.
    ///
    /// Moves forward while the offset is at or past the node's length and
    /// backward while it is negative, so a shrunken, merged or emptied node
    /// resolves to the element that now holds the position, or to the end.
    pub(crate) fn fixup_cursor(&self, mut node: NodeId, mut offset: isize) -> Cursor {
        while node != NULL_NODE {
            let Some(current) = self.get_node(node) else {
                break;
            };
            let len = current.len() as isize;
            if offset < len {
                break;
            }
            offset -= len;
            node = current.next;
        }
        while node != self.first && offset < 0 {
            node = match self.get_node(node) {
                Some(current) => current.prev,
                None => self.last,
            };
            offset += self.node_len(node) as isize;
        }

        if node == NULL_NODE {
            return Cursor::END;
        }
        debug_assert!(offset >= 0, "cursor fixup ran off the front of the list");
        Cursor::new(node, offset.max(0) as usize)
    }

    // ============================================================================
    // ITERATOR CONSTRUCTORS
    // ============================================================================

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            list: self,
            front: self.first(),
            back: self.last(),
            remaining: self.len,
        }
    }
}

// ============================================================================
// ITERATOR IMPLEMENTATIONS
// ============================================================================

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let item = list.get(&self.front)?;
        list.move_next(&mut self.front);
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for Iter<'_, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let item = list.get(&self.back)?;
        list.move_prev(&mut self.back);
        self.remaining -= 1;
        Some(item)
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.remove_beginning()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        self.list.remove_end()
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<'a, T, const N: usize> IntoIterator for &'a UnrolledList<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const N: usize> IntoIterator for UnrolledList<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterate_across_nodes() {
        let list: UnrolledList<i32, 3> = (0..10).collect();
        assert!(list.node_count() >= 4);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), (0..10).rev().collect::<Vec<_>>());
        assert_eq!(list.iter().len(), 10);
    }

    #[test]
    fn test_iterate_from_both_ends() {
        let list: UnrolledList<i32, 2> = (0..5).collect();
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_cursor_walk_forward_and_back() {
        let list: UnrolledList<i32, 4> = (0..9).collect();
        let mut cursor = list.first();
        assert!(list.is_at_beginning(&cursor));
        assert!(!list.move_prev(&mut cursor));

        for expected in 0..9 {
            assert_eq!(list.get(&cursor), Some(&expected));
            assert!(list.move_next(&mut cursor));
        }
        assert!(list.is_at_end(&cursor));
        assert!(!list.move_next(&mut cursor));

        for expected in (0..9).rev() {
            assert!(list.move_prev(&mut cursor));
            assert_eq!(list.get(&cursor), Some(&expected));
        }
        assert!(list.is_at_beginning(&cursor));
    }

    #[test]
    fn test_empty_list_cursors() {
        let list: UnrolledList<i32, 4> = UnrolledList::new();
        let mut cursor = list.first();
        assert!(cursor.is_end());
        assert_eq!(list.last(), Cursor::END);
        assert!(list.is_at_beginning(&cursor));
        assert!(!list.move_next(&mut cursor));
        assert!(!list.move_prev(&mut cursor));
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn test_fixup_walks_both_directions() {
        let list: UnrolledList<i32, 4> = (0..8).collect();
        // Two full nodes: [0 1 2 3] [4 5 6 7]
        let first = list.first;
        let second = list.last;

        assert_eq!(list.fixup_cursor(first, 5), Cursor::new(second, 1));
        assert_eq!(list.fixup_cursor(first, 8), Cursor::END);
        assert_eq!(list.fixup_cursor(second, -1), Cursor::new(first, 3));
        assert_eq!(list.fixup_cursor(second, 2), Cursor::new(second, 2));
    }

    #[test]
    fn test_into_iter_drains_both_ends() {
        let list: UnrolledList<String, 3> = (0..6).map(|i| i.to_string()).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next().as_deref(), Some("0"));
        assert_eq!(iter.next_back().as_deref(), Some("5"));
        assert_eq!(iter.collect::<Vec<_>>(), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_iterators_debug_format() {
        let list: UnrolledList<i32, 2> = (0..3).collect();
        let mut iter = list.iter();
        iter.next();
        let rendered = format!("{:?}", iter);
        assert!(rendered.starts_with("Iter"));
        assert!(rendered.contains("remaining: 2"));

        let rendered = format!("{:?}", list.into_iter());
        assert!(rendered.starts_with("IntoIter"));
        assert!(rendered.contains("len: 3"));
    }
}
