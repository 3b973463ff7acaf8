//! Node-level operations for UnrolledList.
//!
//! A node keeps its live elements packed at the front of its slot array.
//! Everything here works within one node, or moves elements between two
//! nodes the caller already holds; the chain links are maintained by the
//! list.

use crate::compact_arena::NULL_NODE;
use crate::types::Node;

impl<T, const N: usize> Node<T, N> {
    /// Creates an empty, unlinked node.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            len: 0,
            prev: NULL_NODE,
            next: NULL_NODE,
        }
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns the number of elements in this node.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if this node holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if this node is at capacity.
    pub fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Returns true if this node is below minimum occupancy.
    pub fn is_underfull(&self) -> bool {
        self.len < Self::min_len()
    }

    /// Returns the minimum number of elements an interior node should have.
    pub fn min_len() -> usize {
        N / 2
    }

    // ============================================================================
    // ELEMENT ACCESS
    // ============================================================================

    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset < self.len {
            self.slots[offset].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset < self.len {
            self.slots[offset].as_mut()
        } else {
            None
        }
    }

    /// Iterate over the live elements in order.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    // ============================================================================
    // INSERT / REMOVE WITHIN THE NODE
    // ============================================================================

    /// Insert `value` at `offset`, shifting the elements at and above it up.
    pub fn insert_at(&mut self, offset: usize, value: T) {
        debug_assert!(!self.is_full(), "insert into full node");
        debug_assert!(offset <= self.len);
        self.open_gap(offset, 1);
        self.slots[offset] = Some(value);
        self.len += 1;
    }

    /// Append `value` after the last element.
    pub fn push_back(&mut self, value: T) {
        debug_assert!(!self.is_full(), "push into full node");
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Remove the element at `offset`, shifting the elements above it down.
    pub fn remove_at(&mut self, offset: usize) -> Option<T> {
        if offset >= self.len {
            return None;
        }
        let value = self.slots[offset].take();
        self.slots[offset..self.len].rotate_left(1);
        self.len -= 1;
        value
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.slots[self.len].take()
    }

    /// Shift elements at and above `offset` up by `count`, leaving empty slots.
    fn open_gap(&mut self, offset: usize, count: usize) {
        debug_assert!(self.len + count <= N);
        self.slots[offset..self.len + count].rotate_right(count);
    }

    // ============================================================================
    // SPLITTING AND MERGING HELPERS
    // ============================================================================

    /// Split this full node, returning a new node with the upper
    /// `len - len / 2` elements. This node keeps the lower `len / 2`.
    pub fn split(&mut self) -> Node<T, N> {
        let keep = self.len / 2;
        let mut right = Node::new();
        for (dst, src) in right.slots.iter_mut().zip(&mut self.slots[keep..self.len]) {
            *dst = src.take();
        }
        right.len = self.len - keep;
        self.len = keep;
        right
    }

    /// Move the first `count` elements of `self` to the end of `dst`.
    pub fn move_front_to_back_of(&mut self, count: usize, dst: &mut Node<T, N>) {
        debug_assert!(count <= self.len);
        debug_assert!(dst.len + count <= N);
        for i in 0..count {
            dst.slots[dst.len + i] = self.slots[i].take();
        }
        dst.len += count;
        self.slots[..self.len].rotate_left(count);
        self.len -= count;
    }

    /// Move the last `count` elements of `self` to the front of `dst`.
    pub fn move_back_to_front_of(&mut self, count: usize, dst: &mut Node<T, N>) {
        debug_assert!(count <= self.len);
        debug_assert!(dst.len + count <= N);
        dst.open_gap(0, count);
        let start = self.len - count;
        for i in 0..count {
            dst.slots[i] = self.slots[start + i].take();
        }
        dst.len += count;
        self.len = start;
    }

    /// Move every element of `other` to the end of `self`.
    pub fn append(&mut self, other: &mut Node<T, N>) {
        other.move_front_to_back_of(other.len, self);
    }

    /// Move every element of `other` to the front of `self`.
    pub fn prepend(&mut self, other: &mut Node<T, N>) {
        other.move_back_to_front_of(other.len, self);
    }
}

impl<T, const N: usize> Default for Node<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
