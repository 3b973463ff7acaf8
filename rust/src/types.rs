//! Core types and data structures for UnrolledList.
//!
//! This module contains the list, node and cursor definitions together with
//! the capacity constants shared by the rest of the crate.

use crate::compact_arena::{CompactArena, NodeId, NULL_NODE};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest node capacity the split and rebalance arithmetic supports.
pub const MIN_CAPACITY: usize = 2;

/// Default number of elements per node.
///
/// 72 bytes of element slots; together with the node header and the
/// allocator's bookkeeping this roughly fills a 128 byte cache line.
pub const DEFAULT_NODE_CAPACITY: usize = 72 / std::mem::size_of::<usize>();

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// An unrolled doubly linked list.
///
/// Elements live in nodes of `N` slots each. Nodes are chained in both
/// directions and stored in a per-list arena, so traversal touches few
/// cache lines and insertion or removal at a cursor only shifts elements
/// within one node.
///
/// # Type Parameters
///
/// * `T` - Element type. No ordering or comparison is required.
/// * `N` - Elements per node; must be at least [`MIN_CAPACITY`].
///
/// # Examples
///
/// ```
/// use unrolled_list::UnrolledList;
///
/// let mut list: UnrolledList<&str, 4> = UnrolledList::new();
/// list.insert_end("b").unwrap();
/// list.insert_end("d").unwrap();
/// list.insert_beginning("a").unwrap();
///
/// let mut cursor = list.first();
/// list.move_next(&mut cursor);
/// list.insert_after(&mut cursor, "c").unwrap();
/// assert_eq!(list.get(&cursor), Some(&"b"));
///
/// let items: Vec<_> = list.iter().copied().collect();
/// assert_eq!(items, ["a", "b", "c", "d"]);
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion / removal at a cursor or at either end**: O(N), amortized O(1)
/// - **Stepping a cursor**: O(1)
/// - **Iteration**: O(n)
/// - **Swap**: O(1)
///
/// Every node except the first and last holds at least `N / 2` elements,
/// which bounds the node count by `2 * len / N + 2` for even `N`.
#[derive(Debug, Clone)]
pub struct UnrolledList<T, const N: usize = DEFAULT_NODE_CAPACITY> {
    /// Total number of elements over all nodes.
    pub(crate) len: usize,
    /// First node in the chain, `NULL_NODE` when empty.
    pub(crate) first: NodeId,
    /// Last node in the chain, `NULL_NODE` when empty.
    pub(crate) last: NodeId,
    /// Storage for every node of this list.
    pub(crate) arena: CompactArena<Node<T, N>>,
}

/// A fixed-capacity run of elements plus its chain links.
#[derive(Debug, Clone)]
pub struct Node<T, const N: usize> {
    /// Only the first `len` slots are occupied.
    pub(crate) slots: [Option<T>; N],
    pub(crate) len: usize,
    pub(crate) prev: NodeId,
    pub(crate) next: NodeId,
}

/// A position in an [`UnrolledList`].
///
/// A cursor is a plain `(node, offset)` pair and does not borrow the list;
/// every operation that uses it takes the list explicitly. Mutations that
/// receive the cursor by `&mut` keep it pointing at the same logical
/// element. Any other cursor taken before a mutation is stale afterwards
/// and must be re-derived; using a stale cursor is memory safe but may
/// denote an arbitrary element or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(crate) node: NodeId,
    pub(crate) offset: usize,
}

impl Cursor {
    /// The one-past-the-last position.
    pub const END: Cursor = Cursor {
        node: NULL_NODE,
        offset: 0,
    };

    pub(crate) fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Returns true if this is the end position.
    pub fn is_end(&self) -> bool {
        self.node == NULL_NODE
    }

    /// The node this cursor points into, `NULL_NODE` at the end.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Offset of the element within its node.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::END
    }
}
