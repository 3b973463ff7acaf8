//! Unrolled doubly linked list in Rust with cursor-based editing.
//!
//! An [`UnrolledList`] stores its elements in a chain of fixed-capacity
//! nodes, so iteration touches contiguous memory and each node costs one
//! allocation for many elements. Positions are [`Cursor`]s: small `Copy`
//! handles passed back to the list for every read and edit.
//!
//! Interior nodes are kept at least half full. Inserting into a full node
//! splits it, and removal merges or redistributes neighbouring nodes, so
//! the node count stays proportional to the element count.
//!
//! ```
//! use unrolled_list::UnrolledList;
//!
//! let mut list: UnrolledList<i32, 4> = (1..=6).collect();
//!
//! let mut cursor = list.first();
//! list.move_next(&mut cursor);
//! list.insert_after(&mut cursor, 25).unwrap();
//! assert_eq!(list.get(&cursor), Some(&2));
//!
//! list.move_next(&mut cursor);
//! assert_eq!(list.remove(&mut cursor), Some(25));
//! assert_eq!(list.get(&cursor), Some(&3));
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
//! ```

#[macro_use]
mod logging;

mod compact_arena;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats, NodeId, NULL_NODE};
pub use error::{ListError, ListResult, ListResultExt};
pub use iteration::{IntoIter, Iter};
pub use types::{Cursor, UnrolledList, DEFAULT_NODE_CAPACITY, MIN_CAPACITY};
