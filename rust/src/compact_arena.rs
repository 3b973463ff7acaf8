//! Compact arena storing list nodes in a `Vec<T>` addressed by stable ids.
//!
//! Freed slots go on a free list and are handed out again before the
//! storage grows. Allocation is split in two phases: [`CompactArena::reserve`]
//! does everything that can fail, after which [`CompactArena::allocate`]
//! cannot fail. Callers reserve before they move any element data, so a
//! refused allocation never leaves a half-finished mutation behind.

use crate::error::{ListError, ListResult};

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Id that never names a node; marks chain ends and the end cursor.
pub const NULL_NODE: NodeId = u32::MAX;

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

/// Vector-backed arena with a free list and an optional hard slot limit.
#[derive(Debug)]
pub struct CompactArena<T> {
    storage: Vec<T>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    /// Track which slots are actually allocated
    allocated_mask: Vec<bool>,
    allocated: usize,
    limit: Option<usize>,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena. Does not allocate.
    pub const fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
            allocated: 0,
            limit: None,
        }
    }

    /// Create an arena that refuses to hold more than `limit` live items.
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
            allocated: 0,
            limit: Some(limit),
        }
    }

    /// Make sure the next [`allocate`](Self::allocate) succeeds.
    ///
    /// Reserving twice without allocating in between is harmless; the
    /// second call finds the room left by the first.
    pub fn reserve(&mut self) -> ListResult<()> {
        if let Some(limit) = self.limit {
            if self.allocated >= limit {
                debug!("arena refused allocation: limit of {} reached", limit);
                return Err(ListError::allocation_error(
                    "list node",
                    &format!("node limit of {} reached", limit),
                ));
            }
        }
        if !self.free_list.is_empty() {
            return Ok(());
        }

        let len = self.storage.len();
        if len >= NULL_NODE as usize {
            return Err(ListError::allocation_error("list node", "node id space exhausted"));
        }
        let to_reason = |e: std::collections::TryReserveError| {
            debug!("arena refused allocation: {}", e);
            ListError::allocation_error("list node", &e.to_string())
        };
        self.storage.try_reserve(1).map_err(to_reason)?;
        self.allocated_mask.try_reserve(1).map_err(to_reason)?;
        // Room for every slot to be freed later, so deallocation never allocates.
        self.free_list
            .try_reserve((len + 1).saturating_sub(self.free_list.len()))
            .map_err(to_reason)?;
        Ok(())
    }

    /// Store `item` and return its id. Must follow a successful
    /// [`reserve`](Self::reserve).
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        self.allocated += 1;
        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            free_index
        } else {
            debug_assert!(self.storage.len() < self.storage.capacity(), "allocate without reserve");
            let index = self.storage.len();
            self.storage.push(item);
            self.allocated_mask.push(true);
            index
        };
        index as NodeId
    }

    /// Deallocate an item from the arena and return it
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T>
    where
        T: Default,
    {
        if !self.contains(id) {
            return None;
        }
        let index = id as usize;
        self.allocated_mask[index] = false;
        self.allocated -= 1;
        self.free_list.push(index);
        Some(std::mem::take(&mut self.storage[index]))
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if self.contains(id) {
            Some(&self.storage[id as usize])
        } else {
            None
        }
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if self.contains(id) {
            Some(&mut self.storage[id as usize])
        } else {
            None
        }
    }

    /// Mutable references to two distinct live items at once.
    pub fn get_pair_mut(&mut self, a: NodeId, b: NodeId) -> Option<(&mut T, &mut T)> {
        if a == b || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (a, b) = (a as usize, b as usize);
        if a < b {
            let (low, high) = self.storage.split_at_mut(b);
            Some((&mut low[a], &mut high[0]))
        } else {
            let (low, high) = self.storage.split_at_mut(a);
            Some((&mut high[0], &mut low[b]))
        }
    }

    /// Check if an ID is valid and allocated
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id != NULL_NODE && self.allocated_mask.get(id as usize).copied().unwrap_or(false)
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.allocated;
        let free_count = self.free_list.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        CompactArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.allocated
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.allocated == 0
    }

    /// The slot limit, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drop every item and release the backing storage. The limit is kept.
    pub fn clear(&mut self) {
        self.storage = Vec::new();
        self.allocated_mask = Vec::new();
        self.free_list = Vec::new();
        self.allocated = 0;
    }
}

impl<T: Clone> Clone for CompactArena<T> {
    fn clone(&self) -> Self {
        let mut free_list = Vec::with_capacity(self.storage.len());
        free_list.extend_from_slice(&self.free_list);
        Self {
            storage: self.storage.clone(),
            free_list,
            allocated_mask: self.allocated_mask.clone(),
            allocated: self.allocated,
            limit: self.limit,
        }
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_arena_basic_operations() {
        let mut arena = CompactArena::new();

        arena.reserve().unwrap();
        let id1 = arena.allocate(42);
        arena.reserve().unwrap();
        let id2 = arena.allocate(84);
        arena.reserve().unwrap();
        let id3 = arena.allocate(126);

        assert_eq!(arena.get(id1), Some(&42));
        assert_eq!(arena.get(id2), Some(&84));
        assert_eq!(arena.get(id3), Some(&126));

        assert!(arena.contains(id1));
        assert!(!arena.contains(NULL_NODE));

        let stats = arena.stats();
        assert_eq!(stats.allocated_count, 3);
        assert_eq!(stats.free_count, 0);
    }

    #[test]
    fn test_free_slot_is_reused() {
        let mut arena: CompactArena<i32> = CompactArena::new();

        arena.reserve().unwrap();
        let id1 = arena.allocate(42);
        arena.reserve().unwrap();
        let id2 = arena.allocate(84);

        assert_eq!(arena.deallocate(id1), Some(42));
        assert_eq!(arena.deallocate(id1), None);
        assert!(!arena.contains(id1));
        assert!(arena.contains(id2));
        assert_eq!(arena.stats().free_count, 1);

        arena.reserve().unwrap();
        let id3 = arena.allocate(168);
        assert_eq!(id3, id1);
        assert_eq!(arena.get(id3), Some(&168));

        let stats = arena.stats();
        assert_eq!(stats.allocated_count, 2);
        assert_eq!(stats.free_count, 0);
    }

    #[test]
    fn test_limit_refuses_allocation() {
        let mut arena: CompactArena<u8> = CompactArena::with_limit(2);

        arena.reserve().unwrap();
        let a = arena.allocate(1);
        arena.reserve().unwrap();
        arena.allocate(2);

        let err = arena.reserve().unwrap_err();
        assert!(err.is_allocation_error());
        assert_eq!(arena.len(), 2);

        arena.deallocate(a);
        assert!(arena.reserve().is_ok());
    }

    #[test]
    fn test_get_pair_mut() {
        let mut arena = CompactArena::new();
        arena.reserve().unwrap();
        let a = arena.allocate(String::from("a"));
        arena.reserve().unwrap();
        let b = arena.allocate(String::from("b"));

        {
            let (x, y) = arena.get_pair_mut(b, a).unwrap();
            x.push('!');
            y.push('?');
        }
        assert_eq!(arena.get(a).map(String::as_str), Some("a?"));
        assert_eq!(arena.get(b).map(String::as_str), Some("b!"));
        assert!(arena.get_pair_mut(a, a).is_none());
        assert!(arena.get_pair_mut(a, NULL_NODE).is_none());
    }

    #[test]
    fn test_clear_keeps_limit() {
        let mut arena: CompactArena<u8> = CompactArena::with_limit(1);
        arena.reserve().unwrap();
        arena.allocate(7);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.limit(), Some(1));
        assert_eq!(arena.stats().total_capacity, 0);
    }
}
