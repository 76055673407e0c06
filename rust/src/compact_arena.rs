//! Compact slot arena that owns every node of a tree.
//!
//! Nodes address each other by `NodeId` (a slot index), so parent back-links
//! are plain ids rather than owning pointers. Freed slots go on a free list
//! and are handed out again by the next allocation.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

use crate::error::{RbTreeError, TreeResult};
use crate::types::{NodeId, NULL_NODE};

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

/// Slot arena with a separate free list and allocation mask
#[derive(Debug)]
pub struct CompactArena<T> {
    /// Direct slot storage
    storage: Vec<T>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    /// Track which slots are actually allocated
    allocated_mask: Vec<bool>,
    /// Number of allocated slots
    allocated: usize,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
            allocated: 0,
        }
    }

    /// Create a new compact arena with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            allocated_mask: Vec::with_capacity(capacity),
            allocated: 0,
        }
    }

    /// Allocate a new item in the arena and return its ID.
    ///
    /// Panics when the allocator fails or the id space is exhausted, the way
    /// `Vec::push` does. Use [`try_allocate`](Self::try_allocate) to observe
    /// the failure instead.
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        match self.try_allocate(item) {
            Ok(id) => id,
            Err(e) => panic!("{}", e),
        }
    }

    /// Allocate a new item, reporting allocation failure instead of panicking.
    ///
    /// On error the arena is unchanged and `item` is dropped.
    pub fn try_allocate(&mut self, item: T) -> TreeResult<NodeId> {
        if let Some(free_index) = self.free_list.pop() {
            // Reuse a free slot
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            self.allocated += 1;
            return Ok(free_index as NodeId);
        }

        let index = self.storage.len();
        let id = NodeId::try_from(index)
            .ok()
            .filter(|&id| id != NULL_NODE)
            .ok_or_else(|| RbTreeError::arena_error("Slot allocation", "node id space exhausted"))?;

        self.storage
            .try_reserve(1)
            .map_err(|e| RbTreeError::allocation_error("node slot", &e.to_string()))?;
        self.allocated_mask
            .try_reserve(1)
            .map_err(|e| RbTreeError::allocation_error("node slot mask", &e.to_string()))?;

        self.storage.push(item);
        self.allocated_mask.push(true);
        self.allocated += 1;
        Ok(id)
    }

    /// Reserve room for `additional` more slots without allocating them.
    pub fn try_reserve(&mut self, additional: usize) -> TreeResult<()> {
        let needed = additional.saturating_sub(self.free_list.len());
        self.storage
            .try_reserve(needed)
            .map_err(|e| RbTreeError::allocation_error("node storage", &e.to_string()))?;
        self.allocated_mask
            .try_reserve(needed)
            .map_err(|e| RbTreeError::allocation_error("node storage mask", &e.to_string()))
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

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        if id == NULL_NODE {
            return false;
        }

        let index = usize::try_from(id).unwrap_or(usize::MAX);
        self.allocated_mask.get(index).copied().unwrap_or(false)
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

    /// Get the total capacity
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Clear all items from the arena
    pub fn clear(&mut self) {
        self.storage.clear();
        self.allocated_mask.clear();
        self.free_list.clear();
        self.allocated = 0;
    }

    /// Get the number of free slots
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }
}

impl<T: Default> CompactArena<T> {
    /// Deallocate an item from the arena and return it.
    ///
    /// The slot keeps a `T::default()` placeholder until it is reused.
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }

        let index = id as usize;
        self.allocated_mask[index] = false;
        self.free_list.push(index);
        self.allocated -= 1;

        Some(std::mem::take(&mut self.storage[index]))
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for CompactArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        debug_assert!(self.contains(id), "arena slot {} is not allocated", id);
        &self.storage[id as usize]
    }
}

impl<T> IndexMut<NodeId> for CompactArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        debug_assert!(self.contains(id), "arena slot {} is not allocated", id);
        &mut self.storage[id as usize]
    }
}
