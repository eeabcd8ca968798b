//! This module provides a capacity-bounded partition manager.

use log::debug;

use crate::disk::Partition;

/// Disk budget used when no other is configured.
pub const DEFAULT_DISK_SIZE: u64 = 100;

/// An ordered collection of partitions sharing a fixed disk budget.
///
/// ### Invariants
///
/// 1. **Capacity**: the sum of all partition sizes never exceeds `capacity`. Every create and
///    resize is checked before it mutates anything; a request that would break the budget is
///    refused and leaves the collection as it was.
/// 2. **Order**: partitions keep their creation order.
///
/// Partition ids are not deduplicated. Two partitions may carry the same id; lookups, deletes
/// and resizes by id act on the first one in creation order.
///
/// ### Example
///
/// ```
/// use rofis::PartitionAllocator;
///
/// let mut disk = PartitionAllocator::new();
/// assert!(disk.create_partition("p1", 60));
/// assert!(!disk.create_partition("p2", 50));
/// assert!(disk.resize_partition("p1", 100));
/// assert_eq!(disk.free(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct PartitionAllocator {
    partitions: Vec<Partition>,
    capacity: u64,
}

impl PartitionAllocator {
    /// Creates an empty disk with the default budget of 100 units.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DISK_SIZE)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            partitions: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Sum of the sizes of all partitions.
    pub fn allocated(&self) -> u64 {
        self.partitions.iter().map(Partition::size).sum()
    }

    pub fn free(&self) -> u64 {
        self.capacity.saturating_sub(self.allocated())
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Returns the first partition with the given id.
    pub fn get(&self, id: &str) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.id() == id)
    }

    /// Appends a new partition if it fits into the remaining budget.
    /// An existing partition with the same id does not prevent the creation.
    pub fn create_partition(&mut self, id: &str, size: u64) -> bool {
        if !self.fits(self.allocated(), size) {
            debug!(
                "create partition {:?} ({}): exceeds capacity {} (allocated {})",
                id,
                size,
                self.capacity,
                self.allocated()
            );
            return false;
        }
        self.partitions.push(Partition::new(id, size));
        debug!("create partition {:?} ({})", id, size);
        true
    }

    /// Removes the first partition with the given id.
    pub fn delete_partition(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.partitions.remove(index);
                debug!("delete partition {:?}", id);
                true
            }
            None => {
                debug!("delete partition {:?}: not found", id);
                false
            }
        }
    }

    /// Changes the size of the first partition with the given id.
    /// The new size is checked against the budget left by all other partitions.
    pub fn resize_partition(&mut self, id: &str, new_size: u64) -> bool {
        let Some(index) = self.position(id) else {
            debug!("resize partition {:?}: not found", id);
            return false;
        };

        let others = self.allocated() - self.partitions[index].size();
        if !self.fits(others, new_size) {
            debug!(
                "resize partition {:?} to {}: exceeds capacity {} (others {})",
                id, new_size, self.capacity, others
            );
            return false;
        }

        self.partitions[index].set_size(new_size);
        debug!("resize partition {:?} to {}", id, new_size);
        true
    }

    /// Iterates over the partitions in creation order.
    pub fn list_partitions(&self) -> impl Iterator<Item = &Partition> {
        self.partitions.iter()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.partitions.iter().position(|p| p.id() == id)
    }

    fn fits(&self, allocated: u64, size: u64) -> bool {
        allocated
            .checked_add(size)
            .is_some_and(|total| total <= self.capacity)
    }
}

impl Default for PartitionAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(disk: &PartitionAllocator) -> Vec<&str> {
        disk.list_partitions().map(Partition::id).collect()
    }

    mod create {
        use super::*;

        #[test]
        fn test_create_within_capacity() {
            let mut disk = PartitionAllocator::new();
            assert!(disk.create_partition("p1", 40));
            assert!(disk.create_partition("p2", 60));
            assert_eq!(disk.allocated(), 100);
            assert_eq!(disk.free(), 0);
            assert_eq!(ids(&disk), vec!["p1", "p2"]);
        }

        #[test]
        fn test_create_over_capacity_is_refused() {
            let mut disk = PartitionAllocator::new();
            assert!(disk.create_partition("p1", 60));
            assert!(!disk.create_partition("p2", 50));
            assert_eq!(ids(&disk), vec!["p1"]);
            assert_eq!(disk.allocated(), 60);
        }

        #[test]
        fn test_create_zero_size() {
            let mut disk = PartitionAllocator::with_capacity(0);
            assert!(disk.create_partition("empty", 0));
            assert!(!disk.create_partition("one", 1));
            assert_eq!(disk.len(), 1);
        }

        #[test]
        fn test_create_overflowing_size() {
            let mut disk = PartitionAllocator::with_capacity(u64::MAX);
            assert!(disk.create_partition("big", u64::MAX));
            assert!(!disk.create_partition("more", 1));
            assert_eq!(disk.len(), 1);
        }

        #[test]
        fn test_duplicate_ids_coexist() {
            let mut disk = PartitionAllocator::new();
            assert!(disk.create_partition("p", 10));
            assert!(disk.create_partition("p", 20));
            assert_eq!(ids(&disk), vec!["p", "p"]);
            assert_eq!(disk.get("p").unwrap().size(), 10);
        }
    }

    mod delete {
        use super::*;

        #[test]
        fn test_delete_existing() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p1", 30);
            disk.create_partition("p2", 30);

            assert!(disk.delete_partition("p1"));
            assert_eq!(ids(&disk), vec!["p2"]);
            assert_eq!(disk.free(), 70);
        }

        #[test]
        fn test_delete_missing() {
            let mut disk = PartitionAllocator::new();
            assert!(!disk.delete_partition("p1"));
            assert!(disk.is_empty());
        }

        #[test]
        fn test_delete_first_duplicate_only() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p", 10);
            disk.create_partition("q", 5);
            disk.create_partition("p", 20);

            assert!(disk.delete_partition("p"));
            let rest: Vec<_> = disk.list_partitions().map(|p| (p.id(), p.size())).collect();
            assert_eq!(rest, vec![("q", 5), ("p", 20)]);
        }

        #[test]
        fn test_delete_frees_capacity() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p1", 60);
            assert!(!disk.create_partition("p2", 50));
            disk.delete_partition("p1");
            assert!(disk.create_partition("p2", 50));
        }
    }

    mod resize {
        use super::*;

        #[test]
        fn test_resize_grow_and_shrink() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p1", 60);
            disk.create_partition("p2", 20);

            assert!(disk.resize_partition("p1", 80));
            assert_eq!(disk.get("p1").unwrap().size(), 80);

            assert!(disk.resize_partition("p1", 10));
            assert_eq!(disk.allocated(), 30);
        }

        #[test]
        fn test_resize_excludes_own_size() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p1", 90);
            assert!(disk.resize_partition("p1", 100));
        }

        #[test]
        fn test_resize_over_capacity_is_refused() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p1", 60);
            disk.create_partition("p2", 30);

            assert!(!disk.resize_partition("p2", 41));
            assert_eq!(disk.get("p2").unwrap().size(), 30);
            assert_eq!(disk.allocated(), 90);
        }

        #[test]
        fn test_resize_missing() {
            let mut disk = PartitionAllocator::new();
            assert!(!disk.resize_partition("p1", 10));
        }

        #[test]
        fn test_resize_keeps_used() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p1", 10);
            disk.resize_partition("p1", 5);
            assert_eq!(disk.get("p1").unwrap().used(), 0);
        }

        #[test]
        fn test_resize_first_duplicate_only() {
            let mut disk = PartitionAllocator::new();
            disk.create_partition("p", 10);
            disk.create_partition("p", 20);

            assert!(disk.resize_partition("p", 50));
            let sizes: Vec<_> = disk.list_partitions().map(Partition::size).collect();
            assert_eq!(sizes, vec![50, 20]);
        }
    }

    #[test]
    fn test_capacity_holds_over_operation_sequence() {
        let mut disk = PartitionAllocator::new();
        let steps: [(&str, &str, u64); 10] = [
            ("create", "a", 30),
            ("create", "b", 50),
            ("resize", "a", 60),
            ("create", "c", 25),
            ("resize", "b", 5),
            ("create", "c", 25),
            ("delete", "a", 0),
            ("create", "d", 70),
            ("resize", "c", 30),
            ("create", "e", 1),
        ];

        for (op, id, size) in steps {
            let before = disk.clone();
            let ok = match op {
                "create" => disk.create_partition(id, size),
                "resize" => disk.resize_partition(id, size),
                _ => disk.delete_partition(id),
            };
            assert!(disk.allocated() <= disk.capacity(), "{} {} {}", op, id, size);
            if !ok {
                assert_eq!(ids(&disk), ids(&before));
                assert_eq!(disk.allocated(), before.allocated());
            }
        }
    }
}
