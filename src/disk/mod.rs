mod allocator;
mod partition;

pub use allocator::{DEFAULT_DISK_SIZE, PartitionAllocator};
pub use partition::Partition;
