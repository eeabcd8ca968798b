//! An in-memory hierarchical file system with a capacity-bounded partition manager.
//!
//! ### Overview
//!
//! `rofis` keeps a directory tree entirely in process memory and never touches a block device.
//! Next to it lives a small partition manager that hands out named allocations from a fixed
//! disk budget. Only the files stored directly under the root survive a restart, through a flat
//! text snapshot.
//!
//! **Key ideas**:
//! - **Tree integrity**: directories live in an arena and refer to each other by [`NodeId`];
//!   parents own children, the child-to-parent link is a plain handle.
//! - **Delete protection**: only empty directories can be removed, the root never.
//! - **Capacity invariant**: the sizes of all partitions never add up to more than the disk
//!   budget; a request that would break it changes nothing.
//! - **Failures as data**: tree and disk operations answer with `bool` or `Option`, leaving the
//!   wording of messages to the [`Shell`].

mod config;
mod core;
mod disk;
pub mod shell;
mod vfs;

pub use crate::config::Config;
pub use crate::core::{FsBackend, Listing, Result, utils};
pub use crate::disk::{DEFAULT_DISK_SIZE, Partition, PartitionAllocator};
pub use crate::shell::{Command, DiskCommand, Flow, ParseError, Shell};
pub use crate::vfs::{DEFAULT_ROOT_NAME, DirNode, DirectoryTree, Entry, FileSystem, NodeId, snapshot};
