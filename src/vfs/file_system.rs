use std::path::Path;

use log::warn;

use crate::config::Config;
use crate::core::Result;
use crate::disk::PartitionAllocator;
use crate::vfs::{DirectoryTree, snapshot};

/// The root object: owns the directory tree and the partition manager.
///
/// The two parts are independent; the file system only wires them together and moves the
/// root-level files in and out of a snapshot.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    tree: DirectoryTree,
    disk: PartitionAllocator,
}

impl FileSystem {
    /// Creates an empty file system. `root_name` must be a valid single segment.
    pub fn new(root_name: &str, disk_size: u64) -> Result<Self> {
        Ok(Self {
            tree: DirectoryTree::with_root_name(root_name)?,
            disk: PartitionAllocator::with_capacity(disk_size),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.root_name, config.disk_size)
    }

    pub fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DirectoryTree {
        &mut self.tree
    }

    pub fn disk(&self) -> &PartitionAllocator {
        &self.disk
    }

    pub fn disk_mut(&mut self) -> &mut PartitionAllocator {
        &mut self.disk
    }

    /// Restores root-level files from the snapshot at `path`.
    ///
    /// Returns `Ok(false)` and leaves the root untouched when there is no snapshot yet.
    /// Restored files replace root files of the same name.
    pub fn load_snapshot<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let path = path.as_ref();
        let Some(records) = snapshot::load(path)? else {
            warn!("no snapshot at {}, starting empty", path.display());
            return Ok(false);
        };

        for (name, content) in records {
            self.tree.create_root_file(&name, &content);
        }
        Ok(true)
    }

    /// Writes the root-level files to the snapshot at `path`.
    /// Subdirectories are not persisted. In-memory state is never affected by a failure.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        snapshot::save(path, self.tree.root_files())
    }
}
