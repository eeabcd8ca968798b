use std::path::PathBuf;

use clap::Parser;

use crate::disk::DEFAULT_DISK_SIZE;
use crate::vfs::DEFAULT_ROOT_NAME;

/// RO-FiS is an in-memory file system shell with a partition manager.
/// Files stored directly under the root are kept in a snapshot between runs.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rofis", version)]
pub struct Config {
    /// Snapshot file loaded at start and written on exit.
    #[arg(short, long, default_value = "filesystem.txt")]
    pub snapshot: PathBuf,

    /// Neither load nor save the snapshot.
    #[arg(long)]
    pub no_persist: bool,

    /// Total capacity shared by all partitions.
    #[arg(short, long, default_value_t = DEFAULT_DISK_SIZE)]
    pub disk_size: u64,

    /// Name shown as the first segment of the current path.
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    pub root_name: String,

    /// Prompt prefix.
    #[arg(long, default_value = "RO-FiS")]
    pub prompt: String,
}

impl Config {
    /// Snapshot location, `None` when persistence is disabled.
    pub fn snapshot_path(&self) -> Option<&PathBuf> {
        (!self.no_persist).then_some(&self.snapshot)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("filesystem.txt"),
            no_persist: false,
            disk_size: DEFAULT_DISK_SIZE,
            root_name: DEFAULT_ROOT_NAME.to_string(),
            prompt: "RO-FiS".to_string(),
        }
    }
}
