mod dir_node;
mod entry;
mod file_system;
pub mod snapshot;
mod tree;

pub use dir_node::{DirNode, NodeId};
pub use entry::Entry;
pub use file_system::FileSystem;
pub use tree::{DEFAULT_ROOT_NAME, DirectoryTree};
