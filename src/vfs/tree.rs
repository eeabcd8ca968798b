//! This module provides the directory tree: an arena of [`DirNode`]s addressed by stable
//! [`NodeId`] handles, plus a cursor pointing at the current working directory.

use std::collections::BTreeMap;

use anyhow::anyhow;
use log::debug;

use crate::core::{FsBackend, Listing, Result, utils};
use crate::vfs::{DirNode, Entry, NodeId};

/// Root marker used when no other is configured.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// An in-memory directory tree with a current working directory.
///
/// ### Internal state
///
/// * `nodes` — every live directory keyed by its `NodeId`. A parent refers to its children by
///   id and a child refers back to its parent by id; neither reference owns the other, so the
///   arena is the single owner of all nodes. Ids are never reused after a directory is deleted.
///
/// * `root` — id of the root directory. It exists for the whole life of the tree.
///
/// * `cwd` / `cwd_path` — the cursor: id of the current directory and its materialized path,
///   the root marker followed by `/segment` per level (e.g. `root/docs/notes`).
///
/// ### Invariants
///
/// 1. **Tree shape**: following `parent` from any live node reaches `root` in a finite number of
///    steps, and every node is registered under its name in exactly one parent.
/// 2. **Root**: the root has no parent and cannot be deleted.
/// 3. **Delete protection**: a directory is removed only when it has no files and no
///    subdirectories, so no subtree is ever orphaned.
/// 4. **Cursor consistency**: the segments of `cwd_path` after the root marker are the names
///    along the path from `root` to `cwd`.
///
/// ### Example
///
/// ```
/// use rofis::{DirectoryTree, FsBackend};
///
/// let mut tree = DirectoryTree::new();
/// assert!(tree.create_directory("docs"));
/// assert!(tree.change_directory("docs"));
/// tree.create_file("note.txt", b"Hello");
/// assert_eq!(tree.current_path(), "root/docs");
/// assert_eq!(tree.read_file("note.txt"), Some(&b"Hello"[..]));
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    nodes: BTreeMap<NodeId, DirNode>,
    next_id: usize,
    root: NodeId,
    cwd: NodeId,
    cwd_path: String,
}

impl DirectoryTree {
    /// Creates a tree holding only an empty root, with the cursor at the root.
    pub fn new() -> Self {
        Self::build(DEFAULT_ROOT_NAME)
    }

    /// Creates a tree whose path string starts with `root_name` instead of `root`.
    /// `root_name` must be a valid single segment.
    pub fn with_root_name(root_name: &str) -> Result<Self> {
        if !utils::is_valid_name(root_name) {
            return Err(anyhow!("invalid root name: {:?}", root_name));
        }
        Ok(Self::build(root_name))
    }

    fn build(root_name: &str) -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(root, DirNode::new(root_name, None));

        Self {
            nodes,
            next_id: 1,
            root,
            cwd: root,
            cwd_path: root_name.to_string(),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn current_id(&self) -> NodeId {
        self.cwd
    }

    pub fn root(&self) -> &DirNode {
        &self.nodes[&self.root]
    }

    pub fn current(&self) -> &DirNode {
        &self.nodes[&self.cwd]
    }

    /// Returns the directory with the given id, `None` if it was deleted.
    pub fn node(&self, id: NodeId) -> Option<&DirNode> {
        self.nodes.get(&id)
    }

    /// Number of live directories, the root included.
    pub fn dir_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the live directory ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Iterates over the parent chain of `id`, from its parent up to the root.
    /// Yields nothing for the root or for an unknown id.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).and_then(DirNode::parent), move |&parent| {
            self.node(parent).and_then(DirNode::parent)
        })
    }

    /// Files stored directly under the root.
    pub fn root_files(&self) -> impl Iterator<Item = &Entry> {
        self.root().files()
    }

    /// Writes a file directly under the root, wherever the cursor is.
    pub fn create_root_file(&mut self, name: &str, content: &[u8]) {
        debug!("create root file {:?} ({} bytes)", name, content.len());
        self.root_mut().create_file(name, content);
    }

    fn root_mut(&mut self) -> &mut DirNode {
        let root = self.root;
        self.node_mut(root)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut DirNode {
        // Only ids of live nodes are handed to this helper.
        match self.nodes.get_mut(&id) {
            Some(node) => node,
            None => unreachable!("directory {:?} is not in the tree", id),
        }
    }

    fn current_mut(&mut self) -> &mut DirNode {
        let cwd = self.cwd;
        self.node_mut(cwd)
    }

    fn allocate(&mut self, node: DirNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for DirectoryTree {
    fn current_path(&self) -> &str {
        &self.cwd_path
    }

    fn change_directory(&mut self, segment: &str) -> bool {
        if segment == utils::PARENT {
            if let Some(parent) = self.current().parent() {
                self.cwd = parent;
                let len = utils::parent(&self.cwd_path).len();
                self.cwd_path.truncate(len);
            }
            debug!("cd .. -> {}", self.cwd_path);
            return true;
        }

        match self.current().get_subdirectory(segment) {
            Some(id) => {
                self.cwd = id;
                self.cwd_path = utils::join(&self.cwd_path, segment);
                debug!("cd {} -> {}", segment, self.cwd_path);
                true
            }
            None => {
                debug!("cd {}: no such directory in {}", segment, self.cwd_path);
                false
            }
        }
    }

    fn create_file(&mut self, name: &str, content: &[u8]) {
        debug!(
            "create file {:?} in {} ({} bytes)",
            name,
            self.cwd_path,
            content.len()
        );
        self.current_mut().create_file(name, content);
    }

    fn read_file(&self, name: &str) -> Option<&[u8]> {
        self.current().get_file(name).map(Entry::content)
    }

    fn delete_file(&mut self, name: &str) -> bool {
        let deleted = self.current_mut().delete_file(name);
        debug!("delete file {:?} in {}: {}", name, self.cwd_path, deleted);
        deleted
    }

    fn create_directory(&mut self, name: &str) -> bool {
        if !utils::is_valid_name(name) || self.current().has_subdirectory(name) {
            debug!("mkdir {:?} in {}: rejected", name, self.cwd_path);
            return false;
        }

        let cwd = self.cwd;
        let id = self.allocate(DirNode::new(name, Some(cwd)));
        let attached = self.current_mut().attach_subdirectory(name, id);
        debug!("mkdir {:?} in {}: {:?}", name, self.cwd_path, id);
        attached
    }

    fn delete_directory(&mut self, name: &str) -> bool {
        let Some(id) = self.current().get_subdirectory(name) else {
            debug!("rmdir {:?} in {}: not found", name, self.cwd_path);
            return false;
        };
        if !self.nodes[&id].is_empty() {
            debug!("rmdir {:?} in {}: not empty", name, self.cwd_path);
            return false;
        }

        self.current_mut().detach_subdirectory(name);
        self.nodes.remove(&id);
        debug!("rmdir {:?} in {}: removed {:?}", name, self.cwd_path, id);
        true
    }

    fn list_contents(&self) -> Listing {
        self.current().list_contents()
    }
}
