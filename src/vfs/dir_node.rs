use std::collections::BTreeMap;

use crate::core::Listing;
use crate::vfs::Entry;

/// Stable handle of a directory inside a [`DirectoryTree`](crate::DirectoryTree) arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A directory: owns its files and (through the tree arena) its subdirectories.
///
/// Files and subdirectories live in two independent namespaces, so a file and
/// a directory may share a name within the same parent. `parent` is a plain
/// handle used for navigation only; the root has none.
#[derive(Debug, Clone)]
pub struct DirNode {
    name: String,
    files: BTreeMap<String, Entry>,
    subdirs: BTreeMap<String, NodeId>,
    parent: Option<NodeId>,
}

impl DirNode {
    pub(crate) fn new<S: Into<String>>(name: S, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
            subdirs: BTreeMap::new(),
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Inserts a file, replacing the content of an existing one.
    pub fn create_file(&mut self, name: &str, content: &[u8]) {
        match self.files.get_mut(name) {
            Some(entry) => entry.set_content(content),
            None => {
                self.files.insert(name.to_string(), Entry::new(name, content));
            }
        }
    }

    pub fn get_file(&self, name: &str) -> Option<&Entry> {
        self.files.get(name)
    }

    pub fn delete_file(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }

    pub fn get_subdirectory(&self, name: &str) -> Option<NodeId> {
        self.subdirs.get(name).copied()
    }

    pub fn has_subdirectory(&self, name: &str) -> bool {
        self.subdirs.contains_key(name)
    }

    /// `true` when the directory holds neither files nor subdirectories.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirs.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &Entry> {
        self.files.values()
    }

    pub fn subdirectories(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.subdirs.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn list_contents(&self) -> Listing {
        Listing {
            files: self.files.keys().cloned().collect(),
            directories: self.subdirs.keys().cloned().collect(),
        }
    }

    pub(crate) fn attach_subdirectory(&mut self, name: &str, id: NodeId) -> bool {
        if self.subdirs.contains_key(name) {
            return false;
        }
        self.subdirs.insert(name.to_string(), id);
        true
    }

    pub(crate) fn detach_subdirectory(&mut self, name: &str) -> Option<NodeId> {
        self.subdirs.remove(name)
    }
}
