pub mod utils;

/// Command surface of a navigable file tree.
///
/// Every operation works relative to the current working directory. Failures
/// are structural (not found, name collision, non-empty directory) and are
/// reported as data: `bool` or `Option`, never as an error.
pub trait FsBackend {
    /// Returns the materialized path of the current working directory.
    fn current_path(&self) -> &str;

    /// Moves one hop: into an immediate subdirectory, or up with `..`.
    /// `..` at the root is a successful no-op.
    fn change_directory(&mut self, segment: &str) -> bool;

    /// Creates a file or silently replaces the content of an existing one.
    fn create_file(&mut self, name: &str, content: &[u8]);

    /// Returns the content of a file, `None` if there is no such file.
    fn read_file(&self, name: &str) -> Option<&[u8]>;

    fn delete_file(&mut self, name: &str) -> bool;

    /// Creates an empty subdirectory. Fails if a subdirectory with the same
    /// name already exists; a file of the same name does not conflict.
    fn create_directory(&mut self, name: &str) -> bool;

    /// Removes an empty subdirectory.
    fn delete_directory(&mut self, name: &str) -> bool;

    fn list_contents(&self) -> Listing;
}

/// Names of the files and subdirectories of one directory, each sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;
