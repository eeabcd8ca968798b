/// A named content blob owned by exactly one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    content: Vec<u8>,
}

impl Entry {
    pub fn new<S: Into<String>>(name: S, content: &[u8]) -> Entry {
        Entry {
            name: name.into(),
            content: content.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn set_content(&mut self, content: &[u8]) {
        self.content = content.to_vec();
    }
}
