/// A named capacity allocation. It is not bound to any file, so `used` stays `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    id: String,
    size: u64,
    used: u64,
}

impl Partition {
    pub fn new<S: Into<String>>(id: S, size: u64) -> Partition {
        Partition {
            id: id.into(),
            size,
            used: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub(crate) fn set_size(&mut self, size: u64) {
        self.size = size;
    }
}
