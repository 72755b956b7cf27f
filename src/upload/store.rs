use super::types::TrackedFile;
use std::collections::HashSet;

/// Ordered list of the files added in this session, keyed by filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStore {
    entries: Vec<TrackedFile>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TrackedFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.iter().any(|f| f.identity == identity)
    }

    pub fn get(&self, identity: &str) -> Option<&TrackedFile> {
        self.entries.iter().find(|f| f.identity == identity)
    }

    pub fn identities(&self) -> HashSet<&str> {
        self.entries.iter().map(|f| f.identity.as_str()).collect()
    }

    /// Appends provisional entries. Callers deduplicate first.
    pub(crate) fn append(&mut self, files: impl IntoIterator<Item = TrackedFile>) {
        self.entries.extend(files);
        debug_assert!(self.identities().len() == self.entries.len());
    }

    pub(crate) fn replace_all(&mut self, entries: Vec<TrackedFile>) {
        self.entries = entries;
    }

    pub(crate) fn take_entries(&mut self) -> Vec<TrackedFile> {
        std::mem::take(&mut self.entries)
    }

    /// Drops the entry with this identity. Returns whether one was present.
    pub(crate) fn remove(&mut self, identity: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|f| f.identity != identity);
        self.entries.len() != before
    }

    pub(crate) fn set_deleting(&mut self, identity: &str, deleting: bool) -> bool {
        match self.entries.iter_mut().find(|f| f.identity == identity) {
            Some(entry) => {
                entry.deleting = deleting;
                true
            }
            None => false,
        }
    }
}

/// Identities with a delete request in flight. One per session, never shared.
#[derive(Debug, Clone, Default)]
pub struct PendingDeletes {
    names: HashSet<String>,
}

impl PendingDeletes {
    pub fn contains(&self, identity: &str) -> bool {
        self.names.contains(identity)
    }

    /// Returns `false` when the identity was already pending.
    pub(crate) fn insert(&mut self, identity: &str) -> bool {
        self.names.insert(identity.to_string())
    }

    pub(crate) fn release(&mut self, identity: &str) {
        self.names.remove(identity);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
