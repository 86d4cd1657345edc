use std::collections::HashMap;
use std::path::Path;

/// Process-wide record of layers already exported to a SAGA-native file.
///
/// Keyed by the original data reference; the value is the exported path
/// used in its place. Owned by the host application and passed by
/// reference into each run, so tests can reset it explicitly. Entries
/// whose exported file has disappeared from disk are dropped on lookup.
#[derive(Debug, Default)]
pub struct SessionExportCache {
    entries: HashMap<String, String>,
}

impl SessionExportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a previous export, discarding the entry when the exported
    /// file no longer exists.
    pub fn lookup(&mut self, source: &str) -> Option<String> {
        match self.entries.get(source) {
            Some(dest) if Path::new(dest).exists() => Some(dest.clone()),
            Some(_) => {
                self.entries.remove(source);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.entries.insert(source.into(), destination.into());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
