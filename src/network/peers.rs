use std::collections::HashSet;
use std::sync::RwLock;

/// The set of known peer node addresses.
///
/// Addresses are opaque identifiers to the core; the registry owns no
/// sockets. Entries are added by node-registration requests and never
/// removed (peer liveness tracking is not a goal).
pub struct PeerRegistry {
    inner: RwLock<HashSet<String>>,
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerRegistry {
    pub fn new() -> PeerRegistry {
        PeerRegistry {
            inner: RwLock::new(HashSet::new()),
        }
    }

    /// Add a peer address, normalizing away an optional URL scheme so that
    /// "http://192.168.0.5:5000" and "192.168.0.5:5000" register the same
    /// node.
    pub fn register(&self, addr: &str) {
        let normalized = Self::normalize_addr(addr);
        if normalized.is_empty() {
            return;
        }
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on peer registry - this should never happen");
        inner.insert(normalized);
    }

    pub fn contains(&self, addr: &str) -> bool {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on peer registry - this should never happen");
        inner.contains(&Self::normalize_addr(addr))
    }

    pub fn get_peers(&self) -> Vec<String> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on peer registry - this should never happen");
        inner.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("Failed to acquire read lock on peer registry - this should never happen")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .expect("Failed to acquire read lock on peer registry - this should never happen")
            .is_empty()
    }

    fn normalize_addr(addr: &str) -> String {
        let trimmed = addr.trim();
        let without_scheme = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .unwrap_or(trimmed);
        // Drop any path component, keeping only host:port
        match without_scheme.split('/').next() {
            Some(netloc) => netloc.to_string(),
            None => without_scheme.to_string(),
        }
    }
}
