//! Keyed request lifecycle for screen loads.
//!
//! A screen load is identified by a key (usually the route id). Starting a
//! load for the key that is already loading or loaded is a no-op, while a
//! different key (or a retry after failure) starts afresh.

use serde::Serialize;

/// Load state of one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "key", rename_all = "snake_case")]
pub enum Lifecycle<K> {
    Idle,
    Loading(K),
    Loaded(K),
    Failed(K),
}

impl<K> Default for Lifecycle<K> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<K: PartialEq + Clone> Lifecycle<K> {
    /// Try to start a load for `key`.
    ///
    /// Returns `false` when a load for the same key is in flight or has
    /// already succeeded, in which case the caller must not fetch again.
    pub fn begin(&mut self, key: K) -> bool {
        match self {
            Self::Loading(k) | Self::Loaded(k) if *k == key => false,
            _ => {
                *self = Self::Loading(key);
                true
            }
        }
    }

    /// Mark the load for `key` as finished. Ignored if another key has
    /// started since.
    pub fn succeed(&mut self, key: &K) {
        if self.is_loading_key(key) {
            *self = Self::Loaded(key.clone());
        }
    }

    pub fn fail(&mut self, key: &K) {
        if self.is_loading_key(key) {
            *self = Self::Failed(key.clone());
        }
    }

    /// Forget the current key so the next `begin` always fetches.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn key(&self) -> Option<&K> {
        match self {
            Self::Idle => None,
            Self::Loading(k) | Self::Loaded(k) | Self::Failed(k) => Some(k),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    fn is_loading_key(&self, key: &K) -> bool {
        matches!(self, Self::Loading(k) if k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_does_not_restart() {
        let mut lc = Lifecycle::default();
        assert!(lc.begin(7));
        assert!(!lc.begin(7));
        lc.succeed(&7);
        assert!(lc.is_loaded());
        assert!(!lc.begin(7));
    }

    #[test]
    fn different_key_restarts() {
        let mut lc = Lifecycle::default();
        assert!(lc.begin(7));
        lc.succeed(&7);
        assert!(lc.begin(8));
        assert_eq!(lc, Lifecycle::Loading(8));
    }

    #[test]
    fn failure_allows_retry() {
        let mut lc = Lifecycle::default();
        assert!(lc.begin(1));
        lc.fail(&1);
        assert_eq!(lc, Lifecycle::Failed(1));
        assert!(lc.begin(1));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut lc = Lifecycle::default();
        lc.begin(1);
        lc.begin(2);
        lc.succeed(&1);
        assert_eq!(lc, Lifecycle::Loading(2));
        lc.fail(&1);
        assert_eq!(lc, Lifecycle::Loading(2));
    }

    #[test]
    fn reset_forgets_key() {
        let mut lc = Lifecycle::default();
        lc.begin(());
        lc.succeed(&());
        lc.reset();
        assert_eq!(lc.key(), None);
        assert!(lc.begin(()));
    }
}
