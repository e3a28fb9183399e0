use std::collections::{HashMap, HashSet};

use crate::key::PostKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostState {
    /// Analysis requested, response not yet handled.
    Pending,
    /// Response handled, whether or not tags were rendered.
    Annotated,
}

/// Keys already analyzed or in flight.
///
/// Bounded by document presence: finished keys whose post has left the
/// document are dropped after each scan. Pending keys are never dropped, so
/// a key has at most one request outstanding.
#[derive(Debug, Default)]
pub struct SeenSet {
    keys: HashMap<PostKey, PostState>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &PostKey) -> bool {
        self.keys.contains_key(key)
    }

    pub fn state(&self, key: &PostKey) -> Option<PostState> {
        self.keys.get(key).copied()
    }

    /// Record `key` as in flight. Returns false if it was already tracked.
    pub fn mark_pending(&mut self, key: PostKey) -> bool {
        if self.keys.contains_key(&key) {
            return false;
        }
        self.keys.insert(key, PostState::Pending);
        true
    }

    /// Move a tracked key to `Annotated`. Untracked keys are ignored.
    pub fn mark_annotated(&mut self, key: &PostKey) {
        if let Some(state) = self.keys.get_mut(key) {
            *state = PostState::Annotated;
        }
    }

    /// Drop annotated keys missing from `present`. Returns how many went.
    pub fn evict_absent(&mut self, present: &HashSet<PostKey>) -> usize {
        let before = self.keys.len();
        self.keys
            .retain(|key, state| *state == PostState::Pending || present.contains(key));
        before - self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
