//! The optimistic vote-toggle protocol.
//!
//! A toggle has two phases: capture the delta from current state and
//! apply it locally before the network call is issued, then either keep
//! it (confirmed) or revert it (request failed). [`VoteDelta`] owns
//! both phases, so apply and revert are exact inverses by construction.
//!
//! The local `user_has_liked` flag is the sole source of toggle
//! direction; the backend independently toggles on its own vote
//! records, and the two agree as long as requests settle in order.

use echo_feed_types::VoteTarget;

use crate::store::{EntityStore, StoreError};

/// A pending one-step change to a target's vote fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteDelta {
    target: VoteTarget,
    liked: bool,
}

impl VoteDelta {
    /// Capture the toggle delta for a target from the store's current
    /// state: the new flag is the inverse of the one read now.
    pub fn toggle(store: &EntityStore, target: VoteTarget) -> Result<Self, StoreError> {
        let (current, _) = store
            .vote_state(target)
            .ok_or(StoreError::UnknownTarget(target))?;
        Ok(Self {
            target,
            liked: !current,
        })
    }

    /// The target this delta addresses.
    pub fn target(&self) -> VoteTarget {
        self.target
    }

    /// The like flag this delta writes, i.e. the local expectation of
    /// the server-side outcome.
    pub fn liked(&self) -> bool {
        self.liked
    }

    /// Phase one: write the optimistic state.
    pub fn apply(&self, store: &mut EntityStore) -> Result<(), StoreError> {
        store.apply_vote_delta(self.target, self.liked)
    }

    /// Undo the optimistic write, restoring the captured state.
    pub fn revert(&self, store: &mut EntityStore) -> Result<(), StoreError> {
        store.apply_vote_delta(self.target, !self.liked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use echo_feed_types::{Post, PostId};

    fn store_with_post(likes: u32, liked: bool) -> EntityStore {
        let mut store = EntityStore::new();
        store.set_feed(vec![Post {
            id: PostId::new(1),
            author: "ada".into(),
            content: "hello".into(),
            created_at: Utc::now(),
            likes_count: likes,
            user_has_liked: liked,
        }]);
        store
    }

    #[test]
    fn toggle_captures_inverse_of_current_flag() {
        let store = store_with_post(3, false);
        let target = VoteTarget::Post(PostId::new(1));

        let delta = VoteDelta::toggle(&store, target).unwrap();
        assert!(delta.liked());

        let mut liked_store = store_with_post(4, true);
        let delta = VoteDelta::toggle(&liked_store, target).unwrap();
        assert!(!delta.liked());
        delta.apply(&mut liked_store).unwrap();
        assert_eq!(liked_store.vote_state(target), Some((false, 3)));
    }

    #[test]
    fn apply_then_revert_restores_exact_state() {
        let mut store = store_with_post(3, false);
        let pristine = store.clone();
        let target = VoteTarget::Post(PostId::new(1));

        let delta = VoteDelta::toggle(&store, target).unwrap();
        delta.apply(&mut store).unwrap();
        assert_ne!(store, pristine);

        delta.revert(&mut store).unwrap();
        assert_eq!(store, pristine);
    }

    #[test]
    fn double_toggle_returns_to_original_state() {
        let mut store = store_with_post(5, true);
        let pristine = store.clone();
        let target = VoteTarget::Post(PostId::new(1));

        for _ in 0..2 {
            let delta = VoteDelta::toggle(&store, target).unwrap();
            delta.apply(&mut store).unwrap();
        }
        assert_eq!(store, pristine);
    }

    #[test]
    fn toggle_unknown_target_fails() {
        let store = EntityStore::new();
        let target = VoteTarget::Post(PostId::new(1));
        assert_eq!(
            VoteDelta::toggle(&store, target),
            Err(StoreError::UnknownTarget(target))
        );
    }
}
