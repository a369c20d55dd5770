use crate::store::HuntStore;
use crate::types::{AddOutcome, CompletionResult, HuntEntry, HuntMap, UserId};

/// In-memory hunt lists for every user, written through to a [`HuntStore`]
/// after each mutation.
///
/// Save failures are logged and swallowed: the in-memory state stays
/// authoritative until the next successful save or process restart.
pub struct Registry<S: HuntStore> {
    hunts: HuntMap,
    store: S,
}

impl<S: HuntStore> Registry<S> {
    /// Load the snapshot from `store`. A corrupt snapshot is logged and the
    /// registry starts empty.
    pub fn open(store: S) -> Self {
        let hunts = match store.load() {
            Ok(hunts) => {
                tracing::info!(users = hunts.len(), "loaded hunt registry");
                hunts
            }
            Err(e) => {
                tracing::error!(error = %e, "could not load hunt registry, starting empty");
                HuntMap::new()
            }
        };
        Self { hunts, store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    // ---------------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------------

    /// The user's list, created empty if this is the first reference.
    pub fn list(&mut self, user: &UserId) -> &[HuntEntry] {
        self.hunts.entry(user.clone()).or_default()
    }

    pub fn count(&self, user: &UserId) -> usize {
        self.hunts.get(user).map_or(0, Vec::len)
    }

    pub fn all(&self) -> &HuntMap {
        &self.hunts
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    pub fn add(&mut self, user: &UserId, name: &str, categories: &[String]) -> AddOutcome {
        let list = self.hunts.entry(user.clone()).or_default();
        let outcome = match list.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                existing.merge_categories(categories);
                AddOutcome::Merged
            }
            None => {
                list.push(HuntEntry::new(name, categories.to_vec()));
                AddOutcome::Added
            }
        };
        self.persist();
        outcome
    }

    pub fn remove(&mut self, user: &UserId, name: &str) -> bool {
        let Some(list) = self.hunts.get_mut(user) else {
            return false;
        };
        let Some(pos) = list.iter().position(|e| e.name == name) else {
            return false;
        };
        list.remove(pos);
        self.persist();
        true
    }

    pub fn complete(&mut self, user: &UserId, name: &str) -> CompletionResult {
        let entry = self
            .hunts
            .get_mut(user)
            .and_then(|list| list.iter_mut().find(|e| e.name == name));
        let result = match entry {
            None => CompletionResult::NotFound,
            Some(e) if e.completed => CompletionResult::AlreadyComplete,
            Some(e) => {
                e.completed = true;
                CompletionResult::Marked
            }
        };
        if result == CompletionResult::Marked {
            self.persist();
        }
        result
    }

    /// Empty the user's list and save, even when it was already empty.
    /// Returns how many entries were dropped.
    pub fn clear(&mut self, user: &UserId) -> usize {
        let removed = self
            .hunts
            .insert(user.clone(), Vec::new())
            .map_or(0, |old| old.len());
        self.persist();
        removed
    }

    /// Administrator clear of another user's list. Returns whether the user
    /// had a list at all; nothing is created or saved when they did not.
    pub fn clear_other(&mut self, target: &UserId) -> bool {
        match self.hunts.get_mut(target) {
            Some(list) => {
                list.clear();
                self.persist();
                true
            }
            None => false,
        }
    }

    fn persist(&self) {
        match self.store.save(&self.hunts) {
            Ok(()) => tracing::debug!(users = self.hunts.len(), "hunt registry saved"),
            Err(e) => tracing::error!(error = %e, "failed to save hunt registry"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
