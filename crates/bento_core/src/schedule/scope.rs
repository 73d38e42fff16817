//! Cancellation scopes.

use std::cell::Cell;
use std::rc::Rc;

/// Identifier of a cancellation scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) u64);

impl ScopeId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Shared flag that flips once when its scope is closed.
///
/// Clones observe the same flag. A session handle keeps one and checks it
/// before touching anything its deferred steps refer to.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Book-keeping for one open scope.
#[derive(Debug)]
pub(crate) struct ScopeState {
    pub(crate) label: &'static str,
    pub(crate) token: CancelToken,
    /// Tasks created in this scope that have neither fired nor been cancelled.
    pub(crate) outstanding: Vec<super::TaskId>,
}

impl ScopeState {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            token: CancelToken::new(),
            outstanding: Vec::new(),
        }
    }

    pub(crate) fn forget(&mut self, task: super::TaskId) {
        if let Some(pos) = self.outstanding.iter().position(|t| *t == task) {
            self.outstanding.swap_remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_clones_share_state() {
        let token = CancelToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());

        token.cancel();
        assert!(observer.is_cancelled());

        token.cancel();
        assert!(token.is_cancelled());
    }
}
