//! Per-card particle bookkeeping.

use bento_core::{CancelToken, Millis, ScopeId, SlotHandle};

use crate::layout::{Point, Size};

/// One hover of one card.
///
/// Every deferred step of the session is scheduled in `scope`; ending the
/// session closes the scope, which cancels them all and flips `token`.
#[derive(Debug, Clone)]
pub struct HoverSession {
    /// Scheduler scope owning the session's steps.
    pub scope: ScopeId,
    /// Flips when the session ends.
    pub token: CancelToken,
    /// Clock time the hover started.
    pub started_at: Millis,
}

impl HoverSession {
    /// Returns true until the session has ended.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }
}

/// Particle state of one mounted card.
#[derive(Debug)]
pub struct CardParticles {
    /// Current card size.
    pub size: Size,
    /// Spawn positions, drawn on the first hover and kept for the card's lifetime.
    pub templates: Vec<Point>,
    /// The active hover, if any.
    pub session: Option<HoverSession>,
    /// Scope owning removals of faded particles. Survives hover sessions.
    pub teardown: ScopeId,
    /// Live particles of this card, including ones fading out.
    pub live: Vec<SlotHandle>,
}

impl CardParticles {
    /// Creates the state of a freshly mounted card.
    #[must_use]
    pub fn new(size: Size, teardown: ScopeId) -> Self {
        Self {
            size,
            templates: Vec::new(),
            session: None,
            teardown,
            live: Vec::new(),
        }
    }

    /// Returns true if `scope` belongs to the live active session.
    #[must_use]
    pub fn is_current(&self, scope: ScopeId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.scope == scope && session.is_live())
    }

    /// Forgets a particle handle.
    pub fn forget(&mut self, handle: SlotHandle) {
        if let Some(pos) = self.live.iter().position(|h| *h == handle) {
            self.live.swap_remove(pos);
        }
    }
}
