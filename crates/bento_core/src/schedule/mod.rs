//! # Deterministic Scheduler
//!
//! Deferred work for cooperative, single-threaded effects.
//!
//! Two kinds of task exist:
//! - **Timers** fire once the clock reaches their due time. Timers with the
//!   same due time fire in the order they were scheduled.
//! - **Frame callbacks** fire on the next call to [`Scheduler::begin_frame`].
//!   A frame callback requested while a frame is being drained waits for the
//!   following frame.
//!
//! Every task belongs to a scope. Closing a scope cancels everything it still
//! owns and flips its [`CancelToken`], so no handle can outlive its owner.
//!
//! The scheduler never calls back into user code. The owner pulls fired
//! tasks out with [`Scheduler::poll_timer`] / [`Scheduler::poll_frame`] and
//! dispatches them itself, which keeps every state machine in plain sight.
//!
//! ```text
//! host clock ──> poll_timer(now) ──> Fired<T> ──> owner.handle(task)
//! host frame ──> begin_frame(now) ─> poll_frame() ──> owner.handle(task)
//!                                                      │
//!                         schedule_in / request_frame <┘
//! ```

mod scope;

pub use scope::{CancelToken, ScopeId};

use scope::ScopeState;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

/// Milliseconds on the host's clock.
pub type Millis = u64;

/// Heap entries above this count trigger a purge of cancelled timers.
const COMPACT_THRESHOLD: usize = 64;

/// Unique identifier for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A task that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// The task's handle.
    pub id: TaskId,
    /// Scope the task was scheduled in.
    pub scope: ScopeId,
    /// Clock time the task fired at.
    pub at: Millis,
    /// Owner-defined payload.
    pub payload: T,
}

#[derive(Debug)]
struct Task<T> {
    scope: ScopeId,
    payload: T,
}

/// Virtual-clock scheduler for timers and frame callbacks.
#[derive(Debug)]
pub struct Scheduler<T> {
    /// Current clock time.
    now: Millis,
    /// Frames begun so far.
    frame_count: u64,
    /// ID counter for tasks.
    next_task: u64,
    /// ID counter for scopes.
    next_scope: u64,
    /// Timer queue ordered by (due, task id).
    timers: BinaryHeap<Reverse<(Millis, TaskId)>>,
    /// Frame callbacks waiting for the next frame.
    frame_requests: Vec<TaskId>,
    /// Frame callbacks of the frame being drained.
    frame_batch: VecDeque<TaskId>,
    /// Live tasks. Anything missing here was cancelled.
    tasks: HashMap<TaskId, Task<T>>,
    /// Open scopes.
    scopes: HashMap<ScopeId, ScopeState>,
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: 0,
            frame_count: 0,
            next_task: 0,
            next_scope: 0,
            timers: BinaryHeap::with_capacity(64),
            frame_requests: Vec::with_capacity(64),
            frame_batch: VecDeque::with_capacity(64),
            tasks: HashMap::with_capacity(64),
            scopes: HashMap::with_capacity(8),
        }
    }

    /// Creates an empty scheduler whose clock reads `now`.
    #[must_use]
    pub fn starting_at(now: Millis) -> Self {
        let mut scheduler = Self::new();
        scheduler.now = now;
        scheduler
    }

    /// Moves the clock forward to `now` without firing anything.
    ///
    /// Timers already due stay queued for the next poll. The clock never
    /// moves backwards.
    pub fn advance_to(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    /// Returns the current clock time.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> Millis {
        self.now
    }

    /// Returns the number of frames begun.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Opens a new scope. The label only shows up in logs.
    pub fn open_scope(&mut self, label: &'static str) -> ScopeId {
        let id = ScopeId(self.next_scope);
        self.next_scope += 1;
        self.scopes.insert(id, ScopeState::new(label));
        id
    }

    /// Returns true if the scope has not been closed.
    #[must_use]
    pub fn is_open(&self, scope: ScopeId) -> bool {
        self.scopes.contains_key(&scope)
    }

    /// Returns a token that flips when the scope closes.
    #[must_use]
    pub fn token(&self, scope: ScopeId) -> Option<CancelToken> {
        self.scopes.get(&scope).map(|state| state.token.clone())
    }

    /// Closes a scope, cancelling every task it still owns.
    ///
    /// Returns the number of cancelled tasks. Closing an unknown or already
    /// closed scope does nothing.
    pub fn close_scope(&mut self, scope: ScopeId) -> usize {
        let Some(state) = self.scopes.remove(&scope) else {
            return 0;
        };

        state.token.cancel();
        let cancelled = state
            .outstanding
            .iter()
            .filter(|task| self.tasks.remove(*task).is_some())
            .count();

        tracing::trace!(
            scope = scope.0,
            label = state.label,
            cancelled,
            "scope closed"
        );

        self.compact();
        cancelled
    }

    /// Schedules a timer `delay` milliseconds from now.
    ///
    /// Returns `None` if the scope is closed.
    pub fn schedule_in(&mut self, scope: ScopeId, delay: Millis, payload: T) -> Option<TaskId> {
        self.schedule_at(scope, self.now.saturating_add(delay), payload)
    }

    /// Schedules a timer at an absolute clock time.
    ///
    /// A due time in the past fires on the next poll. Returns `None` if the
    /// scope is closed.
    pub fn schedule_at(&mut self, scope: ScopeId, due: Millis, payload: T) -> Option<TaskId> {
        let due = due.max(self.now);
        let id = self.register(scope, payload)?;
        self.timers.push(Reverse((due, id)));
        Some(id)
    }

    /// Requests a callback on the next frame.
    ///
    /// Returns `None` if the scope is closed.
    pub fn request_frame(&mut self, scope: ScopeId, payload: T) -> Option<TaskId> {
        let id = self.register(scope, payload)?;
        self.frame_requests.push(id);
        Some(id)
    }

    fn register(&mut self, scope: ScopeId, payload: T) -> Option<TaskId> {
        let state = self.scopes.get_mut(&scope)?;
        let id = TaskId(self.next_task);
        self.next_task += 1;
        state.outstanding.push(id);
        self.tasks.insert(id, Task { scope, payload });
        Some(id)
    }

    /// Cancels a single task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, task: TaskId) -> bool {
        self.take(task).is_some()
    }

    /// Returns true if the task is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, task: TaskId) -> bool {
        self.tasks.contains_key(&task)
    }

    /// Returns the number of live tasks across all scopes.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of live tasks owned by a scope.
    #[must_use]
    pub fn pending_in(&self, scope: ScopeId) -> usize {
        self.scopes
            .get(&scope)
            .map_or(0, |state| state.outstanding.len())
    }

    /// Returns the due time of the earliest live timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.timers
            .iter()
            .filter(|Reverse((_, id))| self.tasks.contains_key(id))
            .map(|Reverse((due, _))| *due)
            .min()
    }

    /// Pops the next timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time before it is returned, so work
    /// scheduled while handling it is relative to when it fired. Once nothing
    /// else is due the clock moves to `until` and `None` is returned.
    pub fn poll_timer(&mut self, until: Millis) -> Option<Fired<T>> {
        while let Some(&Reverse((due, id))) = self.timers.peek() {
            if due > until {
                break;
            }
            self.timers.pop();

            // Cancelled tasks leave their heap entry behind.
            let Some(task) = self.take(id) else {
                continue;
            };

            self.now = self.now.max(due);
            return Some(Fired {
                id,
                scope: task.scope,
                at: self.now,
                payload: task.payload,
            });
        }

        self.now = self.now.max(until);
        None
    }

    /// Starts a frame: every callback requested so far becomes runnable.
    pub fn begin_frame(&mut self, now: Millis) {
        self.now = self.now.max(now);
        self.frame_count += 1;
        self.frame_batch.extend(self.frame_requests.drain(..));
    }

    /// Pops the next runnable frame callback of the current frame.
    pub fn poll_frame(&mut self) -> Option<Fired<T>> {
        while let Some(id) = self.frame_batch.pop_front() {
            if let Some(task) = self.take(id) {
                return Some(Fired {
                    id,
                    scope: task.scope,
                    at: self.now,
                    payload: task.payload,
                });
            }
        }
        None
    }

    fn take(&mut self, id: TaskId) -> Option<Task<T>> {
        let task = self.tasks.remove(&id)?;
        if let Some(state) = self.scopes.get_mut(&task.scope) {
            state.forget(id);
        }
        Some(task)
    }

    /// Drops queue entries of cancelled tasks once they dominate the queues.
    fn compact(&mut self) {
        let live = self.tasks.len();
        if self.timers.len() > COMPACT_THRESHOLD && self.timers.len() > live * 2 {
            let tasks = &self.tasks;
            self.timers.retain(|Reverse((_, id))| tasks.contains_key(id));
        }
        if self.frame_requests.len() > COMPACT_THRESHOLD && self.frame_requests.len() > live * 2 {
            let tasks = &self.tasks;
            self.frame_requests.retain(|id| tasks.contains_key(id));
        }
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
