//! # Typing Animation
//!
//! Types sentences one character at a time, pauses, deletes them and moves
//! on. After the final sentence (unless looping) it pauses once more and
//! reports [`TypingEvent::Completed`], exactly once.
//!
//! An empty sentence counts as typed the moment it starts; the pause still
//! applies, which gives a blank beat before the next sentence.

use bento_core::{Fired, Millis, Scheduler, ScopeId};

use crate::config::TypingConfig;

/// What the animation is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Waiting out the initial delay.
    Waiting,
    /// Adding characters.
    Typing,
    /// Holding a fully typed sentence.
    Pausing,
    /// Removing characters.
    Deleting,
    /// Finished; the text stays as typed.
    Complete,
}

/// Something the host should render or react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingEvent {
    /// A character was added.
    Typed {
        /// Sentence index.
        sentence: usize,
        /// Characters now visible.
        visible: usize,
    },
    /// A character was removed.
    Deleted {
        /// Sentence index.
        sentence: usize,
        /// Characters now visible.
        visible: usize,
    },
    /// The last sentence was typed and held.
    Completed {
        /// Clock time of completion.
        at: Millis,
    },
    /// The cursor toggled.
    CursorBlink {
        /// Cursor is drawn.
        visible: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypingTask {
    Start,
    Type,
    PauseOver,
    Delete,
    Complete,
    Blink,
}

/// Sentence typing state machine.
#[derive(Debug)]
pub struct TypingAnimation {
    sentences: Vec<String>,
    config: TypingConfig,
    sentence: usize,
    /// Visible characters of the current sentence.
    visible: usize,
    phase: TypingPhase,
    cursor_visible: bool,
    completed: bool,
    scheduler: Scheduler<TypingTask>,
    scope: ScopeId,
    events: Vec<TypingEvent>,
}

impl TypingAnimation {
    /// Creates the animation; the first character is due after the initial
    /// delay plus one typing interval.
    #[must_use]
    pub fn new(sentences: Vec<String>, config: TypingConfig, now: Millis) -> Self {
        let mut scheduler = Scheduler::starting_at(now);
        let scope = scheduler.open_scope("typing");

        scheduler.schedule_in(scope, config.initial_delay_ms, TypingTask::Start);
        if config.show_cursor {
            scheduler.schedule_in(scope, config.cursor_blink_ms.max(1), TypingTask::Blink);
        }

        Self {
            sentences,
            sentence: 0,
            visible: 0,
            phase: TypingPhase::Waiting,
            cursor_visible: config.show_cursor,
            completed: false,
            scheduler,
            scope,
            events: Vec::new(),
            config,
        }
    }

    /// Returns the phase.
    #[must_use]
    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Returns the index of the sentence being shown.
    #[must_use]
    pub fn sentence_index(&self) -> usize {
        self.sentence
    }

    /// Returns true once [`TypingEvent::Completed`] was emitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Returns true if the cursor is currently drawn.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.config.show_cursor && self.cursor_visible
    }

    /// Returns the visible part of the current sentence.
    #[must_use]
    pub fn text(&self) -> &str {
        let Some(sentence) = self.sentences.get(self.sentence) else {
            return "";
        };
        let end = sentence
            .char_indices()
            .nth(self.visible)
            .map_or(sentence.len(), |(offset, _)| offset);
        &sentence[..end]
    }

    /// Returns the visible text followed by the cursor when drawn.
    #[must_use]
    pub fn display(&self) -> String {
        if self.cursor_visible() {
            format!("{}{}", self.text(), self.config.cursor_character)
        } else {
            self.text().to_string()
        }
    }

    /// Returns the next time anything is scheduled to happen.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Fires every timer due at or before `now`.
    pub fn advance(&mut self, now: Millis) {
        while let Some(fired) = self.scheduler.poll_timer(now) {
            self.dispatch(&fired);
        }
    }

    /// Takes the events produced so far.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, TypingEvent> {
        self.events.drain(..)
    }

    /// Stops every timer. The text stays as it is.
    pub fn unmount(&mut self) {
        self.scheduler.close_scope(self.scope);
    }

    fn dispatch(&mut self, fired: &Fired<TypingTask>) {
        match fired.payload {
            TypingTask::Start => {
                if self.sentences.is_empty() {
                    self.complete(fired.at);
                } else {
                    self.begin_sentence();
                }
            }
            TypingTask::Type => {
                self.visible += 1;
                self.events.push(TypingEvent::Typed {
                    sentence: self.sentence,
                    visible: self.visible,
                });
                if self.visible >= self.sentence_len() {
                    self.sentence_typed();
                } else {
                    self.schedule(self.config.typing_speed_ms, TypingTask::Type);
                }
            }
            TypingTask::PauseOver => {
                self.phase = TypingPhase::Deleting;
                if self.visible == 0 {
                    self.next_sentence();
                } else {
                    self.schedule(self.config.deleting_speed_ms, TypingTask::Delete);
                }
            }
            TypingTask::Delete => {
                self.visible = self.visible.saturating_sub(1);
                self.events.push(TypingEvent::Deleted {
                    sentence: self.sentence,
                    visible: self.visible,
                });
                if self.visible == 0 {
                    self.next_sentence();
                } else {
                    self.schedule(self.config.deleting_speed_ms, TypingTask::Delete);
                }
            }
            TypingTask::Complete => self.complete(fired.at),
            TypingTask::Blink => {
                self.cursor_visible = !self.cursor_visible;
                self.events.push(TypingEvent::CursorBlink {
                    visible: self.cursor_visible,
                });
                self.schedule(self.config.cursor_blink_ms, TypingTask::Blink);
            }
        }
    }

    fn sentence_len(&self) -> usize {
        self.sentences
            .get(self.sentence)
            .map_or(0, |sentence| sentence.chars().count())
    }

    fn schedule(&mut self, delay: Millis, task: TypingTask) {
        self.scheduler.schedule_in(self.scope, delay.max(1), task);
    }

    fn begin_sentence(&mut self) {
        self.phase = TypingPhase::Typing;
        self.visible = 0;
        if self.sentence_len() == 0 {
            self.sentence_typed();
        } else {
            self.schedule(self.config.typing_speed_ms, TypingTask::Type);
        }
    }

    fn sentence_typed(&mut self) {
        self.phase = TypingPhase::Pausing;
        let last = self.sentence + 1 >= self.sentences.len();
        let task = if last && !self.config.looped {
            TypingTask::Complete
        } else {
            TypingTask::PauseOver
        };
        self.scheduler
            .schedule_in(self.scope, self.config.pause_ms, task);
    }

    fn next_sentence(&mut self) {
        self.sentence = (self.sentence + 1).rem_euclid(self.sentences.len().max(1));
        self.begin_sentence();
    }

    fn complete(&mut self, at: Millis) {
        self.phase = TypingPhase::Complete;
        if self.completed {
            return;
        }
        self.completed = true;
        self.events.push(TypingEvent::Completed { at });
        tracing::debug!(at, sentences = self.sentences.len(), "typing complete");
    }
}
