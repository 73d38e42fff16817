//! # Loading Splash
//!
//! Types the splash sentences and then sends the visitor on to the home
//! page. Two timers race for the redirect:
//!
//! ```text
//! mount ──────────────────────────────── fallback (10 s) ──> Navigate
//!   └─ typing ── Completed ── +2 s ──> Navigate   (cancels the fallback)
//! ```
//!
//! Whichever fires first navigates; nothing navigates twice.

use bento_core::{Fired, Millis, Scheduler, ScopeId, TaskId};
use bento_ui::config::EffectsConfig;
use bento_ui::{TypingAnimation, TypingEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplashTask {
    Fallback,
    Redirect,
}

/// Something the host should render or act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashEvent {
    /// Forwarded typing output.
    Typing(TypingEvent),
    /// The last sentence finished; the redirect is now scheduled.
    TypingCompleted,
    /// Leave the splash for this path.
    Navigate(String),
}

/// Loading splash controller.
#[derive(Debug)]
pub struct LoadingSplash {
    typing: TypingAnimation,
    scheduler: Scheduler<SplashTask>,
    scope: ScopeId,
    fallback: Option<TaskId>,
    target: String,
    redirect_delay: Millis,
    typing_complete: bool,
    redirect_scheduled: bool,
    navigated: bool,
    events: Vec<SplashEvent>,
}

impl LoadingSplash {
    /// Mounts the splash: typing starts and the fallback redirect is armed.
    #[must_use]
    pub fn new(config: &EffectsConfig, now: Millis) -> Self {
        let typing =
            TypingAnimation::new(config.splash.sentences.clone(), config.typing.clone(), now);

        let mut scheduler = Scheduler::starting_at(now);
        let scope = scheduler.open_scope("splash");
        let fallback =
            scheduler.schedule_in(scope, config.splash.fallback_ms, SplashTask::Fallback);

        tracing::debug!(
            fallback_ms = config.splash.fallback_ms,
            sentences = config.splash.sentences.len(),
            "splash mounted"
        );

        Self {
            typing,
            scheduler,
            scope,
            fallback,
            target: config.splash.target.clone(),
            redirect_delay: config.splash.redirect_delay_ms,
            typing_complete: false,
            redirect_scheduled: false,
            navigated: false,
            events: Vec::new(),
        }
    }

    /// Returns the typing animation.
    #[must_use]
    pub fn typing(&self) -> &TypingAnimation {
        &self.typing
    }

    /// Returns true once the last sentence was typed and held.
    #[must_use]
    pub fn is_typing_complete(&self) -> bool {
        self.typing_complete
    }

    /// Returns true once the post-typing redirect was scheduled.
    #[must_use]
    pub fn is_redirect_scheduled(&self) -> bool {
        self.redirect_scheduled
    }

    /// Returns true once [`SplashEvent::Navigate`] was emitted.
    #[must_use]
    pub fn has_navigated(&self) -> bool {
        self.navigated
    }

    /// Returns the next time anything is scheduled to happen.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Millis> {
        self.typing
            .next_wakeup()
            .into_iter()
            .chain(self.scheduler.next_due())
            .min()
    }

    /// Runs both the typing and the redirect timers up to `now`, in clock
    /// order.
    pub fn advance(&mut self, now: Millis) {
        loop {
            let typing_due = self.typing.next_wakeup().filter(|&due| due <= now);
            let splash_due = self.scheduler.next_due().filter(|&due| due <= now);
            let Some(step) = typing_due.into_iter().chain(splash_due).min() else {
                break;
            };

            self.typing.advance(step);
            let typed: Vec<_> = self.typing.drain_events().collect();
            for event in typed {
                self.on_typing(event);
            }

            while let Some(fired) = self.scheduler.poll_timer(step) {
                self.dispatch(&fired);
            }
        }
        self.scheduler.advance_to(now);
    }

    /// Takes the events produced so far.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SplashEvent> {
        self.events.drain(..)
    }

    /// Stops typing and both redirect timers.
    pub fn unmount(&mut self) {
        self.typing.unmount();
        self.scheduler.close_scope(self.scope);
    }

    fn on_typing(&mut self, event: TypingEvent) {
        self.events.push(SplashEvent::Typing(event));

        let TypingEvent::Completed { at } = event else {
            return;
        };
        self.typing_complete = true;
        self.events.push(SplashEvent::TypingCompleted);

        if self.navigated || self.redirect_scheduled {
            return;
        }
        self.redirect_scheduled = true;
        if let Some(fallback) = self.fallback.take() {
            self.scheduler.cancel(fallback);
        }
        self.scheduler.schedule_at(
            self.scope,
            at.saturating_add(self.redirect_delay),
            SplashTask::Redirect,
        );
        tracing::debug!(at, delay = self.redirect_delay, "redirect scheduled");
    }

    fn dispatch(&mut self, fired: &Fired<SplashTask>) {
        if self.navigated {
            return;
        }
        self.navigated = true;
        self.unmount();

        let reason = match fired.payload {
            SplashTask::Fallback => "fallback",
            SplashTask::Redirect => "typing complete",
        };
        tracing::info!(at = fired.at, target = %self.target, reason, "leaving splash");
        self.events.push(SplashEvent::Navigate(self.target.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmount_cancels_navigation() {
        let config = EffectsConfig::default();
        let mut splash = LoadingSplash::new(&config, 0);
        splash.advance(1_000);
        splash.unmount();
        splash.advance(60_000);

        assert!(!splash.has_navigated());
        assert_eq!(splash.next_wakeup(), None);
        assert!(!splash
            .drain_events()
            .any(|event| matches!(event, SplashEvent::Navigate(_))));
    }

    #[test]
    fn test_typing_events_are_forwarded() {
        let config = EffectsConfig::default();
        let mut splash = LoadingSplash::new(&config, 0);
        // The first sentence is empty; the second starts after its pause.
        splash.advance(config.typing.pause_ms + config.typing.typing_speed_ms);
        assert!(splash.drain_events().any(|event| event
            == SplashEvent::Typing(TypingEvent::Typed {
                sentence: 1,
                visible: 1
            })));
    }
}
