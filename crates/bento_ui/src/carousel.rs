//! # Carousel
//!
//! A single-item display that rotates through a fixed list.
//!
//! ```text
//!        tick / manual              slide_ms                slide_ms
//! Idle ───────────────> SlidingOut ─────────> SlidingIn ─────────> Idle
//!                                   (index swapped here)
//! ```
//!
//! Auto-advance ticks every `interval_ms` and is ignored unless idle. A
//! manual action cancels the pending tick and any slide in flight, then
//! resumes auto-advance `resume_delay_ms` after its index swap.

use bento_core::{BentoError, BentoResult, Fired, Millis, Scheduler, ScopeId};

use crate::config::CarouselConfig;

/// Animation phase of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlidePhase {
    /// Showing the current item.
    #[default]
    Idle,
    /// The current item is leaving.
    SlidingOut,
    /// The new item is arriving.
    SlidingIn,
}

/// Direction of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    /// Forward.
    #[default]
    Next,
    /// Backward.
    Prev,
}

/// Something the host should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The current item started sliding out.
    SlideOut {
        /// Index leaving.
        from: usize,
        /// Slide direction.
        direction: SlideDirection,
    },
    /// The displayed index changed; the new item slides in.
    IndexChanged {
        /// Index now displayed.
        index: usize,
        /// Slide direction.
        direction: SlideDirection,
    },
    /// The slide finished.
    Settled {
        /// Index displayed.
        index: usize,
    },
    /// Auto-advance restarted after a manual action.
    AutoResumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlideTarget {
    Step(SlideDirection),
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarouselTask {
    AutoTick,
    Swap { target: SlideTarget, manual: bool },
    Settle,
    Resume,
}

/// Rotating display over a non-empty list.
#[derive(Debug)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
    phase: SlidePhase,
    direction: SlideDirection,
    config: CarouselConfig,
    scheduler: Scheduler<CarouselTask>,
    /// Owns the recurring tick and the post-manual resume.
    auto_scope: ScopeId,
    /// Owns the swap and settle of the slide in flight.
    slide_scope: ScopeId,
    events: Vec<CarouselEvent>,
    mounted: bool,
}

impl<T> Carousel<T> {
    /// Creates a carousel showing the first item, with auto-advance armed.
    ///
    /// # Errors
    ///
    /// Returns [`BentoError::EmptyCarousel`] if `items` is empty.
    pub fn new(items: Vec<T>, config: CarouselConfig, now: Millis) -> BentoResult<Self> {
        if items.is_empty() {
            return Err(BentoError::EmptyCarousel);
        }

        let mut scheduler = Scheduler::starting_at(now);
        let auto_scope = scheduler.open_scope("carousel-auto");
        let slide_scope = scheduler.open_scope("carousel-slide");

        let mut carousel = Self {
            items,
            index: 0,
            phase: SlidePhase::Idle,
            direction: SlideDirection::Next,
            config,
            scheduler,
            auto_scope,
            slide_scope,
            events: Vec::new(),
            mounted: true,
        };
        carousel.arm_auto();
        Ok(carousel)
    }

    /// Returns the displayed item.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    /// Returns the displayed index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns every item.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the animation phase.
    #[must_use]
    pub fn phase(&self) -> SlidePhase {
        self.phase
    }

    /// Returns the direction of the latest slide.
    #[must_use]
    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Returns the next time anything is scheduled to happen.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Returns true until [`unmount`](Self::unmount) is called.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Slides to the next item.
    pub fn next(&mut self, now: Millis) {
        self.manual(now, SlideDirection::Next, SlideTarget::Step(SlideDirection::Next));
    }

    /// Slides to the previous item.
    pub fn prev(&mut self, now: Millis) {
        self.manual(now, SlideDirection::Prev, SlideTarget::Step(SlideDirection::Prev));
    }

    /// Slides straight to `index` (dot navigation).
    ///
    /// Returns `Ok(false)` without touching anything when `index` is
    /// already displayed.
    ///
    /// # Errors
    ///
    /// Returns [`BentoError::IndexOutOfRange`] if `index` is not in the list.
    pub fn select(&mut self, index: usize, now: Millis) -> BentoResult<bool> {
        let len = self.items.len();
        if index >= len {
            return Err(BentoError::IndexOutOfRange { index, len });
        }
        self.advance(now);
        if !self.mounted || index == self.index {
            return Ok(false);
        }

        let direction = if index > self.index {
            SlideDirection::Next
        } else {
            SlideDirection::Prev
        };
        self.manual(now, direction, SlideTarget::Index(index));
        Ok(true)
    }

    /// Fires every timer due at or before `now`.
    pub fn advance(&mut self, now: Millis) {
        while let Some(fired) = self.scheduler.poll_timer(now) {
            self.dispatch(fired);
        }
    }

    /// Takes the events produced so far.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, CarouselEvent> {
        self.events.drain(..)
    }

    /// Stops the carousel. Nothing fires afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.scheduler.close_scope(self.auto_scope);
        self.scheduler.close_scope(self.slide_scope);
        tracing::debug!(index = self.index, "carousel unmounted");
    }

    fn manual(&mut self, now: Millis, direction: SlideDirection, target: SlideTarget) {
        self.advance(now);
        if !self.mounted {
            return;
        }

        // Drop the pending tick and whatever slide is in flight.
        self.scheduler.close_scope(self.auto_scope);
        self.scheduler.close_scope(self.slide_scope);
        self.auto_scope = self.scheduler.open_scope("carousel-auto");
        self.slide_scope = self.scheduler.open_scope("carousel-slide");

        tracing::debug!(from = self.index, ?direction, "manual slide");
        self.begin_slide(direction, target, true);
    }

    fn arm_auto(&mut self) {
        let interval = self.config.interval_ms.max(1);
        self.scheduler
            .schedule_in(self.auto_scope, interval, CarouselTask::AutoTick);
    }

    fn begin_slide(&mut self, direction: SlideDirection, target: SlideTarget, manual: bool) {
        self.phase = SlidePhase::SlidingOut;
        self.direction = direction;
        self.events.push(CarouselEvent::SlideOut {
            from: self.index,
            direction,
        });
        self.scheduler.schedule_in(
            self.slide_scope,
            self.config.slide_ms,
            CarouselTask::Swap { target, manual },
        );
    }

    fn dispatch(&mut self, fired: Fired<CarouselTask>) {
        match fired.payload {
            CarouselTask::AutoTick => {
                self.arm_auto();
                if self.phase == SlidePhase::Idle {
                    self.begin_slide(
                        SlideDirection::Next,
                        SlideTarget::Step(SlideDirection::Next),
                        false,
                    );
                } else {
                    tracing::trace!(phase = ?self.phase, "auto tick ignored mid-slide");
                }
            }
            CarouselTask::Swap { target, manual } => {
                let len = self.items.len();
                self.index = match target {
                    SlideTarget::Step(SlideDirection::Next) => (self.index + 1).rem_euclid(len),
                    SlideTarget::Step(SlideDirection::Prev) => {
                        (self.index + len - 1).rem_euclid(len)
                    }
                    SlideTarget::Index(index) => index.min(len - 1),
                };
                self.phase = SlidePhase::SlidingIn;
                self.events.push(CarouselEvent::IndexChanged {
                    index: self.index,
                    direction: self.direction,
                });
                self.scheduler
                    .schedule_in(self.slide_scope, self.config.slide_ms, CarouselTask::Settle);
                if manual {
                    self.scheduler.schedule_in(
                        self.auto_scope,
                        self.config.resume_delay_ms,
                        CarouselTask::Resume,
                    );
                }
                tracing::debug!(index = self.index, "carousel index changed");
            }
            CarouselTask::Settle => {
                self.phase = SlidePhase::Idle;
                self.events.push(CarouselEvent::Settled { index: self.index });
            }
            CarouselTask::Resume => {
                self.events.push(CarouselEvent::AutoResumed);
                self.arm_auto();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(len: usize) -> Carousel<usize> {
        Carousel::new((0..len).collect(), CarouselConfig::default(), 0).unwrap()
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = Carousel::<u8>::new(Vec::new(), CarouselConfig::default(), 0).unwrap_err();
        assert_eq!(err, BentoError::EmptyCarousel);
    }

    #[test]
    fn test_auto_advance_timeline() {
        let mut c = carousel(3);

        c.advance(3_999);
        assert_eq!(c.phase(), SlidePhase::Idle);

        c.advance(4_000);
        assert_eq!(c.phase(), SlidePhase::SlidingOut);
        assert_eq!(c.index(), 0);

        c.advance(4_500);
        assert_eq!(c.phase(), SlidePhase::SlidingIn);
        assert_eq!(c.index(), 1);

        c.advance(5_000);
        assert_eq!(c.phase(), SlidePhase::Idle);

        c.advance(12_500);
        assert_eq!(c.index(), 0);

        let events: Vec<_> = c.drain_events().collect();
        assert_eq!(
            events[..3],
            [
                CarouselEvent::SlideOut {
                    from: 0,
                    direction: SlideDirection::Next
                },
                CarouselEvent::IndexChanged {
                    index: 1,
                    direction: SlideDirection::Next
                },
                CarouselEvent::Settled { index: 1 },
            ]
        );
    }

    #[test]
    fn test_next_wraps_modulo_length() {
        for len in 1..5 {
            let mut c = carousel(len);
            let mut now = 0;
            for n in 1..=7 {
                c.next(now);
                now += 600;
                c.advance(now);
                assert_eq!(c.index(), n % len);
            }
        }
    }

    #[test]
    fn test_prev_from_first_wraps_to_last() {
        let mut c = carousel(4);
        c.prev(100);
        assert_eq!(c.direction(), SlideDirection::Prev);
        c.advance(600);
        assert_eq!(c.index(), 3);
        assert_eq!(c.current(), &3);
    }

    #[test]
    fn test_select_current_is_noop() {
        let mut c = carousel(3);
        let wakeup = c.next_wakeup();

        assert_eq!(c.select(0, 1_000), Ok(false));
        assert_eq!(c.phase(), SlidePhase::Idle);
        assert_eq!(c.next_wakeup(), wakeup);
        assert_eq!(c.drain_events().count(), 0);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut c = carousel(3);
        assert_eq!(
            c.select(3, 0),
            Err(BentoError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_dot_select_direction() {
        let mut c = carousel(4);
        assert_eq!(c.select(2, 0), Ok(true));
        assert_eq!(c.direction(), SlideDirection::Next);
        c.advance(500);
        assert_eq!(c.index(), 2);

        assert_eq!(c.select(1, 1_000), Ok(true));
        assert_eq!(c.direction(), SlideDirection::Prev);
        c.advance(1_500);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_manual_action_suspends_auto_advance() {
        let mut c = carousel(5);

        c.next(3_900);
        c.advance(4_100);
        // The 4s tick was cancelled.
        assert_eq!(c.phase(), SlidePhase::SlidingOut);

        c.advance(4_400);
        assert_eq!(c.index(), 1);

        // Resumes 3s after the swap, first tick one interval later.
        c.advance(7_399);
        assert!(!c.drain_events().any(|e| e == CarouselEvent::AutoResumed));
        c.advance(7_400);
        assert!(c.drain_events().any(|e| e == CarouselEvent::AutoResumed));

        c.advance(11_399);
        assert_eq!(c.phase(), SlidePhase::Idle);
        c.advance(11_400);
        assert_eq!(c.phase(), SlidePhase::SlidingOut);
        c.advance(11_900);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn test_manual_cancels_slide_in_flight() {
        let mut c = carousel(5);
        c.next(0);
        c.next(300);
        c.advance(799);
        assert_eq!(c.index(), 0);
        c.advance(800);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_ticks_during_slide_are_ignored() {
        let config = CarouselConfig {
            interval_ms: 600,
            slide_ms: 500,
            resume_delay_ms: 3_000,
        };
        let mut c = Carousel::new(vec!['a', 'b', 'c'], config, 0).unwrap();

        c.advance(1_100);
        assert_eq!(c.index(), 1);
        // Tick at 1200 lands in SlidingIn and is dropped.
        c.advance(1_700);
        assert_eq!(c.phase(), SlidePhase::Idle);
        assert_eq!(c.index(), 1);

        c.advance(1_800);
        assert_eq!(c.phase(), SlidePhase::SlidingOut);
    }

    #[test]
    fn test_unmount_stops_everything() {
        let mut c = carousel(3);
        c.next(0);
        c.unmount();
        c.advance(100_000);
        c.next(100_000);
        assert_eq!(c.index(), 0);
        assert_eq!(c.next_wakeup(), None);
        assert!(!c.is_mounted());
    }
}
