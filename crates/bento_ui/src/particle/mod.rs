//! # Hover Particles
//!
//! Hovering a card releases a swarm of small glowing dots that orbit random
//! anchors inside it until the pointer leaves.
//!
//! ## Lifecycle
//!
//! 1. **Hover start** opens a session scope. On the card's first hover a
//!    fixed set of template anchors is drawn and cached. One spawn per
//!    template is scheduled, `index * stagger_ms` apart.
//! 2. **Spawn** appends a hidden particle; the next frame reveals it and
//!    starts an orbit cycle.
//! 3. **Frames** place the particle on its orbit until the cycle is over,
//!    then it fades out, moves to a fresh anchor, settles and orbits again.
//! 4. **Hover end** closes the session scope, which cancels every pending
//!    step, and fades out each particle. Removal is scheduled in the card's
//!    teardown scope so it survives the session.
//!
//! Particles live in a [`SlotPool`]; a step carrying a handle whose slot
//! was recycled finds nothing and is skipped.

mod cycle;
mod session;

pub use cycle::{random_anchor, Cycle, Orbit, Particle, ParticlePhase};
pub use session::{CardParticles, HoverSession};

use std::collections::HashMap;

use bento_core::{Fired, Millis, Scheduler, ScopeId, SlotHandle, SlotPool};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::animation::{Easing, Transition};
use crate::config::ParticleConfig;
use crate::layout::{Point, Size};
use crate::render::{CommandBuffer, ParticleInstance, StyleCommand, Transform};
use crate::widget::CardId;

/// Deferred particle work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParticleTask {
    /// Timer: clone template `template` into the card.
    Spawn { card: CardId, template: usize },
    /// Frame: fade a freshly spawned particle in.
    Reveal(SlotHandle),
    /// Frame: place the particle on its orbit.
    Step(SlotHandle),
    /// Timer: the recycle fade is over, pick a new anchor.
    Reposition(SlotHandle),
    /// Timer: settling is over, start the next cycle.
    Restart(SlotHandle),
    /// Timer: the exit fade is over, drop the element.
    Remove(SlotHandle),
}

/// Drives hover particles for every mounted card.
#[derive(Debug)]
pub struct ParticleEngine {
    config: ParticleConfig,
    orbit: Orbit,
    scheduler: Scheduler<ParticleTask>,
    cards: HashMap<CardId, CardParticles>,
    particles: SlotPool<Particle>,
    rng: ChaCha8Rng,
    enabled: bool,
    last_frame: Option<Millis>,
}

impl ParticleEngine {
    /// Creates an engine with the given settings.
    #[must_use]
    pub fn new(config: ParticleConfig) -> Self {
        let capacity = config.count.saturating_mul(4).max(16);
        Self {
            orbit: Orbit::from_config(&config),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            scheduler: Scheduler::new(),
            cards: HashMap::with_capacity(8),
            particles: SlotPool::with_capacity(capacity),
            enabled: true,
            last_frame: None,
            config,
        }
    }

    /// Returns the settings.
    #[must_use]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Returns the engine's clock.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// Returns true if hovers spawn particles.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns particles on or off. Turning them off ends every session.
    pub fn set_enabled(&mut self, enabled: bool, now: Millis, out: &mut CommandBuffer) {
        self.advance(now, out);
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            let cards: Vec<CardId> = self.cards.keys().copied().collect();
            for card in cards {
                self.end_session(card, out);
            }
        }
        tracing::debug!(enabled, "particle effects toggled");
    }

    /// Registers a card, or updates its size if already mounted.
    pub fn mount(&mut self, card: CardId, size: Size) {
        if let Some(state) = self.cards.get_mut(&card) {
            state.size = size;
            return;
        }
        let teardown = self.scheduler.open_scope("teardown");
        self.cards.insert(card, CardParticles::new(size, teardown));
        tracing::trace!(card = card.raw(), "particle card mounted");
    }

    /// Updates a card's size. Cached templates are kept.
    ///
    /// Returns false if the card is not mounted.
    pub fn resize(&mut self, card: CardId, size: Size) -> bool {
        match self.cards.get_mut(&card) {
            Some(state) => {
                state.size = size;
                true
            }
            None => false,
        }
    }

    /// Forgets a card: cancels everything it scheduled and removes every
    /// particle immediately.
    ///
    /// Returns false if the card was not mounted.
    pub fn unmount(&mut self, card: CardId, now: Millis, out: &mut CommandBuffer) -> bool {
        self.advance(now, out);
        let Some(state) = self.cards.remove(&card) else {
            return false;
        };

        let mut cancelled = self.scheduler.close_scope(state.teardown);
        if let Some(session) = &state.session {
            cancelled += self.scheduler.close_scope(session.scope);
        }
        for handle in state.live {
            if self.particles.remove(handle).is_some() {
                out.push(StyleCommand::RemoveParticle {
                    card,
                    particle: handle,
                });
            }
        }

        tracing::debug!(card = card.raw(), cancelled, "particle card unmounted");
        true
    }

    /// Starts a hover session, retiring the previous one first.
    ///
    /// Returns false if the card is unknown or particles are disabled.
    pub fn hover_start(&mut self, card: CardId, now: Millis, out: &mut CommandBuffer) -> bool {
        self.advance(now, out);
        if !self.enabled {
            return false;
        }
        if !self.cards.contains_key(&card) {
            tracing::trace!(card = card.raw(), "hover on unmounted card ignored");
            return false;
        }
        self.end_session(card, out);

        let scope = self.scheduler.open_scope("hover");
        let token = self.scheduler.token(scope).unwrap_or_default();
        let Some(state) = self.cards.get_mut(&card) else {
            return false;
        };

        if state.templates.is_empty() {
            let size = state.size;
            let rng = &mut self.rng;
            state.templates = (0..self.config.count)
                .map(|_| random_anchor(size, rng))
                .collect();
        }

        state.session = Some(HoverSession {
            scope,
            token,
            started_at: now,
        });
        let mut delay: Millis = 0;
        for template in 0..state.templates.len() {
            self.scheduler
                .schedule_in(scope, delay, ParticleTask::Spawn { card, template });
            delay = delay.saturating_add(self.config.stagger_ms);
        }

        tracing::debug!(
            card = card.raw(),
            particles = state.templates.len(),
            "hover session started"
        );

        // The first spawn is due right away.
        self.advance(now, out);
        true
    }

    /// Ends the hover session of a card.
    ///
    /// Returns false if the card had no active session.
    pub fn hover_end(&mut self, card: CardId, now: Millis, out: &mut CommandBuffer) -> bool {
        self.advance(now, out);
        self.end_session(card, out)
    }

    /// Fires every timer due at or before `now`.
    pub fn advance(&mut self, now: Millis, out: &mut CommandBuffer) {
        while let Some(fired) = self.scheduler.poll_timer(now) {
            self.dispatch(fired, out);
        }
    }

    /// Runs one animation frame at `now`.
    #[allow(clippy::cast_precision_loss)]
    pub fn frame(&mut self, now: Millis, out: &mut CommandBuffer) {
        self.advance(now, out);

        let dt = self.last_frame.map_or(0, |last| now.saturating_sub(last));
        self.last_frame = Some(now);
        for (_, particle) in self.particles.iter_mut() {
            particle.tick(dt as f32);
        }

        self.scheduler.begin_frame(now);
        while let Some(fired) = self.scheduler.poll_frame() {
            self.dispatch(fired, out);
        }
    }

    /// Returns true if the card has an active hover session.
    #[must_use]
    pub fn is_hovered(&self, card: CardId) -> bool {
        self.cards
            .get(&card)
            .is_some_and(|state| state.session.is_some())
    }

    /// Returns the clock time the card's active hover started.
    #[must_use]
    pub fn hovered_since(&self, card: CardId) -> Option<Millis> {
        self.cards
            .get(&card)
            .and_then(|state| state.session.as_ref())
            .map(|session| session.started_at)
    }

    /// Returns the card's cached template anchors.
    #[must_use]
    pub fn templates(&self, card: CardId) -> &[Point] {
        self.cards
            .get(&card)
            .map_or(&[], |state| state.templates.as_slice())
    }

    /// Iterates over the live particles of a card, fading ones included.
    pub fn particles(&self, card: CardId) -> impl Iterator<Item = (SlotHandle, &Particle)> {
        self.particles
            .iter()
            .filter(move |(_, particle)| particle.card == card)
    }

    /// Returns the number of particle elements a card currently holds.
    #[must_use]
    pub fn live_count(&self, card: CardId) -> usize {
        self.cards.get(&card).map_or(0, |state| state.live.len())
    }

    /// Returns the number of particles of a card that are not fading out.
    #[must_use]
    pub fn visible_count(&self, card: CardId) -> usize {
        self.particles(card)
            .filter(|(_, particle)| particle.phase.is_visible())
            .count()
    }

    /// Returns the number of scheduled timers and frame callbacks.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Appends a snapshot of every live particle.
    pub fn instances(&self, out: &mut Vec<ParticleInstance>) {
        let color = self.config.color.to_array();
        out.extend(
            self.particles
                .iter()
                .map(|(_, particle)| particle.instance(self.config.size, color)),
        );
    }

    fn end_session(&mut self, card: CardId, out: &mut CommandBuffer) -> bool {
        let Some(state) = self.cards.get_mut(&card) else {
            return false;
        };
        let Some(session) = state.session.take() else {
            return false;
        };

        let cancelled = self.scheduler.close_scope(session.scope);
        let fade_ms = self.config.fade_ms;
        let mut fading = 0usize;
        for &handle in &state.live {
            let Some(particle) = self.particles.get_mut(handle) else {
                continue;
            };
            if particle.session != session.scope || particle.phase == ParticlePhase::Fading {
                continue;
            }
            particle.phase = ParticlePhase::Fading;
            particle.cycle = None;
            out.push(StyleCommand::UpdateParticle {
                card,
                particle: handle,
                visual: particle.fade_out(fade_ms),
            });
            self.scheduler
                .schedule_in(state.teardown, fade_ms, ParticleTask::Remove(handle));
            fading += 1;
        }

        tracing::debug!(
            card = card.raw(),
            cancelled,
            fading,
            "hover session ended"
        );
        true
    }

    fn dispatch(&mut self, fired: Fired<ParticleTask>, out: &mut CommandBuffer) {
        let scope = fired.scope;
        let now = fired.at;
        match fired.payload {
            ParticleTask::Spawn { card, template } => self.spawn(card, template, scope, now, out),
            ParticleTask::Reveal(handle) | ParticleTask::Restart(handle) => {
                if self.is_live(handle, scope) {
                    self.start_cycle(handle, scope, now, out);
                }
            }
            ParticleTask::Step(handle) => {
                if self.is_live(handle, scope) {
                    self.step(handle, scope, now, out);
                }
            }
            ParticleTask::Reposition(handle) => {
                if self.is_live(handle, scope) {
                    self.reposition(handle, scope, out);
                }
            }
            ParticleTask::Remove(handle) => self.remove(handle, out),
        }
    }

    /// A session step may only touch a particle of the card's live session.
    fn is_live(&self, handle: SlotHandle, scope: ScopeId) -> bool {
        let live = self.particles.get(handle).is_some_and(|particle| {
            particle.session == scope
                && self
                    .cards
                    .get(&particle.card)
                    .is_some_and(|state| state.is_current(scope))
        });
        if !live {
            tracing::trace!(particle = handle.to_bits(), "stale particle step skipped");
        }
        live
    }

    fn spawn(
        &mut self,
        card: CardId,
        template: usize,
        scope: ScopeId,
        now: Millis,
        out: &mut CommandBuffer,
    ) {
        let Some(state) = self.cards.get_mut(&card) else {
            tracing::trace!(card = card.raw(), "spawn for unmounted card skipped");
            return;
        };
        if !state.is_current(scope) {
            tracing::trace!(card = card.raw(), "spawn for ended session skipped");
            return;
        }
        let Some(&anchor) = state.templates.get(template) else {
            return;
        };

        let handle = self
            .particles
            .insert(Particle::spawn(card, scope, template, anchor, now));
        state.live.push(handle);
        out.push(StyleCommand::SpawnParticle {
            card,
            particle: handle,
            position: anchor,
            size: self.config.size,
            color: self.config.color,
        });
        self.scheduler
            .request_frame(scope, ParticleTask::Reveal(handle));
    }

    fn start_cycle(
        &mut self,
        handle: SlotHandle,
        scope: ScopeId,
        now: Millis,
        out: &mut CommandBuffer,
    ) {
        let duration_ms = self.orbit.cycle_duration(&mut self.rng);
        let Some(particle) = self.particles.get_mut(handle) else {
            return;
        };

        particle.phase = ParticlePhase::Cycling;
        particle.cycle = Some(Cycle {
            started_at: now,
            duration_ms,
        });
        let visual = particle.restyle(
            Transform::IDENTITY,
            1.0,
            Transition::new(self.config.fade_ms, Easing::Ease),
            None,
        );
        out.push(StyleCommand::UpdateParticle {
            card: particle.card,
            particle: handle,
            visual,
        });
        self.scheduler.request_frame(scope, ParticleTask::Step(handle));
    }

    fn step(&mut self, handle: SlotHandle, scope: ScopeId, now: Millis, out: &mut CommandBuffer) {
        let fade_ms = self.config.fade_ms;
        let Some(particle) = self.particles.get_mut(handle) else {
            return;
        };
        let Some(cycle) = particle.cycle else {
            return;
        };

        let progress = cycle.progress(now);
        if progress < 1.0 {
            let transform = self.orbit.transform_at(progress, &mut self.rng);
            let visual = particle.restyle(
                transform,
                1.0,
                Transition::new(fade_ms, Easing::Ease),
                None,
            );
            out.push(StyleCommand::UpdateParticle {
                card: particle.card,
                particle: handle,
                visual,
            });
            self.scheduler.request_frame(scope, ParticleTask::Step(handle));
        } else {
            particle.phase = ParticlePhase::Recycling;
            particle.cycle = None;
            out.push(StyleCommand::UpdateParticle {
                card: particle.card,
                particle: handle,
                visual: particle.fade_out(fade_ms),
            });
            self.scheduler
                .schedule_in(scope, fade_ms, ParticleTask::Reposition(handle));
        }
    }

    fn reposition(&mut self, handle: SlotHandle, scope: ScopeId, out: &mut CommandBuffer) {
        let Some(particle) = self.particles.get_mut(handle) else {
            return;
        };
        let Some(size) = self.cards.get(&particle.card).map(|state| state.size) else {
            return;
        };

        let anchor = random_anchor(size, &mut self.rng);
        particle.phase = ParticlePhase::Settling;
        let visual = particle.restyle(
            Transform::scaled(0.0),
            0.0,
            Transition::NONE,
            Some(anchor),
        );
        out.push(StyleCommand::UpdateParticle {
            card: particle.card,
            particle: handle,
            visual,
        });
        self.scheduler
            .schedule_in(scope, self.config.settle_ms, ParticleTask::Restart(handle));
    }

    fn remove(&mut self, handle: SlotHandle, out: &mut CommandBuffer) {
        let Some(particle) = self.particles.remove(handle) else {
            tracing::trace!(particle = handle.to_bits(), "particle already removed");
            return;
        };
        if let Some(state) = self.cards.get_mut(&particle.card) {
            state.forget(handle);
        }
        out.push(StyleCommand::RemoveParticle {
            card: particle.card,
            particle: handle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: CardId = CardId(1);
    const FRAME_MS: Millis = 16;

    fn engine(count: usize) -> ParticleEngine {
        let mut engine = ParticleEngine::new(ParticleConfig {
            count,
            ..ParticleConfig::default()
        });
        engine.mount(CARD, Size::new(300.0, 200.0));
        engine
    }

    /// Runs frames from `from` (exclusive) to `to` (inclusive).
    fn run(engine: &mut ParticleEngine, from: Millis, to: Millis, out: &mut CommandBuffer) {
        let mut now = from;
        while now < to {
            now = (now + FRAME_MS).min(to);
            engine.frame(now, out);
        }
    }

    fn count(out: &CommandBuffer, pred: impl Fn(&StyleCommand) -> bool) -> usize {
        out.iter().filter(|cmd| pred(cmd)).count()
    }

    #[test]
    fn test_spawns_are_staggered() {
        let mut engine = engine(3);
        let mut out = CommandBuffer::new();

        assert!(engine.hover_start(CARD, 0, &mut out));
        assert_eq!(engine.live_count(CARD), 1);

        engine.advance(151, &mut out);
        assert_eq!(engine.visible_count(CARD), 3);

        let mut spawned: Vec<Millis> = engine.particles(CARD).map(|(_, p)| p.spawned_at).collect();
        spawned.sort_unstable();
        assert_eq!(spawned, vec![0, 50, 100]);
        assert_eq!(
            count(&out, |c| matches!(c, StyleCommand::SpawnParticle { .. })),
            3
        );
    }

    #[test]
    fn test_hover_start_time_tracks_the_active_session() {
        let mut engine = engine(2);
        let mut out = CommandBuffer::new();
        assert_eq!(engine.hovered_since(CARD), None);

        engine.hover_start(CARD, 40, &mut out);
        assert_eq!(engine.hovered_since(CARD), Some(40));

        engine.hover_start(CARD, 900, &mut out);
        assert_eq!(engine.hovered_since(CARD), Some(900));

        engine.hover_end(CARD, 1_000, &mut out);
        assert_eq!(engine.hovered_since(CARD), None);
    }

    #[test]
    fn test_spawn_starts_hidden_then_reveals() {
        let mut engine = engine(1);
        let mut out = CommandBuffer::new();
        engine.hover_start(CARD, 0, &mut out);

        let (handle, particle) = engine.particles(CARD).next().unwrap();
        assert_eq!(particle.phase, ParticlePhase::Spawning);
        assert!(particle.opacity.value().abs() < f32::EPSILON);

        out.clear();
        engine.frame(FRAME_MS, &mut out);
        assert!(matches!(
            &out.as_slice()[0],
            StyleCommand::UpdateParticle { particle, visual, .. }
                if *particle == handle && visual.transform == Transform::IDENTITY
                    && (visual.opacity - 1.0).abs() < f32::EPSILON
        ));
        assert_eq!(
            engine.particles(CARD).next().map(|(_, p)| p.phase),
            Some(ParticlePhase::Cycling)
        );
    }

    #[test]
    fn test_hover_end_cancels_everything() {
        let mut engine = engine(5);
        let mut out = CommandBuffer::new();

        engine.hover_start(CARD, 0, &mut out);
        run(&mut engine, 0, 120, &mut out);
        assert_eq!(engine.live_count(CARD), 3);

        assert!(engine.hover_end(CARD, 120, &mut out));
        assert!(!engine.is_hovered(CARD));
        assert_eq!(engine.visible_count(CARD), 0);
        assert_eq!(engine.live_count(CARD), 3);

        out.clear();
        engine.advance(420, &mut out);
        assert_eq!(
            count(&out, |c| matches!(c, StyleCommand::RemoveParticle { .. })),
            3
        );
        assert_eq!(engine.live_count(CARD), 0);
        assert_eq!(engine.pending_tasks(), 0);

        // Nothing stirs afterwards, not even the two spawns that never happened.
        out.clear();
        run(&mut engine, 420, 5_000, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_new_session_retires_previous_particles() {
        let mut engine = engine(3);
        let mut out = CommandBuffer::new();

        engine.hover_start(CARD, 0, &mut out);
        run(&mut engine, 0, 200, &mut out);
        let first: Vec<SlotHandle> = engine.particles(CARD).map(|(h, _)| h).collect();
        assert_eq!(first.len(), 3);

        engine.hover_start(CARD, 200, &mut out);
        run(&mut engine, 200, 500, &mut out);

        let live: Vec<SlotHandle> = engine.particles(CARD).map(|(h, _)| h).collect();
        assert_eq!(live.len(), 3);
        assert!(live.iter().all(|h| !first.contains(h)));
        assert_eq!(engine.visible_count(CARD), 3);
    }

    #[test]
    fn test_templates_are_cached_for_card_lifetime() {
        let mut engine = engine(4);
        let mut out = CommandBuffer::new();

        engine.hover_start(CARD, 0, &mut out);
        let templates = engine.templates(CARD).to_vec();
        assert_eq!(templates.len(), 4);
        assert!(templates
            .iter()
            .all(|p| (0.0..300.0).contains(&p.x) && (0.0..200.0).contains(&p.y)));

        engine.hover_end(CARD, 100, &mut out);
        engine.resize(CARD, Size::new(10.0, 10.0));
        engine.hover_start(CARD, 1_000, &mut out);
        assert_eq!(engine.templates(CARD), templates.as_slice());
    }

    #[test]
    fn test_cycles_recycle_in_place() {
        let mut engine = engine(3);
        let mut out = CommandBuffer::new();

        engine.hover_start(CARD, 0, &mut out);
        run(&mut engine, 0, 4_000, &mut out);

        assert_eq!(
            count(&out, |c| matches!(c, StyleCommand::SpawnParticle { .. })),
            3
        );
        assert!(
            count(&out, |c| matches!(
                c,
                StyleCommand::UpdateParticle { visual, .. } if visual.position.is_some()
            )) >= 3
        );
        assert_eq!(
            count(&out, |c| matches!(c, StyleCommand::RemoveParticle { .. })),
            0
        );
        assert_eq!(engine.live_count(CARD), 3);

        // Orbit steps stay inside the jittered ring.
        assert!(out.iter().all(|c| match c {
            StyleCommand::UpdateParticle { visual, .. } => {
                visual.transform.translate.distance(Point::ZERO) <= 75.0 + 36.0
            }
            _ => true,
        }));
    }

    #[test]
    fn test_unmount_removes_immediately() {
        let mut engine = engine(3);
        let mut out = CommandBuffer::new();

        engine.hover_start(CARD, 0, &mut out);
        run(&mut engine, 0, 60, &mut out);
        engine.hover_end(CARD, 60, &mut out);

        out.clear();
        assert!(engine.unmount(CARD, 100, &mut out));
        assert_eq!(
            count(&out, |c| matches!(c, StyleCommand::RemoveParticle { .. })),
            2
        );
        assert_eq!(engine.pending_tasks(), 0);
        assert!(!engine.unmount(CARD, 100, &mut out));

        out.clear();
        run(&mut engine, 100, 2_000, &mut out);
        assert!(out.is_empty());
        assert!(!engine.hover_start(CARD, 2_000, &mut out));
    }

    #[test]
    fn test_disabled_engine_ignores_hover() {
        let mut engine = engine(3);
        let mut out = CommandBuffer::new();

        engine.hover_start(CARD, 0, &mut out);
        engine.set_enabled(false, 10, &mut out);
        assert!(!engine.is_hovered(CARD));
        assert!(!engine.hover_start(CARD, 20, &mut out));

        engine.advance(400, &mut out);
        assert_eq!(engine.live_count(CARD), 0);

        let mut instances = Vec::new();
        engine.instances(&mut instances);
        assert!(instances.is_empty());
    }

    #[test]
    fn test_instances_follow_tweens() {
        let mut engine = engine(2);
        let mut out = CommandBuffer::new();
        engine.hover_start(CARD, 0, &mut out);
        run(&mut engine, 0, 400, &mut out);

        let mut instances = Vec::new();
        engine.instances(&mut instances);
        assert_eq!(instances.len(), 2);
        assert!(instances.iter().all(|i| i.opacity > 0.9));
        assert!(instances.iter().all(|i| (i.size - 5.0).abs() < f32::EPSILON));
    }
}
