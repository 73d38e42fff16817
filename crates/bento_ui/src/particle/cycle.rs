//! Per-particle state and orbit math.

use bento_core::{Millis, ScopeId};
use rand::Rng;

use crate::animation::{Animation, Easing, Transition};
use crate::config::ParticleConfig;
use crate::layout::{Point, Size};
use crate::render::{ParticleInstance, ParticleVisual, Transform};
use crate::widget::CardId;

/// Where a particle is in its life.
///
/// ```text
/// Spawning ─> Cycling ─> Recycling ─> Settling ─┐
///               ▲                               │
///               └───────────────────────────────┘
/// (any live phase) ─> Fading ─> dropped from the pool
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticlePhase {
    /// Appended hidden, waiting for the frame that reveals it.
    Spawning,
    /// Orbiting.
    Cycling,
    /// Cycle finished; fading out before a reposition.
    Recycling,
    /// Moved to a new anchor, held hidden before the next cycle.
    Settling,
    /// Hover ended; fading out before removal.
    Fading,
}

impl ParticlePhase {
    /// Returns true while the particle is on screen and not on its way out.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(
            self,
            Self::Spawning | Self::Cycling | Self::Recycling | Self::Settling
        )
    }
}

/// One orbit around the particle's anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    /// Clock time the cycle started.
    pub started_at: Millis,
    /// Cycle length.
    pub duration_ms: Millis,
}

impl Cycle {
    /// Fraction of the cycle elapsed at `now`. Reaches 1.0 at the end.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: Millis) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        now.saturating_sub(self.started_at) as f32 / self.duration_ms as f32
    }
}

/// Orbit shape, taken from [`ParticleConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    radius: f32,
    jitter: f32,
    scale_min: f32,
    scale_max: f32,
    cycle_min_ms: Millis,
    cycle_max_ms: Millis,
}

impl Orbit {
    /// Extracts the orbit parameters.
    #[must_use]
    pub fn from_config(config: &ParticleConfig) -> Self {
        Self {
            radius: config.orbit_radius,
            jitter: config.jitter,
            scale_min: config.scale_min,
            scale_max: config.scale_max,
            cycle_min_ms: config.cycle_min_ms,
            cycle_max_ms: config.cycle_max_ms,
        }
    }

    /// Draws a cycle length in `[cycle_min_ms, cycle_max_ms)`.
    pub fn cycle_duration<R: Rng>(&self, rng: &mut R) -> Millis {
        if self.cycle_max_ms > self.cycle_min_ms {
            rng.gen_range(self.cycle_min_ms..self.cycle_max_ms)
        } else {
            self.cycle_min_ms
        }
    }

    /// Transform at progress `p`: a circle of the orbit radius plus jitter,
    /// one full turn per cycle.
    pub fn transform_at<R: Rng>(&self, p: f32, rng: &mut R) -> Transform {
        let angle = p * std::f32::consts::TAU;
        let jitter_x = (rng.gen::<f32>() - 0.5) * self.jitter;
        let jitter_y = (rng.gen::<f32>() - 0.5) * self.jitter;
        let scale = if self.scale_max > self.scale_min {
            rng.gen_range(self.scale_min..=self.scale_max)
        } else {
            self.scale_min
        };

        Transform {
            translate: Point::new(
                angle.sin() * self.radius + jitter_x,
                angle.cos() * self.radius + jitter_y,
            ),
            rotate_deg: p * 360.0,
            scale,
        }
    }
}

/// Picks a uniformly random point inside a card of the given size.
pub fn random_anchor<R: Rng>(size: Size, rng: &mut R) -> Point {
    Point::new(rng.gen::<f32>() * size.width, rng.gen::<f32>() * size.height)
}

/// Restarts a tween only when its target moves, like a CSS transition.
fn retarget(animation: &mut Animation, target: f32, transition: Transition) {
    if transition.is_instant() || (animation.target() - target).abs() > f32::EPSILON {
        animation.transition_to(target, transition);
    }
}

/// A live particle.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Owning card.
    pub card: CardId,
    /// Hover session that spawned it.
    pub session: ScopeId,
    /// Template it was cloned from.
    pub template: usize,
    /// `left`/`top` inside the card.
    pub anchor: Point,
    /// Lifecycle phase.
    pub phase: ParticlePhase,
    /// Current orbit, set while cycling.
    pub cycle: Option<Cycle>,
    /// Clock time of the spawn.
    pub spawned_at: Millis,
    /// Last transform written.
    pub transform: Transform,
    /// Rendered scale, tweened like the host's CSS transition.
    pub scale: Animation,
    /// Rendered opacity, tweened like the host's CSS transition.
    pub opacity: Animation,
}

impl Particle {
    /// Creates a hidden particle at `anchor`.
    #[must_use]
    pub fn spawn(
        card: CardId,
        session: ScopeId,
        template: usize,
        anchor: Point,
        now: Millis,
    ) -> Self {
        Self {
            card,
            session,
            template,
            anchor,
            phase: ParticlePhase::Spawning,
            cycle: None,
            spawned_at: now,
            transform: Transform::scaled(0.0),
            scale: Animation::new(0.0),
            opacity: Animation::new(0.0),
        }
    }

    /// Moves towards a new visual state and returns the style to write.
    pub fn restyle(
        &mut self,
        transform: Transform,
        opacity: f32,
        transition: Transition,
        position: Option<Point>,
    ) -> ParticleVisual {
        self.transform = transform;
        retarget(&mut self.scale, transform.scale, transition);
        retarget(&mut self.opacity, opacity, transition);
        if let Some(anchor) = position {
            self.anchor = anchor;
        }
        ParticleVisual {
            transform,
            opacity,
            transition,
            position,
        }
    }

    /// Fades to nothing in place.
    pub fn fade_out(&mut self, fade_ms: Millis) -> ParticleVisual {
        self.restyle(
            Transform::scaled(0.0),
            0.0,
            Transition::new(fade_ms, Easing::Ease),
            None,
        )
    }

    /// Advances the visual tweens.
    pub fn tick(&mut self, dt_ms: f32) {
        self.scale.update(dt_ms);
        self.opacity.update(dt_ms);
    }

    /// Snapshot for instanced rendering.
    #[must_use]
    pub fn instance(&self, size: f32, color: [f32; 4]) -> ParticleInstance {
        ParticleInstance {
            position: [self.anchor.x, self.anchor.y],
            offset: [self.transform.translate.x, self.transform.translate.y],
            rotation_deg: self.transform.rotate_deg,
            scale: self.scale.value(),
            opacity: self.opacity.value(),
            size,
            color,
        }
    }
}
