//! # Proximity Glow
//!
//! A spotlight that follows the pointer across the bento grid. Each card
//! lights up according to how close the pointer is to it:
//!
//! ```text
//! effective distance = max(0, |pointer - center| - max(width, height) / 2)
//!
//! intensity = 1                                 d <= radius * 0.5
//!           = (fade - d) / (fade - proximity)   proximity < d < fade
//!           = 0                                 d >= radius * 0.75
//! ```
//!
//! The engine recomputes only when the [`PointerFeed`] has a new version.

use crate::input::{PointerFeed, PointerSubscription, PointerUpdate};
use crate::layout::{Point, Rect};
use crate::render::{CommandBuffer, StyleCommand};
use crate::style::{StyleProperty, StyleValue};
use crate::widget::{CardId, CardRegistry};

/// Full intensity inside `radius * PROXIMITY_RATIO`.
pub const PROXIMITY_RATIO: f32 = 0.5;
/// Zero intensity beyond `radius * FADE_RATIO`.
pub const FADE_RATIO: f32 = 0.75;
/// Default spotlight radius in pixels.
pub const DEFAULT_RADIUS: f32 = 300.0;

/// Glow of one card for one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowSample {
    /// Strength in `0..=1`.
    pub intensity: f32,
    /// Pointer position in card-local percent.
    pub relative: Point,
}

impl GlowSample {
    /// An unlit card.
    pub const OFF: Self = Self {
        intensity: 0.0,
        relative: Point::new(50.0, 50.0),
    };
}

/// Distance from `pointer` to the card's edge, approximated by the circle
/// around its center spanning the larger dimension. Never negative.
#[must_use]
pub fn effective_distance(pointer: Point, card: Rect) -> f32 {
    (pointer.distance(card.center()) - card.max_dimension() * 0.5).max(0.0)
}

/// Maps an effective distance to an intensity for the given radius.
#[must_use]
pub fn intensity_at(distance: f32, radius: f32) -> f32 {
    let proximity = radius * PROXIMITY_RATIO;
    let fade = radius * FADE_RATIO;

    if distance <= proximity {
        1.0
    } else if distance >= fade {
        0.0
    } else {
        (fade - distance) / (fade - proximity)
    }
}

/// Computes a card's glow for a pointer position.
#[must_use]
pub fn compute_glow(pointer: Point, card: Rect, radius: f32) -> GlowSample {
    GlowSample {
        intensity: intensity_at(effective_distance(pointer, card), radius),
        relative: card.relative_percent(pointer),
    }
}

/// Drives the glow properties of every mounted card.
#[derive(Debug)]
pub struct GlowEngine {
    radius: f32,
    subscription: PointerSubscription,
    /// Last computed sample per card, reused between events.
    samples: Vec<(CardId, GlowSample)>,
}

impl GlowEngine {
    /// Creates an engine subscribed to `feed`.
    #[must_use]
    pub fn new(radius: f32, feed: &PointerFeed) -> Self {
        Self {
            radius,
            subscription: feed.subscribe(),
            samples: Vec::with_capacity(16),
        }
    }

    /// Returns the spotlight radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Recomputes glow if the pointer moved since the last call.
    ///
    /// Returns true if commands were written.
    pub fn update(
        &mut self,
        feed: &PointerFeed,
        grid: Rect,
        cards: &CardRegistry,
        out: &mut CommandBuffer,
    ) -> bool {
        match self.subscription.poll(feed) {
            Some(PointerUpdate::Moved(pointer)) => {
                self.apply(Some(pointer), grid, cards, out);
                true
            }
            Some(PointerUpdate::Exited) => {
                self.apply(None, grid, cards, out);
                true
            }
            None => false,
        }
    }

    /// Recomputes glow for an explicit pointer position.
    ///
    /// Outside `grid` (edges count as inside) or with no pointer, only a zero
    /// intensity is written to every card.
    pub fn apply(
        &mut self,
        pointer: Option<Point>,
        grid: Rect,
        cards: &CardRegistry,
        out: &mut CommandBuffer,
    ) {
        self.samples.clear();

        let Some(pointer) = pointer.filter(|p| grid.contains_inclusive(*p)) else {
            for mounted in cards.iter() {
                self.samples.push((mounted.id, GlowSample::OFF));
                out.push(StyleCommand::SetProperty {
                    card: mounted.id,
                    property: StyleProperty::GlowIntensity,
                    value: StyleValue::Number(0.0),
                });
            }
            return;
        };

        for mounted in cards.iter() {
            let sample = compute_glow(pointer, mounted.bounds, self.radius);
            self.samples.push((mounted.id, sample));

            let card = mounted.id;
            out.push(StyleCommand::SetProperty {
                card,
                property: StyleProperty::GlowX,
                value: StyleValue::Percent(sample.relative.x),
            });
            out.push(StyleCommand::SetProperty {
                card,
                property: StyleProperty::GlowY,
                value: StyleValue::Percent(sample.relative.y),
            });
            out.push(StyleCommand::SetProperty {
                card,
                property: StyleProperty::GlowIntensity,
                value: StyleValue::Number(sample.intensity),
            });
            out.push(StyleCommand::SetProperty {
                card,
                property: StyleProperty::GlowRadius,
                value: StyleValue::Px(self.radius),
            });
        }
    }

    /// Returns the last sample computed for a card.
    #[must_use]
    pub fn sample(&self, card: CardId) -> Option<GlowSample> {
        self.samples
            .iter()
            .find(|(id, _)| *id == card)
            .map(|(_, sample)| *sample)
    }
}
