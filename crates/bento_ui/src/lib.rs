//! # BENTO UI Effects
//!
//! Headless interaction effects for a bento-grid portfolio:
//! - Pointer-proximity spotlight glow across every card
//! - Orbiting hover particles with staggered spawns
//! - A timed certification carousel with manual override
//! - Sentence typing for the loading splash
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      EFFECT PIPELINE                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  Host Events → Effect State Machines → Command Buffer     │
//! │       ↓               ↓                      ↓            │
//! │  PointerFeed     Scheduler tasks        Host applies      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - The host drives time. Every stateful effect takes `now` and owns a
//!   [`bento_core::Scheduler`]; nothing reads a wall clock.
//! - Effects never touch elements. They emit [`StyleCommand`]s or events.
//! - Every deferred step re-checks that its target is still alive.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod carousel;
pub mod config;
pub mod glow;
pub mod input;
pub mod layout;
pub mod particle;
pub mod render;
pub mod style;
pub mod typing;
pub mod widget;

pub use animation::{Animation, Easing, Transition};
pub use carousel::{Carousel, CarouselEvent, SlideDirection, SlidePhase};
pub use config::{ConfigError, EffectsConfig};
pub use glow::{compute_glow, GlowEngine, GlowSample};
pub use input::{PointerFeed, PointerUpdate};
pub use layout::{BentoGrid, Point, Rect, Size};
pub use particle::{ParticleEngine, ParticlePhase};
pub use render::{CommandBuffer, ParticleInstance, StyleCommand};
pub use style::{Color, StyleProperty, StyleValue};
pub use typing::{TypingAnimation, TypingEvent, TypingPhase};
pub use widget::{Card, CardAction, CardId, CardIntent, CardRegistry};
