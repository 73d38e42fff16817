//! # BENTO
//!
//! Interactive effects core of a bento-grid portfolio site, wired into the
//! pages that use it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                               BENTO                                  │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌────────────────┐    ┌────────────────┐    ┌────────────────┐     │
//! │  │ LoadingSplash  │───>│   HomeGrid     │───>│   AboutPage    │     │
//! │  │ • typing       │    │ • glow         │    │ • carousel     │     │
//! │  │ • redirect     │    │ • particles    │    │                │     │
//! │  └───────┬────────┘    │ • card clicks  │    └───────┬────────┘     │
//! │          │             └───────┬────────┘            │              │
//! │          └─────────────────────┼─────────────────────┘              │
//! │                                v                                    │
//! │                  bento_ui effects + bento_core scheduler            │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `splash`: typing text, then a single redirect
//! - `home`: the card grid
//! - `about`: the certification carousel
//! - `viewport`: window size and mobile detection

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod about;
pub mod home;
pub mod splash;
pub mod viewport;

// Re-export the layers
pub use bento_core as core;
pub use bento_ui as ui;

// Re-export commonly used types
pub use about::{certifications, AboutPage, Certification};
pub use bento_core::{BentoError, BentoResult, Millis};
pub use bento_ui::EffectsConfig;
pub use home::HomeGrid;
pub use splash::{LoadingSplash, SplashEvent};
pub use viewport::Viewport;
