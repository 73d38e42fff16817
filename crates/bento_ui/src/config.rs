//! Effect configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file at all) yields the stock portfolio behavior:
//!
//! ```toml
//! [glow]
//! radius = 300.0
//!
//! [particles]
//! count = 25
//! color = [132, 0, 255]
//!
//! [carousel]
//! interval_ms = 4000
//! ```

use std::path::Path;

use bento_core::{BentoError, Millis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glow::DEFAULT_RADIUS;
use crate::style::Color;

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has unknown keys.
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl From<ConfigError> for BentoError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Spotlight glow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlowConfig {
    /// Spotlight radius in pixels.
    pub radius: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Hover particle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    /// Particles per card.
    pub count: usize,
    /// Delay between consecutive spawns.
    pub stagger_ms: Millis,
    /// Orbit radius in pixels.
    pub orbit_radius: f32,
    /// Total jitter span in pixels, applied as +/- half.
    pub jitter: f32,
    /// Shortest orbit cycle.
    pub cycle_min_ms: Millis,
    /// Longest orbit cycle (exclusive).
    pub cycle_max_ms: Millis,
    /// Fade in/out transition length.
    pub fade_ms: Millis,
    /// Hidden hold after repositioning, before the next cycle.
    pub settle_ms: Millis,
    /// Particle diameter in pixels.
    pub size: f32,
    /// Smallest scale while orbiting.
    pub scale_min: f32,
    /// Largest scale while orbiting.
    pub scale_max: f32,
    /// Particle color as `[r, g, b]`.
    pub color: Color,
    /// Seed for positions, durations, jitter and scale.
    pub seed: u64,
    /// Skip particles on mobile viewports.
    pub disable_on_mobile: bool,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 25,
            stagger_ms: 50,
            orbit_radius: 75.0,
            jitter: 50.0,
            cycle_min_ms: 1_500,
            cycle_max_ms: 3_000,
            fade_ms: 300,
            settle_ms: 10,
            size: 5.0,
            scale_min: 0.8,
            scale_max: 1.2,
            color: Color::VIOLET,
            seed: 0x00B3_4470,
            disable_on_mobile: true,
        }
    }
}

/// Certification carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Auto-advance period.
    pub interval_ms: Millis,
    /// Length of each slide half (out, then in).
    pub slide_ms: Millis,
    /// Pause after a manual action before auto-advance resumes.
    pub resume_delay_ms: Millis,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 4_000,
            slide_ms: 500,
            resume_delay_ms: 3_000,
        }
    }
}

/// Typing animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypingConfig {
    /// Delay per typed character.
    pub typing_speed_ms: Millis,
    /// Delay per deleted character.
    pub deleting_speed_ms: Millis,
    /// Hold once a sentence is fully typed.
    pub pause_ms: Millis,
    /// Delay before the first character.
    pub initial_delay_ms: Millis,
    /// Render a blinking cursor.
    pub show_cursor: bool,
    /// Cursor glyph.
    pub cursor_character: String,
    /// Cursor blink period.
    pub cursor_blink_ms: Millis,
    /// Start over after the last sentence instead of completing.
    pub looped: bool,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: 50,
            deleting_speed_ms: 30,
            pause_ms: 1_500,
            initial_delay_ms: 0,
            show_cursor: true,
            cursor_character: "|".into(),
            cursor_blink_ms: 500,
            looped: false,
        }
    }
}

/// Loading splash settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplashConfig {
    /// Redirect even if typing never completes.
    pub fallback_ms: Millis,
    /// Redirect delay after typing completes.
    pub redirect_delay_ms: Millis,
    /// Path to navigate to.
    pub target: String,
    /// Sentences typed on the splash.
    pub sentences: Vec<String>,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            fallback_ms: 10_000,
            redirect_delay_ms: 2_000,
            target: "/home".into(),
            sentences: vec![
                String::new(),
                "Initiating encrypted handshake".into(),
                "Portfolio incoming ..........".into(),
            ],
        }
    }
}

/// Viewport classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    /// Widths at or below this are mobile.
    pub mobile_breakpoint: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
        }
    }
}

/// Complete effect configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// `[glow]`
    pub glow: GlowConfig,
    /// `[particles]`
    pub particles: ParticleConfig,
    /// `[carousel]`
    pub carousel: CarouselConfig,
    /// `[typing]`
    pub typing: TypingConfig,
    /// `[splash]`
    pub splash: SplashConfig,
    /// `[viewport]`
    pub viewport: ViewportConfig,
}

impl EffectsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse/validate.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded effects config");
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        fn ensure(ok: bool, what: &str) -> ConfigResult<()> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(what.to_string()))
            }
        }

        let p = &self.particles;
        ensure(
            self.glow.radius.is_finite() && self.glow.radius > 0.0,
            "glow.radius must be positive",
        )?;
        ensure(p.cycle_min_ms > 0, "particles.cycle_min_ms must be positive")?;
        ensure(
            p.cycle_min_ms <= p.cycle_max_ms,
            "particles.cycle_min_ms must not exceed cycle_max_ms",
        )?;
        ensure(
            p.scale_min.is_finite() && p.scale_max.is_finite() && p.scale_min <= p.scale_max,
            "particles.scale_min must not exceed scale_max",
        )?;
        ensure(
            p.jitter.is_finite() && p.jitter >= 0.0,
            "particles.jitter must not be negative",
        )?;
        ensure(
            p.size.is_finite() && p.size > 0.0,
            "particles.size must be positive",
        )?;
        ensure(
            self.carousel.interval_ms > 0,
            "carousel.interval_ms must be positive",
        )?;
        ensure(self.carousel.slide_ms > 0, "carousel.slide_ms must be positive")?;
        ensure(
            self.typing.typing_speed_ms > 0 && self.typing.deleting_speed_ms > 0,
            "typing speeds must be positive",
        )?;
        ensure(
            self.typing.cursor_blink_ms > 0,
            "typing.cursor_blink_ms must be positive",
        )?;
        ensure(
            self.splash.target.starts_with('/'),
            "splash.target must be an absolute path",
        )?;
        ensure(
            self.viewport.mobile_breakpoint >= 0.0,
            "viewport.mobile_breakpoint must not be negative",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = EffectsConfig::from_toml_str("").unwrap();
        assert_eq!(config, EffectsConfig::default());
        assert_eq!(config.particles.count, 25);
        assert_eq!(config.carousel.interval_ms, 4_000);
        assert_eq!(config.splash.target, "/home");
    }

    #[test]
    fn test_defaults_survive_rendering() {
        let config = EffectsConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(EffectsConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_partial_override() {
        let config = EffectsConfig::from_toml_str(
            "[particles]\ncount = 3\ncolor = [255, 0, 0]\n\n[glow]\nradius = 120.0\n",
        )
        .unwrap();
        assert_eq!(config.particles.count, 3);
        assert_eq!(config.particles.color, Color::rgb8(255, 0, 0));
        assert_eq!(config.particles.stagger_ms, 50);
        assert!((config.glow.radius - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = EffectsConfig::from_toml_str("[carousel]\ninterval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            EffectsConfig::from_toml_str("[particles]\ncycle_min_ms = 10\ncycle_max_ms = 5\n")
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EffectsConfig::from_toml_str("[glow]\nradius = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("glow.radius"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = EffectsConfig::from_toml_str("[glow]\nspeed = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let bento: BentoError = err.into();
        assert!(matches!(bento, BentoError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EffectsConfig::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
