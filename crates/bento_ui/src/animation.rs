//! Easing curves, CSS transitions and tweened values.
//!
//! The host animates transitions natively (CSS). The tweened [`Animation`]
//! mirrors the same curve on our side so instanced renderers, and tests,
//! see the value the host is showing.

use std::fmt;

/// Easing function type, named after the CSS timing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// CSS `ease`: cubic-bezier(0.25, 0.1, 0.25, 1).
    #[default]
    Ease,
    /// CSS `ease-in`: cubic-bezier(0.42, 0, 1, 1).
    EaseIn,
    /// CSS `ease-out`: cubic-bezier(0, 0, 0.58, 1).
    EaseOut,
    /// CSS `ease-in-out`: cubic-bezier(0.42, 0, 0.58, 1).
    EaseInOut,
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::Instant => 1.0,
        }
    }

    /// CSS timing-function keyword.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Linear | Self::Instant => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

/// Evaluates a CSS cubic-bezier timing curve at `t`.
///
/// Solves x(s) = t for the curve parameter with Newton steps, falling back to
/// bisection where the slope flattens out.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let sample = |a1: f32, a2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    };
    let slope = |a1: f32, a2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    };

    let mut s = t;
    for _ in 0..8 {
        let error = sample(x1, x2, s) - t;
        if error.abs() < 1e-5 {
            return sample(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= error / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = sample(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    sample(y1, y2, s)
}

/// A CSS `transition` shorthand covering all properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Duration in milliseconds. Zero means `none`.
    pub duration_ms: u64,
    /// Timing function.
    pub easing: Easing,
}

impl Transition {
    /// No transition: changes apply instantly.
    pub const NONE: Self = Self {
        duration_ms: 0,
        easing: Easing::Instant,
    };

    /// Creates a transition.
    #[must_use]
    pub const fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Returns true if changes apply instantly.
    #[must_use]
    pub const fn is_instant(self) -> bool {
        self.duration_ms == 0 || matches!(self.easing, Easing::Instant)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_instant() {
            return f.write_str("none");
        }
        #[allow(clippy::cast_precision_loss)]
        let seconds = self.duration_ms as f64 / 1000.0;
        write!(f, "all {seconds}s {}", self.easing.css_name())
    }
}

/// A single tweened value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Animation progress (0-1).
    progress: f32,
    /// Animation duration (milliseconds).
    duration_ms: f32,
    /// Easing function.
    easing: Easing,
    /// Start value (for interpolation).
    start: f32,
}

impl Animation {
    /// Creates a settled animation at the given value.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            progress: 1.0,
            duration_ms: 0.0,
            easing: Easing::Linear,
            start: value,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns the value being animated towards.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Animates from the current value to `target` under `transition`.
    pub fn transition_to(&mut self, target: f32, transition: Transition) {
        if transition.is_instant() {
            self.set_immediate(target);
            return;
        }
        self.start = self.current;
        self.target = target;
        self.progress = 0.0;
        #[allow(clippy::cast_precision_loss)]
        {
            self.duration_ms = transition.duration_ms as f32;
        }
        self.easing = transition.easing;
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
    }

    /// Advances the animation by `dt_ms` milliseconds.
    pub fn update(&mut self, dt_ms: f32) {
        if self.progress >= 1.0 {
            return;
        }

        if self.duration_ms > 0.0 {
            self.progress += dt_ms / self.duration_ms;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        // Snap to target when complete
        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_front_loads_motion() {
        // CSS `ease` is past 80% of the way at the midpoint.
        let mid = Easing::Ease.apply(0.5);
        assert!(mid > 0.78 && mid < 0.82, "ease(0.5) = {mid}");
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn test_transition_css() {
        assert_eq!(Transition::new(300, Easing::Ease).to_string(), "all 0.3s ease");
        assert_eq!(Transition::new(1500, Easing::Linear).to_string(), "all 1.5s linear");
        assert_eq!(Transition::NONE.to_string(), "none");
    }

    #[test]
    fn test_animation_reaches_target() {
        let mut anim = Animation::new(0.0);
        anim.transition_to(1.0, Transition::new(300, Easing::Ease));
        assert!(!anim.is_complete());

        for _ in 0..20 {
            anim.update(16.0); // ~60fps
        }

        assert!((anim.value() - 1.0).abs() < f32::EPSILON);
        assert!(anim.is_complete());
    }

    #[test]
    fn test_instant_transition_snaps() {
        let mut anim = Animation::new(1.0);
        anim.transition_to(0.0, Transition::NONE);
        assert!(anim.is_complete());
        assert!(anim.value().abs() < f32::EPSILON);
    }
}
