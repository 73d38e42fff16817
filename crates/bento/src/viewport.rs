//! Viewport size and mobile detection.

use bento_ui::config::ViewportConfig;
use bento_ui::layout::BentoGrid;

/// The browser window the site is rendered in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    mobile_breakpoint: f32,
}

impl Viewport {
    /// Creates a viewport of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32, config: &ViewportConfig) -> Self {
        Self {
            width,
            height,
            mobile_breakpoint: config.mobile_breakpoint,
        }
    }

    /// Returns the width in CSS pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the height in CSS pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns true at or below the mobile breakpoint.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.width <= self.mobile_breakpoint
    }

    /// Applies a window resize. Returns true if the mobile flag flipped.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let was_mobile = self.is_mobile();
        self.width = width;
        self.height = height;
        let flipped = was_mobile != self.is_mobile();
        if flipped {
            tracing::debug!(width, mobile = !was_mobile, "viewport class changed");
        }
        flipped
    }

    /// Grid layout for this width.
    #[must_use]
    pub fn grid(&self) -> BentoGrid {
        BentoGrid::for_viewport_width(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        let config = ViewportConfig::default();
        assert!(Viewport::new(768.0, 900.0, &config).is_mobile());
        assert!(!Viewport::new(769.0, 900.0, &config).is_mobile());
    }

    #[test]
    fn test_resize_reports_class_changes() {
        let mut viewport = Viewport::new(1280.0, 800.0, &ViewportConfig::default());
        assert!(!viewport.resize(1024.0, 800.0));
        assert!(viewport.resize(400.0, 800.0));
        assert!(viewport.is_mobile());
        assert_eq!(viewport.grid().columns, 1);
        assert!(viewport.resize(1280.0, 800.0));
        assert_eq!(viewport.grid().columns, 4);
    }
}
