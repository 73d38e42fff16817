//! About page: the certification carousel.

use bento_core::{BentoResult, Millis};
use bento_ui::config::CarouselConfig;
use bento_ui::{Carousel, CarouselEvent, SlidePhase};

/// A certification shown on the about page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certification {
    /// Certificate name.
    pub title: String,
    /// Issuing body.
    pub issuer: String,
    /// Year awarded, if shown.
    pub year: Option<u16>,
}

impl Certification {
    /// Creates a certification entry.
    #[must_use]
    pub fn new(title: impl Into<String>, issuer: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            title: title.into(),
            issuer: issuer.into(),
            year,
        }
    }
}

/// The certifications listed on the about page, in display order.
#[must_use]
pub fn certifications() -> Vec<Certification> {
    vec![
        Certification::new("Google IT Support", "Google", Some(2023)),
        Certification::new("Foundations of Cybersecurity", "Google", Some(2023)),
        Certification::new("Introduction to Networking", "Cisco", Some(2024)),
        Certification::new("Linux Essentials", "Linux Professional Institute", None),
    ]
}

/// About page controller.
#[derive(Debug)]
pub struct AboutPage {
    carousel: Carousel<Certification>,
}

impl AboutPage {
    /// Mounts the page with the standard certification list.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in list; see [`AboutPage::with_certifications`].
    pub fn mount(config: CarouselConfig, now: Millis) -> BentoResult<Self> {
        Self::with_certifications(certifications(), config, now)
    }

    /// Mounts the page over an arbitrary list.
    ///
    /// # Errors
    ///
    /// Returns [`bento_core::BentoError::EmptyCarousel`] if `items` is empty.
    pub fn with_certifications(
        items: Vec<Certification>,
        config: CarouselConfig,
        now: Millis,
    ) -> BentoResult<Self> {
        let carousel = Carousel::new(items, config, now)?;
        tracing::info!(certifications = carousel.items().len(), "about page mounted");
        Ok(Self { carousel })
    }

    /// Returns the certification on screen.
    #[must_use]
    pub fn current(&self) -> &Certification {
        self.carousel.current()
    }

    /// Returns the carousel.
    #[must_use]
    pub fn carousel(&self) -> &Carousel<Certification> {
        &self.carousel
    }

    /// Returns the slide phase.
    #[must_use]
    pub fn phase(&self) -> SlidePhase {
        self.carousel.phase()
    }

    /// Next arrow.
    pub fn next(&mut self, now: Millis) {
        self.carousel.next(now);
    }

    /// Previous arrow.
    pub fn prev(&mut self, now: Millis) {
        self.carousel.prev(now);
    }

    /// Dot indicator.
    ///
    /// # Errors
    ///
    /// Returns [`bento_core::BentoError::IndexOutOfRange`] for a missing dot.
    pub fn select(&mut self, index: usize, now: Millis) -> BentoResult<bool> {
        self.carousel.select(index, now)
    }

    /// Fires carousel timers due at or before `now`.
    pub fn advance(&mut self, now: Millis) {
        self.carousel.advance(now);
    }

    /// Takes the carousel events produced so far.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, CarouselEvent> {
        self.carousel.drain_events()
    }

    /// Leaves the page.
    pub fn unmount(&mut self) {
        self.carousel.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_through_certifications() {
        let config = CarouselConfig::default();
        let mut page = AboutPage::mount(config.clone(), 0).unwrap();
        assert_eq!(page.current().issuer, "Google");

        // One full auto cycle: tick, slide out, swap.
        page.advance(config.interval_ms + config.slide_ms);
        assert_eq!(page.current(), &certifications()[1]);
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(AboutPage::with_certifications(Vec::new(), CarouselConfig::default(), 0).is_err());
    }
}
