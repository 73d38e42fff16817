//! # Home Grid
//!
//! The bento grid on the home page. Pointer moves anywhere on the page feed
//! the spotlight glow; entering and leaving a card drives its particles;
//! clicks resolve to the card's intent.
//!
//! Particles are switched off on mobile viewports when the configuration
//! asks for it. Glow keeps working everywhere.

use bento_core::{BentoError, BentoResult, Millis};
use bento_ui::config::EffectsConfig;
use bento_ui::layout::{Point, Rect};
use bento_ui::render::{CommandBuffer, StyleCommand};
use bento_ui::widget::{portfolio_cards, Card, CardId, CardIntent, CardRegistry};
use bento_ui::{GlowEngine, ParticleEngine, PointerFeed};

use crate::viewport::Viewport;

/// Home page controller.
#[derive(Debug)]
pub struct HomeGrid {
    viewport: Viewport,
    origin: Point,
    registry: CardRegistry,
    grid_bounds: Rect,
    feed: PointerFeed,
    glow: GlowEngine,
    particles: ParticleEngine,
    disable_on_mobile: bool,
    contact_open: bool,
    commands: CommandBuffer,
}

impl HomeGrid {
    /// Mounts the portfolio card set.
    #[must_use]
    pub fn mount(config: &EffectsConfig, viewport: Viewport, origin: Point, now: Millis) -> Self {
        Self::with_cards(portfolio_cards(), config, viewport, origin, now)
    }

    /// Mounts an arbitrary card set, laid out in order.
    #[must_use]
    pub fn with_cards(
        cards: Vec<Card>,
        config: &EffectsConfig,
        viewport: Viewport,
        origin: Point,
        now: Millis,
    ) -> Self {
        let feed = PointerFeed::new();
        let mut home = Self {
            glow: GlowEngine::new(config.glow.radius, &feed),
            particles: ParticleEngine::new(config.particles.clone()),
            disable_on_mobile: config.particles.disable_on_mobile,
            registry: CardRegistry::new(),
            grid_bounds: Rect::ZERO,
            contact_open: false,
            commands: CommandBuffer::new(),
            feed,
            viewport,
            origin,
        };

        let spans: Vec<_> = cards.iter().map(|card| card.span).collect();
        let arrangement = viewport.grid().arrange(origin, viewport.width(), &spans);
        for (card, bounds) in cards.into_iter().zip(arrangement.cells) {
            let id = home.registry.mount(card, bounds);
            home.particles.mount(id, bounds.size());
        }
        home.grid_bounds = arrangement.bounds;
        home.sync_particle_switch(now);

        tracing::info!(
            cards = home.registry.len(),
            mobile = viewport.is_mobile(),
            particles = home.particles.is_enabled(),
            "home grid mounted"
        );
        home
    }

    /// Returns the mounted cards.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Returns the ID of the card with this slug.
    #[must_use]
    pub fn card_id(&self, slug: &str) -> Option<CardId> {
        self.registry.find(slug)
    }

    /// Returns the grid element's bounding rectangle.
    #[must_use]
    pub fn grid_bounds(&self) -> Rect {
        self.grid_bounds
    }

    /// Returns the viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the glow engine.
    #[must_use]
    pub fn glow(&self) -> &GlowEngine {
        &self.glow
    }

    /// Returns the particle engine.
    #[must_use]
    pub fn particles(&self) -> &ParticleEngine {
        &self.particles
    }

    /// Returns true while the contact overlay is shown.
    #[must_use]
    pub fn is_contact_open(&self) -> bool {
        self.contact_open
    }

    /// Publishes a pointer position and updates every card's glow.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.feed.publish(x, y);
        self.glow
            .update(&self.feed, self.grid_bounds, &self.registry, &mut self.commands)
    }

    /// The pointer left the window: glow goes dark.
    pub fn pointer_exit(&mut self) -> bool {
        self.feed.publish_exit();
        self.glow
            .update(&self.feed, self.grid_bounds, &self.registry, &mut self.commands)
    }

    /// The pointer entered a card.
    pub fn card_enter(&mut self, card: CardId, now: Millis) -> bool {
        self.particles.hover_start(card, now, &mut self.commands)
    }

    /// The pointer left a card.
    pub fn card_leave(&mut self, card: CardId, now: Millis) -> bool {
        self.particles.hover_end(card, now, &mut self.commands)
    }

    /// Clicks the card with this slug.
    ///
    /// Returns the intent for the host to carry out, `None` for the hero.
    ///
    /// # Errors
    ///
    /// Returns [`BentoError::UnknownCard`] if no mounted card has the slug.
    pub fn click(&mut self, slug: &str) -> BentoResult<Option<CardIntent>> {
        let id = self
            .registry
            .find(slug)
            .ok_or_else(|| BentoError::UnknownCard(slug.to_string()))?;
        Ok(self.click_card(id))
    }

    /// Clicks whatever card is under `point`.
    pub fn click_at(&mut self, point: Point) -> Option<CardIntent> {
        let id = self.registry.hit_test(point)?;
        self.click_card(id)
    }

    /// Hides the contact overlay. Returns false if it was not shown.
    pub fn close_contact(&mut self) -> bool {
        std::mem::replace(&mut self.contact_open, false)
    }

    /// Applies a window resize: cards are laid out again and particles are
    /// switched on or off when the viewport changes class.
    pub fn resize(&mut self, width: f32, height: f32, now: Millis) {
        let flipped = self.viewport.resize(width, height);

        let spans: Vec<_> = self.registry.iter().map(|mounted| mounted.card.span).collect();
        let arrangement = self
            .viewport
            .grid()
            .arrange(self.origin, self.viewport.width(), &spans);
        for (id, bounds) in self.registry.ids().into_iter().zip(arrangement.cells) {
            self.registry.set_bounds(id, bounds);
            self.particles.resize(id, bounds.size());
        }
        self.grid_bounds = arrangement.bounds;

        if flipped {
            self.sync_particle_switch(now);
        }
    }

    /// Fires particle timers due at or before `now`.
    pub fn advance(&mut self, now: Millis) {
        self.particles.advance(now, &mut self.commands);
    }

    /// Runs one animation frame.
    pub fn frame(&mut self, now: Millis) {
        self.particles.frame(now, &mut self.commands);
    }

    /// Takes the commands produced so far.
    pub fn drain_commands(&mut self) -> std::vec::Drain<'_, StyleCommand> {
        self.commands.drain()
    }

    /// Tears the page down. Every particle is removed and nothing fires
    /// afterwards.
    pub fn unmount(&mut self, now: Millis) {
        for id in self.registry.ids() {
            self.particles.unmount(id, now, &mut self.commands);
            self.registry.unmount(id);
        }
        self.contact_open = false;
        tracing::info!("home grid unmounted");
    }

    fn click_card(&mut self, id: CardId) -> Option<CardIntent> {
        let mounted = self.registry.get(id)?;
        let intent = mounted.card.intent();
        match &intent {
            Some(other) => {
                tracing::info!(card = %mounted.card.slug, intent = ?other, "card clicked");
            }
            None => tracing::trace!(card = %mounted.card.slug, "click on passive card ignored"),
        }
        if intent == Some(CardIntent::OpenContact) {
            self.contact_open = true;
        }
        intent
    }

    fn sync_particle_switch(&mut self, now: Millis) {
        let enabled = !(self.disable_on_mobile && self.viewport.is_mobile());
        self.particles.set_enabled(enabled, now, &mut self.commands);
    }
}
