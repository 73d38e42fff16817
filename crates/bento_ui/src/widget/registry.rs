//! Registry of mounted cards.

use super::{Card, CardId};
use crate::layout::{Point, Rect};

/// A card bound to an element on screen.
#[derive(Debug, Clone)]
pub struct MountedCard {
    /// Card identifier.
    pub id: CardId,
    /// Card content and behavior.
    pub card: Card,
    /// Bounding rectangle of the card element.
    pub bounds: Rect,
}

/// Mounted cards in display order.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    /// Mounted cards, kept in mount order.
    cards: Vec<MountedCard>,
    /// ID counter for generating unique IDs.
    next_id: u32,
}

impl CardRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// Mounts a card and returns its ID.
    pub fn mount(&mut self, card: Card, bounds: Rect) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        self.cards.push(MountedCard { id, card, bounds });
        id
    }

    /// Unmounts a card, returning it.
    pub fn unmount(&mut self, id: CardId) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(pos).card)
    }

    /// Gets a mounted card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&MountedCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Finds a card by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<CardId> {
        self.cards.iter().find(|c| c.card.slug == slug).map(|c| c.id)
    }

    /// Updates a card's bounds. Returns false if the card is not mounted.
    pub fn set_bounds(&mut self, id: CardId, bounds: Rect) -> bool {
        match self.cards.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Returns the topmost card under the point.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<CardId> {
        self.cards
            .iter()
            .rev()
            .find(|c| c.bounds.contains(point))
            .map(|c| c.id)
    }

    /// Iterates over mounted cards in display order.
    pub fn iter(&self) -> impl Iterator<Item = &MountedCard> {
        self.cards.iter()
    }

    /// Returns the IDs of mounted cards in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// Returns the number of mounted cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if no card is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::CardAction;

    fn card(slug: &str) -> Card {
        Card::new(slug, slug, "", CardAction::OpenContact)
    }

    #[test]
    fn test_mount_and_unmount() {
        let mut registry = CardRegistry::new();
        let a = registry.mount(card("a"), Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = registry.mount(card("b"), Rect::new(20.0, 0.0, 10.0, 10.0));

        assert_ne!(a, b);
        assert_eq!(registry.find("b"), Some(b));
        assert_eq!(registry.hit_test(Point::new(25.0, 5.0)), Some(b));
        assert_eq!(registry.hit_test(Point::new(15.0, 5.0)), None);

        assert_eq!(registry.unmount(a).map(|c| c.slug), Some("a".to_string()));
        assert!(registry.get(a).is_none());
        assert_eq!(registry.ids(), vec![b]);
        assert!(!registry.set_bounds(a, Rect::ZERO));
    }
}
