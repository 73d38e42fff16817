//! Bento cards and their click behavior.

use crate::layout::GridSpan;

/// Unique identifier for a mounted card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

impl CardId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// What clicking a card does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Not clickable (the hero card).
    None,
    /// Navigate to a site path.
    Navigate {
        /// Target path, e.g. `/projects`.
        link: String,
    },
    /// Open the contact overlay.
    OpenContact,
    /// Download a file.
    Download {
        /// Asset path.
        path: String,
        /// File name offered to the browser.
        file_name: String,
    },
}

/// The side effect a click asks the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardIntent {
    /// Navigate to a site path.
    Navigate(String),
    /// Show the contact overlay.
    OpenContact,
    /// Trigger a download.
    Download {
        /// Asset path.
        path: String,
        /// File name offered to the browser.
        file_name: String,
    },
}

/// A card in the bento grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Stable identifier, also the card's CSS modifier (`card--<slug>`).
    pub slug: String,
    /// Heading.
    pub title: String,
    /// Optional line under the heading.
    pub subtitle: Option<String>,
    /// Body text.
    pub description: String,
    /// Click behavior.
    pub action: CardAction,
    /// Grid tracks covered.
    pub span: GridSpan,
}

impl Card {
    /// Creates a single-cell card.
    #[must_use]
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        action: CardAction,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            subtitle: None,
            description: description.into(),
            action,
            span: GridSpan::CELL,
        }
    }

    /// Sets the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the grid span.
    #[must_use]
    pub const fn with_span(mut self, span: GridSpan) -> Self {
        self.span = span;
        self
    }

    /// Returns true if clicking the card does anything.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.action != CardAction::None
    }

    /// Resolves a click into the intent the host should carry out.
    #[must_use]
    pub fn intent(&self) -> Option<CardIntent> {
        match &self.action {
            CardAction::None => None,
            CardAction::Navigate { link } => Some(CardIntent::Navigate(link.clone())),
            CardAction::OpenContact => Some(CardIntent::OpenContact),
            CardAction::Download { path, file_name } => Some(CardIntent::Download {
                path: path.clone(),
                file_name: file_name.clone(),
            }),
        }
    }
}

/// The home page card set, in display order.
#[must_use]
pub fn portfolio_cards() -> Vec<Card> {
    vec![
        Card::new(
            "hero",
            "Portfolio",
            "Exploring every corner of technology: experimenting, building skills, staying curious.",
            CardAction::None,
        )
        .with_subtitle("Aspiring Technologist")
        .with_span(GridSpan::FULL_ROW),
        Card::new(
            "projects",
            "View Projects",
            "Explore my latest work",
            CardAction::Navigate {
                link: "/projects".into(),
            },
        ),
        Card::new(
            "about",
            "About Me",
            "My journey",
            CardAction::Navigate {
                link: "/about-me".into(),
            },
        )
        .with_span(GridSpan::new(2, 2)),
        Card::new("contact", "Contact Info", "Get in touch", CardAction::OpenContact),
        Card::new(
            "resume",
            "Download Resume",
            "View my complete CV",
            CardAction::Download {
                path: "/resume.pdf".into(),
                file_name: "resume.pdf".into(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_follow_card_metadata() {
        let cards = portfolio_cards();
        let intents: Vec<_> = cards.iter().map(Card::intent).collect();

        assert_eq!(intents[0], None);
        assert_eq!(intents[1], Some(CardIntent::Navigate("/projects".into())));
        assert_eq!(intents[2], Some(CardIntent::Navigate("/about-me".into())));
        assert_eq!(intents[3], Some(CardIntent::OpenContact));
        assert!(matches!(
            &intents[4],
            Some(CardIntent::Download { file_name, .. }) if file_name == "resume.pdf"
        ));
    }

    #[test]
    fn test_hero_is_not_interactive() {
        let cards = portfolio_cards();
        assert!(!cards[0].is_interactive());
        assert!(cards[1..].iter().all(Card::is_interactive));
    }
}
