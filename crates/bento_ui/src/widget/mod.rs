//! Card widgets for the bento grid.

mod card;
mod registry;

pub use card::{portfolio_cards, Card, CardAction, CardId, CardIntent};
pub use registry::{CardRegistry, MountedCard};
