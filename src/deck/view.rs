//! Read-only projection of widget state for presentation layers.

use super::model::DrawnCard;
use super::widget::DeckWidget;

/// What a single card visual needs, keyed by the card code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub image_url: &'a str,
    pub rank: &'a str,
    pub suit_symbol: &'static str,
    pub red: bool,
}

impl<'a> From<&'a DrawnCard> for CardView<'a> {
    fn from(card: &'a DrawnCard) -> Self {
        Self {
            key: &card.id,
            label: &card.label,
            image_url: &card.image_url,
            rank: card.rank(),
            suit_symbol: card.suit_symbol(),
            red: card.is_red(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckView<'a> {
    pub deck_id: Option<&'a str>,
    pub deck_size: Option<u32>,
    pub loading: bool,
    pub button: Option<&'static str>,
    pub auto_draw: bool,
    pub exhausted: bool,
    pub cards: Vec<CardView<'a>>,
}

impl<'a> DeckView<'a> {
    pub fn project(widget: &'a DeckWidget) -> Self {
        Self {
            deck_id: widget.deck().map(|d| d.deck_id.as_str()),
            deck_size: widget.deck().map(|d| d.remaining),
            loading: widget.is_loading(),
            button: widget.button_label(),
            auto_draw: widget.auto_draw(),
            exhausted: widget.is_exhausted(),
            cards: widget.drawn().iter().map(CardView::from).collect(),
        }
    }
}
