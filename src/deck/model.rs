//! Deck session data: the deck handle and the append-only list of drawn cards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::{CardPayload, NewDeckResponse};

/// Session reference to a shuffled deck held by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckHandle {
    pub deck_id: String,
    /// Count reported when the deck was created; never refreshed locally.
    pub remaining: u32,
    pub shuffled: bool,
}

impl From<NewDeckResponse> for DeckHandle {
    fn from(resp: NewDeckResponse) -> Self {
        Self {
            deck_id: resp.deck_id,
            remaining: resp.remaining,
            shuffled: resp.shuffled,
        }
    }
}

/// A card that came back from a successful draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawnCard {
    /// Service-issued card code, e.g. `KS`.
    pub id: String,
    /// `"<suit> <value>"`, e.g. `SPADES KING`.
    pub label: String,
    pub image_url: String,
    pub suit: String,
    pub value: String,
    pub drawn_at: DateTime<Utc>,
}

impl DrawnCard {
    pub fn from_payload(card: &CardPayload, drawn_at: DateTime<Utc>) -> Self {
        Self {
            id: card.code.clone(),
            label: format!("{} {}", card.suit, card.value),
            image_url: card.image.clone(),
            suit: card.suit.clone(),
            value: card.value.clone(),
            drawn_at,
        }
    }

    pub fn suit_symbol(&self) -> &'static str {
        match self.suit.to_ascii_uppercase().as_str() {
            "SPADES" => "♠",
            "HEARTS" => "♥",
            "DIAMONDS" => "♦",
            "CLUBS" => "♣",
            _ => "?",
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(
            self.suit.to_ascii_uppercase().as_str(),
            "HEARTS" | "DIAMONDS"
        )
    }

    /// Corner index: `K`, `10`, `A`...
    pub fn rank(&self) -> &str {
        match self.value.to_ascii_uppercase().as_str() {
            "ACE" => "A",
            "KING" => "K",
            "QUEEN" => "Q",
            "JACK" => "J",
            _ => self.value.as_str(),
        }
    }
}

/// Cards in draw order. Only grows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawnCardList {
    cards: Vec<DrawnCard>,
}

impl DrawnCardList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, card: DrawnCard) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawnCard> {
        self.cards.iter()
    }

    #[allow(dead_code)]
    pub fn as_slice(&self) -> &[DrawnCard] {
        &self.cards
    }

    #[allow(dead_code)]
    pub fn last(&self) -> Option<&DrawnCard> {
        self.cards.last()
    }
}

impl<'a> IntoIterator for &'a DrawnCardList {
    type Item = &'a DrawnCard;
    type IntoIter = std::slice::Iter<'a, DrawnCard>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
