//! The deck widget state machine.
//!
//! `DeckWidget::update` is the only way session state changes. It consumes a
//! `WidgetEvent` and returns the `Effect`s the runtime must carry out (HTTP
//! calls, timer arm/cancel, user notices). No I/O happens here.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;

use super::model::{DeckHandle, DrawnCard, DrawnCardList};
use super::timer::{self, TimerToken};
use crate::api::{ApiError, DrawResponse};

pub const KEEP_DRAWING_LABEL: &str = "KEEP DRAWING FOR ME!";
pub const STOP_DRAWING_LABEL: &str = "STOP DRAWING FOR ME!";
pub const NO_CARDS_REMAINING: &str = "no cards remaining!";

pub type DrawOutcome = Result<DrawResponse, ApiError>;

#[derive(Debug)]
pub enum WidgetEvent {
    /// First display; triggers deck acquisition.
    Mounted,
    DeckLoaded(Result<DeckHandle, ApiError>),
    ToggleAutoDraw,
    /// Manual single draw.
    DrawRequested,
    Tick(TimerToken),
    DrawCompleted { seq: u64, outcome: DrawOutcome },
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDeck,
    ArmTimer { token: TimerToken, period: Duration },
    CancelTimer(TimerToken),
    Draw { seq: u64, deck_id: String },
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Exhausted,
    DrawFailed,
    DeckFailed,
}

/// Something the presentation layer should show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn exhausted() -> Self {
        Self {
            kind: NoticeKind::Exhausted,
            title: "Deck empty".to_string(),
            message: NO_CARDS_REMAINING.to_string(),
        }
    }

    fn draw_failed(err: &ApiError) -> Self {
        Self {
            kind: NoticeKind::DrawFailed,
            title: "Draw failed".to_string(),
            message: err.to_string(),
        }
    }

    fn deck_failed(err: &ApiError) -> Self {
        Self {
            kind: NoticeKind::DeckFailed,
            title: "Could not get a deck".to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct DeckWidget {
    interval: Duration,
    mounted: bool,
    loading: bool,
    torn_down: bool,
    deck: Option<DeckHandle>,
    drawn: DrawnCardList,
    auto_draw: bool,
    exhausted: bool,
    timer: Option<TimerToken>,
    next_generation: u64,
    // Draws are numbered at issue time and applied strictly in that order.
    next_seq: u64,
    next_apply: u64,
    parked: BTreeMap<u64, DrawOutcome>,
}

impl DeckWidget {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            mounted: false,
            loading: false,
            torn_down: false,
            deck: None,
            drawn: DrawnCardList::new(),
            auto_draw: false,
            exhausted: false,
            timer: None,
            next_generation: 0,
            next_seq: 0,
            next_apply: 0,
            parked: BTreeMap::new(),
        }
    }

    pub fn deck(&self) -> Option<&DeckHandle> {
        self.deck.as_ref()
    }

    pub fn drawn(&self) -> &DrawnCardList {
        &self.drawn
    }

    pub fn auto_draw(&self) -> bool {
        self.auto_draw
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[allow(dead_code)]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[allow(dead_code)]
    pub fn timer(&self) -> Option<TimerToken> {
        self.timer
    }

    /// Draw requests issued but not yet applied.
    pub fn in_flight(&self) -> u64 {
        self.next_seq - self.next_apply
    }

    /// Label of the draw-control button; `None` while there is no deck.
    pub fn button_label(&self) -> Option<&'static str> {
        self.deck.as_ref().map(|_| {
            if self.auto_draw {
                STOP_DRAWING_LABEL
            } else {
                KEEP_DRAWING_LABEL
            }
        })
    }

    pub fn update(&mut self, event: WidgetEvent) -> Vec<Effect> {
        if self.torn_down {
            tracing::debug!(?event, "event after teardown ignored");
            return Vec::new();
        }

        match event {
            WidgetEvent::Mounted => self.mount(),
            WidgetEvent::DeckLoaded(result) => self.deck_loaded(result),
            WidgetEvent::ToggleAutoDraw => self.toggle_auto_draw(),
            WidgetEvent::DrawRequested => self.draw_requested(),
            WidgetEvent::Tick(token) => self.tick(token),
            WidgetEvent::DrawCompleted { seq, outcome } => self.draw_completed(seq, outcome),
            WidgetEvent::Teardown => self.teardown(),
        }
    }

    fn mount(&mut self) -> Vec<Effect> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        self.loading = true;
        tracing::info!("requesting new shuffled deck");
        vec![Effect::FetchDeck]
    }

    fn deck_loaded(&mut self, result: Result<DeckHandle, ApiError>) -> Vec<Effect> {
        self.loading = false;
        match result {
            Ok(handle) => {
                tracing::info!(
                    deck_id = %handle.deck_id,
                    remaining = handle.remaining,
                    "deck loaded"
                );
                self.exhausted = handle.remaining == 0;
                self.deck = Some(handle);
                self.reconcile_timer()
            }
            Err(err) => {
                tracing::error!(error = %err, "deck acquisition failed");
                vec![Effect::Notify(Notice::deck_failed(&err))]
            }
        }
    }

    fn toggle_auto_draw(&mut self) -> Vec<Effect> {
        if self.deck.is_none() {
            return Vec::new();
        }
        if self.exhausted && !self.auto_draw {
            // An exhausted deck cannot start drawing; the flag stays false.
            tracing::info!("auto-draw requested on an exhausted deck");
            return vec![Effect::Notify(Notice::exhausted())];
        }
        self.auto_draw = !self.auto_draw;
        tracing::info!(auto_draw = self.auto_draw, "auto-draw toggled");
        self.reconcile_timer()
    }

    fn draw_requested(&mut self) -> Vec<Effect> {
        self.issue_draw().into_iter().collect()
    }

    fn tick(&mut self, token: TimerToken) -> Vec<Effect> {
        if self.timer != Some(token) || !self.auto_draw {
            tracing::debug!(%token, "stale tick ignored");
            return Vec::new();
        }
        self.issue_draw().into_iter().collect()
    }

    fn issue_draw(&mut self) -> Option<Effect> {
        let deck_id = self.deck.as_ref()?.deck_id.clone();
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(seq, %deck_id, "draw issued");
        Some(Effect::Draw { seq, deck_id })
    }

    fn draw_completed(&mut self, seq: u64, outcome: DrawOutcome) -> Vec<Effect> {
        if seq < self.next_apply || seq >= self.next_seq {
            tracing::warn!(seq, "completion for unknown draw ignored");
            return Vec::new();
        }
        self.parked.insert(seq, outcome);

        let mut effects = Vec::new();
        while let Some(outcome) = self.parked.remove(&self.next_apply) {
            self.next_apply += 1;
            effects.extend(self.apply_draw(outcome));
        }
        effects
    }

    fn apply_draw(&mut self, outcome: DrawOutcome) -> Vec<Effect> {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "draw failed");
                return vec![Effect::Notify(Notice::draw_failed(&err))];
            }
        };

        if let Some(card) = response.cards.first() {
            let card = DrawnCard::from_payload(card, Utc::now());
            tracing::info!(
                card = %card.id,
                remaining = response.remaining,
                "card drawn"
            );
            self.drawn.push(card);
        }

        if response.remaining > 0 {
            return Vec::new();
        }

        self.exhausted = true;
        let mut effects = Vec::new();
        if self.auto_draw {
            self.auto_draw = false;
            effects.extend(self.reconcile_timer());
        }
        tracing::info!("deck exhausted");
        effects.push(Effect::Notify(Notice::exhausted()));
        effects
    }

    fn teardown(&mut self) -> Vec<Effect> {
        self.torn_down = true;
        tracing::info!("widget torn down");
        self.timer
            .take()
            .map(Effect::CancelTimer)
            .into_iter()
            .collect()
    }

    fn reconcile_timer(&mut self) -> Vec<Effect> {
        let wanted = timer::wants_timer(self.auto_draw, self.deck.is_some(), self.exhausted);
        let plan = timer::plan_timer(self.timer, wanted, self.next_generation);

        let mut effects = Vec::new();
        if let Some(token) = plan.cancel {
            tracing::debug!(%token, "timer released");
            effects.push(Effect::CancelTimer(token));
        }
        self.timer = plan.arm;
        if let Some(token) = plan.arm {
            self.next_generation += 1;
            tracing::debug!(%token, period_ms = self.interval.as_millis() as u64, "timer armed");
            effects.push(Effect::ArmTimer {
                token,
                period: self.interval,
            });
        }
        effects
    }
}
