//! In-process stand-in for the deck service, used by tests.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::task::JoinHandle;

use crate::api::CardPayload;

#[derive(Clone)]
struct MockState {
    cards: Arc<Mutex<VecDeque<CardPayload>>>,
    draws: Arc<AtomicUsize>,
    fail_new_deck: bool,
}

pub(crate) struct MockDeckService {
    addr: SocketAddr,
    state: MockState,
    task: JoinHandle<()>,
}

impl MockDeckService {
    pub const DECK_ID: &'static str = "abc";

    pub async fn start(cards: Vec<CardPayload>) -> Self {
        Self::start_with(cards, false).await
    }

    /// A service whose shuffle endpoint always answers 500.
    pub async fn start_failing() -> Self {
        Self::start_with(Vec::new(), true).await
    }

    async fn start_with(cards: Vec<CardPayload>, fail_new_deck: bool) -> Self {
        let state = MockState {
            cards: Arc::new(Mutex::new(cards.into())),
            draws: Arc::new(AtomicUsize::new(0)),
            fail_new_deck,
        };

        let app = Router::new()
            .route("/api/deck/new/shuffle/", get(new_deck))
            .route("/api/deck/:deck_id/draw/", get(draw))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock deck service");
        let addr = listener.local_addr().expect("mock address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/deck", self.addr)
    }

    pub fn draw_requests(&self) -> usize {
        self.state.draws.load(Ordering::SeqCst)
    }

    /// First `n` cards of an unshuffled deck, spades first.
    pub fn standard_cards(n: usize) -> Vec<CardPayload> {
        const SUITS: [(&str, char); 4] = [
            ("SPADES", 'S'),
            ("HEARTS", 'H'),
            ("DIAMONDS", 'D'),
            ("CLUBS", 'C'),
        ];
        const VALUES: [(&str, char); 13] = [
            ("ACE", 'A'),
            ("2", '2'),
            ("3", '3'),
            ("4", '4'),
            ("5", '5'),
            ("6", '6'),
            ("7", '7'),
            ("8", '8'),
            ("9", '9'),
            ("10", '0'),
            ("JACK", 'J'),
            ("QUEEN", 'Q'),
            ("KING", 'K'),
        ];

        SUITS
            .iter()
            .flat_map(|(suit, s)| {
                VALUES.iter().map(move |(value, v)| {
                    let code = format!("{v}{s}");
                    CardPayload {
                        image: format!("https://deckofcardsapi.com/static/img/{code}.png"),
                        code,
                        suit: suit.to_string(),
                        value: value.to_string(),
                    }
                })
            })
            .take(n)
            .collect()
    }
}

impl Drop for MockDeckService {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn new_deck(State(state): State<MockState>) -> Response {
    if state.fail_new_deck {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": "shuffle machine jammed"})),
        )
            .into_response();
    }

    let remaining = state.cards.lock().map(|c| c.len()).unwrap_or(0);
    Json(json!({
        "success": true,
        "deck_id": MockDeckService::DECK_ID,
        "remaining": remaining,
        "shuffled": true,
    }))
    .into_response()
}

async fn draw(State(state): State<MockState>, Path(deck_id): Path<String>) -> Response {
    if deck_id != MockDeckService::DECK_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "error": "Deck ID does not exist."})),
        )
            .into_response();
    }

    state.draws.fetch_add(1, Ordering::SeqCst);
    let mut cards = state.cards.lock().expect("mock deck lock");
    match cards.pop_front() {
        Some(card) => Json(json!({
            "success": true,
            "deck_id": MockDeckService::DECK_ID,
            "cards": [card],
            "remaining": cards.len(),
        }))
        .into_response(),
        None => Json(json!({
            "success": false,
            "deck_id": MockDeckService::DECK_ID,
            "cards": [],
            "remaining": 0,
            "error": "Not enough cards remaining to draw 1 additional",
        }))
        .into_response(),
    }
}
