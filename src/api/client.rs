//! API client for the card-deck service
//!
//! Handles all HTTP communication with the remote deck endpoints.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;

const DEFAULT_API_URL: &str = "https://deckofcardsapi.com/api/deck";

/// API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

/// Body of `GET /new/shuffle/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDeckResponse {
    pub deck_id: String,
    pub remaining: u32,
    #[serde(default)]
    pub shuffled: bool,
    #[serde(default)]
    pub success: bool,
}

/// One card as the service describes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardPayload {
    pub code: String,
    pub suit: String,
    pub value: String,
    #[serde(default)]
    pub image: String,
}

/// Body of `GET /{deck_id}/draw/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawResponse {
    pub remaining: u32,
    #[serde(default)]
    pub cards: Vec<CardPayload>,
    #[serde(default)]
    pub success: bool,
    /// Set by the service when the draw could not be satisfied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// HTTP client for the deck service
#[derive(Debug, Clone)]
pub struct DeckClient {
    client: Client,
    base_url: String,
}

impl DeckClient {
    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_seconds.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: normalize_base_url(&config.base_url),
        }
    }

    /// Create with custom base URL and default settings
    #[allow(dead_code)]
    pub fn with_url(base_url: impl Into<String>) -> Self {
        let config = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a freshly shuffled deck
    pub async fn new_shuffled_deck(&self) -> Result<NewDeckResponse, ApiError> {
        let url = format!("{}/new/shuffle/", self.base_url);
        self.get_json(&url).await
    }

    /// Draw one card from the given deck
    pub async fn draw_card(&self, deck_id: &str) -> Result<DrawResponse, ApiError> {
        let url = format!("{}/{}/draw/", self.base_url, deck_id);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Malformed {
            endpoint: url.to_string(),
            reason: err.to_string(),
        })
    }
}

/// The service reports failures as `{"success": false, "error": "..."}`.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return DEFAULT_API_URL.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDeckService;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://deckofcardsapi.com/api/deck/"),
            "https://deckofcardsapi.com/api/deck"
        );
        assert_eq!(normalize_base_url("  "), DEFAULT_API_URL);
    }

    #[test]
    fn test_custom_url() {
        let client = DeckClient::with_url("http://localhost:8080/api/deck/");
        assert_eq!(client.base_url(), "http://localhost:8080/api/deck");
    }

    #[test]
    fn test_parse_new_deck_body() {
        let body = r#"{"success": true, "deck_id": "9j32kn8tud7t", "remaining": 52, "shuffled": true}"#;
        let deck: NewDeckResponse = serde_json::from_str(body).unwrap();
        assert_eq!(deck.deck_id, "9j32kn8tud7t");
        assert_eq!(deck.remaining, 52);
        assert!(deck.shuffled);
    }

    #[test]
    fn test_parse_exhausted_draw_body() {
        let body = r#"{"success": false, "deck_id": "abc", "cards": [], "remaining": 0,
            "error": "Not enough cards remaining to draw 1 additional"}"#;
        let draw: DrawResponse = serde_json::from_str(body).unwrap();
        assert_eq!(draw.remaining, 0);
        assert!(draw.cards.is_empty());
        assert!(draw.error.is_some());
    }

    #[test]
    fn test_error_message_prefers_service_error_field() {
        assert_eq!(
            error_message(r#"{"success": false, "error": "Deck ID does not exist."}"#),
            "Deck ID does not exist."
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(""), "Unknown error");
    }

    #[tokio::test]
    async fn test_new_deck_and_draw_against_mock() {
        let mock = MockDeckService::start(MockDeckService::standard_cards(3)).await;
        let client = DeckClient::with_url(mock.base_url());

        let deck = client.new_shuffled_deck().await.unwrap();
        assert_eq!(deck.deck_id, MockDeckService::DECK_ID);
        assert_eq!(deck.remaining, 3);

        let draw = client.draw_card(&deck.deck_id).await.unwrap();
        assert_eq!(draw.remaining, 2);
        assert_eq!(draw.cards.len(), 1);
        assert_eq!(mock.draw_requests(), 1);
    }

    #[tokio::test]
    async fn test_unknown_deck_is_api_error() {
        let mock = MockDeckService::start(MockDeckService::standard_cards(1)).await;
        let client = DeckClient::with_url(mock.base_url());

        let err = client.draw_card("nope").await.unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Deck ID does not exist.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let client = DeckClient::with_url("http://127.0.0.1:9/api/deck");
        let err = client.new_shuffled_deck().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
