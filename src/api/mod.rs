//! API module
//!
//! HTTP client for communicating with the card-deck service.

mod client;

pub use client::{ApiError, CardPayload, DeckClient, DrawResponse, NewDeckResponse};
