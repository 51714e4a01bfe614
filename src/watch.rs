//! Headless auto-draw: acquire a deck, switch auto-draw on and print each card
//! as it lands. Used by `deck-drawer watch` and when stdout is not a terminal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use colored::*;

use crate::deck::{DrawnCard, NoticeKind};
use crate::session::Session;

const POLL: Duration = Duration::from_millis(100);

/// Runs until the deck is empty, `limit` cards were printed, or Ctrl-C.
/// Returns the number of cards printed.
pub(crate) fn run_watch(
    rt: &tokio::runtime::Runtime,
    mut session: Session,
    limit: Option<usize>,
) -> Result<usize> {
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        rt.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupted.store(true, Ordering::SeqCst);
            }
        });
    }

    session.mount();
    println!("{}", "Shuffling a fresh deck...".bright_cyan());

    let mut printed = 0usize;
    let mut started = false;

    loop {
        session.wait(POLL);

        while let Some(notice) = session.take_notice() {
            match notice.kind {
                NoticeKind::DeckFailed => bail!("{}: {}", notice.title, notice.message),
                NoticeKind::Exhausted => {
                    println!("{}", notice.message.bright_yellow());
                }
                NoticeKind::DrawFailed => {
                    eprintln!(
                        "{} {}",
                        format!("{}:", notice.title).bright_red(),
                        notice.message.bright_red()
                    );
                }
            }
        }

        if !started {
            if let Some(deck) = session.widget().deck() {
                println!(
                    "{} {} ({} cards)",
                    "Deck".bright_green(),
                    deck.deck_id.bold(),
                    deck.remaining
                );
                session.toggle_auto_draw();
                started = true;
            }
        }

        let budget = limit.map_or(usize::MAX, |n| n.saturating_sub(printed));
        for card in session.widget().drawn().iter().skip(printed).take(budget) {
            printed += 1;
            print_card(printed, card);
        }

        if limit.is_some_and(|n| printed >= n) {
            break;
        }

        let widget = session.widget();
        if widget.is_exhausted() && widget.in_flight() == 0 {
            break;
        }

        if interrupted.load(Ordering::SeqCst) {
            println!("{}", "Interrupted.".bright_yellow());
            break;
        }
    }

    session.teardown();
    tracing::info!(printed, "watch finished");
    Ok(printed)
}

fn print_card(index: usize, card: &DrawnCard) {
    let face = format!("{}{}", card.rank(), card.suit_symbol());
    let face = if card.is_red() {
        face.bright_red().bold()
    } else {
        face.bright_white().bold()
    };
    println!(
        "{:>3}. {:<4} {}",
        index,
        face,
        card_line(card).as_str().dimmed()
    );
}

fn card_line(card: &DrawnCard) -> String {
    format!("{:<3} {:<15} {}", card.id, card.label, card.image_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DeckClient;
    use crate::testing::MockDeckService;
    use chrono::Utc;

    fn session(rt: &tokio::runtime::Runtime, mock: &MockDeckService) -> Session {
        Session::new(
            rt.handle().clone(),
            DeckClient::with_url(mock.base_url()),
            Duration::from_millis(20),
        )
    }

    #[test]
    fn test_card_line_layout() {
        let card = DrawnCard {
            id: "KS".to_string(),
            label: "SPADES KING".to_string(),
            image_url: "url".to_string(),
            suit: "SPADES".to_string(),
            value: "KING".to_string(),
            drawn_at: Utc::now(),
        };
        assert_eq!(card_line(&card), "KS  SPADES KING     url");
    }

    #[test]
    fn test_watch_drains_small_deck() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mock = rt.block_on(MockDeckService::start(MockDeckService::standard_cards(4)));

        let printed = run_watch(&rt, session(&rt, &mock), None).unwrap();
        assert_eq!(printed, 4);
    }

    #[test]
    fn test_watch_honours_limit() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mock = rt.block_on(MockDeckService::start(MockDeckService::standard_cards(52)));

        let printed = run_watch(&rt, session(&rt, &mock), Some(3)).unwrap();
        assert_eq!(printed, 3);
    }

    #[test]
    fn test_watch_fails_without_deck() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mock = rt.block_on(MockDeckService::start_failing());

        let err = run_watch(&rt, session(&rt, &mock), None).unwrap_err();
        assert!(err.to_string().contains("Could not get a deck"));
    }
}
