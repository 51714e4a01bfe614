//! Runtime side of the deck widget.
//!
//! `Session` owns a `DeckWidget` and carries out the effects it returns: HTTP
//! calls and the repeating timer run as tokio tasks and report back through an
//! mpsc channel that the UI loop drains with `pump`/`wait`.

use std::collections::VecDeque;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::api::DeckClient;
use crate::deck::{DeckHandle, DeckWidget, Effect, Notice, TimerToken, WidgetEvent};

pub struct Session {
    id: Uuid,
    widget: DeckWidget,
    client: DeckClient,
    rt: Handle,
    tx: mpsc::Sender<WidgetEvent>,
    rx: mpsc::Receiver<WidgetEvent>,
    timer: Option<(TimerToken, JoinHandle<()>)>,
    notices: VecDeque<Notice>,
}

impl Session {
    pub fn new(rt: Handle, client: DeckClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let id = Uuid::new_v4();
        tracing::info!(session = %id, base_url = client.base_url(), "session created");

        Self {
            id,
            widget: DeckWidget::new(interval),
            client,
            rt,
            tx,
            rx,
            timer: None,
            notices: VecDeque::new(),
        }
    }

    pub fn widget(&self) -> &DeckWidget {
        &self.widget
    }

    #[allow(dead_code)]
    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Oldest notice not yet shown.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn mount(&mut self) {
        self.dispatch(WidgetEvent::Mounted);
    }

    pub fn toggle_auto_draw(&mut self) {
        self.dispatch(WidgetEvent::ToggleAutoDraw);
    }

    pub fn draw_one(&mut self) {
        self.dispatch(WidgetEvent::DrawRequested);
    }

    pub fn teardown(&mut self) {
        self.dispatch(WidgetEvent::Teardown);
    }

    /// Apply every event already delivered by background tasks.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    /// Block up to `timeout` for the next event, then drain the rest.
    pub fn wait(&mut self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatch(event);
                1 + self.pump()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    fn dispatch(&mut self, event: WidgetEvent) {
        for effect in self.widget.update(event) {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::FetchDeck => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                self.rt.spawn(async move {
                    let result = client.new_shuffled_deck().await.map(DeckHandle::from);
                    let _ = tx.send(WidgetEvent::DeckLoaded(result));
                });
            }
            Effect::ArmTimer { token, period } => {
                if let Some((stale, handle)) = self.timer.take() {
                    tracing::warn!(session = %self.id, %stale, "timer still live when arming; aborting it");
                    handle.abort();
                }
                let handle = self.rt.spawn(run_ticker(token, period, self.tx.clone()));
                self.timer = Some((token, handle));
            }
            Effect::CancelTimer(token) => {
                if let Some((live, handle)) = self.timer.take() {
                    if live != token {
                        tracing::warn!(session = %self.id, %live, %token, "cancel for a different timer");
                    }
                    handle.abort();
                }
            }
            Effect::Draw { seq, deck_id } => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                self.rt.spawn(async move {
                    let outcome = client.draw_card(&deck_id).await;
                    let _ = tx.send(WidgetEvent::DrawCompleted { seq, outcome });
                });
            }
            Effect::Notify(notice) => {
                tracing::info!(session = %self.id, kind = ?notice.kind, message = %notice.message, "notice");
                self.notices.push_back(notice);
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
        if let Some((_, handle)) = self.timer.take() {
            handle.abort();
        }
    }
}

/// Sends `Tick(token)` every `period`, first one a full period after arming.
async fn run_ticker(token: TimerToken, period: Duration, tx: mpsc::Sender<WidgetEvent>) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if tx.send(WidgetEvent::Tick(token)).is_err() {
            break;
        }
    }
}
