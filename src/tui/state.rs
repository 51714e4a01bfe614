//! TUI application state types.

use std::time::Instant;

use crate::deck::Notice;
use crate::session::Session;

use super::animation::AnimationState;

pub(crate) struct App {
    pub session: Session,
    /// Notice currently shown in the modal.
    pub notice: Option<Notice>,
    pub last_tick: Instant,
    pub animation: AnimationState,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            notice: None,
            last_tick: Instant::now(),
            animation: AnimationState::new(),
        }
    }

    /// Pull background results into the widget and surface the next notice.
    pub fn sync(&mut self) {
        self.session.pump();
        if self.notice.is_none() {
            self.notice = self.session.take_notice();
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = self.session.take_notice();
    }
}
