//! Deck widget core
//!
//! Session state for one shuffled deck, the auto-draw timer policy and the
//! projection consumed by the presentation layers.

pub mod model;
pub mod timer;
pub mod view;
pub mod widget;

pub use model::{DeckHandle, DrawnCard};
pub use timer::TimerToken;
pub use view::{CardView, DeckView};
pub use widget::{DeckWidget, Effect, Notice, NoticeKind, WidgetEvent};
