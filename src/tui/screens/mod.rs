//! TUI screen drawing functions.

pub(crate) mod notice;
pub(crate) mod table;
