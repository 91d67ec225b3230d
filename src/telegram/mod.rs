//! Telegram MTProto transport.
//!
//! Everything that actually talks to Telegram lives here, behind the
//! [`HistorySource`](crate::history::HistorySource) seam: client
//! construction and the login flow ([`connect`], [`export_session`]), chat
//! resolution and the history walker ([`resolve_chat`],
//! [`TelegramHistory`]).
//!
//! Dropping the client closes the underlying connection, so teardown
//! happens on every exit path without explicit cleanup.

mod auth;
mod history;

pub use auth::{connect, export_session};
pub use history::{TelegramHistory, resolve_chat};
