//! Chat resolution and the history walker over the Telegram API.

use async_trait::async_trait;
use grammers_client::Client;
use grammers_client::types::{Chat, Message};
use grammers_session::PackedChat;
use tracing::warn;

use crate::error::{Result, ScanError};
use crate::history::{FetchError, HistorySource};
use crate::message::RawMessage;

/// Strips the `-100` convention prefix that supergroup and channel ids
/// carry in configuration, yielding the bare id Telegram uses internally.
fn bare_chat_id(chat_id: i64) -> i64 {
    if chat_id <= -1_000_000_000_000 {
        -chat_id - 1_000_000_000_000
    } else {
        chat_id.abs()
    }
}

/// Finds the configured chat in the account's dialog list.
///
/// Reading a chat's history needs the access hash stored alongside each
/// dialog, so resolution walks the dialog list rather than looking up the
/// bare id directly. Fails with [`ScanError::Resolution`] (which carries
/// the remediation checklist) when the chat is not among the dialogs.
pub async fn resolve_chat(client: &Client, chat_id: i64) -> Result<Chat> {
    let wanted = bare_chat_id(chat_id);
    let mut dialogs = client.iter_dialogs();
    loop {
        match dialogs.next().await {
            Ok(Some(dialog)) => {
                if dialog.chat().id() == wanted {
                    return Ok(dialog.chat().clone());
                }
            }
            Ok(None) => return Err(ScanError::resolution(chat_id)),
            Err(err) => return Err(ScanError::api("listing dialogs", err)),
        }
    }
}

/// [`HistorySource`] over one resolved Telegram chat.
pub struct TelegramHistory {
    client: Client,
    chat: PackedChat,
}

impl TelegramHistory {
    /// Creates a walker over the given chat.
    pub fn new(client: Client, chat: &Chat) -> Self {
        Self {
            client,
            chat: chat.pack(),
        }
    }
}

#[async_trait]
impl HistorySource for TelegramHistory {
    async fn fetch_batch(
        &mut self,
        limit: usize,
        offset_id: i64,
    ) -> std::result::Result<Vec<RawMessage>, FetchError> {
        let mut iter = self.client.iter_messages(self.chat.clone()).limit(limit);
        if offset_id > 0 {
            // Message ids fit in 32 bits on the wire; the cursor only ever
            // holds ids this walker produced.
            iter = iter.offset_id(i32::try_from(offset_id).unwrap_or(i32::MAX));
        }

        let mut batch = Vec::with_capacity(limit);
        loop {
            match iter.next().await {
                Ok(Some(message)) => batch.push(convert(&message)),
                Ok(None) => break,
                Err(err) => {
                    // Swallowed channel: no progress this attempt. The
                    // pipeline cannot tell this apart from exhaustion; see
                    // the contract notes in `crate::history`.
                    warn!(error = %err, offset_id, "history fetch failed");
                    return Ok(Vec::new());
                }
            }
        }
        Ok(batch)
    }
}

fn convert(message: &Message) -> RawMessage {
    let mut raw = RawMessage::new(i64::from(message.id()), message.date());
    if let Some(author) = message
        .sender()
        .and_then(|sender| sender.username().map(str::to_owned))
    {
        raw = raw.with_author(author);
    }
    let text = message.text();
    if !text.is_empty() {
        raw = raw.with_text(text);
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_chat_id_strips_supergroup_prefix() {
        assert_eq!(bare_chat_id(-1001234567890), 1234567890);
    }

    #[test]
    fn test_bare_chat_id_plain_group() {
        assert_eq!(bare_chat_id(-12345), 12345);
    }

    #[test]
    fn test_bare_chat_id_user() {
        assert_eq!(bare_chat_id(987654), 987654);
    }
}
