//! Chat delivery façade.
//!
//! Thin read model over the remote chat store: a live-updating ordered list
//! of messages per conversation (remote key order, no pagination, no acks)
//! plus a separate presence subscription for the counterpart. The store
//! assigns the monotonic message keys; the client only contributes a local
//! id for echo suppression.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{MessageId, PresenceRecord, UserId};
use crate::{AppError, ErrorKind, MAX_MESSAGE_LENGTH};

/// Key of a two-party chat thread in the remote chat store.
///
/// Built from the participant pair sorted lexicographically so that both
/// sides derive the same id no matter who opens the conversation first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    #[must_use]
    pub fn between(a: &UserId, b: &UserId) -> Self {
        let (first, second) = if a.as_str() <= b.as_str() {
            (a, b)
        } else {
            (b, a)
        };
        Self(format!("{first}_{second}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One message as stored remotely. `sent_at_ms` is the store's epoch-millis
/// timestamp; ordering follows the store's insertion keys, which the shell
/// preserves when it delivers a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRecord {
    pub id: MessageId,
    pub sender_id: UserId,
    pub text: String,
    pub sent_at_ms: u64,
}

/// Payload for an append. The store assigns the ordering key on arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub id: MessageId,
    pub text: String,
    pub sent_at_ms: u64,
}

/// Rejects messages the store would accept but the product should not.
pub fn validate_message_text(text: &str) -> Result<String, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::new(
            ErrorKind::Validation,
            "Message cannot be empty",
        ));
    }
    if trimmed.len() > MAX_MESSAGE_LENGTH {
        return Err(AppError::new(
            ErrorKind::Validation,
            format!("Message is too long (limit {MAX_MESSAGE_LENGTH} characters)"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Live state of the currently open conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub id: ConversationId,
    pub counterpart: UserId,
    pub messages: Vec<ChatMessageRecord>,
    pub counterpart_presence: Option<PresenceRecord>,
}

impl ConversationState {
    #[must_use]
    pub fn open(me: &UserId, counterpart: UserId) -> Self {
        Self {
            id: ConversationId::between(me, &counterpart),
            counterpart,
            messages: Vec::new(),
            counterpart_presence: None,
        }
    }

    /// Replaces the read model with the latest snapshot from the store.
    /// Snapshots arrive already ordered; the client does not re-sort.
    pub fn apply_snapshot(&mut self, messages: Vec<ChatMessageRecord>) {
        self.messages = messages;
    }

    #[must_use]
    pub fn counterpart_online(&self) -> bool {
        self.counterpart_presence.is_some_and(|p| p.is_online)
    }

    /// "Online" / "Last seen …" label for the chat header.
    #[must_use]
    pub fn presence_label(&self, now_ms: u64) -> String {
        match self.counterpart_presence {
            Some(p) if p.is_online => "Online".into(),
            Some(p) => format!("Last seen {}", crate::format_time_ago(p.last_seen_ms, now_ms)),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_is_order_independent() {
        let a = UserId::new("alice");
        let b = UserId::new("bob");
        assert_eq!(ConversationId::between(&a, &b), ConversationId::between(&b, &a));
        assert_eq!(ConversationId::between(&a, &b).as_str(), "alice_bob");
    }

    #[test]
    fn conversation_id_distinct_per_pair() {
        let a = UserId::new("alice");
        let b = UserId::new("bob");
        let c = UserId::new("carol");
        assert_ne!(ConversationId::between(&a, &b), ConversationId::between(&a, &c));
    }

    #[test]
    fn validate_message_trims_and_rejects_empty() {
        assert_eq!(validate_message_text("  hello  ").unwrap(), "hello");
        assert!(validate_message_text("").is_err());
        assert!(validate_message_text("   \n\t ").is_err());
    }

    #[test]
    fn validate_message_rejects_oversized() {
        let long = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(validate_message_text(&long).is_err());
        let max = "x".repeat(MAX_MESSAGE_LENGTH);
        assert!(validate_message_text(&max).is_ok());
    }

    #[test]
    fn snapshot_replaces_messages_in_store_order() {
        let me = UserId::new("alice");
        let mut convo = ConversationState::open(&me, UserId::new("bob"));

        let batch = vec![
            ChatMessageRecord {
                id: MessageId::new("m1"),
                sender_id: UserId::new("bob"),
                text: "hi".into(),
                sent_at_ms: 100,
            },
            ChatMessageRecord {
                id: MessageId::new("m2"),
                sender_id: me.clone(),
                text: "hello".into(),
                sent_at_ms: 200,
            },
        ];
        convo.apply_snapshot(batch.clone());
        assert_eq!(convo.messages, batch);

        convo.apply_snapshot(Vec::new());
        assert!(convo.messages.is_empty());
    }

    #[test]
    fn presence_label_reflects_record() {
        let me = UserId::new("alice");
        let mut convo = ConversationState::open(&me, UserId::new("bob"));
        assert_eq!(convo.presence_label(1_000_000), "");
        assert!(!convo.counterpart_online());

        convo.counterpart_presence = Some(PresenceRecord::online(1_000_000));
        assert_eq!(convo.presence_label(1_000_000), "Online");
        assert!(convo.counterpart_online());

        convo.counterpart_presence = Some(PresenceRecord::offline(1_000_000));
        let label = convo.presence_label(1_060_000);
        assert!(label.starts_with("Last seen"), "got {label}");
    }
}
