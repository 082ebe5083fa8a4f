//! Realtime store capability backing the chat façade.
//!
//! Subscriptions are shell-side listeners that keep yielding snapshots
//! until the shell tears them down; the core consumes them as streams.
//! Sends and unsubscribes are single round trips.

use crux_core::capability::{CapabilityContext, Operation};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessageRecord, ConversationId, OutgoingMessage};
use crate::model::{PresenceRecord, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RealtimeOperation {
    /// Listen for full message snapshots of one conversation, in store
    /// key order.
    SubscribeMessages { conversation_id: ConversationId },
    /// Listen for presence changes of one user.
    SubscribePresence { user_id: UserId },
    /// Append a message; the store assigns the ordering key.
    PushMessage {
        conversation_id: ConversationId,
        sender_id: UserId,
        message: OutgoingMessage,
    },
    /// Tear down both listeners for the conversation's screen.
    Unsubscribe { conversation_id: ConversationId },
}

impl Operation for RealtimeOperation {
    type Output = RealtimeResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RealtimeOutput {
    /// One full snapshot of the conversation, already ordered.
    MessageBatch {
        conversation_id: ConversationId,
        messages: Vec<ChatMessageRecord>,
    },
    PresenceChanged {
        user_id: UserId,
        record: PresenceRecord,
    },
    Pushed,
    Unsubscribed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RealtimeError {
    #[error("network failure: {message}")]
    Network { message: String },
    #[error("realtime access denied")]
    PermissionDenied,
    #[error("realtime store error: {message}")]
    Store { message: String },
}

pub type RealtimeResult = Result<RealtimeOutput, RealtimeError>;

pub struct Realtime<Ev> {
    context: CapabilityContext<RealtimeOperation, Ev>,
}

impl<Ev> Realtime<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<RealtimeOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn subscribe_messages<F>(&self, conversation_id: ConversationId, make_event: F)
    where
        F: Fn(RealtimeResult) -> Ev + Send + 'static,
    {
        self.stream(
            RealtimeOperation::SubscribeMessages { conversation_id },
            make_event,
        );
    }

    pub fn subscribe_presence<F>(&self, user_id: UserId, make_event: F)
    where
        F: Fn(RealtimeResult) -> Ev + Send + 'static,
    {
        self.stream(RealtimeOperation::SubscribePresence { user_id }, make_event);
    }

    pub fn push_message<F>(
        &self,
        conversation_id: ConversationId,
        sender_id: UserId,
        message: OutgoingMessage,
        make_event: F,
    ) where
        F: FnOnce(RealtimeResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx
                .request_from_shell(RealtimeOperation::PushMessage {
                    conversation_id,
                    sender_id,
                    message,
                })
                .await;
            ctx.update_app(make_event(result));
        });
    }

    /// Fire-and-forget teardown; the stale-batch guard in the app handles
    /// anything still in flight.
    pub fn unsubscribe(&self, conversation_id: ConversationId) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(RealtimeOperation::Unsubscribe { conversation_id })
                .await;
        });
    }

    fn stream<F>(&self, operation: RealtimeOperation, make_event: F)
    where
        F: Fn(RealtimeResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let mut updates = ctx.stream_from_shell(operation);
            while let Some(result) = updates.next().await {
                ctx.update_app(make_event(result));
            }
        });
    }
}

impl<Ev> crux_core::capability::Capability<Ev> for Realtime<Ev> {
    type Operation = RealtimeOperation;
    type MappedSelf<MappedEv> = Realtime<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Realtime::new(self.context.map_event(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MessageId;

    #[test]
    fn push_operation_serializes_payload() {
        let op = RealtimeOperation::PushMessage {
            conversation_id: ConversationId::between(&UserId::new("a"), &UserId::new("b")),
            sender_id: UserId::new("a"),
            message: OutgoingMessage {
                id: MessageId::new("m1"),
                text: "hi".into(),
                sent_at_ms: 42,
            },
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["PushMessage"]["conversation_id"], "a_b");
        assert_eq!(json["PushMessage"]["message"]["text"], "hi");
    }
}
