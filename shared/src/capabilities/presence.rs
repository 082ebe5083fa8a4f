//! Presence store capability.
//!
//! Two operations against the realtime presence store: write the caller's
//! own record, and register a server-side guard that flips the record to
//! offline if the connection drops without a clean write. Writes are
//! best-effort; completions come back as events and the coordinator never
//! retries.

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::{PresenceRecord, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceOperation {
    Write {
        user_id: UserId,
        record: PresenceRecord,
    },
    /// The record given here is what the store publishes on an unclean
    /// disconnect. Only useful directly after an online write.
    RegisterOnDisconnect {
        user_id: UserId,
        record: PresenceRecord,
    },
}

impl Operation for PresenceOperation {
    type Output = PresenceResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceOutput {
    Written,
    GuardRegistered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PresenceError {
    #[error("network failure: {message}")]
    Network { message: String },
    #[error("presence write denied")]
    PermissionDenied,
    #[error("presence store error: {message}")]
    Store { message: String },
}

pub type PresenceResult = Result<PresenceOutput, PresenceError>;

pub struct Presence<Ev> {
    context: CapabilityContext<PresenceOperation, Ev>,
}

impl<Ev> Presence<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<PresenceOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn write<F>(&self, user_id: UserId, record: PresenceRecord, make_event: F)
    where
        F: FnOnce(PresenceResult) -> Ev + Send + 'static,
    {
        self.run(PresenceOperation::Write { user_id, record }, make_event);
    }

    pub fn register_on_disconnect<F>(&self, user_id: UserId, record: PresenceRecord, make_event: F)
    where
        F: FnOnce(PresenceResult) -> Ev + Send + 'static,
    {
        self.run(
            PresenceOperation::RegisterOnDisconnect { user_id, record },
            make_event,
        );
    }

    fn run<F>(&self, operation: PresenceOperation, make_event: F)
    where
        F: FnOnce(PresenceResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}

impl<Ev> crux_core::capability::Capability<Ev> for Presence<Ev> {
    type Operation = PresenceOperation;
    type MappedSelf<MappedEv> = Presence<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Presence::new(self.context.map_event(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_carry_the_record_verbatim() {
        let op = PresenceOperation::Write {
            user_id: UserId::new("u1"),
            record: PresenceRecord::online(12_345),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["Write"]["record"]["is_online"], true);
        assert_eq!(json["Write"]["record"]["last_seen_ms"], 12_345);
    }
}
