//! Key-value persistence capability.
//!
//! The shell owns the actual store (UserDefaults / SharedPreferences /
//! localStorage); the core reads and writes raw bytes under namespaced
//! string keys. This module also pins down the key scheme and the byte
//! encoding of stored values so reads and writes cannot disagree on either.

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyValueOperation {
    Read(String),
    Write(String, Vec<u8>),
}

impl Operation for KeyValueOperation {
    type Output = KeyValueOutput;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyValueOutput {
    /// `None` when the key has never been written.
    Read(Option<Vec<u8>>),
    /// Whether the write was persisted.
    Write(bool),
}

pub struct KeyValue<Ev> {
    context: CapabilityContext<KeyValueOperation, Ev>,
}

impl<Ev> KeyValue<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<KeyValueOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn read<F>(&self, key: &str, make_event: F)
    where
        F: FnOnce(KeyValueOutput) -> Ev + Send + 'static,
    {
        self.run(KeyValueOperation::Read(key.to_string()), make_event);
    }

    pub fn write<F>(&self, key: &str, value: Vec<u8>, make_event: F)
    where
        F: FnOnce(KeyValueOutput) -> Ev + Send + 'static,
    {
        self.run(KeyValueOperation::Write(key.to_string(), value), make_event);
    }

    fn run<F>(&self, operation: KeyValueOperation, make_event: F)
    where
        F: FnOnce(KeyValueOutput) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let output = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(output));
        });
    }
}

impl<Ev> crux_core::capability::Capability<Ev> for KeyValue<Ev> {
    type Operation = KeyValueOperation;
    type MappedSelf<MappedEv> = KeyValue<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        KeyValue::new(self.context.map_event(f))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyNamespace {
    Settings,
    Session,
}

impl KeyNamespace {
    #[must_use]
    const fn prefix(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Session => "session",
        }
    }
}

/// Namespaced store key, rendered as `namespace:name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvKey {
    namespace: KeyNamespace,
    name: String,
}

impl KvKey {
    #[must_use]
    pub fn new(namespace: KeyNamespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

impl fmt::Display for KvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix(), self.name)
    }
}

/// Boolean flags are stored as JSON so a human can read a store dump.
#[must_use]
pub fn encode_flag(value: bool) -> Vec<u8> {
    if value {
        b"true".to_vec()
    } else {
        b"false".to_vec()
    }
}

/// Missing or corrupt bytes decode as `false`; a flag that cannot be read
/// behaves as if it was never set.
#[must_use]
pub fn decode_flag(bytes: &[u8]) -> bool {
    serde_json::from_slice(bytes).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_render_with_namespace_prefix() {
        let key = KvKey::new(KeyNamespace::Settings, "onboarding_complete");
        assert_eq!(key.to_string(), "settings:onboarding_complete");
    }

    #[test]
    fn flag_roundtrip() {
        assert!(decode_flag(&encode_flag(true)));
        assert!(!decode_flag(&encode_flag(false)));
    }

    #[test]
    fn corrupt_flag_reads_as_unset() {
        assert!(!decode_flag(b""));
        assert!(!decode_flag(b"yes"));
        assert!(!decode_flag(b"\xff\xfe"));
    }

    #[test]
    fn operations_serialize_for_the_shell() {
        let op = KeyValueOperation::Write("settings:onboarding_complete".into(), encode_flag(true));
        let json = serde_json::to_string(&op).unwrap();
        let back: KeyValueOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }
}
