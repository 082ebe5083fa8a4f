//! Session and presence coordination.
//!
//! Keeps the remote presence record consistent with the product of app
//! lifecycle and network availability. The derived value is strict:
//! online if and only if the app is foregrounded AND the network is up.
//! Every lifecycle or connectivity event consults the transition table and
//! returns the presence writes to issue; the caller turns them into
//! capability requests.

use serde::{Deserialize, Serialize};

use crate::model::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Foreground,
    Background,
}

/// A presence write the coordinator wants issued. All of these are
/// best-effort: completions come back as events and failures are logged,
/// never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceCommand {
    WriteOnline,
    WriteOffline,
    /// Ask the presence store to flip the record to offline if the
    /// connection drops without a clean teardown. Only meaningful right
    /// after an online write.
    RegisterDisconnectGuard,
}

/// Owned session state, injected through the `Model` rather than held in
/// process-wide statics.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    identity: Option<Identity>,
    lifecycle: Lifecycle,
    network_online: bool,
    /// Last presence value we commanded a write for, if any.
    published_online: Option<bool>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: None,
            lifecycle: Lifecycle::Foreground,
            network_online: true,
            published_online: None,
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub const fn network_online(&self) -> bool {
        self.network_online
    }

    #[must_use]
    pub const fn published_online(&self) -> Option<bool> {
        self.published_online
    }

    /// The transition table: Foreground ∧ NetworkUp.
    #[must_use]
    pub const fn desired_online(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Foreground) && self.network_online
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    pub fn clear_identity(&mut self) {
        self.identity = None;
        self.published_online = None;
    }

    /// Identity became available (sign-in or auth listener replay).
    /// Publishes the current derived presence.
    pub fn on_identity_established(&mut self, identity: Identity) -> Vec<PresenceCommand> {
        self.identity = Some(identity);
        self.publish()
    }

    /// About to sign out: issue a final best-effort offline write while the
    /// identity is still known. The caller clears the identity afterwards.
    pub fn on_sign_out(&mut self) -> Vec<PresenceCommand> {
        if self.identity.is_none() {
            return Vec::new();
        }
        self.published_online = Some(false);
        vec![PresenceCommand::WriteOffline]
    }

    pub fn on_foregrounded(&mut self) -> Vec<PresenceCommand> {
        self.lifecycle = Lifecycle::Foreground;
        self.publish()
    }

    pub fn on_backgrounded(&mut self) -> Vec<PresenceCommand> {
        self.lifecycle = Lifecycle::Background;
        self.publish()
    }

    pub fn on_network_changed(&mut self, online: bool) -> Vec<PresenceCommand> {
        self.network_online = online;
        self.publish()
    }

    /// Consults the table and emits the write for the current derived state.
    /// No identity means nothing to publish. The disconnect guard is only
    /// registered after an online write; guarding an offline record is a
    /// no-op on the store side.
    fn publish(&mut self) -> Vec<PresenceCommand> {
        if self.identity.is_none() {
            return Vec::new();
        }

        let online = self.desired_online();
        self.published_online = Some(online);

        if online {
            vec![
                PresenceCommand::WriteOnline,
                PresenceCommand::RegisterDisconnectGuard,
            ]
        } else {
            vec![PresenceCommand::WriteOffline]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    fn identity() -> Identity {
        Identity {
            user_id: UserId::new("u1"),
            email: "u1@example.com".into(),
            display_name: Some("User One".into()),
        }
    }

    fn signed_in_context() -> SessionContext {
        let mut ctx = SessionContext::new();
        ctx.set_identity(identity());
        ctx
    }

    #[test]
    fn derived_online_covers_full_table() {
        let cases = [
            (Lifecycle::Foreground, true, true),
            (Lifecycle::Foreground, false, false),
            (Lifecycle::Background, true, false),
            (Lifecycle::Background, false, false),
        ];

        for (lifecycle, network, expected) in cases {
            let mut ctx = signed_in_context();
            match lifecycle {
                Lifecycle::Foreground => ctx.on_foregrounded(),
                Lifecycle::Background => ctx.on_backgrounded(),
            };
            ctx.on_network_changed(network);

            assert_eq!(
                ctx.desired_online(),
                expected,
                "lifecycle={lifecycle:?} network={network}"
            );
            assert_eq!(ctx.published_online(), Some(expected));
        }
    }

    #[test]
    fn foreground_with_network_writes_online_and_registers_guard() {
        let mut ctx = signed_in_context();
        let commands = ctx.on_foregrounded();
        assert_eq!(
            commands,
            vec![
                PresenceCommand::WriteOnline,
                PresenceCommand::RegisterDisconnectGuard
            ]
        );
    }

    #[test]
    fn foreground_without_network_writes_offline() {
        let mut ctx = signed_in_context();
        ctx.on_network_changed(false);
        let commands = ctx.on_foregrounded();
        assert_eq!(commands, vec![PresenceCommand::WriteOffline]);
    }

    #[test]
    fn background_always_writes_offline() {
        let mut ctx = signed_in_context();
        assert_eq!(ctx.on_backgrounded(), vec![PresenceCommand::WriteOffline]);

        ctx.on_network_changed(false);
        assert_eq!(ctx.on_backgrounded(), vec![PresenceCommand::WriteOffline]);
    }

    #[test]
    fn network_recovery_in_foreground_reregisters_guard() {
        let mut ctx = signed_in_context();
        ctx.on_network_changed(false);
        let commands = ctx.on_network_changed(true);
        assert_eq!(
            commands,
            vec![
                PresenceCommand::WriteOnline,
                PresenceCommand::RegisterDisconnectGuard
            ]
        );
    }

    #[test]
    fn network_loss_in_background_stays_offline() {
        let mut ctx = signed_in_context();
        ctx.on_backgrounded();
        let commands = ctx.on_network_changed(false);
        assert_eq!(commands, vec![PresenceCommand::WriteOffline]);
        assert_eq!(ctx.published_online(), Some(false));
    }

    #[test]
    fn no_identity_means_no_writes() {
        let mut ctx = SessionContext::new();
        assert!(ctx.on_foregrounded().is_empty());
        assert!(ctx.on_backgrounded().is_empty());
        assert!(ctx.on_network_changed(false).is_empty());
        assert!(ctx.on_sign_out().is_empty());
        assert_eq!(ctx.published_online(), None);
    }

    #[test]
    fn sign_out_issues_final_offline_write() {
        let mut ctx = signed_in_context();
        ctx.on_foregrounded();
        let commands = ctx.on_sign_out();
        assert_eq!(commands, vec![PresenceCommand::WriteOffline]);
    }

    #[test]
    fn identity_established_publishes_current_state() {
        let mut ctx = SessionContext::new();
        let commands = ctx.on_identity_established(identity());
        assert_eq!(
            commands,
            vec![
                PresenceCommand::WriteOnline,
                PresenceCommand::RegisterDisconnectGuard
            ]
        );

        let mut ctx = SessionContext::new();
        ctx.on_network_changed(false);
        let commands = ctx.on_identity_established(identity());
        assert_eq!(commands, vec![PresenceCommand::WriteOffline]);
    }
}
