//! Push notification capability.
//!
//! Permission prompts, device token registration, and local notification
//! display all happen in the shell. Incoming remote messages do not come
//! through here; the shell forwards them as `PushReceived` events and the
//! app decides what, if anything, to show.

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::event::DeepLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    #[default]
    NotDetermined,
    Granted,
    Denied,
}

/// Notification built by the core for the shell to display locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    /// Where to navigate when the user taps the notification.
    pub deep_link: Option<DeepLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushOperation {
    RequestPermission,
    /// Obtain (or refresh) the device token from the push service.
    RegisterToken,
    ShowNotification(LocalNotification),
}

impl Operation for PushOperation {
    type Output = PushResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushOutput {
    Permission(PermissionState),
    Token(String),
    Displayed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PushError {
    #[error("push permission denied")]
    PermissionDenied,
    #[error("push service unavailable: {message}")]
    Service { message: String },
}

pub type PushResult = Result<PushOutput, PushError>;

pub struct Push<Ev> {
    context: CapabilityContext<PushOperation, Ev>,
}

impl<Ev> Push<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<PushOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn request_permission<F>(&self, make_event: F)
    where
        F: FnOnce(PushResult) -> Ev + Send + 'static,
    {
        self.run(PushOperation::RequestPermission, make_event);
    }

    pub fn register_token<F>(&self, make_event: F)
    where
        F: FnOnce(PushResult) -> Ev + Send + 'static,
    {
        self.run(PushOperation::RegisterToken, make_event);
    }

    pub fn show_notification<F>(&self, notification: LocalNotification, make_event: F)
    where
        F: FnOnce(PushResult) -> Ev + Send + 'static,
    {
        self.run(PushOperation::ShowNotification(notification), make_event);
    }

    fn run<F>(&self, operation: PushOperation, make_event: F)
    where
        F: FnOnce(PushResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}

impl<Ev> crux_core::capability::Capability<Ev> for Push<Ev> {
    type Operation = PushOperation;
    type MappedSelf<MappedEv> = Push<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Push::new(self.context.map_event(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_defaults_to_not_determined() {
        assert_eq!(PermissionState::default(), PermissionState::NotDetermined);
    }

    #[test]
    fn notification_serializes_deep_link() {
        let n = LocalNotification {
            title: "New booking request".into(),
            body: "Tap to review".into(),
            deep_link: None,
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["title"], "New booking request");
        assert!(json["deep_link"].is_null());
    }
}
