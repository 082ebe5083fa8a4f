//! App events: user intents, lifecycle signals from the shell, and
//! capability completions. Completion payloads are boxed to keep the enum
//! small.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::capabilities::{
    AuthResult, AuthSession, HttpResult, KeyValueOutput, LocalNotification, PresenceResult,
    PushResult, RealtimeResult,
};
use crate::directory::CategoryFilter;
use crate::model::{BookingId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Lifecycle
    AppStarted,
    AppForegrounded,
    AppBackgrounded,
    NetworkStatusChanged { online: bool },

    // Auth
    /// Identity listener replay from the shell: a restored session or, on
    /// token expiry, `None`.
    IdentityChanged(Option<Box<AuthSession>>),
    SignInRequested { email: String, password: String },
    SignInCompleted(Box<AuthResult>),
    SignOutRequested,
    SignOutCompleted(Box<AuthResult>),
    ProfileFetched(Box<HttpResult>),
    OnboardingFlagRead(KeyValueOutput),
    OnboardingCompleted,
    OnboardingFlagWritten(KeyValueOutput),

    // Presence
    PresenceWriteCompleted(Box<PresenceResult>),
    DisconnectGuardRegistered(Box<PresenceResult>),

    // Chat
    ConversationOpened { counterpart: UserId },
    ConversationClosed,
    MessagesUpdated(Box<RealtimeResult>),
    CounterpartPresenceChanged(Box<RealtimeResult>),
    SendMessageRequested { text: String },
    MessageSendCompleted(Box<RealtimeResult>),

    // Directory
    QueryChanged { query: String },
    CategorySelected { filter: CategoryFilter },
    CustomerLocationUpdated { lat: f64, lon: f64 },

    // Payments
    CardPaymentRequested { booking_id: BookingId, amount_minor: u64 },
    PaymentIntentCreated(Box<HttpResult>),
    PaymentConfirmed(Box<HttpResult>),
    CashPaymentRequested { booking_id: BookingId, amount_minor: u64 },
    CashPaymentRecorded(Box<HttpResult>),
    PaymentDismissed,

    // Push
    PushPermissionRequested,
    PushPermissionUpdated(Box<PushResult>),
    PushTokenReceived(Box<PushResult>),
    PushReceived(Box<RemoteMessage>),
    NotificationDisplayed(Box<PushResult>),
    DeepLinkConsumed,

    // UI
    ErrorDismissed,
}

impl Event {
    /// Stable name for telemetry.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppStarted => "app_started",
            Self::AppForegrounded => "app_foregrounded",
            Self::AppBackgrounded => "app_backgrounded",
            Self::NetworkStatusChanged { .. } => "network_status_changed",
            Self::IdentityChanged(_) => "identity_changed",
            Self::SignInRequested { .. } => "sign_in_requested",
            Self::SignInCompleted(_) => "sign_in_completed",
            Self::SignOutRequested => "sign_out_requested",
            Self::SignOutCompleted(_) => "sign_out_completed",
            Self::ProfileFetched(_) => "profile_fetched",
            Self::OnboardingFlagRead(_) => "onboarding_flag_read",
            Self::OnboardingCompleted => "onboarding_completed",
            Self::OnboardingFlagWritten(_) => "onboarding_flag_written",
            Self::PresenceWriteCompleted(_) => "presence_write_completed",
            Self::DisconnectGuardRegistered(_) => "disconnect_guard_registered",
            Self::ConversationOpened { .. } => "conversation_opened",
            Self::ConversationClosed => "conversation_closed",
            Self::MessagesUpdated(_) => "messages_updated",
            Self::CounterpartPresenceChanged(_) => "counterpart_presence_changed",
            Self::SendMessageRequested { .. } => "send_message_requested",
            Self::MessageSendCompleted(_) => "message_send_completed",
            Self::QueryChanged { .. } => "query_changed",
            Self::CategorySelected { .. } => "category_selected",
            Self::CustomerLocationUpdated { .. } => "customer_location_updated",
            Self::CardPaymentRequested { .. } => "card_payment_requested",
            Self::PaymentIntentCreated(_) => "payment_intent_created",
            Self::PaymentConfirmed(_) => "payment_confirmed",
            Self::CashPaymentRequested { .. } => "cash_payment_requested",
            Self::CashPaymentRecorded(_) => "cash_payment_recorded",
            Self::PaymentDismissed => "payment_dismissed",
            Self::PushPermissionRequested => "push_permission_requested",
            Self::PushPermissionUpdated(_) => "push_permission_updated",
            Self::PushTokenReceived(_) => "push_token_received",
            Self::PushReceived(_) => "push_received",
            Self::NotificationDisplayed(_) => "notification_displayed",
            Self::DeepLinkConsumed => "deep_link_consumed",
            Self::ErrorDismissed => "error_dismissed",
        }
    }
}

/// Classified `type` discriminator of a remote push message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingRequest,
    BookingStatusUpdate,
    Message,
    Other,
}

impl NotificationKind {
    #[must_use]
    pub fn from_type(message_type: Option<&str>) -> Self {
        match message_type {
            Some("booking_request") => Self::BookingRequest,
            Some("booking_status_update") => Self::BookingStatusUpdate,
            Some("message") => Self::Message,
            _ => Self::Other,
        }
    }
}

/// Navigation target attached to a displayed notification. Consumed by the
/// shell when the user taps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "screen")]
pub enum DeepLink {
    BookingRequests {
        booking_id: Option<String>,
    },
    BookingDetails {
        booking_id: Option<String>,
    },
    Chat {
        chat_id: Option<String>,
        sender_id: Option<String>,
    },
}

/// Remote push message as forwarded by the shell: the optional display
/// notification plus the raw data payload, which carries the `type`
/// discriminator and routing ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMessage {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl RemoteMessage {
    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        NotificationKind::from_type(self.data.get("type").map(String::as_str))
    }

    fn field(&self, snake: &str, camel: &str) -> Option<String> {
        self.data
            .get(snake)
            .or_else(|| self.data.get(camel))
            .cloned()
    }

    /// Routing target for the message, `None` for unclassified types.
    #[must_use]
    pub fn deep_link(&self) -> Option<DeepLink> {
        match self.kind() {
            NotificationKind::BookingRequest => Some(DeepLink::BookingRequests {
                booking_id: self.field("booking_id", "bookingId"),
            }),
            NotificationKind::BookingStatusUpdate => Some(DeepLink::BookingDetails {
                booking_id: self.field("booking_id", "bookingId"),
            }),
            NotificationKind::Message => Some(DeepLink::Chat {
                chat_id: self.field("chat_id", "chatId"),
                sender_id: self.field("sender_id", "senderId"),
            }),
            NotificationKind::Other => None,
        }
    }

    /// Local notification to show for this message. Unclassified types get a
    /// generic notification with no routing target.
    #[must_use]
    pub fn to_notification(&self) -> LocalNotification {
        let (default_title, default_body) = match self.kind() {
            NotificationKind::BookingRequest => ("New booking request", "Tap to review"),
            NotificationKind::BookingStatusUpdate => {
                ("Booking update", "Your booking status changed")
            }
            NotificationKind::Message => ("New message", "Tap to open the conversation"),
            NotificationKind::Other => ("Notification", "You have a new notification"),
        };
        LocalNotification {
            title: self.title.clone().unwrap_or_else(|| default_title.into()),
            body: self.body.clone().unwrap_or_else(|| default_body.into()),
            deep_link: self.deep_link(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(message_type: &str, extra: &[(&str, &str)]) -> RemoteMessage {
        let mut data = BTreeMap::new();
        data.insert("type".to_string(), message_type.to_string());
        for (k, v) in extra {
            data.insert((*k).to_string(), (*v).to_string());
        }
        RemoteMessage {
            title: None,
            body: None,
            data,
        }
    }

    #[test]
    fn type_discriminator_maps_to_kind() {
        assert_eq!(
            message("booking_request", &[]).kind(),
            NotificationKind::BookingRequest
        );
        assert_eq!(
            message("booking_status_update", &[]).kind(),
            NotificationKind::BookingStatusUpdate
        );
        assert_eq!(message("message", &[]).kind(), NotificationKind::Message);
        assert_eq!(message("promo_blast", &[]).kind(), NotificationKind::Other);
    }

    #[test]
    fn missing_type_is_other() {
        let msg = RemoteMessage {
            title: None,
            body: None,
            data: BTreeMap::new(),
        };
        assert_eq!(msg.kind(), NotificationKind::Other);
        assert_eq!(msg.deep_link(), None);

        let n = msg.to_notification();
        assert_eq!(n.title, "Notification");
        assert_eq!(n.deep_link, None);
    }

    #[test]
    fn unclassified_type_still_gets_a_notification() {
        let mut msg = message("promo_blast", &[]);
        msg.title = Some("Spring discount".into());
        msg.body = Some("20% off this week".into());

        let n = msg.to_notification();
        assert_eq!(n.title, "Spring discount");
        assert_eq!(n.body, "20% off this week");
        assert_eq!(n.deep_link, None);
    }

    #[test]
    fn booking_request_links_to_booking_screen() {
        let msg = message("booking_request", &[("booking_id", "b7")]);
        assert_eq!(
            msg.deep_link(),
            Some(DeepLink::BookingRequests {
                booking_id: Some("b7".into())
            })
        );
    }

    #[test]
    fn message_links_to_chat_with_sender() {
        let msg = message("message", &[("senderId", "u9")]);
        assert_eq!(
            msg.deep_link(),
            Some(DeepLink::Chat {
                chat_id: None,
                sender_id: Some("u9".into())
            })
        );
    }

    #[test]
    fn message_carries_the_chat_id_when_present() {
        let msg = message("message", &[("chatId", "u1_u9"), ("sender_id", "u9")]);
        assert_eq!(
            msg.deep_link(),
            Some(DeepLink::Chat {
                chat_id: Some("u1_u9".into()),
                sender_id: Some("u9".into())
            })
        );
    }

    #[test]
    fn notification_uses_payload_title_when_present() {
        let mut msg = message("booking_status_update", &[("bookingId", "b1")]);
        msg.title = Some("Booking confirmed".into());

        let n = msg.to_notification();
        assert_eq!(n.title, "Booking confirmed");
        assert_eq!(n.body, "Your booking status changed");
        assert_eq!(
            n.deep_link,
            Some(DeepLink::BookingDetails {
                booking_id: Some("b1".into())
            })
        );
    }

    #[test]
    fn notification_defaults_per_kind() {
        let n = message("message", &[]).to_notification();
        assert_eq!(n.title, "New message");
    }
}
