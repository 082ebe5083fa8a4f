use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capabilities::PermissionState;
use crate::chat::ConversationState;
use crate::directory::{self, CategoryFilter, ServiceProviderRecord};
use crate::event::DeepLink;
use crate::payments::PaymentFlow;
use crate::session::SessionContext;
use crate::{AppError, ValidatedCoordinate};

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(UserId);
typed_id!(ProviderId);
typed_id!(BookingId);
typed_id!(MessageId);

impl MessageId {
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Mirror of the remote identity provider's signed-in user.
/// Set when the shell reports a sign-in, cleared on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    #[default]
    Customer,
    ServiceProvider,
}

impl AccountRole {
    /// Parses the profile document's `userType` field. Absent or unrecognized
    /// values resolve to `Customer`.
    #[must_use]
    pub fn from_user_type(user_type: Option<&str>) -> Self {
        match user_type {
            Some(s) if s.eq_ignore_ascii_case("SERVICE_PROVIDER") => Self::ServiceProvider,
            _ => Self::Customer,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::ServiceProvider => "service_provider",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    #[default]
    Loading,
    FirstTimeUser,
    Unauthenticated,
    Authenticated,
}

impl AuthPhase {
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Remote profile document, keyed by user id in the profile store.
/// Every field is optional: a missing document deserializes from `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileDocument {
    #[serde(default, rename = "userType")]
    pub user_type: Option<String>,
    #[serde(default, rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

/// Presence value stored remotely under the user's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub is_online: bool,
    pub last_seen_ms: u64,
}

impl PresenceRecord {
    #[must_use]
    pub const fn online(now_ms: u64) -> Self {
        Self {
            is_online: true,
            last_seen_ms: now_ms,
        }
    }

    #[must_use]
    pub const fn offline(now_ms: u64) -> Self {
        Self {
            is_online: false,
            last_seen_ms: now_ms,
        }
    }
}

pub struct Model {
    pub session: SessionContext,
    pub auth_phase: AuthPhase,
    pub account_role: AccountRole,
    pub auth_token: Option<SecretString>,
    pub onboarding_complete: Option<bool>,
    pub is_signing_in: bool,

    // Provider directory
    pub providers: Vec<ServiceProviderRecord>,
    pub directory_query: String,
    pub directory_filter: CategoryFilter,
    pub customer_location: Option<ValidatedCoordinate>,

    // Chat
    pub conversation: Option<ConversationState>,

    // Payments
    pub payment: PaymentFlow,

    // Push
    pub push_permission: PermissionState,
    pub push_token: Option<SecretString>,
    pub pending_deep_link: Option<DeepLink>,

    // Generic UI state
    pub active_error: Option<AppError>,
    pub view_timestamp_ms: u64,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: SessionContext::new(),
            auth_phase: AuthPhase::Loading,
            account_role: AccountRole::Customer,
            auth_token: None,
            onboarding_complete: None,
            is_signing_in: false,
            providers: directory::seed_providers(),
            directory_query: String::new(),
            directory_filter: CategoryFilter::All,
            customer_location: None,
            conversation: None,
            payment: PaymentFlow::Idle,
            push_permission: PermissionState::NotDetermined,
            push_token: None,
            pending_deep_link: None,
            active_error: None,
            view_timestamp_ms: crate::get_current_time_ms(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.session.identity().map(|i| &i.user_id)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth_phase.is_authenticated() && self.session.identity().is_some()
    }

    pub fn set_error(&mut self, error: AppError) {
        self.active_error = Some(error);
    }

    pub fn update_timestamp(&mut self) {
        self.view_timestamp_ms = crate::get_current_time_ms();
    }

    /// Clears everything tied to the signed-in identity. Role resets to its
    /// default regardless of what it was before.
    pub fn reset_for_sign_out(&mut self) {
        self.session.clear_identity();
        self.auth_phase = AuthPhase::Unauthenticated;
        self.account_role = AccountRole::Customer;
        self.auth_token = None;
        self.conversation = None;
        self.payment = PaymentFlow::Idle;
        self.pending_deep_link = None;
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_role_parses_service_provider() {
        assert_eq!(
            AccountRole::from_user_type(Some("SERVICE_PROVIDER")),
            AccountRole::ServiceProvider
        );
        assert_eq!(
            AccountRole::from_user_type(Some("service_provider")),
            AccountRole::ServiceProvider
        );
    }

    #[test]
    fn account_role_defaults_to_customer() {
        assert_eq!(AccountRole::from_user_type(None), AccountRole::Customer);
        assert_eq!(
            AccountRole::from_user_type(Some("CUSTOMER")),
            AccountRole::Customer
        );
        assert_eq!(
            AccountRole::from_user_type(Some("something_else")),
            AccountRole::Customer
        );
        assert_eq!(AccountRole::from_user_type(Some("")), AccountRole::Customer);
    }

    #[test]
    fn profile_document_tolerates_missing_fields() {
        let doc: ProfileDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.user_type, None);
        assert_eq!(
            AccountRole::from_user_type(doc.user_type.as_deref()),
            AccountRole::Customer
        );
    }

    #[test]
    fn reset_for_sign_out_clears_role_and_phase() {
        let mut model = Model::new();
        model.auth_phase = AuthPhase::Authenticated;
        model.account_role = AccountRole::ServiceProvider;
        model.session.set_identity(Identity {
            user_id: UserId::new("u1"),
            email: "p@example.com".into(),
            display_name: None,
        });

        model.reset_for_sign_out();

        assert_eq!(model.auth_phase, AuthPhase::Unauthenticated);
        assert_eq!(model.account_role, AccountRole::Customer);
        assert!(model.session.identity().is_none());
        assert!(model.auth_token.is_none());
        assert!(model.conversation.is_none());
    }

    #[test]
    fn typed_ids_are_distinct_types() {
        let user = UserId::new("abc");
        let provider = ProviderId::new("abc");
        // Mixing them is a compile error; this only documents the intent.
        assert_eq!(user.as_str(), provider.as_str());
    }
}
