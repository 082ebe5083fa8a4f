//! Auth capability.
//!
//! Sign-in and sign-out are executed by the shell against the identity
//! provider; the core only tracks the resulting session. Identity-listener
//! replays (silent restores on app start) arrive as `IdentityChanged`
//! events directly from the shell, not through this capability.

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOperation {
    SignIn { email: String, password: String },
    SignOut,
}

impl Operation for AuthOperation {
    type Output = AuthResult;
}

/// Session data handed back by the provider on a successful sign-in.
/// The token is moved into `SecretString` as soon as it reaches the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutput {
    SignedIn(AuthSession),
    SignedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("network failure: {message}")]
    Network { message: String },
    #[error("auth provider error: {message}")]
    Provider { message: String },
}

impl AuthError {
    #[must_use]
    pub fn user_facing_message(&self) -> &str {
        match self {
            Self::InvalidCredentials => "Email or password is incorrect.",
            Self::Network { .. } => "Could not reach the sign-in service. Check your connection.",
            Self::Provider { .. } => "Sign-in failed. Please try again.",
        }
    }
}

pub type AuthResult = Result<AuthOutput, AuthError>;

pub struct Auth<Ev> {
    context: CapabilityContext<AuthOperation, Ev>,
}

impl<Ev> Auth<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<AuthOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn sign_in<F>(&self, email: String, password: String, make_event: F)
    where
        F: FnOnce(AuthResult) -> Ev + Send + 'static,
    {
        self.run(AuthOperation::SignIn { email, password }, make_event);
    }

    pub fn sign_out<F>(&self, make_event: F)
    where
        F: FnOnce(AuthResult) -> Ev + Send + 'static,
    {
        self.run(AuthOperation::SignOut, make_event);
    }

    fn run<F>(&self, operation: AuthOperation, make_event: F)
    where
        F: FnOnce(AuthResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}

impl<Ev> crux_core::capability::Capability<Ev> for Auth<Ev> {
    type Operation = AuthOperation;
    type MappedSelf<MappedEv> = Auth<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Auth::new(self.context.map_event(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_do_not_leak_internals() {
        let err = AuthError::Provider {
            message: "FIREBASE_AUTH/internal-error code=500".into(),
        };
        assert!(!err.user_facing_message().contains("500"));
        assert!(!err.user_facing_message().contains("FIREBASE"));
    }

    #[test]
    fn operations_serialize_for_the_shell() {
        let op = AuthOperation::SignIn {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };
        let json = serde_json::to_string(&op).unwrap();
        let back: AuthOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }
}
