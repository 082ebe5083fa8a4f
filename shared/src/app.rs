//! The app core: one `update` over all events, one `view` projection.
//!
//! Remote stores are reached only through capabilities; every handler here
//! is synchronous state transition plus effect requests. Best-effort
//! completions (presence writes, telemetry, notification display) are
//! logged when they fail and never surfaced to the user.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::capabilities::{
    AuthOutput, Capabilities, HttpResult, KeyNamespace, KeyValueOutput, KvKey, PermissionState,
    PushOutput, RealtimeOutput,
};
use crate::chat::{self, ConversationState, OutgoingMessage};
use crate::directory;
use crate::event::{DeepLink, Event};
use crate::model::{
    AccountRole, AuthPhase, Identity, MessageId, Model, PresenceRecord, ProfileDocument, UserId,
};
use crate::payments::{
    self, CashPaymentRequest, CashPaymentResponse, ConfirmPaymentRequest, ConfirmPaymentResponse,
    CreateIntentRequest, CreateIntentResponse, PaymentFlow,
};
use crate::session::PresenceCommand;
use crate::{
    format_distance, get_current_time_ms, AppError, ErrorKind, ValidatedCoordinate,
    MAX_QUERY_LENGTH, ONBOARDING_FLAG_KEY, PAYMENT_TIMEOUT, PROFILE_FETCH_TIMEOUT,
};

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Self::Event, model: &mut Self::Model, caps: &Self::Capabilities) {
        match event {
            // Lifecycle
            Event::AppStarted => {
                caps.telemetry.event("app_started", Vec::new());
                caps.key_value
                    .read(&onboarding_key().to_string(), Event::OnboardingFlagRead);
                caps.render.render();
            }
            Event::AppForegrounded => {
                let commands = model.session.on_foregrounded();
                self.issue_presence(&commands, model, caps);
                model.update_timestamp();
                caps.render.render();
            }
            Event::AppBackgrounded => {
                let commands = model.session.on_backgrounded();
                self.issue_presence(&commands, model, caps);
                caps.render.render();
            }
            Event::NetworkStatusChanged { online } => {
                let commands = model.session.on_network_changed(online);
                self.issue_presence(&commands, model, caps);
                caps.render.render();
            }

            // Auth
            Event::IdentityChanged(Some(session)) => {
                self.establish_identity(*session, model, caps);
                caps.render.render();
            }
            Event::IdentityChanged(None) => {
                if model.session.identity().is_some() {
                    model.reset_for_sign_out();
                }
                if model.onboarding_complete.is_none() {
                    caps.key_value
                        .read(&onboarding_key().to_string(), Event::OnboardingFlagRead);
                }
                model.auth_phase = resolve_phase(model);
                caps.render.render();
            }
            Event::SignInRequested { email, password } => {
                if model.is_signing_in {
                    debug!("sign-in already in flight, ignoring");
                    return;
                }
                model.is_signing_in = true;
                model.active_error = None;
                caps.auth
                    .sign_in(email, password, |r| Event::SignInCompleted(Box::new(r)));
                caps.render.render();
            }
            Event::SignInCompleted(result) => {
                model.is_signing_in = false;
                match *result {
                    Ok(AuthOutput::SignedIn(session)) => {
                        self.establish_identity(session, model, caps);
                    }
                    Ok(AuthOutput::SignedOut) => {
                        warn!("auth provider answered sign-in with a sign-out");
                    }
                    Err(e) => {
                        caps.telemetry.error("auth", e.to_string());
                        model.set_error(
                            AppError::new(ErrorKind::Auth, e.user_facing_message())
                                .with_internal(e.to_string()),
                        );
                    }
                }
                caps.render.render();
            }
            Event::SignOutRequested => {
                // Final offline write while the identity is still known.
                let commands = model.session.on_sign_out();
                self.issue_presence(&commands, model, caps);
                if let Some(convo) = model.conversation.take() {
                    caps.realtime.unsubscribe(convo.id);
                }
                caps.auth.sign_out(|r| Event::SignOutCompleted(Box::new(r)));
                // Local state clears immediately; the provider call is
                // best-effort. An explicit sign-out always lands on the
                // sign-in screen, regardless of the onboarding flag.
                model.reset_for_sign_out();
                caps.render.render();
            }
            Event::SignOutCompleted(result) => {
                if let Err(e) = *result {
                    warn!(error = %e, "provider sign-out failed");
                    caps.telemetry.error("auth", e.to_string());
                }
            }
            Event::ProfileFetched(result) => {
                model.account_role = resolve_role(*result);
                caps.render.render();
            }
            Event::OnboardingFlagRead(output) => {
                let complete = match output {
                    KeyValueOutput::Read(Some(bytes)) => crate::capabilities::decode_flag(&bytes),
                    KeyValueOutput::Read(None) => false,
                    KeyValueOutput::Write(_) => {
                        warn!("unexpected write ack on onboarding flag read");
                        return;
                    }
                };
                model.onboarding_complete = Some(complete);
                model.auth_phase = resolve_phase(model);
                caps.render.render();
            }
            Event::OnboardingCompleted => {
                model.onboarding_complete = Some(true);
                caps.key_value.write(
                    &onboarding_key().to_string(),
                    crate::capabilities::encode_flag(true),
                    Event::OnboardingFlagWritten,
                );
                model.auth_phase = resolve_phase(model);
                caps.render.render();
            }
            Event::OnboardingFlagWritten(output) => {
                if let KeyValueOutput::Write(false) = output {
                    warn!("onboarding flag write failed; user may see onboarding again");
                    caps.telemetry.error("kv", "onboarding flag write failed");
                }
            }

            // Presence completions: best-effort, log only.
            Event::PresenceWriteCompleted(result) => {
                if let Err(e) = *result {
                    warn!(error = %e, "presence write failed");
                    caps.telemetry.error("presence", e.to_string());
                }
            }
            Event::DisconnectGuardRegistered(result) => {
                if let Err(e) = *result {
                    warn!(error = %e, "disconnect guard registration failed");
                    caps.telemetry.error("presence", e.to_string());
                }
            }

            // Chat
            Event::ConversationOpened { counterpart } => {
                let Some(me) = model.user_id().cloned() else {
                    model.set_error(AppError::new(ErrorKind::Auth, "Sign in to start a chat"));
                    caps.render.render();
                    return;
                };
                let next = ConversationState::open(&me, counterpart.clone());
                match &model.conversation {
                    Some(current) if current.id == next.id => {
                        debug!(conversation = %next.id, "conversation already open");
                        return;
                    }
                    Some(current) => caps.realtime.unsubscribe(current.id.clone()),
                    None => {}
                }
                caps.realtime
                    .subscribe_messages(next.id.clone(), |r| Event::MessagesUpdated(Box::new(r)));
                caps.realtime.subscribe_presence(counterpart, |r| {
                    Event::CounterpartPresenceChanged(Box::new(r))
                });
                model.conversation = Some(next);
                model.update_timestamp();
                caps.render.render();
            }
            Event::ConversationClosed => {
                if let Some(convo) = model.conversation.take() {
                    caps.realtime.unsubscribe(convo.id);
                    caps.render.render();
                }
            }
            Event::MessagesUpdated(result) => match *result {
                Ok(RealtimeOutput::MessageBatch {
                    conversation_id,
                    messages,
                }) => {
                    match &mut model.conversation {
                        Some(convo) if convo.id == conversation_id => {
                            convo.apply_snapshot(messages);
                            model.update_timestamp();
                            caps.render.render();
                        }
                        // Batch for a conversation that is no longer open.
                        _ => debug!(conversation = %conversation_id, "dropping stale batch"),
                    }
                }
                Ok(other) => warn!(?other, "unexpected realtime output on message stream"),
                Err(e) => {
                    caps.telemetry.error("realtime", e.to_string());
                    model.set_error(
                        AppError::new(ErrorKind::RemoteFetch, "Could not load messages")
                            .with_internal(e.to_string()),
                    );
                    caps.render.render();
                }
            },
            Event::CounterpartPresenceChanged(result) => match *result {
                Ok(RealtimeOutput::PresenceChanged { user_id, record }) => {
                    match &mut model.conversation {
                        Some(convo) if convo.counterpart == user_id => {
                            convo.counterpart_presence = Some(record);
                            model.update_timestamp();
                            caps.render.render();
                        }
                        _ => debug!(user = %user_id, "dropping stale presence update"),
                    }
                }
                Ok(other) => warn!(?other, "unexpected realtime output on presence stream"),
                // Header label just goes stale; not worth an error banner.
                Err(e) => warn!(error = %e, "counterpart presence stream failed"),
            },
            Event::SendMessageRequested { text } => {
                let Some(me) = model.user_id().cloned() else {
                    return;
                };
                let Some(convo) = &model.conversation else {
                    warn!("send requested with no open conversation");
                    return;
                };
                match chat::validate_message_text(&text) {
                    Ok(clean) => {
                        let message = OutgoingMessage {
                            id: MessageId::generate(),
                            text: clean,
                            sent_at_ms: get_current_time_ms(),
                        };
                        caps.realtime.push_message(convo.id.clone(), me, message, |r| {
                            Event::MessageSendCompleted(Box::new(r))
                        });
                    }
                    Err(e) => {
                        model.set_error(e);
                        caps.render.render();
                    }
                }
            }
            Event::MessageSendCompleted(result) => {
                if let Err(e) = *result {
                    caps.telemetry.error("realtime", e.to_string());
                    model.set_error(
                        AppError::new(ErrorKind::RemoteWrite, "Message could not be sent")
                            .with_internal(e.to_string()),
                    );
                    caps.render.render();
                }
                // Success needs nothing: the echo arrives in the next
                // snapshot from the message stream.
            }

            // Directory
            Event::QueryChanged { query } => {
                model.directory_query = clip_query(&query);
                caps.render.render();
            }
            Event::CategorySelected { filter } => {
                model.directory_filter = filter;
                caps.render.render();
            }
            Event::CustomerLocationUpdated { lat, lon } => {
                match ValidatedCoordinate::new(lat, lon) {
                    Ok(coord) => model.customer_location = Some(coord),
                    // Keep the last known good location.
                    Err(e) => warn!(error = %e, lat, lon, "ignoring invalid location"),
                }
                caps.render.render();
            }

            // Payments
            Event::CardPaymentRequested {
                booking_id,
                amount_minor,
            } => {
                if model.payment.is_in_flight() {
                    warn!("payment already in flight, ignoring");
                    return;
                }
                let amount = match payments::validate_amount(amount_minor) {
                    Ok(a) => a,
                    Err(e) => {
                        model.set_error(e);
                        caps.render.render();
                        return;
                    }
                };
                let Some(token) = bearer_token(model) else {
                    model.set_error(AppError::new(ErrorKind::Auth, "Sign in to pay"));
                    caps.render.render();
                    return;
                };
                let request = CreateIntentRequest {
                    booking_id: booking_id.clone(),
                    amount_minor: amount,
                    currency: "usd".into(),
                };
                model.payment = PaymentFlow::CreatingIntent {
                    booking_id,
                    amount_minor: amount,
                };
                caps.http
                    .post(payments::CREATE_INTENT_PATH)
                    .bearer(&token)
                    .timeout(PAYMENT_TIMEOUT)
                    .json(&request)
                    .send(|r| Event::PaymentIntentCreated(Box::new(r)));
                caps.render.render();
            }
            Event::PaymentIntentCreated(result) => {
                let PaymentFlow::CreatingIntent { booking_id, .. } = model.payment.clone() else {
                    warn!("intent result with no intent in flight");
                    return;
                };
                match decode_response::<CreateIntentResponse>(*result) {
                    Ok(intent) => {
                        let Some(token) = bearer_token(model) else {
                            self.fail_payment(model, "Payment session expired");
                            caps.render.render();
                            return;
                        };
                        let request = ConfirmPaymentRequest {
                            intent_id: intent.intent_id.clone(),
                            booking_id: booking_id.clone(),
                        };
                        model.payment = PaymentFlow::Confirming {
                            booking_id,
                            intent_id: intent.intent_id,
                        };
                        caps.http
                            .post(payments::CONFIRM_PATH)
                            .bearer(&token)
                            .timeout(PAYMENT_TIMEOUT)
                            .json(&request)
                            .send(|r| Event::PaymentConfirmed(Box::new(r)));
                    }
                    Err(e) => {
                        caps.telemetry.error("payments", e.to_string());
                        self.fail_payment(model, "Could not start the payment");
                    }
                }
                caps.render.render();
            }
            Event::PaymentConfirmed(result) => {
                let PaymentFlow::Confirming { booking_id, .. } = model.payment.clone() else {
                    warn!("confirm result with no confirmation in flight");
                    return;
                };
                match decode_response::<ConfirmPaymentResponse>(*result) {
                    Ok(confirmation) if confirmation.status == "succeeded" => {
                        caps.telemetry.event(
                            "payment_completed",
                            vec![("method".into(), "card".into())],
                        );
                        model.payment = PaymentFlow::Completed { booking_id };
                    }
                    Ok(confirmation) => {
                        caps.telemetry.error(
                            "payments",
                            format!("confirm ended in status {}", confirmation.status),
                        );
                        self.fail_payment(model, "Payment was not completed");
                    }
                    Err(e) => {
                        caps.telemetry.error("payments", e.to_string());
                        self.fail_payment(model, "Payment confirmation failed");
                    }
                }
                caps.render.render();
            }
            Event::CashPaymentRequested {
                booking_id,
                amount_minor,
            } => {
                if model.payment.is_in_flight() {
                    warn!("payment already in flight, ignoring");
                    return;
                }
                let amount = match payments::validate_amount(amount_minor) {
                    Ok(a) => a,
                    Err(e) => {
                        model.set_error(e);
                        caps.render.render();
                        return;
                    }
                };
                let Some(token) = bearer_token(model) else {
                    model.set_error(AppError::new(ErrorKind::Auth, "Sign in to pay"));
                    caps.render.render();
                    return;
                };
                let request = CashPaymentRequest {
                    booking_id: booking_id.clone(),
                    amount_minor: amount,
                };
                model.payment = PaymentFlow::RecordingCash { booking_id };
                caps.http
                    .post(payments::CASH_PATH)
                    .bearer(&token)
                    .timeout(PAYMENT_TIMEOUT)
                    .json(&request)
                    .send(|r| Event::CashPaymentRecorded(Box::new(r)));
                caps.render.render();
            }
            Event::CashPaymentRecorded(result) => {
                let PaymentFlow::RecordingCash { booking_id } = model.payment.clone() else {
                    warn!("cash result with no cash payment in flight");
                    return;
                };
                match decode_response::<CashPaymentResponse>(*result) {
                    Ok(ack) if ack.recorded => {
                        caps.telemetry.event(
                            "payment_completed",
                            vec![("method".into(), "cash".into())],
                        );
                        model.payment = PaymentFlow::Completed { booking_id };
                    }
                    Ok(_) => {
                        self.fail_payment(model, "Cash payment was not recorded");
                    }
                    Err(e) => {
                        caps.telemetry.error("payments", e.to_string());
                        self.fail_payment(model, "Cash payment was not recorded");
                    }
                }
                caps.render.render();
            }
            Event::PaymentDismissed => {
                if !model.payment.is_in_flight() {
                    model.payment = PaymentFlow::Idle;
                    caps.render.render();
                }
            }

            // Push
            Event::PushPermissionRequested => {
                caps.push
                    .request_permission(|r| Event::PushPermissionUpdated(Box::new(r)));
            }
            Event::PushPermissionUpdated(result) => {
                match *result {
                    Ok(PushOutput::Permission(state)) => {
                        model.push_permission = state;
                        if state == PermissionState::Granted {
                            caps.push
                                .register_token(|r| Event::PushTokenReceived(Box::new(r)));
                        }
                    }
                    Ok(other) => warn!(?other, "unexpected push output on permission request"),
                    Err(e) => {
                        warn!(error = %e, "push permission request failed");
                        model.push_permission = PermissionState::Denied;
                    }
                }
                caps.render.render();
            }
            Event::PushTokenReceived(result) => match *result {
                Ok(PushOutput::Token(token)) => {
                    model.push_token = Some(SecretString::new(token));
                    caps.telemetry.event("push_token_registered", Vec::new());
                }
                Ok(other) => warn!(?other, "unexpected push output on token registration"),
                Err(e) => {
                    warn!(error = %e, "push token registration failed");
                    caps.telemetry.error("push", e.to_string());
                }
            },
            Event::PushReceived(message) => {
                let notification = message.to_notification();
                // A notification without a target must not clobber a link
                // the user has not tapped yet.
                if notification.deep_link.is_some() {
                    model.pending_deep_link = notification.deep_link.clone();
                }
                caps.push
                    .show_notification(notification, |r| Event::NotificationDisplayed(Box::new(r)));
                caps.render.render();
            }
            Event::NotificationDisplayed(result) => {
                if let Err(e) = *result {
                    warn!(error = %e, "local notification display failed");
                }
            }
            Event::DeepLinkConsumed => {
                model.pending_deep_link = None;
                caps.render.render();
            }

            // UI
            Event::ErrorDismissed => {
                model.active_error = None;
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        let providers = directory::search(
            &model.providers,
            model.directory_filter,
            &model.directory_query,
        )
        .into_iter()
        .map(|p| ProviderListItem {
            id: p.id.as_str().to_string(),
            name: p.name.clone(),
            category_label: p.category.label().to_string(),
            rating: p.rating,
            description: p.description.clone(),
            phone: p.phone.clone(),
            address: p.address.clone(),
            distance_text: model
                .customer_location
                .and_then(|loc| p.distance_from(loc))
                .map(format_distance),
        })
        .collect();

        let conversation = model.conversation.as_ref().map(|convo| {
            let me = model.user_id();
            ConversationView {
                counterpart_id: convo.counterpart.as_str().to_string(),
                counterpart_online: convo.counterpart_online(),
                presence_label: convo.presence_label(model.view_timestamp_ms),
                messages: convo
                    .messages
                    .iter()
                    .map(|m| MessageView {
                        id: m.id.as_str().to_string(),
                        text: m.text.clone(),
                        mine: me.is_some_and(|id| *id == m.sender_id),
                        sent_at_ms: m.sent_at_ms,
                        sent_at_display: crate::format_time_ago(
                            m.sent_at_ms,
                            model.view_timestamp_ms,
                        ),
                    })
                    .collect(),
            }
        });

        ViewModel {
            auth_phase: model.auth_phase,
            account_role: model.account_role,
            is_signing_in: model.is_signing_in,
            user: model.session.identity().map(|i| UserView {
                user_id: i.user_id.as_str().to_string(),
                email: i.email.clone(),
                display_name: i.display_name.clone(),
            }),
            is_online: model.session.published_online().unwrap_or(false),
            providers,
            directory_query: model.directory_query.clone(),
            directory_filter: model.directory_filter,
            conversation,
            payment_status: model.payment.status_label().to_string(),
            push_permission: model.push_permission,
            pending_deep_link: model.pending_deep_link.clone(),
            error: model.active_error.as_ref().map(|e| ErrorView {
                code: e.code().to_string(),
                message: e.user_facing_message(),
                is_transient: e.severity == crate::ErrorSeverity::Transient,
            }),
        }
    }
}

impl App {
    /// Moves provider session data into the model and kicks off the
    /// post-auth fetches: presence publication, profile document, device
    /// token registration.
    fn establish_identity(
        &self,
        session: crate::capabilities::AuthSession,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let identity = Identity {
            user_id: UserId::new(session.user_id),
            email: session.email,
            display_name: session.display_name,
        };
        let user_id = identity.user_id.clone();
        model.auth_token = Some(SecretString::new(session.token));
        // Role starts at the default and is refined when the profile
        // document arrives.
        model.account_role = AccountRole::Customer;

        let commands = model.session.on_identity_established(identity);
        model.auth_phase = resolve_phase(model);
        self.issue_presence(&commands, model, caps);

        if let Some(token) = bearer_token(model) {
            caps.http
                .get(format!("/v1/profiles/{user_id}"))
                .bearer(&token)
                .timeout(PROFILE_FETCH_TIMEOUT)
                .send(|r| Event::ProfileFetched(Box::new(r)));
        }
        if model.push_permission == PermissionState::Granted {
            caps.push
                .register_token(|r| Event::PushTokenReceived(Box::new(r)));
        }
        caps.telemetry.event("signed_in", Vec::new());
    }

    fn issue_presence(&self, commands: &[PresenceCommand], model: &Model, caps: &Capabilities) {
        let Some(user_id) = model.user_id() else {
            debug_assert!(commands.is_empty());
            return;
        };
        let now = get_current_time_ms();
        for command in commands {
            match command {
                PresenceCommand::WriteOnline => caps.presence.write(
                    user_id.clone(),
                    PresenceRecord::online(now),
                    |r| Event::PresenceWriteCompleted(Box::new(r)),
                ),
                PresenceCommand::WriteOffline => caps.presence.write(
                    user_id.clone(),
                    PresenceRecord::offline(now),
                    |r| Event::PresenceWriteCompleted(Box::new(r)),
                ),
                PresenceCommand::RegisterDisconnectGuard => caps.presence.register_on_disconnect(
                    user_id.clone(),
                    PresenceRecord::offline(now),
                    |r| Event::DisconnectGuardRegistered(Box::new(r)),
                ),
            }
        }
    }

    fn fail_payment(&self, model: &mut Model, message: &str) {
        model.payment = PaymentFlow::Failed {
            message: message.to_string(),
        };
        model.set_error(AppError::new(ErrorKind::RemoteWrite, message));
    }
}

fn onboarding_key() -> KvKey {
    KvKey::new(KeyNamespace::Settings, ONBOARDING_FLAG_KEY)
}

/// Loading until the onboarding flag has been read; the flag then decides
/// between first-run and the normal sign-in screen. A live identity always
/// wins.
fn resolve_phase(model: &Model) -> AuthPhase {
    if model.session.identity().is_some() {
        return AuthPhase::Authenticated;
    }
    match model.onboarding_complete {
        None => AuthPhase::Loading,
        Some(true) => AuthPhase::Unauthenticated,
        Some(false) => AuthPhase::FirstTimeUser,
    }
}

/// Fail-open role resolution: any failure to fetch or parse the profile
/// document leaves the user a customer.
fn resolve_role(result: HttpResult) -> AccountRole {
    let doc: ProfileDocument = match result {
        Ok(response) if response.is_success() => match response.json() {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "profile document unparseable, defaulting role");
                ProfileDocument::default()
            }
        },
        Ok(response) => {
            warn!(status = response.status, "profile fetch returned non-success, defaulting role");
            ProfileDocument::default()
        }
        Err(e) => {
            warn!(error = %e, "profile fetch failed, defaulting role");
            ProfileDocument::default()
        }
    };
    AccountRole::from_user_type(doc.user_type.as_deref())
}

fn bearer_token(model: &Model) -> Option<String> {
    model
        .auth_token
        .as_ref()
        .map(|t| t.expose_secret().to_string())
}

fn clip_query(query: &str) -> String {
    query.chars().take(MAX_QUERY_LENGTH).collect()
}

fn decode_response<T: serde::de::DeserializeOwned>(result: HttpResult) -> Result<T, AppError> {
    match result {
        Ok(response) if response.is_success() => response.json().map_err(|e| {
            AppError::new(ErrorKind::Serialization, "Unexpected backend response")
                .with_internal(e.to_string())
        }),
        Ok(response) => Err(AppError::new(
            ErrorKind::RemoteWrite,
            "The payment service rejected the request",
        )
        .with_internal(format!("status {}", response.status))),
        Err(e) => Err(
            AppError::new(ErrorKind::Network, "Could not reach the payment service")
                .with_internal(e.to_string()),
        ),
    }
}

/// Serializable projection of the model for the shell's UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub auth_phase: AuthPhase,
    pub account_role: AccountRole,
    pub is_signing_in: bool,
    pub user: Option<UserView>,
    pub is_online: bool,
    pub providers: Vec<ProviderListItem>,
    pub directory_query: String,
    pub directory_filter: crate::directory::CategoryFilter,
    pub conversation: Option<ConversationView>,
    pub payment_status: String,
    pub push_permission: PermissionState,
    pub pending_deep_link: Option<DeepLink>,
    pub error: Option<ErrorView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderListItem {
    pub id: String,
    pub name: String,
    pub category_label: String,
    pub rating: f32,
    pub description: String,
    pub phone: String,
    pub address: String,
    /// Human-readable distance from the customer, when a location is known.
    pub distance_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationView {
    pub counterpart_id: String,
    pub counterpart_online: bool,
    pub presence_label: String,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: String,
    pub text: String,
    pub mine: bool,
    pub sent_at_ms: u64,
    pub sent_at_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
    pub code: String,
    pub message: String,
    pub is_transient: bool,
}
