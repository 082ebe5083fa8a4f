mod auth;
mod http;
mod kv;
mod presence;
mod push;
mod realtime;
mod telemetry;

pub use self::auth::{Auth, AuthError, AuthOperation, AuthOutput, AuthResult, AuthSession};
pub use self::http::{
    Http, HttpError, HttpMethod, HttpOperation, HttpRequest, HttpResponse, HttpResult,
};
pub use self::kv::{
    decode_flag, encode_flag, KeyNamespace, KeyValue, KeyValueOperation, KeyValueOutput, KvKey,
};
pub use self::presence::{
    Presence, PresenceError, PresenceOperation, PresenceOutput, PresenceResult,
};
pub use self::push::{
    LocalNotification, PermissionState, Push, PushError, PushOperation, PushOutput, PushResult,
};
pub use self::realtime::{
    Realtime, RealtimeError, RealtimeOperation, RealtimeOutput, RealtimeResult,
};
pub use self::telemetry::{Telemetry, TelemetryOperation};

pub use crux_core::render::Render;

use crux_core::capability::ProtoContext;
use crux_core::render::RenderOperation;
use crux_core::Request;
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::event::Event;

pub type AppAuth = Auth<Event>;
pub type AppHttp = Http<Event>;
pub type AppKv = KeyValue<Event>;
pub type AppPresence = Presence<Event>;
pub type AppPush = Push<Event>;
pub type AppRealtime = Realtime<Event>;
pub type AppRender = Render<Event>;
pub type AppTelemetry = Telemetry<Event>;

pub struct Capabilities {
    pub auth: AppAuth,
    pub http: AppHttp,
    pub key_value: AppKv,
    pub presence: AppPresence,
    pub push: AppPush,
    pub realtime: AppRealtime,
    pub render: AppRender,
    pub telemetry: AppTelemetry,
}

// Effect wiring written out by hand; the derive macro cannot name the app
// type when the capability fields are aliases over a fixed Event.
pub enum Effect {
    Auth(Request<AuthOperation>),
    Http(Request<HttpOperation>),
    KeyValue(Request<KeyValueOperation>),
    Presence(Request<PresenceOperation>),
    Push(Request<PushOperation>),
    Realtime(Request<RealtimeOperation>),
    Render(Request<RenderOperation>),
    Telemetry(Request<TelemetryOperation>),
}

#[derive(Serialize, Deserialize)]
pub enum EffectFfi {
    Auth(AuthOperation),
    Http(HttpOperation),
    KeyValue(KeyValueOperation),
    Presence(PresenceOperation),
    Push(PushOperation),
    Realtime(RealtimeOperation),
    Render(RenderOperation),
    Telemetry(TelemetryOperation),
}

impl crux_core::Effect for Effect {
    type Ffi = EffectFfi;

    fn serialize(self) -> (Self::Ffi, crux_core::bridge::ResolveSerialized) {
        match self {
            Effect::Auth(request) => request.serialize(EffectFfi::Auth),
            Effect::Http(request) => request.serialize(EffectFfi::Http),
            Effect::KeyValue(request) => request.serialize(EffectFfi::KeyValue),
            Effect::Presence(request) => request.serialize(EffectFfi::Presence),
            Effect::Push(request) => request.serialize(EffectFfi::Push),
            Effect::Realtime(request) => request.serialize(EffectFfi::Realtime),
            Effect::Render(request) => request.serialize(EffectFfi::Render),
            Effect::Telemetry(request) => request.serialize(EffectFfi::Telemetry),
        }
    }
}

impl crux_core::WithContext<App, Effect> for Capabilities {
    fn new_with_context(context: ProtoContext<Effect, Event>) -> Capabilities {
        Capabilities {
            auth: Auth::new(context.specialize(Effect::Auth)),
            http: Http::new(context.specialize(Effect::Http)),
            key_value: KeyValue::new(context.specialize(Effect::KeyValue)),
            presence: Presence::new(context.specialize(Effect::Presence)),
            push: Push::new(context.specialize(Effect::Push)),
            realtime: Realtime::new(context.specialize(Effect::Realtime)),
            render: Render::new(context.specialize(Effect::Render)),
            telemetry: Telemetry::new(context.specialize(Effect::Telemetry)),
        }
    }
}
