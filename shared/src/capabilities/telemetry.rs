//! Fire-and-forget telemetry. The shell forwards these to whatever
//! analytics backend it carries; the core never waits on them.

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryOperation {
    Event {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Error {
        code: String,
        message: String,
    },
}

impl Operation for TelemetryOperation {
    type Output = ();
}

pub struct Telemetry<Ev> {
    context: CapabilityContext<TelemetryOperation, Ev>,
}

impl<Ev> Telemetry<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<TelemetryOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn event(&self, name: impl Into<String>, attributes: Vec<(String, String)>) {
        self.notify(TelemetryOperation::Event {
            name: name.into(),
            attributes,
        });
    }

    pub fn error(&self, code: impl Into<String>, message: impl Into<String>) {
        self.notify(TelemetryOperation::Error {
            code: code.into(),
            message: message.into(),
        });
    }

    fn notify(&self, operation: TelemetryOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}

impl<Ev> crux_core::capability::Capability<Ev> for Telemetry<Ev> {
    type Operation = TelemetryOperation;
    type MappedSelf<MappedEv> = Telemetry<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Telemetry::new(self.context.map_event(f))
    }
}
