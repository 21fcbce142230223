//! Non-fatal conditions raised while binding consumers or sending events.
//!
//! Nothing here stops the pipeline. Each diagnostic is logged where it is
//! raised and also handed back to the caller.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpawnDiagnostic {
    /// Binding has no consumer attached; it stays inert.
    NoConsumer { binding: usize },
    /// Consumer could not create an event payload object; it stays inert.
    NoScratch { binding: usize },
    MissingBufferProperty { binding: usize, name: String },
    MissingIntProperty { binding: usize, name: String },
    MissingFloatProperty { binding: usize, name: String },
    MissingVector2Property { binding: usize, name: String },
    MissingEventAttribute { binding: usize, name: String },
    /// Event name is empty; this binding never sends.
    EmptyEventName { binding: usize },
}

impl SpawnDiagnostic {
    /// Index of the binding this concerns.
    pub fn binding(&self) -> usize {
        match self {
            SpawnDiagnostic::NoConsumer { binding }
            | SpawnDiagnostic::NoScratch { binding }
            | SpawnDiagnostic::EmptyEventName { binding }
            | SpawnDiagnostic::MissingBufferProperty { binding, .. }
            | SpawnDiagnostic::MissingIntProperty { binding, .. }
            | SpawnDiagnostic::MissingFloatProperty { binding, .. }
            | SpawnDiagnostic::MissingVector2Property { binding, .. }
            | SpawnDiagnostic::MissingEventAttribute { binding, .. } => *binding,
        }
    }

    /// Log at the level the condition deserves. Float parameters are optional, so those are debug.
    pub fn log(&self) {
        match self {
            SpawnDiagnostic::MissingFloatProperty { .. } => tracing::debug!("{}", self),
            _ => tracing::warn!("{}", self),
        }
    }
}

impl fmt::Display for SpawnDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnDiagnostic::NoConsumer { binding } => {
                write!(f, "binding {binding}: no consumer attached")
            }
            SpawnDiagnostic::NoScratch { binding } => {
                write!(f, "binding {binding}: consumer returned no event attribute")
            }
            SpawnDiagnostic::MissingBufferProperty { binding, name } => {
                write!(f, "binding {binding}: consumer has no buffer property \"{name}\"")
            }
            SpawnDiagnostic::MissingIntProperty { binding, name } => {
                write!(f, "binding {binding}: consumer has no int property \"{name}\"")
            }
            SpawnDiagnostic::MissingFloatProperty { binding, name } => {
                write!(f, "binding {binding}: consumer has no float property \"{name}\"")
            }
            SpawnDiagnostic::MissingVector2Property { binding, name } => {
                write!(f, "binding {binding}: consumer has no vector2 property \"{name}\"")
            }
            SpawnDiagnostic::MissingEventAttribute { binding, name } => {
                write!(f, "binding {binding}: event attribute has no int \"{name}\"")
            }
            SpawnDiagnostic::EmptyEventName { binding } => {
                write!(f, "binding {binding}: event name is empty, events disabled")
            }
        }
    }
}

/// Push a diagnostic after logging it.
pub(crate) fn report(out: &mut Vec<SpawnDiagnostic>, diagnostic: SpawnDiagnostic) {
    diagnostic.log();
    out.push(diagnostic);
}
