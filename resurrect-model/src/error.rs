use thiserror::Error;

/// The error taxonomy for the capture/save/load/restore surface.
///
/// Expected failures (missing file, bad JSON, empty state) are reported
/// through the event bus and a falsy return, not by unwinding; this enum
/// exists so callers and tests can match on *which* expected failure
/// occurred, the same way the host's own `SessionTerminated` enum in its
/// mux layer lets callers distinguish pane-exit reasons.
#[derive(Debug, Error)]
pub enum ResurrectError {
    #[error("value is neither workspace-, window-, nor tab-shaped")]
    UnknownStateType,

    #[error("save target has no workspace/title to derive a filename from")]
    NameUnresolved,

    #[error("failed to serialize state: {0}")]
    SerializationFailure(#[from] serde_json::Error),

    #[error("io error at {path}: {source}")]
    IoFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("loaded state is malformed: {0}")]
    InvalidState(String),

    #[error("domain {domain} is not spawnable")]
    NonSpawnableDomain { domain: String },

    #[error("current_state file has an unrecognized state type: {0}")]
    CorruptCurrentState(String),

    #[error("encryption adapter failed: {0}")]
    EncryptionFailure(String),
}

pub type Result<T> = std::result::Result<T, ResurrectError>;
