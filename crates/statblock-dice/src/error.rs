//! Error types for dice notation handling.

/// Error produced when dice notation cannot be accepted.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// Input does not have the `[count]d<sides>[(+|-)modifier]` shape.
    #[error("invalid dice notation format: {0:?}")]
    InvalidFormat(String),

    /// Die type is well formed but not a supported die (e.g. `d3`).
    #[error("invalid dice type: {0} (must be d4, d6, d8, d10, d12, d20, or d100)")]
    InvalidDiceType(String),

    /// The rollable JSON payload could not be serialized.
    #[error("failed to serialize roll payload")]
    Payload(#[from] serde_json::Error),
}
