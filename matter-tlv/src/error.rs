//! Error types for the `matter-tlv` crate.
use thiserror::Error;

/// Error type for `matter-tlv`.
#[derive(Error, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum TlvError {
    /// Read past the end of the input buffer
    #[error("Unexpected end of input")]
    Truncated,
    /// String payload is not valid UTF-8
    #[error("Invalid UTF-8 in string payload")]
    BadEncoding,
    /// Tag cannot be represented on the wire
    #[error("Tag cannot be represented on the wire")]
    BadTag,
    /// Implicit-profile tag controls are reserved
    #[error("Implicit-profile tags are not supported")]
    UnsupportedProfile,
    /// Element type does not match what the operation expects
    #[error("Unexpected element type")]
    UnexpectedType,
    /// Value does not fit the declared width
    #[error("Value does not fit the declared width")]
    Overflow,
}
