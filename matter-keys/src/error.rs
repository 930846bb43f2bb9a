//! Error types for `matter-keys` crate
use base64::DecodeError as Base64Error;
use simple_asn1::{ASN1DecodeErr as ASN1DecodeError, ASN1EncodeErr as ASN1EncodeError};
use thiserror::Error;

/// Error type for `matter-keys`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Key structure version is not the one its format mandates
    #[error("Unexpected key structure version")]
    BadVersion,
    /// AlgorithmIdentifier names an algorithm other than id-ecPublicKey
    #[error("Key algorithm not supported")]
    UnsupportedAlgorithm,
    /// Curve OID or coordinate length matches no supported curve
    #[error("Unknown elliptic curve")]
    UnknownCurve,
    /// Compressed public points are not accepted
    #[error("Compressed points are not supported")]
    UnsupportedCompression,
    /// Malformed key data
    #[error("Malformed key data")]
    BadFormat,
    /// Read through an asserted accessor whose underlying field is absent
    #[error("Missing key field: {0}")]
    MissingField(&'static str),
    /// Private scalar rejected by the curve provider
    #[error("Invalid private scalar")]
    BadScalar,
    /// Error decoding Base64
    #[error(transparent)]
    Base64(#[from] Base64Error),
    /// Error decoding ASN.1 data structure.
    #[error(transparent)]
    ASN1Decode(#[from] ASN1DecodeError),
    /// Error encoding ASN.1 data structure.
    #[error(transparent)]
    ASN1Encode(#[from] ASN1EncodeError),
}
