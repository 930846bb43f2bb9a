//! Matter TLV (Tag-Length-Value) wire element codec.
//!
//! Implements the compact element format every Matter message is built from:
//! a control byte carrying the tag control and type-length, the tag bytes,
//! and a little-endian primitive payload. Only the untyped element layer
//! lives here; schema-driven encoding belongs to higher layers, which drive
//! container nesting through [`read_element`] / [`write_element`] and the
//! end-of-container marker.

pub mod bytes;
pub mod codec;
pub mod error;
pub mod tag;

pub use bytes::{ByteReader, ByteWriter};
pub use codec::{
    read_element, read_primitive, write_element, write_primitive, TlvContainerKind, TlvElement,
    TlvLength, TlvTypeLength, TlvValue,
};
pub use error::TlvError;
pub use tag::TlvTag;
