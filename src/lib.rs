//! Core building blocks for a Matter (Connected Home over IP) stack: the
//! TLV wire element codec and the JWK-shaped key model.
//!
//! The two member crates are independent of each other; this crate only
//! gathers them under one roof for higher layers (clusters, commissioning,
//! secure channel) to build on.

pub use matter_keys as keys;
pub use matter_tlv as tlv;
