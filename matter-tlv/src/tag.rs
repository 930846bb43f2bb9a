//! TLV tag model.
//!
//! The three most-significant bits of a TLV control byte select the tag
//! encoding; the remaining bits are the element's type-length and are handled
//! by the codec module.

use crate::bytes::{ByteReader, ByteWriter};
use crate::TlvError;

// Tag control values, occupying bits 7..5 of the control byte.
const ANONYMOUS: u8 = 0;
const CONTEXT_SPECIFIC: u8 = 1;
const COMMON_PROFILE_16: u8 = 2;
const COMMON_PROFILE_32: u8 = 3;
const IMPLICIT_PROFILE_16: u8 = 4;
const IMPLICIT_PROFILE_32: u8 = 5;
const FULLY_QUALIFIED_48: u8 = 6;
const FULLY_QUALIFIED_64: u8 = 7;

/// Tag of a TLV element.
///
/// Common-profile and fully-qualified ids are stored at their full width; the
/// 16- versus 32-bit wire form is chosen from the id value on encode and is
/// not part of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvTag {
    /// No identifier. The only legal tag outside a structure.
    Anonymous,
    /// 8-bit id, scoped to the enclosing container.
    Context(u8),
    /// Id under the common profile (profile number 0).
    Common(u32),
    /// Explicit vendor profile and id.
    Profile { profile: u32, id: u32 },
}

impl TlvTag {
    /// Selects the tag encoding for a `(profile, id)` pair.
    ///
    /// A missing profile with an id over 8 bits, or a profile without an id,
    /// has no wire form and fails with [`TlvError::BadTag`].
    pub fn new(profile: Option<u32>, id: Option<u32>) -> Result<Self, TlvError> {
        match (profile, id) {
            (None, None) => Ok(Self::Anonymous),
            (None, Some(id)) => match u8::try_from(id) {
                Ok(id) => Ok(Self::Context(id)),
                Err(_) => Err(TlvError::BadTag),
            },
            (Some(0), Some(id)) => Ok(Self::Common(id)),
            (Some(profile), Some(id)) => Ok(Self::Profile { profile, id }),
            (Some(_), None) => Err(TlvError::BadTag),
        }
    }

    /// Tag control bits, positioned at the top of the control byte.
    pub(crate) fn control_bits(&self) -> u8 {
        let control = match self {
            Self::Anonymous => ANONYMOUS,
            Self::Context(_) => CONTEXT_SPECIFIC,
            Self::Common(id) if *id <= u16::MAX as u32 => COMMON_PROFILE_16,
            Self::Common(_) => COMMON_PROFILE_32,
            Self::Profile { id, .. } if *id <= u16::MAX as u32 => FULLY_QUALIFIED_48,
            Self::Profile { .. } => FULLY_QUALIFIED_64,
        };
        control << 5
    }

    /// Writes the tag bytes that follow the control byte.
    pub(crate) fn write(&self, writer: &mut ByteWriter) {
        match *self {
            Self::Anonymous => {}
            Self::Context(id) => writer.write_u8(id),
            Self::Common(id) => {
                if id <= u16::MAX as u32 {
                    writer.write_u16(id as u16);
                } else {
                    writer.write_u32(id);
                }
            }
            Self::Profile { profile, id } => {
                writer.write_u32(profile);
                if id <= u16::MAX as u32 {
                    writer.write_u16(id as u16);
                } else {
                    writer.write_u32(id);
                }
            }
        }
    }

    /// Reads the tag bytes selected by `control`.
    ///
    /// The implicit-profile controls are reserved; no implicit-profile
    /// dictionary is defined at this layer, so they fail with
    /// [`TlvError::UnsupportedProfile`].
    pub(crate) fn read(control: u8, reader: &mut ByteReader<'_>) -> Result<Self, TlvError> {
        match control >> 5 {
            ANONYMOUS => Ok(Self::Anonymous),
            CONTEXT_SPECIFIC => Ok(Self::Context(reader.read_u8()?)),
            COMMON_PROFILE_16 => Ok(Self::Common(reader.read_u16()? as u32)),
            COMMON_PROFILE_32 => Ok(Self::Common(reader.read_u32()?)),
            IMPLICIT_PROFILE_16 | IMPLICIT_PROFILE_32 => Err(TlvError::UnsupportedProfile),
            FULLY_QUALIFIED_48 => {
                let profile = reader.read_u32()?;
                let id = reader.read_u16()? as u32;
                Ok(Self::Profile { profile, id })
            }
            FULLY_QUALIFIED_64 => {
                let profile = reader.read_u32()?;
                let id = reader.read_u32()?;
                Ok(Self::Profile { profile, id })
            }
            _ => Err(TlvError::BadTag),
        }
    }
}
