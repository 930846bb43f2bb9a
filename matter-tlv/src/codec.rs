//! TLV element codec.
//!
//! A TLV element is a control byte (tag control in bits 7..5, type-length in
//! bits 4..0), the tag bytes, and a primitive payload. Containers write only
//! their open marker; the caller emits the nested elements and the matching
//! end-of-container, and tracks nesting depth itself. Reading is split the
//! same way: [`read_element`] consumes the header and leaves the cursor
//! before the value so that a schema layer can decide whether to descend,
//! and [`read_primitive`] consumes the payload.

use crate::bytes::{ByteReader, ByteWriter};
use crate::tag::TlvTag;
use crate::TlvError;

/// Payload width of a TLV integer, or width of a string's length prefix.
///
/// The low two bits of the type-length encode this class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvLength {
    One = 0,
    Two = 1,
    Four = 2,
    Eight = 3,
}

impl TlvLength {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Four,
            _ => Self::Eight,
        }
    }
}

/// The kind of container opened by a Structure, Array or List element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvContainerKind {
    Structure,
    Array,
    List,
}

/// Type-length of a TLV element: bits 4..0 of the control byte.
///
/// Booleans carry their value here; their payload is zero-length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvTypeLength {
    Signed(TlvLength),
    Unsigned(TlvLength),
    Boolean(bool),
    Float,
    Double,
    Utf8(TlvLength),
    Bytes(TlvLength),
    Null,
    Structure,
    Array,
    List,
    EndOfContainer,
}

impl TlvTypeLength {
    pub(crate) fn to_bits(self) -> u8 {
        match self {
            Self::Signed(length) => length as u8,
            Self::Unsigned(length) => 0x04 | length as u8,
            Self::Boolean(false) => 0x08,
            Self::Boolean(true) => 0x09,
            Self::Float => 0x0A,
            Self::Double => 0x0B,
            Self::Utf8(length) => 0x0C | length as u8,
            Self::Bytes(length) => 0x10 | length as u8,
            Self::Null => 0x14,
            Self::Structure => 0x15,
            Self::Array => 0x16,
            Self::List => 0x17,
            Self::EndOfContainer => 0x18,
        }
    }

    pub(crate) fn from_bits(bits: u8) -> Result<Self, TlvError> {
        Ok(match bits & 0x1F {
            bits @ 0x00..=0x03 => Self::Signed(TlvLength::from_bits(bits)),
            bits @ 0x04..=0x07 => Self::Unsigned(TlvLength::from_bits(bits)),
            0x08 => Self::Boolean(false),
            0x09 => Self::Boolean(true),
            0x0A => Self::Float,
            0x0B => Self::Double,
            bits @ 0x0C..=0x0F => Self::Utf8(TlvLength::from_bits(bits)),
            bits @ 0x10..=0x13 => Self::Bytes(TlvLength::from_bits(bits)),
            0x14 => Self::Null,
            0x15 => Self::Structure,
            0x16 => Self::Array,
            0x17 => Self::List,
            0x18 => Self::EndOfContainer,
            // 0x19..=0x1F are reserved
            _ => return Err(TlvError::UnexpectedType),
        })
    }
}

/// Decoded primitive payload of a TLV element.
///
/// Containers carry no scalar value; their open and close markers decode to
/// [`TlvValue::ContainerOpen`] and [`TlvValue::ContainerEnd`] so that callers
/// can drive nesting themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TlvValue<'a> {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Utf8(&'a str),
    Bytes(&'a [u8]),
    Boolean(bool),
    Null,
    ContainerOpen(TlvContainerKind),
    ContainerEnd,
}

/// Header of a TLV element: everything before the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvElement {
    pub tag: TlvTag,
    pub type_length: TlvTypeLength,
}

/// Reads an element header and leaves the cursor before the value.
pub fn read_element(reader: &mut ByteReader<'_>) -> Result<TlvElement, TlvError> {
    let control = reader.read_u8()?;
    let type_length = TlvTypeLength::from_bits(control)?;
    let tag = TlvTag::read(control, reader)?;
    Ok(TlvElement { tag, type_length })
}

/// Reads the payload of an element whose header declared `type_length`.
pub fn read_primitive<'a>(
    reader: &mut ByteReader<'a>,
    type_length: TlvTypeLength,
) -> Result<TlvValue<'a>, TlvError> {
    Ok(match type_length {
        TlvTypeLength::Signed(width) => TlvValue::Signed(match width {
            TlvLength::One => reader.read_i8()? as i64,
            TlvLength::Two => reader.read_i16()? as i64,
            TlvLength::Four => reader.read_i32()? as i64,
            TlvLength::Eight => reader.read_i64()?,
        }),
        TlvTypeLength::Unsigned(width) => TlvValue::Unsigned(match width {
            TlvLength::One => reader.read_u8()? as u64,
            TlvLength::Two => reader.read_u16()? as u64,
            TlvLength::Four => reader.read_u32()? as u64,
            TlvLength::Eight => reader.read_u64()?,
        }),
        TlvTypeLength::Boolean(value) => TlvValue::Boolean(value),
        TlvTypeLength::Float => TlvValue::Float(reader.read_f32()? as f64),
        TlvTypeLength::Double => TlvValue::Float(reader.read_f64()?),
        TlvTypeLength::Utf8(length_size) => {
            let len = read_length(reader, length_size)?;
            TlvValue::Utf8(reader.read_utf8(len)?)
        }
        TlvTypeLength::Bytes(length_size) => {
            let len = read_length(reader, length_size)?;
            TlvValue::Bytes(reader.read_bytes(len)?)
        }
        TlvTypeLength::Null => TlvValue::Null,
        TlvTypeLength::Structure => TlvValue::ContainerOpen(TlvContainerKind::Structure),
        TlvTypeLength::Array => TlvValue::ContainerOpen(TlvContainerKind::Array),
        TlvTypeLength::List => TlvValue::ContainerOpen(TlvContainerKind::List),
        TlvTypeLength::EndOfContainer => TlvValue::ContainerEnd,
    })
}

/// Writes an element header: the control byte followed by the tag bytes.
pub fn write_element(writer: &mut ByteWriter, type_length: TlvTypeLength, tag: TlvTag) {
    writer.write_u8(tag.control_bits() | type_length.to_bits());
    tag.write(writer);
}

/// Writes the payload of an element whose header declared `type_length`.
///
/// Integer values exceeding the declared width, and string payloads whose
/// length does not fit the declared length-prefix class, fail with
/// [`TlvError::Overflow`]; a value whose kind does not match the type-length
/// fails with [`TlvError::UnexpectedType`].
pub fn write_primitive(
    writer: &mut ByteWriter,
    type_length: TlvTypeLength,
    value: &TlvValue<'_>,
) -> Result<(), TlvError> {
    match (type_length, value) {
        (TlvTypeLength::Signed(width), TlvValue::Signed(signed)) => {
            write_signed(writer, width, *signed)?;
        }
        (TlvTypeLength::Unsigned(width), TlvValue::Unsigned(unsigned)) => {
            write_unsigned(writer, width, *unsigned)?;
        }
        (TlvTypeLength::Float, TlvValue::Float(float)) => writer.write_f32(*float as f32),
        (TlvTypeLength::Double, TlvValue::Float(float)) => writer.write_f64(*float),
        (TlvTypeLength::Utf8(length_size), TlvValue::Utf8(text)) => {
            write_length(writer, length_size, text.len())?;
            writer.write_utf8(text);
        }
        (TlvTypeLength::Bytes(length_size), TlvValue::Bytes(bytes)) => {
            write_length(writer, length_size, bytes.len())?;
            writer.write_bytes(bytes);
        }
        (TlvTypeLength::Boolean(declared), TlvValue::Boolean(value)) if declared == *value => {}
        (TlvTypeLength::Null, TlvValue::Null) => {}
        (TlvTypeLength::Structure, TlvValue::ContainerOpen(TlvContainerKind::Structure)) => {}
        (TlvTypeLength::Array, TlvValue::ContainerOpen(TlvContainerKind::Array)) => {}
        (TlvTypeLength::List, TlvValue::ContainerOpen(TlvContainerKind::List)) => {}
        (TlvTypeLength::EndOfContainer, TlvValue::ContainerEnd) => {}
        _ => return Err(TlvError::UnexpectedType),
    }
    Ok(())
}

fn read_length(reader: &mut ByteReader<'_>, length_size: TlvLength) -> Result<usize, TlvError> {
    Ok(match length_size {
        TlvLength::One => reader.read_u8()? as usize,
        TlvLength::Two => reader.read_u16()? as usize,
        TlvLength::Four => reader.read_u32()? as usize,
        TlvLength::Eight => usize::try_from(reader.read_u64()?).or(Err(TlvError::Truncated))?,
    })
}

fn write_length(writer: &mut ByteWriter, length_size: TlvLength, len: usize) -> Result<(), TlvError> {
    match length_size {
        TlvLength::One => writer.write_u8(u8::try_from(len).or(Err(TlvError::Overflow))?),
        TlvLength::Two => writer.write_u16(u16::try_from(len).or(Err(TlvError::Overflow))?),
        TlvLength::Four => writer.write_u32(u32::try_from(len).or(Err(TlvError::Overflow))?),
        TlvLength::Eight => writer.write_u64(len as u64),
    }
    Ok(())
}

fn write_signed(writer: &mut ByteWriter, width: TlvLength, value: i64) -> Result<(), TlvError> {
    match width {
        TlvLength::One => writer.write_i8(i8::try_from(value).or(Err(TlvError::Overflow))?),
        TlvLength::Two => writer.write_i16(i16::try_from(value).or(Err(TlvError::Overflow))?),
        TlvLength::Four => writer.write_i32(i32::try_from(value).or(Err(TlvError::Overflow))?),
        TlvLength::Eight => writer.write_i64(value),
    }
    Ok(())
}

fn write_unsigned(writer: &mut ByteWriter, width: TlvLength, value: u64) -> Result<(), TlvError> {
    match width {
        TlvLength::One => writer.write_u8(u8::try_from(value).or(Err(TlvError::Overflow))?),
        TlvLength::Two => writer.write_u16(u16::try_from(value).or(Err(TlvError::Overflow))?),
        TlvLength::Four => writer.write_u32(u32::try_from(value).or(Err(TlvError::Overflow))?),
        TlvLength::Eight => writer.write_u64(value),
    }
    Ok(())
}
