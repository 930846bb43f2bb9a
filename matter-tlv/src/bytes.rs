//! Little-endian byte buffer reader and writer.
//!
//! Every multi-byte quantity in a Matter message is little-endian, so the
//! cursor types below are the only place endianness is handled; the TLV codec
//! layers element framing on top of them.

use crate::TlvError;

/// Cursor over a borrowed byte slice.
///
/// Reads advance the cursor only when the whole requested width is available;
/// a short buffer fails with [`TlvError::Truncated`] and leaves the cursor
/// where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], TlvError> {
        // `len` can come straight from a wire length prefix, so the end
        // offset must be computed without overflowing.
        let end = self.pos.checked_add(len).ok_or(TlvError::Truncated)?;
        if end > self.buf.len() {
            return Err(TlvError::Truncated);
        }

        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, TlvError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, TlvError> {
        let bytes = self.take(2)?.try_into().or(Err(TlvError::Truncated))?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_u32(&mut self) -> Result<u32, TlvError> {
        let bytes = self.take(4)?.try_into().or(Err(TlvError::Truncated))?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_u64(&mut self) -> Result<u64, TlvError> {
        let bytes = self.take(8)?.try_into().or(Err(TlvError::Truncated))?;
        Ok(u64::from_le_bytes(bytes))
    }

    pub fn read_i8(&mut self) -> Result<i8, TlvError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, TlvError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_i32(&mut self) -> Result<i32, TlvError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64, TlvError> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32, TlvError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, TlvError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Reads `len` raw bytes, borrowed from the underlying buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], TlvError> {
        self.take(len)
    }

    /// Reads `len` bytes and decodes them as UTF-8.
    pub fn read_utf8(&mut self, len: usize) -> Result<&'a str, TlvError> {
        core::str::from_utf8(self.take(len)?).or(Err(TlvError::BadEncoding))
    }
}

/// Growable little-endian byte buffer, the writing counterpart of
/// [`ByteReader`].
///
/// Signed writers take the signed value and emit its two's-complement bits at
/// the exact declared width.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i8(&mut self, value: i8) {
        self.write_u8(value as u8);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_u64(value as u64);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_utf8(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }
}
