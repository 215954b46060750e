//! Big-endian integer helpers and a bounded cursor over a message buffer.

use crate::errors::DomainError;

pub fn u16_to_bytes(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

pub fn u32_to_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

pub fn bytes_to_u16(bytes: &[u8]) -> Result<u16, DomainError> {
    match bytes {
        [a, b, ..] => Ok(u16::from_be_bytes([*a, *b])),
        _ => Err(DomainError::TruncatedInput {
            needed: 2,
            available: bytes.len(),
        }),
    }
}

pub fn bytes_to_u32(bytes: &[u8]) -> Result<u32, DomainError> {
    match bytes {
        [a, b, c, d, ..] => Ok(u32::from_be_bytes([*a, *b, *c, *d])),
        _ => Err(DomainError::TruncatedInput {
            needed: 4,
            available: bytes.len(),
        }),
    }
}

/// Read cursor over a complete DNS message.
///
/// The whole buffer stays reachable through [`WireReader::buffer`] so that
/// names parsed mid-message can validate pointers against the bytes already
/// consumed.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Starts reading at `pos`. Positions past the end are clamped, so the
    /// first read reports `TruncatedInput`.
    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self {
            buf,
            pos: pos.min(buf.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], DomainError> {
        if self.remaining() < n {
            return Err(DomainError::TruncatedInput {
                needed: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DomainError> {
        Ok(self.read_exact(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DomainError> {
        bytes_to_u16(self.read_exact(2)?)
    }

    pub fn read_u32(&mut self) -> Result<u32, DomainError> {
        bytes_to_u32(self.read_exact(4)?)
    }
}
