use super::bytes::{u16_to_bytes, WireReader};
use crate::errors::DomainError;

pub const HEADER_LEN: usize = 12;

pub const FLAG_RESPONSE: u16 = 0x8000;
pub const FLAG_AUTHORITATIVE: u16 = 0x0400;
pub const FLAG_TRUNCATED: u16 = 0x0200;
pub const FLAG_RECURSION_DESIRED: u16 = 0x0100;
const RCODE_MASK: u16 = 0x000F;

/// The fixed 12-byte message header (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    pub fn parse(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        Ok(Self {
            id: reader.read_u16()?,
            flags: reader.read_u16()?,
            qd_count: reader.read_u16()?,
            an_count: reader.read_u16()?,
            ns_count: reader.read_u16()?,
            ar_count: reader.read_u16()?,
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        for field in [
            self.id,
            self.flags,
            self.qd_count,
            self.an_count,
            self.ns_count,
            self.ar_count,
        ] {
            out.extend_from_slice(&u16_to_bytes(field));
        }
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    pub fn authoritative(&self) -> bool {
        self.flags & FLAG_AUTHORITATIVE != 0
    }

    /// Exposed for display only; truncated responses are not retried.
    pub fn truncated(&self) -> bool {
        self.flags & FLAG_TRUNCATED != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RECURSION_DESIRED != 0
    }

    pub fn response_code(&self) -> u8 {
        (self.flags & RCODE_MASK) as u8
    }
}
