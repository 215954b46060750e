use super::bytes::{u16_to_bytes, WireReader};
use super::name::DomainName;
use crate::errors::DomainError;

/// One entry of the question section. Type and class stay raw: the question
/// section is echoed back by servers, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DomainName,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: &str, qtype: u16, qclass: u16) -> Result<Self, DomainError> {
        Ok(Self {
            name: DomainName::from_text(name)?,
            qtype,
            qclass,
        })
    }

    pub fn parse(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let (name, _) = DomainName::parse(reader)?;
        let qtype = reader.read_u16()?;
        let qclass = reader.read_u16()?;
        Ok(Self {
            name,
            qtype,
            qclass,
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.name.to_wire_bytes());
        out.extend_from_slice(&u16_to_bytes(self.qtype));
        out.extend_from_slice(&u16_to_bytes(self.qclass));
    }
}
