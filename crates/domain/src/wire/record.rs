use super::bytes::WireReader;
use super::name::DomainName;
use super::record_type::{RecordType, CLASS_IN};
use crate::errors::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(DomainName),
    Cname(DomainName),
}

impl RData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RData::A(_) => RecordType::A,
            RData::Aaaa(_) => RecordType::AAAA,
            RData::Ns(_) => RecordType::NS,
            RData::Cname(_) => RecordType::CNAME,
        }
    }

    pub fn address(&self) -> Option<IpAddr> {
        match self {
            RData::A(ip) => Some(IpAddr::V4(*ip)),
            RData::Aaaa(ip) => Some(IpAddr::V6(*ip)),
            RData::Ns(_) | RData::Cname(_) => None,
        }
    }

    pub fn name(&self) -> Option<&DomainName> {
        match self {
            RData::Ns(name) | RData::Cname(name) => Some(name),
            RData::A(_) | RData::Aaaa(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub rtype: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub rd_length: u16,
    pub rdata: RData,
    /// Offset of the record's owner name in the message.
    pub offset: usize,
}

impl ResourceRecord {
    pub fn parse(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let offset = reader.position();
        let (name, _) = DomainName::parse(reader)?;
        let type_code = reader.read_u16()?;

        let class = reader.read_u16()?;
        if class != CLASS_IN {
            return Err(DomainError::UnsupportedClass(class));
        }

        let ttl = reader.read_u32()?;
        let rd_length = reader.read_u16()?;
        let rtype =
            RecordType::from_u16(type_code).ok_or(DomainError::UnsupportedType(type_code))?;

        let rdata = match rtype {
            RecordType::A => {
                let octets = read_fixed(reader, rtype, rd_length, 4)?;
                RData::A(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
            }
            RecordType::AAAA => {
                let octets = read_fixed(reader, rtype, rd_length, 16)?;
                let mut raw = [0u8; 16];
                raw.copy_from_slice(octets);
                RData::Aaaa(Ipv6Addr::from(raw))
            }
            RecordType::NS | RecordType::CNAME => {
                let (target, consumed) = DomainName::parse(reader)?;
                if consumed != rd_length as usize {
                    return Err(DomainError::InvalidRdataLength {
                        rtype: rtype.as_str(),
                        expected: rd_length as usize,
                        actual: consumed,
                    });
                }
                if rtype == RecordType::NS {
                    RData::Ns(target)
                } else {
                    RData::Cname(target)
                }
            }
        };

        Ok(Self {
            name,
            rtype,
            class,
            ttl,
            rd_length,
            rdata,
            offset,
        })
    }
}

fn read_fixed<'a>(
    reader: &mut WireReader<'a>,
    rtype: RecordType,
    rd_length: u16,
    expected: usize,
) -> Result<&'a [u8], DomainError> {
    if rd_length as usize != expected {
        return Err(DomainError::InvalidRdataLength {
            rtype: rtype.as_str(),
            expected,
            actual: rd_length as usize,
        });
    }
    reader.read_exact(expected)
}
