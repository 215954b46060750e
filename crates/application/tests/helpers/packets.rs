#![allow(dead_code)]

/// Hand-assembled response bytes. The ID is patched in by the scripted
/// transport, so builders always start from 0.
pub struct PacketBuilder {
    flags: u16,
    counts: [u16; 4],
    body: Vec<u8>,
}

pub fn name(text: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in text.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

pub fn pointer(offset: u16) -> [u8; 2] {
    let [hi, lo] = offset.to_be_bytes();
    [hi | 0xC0, lo]
}

impl PacketBuilder {
    pub fn response(qname: &str) -> Self {
        let builder = Self {
            flags: 0x8000,
            counts: [0; 4],
            body: Vec::new(),
        };
        builder.question(qname)
    }

    fn question(mut self, qname: &str) -> Self {
        self.counts[0] += 1;
        self.body.extend_from_slice(&name(qname));
        self.body.extend_from_slice(&1u16.to_be_bytes());
        self.body.extend_from_slice(&1u16.to_be_bytes());
        self
    }

    /// Absolute offset the next appended byte will land at.
    pub fn offset(&self) -> u16 {
        (12 + self.body.len()) as u16
    }

    fn record(mut self, section: usize, owner: &[u8], rtype: u16, rdata: &[u8]) -> Self {
        self.counts[section] += 1;
        self.body.extend_from_slice(owner);
        self.body.extend_from_slice(&rtype.to_be_bytes());
        self.body.extend_from_slice(&1u16.to_be_bytes());
        self.body.extend_from_slice(&3600u32.to_be_bytes());
        self.body.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.body.extend_from_slice(rdata);
        self
    }

    pub fn answer(self, owner: &[u8], rtype: u16, rdata: &[u8]) -> Self {
        self.record(1, owner, rtype, rdata)
    }

    pub fn authority(self, owner: &[u8], rtype: u16, rdata: &[u8]) -> Self {
        self.record(2, owner, rtype, rdata)
    }

    pub fn additional(self, owner: &[u8], rtype: u16, rdata: &[u8]) -> Self {
        self.record(3, owner, rtype, rdata)
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.body.len());
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        for count in self.counts {
            out.extend_from_slice(&count.to_be_bytes());
        }
        out.extend_from_slice(&self.body);
        out
    }
}

/// Direct answer: A records owned by the question name, compressed.
pub fn a_response(qname: &str, addresses: &[[u8; 4]]) -> Vec<u8> {
    let mut builder = PacketBuilder::response(qname);
    for ip in addresses {
        builder = builder.answer(&pointer(12), 1, ip);
    }
    builder.build()
}

/// CNAME from the question name to `alias`, followed by A records for the
/// alias (none when `addresses` is empty).
pub fn cname_response(qname: &str, alias: &str, addresses: &[[u8; 4]]) -> Vec<u8> {
    let builder = PacketBuilder::response(qname);
    let alias_offset = builder.offset() + 12;
    let mut builder = builder.answer(&pointer(12), 5, &name(alias));
    for ip in addresses {
        builder = builder.answer(&pointer(alias_offset), 1, ip);
    }
    builder.build()
}

/// Delegation of `zone` to `nameservers`, with a glue A record for every
/// entry that has an address. Glue owners point back at the NS RDATA.
pub fn referral(qname: &str, zone: &str, nameservers: &[(&str, Option<[u8; 4]>)]) -> Vec<u8> {
    let mut builder = PacketBuilder::response(qname);
    let mut rdata_offsets = Vec::new();
    for (ns, _) in nameservers {
        rdata_offsets.push(builder.offset() + name(zone).len() as u16 + 10);
        builder = builder.authority(&name(zone), 2, &name(ns));
    }
    for ((_, glue), offset) in nameservers.iter().zip(rdata_offsets) {
        if let Some(ip) = glue {
            builder = builder.additional(&pointer(offset), 1, ip);
        }
    }
    builder.build()
}
