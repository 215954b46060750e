#![allow(dead_code)]

/// Assembles raw response bytes by hand so tests control every offset,
/// compression pointers included.
pub struct PacketBuilder {
    id: u16,
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

/// Labels followed by a pointer to `offset` instead of a zero byte.
pub fn name_with_pointer(prefix: &str, offset: u16) -> Vec<u8> {
    let mut out = Vec::new();
    for label in prefix.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.extend_from_slice(&pointer(offset));
    out
}

pub fn pointer(offset: u16) -> [u8; 2] {
    let [hi, lo] = offset.to_be_bytes();
    [hi | 0xC0, lo]
}

impl PacketBuilder {
    pub fn response(id: u16) -> Self {
        Self {
            id,
            flags: 0x8000,
            counts: [0; 4],
            body: Vec::new(),
        }
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Absolute offset the next appended byte will land at.
    pub fn offset(&self) -> u16 {
        (12 + self.body.len()) as u16
    }

    pub fn question(mut self, qname: &[u8], qtype: u16) -> Self {
        self.counts[0] += 1;
        self.body.extend_from_slice(qname);
        self.body.extend_from_slice(&qtype.to_be_bytes());
        self.body.extend_from_slice(&1u16.to_be_bytes());
        self
    }

    fn record(
        mut self,
        section: usize,
        owner: &[u8],
        rtype: u16,
        class: u16,
        rdata: &[u8],
    ) -> Self {
        self.counts[section] += 1;
        self.body.extend_from_slice(owner);
        self.body.extend_from_slice(&rtype.to_be_bytes());
        self.body.extend_from_slice(&class.to_be_bytes());
        self.body.extend_from_slice(&300u32.to_be_bytes());
        self.body.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.body.extend_from_slice(rdata);
        self
    }

    pub fn answer(self, owner: &[u8], rtype: u16, rdata: &[u8]) -> Self {
        self.record(1, owner, rtype, 1, rdata)
    }

    pub fn answer_with_class(self, owner: &[u8], rtype: u16, class: u16, rdata: &[u8]) -> Self {
        self.record(1, owner, rtype, class, rdata)
    }

    pub fn authority(self, owner: &[u8], rtype: u16, rdata: &[u8]) -> Self {
        self.record(2, owner, rtype, 1, rdata)
    }

    pub fn additional(self, owner: &[u8], rtype: u16, rdata: &[u8]) -> Self {
        self.record(3, owner, rtype, 1, rdata)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.body.len());
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        for count in self.counts {
            out.extend_from_slice(&count.to_be_bytes());
        }
        out.extend_from_slice(&self.body);
        out
    }
}
