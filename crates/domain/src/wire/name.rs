//! Domain names as written on the wire (RFC 1035 §3.1, §4.1.4).
//!
//! A parsed name keeps exactly the labels found at its own location. A
//! trailing compression pointer is not inlined: callers resolve it later
//! against the message buffer, passed in explicitly.

use super::bytes::WireReader;
use crate::errors::DomainError;
use std::collections::HashSet;
use std::fmt;

pub const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0xC0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Text(Vec<u8>),
    Zero,
    /// 14-bit offset into the enclosing message.
    Pointer(u16),
}

impl Label {
    pub fn wire_len(&self) -> usize {
        match self {
            Label::Text(text) => 1 + text.len(),
            Label::Zero => 1,
            Label::Pointer(_) => 2,
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Label::Text(text) => {
                out.push(text.len() as u8);
                out.extend_from_slice(text);
            }
            Label::Zero => out.push(0),
            Label::Pointer(offset) => {
                let [hi, lo] = offset.to_be_bytes();
                out.push(hi | POINTER_MASK);
                out.push(lo);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    labels: Vec<Label>,
    offset: Option<usize>,
}

impl DomainName {
    /// The root name: a single zero label.
    pub fn root() -> Self {
        Self {
            labels: vec![Label::Zero],
            offset: None,
        }
    }

    /// Builds a name from dotted text. A single trailing dot is accepted;
    /// `""` and `"."` both give the root name.
    pub fn from_text(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        let mut labels = Vec::new();

        if !trimmed.is_empty() {
            for segment in trimmed.split('.') {
                if segment.is_empty() {
                    return Err(DomainError::EmptyLabel(name.to_string()));
                }
                if segment.len() > MAX_LABEL_LEN {
                    return Err(DomainError::LabelTooLong {
                        label: segment.to_string(),
                        len: segment.len(),
                    });
                }
                labels.push(Label::Text(segment.as_bytes().to_vec()));
            }
        }
        labels.push(Label::Zero);

        Ok(Self {
            labels,
            offset: None,
        })
    }

    /// Reads one name at the reader's position. Stops after a zero label or a
    /// pointer and returns the name with the number of bytes consumed.
    pub fn parse(reader: &mut WireReader<'_>) -> Result<(Self, usize), DomainError> {
        let start = reader.position();
        let mut labels = Vec::new();

        loop {
            let label_pos = reader.position();
            let len = reader.read_u8()?;

            match len {
                0 => {
                    labels.push(Label::Zero);
                    break;
                }
                b if b & POINTER_MASK == POINTER_MASK => {
                    let low = reader.read_u8()?;
                    let offset = u16::from_be_bytes([b & !POINTER_MASK, low]);
                    // Compression only ever refers to data written earlier.
                    if offset as usize >= label_pos {
                        return Err(DomainError::InvalidPointer {
                            offset: offset as usize,
                            position: label_pos,
                        });
                    }
                    labels.push(Label::Pointer(offset));
                    break;
                }
                b if b & POINTER_MASK != 0 => return Err(DomainError::ReservedLabelType(b)),
                b => {
                    let text = reader.read_exact(b as usize)?;
                    labels.push(Label::Text(text.to_vec()));
                }
            }
        }

        let consumed = reader.position() - start;
        Ok((
            Self {
                labels,
                offset: Some(start),
            },
            consumed,
        ))
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Offset this name began at in the buffer it was parsed from.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn is_root(&self) -> bool {
        matches!(self.labels.as_slice(), [Label::Zero])
    }

    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(Label::wire_len).sum()
    }

    pub fn to_wire_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        for label in &self.labels {
            label.write_to(&mut out);
        }
        out
    }

    /// Returns the label suffix whose first label starts exactly at `target`,
    /// as a standalone name. Only names with a known offset can answer.
    pub fn suffix_at(&self, target: usize) -> Option<DomainName> {
        let mut pos = self.offset?;
        for (i, label) in self.labels.iter().enumerate() {
            if pos == target {
                return Some(DomainName {
                    labels: self.labels[i..].to_vec(),
                    offset: Some(target),
                });
            }
            if pos > target {
                return None;
            }
            pos += label.wire_len();
        }
        None
    }

    /// Dot-joined text with every pointer followed through `buffer`.
    ///
    /// Each pointer target may be visited once, which also caps the number of
    /// hops at the buffer length.
    pub fn resolve_full_text(&self, buffer: &[u8]) -> Result<String, DomainError> {
        let mut parts: Vec<String> = Vec::new();

        for label in &self.labels {
            match label {
                Label::Text(text) => parts.push(String::from_utf8_lossy(text).into_owned()),
                Label::Zero => break,
                Label::Pointer(offset) => {
                    follow_pointers(buffer, *offset as usize, &mut parts)?;
                    break;
                }
            }
        }

        if parts.is_empty() {
            return Ok(".".to_string());
        }
        Ok(parts.join("."))
    }
}

fn follow_pointers(
    buffer: &[u8],
    mut offset: usize,
    parts: &mut Vec<String>,
) -> Result<(), DomainError> {
    let mut visited = HashSet::new();

    loop {
        if offset >= buffer.len() {
            return Err(DomainError::PointerOutOfRange {
                offset,
                len: buffer.len(),
            });
        }
        if !visited.insert(offset) {
            return Err(DomainError::CompressionCycle { offset });
        }

        let mut reader = WireReader::at(buffer, offset);
        loop {
            let len = reader.read_u8()?;
            match len {
                0 => return Ok(()),
                b if b & POINTER_MASK == POINTER_MASK => {
                    let low = reader.read_u8()?;
                    offset = u16::from_be_bytes([b & !POINTER_MASK, low]) as usize;
                    break;
                }
                b if b & POINTER_MASK != 0 => return Err(DomainError::ReservedLabelType(b)),
                b => {
                    let text = reader.read_exact(b as usize)?;
                    parts.push(String::from_utf8_lossy(text).into_owned());
                }
            }
        }
    }
}

/// Compares two textual names the way DNS does: ASCII case-insensitive,
/// ignoring one trailing dot.
pub fn same_name(a: &str, b: &str) -> bool {
    let a = a.strip_suffix('.').unwrap_or(a);
    let b = b.strip_suffix('.').unwrap_or(b);
    a.eq_ignore_ascii_case(b)
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        let mut first = true;
        for label in &self.labels {
            let rendered = match label {
                Label::Text(text) => String::from_utf8_lossy(text).into_owned(),
                Label::Pointer(offset) => format!("@{}", offset),
                Label::Zero => break,
            };
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", rendered)?;
            first = false;
        }
        Ok(())
    }
}
