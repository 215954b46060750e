//! Whole-message encode and parse.
//!
//! Queries are always written uncompressed. Parsed messages keep the received
//! buffer, and every name lookup (`record_full_name`, `name_at_offset`, ...)
//! runs against it on demand.

use super::bytes::WireReader;
use super::header::{Header, FLAG_RECURSION_DESIRED, HEADER_LEN};
use super::name::{same_name, DomainName};
use super::question::Question;
use super::record::{RData, ResourceRecord};
use super::record_type::{RecordType, CLASS_IN};
use crate::errors::DomainError;

/// Everything a query can be built from.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub id: u16,
    pub recursion_desired: bool,
    pub questions: Vec<Question>,
}

impl MessageOptions {
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
    raw: Vec<u8>,
}

impl Message {
    /// Encodes a query. QDCOUNT is 16 bits, so questions past `u16::MAX`
    /// are dropped.
    pub fn build(options: MessageOptions) -> Self {
        let flags = if options.recursion_desired {
            FLAG_RECURSION_DESIRED
        } else {
            0
        };
        let mut questions = options.questions;
        questions.truncate(u16::MAX as usize);
        let header = Header {
            id: options.id,
            flags,
            qd_count: u16::try_from(questions.len()).unwrap_or(u16::MAX),
            ..Header::default()
        };

        let mut raw = Vec::with_capacity(HEADER_LEN + 32 * questions.len());
        header.write_to(&mut raw);
        for question in &questions {
            question.write_to(&mut raw);
        }

        Self {
            header,
            questions,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            raw,
        }
    }

    /// Single-question IN query for `name`.
    pub fn query(
        id: u16,
        name: &str,
        rtype: RecordType,
        recursion_desired: bool,
    ) -> Result<Self, DomainError> {
        let question = Question::new(name, rtype.to_u16(), CLASS_IN)?;
        Ok(Self::build(MessageOptions {
            id,
            recursion_desired,
            questions: vec![question],
        }))
    }

    pub fn parse(buffer: &[u8]) -> Result<Self, DomainError> {
        let mut reader = WireReader::new(buffer);
        let header = Header::parse(&mut reader)?;

        let mut questions = Vec::new();
        for _ in 0..header.qd_count {
            questions.push(Question::parse(&mut reader)?);
        }
        let answers = parse_records(&mut reader, header.an_count)?;
        let authority = parse_records(&mut reader, header.ns_count)?;
        let additional = parse_records(&mut reader, header.ar_count)?;

        Ok(Self {
            header,
            questions,
            answers,
            authority,
            additional,
            raw: buffer.to_vec(),
        })
    }

    /// Wire form: the encoding of a built query, or the buffer a response
    /// was parsed from.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }

    /// Locates the label sequence some earlier name has starting exactly at
    /// `offset`, for pointers that land mid-name.
    pub fn name_at_offset(&self, offset: usize) -> Option<DomainName> {
        let question_names = self.questions.iter().map(|q| &q.name);
        let record_names = self
            .records()
            .flat_map(|rr| std::iter::once(&rr.name).chain(rr.rdata.name()));

        question_names
            .chain(record_names)
            .find_map(|name| name.suffix_at(offset))
    }

    pub fn record_full_name(&self, record: &ResourceRecord) -> Result<String, DomainError> {
        record.name.resolve_full_text(&self.raw)
    }

    /// Resolved target of an NS or CNAME record; `None` for address records.
    pub fn record_full_rdata_name(
        &self,
        record: &ResourceRecord,
    ) -> Result<Option<String>, DomainError> {
        record
            .rdata
            .name()
            .map(|name| name.resolve_full_text(&self.raw))
            .transpose()
    }

    /// Answer and additional records owned by `name`.
    pub fn records_of_domain_name(
        &self,
        name: &str,
    ) -> Result<Vec<&ResourceRecord>, DomainError> {
        let mut matches = Vec::new();
        for record in self.answers.iter().chain(self.additional.iter()) {
            if same_name(&self.record_full_name(record)?, name) {
                matches.push(record);
            }
        }
        Ok(matches)
    }

    /// `<name> <ttl> IN <TYPE> <data>`, names fully resolved.
    pub fn render_record(&self, record: &ResourceRecord) -> Result<String, DomainError> {
        let owner = self.record_full_name(record)?;
        let data = match &record.rdata {
            RData::A(ip) => ip.to_string(),
            RData::Aaaa(ip) => ip.to_string(),
            RData::Ns(name) | RData::Cname(name) => name.resolve_full_text(&self.raw)?,
        };
        Ok(format!("{} {} IN {} {}", owner, record.ttl, record.rtype, data))
    }
}

fn parse_records(
    reader: &mut WireReader<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, DomainError> {
    let mut records = Vec::new();
    for _ in 0..count {
        records.push(ResourceRecord::parse(reader)?);
    }
    Ok(records)
}
