use iterdns_domain::{DomainError, Message, RecordType, ResourceRecord};

/// dig-style dump of a response: header line, then every section.
pub fn render_message(message: &Message) -> Result<String, DomainError> {
    let header = &message.header;
    let mut out = format!(
        ";; id {}, flags 0x{:04x}, rcode {}, qd {}, an {}, ns {}, ar {}\n",
        header.id,
        header.flags,
        header.response_code(),
        header.qd_count,
        header.an_count,
        header.ns_count,
        header.ar_count
    );

    out.push_str("\n;; QUESTION SECTION:\n");
    for question in &message.questions {
        let qname = question.name.resolve_full_text(message.as_bytes())?;
        let qtype = RecordType::from_u16(question.qtype)
            .map(|rt| rt.to_string())
            .unwrap_or_else(|| format!("TYPE{}", question.qtype));
        out.push_str(&format!("{} IN {}\n", qname, qtype));
    }

    render_section(&mut out, "ANSWER", message, &message.answers)?;
    render_section(&mut out, "AUTHORITY", message, &message.authority)?;
    render_section(&mut out, "ADDITIONAL", message, &message.additional)?;
    Ok(out)
}

fn render_section(
    out: &mut String,
    title: &str,
    message: &Message,
    records: &[ResourceRecord],
) -> Result<(), DomainError> {
    if records.is_empty() {
        return Ok(());
    }
    out.push_str(&format!("\n;; {} SECTION:\n", title));
    for record in records {
        out.push_str(&message.render_record(record)?);
        out.push('\n');
    }
    Ok(())
}
