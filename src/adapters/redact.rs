//! Log redaction: strips record identifiers and obvious PII from log lines.
//!
//! String-level redaction is defense-in-depth. The primary protection is not
//! logging raw patient fields in the first place; this wrapper catches what
//! slips through formatted messages.

use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

struct RedactRule {
    regex: Regex,
    replacement: &'static str,
}

static RULES: OnceLock<Vec<RedactRule>> = OnceLock::new();

fn rules() -> &'static [RedactRule] {
    RULES.get_or_init(|| {
        [
            // Assessment ids
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-ID]",
            ),
            // Medical record numbers
            (r"\bMRN[:\s]?\d{6,10}\b", "[REDACTED-MRN]"),
            // Email addresses
            (
                r"(?i)\b[a-z0-9][a-z0-9._%+-]*@[a-z0-9.-]+\.[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            // National id numbers (xxx-xx-xxxx)
            (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| RedactRule {
            regex: Regex::new(pattern).expect("valid redaction regex"),
            replacement,
        })
        .collect()
    })
}

/// Redact known identifier patterns from a log line.
#[must_use]
pub fn redact(input: &str) -> String {
    let mut out = input.to_string();
    for rule in rules() {
        if rule.regex.is_match(&out) {
            out = rule.regex.replace_all(&out, rule.replacement).to_string();
        }
    }
    out
}

/// Check whether a string contains a pattern the rules would redact.
#[must_use]
pub fn contains_identifier(input: &str) -> bool {
    rules().iter().any(|rule| rule.regex.is_match(input))
}

/// A `tracing_subscriber` writer wrapper that redacts each formatted log
/// line before it reaches the underlying sink.
#[derive(Debug)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct RedactingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> RedactingWriter<W>
where
    W: std::io::Write,
{
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let redacted = redact(&String::from_utf8_lossy(&line));
            self.inner.write_all(redacted.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for RedactingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let rest = redact(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(rest.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_assessment_id() {
        let input = "Assessment 550e8400-e29b-41d4-a716-446655440000 complete";
        let redacted = redact(input);
        assert!(redacted.contains("[REDACTED-ID]"));
        assert!(!redacted.contains("550e8400"));
    }

    #[test]
    fn test_redact_mrn_and_email() {
        assert!(redact("MRN:12345678 found").contains("[REDACTED-MRN]"));
        assert!(redact("contact patient@clinic.org").contains("[REDACTED-EMAIL]"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let input = "Assessment complete: class=1, tier=high";
        assert_eq!(redact(input), input);
        assert!(!contains_identifier(input));
    }

    #[test]
    fn test_writer_redacts_lines() {
        use std::io::Write;

        let mut sink = Vec::new();
        {
            let mut writer = RedactingWriter::new(&mut sink);
            writer
                .write_all(b"id 550e8400-e29b-41d4-a716-446655440000\n")
                .expect("write");
            writer.flush().expect("flush");
        }
        let out = String::from_utf8(sink).expect("utf8");
        assert!(out.contains("[REDACTED-ID]"));
    }
}
