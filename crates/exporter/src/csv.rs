//! Minimal CSV record writing.
//!
//! The session schemas are flat and known, so records are written directly;
//! fields containing separators, quotes or newlines are quoted per RFC 4180.

use std::borrow::Cow;
use std::io::{self, Write};

/// Write one CSV record followed by a newline
pub fn write_record<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> io::Result<()> {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(escape(field.as_ref()).as_bytes())?;
    }
    writer.write_all(b"\n")
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields_unquoted() {
        let mut buf = Vec::new();
        write_record(&mut buf, &["a", "1.5", ""]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,1.5,\n");
    }

    #[test]
    fn test_separator_and_quote_escaped() {
        let mut buf = Vec::new();
        write_record(&mut buf, &["with, comma", "say \"hi\""]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\"with, comma\",\"say \"\"hi\"\"\"\n"
        );
    }
}
