//! INI text writer.
//!
//! Renders a [`Document`] in canonical form: every section as a `[name]`
//! header followed by `key=value` lines in insertion order and one blank line.

use std::fmt;
use std::io::{self, Write};

use super::dom::Document;

/// Write `doc` in canonical form to `out`.
pub fn write_document<W: Write>(doc: &Document, out: &mut W) -> io::Result<()> {
    write!(out, "{doc}")
}

/// Render `doc` in canonical form.
pub fn to_string(doc: &Document) -> String {
    doc.to_string()
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, section) in self.iter() {
            writeln!(f, "[{name}]")?;
            for (key, value) in section.iter() {
                writeln!(f, "{key}={value}")?;
            }
            // Separator after every section, including the last.
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::{parse, DEFAULT_SECTION};

    const EXAMPLE: &str = "[default]\nname=alice\nretries=3\n\n[net]\nhost=localhost\n";

    #[test]
    fn end_to_end_example() {
        let doc = parse(EXAMPLE).unwrap();
        assert_eq!(doc.section_names(), vec!["default", "net"]);
        assert_eq!(doc.get_value("default", "retries").unwrap(), "3");
        assert_eq!(
            to_string(&doc),
            "[default]\nname=alice\nretries=3\n\n[net]\nhost=localhost\n\n"
        );
    }

    #[test]
    fn writer_matches_display() {
        let doc = parse(EXAMPLE).unwrap();
        let mut buf = Vec::new();
        write_document(&doc, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), doc.to_string());
    }

    #[test]
    fn canonical_form_normalizes_spacing_and_comments() {
        let doc = parse("; header comment\nk = v\n[s]\n# note\n  a =  1\n").unwrap();
        assert_eq!(to_string(&doc), "[default]\nk=v\n\n[s]\na=1\n\n");
    }

    #[test]
    fn roundtrip_preserves_order_and_values() {
        let input = "z=last letter\na=first\n[beta]\nb2=2\nb1=1\n[alpha]\n[gamma]\ng=0x0A\n";
        let doc = parse(input).unwrap();
        let reparsed = parse(&to_string(&doc)).unwrap();
        assert_eq!(reparsed, doc);
        assert_eq!(reparsed.section_names(), vec!["default", "beta", "alpha", "gamma"]);
        assert_eq!(reparsed.keys("beta"), vec!["b2", "b1"]);
        assert_eq!(reparsed.keys(DEFAULT_SECTION), vec!["z", "a"]);
    }

    #[test]
    fn bracketed_keys_never_become_headers() {
        assert!(parse("[s]\n  [x]=1\n").is_err());

        let mut doc = parse("[s]\nk=v\n").unwrap();
        assert!(doc.add_key("s", "[x]", "1").is_err());
        let reparsed = parse(&to_string(&doc)).unwrap();
        assert_eq!(reparsed, doc);
        assert_eq!(reparsed.section_names(), vec!["s"]);
    }

    #[test]
    fn crlf_input_roundtrips_to_same_document() {
        let doc = parse("[s]\r\nk=3\r\n[t]\r\nmask=0x0A\r").unwrap();
        let text = to_string(&doc);
        assert_eq!(text, "[s]\nk=3\n\n[t]\nmask=0x0A\n\n");
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn mutations_are_written() {
        let mut doc = parse(EXAMPLE).unwrap();
        doc.set("default", "retries", &5u8).unwrap();
        doc.add_section("extra").unwrap();
        doc.add("extra", "enabled", &true).unwrap();
        assert_eq!(
            to_string(&doc),
            "[default]\nname=alice\nretries=5\n\n[net]\nhost=localhost\n\n[extra]\nenabled=true\n\n"
        );
    }

    #[test]
    fn empty_document_renders_nothing() {
        assert_eq!(to_string(&Document::new()), "");
    }
}
