//! INI text parser.
//!
//! Parses INI text into a [`Document`] in a single pass, one line at a time.
//! Blank lines and comments are dropped; section headers and key/value lines
//! are stored in the order they appear.

use std::str::FromStr;

use super::dom::{Document, DEFAULT_SECTION};
use super::error::IniError;
use crate::text;

const COMMENT_MARKERS: [char; 2] = ['#', ';'];
const SECTION_OPEN: char = '[';
const SECTION_CLOSE: char = ']';
const KEY_VALUE_DELIM: char = '=';

/// A structural error at a specific line of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// The reason a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unclosed section tag")]
    UnclosedSectionTag,
    #[error("duplicate section [{0}]")]
    DuplicateSection(String),
    #[error("duplicate key {key:?} in section [{section}]")]
    DuplicateKey { section: String, key: String },
    #[error("invalid key/value pair")]
    InvalidKeyValuePair,
    #[error("invalid section name {0:?}")]
    InvalidSectionName(String),
}

/// Parse INI text into a [`Document`].
pub fn parse(input: &str) -> Result<Document, ParseError> {
    Parser::new().parse_document(input)
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

// ---------------------------------------------------------------------------
// Internal line classifier / parser
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Pair { key: &'a str, value: &'a str },
}

struct Parser {
    doc: Document,
    current: String,
}

impl Parser {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            current: DEFAULT_SECTION.to_string(),
        }
    }

    fn parse_document(mut self, input: &str) -> Result<Document, ParseError> {
        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            // `lines` leaves the `\r` of a final CRLF-style line without `\n`.
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            self.parse_line(raw).map_err(|kind| {
                tracing::debug!(line, error = %kind, "INI parse failed");
                ParseError { line, kind }
            })?;
        }
        Ok(self.doc)
    }

    fn parse_line(&mut self, raw: &str) -> Result<(), ParseErrorKind> {
        match classify(raw)? {
            Line::Blank => {}
            Line::Comment => tracing::trace!("skipping comment"),
            Line::Header(name) => self.open_section(name)?,
            Line::Pair { key, value } => self.store_pair(key, value)?,
        }
        Ok(())
    }

    fn open_section(&mut self, name: &str) -> Result<(), ParseErrorKind> {
        self.doc.add_section(name).map_err(|err| match err {
            IniError::DuplicateSection(name) => ParseErrorKind::DuplicateSection(name),
            _ => ParseErrorKind::InvalidSectionName(name.to_string()),
        })?;
        self.current = name.to_string();
        Ok(())
    }

    fn store_pair(&mut self, key: &str, value: &str) -> Result<(), ParseErrorKind> {
        // Key/value lines before any header land in the implicit default section.
        if !self.doc.section_exists(&self.current) {
            self.doc
                .add_section(self.current.as_str())
                .map_err(|_| ParseErrorKind::DuplicateSection(self.current.clone()))?;
        }
        match self.doc.add_key(&self.current, key, value) {
            Ok(()) => {
                tracing::trace!(section = %self.current, key, value, "stored pair");
                Ok(())
            }
            Err(IniError::DuplicateKey { section, key }) => {
                Err(ParseErrorKind::DuplicateKey { section, key })
            }
            Err(_) => Err(ParseErrorKind::InvalidKeyValuePair),
        }
    }
}

fn classify(raw: &str) -> Result<Line<'_>, ParseErrorKind> {
    if text::is_blank(raw) {
        return Ok(Line::Blank);
    }
    if raw.trim_start().starts_with(COMMENT_MARKERS) {
        return Ok(Line::Comment);
    }
    if raw.starts_with(SECTION_OPEN) {
        return text::between(raw, SECTION_OPEN, SECTION_CLOSE)
            .map(Line::Header)
            .ok_or(ParseErrorKind::UnclosedSectionTag);
    }

    let (key, value) =
        text::split_pair(raw, KEY_VALUE_DELIM).ok_or(ParseErrorKind::InvalidKeyValuePair)?;
    let key = text::trim_blanks(key);
    let value = text::trim_blanks(value);
    // An indented `[x]=1` would be written back as a header.
    if !text::is_valid_key(key) || !text::is_valid_value(value) {
        return Err(ParseErrorKind::InvalidKeyValuePair);
    }
    Ok(Line::Pair { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_at(input: &str) -> (usize, ParseErrorKind) {
        let err = parse(input).unwrap_err();
        (err.line, err.kind)
    }

    #[test]
    fn sections_and_pairs() {
        let input = "[default]\nname=alice\nretries=3\n\n[net]\nhost=localhost\n";
        let doc = parse(input).unwrap();
        assert_eq!(doc.section_names(), vec!["default", "net"]);
        assert_eq!(doc.keys("default"), vec!["name", "retries"]);
        assert_eq!(doc.get_value("default", "retries").unwrap(), "3");
        assert_eq!(doc.get_value("net", "host").unwrap(), "localhost");
    }

    #[test]
    fn implicit_default_section() {
        let doc = parse("a=1\nb=2\n[other]\nc=3\n").unwrap();
        assert_eq!(doc.section_names(), vec!["default", "other"]);
        assert_eq!(doc.keys("default"), vec!["a", "b"]);
    }

    #[test]
    fn default_section_is_not_created_without_pairs() {
        let doc = parse("# only a comment\n[net]\nhost=h\n").unwrap();
        assert_eq!(doc.section_names(), vec!["net"]);
    }

    #[test]
    fn comments_and_blank_lines() {
        let input = "# hash comment\n; semicolon comment\n   \n  # indented\n[s]\nk=v\n\t\n";
        let doc = parse(input).unwrap();
        assert_eq!(doc.section_names(), vec!["s"]);
        assert_eq!(doc.keys("s"), vec!["k"]);
    }

    #[test]
    fn key_and_value_trimmed_independently() {
        let doc = parse("[s]\n  spaced key  =  spaced value \t\n").unwrap();
        assert_eq!(doc.keys("s"), vec!["spaced key"]);
        assert_eq!(doc.get_value("s", "spaced key").unwrap(), "spaced value");
    }

    #[test]
    fn header_name_ends_at_first_bracket() {
        let doc = parse("[a]b]\nk=v\n[]\n").unwrap();
        assert_eq!(doc.section_names(), vec!["a", ""]);
    }

    #[test]
    fn empty_section_registered() {
        let doc = parse("[empty]\n[full]\nk=v\n").unwrap();
        assert_eq!(doc.section_names(), vec!["empty", "full"]);
        assert!(doc.section_exists("empty"));
        assert!(doc.keys("empty").is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        let doc = parse("[s]\r\nk=v\r\n").unwrap();
        assert_eq!(doc.get_value("s", "k").unwrap(), "v");
    }

    #[test]
    fn unclosed_section_tag() {
        let (line, kind) = kind_at("[ok]\nk=v\n\n[broken\n");
        assert_eq!(line, 4);
        assert_eq!(kind, ParseErrorKind::UnclosedSectionTag);
    }

    #[test]
    fn duplicate_section_reports_second_line() {
        let (line, kind) = kind_at("[net]\nhost=a\n[other]\n[net]\n");
        assert_eq!(line, 4);
        assert_eq!(kind, ParseErrorKind::DuplicateSection("net".into()));
    }

    #[test]
    fn explicit_default_after_implicit_is_duplicate() {
        let (line, kind) = kind_at("k=v\n[default]\n");
        assert_eq!(line, 2);
        assert_eq!(kind, ParseErrorKind::DuplicateSection("default".into()));
    }

    #[test]
    fn duplicate_key() {
        let (line, kind) = kind_at("[s]\nk=1\nother=2\nk=3\n");
        assert_eq!(line, 4);
        assert_eq!(
            kind,
            ParseErrorKind::DuplicateKey {
                section: "s".into(),
                key: "k".into()
            }
        );
    }

    #[test]
    fn same_key_in_different_sections() {
        let doc = parse("k=0\n[a]\nk=1\n[b]\nk=2\n").unwrap();
        assert_eq!(doc.get_value("default", "k").unwrap(), "0");
        assert_eq!(doc.get_value("a", "k").unwrap(), "1");
        assert_eq!(doc.get_value("b", "k").unwrap(), "2");
    }

    #[test]
    fn invalid_pairs() {
        for bad in [
            "novalue", "a=b=c", "key=", "=value", "a==b", "  =v", "k=   ", "  [x]=1", "\t[x] = 1",
        ] {
            let (line, kind) = kind_at(&format!("[s]\n{bad}\n"));
            assert_eq!(line, 2, "input {bad:?}");
            assert_eq!(kind, ParseErrorKind::InvalidKeyValuePair, "input {bad:?}");
        }
    }

    #[test]
    fn crlf_without_final_newline() {
        let doc = parse("[s]\r\nk=3\r").unwrap();
        assert_eq!(doc.get_value("s", "k").unwrap(), "3");
        assert_eq!(doc.get::<u32>("s", "k").unwrap(), 3);

        let doc = parse("[s]\nk=v\r").unwrap();
        assert_eq!(doc.get_value("s", "k").unwrap(), "v");
        let doc = parse("[last]\r").unwrap();
        assert_eq!(doc.section_names(), vec!["last"]);
    }

    #[test]
    fn stray_carriage_return_in_header() {
        let (line, kind) = kind_at("[a\rb]\n");
        assert_eq!(line, 1);
        assert_eq!(kind, ParseErrorKind::InvalidSectionName("a\rb".into()));
    }

    #[test]
    fn error_display_includes_line() {
        let err = parse("[s\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unclosed section tag");
    }

    #[test]
    fn from_str() {
        let doc: Document = "[s]\nk=v\n".parse().unwrap();
        assert_eq!(doc.get_value("s", "k").unwrap(), "v");
    }

    #[test]
    fn empty_document() {
        let doc = parse("").unwrap();
        assert!(doc.is_empty());
    }
}
