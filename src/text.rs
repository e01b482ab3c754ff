//! Small string helpers shared by the parser.

/// Characters stripped from both ends of keys and values.
const BLANKS: &[char] = &[' ', '\t'];

/// Split `s` on every `delim`, stopping at the first empty piece.
///
/// `"a=b"` yields `["a", "b"]`, `"a="` yields `["a"]` and `"=b"` yields
/// nothing, so callers can reject missing keys or values by counting pieces.
pub(crate) fn split_fields(s: &str, delim: char) -> Vec<&str> {
    s.split(delim).take_while(|piece| !piece.is_empty()).collect()
}

/// Split a `key<delim>value` line into exactly two non-empty raw pieces.
pub(crate) fn split_pair(s: &str, delim: char) -> Option<(&str, &str)> {
    match split_fields(s, delim).as_slice() {
        [key, value] if s.matches(delim).count() == 1 => Some((*key, *value)),
        _ => None,
    }
}

/// Trim leading and trailing spaces and tabs.
pub(crate) fn trim_blanks(s: &str) -> &str {
    s.trim_matches(BLANKS)
}

/// `true` if the line holds nothing but whitespace.
pub(crate) fn is_blank(s: &str) -> bool {
    s.split_whitespace().next().is_none()
}

/// `true` if `key` survives a write/parse round trip as a key.
///
/// Keys must be non-empty, already trimmed, free of `=` and line breaks, and
/// must not start like a section header or a comment.
pub(crate) fn is_valid_key(key: &str) -> bool {
    is_trimmed_line(key) && !key.contains('=') && !key.starts_with(['[', '#', ';'])
}

/// `true` if `value` survives a write/parse round trip as a value.
pub(crate) fn is_valid_value(value: &str) -> bool {
    is_trimmed_line(value) && !value.contains('=')
}

/// `true` if `name` can be written inside a `[name]` header.
pub(crate) fn is_valid_section_name(name: &str) -> bool {
    !name.contains([']', '\n', '\r'])
}

fn is_trimmed_line(s: &str) -> bool {
    !s.is_empty() && trim_blanks(s) == s && !s.contains(['\n', '\r'])
}

/// Text between `open` at the start of `s` and the first following `close`.
///
/// Returns `None` when `s` does not start with `open` or `close` never appears.
pub(crate) fn between(s: &str, open: char, close: char) -> Option<&str> {
    let rest = s.strip_prefix(open)?;
    let end = rest.find(close)?;
    Some(&rest[..end])
}
