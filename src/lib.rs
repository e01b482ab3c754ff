pub mod file;
pub mod ini;

mod text;

pub use file::IniFile;
pub use ini::{
    parse, Document, IniError, IniValue, ParseError, ParseErrorKind, Radix, RadixValue, Section,
    ValueKind, DEFAULT_SECTION,
};
