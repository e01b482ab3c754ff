//! INI parser, document model, typed accessors and writer.
//!
//! Three layers:
//! - **Parse**: [`parse`] INI text into an untyped [`Document`] of ordered
//!   sections and string values.
//! - **Access**: read and mutate raw strings on the [`Document`], or go
//!   through [`IniValue`] with [`Document::get`], [`Document::set`] and
//!   [`Document::add`] for typed values.
//! - **Write**: render a [`Document`] back to canonical text with
//!   [`write_document`] or `to_string()`.
//!
//! ```ignore
//! let mut doc = initools::ini::parse("[net]\nport=8080\n")?;
//! let port: u16 = doc.get("net", "port")?;
//! doc.set("net", "port", &(port + 1))?;
//! doc.add_radix("net", "mask", &0xFFu8, 16)?;
//! assert_eq!(doc.to_string(), "[net]\nport=8081\nmask=0xFF\n\n");
//! ```

pub mod dom;
pub mod error;
pub mod parse;
pub mod typed;
pub mod write;

// DOM types
pub use dom::{Document, Section, DEFAULT_SECTION};

// Errors
pub use error::{IniError, Result};

// Parser
pub use parse::{parse, ParseError, ParseErrorKind};

// Typed values
pub use typed::{ConversionError, IniValue, Radix, RadixValue, ValueKind};

// Writer
pub use write::{to_string, write_document};
