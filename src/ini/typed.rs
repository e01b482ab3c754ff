//! Typed access to INI values.
//!
//! Values are stored as strings. [`IniValue`] converts them to and from Rust
//! types on every call; nothing is cached. Integer reads pick their radix by
//! looking at the value itself (see [`Radix::detect`]).

use std::fmt;

use super::dom::Document;
use super::error::{IniError, Result};

const HEX_PREFIX: &str = "0x";

/// The shape of a typed value, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    SignedInteger { bits: u32 },
    UnsignedInteger { bits: u32 },
    Boolean,
    Double,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::SignedInteger { bits } => write!(f, "i{bits}"),
            ValueKind::UnsignedInteger { bits } => write!(f, "u{bits}"),
            ValueKind::Boolean => f.write_str("boolean"),
            ValueKind::Double => f.write_str("double"),
            ValueKind::String => f.write_str("string"),
        }
    }
}

/// Numeric base used to read or write integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

impl Radix {
    /// Map a numeric base to a supported radix.
    pub fn from_base(base: u32) -> Result<Self> {
        match base {
            10 => Ok(Radix::Decimal),
            16 => Ok(Radix::Hexadecimal),
            other => Err(IniError::UnsupportedRadix(other)),
        }
    }

    /// Radix of a stored value: hexadecimal if `0x` appears anywhere in it.
    pub fn detect(raw: &str) -> Self {
        if raw.contains(HEX_PREFIX) {
            Radix::Hexadecimal
        } else {
            Radix::Decimal
        }
    }

    pub fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }
}

/// Why a stored string could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("malformed value")]
    Malformed,
    #[error("value out of range")]
    OutOfRange,
}

/// A type that can be stored in an INI value.
pub trait IniValue: Sized {
    const KIND: ValueKind;

    /// Parse a stored string. The whole string must be consumed.
    fn from_ini(raw: &str) -> Result<Self, ConversionError>;

    /// Canonical string form.
    fn to_ini(&self) -> String;
}

/// An unsigned integer that can also be written in hexadecimal.
pub trait RadixValue: IniValue {
    /// Render in `radix`. Hexadecimal output is `0x` followed by two
    /// upper-case digits per byte of the type.
    fn to_ini_radix(&self, radix: Radix) -> String;
}

/// Parse an integer literal into `i128`, honoring a leading sign and, for
/// hexadecimal, an optional `0x` prefix after the sign.
fn parse_integer(raw: &str) -> Result<i128, ConversionError> {
    let radix = Radix::detect(raw);
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits = match radix {
        Radix::Hexadecimal => digits.strip_prefix(HEX_PREFIX).unwrap_or(digits),
        Radix::Decimal => digits,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix.base())) {
        return Err(ConversionError::Malformed);
    }
    // Anything that overflows i128 is out of range for every supported width.
    let magnitude =
        i128::from_str_radix(digits, radix.base()).map_err(|_| ConversionError::OutOfRange)?;
    Ok(if negative { -magnitude } else { magnitude })
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl IniValue for $t {
            const KIND: ValueKind = ValueKind::SignedInteger { bits: <$t>::BITS };

            fn from_ini(raw: &str) -> Result<Self, ConversionError> {
                let wide = parse_integer(raw)?;
                <$t>::try_from(wide).map_err(|_| ConversionError::OutOfRange)
            }

            fn to_ini(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl IniValue for $t {
            const KIND: ValueKind = ValueKind::UnsignedInteger { bits: <$t>::BITS };

            fn from_ini(raw: &str) -> Result<Self, ConversionError> {
                let wide = parse_integer(raw)?;
                <$t>::try_from(wide).map_err(|_| ConversionError::OutOfRange)
            }

            fn to_ini(&self) -> String {
                self.to_string()
            }
        }

        impl RadixValue for $t {
            fn to_ini_radix(&self, radix: Radix) -> String {
                match radix {
                    Radix::Decimal => self.to_string(),
                    Radix::Hexadecimal => format!(
                        "{}{:0width$X}",
                        HEX_PREFIX,
                        self,
                        width = std::mem::size_of::<$t>() * 2
                    ),
                }
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

impl IniValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_ini(raw: &str) -> Result<Self, ConversionError> {
        match raw {
            "true" | "True" | "1" => Ok(true),
            "false" | "False" | "0" => Ok(false),
            _ => Err(ConversionError::Malformed),
        }
    }

    fn to_ini(&self) -> String {
        self.to_string()
    }
}

impl IniValue for f64 {
    const KIND: ValueKind = ValueKind::Double;

    fn from_ini(raw: &str) -> Result<Self, ConversionError> {
        raw.parse().map_err(|_| ConversionError::Malformed)
    }

    fn to_ini(&self) -> String {
        self.to_string()
    }
}

impl IniValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_ini(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_string())
    }

    fn to_ini(&self) -> String {
        self.clone()
    }
}

// ---------------------------------------------------------------------------
// Document accessors
// ---------------------------------------------------------------------------

impl Document {
    /// Read `key` in `section` as `T`.
    ///
    /// ```ignore
    /// let retries: u8 = doc.get("net", "retries")?;
    /// ```
    pub fn get<T: IniValue>(&self, section: &str, key: &str) -> Result<T> {
        let raw = self.get_value(section, key)?;
        T::from_ini(raw).map_err(|err| {
            let kind = T::KIND;
            tracing::debug!(section, key, value = raw, %kind, %err, "typed read failed");
            let (section, key, value) = (section.to_string(), key.to_string(), raw.to_string());
            match err {
                ConversionError::Malformed => IniError::MalformedValue {
                    section,
                    key,
                    value,
                    kind,
                },
                ConversionError::OutOfRange => IniError::OutOfRange {
                    section,
                    key,
                    value,
                    kind,
                },
            }
        })
    }

    /// Overwrite an existing key with the canonical form of `value`.
    pub fn set<T: IniValue>(&mut self, section: &str, key: &str, value: &T) -> Result<()> {
        self.set_value(section, key, value.to_ini())
    }

    /// Overwrite an existing key with an unsigned value rendered in `base` (10 or 16).
    pub fn set_radix<T: RadixValue>(
        &mut self,
        section: &str,
        key: &str,
        value: &T,
        base: u32,
    ) -> Result<()> {
        let radix = Radix::from_base(base)?;
        self.set_value(section, key, value.to_ini_radix(radix))
    }

    /// Add a new key holding the canonical form of `value`.
    pub fn add<T: IniValue>(&mut self, section: &str, key: &str, value: &T) -> Result<()> {
        self.add_key(section, key, value.to_ini())
    }

    /// Add a new key holding an unsigned value rendered in `base` (10 or 16).
    pub fn add_radix<T: RadixValue>(
        &mut self,
        section: &str,
        key: &str,
        value: &T,
        base: u32,
    ) -> Result<()> {
        let radix = Radix::from_base(base)?;
        self.add_key(section, key, value.to_ini_radix(radix))
    }
}
