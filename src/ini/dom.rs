//! INI Document Object Model.
//!
//! Sections and keys are kept in hash maps for lookup, with parallel
//! vectors recording insertion order for enumeration and serialization.

use std::collections::HashMap;

use super::error::{IniError, Result};
use crate::text;

/// Section used by callers that have no explicit section, and by the parser
/// for key/value lines that appear before the first `[section]` header.
pub const DEFAULT_SECTION: &str = "default";

/// A parsed INI document: an ordered collection of named sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    section_order: Vec<String>,
    sections: HashMap<String, Section>,
}

/// A named group of key/value pairs. Values are stored as raw strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    key_order: Vec<String>,
    values: HashMap<String, String>,
}

impl Section {
    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.key_order.iter().map(String::as_str)
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.key_order
            .iter()
            .map(move |k| (k.as_str(), self.values[k].as_str()))
    }

    pub fn len(&self) -> usize {
        self.key_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_order.is_empty()
    }

    /// Insert a key that is known to be absent.
    fn insert_new(&mut self, key: String, value: String) {
        debug_assert!(!self.values.contains_key(&key));
        self.key_order.push(key.clone());
        self.values.insert(key, value);
    }
}

impl Document {
    /// An empty document with no sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.section_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.section_order.is_empty()
    }

    pub fn section_exists(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// `true` if `section` exists and contains `key`. Never fails.
    pub fn key_exists(&self, section: &str, key: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|s| s.contains_key(key))
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Section names in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.section_order.iter().map(String::as_str)
    }

    /// Owned copy of the section names, in insertion order.
    pub fn section_names(&self) -> Vec<String> {
        self.section_order.clone()
    }

    /// Key names of `section` in insertion order; empty if the section is absent.
    pub fn keys(&self, section: &str) -> Vec<String> {
        self.sections
            .get(section)
            .map(|s| s.key_order.clone())
            .unwrap_or_default()
    }

    /// Raw string value of `key` in `section`.
    pub fn get_value(&self, section: &str, key: &str) -> Result<&str> {
        let sec = self
            .sections
            .get(section)
            .ok_or_else(|| IniError::SectionNotFound(section.to_string()))?;
        sec.get(key).ok_or_else(|| IniError::NotFound {
            section: section.to_string(),
            key: key.to_string(),
        })
    }

    /// Overwrite the value of an existing key. Never creates keys.
    ///
    /// The value must be writable: non-empty, without surrounding blanks,
    /// `=` or line breaks. Otherwise `InvalidKeyValuePair` is returned and the
    /// stored value is left alone.
    pub fn set_value(&mut self, section: &str, key: &str, value: impl Into<String>) -> Result<()> {
        let sec = self
            .sections
            .get_mut(section)
            .ok_or_else(|| IniError::SectionNotFound(section.to_string()))?;
        let slot = sec.values.get_mut(key).ok_or_else(|| IniError::NotFound {
            section: section.to_string(),
            key: key.to_string(),
        })?;
        let value = value.into();
        if !text::is_valid_value(&value) {
            return Err(IniError::InvalidKeyValuePair {
                section: section.to_string(),
                key: key.to_string(),
                value,
            });
        }
        if *slot != value {
            *slot = value;
        }
        Ok(())
    }

    /// Add a new key to an existing section.
    ///
    /// Both key and value must be writable. A key may not be empty, carry
    /// surrounding blanks, contain `=` or line breaks, or start with `[`,
    /// `#` or `;`; values follow the same rules as [`Document::set_value`]
    /// minus the prefix restriction.
    pub fn add_key(
        &mut self,
        section: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let sec = self
            .sections
            .get_mut(section)
            .ok_or_else(|| IniError::SectionNotFound(section.to_string()))?;
        let (key, value) = (key.into(), value.into());
        if !text::is_valid_key(&key) || !text::is_valid_value(&value) {
            return Err(IniError::InvalidKeyValuePair {
                section: section.to_string(),
                key,
                value,
            });
        }
        if sec.contains_key(&key) {
            return Err(IniError::DuplicateKey {
                section: section.to_string(),
                key,
            });
        }
        sec.insert_new(key, value);
        Ok(())
    }

    /// Append an empty section. The name may not contain `]` or line breaks.
    pub fn add_section(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !text::is_valid_section_name(&name) {
            return Err(IniError::InvalidSectionName(name));
        }
        if self.section_exists(&name) {
            return Err(IniError::DuplicateSection(name));
        }
        self.section_order.push(name.clone());
        self.sections.insert(name, Section::default());
        Ok(())
    }

    /// Iterate over `(name, section)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.section_order
            .iter()
            .map(move |name| (name.as_str(), &self.sections[name]))
    }
}
