//! File-backed INI documents.
//!
//! [`IniFile`] parses a document from disk and remembers where it came from,
//! so a modified copy can be generated elsewhere without clobbering the source.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use crate::ini::{parse, write_document, Document, IniError, Result};

/// An INI document loaded from a file.
#[derive(Debug, Clone)]
pub struct IniFile {
    path: PathBuf,
    doc: Document,
}

impl IniFile {
    /// Open `path` for reading and writing and parse its contents.
    ///
    /// The contents must be valid UTF-8; anything else is reported as
    /// [`IniError::Io`] with an `InvalidData` source.
    ///
    /// The file handle is closed before this returns, whether or not parsing
    /// succeeds.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_err = |source| IniError::Io {
            path: path.to_path_buf(),
            source,
        };

        let text = {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(path)
                .map_err(io_err)?;
            let mut text = String::new();
            file.read_to_string(&mut text).map_err(io_err)?;
            text
        };

        let doc = parse(&text)?;
        tracing::info!(path = %path.display(), sections = doc.len(), "parsed INI file");
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// Path the document was loaded from.
    pub fn file_name(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Write the document in canonical form to `dest`.
    ///
    /// `dest` must differ from the source path; the comparison is on the path
    /// as given, not on the resolved file.
    pub fn generate_file(&self, dest: impl AsRef<Path>) -> Result<()> {
        let dest = dest.as_ref();
        if dest == self.path {
            tracing::debug!(path = %dest.display(), "refusing to overwrite source file");
            return Err(IniError::OverwriteNotSupported(dest.to_path_buf()));
        }
        let io_err = |source| IniError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let file = File::create(dest).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        write_document(&self.doc, &mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        tracing::info!(path = %dest.display(), "generated INI file");
        Ok(())
    }
}

impl Deref for IniFile {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.doc
    }
}

impl DerefMut for IniFile {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}
