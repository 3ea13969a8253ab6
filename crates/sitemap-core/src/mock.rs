//! In-memory writer for testing.
//!
//! Provides [`MockWriter`] for exercising generation without filesystem
//! access, including failures of individual files.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::WriteError;
use crate::writer::SitemapWriter;

/// Mock writer for testing.
///
/// Records every successful write in memory. Paths registered with
/// [`MockWriter::failing`] are rejected.
///
/// # Example
///
/// ```ignore
/// use sitemap_core::{MockWriter, SitemapWriter};
///
/// let writer = MockWriter::new().failing("sitemap_posts_2.xml");
/// writer.write("sitemap.xml", b"<urlset/>").unwrap();
/// assert!(writer.write("sitemap_posts_2.xml", b"").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockWriter {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
    order: RwLock<Vec<String>>,
    failing: RwLock<HashSet<String>>,
}

impl MockWriter {
    /// Create a new empty mock writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes to `relative_path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing(self, relative_path: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(relative_path.into());
        self
    }

    /// Contents last written to `relative_path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn get(&self, relative_path: &str) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(relative_path).cloned()
    }

    /// Contents of `relative_path` as a string.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned or the contents are not UTF-8.
    pub fn get_string(&self, relative_path: &str) -> Option<String> {
        self.get(relative_path)
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    /// Paths written so far, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn paths(&self) -> Vec<String> {
        self.files.read().unwrap().keys().cloned().collect()
    }

    /// Every successful write in order, including overwrites.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn write_log(&self) -> Vec<String> {
        self.order.read().unwrap().clone()
    }
}

impl SitemapWriter for MockWriter {
    fn write(&self, relative_path: &str, contents: &[u8]) -> Result<(), WriteError> {
        if self.failing.read().unwrap().contains(relative_path) {
            return Err(WriteError::Rejected {
                path: PathBuf::from(relative_path),
            });
        }
        self.files
            .write()
            .unwrap()
            .insert(relative_path.to_owned(), contents.to_vec());
        self.order.write().unwrap().push(relative_path.to_owned());
        Ok(())
    }
}
