//! Destinations for generated documents.
//!
//! The builder never touches the filesystem directly. Every document is
//! handed to a [`SitemapWriter`] together with its path relative to the
//! public root (e.g. `"sitemap.xml"` or `"maps/sitemap_posts_1.xml"`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WriteError;

/// Sink for generated sitemap documents.
pub trait SitemapWriter: Send + Sync {
    /// Write `contents` to `relative_path`, replacing any existing file.
    fn write(&self, relative_path: &str, contents: &[u8]) -> Result<(), WriteError>;
}

/// Writes documents below a public root directory on disk.
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
    create_dirs: bool,
}

impl FsWriter {
    /// Create a writer rooted at `root`.
    ///
    /// Missing directories are not created; writing into one fails.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_dirs: false,
        }
    }

    /// Create missing parent directories before writing.
    #[must_use]
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Root directory documents are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute destination of `relative_path`.
    pub fn resolve(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path.trim_start_matches('/'))
    }
}

impl SitemapWriter for FsWriter {
    fn write(&self, relative_path: &str, contents: &[u8]) -> Result<(), WriteError> {
        let path = self.resolve(relative_path);
        let io_error = |source| WriteError::Io {
            path: path.clone(),
            source,
        };

        if self.create_dirs
            && let Some(parent) = path.parent()
        {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, contents).map_err(io_error)?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote sitemap file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_to_root() {
        let tmp = TempDir::new().unwrap();
        let writer = FsWriter::new(tmp.path());

        writer.write("sitemap.xml", b"<urlset/>").unwrap();

        assert_eq!(fs::read(tmp.path().join("sitemap.xml")).unwrap(), b"<urlset/>");
    }

    #[test]
    fn test_write_overwrites() {
        let tmp = TempDir::new().unwrap();
        let writer = FsWriter::new(tmp.path());

        writer.write("sitemap.xml", b"first").unwrap();
        writer.write("sitemap.xml", b"second").unwrap();

        assert_eq!(fs::read(tmp.path().join("sitemap.xml")).unwrap(), b"second");
    }

    #[test]
    fn test_missing_directory_fails_without_create_dirs() {
        let tmp = TempDir::new().unwrap();
        let writer = FsWriter::new(tmp.path());

        let err = writer.write("maps/sitemap.xml", b"data").unwrap_err();

        assert!(matches!(err, WriteError::Io { .. }));
        assert!(err.to_string().contains("maps"));
    }

    #[test]
    fn test_create_dirs() {
        let tmp = TempDir::new().unwrap();
        let writer = FsWriter::new(tmp.path()).with_create_dirs(true);

        writer.write("deeply/nested/sitemap.xml", b"data").unwrap();

        assert!(tmp.path().join("deeply/nested/sitemap.xml").exists());
    }

    #[test]
    fn test_resolve_ignores_leading_slash() {
        let writer = FsWriter::new("/srv/public");
        assert_eq!(
            writer.resolve("/sitemap.xml"),
            PathBuf::from("/srv/public/sitemap.xml")
        );
        assert_eq!(writer.root(), Path::new("/srv/public"));
    }
}
