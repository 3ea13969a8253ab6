//! Error types for sitemap generation.

use std::path::PathBuf;

/// Error rendering an XML document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Writing to the in-memory buffer failed.
    #[error("XML write error: {0}")]
    Io(#[from] std::io::Error),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Error writing a generated document.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Filesystem write failed (permissions, missing directory, disk full).
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The writer refused the document.
    #[error("write rejected: {}", path.display())]
    Rejected {
        /// Destination path.
        path: PathBuf,
    },
}

/// Error returned by [`SitemapBuilder::generate`](crate::SitemapBuilder::generate).
///
/// Only the top-level document (the single sitemap or the index) can fail a
/// run. Chunk files that fail are left out of the index instead.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// Rendering the top-level document failed.
    #[error("failed to render {filename}")]
    Render {
        /// File being rendered.
        filename: String,
        /// Underlying render error.
        #[source]
        source: RenderError,
    },

    /// Writing the top-level document failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}
