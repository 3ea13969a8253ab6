//! Sitemap and sitemap index generation.
//!
//! [`SitemapBuilder`] collects URLs (each with an optional modification date
//! and a group name) and writes them as XML sitemaps following the
//! [sitemaps.org](https://www.sitemaps.org/protocol.html) protocol:
//!
//! - one group with at most `max_size` URLs becomes a single `sitemap.xml`;
//! - otherwise every group is split into `sitemap_<group>_<n>.xml` files of at
//!   most `max_size` URLs and `sitemap.xml` becomes a sitemap index.
//!
//! I/O goes through two collaborators supplied by the caller:
//!
//! - [`SitemapWriter`]: stores a document under a path relative to the public
//!   root ([`FsWriter`] for the filesystem, `MockWriter` for tests behind the
//!   `mock` feature);
//! - [`UrlResolver`]: turns a relative path into the absolute URL listed in the
//!   index ([`BaseUrl`], or any `Fn(&str) -> String`).
//!
//! Grouping, chunking and rendering are also available as pure functions in
//! [`plan`] and [`render`].

mod builder;
mod entry;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod naming;
pub mod plan;
pub mod render;
mod resolver;
mod writer;

pub use builder::{BuilderConfig, DEFAULT_MAX_SIZE, Generated, SitemapBuilder};
pub use entry::{DEFAULT_GROUP, LastModified, UrlEntry};
pub use error::{RenderError, SitemapError, WriteError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockWriter;
pub use render::SitemapReference;
pub use resolver::{BaseUrl, UrlResolver};
pub use writer::{FsWriter, SitemapWriter};
