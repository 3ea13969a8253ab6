//! Sitemap builder: accumulates URLs and writes the sitemap files.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::entry::{DATE_FORMAT, LastModified, UrlEntry};
use crate::error::{RenderError, SitemapError};
use crate::naming::{DEFAULT_FILENAME, normalize_directory, relative_path};
use crate::plan::{Group, Plan, chunk_files};
use crate::render::{SitemapReference, render_index, render_urlset};
use crate::resolver::UrlResolver;
use crate::writer::SitemapWriter;

/// Default maximum number of URLs per sitemap file.
pub const DEFAULT_MAX_SIZE: usize = 25_000;

/// Builder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Output subdirectory below the public root, without trailing slash.
    pub directory: String,
    /// Maximum number of URLs per sitemap file.
    pub max_size: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// A single `urlset` document was written.
    Sitemap {
        /// Path of the sitemap relative to the public root.
        path: String,
        /// Number of URLs listed.
        urls: usize,
    },
    /// Chunk files and an index were written.
    Index {
        /// Path of the index relative to the public root.
        path: String,
        /// Chunk files listed in the index.
        sitemaps: Vec<SitemapReference>,
        /// Chunk files that could not be written and were left out.
        skipped: usize,
    },
}

/// Accumulates URL entries and generates a sitemap or sitemap index.
///
/// If everything fits into one file (a single group with at most
/// `max_size` URLs) a plain `sitemap.xml` is written. Otherwise each group
/// is split into `sitemap_<group>_<n>.xml` chunk files and `sitemap.xml`
/// becomes an index of them.
///
/// The builder has no internal locking. `generate` only borrows it, so it
/// can be called repeatedly; every call renders the full entry list again.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use sitemap_core::{BaseUrl, BuilderConfig, FsWriter, SitemapBuilder};
///
/// let mut builder = SitemapBuilder::new(
///     BuilderConfig::default(),
///     Arc::new(FsWriter::new("public")),
///     Arc::new(BaseUrl::new("https://example.com")),
/// );
/// builder
///     .add("https://example.com/", Some("2024-01-01".into()), "")
///     .add("https://example.com/about", None, "");
/// builder.generate()?;
/// ```
pub struct SitemapBuilder {
    config: BuilderConfig,
    entries: Vec<UrlEntry>,
    writer: Arc<dyn SitemapWriter>,
    resolver: Arc<dyn UrlResolver>,
}

impl SitemapBuilder {
    /// Create a builder writing through `writer` and resolving index URLs
    /// with `resolver`.
    #[must_use]
    pub fn new(
        config: BuilderConfig,
        writer: Arc<dyn SitemapWriter>,
        resolver: Arc<dyn UrlResolver>,
    ) -> Self {
        let mut builder = Self {
            config: BuilderConfig::default(),
            entries: Vec::new(),
            writer,
            resolver,
        };
        builder
            .set_directory(&config.directory)
            .set_max_size(config.max_size);
        builder
    }

    /// Current settings.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Entries added so far.
    pub fn entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    /// Set the output subdirectory. Trailing slashes are removed.
    pub fn set_directory(&mut self, directory: &str) -> &mut Self {
        self.config.directory = normalize_directory(directory);
        self
    }

    /// Set the maximum number of URLs per file. `0` is treated as `1`.
    pub fn set_max_size(&mut self, max_size: usize) -> &mut Self {
        if max_size == 0 {
            tracing::warn!("sitemap max size of 0 is not usable, using 1");
        }
        self.config.max_size = max_size.max(1);
        self
    }

    /// Add a URL.
    ///
    /// An empty `group` puts the URL into the `"default"` group.
    pub fn add(
        &mut self,
        url: impl Into<String>,
        last_modified: Option<LastModified>,
        group: &str,
    ) -> &mut Self {
        self.entries.push(UrlEntry::new(url, last_modified, group));
        self
    }

    /// Add a URL to the default group without a modification date.
    pub fn add_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.add(url, None, "")
    }

    /// Generate the sitemap files, dating index entries with today's local date.
    pub fn generate(&self) -> Result<Generated, SitemapError> {
        self.generate_on(Local::now().date_naive())
    }

    /// Generate the sitemap files, dating index entries with `today`.
    ///
    /// Chunk files that fail to render or write are logged and left out of
    /// the index. Only a failure of the top-level `sitemap.xml` is returned
    /// as an error.
    pub fn generate_on(&self, today: NaiveDate) -> Result<Generated, SitemapError> {
        match Plan::new(&self.entries, self.config.max_size) {
            Plan::Single(entries) => self.build_sitemap(&entries),
            Plan::Index(groups) => self.build_index(&groups, today),
        }
    }

    fn build_sitemap(&self, entries: &[&UrlEntry]) -> Result<Generated, SitemapError> {
        let path = self.path_of(DEFAULT_FILENAME);
        let xml = render_urlset(entries).map_err(SitemapError::from_render(DEFAULT_FILENAME))?;
        self.writer.write(&path, &xml)?;

        tracing::info!(path = %path, urls = entries.len(), "Generated sitemap");
        Ok(Generated::Sitemap {
            path,
            urls: entries.len(),
        })
    }

    fn build_index(&self, groups: &[Group<'_>], today: NaiveDate) -> Result<Generated, SitemapError> {
        let lastmod = today.format(DATE_FORMAT).to_string();
        let mut sitemaps = Vec::new();
        let mut skipped = 0;

        for chunk in chunk_files(groups, self.config.max_size) {
            let path = self.path_of(&chunk.filename);
            let written = render_urlset(chunk.entries)
                .map_err(SitemapError::from_render(&chunk.filename))
                .and_then(|xml| {
                    self.writer
                        .write(&path, &xml)
                        .map_err(SitemapError::from)
                });

            match written {
                Ok(()) => sitemaps.push(SitemapReference {
                    url: self.resolver.resolve(&path),
                    last_modified: lastmod.clone(),
                }),
                Err(err) => {
                    tracing::warn!(
                        group = chunk.group,
                        chunk = chunk.index + 1,
                        "Skipping sitemap chunk {path}: {err}"
                    );
                    skipped += 1;
                }
            }
        }

        let path = self.path_of(DEFAULT_FILENAME);
        let xml = render_index(&sitemaps).map_err(SitemapError::from_render(DEFAULT_FILENAME))?;
        self.writer.write(&path, &xml)?;

        tracing::info!(
            path = %path,
            sitemaps = sitemaps.len(),
            skipped,
            "Generated sitemap index"
        );
        Ok(Generated::Index {
            path,
            sitemaps,
            skipped,
        })
    }

    fn path_of(&self, filename: &str) -> String {
        relative_path(&self.config.directory, filename)
    }
}

impl Extend<UrlEntry> for SitemapBuilder {
    fn extend<I: IntoIterator<Item = UrlEntry>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }
}

impl SitemapError {
    /// Adapter for `map_err` attaching the file being rendered.
    fn from_render(filename: &str) -> impl FnOnce(RenderError) -> Self + '_ {
        move |source| Self::Render {
            filename: filename.to_owned(),
            source,
        }
    }
}
