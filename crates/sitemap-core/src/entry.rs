//! URL entries accumulated by the builder.

use chrono::{DateTime, NaiveDate, TimeZone};

/// Group assigned to entries added without one.
pub const DEFAULT_GROUP: &str = "default";

/// Format used for `<lastmod>` values derived from dates.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last modification time of a URL, as supplied by the caller.
///
/// The caller decides up front whether it has a real date or an already
/// formatted string. Formatted values are written verbatim and are never
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastModified {
    /// Calendar date, rendered as `YYYY-MM-DD`.
    Date(NaiveDate),
    /// Pre-formatted value passed through unchanged.
    Formatted(String),
}

impl LastModified {
    /// Normalize to the string stored on a [`UrlEntry`].
    ///
    /// Returns `None` for an empty formatted value so the `<lastmod>` element
    /// is omitted.
    pub(crate) fn normalize(self) -> Option<String> {
        match self {
            Self::Date(date) => Some(date.format(DATE_FORMAT).to_string()),
            Self::Formatted(value) if value.is_empty() => None,
            Self::Formatted(value) => Some(value),
        }
    }
}

impl From<NaiveDate> for LastModified {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for LastModified {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::Date(datetime.date_naive())
    }
}

impl From<&str> for LastModified {
    fn from(value: &str) -> Self {
        Self::Formatted(value.to_owned())
    }
}

impl From<String> for LastModified {
    fn from(value: String) -> Self {
        Self::Formatted(value)
    }
}

/// A single URL to be listed in a sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    url: String,
    last_modified: Option<String>,
    group: String,
}

impl UrlEntry {
    /// Create an entry, normalizing the last modification time and group.
    ///
    /// An empty `group` is replaced by [`DEFAULT_GROUP`].
    pub fn new(url: impl Into<String>, last_modified: Option<LastModified>, group: &str) -> Self {
        let group = if group.is_empty() {
            DEFAULT_GROUP
        } else {
            group
        };
        Self {
            url: url.into(),
            last_modified: last_modified.and_then(LastModified::normalize),
            group: group.to_owned(),
        }
    }

    /// The URL written to `<loc>`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The value written to `<lastmod>`, if any.
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Group the entry belongs to.
    pub fn group(&self) -> &str {
        &self.group
    }
}
