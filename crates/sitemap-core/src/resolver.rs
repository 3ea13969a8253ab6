//! Public URLs of generated files.

/// Turns a path relative to the public root into an absolute URL.
///
/// Only used for the `<loc>` entries of a sitemap index. Any
/// `Fn(&str) -> String` closure is a resolver.
pub trait UrlResolver: Send + Sync {
    /// Absolute URL of `relative_path` (e.g. `"maps/sitemap_posts_1.xml"`).
    fn resolve(&self, relative_path: &str) -> String;
}

impl<F> UrlResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn resolve(&self, relative_path: &str) -> String {
        self(relative_path)
    }
}

/// Resolves paths against a fixed base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    base: String,
}

impl BaseUrl {
    /// Create a resolver for `base` (e.g. `"https://example.com"`).
    ///
    /// Trailing slashes are ignored.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    /// The base URL without trailing slash.
    pub fn as_str(&self) -> &str {
        &self.base
    }
}

impl UrlResolver for BaseUrl {
    fn resolve(&self, relative_path: &str) -> String {
        format!("{}/{}", self.base, relative_path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joins_with_single_slash() {
        let resolver = BaseUrl::new("https://example.com/");
        assert_eq!(
            resolver.resolve("sitemap_posts_1.xml"),
            "https://example.com/sitemap_posts_1.xml"
        );
        assert_eq!(
            resolver.resolve("/maps/sitemap_posts_1.xml"),
            "https://example.com/maps/sitemap_posts_1.xml"
        );
        assert_eq!(resolver.as_str(), "https://example.com");
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let resolver = BaseUrl::new("https://example.com/shop");
        assert_eq!(
            resolver.resolve("sitemap.xml"),
            "https://example.com/shop/sitemap.xml"
        );
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |path: &str| format!("https://cdn.example.com/{path}");
        assert_eq!(
            UrlResolver::resolve(&resolver, "sitemap.xml"),
            "https://cdn.example.com/sitemap.xml"
        );
    }
}
