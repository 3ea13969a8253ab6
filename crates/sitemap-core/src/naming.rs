//! File names and relative paths of generated documents.

use std::sync::LazyLock;

use regex::Regex;

/// Name of the single sitemap or the sitemap index.
pub const DEFAULT_FILENAME: &str = "sitemap.xml";

/// Runs of characters that are not letters or digits.
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("invalid slug regex"));

/// Convert a display string into a URL slug.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-` and trims hyphens from both ends.
pub fn slug(value: &str) -> String {
    let lower = value.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_owned()
}

/// File name of the chunk at 0-based `index` within `group`.
///
/// Groups whose slugs are equal share file names; the later chunk overwrites
/// the earlier one.
pub fn chunk_filename(group: &str, index: usize) -> String {
    format!("sitemap_{}_{}.xml", slug(group), index + 1)
}

/// Path of `filename` relative to the public root.
pub fn relative_path(directory: &str, filename: &str) -> String {
    let filename = filename.trim_start_matches('/');
    if directory.is_empty() {
        filename.to_owned()
    } else {
        format!("{directory}/{filename}")
    }
}

/// Strip trailing slashes from a configured directory.
pub(crate) fn normalize_directory(directory: &str) -> String {
    directory.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_examples() {
        assert_eq!(slug("posts"), "posts");
        assert_eq!(slug("My Posts!"), "my-posts");
        assert_eq!(slug("  Blog -- News  "), "blog-news");
        assert_eq!(slug("product_pages/2024"), "product-pages-2024");
        assert_eq!(slug("Ünïcode Grüße"), "ünïcode-grüße");
    }

    #[test]
    fn test_slug_of_punctuation_only_is_empty() {
        assert_eq!(slug("!!!"), "");
        assert_eq!(chunk_filename("!!!", 0), "sitemap__1.xml");
    }

    #[test]
    fn test_chunk_filename_is_one_based() {
        assert_eq!(chunk_filename("My Posts!", 0), "sitemap_my-posts_1.xml");
        assert_eq!(chunk_filename("My Posts!", 1), "sitemap_my-posts_2.xml");
        assert_eq!(chunk_filename("default", 9), "sitemap_default_10.xml");
    }

    #[test]
    fn test_colliding_slugs_share_a_name() {
        assert_eq!(chunk_filename("News", 0), chunk_filename("news!", 0));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("", "sitemap.xml"), "sitemap.xml");
        assert_eq!(relative_path("maps", "sitemap.xml"), "maps/sitemap.xml");
        assert_eq!(relative_path("a/b", "/sitemap.xml"), "a/b/sitemap.xml");
    }

    #[test]
    fn test_normalize_directory() {
        assert_eq!(normalize_directory("maps/"), "maps");
        assert_eq!(normalize_directory("maps///"), "maps");
        assert_eq!(normalize_directory("/"), "");
        assert_eq!(normalize_directory(""), "");
    }
}
