//! Grouping and chunking of entries into output files.
//!
//! Everything here is pure: the builder turns its entries into a [`Plan`]
//! and only then starts rendering and writing.

use std::collections::HashMap;

use crate::entry::UrlEntry;
use crate::naming::chunk_filename;

/// Entries sharing one group name, in insertion order.
#[derive(Debug, PartialEq, Eq)]
pub struct Group<'a> {
    /// Group name as given to `add`.
    pub name: &'a str,
    /// Entries of the group.
    pub entries: Vec<&'a UrlEntry>,
}

/// One chunk file of a sitemap index.
#[derive(Debug, PartialEq, Eq)]
pub struct ChunkFile<'a> {
    /// Group the chunk was cut from.
    pub group: &'a str,
    /// 0-based position of the chunk within its group.
    pub index: usize,
    /// File name of the chunk, without directory.
    pub filename: String,
    /// At most `max_size` entries.
    pub entries: &'a [&'a UrlEntry],
}

/// Shape of the generated output.
#[derive(Debug, PartialEq, Eq)]
pub enum Plan<'a> {
    /// Everything fits into a single `sitemap.xml`.
    Single(Vec<&'a UrlEntry>),
    /// Chunk files plus an index. Groups are kept so chunks can borrow from them.
    Index(Vec<Group<'a>>),
}

impl<'a> Plan<'a> {
    /// Decide the output shape for `entries`.
    ///
    /// A single file is produced only when there is exactly one group and it
    /// holds at most `max_size` entries. Anything else, including no entries
    /// at all, becomes an index.
    pub fn new(entries: &'a [UrlEntry], max_size: usize) -> Self {
        let mut groups = group_entries(entries);
        if groups.len() == 1 && entries.len() <= max_size {
            let group = groups.remove(0);
            return Self::Single(group.entries);
        }
        Self::Index(groups)
    }
}

/// Partition entries by group, keeping first-seen group order.
pub fn group_entries(entries: &[UrlEntry]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut group_to_idx: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        if let Some(&idx) = group_to_idx.get(entry.group()) {
            groups[idx].entries.push(entry);
        } else {
            group_to_idx.insert(entry.group(), groups.len());
            groups.push(Group {
                name: entry.group(),
                entries: vec![entry],
            });
        }
    }
    groups
}

/// Split every group into chunk files of at most `max_size` entries.
///
/// `max_size` of 0 is treated as 1.
pub fn chunk_files<'a>(groups: &'a [Group<'a>], max_size: usize) -> Vec<ChunkFile<'a>> {
    let size = max_size.max(1);
    groups
        .iter()
        .flat_map(|group| {
            group
                .entries
                .chunks(size)
                .enumerate()
                .map(|(index, entries)| ChunkFile {
                    group: group.name,
                    index,
                    filename: chunk_filename(group.name, index),
                    entries,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(specs: &[(&str, &str)]) -> Vec<UrlEntry> {
        specs
            .iter()
            .map(|(url, group)| UrlEntry::new(*url, None, group))
            .collect()
    }

    fn urls(entries: &[&UrlEntry]) -> Vec<String> {
        entries.iter().map(|e| e.url().to_owned()).collect()
    }

    #[test]
    fn test_group_entries_keeps_first_seen_order() {
        let entries = entries(&[("/a", "pages"), ("/b", "posts"), ("/c", "pages"), ("/d", "")]);
        let groups = group_entries(&entries);

        let names: Vec<_> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["pages", "posts", "default"]);
        assert_eq!(urls(&groups[0].entries), vec!["/a", "/c"]);
        assert_eq!(urls(&groups[1].entries), vec!["/b"]);
        assert_eq!(urls(&groups[2].entries), vec!["/d"]);
    }

    #[test]
    fn test_group_entries_with_many_groups() {
        let specs: Vec<(String, String)> = (0..60_000)
            .map(|i| (format!("/p{i}"), format!("g{i}")))
            .collect();
        let entries: Vec<UrlEntry> = specs
            .iter()
            .chain(specs.iter().take(3))
            .map(|(url, group)| UrlEntry::new(url.as_str(), None, group))
            .collect();

        let groups = group_entries(&entries);

        assert_eq!(groups.len(), 60_000);
        assert_eq!(groups[0].name, "g0");
        assert_eq!(urls(&groups[2].entries), vec!["/p2", "/p2"]);
        assert_eq!(groups[59_999].name, "g59999");
        assert_eq!(groups[59_999].entries.len(), 1);
    }

    #[test]
    fn test_single_group_under_limit_is_single() {
        let entries = entries(&[("/a", ""), ("/b", "")]);
        let plan = Plan::new(&entries, 2);
        assert!(matches!(plan, Plan::Single(ref e) if e.len() == 2));
    }

    #[test]
    fn test_single_group_over_limit_is_index() {
        let entries = entries(&[("/a", ""), ("/b", ""), ("/c", "")]);
        assert!(matches!(Plan::new(&entries, 2), Plan::Index(_)));
    }

    #[test]
    fn test_multiple_small_groups_are_index() {
        let entries = entries(&[("/a", "pages"), ("/b", "posts")]);
        assert!(matches!(Plan::new(&entries, 25_000), Plan::Index(ref g) if g.len() == 2));
    }

    #[test]
    fn test_no_entries_is_empty_index() {
        let plan = Plan::new(&[], 10);
        assert_eq!(plan, Plan::Index(Vec::new()));
    }

    #[test]
    fn test_chunk_count_is_ceiling_per_group() {
        let mut specs = Vec::new();
        let urls_a: Vec<String> = (0..25).map(|i| format!("/a{i}")).collect();
        let urls_b: Vec<String> = (0..10).map(|i| format!("/b{i}")).collect();
        for url in &urls_a {
            specs.push((url.as_str(), "alpha"));
        }
        for url in &urls_b {
            specs.push((url.as_str(), "beta"));
        }
        let entries = entries(&specs);
        let groups = group_entries(&entries);
        let chunks = chunk_files(&groups, 10);

        // ceil(25 / 10) + ceil(10 / 10)
        assert_eq!(chunks.len(), 4);
        let names: Vec<_> = chunks.iter().map(|c| c.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "sitemap_alpha_1.xml",
                "sitemap_alpha_2.xml",
                "sitemap_alpha_3.xml",
                "sitemap_beta_1.xml",
            ]
        );
        let sizes: Vec<_> = chunks.iter().map(|c| c.entries.len()).collect();
        assert_eq!(sizes, vec![10, 10, 5, 10]);
        assert_eq!(chunks[2].entries[0].url(), "/a20");
        assert_eq!(chunks[2].index, 2);
        assert_eq!(chunks[3].group, "beta");
    }

    #[test]
    fn test_zero_max_size_chunks_one_by_one() {
        let entries = entries(&[("/a", ""), ("/b", "")]);
        let groups = group_entries(&entries);
        let chunks = chunk_files(&groups, 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].filename, "sitemap_default_2.xml");
    }
}
