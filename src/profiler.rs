//! Folder profiling.
//!
//! Counts how many files of each category live anywhere under a folder. The
//! resulting [`FrequencyTable`] is what [`crate::resolver::resolve`] uses to
//! pick a category for the folder as a whole.

use crate::file_category::CategoryMap;
use std::path::Path;
use walkdir::WalkDir;

/// Per-folder count of files in each category.
///
/// Categories are kept in the order they were first observed. That order
/// breaks ties when two categories have the same count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `category`, registering it if unseen.
    pub fn record(&mut self, category: &str) {
        self.add(category, 1);
    }

    /// Adds `count` observations of `category`.
    pub fn add(&mut self, category: &str, count: usize) {
        match self.counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, existing)) => *existing += count,
            None => self.counts.push((category.to_string(), count)),
        }
    }

    /// Returns the count for `category`, zero if never observed.
    pub fn count(&self, category: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| name == category)
            .map_or(0, |(_, count)| *count)
    }

    /// Total number of files recorded.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct categories observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    /// Entries sorted by descending count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        // sort_by is stable, so ties stay in first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl<'a> FromIterator<(&'a str, usize)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, usize)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (category, count) in iter {
            table.add(category, count);
        }
        table
    }
}

/// Counts the categories of every regular file under `folder`.
///
/// The whole subtree is walked depth-first in file-name order, including
/// nested folders that happen to be named like a category. A symbolic link to
/// a file counts as that file; links to folders are not descended. Entries
/// that cannot be read are skipped.
///
/// Never touches the filesystem beyond reading it. A folder with no files
/// yields an empty table.
pub fn profile(folder: &Path, categories: &CategoryMap) -> FrequencyTable {
    let mut table = FrequencyTable::new();

    for entry in WalkDir::new(folder)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(folder = %folder.display(), error = %e, "Skipping unreadable entry while profiling");
                continue;
            }
        };

        if entry.path().is_file() {
            table.record(categories.classify_path(entry.path()));
        }
    }

    tracing::debug!(folder = %folder.display(), files = table.total(), ?table, "Profiled folder");
    table
}
