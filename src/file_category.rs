/// Extension-based file classification.
///
/// A [`CategoryMap`] maps file extensions to category names (e.g. "images",
/// "documents") and knows the full set of category names, which always
/// includes the fallback [`OTHER_CATEGORY`].
///
/// # Examples
///
/// ```
/// use sortdir::file_category::CategoryMap;
///
/// let map = CategoryMap::from_pairs([("jpg", "images"), ("txt", "docs")]);
/// assert_eq!(map.classify("jpg"), "images");
/// assert_eq!(map.classify("JPG"), "images");
/// assert_eq!(map.classify("xyz"), "other");
/// ```
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Category for anything the map does not recognize.
pub const OTHER_CATEGORY: &str = "other";

/// Built-in extension groups used when no configuration file is supplied.
const STANDARD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "images",
        &[
            "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "tiff", "ico", "heic",
        ],
    ),
    ("audio", &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma"]),
    (
        "videos",
        &["mp4", "mkv", "avi", "mov", "flv", "wmv", "webm", "3gp"],
    ),
    (
        "documents",
        &[
            "pdf", "txt", "doc", "docx", "html", "htm", "md", "rtf", "odt", "epub",
        ],
    ),
    ("archives", &["zip", "rar", "7z", "tar", "gz", "bz2", "xz"]),
    (
        "code",
        &[
            "py", "java", "c", "cpp", "h", "hpp", "js", "ts", "rs", "go", "sh", "bash", "json",
            "xml", "yaml", "yml", "toml",
        ],
    ),
    ("spreadsheets", &["csv", "xls", "xlsx", "ods"]),
    ("presentations", &["ppt", "pptx", "odp"]),
    ("fonts", &["ttf", "otf", "woff", "woff2"]),
    ("installers", &["exe", "msi", "dmg", "pkg", "deb", "rpm", "appimage"]),
];

/// Immutable mapping from file extension to category name.
///
/// Built once at startup and shared by reference with everything that
/// classifies files.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    extension_map: HashMap<String, String>,
    categories: BTreeSet<String>,
}

impl CategoryMap {
    /// Creates a map from extension keys to category names.
    ///
    /// A leading `.` on a key is dropped; keys are otherwise kept exactly as
    /// given, so lookups are case-sensitive first.
    pub fn new(extension_map: HashMap<String, String>) -> Self {
        let extension_map: HashMap<String, String> = extension_map
            .into_iter()
            .map(|(ext, category)| (strip_separator(&ext).to_string(), category))
            .collect();

        let mut categories: BTreeSet<String> = extension_map.values().cloned().collect();
        categories.insert(OTHER_CATEGORY.to_string());

        Self {
            extension_map,
            categories,
        }
    }

    /// Creates a map from `(extension, category)` pairs.
    pub fn from_pairs<I, E, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (E, C)>,
        E: Into<String>,
        C: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(ext, category)| (ext.into(), category.into()))
                .collect(),
        )
    }

    /// Maps a file extension to its category.
    ///
    /// Tries an exact match, then the lowercased extension, then falls back
    /// to [`OTHER_CATEGORY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::file_category::CategoryMap;
    ///
    /// let map = CategoryMap::default();
    /// assert_eq!(map.classify("pdf"), "documents");
    /// assert_eq!(map.classify("PNG"), "images");
    /// assert_eq!(map.classify(""), "other");
    /// ```
    pub fn classify(&self, extension: &str) -> &str {
        let extension = strip_separator(extension);

        if let Some(category) = self.extension_map.get(extension) {
            return category;
        }

        if let Some(category) = self.extension_map.get(&extension.to_lowercase()) {
            return category;
        }

        OTHER_CATEGORY
    }

    /// Classifies a file by the extension of its name.
    ///
    /// Dotfiles like `.bashrc` and names without a `.` have no extension and
    /// land in [`OTHER_CATEGORY`] unless the empty extension is mapped.
    pub fn classify_path(&self, path: &Path) -> &str {
        self.classify(&extension_of(path))
    }

    /// Returns true if `name` is one of the category folder names.
    pub fn is_category(&self, name: &str) -> bool {
        self.categories.contains(name)
    }

    /// All category names in sorted order, including [`OTHER_CATEGORY`].
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Number of mapped extensions.
    pub fn extension_count(&self) -> usize {
        self.extension_map.len()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::from_pairs(STANDARD_CATEGORIES.iter().flat_map(|(category, extensions)| {
            extensions.iter().map(move |ext| (*ext, *category))
        }))
    }
}

/// Returns the extension of `path`'s file name without the leading `.`.
pub fn extension_of(path: &Path) -> Cow<'_, str> {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .unwrap_or_default()
}

fn strip_separator(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> CategoryMap {
        CategoryMap::from_pairs([("jpg", "images"), ("txt", "docs"), ("Md", "notes")])
    }

    #[test]
    fn test_classify_mapped_extensions() {
        let map = sample_map();
        assert_eq!(map.classify("jpg"), "images");
        assert_eq!(map.classify("txt"), "docs");
    }

    #[test]
    fn test_classify_case_insensitive_fallback() {
        let map = sample_map();
        assert_eq!(map.classify("JPG"), "images");
        assert_eq!(map.classify("Txt"), "docs");
    }

    #[test]
    fn test_classify_exact_match_before_lowercase() {
        let map = sample_map();
        // "Md" is stored verbatim, so only the exact spelling matches it
        assert_eq!(map.classify("Md"), "notes");
        assert_eq!(map.classify("md"), "other");
        assert_eq!(map.classify("MD"), "other");
    }

    #[test]
    fn test_classify_unknown_defaults_to_other() {
        let map = sample_map();
        assert_eq!(map.classify("xyz"), OTHER_CATEGORY);
        assert_eq!(map.classify("XYZ"), OTHER_CATEGORY);
        assert_eq!(map.classify(""), OTHER_CATEGORY);
    }

    #[test]
    fn test_leading_separator_is_ignored() {
        let map = CategoryMap::from_pairs([(".png", "images")]);
        assert_eq!(map.classify("png"), "images");
        assert_eq!(map.classify(".png"), "images");
    }

    #[test]
    fn test_classify_path() {
        let map = sample_map();
        assert_eq!(map.classify_path(Path::new("/tmp/photo.jpg")), "images");
        assert_eq!(map.classify_path(Path::new("archive.tar.txt")), "docs");
        assert_eq!(map.classify_path(Path::new("README")), OTHER_CATEGORY);
        assert_eq!(map.classify_path(Path::new(".jpg")), OTHER_CATEGORY);
    }

    #[test]
    fn test_category_set_includes_other() {
        let map = sample_map();
        assert!(map.is_category("images"));
        assert!(map.is_category("docs"));
        assert!(map.is_category(OTHER_CATEGORY));
        assert!(!map.is_category("jpg"));

        let categories: Vec<&str> = map.categories().collect();
        assert_eq!(categories, vec!["docs", "images", "notes", "other"]);
    }

    #[test]
    fn test_empty_map_still_has_other() {
        let map = CategoryMap::new(HashMap::new());
        assert_eq!(map.categories().collect::<Vec<_>>(), vec![OTHER_CATEGORY]);
        assert_eq!(map.classify("jpg"), OTHER_CATEGORY);
    }

    #[test]
    fn test_default_mappings() {
        let map = CategoryMap::default();
        assert_eq!(map.classify("pdf"), "documents");
        assert_eq!(map.classify("mp3"), "audio");
        assert_eq!(map.classify("rs"), "code");
        assert_eq!(map.classify("PNG"), "images");
        assert!(map.is_category("fonts"));
        assert!(map.extension_count() > 50);
    }
}
