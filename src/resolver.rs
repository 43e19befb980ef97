//! Picks one category for a whole folder from its [`FrequencyTable`].

use crate::file_category::OTHER_CATEGORY;
use crate::profiler::FrequencyTable;

/// When "other" wins, the runner-up takes over if it reaches more than this
/// fraction of the "other" count.
pub const OVERRIDE_RATIO: f64 = 0.6;

/// Resolves the best-fit category for a folder.
///
/// The most common category wins, with ties going to whichever category was
/// observed first. A winning [`OTHER_CATEGORY`] is only a weak signal, so the
/// runner-up replaces it when `runner_up / other > OVERRIDE_RATIO`. An empty
/// table resolves to [`OTHER_CATEGORY`].
///
/// # Examples
///
/// ```
/// use sortdir::profiler::FrequencyTable;
/// use sortdir::resolver::resolve;
///
/// let table: FrequencyTable = [("other", 10), ("images", 7)].into_iter().collect();
/// assert_eq!(resolve(&table), "images");
///
/// let table: FrequencyTable = [("other", 10), ("images", 5)].into_iter().collect();
/// assert_eq!(resolve(&table), "other");
/// ```
pub fn resolve(table: &FrequencyTable) -> &str {
    let ranked = table.ranked();

    let Some(&(primary, primary_count)) = ranked.first() else {
        return OTHER_CATEGORY;
    };

    if primary == OTHER_CATEGORY
        && let Some(&(secondary, secondary_count)) = ranked.get(1)
        && secondary_count as f64 / primary_count as f64 > OVERRIDE_RATIO
    {
        return secondary;
    }

    primary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, usize)]) -> FrequencyTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_empty_table_resolves_to_other() {
        assert_eq!(resolve(&FrequencyTable::new()), OTHER_CATEGORY);
    }

    #[test]
    fn test_majority_wins() {
        assert_eq!(resolve(&table(&[("docs", 1), ("images", 3)])), "images");
    }

    #[test]
    fn test_single_category() {
        assert_eq!(resolve(&table(&[("docs", 4)])), "docs");
        assert_eq!(resolve(&table(&[("other", 4)])), "other");
    }

    #[test]
    fn test_other_overridden_by_strong_runner_up() {
        assert_eq!(resolve(&table(&[("other", 10), ("images", 7)])), "images");
    }

    #[test]
    fn test_other_kept_against_weak_runner_up() {
        assert_eq!(resolve(&table(&[("other", 10), ("images", 5)])), "other");
    }

    #[test]
    fn test_override_ratio_is_strict() {
        assert_eq!(resolve(&table(&[("other", 10), ("images", 6)])), "other");
    }

    #[test]
    fn test_override_only_applies_to_other() {
        assert_eq!(resolve(&table(&[("docs", 10), ("images", 9)])), "docs");
    }

    #[test]
    fn test_override_uses_best_runner_up() {
        let counts = table(&[("other", 10), ("docs", 2), ("images", 8)]);
        assert_eq!(resolve(&counts), "images");
    }

    #[test]
    fn test_ties_go_to_first_seen() {
        assert_eq!(resolve(&table(&[("docs", 3), ("images", 3)])), "docs");
        assert_eq!(resolve(&table(&[("images", 3), ("docs", 3)])), "images");
    }

    #[test]
    fn test_tie_with_other_first_is_overridden() {
        // equal counts give a ratio of 1.0, above the threshold
        assert_eq!(resolve(&table(&[("other", 3), ("docs", 3)])), "docs");
    }

    #[test]
    fn test_result_is_always_in_table() {
        let entries = [("a", 1), ("b", 5), ("other", 6), ("c", 2)];
        let counts = table(&entries);
        let resolved = resolve(&counts);
        assert!(entries.iter().any(|(name, _)| *name == resolved));
    }
}
