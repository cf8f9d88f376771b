use crate::config::WorkshopConfig;
use crate::error::Result;
use regex::Regex;
use walkdir::DirEntry;

/// Decides which entries of the workshop root count as workshop items.
pub struct ItemFilter {
    exclude_patterns: Vec<Regex>,
}

impl ItemFilter {
    pub fn new(config: &WorkshopConfig) -> Result<Self> {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { exclude_patterns })
    }

    /// Only directories are items; loose files in the root are not.
    pub fn is_item_entry(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
    }

    pub fn is_excluded(&self, item_id: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReaderError;

    fn config_with_patterns(patterns: &[&str]) -> WorkshopConfig {
        WorkshopConfig {
            exclude_patterns: patterns.iter().map(|p| p.to_string()).collect(),
            ..WorkshopConfig::default()
        }
    }

    #[test]
    fn test_no_patterns_excludes_nothing() {
        let filter = ItemFilter::new(&WorkshopConfig::default()).unwrap();
        assert!(!filter.is_excluded("1865940669"));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = ItemFilter::new(&config_with_patterns(&[r"^\.", r"_old$"])).unwrap();
        assert!(filter.is_excluded(".staging"));
        assert!(filter.is_excluded("1865940669_old"));
        assert!(!filter.is_excluded("1865940669"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let result = ItemFilter::new(&config_with_patterns(&["[unclosed"]));
        assert!(matches!(result, Err(ReaderError::Config { .. })));
    }
}
