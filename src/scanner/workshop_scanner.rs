use crate::config::WorkshopConfig;
use crate::error::{ReaderError, Result};
use crate::scanner::item_filter::ItemFilter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One installed workshop folder. Its identity is the directory name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkshopItem {
    pub id: String,
    pub path: PathBuf,
}

impl WorkshopItem {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self { id, path }
    }
}

pub struct WorkshopScanner {
    filter: ItemFilter,
}

impl WorkshopScanner {
    pub fn new(config: &WorkshopConfig) -> Result<Self> {
        Ok(Self {
            filter: ItemFilter::new(config)?,
        })
    }

    /// Lists the immediate subdirectories of `root`, sorted by name.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<WorkshopItem>> {
        Ok(self.scan_with_statistics(root)?.0)
    }

    pub fn scan_with_statistics<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Result<(Vec<WorkshopItem>, ScanStatistics)> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(ReaderError::PathNotFound {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(ReaderError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut items = Vec::new();
        let mut stats = ScanStatistics::default();

        // Depth 1 only, so following links cannot loop.
        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable entry");
                    stats.unreadable_entries += 1;
                    continue;
                }
            };

            if !self.filter.is_item_entry(&entry) {
                tracing::debug!(path = %entry.path().display(), "skipping non-directory entry");
                stats.non_directories += 1;
                continue;
            }

            let item = WorkshopItem::new(entry.path());
            if self.filter.is_excluded(&item.id) {
                tracing::debug!(item = %item.id, "item matches an exclude pattern");
                stats.excluded += 1;
                continue;
            }

            items.push(item);
        }

        stats.items = items.len();
        tracing::info!(root = %root_path.display(), items = items.len(), "enumerated workshop items");

        Ok((items, stats))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanStatistics {
    pub items: usize,
    pub non_directories: usize,
    pub excluded: usize,
    pub unreadable_entries: usize,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!("Scan Results:\n  Workshop items: {}\n", self.items);

        if self.non_directories > 0 {
            summary.push_str(&format!("  Ignored files: {}\n", self.non_directories));
        }
        if self.excluded > 0 {
            summary.push_str(&format!("  Excluded by pattern: {}\n", self.excluded));
        }
        if self.unreadable_entries > 0 {
            summary.push_str(&format!("  Unreadable entries: {}\n", self.unreadable_entries));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_item_from_path() {
        let item = WorkshopItem::new("/workshop/383980/1865940669");
        assert_eq!(item.id, "1865940669");
        assert_eq!(item.path, PathBuf::from("/workshop/383980/1865940669"));
    }

    #[test]
    fn test_scan_lists_immediate_directories_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("B")).unwrap();
        fs::create_dir(root.join("A")).unwrap();
        fs::create_dir_all(root.join("A").join("nested")).unwrap();
        fs::write(root.join("desktop.ini"), "").unwrap();

        let scanner = WorkshopScanner::new(&WorkshopConfig::default()).unwrap();
        let (items, stats) = scanner.scan_with_statistics(root).unwrap();

        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(stats.items, 2);
        assert_eq!(stats.non_directories, 1);
    }

    #[test]
    fn test_scan_applies_exclude_patterns() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("111")).unwrap();
        fs::create_dir(temp_dir.path().join("222_backup")).unwrap();

        let config = WorkshopConfig {
            exclude_patterns: vec!["_backup$".to_string()],
            ..WorkshopConfig::default()
        };
        let scanner = WorkshopScanner::new(&config).unwrap();
        let (items, stats) = scanner.scan_with_statistics(temp_dir.path()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "111");
        assert_eq!(stats.excluded, 1);
        assert!(stats.display_summary().contains("Excluded by pattern: 1"));
    }

    #[test]
    fn test_empty_root() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WorkshopScanner::new(&WorkshopConfig::default()).unwrap();
        assert!(scanner.scan_directory(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WorkshopScanner::new(&WorkshopConfig::default()).unwrap();
        let result = scanner.scan_directory(temp_dir.path().join("missing"));
        assert!(matches!(result, Err(ReaderError::PathNotFound { .. })));
    }

    #[test]
    fn test_root_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("383980");
        fs::write(&file, "").unwrap();

        let scanner = WorkshopScanner::new(&WorkshopConfig::default()).unwrap();
        let result = scanner.scan_directory(&file);
        assert!(matches!(result, Err(ReaderError::InvalidPath { .. })));
    }
}
