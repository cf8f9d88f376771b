//! Reading of the `key="value"` config file shipped in every workshop item.

use crate::error::{ReaderError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Field whose numeric codes get a human-readable suffix.
pub const TYPE_FIELD: &str = "type";

/// Splits one config line into `(key, value)`.
///
/// The key is everything before the first `=`. The value is everything
/// between the first and the last `"` on the line, so a line with a single
/// quote has an empty value. Lines without a `=` or without any quote carry
/// no entry.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let equals = line.find('=')?;
    let first_quote = line.find('"')?;
    let last_quote = line.rfind('"')?;

    let value = line.get(first_quote + 1..last_quote).unwrap_or("");
    Some((&line[..equals], value))
}

/// Appends the item kind to a `type` code. Unknown codes pass through.
pub fn annotate_type(value: &str) -> String {
    match value {
        "0" => "0 (Character)".to_string(),
        "1" => "1(Buddy)".to_string(),
        "2" => "2(Stage)".to_string(),
        other => other.to_string(),
    }
}

fn present_value(field: &str, raw: &str) -> String {
    if field == TYPE_FIELD {
        annotate_type(raw)
    } else {
        raw.to_string()
    }
}

/// All entries of one item's config file, in file order.
#[derive(Debug, Clone, Default)]
pub struct ItemConfig {
    pub path: PathBuf,
    entries: Vec<(String, String)>,
}

impl ItemConfig {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |source: std::io::Error| ReaderError::FileUnreadable {
            path: path.display().to_string(),
            source,
        };

        let bytes = fs::read(path).map_err(unreadable)?;
        Ok(Self::parse(path, &String::from_utf8_lossy(&bytes)))
    }

    pub fn parse<P: Into<PathBuf>>(path: P, content: &str) -> Self {
        let entries = content
            .split('\n')
            .filter_map(parse_line)
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self {
            path: path.into(),
            entries,
        }
    }

    /// Every value stored under `field`; duplicates are kept, a missing key gives an empty list.
    pub fn values(&self, field: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(key, _)| key == field)
            .map(|(_, value)| present_value(field, value))
            .collect()
    }

}

pub struct ConfigExtractor {
    config_file: String,
}

impl ConfigExtractor {
    pub fn new<S: Into<String>>(config_file: S) -> Self {
        Self {
            config_file: config_file.into(),
        }
    }

    pub fn config_path(&self, item_dir: &Path) -> PathBuf {
        item_dir.join(&self.config_file)
    }

    pub fn read_item(&self, item_dir: &Path) -> Result<ItemConfig> {
        ItemConfig::read(self.config_path(item_dir))
    }

    pub fn extract_field(&self, item_dir: &Path, field: &str) -> Result<Vec<String>> {
        Ok(self.read_item(item_dir)?.values(field))
    }
}

impl Default for ConfigExtractor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CONFIG_FILE)
    }
}
