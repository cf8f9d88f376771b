use crate::error::{ReaderError, Result};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Steam app id of Rivals of Aether; workshop content lives in a folder named after it.
pub const DEFAULT_APP_ID: &str = "383980";
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";
/// Key holding the item folder name in JSON rows; cannot be queried as a field.
pub const ITEM_ID_KEY: &str = "id";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub workshop: WorkshopConfig,
    pub query: QueryConfig,
    pub table: TableConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkshopConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    pub app_id: String,
    pub config_file: String,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    pub fields: Vec<String>,
    pub alignment: AlignmentPolicy,
    pub export_field: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub show_header: bool,
    pub columns: Vec<ColumnConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColumnConfig {
    pub field: String,
    pub header: String,
    pub width: usize,
}

/// What to do with an item whose config file does not hold exactly one
/// value for a requested field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentPolicy {
    /// Fail on the first such item
    #[default]
    Strict,
    /// Use an empty value when missing and the first value when duplicated
    Pad,
    /// Leave the item out of every column
    Skip,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            root: None,
            app_id: DEFAULT_APP_ID.to_string(),
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            fields: vec!["url".to_string(), "name".to_string(), "type".to_string()],
            alignment: AlignmentPolicy::Strict,
            export_field: "name".to_string(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            show_header: true,
            columns: vec![
                ColumnConfig::new("url", "Asset ID", 12),
                ColumnConfig::new("name", "Asset Name", 24),
                ColumnConfig::new("type", "Asset Type", 16),
            ],
        }
    }
}

impl ColumnConfig {
    pub fn new(field: &str, header: &str, width: usize) -> Self {
        Self {
            field: field.to_string(),
            header: header.to_string(),
            width,
        }
    }
}

impl TableConfig {
    pub fn column_for(&self, field: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Header label for a field, falling back to the capitalized field name.
    pub fn header_for(&self, field: &str) -> String {
        match self.column_for(field) {
            Some(column) => column.header.clone(),
            None => {
                let mut chars = field.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ReaderError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ReaderError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ReaderError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["rivals-reader.toml", ".rivals-reader.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref root) = cli_args.root {
            self.workshop.root = Some(root.clone());
        }

        if let Some(ref fields) = cli_args.fields {
            self.query.fields = split_fields(fields);
        }

        if let Some(alignment) = cli_args.alignment {
            self.query.alignment = alignment;
        }

        if let Some(ref export_field) = cli_args.export_field {
            self.query.export_field = export_field.trim().to_string();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ReaderError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ReaderError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.query.fields.is_empty() {
            return Err(ReaderError::Config {
                message: "At least one field must be queried".to_string(),
            });
        }

        if self.query.fields.iter().any(|f| f.is_empty()) {
            return Err(ReaderError::Config {
                message: "Field names cannot be empty".to_string(),
            });
        }

        if self.query.fields.iter().any(|f| f == ITEM_ID_KEY) {
            return Err(ReaderError::Config {
                message: format!("'{}' is reserved for the item folder name", ITEM_ID_KEY),
            });
        }

        let mut seen = HashSet::new();
        if let Some(field) = self.query.fields.iter().find(|f| !seen.insert(f.as_str())) {
            return Err(ReaderError::Config {
                message: format!("Field '{}' is queried more than once", field),
            });
        }

        if self.query.export_field.is_empty() {
            return Err(ReaderError::Config {
                message: "Export field cannot be empty".to_string(),
            });
        }

        let config_file = &self.workshop.config_file;
        if config_file.is_empty() || config_file.contains('/') || config_file.contains('\\') {
            return Err(ReaderError::Config {
                message: format!(
                    "Config file name must be a plain file name: '{}'",
                    config_file
                ),
            });
        }

        let app_id = &self.workshop.app_id;
        if app_id.is_empty() || !app_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ReaderError::Config {
                message: format!("App id must be numeric: '{}'", app_id),
            });
        }

        if let Some(column) = self.table.columns.iter().find(|c| c.width == 0) {
            return Err(ReaderError::Config {
                message: format!("Column width for '{}' must be greater than 0", column.field),
            });
        }

        for pattern in &self.workshop.exclude_patterns {
            Regex::new(pattern)?;
        }

        Ok(())
    }
}

pub fn split_fields(fields: &str) -> Vec<String> {
    fields
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub fields: Option<String>,
    pub alignment: Option<AlignmentPolicy>,
    pub export_field: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    pub fn with_fields(mut self, fields: Option<String>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_alignment(mut self, alignment: Option<AlignmentPolicy>) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_export_field(mut self, export_field: Option<String>) -> Self {
        self.export_field = export_field;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.query.fields, vec!["url", "name", "type"]);
        assert_eq!(config.workshop.app_id, "383980");
        assert_eq!(config.workshop.config_file, "config.ini");
        assert_eq!(config.query.alignment, AlignmentPolicy::Strict);
        assert_eq!(config.table.columns.len(), 3);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.query.fields.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.workshop.config_file = "../config.ini".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.workshop.app_id = "rivals".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.table.columns[0].width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.workshop.exclude_patterns = vec!["(".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.workshop.root = Some(PathBuf::from("/games/workshop/383980"));
        config.query.alignment = AlignmentPolicy::Pad;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.workshop.root, config.workshop.root);
        assert_eq!(loaded_config.query.alignment, AlignmentPolicy::Pad);
        assert_eq!(loaded_config.table.columns, config.table.columns);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[query]\nfields = [\"name\", \"author\"]\n").unwrap();
        assert_eq!(config.query.fields, vec!["name", "author"]);
        assert_eq!(config.workshop.config_file, "config.ini");
        assert!(config.table.show_header);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ReaderError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_root(Some(PathBuf::from("/tmp/383980")))
            .with_fields(Some("name, author,,type".to_string()))
            .with_alignment(Some(AlignmentPolicy::Skip))
            .with_export_field(Some(" url ".to_string()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.workshop.root, Some(PathBuf::from("/tmp/383980")));
        assert_eq!(config.query.fields, vec!["name", "author", "type"]);
        assert_eq!(config.query.alignment, AlignmentPolicy::Skip);
        assert_eq!(config.query.export_field, "url");
    }

    #[test]
    fn test_header_lookup() {
        let table = TableConfig::default();
        assert_eq!(table.header_for("name"), "Asset Name");
        assert_eq!(table.header_for("author"), "Author");
        assert_eq!(table.header_for(""), "");
    }

    #[test]
    fn test_field_names_must_be_unique_and_not_reserved() {
        let mut config = Config::default();
        config.query.fields = vec!["name".to_string(), "name".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ReaderError::Config { message }) if message.contains("'name'")
        ));

        config.query.fields = vec!["id".to_string(), "name".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ReaderError::Config { message }) if message.contains("reserved")
        ));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_file = NamedTempFile::new().unwrap();
        Config::default().save_to_file(temp_file.path()).unwrap();

        let sample = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(sample.contains("[workshop]"));
        assert!(sample.contains("[query]"));
        assert!(sample.contains("columns"));
        assert!(sample.contains("alignment = \"strict\""));
    }
}
