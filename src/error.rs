use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Invalid workshop folder: {path} (expected it to end with {app_id})")]
    InvalidFolder { path: String, app_id: String },

    #[error("Cannot read config file: {path}")]
    FileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Item {item} has {matches} values for field '{field}' (expected exactly 1)")]
    MisalignedField {
        item: String,
        field: String,
        matches: usize,
    },

    #[error("Field '{field}' has {found} values but {expected} items were read")]
    FieldLengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("Output file already exists: {path}")]
    OutputExists { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ReaderError {
    fn user_message(&self) -> String {
        match self {
            ReaderError::PathNotFound { path } => {
                format!("Workshop folder not found: {}", path)
            }
            ReaderError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            ReaderError::InvalidFolder { path, app_id } => {
                format!(
                    "Invalid folder entered: {} (the folder should end in the app id {})",
                    path, app_id
                )
            }
            ReaderError::FileUnreadable { path, source } => {
                format!("Cannot read {}: {}", path, source)
            }
            ReaderError::MisalignedField {
                item,
                field,
                matches,
            } => {
                if *matches == 0 {
                    format!("Item {} has no '{}' entry in its config file", item, field)
                } else {
                    format!(
                        "Item {} has {} '{}' entries in its config file",
                        item, matches, field
                    )
                }
            }
            ReaderError::FieldLengthMismatch {
                field,
                expected,
                found,
            } => {
                format!(
                    "Cannot build rows: field '{}' has {} values for {} items",
                    field, found, expected
                )
            }
            ReaderError::OutputExists { path } => {
                format!("Output file already exists: {}", path)
            }
            ReaderError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ReaderError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ReaderError::PathNotFound { .. } => Some(
                "Pass the workshop content folder with --root (e.g. .../steamapps/workshop/content/383980)".to_string()
            ),
            ReaderError::InvalidFolder { app_id, .. } => Some(format!(
                "Enter the Steam workshop content folder for Rivals of Aether, which ends in {}",
                app_id
            )),
            ReaderError::FileUnreadable { .. } => Some(
                "Check that the item folder contains a readable config.ini, or resubscribe to the item in Steam.".to_string()
            ),
            ReaderError::MisalignedField { .. } | ReaderError::FieldLengthMismatch { .. } => Some(
                "Use --align pad to fill missing values, or --align skip to leave such items out.".to_string()
            ),
            ReaderError::OutputExists { .. } => Some(
                "Choose a different file name or use --force to overwrite.".to_string()
            ),
            ReaderError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ReaderError {
    fn from(error: toml::de::Error) -> Self {
        ReaderError::Config {
            message: error.to_string(),
        }
    }
}

impl From<regex::Error> for ReaderError {
    fn from(error: regex::Error) -> Self {
        ReaderError::Config {
            message: format!("Invalid exclude pattern: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
