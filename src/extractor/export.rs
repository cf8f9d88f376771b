use crate::error::{ReaderError, Result};
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes value lists as plain text, one value per line.
pub struct ValueExporter {
    force_overwrite: bool,
}

impl ValueExporter {
    pub fn new() -> Self {
        Self {
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn write_values<P: AsRef<Path>>(&self, values: &[String], path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        self.validate_destination(path)?;

        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);

        for value in values {
            writeln!(writer, "{}", value)?;
        }

        writer.flush()?;
        tracing::debug!(path = %path.display(), values = values.len(), "wrote export file");

        Ok(path.to_path_buf())
    }

    fn validate_destination(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(ReaderError::InvalidPath {
                path: format!("{} is a directory", path.display()),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(ReaderError::InvalidPath {
                    path: format!("Directory does not exist: {}", parent.display()),
                });
            }
        }

        if path.exists() && !self.force_overwrite {
            return Err(ReaderError::OutputExists {
                path: path.display().to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ValueExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a file written by [`ValueExporter`] back into its values.
pub fn read_values<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = fs::File::open(path.as_ref())?;
    let values = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()?;

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_write_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roa_names.txt");
        let names = values(&["Sandbert", "", "Guadua", "Goku (SSJ)"]);

        ValueExporter::new().write_values(&names, &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Sandbert\n\nGuadua\nGoku (SSJ)\n"
        );
        assert_eq!(read_values(&path).unwrap(), names);
    }

    #[test]
    fn test_empty_list_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");

        ValueExporter::new().write_values(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(read_values(&path).unwrap().is_empty());
    }

    #[test]
    fn test_existing_file_requires_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("names.txt");
        fs::write(&path, "old\n").unwrap();

        let result = ValueExporter::new().write_values(&values(&["new"]), &path);
        assert!(matches!(result, Err(ReaderError::OutputExists { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");

        ValueExporter::new()
            .with_force_overwrite(true)
            .write_values(&values(&["new"]), &path)
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_missing_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("names.txt");

        let result = ValueExporter::new().write_values(&values(&["x"]), &path);
        assert!(matches!(result, Err(ReaderError::InvalidPath { .. })));
    }

    #[test]
    fn test_directory_destination_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = ValueExporter::new()
            .with_force_overwrite(true)
            .write_values(&values(&["x"]), temp_dir.path());
        assert!(matches!(result, Err(ReaderError::InvalidPath { .. })));
    }
}
