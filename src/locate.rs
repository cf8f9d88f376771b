//! Finding the workshop content folder on this machine.

use crate::config::WorkshopConfig;
use crate::error::{ReaderError, Result};
use console::Term;
use std::path::{Path, PathBuf};

/// Well-known install locations for the host OS, most common first.
pub fn default_candidates(app_id: &str) -> Vec<PathBuf> {
    let content = Path::new("steamapps")
        .join("workshop")
        .join("content")
        .join(app_id);
    let mut candidates = Vec::new();

    if cfg!(windows) {
        candidates.push(PathBuf::from("C:/Program Files (x86)/Steam").join(&content));
        if let Some(local) = dirs::data_local_dir() {
            candidates.push(local.join("RivalsofAether").join("workshop"));
        }
    } else if cfg!(target_os = "macos") {
        if let Some(data) = dirs::data_dir() {
            candidates.push(data.join("Steam").join(&content));
        }
    } else {
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".steam").join("steam").join(&content));
        }
        if let Some(local) = dirs::data_local_dir() {
            candidates.push(local.join("Steam").join(&content));
        }
    }

    candidates
}

/// Checks that `path` exists and is a directory.
pub fn validate_root<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReaderError::PathNotFound {
            path: path.display().to_string(),
        });
    }

    if !path.is_dir() {
        return Err(ReaderError::InvalidPath {
            path: format!("{} is not a directory", path.display()),
        });
    }

    Ok(path.to_path_buf())
}

pub struct RootLocator {
    app_id: String,
    candidates: Vec<PathBuf>,
    allow_prompt: bool,
}

impl RootLocator {
    pub fn new(config: &WorkshopConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            candidates: default_candidates(&config.app_id),
            allow_prompt: true,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_prompt(mut self, allow: bool) -> Self {
        self.allow_prompt = allow;
        self
    }

    /// An explicit root wins; otherwise the first existing default, otherwise the user is asked.
    pub fn resolve(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            tracing::debug!(root = %path.display(), "using explicit workshop root");
            return validate_root(path);
        }

        if let Some(found) = self.find_default() {
            tracing::debug!(root = %found.display(), "found default workshop root");
            return Ok(found);
        }

        let term = Term::stderr();
        if !self.allow_prompt || !term.is_term() {
            return Err(ReaderError::PathNotFound {
                path: self.searched_summary(),
            });
        }

        let answer = self.prompt(&term)?;
        self.validate_custom(&answer)
    }

    pub fn find_default(&self) -> Option<PathBuf> {
        self.candidates.iter().find(|c| c.is_dir()).cloned()
    }

    /// Validates a user-entered folder: it must be named after the app id and exist.
    pub fn validate_custom(&self, input: &str) -> Result<PathBuf> {
        let trimmed = input.trim().trim_matches('"');
        if trimmed.is_empty() {
            return Err(ReaderError::Cancelled);
        }

        let path = PathBuf::from(trimmed);
        let named_after_app = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy() == self.app_id);

        if !named_after_app {
            return Err(ReaderError::InvalidFolder {
                path: path.display().to_string(),
                app_id: self.app_id.clone(),
            });
        }

        validate_root(&path)
    }

    fn prompt(&self, term: &Term) -> Result<String> {
        term.write_line("Unable to locate the Rivals of Aether workshop folder.")?;
        term.write_str(&format!(
            "Enter the location of the workshop content (ends in {}): ",
            self.app_id
        ))?;
        Ok(term.read_line()?)
    }

    fn searched_summary(&self) -> String {
        if self.candidates.is_empty() {
            return "no default location for this platform".to_string();
        }

        let searched: Vec<String> = self
            .candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect();
        format!("searched {}", searched.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn locator() -> RootLocator {
        RootLocator::new(&WorkshopConfig::default())
            .with_candidates(Vec::new())
            .with_prompt(false)
    }

    #[test]
    fn test_default_candidates_end_in_workshop_folders() {
        for candidate in default_candidates("383980") {
            let name = candidate.file_name().unwrap().to_string_lossy().to_string();
            assert!(name == "383980" || name == "workshop", "unexpected {}", name);
        }
    }

    #[test]
    fn test_explicit_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = locator().resolve(Some(temp_dir.path())).unwrap();
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_explicit_root_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("383980");
        let result = locator().resolve(Some(&missing));
        assert!(matches!(result, Err(ReaderError::PathNotFound { .. })));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let temp_dir = TempDir::new().unwrap();
        let second = temp_dir.path().join("second");
        let third = temp_dir.path().join("third");
        fs::create_dir(&second).unwrap();
        fs::create_dir(&third).unwrap();

        let locator = locator().with_candidates(vec![
            temp_dir.path().join("first"),
            second.clone(),
            third,
        ]);
        assert_eq!(locator.resolve(None).unwrap(), second);
    }

    #[test]
    fn test_no_candidate_without_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let locator = locator().with_candidates(vec![temp_dir.path().join("nope")]);

        match locator.resolve(None) {
            Err(ReaderError::PathNotFound { path }) => assert!(path.contains("nope")),
            other => panic!("expected PathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_path_needs_app_id_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let result = locator().validate_custom(&temp_dir.path().display().to_string());
        assert!(matches!(result, Err(ReaderError::InvalidFolder { .. })));
    }

    #[test]
    fn test_custom_path_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let content = temp_dir.path().join("383980");
        fs::create_dir(&content).unwrap();

        let input = format!("  \"{}\"\n", content.display());
        assert_eq!(locator().validate_custom(&input).unwrap(), content);
    }

    #[test]
    fn test_custom_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let content = temp_dir.path().join("383980");

        let result = locator().validate_custom(&content.display().to_string());
        assert!(matches!(result, Err(ReaderError::PathNotFound { .. })));
    }

    #[test]
    fn test_empty_answer_cancels() {
        assert!(matches!(
            locator().validate_custom("  \n"),
            Err(ReaderError::Cancelled)
        ));
    }
}
