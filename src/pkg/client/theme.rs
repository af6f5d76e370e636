use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::prelude::Result;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stored {
    dark_mode: bool,
}

/// Dark/light preference kept in a small local file, apart from job data.
#[derive(Debug)]
pub struct ThemePreference {
    path: PathBuf,
    dark_mode: bool,
}

impl ThemePreference {
    /// A missing or unreadable file means light mode.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let dark_mode = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Stored>(&raw).ok())
            .map(|s| s.dark_mode)
            .unwrap_or(false);
        tracing::debug!("theme loaded from {}: dark={}", path.display(), dark_mode);
        ThemePreference { path, dark_mode }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle(&mut self) -> Result<bool> {
        self.dark_mode = !self.dark_mode;
        let raw = serde_json::to_string(&Stored {
            dark_mode: self.dark_mode,
        })?;
        std::fs::write(&self.path, raw)?;
        Ok(self.dark_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("job-tracker-theme-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_file_is_light() {
        assert!(!ThemePreference::load(temp_path()).dark_mode());
    }

    #[test]
    fn toggle_survives_reload() {
        let path = temp_path();
        let mut theme = ThemePreference::load(&path);
        assert!(theme.toggle().unwrap());

        let reloaded = ThemePreference::load(&path);
        assert!(reloaded.dark_mode());

        let mut reloaded = reloaded;
        assert!(!reloaded.toggle().unwrap());
        assert!(!ThemePreference::load(&path).dark_mode());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn garbage_file_is_light() {
        let path = temp_path();
        std::fs::write(&path, "not json").unwrap();
        assert!(!ThemePreference::load(&path).dark_mode());
        let _ = std::fs::remove_file(path);
    }
}
