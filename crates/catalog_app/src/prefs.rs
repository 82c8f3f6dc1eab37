//! Last-used filter/sort persistence.
//!
//! Stored as ron next to the working directory; any load failure degrades
//! to defaults so a bad file can never block startup.

use std::fs;
use std::io::Write;
use std::path::Path;

use catalog_core::{Category, SessionKey, SortOrder};
use catalog_logging::{catalog_error, catalog_warn};
use serde::{Deserialize, Serialize};

const PREFS_FILENAME: &str = ".catalog_prefs.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPrefs {
    category: Option<String>,
    sort: Option<String>,
}

pub(crate) fn load(dir: &Path) -> SessionKey {
    let path = dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return SessionKey::default();
        }
        Err(err) => {
            catalog_warn!("Failed to read preferences from {:?}: {}", path, err);
            return SessionKey::default();
        }
    };

    let prefs: PersistedPrefs = match ron::from_str(&content) {
        Ok(prefs) => prefs,
        Err(err) => {
            catalog_warn!("Failed to parse preferences from {:?}: {}", path, err);
            return SessionKey::default();
        }
    };

    SessionKey {
        // Unknown strings (e.g. a renamed category) fall back to "all".
        category: prefs.category.as_deref().and_then(Category::parse),
        sort: prefs.sort.as_deref().and_then(SortOrder::parse),
    }
}

pub(crate) fn save(dir: &Path, key: SessionKey) {
    let prefs = PersistedPrefs {
        category: key.category.map(|c| c.as_str().to_owned()),
        sort: key.sort.map(|s| s.as_str().to_owned()),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&prefs, pretty) {
        Ok(text) => text,
        Err(err) => {
            catalog_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    // Temp file in the same directory, then rename, so a crash never
    // leaves a half-written prefs file.
    let target = dir.join(PREFS_FILENAME);
    let mut tmp = match tempfile::NamedTempFile::new_in(dir) {
        Ok(tmp) => tmp,
        Err(err) => {
            catalog_error!("Failed to create preferences temp file: {}", err);
            return;
        }
    };
    if let Err(err) = tmp
        .write_all(content.as_bytes())
        .and_then(|()| tmp.flush())
    {
        catalog_error!("Failed to write preferences: {}", err);
        return;
    }
    if target.exists() {
        let _ = fs::remove_file(&target);
    }
    if let Err(err) = tmp.persist(&target) {
        catalog_error!("Failed to persist preferences to {:?}: {}", target, err);
    }
}
