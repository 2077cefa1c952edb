//! Versioned on-disk session state.
//!
//! The approved keyword list from the last `keywords` run is carried
//! between commands through a small JSON file. A one-line version stamp
//! sits next to it; [`Cache::open`] compares the stamp against
//! [`CACHE_VERSION`] and clears stale state on mismatch. This runs once
//! at startup, never as an import-time side effect.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::keywords::Keyword;

/// Bump whenever the persisted session shape changes.
pub const CACHE_VERSION: &str = "2";

const VERSION_FILE: &str = "version";
const SESSION_FILE: &str = "session.json";

/// The only state that outlives a process: approved keywords and the
/// audience they were generated for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub keywords: Vec<Keyword>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Opens the state directory, clearing the session file when the
    /// stored version stamp does not match the current one.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create state dir {}", dir.display()))?;

        let version_path = dir.join(VERSION_FILE);
        let stored = fs::read_to_string(&version_path).ok();
        if stored.as_deref().map(str::trim) != Some(CACHE_VERSION) {
            let session_path = dir.join(SESSION_FILE);
            if session_path.exists() {
                fs::remove_file(&session_path).with_context(|| {
                    format!("failed to clear stale session {}", session_path.display())
                })?;
                info!(
                    from = stored.as_deref().unwrap_or("none"),
                    to = CACHE_VERSION,
                    "cleared session state on version change"
                );
            }
            fs::write(&version_path, CACHE_VERSION)
                .with_context(|| format!("failed to write {}", version_path.display()))?;
        }

        Ok(Self { dir })
    }

    pub fn load_session(&self) -> Result<Option<SessionState>> {
        let path = self.dir.join(SESSION_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let session = serde_json::from_str(&raw)
            .with_context(|| format!("corrupt session state in {}", path.display()))?;
        Ok(Some(session))
    }

    pub fn save_session(&self, session: &SessionState) -> Result<()> {
        let path = self.dir.join(SESSION_FILE);
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&path, raw).with_context(|| format!("failed to write {}", path.display()))?;
        debug!(keywords = session.keywords.len(), "session state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session() -> SessionState {
        SessionState {
            keywords: vec![Keyword {
                phrase: "rust seo".to_string(),
                trend: None,
            }],
            audience: Some("donor".to_string()),
        }
    }

    #[test]
    fn test_open_stamps_fresh_dir() {
        let tmp = TempDir::new().unwrap();
        Cache::open(tmp.path()).unwrap();
        let stamp = fs::read_to_string(tmp.path().join(VERSION_FILE)).unwrap();
        assert_eq!(stamp, CACHE_VERSION);
    }

    #[test]
    fn test_session_round_trip() {
        let tmp = TempDir::new().unwrap();
        let cache = Cache::open(tmp.path()).unwrap();
        cache.save_session(&sample_session()).unwrap();
        let loaded = cache.load_session().unwrap().unwrap();
        assert_eq!(loaded.keywords[0].phrase, "rust seo");
        assert_eq!(loaded.audience.as_deref(), Some("donor"));
    }

    #[test]
    fn test_stale_version_clears_session() {
        let tmp = TempDir::new().unwrap();
        let cache = Cache::open(tmp.path()).unwrap();
        cache.save_session(&sample_session()).unwrap();

        fs::write(tmp.path().join(VERSION_FILE), "1").unwrap();
        let cache = Cache::open(tmp.path()).unwrap();
        assert!(cache.load_session().unwrap().is_none());
        let stamp = fs::read_to_string(tmp.path().join(VERSION_FILE)).unwrap();
        assert_eq!(stamp, CACHE_VERSION);
    }

    #[test]
    fn test_current_version_preserves_session() {
        let tmp = TempDir::new().unwrap();
        let cache = Cache::open(tmp.path()).unwrap();
        cache.save_session(&sample_session()).unwrap();

        let cache = Cache::open(tmp.path()).unwrap();
        assert!(cache.load_session().unwrap().is_some());
    }

    #[test]
    fn test_missing_session_loads_none() {
        let tmp = TempDir::new().unwrap();
        let cache = Cache::open(tmp.path()).unwrap();
        assert!(cache.load_session().unwrap().is_none());
    }
}
