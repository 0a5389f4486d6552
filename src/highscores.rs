//! Persisted high score
//!
//! A single scalar slot. Reads never fail: a missing or garbled value is
//! treated as zero.

use crate::error::GameResult;
#[cfg(not(target_arch = "wasm32"))]
use crate::error::GameError;

/// Backing storage for the high score
pub trait HighScoreStore {
    /// Stored high score, or 0 if absent or unreadable
    fn high_score(&self) -> u64;

    /// Persist a new high score
    fn set_high_score(&mut self, score: u64) -> GameResult<()>;
}

/// Parse a stored value, defaulting to 0
pub fn parse_high_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    match serde_json::from_str::<u64>(raw.trim()) {
        Ok(score) => score,
        Err(e) => {
            log::warn!("Ignoring unreadable high score {:?}: {}", raw, e);
            0
        }
    }
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: u64,
    /// Number of writes, for asserting persistence behavior
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { score, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u64 {
        self.score
    }

    fn set_high_score(&mut self, score: u64) -> GameResult<()> {
        self.score = score;
        self.writes += 1;
        Ok(())
    }
}

/// File-backed store holding the score as a bare JSON number
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub const DEFAULT_PATH: &'static str = "brickfall_highscore.json";

    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn high_score(&self) -> u64 {
        let raw = std::fs::read_to_string(&self.path).ok();
        parse_high_score(raw.as_deref())
    }

    fn set_high_score(&mut self, score: u64) -> GameResult<()> {
        let context = || self.path.display().to_string();
        let json = serde_json::to_string(&score).map_err(|source| GameError::Parse {
            context: context(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| GameError::Io {
            context: context(),
            source,
        })?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "highScore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn high_score(&self) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        parse_high_score(raw.as_deref())
    }

    fn set_high_score(&mut self, score: u64) -> GameResult<()> {
        if let Some(storage) = Self::storage() {
            if storage
                .set_item(Self::STORAGE_KEY, &score.to_string())
                .is_err()
            {
                log::warn!("LocalStorage rejected high score write");
            } else {
                log::info!("High score {} saved", score);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score(None), 0);
        assert_eq!(parse_high_score(Some("17")), 17);
        assert_eq!(parse_high_score(Some(" 42\n")), 42);
        assert_eq!(parse_high_score(Some("")), 0);
        assert_eq!(parse_high_score(Some("abc")), 0);
        assert_eq!(parse_high_score(Some("-3")), 0);
        assert_eq!(parse_high_score(Some("4.5")), 0);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::with_score(3);
        assert_eq!(store.high_score(), 3);
        store.set_high_score(9).unwrap();
        assert_eq!(store.high_score(), 9);
        assert_eq!(store.writes, 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "brickfall_highscore_test_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::new(&path);
        assert_eq!(store.high_score(), 0);

        store.set_high_score(12).unwrap();
        assert_eq!(FileStore::new(&path).high_score(), 12);

        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(store.high_score(), 0);

        let _ = std::fs::remove_file(&path);
    }
}
