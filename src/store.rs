//! Persist the high score and mute flag across sessions.
//!
//! Storage failures never reach the game: reads fall back to defaults and
//! writes are fire-and-forget, so a read-only home directory just means
//! scores do not stick.

use std::fs;
use std::path::PathBuf;

const HIGH_SCORE_FILE: &str = "highscore";
const MUTED_FILE: &str = "muted";

/// Persistence collaborator for the two values that outlive a session.
pub trait ScoreStore {
    fn load_high_score(&mut self) -> u32;
    fn load_muted(&mut self) -> bool;
    fn save_high_score(&mut self, score: u32);
    fn save_muted(&mut self, muted: bool);
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn load_high_score(&mut self) -> u32 {
        (**self).load_high_score()
    }

    fn load_muted(&mut self) -> bool {
        (**self).load_muted()
    }

    fn save_high_score(&mut self, score: u32) {
        (**self).save_high_score(score)
    }

    fn save_muted(&mut self, muted: bool) {
        (**self).save_muted(muted)
    }
}

/// File-backed store under the XDG config dir (or ~/.config/blockfall).
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            dir: config_dir(),
        }
    }

    #[cfg(test)]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn read_string(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(name)).ok()
    }

    fn write_string(&self, name: &str, value: &str) {
        if fs::create_dir_all(&self.dir).is_err() {
            return;
        }
        let _ = fs::write(self.dir.join(name), value);
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileStore {
    fn load_high_score(&mut self) -> u32 {
        self.read_string(HIGH_SCORE_FILE)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    fn load_muted(&mut self) -> bool {
        self.read_string(MUTED_FILE)
            .map(|s| s.trim() == "true")
            .unwrap_or(false)
    }

    fn save_high_score(&mut self, score: u32) {
        self.write_string(HIGH_SCORE_FILE, &score.to_string());
    }

    fn save_muted(&mut self, muted: bool) {
        self.write_string(MUTED_FILE, if muted { "true" } else { "false" });
    }
}

fn config_dir() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join("blockfall")
}

/// In-memory store: tests, and the `--no-store` flag.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub high_score: u32,
    pub muted: bool,
}

impl ScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> u32 {
        self.high_score
    }

    fn load_muted(&mut self) -> bool {
        self.muted
    }

    fn save_high_score(&mut self, score: u32) {
        self.high_score = score;
    }

    fn save_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("blockfall-store-test-{tag}"));
        let _ = fs::remove_dir_all(&dir);
        FileStore::with_dir(dir)
    }

    #[test]
    fn missing_files_read_as_defaults() {
        let mut store = temp_store("defaults");
        assert_eq!(store.load_high_score(), 0);
        assert!(!store.load_muted());
    }

    #[test]
    fn round_trips_both_values() {
        let mut store = temp_store("roundtrip");
        store.save_high_score(4200);
        store.save_muted(true);
        assert_eq!(store.load_high_score(), 4200);
        assert!(store.load_muted());

        store.save_muted(false);
        assert!(!store.load_muted());
    }

    #[test]
    fn garbage_contents_read_as_defaults() {
        let mut store = temp_store("garbage");
        store.save_high_score(7);
        let dir = store.dir.clone();
        fs::write(dir.join(HIGH_SCORE_FILE), "not a number").unwrap();
        fs::write(dir.join(MUTED_FILE), "maybe").unwrap();
        assert_eq!(store.load_high_score(), 0);
        assert!(!store.load_muted());
    }
}
