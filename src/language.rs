//! Persisted display language.
//!
//! The preference lives in a small JSON file holding a single string
//! (`"ar-SA"`). Anything unreadable falls back to `en-US` without surfacing
//! an error. Changes are broadcast over a `watch` channel so dependent views
//! can refetch.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnglishUs,
    #[serde(rename = "ar-SA")]
    ArabicSa,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::EnglishUs => "en-US",
            Language::ArabicSa => "ar-SA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::EnglishUs => "English",
            Language::ArabicSa => "العربية",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::EnglishUs, Language::ArabicSa]
    }

    /// The other supported language
    pub fn toggled(&self) -> Self {
        match self {
            Language::EnglishUs => Language::ArabicSa,
            Language::ArabicSa => Language::EnglishUs,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::all()
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

/// Decode a stored preference. `null`, garbage and unknown tags all yield
/// the default.
fn parse_stored(content: &str) -> Language {
    match serde_json::from_str::<Option<Language>>(content) {
        Ok(Some(language)) => language,
        Ok(None) => Language::default(),
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable language preference");
            Language::default()
        }
    }
}

pub struct LanguageStore {
    path: PathBuf,
    tx: watch::Sender<Language>,
}

impl LanguageStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let language = match std::fs::read_to_string(&path) {
            Ok(content) => parse_stored(&content),
            Err(_) => Language::default(),
        };
        debug!(language = %language, path = %path.display(), "Loaded language preference");

        let (tx, _rx) = watch::channel(language);
        Self { path, tx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Language {
        *self.tx.borrow()
    }

    pub fn set(&self, language: Language) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&language)?)?;

        info!(language = %language, "Language changed");
        self.tx.send_replace(language);
        Ok(())
    }

    pub fn toggle(&self) -> Result<Language> {
        let next = self.get().toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> LanguageStore {
        LanguageStore::open(dir.path().join("language.json"))
    }

    #[test]
    fn test_empty_store_defaults_to_english() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).get(), Language::EnglishUs);
    }

    #[test]
    fn test_set_persists_json_string() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(Language::ArabicSa).unwrap();
        assert_eq!(store.get(), Language::ArabicSa);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "\"ar-SA\"");

        let reloaded = store_in(&dir);
        assert_eq!(reloaded.get(), Language::ArabicSa);
    }

    #[test]
    fn test_malformed_preference_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("language.json");

        for content in ["ar-SA", "{not json", "null", "\"fr-FR\"", "42", ""] {
            std::fs::write(&path, content).unwrap();
            assert_eq!(
                LanguageStore::open(&path).get(),
                Language::EnglishUs,
                "content: {:?}",
                content
            );
        }
    }

    #[test]
    fn test_toggle_lands_on_other_language() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        for &start in Language::all() {
            store.set(start).unwrap();
            let next = store.toggle().unwrap();
            assert_ne!(next, start);
            assert_eq!(store.get(), next);
        }
    }

    #[test]
    fn test_subscribers_see_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.toggle().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Language::ArabicSa);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ar-SA".parse::<Language>().unwrap(), Language::ArabicSa);
        assert_eq!("EN-us".parse::<Language>().unwrap(), Language::EnglishUs);
        match "de-DE".parse::<Language>() {
            Err(Error::UnsupportedLanguage(tag)) => assert_eq!(tag, "de-DE"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
