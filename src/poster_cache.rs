use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, ImageReader};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, warn};

use crate::config::TmdbConfig;
use crate::error::{Error, Result};
use crate::metadata::tmdb::image_url;

/// Poster images on disk, keyed by a hash of their URL, with decoded copies
/// kept in memory.
#[derive(Clone)]
pub struct PosterCache {
    cache_dir: PathBuf,
    image_base: String,
    poster_size: String,
    memory_cache: Arc<Mutex<HashMap<String, DynamicImage>>>,
}

impl PosterCache {
    pub fn new(cache_dir: PathBuf, settings: &TmdbConfig) -> Result<Self> {
        if !cache_dir.exists() {
            std::fs::create_dir_all(&cache_dir)?;
        }

        Ok(Self {
            cache_dir,
            image_base: settings.image_base.clone(),
            poster_size: settings.poster_size.clone(),
            memory_cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn poster_url(&self, poster_path: &str) -> String {
        image_url(&self.image_base, &self.poster_size, poster_path)
    }

    pub fn get(&self, url: &str) -> Option<DynamicImage> {
        let key = hash_url(url);

        if let Ok(cache) = self.memory_cache.lock() {
            if let Some(img) = cache.get(&key) {
                return Some(img.clone());
            }
        }

        let path = self.cache_dir.join(&key);
        if !path.exists() {
            return None;
        }

        match decode(&path) {
            Ok(img) => {
                if let Ok(mut cache) = self.memory_cache.lock() {
                    cache.insert(key, img.clone());
                }
                Some(img)
            }
            Err(e) => {
                warn!("Dropping unreadable cached poster {}: {}", path.display(), e);
                if let Err(e) = std::fs::remove_file(&path) {
                    warn!("Failed to remove {}: {}", path.display(), e);
                }
                None
            }
        }
    }

    /// Fetch `url` into the disk cache unless a readable copy is already
    /// there. Unreadable copies are removed by `get` and fetched again.
    pub async fn download(&self, url: &str) -> Result<()> {
        if self.get(url).is_some() {
            return Ok(());
        }

        debug!("Downloading poster: {}", url);
        let response = reqwest::get(url).await?;
        if !response.status().is_success() {
            return Err(Error::Metadata(format!(
                "Poster download failed: {}",
                response.status()
            )));
        }
        let bytes = response.bytes().await?;

        self.store(url, &bytes).await
    }

    /// Keep `bytes` only if they decode as an image. The file is written
    /// under a temporary name and renamed into place.
    async fn store(&self, url: &str, bytes: &[u8]) -> Result<()> {
        image::load_from_memory(bytes)?;

        let key = hash_url(url);
        let path = self.cache_dir.join(&key);
        let partial = self.cache_dir.join(format!("{}.part", key));

        if let Err(e) = fs::write(&partial, bytes).await {
            let _ = fs::remove_file(&partial).await;
            return Err(e.into());
        }
        fs::rename(&partial, &path).await?;

        Ok(())
    }
}

fn decode(path: &std::path::Path) -> Result<DynamicImage> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

fn hash_url(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_distinct() {
        let a = hash_url("https://image.tmdb.org/t/p/w342/a.jpg");
        assert_eq!(a, hash_url("https://image.tmdb.org/t/p/w342/a.jpg"));
        assert_ne!(a, hash_url("https://image.tmdb.org/t/p/w342/b.jpg"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_poster_url_uses_configured_size() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PosterCache::new(dir.path().join("posters"), &TmdbConfig::default()).unwrap();
        assert_eq!(
            cache.poster_url("/soul.jpg"),
            "https://image.tmdb.org/t/p/w342/soul.jpg"
        );
    }

    #[test]
    fn test_missing_and_corrupt_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PosterCache::new(dir.path().to_path_buf(), &TmdbConfig::default()).unwrap();
        let url = "https://image.tmdb.org/t/p/w342/x.jpg";
        assert!(cache.get(url).is_none());

        std::fs::write(dir.path().join(hash_url(url)), b"not an image").unwrap();
        assert!(cache.get(url).is_none());
        assert!(!dir.path().join(hash_url(url)).exists());
    }

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::new_rgb8(2, 3);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_fetched_again() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PosterCache::new(dir.path().to_path_buf(), &TmdbConfig::default()).unwrap();
        let url = "http://127.0.0.1:1/x.jpg";
        let path = dir.path().join(hash_url(url));
        std::fs::write(&path, b"<html>not an image</html>").unwrap();

        // Nothing listens on port 1, so a real fetch attempt fails
        assert!(cache.download(url).await.is_err());
        assert!(!path.exists());
        assert!(cache.get(url).is_none());
    }

    #[tokio::test]
    async fn test_store_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PosterCache::new(dir.path().to_path_buf(), &TmdbConfig::default()).unwrap();
        let url = "https://image.tmdb.org/t/p/w342/bad.jpg";

        assert!(cache.store(url, b"<html>oops</html>").await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_stored_poster_loads() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PosterCache::new(dir.path().to_path_buf(), &TmdbConfig::default()).unwrap();
        let url = "https://image.tmdb.org/t/p/w342/good.png";

        cache.store(url, &png_bytes()).await.unwrap();
        assert!(!dir.path().join(format!("{}.part", hash_url(url))).exists());

        let img = cache.get(url).unwrap();
        assert_eq!((img.width(), img.height()), (2, 3));
        // Readable copy on disk, so no network request is made
        cache.download(url).await.unwrap();
    }
}
