use reqwest::{Client, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TmdbConfig;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::metadata::{ListKind, ListPage, MediaItem, MediaType, MetadataProvider};

pub struct TmdbClient {
    client: Client,
    api_base: String,
}

impl TmdbClient {
    /// Build a client authenticated with a v4 read access token.
    pub fn new(token: &str, settings: &TmdbConfig) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::MissingAccessToken(settings.token_env.clone()));
        }

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::InvalidAccessToken(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Read the token from the environment variable named in the config.
    pub fn from_env(settings: &TmdbConfig) -> Result<Self> {
        let token = std::env::var(&settings.token_env)
            .map_err(|_| Error::MissingAccessToken(settings.token_env.clone()))?;
        Self::new(&token, settings)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        language: Language,
        extra: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(url = %url, language = %language, "TMDB request");

        let mut query: Vec<(&str, String)> = vec![("language", language.code().to_string())];
        query.extend(extra.iter().cloned());

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .map(|e| e.status_message)
                .unwrap_or(body);
            return Err(Error::Metadata(format!(
                "TMDB API error: {} - {}",
                status, message
            )));
        }

        Ok(response.json().await?)
    }
}

pub fn image_url(image_base: &str, size: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        image_base.trim_end_matches('/'),
        size,
        path.trim_start_matches('/')
    )
}

#[derive(Deserialize)]
struct TmdbErrorBody {
    status_message: String,
}

#[derive(Deserialize)]
struct TmdbListResponse {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    results: Vec<TmdbMedia>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

/// Shared shape of list entries and detail responses. Movies carry
/// `title`/`release_date`, shows carry `name`/`first_air_date`.
#[derive(Deserialize)]
struct TmdbMedia {
    id: u64,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    original_name: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    vote_count: Option<u32>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Option<Vec<u32>>,
    #[serde(default)]
    genres: Option<Vec<TmdbGenre>>,
}

#[derive(Deserialize)]
struct TmdbGenre {
    name: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TmdbMedia {
    fn into_item(self, fallback: MediaType) -> MediaItem {
        let media_type = match self.media_type.as_deref() {
            Some("tv") => MediaType::Tv,
            Some("movie") => MediaType::Movie,
            _ => fallback,
        };

        let title = non_empty(self.title)
            .or(non_empty(self.name))
            .unwrap_or_else(|| "Untitled".to_string());

        MediaItem {
            id: self.id,
            media_type,
            title,
            original_title: non_empty(self.original_title).or(non_empty(self.original_name)),
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            release_date: non_empty(self.release_date).or(non_empty(self.first_air_date)),
            overview: non_empty(self.overview),
            runtime: self
                .runtime
                .filter(|&r| r > 0)
                .or_else(|| self.episode_run_time.and_then(|r| r.first().copied())),
            genres: self
                .genres
                .map(|g| g.into_iter().map(|g| g.name).collect())
                .unwrap_or_default(),
        }
    }
}

impl TmdbListResponse {
    fn into_page(self, media: MediaType) -> ListPage {
        ListPage {
            page: self.page,
            results: self
                .results
                .into_iter()
                .map(|m| m.into_item(media))
                .collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    async fn fetch_list(
        &self,
        media: MediaType,
        kind: ListKind,
        language: Language,
    ) -> Result<ListPage> {
        let endpoint = kind.endpoint(media).ok_or_else(|| Error::UnsupportedList {
            kind: kind.param().to_string(),
            media: media.to_string(),
        })?;

        let resp: TmdbListResponse = self.get(&endpoint, language, &[]).await?;
        Ok(resp.into_page(media))
    }

    async fn details(&self, media: MediaType, id: u64, language: Language) -> Result<MediaItem> {
        let endpoint = format!("/{}/{}", media.as_path(), id);
        let resp: TmdbMedia = self.get(&endpoint, language, &[]).await?;
        Ok(resp.into_item(media))
    }

    async fn discover(
        &self,
        media: MediaType,
        genre_id: u32,
        language: Language,
    ) -> Result<ListPage> {
        let endpoint = format!("/discover/{}", media.as_path());
        let resp: TmdbListResponse = self
            .get(
                &endpoint,
                language,
                &[
                    ("with_genres", genre_id.to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                ],
            )
            .await?;
        Ok(resp.into_page(media))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_fails() {
        let settings = TmdbConfig::default();
        for token in ["", "   "] {
            match TmdbClient::new(token, &settings) {
                Err(Error::MissingAccessToken(var)) => assert_eq!(var, "TMDB_ACCESS_TOKEN"),
                Err(e) => panic!("unexpected error: {}", e),
                Ok(_) => panic!("client built without a token"),
            }
        }
    }

    #[test]
    fn test_unset_env_var_fails() {
        let settings = TmdbConfig {
            token_env: "MARQUEE_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
            ..TmdbConfig::default()
        };
        assert!(matches!(
            TmdbClient::from_env(&settings),
            Err(Error::MissingAccessToken(_))
        ));
    }

    #[test]
    fn test_url_joins_base() {
        let settings = TmdbConfig {
            api_base: "https://example.test/3/".to_string(),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new("token", &settings).unwrap();
        assert_eq!(
            client.url("/movie/popular"),
            "https://example.test/3/movie/popular"
        );
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p", "w500", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/", "original", "abc.jpg"),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn test_parse_movie_list() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 508442, "title": "Soul", "original_title": "Soul",
                 "poster_path": "/soul.jpg", "vote_average": 7.9, "vote_count": 10000,
                 "release_date": "2020-12-25", "overview": "A musician...", "media_type": "movie"},
                {"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20",
                 "media_type": "tv", "poster_path": ""}
            ],
            "total_pages": 500,
            "total_results": 10000
        }"#;

        let resp: TmdbListResponse = serde_json::from_str(json).unwrap();
        let page = resp.into_page(MediaType::Movie);

        assert_eq!(page.total_pages, 500);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].title, "Soul");
        assert_eq!(page.results[0].year(), Some("2020"));
        assert_eq!(page.results[1].media_type, MediaType::Tv);
        assert_eq!(page.results[1].title, "Breaking Bad");
        assert_eq!(page.results[1].release_date.as_deref(), Some("2008-01-20"));
        assert!(page.results[1].poster_path.is_none());
    }

    #[test]
    fn test_parse_details() {
        let json = r#"{
            "id": 1022789, "title": "Inside Out 2", "runtime": 97,
            "genres": [{"id": 16, "name": "Animation"}, {"id": 10751, "name": "Family"}],
            "release_date": "2024-06-11"
        }"#;

        let media: TmdbMedia = serde_json::from_str(json).unwrap();
        let item = media.into_item(MediaType::Movie);

        assert_eq!(item.runtime, Some(97));
        assert_eq!(item.genres, vec!["Animation", "Family"]);
        assert_eq!(item.media_type, MediaType::Movie);
    }

    #[test]
    fn test_tv_runtime_from_episode_run_time() {
        let json = r#"{"id": 1, "name": "Show", "episode_run_time": [45, 50]}"#;
        let media: TmdbMedia = serde_json::from_str(json).unwrap();
        assert_eq!(media.into_item(MediaType::Tv).runtime, Some(45));
    }
}
