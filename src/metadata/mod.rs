use std::fmt;

use crate::error::Result;
use crate::language::Language;

pub mod tmdb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    pub fn as_display(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movies",
            MediaType::Tv => "TV Shows",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Well-known catalog collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    TodayTrending,
    ThisWeekTrending,
    Popular,
    NowPlaying,
    OnTheAir,
    Upcoming,
    TopRated,
}

impl ListKind {
    pub fn param(&self) -> &'static str {
        match self {
            ListKind::TodayTrending => "todayTrending",
            ListKind::ThisWeekTrending => "thisWeekTrending",
            ListKind::Popular => "popular",
            ListKind::NowPlaying => "nowPlaying",
            ListKind::OnTheAir => "onTheAir",
            ListKind::Upcoming => "upcoming",
            ListKind::TopRated => "topRated",
        }
    }

    /// API path for this collection, or `None` when the provider has no such
    /// list for the media type.
    pub fn endpoint(&self, media: MediaType) -> Option<String> {
        let path = media.as_path();
        match (self, media) {
            (ListKind::TodayTrending, _) => Some(format!("/trending/{}/day", path)),
            (ListKind::ThisWeekTrending, _) => Some(format!("/trending/{}/week", path)),
            (ListKind::Popular, _) => Some(format!("/{}/popular", path)),
            (ListKind::TopRated, _) => Some(format!("/{}/top_rated", path)),
            (ListKind::NowPlaying, MediaType::Movie) => Some("/movie/now_playing".to_string()),
            (ListKind::Upcoming, MediaType::Movie) => Some("/movie/upcoming".to_string()),
            (ListKind::OnTheAir, MediaType::Tv) => Some("/tv/on_the_air".to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    /// `release_date` for movies, `first_air_date` for shows
    pub release_date: Option<String>,
    pub overview: Option<String>,
    /// Minutes; only present on detail lookups
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
}

impl MediaItem {
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }

    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(score) if score > 0.0 => format!("{:.1}", score),
            _ => "N/A".to_string(),
        }
    }
}

/// One page of a catalog collection, in provider order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub page: u32,
    pub results: Vec<MediaItem>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[async_trait::async_trait]
pub trait MetadataProvider {
    async fn fetch_list(
        &self,
        media: MediaType,
        kind: ListKind,
        language: Language,
    ) -> Result<ListPage>;

    async fn details(&self, media: MediaType, id: u64, language: Language) -> Result<MediaItem>;

    async fn discover(
        &self,
        media: MediaType,
        genre_id: u32,
        language: Language,
    ) -> Result<ListPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(release_date: Option<&str>, vote_average: Option<f64>) -> MediaItem {
        MediaItem {
            id: 1,
            media_type: MediaType::Movie,
            title: "Soul".to_string(),
            original_title: None,
            poster_path: None,
            backdrop_path: None,
            vote_average,
            vote_count: None,
            release_date: release_date.map(str::to_string),
            overview: None,
            runtime: None,
            genres: Vec::new(),
        }
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            ListKind::TodayTrending.endpoint(MediaType::Tv).as_deref(),
            Some("/trending/tv/day")
        );
        assert_eq!(
            ListKind::ThisWeekTrending.endpoint(MediaType::Movie).as_deref(),
            Some("/trending/movie/week")
        );
        assert_eq!(
            ListKind::NowPlaying.endpoint(MediaType::Movie).as_deref(),
            Some("/movie/now_playing")
        );
        assert_eq!(
            ListKind::OnTheAir.endpoint(MediaType::Tv).as_deref(),
            Some("/tv/on_the_air")
        );
        assert_eq!(
            ListKind::TopRated.endpoint(MediaType::Tv).as_deref(),
            Some("/tv/top_rated")
        );
    }

    #[test]
    fn test_media_specific_kinds() {
        assert!(ListKind::NowPlaying.endpoint(MediaType::Tv).is_none());
        assert!(ListKind::Upcoming.endpoint(MediaType::Tv).is_none());
        assert!(ListKind::OnTheAir.endpoint(MediaType::Movie).is_none());
    }

    #[test]
    fn test_year() {
        assert_eq!(item(Some("2020-12-25"), None).year(), Some("2020"));
        assert_eq!(item(Some(""), None).year(), None);
        assert_eq!(item(None, None).year(), None);
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(item(None, Some(7.84)).rating_label(), "7.8");
        assert_eq!(item(None, Some(0.0)).rating_label(), "N/A");
        assert_eq!(item(None, None).rating_label(), "N/A");
    }
}
