//! Home screen list sections.
//!
//! A section does nothing until it has been scrolled into view. Once armed
//! it hands out exactly one [`QueryKey`] per language, and results coming
//! back for any other language are dropped.

use std::ops::Range;
use std::sync::{Arc, OnceLock};

use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;

use crate::error::Result;
use crate::language::Language;
use crate::metadata::{ListKind, ListPage, MediaType, MetadataProvider};
use crate::query_cache::QueryKey;

/// Fallback query for collections outside [`ListKind`]
pub type CustomQuery = Arc<dyn Fn(Language) -> BoxFuture<'static, Result<ListPage>> + Send + Sync>;

#[derive(Clone)]
pub enum ListSource {
    Known(ListKind),
    Custom { query: CustomQuery },
}

impl std::fmt::Debug for ListSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListSource::Known(kind) => f.debug_tuple("Known").field(kind).finish(),
            ListSource::Custom { .. } => f.write_str("Custom"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never visible for the current language
    Dormant,
    /// Visible, request not issued yet
    Armed,
    Pending(Language),
    Ready(Language),
    Failed(Language),
}

static WORD_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static NON_ALNUM: OnceLock<Regex> = OnceLock::new();

/// "This Week Trending" -> "this-week-trending", "topRated" -> "top-rated"
pub fn kebab_case(name: &str) -> String {
    let boundary = WORD_BOUNDARY.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
    let non_alnum = NON_ALNUM.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

    let split = boundary.replace_all(name, "$1-$2");
    non_alnum
        .replace_all(&split, "-")
        .trim_matches('-')
        .to_lowercase()
}

pub struct Section {
    pub name: String,
    pub slug: String,
    pub media: MediaType,
    pub source: ListSource,
    phase: Phase,
    visible: bool,
    page: Option<Arc<ListPage>>,
    error: Option<String>,
    pub selected: usize,
}

impl Section {
    pub fn new(name: impl Into<String>, media: MediaType, source: ListSource) -> Self {
        let name = name.into();
        let slug = format!("{}-list", kebab_case(&name));
        Self {
            name,
            slug,
            media,
            source,
            phase: Phase::Dormant,
            visible: false,
            page: None,
            error: None,
            selected: 0,
        }
    }

    pub fn known(name: impl Into<String>, media: MediaType, kind: ListKind) -> Self {
        Self::new(name, media, ListSource::Known(kind))
    }

    pub fn custom(name: impl Into<String>, media: MediaType, query: CustomQuery) -> Self {
        Self::new(name, media, ListSource::Custom { query })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page(&self) -> Option<&ListPage> {
        self.page.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn key(&self, language: Language) -> QueryKey {
        match &self.source {
            ListSource::Known(kind) => QueryKey::List {
                media: self.media,
                kind: *kind,
                language,
            },
            ListSource::Custom { .. } => QueryKey::Custom {
                id: format!("{}-{}", self.media, self.slug),
                language,
            },
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible && self.phase == Phase::Dormant {
            self.phase = Phase::Armed;
        }
    }

    /// Advance the trigger for the active language. Returns the key to fetch
    /// when a request should be issued now.
    pub fn poll(&mut self, language: Language) -> Option<QueryKey> {
        match self.phase {
            Phase::Dormant => None,
            Phase::Armed => {
                self.phase = Phase::Pending(language);
                Some(self.key(language))
            }
            Phase::Pending(l) | Phase::Ready(l) | Phase::Failed(l) if l != language => {
                self.page = None;
                self.error = None;
                self.selected = 0;
                if self.visible {
                    self.phase = Phase::Pending(language);
                    Some(self.key(language))
                } else {
                    self.phase = Phase::Dormant;
                    None
                }
            }
            Phase::Pending(_) | Phase::Ready(_) | Phase::Failed(_) => None,
        }
    }

    /// Apply a fetch outcome. Ignored unless the section is still waiting on
    /// that language.
    pub fn resolve(
        &mut self,
        language: Language,
        result: std::result::Result<Arc<ListPage>, String>,
    ) -> bool {
        if self.phase != Phase::Pending(language) {
            return false;
        }

        match result {
            Ok(page) => {
                self.selected = self.selected.min(page.results.len().saturating_sub(1));
                self.page = Some(page);
                self.error = None;
                self.phase = Phase::Ready(language);
            }
            Err(e) => {
                self.error = Some(e);
                self.phase = Phase::Failed(language);
            }
        }
        true
    }

    /// Re-arm after a failure
    pub fn retry(&mut self) {
        if let Phase::Failed(_) = self.phase {
            self.error = None;
            self.phase = if self.visible {
                Phase::Armed
            } else {
                Phase::Dormant
            };
        }
    }

    pub fn item_count(&self) -> usize {
        self.page.as_ref().map(|p| p.results.len()).unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let count = self.item_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Run the request for this section against the provider
    pub fn request(
        &self,
        provider: Arc<dyn MetadataProvider + Send + Sync>,
        language: Language,
    ) -> BoxFuture<'static, Result<ListPage>> {
        match &self.source {
            ListSource::Known(kind) => {
                let media = self.media;
                let kind = *kind;
                Box::pin(async move { provider.fetch_list(media, kind, language).await })
            }
            ListSource::Custom { query } => query(language),
        }
    }
}

/// Sections whose rows intersect the viewport. Every section is
/// `section_height` rows tall and `scroll` is the index of the first one
/// drawn.
pub fn visible_range(
    scroll: usize,
    viewport_rows: u16,
    section_height: u16,
    count: usize,
) -> Range<usize> {
    if section_height == 0 || viewport_rows == 0 || scroll >= count {
        return scroll.min(count)..scroll.min(count);
    }
    let fits = (viewport_rows as usize).div_ceil(section_height as usize);
    scroll..(scroll + fits).min(count)
}

/// Adjust `scroll` so `focused` is on screen
pub fn scroll_to(scroll: usize, focused: usize, viewport_rows: u16, section_height: u16) -> usize {
    let whole = ((viewport_rows / section_height.max(1)) as usize).max(1);
    if focused < scroll {
        focused
    } else if focused >= scroll + whole {
        focused + 1 - whole
    } else {
        scroll
    }
}

/// TMDB genre id for animation
pub const ANIMATION_GENRE: u32 = 16;

pub fn movie_sections(provider: Arc<dyn MetadataProvider + Send + Sync>) -> Vec<Section> {
    let animated: CustomQuery = Arc::new(move |language| {
        let provider = Arc::clone(&provider);
        async move {
            provider
                .discover(MediaType::Movie, ANIMATION_GENRE, language)
                .await
        }
        .boxed()
    });

    vec![
        Section::known("Today Trending", MediaType::Movie, ListKind::TodayTrending),
        Section::known("This Week Trending", MediaType::Movie, ListKind::ThisWeekTrending),
        Section::known("Popular", MediaType::Movie, ListKind::Popular),
        Section::known("Now Playing", MediaType::Movie, ListKind::NowPlaying),
        Section::known("Upcoming", MediaType::Movie, ListKind::Upcoming),
        Section::known("Top Rated", MediaType::Movie, ListKind::TopRated),
        Section::custom("Animated", MediaType::Movie, animated),
    ]
}

pub fn tv_sections() -> Vec<Section> {
    vec![
        Section::known("Today Trending", MediaType::Tv, ListKind::TodayTrending),
        Section::known("This Week Trending", MediaType::Tv, ListKind::ThisWeekTrending),
        Section::known("Popular", MediaType::Tv, ListKind::Popular),
        Section::known("On The Air", MediaType::Tv, ListKind::OnTheAir),
        Section::known("Top Rated", MediaType::Tv, ListKind::TopRated),
    ]
}
