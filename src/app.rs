use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{ListState, Paragraph},
};
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::gift::{GiftBox, GiftPhase};
use crate::language::{Language, LanguageStore};
use crate::metadata::{ListPage, MediaItem, MediaType, MetadataProvider};
use crate::poster_cache::PosterCache;
use crate::query_cache::{QueryCache, QueryKey};
use crate::sections::{self, Section, scroll_to, visible_range};
use crate::snowfall::{self, DEFAULT_FLAKES, Snowfall};
use crate::ui::{
    HomeView, SnowLayer,
    home::{SECTION_HEIGHT, home_layout},
    render_details_view, render_gift_view, render_home_view, render_language_picker, widgets,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Details,
    Gift,
    LanguagePicker,
    Help,
}

pub struct DetailsState {
    pub item: MediaItem,
    pub loading: bool,
    pub poster_url: Option<String>,
    pub poster: Option<StatefulProtocol>,
    poster_requested: bool,
}

impl DetailsState {
    fn new(item: MediaItem) -> Self {
        Self {
            item,
            loading: true,
            poster_url: None,
            poster: None,
            poster_requested: false,
        }
    }
}

pub enum AppMessage {
    ListLoaded {
        media: MediaType,
        section: usize,
        language: Language,
        result: std::result::Result<Arc<ListPage>, String>,
    },
    DetailsLoaded {
        media: MediaType,
        id: u64,
        language: Language,
        result: std::result::Result<Arc<MediaItem>, String>,
    },
    GiftLoaded {
        id: u64,
        result: std::result::Result<MediaItem, String>,
    },
    PosterReady(String),
    PosterError(String),
}

pub struct App {
    pub config: Config,
    pub running: bool,
    pub view: View,
    pub previous_view: View,
    pub accent: Color,

    pub tab: MediaType,
    pub movie_sections: Vec<Section>,
    pub tv_sections: Vec<Section>,
    pub focused: usize,
    pub scroll: usize,
    /// Height of the section area in the last drawn frame
    pub body_rows: u16,

    pub language: Language,
    pub language_store: LanguageStore,
    pub language_rx: watch::Receiver<Language>,
    pub language_state: ListState,

    pub details: Option<DetailsState>,
    pub details_return: View,
    pub gift: GiftBox,
    pub snowfall: Option<Snowfall>,
    pub rng: StdRng,
    pub tick: u64,
    pub status: Option<String>,

    pub msg_tx: mpsc::UnboundedSender<AppMessage>,
    pub msg_rx: mpsc::UnboundedReceiver<AppMessage>,

    pub provider: Arc<dyn MetadataProvider + Send + Sync>,
    pub lists: Arc<QueryCache<QueryKey, ListPage>>,
    pub details_cache: Arc<QueryCache<QueryKey, MediaItem>>,
    pub posters: PosterCache,
    pub picker: Picker,
}

impl App {
    pub fn new(
        config: Config,
        provider: Arc<dyn MetadataProvider + Send + Sync>,
        language_store: LanguageStore,
        posters: PosterCache,
        picker: Picker,
    ) -> Self {
        let accent = widgets::parse_accent_color(&config.ui.accent_color);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        let language = language_store.get();
        let language_rx = language_store.subscribe();

        Self {
            config,
            running: true,
            view: View::Home,
            previous_view: View::Home,
            accent,

            tab: MediaType::Movie,
            movie_sections: sections::movie_sections(Arc::clone(&provider)),
            tv_sections: sections::tv_sections(),
            focused: 0,
            scroll: 0,
            body_rows: 0,

            language,
            language_store,
            language_rx,
            language_state: ListState::default(),

            details: None,
            details_return: View::Home,
            gift: GiftBox::default(),
            snowfall: None,
            rng: StdRng::from_os_rng(),
            tick: 0,
            status: None,

            msg_tx,
            msg_rx,

            provider,
            lists: Arc::new(QueryCache::new()),
            details_cache: Arc::new(QueryCache::new()),
            posters,
            picker,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        info!(language = %self.language, "Starting browser");

        while self.running {
            self.sync_language();
            self.update_visibility();
            self.poll_sections();
            self.gift.tick(Instant::now());
            self.step_snow();

            terminal.draw(|frame| self.render(frame))?;
            self.handle_events().await?;
            self.process_messages();
            self.tick = self.tick.wrapping_add(1);
        }

        Ok(())
    }

    pub fn sections(&self) -> &[Section] {
        self.sections_for(self.tab)
    }

    fn sections_for(&self, media: MediaType) -> &[Section] {
        match media {
            MediaType::Movie => &self.movie_sections,
            MediaType::Tv => &self.tv_sections,
        }
    }

    fn sections_for_mut(&mut self, media: MediaType) -> &mut [Section] {
        match media {
            MediaType::Movie => &mut self.movie_sections,
            MediaType::Tv => &mut self.tv_sections,
        }
    }

    /// Pick up language changes broadcast by the store. Cached results for
    /// the old language are dropped; sections refetch on their next poll.
    fn sync_language(&mut self) {
        if !self.language_rx.has_changed().unwrap_or(false) {
            return;
        }
        let language = *self.language_rx.borrow_and_update();
        if language == self.language {
            return;
        }

        info!(
            from = %self.language,
            to = %language,
            dropped = self.lists.len(),
            "Switching content language"
        );
        self.language = language;
        self.lists.invalidate_all();
        self.details_cache.invalidate_all();
    }

    fn home_shown(&self) -> bool {
        match self.view {
            View::Home | View::LanguagePicker => true,
            View::Help => self.previous_view == View::Home,
            View::Details | View::Gift => false,
        }
    }

    fn update_visibility(&mut self) {
        let shown = self.home_shown();
        let range = visible_range(
            self.scroll,
            self.body_rows,
            SECTION_HEIGHT,
            self.sections().len(),
        );
        let tab = self.tab;

        for media in [MediaType::Movie, MediaType::Tv] {
            for (idx, section) in self.sections_for_mut(media).iter_mut().enumerate() {
                section.set_visible(shown && media == tab && range.contains(&idx));
            }
        }
    }

    fn poll_sections(&mut self) {
        let language = self.language;

        for media in [MediaType::Movie, MediaType::Tv] {
            for idx in 0..self.sections_for(media).len() {
                let Some(key) = self.sections_for_mut(media)[idx].poll(language) else {
                    continue;
                };

                if let Some(page) = self.lists.peek(&key) {
                    debug!(key = ?key, "Section served from cache");
                    self.sections_for_mut(media)[idx].resolve(language, Ok(page));
                    continue;
                }

                let request =
                    self.sections_for(media)[idx].request(Arc::clone(&self.provider), language);
                let cache = Arc::clone(&self.lists);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = cache
                        .fetch(key, move || request)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(AppMessage::ListLoaded {
                        media,
                        section: idx,
                        language,
                        result,
                    });
                });
            }
        }
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.handle_message(msg);
        }
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::ListLoaded {
                media,
                section,
                language,
                result,
            } => {
                if let Err(e) = &result {
                    error!(media = %media, section, error = %e, "List fetch failed");
                }
                if let Some(s) = self.sections_for_mut(media).get_mut(section) {
                    if !s.resolve(language, result) {
                        debug!(section = %s.slug, language = %language, "Dropped stale list result");
                    }
                }
            }
            AppMessage::DetailsLoaded {
                media,
                id,
                language,
                result,
            } => {
                let current = self.language;
                let Some(details) = &mut self.details else {
                    return;
                };
                if details.item.id != id || details.item.media_type != media || language != current
                {
                    return;
                }

                details.loading = false;
                match result {
                    Ok(item) => details.item = (*item).clone(),
                    Err(e) => {
                        error!(id, error = %e, "Details fetch failed");
                        self.status = Some(format!("Could not load details: {}", e));
                    }
                }
                self.load_poster();
            }
            AppMessage::GiftLoaded { id, result } => {
                if let Err(e) = &result {
                    error!(id, error = %e, "Gift lookup failed");
                }
                self.gift.resolve(id, result);
            }
            AppMessage::PosterReady(url) => {
                let wanted = self
                    .details
                    .as_ref()
                    .is_some_and(|d| d.poster_url.as_deref() == Some(url.as_str()));
                if wanted {
                    self.load_poster();
                }
            }
            AppMessage::PosterError(e) => {
                warn!(error = %e, "Poster download failed");
            }
        }
    }

    fn selected_item(&self) -> Option<MediaItem> {
        let section = self.sections().get(self.focused)?;
        section.page()?.results.get(section.selected).cloned()
    }

    fn open_details(&mut self, item: MediaItem) {
        info!(id = item.id, title = %item.title, "Opening details");
        self.details_return = self.view;
        self.details = Some(DetailsState::new(item));
        self.view = View::Details;
        self.request_details();
        self.load_poster();
    }

    fn close_details(&mut self) {
        self.details = None;
        self.view = self.details_return;
    }

    fn request_details(&mut self) {
        let language = self.language;
        let Some(details) = &mut self.details else {
            return;
        };
        let (media, id) = (details.item.media_type, details.item.id);
        let key = QueryKey::Details {
            media,
            id,
            language,
        };

        if let Some(item) = self.details_cache.peek(&key) {
            details.item = (*item).clone();
            details.loading = false;
            return;
        }
        details.loading = true;

        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.details_cache);
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = cache
                .fetch(key, move || async move {
                    provider.details(media, id, language).await
                })
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::DetailsLoaded {
                media,
                id,
                language,
                result,
            });
        });
    }

    /// Show the poster from cache, downloading it once if needed
    fn load_poster(&mut self) {
        let Some(details) = &mut self.details else {
            return;
        };
        if details.poster.is_some() {
            return;
        }
        let Some(path) = details.item.poster_path.clone() else {
            return;
        };

        let url = self.posters.poster_url(&path);
        details.poster_url = Some(url.clone());

        if let Some(image) = self.posters.get(&url) {
            details.poster = Some(self.picker.new_resize_protocol(image));
            return;
        }
        if details.poster_requested {
            return;
        }
        details.poster_requested = true;

        let posters = self.posters.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            match posters.download(&url).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::PosterReady(url));
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::PosterError(e.to_string()));
                }
            }
        });
    }

    fn open_gift(&mut self) {
        let Some(id) = self.gift.open(&mut self.rng, Instant::now()) else {
            return;
        };
        info!(id, "Opening gift");

        let provider = Arc::clone(&self.provider);
        let language = self.language;
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = provider
                .details(MediaType::Movie, id, language)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::GiftLoaded { id, result });
        });
    }

    fn set_language(&mut self, language: Language) {
        if let Err(e) = self.language_store.set(language) {
            error!(error = %e, "Failed to save language preference");
            self.status = Some(format!("Could not save language: {}", e));
        }
    }

    fn toggle_language(&mut self) {
        if let Err(e) = self.language_store.toggle() {
            error!(error = %e, "Failed to save language preference");
            self.status = Some(format!("Could not save language: {}", e));
        }
    }

    fn retry_failed(&mut self) {
        let tab = self.tab;
        for section in self.sections_for_mut(tab) {
            section.retry();
        }
    }

    fn snow_enabled(&self) -> bool {
        snowfall::should_snow(self.config.ui.snowfall, Local::now().naive_local())
    }

    fn step_snow(&mut self) {
        if !self.snow_enabled() {
            return;
        }
        if let Some(snow) = &mut self.snowfall {
            snow.step(&mut self.rng);
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let main_area = chunks[0];
        let help_area = chunks[1];

        let base = if self.view == View::Help {
            self.previous_view
        } else {
            self.view
        };

        match base {
            View::Details => self.render_details(frame, main_area),
            View::Gift => {
                render_gift_view(frame, main_area, &self.gift, self.tick, self.accent);
            }
            View::Home | View::LanguagePicker | View::Help => self.render_home(frame, main_area),
        }

        if base != View::Details {
            self.render_snow(frame, main_area);
        }

        match self.view {
            View::LanguagePicker => render_language_picker(
                frame,
                self.language,
                &mut self.language_state,
                self.accent,
            ),
            View::Help => self.render_help(frame),
            _ => {}
        }

        if let Some(status) = &self.status {
            let line = Paragraph::new(Line::styled(
                status.as_str(),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(line, help_area);
            return;
        }

        let hints: &[(&str, &str)] = match self.view {
            View::Home => &[
                ("Tab", "movies/tv"),
                ("j/k", "section"),
                ("h/l", "card"),
                ("Enter", "details"),
                ("L", "language"),
                ("g", "gift"),
                ("?", "help"),
                ("q", "quit"),
            ],
            View::Details => &[("Esc", "back")],
            View::Gift => &[("Enter", "open"), ("d", "details"), ("Esc", "back")],
            View::LanguagePicker => &[("j/k", "navigate"), ("Enter", "select"), ("Esc", "cancel")],
            View::Help => &[("?", "close")],
        };
        frame.render_widget(widgets::help_bar(hints), help_area);
    }

    fn render_home(&mut self, frame: &mut Frame, area: Rect) {
        self.body_rows = home_layout(area).body.height;

        let view = HomeView {
            tab: self.tab,
            sections: self.sections(),
            focused: self.focused,
            scroll: self.scroll,
            language: self.language,
            accent: self.accent,
        };
        render_home_view(frame, area, &view);
    }

    fn render_details(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(details) = &mut self.details {
            render_details_view(
                frame,
                area,
                &details.item,
                details.loading,
                details.poster.as_mut(),
                self.accent,
            );
        }
    }

    fn render_snow(&mut self, frame: &mut Frame, area: Rect) {
        if !self.snow_enabled() {
            return;
        }
        let snow = self
            .snowfall
            .get_or_insert_with(|| Snowfall::new(&mut self.rng, DEFAULT_FLAKES, area.width, area.height));
        snow.resize(area.width, area.height);

        frame.render_widget(SnowLayer(snow), area);
    }

    async fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    self.running = false;
                    return Ok(());
                }

                self.status = None;
                match self.view {
                    View::Home => self.handle_home_input(key.code)?,
                    View::Details => self.handle_details_input(key.code)?,
                    View::Gift => self.handle_gift_input(key.code)?,
                    View::LanguagePicker => self.handle_language_input(key.code)?,
                    View::Help => self.handle_help_input(key.code)?,
                }
            }
        }
        Ok(())
    }

    fn handle_home_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = match self.tab {
                    MediaType::Movie => MediaType::Tv,
                    MediaType::Tv => MediaType::Movie,
                };
                self.focused = 0;
                self.scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let last = self.sections().len().saturating_sub(1);
                self.focused = (self.focused + 1).min(last);
                self.scroll = scroll_to(self.scroll, self.focused, self.body_rows, SECTION_HEIGHT);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.focused = self.focused.saturating_sub(1);
                self.scroll = scroll_to(self.scroll, self.focused, self.body_rows, SECTION_HEIGHT);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                let (tab, focused) = (self.tab, self.focused);
                if let Some(section) = self.sections_for_mut(tab).get_mut(focused) {
                    section.select_next();
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                let (tab, focused) = (self.tab, self.focused);
                if let Some(section) = self.sections_for_mut(tab).get_mut(focused) {
                    section.select_prev();
                }
            }
            KeyCode::Enter => {
                if let Some(item) = self.selected_item() {
                    self.open_details(item);
                }
            }
            KeyCode::Char('L') => {
                let current = Language::all().iter().position(|l| *l == self.language);
                self.language_state.select(current.or(Some(0)));
                self.view = View::LanguagePicker;
            }
            KeyCode::Char('t') => self.toggle_language(),
            KeyCode::Char('g') => {
                self.gift.close();
                self.view = View::Gift;
            }
            KeyCode::Char('r') => self.retry_failed(),
            KeyCode::Char('?') => self.toggle_help(),
            _ => {}
        }
        Ok(())
    }

    fn handle_details_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => self.close_details(),
            KeyCode::Char('?') => self.toggle_help(),
            _ => {}
        }
        Ok(())
    }

    fn handle_gift_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.gift.close();
                self.view = View::Home;
            }
            KeyCode::Enter => self.open_gift(),
            KeyCode::Char('d') => {
                if let GiftPhase::Revealed(movie) = self.gift.phase() {
                    let movie = movie.clone();
                    self.open_details(movie);
                }
            }
            KeyCode::Char('?') => self.toggle_help(),
            _ => {}
        }
        Ok(())
    }

    fn handle_language_input(&mut self, key: KeyCode) -> Result<()> {
        let count = Language::all().len();
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.view = View::Home;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let next = self.language_state.selected().map_or(0, |i| (i + 1).min(count - 1));
                self.language_state.select(Some(next));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = self.language_state.selected().map_or(0, |i| i.saturating_sub(1));
                self.language_state.select(Some(prev));
            }
            KeyCode::Enter => {
                let chosen = self
                    .language_state
                    .selected()
                    .and_then(|i| Language::all().get(i).copied());
                if let Some(language) = chosen {
                    if language != self.language {
                        self.set_language(language);
                    }
                }
                self.view = View::Home;
            }
            _ => {}
        }
        Ok(())
    }

    fn toggle_help(&mut self) {
        if self.view == View::Help {
            self.view = self.previous_view;
        } else {
            self.previous_view = self.view;
            self.view = View::Help;
        }
    }

    fn render_help(&self, frame: &mut Frame) {
        use ratatui::style::Modifier;
        use ratatui::widgets::{Block, Borders, Clear, Row, Table};

        let rows = vec![
            Row::new(vec!["Global", "?", "Toggle Help"]),
            Row::new(vec!["", "Ctrl-c", "Quit"]),
            Row::new(vec!["Home", "Tab", "Movies / TV Shows"]),
            Row::new(vec!["", "j/k", "Previous / Next Section"]),
            Row::new(vec!["", "h/l", "Previous / Next Card"]),
            Row::new(vec!["", "Enter", "Details"]),
            Row::new(vec!["", "L", "Choose Language"]),
            Row::new(vec!["", "t", "Toggle Language"]),
            Row::new(vec!["", "g", "Santa's Gift"]),
            Row::new(vec!["", "r", "Retry Failed Lists"]),
            Row::new(vec!["", "q", "Quit"]),
            Row::new(vec!["Details", "Esc", "Back"]),
            Row::new(vec!["Gift", "Enter", "Open / Another Gift"]),
            Row::new(vec!["", "d", "Details"]),
            Row::new(vec!["", "Esc", "Back"]),
        ];

        let height = rows.len() as u16 + 3;
        let dialog_area = widgets::centered_rect(64, height, frame.area());
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let table = Table::new(
            rows,
            &[
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(60),
            ],
        )
        .header(
            Row::new(vec!["Context", "Key", "Action"]).style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(self.accent),
            ),
        )
        .block(Block::default().borders(Borders::NONE));

        frame.render_widget(table, inner);
    }

    fn handle_help_input(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.toggle_help();
            }
            _ => {}
        }
        Ok(())
    }
}

pub fn init_terminal() -> io::Result<DefaultTerminal> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    Ok(ratatui::init())
}

pub fn restore_terminal() -> io::Result<()> {
    ratatui::restore();
    Ok(())
}

const LOGO: &str = r#"
 █▀▄▀█ ▄▀█ █▀█ █▀█ █ █ █▀▀ █▀▀
 █ ▀ █ █▀█ █▀▄ ▀▀█ █▄█ ██▄ ██▄
"#;

const TAGLINE: &str = "now showing in your terminal";

const MARQUEE_LIGHTS: [&str; 2] = ["o . o . o . o . o . o . o . o", ". o . o . o . o . o . o . o ."];

/// Logo cut to its first `columns` characters on every line
fn logo_reveal(columns: usize) -> String {
    LOGO.lines()
        .map(|line| line.chars().take(columns).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw_splash(f: &mut Frame, logo: &str, lights: &str, tagline: bool, accent: Color) {
    use ratatui::{layout::Alignment, text::Text};

    let area = f.area();
    let lines = logo.lines().count() as u16 + 4;
    let y_offset = area.height.saturating_sub(lines) / 2;

    let mut text = Text::default();
    text.lines
        .push(Line::styled(lights.to_string(), Style::default().fg(Color::Yellow)));
    for line in logo.lines() {
        text.lines
            .push(Line::styled(line.to_string(), Style::default().fg(accent)));
    }
    text.lines
        .push(Line::styled(lights.to_string(), Style::default().fg(Color::Yellow)));
    if tagline {
        text.lines.push(Line::default());
        text.lines.push(Line::styled(
            TAGLINE,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let centered_area = Rect {
        x: 0,
        y: y_offset,
        width: area.width,
        height: lines.min(area.height),
    };
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        centered_area,
    );
}

pub fn play_splash(terminal: &mut DefaultTerminal, accent: Color) -> io::Result<()> {
    let width = LOGO.lines().map(|l| l.chars().count()).max().unwrap_or(0);

    for (i, step) in (1..=4).enumerate() {
        let logo = logo_reveal(width * step / 4);
        let lights = MARQUEE_LIGHTS[i % 2];
        terminal.draw(|f| draw_splash(f, &logo, lights, false, accent))?;
        thread::sleep(Duration::from_millis(150));
    }

    for i in 0..6 {
        terminal.draw(|f| draw_splash(f, LOGO, MARQUEE_LIGHTS[i % 2], true, accent))?;
        thread::sleep(Duration::from_millis(140));
    }

    terminal.draw(|_f| {})?;
    thread::sleep(Duration::from_millis(100));

    Ok(())
}
