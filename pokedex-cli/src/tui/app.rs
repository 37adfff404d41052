use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use pokedex_core::session::CategoryOutcome;
use pokedex_core::{BrowserSession, CatalogConfig, CatalogSource, Record};
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal, Frame,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time;
use tracing::{debug, info};
use tui_input::InputRequest;

use super::events::AppEvent;
use super::state::{BrowseState, Focus};
use super::theme::Theme;

/// Rows moved by PageUp/PageDown
const PAGE: isize = 10;

/// Main application struct
pub struct App {
    /// Records, filter mode and detail slot
    session: BrowserSession,
    /// Cursors, focus and search box
    ui: BrowseState,
    /// Whether the app should quit
    should_quit: bool,
    theme: Theme,
    config: CatalogConfig,
    source: Arc<dyn CatalogSource>,
    /// Event sender for background lookups
    event_tx: Option<UnboundedSender<AppEvent>>,
}

impl App {
    pub fn new(source: Arc<dyn CatalogSource>, config: CatalogConfig) -> Self {
        Self {
            session: BrowserSession::new(),
            ui: BrowseState::new(),
            should_quit: false,
            theme: Theme::default(),
            config,
            source,
            event_tx: None,
        }
    }

    /// Run the application
    pub async fn run(mut self) -> Result<()> {
        info!("Starting browser against '{}'", self.source.name());

        let mut terminal = ratatui::init();
        terminal.clear()?;

        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        self.event_tx = Some(event_tx.clone());

        spawn_input_reader(event_tx);
        self.spawn_initial_load();

        let result = self.main_loop(&mut terminal, &mut event_rx).await;

        ratatui::restore();
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        event_rx: &mut UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            match time::timeout(Duration::from_millis(250), event_rx.recv()).await {
                Ok(Some(event)) => self.handle_event(event),
                Ok(None) => break,
                Err(_) => self.handle_event(AppEvent::Tick),
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        super::view::render(frame, &self.session, &self.ui, &self.theme, &self.config);
    }

    /// Apply one event to the session and UI state
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => {}
            AppEvent::RecordsLoaded(result) => {
                self.ui.loading_records = false;
                if self.session.load_records(result) {
                    // Keep the list consistent with anything typed during startup
                    if !self.ui.query().trim().is_empty() {
                        let query = self.ui.query().to_string();
                        self.session.search(&query);
                    }
                } else {
                    self.ui.status = Some("Could not load the catalog".to_string());
                }
            }
            AppEvent::CategoriesLoaded(result) => {
                if !self.session.load_categories(result) {
                    self.ui.status = Some("Could not load types".to_string());
                }
            }
            AppEvent::CategoryLoaded { request, result } => {
                match self.session.apply_category(&request, result) {
                    CategoryOutcome::Applied(count) => {
                        debug!("Showing {} records of '{}'", count, request.name);
                        self.ui.list_index = 0;
                        self.ui.status = None;
                    }
                    CategoryOutcome::Stale => {}
                    CategoryOutcome::Failed => {
                        self.ui.status =
                            Some(format!("Could not load records of type '{}'", request.name));
                    }
                }
            }
            AppEvent::DetailLoaded { request, result } => {
                if !self.session.apply_detail(&request, result) {
                    self.ui.status = Some(format!("Could not load details for '{}'", request.name));
                }
            }
        }

        self.ui.clamp_list(self.session.displayed().len());
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.ui.focus = self.ui.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.ui.focus = self.ui.focus.prev();
                return;
            }
            _ => {}
        }

        match self.ui.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Categories => self.handle_category_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let request = match key.code {
            KeyCode::Esc => {
                if self.ui.query().is_empty() {
                    self.should_quit = true;
                } else {
                    self.ui.search_input.reset();
                    self.apply_search();
                }
                return;
            }
            KeyCode::Enter | KeyCode::Down => {
                self.ui.focus = Focus::List;
                return;
            }
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };

        let before = self.ui.query().to_string();
        self.ui.search_input.handle(request);
        if self.ui.query() != before {
            self.apply_search();
        }
    }

    fn apply_search(&mut self) {
        let query = self.ui.query().to_string();
        self.session.search(&query);
        self.ui.list_index = 0;
    }

    fn handle_category_key(&mut self, key: KeyEvent) {
        let count = self.session.categories().len();
        match key.code {
            KeyCode::Left => self.ui.move_category(-1, count),
            KeyCode::Right => self.ui.move_category(1, count),
            KeyCode::Home => self.ui.category_index = 0,
            KeyCode::End => self.ui.category_index = count,
            KeyCode::Enter | KeyCode::Char(' ') => self.select_category_under_cursor(),
            KeyCode::Down => self.ui.focus = Focus::List,
            KeyCode::Up => self.ui.focus = Focus::Search,
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn select_category_under_cursor(&mut self) {
        if self.ui.category_index == 0 {
            self.session.show_all();
            self.ui.list_index = 0;
            return;
        }

        let Some(name) = self
            .session
            .categories()
            .get(self.ui.category_index - 1)
            .cloned()
        else {
            return;
        };

        let request = self.session.begin_category(&name);
        if let Some(tx) = &self.event_tx {
            let source = Arc::clone(&self.source);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = source.fetch_records_by_category(&request.name).await;
                let _ = tx.send(AppEvent::CategoryLoaded { request, result });
            });
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let len = self.session.displayed().len();
        match key.code {
            KeyCode::Up => {
                if self.ui.list_index == 0 {
                    self.ui.focus = Focus::Categories;
                } else {
                    self.ui.move_list(-1, len);
                }
            }
            KeyCode::Down => self.ui.move_list(1, len),
            KeyCode::PageUp => self.ui.move_list(-PAGE, len),
            KeyCode::PageDown => self.ui.move_list(PAGE, len),
            KeyCode::Home => self.ui.list_index = 0,
            KeyCode::End => self.ui.list_index = len.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(record) = self.session.displayed().get(self.ui.list_index).cloned() {
                    self.select_record(&record);
                }
            }
            KeyCode::Char('/') => self.ui.focus = Focus::Search,
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn select_record(&mut self, record: &Record) {
        let request = self.session.begin_detail(record);
        if let Some(tx) = &self.event_tx {
            let source = Arc::clone(&self.source);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = source.fetch_detail(&request.source_ref).await;
                let _ = tx.send(AppEvent::DetailLoaded { request, result });
            });
        }
    }

    /// Spawn the startup record and category lookups
    fn spawn_initial_load(&self) {
        let Some(tx) = &self.event_tx else {
            return;
        };

        let source = Arc::clone(&self.source);
        let records_tx = tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_all_records().await;
            let _ = records_tx.send(AppEvent::RecordsLoaded(result));
        });

        let source = Arc::clone(&self.source);
        let categories_tx = tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_category_names().await;
            let _ = categories_tx.send(AppEvent::CategoriesLoaded(result));
        });
    }
}

/// Forward terminal input to the event channel until the receiver is gone
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => break,
            }

            let sent = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };

            if sent.is_err() {
                break;
            }
        }
    });
}
