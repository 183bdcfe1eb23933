//! Dashboard application — view state, activation, and the event loop.
//!
//! [`DashboardApp`] owns the single piece of view state the whole UI hangs
//! off: the active tab, the per-panel generation counters, and the six
//! panel states. All mutation happens on the UI thread; background fetch
//! threads only ever hand back stamped [`FetchOutcome`]s over a channel.
//!
//! Activation rules:
//! - activating a tab makes exactly one panel visible and invokes its
//!   loader exactly once, including re-activating the current tab;
//! - activation by string id is a silent no-op for unknown ids;
//! - every activation and submit bumps that panel's generation, so an
//!   outcome carrying an older stamp is discarded before it can touch any
//!   state. The Ask panel is the one exception on activation: its
//!   transcript is append-only and an in-flight answer must still land.

pub mod tabs;
pub mod worker;

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs as TabsWidget};

use crate::api::ApiClient;
use crate::api::trace::TraceLog;
use crate::config::DashConfig;
use crate::panels::PanelStatus;
use crate::panels::ask::AskPanel;
use crate::panels::cosine::CosinePanel;
use crate::panels::events::EventsPanel;
use crate::panels::logs::LogsPanel;
use crate::panels::similarity::SimilarityPanel;
use crate::panels::umap::UmapPanel;
use crate::ui::palette;

pub use tabs::Tab;
use worker::{FetchJob, FetchOutcome, FetchPayload, spawn_fetch};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Build the client from config and run the dashboard until quit.
pub fn run_dashboard(config: &DashConfig) -> Result<()> {
    let client = ApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
        TraceLog::from_enabled(config.trace.enabled),
    );
    let mut app = DashboardApp::new(client, config.ui.tick_ms);
    app.run()
}

/// RAII guard restoring the terminal even if a draw panics.
struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

/// Whether keystrokes navigate or type into the active panel's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Editing,
}

pub struct DashboardApp {
    client: ApiClient,
    tick_ms: u64,

    active: Tab,
    /// Per-panel load generation; an outcome is applied only if its stamp
    /// matches the panel's current value.
    generations: [u64; 6],
    /// Loader invocations per panel, counted per activation.
    load_counts: [u64; 6],
    input_mode: InputMode,
    should_quit: bool,
    tick: u64,

    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,

    pub events: EventsPanel,
    pub similarity: SimilarityPanel,
    pub cosine: CosinePanel,
    pub ask: AskPanel,
    pub umap: UmapPanel,
    pub logs: LogsPanel,
}

impl DashboardApp {
    /// Create the app and activate the default tab (Events).
    pub fn new(client: ApiClient, tick_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            client,
            tick_ms,
            active: Tab::Events,
            generations: [0; 6],
            load_counts: [0; 6],
            input_mode: InputMode::Normal,
            should_quit: false,
            tick: 0,
            tx,
            rx,
            events: EventsPanel::default(),
            similarity: SimilarityPanel::default(),
            cosine: CosinePanel::default(),
            ask: AskPanel::default(),
            umap: UmapPanel::default(),
            logs: LogsPanel::default(),
        };
        app.activate(Tab::Events);
        app
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Loader invocations for a tab (activation-triggered).
    pub fn load_count(&self, tab: Tab) -> u64 {
        self.load_counts[tab.index()]
    }

    /// Current load generation for a tab.
    pub fn generation(&self, tab: Tab) -> u64 {
        self.generations[tab.index()]
    }

    // -- Activation ---------------------------------------------------------

    /// Activate a tab: make its panel the visible one and invoke its
    /// loader. Re-activating the active tab restarts its load.
    pub fn activate(&mut self, tab: Tab) {
        self.active = tab;
        self.input_mode = InputMode::Normal;
        self.load_counts[tab.index()] += 1;

        // Invalidate that panel's in-flight load. Ask is exempt: a pending
        // answer still belongs in the append-only transcript.
        if tab != Tab::AskAi {
            self.generations[tab.index()] += 1;
        }

        match tab {
            Tab::Events => {
                self.events.status = PanelStatus::Loading;
                self.events.show_table = false;
                self.spawn(tab, FetchJob::Events);
            }
            Tab::Umap => {
                self.umap.status = PanelStatus::Loading;
                self.spawn(tab, FetchJob::Umap);
            }
            Tab::Logs => {
                self.logs.status = PanelStatus::Loading;
                self.spawn(tab, FetchJob::Logs);
            }
            Tab::Similarity => self.similarity.reset(),
            Tab::Cosine => self.cosine.reset(),
            Tab::AskAi => {}
        }
    }

    /// Activate by string id. Unknown identifiers are a silent no-op; the
    /// identifier set is statically known.
    pub fn activate_id(&mut self, id: &str) {
        if let Some(tab) = Tab::from_id(id) {
            self.activate(tab);
        }
    }

    fn spawn(&self, tab: Tab, job: FetchJob) {
        spawn_fetch(
            self.client.clone(),
            tab,
            self.generations[tab.index()],
            job,
            self.tx.clone(),
        );
    }

    // -- Form submits -------------------------------------------------------

    fn submit_active_form(&mut self) {
        match self.active {
            Tab::Similarity => {
                if let Some(job) = self.similarity.submit() {
                    self.generations[Tab::Similarity.index()] += 1;
                    self.similarity.status = PanelStatus::Loading;
                    self.spawn(Tab::Similarity, job);
                }
            }
            Tab::Cosine => {
                if let Some(job) = self.cosine.submit() {
                    self.generations[Tab::Cosine.index()] += 1;
                    self.cosine.status = PanelStatus::Loading;
                    self.spawn(Tab::Cosine, job);
                }
            }
            Tab::AskAi => {
                if let Some(question) = self.ask.submit() {
                    self.generations[Tab::AskAi.index()] += 1;
                    self.spawn(Tab::AskAi, FetchJob::Ask { question });
                }
            }
            _ => {}
        }
    }

    // -- Outcomes -----------------------------------------------------------

    /// Apply a fetch outcome, discarding stale generations first.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generations[outcome.tab.index()] {
            // Superseded by a newer activation or submit.
            return;
        }

        match (outcome.tab, outcome.result) {
            (Tab::Events, Ok(FetchPayload::Events(records))) => self.events.apply(Ok(records)),
            (Tab::Events, Err(e)) => self.events.apply(Err(e)),
            (Tab::Similarity, Ok(FetchPayload::Similarity(rows))) => {
                self.similarity.apply(Ok(rows));
            }
            (Tab::Similarity, Err(e)) => self.similarity.apply(Err(e)),
            (Tab::Cosine, Ok(FetchPayload::Cosine(comparison))) => {
                self.cosine.apply(Ok(comparison));
            }
            (Tab::Cosine, Err(e)) => self.cosine.apply(Err(e)),
            (Tab::AskAi, Ok(FetchPayload::Ask(answer))) => self.ask.apply(Ok(answer)),
            (Tab::AskAi, Err(e)) => self.ask.apply(Err(e)),
            (Tab::Umap, Ok(FetchPayload::Umap(projection))) => self.umap.apply(Ok(projection)),
            (Tab::Umap, Err(e)) => self.umap.apply(Err(e)),
            (Tab::Logs, Ok(FetchPayload::Logs(lines))) => self.logs.apply(Ok(lines)),
            (Tab::Logs, Err(e)) => self.logs.apply(Err(e)),
            // The worker always pairs payloads with their tab.
            _ => {}
        }
    }

    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    // -- Event loop ---------------------------------------------------------

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let _cleanup = TerminalCleanup;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        std::mem::forget(_cleanup);

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            self.drain_outcomes();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(self.tick_ms))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code, key.modifiers);
            }

            self.tick = self.tick.wrapping_add(1);
        }
        Ok(())
    }

    // -- Keys ---------------------------------------------------------------

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing => self.handle_editing_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char(c @ '1'..='6') => {
                let index = (c as u8 - b'1') as usize;
                self.activate(Tab::ALL[index]);
            }
            KeyCode::Tab => self.activate(self.active.next()),
            KeyCode::BackTab => self.activate(self.active.previous()),
            KeyCode::Char('r') => self.activate(self.active),

            KeyCode::Char('i') | KeyCode::Char('/') if self.active.has_form() => {
                self.input_mode = InputMode::Editing;
            }

            KeyCode::Char('t') if self.active == Tab::Events => self.events.toggle_table(),
            KeyCode::Char('e') if self.active == Tab::AskAi => {
                if let Err(e) = self.ask.export() {
                    self.ask.notice = Some(e.to_string());
                }
            }

            KeyCode::Up | KeyCode::Char('k') => match self.active {
                Tab::Events => self.events.scroll_up(),
                Tab::Similarity => self.similarity.scroll_up(),
                Tab::Logs => self.logs.scroll_up(),
                _ => {}
            },
            KeyCode::Down | KeyCode::Char('j') => match self.active {
                Tab::Events => self.events.scroll_down(),
                Tab::Similarity => self.similarity.scroll_down(),
                Tab::Logs => self.logs.scroll_down(),
                _ => {}
            },

            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => self.submit_active_form(),
            KeyCode::Tab if self.active == Tab::Cosine => self.cosine.switch_focus(),
            KeyCode::Backspace => match self.active {
                Tab::Similarity => self.similarity.input.backspace(),
                Tab::Cosine => self.cosine.focused_input().backspace(),
                Tab::AskAi => self.ask.input.backspace(),
                _ => {}
            },
            KeyCode::Char(c) => match self.active {
                Tab::Similarity => self.similarity.input.push_char(c),
                Tab::Cosine => self.cosine.focused_input().push_char(c),
                Tab::AskAi => self.ask.input.push_char(c),
                _ => {}
            },
            _ => {}
        }
    }

    // -- Drawing ------------------------------------------------------------

    fn draw(&mut self, f: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);

        let editing = self.input_mode == InputMode::Editing;
        match self.active {
            Tab::Events => self.events.render(f, chunks[1], self.tick),
            Tab::Similarity => self.similarity.render(f, chunks[1], self.tick, editing),
            Tab::Cosine => self.cosine.render(f, chunks[1], self.tick, editing),
            Tab::AskAi => self.ask.render(f, chunks[1], editing),
            Tab::Umap => self.umap.render(f, chunks[1], self.tick),
            Tab::Logs => self.logs.render(f, chunks[1], self.tick),
        }

        self.draw_footer(f, chunks[2]);
    }

    fn draw_header(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let style = if *tab == self.active {
                    Style::default().fg(palette::TAB_ACTIVE).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette::TAB_INACTIVE)
                };
                Line::from(Span::styled(format!("{} {}", i + 1, tab.title()), style))
            })
            .collect();

        let tabs = TabsWidget::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette::BORDER))
                    .title(Span::styled(
                        " PLANTDASH · Smart Manufacturing ",
                        Style::default().fg(palette::ACCENT).add_modifier(Modifier::BOLD),
                    )),
            )
            .select(self.active.index())
            .highlight_style(Style::default().fg(palette::TAB_ACTIVE));

        f.render_widget(tabs, area);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(40)])
            .split(area);

        let hints = match (self.input_mode, self.active) {
            (InputMode::Editing, _) => "typing…  Enter submit   Esc done",
            (_, Tab::Events) => "q quit  1-6 panels  r reload  t table  ↑↓ scroll",
            (_, Tab::AskAi) => "q quit  1-6 panels  i ask  e export",
            (_, tab) if tab.has_form() => "q quit  1-6 panels  i edit  r reset",
            _ => "q quit  1-6 panels  Tab cycle  r reload  ↑↓ scroll",
        };
        f.render_widget(
            Paragraph::new(Line::styled(hints, Style::default().fg(palette::MUTED))),
            chunks[0],
        );

        f.render_widget(
            Paragraph::new(Line::styled(
                self.client.base_url().to_string(),
                Style::default().fg(palette::MUTED),
            ))
            .alignment(ratatui::layout::Alignment::Right),
            chunks[1],
        );
    }
}
