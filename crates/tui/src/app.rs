use std::{
    io,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use ryg_core::{
    transfer, view::EMPTY_COLLECTION_MESSAGE, AppConfig, CardView, GameLibrary, Notice,
    NoticeKind, ScoreTier,
};
use tokio::{spawn, sync::mpsc};
use tracing::{debug, error, info};

use crate::form::{AddGameForm, FormField};

const TICK_RATE: Duration = Duration::from_millis(250);
const BAR_LABEL_WIDTH: usize = 8;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    danger: Color,
    tier_low: Color,
    tier_mid_low: Color,
    tier_mid: Color,
    tier_mid_high: Color,
    tier_high: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            danger: Color::Red,
            tier_low: Color::Red,
            tier_mid_low: Color::LightRed,
            tier_mid: Color::Yellow,
            tier_mid_high: Color::LightGreen,
            tier_high: Color::Green,
        }
    }
}

impl Theme {
    fn tier_color(&self, tier: Option<ScoreTier>) -> Color {
        match tier {
            Some(ScoreTier::Low) => self.tier_low,
            Some(ScoreTier::MidLow) => self.tier_mid_low,
            Some(ScoreTier::Mid) => self.tier_mid,
            Some(ScoreTier::MidHigh) => self.tier_mid_high,
            Some(ScoreTier::High) => self.tier_high,
            None => self.muted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Collection,
    Stats,
    Import,
}

enum AppEvent {
    Input(Event),
    Tick,
    ImportRead {
        path: PathBuf,
        result: Result<String>,
    },
}

/// Terminal front end over a [`GameLibrary`].
pub struct RateApp {
    library: GameLibrary,
    config: AppConfig,
    theme: Theme,
    screen: Screen,
    state: UiState,
    form: Option<AddGameForm>,
    import_candidates: Vec<PathBuf>,
    pending_import: Option<PathBuf>,
    notice: Option<Notice>,
    event_tx: Option<mpsc::Sender<AppEvent>>,
}

impl RateApp {
    pub fn new(library: GameLibrary, config: AppConfig) -> Self {
        Self {
            library,
            config,
            theme: Theme::default(),
            screen: Screen::Collection,
            state: UiState::default(),
            form: None,
            import_candidates: Vec::new(),
            pending_import: None,
            notice: None,
            event_tx: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.notify_success(format!("Loaded {} games", self.library.len()));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        let outcome = loop {
            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err.into());
            }
            if self.state.should_quit {
                break Ok(());
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.state.should_quit {
                break Ok(());
            }
        };

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        outcome
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    error!(?err, "Input handling failed");
                    self.notify_error(format!("Error: {err:#}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            Some(AppEvent::ImportRead { path, result }) => {
                self.finish_import(&path, result);
                true
            }
            None => false,
        }
    }

    fn handle_tick(&mut self) {
        let ttl = self.config.notice_ttl();
        if self
            .notice
            .as_ref()
            .map(|notice| notice.is_expired(Instant::now(), ttl))
            .unwrap_or(false)
        {
            self.notice = None;
        }
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::success(message, Instant::now()));
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::error(message, Instant::now()));
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return Ok(());
        }
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        match self.screen {
            Screen::Collection => self.handle_collection_key(key),
            Screen::Stats => self.handle_stats_key(key),
            Screen::Import => self.handle_import_key(key),
        }
    }

    fn handle_collection_key(&mut self, key: KeyEvent) -> Result<()> {
        let total = self.library.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1, total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1, total),
            KeyCode::Char('g') | KeyCode::Home => self.state.move_to(0, total),
            KeyCode::Char('G') | KeyCode::End => self.state.move_to(usize::MAX, total),
            KeyCode::PageDown => {
                let page = self.state.list_height.max(1) as isize;
                self.state.move_cursor(page, total);
            }
            KeyCode::PageUp => {
                let page = self.state.list_height.max(1) as isize;
                self.state.move_cursor(-page, total);
            }
            KeyCode::Char('a') => {
                self.form = Some(AddGameForm::new());
                debug!("Add form opened");
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected()?,
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('i') => self.open_import(),
            KeyCode::Char('s') => {
                self.screen = Screen::Stats;
            }
            KeyCode::Char('r') => {
                self.library.reload()?;
                self.state.clamp_cursor(self.library.len());
                self.notify_success(format!("Reloaded {} games", self.library.len()));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_stats_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('s') => {
                self.screen = Screen::Collection;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_import_key(&mut self, key: KeyEvent) -> Result<()> {
        let total = self.import_candidates.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                self.screen = Screen::Collection;
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.move_import_cursor(1, total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_import_cursor(-1, total),
            KeyCode::Enter => {
                if let Some(path) = self.import_candidates.get(self.state.import_cursor).cloned()
                {
                    self.start_import(path);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left => form.focused_input().move_cursor(-1),
            KeyCode::Right => form.focused_input().move_cursor(1),
            KeyCode::Home => form.focused_input().move_home(),
            KeyCode::End => form.focused_input().move_end(),
            KeyCode::Backspace => form.focused_input().backspace(),
            KeyCode::Delete => form.focused_input().delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    form.focused_input().insert(ch);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let draft = match form.draft() {
            Ok(draft) => draft,
            Err(err) => {
                self.notify_error(err.to_string());
                return;
            }
        };
        match self.library.add(draft, Utc::now()).map(|_| ()) {
            Ok(()) => {
                self.form = None;
                let total = self.library.len();
                self.state.move_to(usize::MAX, total);
                self.notify_success("Game added to your garden!");
            }
            Err(err) => self.notify_error(format!("{err:#}")),
        }
    }

    fn delete_selected(&mut self) -> Result<()> {
        if let Some(removed) = self.library.delete(self.state.cursor)? {
            self.state.clamp_cursor(self.library.len());
            debug!(title = %removed.display_title(), "Deleted from list");
            self.notice = Some(Notice::error("Game deleted.", Instant::now()));
        }
        Ok(())
    }

    fn export(&mut self) {
        match self.library.export_to(&self.config.export_dir) {
            Ok(path) => self.notify_success(format!("Scores exported to {}", path.display())),
            Err(err) => {
                error!(?err, "Export failed");
                self.notify_error(format!("Export failed: {err:#}"));
            }
        }
    }

    fn open_import(&mut self) {
        self.import_candidates =
            transfer::import_candidates(&self.config.import_dir, self.config.import_depth);
        self.state.import_cursor = 0;
        if self.import_candidates.is_empty() {
            self.notify_error(format!(
                "No JSON files found in {}",
                self.config.import_dir.display()
            ));
        } else {
            self.screen = Screen::Import;
        }
    }

    fn start_import(&mut self, path: PathBuf) {
        if self.pending_import.is_some() {
            self.notify_error("An import is already in progress");
            return;
        }
        let Some(sender) = self.event_tx.clone() else {
            self.notify_error("Internal error: event channel unavailable");
            return;
        };
        info!(path = %path.display(), "Reading import file");
        self.pending_import = Some(path.clone());
        spawn(async move {
            let result = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()));
            let _ = sender.send(AppEvent::ImportRead { path, result }).await;
        });
    }

    fn finish_import(&mut self, path: &Path, result: Result<String>) {
        self.pending_import = None;
        let outcome = result.and_then(|text| self.library.import_json(&text));
        match outcome {
            Ok(count) => {
                info!(path = %path.display(), count, "Import complete");
                self.state.cursor = 0;
                self.state.offset = 0;
                self.screen = Screen::Collection;
                self.notify_success(format!("Scores imported successfully ({count} games)."));
            }
            Err(err) => {
                error!(path = %path.display(), ?err, "Import failed");
                self.notify_error(format!("Import failed: {err:#}"));
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Collection => self.draw_collection(frame),
            Screen::Stats => self.draw_stats(frame),
            Screen::Import => self.draw_import(frame),
        }
        if let Some(form) = &self.form {
            self.render_form(frame, form);
        }
    }

    fn draw_collection(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(4)])
            .split(size);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        let cards = self.library.cards();
        self.render_card_list(frame, body[0], &cards);
        self.render_card_detail(frame, body[1], cards.get(self.state.cursor));
        self.render_status(
            frame,
            rows[1],
            "a add  d delete  e export  i import  s stats  r reload  q quit",
        );
    }

    fn render_card_list(&mut self, frame: &mut Frame, area: Rect, cards: &[CardView]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Games ({})", cards.len()));
        if cards.is_empty() {
            let paragraph = Paragraph::new(EMPTY_COLLECTION_MESSAGE)
                .style(Style::default().fg(self.theme.muted))
                .alignment(Alignment::Center)
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.clamp_cursor(cards.len());
        self.state.ensure_cursor_visible(cards.len());

        let end = (self.state.offset + self.state.list_height).min(cards.len());
        let visible = &cards[self.state.offset..end];
        let items: Vec<ListItem> = visible
            .iter()
            .map(|card| {
                let is_selected = card.index == self.state.cursor;
                let marker = if is_selected {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let score = Span::styled(
                    format!("{:>3} ", score_text(card.score)),
                    Style::default()
                        .fg(self.theme.tier_color(card.tier))
                        .add_modifier(Modifier::BOLD),
                );
                let title = Span::styled(
                    card.title.clone(),
                    Style::default().fg(self.theme.primary_fg),
                );
                let mut line = vec![marker, score, title];
                if let Some(platform) = &card.platform {
                    line.push(Span::styled(
                        format!(" · {platform}"),
                        Style::default().fg(self.theme.muted),
                    ));
                }
                ListItem::new(Line::from(line))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.cursor.saturating_sub(self.state.offset)));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_card_detail(&self, frame: &mut Frame, area: Rect, card: Option<&CardView>) {
        let block = Block::default().borders(Borders::ALL).title("Details");
        let Some(card) = card else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let label = Style::default().fg(self.theme.muted);
        let mut lines = vec![
            Line::from(Span::styled(
                card.title.clone(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(
                    score_text(card.score),
                    Style::default()
                        .fg(self.theme.tier_color(card.tier))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        let optional = [
            ("Platform", card.platform.clone()),
            (
                "Added",
                card.date_added
                    .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
            ),
            ("Image", card.image_link.clone()),
            ("Reference", card.reference_link.clone()),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                lines.push(Line::from(vec![
                    Span::styled(format!("{name}: "), label),
                    Span::raw(value),
                ]));
            }
        }
        if let Some(notes) = &card.notes {
            lines.push(Line::from(""));
            lines.push(Line::from(notes.clone()));
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let size = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(size);
        let stats = self.library.stats_view();

        let summary = Paragraph::new(vec![
            Line::from(format!("Total games: {}", stats.total)),
            Line::from(format!("Average score: {}", stats.average_label)),
        ])
        .block(Block::default().borders(Borders::ALL).title("Statistics"));
        frame.render_widget(summary, rows[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Score distribution");
        if let Some(message) = stats.empty_message {
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(self.theme.muted))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, rows[1]);
        } else {
            let bar_room = (rows[1].width as usize).saturating_sub(BAR_LABEL_WIDTH + 10);
            let mut lines: Vec<Line> = stats
                .bars
                .iter()
                .map(|bar| {
                    let filled = (bar.width_percent / 100.0 * bar_room as f64).round() as usize;
                    Line::from(vec![
                        Span::raw(format!("{:>width$} ", bar.label, width = BAR_LABEL_WIDTH)),
                        Span::styled(
                            "█".repeat(filled),
                            Style::default().fg(self.theme.tier_color(Some(bar.tier))),
                        ),
                        Span::styled(
                            format!(" ({})", bar.count),
                            Style::default().fg(self.theme.muted),
                        ),
                    ])
                })
                .collect();
            if stats.out_of_range > 0 {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Outside 0-100: {}", stats.out_of_range),
                    Style::default().fg(self.theme.danger),
                )));
            }
            frame.render_widget(Paragraph::new(lines).block(block), rows[1]);
        }

        self.render_status(frame, rows[2], "b back  q quit");
    }

    fn draw_import(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(4)])
            .split(size);

        let root = self.config.import_dir.clone();
        let visible = rows[0].height.saturating_sub(2) as usize;
        let total = self.import_candidates.len();
        self.state.move_import_cursor(0, total);
        let offset = (self.state.import_cursor + 1).saturating_sub(visible.max(1));

        let items: Vec<ListItem> = self
            .import_candidates
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(idx, path)| {
                let shown = path.strip_prefix(&root).unwrap_or(path).display().to_string();
                let is_pending = self.pending_import.as_deref() == Some(path.as_path());
                let marker = if idx == self.state.import_cursor {
                    "▶ "
                } else {
                    "  "
                };
                let suffix = if is_pending { "  (reading…)" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(self.theme.accent)),
                    Span::raw(shown),
                    Span::styled(suffix, Style::default().fg(self.theme.muted)),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        if total > 0 {
            list_state.select(Some(self.state.import_cursor - offset));
        }
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Import from {}", root.display())),
            )
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, rows[0], &mut list_state);

        self.render_status(
            frame,
            rows[1],
            "Enter import (replaces your collection)  b back",
        );
    }

    fn render_form(&self, frame: &mut Frame, form: &AddGameForm) {
        let frame_area = frame.size();
        let height = (FormField::ALL.len() as u16 + 4).min(frame_area.height);
        let width = 70_u16.min(frame_area.width.saturating_sub(4)).max(30);
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let label_width = FormField::ALL
            .iter()
            .map(|field| field.label().len())
            .max()
            .unwrap_or(0);
        let mut cursor = None;
        let mut lines: Vec<Line> = Vec::new();
        for (row, (field, input)) in form.fields().enumerate() {
            let focused = field == form.focus();
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", field.label(), width = label_width),
                    label_style,
                ),
                Span::raw(input.value().to_string()),
            ]));
            if focused {
                let x = area.x + 1 + label_width as u16 + 2 + input.cursor() as u16;
                let y = area.y + 1 + row as u16;
                cursor = Some((x.min(area.x + area.width.saturating_sub(2)), y));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" save  "),
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" next field  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Add game"));
        frame.render_widget(paragraph, area);
        if let Some((x, y)) = cursor {
            frame.set_cursor(x, y);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, help: &str) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = match &self.notice {
            Some(notice) => {
                let color = match notice.kind {
                    NoticeKind::Success => self.theme.success,
                    NoticeKind::Error => self.theme.danger,
                };
                Line::from(Span::styled(
                    notice.message.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }
            None => Line::from(format!(
                "{} games · {}",
                self.library.len(),
                self.library.store().slot_path().display()
            )),
        };
        let secondary = Line::from(Span::styled(
            help.to_string(),
            Style::default().fg(self.theme.muted),
        ));
        let paragraph = Paragraph::new(vec![primary, secondary])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    cursor: usize,
    offset: usize,
    list_height: usize,
    import_cursor: usize,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            list_height: 1,
            import_cursor: 0,
            should_quit: false,
        }
    }
}

impl UiState {
    fn move_cursor(&mut self, delta: isize, total: usize) {
        if total == 0 {
            return;
        }
        let idx = (self.cursor as isize + delta).clamp(0, total as isize - 1);
        self.cursor = idx as usize;
        self.ensure_cursor_visible(total);
    }

    fn move_to(&mut self, index: usize, total: usize) {
        if total == 0 {
            return;
        }
        self.cursor = index.min(total - 1);
        self.ensure_cursor_visible(total);
    }

    fn clamp_cursor(&mut self, total: usize) {
        if total == 0 {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= total {
            self.cursor = total - 1;
        }
    }

    fn ensure_cursor_visible(&mut self, total: usize) {
        if total == 0 || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        let max_offset = total.saturating_sub(height);

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }

    fn move_import_cursor(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.import_cursor = 0;
            return;
        }
        let idx = (self.import_cursor as isize + delta).clamp(0, total as isize - 1);
        self.import_cursor = idx as usize;
    }
}

fn score_text(score: Option<i64>) -> String {
    score.map_or_else(|| "-".to_string(), |score| score.to_string())
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
