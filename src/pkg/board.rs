use std::io;
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Paragraph, Row, Table, TableState};

use crate::pkg::client::{
    api::{HttpJobsApi, JobsApi},
    controller::{Field, Filter, NoticeLevel, Tracker},
    theme::ThemePreference,
};
use crate::prelude::Result;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form(Field),
    Search,
    Table,
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::Form(Field::Company),
        Focus::Form(Field::Position),
        Focus::Form(Field::Status),
        Focus::Form(Field::Date),
        Focus::Form(Field::Link),
        Focus::Search,
        Focus::Table,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What the user asked for, decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Quit,
    FocusNext,
    FocusPrev,
    Type(char),
    Backspace,
    StatusNext,
    StatusPrev,
    Submit,
    SelectUp,
    SelectDown,
    EditSelected,
    DeleteSelected,
    CycleFilter,
    ToggleTheme,
    Reload,
    CancelEdit,
}

fn intent_for(focus: Focus, editing: bool, key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            KeyCode::Char('t') => Some(Intent::ToggleTheme),
            KeyCode::Char('f') => Some(Intent::CycleFilter),
            KeyCode::Char('r') => Some(Intent::Reload),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Tab => return Some(Intent::FocusNext),
        KeyCode::BackTab => return Some(Intent::FocusPrev),
        KeyCode::Esc if editing => return Some(Intent::CancelEdit),
        KeyCode::Esc => return Some(Intent::Quit),
        _ => {}
    }
    match focus {
        Focus::Form(Field::Status) => match key.code {
            KeyCode::Left => Some(Intent::StatusPrev),
            KeyCode::Right | KeyCode::Char(' ') => Some(Intent::StatusNext),
            KeyCode::Enter => Some(Intent::Submit),
            _ => None,
        },
        Focus::Form(_) => match key.code {
            KeyCode::Char(c) => Some(Intent::Type(c)),
            KeyCode::Backspace => Some(Intent::Backspace),
            KeyCode::Enter => Some(Intent::Submit),
            _ => None,
        },
        Focus::Search => match key.code {
            KeyCode::Char(c) => Some(Intent::Type(c)),
            KeyCode::Backspace => Some(Intent::Backspace),
            _ => None,
        },
        Focus::Table => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Intent::SelectUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Intent::SelectDown),
            KeyCode::Char('e') => Some(Intent::EditSelected),
            KeyCode::Char('d') => Some(Intent::DeleteSelected),
            _ => None,
        },
    }
}

struct Board {
    focus: Focus,
    table: TableState,
    should_quit: bool,
}

impl Board {
    fn new() -> Self {
        Board {
            focus: Focus::Form(Field::Company),
            table: TableState::default(),
            should_quit: false,
        }
    }

    fn clamp_selection(&mut self, rows: usize) {
        self.table.select(match (self.table.selected(), rows) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) => Some(i.min(n - 1)),
        });
    }

    fn selected_id<A: JobsApi>(&self, tracker: &Tracker<A>) -> Option<String> {
        let idx = self.table.selected()?;
        tracker.visible().get(idx).map(|j| j.id.to_string())
    }
}

async fn apply<A: JobsApi>(
    intent: Intent,
    board: &mut Board,
    tracker: &mut Tracker<A>,
    theme: &mut ThemePreference,
) {
    match intent {
        Intent::Quit => board.should_quit = true,
        Intent::FocusNext => board.focus = board.focus.next(),
        Intent::FocusPrev => board.focus = board.focus.prev(),
        Intent::Type(c) => match board.focus {
            Focus::Form(field) => {
                let mut value = tracker.draft.get(field);
                value.push(c);
                tracker.set_field(field, &value);
            }
            Focus::Search => {
                let mut term = tracker.search_term.clone();
                term.push(c);
                tracker.set_search(&term);
            }
            Focus::Table => {}
        },
        Intent::Backspace => match board.focus {
            Focus::Form(field) => {
                let mut value = tracker.draft.get(field);
                value.pop();
                tracker.set_field(field, &value);
            }
            Focus::Search => {
                let mut term = tracker.search_term.clone();
                term.pop();
                tracker.set_search(&term);
            }
            Focus::Table => {}
        },
        Intent::StatusNext => {
            let status = tracker.draft.status.next();
            tracker.set_field(Field::Status, status.as_str());
        }
        Intent::StatusPrev => {
            let status = tracker.draft.status.prev();
            tracker.set_field(Field::Status, status.as_str());
        }
        Intent::Submit => tracker.submit().await,
        Intent::SelectUp => {
            let i = board.table.selected().unwrap_or(0);
            board.table.select(Some(i.saturating_sub(1)));
        }
        Intent::SelectDown => {
            let i = board.table.selected().map(|i| i + 1).unwrap_or(0);
            board.table.select(Some(i));
        }
        Intent::EditSelected => {
            if let Some(id) = board.selected_id(tracker) {
                tracker.edit(&id);
                board.focus = Focus::Form(Field::Company);
            }
        }
        Intent::DeleteSelected => {
            if let Some(id) = board.selected_id(tracker) {
                tracker.delete(&id).await;
            }
        }
        Intent::CycleFilter => {
            let next = tracker.filter.next();
            tracker.set_filter(next);
        }
        Intent::ToggleTheme => {
            if let Err(e) = theme.toggle() {
                tracing::error!("could not persist theme: {}", e);
            }
        }
        Intent::Reload => tracker.load().await,
        Intent::CancelEdit => tracker.cancel_edit(),
    }
    board.clamp_selection(tracker.visible().len());
}

struct Palette {
    base: Style,
    accent: Color,
    focused: Style,
}

fn palette(dark: bool) -> Palette {
    let base = if dark {
        Style::default().fg(Color::White).bg(Color::Black)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    };
    Palette {
        base,
        accent: Color::Blue,
        focused: base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
    }
}

fn boxed<'a>(title: &'a str, focused: bool, p: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(p.base)
        .border_style(if focused { p.focused } else { p.base })
}

fn draw<A: JobsApi>(frame: &mut Frame, board: &mut Board, tracker: &Tracker<A>, dark: bool) {
    let p = palette(dark);
    frame.render_widget(Block::default().style(p.base), frame.size());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(10),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let theme_label = if dark { "Light Mode (ctrl+t)" } else { "Dark Mode (ctrl+t)" };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Student Job Tracker", p.base.add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(theme_label, p.base.fg(p.accent)),
        Span::raw("   tab: move  enter: save  ctrl+f: filter  ctrl+r: reload  esc: quit"),
    ]))
    .block(boxed("jobs", false, &p));
    frame.render_widget(header, rows[0]);

    let form = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
            Constraint::Percentage(22),
            Constraint::Percentage(10),
        ])
        .split(rows[1]);
    let mut cursor: Option<(u16, u16)> = None;
    for (field, area) in Field::ORDER.iter().zip(form.iter()) {
        let focused = board.focus == Focus::Form(*field);
        let value = tracker.draft.get(*field);
        let text = if *field == Field::Status {
            format!("< {} >", value)
        } else {
            value.clone()
        };
        frame.render_widget(
            Paragraph::new(text).block(boxed(field.label(), focused, &p)),
            *area,
        );
        if focused && *field != Field::Status {
            cursor = Some(text_cursor(*area, &value));
        }
    }
    let button = if tracker.edit_id.is_some() { "Update" } else { "Add Job" };
    frame.render_widget(
        Paragraph::new(Span::styled(button, p.base.fg(p.accent).add_modifier(Modifier::BOLD)))
            .block(boxed("", false, &p)),
        form[5],
    );

    let searching = board.focus == Focus::Search;
    frame.render_widget(
        Paragraph::new(tracker.search_term.as_str())
            .block(boxed("Search by company or position...", searching, &p)),
        rows[2],
    );
    if searching {
        cursor = Some(text_cursor(rows[2], &tracker.search_term));
    }

    let mut filters = vec![Span::styled("Filter:", p.base.add_modifier(Modifier::BOLD))];
    for choice in Filter::CHOICES {
        filters.push(Span::raw(" "));
        let style = if tracker.filter == choice {
            Style::default().fg(Color::White).bg(p.accent)
        } else {
            p.base
        };
        filters.push(Span::styled(format!(" {} ", choice.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(filters)).style(p.base), rows[3]);

    let visible = tracker.visible();
    let table_focused = board.focus == Focus::Table;
    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new("No job entries yet. Add one above!").block(boxed("", table_focused, &p)),
            rows[4],
        );
    } else {
        let body: Vec<Row> = visible
            .iter()
            .map(|j| {
                Row::new(vec![
                    j.company.clone(),
                    j.position.clone(),
                    j.status.to_string(),
                    j.date.clone(),
                    j.link.clone(),
                ])
            })
            .collect();
        let table = Table::new(
            body,
            [
                Constraint::Percentage(22),
                Constraint::Percentage(22),
                Constraint::Percentage(12),
                Constraint::Percentage(12),
                Constraint::Percentage(32),
            ],
        )
        .header(
            Row::new(vec!["Company", "Position", "Status", "Date", "Link"])
                .style(p.base.add_modifier(Modifier::BOLD)),
        )
        .block(boxed("e: edit  d: delete", table_focused, &p))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(table, rows[4], &mut board.table);
    }

    let counts = tracker.status_counts();
    let data: Vec<(&str, u64)> = counts
        .iter()
        .map(|(status, n)| (status.as_str(), *n as u64))
        .collect();
    let chart = BarChart::default()
        .block(boxed("Application Status Overview", false, &p))
        .data(data.as_slice())
        .bar_width(11)
        .bar_gap(3)
        .bar_style(Style::default().fg(p.accent))
        .value_style(Style::default().fg(Color::White).bg(p.accent))
        .label_style(p.base);
    frame.render_widget(chart, rows[5]);

    if let Some(notice) = tracker.last_notice() {
        let color = match notice.level {
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Error => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(notice.text.as_str(), p.base.fg(color))),
            rows[6],
        );
    }

    if let Some((x, y)) = cursor {
        frame.set_cursor(x, y);
    }
}

fn text_cursor(area: Rect, value: &str) -> (u16, u16) {
    let max_x = area.x + area.width.saturating_sub(2);
    let len = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
    let x = (area.x + 1).saturating_add(len).min(max_x);
    (x, area.y + 1)
}

pub async fn run(api_base_url: &str, theme_file: &str) -> Result<()> {
    let mut tracker = Tracker::new(HttpJobsApi::new(api_base_url)?);
    let mut theme = ThemePreference::load(theme_file);
    tracker.load().await;
    tracing::info!("board started against {} with {} jobs", api_base_url, tracker.jobs.len());

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut board = Board::new();
    board.clamp_selection(tracker.visible().len());

    loop {
        let dark = theme.dark_mode();
        terminal.draw(|frame| draw(frame, &mut board, &tracker, dark))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(intent) = intent_for(board.focus, tracker.edit_id.is_some(), key) {
                    apply(intent, &mut board, &mut tracker, &mut theme).await;
                }
            }
        }

        if board.should_quit {
            break;
        }
    }
    Ok(())
}
