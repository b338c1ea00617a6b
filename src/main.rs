use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use rank_terminal::normalize::Tier;
use rank_terminal::roster_feed;
use rank_terminal::state::{self, AppState, LoadPhase, apply_delta};
use rank_terminal::view::{PodiumSlot, podium_slots, table_rows};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') | KeyCode::Char('T') => self.state.cycle_team_filter(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.state.cycle_tier_filter(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.state.reset_filters(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    roster_feed::spawn_roster_provider(tx);

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_podium(frame, chunks[1], &app.state);
    render_table(frame, chunks[2], &app.state);

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = format!(
        "PLAYER RANKING | Team: {} | Tier: {}",
        state.team_filter.label(),
        state.tier_filter.label()
    );
    let line1 = format!("  ___  {}", title);
    let line2 = " |_1_|".to_string();
    let line3 = "_|2 3|_".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    let keys = "t Team | n Tier | x Reset | j/k/↑/↓ Move | ? Help | q Quit";
    let updated = state
        .fetched_at
        .map(|at| format!("Updated {}", format_clock(at)))
        .unwrap_or_default();
    match state.latest_log() {
        Some(log) if updated.is_empty() => format!("{keys}  |  {log}"),
        Some(log) => format!("{keys}  |  {updated}  |  {log}"),
        None => keys.to_string(),
    }
}

fn format_clock(at: SystemTime) -> String {
    DateTime::<Local>::from(at).format("%H:%M:%S").to_string()
}

fn render_podium(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Podium").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match state.phase {
        LoadPhase::Loading => {
            let loading =
                Paragraph::new("Waiting for data…").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(loading, inner);
            return;
        }
        LoadPhase::Failed => {
            let error =
                Paragraph::new("Failed to load podium").style(Style::default().fg(Color::Red));
            frame.render_widget(error, inner);
            return;
        }
        LoadPhase::Ready => {}
    }

    // Podium always reflects the unfiltered store.
    let slots = podium_slots(&state.players);
    if slots.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = slots
        .iter()
        .map(|_| Constraint::Ratio(1, slots.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (slot, column) in slots.iter().zip(columns.iter()) {
        render_podium_slot(frame, *column, slot);
    }
}

fn render_podium_slot(frame: &mut Frame, area: Rect, slot: &PodiumSlot) {
    let first = slot.ordinal == "1st";
    let title_style = if first {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let text = vec![
        Line::from(Span::styled(
            format!("{} {}", slot.medal, slot.ordinal),
            title_style,
        )),
        Line::from(slot.name.clone()),
        Line::from(Span::styled(
            slot.team.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            slot.tier.label(),
            Style::default().fg(tier_color(slot.tier)),
        )),
        Line::from(format!("{} pts", slot.score)),
    ];

    let card = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(card, area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = table_columns();
    render_table_header(frame, sections[0], &widths);

    let list_area = sections[1];
    match state.phase {
        LoadPhase::Loading => {
            let loading = Paragraph::new("⏳ Loading data… please wait")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(loading, list_area);
            return;
        }
        LoadPhase::Failed => {
            let error =
                Paragraph::new("⚠ Failed to load data. Check your connection and retry later")
                    .style(Style::default().fg(Color::Red));
            frame.render_widget(error, list_area);
            return;
        }
        LoadPhase::Ready => {}
    }

    let filtered = state.filtered_players();
    let rows = table_rows(&filtered);
    if rows.is_empty() {
        let empty = Paragraph::new("No players found. Try adjusting the filters")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    if list_area.height == 0 {
        return;
    }
    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = &rows[idx];
        let rank_style = if row.highlight {
            row_style.fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            row_style
        };
        let tier_style = row_style.fg(tier_color(row.tier));

        render_cell_text(frame, cols[0], &format!("{}.", row.rank), rank_style);
        render_cell_text(frame, cols[1], &row.name, row_style);
        render_cell_text(frame, cols[2], &row.team, row_style);
        render_cell_text(frame, cols[3], row.tier.label(), tier_style);
        render_cell_text(frame, cols[4], &row.goals.to_string(), row_style);
        render_cell_text(frame, cols[5], &row.assists.to_string(), row_style);
        render_cell_text(frame, cols[6], &row.score, row_style);
    }
}

fn table_columns() -> [Constraint; 7] {
    [
        Constraint::Length(5),
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(8),
    ]
}

fn render_table_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Rank", style);
    render_cell_text(frame, cols[1], "Player", style);
    render_cell_text(frame, cols[2], "Team", style);
    render_cell_text(frame, cols[3], "Tier", style);
    render_cell_text(frame, cols[4], "Goals", style);
    render_cell_text(frame, cols[5], "Assists", style);
    render_cell_text(frame, cols[6], "Points", style);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Legendary => Color::Yellow,
        Tier::Elite => Color::Magenta,
        Tier::Professional => Color::Cyan,
        Tier::Advanced => Color::Green,
        Tier::Intermediate => Color::Gray,
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Player Ranking - Help",
        "",
        "  t            Cycle team filter",
        "  n            Cycle tier filter",
        "  x            Reset both filters",
        "  j/k or ↑/↓   Move/scroll",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "The podium always shows the overall top three;",
        "filters only narrow the table below it.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
