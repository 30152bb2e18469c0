use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use cricket_terminal::auth::Credentials;
use cricket_terminal::config::{AppConfig, AuthMode};
use cricket_terminal::player::Field;
use cricket_terminal::provider;
use cricket_terminal::state::{apply_delta, AppState, Delta, ProviderCommand, Screen};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    prompt_reply_tx: mpsc::Sender<Option<Credentials>>,
    endpoints_label: String,
    auth_label: &'static str,
}

impl App {
    fn new(
        cmd_tx: mpsc::Sender<ProviderCommand>,
        prompt_reply_tx: mpsc::Sender<Option<Credentials>>,
        config: &AppConfig,
    ) -> Self {
        let auth_label = match config.auth {
            AuthMode::Required => "basic auth",
            AuthMode::Disabled => "no auth",
        };
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            prompt_reply_tx,
            endpoints_label: config.endpoints.join(" > "),
            auth_label,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.prompt.is_some() {
            self.on_prompt_key(key);
            return;
        }
        match self.state.screen {
            Screen::Home => self.on_home_key(key),
            Screen::Register => self.on_register_key(key),
            Screen::Roster => self.on_roster_key(key),
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => {
                self.state.notice = None;
                self.state.screen = Screen::Register;
            }
            KeyCode::Char('v') => self.open_roster(),
            KeyCode::Char('x') => {
                if self.cmd_tx.send(ProviderCommand::ClearCredentials).is_err() {
                    self.state.push_log("[WARN] Sign-out request failed");
                }
            }
            _ => {}
        }
    }

    fn on_register_key(&mut self, key: KeyEvent) {
        let field = self.state.focused_field();
        match key.code {
            KeyCode::Esc => self.state.screen = Screen::Home,
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_prev(),
            KeyCode::Enter => self.submit(),
            KeyCode::Left if field.is_select() => self.cycle_select(field, -1),
            KeyCode::Right if field.is_select() => self.cycle_select(field, 1),
            KeyCode::Char(' ') if field.is_select() => self.cycle_select(field, 1),
            KeyCode::Backspace if !field.is_select() => {
                self.state.form.value_mut(field).pop();
                self.state.touch_field(field);
                self.state.notice = None;
            }
            KeyCode::Char(c) if !field.is_select() => {
                self.state.form.value_mut(field).push(c);
                self.state.touch_field(field);
                self.state.notice = None;
            }
            _ => {}
        }
    }

    fn on_roster_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.state.screen = Screen::Home,
            KeyCode::Char('g') | KeyCode::Char('r') => self.request_roster(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_row(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev_row(),
            _ => {}
        }
    }

    fn on_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.state.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                let _ = self.prompt_reply_tx.send(None);
                self.state.prompt = None;
            }
            KeyCode::Tab => prompt.on_password = !prompt.on_password,
            KeyCode::Enter => {
                if prompt.on_password {
                    let creds = Credentials {
                        username: prompt.username.clone(),
                        password: prompt.password.clone(),
                    };
                    let _ = self.prompt_reply_tx.send(Some(creds));
                    self.state.prompt = None;
                } else {
                    prompt.on_password = true;
                }
            }
            KeyCode::Backspace => {
                if prompt.on_password {
                    prompt.password.pop();
                } else {
                    prompt.username.pop();
                }
            }
            KeyCode::Char(c) => {
                if prompt.on_password {
                    prompt.password.push(c);
                } else {
                    prompt.username.push(c);
                }
            }
            _ => {}
        }
    }

    fn cycle_select(&mut self, field: Field, step: isize) {
        let options = field.options();
        if options.is_empty() {
            return;
        }
        let current = self.state.form.value(field).to_string();
        let next = match options.iter().position(|opt| *opt == current) {
            Some(idx) => (idx as isize + step).rem_euclid(options.len() as isize) as usize,
            None if step < 0 => options.len() - 1,
            None => 0,
        };
        *self.state.form.value_mut(field) = options[next].to_string();
        self.state.touch_field(field);
        self.state.notice = None;
    }

    fn submit(&mut self) {
        if self.state.submitting {
            self.state.push_log("[INFO] Submission already in flight");
            return;
        }
        self.state.notice = None;
        let form = self.state.form.clone();
        if self
            .cmd_tx
            .send(ProviderCommand::SubmitPlayer { form })
            .is_err()
        {
            self.state.push_log("[WARN] Registration request failed");
            return;
        }
        self.state.submitting = true;
    }

    fn open_roster(&mut self) {
        self.state.screen = Screen::Roster;
        self.request_roster();
    }

    fn request_roster(&mut self) {
        if self.state.roster_loading {
            self.state.push_log("[INFO] Roster refresh already in flight");
            return;
        }
        if self.cmd_tx.send(ProviderCommand::FetchRoster).is_err() {
            self.state.push_log("[WARN] Roster request failed");
            return;
        }
        self.state.roster_loading = true;
        self.state.roster_error = None;
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (prompt_reply_tx, prompt_reply_rx) = mpsc::channel();
    provider::spawn_provider(config.clone(), tx, cmd_rx, prompt_reply_rx);

    let mut app = App::new(cmd_tx, prompt_reply_tx, &config);
    app.state
        .push_log(format!("[INFO] Endpoints: {}", app.endpoints_label));
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
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        if app.state.pending_roster_refresh {
            app.state.pending_roster_refresh = false;
            app.request_roster();
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
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Home => render_home(frame, chunks[1], app),
        Screen::Register => render_register(frame, chunks[1], &app.state),
        Screen::Roster => render_roster(frame, chunks[1], &app.state),
    }

    render_console(frame, chunks[2], &app.state);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.prompt.is_some() {
        render_prompt(frame, frame.size(), &app.state);
    }
}

fn header_text(app: &App) -> String {
    let screen = match app.state.screen {
        Screen::Home => "HOME",
        Screen::Register => "REGISTER",
        Screen::Roster => "PLAYERS",
    };
    format!("NEO CRICKET | {} | {}", screen, app.auth_label)
}

fn footer_text(state: &AppState) -> String {
    if state.prompt.is_some() {
        return "Enter Next/Submit | Tab Switch field | Esc Cancel".to_string();
    }
    match state.screen {
        Screen::Home => "r Register | v Players | x Sign out | q Quit".to_string(),
        Screen::Register => {
            "Tab/↑/↓ Field | ←/→ Option | Enter Submit | Esc Back".to_string()
        }
        Screen::Roster => "g Refresh | j/k Move | b/Esc Back | q Quit".to_string(),
    }
}

fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Neo Cricket Tournament Registration",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Quick, fair and simple registration for players."),
        Line::from("  Register a player or browse the roster."),
        Line::from(""),
        Line::from(format!("  Backends: {}", app.endpoints_label)),
    ];
    if let Some(notice) = &app.state.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {notice}"),
            Style::default().fg(Color::Green),
        )));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_register(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![Line::from(Span::styled(
        " Register a New Player",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));

    for (idx, field) in Field::ALL.into_iter().enumerate() {
        let focused = idx == state.focus;
        let marker = if focused { ">" } else { " " };
        let value = state.form.value(field);
        let shown = if field.is_select() {
            if value.is_empty() {
                "-- Select --".to_string()
            } else {
                format!("< {value} >")
            }
        } else if focused {
            format!("{value}_")
        } else {
            value.to_string()
        };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} {:<16}", field.label()), label_style),
            Span::raw(shown),
        ]));
        if let Some(message) = state.errors.get(&field) {
            lines.push(Line::from(Span::styled(
                format!("     {message}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    if state.submitting {
        lines.push(Line::from(Span::styled(
            " Registering...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_roster(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let header = format!(
        " {:<6} {:<22} {:<16} {:<12} {:<14} {:<14} {:<10}",
        "#", "Player Name", "Player City", "Phone", "Played In", "Player Type", "Last Played"
    );
    frame.render_widget(
        Paragraph::new(header)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::BOTTOM)),
        sections[0],
    );

    let body = sections[1];
    if state.roster_loading {
        let loading =
            Paragraph::new(" Loading players...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, body);
        return;
    }
    if let Some(error) = &state.roster_error {
        let message = Paragraph::new(format!(" {error}")).style(Style::default().fg(Color::Red));
        frame.render_widget(message, body);
        return;
    }
    if state.roster.is_empty() {
        let empty =
            Paragraph::new(" No players found.").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, body);
        return;
    }

    let mut lines = Vec::new();
    for (idx, row) in state.roster.iter().enumerate() {
        let text = format!(
            " {:<6} {:<22} {:<16} {:<12} {:<14} {:<14} {:<10}",
            row.display_key(idx),
            clip(&row.player_name, 22),
            clip(&row.player_city, 16),
            clip(&row.phone, 12),
            clip(&row.played_in, 14),
            clip(&row.player_type, 14),
            clip(&row.last_played_for, 10),
        );
        let style = if idx == state.roster_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), body);
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.as_str()))
        .collect();
    let console = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP).title("Console"));
    frame.render_widget(console, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(prompt) = &state.prompt else {
        return;
    };
    let popup = centered_rect(46, 7, area);
    frame.render_widget(Clear, popup);

    let masked: String = "*".repeat(prompt.password.chars().count());
    let (user_style, pass_style) = if prompt.on_password {
        (Style::default(), Style::default().fg(Color::Yellow))
    } else {
        (Style::default().fg(Color::Yellow), Style::default())
    };
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" Username: ", user_style),
            Span::raw(prompt.username.clone()),
        ]),
        Line::from(vec![
            Span::styled(" Password: ", pass_style),
            Span::raw(masked),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Credentials are kept for this session only",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default().borders(Borders::ALL).title("API sign-in");
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn clip(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
