use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Terminal,
};
use tracing::{debug, error};

use super::sphere;
use crate::config::BlochConfig;
use crate::core::bloch::Camera;
use crate::core::challenge::{pulse_notice, GateChallenge};
use crate::core::lessons::tutorial_lines;
use crate::core::state::format_amplitude;
use crate::core::{dispatch, timeline, Action, Gate, Notice, NoticeLevel, QubitEngine};

// ---------- Palette / Theme ----------
fn neon() -> (Color, Color, Color, Color) {
    (
        Color::Rgb(225, 0, 180),
        Color::Rgb(130, 0, 200),
        Color::Rgb(255, 240, 0),
        Color::Rgb(190, 190, 200),
    )
}

// ---------- Basic Types ----------
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    ApplyX,
    ApplyY,
    ApplyH,
    Undo,
    Clear,
    Tutorial,
    Challenge,
    PulseChallenge,
    ToggleMouse,
    Quit,
}

impl ButtonAction {
    fn engine_action(self) -> Option<Action> {
        match self {
            ButtonAction::ApplyX => Some(Action::Apply(Gate::X)),
            ButtonAction::ApplyY => Some(Action::Apply(Gate::Y)),
            ButtonAction::ApplyH => Some(Action::Apply(Gate::H)),
            ButtonAction::Undo => Some(Action::Undo),
            ButtonAction::Clear => Some(Action::Reset),
            _ => None,
        }
    }
}

/// Keyboard shortcuts; `None` for keys with no binding.
pub fn key_action(code: KeyCode, modifiers: KeyModifiers) -> Option<ButtonAction> {
    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(ButtonAction::Quit),
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => Some(ButtonAction::Undo),
        (KeyCode::Char('x') | KeyCode::Char('X'), _) => Some(ButtonAction::ApplyX),
        (KeyCode::Char('y') | KeyCode::Char('Y'), _) => Some(ButtonAction::ApplyY),
        (KeyCode::Char('h') | KeyCode::Char('H'), _) => Some(ButtonAction::ApplyH),
        (KeyCode::Char('u'), _) | (KeyCode::Backspace, _) => Some(ButtonAction::Undo),
        (KeyCode::Char('c'), _) => Some(ButtonAction::Clear),
        (KeyCode::Char('t'), _) | (KeyCode::F(1), _) => Some(ButtonAction::Tutorial),
        (KeyCode::Char('g'), _) | (KeyCode::F(2), _) => Some(ButtonAction::Challenge),
        (KeyCode::Char('p'), _) | (KeyCode::F(3), _) => Some(ButtonAction::PulseChallenge),
        (KeyCode::F(9), _) => Some(ButtonAction::ToggleMouse),
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(ButtonAction::Quit),
        _ => None,
    }
}

pub const CONTROLS: [(&str, &str); 8] = [
    ("x / y / h", "apply X, Y or Hadamard"),
    ("u, Ctrl+Z", "undo the last gate"),
    ("c", "clear timeline and reset to |0⟩"),
    ("g, F2", "start or stop the gate challenge"),
    ("p, F3", "about the pulse challenge"),
    ("t, F1", "show or hide this tutorial"),
    ("F9", "toggle mouse capture for the buttons"),
    ("q, Esc", "quit"),
];

struct ButtonSpec {
    area: Rect,
    label: String,
    action: ButtonAction,
}

struct ActiveNotice {
    notice: Notice,
    stamp: String,
    at: Instant,
}

pub struct App {
    engine: QubitEngine,
    camera: Camera,
    notice: Option<ActiveNotice>,
    notice_ttl: Duration,
    mouse_capture: bool,
    show_tutorial: bool,
    challenge: Option<GateChallenge>,
    quit: bool,
}

// ---------- App Impl ----------
impl App {
    pub fn new(cfg: &BlochConfig) -> Self {
        Self {
            engine: QubitEngine::new(),
            camera: cfg.camera(),
            notice: None,
            notice_ttl: Duration::from_secs(cfg.ui.notice_seconds),
            mouse_capture: cfg.ui.mouse,
            show_tutorial: false,
            challenge: None,
            quit: false,
        }
    }

    pub fn engine(&self) -> &QubitEngine {
        &self.engine
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(ActiveNotice {
            notice,
            stamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            at: Instant::now(),
        });
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|n| n.at.elapsed() < self.notice_ttl)
            .map(|n| &n.notice)
    }

    pub fn perform(&mut self, action: ButtonAction) {
        debug!(?action, "button");
        if let Some(a) = action.engine_action() {
            if let Some(n) = dispatch(&mut self.engine, a) {
                self.set_notice(n);
            }
            let state = self.engine.current_state();
            if let Some(ch) = self.challenge.as_mut() {
                if let Some(done) = ch.record(a, &state) {
                    let next = ch.target().name;
                    self.set_notice(Notice::info(
                        "Gate Challenge",
                        format!(
                            "Reached {} in {} move(s). Next: {}",
                            done.target, done.moves, next
                        ),
                    ));
                }
            }
            return;
        }
        match action {
            ButtonAction::Tutorial => self.show_tutorial = !self.show_tutorial,
            ButtonAction::Challenge => match self.challenge.take() {
                Some(ch) => self.set_notice(Notice::info(
                    "Gate Challenge",
                    format!("Stopped after {} target(s)", ch.solved()),
                )),
                None => {
                    self.engine.reset();
                    let ch = GateChallenge::new(&self.engine.current_state());
                    self.set_notice(Notice::info(
                        "Gate Challenge",
                        format!("Apply gates to reach {}", ch.target().name),
                    ));
                    self.challenge = Some(ch);
                }
            },
            ButtonAction::PulseChallenge => self.set_notice(pulse_notice()),
            ButtonAction::ToggleMouse => {
                self.mouse_capture = !self.mouse_capture;
                let msg = if self.mouse_capture {
                    "capture ON (F9 to release)"
                } else {
                    "capture OFF (F9 to recapture)"
                };
                self.set_notice(Notice::info("Mouse", msg));
            }
            ButtonAction::Quit => self.quit = true,
            _ => {}
        }
    }

    /// Keys while the tutorial overlay is open only close it (or quit).
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let action = key_action(code, modifiers);
        if self.show_tutorial {
            match action {
                Some(ButtonAction::Quit) if code != KeyCode::Esc => self.quit = true,
                _ => self.show_tutorial = false,
            }
            return;
        }
        if let Some(a) = action {
            self.perform(a);
        }
    }
}

// ---------- Entry Point ----------
pub fn run_tui(cfg: &BlochConfig) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Bloch Lab"))?;
    if cfg.ui.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(cfg);
    let res = panic::catch_unwind(AssertUnwindSafe(|| run_app(&mut terminal, app)));

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        SetTitle("")
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(inner) => inner,
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic>".into()
            };
            error!(%msg, "tui panicked");
            let _ = std::fs::write(
                "blochlab_crash.log",
                format!(
                    "Bloch Lab panic captured at {}:\n{}\n",
                    chrono::Local::now().to_rfc3339(),
                    msg
                ),
            );
            anyhow::bail!("Bloch Lab crashed (panic captured). See blochlab_crash.log for details.")
        }
    }
}

// ---------- Event Loop ----------
fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, mut app: App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut mouse_on = app.mouse_capture;

    while !app.should_quit() {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) => {
                    if matches!(kind, KeyEventKind::Press) {
                        app.handle_key(code, modifiers);
                    }
                }
                Event::Mouse(me) => {
                    if let crossterm::event::MouseEvent {
                        kind: MouseEventKind::Down(MouseButton::Left),
                        column,
                        row,
                        ..
                    } = me
                    {
                        if app.show_tutorial {
                            app.show_tutorial = false;
                        } else if row == 1 {
                            let size = terminal.size()?;
                            let area = Rect { x: 0, y: 1, width: size.width, height: 1 };
                            if let Some(action) = button_at(area, column) {
                                app.perform(action);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        if app.mouse_capture != mouse_on {
            mouse_on = app.mouse_capture;
            if mouse_on {
                execute!(terminal.backend_mut(), EnableMouseCapture)?;
            } else {
                execute!(terminal.backend_mut(), DisableMouseCapture)?;
            }
        }
    }
    Ok(())
}

// ---------- Rendering ----------
fn ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let (accent, accent_alt, yellow, dim) = neon();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1), // header
                Constraint::Length(1), // buttons
                Constraint::Min(8),    // main
                Constraint::Length(1), // status
            ]
            .as_ref(),
        )
        .split(f.size());

    // Header
    let mut header_spans = vec![Span::styled(
        " B L O C H   L A B ",
        Style::default().fg(Color::Black).bg(accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(ch) = &app.challenge {
        header_spans.push(Span::raw(" "));
        header_spans.push(Span::styled(
            format!("challenge → {}", ch.target().name),
            Style::default().fg(yellow).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(header_spans)).alignment(Alignment::Center), rows[0]);

    draw_buttons_row(f, rows[1]);

    // Main split
    let main_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)].as_ref())
        .split(rows[2]);
    let left_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(9)].as_ref())
        .split(main_split[0]);

    // Timeline
    let history = app.engine.history();
    let lines = timeline::render(history);
    let visible = left_split[0].height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    let items: Vec<ListItem> = if lines.is_empty() {
        vec![ListItem::new(Span::styled("no operations yet", Style::default().fg(dim)))]
    } else {
        lines
            .into_iter()
            .skip(skip)
            .map(|l| ListItem::new(Span::styled(l, Style::default().add_modifier(Modifier::BOLD))))
            .collect()
    };
    let timeline_block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" Operation Timeline ({}) ", history.len()),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(List::new(items).block(timeline_block), left_split[0]);

    draw_state_panel(f, left_split[1], app, accent_alt, yellow, dim);

    sphere::draw(f, main_split[1], &app.engine.current_state(), &app.camera, accent);

    draw_status(f, rows[3], app, accent, yellow);

    if app.show_tutorial {
        let area = centered_rect(70, 70, f.size());
        draw_tutorial(f, area, accent);
    }
}

fn draw_state_panel(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    app: &App,
    accent_alt: Color,
    yellow: Color,
    dim: Color,
) {
    let s = app.engine.current_state();
    let b = s.bloch();
    let a = b.angles();
    let mut text = vec![
        Line::from(vec![
            Span::styled("α = ", Style::default().fg(dim)),
            Span::styled(format_amplitude(s.alpha()), Style::default().fg(yellow)),
            Span::styled(
                format!("   |α|² = {:.3}", s.alpha().norm_sqr()),
                Style::default().fg(dim),
            ),
        ]),
        Line::from(vec![
            Span::styled("β = ", Style::default().fg(dim)),
            Span::styled(format_amplitude(s.beta()), Style::default().fg(yellow)),
            Span::styled(
                format!("   |β|² = {:.3}", s.beta().norm_sqr()),
                Style::default().fg(dim),
            ),
        ]),
        Line::from(format!(
            "Bloch (x, y, z) = ({:.3}, {:.3}, {:.3})",
            b.x + 0.0,
            b.y + 0.0,
            b.z + 0.0
        )),
        Line::from(format!(
            "θ = {:.1}°   φ = {:.1}°",
            a.theta.to_degrees(),
            a.phi.to_degrees()
        )),
    ];
    if let Some(ch) = &app.challenge {
        text.push(Line::from(Span::styled(
            format!(
                "Target {}   moves {}   solved {}",
                ch.target().name,
                ch.moves(),
                ch.solved()
            ),
            Style::default().fg(accent_alt).add_modifier(Modifier::BOLD),
        )));
    }
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        " State ",
        Style::default().fg(accent_alt).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(Text::from(text)).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_status(f: &mut ratatui::Frame<'_>, area: Rect, app: &App, accent: Color, yellow: Color) {
    let (msg, color) = match (app.current_notice(), &app.notice) {
        (Some(n), Some(active)) => (
            format!("[{}] {}", active.stamp, n),
            match n.level {
                NoticeLevel::Info => yellow,
                NoticeLevel::Warning => Color::Rgb(255, 120, 0),
            },
        ),
        _ => (
            "x/y/h gates • u undo • c clear • t tutorial • g challenge • F9 mouse • q quit"
                .to_string(),
            Color::Rgb(190, 190, 200),
        ),
    };
    let status_line = Paragraph::new(Line::from(vec![
        Span::styled(
            " Bloch ",
            Style::default().bg(accent).fg(Color::Black).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(msg, Style::default().fg(color)),
    ]));
    f.render_widget(status_line, area);
}

fn draw_tutorial(f: &mut ratatui::Frame<'_>, area: Rect, accent: Color) {
    let lines: Vec<Line> = tutorial_lines(&CONTROLS).into_iter().map(Line::from).collect();
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        " Tutorial — any key to close ",
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Clear, area);
    let body = Paragraph::new(Text::from(lines)).block(block).wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}

fn draw_buttons_row(f: &mut ratatui::Frame<'_>, area: Rect) {
    for b in compute_button_specs(area) {
        let (fg, bg) = match b.action {
            ButtonAction::ApplyX | ButtonAction::ApplyY | ButtonAction::ApplyH => {
                (Color::White, Color::Rgb(30, 58, 95))
            }
            ButtonAction::Undo => (Color::Black, Color::Rgb(255, 240, 0)),
            ButtonAction::Clear => (Color::Black, Color::Rgb(255, 170, 0)),
            ButtonAction::Tutorial => (Color::Black, Color::Rgb(0, 255, 180)),
            ButtonAction::Challenge => (Color::Black, Color::Rgb(225, 0, 180)),
            ButtonAction::PulseChallenge => (Color::Black, Color::Rgb(130, 0, 200)),
            ButtonAction::ToggleMouse => (Color::Black, Color::Rgb(90, 90, 90)),
            ButtonAction::Quit => (Color::White, Color::Red),
        };
        let para = Paragraph::new(Line::from(vec![Span::styled(
            format!(" {} ", b.label),
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        )]));
        f.render_widget(para, b.area);
    }
}

fn compute_button_specs(area: Rect) -> Vec<ButtonSpec> {
    let labels = [
        (ButtonAction::ApplyX, "X-Gate"),
        (ButtonAction::ApplyY, "Y-Gate"),
        (ButtonAction::ApplyH, "Hadamard"),
        (ButtonAction::Undo, "Undo"),
        (ButtonAction::Clear, "Clear"),
        (ButtonAction::Tutorial, "Tutorial"),
        (ButtonAction::Challenge, "Challenge"),
        (ButtonAction::PulseChallenge, "Pulse"),
        (ButtonAction::Quit, "Quit"),
    ];
    let mut specs = Vec::new();
    let mut x = area.x;
    for (action, label) in labels {
        let w = (label.chars().count() as u16) + 2; // padding
        if x + w > area.x + area.width {
            break;
        }
        let rect = Rect { x, y: area.y, width: w, height: 1 };
        specs.push(ButtonSpec { area: rect, label: label.to_string(), action });
        x = x.saturating_add(w);
        if x + 1 < area.x + area.width {
            x += 1;
        }
    }
    specs
}

fn button_at(area: Rect, column: u16) -> Option<ButtonAction> {
    compute_button_specs(area)
        .into_iter()
        .find(|s| column >= s.area.x && column < s.area.x + s.area.width)
        .map(|s| s.action)
}
