use std::io;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, Log, Metadata, Record};
use puretone_core::{
    audio::AudioOutput,
    controls::Control as _,
    engine::Engine,
    input::{Button, ButtonState},
    log_buffer::{LogBuffer, LogEntry, LogLevel},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

const MAX_LOGS: usize = 100;
const TICK: Duration = Duration::from_millis(50);

// UI rendering helpers for log levels
trait LevelExt {
    fn color(&self) -> Color;
    fn label(&self) -> &str;
}

impl LevelExt for LogLevel {
    fn color(&self) -> Color {
        match *self {
            LogLevel::Error => Color::Red,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Info => Color::Cyan,
            LogLevel::Debug => Color::Gray,
            LogLevel::Trace => Color::DarkGray,
        }
    }

    fn label(&self) -> &str {
        match *self {
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

/// Logger that forwards records to the terminal's log pane.
pub struct TuiLogger {
    tx: Sender<LogEntry>,
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = LogEntry::new(record.level().into(), &record.args().to_string());
            // the pane may already be gone during shutdown
            let _ = self.tx.send(entry);
        }
    }

    fn flush(&self) {}
}

/// Installs the pane logger and returns the receiving end for [`run`].
pub fn init_logger(max_level: LevelFilter) -> Receiver<LogEntry> {
    let (tx, rx) = channel();
    if log::set_boxed_logger(Box::new(TuiLogger { tx })).is_ok() {
        log::set_max_level(max_level);
    }
    rx
}

struct TuiState {
    logs: LogBuffer<MAX_LOGS>,
    rx: Receiver<LogEntry>,
    should_quit: bool,
}

impl TuiState {
    fn new(rx: Receiver<LogEntry>) -> Self {
        Self {
            logs: LogBuffer::new(LogLevel::Trace),
            rx,
            should_quit: false,
        }
    }

    fn collect_messages(&mut self) {
        while let Ok(entry) = self.rx.try_recv() {
            self.logs.push_entry(entry);
        }
    }
}

/// Runs the terminal control panel until the user quits. Playback is stopped
/// on the way out.
pub fn run<A: AudioOutput>(mut engine: Engine<A>, rx: Receiver<LogEntry>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TuiState::new(rx);
    log::info!("terminal control panel started");

    let result = event_loop(&mut terminal, &mut engine, &mut state);
    engine.player_mut().stop();

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(result?)
}

fn event_loop<B: Backend, A: AudioOutput>(
    terminal: &mut Terminal<B>,
    engine: &mut Engine<A>,
    state: &mut TuiState,
) -> io::Result<()> {
    loop {
        state.collect_messages();
        terminal.draw(|f| ui(f, engine, state))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(engine, state, key);
        }

        engine.update();
        let input = engine.input_mut();
        input.end_frame(false);
        input.set_button(Button::B, ButtonState::Released);

        if state.should_quit {
            return Ok(());
        }
    }
}

// Terminals report presses only, so every key is a one-frame tap
fn handle_key<A: AudioOutput>(engine: &mut Engine<A>, state: &mut TuiState, key: KeyEvent) {
    let coarse = key.modifiers.contains(KeyModifiers::SHIFT);
    let button = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            log::info!("Ctrl+C pressed, shutting down");
            state.should_quit = true;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => Some(Button::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Button::Down),
        KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') => {
            Some(Button::Right)
        }
        KeyCode::PageDown => {
            engine.input_mut().set_button(Button::B, ButtonState::Pressed);
            Some(Button::Left)
        }
        KeyCode::PageUp => {
            engine.input_mut().set_button(Button::B, ButtonState::Pressed);
            Some(Button::Right)
        }
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('p') => Some(Button::A),
        _ => None,
    };

    if let Some(button) = button {
        if coarse {
            engine.input_mut().set_button(Button::B, ButtonState::Pressed);
        }
        engine.input_mut().tap(button);
    }
}

fn ui<A: AudioOutput>(f: &mut Frame, engine: &Engine<A>, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Frequency
            Constraint::Length(3), // Volume
            Constraint::Length(3), // Play button
            Constraint::Length(3), // Status
            Constraint::Min(5),    // Logs
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Pure Tone Generator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    for (control, area) in engine.controls().iter().zip(&chunks[1..4]) {
        render_control(f, *area, engine, control);
    }

    render_status(f, chunks[4], engine);
    render_logs(f, chunks[5], state);

    let help = Paragraph::new(
        "↑/↓: Select | ←/→: Adjust | Shift or PgUp/PgDn: Coarse | Space: Play/Stop | Q/ESC: Quit",
    )
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, chunks[6]);
}

fn render_control<A: AudioOutput>(
    f: &mut Frame,
    area: Rect,
    engine: &Engine<A>,
    control: &puretone_core::controls::ControlWrapper,
) {
    let id = control.element_id();
    let focused = id == engine.focused();
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let title = match control.range_labels() {
        Some((min, max)) => format!("{id} ({min} - {max})"),
        None => id.to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let label = control.label().as_str().to_string();

    match control.ratio() {
        Some(ratio) => {
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(style)
                .ratio(f64::from(ratio.clamp(0.0, 1.0)))
                .label(label);
            f.render_widget(gauge, area);
        }
        None => {
            let button_style = if engine.player().is_playing() {
                style.bg(Color::Green).fg(Color::Black)
            } else {
                style
            };
            let button = Paragraph::new(format!("[ {label} ]"))
                .style(button_style)
                .block(block);
            f.render_widget(button, area);
        }
    }
}

fn render_status<A: AudioOutput>(f: &mut Frame, area: Rect, engine: &Engine<A>) {
    let status = engine.status();
    let style = if status.is_error() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(status.message().to_string())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("status"));
    f.render_widget(paragraph, area);
}

fn render_logs(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Logs (scrolls automatically)");

    let inner = block.inner(area);
    f.render_widget(block, area);

    let log_items: Vec<ListItem> = state
        .logs
        .tail(inner.height as usize)
        .map(|entry| {
            let content = Line::from(vec![
                Span::styled(entry.level.label(), Style::default().fg(entry.level.color())),
                Span::raw(" "),
                Span::raw(entry.message.as_str()),
            ]);
            ListItem::new(content)
        })
        .collect();

    f.render_widget(List::new(log_items), inner);
}
