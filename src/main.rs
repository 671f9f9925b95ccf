use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use option_tree::config::{options_schema, TreeViewOptions};
use option_tree::model::fonts::FixedFontCatalog;
use option_tree::services::tracing_setup;
use option_tree::source::JsonSettingsStore;
use option_tree::view::settings::{
    render_settings, CloseDecision, EditOutcome, EditorControl, SettingsHit, SettingsHost,
    SettingsLayout, SettingsSession, Tooltip, WidgetEdit,
};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Edit a JSON settings file in the terminal
#[derive(Parser, Debug)]
#[command(name = "option-tree")]
#[command(about = "Navigable editor for a declared set of typed settings", long_about = None)]
#[command(version)]
struct Args {
    /// Settings file holding property declarations and values
    #[arg(value_name = "SETTINGS", required_unless_present = "print_schema")]
    settings: Option<PathBuf>,

    /// Path to a JSON file with view options
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Path to log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the JSON schema of the view options and exit
    #[arg(long)]
    print_schema: bool,
}

type Session = SettingsSession<JsonSettingsStore>;

/// How often the screen refreshes while idle, so tooltips expire
const POLL_INTERVAL: Duration = Duration::from_millis(250);

const HELP_TEXT: &str = "Tab: next  PgUp/PgDn: section  Enter/Space: edit  Esc: leave field  q: quit";

/// Host backed by the terminal: prompts take over the screen until answered
struct TerminalHost {
    terminal: DefaultTerminal,
    status: Option<String>,
    tooltip: Option<(Tooltip, Instant)>,
}

impl TerminalHost {
    fn new(terminal: DefaultTerminal) -> Self {
        Self {
            terminal,
            status: None,
            tooltip: None,
        }
    }

    /// Text for the bottom line: a live tooltip, else the last message
    fn status_line(&mut self) -> String {
        let expired = self
            .tooltip
            .as_ref()
            .is_some_and(|(tooltip, shown)| shown.elapsed() >= tooltip.duration);
        if expired {
            self.tooltip = None;
        }
        if let Some((tooltip, _)) = &self.tooltip {
            return tooltip.text.clone();
        }
        self.status.clone().unwrap_or_else(|| HELP_TEXT.to_string())
    }
}

impl SettingsHost for TerminalHost {
    fn confirm(&mut self, question: &str) -> bool {
        loop {
            if self
                .terminal
                .draw(|frame| render_prompt(frame, question))
                .is_err()
            {
                return false;
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Failed to read answer: {}", e);
                    return false;
                }
            }
        }
    }

    fn report_error(&mut self, message: &str, detail: &str) {
        self.status = Some(format!("{message} ({detail})"));
    }

    fn notify(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.status = Some(message.to_string());
    }
}

fn render_prompt(frame: &mut Frame, question: &str) {
    let area = frame.area();
    let width = (question.len() as u16 + 4).min(area.width);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(4) / 2,
        width,
        4u16.min(area.height),
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(question),
            Line::from(Span::styled("[y]es / [n]o", Style::default().fg(Color::Gray))),
        ]),
        inner,
    );
}

fn draw(host: &mut TerminalHost, session: &Session) -> AnyhowResult<SettingsLayout> {
    let status = host.status_line();
    let mut layout = SettingsLayout::default();
    host.terminal.draw(|frame| {
        let area = frame.area();
        let main = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
        layout = render_settings(frame, main, session);

        let status_area = Rect::new(area.x, area.y + main.height, area.width, 1);
        frame.render_widget(
            Paragraph::new(status.as_str()).style(Style::default().fg(Color::Gray)),
            status_area,
        );
    })?;
    Ok(layout)
}

fn step_panel(session: &mut Session, host: &mut TerminalHost, forward: bool) -> AnyhowResult<()> {
    let count = session.view().panels.len();
    let current = session.visible_panel().unwrap_or_default();
    let next = if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    };
    session.select_tree(host, next)?;
    Ok(())
}

/// Returns true when the user asked to quit
fn handle_key(session: &mut Session, host: &mut TerminalHost, key: KeyEvent) -> AnyhowResult<bool> {
    let focused = session.focused().is_some();
    match key.code {
        KeyCode::Char('q') if !focused => return Ok(true),
        KeyCode::Esc if !focused => return Ok(true),
        KeyCode::Tab => session.cycle_focus(host, true)?,
        KeyCode::BackTab => session.cycle_focus(host, false)?,
        KeyCode::PageDown => step_panel(session, host, true)?,
        KeyCode::PageUp => step_panel(session, host, false)?,
        KeyCode::Esc => {
            if session.handle_key(host, key)? == EditOutcome::Ignored {
                session.blur(host)?;
            }
        }
        _ => {
            session.handle_key(host, key)?;
        }
    }
    Ok(false)
}

fn handle_mouse(
    session: &mut Session,
    host: &mut TerminalHost,
    mouse: MouseEvent,
    layout: &SettingsLayout,
) -> AnyhowResult<()> {
    let hit = layout.hit(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hit {
            Some(SettingsHit::Navigation(index)) => {
                session.select_tree(host, index)?;
            }
            Some(SettingsHit::Editor(node)) => {
                session.focus(host, node)?;
                if matches!(session.view().tree.editor(node), Some(EditorControl::Toggle(_))) {
                    session.edit(host, node, WidgetEdit::Toggle)?;
                }
            }
            Some(SettingsHit::Label(node)) => {
                if let Some(editor) = session.view().row_of_node(node).map(|r| r.editor) {
                    session.focus(host, editor)?;
                }
            }
            None => {}
        },
        MouseEventKind::Moved => {
            let node = match hit {
                Some(SettingsHit::Editor(node)) | Some(SettingsHit::Label(node)) => Some(node),
                _ => None,
            };
            host.tooltip = node
                .and_then(|n| session.hover(n))
                .map(|tooltip| (tooltip, Instant::now()));
        }
        _ => {}
    }
    Ok(())
}

fn run(session: &mut Session, host: &mut TerminalHost) -> AnyhowResult<()> {
    loop {
        let layout = draw(host, session)?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                host.status = None;
                if handle_key(session, host, key)? {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse(session, host, mouse, &layout)?,
            _ => {}
        }
    }

    match session.on_closing(host)? {
        CloseDecision::Saved => tracing::info!("Settings saved on exit"),
        CloseDecision::Discarded => tracing::info!("Unsaved settings discarded"),
        CloseDecision::Clean => {}
    }
    session.on_closed();
    Ok(())
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if args.print_schema {
        println!("{}", serde_json::to_string_pretty(&options_schema())?);
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("option-tree.log"));
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: could not log to {}", log_file.display());
    }

    let options = match &args.options {
        Some(path) => TreeViewOptions::load_from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => TreeViewOptions::default(),
    };
    options.validate().context("Invalid view options")?;

    let settings_path = args.settings.context("A settings file is required")?;
    let store = JsonSettingsStore::open(&settings_path)
        .with_context(|| format!("Failed to open settings {}", settings_path.display()))?;
    let mut session = SettingsSession::new(store, options, &FixedFontCatalog::default())
        .context("Failed to build settings editor")?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic);
    }));

    let terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    let mut host = TerminalHost::new(terminal);

    let result = run(&mut session, &mut host);

    crossterm::execute!(std::io::stdout(), DisableMouseCapture)?;
    ratatui::restore();
    result
}
