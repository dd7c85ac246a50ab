//! Multi-panel terminal demo using crossterm and ratatui.
//!
//! Shows the three-tier dispatch in action: ctrl+h/j/k/l moves focus
//! between panels, hjkl/x/dd/yy/p are delivered to the focused panel,
//! `:` opens the command line (`:quit` exits, `:clear` empties a panel).
//! Run with: cargo run --example tui_panels

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use modal_input::{
    HandlerError, InputDispatcher, KeyCode, KeyEvent, Mode, Modifiers, PanelLinks, VimCommand,
};

const PANELS: [&str; 3] = ["sidebar", "request", "response"];

/// Per-panel scrollback of the commands it received.
#[derive(Default, Clone)]
struct PanelLog {
    lines: Rc<RefCell<Vec<String>>>,
}

impl PanelLog {
    fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }

    fn clear(&self) {
        self.lines.borrow_mut().clear();
    }

    fn render(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

struct App {
    dispatcher: InputDispatcher,
    logs: Vec<PanelLog>,
    should_quit: Rc<RefCell<bool>>,
}

impl App {
    fn new() -> Self {
        let mut dispatcher = InputDispatcher::new();

        // [sidebar] [request]
        //           [response]
        dispatcher
            .panels_mut()
            .register("sidebar", PanelLinks::new().right("request"));
        dispatcher.panels_mut().register(
            "request",
            PanelLinks::new().left("sidebar").down("response"),
        );
        dispatcher.panels_mut().register(
            "response",
            PanelLinks::new().left("sidebar").up("request"),
        );

        let logs: Vec<PanelLog> = PANELS.iter().map(|_| PanelLog::default()).collect();
        for (id, log) in PANELS.iter().zip(&logs) {
            let log = log.clone();
            dispatcher.register_component_handler(
                *id,
                move |command: &VimCommand| -> Result<(), HandlerError> {
                    log.push(format!("{command:?}"));
                    Ok(())
                },
            );
        }
        dispatcher.set_active_panel(Some("request"));

        let should_quit = Rc::new(RefCell::new(false));
        let quit = should_quit.clone();
        dispatcher
            .commands_mut()
            .register_command("quit", move |_args| {
                *quit.borrow_mut() = true;
                Ok(Some("bye".to_string()))
            });

        let clear_logs = logs.clone();
        dispatcher
            .commands_mut()
            .register_command("clear", move |args| match args {
                [] => {
                    for log in &clear_logs {
                        log.clear();
                    }
                    Ok(Some("cleared all panels".to_string()))
                }
                [name] => match PANELS.iter().position(|id| id == name) {
                    Some(i) => {
                        clear_logs[i].clear();
                        Ok(Some(format!("cleared {name}")))
                    }
                    None => Err(format!("no such panel: {name}")),
                },
                _ => Err("usage: clear [panel]".to_string()),
            });

        Self {
            dispatcher,
            logs,
            should_quit,
        }
    }

    fn handle_key(&mut self, event: CKeyEvent) {
        let Some(key) = convert_key(event) else {
            return;
        };
        self.dispatcher.process(key);
        for error in self.dispatcher.take_errors() {
            eprintln!("dispatch error: {error}");
        }
    }

    fn status_line(&self) -> String {
        let machine = self.dispatcher.machine();
        let mode = match machine.mode() {
            Mode::Normal => "-- NORMAL --".to_string(),
            Mode::Insert => "-- INSERT --".to_string(),
            Mode::Visual => "-- VISUAL --".to_string(),
            Mode::Command => format!(":{}", machine.command_input()),
        };
        let snapshot = self.dispatcher.snapshot();
        let mut extras = Vec::new();
        if snapshot.pending_count > 0 {
            extras.push(snapshot.pending_count.to_string());
        }
        if let Some(op) = snapshot.pending_operator {
            extras.push(format!("{op:?}"));
        }
        if let Some(message) = machine.status_message() {
            extras.push(message.to_string());
        }
        if extras.is_empty() {
            mode
        } else {
            format!("{mode}  [{}]", extras.join(" "))
        }
    }
}

fn convert_key(event: CKeyEvent) -> Option<KeyEvent> {
    let mods = if event.modifiers.contains(KeyModifiers::CONTROL) {
        Modifiers::CTRL
    } else {
        Modifiers::empty()
    };
    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        _ => return None,
    };
    Some(KeyEvent { code, mods })
}

fn ui(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let columns = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(outer[0]);

    let right = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(columns[1]);

    let areas = [columns[0], right[0], right[1]];
    let active = app.dispatcher.active_panel();

    for ((id, log), area) in PANELS.iter().zip(&app.logs).zip(areas) {
        let focused = active == Some(*id);
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(log.render()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(*id),
        );
        f.render_widget(widget, area);
    }

    let status = Paragraph::new(app.status_line())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, outer[1]);
}

fn main() -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
            if *app.should_quit.borrow() {
                break;
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
