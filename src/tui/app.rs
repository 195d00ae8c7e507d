use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::model::AppConfig;

use super::focus::Command;
use super::input;
use super::redraw::{RedrawSet, RenderCoordinator};
use super::render::TerminalCanvas;
use super::render::layout::visible_count_for;
use super::session::Session;
use super::theme::Theme;

/// Everything the event loop owns for one run
struct App {
    session: Session,
    canvas: TerminalCanvas,
    coordinator: RenderCoordinator,
    theme: Theme,
}

impl App {
    fn new(config: &AppConfig, visible_count: usize) -> Self {
        let mut app = App {
            session: Session::new(visible_count),
            canvas: TerminalCanvas::new(),
            coordinator: RenderCoordinator::from_config(&config.ui),
            theme: Theme::from_config(&config.ui),
        };
        app.coordinator
            .apply(&app.session, &RedrawSet::all(), &mut app.canvas);
        app
    }

    /// Run one command through the session and push the result to the canvas
    fn dispatch(&mut self, command: Command) {
        let set = self.session.handle(command);
        self.coordinator.apply(&self.session, &set, &mut self.canvas);
    }

    /// Map a terminal event to a command, if it carries one
    fn command_for(&self, ev: Event) -> Option<Command> {
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                input::translate(key, self.session.focus())
            }
            Event::Resize(w, h) => Some(Command::Resize(visible_count_for(w, h))),
            _ => None,
        }
    }
}

/// Run the TUI application
pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let (mut terminal, visible_count) = or_restore(start_terminal(), restore_terminal)?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let mut app = App::new(config, visible_count);
    info!(visible_count, "tui started");

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!(records = app.session.store().len(), "tui stopped");

    result
}

/// Enter the alternate screen and measure how many records fit
fn start_terminal() -> io::Result<(Terminal<CrosstermBackend<io::Stdout>>, usize)> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    let size = terminal.size()?;
    Ok((terminal, visible_count_for(size.width, size.height)))
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `restore` before handing back a failed setup step
fn or_restore<T, E>(result: Result<T, E>, restore: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        restore();
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| app.canvas.draw(frame, &app.theme))?;

        // One event is fully processed before the next is read
        let ev = event::read()?;
        if let Some(command) = app.command_for(ev) {
            debug!(?command, "dispatch");
            app.dispatch(command);
        }

        if app.session.should_quit() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn feed(app: &mut App, events: impl IntoIterator<Item = Event>) {
        for ev in events {
            if let Some(command) = app.command_for(ev) {
                app.dispatch(command);
            }
        }
    }

    #[test]
    fn keys_flow_through_to_the_store() {
        let mut app = App::new(&AppConfig::default(), 4);
        feed(
            &mut app,
            [
                press(KeyCode::Char('h')),
                press(KeyCode::Char('i')),
                press(KeyCode::Enter),
                press(KeyCode::Tab),
                press(KeyCode::Char(' ')),
            ],
        );
        assert_eq!(app.session.store().len(), 1);
        assert_eq!(app.session.store().get(0).unwrap().text, "hi");
        assert!(app.session.store().get(0).unwrap().done);
    }

    #[test]
    fn release_events_are_ignored() {
        let app = App::new(&AppConfig::default(), 4);
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(app.command_for(Event::Key(release)).is_none());
    }

    #[test]
    fn resize_event_recomputes_visible_count() {
        let app = App::new(&AppConfig::default(), 4);
        assert_eq!(
            app.command_for(Event::Resize(80, 50)),
            Some(Command::Resize(13))
        );
    }

    #[test]
    fn failed_setup_restores_terminal() {
        let mut restored = false;
        let result: Result<(), &str> = or_restore(Err("no tty"), || restored = true);
        assert_eq!(result, Err("no tty"));
        assert!(restored);

        let mut restored = false;
        assert_eq!(or_restore(Ok::<_, &str>(7), || restored = true), Ok(7));
        assert!(!restored);
    }

    #[test]
    fn ctrl_c_requests_quit() {
        let mut app = App::new(&AppConfig::default(), 4);
        feed(
            &mut app,
            [Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))],
        );
        assert!(app.session.should_quit());
    }
}
