use burst::history;
use burst::runtime::{EventSource, TerminalEventSource};
use burst::session::{Command, Session, SessionConfig};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_INTERVAL_MS: u64 = 1000;

/// minimal timed free-writing tui
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Write freely until the timer fires, see your words per minute, and save the burst to a file."
)]
pub struct Cli {
    /// number of seconds the burst lasts
    #[clap(short = 's', long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    seconds: u64,

    /// placeholder text shown in the empty editor
    #[clap(long, default_value = "Burst entry here...")]
    placeholder: String,
}

impl Cli {
    fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            duration: Duration::from_secs(self.seconds),
            placeholder: self.placeholder.clone(),
            history_path: history::default_log_path(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session::new(cli.to_session_config());
    let events = TerminalEventSource::new(Duration::from_millis(TICK_INTERVAL_MS));
    let result = run(&mut terminal, &mut session, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// The single event loop: draw, block for the next event, feed it to the
/// session, interpret follow-up commands.
fn run<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    events: &E,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*session, f.area()))?;

        let event = events.recv()?;
        for command in session.update(event) {
            match command {
                Command::Quit => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burst::runtime::{AppEvent, TestEventSource};
    use burst::session::Phase;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;

    #[test]
    fn cli_default_values() {
        let cli = Cli::parse_from(["burst"]);
        assert_eq!(cli.seconds, 60);
        assert_eq!(cli.placeholder, "Burst entry here...");
    }

    #[test]
    fn cli_custom_seconds() {
        let cli = Cli::parse_from(["burst", "-s", "30"]);
        assert_eq!(cli.seconds, 30);

        let cli = Cli::parse_from(["burst", "--seconds", "120"]);
        assert_eq!(cli.seconds, 120);
    }

    #[test]
    fn cli_rejects_zero_seconds() {
        assert!(Cli::try_parse_from(["burst", "-s", "0"]).is_err());
    }

    #[test]
    fn cli_to_session_config() {
        let cli = Cli::parse_from(["burst", "-s", "30", "--placeholder", "go"]);
        let config = cli.to_session_config();
        assert_eq!(config.duration, Duration::from_secs(30));
        assert_eq!(config.placeholder, "go");
    }

    #[test]
    fn run_loop_exits_on_quit_command() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut session = Session::new(SessionConfig {
            duration: Duration::from_secs(60),
            history_path: None,
            ..SessionConfig::default()
        });

        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('h'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
        .unwrap();

        let events = TestEventSource::new(rx);
        run(&mut terminal, &mut session, &events).unwrap();

        assert_eq!(session.editor.value(), "h");
        assert_eq!(session.phase, Phase::Composing);
    }

    #[test]
    fn run_loop_propagates_closed_channel() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut session = Session::new(SessionConfig::default());

        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);

        let events = TestEventSource::new(rx);
        assert!(run(&mut terminal, &mut session, &events).is_err());
    }
}
