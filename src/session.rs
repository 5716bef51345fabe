use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::countdown::Countdown;
use crate::editor::Editor;
use crate::history::{self, BurstRecord};
use crate::prompt::FilenamePrompt;
use crate::runtime::AppEvent;

/// Which part of the burst the session is in. Composing is the initial
/// phase; TimedOut is terminal — no event sequence leads back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Composing,
    TimedOut,
}

/// Follow-up work the event loop performs on the session's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub duration: Duration,
    pub placeholder: String,
    /// Where to append the burst history row; None disables the log.
    pub history_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(60),
            placeholder: String::from("Burst entry here..."),
            history_path: None,
        }
    }
}

/// The session controller: owns the three widgets and routes every event
/// to whichever one holds focus for the current phase.
#[derive(Debug)]
pub struct Session {
    pub phase: Phase,
    pub editor: Editor,
    pub filename: FilenamePrompt,
    pub countdown: Countdown,
    pub wpm: usize,
    pub last_error: Option<String>,
    history_path: Option<PathBuf>,
}

/// Number of maximal runs of non-whitespace characters in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Words per minute, scaled from the session duration to a full minute.
/// Integer arithmetic; at the default 60 s this is just the word count.
pub fn words_per_minute(words: usize, duration_secs: u64) -> usize {
    words * 60 / duration_secs.max(1) as usize
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            phase: Phase::Composing,
            editor: Editor::new(config.placeholder),
            filename: FilenamePrompt::new(),
            countdown: Countdown::new(config.duration),
            wpm: 0,
            last_error: None,
            history_path: config.history_path,
        }
    }

    /// Advance the session by one event. This is the single update entry
    /// point; all state mutation happens here.
    pub fn update(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Tick => {
                if self.phase == Phase::Composing && self.countdown.tick() {
                    self.finish();
                }
                vec![]
            }
            AppEvent::Resize => vec![],
            AppEvent::Error(message) => {
                self.last_error = Some(message);
                vec![]
            }
            AppEvent::Key(key) => self.on_key(key),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Command::Quit];
        }

        match key.code {
            KeyCode::Enter => match self.phase {
                Phase::TimedOut => {
                    if !self.filename.value().is_empty() {
                        if let Err(e) = self.save_transcript() {
                            self.last_error = Some(e.to_string());
                        }
                    }
                    // Quit regardless of whether the write succeeded
                    vec![Command::Quit]
                }
                Phase::Composing => {
                    if self.editor.is_focused() {
                        self.editor.insert_newline();
                    }
                    vec![]
                }
            },
            KeyCode::Esc => {
                if self.phase == Phase::Composing && self.editor.is_focused() {
                    self.editor.blur();
                }
                vec![]
            }
            _ => {
                match self.phase {
                    Phase::Composing => {
                        if self.editor.is_focused() {
                            self.editor.handle_key(key);
                        } else {
                            // First key after Esc only restores focus
                            self.editor.focus();
                        }
                    }
                    Phase::TimedOut => self.filename.handle_key(key),
                }
                vec![]
            }
        }
    }

    /// Countdown fired: compute the wpm once, shift focus to the filename
    /// prompt, and append the burst to the history log.
    fn finish(&mut self) {
        self.phase = Phase::TimedOut;

        let words = word_count(&self.editor.value());
        self.wpm = words_per_minute(words, self.countdown.duration_secs());

        self.editor.blur();
        self.filename.focus();

        if let Some(ref path) = self.history_path {
            let record = BurstRecord::new(self.countdown.duration_secs(), words, self.wpm);
            if let Err(e) = history::append(path, &record) {
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Write the composed text verbatim to the entered path. Default file
    /// permissions apply; nothing is appended or normalized.
    fn save_transcript(&self) -> std::io::Result<()> {
        fs::write(self.filename.value(), self.editor.value())
    }
}
