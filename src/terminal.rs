use crate::config::ShellConfig;
use crate::effects::{ChoiceSource, Clock};
use crate::escalation::{Phase, RestoreTicket};
use crate::interpreter::{execute, parse, Ctx, Reply};
use crate::shell::{prompt, Session};
use crate::transcript::{Block, Transcript};
use crate::vfs::Vfs;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Up,
    Down,
    Enter,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Key {
        match name {
            "Tab" => Key::Tab,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "Enter" => Key::Enter,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The browser's default action for the key must be suppressed.
    pub prevent_default: bool,
    /// Set when the key submitted a line that tripped the escalation.
    pub restore: Option<RestoreTicket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub cwd: String,
    pub location: String,
    pub history: Vec<String>,
    pub cursor: Option<usize>,
    pub failures: u32,
    pub locked: bool,
    pub pending_restore: Option<u32>,
}

/// One shell session: filesystem, state, transcript and effect providers.
pub struct Terminal {
    fs: Vfs,
    config: ShellConfig,
    session: Session,
    transcript: Transcript,
    rng: Box<dyn ChoiceSource>,
    clock: Box<dyn Clock>,
}

impl Terminal {
    pub fn new(config: ShellConfig, rng: Box<dyn ChoiceSource>, clock: Box<dyn Clock>) -> Self {
        let fs = Vfs::new();
        let session = Session::new(&fs, &config);
        Terminal {
            fs,
            config,
            session,
            transcript: Transcript::new(),
            rng,
            clock,
        }
    }

    pub fn fs(&self) -> &Vfs {
        &self.fs
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn prompt(&self) -> String {
        prompt(&self.config, &self.fs, self.session.cwd)
    }

    pub fn location(&self) -> String {
        self.fs.location(self.session.cwd)
    }

    pub fn input(&self) -> &str {
        self.session.editor.buffer()
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.session.editor.suggestion()
    }

    pub fn is_locked(&self) -> bool {
        self.session.escalation.is_locked()
    }

    /// Ordinary text edit. Ignored while the session is locked.
    pub fn set_input(&mut self, text: &str) {
        if self.is_locked() {
            return;
        }
        self.session.editor.edit(text, &self.fs, self.session.cwd);
    }

    pub fn key(&mut self, key: Key) -> KeyOutcome {
        if self.is_locked() {
            return KeyOutcome::default();
        }
        let editor = &mut self.session.editor;
        match key {
            Key::Tab => {
                editor.accept_suggestion();
                KeyOutcome {
                    prevent_default: true,
                    restore: None,
                }
            }
            Key::Up => {
                editor.recall_older(&self.session.history);
                KeyOutcome {
                    prevent_default: true,
                    restore: None,
                }
            }
            Key::Down => {
                editor.recall_newer(&self.session.history);
                KeyOutcome {
                    prevent_default: true,
                    restore: None,
                }
            }
            Key::Enter => KeyOutcome {
                prevent_default: false,
                restore: self.submit(),
            },
            Key::Other => KeyOutcome::default(),
        }
    }

    /// Types `line` and presses Enter.
    pub fn run_line(&mut self, line: &str) -> Option<RestoreTicket> {
        self.set_input(line);
        self.key(Key::Enter).restore
    }

    fn submit(&mut self) -> Option<RestoreTicket> {
        let echo_prompt = self.prompt();
        let line = self.session.editor.submit(&mut self.session.history);
        let (cmd, arg) = parse(&line);
        let mut ctx = Ctx {
            fs: &self.fs,
            session: &mut self.session,
            config: &self.config,
            rng: self.rng.as_mut(),
            clock: self.clock.as_ref(),
        };
        match execute(&mut ctx, &cmd, &arg) {
            Reply::Output(out) => {
                self.transcript.push(Block::Echo {
                    prompt: echo_prompt,
                    line,
                });
                self.transcript.push(Block::Output(out));
                None
            }
            Reply::Clear => {
                self.transcript.clear();
                None
            }
            Reply::Escalate => Some(
                self.session
                    .escalation
                    .trigger(&mut self.transcript, self.config.restore_delay_ms),
            ),
        }
    }

    /// Fired by the host's one-shot timer.
    pub fn restore(&mut self, id: u32) -> bool {
        self.session.escalation.restore(id, &mut self.transcript)
    }

    pub fn cancel_restore(&mut self) -> Option<u32> {
        self.session.escalation.cancel()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let pending_restore = match self.session.escalation.phase() {
            Phase::Crashed { pending } => pending,
            Phase::Normal => None,
        };
        SessionSnapshot {
            cwd: self.fs.dir(self.session.cwd).name.clone(),
            location: self.location(),
            history: self.session.history.clone(),
            cursor: self.session.editor.cursor(),
            failures: self.session.escalation.failures(),
            locked: self.is_locked(),
            pending_restore,
        }
    }
}
