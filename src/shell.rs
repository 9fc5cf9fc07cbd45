use crate::config::ShellConfig;
use crate::escalation::Escalation;
use crate::input::LineEditor;
use crate::vfs::{DirId, Vfs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    Ls,
    Cd,
    Cat,
    Clear,
    History,
    Fetch,
    Pwd,
    Sudo,
    Whoami,
}

/// Recognised commands in the order `help` lists them and completion
/// scans them.
pub const VOCABULARY: [(&str, Command); 10] = [
    ("help", Command::Help),
    ("ls", Command::Ls),
    ("cd", Command::Cd),
    ("cat", Command::Cat),
    ("clear", Command::Clear),
    ("history", Command::History),
    ("frqisefetch", Command::Fetch),
    ("pwd", Command::Pwd),
    ("sudo", Command::Sudo),
    ("whoami", Command::Whoami),
];

impl Command {
    /// Exact, already lower-cased token lookup.
    pub fn from_token(token: &str) -> Option<Command> {
        VOCABULARY
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, cmd)| *cmd)
    }

    pub fn name(self) -> &'static str {
        VOCABULARY
            .iter()
            .find(|(_, cmd)| *cmd == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }
}

pub fn command_names() -> impl Iterator<Item = &'static str> {
    VOCABULARY.iter().map(|(name, _)| *name)
}

/// Mutable state of one running session.
pub struct Session {
    pub cwd: DirId,
    pub history: Vec<String>,
    pub editor: LineEditor,
    pub escalation: Escalation,
}

impl Session {
    pub fn new(fs: &Vfs, config: &ShellConfig) -> Self {
        Session {
            cwd: fs.root(),
            history: Vec::new(),
            editor: LineEditor::new(),
            escalation: Escalation::new(config.escalation_threshold),
        }
    }
}

pub fn prompt(config: &ShellConfig, fs: &Vfs, cwd: DirId) -> String {
    format!("{}@{}:{}$", config.user, config.host, fs.location(cwd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_lookup_is_exact() {
        assert_eq!(Command::from_token("ls"), Some(Command::Ls));
        assert_eq!(Command::from_token("l"), None);
        assert_eq!(Command::from_token("LS"), None);
        assert_eq!(Command::Fetch.name(), "frqisefetch");
        assert_eq!(command_names().count(), 10);
    }

    #[test]
    fn prompt_tracks_location() {
        let fs = Vfs::new();
        let cfg = ShellConfig::default();
        assert_eq!(prompt(&cfg, &fs, fs.root()), "guest@frqise_web:~$");
        let p = fs.find("projects").unwrap();
        assert_eq!(prompt(&cfg, &fs, p), "guest@frqise_web:~/projects$");
    }
}
