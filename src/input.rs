use crate::complete::suggest;
use crate::vfs::{DirId, Vfs};
use log::debug;

/// Edit buffer, pending suggestion and the history cursor.
///
/// `cursor == None` is plain editing. `Some(n)` means the buffer mirrors
/// the entry `n` steps back from the newest one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
    suggestion: Option<String>,
    cursor: Option<usize>,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Replaces the buffer after an ordinary keystroke and recomputes the
    /// suggestion. The history cursor is left alone.
    pub fn edit(&mut self, text: &str, fs: &Vfs, cwd: DirId) {
        self.buffer = text.to_string();
        self.suggestion = if self.buffer.is_empty() {
            None
        } else {
            suggest(&self.buffer, fs, cwd)
        };
    }

    pub fn recall_older(&mut self, history: &[String]) {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= history.len() {
            return;
        }
        self.cursor = Some(next);
        self.buffer = history[history.len() - 1 - next].clone();
        self.suggestion = None;
        debug!("history recall older -> {}", next);
    }

    pub fn recall_newer(&mut self, history: &[String]) {
        match self.cursor {
            None => return,
            Some(0) => {
                self.cursor = None;
                self.buffer.clear();
            }
            Some(c) => {
                let c = c - 1;
                self.cursor = Some(c);
                self.buffer = history
                    .get(history.len().wrapping_sub(1 + c))
                    .cloned()
                    .unwrap_or_default();
            }
        }
        self.suggestion = None;
        debug!("history recall newer -> {:?}", self.cursor);
    }

    /// Returns true when a suggestion was taken.
    pub fn accept_suggestion(&mut self) -> bool {
        match self.suggestion.take() {
            Some(s) => {
                self.buffer = s;
                true
            }
            None => false,
        }
    }

    /// Takes the trimmed line out of the editor, recording it in `history`
    /// when non-empty. Buffer and suggestion are always cleared.
    pub fn submit(&mut self, history: &mut Vec<String>) -> String {
        let line = self.buffer.trim().to_string();
        if !line.is_empty() {
            history.push(line.clone());
            self.cursor = None;
        }
        self.buffer.clear();
        self.suggestion = None;
        line
    }
}
