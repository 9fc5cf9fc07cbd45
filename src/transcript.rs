use crate::render::{escape_html, Rendered};

pub const CRASH_LINES: [&str; 2] = [
    "[!] SYSTEM_CRASH: Illegal operation.",
    "[!] EMERGENCY_RESET: Initiating...",
];
pub const RESTORED_LINE: &str = "--- Session Restored ---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// The prompt as shown when the line was submitted, plus the raw line.
    Echo { prompt: String, line: String },
    Output(Rendered),
    Crash,
    Restored,
}

/// Append-only scrollback, except for `clear` and the escalation reset
/// which replace it wholesale.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    blocks: Vec<Block>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn replace(&mut self, block: Block) {
        self.blocks.clear();
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn echo_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Echo { .. }))
            .count()
    }

    pub fn to_text(&self) -> String {
        let mut out = Vec::new();
        for b in &self.blocks {
            match b {
                Block::Echo { prompt, line } => out.push(format!("{} {}", prompt, line)),
                Block::Output(r) if r.is_empty() => {}
                Block::Output(r) => out.push(r.plain()),
                Block::Crash => out.push(CRASH_LINES.join("\n")),
                Block::Restored => out.push(RESTORED_LINE.to_string()),
            }
        }
        out.join("\n")
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for b in &self.blocks {
            match b {
                Block::Echo { prompt, line } => out.push_str(&format!(
                    "<div class=\"echo-line\">{} <span class=\"white-text\">{}</span></div>",
                    escape_html(prompt),
                    escape_html(line)
                )),
                Block::Output(r) => out.push_str(&format!(
                    "<div class=\"command-output\">{}</div>",
                    r.to_html()
                )),
                Block::Crash => out.push_str(&format!(
                    "<div class=\"crash-text\">{}</div>",
                    CRASH_LINES.join("<br>")
                )),
                Block::Restored => out.push_str(&format!(
                    "<div class=\"dim-text\">{}</div>",
                    RESTORED_LINE
                )),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_skips_empty_output() {
        let mut t = Transcript::new();
        t.push(Block::Echo {
            prompt: "guest@frqise_web:~$".into(),
            line: "cd projects".into(),
        });
        t.push(Block::Output(Rendered::new()));
        assert_eq!(t.to_text(), "guest@frqise_web:~$ cd projects");
        assert_eq!(t.echo_count(), 1);
        t.replace(Block::Restored);
        assert_eq!(t.to_text(), RESTORED_LINE);
    }

    #[test]
    fn html_escapes_user_input() {
        let mut t = Transcript::new();
        t.push(Block::Echo {
            prompt: "$".into(),
            line: "<b>".into(),
        });
        assert!(t.to_html().contains("&lt;b&gt;"));
    }
}
