/// Visual role of a run of text. The host maps these to CSS classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Dir,
    User,
    Path,
    Accent,
    Dim,
    Warn,
    Error,
    /// A solid colour block; the text is the CSS colour.
    Swatch,
}

impl Style {
    pub fn class(self) -> Option<&'static str> {
        match self {
            Style::Plain => None,
            Style::Dir => Some("dir-text"),
            Style::User => Some("user-part"),
            Style::Path => Some("path-part"),
            Style::Accent => Some("gold-text"),
            Style::Dim => Some("dim-text"),
            Style::Warn => Some("warn-text"),
            Style::Error => Some("error-text"),
            Style::Swatch => Some("swatch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Output of one command: lines of styled segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    lines: Vec<Vec<Segment>>,
}

impl Rendered {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: &str) -> Self {
        Self::styled(text, Style::Plain)
    }

    /// Multi-line text, every line in one style.
    pub fn styled(text: &str, style: Style) -> Self {
        let mut r = Rendered::new();
        for line in text.split('\n') {
            r.line().push(line, style);
        }
        r
    }

    pub fn line(&mut self) -> LineBuilder<'_> {
        self.lines.push(Vec::new());
        let last = self.lines.len() - 1;
        LineBuilder {
            segs: &mut self.lines[last],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.iter().all(|s| s.text.is_empty()))
    }

    pub fn lines(&self) -> &[Vec<Segment>] {
        &self.lines
    }

    /// Text with styling dropped. Swatches render as nothing.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(|l| {
                l.iter()
                    .filter(|s| s.style != Style::Swatch)
                    .map(|s| s.text.as_str())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for seg in line {
                match (seg.style, seg.style.class()) {
                    (Style::Swatch, _) => out.push_str(&format!(
                        "<span class=\"swatch\" style=\"background:{}\">&nbsp;&nbsp;&nbsp;</span>",
                        escape_html(&seg.text)
                    )),
                    (_, Some(class)) => out.push_str(&format!(
                        "<span class=\"{}\">{}</span>",
                        class,
                        escape_html(&seg.text)
                    )),
                    (_, None) => out.push_str(&escape_html(&seg.text)),
                }
            }
        }
        out
    }
}

pub struct LineBuilder<'a> {
    segs: &'a mut Vec<Segment>,
}

impl LineBuilder<'_> {
    pub fn push(&mut self, text: &str, style: Style) -> &mut Self {
        self.segs.push(Segment {
            text: text.into(),
            style,
        });
        self
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
