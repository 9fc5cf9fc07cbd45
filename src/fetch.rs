use crate::config::ShellConfig;
use crate::render::{Rendered, Style};

pub const OS_NAME: &str = "FrqiseOS v2.9";
pub const SHELL_NAME: &str = "frqise_shell 2.0";

const LOGO: [&str; 4] = ["  __", "<(o )___", " ( ._> /", "  `---'"];
const SWATCHES: [&str; 3] = ["#bd93f9", "#8be9fd", "#f1fa8c"];

pub fn uptime_minutes(uptime_ms: f64) -> u64 {
    if uptime_ms.is_finite() && uptime_ms > 0.0 {
        (uptime_ms / 60000.0).floor() as u64
    } else {
        0
    }
}

enum Info {
    Title,
    Rule,
    Field(&'static str, String),
    Blank,
    Swatches,
}

/// Logo on the left, system facts on the right.
pub fn format_fetch(config: &ShellConfig, uptime_ms: f64) -> Rendered {
    let info = [
        Info::Title,
        Info::Rule,
        Info::Field("OS", OS_NAME.into()),
        Info::Field("Shell", SHELL_NAME.into()),
        Info::Field("Filesystem", "Initialized".into()),
        Info::Field("Uptime", format!("{}m", uptime_minutes(uptime_ms))),
        Info::Blank,
        Info::Swatches,
    ];

    let logo_width = LOGO.iter().map(|l| l.len()).max().unwrap_or(0);
    let mut out = Rendered::new();
    for i in 0..LOGO.len().max(info.len()) {
        let logo_line = LOGO.get(i).copied().unwrap_or("");
        let padding = " ".repeat(logo_width - logo_line.len() + 3);
        let mut line = out.line();
        line.push(logo_line, Style::Accent).push(&padding, Style::Plain);
        match info.get(i) {
            Some(Info::Title) => {
                line.push(&config.user, Style::User)
                    .push("@", Style::Plain)
                    .push(&config.host, Style::User);
            }
            Some(Info::Rule) => {
                line.push("-----------------------", Style::Plain);
            }
            Some(Info::Field(key, value)) => {
                line.push(key, Style::Path)
                    .push(&format!(": {}", value), Style::Plain);
            }
            Some(Info::Swatches) => {
                for c in SWATCHES {
                    line.push(c, Style::Swatch);
                }
            }
            Some(Info::Blank) | None => {}
        }
    }
    out
}
