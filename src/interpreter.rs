use crate::config::ShellConfig;
use crate::effects::{ChoiceSource, Clock};
use crate::error::ShellError;
use crate::fetch::format_fetch;
use crate::render::{Rendered, Style};
use crate::shell::{command_names, Command, Session};
use crate::vfs::Vfs;
use log::{debug, info};

pub const SUDO_DENIALS: [&str; 3] = [
    "Permission denied. Try saying 'sudo please'.",
    "User is not in the sudoers file. This incident will be logged.",
    "Attempting unauthorized access... [FAIL]",
];

/// Everything a command may read or touch.
pub struct Ctx<'a> {
    pub fs: &'a Vfs,
    pub session: &'a mut Session,
    pub config: &'a ShellConfig,
    pub rng: &'a mut dyn ChoiceSource,
    pub clock: &'a dyn Clock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(Rendered),
    /// Wipe the transcript; nothing is echoed.
    Clear,
    /// Failure threshold reached; the caller runs the reset ritual.
    Escalate,
}

type Handler = fn(&mut Ctx<'_>, &str) -> Reply;

fn handler(cmd: Command) -> Handler {
    match cmd {
        Command::Help => cmd_help,
        Command::Ls => cmd_ls,
        Command::Cd => cmd_cd,
        Command::Cat => cmd_cat,
        Command::Clear => cmd_clear,
        Command::History => cmd_history,
        Command::Fetch => cmd_fetch,
        Command::Pwd => cmd_pwd,
        Command::Sudo => cmd_sudo,
        Command::Whoami => cmd_whoami,
    }
}

/// Splits a submitted line on its first space. The command token is
/// lower-cased; the argument keeps its case.
pub fn parse(line: &str) -> (String, String) {
    match line.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim().to_string()),
        None => (line.to_lowercase(), String::new()),
    }
}

pub fn execute(ctx: &mut Ctx<'_>, cmd: &str, arg: &str) -> Reply {
    debug!("dispatch cmd={:?} arg={:?}", cmd, arg);
    if cmd.is_empty() {
        ctx.session.escalation.reset();
        return Reply::Output(Rendered::new());
    }
    match Command::from_token(cmd) {
        Some(c) => {
            // sudo counts as a failure even though it is a known command.
            if c != Command::Sudo {
                ctx.session.escalation.reset();
            }
            handler(c)(ctx, arg)
        }
        None => {
            if ctx.session.escalation.fail() {
                return Reply::Escalate;
            }
            let err = ShellError::CommandNotFound(cmd.into());
            Reply::Output(Rendered::styled(&err.to_string(), Style::Error))
        }
    }
}

fn cmd_help(_ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    let names: Vec<&str> = command_names().collect();
    Reply::Output(Rendered::text(&format!("Available: {}", names.join(", "))))
}

fn cmd_ls(ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    let (dirs, files) = ctx.fs.list_entries(ctx.session.cwd);
    let mut out = Rendered::new();
    let mut line = out.line();
    let entries = dirs
        .iter()
        .map(|d| (format!("{}/", d), Style::Dir))
        .chain(files.iter().map(|f| (f.clone(), Style::Plain)));
    for (i, (name, style)) in entries.enumerate() {
        if i > 0 {
            line.push("  ", Style::Plain);
        }
        line.push(&name, style);
    }
    Reply::Output(out)
}

fn cmd_cd(ctx: &mut Ctx<'_>, arg: &str) -> Reply {
    match ctx.fs.resolve(ctx.session.cwd, arg) {
        Ok(dir) => {
            ctx.session.cwd = dir;
            info!("cwd -> {}", ctx.fs.location(dir));
            Reply::Output(Rendered::new())
        }
        Err(e) => Reply::Output(Rendered::styled(&e.to_string(), Style::Error)),
    }
}

fn cmd_cat(ctx: &mut Ctx<'_>, arg: &str) -> Reply {
    match ctx.fs.read_file(ctx.session.cwd, arg) {
        Ok(content) => Reply::Output(Rendered::text(content)),
        Err(e) => Reply::Output(Rendered::styled(&e.to_string(), Style::Error)),
    }
}

fn cmd_clear(_ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    Reply::Clear
}

fn cmd_history(ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    let text = ctx
        .session
        .history
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}  {}", i + 1, c))
        .collect::<Vec<_>>()
        .join("\n");
    Reply::Output(Rendered::text(&text))
}

fn cmd_fetch(ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    Reply::Output(format_fetch(ctx.config, ctx.clock.uptime_ms()))
}

fn cmd_pwd(ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    let dir = ctx.fs.dir(ctx.session.cwd);
    let path = if dir.is_root() {
        ctx.config.home.clone()
    } else {
        format!("{}/{}", ctx.config.home, dir.name)
    };
    Reply::Output(Rendered::text(&path))
}

fn cmd_sudo(ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    let denial = SUDO_DENIALS[ctx.rng.pick(SUDO_DENIALS.len()) % SUDO_DENIALS.len()];
    if ctx.session.escalation.fail() {
        return Reply::Escalate;
    }
    let err = ShellError::RestrictedOperation(denial);
    Reply::Output(Rendered::styled(&err.to_string(), Style::Warn))
}

fn cmd_whoami(ctx: &mut Ctx<'_>, _arg: &str) -> Reply {
    let mut out = Rendered::new();
    let rows = [
        ("User:", Style::User, ctx.config.user.as_str()),
        ("Role:", Style::Path, "Temporary Visitor"),
        ("Host:", Style::Accent, "frqise_web_v2.9"),
        ("Permissions:", Style::Dim, "Read-only (Sudo restricted)"),
    ];
    for (label, style, value) in rows {
        out.line()
            .push(label, style)
            .push(&format!(" {}", value), Style::Plain);
    }
    Reply::Output(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{FixedChoice, FixedClock};

    struct Fixture {
        fs: Vfs,
        session: Session,
        config: ShellConfig,
        rng: FixedChoice,
        clock: FixedClock,
    }

    impl Fixture {
        fn new() -> Self {
            let fs = Vfs::new();
            let config = ShellConfig::default();
            let session = Session::new(&fs, &config);
            Fixture {
                fs,
                session,
                config,
                rng: FixedChoice(0),
                clock: FixedClock(0.0),
            }
        }

        fn run(&mut self, line: &str) -> Reply {
            let (cmd, arg) = parse(line);
            let mut ctx = Ctx {
                fs: &self.fs,
                session: &mut self.session,
                config: &self.config,
                rng: &mut self.rng,
                clock: &self.clock,
            };
            execute(&mut ctx, &cmd, &arg)
        }

        fn text(&mut self, line: &str) -> String {
            match self.run(line) {
                Reply::Output(r) => r.plain(),
                other => panic!("expected output, got {:?}", other),
            }
        }
    }

    #[test]
    fn parse_lowercases_command_only() {
        assert_eq!(parse("CD Projects"), ("cd".into(), "Projects".into()));
        assert_eq!(parse("ls"), ("ls".into(), String::new()));
        assert_eq!(parse(""), (String::new(), String::new()));
    }

    #[test]
    fn help_lists_vocabulary() {
        let mut f = Fixture::new();
        assert_eq!(
            f.text("help"),
            "Available: help, ls, cd, cat, clear, history, frqisefetch, pwd, sudo, whoami"
        );
    }

    #[test]
    fn ls_puts_directories_first() {
        let mut f = Fixture::new();
        assert_eq!(
            f.text("ls"),
            "documents/  journal/  projects/  recipes/  contact.txt"
        );
        match f.run("ls") {
            Reply::Output(r) => assert_eq!(r.lines()[0][0].style, Style::Dir),
            other => panic!("{:?}", other),
        }
        f.text("cd projects");
        assert_eq!(f.text("ls"), "web/  python/  list.txt");
    }

    #[test]
    fn cd_and_pwd() {
        let mut f = Fixture::new();
        assert_eq!(f.text("pwd"), "/home/guest");
        assert_eq!(f.text("cd projects"), "");
        assert_eq!(f.text("cd web"), "");
        assert_eq!(f.text("pwd"), "/home/guest/web");
        assert_eq!(f.text("pwd"), "/home/guest/web");
        assert_eq!(
            f.text("cd nowhere"),
            "frqise_shell: cd: nowhere: No such directory"
        );
        assert_eq!(f.text("cd .."), "");
        assert_eq!(f.text("pwd"), "/home/guest/projects");
        f.text("cd");
        assert_eq!(f.session.cwd, f.fs.root());
        f.text("cd ..");
        assert_eq!(f.session.cwd, f.fs.root());
    }

    #[test]
    fn cat_reports_each_outcome() {
        let mut f = Fixture::new();
        assert!(f.text("cat contact.txt").starts_with("Email: hello@frqise.me"));
        assert_eq!(f.text("cat journal"), "cat: journal: Is a directory");
        assert_eq!(f.text("cat ghost.txt"), "cat: ghost.txt: No such file");
        assert_eq!(f.text("cat"), "cat: : No such file");
    }

    #[test]
    fn clear_is_a_reply_not_output() {
        let mut f = Fixture::new();
        assert_eq!(f.run("clear"), Reply::Clear);
        assert_eq!(f.run("CLEAR"), Reply::Clear);
    }

    #[test]
    fn history_is_one_indexed() {
        let mut f = Fixture::new();
        f.session.history = vec!["ls".into(), "history".into()];
        assert_eq!(f.text("history"), "1  ls\n2  history");
    }

    #[test]
    fn fetch_uses_injected_clock() {
        let mut f = Fixture::new();
        f.clock = FixedClock(7.5 * 60_000.0);
        assert!(f.text("frqisefetch").contains("Uptime: 7m"));
    }

    #[test]
    fn whoami_is_fixed() {
        let mut f = Fixture::new();
        assert_eq!(
            f.text("whoami"),
            "User: guest\nRole: Temporary Visitor\nHost: frqise_web_v2.9\nPermissions: Read-only (Sudo restricted)"
        );
    }

    #[test]
    fn unknown_commands_escalate_on_third() {
        let mut f = Fixture::new();
        assert_eq!(f.text("foo"), "frqise_shell: foo: command not found");
        assert_eq!(f.text("bar"), "frqise_shell: bar: command not found");
        assert_eq!(f.run("baz"), Reply::Escalate);
    }

    #[test]
    fn known_command_or_blank_resets_counter() {
        let mut f = Fixture::new();
        f.text("foo");
        f.text("ls");
        f.text("bar");
        assert!(matches!(f.run("baz"), Reply::Output(_)));
        assert_eq!(f.session.escalation.failures(), 2);
        f.text("");
        assert_eq!(f.session.escalation.failures(), 0);
    }

    #[test]
    fn sudo_always_counts() {
        let mut f = Fixture::new();
        f.rng = FixedChoice(2);
        assert_eq!(f.text("sudo"), "Attempting unauthorized access... [FAIL]");
        f.rng = FixedChoice(1);
        assert_eq!(
            f.text("sudo rm -rf"),
            "User is not in the sudoers file. This incident will be logged."
        );
        assert_eq!(f.run("sudo"), Reply::Escalate);

        let mut g = Fixture::new();
        g.text("foo");
        g.text("sudo");
        assert_eq!(g.run("bar"), Reply::Escalate);
    }
}
