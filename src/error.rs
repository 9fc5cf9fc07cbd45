use thiserror::Error;

/// Failures a command can report. The `Display` text is what lands in the
/// transcript, so every variant renders as a plain user-facing line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("frqise_shell: cd: {0}: No such directory")]
    NoSuchDirectory(String),
    #[error("cat: {0}: Is a directory")]
    IsADirectory(String),
    #[error("cat: {0}: No such file")]
    NoSuchFile(String),
    #[error("frqise_shell: {0}: command not found")]
    CommandNotFound(String),
    #[error("{0}")]
    RestrictedOperation(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid shell config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("escalation_threshold must be at least 1")]
    ZeroThreshold,
    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_argument() {
        assert_eq!(
            ShellError::NoSuchDirectory("nope".into()).to_string(),
            "frqise_shell: cd: nope: No such directory"
        );
        assert_eq!(
            ShellError::IsADirectory("web".into()).to_string(),
            "cat: web: Is a directory"
        );
        assert_eq!(
            ShellError::NoSuchFile("x.txt".into()).to_string(),
            "cat: x.txt: No such file"
        );
        assert_eq!(
            ShellError::CommandNotFound("foo".into()).to_string(),
            "frqise_shell: foo: command not found"
        );
    }
}
