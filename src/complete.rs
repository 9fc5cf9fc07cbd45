use crate::shell::command_names;
use crate::vfs::{DirId, Vfs};

fn starts_with_ci(candidate: &str, prefix_lower: &str) -> bool {
    candidate.to_lowercase().starts_with(prefix_lower)
}

/// Entries of `dir`, directories first, each group in declared order.
fn entries(fs: &Vfs, dir: DirId) -> impl Iterator<Item = &str> {
    let (dirs, files) = fs.list_entries(dir);
    dirs.iter().chain(files.iter()).map(String::as_str)
}

/// First prefix completion for `input`, or `None`.
///
/// A lone token completes against the command vocabulary and, when no
/// command fits, against the entries of `cwd`. Once the input holds a
/// space, the text after the first space completes against the entries
/// of `cwd` and the result keeps the original head token in front.
pub fn suggest(input: &str, fs: &Vfs, cwd: DirId) -> Option<String> {
    match input.split_once(' ') {
        None => {
            if input.is_empty() {
                return None;
            }
            let head = input.to_lowercase();
            if let Some(cmd) = command_names().find(|c| starts_with_ci(c, &head)) {
                return Some(cmd.to_string());
            }
            entries(fs, cwd)
                .find(|e| starts_with_ci(e, &head))
                .map(str::to_string)
        }
        Some((head, rest)) => {
            let prefix = rest.to_lowercase();
            entries(fs, cwd)
                .find(|e| starts_with_ci(e, &prefix))
                .map(|m| format!("{} {}", head, m))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_root(input: &str) -> Option<String> {
        let fs = Vfs::new();
        suggest(input, &fs, fs.root())
    }

    #[test]
    fn commands_win_in_vocabulary_order() {
        assert_eq!(at_root("c").as_deref(), Some("cd"));
        assert_eq!(at_root("ca").as_deref(), Some("cat"));
        assert_eq!(at_root("CL").as_deref(), Some("clear"));
        assert_eq!(at_root("h").as_deref(), Some("help"));
        assert_eq!(at_root("hi").as_deref(), Some("history"));
    }

    #[test]
    fn lone_token_falls_back_to_entries() {
        assert_eq!(at_root("doc").as_deref(), Some("documents"));
        assert_eq!(at_root("con").as_deref(), Some("contact.txt"));
        assert_eq!(at_root("xyz"), None);
        assert_eq!(at_root(""), None);
    }

    #[test]
    fn argument_completes_dirs_before_files() {
        assert_eq!(at_root("cd rec").as_deref(), Some("cd recipes"));
        assert_eq!(at_root("cat c").as_deref(), Some("cat contact.txt"));
        assert_eq!(at_root("CAT Rec").as_deref(), Some("CAT recipes"));
        assert_eq!(at_root("cd ").as_deref(), Some("cd documents"));
        assert_eq!(at_root("cd zz"), None);
    }

    #[test]
    fn argument_uses_current_directory() {
        let fs = Vfs::new();
        let projects = fs.find("projects").unwrap();
        assert_eq!(
            suggest("cd p", &fs, projects).as_deref(),
            Some("cd python")
        );
        assert_eq!(
            suggest("cat l", &fs, projects).as_deref(),
            Some("cat list.txt")
        );
    }
}
