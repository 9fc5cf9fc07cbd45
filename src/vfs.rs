use crate::error::ShellError;
use std::collections::HashMap;

pub const ROOT: &str = "root";

/// Index of a directory inside the [`Vfs`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirId(usize);

#[derive(Debug, Clone)]
pub struct Directory {
    pub name: String,
    pub parent: Option<DirId>,
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

impl Directory {
    fn new(name: &str, parent: Option<DirId>) -> Self {
        Directory {
            name: name.into(),
            parent,
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The fixed tree plus the flat name -> content map. Directory names are
/// globally unique and act as their own keys.
pub struct Vfs {
    dirs: Vec<Directory>,
    data: HashMap<String, String>,
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs {
    /// An empty filesystem holding only the root directory.
    pub fn empty() -> Self {
        Vfs {
            dirs: vec![Directory::new(ROOT, None)],
            data: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        let mut fs = Vfs::empty();
        fs.init();
        fs
    }

    fn init(&mut self) {
        let root = self.root();
        for d in ["documents", "journal", "projects", "recipes"] {
            self.add_dir(root, d);
        }
        self.add_file(
            root,
            "contact.txt",
            Some("Email: hello@frqise.me\nGithub: @frqise\nTwitter: @its_FrQise"),
        );

        let documents = self.child(root, "documents");
        self.add_file(documents, "readme.md", Some("# Documents\nTest Readme File"));

        let journal = self.child(root, "journal");
        self.add_file(
            journal,
            "01_entry.txt",
            Some("DATE: 2026-01-01\nTITLE: First Entry\n-------------------\nThis is an example journal entry."),
        );

        let projects = self.child(root, "projects");
        let web = self.add_dir(projects, "web");
        let python = self.add_dir(projects, "python");
        self.add_file(projects, "list.txt", None);
        self.add_file(web, "index.html", None);
        self.add_file(web, "script.js", None);
        self.add_file(python, "bot.py", None);

        let recipes = self.child(root, "recipes");
        self.add_file(
            recipes,
            "chef.txt",
            Some("Go to the kebab, call them Chef, enjoy your meal."),
        );
    }

    // Only used while building the static tree, where the name is known to exist.
    fn child(&self, parent: DirId, name: &str) -> DirId {
        self.lookup_child(parent, name).unwrap_or(parent)
    }

    pub fn add_dir(&mut self, parent: DirId, name: &str) -> DirId {
        let id = DirId(self.dirs.len());
        self.dirs.push(Directory::new(name, Some(parent)));
        self.dirs[parent.0].dirs.push(name.into());
        id
    }

    /// Lists `name` under `dir`. Files listed without content read as empty.
    pub fn add_file(&mut self, dir: DirId, name: &str, content: Option<&str>) {
        self.dirs[dir.0].files.push(name.into());
        if let Some(text) = content {
            self.data.insert(name.into(), text.into());
        }
    }

    pub fn root(&self) -> DirId {
        DirId(0)
    }

    pub fn dir(&self, id: DirId) -> &Directory {
        &self.dirs[id.0]
    }

    pub fn find(&self, name: &str) -> Option<DirId> {
        self.dirs.iter().position(|d| d.name == name).map(DirId)
    }

    pub fn ids(&self) -> impl Iterator<Item = DirId> + '_ {
        (0..self.dirs.len()).map(DirId)
    }

    fn lookup_child(&self, dir: DirId, name: &str) -> Option<DirId> {
        let d = self.dir(dir);
        if !d.dirs.iter().any(|c| c == name) {
            return None;
        }
        self.dirs
            .iter()
            .position(|c| c.name == name && c.parent == Some(dir))
            .map(DirId)
    }

    /// Child directory names then file names, each in declared order.
    pub fn list_entries(&self, dir: DirId) -> (&[String], &[String]) {
        let d = self.dir(dir);
        (&d.dirs, &d.files)
    }

    pub fn resolve(&self, cwd: DirId, arg: &str) -> Result<DirId, ShellError> {
        match arg {
            "" | "~" => Ok(self.root()),
            ".." => Ok(self.dir(cwd).parent.unwrap_or_else(|| self.root())),
            name => self
                .lookup_child(cwd, name)
                .ok_or_else(|| ShellError::NoSuchDirectory(name.into())),
        }
    }

    pub fn read_file(&self, cwd: DirId, name: &str) -> Result<&str, ShellError> {
        let d = self.dir(cwd);
        if d.files.iter().any(|f| f == name) {
            Ok(self.data.get(name).map(String::as_str).unwrap_or(""))
        } else if d.dirs.iter().any(|c| c == name) {
            Err(ShellError::IsADirectory(name.into()))
        } else {
            Err(ShellError::NoSuchFile(name.into()))
        }
    }

    /// The prompt-style location: `~` at root, `~/<name>` elsewhere.
    pub fn location(&self, dir: DirId) -> String {
        let d = self.dir(dir);
        if d.is_root() {
            "~".into()
        } else {
            format!("~/{}", d.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotdot_goes_to_parent_or_stays_at_root() {
        let fs = Vfs::new();
        for id in fs.ids() {
            let up = fs.resolve(id, "..").unwrap();
            match fs.dir(id).parent {
                Some(p) => assert_eq!(up, p),
                None => assert_eq!(up, fs.root()),
            }
        }
    }

    #[test]
    fn children_resolve_and_strangers_fail() {
        let fs = Vfs::new();
        for id in fs.ids() {
            for child in &fs.dir(id).dirs {
                let got = fs.resolve(id, child).unwrap();
                assert_eq!(&fs.dir(got).name, child);
                assert_eq!(fs.dir(got).parent, Some(id));
            }
        }
        let root = fs.root();
        for bad in ["web", "Projects", "projects/web", ".", "nope"] {
            assert_eq!(
                fs.resolve(root, bad),
                Err(ShellError::NoSuchDirectory(bad.into()))
            );
        }
        let web = fs.find("web").unwrap();
        assert_eq!(fs.resolve(web, "").unwrap(), root);
        assert_eq!(fs.resolve(web, "~").unwrap(), root);
    }

    #[test]
    fn tree_has_single_root_and_no_cycles() {
        let fs = Vfs::new();
        let roots: Vec<_> = fs.ids().filter(|&id| fs.dir(id).is_root()).collect();
        assert_eq!(roots, vec![fs.root()]);
        for id in fs.ids() {
            let mut cur = id;
            let mut steps = 0;
            while let Some(p) = fs.dir(cur).parent {
                cur = p;
                steps += 1;
                assert!(steps < 16);
            }
            assert_eq!(cur, fs.root());
        }
    }

    #[test]
    fn read_file_contract() {
        let fs = Vfs::new();
        let root = fs.root();
        assert_eq!(
            fs.read_file(root, "contact.txt").unwrap(),
            "Email: hello@frqise.me\nGithub: @frqise\nTwitter: @its_FrQise"
        );
        assert_eq!(
            fs.read_file(root, "projects"),
            Err(ShellError::IsADirectory("projects".into()))
        );
        assert_eq!(
            fs.read_file(root, "chef.txt"),
            Err(ShellError::NoSuchFile("chef.txt".into()))
        );
        let recipes = fs.resolve(root, "recipes").unwrap();
        assert!(fs.read_file(recipes, "chef.txt").unwrap().contains("kebab"));
        let projects = fs.find("projects").unwrap();
        assert_eq!(fs.read_file(projects, "list.txt").unwrap(), "");
    }

    #[test]
    fn entries_keep_declared_order() {
        let fs = Vfs::new();
        let (dirs, files) = fs.list_entries(fs.root());
        assert_eq!(dirs, ["documents", "journal", "projects", "recipes"]);
        assert_eq!(files, ["contact.txt"]);
        assert_eq!(fs.location(fs.root()), "~");
        assert_eq!(fs.location(fs.find("web").unwrap()), "~/web");
    }
}
