//! Per-root ignore predicate deciding which directories a scan may enter.
//!
//! Rules are gitignore-style and come from three sources, lowest precedence
//! first: a built-in default set, a global `ignore` file under the user
//! config directory, and `.fcdignore` / `.gitignore` files in the scan root.
//! The predicate is built once per top-level scan root and reused for the
//! whole subtree.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Directories no one wants to jump into.
const DEFAULT_RULES: &[&str] = &[
    ".git/",
    ".hg/",
    ".svn/",
    "node_modules/",
    "target/",
    "__pycache__/",
    ".venv/",
    ".cache/",
];

/// Answers "should this entry be skipped?" for paths under a fixed root.
pub struct IgnorePredicate {
    root: PathBuf,
    rules: Gitignore,
}

impl IgnorePredicate {
    /// Builds the predicate for `root`. Rule-loading problems degrade to the
    /// built-in defaults (or to matching nothing) rather than failing a scan.
    pub fn new(root: &Path, global_ignore_file: Option<&Path>) -> Self {
        let rules = match build_rules(root, global_ignore_file) {
            Ok(rules) => rules,
            Err(e) => {
                log::warn!("failed to load ignore rules for {}: {e}", root.display());
                Gitignore::empty()
            }
        };
        Self {
            root: root.to_path_buf(),
            rules,
        }
    }

    /// True when `path` (absolute, under this predicate's root) must not be
    /// matched or descended into. Only directories are ever tested.
    pub fn skip(&self, path: &Path) -> bool {
        let relative = match path.strip_prefix(&self.root) {
            Ok(rel) => rel,
            Err(_) => return false,
        };
        self.rules.matched(relative, true).is_ignore()
    }
}

fn build_rules(root: &Path, global_ignore_file: Option<&Path>) -> Result<Gitignore, ignore::Error> {
    let mut builder = GitignoreBuilder::new(root);
    for rule in DEFAULT_RULES {
        builder.add_line(None, rule)?;
    }
    // Global rules apply relative to every scan root, so they are added
    // line by line instead of as a rooted ignore file.
    if let Some(global) = global_ignore_file {
        match std::fs::read_to_string(global) {
            Ok(contents) => {
                for line in contents.lines() {
                    builder.add_line(None, line)?;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("cannot read {}: {e}", global.display()),
        }
    }
    for name in [".fcdignore", ".gitignore"] {
        let file = root.join(name);
        if file.is_file() {
            if let Some(e) = builder.add(&file) {
                log::warn!("bad pattern in {}: {e}", file.display());
            }
        }
    }
    builder.build()
}
