//! Bounded-depth directory traversal: scans one subtree for names matching a
//! pattern segment, and walks ancestors upward until a scan produces matches.

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use crate::ignore_rules::IgnorePredicate;
use crate::matcher::{self, ScoreContribution};

/// Default recursion depth for every scan invocation.
pub const MAX_DEPTH: usize = 3;

/// A directory currently under consideration as the navigation target.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub name: String,
    /// Accumulated score; kept in sync with the sum of `reasons`.
    pub score: f64,
    /// Snapshot taken after segment propagation, before final ranking.
    pub full_score: f64,
    /// Recursion depth at which the candidate was found, relative to its
    /// scan root. Always >= 1.
    pub depth: usize,
    pub reasons: Vec<ScoreContribution>,
}

impl Candidate {
    /// Records a contribution and folds it into the score.
    pub fn add_contribution(&mut self, reason: &'static str, amount: f64) {
        if amount == 0.0 {
            return;
        }
        self.reasons.push(ScoreContribution { reason, amount });
        self.score += amount;
    }
}

/// Orders candidates by descending score.
pub fn by_score_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Recursively scans `root` for directories fuzzy-matching `segment`.
///
/// Matches at every level are returned, sorted by descending score. Listing
/// failures degrade to an empty result; single-entry failures are skipped.
pub fn scan(
    root: &Path,
    segment: &str,
    depth: usize,
    max_depth: usize,
    ignore: &IgnorePredicate,
) -> Vec<Candidate> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if matches!(e.kind(), io::ErrorKind::PermissionDenied | io::ErrorKind::NotADirectory) => {
            log::debug!("skipping unreadable {}: {e}", root.display());
            return Vec::new();
        }
        Err(e) => {
            log::warn!("cannot list {}: {e}", root.display());
            return Vec::new();
        }
    };

    let mut matches = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("skipping entry under {}: {e}", root.display());
                continue;
            }
        };
        let path = entry.path();
        if ignore.skip(&path) {
            continue;
        }
        let is_dir = match entry.file_type() {
            Ok(file_type) => file_type.is_dir(),
            Err(e) => {
                log::debug!("cannot stat {}: {e}", path.display());
                continue;
            }
        };
        if !is_dir {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(m) = matcher::match_segment(&name, segment) {
            matches.push(Candidate {
                path: path.clone(),
                name,
                score: m.score,
                full_score: m.score,
                depth: depth + 1,
                reasons: m.reasons,
            });
        }
        if depth < max_depth {
            matches.extend(scan(&path, segment, depth + 1, max_depth, ignore));
        }
    }

    matches.sort_by(by_score_desc);
    matches
}

/// Scans successive ancestors of `start` (beginning with its parent) until a
/// scan yields at least one candidate, or the filesystem root is reached.
///
/// Each ancestor gets a fresh ignore predicate so its own ignore files apply.
pub fn search_up(start: &Path, segment: &str, global_ignore_file: Option<&Path>) -> Vec<Candidate> {
    let mut current = match start.parent() {
        Some(parent) => parent.to_path_buf(),
        None => return Vec::new(),
    };
    loop {
        let ignore = IgnorePredicate::new(&current, global_ignore_file);
        let found = scan(&current, segment, 0, MAX_DEPTH, &ignore);
        if !found.is_empty() {
            return found;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return found,
        }
    }
}
