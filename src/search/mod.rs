//! Multi-segment search composition and pipeline orchestration.
//!
//! The first pattern segment is consumed by the upward ancestor search; every
//! later segment is resolved by scanning each surviving candidate's own path
//! as a fresh root, propagating the parent's score into its sub-matches.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{self, Settings};
use crate::ignore_rules::IgnorePredicate;
use crate::ranking;
use crate::scanner::{self, by_score_desc, Candidate};
use crate::selector::Selector;

/// Terminal outcomes of a search. Everything else degrades to partial
/// results inside the scanner.
#[derive(Debug, Error)]
pub enum FindError {
    #[error("pattern {0:?} contains no searchable segments")]
    EmptyPattern(String),
    #[error("no directories matched {0:?}")]
    NoMatch(String),
    #[error("no selection was made")]
    NoSelection,
    #[error(transparent)]
    Selector(#[from] anyhow::Error),
}

/// Penalty per level of extra depth at which a segment sub-match was found.
const SEGMENT_DEPTH_PENALTY: f64 = 8.0;

/// Resolves the remaining pattern segments against the current candidates.
///
/// Sub-matches below `threshold` are pruned before descending into further
/// segments; a pruned candidate never resurfaces. The merged result is
/// sorted by descending score.
pub fn resolve(
    candidates: Vec<Candidate>,
    segments: &[&str],
    threshold: f64,
    max_depth: usize,
    global_ignore: Option<&Path>,
) -> Vec<Candidate> {
    let (segment, rest) = match segments.split_first() {
        None => {
            let mut kept: Vec<Candidate> = candidates
                .into_iter()
                .filter(|c| c.score >= threshold)
                .collect();
            kept.sort_by(by_score_desc);
            return kept;
        }
        Some((segment, rest)) => (*segment, rest),
    };

    let mut merged = Vec::new();
    for parent in candidates {
        let ignore = IgnorePredicate::new(&parent.path, global_ignore);
        let subs = scanner::scan(&parent.path, segment, 0, max_depth, &ignore);
        let mut survivors = Vec::new();
        for mut sub in subs {
            sub.add_contribution("parent score", parent.score);
            let extra_depth = sub.depth.saturating_sub(1) as f64;
            sub.add_contribution("depth penalty", -extra_depth * SEGMENT_DEPTH_PENALTY);
            sub.full_score = sub.score;
            if sub.score >= threshold {
                survivors.push(sub);
            }
        }
        merged.extend(resolve(survivors, rest, threshold, max_depth, global_ignore));
    }
    merged.sort_by(by_score_desc);
    merged
}

/// Runs the whole pipeline: upward search for the first segment, segmented
/// search for the rest, ranking, then selection.
pub fn find_directory(
    cwd: &Path,
    pattern: &str,
    settings: &Settings,
    selector: &dyn Selector,
) -> Result<PathBuf, FindError> {
    let segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let (first, rest) = match segments.split_first() {
        Some((first, rest)) => (*first, rest),
        None => return Err(FindError::EmptyPattern(pattern.to_string())),
    };

    let global_ignore = config::global_ignore_file();
    let global_ignore = global_ignore.as_deref();

    let initial = scanner::search_up(cwd, first, global_ignore);
    if initial.is_empty() {
        return Err(FindError::NoMatch(pattern.to_string()));
    }

    let threshold = settings.effective_threshold();
    let resolved = resolve(initial, rest, threshold, settings.max_depth, global_ignore);
    let ranked = ranking::rank(resolved, cwd, settings);

    match ranked.as_slice() {
        [] => Err(FindError::NoMatch(pattern.to_string())),
        [only] => Ok(only.path.clone()),
        _ if settings.always_first_match => Ok(ranked[0].path.clone()),
        _ => match selector.select(&ranked)? {
            Some(path) => Ok(path),
            None => Err(FindError::NoSelection),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Records what it was offered and answers with a fixed choice.
    struct FakeSelector {
        offered: RefCell<Vec<Vec<PathBuf>>>,
        choice: Option<usize>,
    }

    impl FakeSelector {
        fn new(choice: Option<usize>) -> Self {
            Self {
                offered: RefCell::new(Vec::new()),
                choice,
            }
        }
    }

    impl Selector for FakeSelector {
        fn select(&self, candidates: &[Candidate]) -> anyhow::Result<Option<PathBuf>> {
            self.offered
                .borrow_mut()
                .push(candidates.iter().map(|c| c.path.clone()).collect());
            Ok(self
                .choice
                .and_then(|i| candidates.get(i))
                .map(|c| c.path.clone()))
        }
    }

    /// Fails the test if the pipeline consults the selector at all.
    struct UnreachableSelector;

    impl Selector for UnreachableSelector {
        fn select(&self, _candidates: &[Candidate]) -> anyhow::Result<Option<PathBuf>> {
            panic!("selector must not be consulted");
        }
    }

    fn mkdirs(root: &Path, paths: &[&str]) {
        for p in paths {
            fs::create_dir_all(root.join(p)).unwrap();
        }
    }

    fn root_candidate(path: PathBuf) -> Candidate {
        Candidate {
            name: String::new(),
            path,
            score: 0.0,
            full_score: 0.0,
            depth: 1,
            reasons: Vec::new(),
        }
    }

    #[test]
    fn empty_pattern_is_rejected_before_scanning() {
        let settings = Settings::default();
        for pattern in ["", "/", "///"] {
            let err = find_directory(
                Path::new("/nonexistent"),
                pattern,
                &settings,
                &UnreachableSelector,
            )
            .unwrap_err();
            assert!(matches!(err, FindError::EmptyPattern(_)), "{pattern:?}");
        }
    }

    #[test]
    fn resolve_adds_parent_score_and_snapshots_full_score() {
        let tmp = TempDir::new().unwrap();
        mkdirs(tmp.path(), &["src"]);
        let mut parent = root_candidate(tmp.path().to_path_buf());
        parent.add_contribution("segments", 30.0);

        let out = resolve(vec![parent], &["src"], 0.0, 3, None);
        assert_eq!(out.len(), 1);
        assert!(out[0]
            .reasons
            .iter()
            .any(|r| r.reason == "parent score" && r.amount == 30.0));
        assert_eq!(out[0].score, out[0].full_score);
    }

    #[test]
    fn deeper_submatches_are_penalized() {
        let tmp = TempDir::new().unwrap();
        mkdirs(tmp.path(), &["target", "sub/target"]);
        let out = resolve(
            vec![root_candidate(tmp.path().to_path_buf())],
            &["target"],
            0.0,
            3,
            None,
        );
        let shallow = out
            .iter()
            .find(|c| c.path == tmp.path().join("target"))
            .unwrap();
        let deep = out
            .iter()
            .find(|c| c.path == tmp.path().join("sub/target"))
            .unwrap();
        assert_eq!(shallow.depth, 1);
        assert_eq!(deep.depth, 2);
        assert_eq!(deep.score, shallow.score - 8.0);
    }

    #[test]
    fn intermediate_pruning_happens_before_descending() {
        let tmp = TempDir::new().unwrap();
        // Both intermediate directories contain the final segment, but the
        // weakly matching one is cut before its child is ever scanned.
        mkdirs(tmp.path(), &["mx/target", "mxlongweakname/target"]);
        let out = resolve(
            vec![root_candidate(tmp.path().to_path_buf())],
            &["mx", "target"],
            30.0,
            3,
            None,
        );
        assert!(out
            .iter()
            .all(|c| c.path.starts_with(tmp.path().join("mx"))
                && !c.path.starts_with(tmp.path().join("mxlongweakname"))));
        assert!(!out.is_empty());
    }

    #[test]
    fn end_to_end_prefers_closer_character_correspondence() {
        let tmp = TempDir::new().unwrap();
        mkdirs(
            tmp.path(),
            &[
                "projects/webapp/src",
                "projects/webtools/source",
                "projects/cwd-here",
            ],
        );
        let cwd = tmp.path().join("projects/cwd-here");
        // If both candidates survive pruning the selector picks the top one,
        // so either way the chosen path reflects the ranking.
        let selector = FakeSelector::new(Some(0));
        let chosen = find_directory(&cwd, "web/src", &Settings::default(), &selector).unwrap();
        assert_eq!(chosen, tmp.path().join("projects/webapp/src"));
    }

    #[test]
    fn all_results_are_nested_under_a_first_segment_match() {
        let tmp = TempDir::new().unwrap();
        mkdirs(
            tmp.path(),
            &["projects/webapp/src", "projects/other/src", "projects/cwd-here"],
        );
        let cwd = tmp.path().join("projects/cwd-here");
        let settings = Settings {
            show_all_matches: true,
            ..Settings::default()
        };
        let selector = FakeSelector::new(Some(0));
        let chosen = find_directory(&cwd, "web/src", &settings, &selector);
        // `other/src` must never appear: it is not under a "web" match.
        let offered = selector.offered.borrow();
        for list in offered.iter() {
            assert!(list.iter().all(|p| p.starts_with(tmp.path().join("projects/webapp"))));
        }
        if let Ok(path) = chosen {
            assert!(path.starts_with(tmp.path().join("projects/webapp")));
        }
    }

    #[test]
    fn unmatched_second_segment_is_a_no_match() {
        let tmp = TempDir::new().unwrap();
        mkdirs(tmp.path(), &["projects/webapp", "projects/cwd-here"]);
        let cwd = tmp.path().join("projects/cwd-here");
        let err = find_directory(&cwd, "web/qqq", &Settings::default(), &UnreachableSelector)
            .unwrap_err();
        assert!(matches!(err, FindError::NoMatch(_)));
        assert!(err.to_string().contains("web/qqq"));
    }

    #[test]
    fn always_first_mode_skips_the_selector() {
        let tmp = TempDir::new().unwrap();
        mkdirs(
            tmp.path(),
            &["projects/website/src", "projects/webstore/src", "projects/cwd-here"],
        );
        let cwd = tmp.path().join("projects/cwd-here");
        let settings = Settings {
            always_first_match: true,
            show_all_matches: true,
            ..Settings::default()
        };
        let chosen =
            find_directory(&cwd, "web/src", &settings, &UnreachableSelector).unwrap();
        assert!(chosen.starts_with(tmp.path().join("projects")));
    }

    #[test]
    fn declined_selection_is_a_distinct_terminal_error() {
        let tmp = TempDir::new().unwrap();
        mkdirs(
            tmp.path(),
            &["projects/website/src", "projects/webstore/src", "projects/cwd-here"],
        );
        let cwd = tmp.path().join("projects/cwd-here");
        let settings = Settings {
            show_all_matches: true,
            ..Settings::default()
        };
        let selector = FakeSelector::new(None);
        let err = find_directory(&cwd, "web/src", &settings, &selector).unwrap_err();
        assert!(matches!(err, FindError::NoSelection));
        assert_ne!(
            err.to_string(),
            FindError::NoMatch("web/src".to_string()).to_string()
        );
    }

    #[test]
    fn pipeline_is_idempotent_over_an_unchanged_tree() {
        let tmp = TempDir::new().unwrap();
        mkdirs(
            tmp.path(),
            &["projects/website/src", "projects/webstore/src", "projects/cwd-here"],
        );
        let cwd = tmp.path().join("projects/cwd-here");
        let settings = Settings {
            show_all_matches: true,
            ..Settings::default()
        };
        let selector = FakeSelector::new(None);
        let _ = find_directory(&cwd, "web/src", &settings, &selector);
        let _ = find_directory(&cwd, "web/src", &settings, &selector);
        let offered = selector.offered.borrow();
        assert_eq!(offered.len(), 2);
        assert_eq!(offered[0], offered[1]);
        assert!(!offered[0].is_empty());
    }
}
