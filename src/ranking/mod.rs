//! Final ranking of the merged candidate set: locality bonus, confidence
//! pruning, a flat depth penalty, a relative score band, and an absolute
//! floor. Everything except the floor is bypassed in show-all mode.

use std::path::Path;

use crate::config::Settings;
use crate::scanner::{by_score_desc, Candidate};

const LOCALITY_BONUS: f64 = 10.0;
const CONFIDENCE_RATIO: f64 = 0.85;
const DEPTH_PENALTY: f64 = 5.0;
const RELATIVE_BAND: f64 = 0.8;
const ABSOLUTE_FLOOR: f64 = 40.0;

/// Applies the final ranking stages and returns the surviving candidates in
/// descending score order. A candidate discarded here is never resurrected.
pub fn rank(mut candidates: Vec<Candidate>, cwd: &Path, settings: &Settings) -> Vec<Candidate> {
    // Positional comparison of path components against the working
    // directory; components past the shorter path contribute nothing.
    for candidate in &mut candidates {
        let shared = candidate
            .path
            .components()
            .zip(cwd.components())
            .filter(|(a, b)| a == b)
            .count();
        candidate.add_contribution("locality bonus", shared as f64 * LOCALITY_BONUS);
    }

    if !settings.show_all_matches {
        candidates.sort_by(by_score_desc);

        // A clear gap between the best and second-best score is decisive.
        if candidates.len() > 1 {
            let best = candidates[0].score;
            let second = candidates[1].score;
            if best > 0.0 && second / best < CONFIDENCE_RATIO {
                candidates.truncate(1);
            }
        }

        for candidate in &mut candidates {
            candidate.add_contribution("depth penalty", -(candidate.depth as f64) * DEPTH_PENALTY);
        }

        if let Some(max) = candidates.iter().map(|c| c.score).max_by(f64::total_cmp) {
            candidates.retain(|c| c.score > RELATIVE_BAND * max);
        }
    }

    candidates.retain(|c| c.score > ABSOLUTE_FLOOR);
    candidates.sort_by(by_score_desc);
    for candidate in &mut candidates {
        candidate
            .reasons
            .sort_by(|a, b| b.amount.total_cmp(&a.amount));
    }
    candidates
}
