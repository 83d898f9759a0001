//! Character-level fuzzy matching of a directory name against one pattern
//! segment. Every bonus and penalty is recorded as a `ScoreContribution` so
//! that a candidate's final score can always be explained.

/// A single named component of a score. `amount` is negative for penalties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreContribution {
    pub reason: &'static str,
    pub amount: f64,
}

/// Result of matching one name against one pattern segment.
///
/// `positions` holds one index into the name per pattern character, strictly
/// increasing. The sum of `reasons` amounts equals `score`.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub score: f64,
    pub positions: Vec<usize>,
    pub reasons: Vec<ScoreContribution>,
}

const EXACT_BONUS: f64 = 20.0;
const START_BONUS: f64 = 10.0;
const CASE_BONUS: f64 = 8.0;
const CONSECUTIVE_STEP: f64 = 3.0;
const PROXIMITY_WINDOW: usize = 5;
const LENGTH_PENALTY_FACTOR: f64 = 0.5;

/// Characters treated as token boundaries inside a directory name.
fn is_boundary(c: char) -> bool {
    matches!(c, '-' | '_' | '.')
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Fuzzy-matches `segment` against `name`, returning `None` when the segment
/// is not a subsequence of the name (or is empty).
pub fn match_segment(name: &str, segment: &str) -> Option<MatchResult> {
    if segment.is_empty() {
        return None;
    }

    let name_chars: Vec<char> = name.chars().collect();
    let seg_chars: Vec<char> = segment.chars().collect();

    // Fast reject: the segment's first character must occur somewhere.
    let anchor = fold(seg_chars[0]);
    if !name_chars.iter().any(|&c| fold(c) == anchor) {
        return None;
    }

    let mut reasons = Vec::new();
    if name.to_lowercase() == segment.to_lowercase() {
        reasons.push(ScoreContribution {
            reason: "exact match",
            amount: EXACT_BONUS,
        });
    }

    let mut positions = Vec::with_capacity(seg_chars.len());
    let mut cursor = 0;
    let mut consecutive: u32 = 0;
    let mut prev_index: Option<usize> = None;

    for (i, &c) in name_chars.iter().enumerate() {
        if cursor == seg_chars.len() {
            break;
        }
        if fold(c) != fold(seg_chars[cursor]) {
            continue;
        }

        if i == 0 || is_boundary(name_chars[i - 1]) {
            reasons.push(ScoreContribution {
                reason: "start bonus",
                amount: START_BONUS,
            });
        }
        if c == seg_chars[cursor] {
            reasons.push(ScoreContribution {
                reason: "case bonus",
                amount: CASE_BONUS,
            });
        }
        if prev_index == Some(i.wrapping_sub(1)) {
            consecutive += 1;
            reasons.push(ScoreContribution {
                reason: "consecutive run",
                amount: f64::from(consecutive) * CONSECUTIVE_STEP,
            });
        } else {
            consecutive = 0;
        }

        positions.push(i);
        prev_index = Some(i);
        cursor += 1;
    }

    if cursor < seg_chars.len() {
        return None;
    }

    let proximity: f64 = positions
        .windows(2)
        .map(|pair| PROXIMITY_WINDOW.saturating_sub(pair[1] - pair[0]) as f64)
        .sum();
    if proximity > 0.0 {
        reasons.push(ScoreContribution {
            reason: "proximity",
            amount: proximity,
        });
    }

    let length_penalty = (name_chars.len() - seg_chars.len()) as f64 * LENGTH_PENALTY_FACTOR;
    if length_penalty != 0.0 {
        reasons.push(ScoreContribution {
            reason: "length penalty",
            amount: -length_penalty,
        });
    }

    let score = reasons.iter().map(|r| r.amount).sum();
    Some(MatchResult {
        score,
        positions,
        reasons,
    })
}
