// src/engine/curve.rs

/// Upper bound of a subject score.
pub const MAX_SCORE: u32 = 100;

/// A streak bonus is only granted while the bonused score stays at or below this.
pub const BONUS_CEILING: u32 = 86;

/// Streaks must be longer than this to earn a bonus.
const BONUS_MIN_STREAK: u32 = 5;
const BONUS_MAX: u32 = 3;

/// Penalty applies with more than this many errors...
const PENALTY_MIN_ERRORS: u32 = 5;
/// ...and a best streak below this.
const PENALTY_MAX_STREAK: u32 = 3;
const PENALTY: u32 = 2;

/// Piecewise curve from percentage correct to the base score.
///
/// Each segment starts at `(from, base)` and rises by `gain` across `width` points.
fn base_curve(p: f64) -> f64 {
    match p {
        p if p >= 100.0 => 100.0,
        p if p >= 96.0 => 80.0 + (p - 96.0) / 4.0 * 6.0,
        p if p >= 88.0 => 70.0 + (p - 88.0) / 8.0 * 10.0,
        p if p >= 76.0 => 55.0 + (p - 76.0) / 12.0 * 15.0,
        p if p >= 60.0 => 35.0 + (p - 60.0) / 16.0 * 20.0,
        p if p >= 40.0 => 15.0 + (p - 40.0) / 20.0 * 20.0,
        p => p / 40.0 * 15.0,
    }
}

/// Rounded base score for `correct` out of `total`. Zero questions score zero.
pub fn base_score(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let p = 100.0 * f64::from(correct) / f64::from(total);
    base_curve(p).round().max(0.0) as u32
}

/// Consistency bonus for a long streak, withheld once it would lift the
/// score above [`BONUS_CEILING`].
pub fn streak_bonus(base: u32, max_streak: u32) -> u32 {
    if max_streak <= BONUS_MIN_STREAK {
        return 0;
    }
    let candidate = (max_streak / 5).min(BONUS_MAX);
    if base + candidate <= BONUS_CEILING {
        candidate
    } else {
        0
    }
}

/// Penalty for many errors with no sustained run of correct answers.
pub fn inconsistency_penalty(errors: u32, max_streak: u32) -> u32 {
    if errors > PENALTY_MIN_ERRORS && max_streak < PENALTY_MAX_STREAK {
        PENALTY
    } else {
        0
    }
}

/// Maps `(correct, max_streak, total)` to the final subject score in `[0, 100]`.
pub fn score_curve(correct: u32, max_streak: u32, total: u32) -> u32 {
    let correct = correct.min(total);
    let base = base_score(correct, total);
    let errors = total - correct;

    let adjusted = i64::from(base) + i64::from(streak_bonus(base, max_streak))
        - i64::from(inconsistency_penalty(errors, max_streak));
    adjusted.clamp(0, i64::from(MAX_SCORE)) as u32
}
