// src/engine/global.rs

use std::collections::BTreeMap;

use crate::models::{Subject, student::SubjectResult};

/// Upper bound of the weighted composite.
pub const MAX_GLOBAL_SCORE: u32 = 500;

/// Sum of every subject weight (3 + 3 + 3 + 3 + 1).
pub fn total_weight() -> u32 {
    Subject::ALL.iter().map(|s| s.weight()).sum()
}

/// Weighted composite of per-subject scores, scaled to `[0, 500]`.
///
/// Always divides by the full weight, so a missing subject counts as zero.
pub fn global_score<I>(scores: I) -> u32
where
    I: IntoIterator<Item = (Subject, u32)>,
{
    let weighted: u32 = scores.into_iter().map(|(s, score)| score * s.weight()).sum();
    let scaled = f64::from(weighted) / f64::from(total_weight()) * 5.0;
    (scaled.round() as u32).min(MAX_GLOBAL_SCORE)
}

/// Convenience over a student's `areas` map.
pub fn global_score_for(areas: &BTreeMap<Subject, SubjectResult>) -> u32 {
    global_score(areas.iter().map(|(subject, result)| (*subject, result.score)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_thirteen() {
        assert_eq!(total_weight(), 13);
    }

    #[test]
    fn uniform_eighty_gives_four_hundred() {
        let scores = Subject::ALL.map(|s| (s, 80));
        assert_eq!(global_score(scores), 400);
    }

    #[test]
    fn perfect_and_empty_bounds() {
        assert_eq!(global_score(Subject::ALL.map(|s| (s, 100))), 500);
        assert_eq!(global_score(Vec::<(Subject, u32)>::new()), 0);
    }

    #[test]
    fn english_weighs_a_third_of_the_others() {
        // 100 * 1 / 13 * 5 = 38.46
        assert_eq!(global_score([(Subject::Ingles, 100)]), 38);
        // 100 * 3 / 13 * 5 = 115.38
        assert_eq!(global_score([(Subject::Matematicas, 100)]), 115);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(global_score(Subject::ALL.map(|s| (s, 150))), 500);
    }
}
