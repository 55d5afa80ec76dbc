// src/engine/cohort.rs

use crate::models::{
    Subject,
    analytics::{Distractors, QuestionStat},
    report::SubjectAnalytics,
    student::StudentRecord,
};

/// Percentage with one decimal place; `0.0` when nothing was attempted.
pub fn correct_rate(correct: u32, attempts: u32) -> f64 {
    if attempts == 0 {
        return 0.0;
    }
    (f64::from(correct) / f64::from(attempts) * 1000.0).round() / 10.0
}

/// Aggregates every student's answers to each question of `subject`.
///
/// Every detail counts as an attempt, blank or not. Only answers that are
/// exactly `A`..`D` land in the distractor counts.
pub fn cohort_analytics<'a, I>(students: I, subject: Subject) -> SubjectAnalytics
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut stats = SubjectAnalytics::new();

    let details = students
        .into_iter()
        .filter_map(|student| student.areas.get(&subject))
        .flat_map(|result| result.question_details.iter());

    for detail in details {
        let stat = stats
            .entry(detail.id.clone())
            .or_insert_with(|| QuestionStat {
                question_id: detail.id.clone(),
                total_attempts: 0,
                correct_responses: 0,
                correct_rate: 0.0,
                distractors: Distractors::default(),
            });

        stat.total_attempts += 1;
        if detail.is_correct {
            stat.correct_responses += 1;
        }
        stat.distractors.record(&detail.value);
    }

    for stat in stats.values_mut() {
        stat.correct_rate = correct_rate(stat.correct_responses, stat.total_attempts);
    }

    stats
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{response::QuestionDetail, student::SubjectResult};

    fn student(id: &str, answers: &[(&str, bool)]) -> StudentRecord {
        let details: Vec<QuestionDetail> = answers
            .iter()
            .enumerate()
            .map(|(i, (value, ok))| QuestionDetail {
                id: format!("SUB [{}.]", i + 1),
                number: i as u32 + 1,
                value: value.to_string(),
                correct_answer: Some("A".to_string()),
                is_correct: *ok,
            })
            .collect();
        let correct = details.iter().filter(|d| d.is_correct).count() as u32;
        let total = details.len() as u32;

        let mut areas = BTreeMap::new();
        areas.insert(
            Subject::Matematicas,
            SubjectResult {
                subject_key: Subject::Matematicas,
                score: 0,
                errors: total - correct,
                correct_count: correct,
                max_streak: 0,
                total_questions: total,
                question_details: details,
            },
        );
        StudentRecord {
            id: id.to_string(),
            name: String::new(),
            email: String::new(),
            areas,
            global_score: 0,
        }
    }

    #[test]
    fn counts_attempts_correct_and_distractors() {
        let students = vec![
            student("11111", &[("A", true), ("B", false)]),
            student("22222", &[("A", true), ("", false)]),
            student("33333", &[("C", false), ("X", false)]),
        ];

        let stats = cohort_analytics(&students, Subject::Matematicas);

        let q1 = &stats["SUB [1.]"];
        assert_eq!(q1.total_attempts, 3);
        assert_eq!(q1.correct_responses, 2);
        assert_eq!(q1.correct_rate, 66.7);
        assert_eq!(q1.distractors, Distractors { a: 2, b: 0, c: 1, d: 0 });

        let q2 = &stats["SUB [2.]"];
        assert_eq!(q2.total_attempts, 3);
        assert_eq!(q2.correct_rate, 0.0);
        assert_eq!(q2.distractors.total(), 1);
        assert!(q2.distractors.total() <= q2.total_attempts);
    }

    #[test]
    fn other_subjects_are_ignored() {
        let students = vec![student("11111", &[("A", true)])];
        assert!(cohort_analytics(&students, Subject::Ingles).is_empty());
    }

    #[test]
    fn distractors_always_serialize_all_four_options() {
        let json = serde_json::to_value(Distractors::default()).unwrap();
        for option in ["A", "B", "C", "D"] {
            assert_eq!(json[option], 0);
        }
    }

    #[test]
    fn rate_rounds_to_one_decimal() {
        assert_eq!(correct_rate(1, 3), 33.3);
        assert_eq!(correct_rate(2, 3), 66.7);
        assert_eq!(correct_rate(0, 0), 0.0);
        assert_eq!(correct_rate(5, 5), 100.0);
    }
}
