//! Question partitioning.
//!
//! Each historical statistic for a question leans `+1` (mostly yes) or `-1`
//! (anything else). The sum is the question's discrimination score. A score
//! near zero means past responders disagreed, so the question splits the
//! candidates most evenly and is preferred.

use guess_catalog::{AnswerStat, Question};

use crate::error::EngineError;

/// A question together with its discrimination score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredQuestion<'a> {
    pub question: &'a Question,
    pub score: i64,
}

/// Discrimination score over a question's statistics.
pub fn discrimination_score<'a>(stats: impl IntoIterator<Item = &'a AnswerStat>) -> i64 {
    stats.into_iter().map(AnswerStat::lean).sum()
}

/// Pick the question whose score is closest to zero.
///
/// Only a strictly smaller `|score|` replaces the current best, so ties keep
/// the earliest question in `pool`. Returns `Ok(None)` for an empty pool.
pub fn best_partition<'a, F>(
    pool: &'a [Question],
    mut score_of: F,
) -> Result<Option<ScoredQuestion<'a>>, EngineError>
where
    F: FnMut(&Question) -> i64,
{
    if pool.is_empty() {
        return Ok(None);
    }

    // None stands for an unbounded score, so the first question always wins.
    let mut best: Option<ScoredQuestion<'a>> = None;
    for question in pool {
        let score = score_of(question);
        let improves = match &best {
            None => true,
            Some(current) => score.unsigned_abs() < current.score.unsigned_abs(),
        };
        if improves {
            best = Some(ScoredQuestion { question, score });
        }
    }

    best.map(Some).ok_or(EngineError::Partitioning {
        pool_size: pool.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use guess_catalog::{PersonId, QuestionId};

    fn stats(question: QuestionId, leans: &[(u32, u32)]) -> Vec<AnswerStat> {
        leans
            .iter()
            .map(|&(yes, no)| AnswerStat::new(question, PersonId::new(), yes, no))
            .collect()
    }

    #[test]
    fn test_discrimination_score() {
        let q = QuestionId::new();
        assert_eq!(discrimination_score(&stats(q, &[(3, 1), (2, 0), (0, 4)])), 1);
        assert_eq!(discrimination_score(&stats(q, &[(0, 0), (1, 1)])), -2);
        assert_eq!(discrimination_score(&Vec::<AnswerStat>::new()), 0);
    }

    #[test]
    fn test_empty_pool() {
        let result = best_partition(&[], |_| 0).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_picks_most_contested() {
        let pool = vec![
            Question::new("Lopsided yes"),
            Question::new("Even split"),
            Question::new("Lopsided no"),
        ];
        let scores = [4, 0, -3];

        let best = best_partition(&pool, |q| {
            let index = pool.iter().position(|p| p.id == q.id).unwrap();
            scores[index]
        })
        .unwrap()
        .unwrap();

        assert_eq!(best.question.text, "Even split");
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_ties_keep_first() {
        let pool = vec![
            Question::new("First"),
            Question::new("Second"),
            Question::new("Third"),
        ];
        let scores = [2, -2, 2];
        let mut calls = 0;

        let best = best_partition(&pool, |_| {
            let score = scores[calls];
            calls += 1;
            score
        })
        .unwrap()
        .unwrap();

        assert_eq!(best.question.text, "First");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_single_question_always_wins() {
        let pool = vec![Question::new("Only")];
        let best = best_partition(&pool, |_| i64::MIN).unwrap().unwrap();
        assert_eq!(best.question.text, "Only");
    }

    #[test]
    fn test_result_is_minimal() {
        let pool: Vec<Question> = (0..6).map(|i| Question::new(format!("Q{i}"))).collect();
        let scores = [5, -4, 3, -1, 2, 1];
        let score_of = |q: &Question| {
            let index = pool.iter().position(|p| p.id == q.id).unwrap();
            scores[index]
        };

        let best = best_partition(&pool, score_of).unwrap().unwrap();

        for question in &pool {
            assert!(best.score.abs() <= score_of(question).abs());
        }
        assert_eq!(best.question.text, "Q3");
    }
}
