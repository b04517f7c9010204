//! Answer aggregation.
//!
//! Turns user answers and historical statistics into session bookkeeping:
//! the user's answer on the current question, the candidates' match
//! counters, and the catalogue-side answer shown in the summary.

use std::collections::HashMap;

use guess_catalog::{dominant_answer, AnswerStat, AnswerType, Person, PersonId};

use crate::session::{GameData, GameQuestion};

/// Dominant answer over the summed counts of several statistics.
pub fn collective_answer<'a>(stats: impl IntoIterator<Item = &'a AnswerStat>) -> AnswerType {
    let (yes, no) = stats.into_iter().fold((0u32, 0u32), |(yes, no), stat| {
        (yes.saturating_add(stat.yes_count), no.saturating_add(stat.no_count))
    });
    dominant_answer(yes, no)
}

/// Update candidate counters after the user answered a question.
///
/// `stats` are the statistics for that question. A candidate is counted only
/// when both the user's answer and the candidate's own dominant answer are
/// definite.
pub fn update_candidates(candidates: &mut [Person], stats: &[AnswerStat], answer: AnswerType) {
    if !answer.is_definite() {
        return;
    }

    let by_person: HashMap<PersonId, AnswerType> = stats
        .iter()
        .map(|stat| (stat.person_id, stat.dominant()))
        .collect();

    for person in candidates.iter_mut() {
        match by_person.get(&person.id) {
            Some(implied) if implied.is_definite() => person.record_occurrence(*implied == answer),
            _ => {}
        }
    }
}

/// Store the user's answer on the current question and update candidates.
///
/// Returns the answered question, or `None` if nothing was asked yet.
pub fn record_answer<'a>(
    data: &'a mut GameData,
    stats: &[AnswerStat],
    answer: AnswerType,
) -> Option<&'a GameQuestion> {
    let question = data.question_set.last_mut()?;
    question.user_answer = answer;
    update_candidates(&mut data.people_set, stats, answer);
    data.question_set.last()
}

/// Overwrite the catalogue-side answers with one person's dominant answers.
///
/// `person_stats` are that person's statistics; questions without one get
/// `Unknown`.
pub fn fill_person_answers(question_set: &mut [GameQuestion], person_stats: &[AnswerStat]) {
    for question in question_set.iter_mut() {
        question.person_answer = person_stats
            .iter()
            .find(|stat| stat.question_id == question.question_id)
            .map_or(AnswerType::Unknown, AnswerStat::dominant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guess_catalog::{Question, QuestionId};

    #[test]
    fn test_collective_answer() {
        let q = QuestionId::new();
        let stats = vec![
            AnswerStat::new(q, PersonId::new(), 3, 0),
            AnswerStat::new(q, PersonId::new(), 0, 2),
        ];
        assert_eq!(collective_answer(&stats), AnswerType::Yes);

        let zero = vec![AnswerStat::new(q, PersonId::new(), 0, 0)];
        assert_eq!(collective_answer(&zero), AnswerType::Unknown);
        assert_eq!(collective_answer(&Vec::<AnswerStat>::new()), AnswerType::Unknown);

        let tied = vec![AnswerStat::new(q, PersonId::new(), 2, 2)];
        assert_eq!(collective_answer(&tied), AnswerType::No);
    }

    #[test]
    fn test_update_candidates() {
        let q = QuestionId::new();
        let mut people = vec![Person::new("Yes-ish"), Person::new("No-ish"), Person::new("Blank")];
        let stats = vec![
            AnswerStat::new(q, people[0].id, 5, 1),
            AnswerStat::new(q, people[1].id, 0, 4),
            AnswerStat::new(q, people[2].id, 0, 0),
        ];

        update_candidates(&mut people, &stats, AnswerType::Yes);

        assert_eq!((people[0].correct_answers, people[0].occurrence_count), (1, 1));
        assert_eq!((people[1].correct_answers, people[1].occurrence_count), (0, 1));
        assert_eq!((people[2].correct_answers, people[2].occurrence_count), (0, 0));
    }

    #[test]
    fn test_unknown_answer_changes_nothing() {
        let q = QuestionId::new();
        let mut people = vec![Person::new("Someone")];
        let stats = vec![AnswerStat::new(q, people[0].id, 5, 1)];

        update_candidates(&mut people, &stats, AnswerType::Unknown);

        assert_eq!(people[0].occurrence_count, 0);
    }

    #[test]
    fn test_record_answer_stores_verbatim() {
        let question = Question::new("Is it an athlete?");
        let mut data = GameData::new(vec![Person::new("Runner")]);
        assert!(record_answer(&mut data, &[], AnswerType::No).is_none());

        data.push_question(GameQuestion::new(&question, AnswerType::Yes));
        let answered = record_answer(&mut data, &[], AnswerType::No).unwrap();

        assert_eq!(answered.user_answer, AnswerType::No);
        assert_eq!(answered.person_answer, AnswerType::Yes);
        assert_eq!(data.questions_asked, 1);
    }

    #[test]
    fn test_fill_person_answers() {
        let person = PersonId::new();
        let known = Question::new("Known");
        let unknown = Question::new("Not in stats");
        let mut questions = vec![
            GameQuestion::new(&known, AnswerType::Unknown),
            GameQuestion::new(&unknown, AnswerType::Yes),
        ];
        let stats = vec![AnswerStat::new(known.id, person, 1, 7)];

        fill_person_answers(&mut questions, &stats);

        assert_eq!(questions[0].person_answer, AnswerType::No);
        assert_eq!(questions[1].person_answer, AnswerType::Unknown);
    }
}
