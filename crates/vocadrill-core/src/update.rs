// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::outcome::Outcome;
use crate::types::record::AttemptOverrides;
use crate::types::record::LearningRecord;
use crate::types::timestamp::Timestamp;
use crate::types::word::UserId;
use crate::types::word::WordId;

/// Compute the record that results from one attempt.
///
/// Every attempt, skips included, counts towards `study_count`. Exactly one
/// of `correct_count`, `wrong_count` and `skip_count` is incremented, so
/// their sum always equals `study_count`.
pub fn update_record(
    current: Option<LearningRecord>,
    user_id: UserId,
    word_id: WordId,
    outcome: Outcome,
    overrides: AttemptOverrides,
    studied_at: Timestamp,
) -> LearningRecord {
    let mut record = current.unwrap_or(LearningRecord {
        user_id,
        word_id,
        study_count: 0,
        correct_count: 0,
        wrong_count: 0,
        skip_count: 0,
        exposure_count: 0,
        last_study_date: studied_at,
        last_attempt_status: None,
        favorite: false,
        review_interval: None,
    });
    record.study_count += 1;
    match outcome {
        Outcome::Correct => record.correct_count += 1,
        Outcome::Incorrect => record.wrong_count += 1,
        Outcome::Skipped => record.skip_count += 1,
    }
    record.exposure_count = record.study_count;
    record.last_study_date = studied_at;
    record.last_attempt_status = Some(outcome);
    if let Some(favorite) = overrides.favorite {
        record.favorite = favorite;
    }
    if let Some(interval) = overrides.review_interval {
        record.review_interval = Some(interval);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::interval::ReviewInterval;
    use crate::types::timestamp::ts;

    #[test]
    fn test_fresh_skip() {
        let now = ts("2024-01-01T12:00:00.000");
        let record = update_record(None, 7, 1, Outcome::Skipped, AttemptOverrides::none(), now);
        assert_eq!(record.user_id, 7);
        assert_eq!(record.word_id, 1);
        assert_eq!(record.study_count, 1);
        assert_eq!(record.skip_count, 1);
        assert_eq!(record.correct_count, 0);
        assert_eq!(record.wrong_count, 0);
        assert_eq!(record.exposure_count, 1);
        assert_eq!(record.last_attempt_status, Some(Outcome::Skipped));
        assert_eq!(record.last_study_date, now);
        assert!(!record.favorite);
        assert_eq!(record.review_interval, None);
    }

    #[test]
    fn test_fresh_correct_and_incorrect() {
        let now = ts("2024-01-01T12:00:00.000");
        let correct = update_record(None, 1, 1, Outcome::Correct, AttemptOverrides::none(), now);
        assert_eq!((correct.correct_count, correct.wrong_count), (1, 0));
        let wrong = update_record(None, 1, 1, Outcome::Incorrect, AttemptOverrides::none(), now);
        assert_eq!((wrong.correct_count, wrong.wrong_count), (0, 1));
    }

    #[test]
    fn test_counts_after_many_attempts() {
        let outcomes = [
            Outcome::Correct,
            Outcome::Skipped,
            Outcome::Incorrect,
            Outcome::Correct,
            Outcome::Skipped,
            Outcome::Skipped,
            Outcome::Incorrect,
        ];
        let mut record = None;
        for (n, outcome) in outcomes.iter().enumerate() {
            let at = ts(&format!("2024-01-{:02}T08:00:00.000", n + 1));
            let next = update_record(record, 7, 1, *outcome, AttemptOverrides::none(), at);
            let n = n as u32 + 1;
            assert_eq!(next.study_count, n);
            assert_eq!(next.correct_count + next.wrong_count + next.skip_count, n);
            assert_eq!(next.exposure_count, next.study_count);
            assert_eq!(next.last_attempt_status, Some(*outcome));
            assert_eq!(next.last_study_date, at);
            record = Some(next);
        }
        let record = record.unwrap();
        assert_eq!(record.correct_count, 2);
        assert_eq!(record.wrong_count, 2);
        assert_eq!(record.skip_count, 3);
    }

    #[test]
    fn test_overrides() {
        let now = ts("2024-01-01T12:00:00.000");
        let overrides = AttemptOverrides {
            favorite: Some(true),
            review_interval: Some(ReviewInterval::days(3)),
        };
        let record = update_record(None, 7, 1, Outcome::Correct, overrides, now);
        assert!(record.favorite);
        assert_eq!(record.review_interval, Some(ReviewInterval::days(3)));

        // Without overrides, earlier settings survive.
        let later = ts("2024-01-05T12:00:00.000");
        let record = update_record(
            Some(record),
            7,
            1,
            Outcome::Incorrect,
            AttemptOverrides::none(),
            later,
        );
        assert!(record.favorite);
        assert_eq!(record.review_interval, Some(ReviewInterval::days(3)));

        let record = update_record(
            Some(record),
            7,
            1,
            Outcome::Correct,
            AttemptOverrides::favorite(false),
            later,
        );
        assert!(!record.favorite);
    }
}
