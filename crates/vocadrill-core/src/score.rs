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

//! Review priority of studied words.
//!
//! The score is a heuristic, not a probability: higher means more urgently
//! in need of review. Words last answered wrongly or skipped rise quickly,
//! words answered correctly many times sink, and every day without study
//! pushes a word up. Favorites get a flat bonus.

use crate::types::interval::ReviewInterval;
use crate::types::outcome::Outcome;
use crate::types::record::LearningRecord;
use crate::types::timestamp::Timestamp;

pub type Score = f64;

const FAVORITE_BONUS: Score = 5.0;

/// Whole days between the last attempt and `now`.
pub fn days_since(record: &LearningRecord, now: Timestamp) -> i64 {
    now.days_since(record.last_study_date)
}

pub fn score(record: &LearningRecord, now: Timestamp) -> Score {
    let days = days_since(record, now) as f64;
    let study = record.study_count as f64;
    let correct = record.correct_count as f64;
    let wrong = record.wrong_count as f64;
    let skip = record.skip_count as f64;
    let exposure = record.exposure_count as f64;

    let base = match record.last_attempt_status {
        Some(Outcome::Correct) => -(correct * 2.0) - study + days * 0.5,
        Some(Outcome::Incorrect) => wrong * 3.0 + days,
        Some(Outcome::Skipped) => skip * 2.0 + days,
        None => days * 0.5,
    };

    let favorite = if record.favorite { FAVORITE_BONUS } else { 0.0 };

    base + days * 0.5 + study * 0.5 - correct * 0.5 + wrong + skip + exposure * 0.5 + favorite
}

/// A record is due once its review interval has fully elapsed.
pub fn is_due(record: &LearningRecord, now: Timestamp, default_interval: ReviewInterval) -> bool {
    days_since(record, now) >= record.interval_or(default_interval).as_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp::ts;

    fn record(status: Option<Outcome>, counts: (u32, u32, u32)) -> LearningRecord {
        let (correct_count, wrong_count, skip_count) = counts;
        let study_count = correct_count + wrong_count + skip_count;
        LearningRecord {
            user_id: 7,
            word_id: 1,
            study_count,
            correct_count,
            wrong_count,
            skip_count,
            exposure_count: study_count,
            last_study_date: ts("2024-01-01T12:00:00.000"),
            last_attempt_status: status,
            favorite: false,
            review_interval: None,
        }
    }

    fn feq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_incorrect_scenario() {
        // Three wrong answers, two right, last one wrong, ten days ago.
        let r = record(Some(Outcome::Incorrect), (2, 3, 0));
        let now = ts("2024-01-11T12:00:00.000");
        assert_eq!(days_since(&r, now), 10);
        let expected = 3.0 * 3.0 + 10.0 // base
            + 10.0 * 0.5 + 5.0 * 0.5 - 2.0 * 0.5 + 3.0 + 0.0 + 5.0 * 0.5;
        assert!(feq(score(&r, now), expected));
        assert!(feq(score(&r, now), 31.0));
    }

    #[test]
    fn test_correct_sinks() {
        let r = record(Some(Outcome::Correct), (4, 0, 0));
        let now = ts("2024-01-03T12:00:00.000");
        // base: -8 - 4 + 1, rest: 1 + 2 - 2 + 2
        assert!(feq(score(&r, now), -8.0));
    }

    #[test]
    fn test_skipped_and_favorite() {
        let mut r = record(Some(Outcome::Skipped), (0, 0, 2));
        let now = ts("2024-01-01T13:00:00.000");
        assert!(feq(score(&r, now), 8.0));
        r.favorite = true;
        assert!(feq(score(&r, now), 13.0));
    }

    #[test]
    fn test_unknown_status() {
        let mut r = record(None, (0, 0, 0));
        r.study_count = 1;
        r.exposure_count = 1;
        let now = ts("2024-01-05T12:00:00.000");
        assert!(feq(score(&r, now), 5.0));
    }

    #[test]
    fn test_deterministic() {
        let r = record(Some(Outcome::Incorrect), (1, 4, 2));
        let now = ts("2024-02-01T00:00:00.000");
        assert_eq!(score(&r, now).to_bits(), score(&r, now).to_bits());
    }

    #[test]
    fn test_due_filter() {
        let mut r = record(Some(Outcome::Correct), (1, 0, 0));
        let default = ReviewInterval::default();
        assert!(!is_due(&r, ts("2024-01-08T11:59:59.999"), default));
        assert!(is_due(&r, ts("2024-01-08T12:00:00.000"), default));
        r.review_interval = Some(ReviewInterval::days(2));
        assert!(!is_due(&r, ts("2024-01-02T12:00:00.000"), default));
        assert!(is_due(&r, ts("2024-01-03T12:00:00.000"), default));
        r.review_interval = Some(ReviewInterval::days(0));
        assert!(is_due(&r, ts("2024-01-01T12:00:00.000"), default));
    }
}
