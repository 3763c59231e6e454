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

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::score::Score;
use crate::score::days_since;
use crate::score::is_due;
use crate::score::score;
use crate::types::interval::ReviewInterval;
use crate::types::record::LearningRecord;
use crate::types::timestamp::Timestamp;
use crate::types::word::WordEntry;
use crate::types::word::WordId;

/// Probability of trying a new word before a review, unless configured.
pub const DEFAULT_NEW_WORD_WEIGHT: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionPolicy {
    /// Probability, in `[0, 1]`, of trying the new-word branch first.
    pub new_word_weight: f64,
    /// Review interval for records that do not set their own.
    pub default_interval: ReviewInterval,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            new_word_weight: DEFAULT_NEW_WORD_WEIGHT,
            default_interval: ReviewInterval::default(),
        }
    }
}

/// Which branch produced a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    New,
    Review,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub word: WordEntry,
    pub source: Source,
}

/// A due word ranked for review.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub word_id: WordId,
    pub score: Score,
    pub days_since: i64,
}

/// The first catalog word the user has never attempted.
pub fn next_new_word<'a>(catalog: &'a Catalog, records: &[LearningRecord]) -> Option<&'a WordEntry> {
    let studied: HashSet<WordId> = records.iter().map(|r| r.word_id).collect();
    catalog.words().iter().find(|word| !studied.contains(&word.id))
}

/// All due records, highest score first. Ties keep the order of `records`.
///
/// Records whose word is missing from the catalog are logged and left out.
pub fn review_queue(
    catalog: &Catalog,
    records: &[LearningRecord],
    now: Timestamp,
    default_interval: ReviewInterval,
) -> Vec<Candidate> {
    let mut queue: Vec<Candidate> = records
        .iter()
        .filter(|record| {
            if catalog.contains(record.word_id) {
                true
            } else {
                log::warn!(
                    "Record for user {} refers to word {}, which is not in the catalog; skipping.",
                    record.user_id,
                    record.word_id
                );
                false
            }
        })
        .filter(|record| is_due(record, now, default_interval))
        .map(|record| Candidate {
            word_id: record.word_id,
            score: score(record, now),
            days_since: days_since(record, now),
        })
        .collect();
    // `sort_by` is stable.
    queue.sort_by(|a, b| b.score.total_cmp(&a.score));
    queue
}

/// The most urgent due word, if any.
pub fn next_review_word<'a>(
    catalog: &'a Catalog,
    records: &[LearningRecord],
    now: Timestamp,
    default_interval: ReviewInterval,
) -> Option<&'a WordEntry> {
    review_queue(catalog, records, now, default_interval)
        .first()
        .and_then(|top| catalog.get(top.word_id))
}

/// Pick the next word to present.
///
/// `draw` is a uniform sample from `[0, 1)`: below the new-word weight the
/// new-word branch is tried first, otherwise the review branch. Either
/// branch falls back to the other. `None` means every word has been
/// studied and nothing is due.
pub fn select_next(
    catalog: &Catalog,
    records: &[LearningRecord],
    now: Timestamp,
    draw: f64,
    policy: &SelectionPolicy,
) -> Option<Selection> {
    let new = || {
        next_new_word(catalog, records).map(|word| Selection {
            word: word.clone(),
            source: Source::New,
        })
    };
    let review = || {
        next_review_word(catalog, records, now, policy.default_interval).map(|word| Selection {
            word: word.clone(),
            source: Source::Review,
        })
    };
    if draw < policy.new_word_weight {
        log::debug!("Trying a new word first (draw {draw:.3}).");
        new().or_else(review)
    } else {
        log::debug!("Trying a review word first (draw {draw:.3}).");
        review().or_else(new)
    }
}
