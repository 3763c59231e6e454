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

//! The surface the presenter talks to.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::score::is_due;
use crate::select::Candidate;
use crate::select::Selection;
use crate::select::SelectionPolicy;
use crate::select::review_queue;
use crate::select::select_next;
use crate::store::StatsStore;
use crate::types::outcome::Outcome;
use crate::types::record::AttemptOverrides;
use crate::types::record::LearningRecord;
use crate::types::timestamp::Timestamp;
use crate::types::word::UserId;
use crate::types::word::WordEntry;
use crate::types::word::WordId;
use crate::update::update_record;

pub struct Engine<S: StatsStore> {
    store: S,
    catalog: Catalog,
    policy: SelectionPolicy,
    rng: TinyRng,
}

/// A summary of a user's progress through the catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Progress {
    pub total_words: usize,
    pub studied_words: usize,
    pub new_words: usize,
    pub due_words: usize,
    pub favorite_words: usize,
    pub attempts: u64,
    pub correct: u64,
    pub wrong: u64,
    pub skipped: u64,
    /// Share of non-skipped attempts that were correct.
    pub accuracy: Option<f64>,
}

impl<S: StatsStore> Engine<S> {
    pub fn new(store: S, catalog: Catalog, policy: SelectionPolicy, rng: TinyRng) -> Fallible<Self> {
        if !(0.0..=1.0).contains(&policy.new_word_weight) {
            return Err(ErrorReport::config(format!(
                "new word weight must be between 0 and 1, got {}",
                policy.new_word_weight
            )));
        }
        Ok(Self {
            store,
            catalog,
            policy,
            rng,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up a catalog word.
    pub fn word(&self, word_id: WordId) -> Fallible<&WordEntry> {
        self.catalog
            .get(word_id)
            .ok_or_else(|| ErrorReport::not_found(format!("no word with id {word_id} in the catalog")))
    }

    /// The next word to present, or `None` once every word has been studied
    /// and nothing is due.
    pub fn next_word(&mut self, user_id: UserId, now: Timestamp) -> Fallible<Option<Selection>> {
        let records = self.store.get_all(user_id)?;
        let draw = self.rng.next_f64();
        let selection = select_next(&self.catalog, &records, now, draw, &self.policy);
        match &selection {
            Some(Selection { word, source }) => {
                log::debug!("Next word for user {user_id}: {} ({source:?}).", word.id)
            }
            None => log::info!("Nothing left to study for user {user_id}."),
        }
        Ok(selection)
    }

    /// Record one attempt and return the updated record.
    pub fn apply_attempt(
        &self,
        user_id: UserId,
        word_id: WordId,
        outcome: Outcome,
        overrides: AttemptOverrides,
        now: Timestamp,
    ) -> Fallible<LearningRecord> {
        self.word(word_id)?;
        let record = self.store.update(user_id, word_id, |current| {
            Ok(update_record(current, user_id, word_id, outcome, overrides, now))
        })?;
        log::debug!(
            "User {user_id} word {word_id}: {outcome} (attempt {}).",
            record.study_count
        );
        Ok(record)
    }

    pub fn get_all_records(&self, user_id: UserId) -> Fallible<Vec<LearningRecord>> {
        self.store.get_all(user_id)
    }

    /// Mark or unmark a word as a favorite. Returns `None` if the user has
    /// never attempted the word: there is no record to mark.
    pub fn set_favorite(
        &self,
        user_id: UserId,
        word_id: WordId,
        favorite: bool,
    ) -> Fallible<Option<LearningRecord>> {
        self.word(word_id)?;
        let result = self.store.update(user_id, word_id, |current| match current {
            Some(mut record) => {
                record.favorite = favorite;
                Ok(record)
            }
            None => Err(ErrorReport::not_found(format!(
                "user {user_id} has no record for word {word_id}"
            ))),
        });
        match result {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Not setting favorite: {}", e.message());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Due words, most urgent first.
    pub fn review_queue(&self, user_id: UserId, now: Timestamp) -> Fallible<Vec<Candidate>> {
        let records = self.store.get_all(user_id)?;
        Ok(review_queue(
            &self.catalog,
            &records,
            now,
            self.policy.default_interval,
        ))
    }

    pub fn progress(&self, user_id: UserId, now: Timestamp) -> Fallible<Progress> {
        let records: Vec<LearningRecord> = self
            .store
            .get_all(user_id)?
            .into_iter()
            .filter(|r| self.catalog.contains(r.word_id))
            .collect();
        let sum = |f: fn(&LearningRecord) -> u32| records.iter().map(|r| f(r) as u64).sum::<u64>();
        let correct = sum(|r| r.correct_count);
        let wrong = sum(|r| r.wrong_count);
        let accuracy = if correct + wrong == 0 {
            None
        } else {
            Some(correct as f64 / (correct + wrong) as f64)
        };
        Ok(Progress {
            total_words: self.catalog.len(),
            studied_words: records.len(),
            new_words: self.catalog.len() - records.len(),
            due_words: records
                .iter()
                .filter(|r| is_due(r, now, self.policy.default_interval))
                .count(),
            favorite_words: records.iter().filter(|r| r.favorite).count(),
            attempts: sum(|r| r.study_count),
            correct,
            wrong,
            skipped: sum(|r| r.skip_count),
            accuracy,
        })
    }
}
