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

//! Storage of learning records.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::record::LearningRecord;
use crate::types::word::UserId;
use crate::types::word::WordId;

/// Durable mapping from `(user_id, word_id)` to a learning record.
pub trait StatsStore {
    /// All records of a user, in ascending word id order.
    fn get_all(&self, user_id: UserId) -> Fallible<Vec<LearningRecord>>;

    fn get(&self, user_id: UserId, word_id: WordId) -> Fallible<Option<LearningRecord>>;

    /// Insert the record, or overwrite the existing row with the same key.
    fn upsert(&self, record: &LearningRecord) -> Fallible<()>;

    /// Atomically read the record for a key, compute its replacement with
    /// `f`, and store it. No other write to the store may interleave.
    fn update<F>(&self, user_id: UserId, word_id: WordId, f: F) -> Fallible<LearningRecord>
    where
        F: FnOnce(Option<LearningRecord>) -> Fallible<LearningRecord>;

    /// Delete every record of a user. Returns how many were deleted.
    fn reset(&self, user_id: UserId) -> Fallible<usize>;
}

/// A store that lives in memory, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<(UserId, WordId), LearningRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Fallible<MutexGuard<'_, BTreeMap<(UserId, WordId), LearningRecord>>> {
        self.records
            .lock()
            .map_err(|e| ErrorReport::storage(format!("memory store lock poisoned: {e}")))
    }
}

impl StatsStore for MemoryStore {
    fn get_all(&self, user_id: UserId) -> Fallible<Vec<LearningRecord>> {
        let records = self.lock()?;
        Ok(records
            .range((user_id, WordId::MIN)..=(user_id, WordId::MAX))
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn get(&self, user_id: UserId, word_id: WordId) -> Fallible<Option<LearningRecord>> {
        Ok(self.lock()?.get(&(user_id, word_id)).cloned())
    }

    fn upsert(&self, record: &LearningRecord) -> Fallible<()> {
        self.lock()?
            .insert((record.user_id, record.word_id), record.clone());
        Ok(())
    }

    fn update<F>(&self, user_id: UserId, word_id: WordId, f: F) -> Fallible<LearningRecord>
    where
        F: FnOnce(Option<LearningRecord>) -> Fallible<LearningRecord>,
    {
        let mut records = self.lock()?;
        let current = records.get(&(user_id, word_id)).cloned();
        let next = f(current)?;
        records.insert((next.user_id, next.word_id), next.clone());
        Ok(next)
    }

    fn reset(&self, user_id: UserId) -> Fallible<usize> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|(uid, _), _| *uid != user_id);
        Ok(before - records.len())
    }
}
