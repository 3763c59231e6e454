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

use serde::Deserialize;
use serde::Serialize;

use crate::types::interval::ReviewInterval;
use crate::types::outcome::Outcome;
use crate::types::timestamp::Timestamp;
use crate::types::word::UserId;
use crate::types::word::WordId;

/// Learning statistics for one word, for one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearningRecord {
    pub user_id: UserId,
    pub word_id: WordId,
    /// Total attempts, skips included.
    pub study_count: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub skip_count: u32,
    /// Always equal to `study_count`.
    pub exposure_count: u32,
    pub last_study_date: Timestamp,
    /// `None` only for rows written by something other than this crate.
    pub last_attempt_status: Option<Outcome>,
    pub favorite: bool,
    /// `None` means the configured default applies.
    pub review_interval: Option<ReviewInterval>,
}

impl LearningRecord {
    /// The interval this record waits for, falling back to `default`.
    pub fn interval_or(&self, default: ReviewInterval) -> ReviewInterval {
        self.review_interval.unwrap_or(default)
    }

    /// Fraction of non-skipped attempts answered correctly.
    pub fn accuracy(&self) -> Option<f64> {
        let answered = self.correct_count + self.wrong_count;
        if answered == 0 {
            None
        } else {
            Some(self.correct_count as f64 / answered as f64)
        }
    }
}

/// Fields the presenter may set alongside an attempt, independently of
/// its outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttemptOverrides {
    pub favorite: Option<bool>,
    pub review_interval: Option<ReviewInterval>,
}

impl AttemptOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn favorite(favorite: bool) -> Self {
        Self {
            favorite: Some(favorite),
            ..Self::default()
        }
    }
}
