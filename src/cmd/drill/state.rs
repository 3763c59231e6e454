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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use tokio::sync::oneshot::Sender;

use vocadrill_core::engine::Engine;
use vocadrill_core::error::ErrorReport;
use vocadrill_core::error::Fallible;
use vocadrill_core::select::Selection;
use vocadrill_core::types::outcome::Outcome;
use vocadrill_core::types::record::LearningRecord;
use vocadrill_core::types::timestamp::Timestamp;
use vocadrill_core::types::word::UserId;

use crate::db::Database;

#[derive(Clone)]
pub struct ServerState {
    pub user_id: UserId,
    pub session_started_at: Timestamp,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub engine: Engine<Database>,
    /// The word on screen. `None` once the session is over.
    pub current: Option<Selection>,
    /// Set after the current word has been answered or skipped.
    pub feedback: Option<Feedback>,
    pub attempts: Vec<Outcome>,
    pub finished_at: Option<Timestamp>,
}

/// The result of answering the current word.
pub struct Feedback {
    pub typed: String,
    pub outcome: Outcome,
    pub record: LearningRecord,
}

impl ServerState {
    pub fn lock(&self) -> Fallible<MutexGuard<'_, MutableState>> {
        self.mutable
            .lock()
            .map_err(|e| ErrorReport::new(format!("session state poisoned: {e}")))
    }

    pub fn shutdown(&self) {
        match self.shutdown_tx.lock() {
            Ok(mut tx) => {
                if let Some(tx) = tx.take() {
                    let _ = tx.send(());
                }
            }
            Err(e) => log::error!("Failed to signal shutdown: {e}"),
        }
    }
}

impl MutableState {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.attempts.iter().filter(|o| **o == outcome).count()
    }
}
