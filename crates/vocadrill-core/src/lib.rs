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

//! vocadrill-core: word selection and spaced review for vocabulary drills.
//!
//! This library holds everything that does not touch the disk or the
//! network:
//! - The word catalog and fill-in-the-blank rendering
//! - Updating per-word learning records after an attempt
//! - Scoring due words and choosing the next word to present
//! - The `StatsStore` trait that persistence backends implement

pub mod answer;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod rng;
pub mod score;
pub mod select;
pub mod store;
pub mod types;
pub mod update;

// Re-exports for convenience
pub use answer::check_answer;
pub use catalog::Catalog;
pub use engine::{Engine, Progress};
pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use select::{Candidate, Selection, SelectionPolicy, Source};
pub use store::{MemoryStore, StatsStore};
pub use types::interval::ReviewInterval;
pub use types::outcome::Outcome;
pub use types::record::{AttemptOverrides, LearningRecord};
pub use types::timestamp::Timestamp;
pub use types::word::{UserId, WordEntry, WordId};
