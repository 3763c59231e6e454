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
use crate::types::word::WordEntry;

/// Grade a typed answer. Surrounding whitespace and case are ignored. An
/// empty answer counts as a skip.
pub fn check_answer(word: &WordEntry, typed: &str) -> Outcome {
    let typed = typed.trim();
    if typed.is_empty() {
        Outcome::Skipped
    } else if typed.to_lowercase() == word.word_original.trim().to_lowercase() {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    }
}
