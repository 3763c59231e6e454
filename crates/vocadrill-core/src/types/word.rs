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

pub type WordId = i64;

pub type UserId = i64;

/// A single entry of the word catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: WordId,
    pub word_original: String,
    pub word_korean: String,
    /// Contains `word_original` verbatim at least once.
    pub example_sentence: String,
    pub example_sentence_korean: String,
    pub importance: i64,
}

/// An example sentence split around the word being drilled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blank<'a> {
    pub prefix: &'a str,
    pub answer: &'a str,
    pub suffix: &'a str,
}

impl WordEntry {
    /// Split the example sentence at the first occurrence of the word.
    /// Returns `None` if the sentence does not contain it.
    pub fn blank(&self) -> Option<Blank<'_>> {
        if self.word_original.is_empty() {
            return None;
        }
        let (prefix, suffix) = self.example_sentence.split_once(&self.word_original)?;
        Some(Blank {
            prefix,
            answer: &self.word_original,
            suffix,
        })
    }
}

#[cfg(test)]
pub(crate) fn entry(id: WordId, word: &str, sentence: &str) -> WordEntry {
    WordEntry {
        id,
        word_original: word.to_string(),
        word_korean: format!("뜻 {id}"),
        example_sentence: sentence.to_string(),
        example_sentence_korean: String::new(),
        importance: 1,
    }
}
