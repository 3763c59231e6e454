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

use std::collections::HashMap;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::word::WordEntry;
use crate::types::word::WordId;

/// Number of words shown per set when browsing the catalog.
pub const SET_SIZE: usize = 20;

/// The static, ordered list of words. Catalog order is the order in which
/// new words are introduced.
#[derive(Debug)]
pub struct Catalog {
    words: Vec<WordEntry>,
    positions: HashMap<WordId, usize>,
}

/// A contiguous slice of the catalog, numbered from one.
#[derive(Debug)]
pub struct WordSet<'a> {
    pub first: usize,
    pub last: usize,
    pub words: &'a [WordEntry],
}

impl WordSet<'_> {
    pub fn title(&self) -> String {
        format!("Words {} - {}", self.first, self.last)
    }
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and that every example
    /// sentence contains its word.
    pub fn new(words: Vec<WordEntry>) -> Fallible<Self> {
        let mut positions = HashMap::with_capacity(words.len());
        for (idx, word) in words.iter().enumerate() {
            if positions.insert(word.id, idx).is_some() {
                return Err(ErrorReport::data_integrity(format!(
                    "duplicate word id {} in catalog",
                    word.id
                )));
            }
            if word.blank().is_none() {
                return Err(ErrorReport::data_integrity(format!(
                    "example sentence of word {} ('{}') does not contain the word",
                    word.id, word.word_original
                )));
            }
        }
        Ok(Self { words, positions })
    }

    /// Parse a JSON array of word entries.
    pub fn from_json(text: &str) -> Fallible<Self> {
        let words: Vec<WordEntry> = serde_json::from_str(text)?;
        Self::new(words)
    }

    pub fn get(&self, id: WordId) -> Option<&WordEntry> {
        self.positions.get(&id).map(|&idx| &self.words[idx])
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Group the catalog into consecutive sets of `size` words.
    pub fn sets(&self, size: usize) -> Vec<WordSet<'_>> {
        let size = size.max(1);
        self.words
            .chunks(size)
            .enumerate()
            .map(|(idx, words)| WordSet {
                first: idx * size + 1,
                last: idx * size + words.len(),
                words,
            })
            .collect()
    }
}
