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
use std::fmt::Write;

use vocadrill_core::catalog::SET_SIZE;
use vocadrill_core::error::Fallible;
use vocadrill_core::error::fail;
use vocadrill_core::types::record::LearningRecord;
use vocadrill_core::types::word::UserId;
use vocadrill_core::types::word::WordId;

use crate::collection::Collection;

/// List the catalog in sets of twenty words, or the words of one set.
pub fn print_sets(
    directory: Option<String>,
    user_id: Option<UserId>,
    set: Option<usize>,
) -> Fallible<()> {
    let coll = Collection::new(directory, user_id)?;
    println!("{}", render_sets(&coll, set)?);
    Ok(())
}

fn render_sets(coll: &Collection, set: Option<usize>) -> Fallible<String> {
    let records: HashMap<WordId, LearningRecord> = coll
        .engine
        .get_all_records(coll.user_id)?
        .into_iter()
        .map(|r| (r.word_id, r))
        .collect();
    let sets = coll.engine.catalog().sets(SET_SIZE);
    let mut out = String::new();
    match set {
        None => {
            for (idx, set) in sets.iter().enumerate() {
                let studied = set
                    .words
                    .iter()
                    .filter(|w| records.contains_key(&w.id))
                    .count();
                let _ = writeln!(
                    out,
                    "{:>3}. {:<16} {studied}/{} studied",
                    idx + 1,
                    set.title(),
                    set.words.len()
                );
            }
        }
        Some(n) => {
            let Some(set) = n.checked_sub(1).and_then(|idx| sets.get(idx)) else {
                return fail(format!("no set {n}, there are {} sets.", sets.len()));
            };
            let _ = writeln!(out, "{}", set.title());
            for word in set.words {
                let status = match records.get(&word.id) {
                    Some(r) => r.last_attempt_status.map(|s| s.as_str()).unwrap_or("studied"),
                    None => "new",
                };
                let _ = writeln!(
                    out,
                    "{:>5} {:<16} {:<12} {status}",
                    word.id, word.word_original, word.word_korean
                );
            }
        }
    }
    Ok(out.trim_end().to_string())
}
