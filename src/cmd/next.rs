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

use std::fmt::Write;

use vocadrill_core::error::Fallible;
use vocadrill_core::types::timestamp::Timestamp;
use vocadrill_core::types::word::UserId;

use crate::collection::Collection;

/// Print the word a drill would present next, without recording anything.
pub fn print_next(directory: Option<String>, user_id: Option<UserId>) -> Fallible<()> {
    let mut coll = Collection::new(directory, user_id)?;
    println!("{}", render_next(&mut coll, Timestamp::now())?);
    Ok(())
}

fn render_next(coll: &mut Collection, now: Timestamp) -> Fallible<String> {
    let Some(selection) = coll.engine.next_word(coll.user_id, now)? else {
        return Ok("Today's study session is complete.".to_string());
    };
    let word = &selection.word;
    let mut out = String::new();
    let _ = writeln!(out, "#{} ({:?})", word.id, selection.source);
    let _ = writeln!(out, "{}", word.word_korean);
    if let Some(blank) = word.blank() {
        let gap = "_".repeat(blank.answer.chars().count());
        let _ = writeln!(out, "{}{gap}{}", blank.prefix, blank.suffix);
    }
    let _ = write!(out, "{}", word.example_sentence_korean);
    Ok(out)
}
