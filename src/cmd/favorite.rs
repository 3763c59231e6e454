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

use vocadrill_core::error::Fallible;
use vocadrill_core::types::word::UserId;
use vocadrill_core::types::word::WordId;

use crate::collection::Collection;

pub fn set_favorite(
    directory: Option<String>,
    user_id: Option<UserId>,
    word_id: WordId,
    favorite: bool,
) -> Fallible<()> {
    let coll = Collection::new(directory, user_id)?;
    println!("{}", mark(&coll, word_id, favorite)?);
    Ok(())
}

fn mark(coll: &Collection, word_id: WordId, favorite: bool) -> Fallible<String> {
    let word = coll.engine.word(word_id)?.word_original.clone();
    let message = match coll.engine.set_favorite(coll.user_id, word_id, favorite)? {
        Some(_) if favorite => format!("Marked '{word}' as a favorite."),
        Some(_) => format!("Removed '{word}' from favorites."),
        None => format!("'{word}' has not been studied yet, nothing to mark."),
    };
    Ok(message)
}
