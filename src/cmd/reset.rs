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
use vocadrill_core::error::fail;
use vocadrill_core::store::StatsStore;
use vocadrill_core::types::word::UserId;

use crate::collection::Collection;

/// Delete every learning record of the user. Requires `yes` as
/// confirmation.
pub fn reset_records(directory: Option<String>, user_id: Option<UserId>, yes: bool) -> Fallible<()> {
    if !yes {
        return fail("refusing to delete learning records without --yes.");
    }
    let coll = Collection::new(directory, user_id)?;
    let deleted = coll.engine.store().reset(coll.user_id)?;
    println!("Deleted {deleted} learning records.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use vocadrill_core::types::outcome::Outcome;
    use vocadrill_core::types::record::AttemptOverrides;
    use vocadrill_core::types::timestamp::Timestamp;

    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_reset_requires_confirmation() -> Fallible<()> {
        let dir = create_tmp_collection()?;
        let coll = Collection::new(Some(dir.clone()), None)?;
        coll.engine
            .apply_attempt(1, 1, Outcome::Correct, AttemptOverrides::none(), Timestamp::now())?;
        drop(coll);

        assert!(reset_records(Some(dir.clone()), None, false).is_err());
        let coll = Collection::new(Some(dir.clone()), None)?;
        assert_eq!(coll.engine.get_all_records(1)?.len(), 1);
        drop(coll);

        reset_records(Some(dir.clone()), None, true)?;
        let coll = Collection::new(Some(dir), None)?;
        assert!(coll.engine.get_all_records(1)?.is_empty());
        Ok(())
    }
}
