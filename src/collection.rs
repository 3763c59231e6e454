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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use vocadrill_core::catalog::Catalog;
use vocadrill_core::engine::Engine;
use vocadrill_core::error::Fallible;
use vocadrill_core::error::fail;
use vocadrill_core::rng::TinyRng;
use vocadrill_core::types::word::UserId;

use crate::config::Config;
use crate::db::Database;

pub const DB_FILE: &str = "vocadrill.db";

/// Word list looked up in the collection directory when the configuration
/// does not name one.
pub const CATALOG_FILE: &str = "words.json";

const BUNDLED_CATALOG: &str = include_str!("../data/words.json");

/// A directory holding the learning database and, optionally, a
/// configuration file and a word list.
pub struct Collection {
    pub directory: PathBuf,
    pub user_id: UserId,
    pub engine: Engine<Database>,
}

impl Collection {
    /// Open the collection in `directory` (the current directory if `None`).
    /// `user_id` overrides the configured user.
    pub fn new(directory: Option<String>, user_id: Option<UserId>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config = Config::load(&directory)?;
        let catalog = load_catalog(&directory, &config)?;
        log::debug!("Loaded {} words.", catalog.len());
        let db = Database::open(&directory.join(DB_FILE))?;
        let engine = Engine::new(db, catalog, config.policy, TinyRng::from_time())?;
        Ok(Self {
            directory,
            user_id: user_id.unwrap_or(config.user_id),
            engine,
        })
    }
}

fn load_catalog(directory: &Path, config: &Config) -> Fallible<Catalog> {
    let path = match &config.catalog {
        Some(path) => Some(path.clone()),
        None => {
            let local = directory.join(CATALOG_FILE);
            local.exists().then_some(local)
        }
    };
    match path {
        Some(path) => {
            log::debug!("Reading word list from {}", path.display());
            if !path.exists() {
                return fail(format!("word list {} does not exist.", path.display()));
            }
            Catalog::from_json(&read_to_string(&path)?)
        }
        None => Catalog::from_json(BUNDLED_CATALOG),
    }
}
