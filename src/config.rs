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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use vocadrill_core::error::ErrorReport;
use vocadrill_core::error::Fallible;
use vocadrill_core::select::DEFAULT_NEW_WORD_WEIGHT;
use vocadrill_core::select::SelectionPolicy;
use vocadrill_core::types::interval::ReviewInterval;
use vocadrill_core::types::word::UserId;

pub const CONFIG_FILE: &str = "vocadrill.toml";

pub const DEFAULT_USER_ID: UserId = 1;

/// The optional `vocadrill.toml` at the root of a collection.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    user_id: Option<UserId>,
    new_word_weight: Option<f64>,
    default_review_interval: Option<ReviewInterval>,
    /// Path to a JSON word list, relative to the collection directory.
    catalog: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct Config {
    pub user_id: UserId,
    pub policy: SelectionPolicy,
    pub catalog: Option<PathBuf>,
}

impl Config {
    /// Read the configuration of the collection in `directory`. A missing
    /// file yields the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        let file: ConfigFile = if path.exists() {
            log::debug!("Reading configuration from {}", path.display());
            let text = read_to_string(&path)?;
            toml::from_str(&text).map_err(|e| {
                ErrorReport::config(format!("failed to parse {}: {e}", path.display()))
            })?
        } else {
            ConfigFile::default()
        };
        Ok(Config {
            user_id: file.user_id.unwrap_or(DEFAULT_USER_ID),
            policy: SelectionPolicy {
                new_word_weight: file.new_word_weight.unwrap_or(DEFAULT_NEW_WORD_WEIGHT),
                default_interval: file.default_review_interval.unwrap_or_default(),
            },
            catalog: file.catalog.map(|c| directory.join(c)),
        })
    }
}
