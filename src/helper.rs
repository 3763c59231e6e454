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

use std::fs::write;

use tempfile::tempdir;

use vocadrill_core::error::ErrorReport;
use vocadrill_core::error::Fallible;

use crate::collection::CATALOG_FILE;

const TEST_CATALOG: &str = r#"[
    {
        "id": 1,
        "word_original": "apple",
        "word_korean": "사과",
        "example_sentence": "She ate an apple after lunch.",
        "example_sentence_korean": "그녀는 점심 후에 사과를 먹었다.",
        "importance": 3
    },
    {
        "id": 2,
        "word_original": "pear",
        "word_korean": "배",
        "example_sentence": "This pear is very sweet.",
        "example_sentence_korean": "이 배는 아주 달다.",
        "importance": 1
    }
]"#;

/// Create a scratch collection holding a two-word list, and return its
/// path. The directory outlives the test.
pub fn create_tmp_collection() -> Fallible<String> {
    let dir = tempdir()?.keep();
    write(dir.join(CATALOG_FILE), TEST_CATALOG)?;
    Ok(dir.canonicalize()?.display().to_string())
}

pub fn http_error(e: reqwest::Error) -> ErrorReport {
    ErrorReport::new(format!("request failed: {e}"))
}
