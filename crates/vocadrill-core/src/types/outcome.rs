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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// The result of a single study attempt.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Outcome {
    Correct,
    Incorrect,
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
            Outcome::Skipped => "skipped",
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Outcome {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "correct" => Ok(Outcome::Correct),
            "incorrect" => Ok(Outcome::Incorrect),
            "skipped" => Ok(Outcome::Skipped),
            _ => Err(ErrorReport::new(format!(
                "invalid attempt status: '{value}'"
            ))),
        }
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> String {
        outcome.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_string_roundtrip() -> Fallible<()> {
        for outcome in [Outcome::Correct, Outcome::Incorrect, Outcome::Skipped] {
            assert_eq!(outcome, Outcome::try_from(outcome.to_string())?);
        }
        Ok(())
    }

    #[test]
    fn test_serialization_format() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&Outcome::Skipped)?, "\"skipped\"");
        Ok(())
    }

    #[test]
    fn test_invalid_status() {
        for s in ["", "Correct", "wrong"] {
            assert!(Outcome::try_from(s.to_string()).is_err());
        }
    }
}
