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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// How long a studied word rests before it is due for review again, in
/// whole days.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReviewInterval {
    days: u32,
}

impl ReviewInterval {
    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    pub const fn weeks(weeks: u32) -> Self {
        Self { days: weeks * 7 }
    }

    pub fn as_days(self) -> i64 {
        self.days as i64
    }
}

impl Default for ReviewInterval {
    fn default() -> Self {
        ReviewInterval::weeks(1)
    }
}

impl Display for ReviewInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.days == 1 {
            write!(f, "1 day")
        } else {
            write!(f, "{} days", self.days)
        }
    }
}

impl FromStr for ReviewInterval {
    type Err = ErrorReport;

    /// Accepts `7`, `7d`, `7 days`, `1 day`, `2w`, `2 weeks`, `1 week`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ErrorReport::new(format!("invalid review interval: '{s}'"));
        let text = s.trim().to_lowercase();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);
        let amount: u32 = number.parse().map_err(|_| invalid())?;
        match unit.trim() {
            "" | "d" | "day" | "days" => Ok(ReviewInterval::days(amount)),
            "w" | "week" | "weeks" => amount
                .checked_mul(7)
                .map(ReviewInterval::days)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for ReviewInterval {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReviewInterval> for String {
    fn from(interval: ReviewInterval) -> String {
        interval.to_string()
    }
}
