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

use chrono::NaiveDateTime;
#[cfg(feature = "clock")]
use chrono::SubsecRound;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A timestamp without a timezone and millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    /// Whole days elapsed since `earlier`, rounded down. Negative if
    /// `earlier` lies in the future.
    pub fn days_since(self, earlier: Timestamp) -> i64 {
        let millis = (self.0 - earlier.0).num_milliseconds();
        millis.div_euclid(MILLIS_PER_DAY)
    }

    /// A short human label for how long ago `earlier` was, e.g. "3 days ago".
    pub fn elapsed_label(self, earlier: Timestamp) -> String {
        let seconds = (self.0 - earlier.0).num_seconds();
        if seconds < 0 {
            return "just now".to_string();
        }
        let (amount, unit) = if seconds < 60 {
            (seconds, "second")
        } else if seconds < 3600 {
            (seconds / 60, "minute")
        } else if seconds < 86400 {
            (seconds / 3600, "hour")
        } else if seconds < 604800 {
            (seconds / 86400, "day")
        } else {
            (seconds / 604800, "week")
        };
        if amount == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{amount} {unit}s ago")
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let ndt = NaiveDateTime::parse_from_str(&value, FORMAT)
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{value}'.")))?;
        Ok(Timestamp(ndt))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(test)]
pub(crate) fn ts(s: &str) -> Timestamp {
    Timestamp::try_from(s.to_string()).unwrap()
}
