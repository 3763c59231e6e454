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
use std::fmt::Write;

use clap::ValueEnum;

use vocadrill_core::error::Fallible;
use vocadrill_core::types::timestamp::Timestamp;
use vocadrill_core::types::word::UserId;

use crate::collection::Collection;
use crate::utils::percent;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum StatsFormat {
    /// Machine-readable JSON.
    Json,
    /// A plain text table.
    Text,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Json => write!(f, "json"),
            StatsFormat::Text => write!(f, "text"),
        }
    }
}

pub fn print_stats(
    directory: Option<String>,
    user_id: Option<UserId>,
    format: StatsFormat,
) -> Fallible<()> {
    let coll = Collection::new(directory, user_id)?;
    println!("{}", render_stats(&coll, format, Timestamp::now())?);
    Ok(())
}

pub fn print_progress(
    directory: Option<String>,
    user_id: Option<UserId>,
    format: StatsFormat,
) -> Fallible<()> {
    let coll = Collection::new(directory, user_id)?;
    println!("{}", render_progress(&coll, format, Timestamp::now())?);
    Ok(())
}

pub fn print_due(directory: Option<String>, user_id: Option<UserId>) -> Fallible<()> {
    let coll = Collection::new(directory, user_id)?;
    println!("{}", render_due(&coll, Timestamp::now())?);
    Ok(())
}

/// Every learning record of the collection's user.
fn render_stats(coll: &Collection, format: StatsFormat, now: Timestamp) -> Fallible<String> {
    let records = coll.engine.get_all_records(coll.user_id)?;
    match format {
        StatsFormat::Json => Ok(serde_json::to_string_pretty(&records)?),
        StatsFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{:<16} {:>5} {:>7} {:>5} {:>4} {:>8}  {:<9} {:<4} last studied",
                "word", "seen", "correct", "wrong", "skip", "accuracy", "status", "fav"
            );
            for record in &records {
                let word = match coll.engine.catalog().get(record.word_id) {
                    Some(word) => word.word_original.as_str(),
                    None => "?",
                };
                let status = record.last_attempt_status.map(|s| s.as_str()).unwrap_or("-");
                let _ = writeln!(
                    out,
                    "{:<16} {:>5} {:>7} {:>5} {:>4} {:>8}  {:<9} {:<4} {}",
                    word,
                    record.study_count,
                    record.correct_count,
                    record.wrong_count,
                    record.skip_count,
                    percent(record.accuracy()),
                    status,
                    if record.favorite { "*" } else { "" },
                    now.elapsed_label(record.last_study_date),
                );
            }
            let _ = write!(out, "{} records.", records.len());
            Ok(out)
        }
    }
}

fn render_progress(coll: &Collection, format: StatsFormat, now: Timestamp) -> Fallible<String> {
    let progress = coll.engine.progress(coll.user_id, now)?;
    match format {
        StatsFormat::Json => Ok(serde_json::to_string_pretty(&progress)?),
        StatsFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(out, "Words:     {}", progress.total_words);
            let _ = writeln!(out, "Studied:   {}", progress.studied_words);
            let _ = writeln!(out, "New:       {}", progress.new_words);
            let _ = writeln!(out, "Due:       {}", progress.due_words);
            let _ = writeln!(out, "Favorites: {}", progress.favorite_words);
            let _ = writeln!(
                out,
                "Attempts:  {} ({} correct, {} wrong, {} skipped)",
                progress.attempts, progress.correct, progress.wrong, progress.skipped
            );
            let _ = write!(out, "Accuracy:  {}", percent(progress.accuracy));
            Ok(out)
        }
    }
}

/// The review queue, most urgent first.
fn render_due(coll: &Collection, now: Timestamp) -> Fallible<String> {
    let queue = coll.engine.review_queue(coll.user_id, now)?;
    if queue.is_empty() {
        return Ok("Nothing is due for review.".to_string());
    }
    let mut out = String::new();
    for (rank, candidate) in queue.iter().enumerate() {
        let word = coll.engine.word(candidate.word_id)?;
        let _ = writeln!(
            out,
            "{:>3}. {:<16} score {:>6.1}  last studied {} days ago",
            rank + 1,
            word.word_original,
            candidate.score,
            candidate.days_since
        );
    }
    let _ = write!(out, "{} words due.", queue.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use vocadrill_core::types::outcome::Outcome;
    use vocadrill_core::types::record::AttemptOverrides;

    use super::*;
    use crate::helper::create_tmp_collection;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn studied_collection() -> Fallible<Collection> {
        let coll = Collection::new(Some(create_tmp_collection()?), None)?;
        let then = ts("2024-01-01T09:00:00.000");
        coll.engine
            .apply_attempt(1, 1, Outcome::Incorrect, AttemptOverrides::none(), then)?;
        coll.engine
            .apply_attempt(1, 2, Outcome::Correct, AttemptOverrides::favorite(true), then)?;
        Ok(coll)
    }

    #[test]
    fn test_stats_json() -> Fallible<()> {
        let coll = studied_collection()?;
        let json = render_stats(&coll, StatsFormat::Json, ts("2024-01-02T09:00:00.000"))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["word_id"], 1);
        assert_eq!(records[0]["last_attempt_status"], "incorrect");
        assert_eq!(records[1]["favorite"], true);
        assert_eq!(records[1]["last_study_date"], "2024-01-01T09:00:00.000");
        Ok(())
    }

    #[test]
    fn test_stats_text() -> Fallible<()> {
        let coll = studied_collection()?;
        let text = render_stats(&coll, StatsFormat::Text, ts("2024-01-03T09:00:00.000"))?;
        assert!(text.contains("apple"));
        assert!(text.contains("pear"));
        assert!(text.contains("2 days ago"));
        assert!(text.ends_with("2 records."));
        Ok(())
    }

    #[test]
    fn test_progress() -> Fallible<()> {
        let coll = studied_collection()?;
        let now = ts("2024-01-10T09:00:00.000");
        let json = render_progress(&coll, StatsFormat::Json, now)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["total_words"], 2);
        assert_eq!(value["studied_words"], 2);
        assert_eq!(value["due_words"], 2);
        assert_eq!(value["accuracy"], 0.5);
        let text = render_progress(&coll, StatsFormat::Text, now)?;
        assert!(text.contains("Accuracy:  50%"));
        Ok(())
    }

    #[test]
    fn test_due() -> Fallible<()> {
        let coll = studied_collection()?;
        let text = render_due(&coll, ts("2024-01-02T09:00:00.000"))?;
        assert_eq!(text, "Nothing is due for review.");
        let text = render_due(&coll, ts("2024-01-10T09:00:00.000"))?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        // 18.5 for the wrong answer against 11.5 for the favorite.
        assert!(lines[0].contains("apple"));
        assert!(lines[1].contains("pear"));
        assert_eq!(lines[2], "2 words due.");
        Ok(())
    }
}
