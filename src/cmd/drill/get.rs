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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use vocadrill_core::error::ErrorReport;
use vocadrill_core::error::Fallible;
use vocadrill_core::select::Selection;
use vocadrill_core::select::Source;
use vocadrill_core::types::outcome::Outcome;
use vocadrill_core::types::timestamp::Timestamp;

use crate::cmd::drill::state::Feedback;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    render(&state)
}

/// Render the page for the current session state.
pub fn render(state: &ServerState) -> (StatusCode, Html<String>) {
    match render_page(state) {
        Ok(markup) => (StatusCode::OK, Html(markup.into_string())),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

pub fn error_page(status: StatusCode, e: &ErrorReport) -> (StatusCode, Html<String>) {
    log::error!("{e}");
    let body = html! {
        div.card {
            h1 { "Something went wrong" }
            p.error { (e.message()) }
        }
    };
    (status, Html(page_template(body).into_string()))
}

fn render_page(state: &ServerState) -> Fallible<Markup> {
    let mutable = state.lock()?;
    let body = match (&mutable.finished_at, &mutable.current) {
        (None, Some(selection)) => match &mutable.feedback {
            None => question_view(selection),
            Some(feedback) => feedback_view(selection, feedback),
        },
        _ => completed_view(state.session_started_at, &mutable),
    };
    Ok(page_template(body))
}

fn question_view(selection: &Selection) -> Markup {
    let word = &selection.word;
    let label = match selection.source {
        Source::New => "New word",
        Source::Review => "Review",
    };
    html! {
        div.card {
            div.source { (label) }
            div.meaning { (word.word_korean) }
            p.sentence {
                @match word.blank() {
                    Some(blank) => {
                        (blank.prefix) span.blank { "_____" } (blank.suffix)
                    }
                    None => { (word.example_sentence) }
                }
            }
            p.translation { (word.example_sentence_korean) }
            form action="/" method="post" {
                input type="text" name="answer" autocomplete="off" autofocus;
                div.controls {
                    input type="submit" name="action" value="Submit";
                    input type="submit" name="action" value="Skip";
                }
            }
        }
        (end_button())
    }
}

fn feedback_view(selection: &Selection, feedback: &Feedback) -> Markup {
    let word = &selection.word;
    let record = &feedback.record;
    let (class, verdict) = match feedback.outcome {
        Outcome::Correct => ("verdict correct", "Correct".to_string()),
        Outcome::Incorrect => (
            "verdict incorrect",
            format!("Incorrect. The answer is {}.", word.word_original),
        ),
        Outcome::Skipped => ("verdict skipped", "Skipped".to_string()),
    };
    let star = if record.favorite { "★" } else { "☆" };
    html! {
        div.card {
            div class=(class) { (verdict) }
            @if feedback.outcome == Outcome::Incorrect {
                p.typed { "You typed: " (feedback.typed) }
            }
            div.meaning { (word.word_korean) }
            p.sentence {
                @match word.blank() {
                    Some(blank) => {
                        (blank.prefix) span.answer { (blank.answer) } (blank.suffix)
                    }
                    None => { (word.example_sentence) }
                }
            }
            p.translation { (word.example_sentence_korean) }
            p.record {
                "Seen " (record.study_count) " times: "
                (record.correct_count) " correct, "
                (record.wrong_count) " wrong, "
                (record.skip_count) " skipped."
            }
            form action="/" method="post" {
                div.controls {
                    button type="submit" name="action" value="Favorite" { (star) " Favorite" }
                    button type="submit" name="action" value="Next" autofocus { "Next" }
                }
            }
        }
        (end_button())
    }
}

fn completed_view(started_at: Timestamp, mutable: &MutableState) -> Markup {
    html! {
        div.card {
            h1 { "Session Completed" }
            p {
                "Answered " (mutable.attempts.len()) " words: "
                (mutable.count(Outcome::Correct)) " correct, "
                (mutable.count(Outcome::Incorrect)) " wrong, "
                (mutable.count(Outcome::Skipped)) " skipped."
            }
            @if let Some(finished_at) = mutable.finished_at {
                p.duration { "Started " (finished_at.elapsed_label(started_at)) "." }
            }
            form action="/" method="post" {
                input type="submit" name="action" value="Shutdown";
            }
        }
    }
}

fn end_button() -> Markup {
    html! {
        form.end action="/" method="post" {
            input type="submit" name="action" value="End";
        }
    }
}
