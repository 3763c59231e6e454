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

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

use vocadrill_core::answer::check_answer;
use vocadrill_core::error::ErrorReport;
use vocadrill_core::error::Fallible;
use vocadrill_core::types::outcome::Outcome;
use vocadrill_core::types::record::AttemptOverrides;
use vocadrill_core::types::timestamp::Timestamp;

use crate::cmd::drill::get::error_page;
use crate::cmd::drill::get::render;
use crate::cmd::drill::state::Feedback;
use crate::cmd::drill::state::ServerState;

#[derive(Clone, Copy, Debug, Deserialize)]
pub enum Action {
    Submit,
    Skip,
    Favorite,
    Next,
    End,
    Shutdown,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    answer: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    form: Result<Form<FormData>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let e = ErrorReport::new(format!("invalid form: {}", rejection.body_text()));
            return error_page(StatusCode::BAD_REQUEST, &e);
        }
    };
    match action_handler(&state, form.action, form.answer) {
        Ok(()) => render(&state),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

fn action_handler(state: &ServerState, action: Action, answer: Option<String>) -> Fallible<()> {
    let mut guard = state.lock()?;
    let mutable = &mut *guard;
    let now = Timestamp::now();
    match action {
        Action::Submit | Action::Skip => {
            if mutable.finished_at.is_some() || mutable.feedback.is_some() {
                log::debug!("Ignoring {action:?}: the word was already answered.");
                return Ok(());
            }
            let Some(selection) = &mutable.current else {
                return Ok(());
            };
            let typed = answer.unwrap_or_default();
            let outcome = match action {
                Action::Skip => Outcome::Skipped,
                _ => check_answer(&selection.word, &typed),
            };
            let record = mutable.engine.apply_attempt(
                state.user_id,
                selection.word.id,
                outcome,
                AttemptOverrides::none(),
                now,
            )?;
            mutable.attempts.push(outcome);
            mutable.feedback = Some(Feedback {
                typed,
                outcome,
                record,
            });
        }
        Action::Favorite => {
            let Some(feedback) = &mut mutable.feedback else {
                log::debug!("Ignoring Favorite: the word has not been answered yet.");
                return Ok(());
            };
            let favorite = !feedback.record.favorite;
            if let Some(record) =
                mutable
                    .engine
                    .set_favorite(state.user_id, feedback.record.word_id, favorite)?
            {
                feedback.record = record;
            }
        }
        Action::Next => {
            if mutable.finished_at.is_some() || mutable.feedback.is_none() {
                log::debug!("Ignoring Next: the word has not been answered yet.");
                return Ok(());
            }
            // On error the answered word and its feedback stay on screen.
            let next = mutable.engine.next_word(state.user_id, now)?;
            mutable.feedback = None;
            if next.is_none() {
                mutable.finished_at = Some(now);
            }
            mutable.current = next;
        }
        Action::End => {
            if mutable.finished_at.is_none() {
                mutable.finished_at = Some(now);
            }
        }
        Action::Shutdown => state.shutdown(),
    }
    Ok(())
}
