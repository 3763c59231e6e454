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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use portpicker::pick_unused_port;
    use rusqlite::Connection;
    use reqwest::StatusCode;
    use tokio::spawn;
    use vocadrill_core::error::Fallible;
    use vocadrill_core::store::StatsStore;
    use vocadrill_core::types::outcome::Outcome;
    use vocadrill_core::types::record::AttemptOverrides;
    use vocadrill_core::types::timestamp::Timestamp;

    use crate::cmd::drill::server::ServerConfig;
    use crate::cmd::drill::server::start_server;
    use crate::collection::Collection;
    use crate::collection::DB_FILE;
    use crate::db::Database;
    use crate::helper::create_tmp_collection;
    use crate::helper::http_error;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    fn config(directory: String, port: u16) -> ServerConfig {
        ServerConfig {
            directory: Some(directory),
            user_id: None,
            host: TEST_HOST.to_string(),
            port,
        }
    }

    async fn post(port: u16, form: &[(&str, &str)]) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(form)
            .send()
            .await
            .map_err(http_error)?;
        assert!(response.status().is_success());
        response.text().await.map_err(http_error)
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let result = start_server(config("./derpherp".to_string(), port)).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_start_server_with_nothing_to_study() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        let coll = Collection::new(Some(directory.clone()), None)?;
        for word_id in [1, 2] {
            coll.engine.apply_attempt(
                1,
                word_id,
                Outcome::Correct,
                AttemptOverrides::none(),
                Timestamp::now(),
            )?;
        }
        drop(coll);
        start_server(config(directory, port)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        let db_path = PathBuf::from(&directory).join(DB_FILE);
        spawn(async move { start_server(config(directory, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/style.css"))
            .await
            .map_err(http_error)?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/herp-derp"))
            .await
            .map_err(http_error)?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint. The first word of the list is new.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/"))
            .await
            .map_err(http_error)?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.map_err(http_error)?;
        assert!(html.contains("사과"));
        assert!(html.contains("She ate an <span class=\"blank\">"));
        assert!(!html.contains("apple"));

        // 'Next' does nothing before the word is answered.
        let html = post(port, &[("action", "Next")]).await?;
        assert!(html.contains("사과"));

        // Answer, ignoring case and surrounding whitespace.
        let html = post(port, &[("action", "Submit"), ("answer", " Apple ")]).await?;
        assert!(html.contains("Correct"));
        assert!(html.contains("<span class=\"answer\">apple</span>"));
        assert!(html.contains("☆ Favorite"));

        // A second submit is not counted.
        post(port, &[("action", "Submit"), ("answer", "apple")]).await?;

        // Hit 'Favorite'.
        let html = post(port, &[("action", "Favorite")]).await?;
        assert!(html.contains("★ Favorite"));

        // Hit 'Next'. The first word is not due, so the second one is shown.
        let html = post(port, &[("action", "Next")]).await?;
        assert!(html.contains("This <span class=\"blank\">"));
        assert!(html.contains("이 배는 아주 달다."));

        // Hit 'Skip'.
        let html = post(port, &[("action", "Skip")]).await?;
        assert!(html.contains("Skipped"));

        // Hit 'Next'. Nothing is left.
        let html = post(port, &[("action", "Next")]).await?;
        assert!(html.contains("Session Completed"));
        assert!(html.contains("Answered 2 words: 1 correct, 0 wrong, 1 skipped."));

        let db = Database::open(&db_path)?;
        let apple = db.get(1, 1)?.unwrap();
        assert_eq!(apple.study_count, 1);
        assert_eq!(apple.correct_count, 1);
        assert!(apple.favorite);
        let pear = db.get(1, 2)?.unwrap();
        assert_eq!(pear.skip_count, 1);
        assert_eq!(pear.last_attempt_status, Some(Outcome::Skipped));
        assert!(!pear.favorite);

        Ok(())
    }

    async fn post_raw(port: u16, form: &[(&str, &str)]) -> Fallible<(StatusCode, String)> {
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(form)
            .send()
            .await
            .map_err(http_error)?;
        let status = response.status();
        Ok((status, response.text().await.map_err(http_error)?))
    }

    #[tokio::test]
    async fn test_next_keeps_feedback_when_storage_fails() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        let db_path = PathBuf::from(&directory).join(DB_FILE);
        spawn(async move { start_server(config(directory, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        let html = post(port, &[("action", "Submit"), ("answer", "apple")]).await?;
        assert!(html.contains("Correct"));

        // A row that cannot be read makes the next selection fail.
        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "INSERT INTO learning_records VALUES (1, 2, 1, 0, 0, 1, 1, '2024-01-01T00:00:00.000', 'maybe', 0, NULL)",
            [],
        )
        .unwrap();
        let (status, _) = post_raw(port, &[("action", "Next")]).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        // The answered word is still shown with its feedback.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/"))
            .await
            .map_err(http_error)?;
        let html = response.text().await.map_err(http_error)?;
        assert!(html.contains("Correct"));
        assert!(html.contains("<span class=\"answer\">apple</span>"));

        // Answering again is ignored.
        post(port, &[("action", "Submit"), ("answer", "apple")]).await?;

        conn.execute("DELETE FROM learning_records WHERE word_id = 2", [])
            .unwrap();
        let html = post(port, &[("action", "Next")]).await?;
        assert!(html.contains("이 배는 아주 달다."));

        let db = Database::open(&db_path)?;
        assert_eq!(db.get(1, 1)?.unwrap().study_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_form() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        spawn(async move { start_server(config(directory, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        let (status, html) = post_raw(port, &[("answer", "apple")]).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(html.contains("Something went wrong"));

        let (status, html) = post_raw(port, &[("action", "Reveal")]).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(html.contains("invalid form"));

        // Nothing was recorded and the question is still shown.
        let html = post(port, &[("action", "Skip")]).await?;
        assert!(html.contains("Seen 1 times"));
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_answer() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        spawn(async move { start_server(config(directory, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        let html = post(port, &[("action", "Submit"), ("answer", "banana")]).await?;
        assert!(html.contains("Incorrect. The answer is apple."));
        assert!(html.contains("You typed: banana"));
        assert!(html.contains("0 correct, 1 wrong, 0 skipped."));

        Ok(())
    }

    #[tokio::test]
    async fn test_favorite_before_answer() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        spawn(async move { start_server(config(directory, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        // Nothing to mark yet.
        let html = post(port, &[("action", "Favorite")]).await?;
        assert!(html.contains("사과"));
        assert!(!html.contains("Favorite"));

        Ok(())
    }

    #[tokio::test]
    async fn test_end() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        spawn(async move { start_server(config(directory, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        // Hit end.
        let html = post(port, &[("action", "End")]).await?;
        assert!(html.contains("Session Completed"));
        assert!(html.contains("Answered 0 words"));

        // The session stays over.
        let html = post(port, &[("action", "Submit"), ("answer", "apple")]).await?;
        assert!(html.contains("Session Completed"));

        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection()?;
        let handle = spawn(async move { start_server(config(directory, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        post(port, &[("action", "End")]).await?;
        post(port, &[("action", "Shutdown")]).await?;
        handle.await.unwrap()?;

        Ok(())
    }
}
