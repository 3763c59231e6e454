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

use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::TransactionBehavior;
use rusqlite::params;
use rusqlite::types::Type;

use vocadrill_core::error::ErrorReport;
use vocadrill_core::error::Fallible;
use vocadrill_core::store::StatsStore;
use vocadrill_core::types::interval::ReviewInterval;
use vocadrill_core::types::outcome::Outcome;
use vocadrill_core::types::record::LearningRecord;
use vocadrill_core::types::timestamp::Timestamp;
use vocadrill_core::types::word::UserId;
use vocadrill_core::types::word::WordId;

/// Created if missing. Existing data is never dropped.
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS learning_records (
        user_id INTEGER NOT NULL,
        word_id INTEGER NOT NULL,
        study_count INTEGER NOT NULL,
        correct_count INTEGER NOT NULL,
        wrong_count INTEGER NOT NULL,
        skip_count INTEGER NOT NULL,
        exposure_count INTEGER NOT NULL,
        last_study_date TEXT NOT NULL,
        last_attempt_status TEXT,
        favorite INTEGER NOT NULL DEFAULT 0,
        review_interval TEXT,
        PRIMARY KEY (user_id, word_id)
    );
";

const COLUMNS: &str = "user_id, word_id, study_count, correct_count, wrong_count, skip_count, \
     exposure_count, last_study_date, last_attempt_status, favorite, review_interval";

/// SQLite-backed record store. The connection sits behind a mutex, and
/// read-modify-write cycles run inside an immediate transaction, so writes
/// are serialized both within this process and against other processes
/// sharing the file.
pub struct Database {
    conn: Mutex<Connection>,
}

fn storage(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::storage(format!("database error: {e}"))
}

impl Database {
    pub fn open(path: &Path) -> Fallible<Self> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(storage)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(storage)?;
        Self::init(conn)
    }

    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(storage)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute_batch(SCHEMA).map_err(storage)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Fallible<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ErrorReport::storage(format!("database lock poisoned: {e}")))
    }
}

fn conversion_error(idx: usize, e: ErrorReport) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn record_from_row(row: &Row) -> rusqlite::Result<LearningRecord> {
    let last_study_date: String = row.get(7)?;
    let last_study_date = Timestamp::try_from(last_study_date).map_err(|e| conversion_error(7, e))?;
    let status: Option<String> = row.get(8)?;
    let last_attempt_status = status
        .map(Outcome::try_from)
        .transpose()
        .map_err(|e| conversion_error(8, e))?;
    let interval: Option<String> = row.get(10)?;
    let review_interval = interval
        .map(ReviewInterval::try_from)
        .transpose()
        .map_err(|e| conversion_error(10, e))?;
    Ok(LearningRecord {
        user_id: row.get(0)?,
        word_id: row.get(1)?,
        study_count: row.get(2)?,
        correct_count: row.get(3)?,
        wrong_count: row.get(4)?,
        skip_count: row.get(5)?,
        exposure_count: row.get(6)?,
        last_study_date,
        last_attempt_status,
        favorite: row.get(9)?,
        review_interval,
    })
}

fn select_one(
    conn: &Connection,
    user_id: UserId,
    word_id: WordId,
) -> rusqlite::Result<Option<LearningRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM learning_records WHERE user_id = ? AND word_id = ?");
    conn.query_row(&sql, params![user_id, word_id], record_from_row)
        .optional()
}

fn upsert_one(conn: &Connection, record: &LearningRecord) -> rusqlite::Result<()> {
    let sql = format!(
        "INSERT INTO learning_records ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT (user_id, word_id) DO UPDATE SET
             study_count = excluded.study_count,
             correct_count = excluded.correct_count,
             wrong_count = excluded.wrong_count,
             skip_count = excluded.skip_count,
             exposure_count = excluded.exposure_count,
             last_study_date = excluded.last_study_date,
             last_attempt_status = excluded.last_attempt_status,
             favorite = excluded.favorite,
             review_interval = excluded.review_interval"
    );
    conn.execute(
        &sql,
        params![
            record.user_id,
            record.word_id,
            record.study_count,
            record.correct_count,
            record.wrong_count,
            record.skip_count,
            record.exposure_count,
            record.last_study_date.to_string(),
            record.last_attempt_status.map(|s| s.as_str()),
            record.favorite,
            record.review_interval.map(|i| i.to_string()),
        ],
    )?;
    Ok(())
}

impl StatsStore for Database {
    fn get_all(&self, user_id: UserId) -> Fallible<Vec<LearningRecord>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {COLUMNS} FROM learning_records WHERE user_id = ? ORDER BY word_id");
        let mut stmt = conn.prepare(&sql).map_err(storage)?;
        let rows = stmt
            .query_map(params![user_id], record_from_row)
            .map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    fn get(&self, user_id: UserId, word_id: WordId) -> Fallible<Option<LearningRecord>> {
        let conn = self.lock()?;
        select_one(&conn, user_id, word_id).map_err(storage)
    }

    fn upsert(&self, record: &LearningRecord) -> Fallible<()> {
        let conn = self.lock()?;
        upsert_one(&conn, record).map_err(storage)
    }

    fn update<F>(&self, user_id: UserId, word_id: WordId, f: F) -> Fallible<LearningRecord>
    where
        F: FnOnce(Option<LearningRecord>) -> Fallible<LearningRecord>,
    {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(storage)?;
        let current = select_one(&tx, user_id, word_id).map_err(storage)?;
        // Dropping the transaction on error rolls it back.
        let next = f(current)?;
        upsert_one(&tx, &next).map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(next)
    }

    fn reset(&self, user_id: UserId) -> Fallible<usize> {
        let conn = self.lock()?;
        let deleted = conn
            .execute(
                "DELETE FROM learning_records WHERE user_id = ?",
                params![user_id],
            )
            .map_err(storage)?;
        log::info!("Deleted {deleted} learning records for user {user_id}.");
        Ok(deleted)
    }
}
