//! Test utilities for database setup.
//!
//! Provides helpers that reuse authoritative schema initialization,
//! eliminating schema duplication in test code.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::db::format_timestamp;

/// Test environment with a migrated study database in a temporary directory.
///
/// The directory (and database file) is removed when the environment is dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Connection with the full schema (all migrations)
    pub conn: Connection,
    pub db_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let db_path = temp.path().join("study.db");
        let conn = Connection::open(&db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        crate::db::schema::run_migrations(&conn)?;

        Ok(Self {
            temp,
            conn,
            db_path,
        })
    }

    /// Insert a card with raw scheduling state, bypassing domain validation.
    ///
    /// Panics on failure; only meant for test setup.
    pub fn insert_card(
        &self,
        front: &str,
        difficulty: i64,
        correct_streak: i64,
        next_review: DateTime<Utc>,
    ) -> i64 {
        self.conn
            .execute(
                r#"
            INSERT INTO flashcards (front, back, difficulty, next_review, review_count,
                                    correct_streak, tags, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, '[]', ?7)
            "#,
                params![
                    front,
                    format!("answer for {}", front),
                    difficulty,
                    format_timestamp(next_review),
                    correct_streak,
                    correct_streak,
                    format_timestamp(next_review),
                ],
            )
            .expect("insert test card");
        self.conn.last_insert_rowid()
    }
}
