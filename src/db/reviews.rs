//! Review logging

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::ReviewLog;

use super::{format_timestamp, parse_timestamp};

pub fn insert_review_log(conn: &Connection, log: &ReviewLog) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO review_logs (card_id, correct, difficulty_before, difficulty_override,
                             streak_before, interval_days, reviewed_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
        params![
            log.card_id,
            log.correct,
            log.difficulty_before,
            log.difficulty_override,
            log.streak_before,
            log.interval_days,
            format_timestamp(log.reviewed_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Review history for one card, oldest first
pub fn get_review_logs_for_card(conn: &Connection, card_id: i64) -> Result<Vec<ReviewLog>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, card_id, correct, difficulty_before, difficulty_override, streak_before,
           interval_days, reviewed_at
    FROM review_logs
    WHERE card_id = ?1
    ORDER BY reviewed_at ASC, id ASC
    "#,
    )?;

    let logs = stmt
        .query_map(params![card_id], |row| {
            let reviewed_at: String = row.get(7)?;
            Ok(ReviewLog {
                id: row.get(0)?,
                card_id: row.get(1)?,
                correct: row.get(2)?,
                difficulty_before: row.get(3)?,
                difficulty_override: row.get(4)?,
                streak_before: row.get(5)?,
                interval_days: row.get(6)?,
                reviewed_at: parse_timestamp(7, &reviewed_at)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(logs)
}

/// Number of reviews recorded at or after `since`
pub fn count_reviews_since(conn: &Connection, since: DateTime<Utc>) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM review_logs WHERE reviewed_at >= ?1",
        params![format_timestamp(since)],
        |row| row.get(0),
    )
}

/// (total reviews, correct reviews) across all cards
pub fn get_review_totals(conn: &Connection) -> Result<(i64, i64)> {
    conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(correct), 0) FROM review_logs",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
}
