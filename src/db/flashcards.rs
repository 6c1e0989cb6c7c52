//! Flashcard CRUD and query operations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::domain::{Flashcard, ReviewCommit};

use super::{format_timestamp, parse_timestamp};

const FLASHCARD_COLUMNS: &str =
    "id, file_id, front, back, difficulty, next_review, review_count, correct_streak, tags, created_at";

fn row_to_flashcard(row: &Row) -> Result<Flashcard> {
    let next_review: String = row.get(5)?;
    let tags: String = row.get(8)?;
    let created_at: String = row.get(9)?;

    Ok(Flashcard {
        id: row.get(0)?,
        file_id: row.get(1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        difficulty: row.get(4)?,
        next_review: parse_timestamp(5, &next_review)?,
        review_count: row.get(6)?,
        correct_streak: row.get(7)?,
        tags: serde_json::from_str(&tags).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
        })?,
        created_at: parse_timestamp(9, &created_at)?,
    })
}

pub fn insert_flashcard(conn: &Connection, card: &Flashcard) -> Result<i64> {
    let tags = serde_json::to_string(&card.tags)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    conn.execute(
        r#"
    INSERT INTO flashcards (file_id, front, back, difficulty, next_review, review_count,
                            correct_streak, tags, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    "#,
        params![
            card.file_id,
            card.front,
            card.back,
            card.difficulty,
            format_timestamp(card.next_review),
            card.review_count,
            card.correct_streak,
            tags,
            format_timestamp(card.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_flashcard_by_id(conn: &Connection, id: i64) -> Result<Option<Flashcard>> {
    conn.query_row(
        &format!("SELECT {} FROM flashcards WHERE id = ?1", FLASHCARD_COLUMNS),
        params![id],
        row_to_flashcard,
    )
    .optional()
}

/// All cards, newest first
pub fn list_flashcards(conn: &Connection) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM flashcards ORDER BY created_at DESC, id DESC",
        FLASHCARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map([], row_to_flashcard)?
        .collect::<Result<Vec<_>>>()?;
    Ok(cards)
}

/// Cards with `next_review <= now`, longest overdue first
pub fn get_due_flashcards(conn: &Connection, now: DateTime<Utc>, limit: usize) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(&format!(
        r#"
    SELECT {}
    FROM flashcards
    WHERE next_review <= ?1
    ORDER BY next_review ASC, id ASC
    LIMIT ?2
    "#,
        FLASHCARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map(params![format_timestamp(now), limit as i64], row_to_flashcard)?
        .collect::<Result<Vec<_>>>()?;
    Ok(cards)
}

pub fn get_due_count(conn: &Connection, now: DateTime<Utc>) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM flashcards WHERE next_review <= ?1",
        params![format_timestamp(now)],
        |row| row.get(0),
    )
}

pub fn get_total_cards(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))
}

/// Write back the outcome of a review. Returns the number of rows touched.
pub fn update_flashcard_after_review(conn: &Connection, id: i64, commit: &ReviewCommit) -> Result<usize> {
    conn.execute(
        r#"
    UPDATE flashcards
    SET next_review = ?1,
        review_count = ?2,
        correct_streak = ?3,
        difficulty = ?4
    WHERE id = ?5
    "#,
        params![
            format_timestamp(commit.next_review),
            commit.review_count,
            commit.correct_streak,
            commit.difficulty,
            id,
        ],
    )
}

/// Delete a card and its review history. Returns false if the card did not exist.
/// Review logs go with the card through `ON DELETE CASCADE`.
pub fn delete_flashcard(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewLog;
    use crate::srs::Difficulty;
    use crate::testing::TestEnv;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let env = TestEnv::new().unwrap();
        let card = Flashcard::new(
            "Define entropy".into(),
            "Measure of disorder".into(),
            Some(3),
            &["Thermo Dynamics".to_string()],
            Difficulty::MEDIUM,
            now(),
        );
        let id = insert_flashcard(&env.conn, &card).unwrap();

        let loaded = get_flashcard_by_id(&env.conn, id).unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.front, "Define entropy");
        assert_eq!(loaded.file_id, Some(3));
        assert_eq!(loaded.tags, vec!["thermo_dynamics".to_string()]);
        assert_eq!(loaded.next_review, now());
        assert_eq!(loaded.created_at, now());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let env = TestEnv::new().unwrap();
        assert!(get_flashcard_by_id(&env.conn, 999).unwrap().is_none());
    }

    #[test]
    fn test_due_cards_ordered_and_filtered() {
        let env = TestEnv::new().unwrap();
        let later = env.insert_card("later", 3, 0, now() + Duration::days(2));
        let old = env.insert_card("old", 3, 0, now() - Duration::days(3));
        let recent = env.insert_card("recent", 3, 0, now() - Duration::hours(1));
        let exact = env.insert_card("exact", 3, 0, now());

        let due = get_due_flashcards(&env.conn, now(), 50).unwrap();
        let ids: Vec<i64> = due.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![old, recent, exact]);
        assert!(!ids.contains(&later));

        assert_eq!(get_due_count(&env.conn, now()).unwrap(), 3);
        assert_eq!(get_total_cards(&env.conn).unwrap(), 4);
    }

    #[test]
    fn test_due_cards_limit() {
        let env = TestEnv::new().unwrap();
        for i in 0..5 {
            env.insert_card(&format!("card {}", i), 3, 0, now() - Duration::days(i));
        }
        assert_eq!(get_due_flashcards(&env.conn, now(), 2).unwrap().len(), 2);
    }

    #[test]
    fn test_list_newest_first() {
        let env = TestEnv::new().unwrap();
        let first = env.insert_card("first", 3, 0, now());
        let second = env.insert_card("second", 3, 0, now());
        let ids: Vec<i64> = list_flashcards(&env.conn).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_update_after_review() {
        let env = TestEnv::new().unwrap();
        let id = env.insert_card("q", 3, 1, now());
        let commit = ReviewCommit {
            next_review: now() + Duration::days(6),
            interval_days: 6,
            review_count: 2,
            correct_streak: 2,
            difficulty: 4,
        };

        assert_eq!(update_flashcard_after_review(&env.conn, id, &commit).unwrap(), 1);
        let card = get_flashcard_by_id(&env.conn, id).unwrap().unwrap();
        assert_eq!(card.next_review, now() + Duration::days(6));
        assert_eq!(card.review_count, 2);
        assert_eq!(card.correct_streak, 2);
        assert_eq!(card.difficulty, 4);

        assert_eq!(update_flashcard_after_review(&env.conn, id + 100, &commit).unwrap(), 0);
    }

    #[test]
    fn test_delete() {
        let env = TestEnv::new().unwrap();
        let id = env.insert_card("q", 3, 0, now());
        assert!(delete_flashcard(&env.conn, id).unwrap());
        assert!(!delete_flashcard(&env.conn, id).unwrap());
        assert!(get_flashcard_by_id(&env.conn, id).unwrap().is_none());
    }

    #[test]
    fn test_delete_cascades_to_review_logs() {
        let env = TestEnv::new().unwrap();
        let id = env.insert_card("q", 3, 0, now());
        let card = get_flashcard_by_id(&env.conn, id).unwrap().unwrap();
        crate::db::insert_review_log(&env.conn, &ReviewLog::new(&card, true, None, 1, now())).unwrap();
        assert_eq!(crate::db::get_review_logs_for_card(&env.conn, id).unwrap().len(), 1);

        assert!(delete_flashcard(&env.conn, id).unwrap());
        assert!(crate::db::get_review_logs_for_card(&env.conn, id).unwrap().is_empty());
    }
}
