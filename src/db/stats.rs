//! Review statistics for the dashboard

use chrono::{DateTime, NaiveTime, Utc};
use rusqlite::{Connection, Result};
use serde::Serialize;

use super::flashcards::{get_due_count, get_total_cards};
use super::reviews::{count_reviews_since, get_review_totals};

/// Streak buckets in display order: (label, lowest streak in bucket)
pub const STREAK_BUCKETS: [(&str, i64); 5] = [("0", 0), ("1-3", 1), ("4-7", 4), ("8-15", 8), ("16+", 16)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakBucket {
    pub label: &'static str,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewStatistics {
    pub total_cards: i64,
    pub due_for_review: i64,
    pub reviewed_today: i64,
    /// Percentage of correct reviews, rounded
    pub average_accuracy: i64,
    pub streak_distribution: Vec<StreakBucket>,
}

/// Bucket label for a streak value
pub fn streak_bucket(streak: i64) -> &'static str {
    STREAK_BUCKETS
        .iter()
        .rev()
        .find(|(_, floor)| streak >= *floor)
        .map(|(label, _)| *label)
        .unwrap_or(STREAK_BUCKETS[0].0)
}

pub fn get_streak_distribution(conn: &Connection) -> Result<Vec<StreakBucket>> {
    let mut buckets: Vec<StreakBucket> = STREAK_BUCKETS
        .iter()
        .map(|(label, _)| StreakBucket { label: *label, count: 0 })
        .collect();

    let mut stmt = conn.prepare("SELECT correct_streak, COUNT(*) FROM flashcards GROUP BY correct_streak")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;

    for row in rows {
        let (streak, count) = row?;
        let label = streak_bucket(streak);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.label == label) {
            bucket.count += count;
        }
    }

    Ok(buckets)
}

pub fn get_review_statistics(conn: &Connection, now: DateTime<Utc>) -> Result<ReviewStatistics> {
    let start_of_day = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let (total_reviews, correct_reviews) = get_review_totals(conn)?;

    let average_accuracy = if total_reviews > 0 {
        (correct_reviews as f64 / total_reviews as f64 * 100.0).round() as i64
    } else {
        0
    };

    Ok(ReviewStatistics {
        total_cards: get_total_cards(conn)?,
        due_for_review: get_due_count(conn, now)?,
        reviewed_today: count_reviews_since(conn, start_of_day)?,
        average_accuracy,
        streak_distribution: get_streak_distribution(conn)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_flashcard_by_id, insert_review_log};
    use crate::domain::ReviewLog;
    use crate::testing::TestEnv;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 9, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_streak_bucket_boundaries() {
        assert_eq!(streak_bucket(0), "0");
        assert_eq!(streak_bucket(1), "1-3");
        assert_eq!(streak_bucket(3), "1-3");
        assert_eq!(streak_bucket(4), "4-7");
        assert_eq!(streak_bucket(7), "4-7");
        assert_eq!(streak_bucket(8), "8-15");
        assert_eq!(streak_bucket(15), "8-15");
        assert_eq!(streak_bucket(16), "16+");
        assert_eq!(streak_bucket(400), "16+");
        // Corrupt rows still land somewhere
        assert_eq!(streak_bucket(-1), "0");
    }

    #[test]
    fn test_empty_statistics() {
        let env = TestEnv::new().unwrap();
        let stats = get_review_statistics(&env.conn, now()).unwrap();
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.due_for_review, 0);
        assert_eq!(stats.reviewed_today, 0);
        assert_eq!(stats.average_accuracy, 0);
        assert_eq!(stats.streak_distribution.len(), 5);
        assert!(stats.streak_distribution.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_statistics() {
        let env = TestEnv::new().unwrap();
        let a = env.insert_card("a", 3, 0, now() - Duration::days(1));
        env.insert_card("b", 3, 2, now() + Duration::days(3));
        env.insert_card("c", 3, 5, now() + Duration::days(30));
        env.insert_card("d", 3, 20, now());

        let card = get_flashcard_by_id(&env.conn, a).unwrap().unwrap();
        // Yesterday evening, then twice this morning
        for (offset_hours, correct) in [(-12, true), (-2, true), (-1, false)] {
            let at = now() + Duration::hours(offset_hours);
            insert_review_log(&env.conn, &ReviewLog::new(&card, correct, None, 1, at)).unwrap();
        }

        let stats = get_review_statistics(&env.conn, now()).unwrap();
        assert_eq!(stats.total_cards, 4);
        assert_eq!(stats.due_for_review, 2);
        assert_eq!(stats.reviewed_today, 2);
        assert_eq!(stats.average_accuracy, 67);

        let counts: Vec<(&str, i64)> = stats
            .streak_distribution
            .iter()
            .map(|b| (b.label, b.count))
            .collect();
        assert_eq!(counts, vec![("0", 1), ("1-3", 1), ("4-7", 1), ("8-15", 0), ("16+", 1)]);
    }
}
