//! Periodic due-card reminders.
//!
//! Delivery channels (email, push) live outside this service; a reminder is
//! currently an `info` log line that an operator or log shipper can act on.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::db::{self, DbPool, LogOnError};

/// Count due cards and emit a reminder if there are any.
///
/// Returns the due count when a reminder was emitted.
pub fn check_due_reminder(conn: &Connection, now: DateTime<Utc>) -> rusqlite::Result<Option<i64>> {
  let due = db::get_due_count(conn, now)?;
  if due == 0 {
    return Ok(None);
  }
  tracing::info!(due, "{} flashcard{} due for review", due, if due == 1 { "" } else { "s" });
  Ok(Some(due))
}

/// Run `check_due_reminder` every `period` until the runtime shuts down.
pub fn spawn_reminder_task(pool: DbPool, period: Duration) -> JoinHandle<()> {
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
      ticker.tick().await;
      let Some(conn) = db::try_lock(&pool).log_warn("Reminder check skipped") else {
        continue;
      };
      check_due_reminder(&conn, Utc::now()).log_warn("Reminder check failed");
    }
  })
}
