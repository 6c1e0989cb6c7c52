//! Application services.
//!
//! Collaborators around the scheduler: committing reviews to storage and
//! periodic reminders.

pub mod reminders;
pub mod review;

pub use review::{submit_review, ReviewError};
