pub mod flashcard;
pub mod review;

pub use flashcard::{normalize_tags, Flashcard, MAX_TAGS};
pub use review::{ReviewCommit, ReviewLog};
