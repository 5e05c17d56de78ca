//! Bundled learning content.
//!
//! The verb table ships inside the binary; nothing is loaded from disk.

pub mod verbs;

pub use verbs::{all_verbs, difficulty_counts, find_verb, verbs_for, DifficultyCounts};
