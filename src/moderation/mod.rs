// Moderation triage — turns a safety score into a disposition and the
// record a caller stores alongside the submission.

pub mod decider;
pub mod record;

pub use decider::{decide, decide_default, ModerationStatus, ModerationThresholds};
pub use record::ModerationRecord;
