// TribalPulse: content safety scoring and moderation triage.
//
// This is the library root. Each module corresponds to one subsystem of the
// submission review path.

pub mod config;
pub mod jobs;
pub mod moderation;
pub mod output;
pub mod safety;
