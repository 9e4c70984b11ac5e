// Job posting trust heuristics for the jobs board.

pub mod trust;

pub use trust::{trust_score, JobPosting, TrustReport, TrustSignal, TrustTier};
