pub mod assignment;
pub mod criterion;
pub mod evaluation;
pub mod result;
pub mod submission;
pub mod user;

pub use assignment::Assignment;
pub use criterion::Criterion;
pub use evaluation::{CriterionScore, CriterionScores, Evaluation};
pub use result::{LeaderboardEntry, ResultSnapshot};
pub use submission::Submission;
pub use user::User;
