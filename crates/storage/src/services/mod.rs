pub mod assignment;
pub mod completion;
pub mod evaluation;
pub mod leaderboard;
pub mod submission;

/// Evaluations required before a team counts as complete. Also the number of
/// evaluators bound to every team; the fan-out is fixed, not configurable.
pub const REQUIRED_EVALUATIONS: i32 = 3;
