pub mod assignments;
pub mod evaluations;
pub mod leaderboard;
pub mod submissions;
