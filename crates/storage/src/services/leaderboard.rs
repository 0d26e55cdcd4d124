use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::decimal_to_f64;
use crate::dto::leaderboard::{LeaderboardView, PublishOutcome};
use crate::error::{Result, StorageError};
use crate::models::user::role;
use crate::models::LeaderboardEntry;
use crate::repository::assignment::{AssignmentRepository, TeamEvaluationCount};
use crate::repository::result::ResultRepository;
use crate::repository::submission::SubmissionRepository;
use crate::repository::user::UserRepository;
use crate::services::REQUIRED_EVALUATIONS;
use crate::services::completion::is_complete;

/// A team eligible for ranking: three evaluations in, average present.
#[derive(Debug, Clone)]
pub struct ScoredTeam {
    pub team_id: Uuid,
    pub team_name: String,
    pub average_score: Decimal,
    pub evaluation_count: i32,
}

/// Competition ranking: descending by average; equal averages share a rank,
/// and the next distinct average takes its 1-indexed position in the sorted
/// order (so [90, 85, 85, 70] ranks [1, 2, 2, 4]).
pub fn rank_teams(mut teams: Vec<ScoredTeam>) -> Vec<LeaderboardEntry> {
    teams.sort_by(|a, b| b.average_score.cmp(&a.average_score));

    let mut entries = Vec::with_capacity(teams.len());
    let mut current_rank = 1i64;
    let mut previous_score: Option<Decimal> = None;

    for (position, team) in teams.into_iter().enumerate() {
        if previous_score != Some(team.average_score) {
            current_rank = position as i64 + 1;
        }
        previous_score = Some(team.average_score);

        entries.push(LeaderboardEntry {
            rank: current_rank,
            team_id: team.team_id,
            team_name: team.team_name,
            // the stored average is already at 2 decimals; re-rounding here
            // is kept for bit-exact compatibility with older clients
            average_score: decimal_to_f64(team.average_score.round_dp(2)),
            evaluation_count: team.evaluation_count,
        });
    }

    entries
}

/// Builds the current leaderboard from submissions with a completed
/// average. Teams below three evaluations do not appear at all.
pub async fn generate_leaderboard(pool: &PgPool) -> Result<Vec<LeaderboardEntry>> {
    let scored = SubmissionRepository::new(pool).list_scored().await?;
    if scored.is_empty() {
        return Ok(Vec::new());
    }

    let team_ids: Vec<Uuid> = scored.iter().map(|s| s.team_id).collect();
    let names: HashMap<Uuid, String> = UserRepository::new(pool)
        .find_by_ids_with_role(&team_ids, role::TEAM)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u.name))
        .collect();

    let teams: Vec<ScoredTeam> = scored
        .into_iter()
        .filter_map(|submission| {
            submission.average_score.map(|average_score| ScoredTeam {
                team_id: submission.team_id,
                team_name: names
                    .get(&submission.team_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown Team".to_string()),
                average_score,
                evaluation_count: submission.evaluation_count,
            })
        })
        .collect();

    Ok(rank_teams(teams))
}

fn incomplete_message(incomplete: &[&TeamEvaluationCount]) -> String {
    let teams: Vec<String> = incomplete
        .iter()
        .map(|t| format!("{} ({}/{REQUIRED_EVALUATIONS})", t.team_name, t.evaluation_count))
        .collect();

    format!(
        "Cannot publish results. {} team(s) do not have {REQUIRED_EVALUATIONS} completed evaluations. Incomplete teams: {}",
        incomplete.len(),
        teams.join(", ")
    )
}

/// The one all-or-nothing gate in the system. Re-validates completion for
/// every assigned team, then replaces the singleton snapshot; a partial
/// publication is not representable.
pub async fn publish_results(pool: &PgPool, admin_id: Uuid) -> Result<PublishOutcome> {
    let counts = AssignmentRepository::new(pool).completion_counts().await?;

    if counts.is_empty() {
        return Err(StorageError::Precondition(
            "No assignments found. Cannot publish results without team assignments.".to_string(),
        ));
    }

    let incomplete: Vec<&TeamEvaluationCount> = counts
        .iter()
        .filter(|c| !is_complete(c.evaluation_count))
        .collect();

    if !incomplete.is_empty() {
        return Err(StorageError::Precondition(incomplete_message(&incomplete)));
    }

    let leaderboard = generate_leaderboard(pool).await?;
    if leaderboard.is_empty() {
        return Err(StorageError::Precondition(
            "Cannot publish results. No teams have completed evaluations.".to_string(),
        ));
    }

    let snapshot = ResultRepository::new(pool)
        .replace(admin_id, &leaderboard)
        .await?;

    let total_teams = snapshot.leaderboard.0.len() as i64;

    Ok(PublishOutcome {
        published_at: snapshot.published_at,
        leaderboard: snapshot.leaderboard.0,
        total_teams,
    })
}

/// The published snapshot, or a well-defined "not published" view.
pub async fn load_published_leaderboard(pool: &PgPool) -> Result<LeaderboardView> {
    match ResultRepository::new(pool).get().await? {
        Some(snapshot) if snapshot.published => {
            let total_teams = snapshot.leaderboard.0.len() as i64;
            Ok(LeaderboardView {
                published: true,
                published_at: snapshot.published_at,
                leaderboard: Some(snapshot.leaderboard.0),
                total_teams: Some(total_teams),
                message: None,
            })
        }
        _ => Ok(LeaderboardView::not_published()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(name: &str, average: i64) -> ScoredTeam {
        ScoredTeam {
            team_id: Uuid::new_v4(),
            team_name: name.to_string(),
            average_score: Decimal::from(average),
            evaluation_count: 3,
        }
    }

    #[test]
    fn test_ties_share_rank_and_next_rank_skips() {
        let entries = rank_teams(vec![
            scored("a", 90),
            scored("b", 85),
            scored("c", 85),
            scored("d", 70),
        ]);

        let ranks: Vec<i64> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);
    }

    #[test]
    fn test_sorts_descending_before_ranking() {
        let entries = rank_teams(vec![scored("low", 60), scored("high", 95), scored("mid", 80)]);

        let names: Vec<&str> = entries.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[2].rank, 3);
    }

    #[test]
    fn test_all_tied_share_first_rank() {
        let entries = rank_teams(vec![scored("a", 88), scored("b", 88), scored("c", 88)]);
        assert!(entries.iter().all(|e| e.rank == 1));
    }

    #[test]
    fn test_empty_input_ranks_nothing() {
        assert!(rank_teams(Vec::new()).is_empty());
    }

    #[test]
    fn test_fractional_averages_survive_rounding() {
        let mut team = scored("frac", 0);
        team.average_score = Decimal::new(8667, 2); // 86.67
        let entries = rank_teams(vec![team]);
        assert_eq!(entries[0].average_score, 86.67);
    }

    #[test]
    fn test_incomplete_message_names_every_team() {
        let foo = TeamEvaluationCount {
            team_id: Uuid::new_v4(),
            team_name: "Foo".to_string(),
            evaluation_count: 2,
        };
        let bar = TeamEvaluationCount {
            team_id: Uuid::new_v4(),
            team_name: "Bar".to_string(),
            evaluation_count: 0,
        };

        let message = incomplete_message(&[&foo, &bar]);
        assert!(message.contains("2 team(s)"));
        assert!(message.contains("Foo (2/3)"));
        assert!(message.contains("Bar (0/3)"));
    }
}
