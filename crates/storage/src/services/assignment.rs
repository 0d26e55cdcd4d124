use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::assignment::{
    AssignmentStatistics, AutoAssignOutcome, EvaluatorWorkload, ManualAssignOutcome,
    WorkloadReport,
};
use crate::dto::decimal_to_f64;
use crate::error::{Result, StorageError};
use crate::models::user::role;
use crate::models::{Assignment, User};
use crate::repository::assignment::AssignmentRepository;
use crate::repository::user::UserRepository;
use crate::services::REQUIRED_EVALUATIONS;

/// Plans the round-robin fan-out: each team takes the next three evaluators
/// from a cursor that wraps modulo the evaluator count and carries across
/// teams, so no evaluator's load differs from another's by more than one.
///
/// Pure function of (evaluator list, team count); callers guarantee at least
/// three evaluators, which also makes each team's three picks distinct.
pub fn plan_round_robin(evaluator_ids: &[Uuid], team_count: usize) -> Vec<[Uuid; 3]> {
    let n = evaluator_ids.len();

    (0..team_count)
        .fold(
            (Vec::with_capacity(team_count), 0usize),
            |(mut plans, cursor), _| {
                plans.push([
                    evaluator_ids[cursor % n],
                    evaluator_ids[(cursor + 1) % n],
                    evaluator_ids[(cursor + 2) % n],
                ]);
                (plans, cursor + 3)
            },
        )
        .0
}

/// Exactly three, all distinct. Shared by manual assignment validation.
pub fn validate_evaluator_set(evaluator_ids: &[Uuid]) -> Result<()> {
    if evaluator_ids.len() != REQUIRED_EVALUATIONS as usize {
        return Err(StorageError::Validation(
            "Must provide exactly 3 evaluators".to_string(),
        ));
    }

    let mut unique = evaluator_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.len() != evaluator_ids.len() {
        return Err(StorageError::Validation(
            "All 3 evaluators must be unique".to_string(),
        ));
    }

    Ok(())
}

/// Fans evaluators out over every registered team. Refuses to run when any
/// assignment already exists, so it never silently overwrites manual work;
/// reassignment of individual teams goes through `manual_assign`.
pub async fn auto_assign(pool: &PgPool, admin_id: Uuid) -> Result<AutoAssignOutcome> {
    let users = UserRepository::new(pool);
    let evaluators = users.find_approved_evaluators().await?;
    let teams = users.find_teams().await?;

    if evaluators.len() < REQUIRED_EVALUATIONS as usize {
        return Err(StorageError::Precondition(
            "Insufficient evaluators: at least 3 approved evaluators are required for assignment"
                .to_string(),
        ));
    }

    if teams.is_empty() {
        return Err(StorageError::Precondition(
            "No teams found: at least one team must be registered for assignment".to_string(),
        ));
    }

    let assignments = AssignmentRepository::new(pool);
    if assignments.count().await? > 0 {
        return Err(StorageError::Conflict(
            "Assignments already exist: clear existing assignments before running auto-assignment"
                .to_string(),
        ));
    }

    let evaluator_ids: Vec<Uuid> = evaluators.iter().map(|e| e.user_id).collect();
    let plans: Vec<(Uuid, [Uuid; 3])> = teams
        .iter()
        .map(|t| t.user_id)
        .zip(plan_round_robin(&evaluator_ids, teams.len()))
        .collect();

    let created = assignments.insert_many(admin_id, &plans).await?;
    let workload_distribution = evaluator_workload(pool).await?;

    Ok(AutoAssignOutcome {
        statistics: AssignmentStatistics {
            total_teams: teams.len() as i64,
            total_evaluators: evaluators.len() as i64,
            assignments_created: created.len() as i64,
            evaluators_per_team: REQUIRED_EVALUATIONS as i64,
        },
        workload_distribution,
    })
}

/// Creates or replaces one team's evaluator set. Unlike auto-assign, an
/// existing assignment is updated in place: this is the designed reassign
/// path.
pub async fn manual_assign(
    pool: &PgPool,
    team_id: Uuid,
    evaluator_ids: &[Uuid],
    admin_id: Uuid,
) -> Result<ManualAssignOutcome> {
    validate_evaluator_set(evaluator_ids)?;

    let users = UserRepository::new(pool);
    let team = match users.find_by_id(team_id).await {
        Ok(user) => user,
        Err(StorageError::NotFound) => {
            return Err(StorageError::NotFoundMsg("Team not found".to_string()));
        }
        Err(e) => return Err(e),
    };

    if team.role != role::TEAM {
        return Err(StorageError::Validation(
            "Specified user is not a team".to_string(),
        ));
    }

    let evaluators = users
        .find_by_ids_with_role(evaluator_ids, role::EVALUATOR)
        .await?;

    if evaluators.len() != evaluator_ids.len() {
        return Err(StorageError::NotFoundMsg(
            "One or more evaluators not found or not evaluator role".to_string(),
        ));
    }

    if evaluators.iter().any(|e| !e.approved) {
        return Err(StorageError::Precondition(
            "One or more evaluators are not approved".to_string(),
        ));
    }

    let repo = AssignmentRepository::new(pool);
    let (assignment, is_update) = match repo.find_by_team(team_id).await? {
        Some(_) => (
            repo.replace_evaluators(team_id, evaluator_ids, admin_id)
                .await?,
            true,
        ),
        None => (repo.create(team_id, evaluator_ids, admin_id).await?, false),
    };

    Ok(ManualAssignOutcome {
        assignment: assignment.into(),
        is_update,
    })
}

pub async fn list_assignments(pool: &PgPool) -> Result<Vec<Assignment>> {
    AssignmentRepository::new(pool).list_all().await
}

/// Tallies active assignments per evaluator, heaviest first. Display only;
/// the round-robin cursor is what actually balances load.
pub async fn evaluator_workload(pool: &PgPool) -> Result<WorkloadReport> {
    let active = AssignmentRepository::new(pool).list_active().await?;

    let mut referenced: Vec<Uuid> = active
        .iter()
        .flat_map(|a| a.evaluator_ids.iter().copied())
        .collect();
    referenced.sort_unstable();
    referenced.dedup();

    let evaluators = UserRepository::new(pool)
        .find_by_ids_with_role(&referenced, role::EVALUATOR)
        .await?;

    Ok(tally_workload(&active, &evaluators))
}

fn tally_workload(assignments: &[Assignment], evaluators: &[User]) -> WorkloadReport {
    let mut counts: HashMap<Uuid, i64> = HashMap::new();
    for assignment in assignments {
        for evaluator_id in &assignment.evaluator_ids {
            *counts.entry(*evaluator_id).or_default() += 1;
        }
    }

    let mut workload: Vec<EvaluatorWorkload> = evaluators
        .iter()
        .map(|e| EvaluatorWorkload {
            evaluator_id: e.user_id,
            name: e.name.clone(),
            email: e.email.clone(),
            assigned_teams: counts.get(&e.user_id).copied().unwrap_or(0),
        })
        .collect();
    workload.sort_by(|a, b| b.assigned_teams.cmp(&a.assigned_teams));

    let average_workload = if workload.is_empty() {
        0.0
    } else {
        let total: i64 = workload.iter().map(|w| w.assigned_teams).sum();
        let average = Decimal::from(total) / Decimal::from(workload.len() as i64);
        decimal_to_f64(average.round_dp(2))
    };

    WorkloadReport {
        total_evaluators: workload.len() as i64,
        workload,
        average_workload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn load_spread(plans: &[[Uuid; 3]], evaluators: &[Uuid]) -> (i64, i64) {
        let mut counts: HashMap<Uuid, i64> = evaluators.iter().map(|&e| (e, 0)).collect();
        for plan in plans {
            for evaluator in plan {
                *counts.get_mut(evaluator).unwrap() += 1;
            }
        }
        let max = *counts.values().max().unwrap();
        let min = *counts.values().min().unwrap();
        (max, min)
    }

    #[test]
    fn test_every_team_gets_three_distinct_evaluators() {
        let evaluators = ids(5);
        let plans = plan_round_robin(&evaluators, 7);

        assert_eq!(plans.len(), 7);
        for plan in &plans {
            let mut unique = plan.to_vec();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_round_robin_spreads_load_within_one() {
        for (evaluator_count, team_count) in [(3, 4), (4, 2), (5, 3), (7, 11)] {
            let evaluators = ids(evaluator_count);
            let plans = plan_round_robin(&evaluators, team_count);
            let (max, min) = load_spread(&plans, &evaluators);
            assert!(
                max - min <= 1,
                "{evaluator_count} evaluators / {team_count} teams spread {max}-{min}"
            );
        }
    }

    #[test]
    fn test_cursor_carries_across_teams() {
        let evaluators = ids(5);
        let plans = plan_round_robin(&evaluators, 2);

        assert_eq!(plans[0], [evaluators[0], evaluators[1], evaluators[2]]);
        assert_eq!(plans[1], [evaluators[3], evaluators[4], evaluators[0]]);
    }

    #[test]
    fn test_zero_teams_plans_nothing() {
        assert!(plan_round_robin(&ids(3), 0).is_empty());
    }

    #[test]
    fn test_evaluator_set_must_have_three_members() {
        assert!(validate_evaluator_set(&ids(2)).is_err());
        assert!(validate_evaluator_set(&ids(4)).is_err());
        assert!(validate_evaluator_set(&ids(3)).is_ok());
    }

    #[test]
    fn test_evaluator_set_must_be_distinct() {
        let duplicate = Uuid::new_v4();
        let err = validate_evaluator_set(&[duplicate, duplicate, Uuid::new_v4()]).unwrap_err();
        assert!(err.to_string().contains("unique"));
    }

    fn evaluator(name: &str) -> User {
        User {
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            role: role::EVALUATOR.to_string(),
            approved: true,
            expertise: None,
            created_at: Utc::now(),
        }
    }

    fn assignment_for(evaluator_ids: Vec<Uuid>) -> Assignment {
        Assignment {
            assignment_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            evaluator_ids,
            assigned_by: Uuid::new_v4(),
            assigned_at: Utc::now(),
            status: crate::models::assignment::status::ACTIVE.to_string(),
        }
    }

    #[test]
    fn test_workload_sorted_descending_with_average() {
        let e1 = evaluator("e1");
        let e2 = evaluator("e2");
        let e3 = evaluator("e3");
        let e4 = evaluator("e4");

        let assignments = vec![
            assignment_for(vec![e1.user_id, e2.user_id, e3.user_id]),
            assignment_for(vec![e1.user_id, e2.user_id, e4.user_id]),
        ];

        let report = tally_workload(
            &assignments,
            &[e1.clone(), e2.clone(), e3.clone(), e4.clone()],
        );

        assert_eq!(report.total_evaluators, 4);
        assert_eq!(report.workload[0].assigned_teams, 2);
        assert_eq!(report.workload[3].assigned_teams, 1);
        assert_eq!(report.average_workload, 1.5);
    }

    #[test]
    fn test_workload_empty_is_zeroed() {
        let report = tally_workload(&[], &[]);
        assert_eq!(report.total_evaluators, 0);
        assert_eq!(report.average_workload, 0.0);
        assert!(report.workload.is_empty());
    }
}
