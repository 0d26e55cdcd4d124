use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Criterion;

/// One criterion's sub-score with an optional free-text comment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CriterionScore {
    pub score: Decimal,
    #[serde(default)]
    pub comment: String,
}

impl CriterionScore {
    /// Builds a sub-score, rejecting values outside [0, max] for the given
    /// criterion.
    pub fn new(criterion: Criterion, score: Decimal, comment: impl Into<String>) -> Result<Self> {
        check_range(criterion, score)?;
        Ok(Self {
            score,
            comment: comment.into(),
        })
    }
}

fn check_range(criterion: Criterion, score: Decimal) -> Result<()> {
    if score < Decimal::ZERO || score > criterion.max_score() {
        return Err(StorageError::Validation(format!(
            "{} score must be between 0 and {}",
            criterion.display_name(),
            criterion.max_score()
        )));
    }
    Ok(())
}

/// The full set of ten sub-scores. Every criterion is a required field, so a
/// payload missing one fails to deserialize; there is no field for a
/// caller-supplied total, so one can never be smuggled in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScores {
    pub relevance_to_learning: CriterionScore,
    pub innovation_creativity: CriterionScore,
    pub clarity_accessibility: CriterionScore,
    pub depth: CriterionScore,
    pub interactivity_engagement: CriterionScore,
    pub use_of_technology: CriterionScore,
    pub scalability_adaptability: CriterionScore,
    pub ethical_standards: CriterionScore,
    pub practical_application: CriterionScore,
    pub video_quality: CriterionScore,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> &CriterionScore {
        match criterion {
            Criterion::RelevanceToLearning => &self.relevance_to_learning,
            Criterion::InnovationCreativity => &self.innovation_creativity,
            Criterion::ClarityAccessibility => &self.clarity_accessibility,
            Criterion::Depth => &self.depth,
            Criterion::InteractivityEngagement => &self.interactivity_engagement,
            Criterion::UseOfTechnology => &self.use_of_technology,
            Criterion::ScalabilityAdaptability => &self.scalability_adaptability,
            Criterion::EthicalStandards => &self.ethical_standards,
            Criterion::PracticalApplication => &self.practical_application,
            Criterion::VideoQuality => &self.video_quality,
        }
    }

    /// Checks every sub-score against its criterion's range, reporting the
    /// first violation by criterion name.
    pub fn validate(&self) -> Result<()> {
        for criterion in Criterion::ALL {
            check_range(criterion, self.get(criterion).score)?;
        }
        Ok(())
    }

    /// Sum of the ten sub-scores. Always recomputed from the sub-scores at
    /// write time, never accepted from the caller.
    pub fn total(&self) -> Decimal {
        Criterion::ALL
            .iter()
            .map(|&c| self.get(c).score)
            .sum()
    }
}

/// A persisted evaluation: one evaluator's scored assessment of one team's
/// submission. Immutable once written; the (evaluator_id, team_id) pair is
/// unique.
#[derive(Debug, Clone, FromRow)]
pub struct Evaluation {
    pub evaluation_id: Uuid,
    pub evaluator_id: Uuid,
    pub team_id: Uuid,
    pub submission_id: Uuid,
    pub scores: Json<CriterionScores>,
    pub total_score: Decimal,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: i64) -> CriterionScore {
        CriterionScore {
            score: Decimal::from(value),
            comment: String::new(),
        }
    }

    fn full_scores() -> CriterionScores {
        CriterionScores {
            relevance_to_learning: score(5),
            innovation_creativity: score(12),
            clarity_accessibility: score(8),
            depth: score(4),
            interactivity_engagement: score(20),
            use_of_technology: score(5),
            scalability_adaptability: score(9),
            ethical_standards: score(5),
            practical_application: score(7),
            video_quality: score(10),
        }
    }

    #[test]
    fn test_total_is_sum_of_sub_scores() {
        assert_eq!(full_scores().total(), Decimal::from(85));
    }

    #[test]
    fn test_validate_accepts_boundary_score() {
        let mut scores = full_scores();
        scores.relevance_to_learning = score(5);
        assert!(scores.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_score_above_max() {
        let mut scores = full_scores();
        scores.relevance_to_learning = score(6);
        let err = scores.validate().unwrap_err();
        assert!(
            err.to_string()
                .contains("Relevance to Learning Outcomes score must be between 0 and 5"),
            "unexpected message: {err}"
        );
    }

    #[test]
    fn test_validate_rejects_negative_score() {
        let mut scores = full_scores();
        scores.video_quality = score(-1);
        assert!(scores.validate().is_err());
    }

    #[test]
    fn test_constructor_rejects_out_of_range() {
        assert!(CriterionScore::new(Criterion::Depth, Decimal::from(6), "").is_err());
        assert!(CriterionScore::new(Criterion::Depth, Decimal::from(5), "").is_ok());
    }

    #[test]
    fn test_deserialize_requires_every_criterion() {
        let json = r#"{"relevanceToLearning": {"score": 5}}"#;
        assert!(serde_json::from_str::<CriterionScores>(json).is_err());
    }

    #[test]
    fn test_deserialize_ignores_caller_supplied_total() {
        let json = serde_json::json!({
            "relevanceToLearning": {"score": 5},
            "innovationCreativity": {"score": 12},
            "clarityAccessibility": {"score": 8},
            "depth": {"score": 4},
            "interactivityEngagement": {"score": 20},
            "useOfTechnology": {"score": 5},
            "scalabilityAdaptability": {"score": 9},
            "ethicalStandards": {"score": 5},
            "practicalApplication": {"score": 7},
            "videoQuality": {"score": 10},
            "totalScore": 100
        });
        let scores: CriterionScores = serde_json::from_value(json).unwrap();
        assert_eq!(scores.total(), Decimal::from(85));
    }

    #[test]
    fn test_comment_defaults_to_empty() {
        let json = serde_json::json!({"score": 3});
        let parsed: CriterionScore = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.comment, "");
    }
}
