use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::decimal_to_f64;
use crate::models::Criterion;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriterionInfo {
    pub key: String,
    pub name: String,
    pub max_score: f64,
}

/// The scoring rubric, derived straight from the criterion enum so the
/// published catalogue can never drift from what validation enforces.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaCatalogue {
    pub criteria: Vec<CriterionInfo>,
    pub total_score: f64,
}

impl CriteriaCatalogue {
    pub fn current() -> Self {
        let criteria: Vec<CriterionInfo> = Criterion::ALL
            .iter()
            .map(|&c| CriterionInfo {
                key: c.key().to_string(),
                name: c.display_name().to_string(),
                max_score: decimal_to_f64(c.max_score()),
            })
            .collect();

        let total_score = criteria.iter().map(|c| c.max_score).sum();

        Self {
            criteria,
            total_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lists_all_criteria() {
        let catalogue = CriteriaCatalogue::current();
        assert_eq!(catalogue.criteria.len(), 10);
        assert_eq!(catalogue.total_score, 100.0);
    }
}
