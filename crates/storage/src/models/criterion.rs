use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The ten scoring criteria. Keys and maxima are a fixed contract with every
/// client; the maxima sum to 100. Adding or removing a criterion is a
/// single-point change here, and the compiler walks you through the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    RelevanceToLearning,
    InnovationCreativity,
    ClarityAccessibility,
    Depth,
    InteractivityEngagement,
    UseOfTechnology,
    ScalabilityAdaptability,
    EthicalStandards,
    PracticalApplication,
    VideoQuality,
}

impl Criterion {
    pub const ALL: [Criterion; 10] = [
        Criterion::RelevanceToLearning,
        Criterion::InnovationCreativity,
        Criterion::ClarityAccessibility,
        Criterion::Depth,
        Criterion::InteractivityEngagement,
        Criterion::UseOfTechnology,
        Criterion::ScalabilityAdaptability,
        Criterion::EthicalStandards,
        Criterion::PracticalApplication,
        Criterion::VideoQuality,
    ];

    /// The wire key, exactly as clients send and receive it.
    pub fn key(self) -> &'static str {
        match self {
            Criterion::RelevanceToLearning => "relevanceToLearning",
            Criterion::InnovationCreativity => "innovationCreativity",
            Criterion::ClarityAccessibility => "clarityAccessibility",
            Criterion::Depth => "depth",
            Criterion::InteractivityEngagement => "interactivityEngagement",
            Criterion::UseOfTechnology => "useOfTechnology",
            Criterion::ScalabilityAdaptability => "scalabilityAdaptability",
            Criterion::EthicalStandards => "ethicalStandards",
            Criterion::PracticalApplication => "practicalApplication",
            Criterion::VideoQuality => "videoQuality",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Criterion::RelevanceToLearning => "Relevance to Learning Outcomes",
            Criterion::InnovationCreativity => "Innovation & Creativity",
            Criterion::ClarityAccessibility => "Clarity & Accessibility",
            Criterion::Depth => "Depth",
            Criterion::InteractivityEngagement => "Interactivity & Engagement",
            Criterion::UseOfTechnology => "Use of Technology",
            Criterion::ScalabilityAdaptability => "Scalability & Adaptability",
            Criterion::EthicalStandards => "Alignment with Ethical Standards",
            Criterion::PracticalApplication => "Practical Application",
            Criterion::VideoQuality => "Video Quality",
        }
    }

    /// Maximum sub-score for this criterion.
    pub fn max_score(self) -> Decimal {
        let max: u8 = match self {
            Criterion::RelevanceToLearning => 5,
            Criterion::InnovationCreativity => 15,
            Criterion::ClarityAccessibility => 10,
            Criterion::Depth => 5,
            Criterion::InteractivityEngagement => 25,
            Criterion::UseOfTechnology => 5,
            Criterion::ScalabilityAdaptability => 10,
            Criterion::EthicalStandards => 5,
            Criterion::PracticalApplication => 10,
            Criterion::VideoQuality => 10,
        };
        Decimal::from(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maxima_sum_to_100() {
        let total: Decimal = Criterion::ALL.iter().map(|c| c.max_score()).sum();
        assert_eq!(total, Decimal::from(100));
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = Criterion::ALL.iter().map(|c| c.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_serde_key_matches_wire_key() {
        for criterion in Criterion::ALL {
            let json = serde_json::to_string(&criterion).unwrap();
            assert_eq!(json, format!("\"{}\"", criterion.key()));
        }
    }
}
