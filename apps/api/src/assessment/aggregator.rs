//! Assessment aggregation: overall score and level bands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::score_model::{Dimension, DimensionAssessment};

/// Tolerance for the dimension-weight sum.
pub const WEIGHT_TOLERANCE: f64 = 1e-10;

/// `round(Σ score_i × weight_i)`, bounded to 0–100.
pub fn aggregate(dimensions: &BTreeMap<Dimension, DimensionAssessment>) -> u32 {
    let total: f64 = dimensions.values().map(|d| d.score * d.weight).sum();
    total.round().clamp(0.0, 100.0) as u32
}

pub fn weights_are_normalized(dimensions: &BTreeMap<Dimension, DimensionAssessment>) -> bool {
    let total: f64 = dimensions.values().map(|d| d.weight).sum();
    (total - 1.0).abs() <= WEIGHT_TOLERANCE
}

/// Ability level bands over 0–100, inclusive upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Novice,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Lowest integer score that classifies into this band.
    pub fn floor(self) -> f64 {
        match self {
            SkillLevel::Novice => 0.0,
            SkillLevel::Beginner => 21.0,
            SkillLevel::Intermediate => 41.0,
            SkillLevel::Advanced => 61.0,
            SkillLevel::Expert => 81.0,
        }
    }

    pub fn next(self) -> Option<SkillLevel> {
        match self {
            SkillLevel::Novice => Some(SkillLevel::Beginner),
            SkillLevel::Beginner => Some(SkillLevel::Intermediate),
            SkillLevel::Intermediate => Some(SkillLevel::Advanced),
            SkillLevel::Advanced => Some(SkillLevel::Expert),
            SkillLevel::Expert => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Novice => "Novice",
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

pub fn classify_level(score: f64) -> SkillLevel {
    match score {
        s if s <= 20.0 => SkillLevel::Novice,
        s if s <= 40.0 => SkillLevel::Beginner,
        s if s <= 60.0 => SkillLevel::Intermediate,
        s if s <= 80.0 => SkillLevel::Advanced,
        _ => SkillLevel::Expert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(scores: [f64; 5]) -> BTreeMap<Dimension, DimensionAssessment> {
        Dimension::ALL
            .into_iter()
            .zip(scores)
            .map(|(d, score)| {
                (
                    d,
                    DimensionAssessment {
                        score,
                        weight: d.default_weight(),
                        skills: BTreeMap::new(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_aggregate_weighted_sum() {
        // 80*.25 + 60*.2 + 70*.25 + 50*.15 + 84*.15 = 20 + 12 + 17.5 + 7.5 + 12.6 = 69.6
        let dimensions = dims([80.0, 60.0, 70.0, 50.0, 84.0]);
        assert_eq!(aggregate(&dimensions), 70);
        assert!(weights_are_normalized(&dimensions));
    }

    #[test]
    fn test_aggregate_all_zero() {
        assert_eq!(aggregate(&dims([0.0; 5])), 0);
    }

    #[test]
    fn test_aggregate_all_max() {
        assert_eq!(aggregate(&dims([100.0; 5])), 100);
    }

    #[test]
    fn test_classify_level_boundaries() {
        let cases = [
            (0.0, SkillLevel::Novice),
            (20.0, SkillLevel::Novice),
            (21.0, SkillLevel::Beginner),
            (40.0, SkillLevel::Beginner),
            (41.0, SkillLevel::Intermediate),
            (60.0, SkillLevel::Intermediate),
            (61.0, SkillLevel::Advanced),
            (80.0, SkillLevel::Advanced),
            (81.0, SkillLevel::Expert),
            (100.0, SkillLevel::Expert),
        ];
        for (score, expected) in cases {
            assert_eq!(classify_level(score), expected, "score {score}");
        }
    }

    #[test]
    fn test_classify_level_is_monotonic() {
        let mut previous = SkillLevel::Novice;
        for score in 0..=100 {
            let level = classify_level(score as f64);
            assert!(level >= previous, "level regressed at {score}");
            previous = level;
        }
    }

    #[test]
    fn test_floor_classifies_into_own_band() {
        for level in [
            SkillLevel::Novice,
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
            SkillLevel::Expert,
        ] {
            assert_eq!(classify_level(level.floor()), level);
        }
        assert_eq!(SkillLevel::Expert.next(), None);
    }
}
