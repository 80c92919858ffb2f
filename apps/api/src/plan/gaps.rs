//! Skill-gap computation and the impact/difficulty/urgency priority matrix.
//!
//! `compute_skill_gaps` is order-independent of map iteration: dimensions are
//! visited in canonical order and skills in key order, so identical
//! assessments always give identical output.

use std::cmp::Ordering;

use crate::assessment::aggregator::SkillLevel;
use crate::assessment::score_model::{is_inferred, score_of, Assessment, Dimension};
use crate::plan::deriver::PlanPolicy;
use crate::plan::model::{GapPriority, PriorityMatrixEntry, SkillGap};

/// Score every skill is measured against: the floor of the band above the
/// assessment's overall level. Expert aims for 100.
pub fn target_score_for(level: SkillLevel) -> f64 {
    level.next().map(SkillLevel::floor).unwrap_or(100.0)
}

/// Gaps in canonical order (dimension, then skill key). Skills at or above
/// target are omitted. A dimension without skills counts as a single skill
/// named after the dimension.
pub fn compute_skill_gaps(
    assessment: &Assessment,
    target_score: f64,
    policy: &PlanPolicy,
) -> Vec<SkillGap> {
    let mut gaps = Vec::new();

    for (dimension, entry) in &assessment.dimensions {
        if entry.skills.is_empty() {
            gaps.extend(make_gap(
                dimension.key(),
                *dimension,
                entry.score,
                false,
                target_score,
                policy,
            ));
            continue;
        }
        for (name, skill) in &entry.skills {
            gaps.extend(make_gap(
                name,
                *dimension,
                score_of(skill),
                is_inferred(skill),
                target_score,
                policy,
            ));
        }
    }

    gaps
}

fn make_gap(
    skill: &str,
    dimension: Dimension,
    current_score: f64,
    inferred: bool,
    target_score: f64,
    policy: &PlanPolicy,
) -> Option<SkillGap> {
    let gap = target_score - current_score;
    if gap <= 0.0 {
        return None;
    }
    Some(SkillGap {
        skill: skill.to_string(),
        dimension,
        current_score,
        target_score,
        gap,
        priority: priority_for_gap(gap, policy),
        estimated_weeks: estimated_weeks(gap, policy),
        is_inferred: inferred,
    })
}

pub fn priority_for_gap(gap: f64, policy: &PlanPolicy) -> GapPriority {
    if gap >= policy.high_gap_threshold {
        GapPriority::High
    } else if gap >= policy.medium_gap_threshold {
        GapPriority::Medium
    } else {
        GapPriority::Low
    }
}

/// `ceil(gap / points_per_week)`, at least one week.
pub fn estimated_weeks(gap: f64, policy: &PlanPolicy) -> u32 {
    ((gap / policy.points_per_week).ceil() as u32).max(1)
}

/// Largest gap first; ties by skill key, then dimension. Stable.
pub fn sort_skill_gaps(gaps: &mut [SkillGap]) {
    gaps.sort_by(compare_gaps);
}

pub fn compare_gaps(a: &SkillGap, b: &SkillGap) -> Ordering {
    b.gap
        .total_cmp(&a.gap)
        .then_with(|| a.skill.cmp(&b.skill))
        .then_with(|| a.dimension.cmp(&b.dimension))
}

/// (impact, difficulty) on a 1–5 scale.
pub fn dimension_profile(dimension: Dimension) -> (u8, u8) {
    match dimension {
        Dimension::Programming => (5, 3),
        Dimension::Algorithm => (4, 4),
        Dimension::Project => (4, 3),
        Dimension::SystemDesign => (5, 5),
        Dimension::Communication => (3, 2),
    }
}

pub fn build_priority_matrix(gaps: &[SkillGap]) -> Vec<PriorityMatrixEntry> {
    gaps.iter()
        .map(|gap| {
            let (impact, difficulty) = dimension_profile(gap.dimension);
            let urgency = gap.priority.urgency();
            let priority_score =
                ((impact as f64 + difficulty as f64 + urgency as f64) / 3.0).round() as u8;
            PriorityMatrixEntry {
                skill: gap.skill.clone(),
                dimension: gap.dimension,
                impact,
                difficulty,
                urgency,
                priority_score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::fixtures::sample_assessment;

    #[test]
    fn test_target_is_next_band_floor() {
        assert_eq!(target_score_for(SkillLevel::Intermediate), 61.0);
        assert_eq!(target_score_for(SkillLevel::Novice), 21.0);
        assert_eq!(target_score_for(SkillLevel::Expert), 100.0);
    }

    #[test]
    fn test_gaps_in_canonical_order() {
        let assessment = sample_assessment();
        let gaps = compute_skill_gaps(&assessment, 61.0, &PlanPolicy::default());
        let keys: Vec<(&str, f64)> = gaps.iter().map(|g| (g.skill.as_str(), g.gap)).collect();
        // rust (70) and writing (65) are already above target
        assert_eq!(
            keys,
            vec![
                ("python", 15.0),
                ("dp", 31.0),
                ("graphs", 15.0),
                ("delivery", 1.0),
                ("systemDesign", 21.0),
            ]
        );
    }

    #[test]
    fn test_gap_fields() {
        let gaps = compute_skill_gaps(&sample_assessment(), 61.0, &PlanPolicy::default());
        let dp = gaps.iter().find(|g| g.skill == "dp").unwrap();
        assert_eq!(dp.priority, GapPriority::High);
        assert_eq!(dp.estimated_weeks, 7);
        assert!(dp.is_inferred);

        let python = gaps.iter().find(|g| g.skill == "python").unwrap();
        assert_eq!(python.priority, GapPriority::Medium);
        assert_eq!(python.estimated_weeks, 3);

        let delivery = gaps.iter().find(|g| g.skill == "delivery").unwrap();
        assert_eq!(delivery.priority, GapPriority::Low);
        assert_eq!(delivery.estimated_weeks, 1);
    }

    #[test]
    fn test_unsorted_output_is_repeatable() {
        let assessment = sample_assessment();
        let policy = PlanPolicy::default();
        assert_eq!(
            compute_skill_gaps(&assessment, 61.0, &policy),
            compute_skill_gaps(&assessment, 61.0, &policy)
        );
    }

    #[test]
    fn test_sort_breaks_ties_by_skill_key() {
        let mut gaps = compute_skill_gaps(&sample_assessment(), 61.0, &PlanPolicy::default());
        sort_skill_gaps(&mut gaps);
        let order: Vec<&str> = gaps.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(order, vec!["dp", "systemDesign", "graphs", "python", "delivery"]);
    }

    #[test]
    fn test_priority_thresholds_inclusive() {
        let policy = PlanPolicy::default();
        assert_eq!(priority_for_gap(25.0, &policy), GapPriority::High);
        assert_eq!(priority_for_gap(24.9, &policy), GapPriority::Medium);
        assert_eq!(priority_for_gap(10.0, &policy), GapPriority::Medium);
        assert_eq!(priority_for_gap(9.9, &policy), GapPriority::Low);
    }

    #[test]
    fn test_priority_matrix_scores() {
        let gaps = compute_skill_gaps(&sample_assessment(), 61.0, &PlanPolicy::default());
        let matrix = build_priority_matrix(&gaps);
        assert_eq!(matrix.len(), gaps.len());

        let dp = matrix.iter().find(|m| m.skill == "dp").unwrap();
        // algorithm (4, 4) + high urgency 5 → 13/3 ≈ 4
        assert_eq!((dp.impact, dp.difficulty, dp.urgency, dp.priority_score), (4, 4, 5, 4));

        let design = matrix.iter().find(|m| m.skill == "systemDesign").unwrap();
        // system design (5, 5) + medium urgency 3 → 13/3 ≈ 4
        assert_eq!(design.priority_score, 4);

        let delivery = matrix.iter().find(|m| m.skill == "delivery").unwrap();
        // project (4, 3) + low urgency 1 → 8/3 ≈ 3
        assert_eq!(delivery.priority_score, 3);
    }

    #[test]
    fn test_custom_study_rate() {
        let policy = PlanPolicy {
            points_per_week: 10.0,
            ..PlanPolicy::default()
        };
        assert_eq!(estimated_weeks(31.0, &policy), 4);
        assert_eq!(estimated_weeks(0.5, &policy), 1);
    }
}
