//! Improvement plan derivation. Pure: the same assessment and policy always
//! yield the same plan.

use tracing::debug;

use crate::assessment::aggregator::{classify_level, SkillLevel};
use crate::assessment::score_model::{Assessment, Dimension};
use crate::plan::gaps::{build_priority_matrix, compute_skill_gaps, sort_skill_gaps, target_score_for};
use crate::plan::goals::{build_milestones, synthesize_goals};
use crate::plan::model::{ImprovementPlan, OverallStrategy, VisualData};

/// Study-rate and gap-priority knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanPolicy {
    /// Score points gained per week of study.
    pub points_per_week: f64,
    /// Gaps at or above this are high priority.
    pub high_gap_threshold: f64,
    /// Gaps at or above this (and below high) are medium priority.
    pub medium_gap_threshold: f64,
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self {
            points_per_week: 5.0,
            high_gap_threshold: 25.0,
            medium_gap_threshold: 10.0,
        }
    }
}

pub fn derive_improvement_plan(assessment: &Assessment, policy: &PlanPolicy) -> ImprovementPlan {
    let current_level = classify_level(assessment.overall_score as f64);
    let target_level = current_level.next().unwrap_or(current_level);
    let target_score = target_score_for(current_level);

    let mut skill_gaps = compute_skill_gaps(assessment, target_score, policy);
    sort_skill_gaps(&mut skill_gaps);
    let priority_matrix = build_priority_matrix(&skill_gaps);

    let goals = synthesize_goals(assessment, &skill_gaps, target_score, policy);
    let milestones = build_milestones(goals.short_term.iter().chain(&goals.medium_term));
    let focus_areas: Vec<Dimension> = goals.short_term.iter().map(|g| g.dimension).collect();

    debug!(
        "Derived plan: level={} target={} gaps={} goals={}",
        current_level.label(),
        target_score,
        skill_gaps.len(),
        goals.short_term.len() + goals.medium_term.len()
    );

    ImprovementPlan {
        fingerprint: assessment.fingerprint(),
        current_level,
        target_level,
        target_score,
        overall_strategy: OverallStrategy {
            summary: strategy_summary(current_level, target_level, &focus_areas),
            focus_areas,
            milestones,
        },
        short_term_goals: goals.short_term,
        medium_term_goals: goals.medium_term,
        visual_data: VisualData {
            skill_gaps,
            priority_matrix,
        },
    }
}

fn strategy_summary(current: SkillLevel, target: SkillLevel, focus: &[Dimension]) -> String {
    let areas = focus
        .iter()
        .map(|d| d.display_name())
        .collect::<Vec<_>>()
        .join(" and ");
    if current == target {
        format!("Sustain {} level by deepening {}.", current.label(), areas)
    } else {
        format!(
            "Move from {} to {} by concentrating on {}.",
            current.label(),
            target.label(),
            areas
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::fixtures::{sample_assessment, uniform_assessment};

    #[test]
    fn test_plan_for_intermediate_profile() {
        let assessment = sample_assessment();
        let plan = derive_improvement_plan(&assessment, &PlanPolicy::default());

        assert_eq!(plan.fingerprint, assessment.fingerprint());
        assert_eq!(plan.current_level, SkillLevel::Intermediate);
        assert_eq!(plan.target_level, SkillLevel::Advanced);
        assert_eq!(plan.target_score, 61.0);
        assert_eq!(
            plan.overall_strategy.focus_areas,
            vec![Dimension::Algorithm, Dimension::SystemDesign]
        );
        assert_eq!(
            plan.overall_strategy.summary,
            "Move from Intermediate to Advanced by concentrating on Algorithms and System Design."
        );
        assert_eq!(plan.visual_data.skill_gaps[0].skill, "dp");
        assert_eq!(
            plan.visual_data.priority_matrix.len(),
            plan.visual_data.skill_gaps.len()
        );
        assert_eq!(plan.overall_strategy.milestones.len(), 4);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let assessment = sample_assessment();
        let policy = PlanPolicy::default();
        assert_eq!(
            derive_improvement_plan(&assessment, &policy),
            derive_improvement_plan(&assessment, &policy)
        );
    }

    #[test]
    fn test_expert_targets_full_score() {
        let plan = derive_improvement_plan(&uniform_assessment(90.0), &PlanPolicy::default());
        assert_eq!(plan.current_level, SkillLevel::Expert);
        assert_eq!(plan.target_level, SkillLevel::Expert);
        assert_eq!(plan.target_score, 100.0);
        // every dimension is 10 short of 100; equal sums fall back to canonical order
        assert_eq!(
            plan.overall_strategy.focus_areas,
            vec![Dimension::Programming, Dimension::Algorithm]
        );
        assert!(plan.overall_strategy.summary.starts_with("Sustain Expert level"));
    }

    #[test]
    fn test_perfect_profile_gets_stretch_goals() {
        let plan = derive_improvement_plan(&uniform_assessment(100.0), &PlanPolicy::default());
        assert!(plan.visual_data.skill_gaps.is_empty());
        assert_eq!(plan.short_term_goals.len(), 1);
        assert_eq!(plan.short_term_goals[0].estimated_weeks, 2);
        assert_eq!(plan.medium_term_goals[0].estimated_weeks, 6);
    }

    #[test]
    fn test_faster_study_rate_shortens_goals() {
        let assessment = sample_assessment();
        let slow = derive_improvement_plan(&assessment, &PlanPolicy::default());
        let fast = derive_improvement_plan(
            &assessment,
            &PlanPolicy {
                points_per_week: 10.0,
                ..PlanPolicy::default()
            },
        );
        assert!(fast.medium_term_goals[0].estimated_weeks < slow.medium_term_goals[0].estimated_weeks);
    }
}
