use serde::{Deserialize, Serialize};

use crate::assessment::aggregator::SkillLevel;
use crate::assessment::score_model::Dimension;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPriority {
    High,
    Medium,
    Low,
}

impl GapPriority {
    /// Urgency axis of the priority matrix.
    pub fn urgency(self) -> u8 {
        match self {
            GapPriority::High => 5,
            GapPriority::Medium => 3,
            GapPriority::Low => 1,
        }
    }
}

/// Distance between a skill's current score and the plan's target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub dimension: Dimension,
    pub current_score: f64,
    pub target_score: f64,
    pub gap: f64,
    pub priority: GapPriority,
    pub estimated_weeks: u32,
    pub is_inferred: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityMatrixEntry {
    pub skill: String,
    pub dimension: Dimension,
    pub impact: u8,
    pub difficulty: u8,
    pub urgency: u8,
    pub priority_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTerm {
    ShortTerm,
    MediumTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathNodeType {
    Foundation,
    Practice,
    Project,
    Review,
}

impl PathNodeType {
    pub fn label(self) -> &'static str {
        match self {
            PathNodeType::Foundation => "Foundations",
            PathNodeType::Practice => "Guided practice",
            PathNodeType::Project => "Applied project",
            PathNodeType::Review => "Review and reflect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPathNode {
    pub id: String,
    pub order: u32,
    pub title: String,
    pub description: String,
    pub node_type: PathNodeType,
    pub skill: String,
    pub estimated_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPath {
    pub nodes: Vec<GeneratedPathNode>,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedGoal {
    pub id: String,
    pub term: GoalTerm,
    pub title: String,
    pub description: String,
    pub dimension: Dimension,
    pub target_skills: Vec<String>,
    pub target_score: f64,
    pub estimated_weeks: u32,
    pub path: GeneratedPath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub week: u32,
    pub goal_id: String,
    pub title: String,
    pub criteria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStrategy {
    pub summary: String,
    pub focus_areas: Vec<Dimension>,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualData {
    /// Sorted by gap, largest first; ties by skill key.
    pub skill_gaps: Vec<SkillGap>,
    pub priority_matrix: Vec<PriorityMatrixEntry>,
}

/// Improvement plan derived from one assessment, identified by its fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementPlan {
    pub fingerprint: String,
    pub current_level: SkillLevel,
    pub target_level: SkillLevel,
    pub target_score: f64,
    pub short_term_goals: Vec<GeneratedGoal>,
    pub medium_term_goals: Vec<GeneratedGoal>,
    pub overall_strategy: OverallStrategy,
    pub visual_data: VisualData,
}
