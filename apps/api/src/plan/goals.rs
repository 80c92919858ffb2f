//! Goal synthesis: clusters gaps by dimension, turns the top clusters into
//! short- and medium-term goals, and lays out a study path per goal.

use std::collections::BTreeMap;

use crate::assessment::score_model::{score_of, Assessment, Dimension};
use crate::plan::deriver::PlanPolicy;
use crate::plan::gaps::estimated_weeks;
use crate::plan::model::{
    GeneratedGoal, GeneratedPath, GeneratedPathNode, GoalTerm, Milestone, PathNodeType, SkillGap,
};

/// Clusters that receive goals.
const TOP_CLUSTERS: usize = 2;

const SHORT_TERM_MIN_WEEKS: u32 = 1;
const SHORT_TERM_MAX_WEEKS: u32 = 4;
const MEDIUM_TERM_MIN_WEEKS: u32 = 5;
const MEDIUM_TERM_MAX_WEEKS: u32 = 12;

const SHORT_TERM_SKILLS: usize = 3;
const MEDIUM_TERM_SKILLS: usize = 5;

/// Used when every skill already meets the target.
const STRETCH_SHORT_WEEKS: u32 = 2;
const STRETCH_MEDIUM_WEEKS: u32 = 6;

const STUDY_HOURS_PER_WEEK: u32 = 5;
const WEEKS_PER_NODE: u32 = 2;

const NODE_CYCLE: [PathNodeType; 4] = [
    PathNodeType::Foundation,
    PathNodeType::Practice,
    PathNodeType::Project,
    PathNodeType::Review,
];

/// Gaps grouped under one dimension. `gaps` keeps the caller's order.
#[derive(Debug)]
pub struct GapCluster<'a> {
    pub dimension: Dimension,
    pub gaps: Vec<&'a SkillGap>,
    pub total_gap: f64,
}

#[derive(Debug, Default)]
pub struct GoalSet {
    pub short_term: Vec<GeneratedGoal>,
    pub medium_term: Vec<GeneratedGoal>,
}

/// Ranked by summed gap, largest first; ties by canonical dimension order.
pub fn cluster_gaps(sorted_gaps: &[SkillGap]) -> Vec<GapCluster<'_>> {
    let mut by_dimension: BTreeMap<Dimension, Vec<&SkillGap>> = BTreeMap::new();
    for gap in sorted_gaps {
        by_dimension.entry(gap.dimension).or_default().push(gap);
    }

    let mut clusters: Vec<GapCluster<'_>> = by_dimension
        .into_iter()
        .map(|(dimension, gaps)| {
            let total_gap = gaps.iter().map(|g| g.gap).sum();
            GapCluster {
                dimension,
                gaps,
                total_gap,
            }
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.total_gap
            .total_cmp(&a.total_gap)
            .then_with(|| a.dimension.cmp(&b.dimension))
    });
    clusters
}

pub fn synthesize_goals(
    assessment: &Assessment,
    sorted_gaps: &[SkillGap],
    target_score: f64,
    policy: &PlanPolicy,
) -> GoalSet {
    let clusters = cluster_gaps(sorted_gaps);
    if clusters.is_empty() {
        return stretch_goals(assessment, policy);
    }

    let mut goals = GoalSet::default();
    for cluster in clusters.iter().take(TOP_CLUSTERS) {
        let cluster_weeks = estimated_weeks(cluster.total_gap, policy);

        let weeks = cluster_weeks.clamp(SHORT_TERM_MIN_WEEKS, SHORT_TERM_MAX_WEEKS);
        let focus: Vec<&SkillGap> = cluster.gaps.iter().take(SHORT_TERM_SKILLS).copied().collect();
        let current = mean(focus.iter().map(|g| g.current_score));
        let short_target = (current + weeks as f64 * policy.points_per_week)
            .min(target_score)
            .round();
        goals.short_term.push(make_goal(
            GoalTerm::ShortTerm,
            cluster.dimension,
            skill_names(&focus),
            current,
            short_target,
            weeks,
        ));

        let weeks = cluster_weeks.clamp(MEDIUM_TERM_MIN_WEEKS, MEDIUM_TERM_MAX_WEEKS);
        let focus: Vec<&SkillGap> = cluster.gaps.iter().take(MEDIUM_TERM_SKILLS).copied().collect();
        let current = mean(focus.iter().map(|g| g.current_score));
        goals.medium_term.push(make_goal(
            GoalTerm::MediumTerm,
            cluster.dimension,
            skill_names(&focus),
            current,
            target_score,
            weeks,
        ));
    }
    goals
}

/// Everything meets the target: keep improving the weakest dimension.
fn stretch_goals(assessment: &Assessment, policy: &PlanPolicy) -> GoalSet {
    let Some((dimension, entry)) = assessment
        .dimensions
        .iter()
        .min_by(|a, b| a.1.score.total_cmp(&b.1.score))
    else {
        return GoalSet::default();
    };

    let skills: Vec<String> = if entry.skills.is_empty() {
        vec![dimension.key().to_string()]
    } else {
        let mut ranked: Vec<(&String, f64)> =
            entry.skills.iter().map(|(k, s)| (k, score_of(s))).collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(MEDIUM_TERM_SKILLS)
            .map(|(k, _)| k.clone())
            .collect()
    };

    let stretch = |weeks: u32| (entry.score + weeks as f64 * policy.points_per_week).min(100.0).round();

    GoalSet {
        short_term: vec![make_goal(
            GoalTerm::ShortTerm,
            *dimension,
            skills.iter().take(SHORT_TERM_SKILLS).cloned().collect(),
            entry.score,
            stretch(STRETCH_SHORT_WEEKS),
            STRETCH_SHORT_WEEKS,
        )],
        medium_term: vec![make_goal(
            GoalTerm::MediumTerm,
            *dimension,
            skills,
            entry.score,
            stretch(STRETCH_MEDIUM_WEEKS),
            STRETCH_MEDIUM_WEEKS,
        )],
    }
}

fn make_goal(
    term: GoalTerm,
    dimension: Dimension,
    target_skills: Vec<String>,
    current_score: f64,
    target_score: f64,
    weeks: u32,
) -> GeneratedGoal {
    let id = goal_id(term, dimension);
    let (title, description) = match term {
        GoalTerm::ShortTerm => (
            format!(
                "Strengthen {}: {}",
                dimension.display_name(),
                target_skills.join(", ")
            ),
            format!(
                "Lift {} from about {:.0} to {:.0} within {} week(s) of focused practice.",
                target_skills.join(", "),
                current_score,
                target_score,
                weeks
            ),
        ),
        GoalTerm::MediumTerm => (
            format!("Close the {} gap", dimension.display_name()),
            format!(
                "Bring {} skills to {:.0} over {} weeks by combining study with applied work.",
                dimension.display_name(),
                target_score,
                weeks
            ),
        ),
    };
    let path = build_path(&id, &target_skills, weeks);

    GeneratedGoal {
        id,
        term,
        title,
        description,
        dimension,
        target_skills,
        target_score,
        estimated_weeks: weeks,
        path,
    }
}

pub fn goal_id(term: GoalTerm, dimension: Dimension) -> String {
    let prefix = match term {
        GoalTerm::ShortTerm => "short-term",
        GoalTerm::MediumTerm => "medium-term",
    };
    format!("{prefix}-{}", dimension.key())
}

/// One node per two weeks (at least one). Node types cycle
/// Foundation → Practice → Project → Review; skills rotate the same way.
pub fn build_path(goal_id: &str, skills: &[String], weeks: u32) -> GeneratedPath {
    let node_count = weeks.div_ceil(WEEKS_PER_NODE).max(1);
    let total_hours = (weeks * STUDY_HOURS_PER_WEEK) as f64;
    let hours_per_node = (total_hours / node_count as f64 * 10.0).round() / 10.0;

    let nodes = (0..node_count)
        .map(|i| {
            let node_type = NODE_CYCLE[i as usize % NODE_CYCLE.len()];
            let skill = skills
                .get(i as usize % skills.len().max(1))
                .cloned()
                .unwrap_or_default();
            GeneratedPathNode {
                id: format!("{goal_id}-node-{}", i + 1),
                order: i + 1,
                title: format!("{}: {}", node_type.label(), skill),
                description: node_description(node_type, &skill),
                node_type,
                skill,
                estimated_hours: hours_per_node,
            }
        })
        .collect();

    GeneratedPath { nodes, total_hours }
}

fn node_description(node_type: PathNodeType, skill: &str) -> String {
    match node_type {
        PathNodeType::Foundation => format!("Review the core concepts of {skill} and fill knowledge gaps."),
        PathNodeType::Practice => format!("Work through targeted exercises on {skill}."),
        PathNodeType::Project => format!("Apply {skill} in a small end-to-end project."),
        PathNodeType::Review => format!("Check progress on {skill} and adjust the next steps."),
    }
}

/// One milestone at the end week of each goal, ordered by week then goal id.
pub fn build_milestones<'a>(goals: impl IntoIterator<Item = &'a GeneratedGoal>) -> Vec<Milestone> {
    let mut milestones: Vec<Milestone> = goals
        .into_iter()
        .map(|goal| Milestone {
            week: goal.estimated_weeks,
            goal_id: goal.id.clone(),
            title: format!("Week {}: {}", goal.estimated_weeks, goal.title),
            criteria: format!(
                "{} reach a score of {:.0}",
                goal.target_skills.join(", "),
                goal.target_score
            ),
        })
        .collect();
    milestones.sort_by(|a, b| a.week.cmp(&b.week).then_with(|| a.goal_id.cmp(&b.goal_id)));
    milestones
}

fn skill_names(gaps: &[&SkillGap]) -> Vec<String> {
    gaps.iter().map(|g| g.skill.clone()).collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::fixtures::{sample_assessment, uniform_assessment};
    use crate::plan::gaps::{compute_skill_gaps, sort_skill_gaps};

    fn sorted_gaps(assessment: &Assessment, target: f64) -> Vec<SkillGap> {
        let mut gaps = compute_skill_gaps(assessment, target, &PlanPolicy::default());
        sort_skill_gaps(&mut gaps);
        gaps
    }

    #[test]
    fn test_clusters_ranked_by_total_gap() {
        let gaps = sorted_gaps(&sample_assessment(), 61.0);
        let clusters = cluster_gaps(&gaps);
        let ranked: Vec<(Dimension, f64)> =
            clusters.iter().map(|c| (c.dimension, c.total_gap)).collect();
        assert_eq!(
            ranked,
            vec![
                (Dimension::Algorithm, 46.0),
                (Dimension::SystemDesign, 21.0),
                (Dimension::Programming, 15.0),
                (Dimension::Project, 1.0),
            ]
        );
        let algorithm: Vec<&str> = clusters[0].gaps.iter().map(|g| g.skill.as_str()).collect();
        assert_eq!(algorithm, vec!["dp", "graphs"]);
    }

    #[test]
    fn test_top_two_clusters_get_goals() {
        let assessment = sample_assessment();
        let gaps = sorted_gaps(&assessment, 61.0);
        let goals = synthesize_goals(&assessment, &gaps, 61.0, &PlanPolicy::default());

        assert_eq!(goals.short_term.len(), 2);
        assert_eq!(goals.medium_term.len(), 2);

        let short = &goals.short_term[0];
        assert_eq!(short.id, "short-term-algorithm");
        assert_eq!(short.target_skills, vec!["dp", "graphs"]);
        assert_eq!(short.estimated_weeks, 4);
        // mean(30, 46) + 4 weeks × 5 points
        assert_eq!(short.target_score, 58.0);

        let medium = &goals.medium_term[0];
        assert_eq!(medium.estimated_weeks, 10);
        assert_eq!(medium.target_score, 61.0);

        let design = &goals.medium_term[1];
        assert_eq!(design.dimension, Dimension::SystemDesign);
        assert_eq!(design.target_skills, vec!["systemDesign"]);
        assert_eq!(design.estimated_weeks, 5);
        assert_eq!(goals.short_term[1].target_score, 60.0);
    }

    #[test]
    fn test_goal_weeks_stay_in_term_bounds() {
        let assessment = sample_assessment();
        let gaps = sorted_gaps(&assessment, 61.0);
        let goals = synthesize_goals(&assessment, &gaps, 61.0, &PlanPolicy::default());
        for goal in &goals.short_term {
            assert!((1..=4).contains(&goal.estimated_weeks));
        }
        for goal in &goals.medium_term {
            assert!((5..=12).contains(&goal.estimated_weeks));
        }
    }

    #[test]
    fn test_no_gaps_yields_stretch_goals_for_weakest_dimension() {
        let assessment = uniform_assessment(90.0);
        let goals = synthesize_goals(&assessment, &[], 100.0, &PlanPolicy::default());

        assert_eq!(goals.short_term.len(), 1);
        assert_eq!(goals.medium_term.len(), 1);
        // ties resolve to the first dimension in canonical order
        assert_eq!(goals.short_term[0].dimension, Dimension::Programming);
        assert_eq!(goals.short_term[0].estimated_weeks, 2);
        assert_eq!(goals.short_term[0].target_score, 100.0);
        assert_eq!(goals.medium_term[0].estimated_weeks, 6);
        assert_eq!(goals.medium_term[0].target_skills, vec!["programming"]);
    }

    #[test]
    fn test_path_node_layout() {
        let skills = vec!["dp".to_string(), "graphs".to_string()];
        let path = build_path("g", &skills, 10);
        assert_eq!(path.nodes.len(), 5);
        assert_eq!(path.total_hours, 50.0);

        let types: Vec<PathNodeType> = path.nodes.iter().map(|n| n.node_type).collect();
        assert_eq!(
            types,
            vec![
                PathNodeType::Foundation,
                PathNodeType::Practice,
                PathNodeType::Project,
                PathNodeType::Review,
                PathNodeType::Foundation,
            ]
        );
        let rotation: Vec<&str> = path.nodes.iter().map(|n| n.skill.as_str()).collect();
        assert_eq!(rotation, vec!["dp", "graphs", "dp", "graphs", "dp"]);
        assert!(path.nodes.iter().all(|n| n.estimated_hours == 10.0));
        assert_eq!(path.nodes[2].id, "g-node-3");
    }

    #[test]
    fn test_odd_week_count_rounds_nodes_up() {
        let path = build_path("g", &["x".to_string()], 5);
        assert_eq!(path.nodes.len(), 3);
        assert_eq!(path.nodes[0].estimated_hours, 8.3);
        assert_eq!(path.total_hours, 25.0);

        let single = build_path("g", &["x".to_string()], 1);
        assert_eq!(single.nodes.len(), 1);
    }

    #[test]
    fn test_milestones_follow_goal_end_weeks() {
        let assessment = sample_assessment();
        let gaps = sorted_gaps(&assessment, 61.0);
        let goals = synthesize_goals(&assessment, &gaps, 61.0, &PlanPolicy::default());
        let milestones = build_milestones(goals.short_term.iter().chain(&goals.medium_term));

        let order: Vec<(u32, &str)> = milestones
            .iter()
            .map(|m| (m.week, m.goal_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (4, "short-term-algorithm"),
                (4, "short-term-systemDesign"),
                (5, "medium-term-systemDesign"),
                (10, "medium-term-algorithm"),
            ]
        );
    }
}
