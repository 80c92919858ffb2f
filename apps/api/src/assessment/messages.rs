// Fixed, score-banded report text for heuristic assessments.
// Kept static so fallback output is byte-for-byte reproducible.

use crate::assessment::aggregator::SkillLevel;
use crate::assessment::score_model::Dimension;

/// Dimension scores at or above this are reported as strengths.
pub const STRENGTH_THRESHOLD: f64 = 65.0;
/// Dimension scores below this are reported as improvement areas.
pub const IMPROVEMENT_THRESHOLD: f64 = 55.0;

pub const HEURISTIC_NOTICE: &str = "This is an estimated assessment produced without AI analysis. \
    Scores are bounded and should be treated as a starting point; re-run the assessment for a detailed review.";

pub fn strength(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Programming => {
            "Hands-on experience with mainstream languages and frameworks"
        }
        Dimension::Algorithm => "Familiarity with core data structures and algorithmic thinking",
        Dimension::Project => "Track record of delivering concrete projects",
        Dimension::SystemDesign => "Exposure to architecture and distributed system concerns",
        Dimension::Communication => "Clearly structured description of experience and impact",
    }
}

pub fn improvement(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Programming => "Deepen proficiency in at least one primary language",
        Dimension::Algorithm => "Strengthen algorithms and data-structure fundamentals",
        Dimension::Project => "Build more end-to-end project experience with measurable outcomes",
        Dimension::SystemDesign => "Develop system design skills: scalability, reliability, trade-offs",
        Dimension::Communication => "Practice presenting technical work concisely to different audiences",
    }
}

pub fn recommendation(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Programming => {
            "Complete a language-focused course and refactor an existing project for idiomatic style"
        }
        Dimension::Algorithm => "Solve three algorithm problems per week, rotating topics",
        Dimension::Project => "Ship a small full-stack project and document its results",
        Dimension::SystemDesign => {
            "Study one classic system design case per week and sketch your own design"
        }
        Dimension::Communication => {
            "Write a short technical blog post or give a team talk each month"
        }
    }
}

pub fn summary(level: SkillLevel) -> &'static str {
    match level {
        SkillLevel::Novice => "Early-stage profile with limited evidence of technical experience.",
        SkillLevel::Beginner => "Foundational skills are present; broad room for growth remains.",
        SkillLevel::Intermediate => {
            "Solid working foundation with several areas ready to deepen."
        }
        SkillLevel::Advanced => "Strong, well-rounded profile with a few areas to refine.",
        SkillLevel::Expert => "Extensive experience across most competency areas.",
    }
}
