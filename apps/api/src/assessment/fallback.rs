//! Heuristic fallback scorer: deterministic assessment used when the model
//! path is unavailable or its output is unusable.
//!
//! Algorithm:
//! 1. Base score 45.
//! 2. Résumé: +8 per keyword bucket with at least one hit, plus a tenure bonus
//!    from the largest "N years" mention (+10 for 1–2y, +15 for ≥3y).
//! 3. Questionnaire: +5 per answered field, at most +25.
//! 4. Clamp the base to [30, 75].
//! 5. Dimension score = round(base × multiplier), clamped to [0, 100].
//!
//! Confidence is always 0.6 so downstream consumers can tell a heuristic
//! assessment apart from a model one.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::assessment::aggregator::classify_level;
use crate::assessment::input::AssessmentInput;
use crate::assessment::messages;
use crate::assessment::score_model::{
    clamp_score, Assessment, AssessmentMetadata, AssessmentMethod, AssessmentReport, Dimension,
    DimensionAssessment, SkillScore,
};

pub const FALLBACK_BASE_SCORE: f64 = 45.0;
pub const FALLBACK_MIN_SCORE: f64 = 30.0;
pub const FALLBACK_MAX_SCORE: f64 = 75.0;
pub const FALLBACK_CONFIDENCE: f64 = 0.6;

const BUCKET_BONUS: f64 = 8.0;
const SHORT_TENURE_BONUS: f64 = 10.0;
const LONG_TENURE_BONUS: f64 = 15.0;
const QUESTIONNAIRE_FIELD_BONUS: f64 = 5.0;
const QUESTIONNAIRE_BONUS_CAP: f64 = 25.0;

// The count must not be the tail of a longer number: "2020年" is a date.
static YEARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d.])(\d{1,2})\s*\+?\s*(?:years?|yrs?|年)").expect("Invalid regex pattern")
});

struct KeywordBucket {
    name: &'static str,
    keywords: &'static [&'static str],
}

const KEYWORD_BUCKETS: &[KeywordBucket] = &[
    KeywordBucket {
        name: "languages",
        keywords: &[
            "python", "java", "javascript", "typescript", "rust", "golang", "c++", "c#", "kotlin",
            "swift", "react", "vue", "angular", "node", "spring", "django", "flask",
        ],
    },
    KeywordBucket {
        name: "algorithms",
        keywords: &[
            "algorithm", "data structure", "leetcode", "dynamic programming", "complexity",
            "算法", "数据结构",
        ],
    },
    KeywordBucket {
        name: "projects",
        keywords: &[
            "project", "developed", "implemented", "built", "shipped", "deployed", "项目",
            "负责", "开发",
        ],
    },
    KeywordBucket {
        name: "architecture",
        keywords: &[
            "architecture", "microservice", "distributed", "system design", "scalab",
            "high availability", "架构", "微服务", "分布式", "系统设计",
        ],
    },
    KeywordBucket {
        name: "experience",
        keywords: &["year", "experience", "intern", "经验", "实习", "年"],
    },
];

/// Per-dimension multipliers. Signals that shallow keyword matching reads
/// poorly (algorithms, architecture) are discounted.
pub fn multiplier(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Programming => 1.1,
        Dimension::Algorithm => 0.8,
        Dimension::Project => 0.95,
        Dimension::SystemDesign => 0.7,
        Dimension::Communication => 1.15,
    }
}

fn canonical_skills(dimension: Dimension) -> [&'static str; 2] {
    match dimension {
        Dimension::Programming => ["languageProficiency", "codeQuality"],
        Dimension::Algorithm => ["dataStructures", "problemSolving"],
        Dimension::Project => ["delivery", "ownership"],
        Dimension::SystemDesign => ["architecture", "scalability"],
        Dimension::Communication => ["writing", "collaboration"],
    }
}

/// Deterministic, non-LLM scoring. Never fails.
pub fn score_fallback(input: &AssessmentInput, assessed_at: DateTime<Utc>) -> Assessment {
    let base = base_score(input);

    let dimensions: BTreeMap<Dimension, DimensionAssessment> = Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let score = clamp_score((base * multiplier(dimension)).round());
            let skills = canonical_skills(dimension)
                .into_iter()
                .map(|name| {
                    (
                        name.to_string(),
                        SkillScore::detailed(score, FALLBACK_CONFIDENCE, true),
                    )
                })
                .collect();
            (
                dimension,
                DimensionAssessment {
                    score,
                    weight: dimension.default_weight(),
                    skills,
                },
            )
        })
        .collect();

    let report = banded_report(&dimensions, base);
    let method = input.method().unwrap_or(AssessmentMethod::Questionnaire);

    Assessment::from_dimensions(
        dimensions,
        AssessmentMetadata {
            assessment_date: assessed_at,
            assessment_method: method,
            confidence: FALLBACK_CONFIDENCE,
        },
        report,
    )
}

/// Bounded base score before dimension multipliers are applied.
pub fn base_score(input: &AssessmentInput) -> f64 {
    let mut base = FALLBACK_BASE_SCORE;

    if let Some(resume) = input.resume() {
        base += resume_bonus(&resume.to_lowercase());
    }

    let answered = input.answered_fields() as f64;
    base += (answered * QUESTIONNAIRE_FIELD_BONUS).min(QUESTIONNAIRE_BONUS_CAP);

    base.clamp(FALLBACK_MIN_SCORE, FALLBACK_MAX_SCORE)
}

fn resume_bonus(text: &str) -> f64 {
    let bucket_hits = KEYWORD_BUCKETS
        .iter()
        .filter(|bucket| bucket.keywords.iter().any(|kw| text.contains(kw)))
        .inspect(|bucket| tracing::debug!("Fallback keyword bucket hit: {}", bucket.name))
        .count();

    let tenure_bonus = match max_years(text) {
        Some(years) if years >= 3 => LONG_TENURE_BONUS,
        Some(years) if years >= 1 => SHORT_TENURE_BONUS,
        _ => 0.0,
    };

    bucket_hits as f64 * BUCKET_BONUS + tenure_bonus
}

/// Largest "N years" figure mentioned in the text.
fn max_years(text: &str) -> Option<u32> {
    YEARS_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
}

fn banded_report(dimensions: &BTreeMap<Dimension, DimensionAssessment>, base: f64) -> AssessmentReport {
    let mut strengths: Vec<String> = Vec::new();
    let mut improvements: Vec<String> = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();

    for (dimension, entry) in dimensions {
        if entry.score >= messages::STRENGTH_THRESHOLD {
            strengths.push(messages::strength(*dimension).to_string());
        }
        if entry.score < messages::IMPROVEMENT_THRESHOLD {
            improvements.push(messages::improvement(*dimension).to_string());
            recommendations.push(messages::recommendation(*dimension).to_string());
        }
    }

    // Always report at least one of each so the report is never empty.
    // Ties resolve to the earlier dimension in canonical order.
    if strengths.is_empty() {
        if let Some(best) = extreme_dimension(dimensions, true) {
            strengths.push(messages::strength(best).to_string());
        }
    }
    if improvements.is_empty() {
        if let Some(weakest) = extreme_dimension(dimensions, false) {
            improvements.push(messages::improvement(weakest).to_string());
            recommendations.push(messages::recommendation(weakest).to_string());
        }
    }

    AssessmentReport {
        summary: format!(
            "{} {}",
            messages::summary(classify_level(base)),
            messages::HEURISTIC_NOTICE
        ),
        strengths,
        improvements,
        recommendations,
    }
}

fn extreme_dimension(
    dimensions: &BTreeMap<Dimension, DimensionAssessment>,
    highest: bool,
) -> Option<Dimension> {
    let mut chosen: Option<(Dimension, f64)> = None;
    for (dimension, entry) in dimensions {
        let better = match chosen {
            None => true,
            Some((_, score)) if highest => entry.score > score,
            Some((_, score)) => entry.score < score,
        };
        if better {
            chosen = Some((*dimension, entry.score));
        }
    }
    chosen.map(|(d, _)| d)
}
