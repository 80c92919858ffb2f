//! Score model: skill scores, dimensions, and the assessment record.
//!
//! `SkillScore` hides its two wire shapes (bare number or
//! `{score, confidence, isInferred}`) behind `score_of`, `confidence_of` and
//! `is_inferred`. Nothing else in the crate reads a skill value directly.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Confidence below this marks a skill as inferred regardless of its flag.
pub const INFERRED_CONFIDENCE_THRESHOLD: f64 = 0.7;

const FINGERPRINT_DIGEST_LEN: usize = 16;

// ────────────────────────────────────────────────────────────────────────────
// Dimensions
// ────────────────────────────────────────────────────────────────────────────

/// The five fixed competency dimensions. Declaration order is the canonical
/// iteration order for every map keyed by `Dimension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Programming,
    Algorithm,
    Project,
    SystemDesign,
    Communication,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Programming,
        Dimension::Algorithm,
        Dimension::Project,
        Dimension::SystemDesign,
        Dimension::Communication,
    ];

    /// Wire key, as used in LLM payloads and persisted JSON.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Programming => "programming",
            Dimension::Algorithm => "algorithm",
            Dimension::Project => "project",
            Dimension::SystemDesign => "systemDesign",
            Dimension::Communication => "communication",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::Programming => "Programming",
            Dimension::Algorithm => "Algorithms",
            Dimension::Project => "Project Experience",
            Dimension::SystemDesign => "System Design",
            Dimension::Communication => "Communication",
        }
    }

    /// Canonical weight. The five weights sum to 1.0.
    pub fn default_weight(self) -> f64 {
        match self {
            Dimension::Programming => 0.25,
            Dimension::Algorithm => 0.20,
            Dimension::Project => 0.25,
            Dimension::SystemDesign => 0.15,
            Dimension::Communication => 0.15,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SkillScore
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Repr {
    Bare(f64),
    Detailed {
        score: f64,
        confidence: f64,
        is_inferred: bool,
    },
}

/// A single skill score. Construct with `bare` or `detailed`; read with the
/// free accessor functions below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillScore(Repr);

impl SkillScore {
    /// Bare numeric score; implicitly full confidence and never inferred.
    pub fn bare(score: f64) -> Self {
        SkillScore(Repr::Bare(clamp_score(score)))
    }

    pub fn detailed(score: f64, confidence: f64, is_inferred: bool) -> Self {
        SkillScore(Repr::Detailed {
            score: clamp_score(score),
            confidence: clamp_confidence(confidence),
            is_inferred,
        })
    }
}

pub fn score_of(skill: &SkillScore) -> f64 {
    match skill.0 {
        Repr::Bare(score) => score,
        Repr::Detailed { score, .. } => score,
    }
}

pub fn confidence_of(skill: &SkillScore) -> f64 {
    match skill.0 {
        Repr::Bare(_) => 1.0,
        Repr::Detailed { confidence, .. } => confidence,
    }
}

/// Object-form skills are inferred when flagged or when their confidence is
/// below `INFERRED_CONFIDENCE_THRESHOLD`. Bare numbers never are.
pub fn is_inferred(skill: &SkillScore) -> bool {
    match skill.0 {
        Repr::Bare(_) => false,
        Repr::Detailed {
            confidence,
            is_inferred,
            ..
        } => is_inferred || confidence < INFERRED_CONFIDENCE_THRESHOLD,
    }
}

impl Serialize for SkillScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Repr::Bare(score) => serializer.serialize_f64(score),
            Repr::Detailed {
                score,
                confidence,
                is_inferred,
            } => {
                let mut state = serializer.serialize_struct("SkillScore", 3)?;
                state.serialize_field("score", &score)?;
                state.serialize_field("confidence", &confidence)?;
                state.serialize_field("isInferred", &is_inferred)?;
                state.end()
            }
        }
    }
}

fn full_confidence() -> f64 {
    1.0
}

impl<'de> Deserialize<'de> for SkillScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bare(f64),
            Detailed {
                score: f64,
                #[serde(default = "full_confidence")]
                confidence: f64,
                #[serde(rename = "isInferred", default)]
                is_inferred: bool,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Bare(score) => SkillScore::bare(score),
            Wire::Detailed {
                score,
                confidence,
                is_inferred,
            } => SkillScore::detailed(score, confidence, is_inferred),
        })
    }
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Assessment
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAssessment {
    pub score: f64,
    pub weight: f64,
    #[serde(default)]
    pub skills: BTreeMap<String, SkillScore>,
}

impl DimensionAssessment {
    /// Placeholder for a dimension the model omitted.
    pub fn empty(dimension: Dimension) -> Self {
        Self {
            score: 0.0,
            weight: dimension.default_weight(),
            skills: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentMethod {
    Resume,
    Questionnaire,
    Mixed,
}

impl AssessmentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentMethod::Resume => "resume",
            AssessmentMethod::Questionnaire => "questionnaire",
            AssessmentMethod::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMetadata {
    pub assessment_date: DateTime<Utc>,
    pub assessment_method: AssessmentMethod,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A complete skill assessment. Superseded by re-assessment, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub overall_score: u32,
    pub dimensions: BTreeMap<Dimension, DimensionAssessment>,
    pub metadata: AssessmentMetadata,
    pub report: AssessmentReport,
}

impl Assessment {
    /// Builds an assessment whose overall score is derived from `dimensions`.
    pub fn from_dimensions(
        dimensions: BTreeMap<Dimension, DimensionAssessment>,
        metadata: AssessmentMetadata,
        report: AssessmentReport,
    ) -> Self {
        let overall_score = crate::assessment::aggregator::aggregate(&dimensions);
        Self {
            overall_score,
            dimensions,
            metadata,
            report,
        }
    }

    /// Stable cache key for plans derived from this assessment:
    /// `"{overallScore}:{date}:{digest}"`, where the digest covers the full
    /// serialized record so two assessments only share a key when they match.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(self).unwrap_or_default());
        let digest = format!("{:x}", hasher.finalize());
        format!(
            "{}:{}:{}",
            self.overall_score,
            self.metadata
                .assessment_date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            &digest[..FINGERPRINT_DIGEST_LEN]
        )
    }

    /// True when the assessment came from the heuristic scorer or otherwise
    /// carries low confidence.
    pub fn is_low_confidence(&self) -> bool {
        self.metadata.confidence < INFERRED_CONFIDENCE_THRESHOLD
    }
}
