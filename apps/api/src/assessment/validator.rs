//! Structure validation: turns parsed model JSON into an `Assessment`.
//!
//! Required: `overallScore`, `dimensions`, `metadata`. Everything else is
//! defaulted. Missing dimensions are synthesized at score 0 with their
//! canonical weight so partial output degrades instead of failing. Clamps and
//! coercions are silent corrections, logged at debug.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::assessment::aggregator::{weights_are_normalized, WEIGHT_TOLERANCE};
use crate::assessment::score_model::{
    clamp_confidence, clamp_score, score_of, Assessment, AssessmentMetadata, AssessmentMethod,
    AssessmentReport, Dimension, DimensionAssessment, SkillScore,
};

/// Confidence assumed when the model omits `metadata.confidence`.
pub const DEFAULT_MODEL_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is malformed: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("no usable goals in payload")]
    NoUsableGoals,
}

/// Values the pipeline owns rather than the model: when and how the
/// assessment was taken.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentContext {
    pub assessed_at: DateTime<Utc>,
    pub method: AssessmentMethod,
}

pub fn validate_assessment(
    raw: &Value,
    context: &AssessmentContext,
) -> Result<Assessment, ValidationError> {
    let obj = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let overall_raw = obj
        .get("overallScore")
        .ok_or(ValidationError::MissingField("overallScore"))?;
    let dimensions_raw = obj
        .get("dimensions")
        .ok_or(ValidationError::MissingField("dimensions"))?
        .as_object()
        .ok_or(ValidationError::InvalidField {
            field: "dimensions",
            reason: "expected an object keyed by dimension",
        })?;
    let metadata_raw = obj
        .get("metadata")
        .ok_or(ValidationError::MissingField("metadata"))?;

    let dimensions = validate_dimensions(dimensions_raw);
    let metadata = validate_metadata(metadata_raw, context);
    let report = validate_report(obj.get("report"));

    let assessment = Assessment::from_dimensions(dimensions, metadata, report);

    match overall_raw.as_f64() {
        Some(claimed) => {
            let claimed = clamp_score(claimed).round() as u32;
            if claimed != assessment.overall_score {
                debug!(
                    "Model overallScore {} disagrees with weighted sum {}; using weighted sum",
                    claimed, assessment.overall_score
                );
            }
        }
        None => debug!(
            "overallScore not numeric; recomputed as {}",
            assessment.overall_score
        ),
    }

    Ok(assessment)
}

fn validate_dimensions(raw: &Map<String, Value>) -> BTreeMap<Dimension, DimensionAssessment> {
    for key in raw.keys() {
        if Dimension::from_key(key).is_none() {
            debug!("Ignoring unknown dimension '{key}'");
        }
    }

    let mut present = BTreeMap::new();
    let mut synthesized = Vec::new();

    for dimension in Dimension::ALL {
        match raw.get(dimension.key()).and_then(Value::as_object) {
            Some(entry) => {
                present.insert(dimension, validate_dimension(dimension, entry));
            }
            None => {
                debug!(
                    "Dimension '{}' missing; synthesizing default",
                    dimension.key()
                );
                synthesized.push(dimension);
            }
        }
    }

    normalize_weights(&mut present, &synthesized);

    for dimension in synthesized {
        present.insert(dimension, DimensionAssessment::empty(dimension));
    }
    if !weights_are_normalized(&present) {
        debug!("Dimension weights still off after rescaling; overall uses them as given");
    }
    present
}

fn validate_dimension(dimension: Dimension, entry: &Map<String, Value>) -> DimensionAssessment {
    let skills: BTreeMap<String, SkillScore> = entry
        .get("skills")
        .and_then(Value::as_object)
        .map(|skills| {
            skills
                .iter()
                .map(|(name, value)| (name.clone(), coerce_skill(name, value)))
                .collect()
        })
        .unwrap_or_default();

    let score = match entry.get("score").and_then(Value::as_f64) {
        Some(score) => clamped_score(dimension.key(), score),
        None if !skills.is_empty() => {
            let mean = skills.values().map(score_of).sum::<f64>() / skills.len() as f64;
            debug!(
                "Dimension '{}' has no score; using skill mean {:.1}",
                dimension.key(),
                mean
            );
            mean.round()
        }
        None => 0.0,
    };

    let weight = entry
        .get("weight")
        .and_then(Value::as_f64)
        .map(|w| w.clamp(0.0, 1.0))
        .unwrap_or_else(|| dimension.default_weight());

    DimensionAssessment {
        score,
        weight,
        skills,
    }
}

/// Bare numbers and `{score, confidence, isInferred}` objects are accepted;
/// any other shape becomes a zero score.
fn coerce_skill(name: &str, value: &Value) -> SkillScore {
    match value {
        Value::Number(n) => SkillScore::bare(clamped_score(name, n.as_f64().unwrap_or(0.0))),
        Value::Object(obj) => match obj.get("score").and_then(Value::as_f64) {
            Some(score) => {
                let confidence = obj.get("confidence").and_then(Value::as_f64).unwrap_or(1.0);
                if !(0.0..=1.0).contains(&confidence) {
                    debug!("Clamped confidence {confidence} for skill '{name}'");
                }
                let is_inferred = obj
                    .get("isInferred")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                SkillScore::detailed(clamped_score(name, score), confidence, is_inferred)
            }
            None => {
                debug!("Skill '{name}' object has no numeric score; coerced to 0");
                SkillScore::bare(0.0)
            }
        },
        other => {
            debug!("Skill '{name}' has unsupported value {other}; coerced to 0");
            SkillScore::bare(0.0)
        }
    }
}

fn clamped_score(label: &str, score: f64) -> f64 {
    let clamped = clamp_score(score);
    if clamped != score {
        debug!("Clamped score {score} for '{label}' to {clamped}");
    }
    clamped
}

/// Scales the weights of model-supplied dimensions so that, together with the
/// canonical weights of synthesized ones, all five sum to 1.0.
fn normalize_weights(
    present: &mut BTreeMap<Dimension, DimensionAssessment>,
    synthesized: &[Dimension],
) {
    if present.is_empty() {
        return;
    }
    let reserved: f64 = synthesized.iter().map(|d| d.default_weight()).sum();
    let available = 1.0 - reserved;
    let present_sum: f64 = present.values().map(|d| d.weight).sum();

    if present_sum <= 0.0 {
        let default_sum: f64 = present.keys().map(|d| d.default_weight()).sum();
        for (dimension, entry) in present.iter_mut() {
            entry.weight = dimension.default_weight() / default_sum * available;
        }
        debug!("All supplied weights were zero; using canonical weights");
        return;
    }

    if (present_sum - available).abs() > WEIGHT_TOLERANCE {
        debug!("Rescaling dimension weights (sum {present_sum:.4}, expected {available:.4})");
        let factor = available / present_sum;
        for entry in present.values_mut() {
            entry.weight *= factor;
        }
    }
}

fn validate_metadata(raw: &Value, context: &AssessmentContext) -> AssessmentMetadata {
    let confidence = match raw.get("confidence").and_then(Value::as_f64) {
        Some(c) => {
            let clamped = clamp_confidence(c);
            if clamped != c {
                debug!("Clamped assessment confidence {c} to {clamped}");
            }
            clamped
        }
        None => DEFAULT_MODEL_CONFIDENCE,
    };

    AssessmentMetadata {
        assessment_date: context.assessed_at,
        assessment_method: context.method,
        confidence,
    }
}

fn validate_report(raw: Option<&Value>) -> AssessmentReport {
    let Some(raw) = raw else {
        return AssessmentReport::default();
    };
    AssessmentReport {
        summary: raw
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        strengths: string_list(raw.get("strengths")),
        improvements: string_list(raw.get("improvements")),
        recommendations: string_list(raw.get("recommendations")),
    }
}

pub(crate) fn string_list(raw: Option<&Value>) -> Vec<String> {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
