//! Markdown export of an assessment.
//!
//! Section order and heading levels are fixed: title, header list, Summary,
//! Dimension Scores (one `###` per dimension in canonical order), Strengths,
//! Areas for Improvement, Recommendations. Output is a pure function of the
//! assessment.

use std::fmt;

use chrono::SecondsFormat;

use crate::assessment::aggregator::classify_level;
use crate::assessment::score_model::{confidence_of, is_inferred, score_of, Assessment};

const NONE_NOTED: &str = "- None noted";

pub fn render_markdown(assessment: &Assessment) -> String {
    MarkdownReport(assessment).to_string()
}

struct MarkdownReport<'a>(&'a Assessment);

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assessment = self.0;
        let metadata = &assessment.metadata;
        let level = classify_level(assessment.overall_score as f64);

        writeln!(f, "# Ability Assessment Report")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Overall score:** {} / 100 ({})",
            assessment.overall_score,
            level.label()
        )?;
        writeln!(
            f,
            "- **Assessed:** {}",
            metadata
                .assessment_date
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f, "- **Method:** {}", metadata.assessment_method.as_str())?;
        writeln!(f, "- **Confidence:** {}%", percent(metadata.confidence))?;
        if assessment.is_low_confidence() {
            writeln!(f)?;
            writeln!(f, "> Low-confidence assessment: treat these scores as an estimate.")?;
        }

        writeln!(f)?;
        writeln!(f, "## Summary")?;
        writeln!(f)?;
        let summary = assessment.report.summary.trim();
        writeln!(
            f,
            "{}",
            if summary.is_empty() { "No summary provided." } else { summary }
        )?;

        writeln!(f)?;
        writeln!(f, "## Dimension Scores")?;
        for (dimension, entry) in &assessment.dimensions {
            writeln!(f)?;
            writeln!(
                f,
                "### {}: {} / 100 (weight {}%)",
                dimension.display_name(),
                entry.score.round(),
                percent(entry.weight)
            )?;
            if entry.skills.is_empty() {
                continue;
            }
            writeln!(f)?;
            for (name, skill) in &entry.skills {
                if is_inferred(skill) {
                    writeln!(
                        f,
                        "- {}: {} (inferred, confidence {}%)",
                        name,
                        score_of(skill).round(),
                        percent(confidence_of(skill))
                    )?;
                } else {
                    writeln!(f, "- {}: {}", name, score_of(skill).round())?;
                }
            }
        }

        write_list(f, "Strengths", &assessment.report.strengths)?;
        write_list(f, "Areas for Improvement", &assessment.report.improvements)?;
        write_list(f, "Recommendations", &assessment.report.recommendations)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    if items.is_empty() {
        writeln!(f, "{NONE_NOTED}")?;
    }
    for item in items {
        writeln!(f, "- {item}")?;
    }
    Ok(())
}

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fallback::score_fallback;
    use crate::assessment::input::AssessmentInput;
    use crate::plan::fixtures::sample_assessment;
    use chrono::{TimeZone, Utc};

    fn headings(markdown: &str) -> Vec<&str> {
        markdown.lines().filter(|l| l.starts_with('#')).collect()
    }

    #[test]
    fn test_section_order_and_levels() {
        let markdown = render_markdown(&sample_assessment());
        assert_eq!(
            headings(&markdown),
            vec![
                "# Ability Assessment Report",
                "## Summary",
                "## Dimension Scores",
                "### Programming: 58 / 100 (weight 25%)",
                "### Algorithms: 46 / 100 (weight 20%)",
                "### Project Experience: 60 / 100 (weight 25%)",
                "### System Design: 40 / 100 (weight 15%)",
                "### Communication: 65 / 100 (weight 15%)",
                "## Strengths",
                "## Areas for Improvement",
                "## Recommendations",
            ]
        );
    }

    #[test]
    fn test_header_and_skill_lines() {
        let markdown = render_markdown(&sample_assessment());
        assert!(markdown.contains("- **Overall score:** 54 / 100 (Intermediate)\n"));
        assert!(markdown.contains("- **Assessed:** 2026-02-02T10:00:00Z\n"));
        assert!(markdown.contains("- **Method:** resume\n"));
        assert!(markdown.contains("- rust: 70\n"));
        assert!(markdown.contains("- dp: 30 (inferred, confidence 50%)\n"));
        assert!(markdown.contains("No summary provided."));
        assert!(markdown.contains("## Strengths\n\n- None noted\n"));
        assert!(!markdown.contains("Low-confidence"));
    }

    #[test]
    fn test_fallback_report_is_flagged_and_deterministic() {
        let at = Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap();
        let assessment = score_fallback(&AssessmentInput::from_resume("python, 2 years"), at);
        let markdown = render_markdown(&assessment);
        assert!(markdown.contains("> Low-confidence assessment"));
        assert!(markdown.contains("- **Confidence:** 60%"));
        assert!(markdown.contains("estimated assessment"));
        assert_eq!(markdown, render_markdown(&assessment));
    }

    #[test]
    fn test_empty_sections_fall_back_and_end_the_document() {
        let markdown = render_markdown(&sample_assessment());
        assert!(markdown.contains("## Summary\n\nNo summary provided.\n"));
        assert!(markdown.ends_with("## Recommendations\n\n- None noted\n"));
        assert_eq!(markdown.matches(NONE_NOTED).count(), 3);
    }
}
