// All LLM prompt constants for the Assessment module.

/// Assessment prompt template.
/// Replace: {scoring_instruction}, {method}, {resume_section}, {questionnaire_section}
pub const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"You are an experienced engineering hiring manager assessing a software engineer.

{scoring_instruction}

Assess the candidate across exactly these five dimensions:
- programming: languages, frameworks, code quality
- algorithm: data structures, problem solving, complexity analysis
- project: delivery, ownership, measurable outcomes
- systemDesign: architecture, scalability, reliability trade-offs
- communication: clarity, collaboration, documentation

Use these dimension weights: programming 0.25, algorithm 0.2, project 0.25, systemDesign 0.15, communication 0.15.
overallScore MUST equal the weighted sum of dimension scores, rounded.

Return a JSON object with this EXACT schema:
{
  "overallScore": 68,
  "dimensions": {
    "programming": {
      "score": 75,
      "weight": 0.25,
      "skills": {
        "python": 80,
        "testing": {"score": 60, "confidence": 0.6, "isInferred": true}
      }
    },
    "algorithm": {"score": 60, "weight": 0.2, "skills": {}},
    "project": {"score": 72, "weight": 0.25, "skills": {}},
    "systemDesign": {"score": 55, "weight": 0.15, "skills": {}},
    "communication": {"score": 70, "weight": 0.15, "skills": {}}
  },
  "metadata": {
    "assessmentMethod": "{method}",
    "confidence": 0.8
  },
  "report": {
    "summary": "Two or three sentences.",
    "strengths": ["..."],
    "improvements": ["..."],
    "recommendations": ["..."]
  }
}

{resume_section}{questionnaire_section}"#;

pub const RESUME_SECTION_TEMPLATE: &str = "RESUME:\n{resume_text}\n\n";

pub const QUESTIONNAIRE_SECTION_TEMPLATE: &str = "QUESTIONNAIRE ANSWERS (JSON):\n{answers_json}\n\n";
