// Prompt constants for weekly course planning.

/// Week planning prompt. Replace `{section_key}` and `{subsections}` before sending.
/// The answer shape is enforced by `week_plan_schema()`, not by the prompt.
pub const WEEK_PLAN_PROMPT_TEMPLATE: &str = r#"Context: Generating a course plan for SICP. Section: "{section_key}"
Subsections:
{subsections}
Task: Create a 1-week lesson plan covering this section.
Plan up to three lectures (Monday, Wednesday, Friday), one homework assignment
referencing textbook exercises, and the key concepts students must master."#;
