// Prompt templates for homework, autograder tests and exams.
// Placeholders in `{braces}` are filled by `fill_template` in one pass,
// so LaTeX braces in the templates pass through untouched.

/// Homework prompt. Placeholders: `{persona}`, `{topics}`, `{exercises}`,
/// `{description}`, `{week}`, `{mimic}`, `{example}`.
pub const HOMEWORK_PROMPT_TEMPLATE: &str = r#"{persona}
Generate a COMPLETE LaTeX document (including preamble, \begin{document}, and \end{document}) for a Scheme programming assignment.

Topics: {topics}
Textbook Exercises: {exercises}
Description: {description}

Format requirements:
- Use clean LaTeX.
- Include 3-4 distinct problems that require writing Scheme code.
- {mimic}
- Do not include extraneous information such as name, date, or student ID.
- Do not include a due date.
- The title of the homework should be "Homework {week}"

{example}"#;

/// Autograder prompt. Placeholders: `{topics}`, `{week}`.
pub const TEST_PROMPT_TEMPLATE: &str = r#"Act as a QA Engineer for a Scheme course.
Create a Scheme test file to verify the homework concepts for this week.

Topics: {topics}

Requirements:
1. The test file MUST load the student solution: `(load "solution_week_{week}.scm")`.
2. It MUST define simple test cases using standard Scheme comparisons.
3. It MUST print "PASS: <testname>" or "FAIL: <testname>".
4. CRITICAL: If any test fails, the script MUST exit with `(exit 1)`. If all pass, `(exit 0)`.

STRICT FORMATTING RULES:
- Return ONLY the Scheme code.
- Do NOT use markdown code blocks (no backticks).
- Do NOT include comments saying "Assume solution exists" or "Placeholder functions".
- Do NOT use Python comments (#) or file extensions (.py). Use Scheme comments (;).
- Assume `solution_week_{week}.scm` is the ONLY source of truth for the function implementations."#;

/// Exam prompt. Placeholders: `{persona}`, `{title}`, `{topics}`, `{mimic}`, `{example}`.
pub const EXAM_PROMPT_TEMPLATE: &str = r#"{persona}
Generate a COMPLETE LaTeX document for a {title}.

Topics Covered: {topics}... (list truncated)

Requirements:
- 5 conceptual questions about Scheme / Lisp.
- 2 coding questions (write Scheme code on paper).
- Formal academic tone.
- {mimic}

{example}"#;
