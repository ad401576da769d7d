// Shared prompt fragments.
// Each module that calls the model defines its own prompts.rs alongside it;
// this file holds the pieces they have in common.

/// Persona used for every professor-authored document (homework, exams).
pub const PROFESSOR_PERSONA: &str = "Act as a Computer Science professor teaching SICP.";

/// Appended to prompts whose output must mimic a one-shot LaTeX example.
pub const MIMIC_FORMATTING_INSTRUCTION: &str = "\
**MIMIC THE FOLLOWING FORMATTING STYLE STRICTLY (Same packages, header style, colors, listings settings):**";

/// Joins a list for inline use in a prompt (`a, b, c`).
pub fn inline_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fills `{name}` placeholders in a single pass.
///
/// Substituted values are copied verbatim and never rescanned, so model text
/// containing `{week}` stays literal. Braces that do not name a known
/// placeholder (LaTeX groups, for instance) pass through untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        filled.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let substitution = values.iter().find_map(|(name, value)| {
            let after = tail.strip_prefix(name)?.strip_prefix('}')?;
            Some((*value, after))
        });
        match substitution {
            Some((value, after)) => {
                filled.push_str(value);
                rest = after;
            }
            None => {
                filled.push('{');
                rest = tail;
            }
        }
    }

    filled.push_str(rest);
    filled
}
