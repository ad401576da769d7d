//! Groups book subsections into teaching sections, one section per week.

/// Section key used when a subsection carries no numbering.
pub const GENERAL_SECTION: &str = "General";

/// A book section and the subsections it covers, in book order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: String,
    pub subsections: Vec<String>,
}

/// Section key of a subsection heading: "1.2.3 Orders of Growth" -> "1.2".
pub fn section_key(subsection: &str) -> String {
    let numbering = subsection.split(' ').next().unwrap_or_default();
    if numbering.is_empty() {
        return GENERAL_SECTION.to_string();
    }

    let mut parts = numbering.split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) => format!("{major}.{minor}"),
        _ => numbering.to_string(),
    }
}

/// Groups subsections by [`section_key`], keeping first-seen section order.
pub fn group_subsections<S: AsRef<str>>(subsections: &[S]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for subsection in subsections {
        let subsection = subsection.as_ref();
        let key = section_key(subsection);
        match sections.iter_mut().find(|s| s.key == key) {
            Some(section) => section.subsections.push(subsection.to_string()),
            None => sections.push(Section {
                key,
                subsections: vec![subsection.to_string()],
            }),
        }
    }
    sections
}
