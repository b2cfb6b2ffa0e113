//! Renders a `CategoryMap` into the final suggestion document.

use super::CategoryMap;

pub const DOCUMENT_TITLE: &str = "⭐ Personalized Health Assessment ⭐";

/// Closing sentence of every suggestion document, whatever the content.
pub const DISCLAIMER: &str = "Disclaimer: This is an AI-generated summary and not a substitute for professional medical advice. Please consult with a healthcare provider for any health concerns.";

const BULLET: &str = "• ";

/// Render categories in priority order: header, one bullet per entry, blank
/// line; empty categories are skipped; the disclaimer closes the document.
pub fn assemble(map: &CategoryMap) -> String {
    let mut doc = String::new();
    doc.push_str(DOCUMENT_TITLE);
    doc.push_str("\n\n");

    for (category, entries) in map.categories() {
        doc.push_str(category.header());
        doc.push('\n');
        for entry in entries {
            doc.push_str(BULLET);
            doc.push_str(entry);
            doc.push('\n');
        }
        doc.push('\n');
    }

    doc.push_str(DISCLAIMER);
    doc.trim().to_string()
}
