//! Text Extractor: flattens a document into the plain text sent to the model.

use super::Document;

/// Newline-joined text of the document's top-level paragraphs.
/// Empty paragraphs become empty lines; tables are not visited.
pub fn extract_text(doc: &Document) -> String {
    doc.paragraph_texts().join("\n")
}
