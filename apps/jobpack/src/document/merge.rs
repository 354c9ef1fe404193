//! Appends a job description to a prompt document.

use std::path::Path;

use docx_rs::{BreakType, Paragraph, Run};
use tracing::info;

use super::{styled_run, Document};
use crate::errors::PipelineError;

/// Heading inserted between the prompt and the appended job description.
pub const JOB_DESCRIPTION_HEADING: &str = "Job Description";

/// Extends `base` with a page break, a level-1 "Job Description" heading, and
/// every paragraph of `supplement`.
///
/// Only bold/italic/underline survive on the copied runs. Paragraph alignment,
/// fonts and any tables in the supplement are dropped.
pub fn merge_documents(mut base: Document, supplement: &Document) -> Document {
    // The page break rides in the heading paragraph so no blank line appears
    // between the prompt text and the heading.
    base.push_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_break(BreakType::Page))
            .add_run(Run::new().add_text(JOB_DESCRIPTION_HEADING))
            .style("Heading1"),
    );

    for runs in supplement.paragraph_runs() {
        let paragraph = runs
            .iter()
            .fold(Paragraph::new(), |p, run| p.add_run(styled_run(run)));
        base.push_paragraph(paragraph);
    }

    base
}

/// Loads both documents fresh from disk, merges them, and saves the result to
/// `output_path`. Missing inputs fail before anything is written.
pub fn merge_files(
    base_path: &Path,
    supplement_path: &Path,
    output_path: &Path,
) -> Result<Document, PipelineError> {
    for (kind, path) in [("Prompt", base_path), ("Job description", supplement_path)] {
        if !path.exists() {
            return Err(PipelineError::MissingInput {
                kind,
                path: path.to_path_buf(),
            });
        }
    }

    info!("Loading prompt document {}", base_path.display());
    let base = Document::load(base_path)?;
    info!("Loading job description {}", supplement_path.display());
    let supplement = Document::load(supplement_path)?;

    let merged = merge_documents(base, &supplement);
    merged.save(output_path)?;
    info!("Merged document saved to {}", output_path.display());
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::extract::extract_text;
    use crate::document::{text_paragraph, RunStyle, StyledRun};

    fn doc_with(texts: &[&str]) -> Document {
        let mut doc = Document::new();
        for t in texts {
            doc.push_paragraph(text_paragraph(t));
        }
        doc
    }

    #[test]
    fn test_merged_text_is_base_then_heading_then_supplement() {
        let base = doc_with(&["List my skills.", ""]);
        let jd = doc_with(&["Senior Rust Engineer", "Own the storage layer."]);
        let base_text = extract_text(&base);

        let merged = merge_documents(base, &jd);
        let expected = format!(
            "{base_text}\n{JOB_DESCRIPTION_HEADING}\nSenior Rust Engineer\nOwn the storage layer."
        );
        assert_eq!(extract_text(&merged), expected);
    }

    #[test]
    fn test_merge_preserves_run_formatting_flags() {
        let mut jd = Document::new();
        let bold = StyledRun {
            text: "Required:".to_string(),
            style: RunStyle {
                bold: true,
                ..RunStyle::default()
            },
        };
        let italic = StyledRun {
            text: " Rust".to_string(),
            style: RunStyle {
                italic: true,
                ..RunStyle::default()
            },
        };
        jd.push_paragraph(
            Paragraph::new()
                .add_run(styled_run(&bold))
                .add_run(styled_run(&italic)),
        );

        let merged = merge_documents(Document::new(), &jd);
        let runs = merged.paragraph_runs();
        assert_eq!(runs.last().unwrap(), &vec![bold, italic]);
    }

    #[test]
    fn test_merge_with_empty_supplement_ends_at_heading() {
        let merged = merge_documents(doc_with(&["Prompt"]), &Document::new());
        assert_eq!(extract_text(&merged), "Prompt\nJob Description");
    }

    #[test]
    fn test_merge_files_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let base_path = dir.path().join("prompt.docx");
        doc_with(&["Prompt"]).save(&base_path).unwrap();
        let out = dir.path().join("merged.docx");

        let err = merge_files(&base_path, &dir.path().join("missing.docx"), &out).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_merge_files_leaves_inputs_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let base_path = dir.path().join("prompt.docx");
        let jd_path = dir.path().join("jd.docx");
        doc_with(&["Prompt"]).save(&base_path).unwrap();
        doc_with(&["JD line"]).save(&jd_path).unwrap();
        let before = std::fs::read(&base_path).unwrap();

        let out = dir.path().join("merged.docx");
        let merged = merge_files(&base_path, &jd_path, &out).unwrap();

        assert_eq!(std::fs::read(&base_path).unwrap(), before);
        let reloaded = Document::load(&out).unwrap();
        assert_eq!(reloaded.paragraph_texts(), merged.paragraph_texts());
        assert_eq!(
            reloaded.paragraph_texts(),
            vec!["Prompt", "Job Description", "JD line"]
        );
    }
}
