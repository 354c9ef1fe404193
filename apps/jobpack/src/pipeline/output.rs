//! Output folder and artifact naming.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::document::{text_paragraph, Document};
use crate::errors::PipelineError;
use crate::llm_client::prompts::RESPONSE_HEADING;

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// The directory every artifact of one run is written to.
#[derive(Debug, Clone)]
pub struct OutputFolder {
    dir: PathBuf,
    stamp: String,
}

impl OutputFolder {
    /// Uses `parent/name`, or `parent/output_<timestamp>` when no name is given.
    /// An existing folder is reused.
    pub fn create(
        parent: &Path,
        name: Option<&str>,
        now: DateTime<Local>,
    ) -> Result<Self, PipelineError> {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        let dir = match name {
            Some(name) => parent.join(name),
            None => parent.join(format!("output_{stamp}")),
        };

        if dir.is_dir() {
            info!("Using existing output folder: {}", dir.display());
        } else {
            std::fs::create_dir_all(&dir)?;
            info!("Created output folder: {}", dir.display());
        }

        Ok(Self { dir, stamp })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<stem>-<timestamp>.docx`
    pub fn artifact(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}-{}.docx", self.stamp))
    }
}

/// Saves a raw model reply: a "Claude Response" heading, then one paragraph
/// per non-empty line.
pub fn save_response_document(text: &str, path: &Path) -> Result<(), PipelineError> {
    let mut doc = Document::new();
    doc.push_heading(RESPONSE_HEADING, 1);
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        doc.push_paragraph(text_paragraph(line));
    }
    doc.save(path)?;
    info!("Model response saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_unnamed_folder_uses_timestamp() {
        let parent = tempfile::tempdir().unwrap();
        let folder = OutputFolder::create(parent.path(), None, fixed_time()).unwrap();

        assert_eq!(folder.path(), parent.path().join("output_20240309-140507"));
        assert!(folder.path().is_dir());
    }

    #[test]
    fn test_named_folder_is_reused() {
        let parent = tempfile::tempdir().unwrap();
        let existing = parent.path().join("job_application_outputs");
        std::fs::create_dir(&existing).unwrap();
        std::fs::write(existing.join("keep.txt"), "x").unwrap();

        let folder =
            OutputFolder::create(parent.path(), Some("job_application_outputs"), fixed_time())
                .unwrap();
        assert_eq!(folder.path(), existing);
        assert!(existing.join("keep.txt").exists());
    }

    #[test]
    fn test_artifact_names_carry_stem_and_timestamp() {
        let parent = tempfile::tempdir().unwrap();
        let folder = OutputFolder::create(parent.path(), Some("run"), fixed_time()).unwrap();

        assert_eq!(
            folder.artifact("claude_response"),
            parent.path().join("run").join("claude_response-20240309-140507.docx")
        );
    }

    #[test]
    fn test_response_document_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.docx");
        save_response_document("1) Rust\n\n   \n(i) Ownership", &path).unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(
            doc.paragraph_texts(),
            vec![RESPONSE_HEADING, "1) Rust", "(i) Ownership"]
        );
    }
}
