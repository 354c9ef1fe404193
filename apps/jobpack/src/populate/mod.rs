//! Writes parsed model output into copies of templates.
//!
//! Every populator loads the template fresh, edits it in memory and saves to a
//! new path. A template missing its anchor (table, heading, closing line) is
//! not an error: the populator returns `Ok(None)` and nothing is written.

pub mod cover_letter;
pub mod skills_table;
pub mod summary;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::document::Document;
use crate::errors::PipelineError;

pub use cover_letter::populate_cover_letter;
pub use skills_table::populate_skills_table;
pub use summary::populate_summary;

/// Loads `template`, applies `fill`, and saves to `output` only if `fill`
/// found its anchor.
fn populate_copy(
    template: &Path,
    output: &Path,
    anchor: &str,
    fill: impl FnOnce(&mut Document) -> bool,
) -> Result<Option<PathBuf>, PipelineError> {
    if !template.exists() {
        return Err(PipelineError::MissingInput {
            kind: "Template",
            path: template.to_path_buf(),
        });
    }

    let mut doc = Document::load(template)?;
    if !fill(&mut doc) {
        warn!(
            "{anchor} not found in template {}; nothing written",
            template.display()
        );
        return Ok(None);
    }

    doc.save(output)?;
    info!("Saved {}", output.display());
    Ok(Some(output.to_path_buf()))
}
