//! Document: an ordered paragraph sequence over a `.docx` file.
//!
//! Pipeline code never touches the `docx-rs` tree directly. It works with the
//! operations exposed here: find an anchor paragraph by text, insert paragraphs
//! before/after it, append paragraphs, and reach the first table.
//!
//! Paragraph indices are indices into the top-level body children, so tables
//! occupy an index too. They are only meaningful until the next insertion.

pub mod extract;
pub mod merge;

use std::io::Cursor;
use std::path::Path;

use docx_rs::{
    read_docx, AlignmentType, Docx, DocumentChild, Paragraph, ParagraphChild, Run,
    RunChild, Table,
};

use crate::errors::PipelineError;

/// Character formatting carried across when runs are copied between documents.
/// Everything else (fonts, sizes, colours) is deliberately dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// A run of text plus the formatting flags the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

/// An in-memory `.docx` document.
#[derive(Debug)]
pub struct Document {
    docx: Docx,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self { docx: Docx::new() }
    }

    #[cfg(test)]
    pub fn from_docx(docx: Docx) -> Self {
        Self { docx }
    }

    /// Loads a document from disk. The file itself is never written back.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::DocumentRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let docx = read_docx(&bytes).map_err(|e| PipelineError::DocumentRead {
            path: path.to_path_buf(),
            message: format!("{e:?}"),
        })?;
        Ok(Self { docx })
    }

    /// Packs the document into a new `.docx` file at `path`. The archive is
    /// built in memory first, so a packing error leaves no file behind.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let mut buffer = Cursor::new(Vec::new());
        self.docx
            .clone()
            .build()
            .pack(&mut buffer)
            .map_err(|e| PipelineError::DocumentWrite {
                path: path.to_path_buf(),
                message: format!("{e:?}"),
            })?;
        std::fs::write(path, buffer.into_inner())?;
        Ok(())
    }

    /// Text of every top-level paragraph, in document order. Tables are skipped.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect()
    }

    /// Styled runs of every top-level paragraph, in document order.
    pub fn paragraph_runs(&self) -> Vec<Vec<StyledRun>> {
        self.docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_runs(p)),
                _ => None,
            })
            .collect()
    }

    /// Index of the first top-level paragraph whose text contains `needle`.
    pub fn find_paragraph(&self, needle: &str) -> Option<usize> {
        self.docx
            .document
            .children
            .iter()
            .position(|child| match child {
                DocumentChild::Paragraph(p) => paragraph_text(p).contains(needle),
                _ => false,
            })
    }

    /// Inserts `paragraph` directly after the body child at `anchor`.
    pub fn insert_paragraph_after(&mut self, anchor: usize, paragraph: Paragraph) {
        self.insert_paragraphs_at(anchor + 1, vec![paragraph]);
    }

    /// Inserts `paragraphs` directly before the body child at `anchor`,
    /// keeping their relative order.
    pub fn insert_paragraphs_before(&mut self, anchor: usize, paragraphs: Vec<Paragraph>) {
        self.insert_paragraphs_at(anchor, paragraphs);
    }

    fn insert_paragraphs_at(&mut self, index: usize, paragraphs: Vec<Paragraph>) {
        let children = &mut self.docx.document.children;
        let index = index.min(children.len());
        for (offset, p) in paragraphs.into_iter().enumerate() {
            children.insert(index + offset, DocumentChild::Paragraph(Box::new(p)));
        }
    }

    /// Appends a paragraph at the end of the body.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.docx
            .document
            .children
            .push(DocumentChild::Paragraph(Box::new(paragraph)));
    }

    /// Appends a heading paragraph using the built-in `Heading<level>` style.
    pub fn push_heading(&mut self, text: &str, level: u8) {
        self.push_paragraph(heading(text, level));
    }

    /// The first top-level table, if the document has one.
    pub fn first_table_mut(&mut self) -> Option<&mut Table> {
        self.docx
            .document
            .children
            .iter_mut()
            .find_map(|child| match child {
                DocumentChild::Table(t) => Some(t.as_mut()),
                _ => None,
            })
    }

    #[cfg(test)]
    pub fn first_table(&self) -> Option<&Table> {
        self.docx
            .document
            .children
            .iter()
            .find_map(|child| match child {
                DocumentChild::Table(t) => Some(t.as_ref()),
                _ => None,
            })
    }
}

/// A heading paragraph (`Heading1`, `Heading2`, ...).
pub fn heading(text: &str, level: u8) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .style(&format!("Heading{level}"))
}

/// A plain left-aligned paragraph; an empty `text` yields a blank line.
pub fn text_paragraph(text: &str) -> Paragraph {
    let paragraph = Paragraph::new().align(AlignmentType::Left);
    if text.is_empty() {
        paragraph
    } else {
        paragraph.add_run(Run::new().add_text(text))
    }
}

/// Builds a run carrying `style`'s bold/italic/underline flags.
pub fn styled_run(run: &StyledRun) -> Run {
    let mut out = Run::new().add_text(&run.text);
    if run.style.bold {
        out = out.bold();
    }
    if run.style.italic {
        out = out.italic();
    }
    if run.style.underline {
        out = out.underline("single");
    }
    out
}

/// Concatenated text of a paragraph's runs.
pub fn paragraph_text(paragraph: &Paragraph) -> String {
    paragraph_runs(paragraph)
        .into_iter()
        .map(|r| r.text)
        .collect()
}

/// Runs of a paragraph with their formatting flags. Runs nested in
/// hyperlinks or revisions are not visited.
pub fn paragraph_runs(paragraph: &Paragraph) -> Vec<StyledRun> {
    paragraph
        .children
        .iter()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(styled_from_run(run)),
            _ => None,
        })
        .collect()
}

fn styled_from_run(run: &Run) -> StyledRun {
    let text = run
        .children
        .iter()
        .filter_map(|child| match child {
            RunChild::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<String>();

    StyledRun {
        text,
        style: run_style(run),
    }
}

/// Reads bold/italic/underline off a run.
///
/// `docx-rs` keeps the toggle values private, so the run properties are read
/// through their serde form: `{"bold": true, "italic": false, "underline": "single"}`.
fn run_style(run: &Run) -> RunStyle {
    let props = match serde_json::to_value(&run.run_property) {
        Ok(v) => v,
        Err(_) => return RunStyle::default(),
    };
    let flag = |key: &str| props.get(key).and_then(|v| v.as_bool()).unwrap_or(false);

    RunStyle {
        bold: flag("bold"),
        italic: flag("italic"),
        underline: props
            .get("underline")
            .and_then(|v| v.as_str())
            .map(|u| !u.is_empty() && u != "none")
            .unwrap_or(false),
    }
}
