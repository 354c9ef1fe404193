//! Skills table: lays main skills out two per row in the CV's first table.
//!
//! Skill `k` goes to row `k / 2`, column `k % 2`. Each target cell is rebuilt
//! as one bold main-skill paragraph followed by its non-empty sub-skills.

use std::path::{Path, PathBuf};

use docx_rs::{
    AlignmentType, Paragraph, Run, Table, TableCell, TableCellContent, TableChild, TableRow,
    TableRowChild,
};
use tracing::{info, warn};

use super::populate_copy;
use crate::document::{text_paragraph, Document};
use crate::errors::PipelineError;
use crate::models::SkillSet;

const SKILL_COLUMNS: usize = 2;

/// Fills the first table of `doc` with `skills`. Returns `false` when the
/// document has no table.
pub fn fill_skills_table(doc: &mut Document, skills: &SkillSet) -> bool {
    let Some(table) = doc.first_table_mut() else {
        return false;
    };

    let rows_needed = skills.rows_needed();
    ensure_rows(table, rows_needed);

    for (index, main_skill) in skills.main_skills.iter().enumerate() {
        let (row, column) = (index / SKILL_COLUMNS, index % SKILL_COLUMNS);
        let Some(cell) = cell_mut(table, row, column) else {
            warn!("No cell at row {row}, column {column}; dropping skill '{main_skill}'");
            continue;
        };
        write_cell(cell, main_skill, &skills.sub_skill_slots(index));
    }

    info!(
        "Filled {} rows with {} main skills",
        rows_needed,
        skills.main_skills.len()
    );
    true
}

/// Loads the CV template, fills its skills table and saves it to `output`.
pub fn populate_skills_table(
    template: &Path,
    output: &Path,
    skills: &SkillSet,
) -> Result<Option<PathBuf>, PipelineError> {
    populate_copy(template, output, "Skills table", |doc| {
        fill_skills_table(doc, skills)
    })
}

/// Appends empty rows until the table has at least `rows_needed` rows, then
/// pads each of those rows to at least two cells.
/// New rows get as many cells as the first row, and never fewer than two.
/// Each new cell carries one empty paragraph, which Word requires.
fn ensure_rows(table: &mut Table, rows_needed: usize) {
    let columns = row_mut(table, 0)
        .map(|row| row.cells.len())
        .unwrap_or(0)
        .max(SKILL_COLUMNS);

    while table.rows.len() < rows_needed {
        let cells = (0..columns).map(|_| empty_cell()).collect();
        table.rows.push(TableChild::TableRow(TableRow::new(cells)));
    }

    for index in 0..rows_needed {
        if let Some(row) = row_mut(table, index) {
            while row.cells.len() < SKILL_COLUMNS {
                row.cells.push(TableRowChild::TableCell(empty_cell()));
            }
        }
    }
}

fn empty_cell() -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new())
}

#[allow(unreachable_patterns)]
fn row_mut(table: &mut Table, index: usize) -> Option<&mut TableRow> {
    match table.rows.get_mut(index)? {
        TableChild::TableRow(row) => Some(row),
        _ => None,
    }
}

#[allow(unreachable_patterns)]
fn cell_mut(table: &mut Table, row: usize, column: usize) -> Option<&mut TableCell> {
    match row_mut(table, row)?.cells.get_mut(column)? {
        TableRowChild::TableCell(cell) => Some(cell),
        _ => None,
    }
}

/// Replaces the cell's paragraphs. Cell properties (width, borders, shading)
/// are left as the template had them.
fn write_cell(cell: &mut TableCell, main_skill: &str, sub_skills: &[&str]) {
    cell.children.clear();
    cell.children
        .push(TableCellContent::Paragraph(Box::new(main_skill_paragraph(main_skill))));
    for sub in sub_skills.iter().filter(|s| !s.is_empty()) {
        cell.children
            .push(TableCellContent::Paragraph(Box::new(text_paragraph(sub))));
    }
}

fn main_skill_paragraph(label: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(label).bold())
        .align(AlignmentType::Left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::paragraph_runs;
    use docx_rs::Docx;

    /// (text, bold) of every paragraph in every cell of the first table.
    #[allow(unreachable_patterns)]
    fn table_outline(doc: &Document) -> Vec<Vec<Vec<(String, bool)>>> {
        let table = doc.first_table().expect("document has a table");
        table
            .rows
            .iter()
            .map(|row| match row {
                TableChild::TableRow(row) => row
                    .cells
                    .iter()
                    .map(|cell| match cell {
                        TableRowChild::TableCell(cell) => cell
                            .children
                            .iter()
                            .filter_map(|content| match content {
                                TableCellContent::Paragraph(p) => {
                                    let runs = paragraph_runs(p);
                                    let text: String = runs.iter().map(|r| r.text.as_str()).collect();
                                    let bold = !runs.is_empty() && runs.iter().all(|r| r.style.bold);
                                    Some((text, bold))
                                }
                                _ => None,
                            })
                            .collect(),
                        _ => vec![],
                    })
                    .collect(),
                _ => vec![],
            })
            .collect()
    }

    fn template_with_table(rows: usize) -> Document {
        let rows = (0..rows)
            .map(|_| {
                TableRow::new(vec![
                    TableCell::new()
                        .add_paragraph(text_paragraph("Skill placeholder"))
                        .add_paragraph(text_paragraph("stale detail")),
                    TableCell::new().add_paragraph(text_paragraph("Skill placeholder")),
                ])
            })
            .collect();
        Document::from_docx(
            Docx::new()
                .add_paragraph(text_paragraph("Key Skills"))
                .add_table(Table::new(rows)),
        )
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn p(text: &str, bold: bool) -> (String, bool) {
        (text.to_string(), bold)
    }

    #[test]
    fn test_fill_lays_out_skills_row_major_with_sub_skills() {
        let mut doc = template_with_table(1);
        let skills = SkillSet::new(
            strings(&["Rust", "Leadership", "SQL"]),
            strings(&["Ownership", "Async", "", "Macros", "Traits", "Mentoring"]),
        );

        assert!(fill_skills_table(&mut doc, &skills));

        let outline = table_outline(&doc);
        assert_eq!(outline.len(), 2, "ceil(3 / 2) rows");
        assert_eq!(
            outline[0][0],
            vec![
                p("Rust", true),
                p("Ownership", false),
                p("Async", false),
                p("Macros", false),
                p("Traits", false),
            ]
        );
        assert_eq!(outline[0][1], vec![p("Leadership", true), p("Mentoring", false)]);
        assert_eq!(outline[1][0], vec![p("SQL", true)]);
        assert_eq!(outline[1][1], vec![p("", false)], "unused cell stays blank");
    }

    #[test]
    fn test_fill_clears_stale_paragraphs_in_target_cells() {
        let mut doc = template_with_table(1);
        let skills = SkillSet::new(strings(&["Rust"]), vec![]);

        assert!(fill_skills_table(&mut doc, &skills));

        let outline = table_outline(&doc);
        assert_eq!(outline[0][0], vec![p("Rust", true)]);
        // Untargeted cell keeps its template content.
        assert_eq!(outline[0][1], vec![p("Skill placeholder", false)]);
    }

    #[test]
    fn test_fill_keeps_extra_template_rows() {
        let mut doc = template_with_table(3);
        let skills = SkillSet::new(strings(&["A", "B"]), vec![]);

        assert!(fill_skills_table(&mut doc, &skills));
        assert_eq!(table_outline(&doc).len(), 3);
    }

    #[test]
    fn test_fill_pads_single_cell_template_rows() {
        let mut doc = Document::from_docx(Docx::new().add_table(Table::new(vec![
            TableRow::new(vec![TableCell::new().add_paragraph(text_paragraph("Skill"))]),
        ])));
        let skills = SkillSet::new(strings(&["A", "B", "C", "D"]), vec![]);

        assert!(fill_skills_table(&mut doc, &skills));

        let outline = table_outline(&doc);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0], vec![vec![p("A", true)], vec![p("B", true)]]);
        assert_eq!(outline[1], vec![vec![p("C", true)], vec![p("D", true)]]);
    }

    #[test]
    fn test_fill_without_table_reports_failure() {
        let mut doc = Document::new();
        doc.push_paragraph(text_paragraph("No table here"));
        let skills = SkillSet::new(strings(&["Rust"]), vec![]);

        assert!(!fill_skills_table(&mut doc, &skills));
    }

    #[test]
    fn test_populate_without_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("cv.docx");
        let mut doc = Document::new();
        doc.push_paragraph(text_paragraph("Plain CV"));
        doc.save(&template).unwrap();
        let output = dir.path().join("cv_with_skills.docx");

        let written = populate_skills_table(&template, &output, &SkillSet::default()).unwrap();
        assert!(written.is_none());
        assert!(!output.exists());
    }

    #[test]
    fn test_populate_twice_gives_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("cv.docx");
        template_with_table(1).save(&template).unwrap();
        let template_bytes = std::fs::read(&template).unwrap();
        let skills = SkillSet::new(
            strings(&["Rust", "Go", "Python"]),
            strings(&["a", "b", "c", "d", "e", "f"]),
        );

        let first = dir.path().join("first.docx");
        let second = dir.path().join("second.docx");
        populate_skills_table(&template, &first, &skills).unwrap().unwrap();
        populate_skills_table(&template, &second, &skills).unwrap().unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
        assert_eq!(std::fs::read(&template).unwrap(), template_bytes);

        let first = Document::load(&first).unwrap();
        let second = Document::load(&second).unwrap();
        assert_eq!(table_outline(&first), table_outline(&second));
    }
}
