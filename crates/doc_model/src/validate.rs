//! Structural validation
//!
//! Checks a snapshot against the tree invariants: grid tables, topic
//! containment, and placeholder flags. Validation reports problems; it never
//! rejects a document, since every consumer in the workspace degrades
//! gracefully on malformed input.

use crate::{Document, Element, ElementType, Node, Path};
use thiserror::Error;

/// Kind of invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("table child is not a table-row")]
    TableChildNotRow,

    #[error("table-row child is not a table-cell")]
    RowChildNotCell,

    #[error("table-cell holds {0} children instead of one paragraph")]
    CellContent(usize),

    #[error("row has {found} cells, expected {expected}")]
    RaggedRow { expected: usize, found: usize },

    #[error("topic title is not its first child")]
    TitleNotFirst,

    #[error("topic has more than one title")]
    DuplicateTitle,

    #[error("topic has more than one body")]
    DuplicateBody,

    #[error("placeholder flag set on non-empty text")]
    PlaceholderWithText,
}

/// An invariant violation at a specific node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    pub path: Path,
    pub kind: IssueKind,
}

impl std::fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Check every node of `doc`, returning all violations in document order
pub fn validate(doc: &Document) -> Vec<StructureIssue> {
    let mut issues = Vec::new();

    doc.walk(|path, node| match node {
        Node::Text(text) => {
            if text.placeholder && !text.text.is_empty() {
                issues.push(issue(path, IssueKind::PlaceholderWithText));
            }
        }
        Node::Element(element) => match element.kind {
            ElementType::Table => check_table(path, element, &mut issues),
            ElementType::Topic => check_topic(path, element, &mut issues),
            _ => {}
        },
    });

    issues
}

fn check_table(path: &Path, table: &Element, issues: &mut Vec<StructureIssue>) {
    let mut expected_cells = None;

    for (row_index, row) in table.children.iter().enumerate() {
        let row_path = path.child(row_index);
        let Some(row) = row.as_element().filter(|e| e.is(&ElementType::TableRow)) else {
            issues.push(issue(&row_path, IssueKind::TableChildNotRow));
            continue;
        };

        let found = row.children.len();
        let expected = *expected_cells.get_or_insert(found);
        if expected != found {
            issues.push(issue(&row_path, IssueKind::RaggedRow { expected, found }));
        }

        for (cell_index, cell) in row.children.iter().enumerate() {
            let cell_path = row_path.child(cell_index);
            let Some(cell) = cell.as_element().filter(|e| e.is(&ElementType::TableCell)) else {
                issues.push(issue(&cell_path, IssueKind::RowChildNotCell));
                continue;
            };

            let single_paragraph = cell.children.len() == 1
                && cell.children[0].is_element_of(&ElementType::Paragraph);
            if !single_paragraph {
                issues.push(issue(&cell_path, IssueKind::CellContent(cell.children.len())));
            }
        }
    }
}

fn check_topic(path: &Path, topic: &Element, issues: &mut Vec<StructureIssue>) {
    let mut titles = 0;
    let mut bodies = 0;

    for (index, child) in topic.children.iter().enumerate() {
        match child.kind() {
            Some(ElementType::Title) => {
                titles += 1;
                if titles > 1 {
                    issues.push(issue(&path.child(index), IssueKind::DuplicateTitle));
                } else if index != 0 {
                    issues.push(issue(&path.child(index), IssueKind::TitleNotFirst));
                }
            }
            Some(ElementType::Body) => {
                bodies += 1;
                if bodies > 1 {
                    issues.push(issue(&path.child(index), IssueKind::DuplicateBody));
                }
            }
            _ => {}
        }
    }
}

fn issue(path: &Path, kind: IssueKind) -> StructureIssue {
    StructureIssue {
        path: path.clone(),
        kind,
    }
}
