//! Table editing commands
//!
//! This module implements commands for creating and modifying grid tables:
//! - InsertTable: Create a new table with specified rows and columns
//! - InsertRow: Append a row to the table around the caret
//! - InsertColumn: Append a column to the table around the caret
//! - RemoveTable: Remove the table around the caret
//!
//! Row and column insertion never splice cells in place. The table is read
//! into a [`TableGrid`], the grid grows, and a fresh table node replaces the
//! old one at the same path. Rebuilding from a rectangular grid is what keeps
//! every row the same length.

use crate::{Command, CommandResult, Result};
use doc_model::{Document, Element, ElementType, Node, Path, Point, Selection};
use serde::{Deserialize, Serialize};

// =============================================================================
// Table Grid
// =============================================================================

/// Cell texts of a table, row by row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableGrid {
    rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Create a grid of empty cells
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); cols]; rows],
        }
    }

    /// Create a grid from cell texts
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Read the cell texts of a table element
    ///
    /// Each cell contributes the text of its first child (its paragraph).
    pub fn from_table(table: &Element) -> Self {
        let rows = table
            .children
            .iter()
            .map(|row| {
                row.children()
                    .iter()
                    .map(|cell| {
                        cell.children()
                            .first()
                            .map(Node::text_content)
                            .unwrap_or_default()
                    })
                    .collect::<Vec<String>>()
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count, taken from the first row
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Check that every row has the same number of cells
    pub fn is_rectangular(&self) -> bool {
        let columns = self.column_count();
        self.rows.iter().all(|row| row.len() == columns)
    }

    /// Pad short rows with empty cells up to the widest row
    ///
    /// Returns true if any row had to be padded.
    pub fn normalize(&mut self) -> bool {
        if self.is_rectangular() {
            return false;
        }

        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        tracing::warn!(
            rows = self.rows.len(),
            width,
            "ragged table grid, padding short rows"
        );
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        true
    }

    /// Append a row of empty cells
    pub fn push_row(&mut self) {
        let columns = self.column_count().max(1);
        for row in &mut self.rows {
            row.resize(columns, String::new());
        }
        self.rows.push(vec![String::new(); columns]);
    }

    /// Append an empty cell to every row
    pub fn push_column(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    /// Build a table element from this grid
    pub fn to_table(&self) -> Element {
        let rows = self.rows.iter().map(|cells| create_row(cells).into()).collect();
        Element::with_children(ElementType::Table, rows)
    }
}

/// Create a table cell holding one paragraph with `text`
pub fn create_table_cell(text: impl Into<String>) -> Element {
    Element::with_children(
        ElementType::TableCell,
        vec![Element::paragraph(text).into()],
    )
}

fn create_row(cells: &[String]) -> Element {
    let cells = cells
        .iter()
        .map(|text| create_table_cell(text.as_str()).into())
        .collect();
    Element::with_children(ElementType::TableRow, cells)
}

/// The caret's cell after a rebuild: the cell's single leaf, at the same
/// character position within the cell's paragraph text
fn caret_in_rebuilt_cell(
    old: &Document,
    new: &Document,
    table: &Path,
    caret: &Selection,
) -> Option<Selection> {
    let point = &caret.anchor;
    let cell = point.path.truncated((table.len() + 2).min(point.path.len()));
    let leaf = new.first_leaf(&cell)?;

    let paragraph = cell.child(0);
    let mut offset = 0;
    if paragraph.is_ancestor_of(&point.path) {
        offset = point.offset;
        old.walk(|path, node| {
            if let Node::Text(text) = node {
                if paragraph.is_ancestor_of(path) && *path < point.path {
                    offset += text.text.chars().count();
                }
            }
        });
    }

    let len = new
        .node(&leaf)
        .map_or(0, |node| node.text_content().chars().count());
    Some(Selection::collapsed(Point::new(leaf, offset.min(len))))
}

/// Nearest table around the selection anchor
fn enclosing_table<'a>(doc: &'a Document, selection: &Selection) -> Option<(Path, &'a Element)> {
    doc.find_ancestor(&selection.anchor.path, |element| {
        element.is(&ElementType::Table)
    })
}

// =============================================================================
// InsertTable Command
// =============================================================================

/// Insert a new table after the top-level block holding the caret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertTable {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl InsertTable {
    /// Create a new InsertTable command
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl Command for InsertTable {
    fn apply(&self, doc: &Document, selection: Option<&Selection>) -> Result<CommandResult> {
        if self.rows == 0 || self.cols == 0 {
            tracing::debug!(rows = self.rows, cols = self.cols, "empty table dimensions, skipping");
            return Ok(CommandResult::unchanged(doc, selection));
        }

        // Highest boundary: directly after the root block containing the caret
        let index = selection
            .and_then(|s| s.start().path.indices().first().copied())
            .map_or(doc.len(), |block| (block + 1).min(doc.len()));
        let table_path = Path::new(vec![index]);

        let mut new_doc = doc.clone();
        let table = TableGrid::new(self.rows, self.cols).to_table();
        new_doc.insert_node(&table_path, table.into())?;

        // Caret into the first cell's text
        let new_selection = new_doc
            .first_leaf(&table_path)
            .map(|leaf| Selection::collapsed(Point::start_of(leaf)));

        Ok(CommandResult::applied(new_doc, new_selection))
    }

    fn display_name(&self) -> &str {
        "Insert Table"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// InsertRow / InsertColumn Commands
// =============================================================================

/// Which way a table grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridAxis {
    Row,
    Column,
}

/// Grow the table around a collapsed caret by one row or column
fn insert_cells(
    doc: &Document,
    selection: Option<&Selection>,
    axis: GridAxis,
) -> Result<CommandResult> {
    let Some(caret) = selection.filter(|s| s.is_collapsed()) else {
        tracing::debug!(?axis, "no collapsed selection, skipping table insertion");
        return Ok(CommandResult::unchanged(doc, selection));
    };

    let Some((path, table)) = enclosing_table(doc, caret) else {
        tracing::debug!(?axis, path = %caret.anchor.path, "selection is not inside a table");
        return Ok(CommandResult::unchanged(doc, selection));
    };

    let mut grid = TableGrid::from_table(table);
    grid.normalize();

    match axis {
        GridAxis::Row => grid.push_row(),
        GridAxis::Column => grid.push_column(),
    }

    let mut rebuilt = grid.to_table();
    rebuilt.attr = table.attr.clone();
    rebuilt.default = table.default.clone();

    let mut new_doc = doc.clone();
    new_doc.replace_node(&path, rebuilt.into())?;

    let new_selection = caret_in_rebuilt_cell(doc, &new_doc, &path, caret);
    Ok(CommandResult::applied(new_doc, new_selection))
}

/// Append an empty row to the table around the caret
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsertRow;

impl Command for InsertRow {
    fn apply(&self, doc: &Document, selection: Option<&Selection>) -> Result<CommandResult> {
        insert_cells(doc, selection, GridAxis::Row)
    }

    fn display_name(&self) -> &str {
        "Insert Row"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Append an empty column to the table around the caret
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsertColumn;

impl Command for InsertColumn {
    fn apply(&self, doc: &Document, selection: Option<&Selection>) -> Result<CommandResult> {
        insert_cells(doc, selection, GridAxis::Column)
    }

    fn display_name(&self) -> &str {
        "Insert Column"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// RemoveTable Command
// =============================================================================

/// Delete the table around the selection anchor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveTable;

impl Command for RemoveTable {
    fn apply(&self, doc: &Document, selection: Option<&Selection>) -> Result<CommandResult> {
        let Some((path, _)) = selection.and_then(|s| enclosing_table(doc, s)) else {
            tracing::debug!("no table around the selection, nothing to remove");
            return Ok(CommandResult::unchanged(doc, selection));
        };

        let mut new_doc = doc.clone();
        new_doc.remove_node(&path)?;

        // Caret to whatever now occupies the table's slot, else the sibling before it
        let new_selection = [Some(path.clone()), previous_sibling(&path)]
            .into_iter()
            .flatten()
            .find_map(|candidate| new_doc.first_leaf(&candidate))
            .map(|leaf| Selection::collapsed(Point::start_of(leaf)));

        Ok(CommandResult::applied(new_doc, new_selection))
    }

    fn display_name(&self) -> &str {
        "Remove Table"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

fn previous_sibling(path: &Path) -> Option<Path> {
    let index = path.last()?.checked_sub(1)?;
    path.parent().map(|parent| parent.child(index))
}

// =============================================================================
// Convenience functions
// =============================================================================

/// Insert a `rows` x `cols` table of empty paragraphs
pub fn insert_table(
    doc: &Document,
    selection: Option<&Selection>,
    rows: usize,
    cols: usize,
) -> Result<CommandResult> {
    InsertTable::new(rows, cols).apply(doc, selection)
}

/// Append an empty row to the table around a collapsed caret
pub fn insert_row(doc: &Document, selection: Option<&Selection>) -> Result<CommandResult> {
    InsertRow.apply(doc, selection)
}

/// Append an empty column to the table around a collapsed caret
pub fn insert_column(doc: &Document, selection: Option<&Selection>) -> Result<CommandResult> {
    InsertColumn.apply(doc, selection)
}

/// Remove the table around the selection anchor
pub fn remove_table(doc: &Document, selection: Option<&Selection>) -> Result<CommandResult> {
    RemoveTable.apply(doc, selection)
}
