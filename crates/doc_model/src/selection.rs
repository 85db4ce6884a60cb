//! Selection model - cursor position and text selection

use crate::Path;
use serde::{Deserialize, Serialize};

/// A position in the document tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Path of the text leaf containing this position
    pub path: Path,
    /// Character offset within the leaf
    pub offset: usize,
}

impl Point {
    /// Create a new point
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }

    /// Create a point at the start of a node
    pub fn start_of(path: impl Into<Path>) -> Self {
        Self::new(path, 0)
    }
}

/// A selection in the document
///
/// A selection has an anchor (where the selection started) and a focus
/// (where the selection ends / where the caret is). When anchor == focus,
/// the selection is collapsed (just a caret).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started
    pub anchor: Point,
    /// Where the selection ends (caret position)
    pub focus: Point,
}

impl Selection {
    /// Create a new selection
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Create a collapsed selection (caret only)
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// Create a caret at the start of a node
    pub fn at_start_of(path: impl Into<Path>) -> Self {
        Self::collapsed(Point::start_of(path))
    }

    /// Check if this selection is collapsed (just a caret)
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Check if the selection goes forward (anchor before focus)
    pub fn is_forward(&self) -> bool {
        self.anchor <= self.focus
    }

    /// Get the start position of the selection (regardless of direction)
    pub fn start(&self) -> &Point {
        if self.is_forward() {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// Get the end position of the selection (regardless of direction)
    pub fn end(&self) -> &Point {
        if self.is_forward() {
            &self.focus
        } else {
            &self.anchor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed() {
        let caret = Selection::at_start_of(vec![0, 0]);
        assert!(caret.is_collapsed());

        let range = Selection::new(Point::new(vec![0, 0], 0), Point::new(vec![0, 0], 3));
        assert!(!range.is_collapsed());
    }

    #[test]
    fn test_direction_uses_document_order() {
        let backward = Selection::new(Point::new(vec![2, 0], 1), Point::new(vec![1, 0], 4));
        assert!(!backward.is_forward());
        assert_eq!(backward.start().path, Path::new(vec![1, 0]));
        assert_eq!(backward.end().path, Path::new(vec![2, 0]));
    }
}
