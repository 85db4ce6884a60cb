//! Positional node addressing
//!
//! Nodes carry no stable identity of their own. A node is addressed by the
//! sequence of child indices leading to it from the root block list.

use crate::DocModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sequence of child indices from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    /// Create a path from child indices
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The empty path, addressing the root block list itself
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get the child indices
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Depth of the addressed node (root blocks have depth 1)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this is the root path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the addressed node within its parent
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the parent node (None for the root path)
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Path of the child at `index`
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path truncated to the first `depth` indices
    pub fn truncated(&self, depth: usize) -> Path {
        Self(self.0[..depth.min(self.0.len())].to_vec())
    }

    /// Check if this path is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "]")
    }
}

/// Parses `0,1,2` or `0.1.2`; surrounding brackets are ignored
impl FromStr for Path {
    type Err = DocModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']').trim();
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        trimmed
            .split(|c| c == ',' || c == '.')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| DocModelError::InvalidPath(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_and_child() {
        let path = Path::new(vec![0, 2, 1]);
        assert_eq!(path.parent(), Some(Path::new(vec![0, 2])));
        assert_eq!(path.child(4), Path::new(vec![0, 2, 1, 4]));
        assert_eq!(Path::root().parent(), None);
    }

    #[test]
    fn test_ancestry() {
        let table = Path::new(vec![3]);
        let cell = Path::new(vec![3, 0, 1]);
        assert!(table.is_ancestor_of(&cell));
        assert!(!cell.is_ancestor_of(&table));
        assert!(!table.is_ancestor_of(&table));
        assert!(!Path::new(vec![2]).is_ancestor_of(&cell));
    }

    #[test]
    fn test_parse_and_display() {
        let path: Path = "0, 1,2".parse().unwrap();
        assert_eq!(path, Path::new(vec![0, 1, 2]));
        assert_eq!("[0.1.2]".parse::<Path>().unwrap(), path);
        assert_eq!(path.to_string(), "[0, 1, 2]");
        assert!("".parse::<Path>().unwrap().is_empty());
        assert!("0,x".parse::<Path>().is_err());
    }
}
