//! Document root and path-addressed tree operations
//!
//! A [`Document`] is the editor snapshot: the ordered list of root blocks.
//! Reads are path lookups; writes go through the owned mutation helpers and
//! are meant to run on a clone, so the snapshot handed in by the editor is
//! never modified.

use crate::{DocModelError, Element, Node, Path, Result};
use serde::{Deserialize, Serialize};

/// The root block sequence of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Node>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from root blocks
    pub fn from_blocks(blocks: Vec<Node>) -> Self {
        Self { blocks }
    }

    /// Get the root blocks
    pub fn blocks(&self) -> &[Node] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Node> {
        self.blocks
    }

    /// Number of root blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Look up the node at `path` (None for the root path or a dangling path)
    pub fn node(&self, path: &Path) -> Option<&Node> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.blocks.get(*first)?;
        for &index in rest {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    /// Look up the element at `path`
    pub fn element(&self, path: &Path) -> Option<&Element> {
        self.node(path).and_then(Node::as_element)
    }

    /// Children of the node at `path`; the root path yields the root blocks
    pub fn children_at(&self, path: &Path) -> Option<&[Node]> {
        if path.is_empty() {
            return Some(&self.blocks);
        }
        self.element(path).map(|element| element.children.as_slice())
    }

    /// Every node on the way from the first root block down to `path`,
    /// outermost first, including the node at `path` itself
    pub fn ancestors(&self, path: &Path) -> Vec<(Path, &Node)> {
        let mut levels = Vec::with_capacity(path.len());
        let mut children = self.blocks.as_slice();

        for (depth, &index) in path.indices().iter().enumerate() {
            let Some(node) = children.get(index) else {
                break;
            };
            levels.push((path.truncated(depth + 1), node));
            children = node.children();
        }

        levels
    }

    /// Nearest element on the way to `path` (the node itself included)
    /// satisfying `predicate`
    pub fn find_ancestor<F>(&self, path: &Path, predicate: F) -> Option<(Path, &Element)>
    where
        F: Fn(&Element) -> bool,
    {
        self.ancestors(path)
            .into_iter()
            .rev()
            .find_map(|(path, node)| match node.as_element() {
                Some(element) if predicate(element) => Some((path, element)),
                _ => None,
            })
    }

    /// Path of the first text leaf at or below `path`
    pub fn first_leaf(&self, path: &Path) -> Option<Path> {
        let mut path = path.clone();
        let mut node = self.node(&path)?;
        while let Node::Element(element) = node {
            node = element.children.first()?;
            path = path.child(0);
        }
        Some(path)
    }

    /// Visit every node depth-first in document order
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Path, &Node),
    {
        fn walk_nodes<F: FnMut(&Path, &Node)>(nodes: &[Node], parent: &Path, visit: &mut F) {
            for (index, node) in nodes.iter().enumerate() {
                let path = parent.child(index);
                visit(&path, node);
                walk_nodes(node.children(), &path, visit);
            }
        }

        walk_nodes(&self.blocks, &Path::root(), &mut visit);
    }

    /// Insert `node` so that it ends up at `at`
    pub fn insert_node(&mut self, at: &Path, node: Node) -> Result<()> {
        let (parent, index) = split_path(at)?;
        let children = self.children_mut(&parent)?;
        if index > children.len() {
            return Err(DocModelError::PathNotFound(at.clone()));
        }
        children.insert(index, node);
        Ok(())
    }

    /// Swap the node at `at` for `node`, returning the old node
    pub fn replace_node(&mut self, at: &Path, node: Node) -> Result<Node> {
        let (parent, index) = split_path(at)?;
        let children = self.children_mut(&parent)?;
        let slot = children
            .get_mut(index)
            .ok_or_else(|| DocModelError::PathNotFound(at.clone()))?;
        Ok(std::mem::replace(slot, node))
    }

    /// Remove the node at `at`, returning it
    pub fn remove_node(&mut self, at: &Path) -> Result<Node> {
        let (parent, index) = split_path(at)?;
        let children = self.children_mut(&parent)?;
        if index >= children.len() {
            return Err(DocModelError::PathNotFound(at.clone()));
        }
        Ok(children.remove(index))
    }

    fn children_mut(&mut self, parent: &Path) -> Result<&mut Vec<Node>> {
        let mut children = &mut self.blocks;

        for (depth, &index) in parent.indices().iter().enumerate() {
            let node = children
                .get_mut(index)
                .ok_or_else(|| DocModelError::PathNotFound(parent.truncated(depth + 1)))?;
            children = match node {
                Node::Element(element) => &mut element.children,
                Node::Text(_) => return Err(DocModelError::NotAnElement(parent.truncated(depth + 1))),
            };
        }

        Ok(children)
    }
}

impl From<Vec<Node>> for Document {
    fn from(blocks: Vec<Node>) -> Self {
        Self::from_blocks(blocks)
    }
}

fn split_path(path: &Path) -> Result<(Path, usize)> {
    match (path.parent(), path.last()) {
        (Some(parent), Some(index)) => Ok((parent, index)),
        _ => Err(DocModelError::InvalidPath(
            "the root path does not address a node".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementType;
    use proptest::prelude::*;

    fn sample() -> Document {
        Document::from_blocks(vec![
            Element::paragraph("first").into(),
            Element::with_children(
                ElementType::Section,
                vec![
                    Element::with_children(ElementType::Heading, vec![Node::text("Head")]).into(),
                    Element::paragraph("inside").into(),
                ],
            )
            .into(),
        ])
    }

    #[test]
    fn test_node_lookup() {
        let doc = sample();
        assert_eq!(doc.node(&Path::new(vec![1, 1, 0])).unwrap().text_content(), "inside");
        assert!(doc.node(&Path::new(vec![1, 5])).is_none());
        assert!(doc.node(&Path::root()).is_none());
        assert_eq!(doc.children_at(&Path::root()).unwrap().len(), 2);
    }

    #[test]
    fn test_ancestors_outermost_first() {
        let doc = sample();
        let levels = doc.ancestors(&Path::new(vec![1, 1, 0]));
        let kinds: Vec<_> = levels.iter().map(|(_, node)| node.kind().cloned()).collect();
        assert_eq!(
            kinds,
            vec![Some(ElementType::Section), Some(ElementType::Paragraph), None]
        );
    }

    #[test]
    fn test_find_ancestor_is_nearest() {
        let doc = sample();
        let (path, element) = doc
            .find_ancestor(&Path::new(vec![1, 1, 0]), |e| e.kind != ElementType::Custom("x".into()))
            .unwrap();
        assert_eq!(path, Path::new(vec![1, 1]));
        assert!(element.is(&ElementType::Paragraph));
    }

    #[test]
    fn test_mutations() {
        let mut doc = sample();
        doc.insert_node(&Path::new(vec![0]), Element::paragraph("zero").into())
            .unwrap();
        assert_eq!(doc.len(), 3);

        let old = doc
            .replace_node(&Path::new(vec![2, 1]), Element::paragraph("swapped").into())
            .unwrap();
        assert_eq!(old.text_content(), "inside");

        let removed = doc.remove_node(&Path::new(vec![1])).unwrap();
        assert_eq!(removed.text_content(), "first");
        assert_eq!(doc.node(&Path::new(vec![1, 1])).unwrap().text_content(), "swapped");
    }

    #[test]
    fn test_mutation_errors() {
        let mut doc = sample();
        assert!(matches!(
            doc.remove_node(&Path::new(vec![7])),
            Err(DocModelError::PathNotFound(_))
        ));
        assert!(matches!(
            doc.insert_node(&Path::new(vec![0, 0, 0]), Node::text("x")),
            Err(DocModelError::NotAnElement(_))
        ));
        assert!(matches!(
            doc.remove_node(&Path::root()),
            Err(DocModelError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_first_leaf() {
        let doc = sample();
        assert_eq!(doc.first_leaf(&Path::new(vec![1])), Some(Path::new(vec![1, 0, 0])));
        assert_eq!(doc.first_leaf(&Path::new(vec![0, 0])), Some(Path::new(vec![0, 0])));

        let empty = Document::from_blocks(vec![Element::new(ElementType::Body).into()]);
        assert_eq!(empty.first_leaf(&Path::new(vec![0])), None);
    }

    #[test]
    fn test_walk_visits_in_document_order() {
        let doc = sample();
        let mut paths = Vec::new();
        doc.walk(|path, _| paths.push(path.to_string()));
        assert_eq!(
            paths,
            vec!["[0]", "[0, 0]", "[1]", "[1, 0]", "[1, 0, 0]", "[1, 1]", "[1, 1, 0]"]
        );
    }

    fn arb_node() -> impl Strategy<Value = Node> {
        let leaf = "[a-z]{0,3}".prop_map(|text| Node::text(text));
        leaf.prop_recursive(4, 24, 3, |inner| {
            prop::collection::vec(inner, 0..3).prop_map(|children| {
                Element::with_children(ElementType::Paragraph, children).into()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_every_walked_path_resolves(blocks in prop::collection::vec(arb_node(), 0..4)) {
            let doc = Document::from_blocks(blocks);
            let mut paths = Vec::new();
            doc.walk(|path, _| paths.push(path.clone()));

            for path in paths {
                let levels = doc.ancestors(&path);
                prop_assert_eq!(levels.len(), path.len());
                prop_assert_eq!(&levels[levels.len() - 1].0, &path);
                if let Some(leaf) = doc.first_leaf(&path) {
                    prop_assert!(path == leaf || path.is_ancestor_of(&leaf));
                    prop_assert!(doc.node(&leaf).and_then(Node::as_text).is_some());
                }
            }
        }
    }
}
