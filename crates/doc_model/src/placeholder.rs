//! Placeholder resolution
//!
//! An element whose content is an empty, placeholder-flagged text leaf is
//! shown (and optionally exported) with its `default` string instead. The
//! resolver answers that question for one element at a time; containers
//! delegate one level down to the slot that carries their visible text.

use crate::{Document, Element, ElementType, Node, Path};

/// True iff `node` is a text leaf with empty text and the placeholder flag set
pub fn is_empty_text_leaf(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.text.is_empty() && text.placeholder)
}

/// True iff the element's first child (or, when that child is a wrapper
/// element, the wrapper's first child) is an empty placeholder leaf
pub fn first_child_is_empty(element: &Element) -> bool {
    match element.first_child() {
        Some(Node::Element(wrapper)) => wrapper.first_child().is_some_and(is_empty_text_leaf),
        Some(leaf) => is_empty_text_leaf(leaf),
        None => false,
    }
}

/// The child a container delegates its emptiness to
///
/// Topics delegate to their title, bodies and sections to their first child.
/// Non-containers are their own slot. Never descends more than one level.
pub fn placeholder_slot(element: &Element) -> Option<&Element> {
    match element.kind {
        ElementType::Topic => element
            .children
            .iter()
            .filter_map(Node::as_element)
            .find(|child| child.is(&ElementType::Title)),
        ElementType::Body | ElementType::Section => {
            element.first_child().and_then(Node::as_element)
        }
        _ => Some(element),
    }
}

/// Placeholder text to surface for `element`, if its content is empty
///
/// Yields the slot's `default`, or an empty string when no default is set.
pub fn resolve_placeholder(element: &Element) -> Option<&str> {
    let slot = placeholder_slot(element)?;
    if first_child_is_empty(slot) {
        Some(slot.default.as_deref().unwrap_or(""))
    } else {
        None
    }
}

/// Walk the document depth-first and resolve every element that shows a
/// placeholder, keyed by the element's own path
///
/// Containers are skipped here since their slot is visited in its own right.
pub fn collect_placeholders(doc: &Document) -> Vec<(Path, String)> {
    let mut found = Vec::new();
    doc.walk(|path, node| {
        if let Some(element) = node.as_element() {
            if element.kind.is_container() {
                return;
            }
            if let Some(text) = resolve_placeholder(element) {
                found.push((path.clone(), text.to_string()));
            }
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Text;

    fn topic(title_default: &str, para_default: &str) -> Element {
        Element::with_children(
            ElementType::Topic,
            vec![
                Element::with_children(ElementType::Title, vec![Text::placeholder().into()])
                    .with_default(title_default)
                    .into(),
                Element::with_children(
                    ElementType::Body,
                    vec![Element::placeholder_paragraph(para_default).into()],
                )
                .into(),
            ],
        )
    }

    #[test]
    fn test_empty_text_leaf() {
        assert!(is_empty_text_leaf(&Text::placeholder().into()));
        assert!(!is_empty_text_leaf(&Node::text("")));
        assert!(!is_empty_text_leaf(&Element::paragraph("").into()));
    }

    #[test]
    fn test_first_child_is_empty_looks_through_wrapper() {
        let body = Element::with_children(
            ElementType::Body,
            vec![Element::placeholder_paragraph("p").into()],
        );
        assert!(first_child_is_empty(&body));
        assert!(first_child_is_empty(&Element::placeholder_paragraph("p")));
        assert!(!first_child_is_empty(&Element::paragraph("text")));
        assert!(!first_child_is_empty(&Element::new(ElementType::Paragraph)));
    }

    #[test]
    fn test_resolve_uses_default_or_empty() {
        assert_eq!(
            resolve_placeholder(&Element::placeholder_paragraph("add Paragraph...")),
            Some("add Paragraph...")
        );

        let mut bare = Element::placeholder_paragraph("x");
        bare.default = None;
        assert_eq!(resolve_placeholder(&bare), Some(""));

        assert_eq!(resolve_placeholder(&Element::paragraph("full")), None);
    }

    #[test]
    fn test_containers_delegate_to_slot() {
        let topic = topic("topic title...", "topic para...");
        assert_eq!(resolve_placeholder(&topic), Some("topic title..."));

        let body = topic.children[1].as_element().unwrap();
        assert_eq!(resolve_placeholder(body), Some("topic para..."));

        let untitled = Element::with_children(ElementType::Topic, vec![]);
        assert_eq!(resolve_placeholder(&untitled), None);
    }

    #[test]
    fn test_collect_placeholders_walks_every_level() {
        let doc = Document::from_blocks(vec![
            topic("topic title...", "topic para...").into(),
            Element::paragraph("filled").into(),
        ]);

        let found = collect_placeholders(&doc);
        assert_eq!(
            found,
            vec![
                (Path::new(vec![0, 0]), "topic title...".to_string()),
                (Path::new(vec![0, 1, 0]), "topic para...".to_string()),
            ]
        );
    }
}
