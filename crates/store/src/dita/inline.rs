//! Inline content: marked-up text leaves and links

use super::xml::{XmlElement, XmlNode};
use crate::ExportSettings;
use doc_model::{ElementType, Marks, Node, Path, Text};
use tracing::debug;

/// Placeholder for an absent color channel in legacy `props` output
const UNDEFINED_COLOR: &str = "undefined";

/// Whether `node` belongs in a paragraph's text run
pub(crate) fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text(_) => true,
        Node::Element(element) => element.is(&ElementType::Link),
    }
}

/// Append the inline rendering of `nodes` (children of the node at `parent`)
///
/// Nested lists are left to the list builder. Any other block-level element
/// found in a text run is skipped.
pub(crate) fn append_inline(
    target: &mut XmlElement,
    nodes: &[Node],
    parent: &Path,
    settings: &ExportSettings,
) {
    for (index, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(text) => {
                if let Some(rendered) = text_run(text, settings) {
                    target.children.push(rendered);
                }
            }
            Node::Element(element) if element.is(&ElementType::Link) => {
                let path = parent.child(index);
                match &element.url {
                    Some(url) => {
                        let mut xref = XmlElement::new("xref").with_attr("href", url.as_str());
                        append_inline(&mut xref, &element.children, &path, settings);
                        target.push(xref);
                    }
                    None => {
                        debug!(path = %path, "link without url, keeping its text");
                        append_inline(target, &element.children, &path, settings);
                    }
                }
            }
            Node::Element(element) if element.kind.is_list() => {}
            Node::Element(element) => {
                debug!(
                    path = %parent.child(index),
                    kind = %element.kind,
                    "skipping element inside inline content"
                );
            }
        }
    }
}

/// A text leaf wrapped in its highlighting and color elements
///
/// Empty leaves produce nothing.
fn text_run(text: &Text, settings: &ExportSettings) -> Option<XmlNode> {
    if text.text.is_empty() {
        return None;
    }

    let marks = &text.marks;
    let highlights = [
        (marks.is_code(), "codeph"),
        (marks.is_strikethrough(), "line-through"),
        (marks.is_subscript(), "sub"),
        (marks.is_superscript(), "sup"),
        (marks.is_underline(), "u"),
        (marks.is_italic(), "i"),
        (marks.is_bold(), "b"),
    ];

    let mut node = XmlNode::Text(text.text.clone());
    for (_, name) in highlights.iter().filter(|(set, _)| *set) {
        node = wrap(name, node);
    }

    if let Some(props) = color_props(marks, settings.legacy_undefined_colors) {
        let mut ph = XmlElement::new("ph").with_attr("props", props);
        ph.children.push(node);
        node = XmlNode::Element(ph);
    }

    Some(node)
}

fn wrap(name: &str, child: XmlNode) -> XmlNode {
    let mut element = XmlElement::new(name);
    element.children.push(child);
    XmlNode::Element(element)
}

/// The `props` value describing a leaf's colors, if it has any
///
/// Absent channels are left out unless `legacy` asks for the historical
/// `undefined` placeholder in both slots.
pub(crate) fn color_props(marks: &Marks, legacy: bool) -> Option<String> {
    if !marks.has_color() {
        return None;
    }

    if legacy {
        return Some(format!(
            "background-color: {}; color: {}",
            marks.bg_color.as_deref().unwrap_or(UNDEFINED_COLOR),
            marks.color.as_deref().unwrap_or(UNDEFINED_COLOR)
        ));
    }

    let parts: Vec<String> = [
        ("background-color", marks.bg_color.as_deref()),
        ("color", marks.color.as_deref()),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|value| format!("{name}: {value}")))
    .collect();

    Some(parts.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dita::xml::render_fragment;
    use doc_model::Element;

    fn render(nodes: Vec<Node>, settings: &ExportSettings) -> String {
        let mut p = XmlElement::inline("p");
        append_inline(&mut p, &nodes, &Path::new(vec![0]), settings);
        render_fragment(&p).unwrap()
    }

    #[test]
    fn test_color_props() {
        let red = Marks::new().with_color("red");
        assert_eq!(color_props(&red, false).as_deref(), Some("color: red"));
        assert_eq!(
            color_props(&red, true).as_deref(),
            Some("background-color: undefined; color: red")
        );

        let both = Marks::new().with_color("red").with_bg_color("#ff0");
        assert_eq!(
            color_props(&both, false).as_deref(),
            Some("background-color: #ff0; color: red")
        );
        assert_eq!(color_props(&Marks::new().with_bold(), false), None);
    }

    #[test]
    fn test_marks_nest_inside_color() {
        let leaf = Text::with_marks("x", Marks::new().with_bold().with_italic().with_color("blue"));
        let xml = render(vec![leaf.into()], &ExportSettings::default());
        assert_eq!(xml, r#"<p><ph props="color: blue"><b><i>x</i></b></ph></p>"#);
    }

    #[test]
    fn test_plain_and_empty_leaves() {
        let xml = render(
            vec![Node::text("a"), Text::placeholder().into(), Node::text("b")],
            &ExportSettings::default(),
        );
        assert_eq!(xml, "<p>ab</p>");
    }

    #[test]
    fn test_link_becomes_xref() {
        let link = Element::with_children(ElementType::Link, vec![Node::text("site")])
            .with_url("https://example.com");
        let xml = render(
            vec![Node::text("see "), link.into()],
            &ExportSettings::default(),
        );
        assert_eq!(xml, r#"<p>see <xref href="https://example.com">site</xref></p>"#);
    }

    #[test]
    fn test_block_elements_are_skipped() {
        let table = Element::new(ElementType::Table);
        let custom = Element::with_children(ElementType::from("mystery"), vec![Node::text("?")]);
        let xml = render(
            vec![Node::text("kept"), table.into(), custom.into()],
            &ExportSettings::default(),
        );
        assert_eq!(xml, "<p>kept</p>");
    }
}
