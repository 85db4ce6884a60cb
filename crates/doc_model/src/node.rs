//! Core node types
//!
//! A [`Node`] is either an [`Element`] (a typed container with children) or a
//! [`Text`] leaf. Both (de)serialize in the editor's JSON shape, so a snapshot
//! produced by the editor loads without any translation layer.

use crate::Marks;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

// =============================================================================
// Element Types
// =============================================================================

/// Structural type tag of an element
///
/// Tags round-trip through their editor spelling. Tags the model does not
/// know are kept verbatim in [`ElementType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    Heading,
    Blockquote,
    AlignLeft,
    AlignCenter,
    AlignRight,
    ListItem,
    OrderedList,
    UnorderedList,
    List,
    Link,
    Table,
    TableRow,
    TableCell,
    Image,
    Video,
    Equation,
    Section,
    Topic,
    Title,
    Body,
    Paragraph,
    Note,
    Figure,
    Custom(String),
}

impl ElementType {
    /// The editor spelling of this tag
    pub fn as_str(&self) -> &str {
        match self {
            ElementType::HeadingOne => "headingOne",
            ElementType::HeadingTwo => "headingTwo",
            ElementType::HeadingThree => "headingThree",
            ElementType::Heading => "heading",
            ElementType::Blockquote => "blockquote",
            ElementType::AlignLeft => "alignLeft",
            ElementType::AlignCenter => "alignCenter",
            ElementType::AlignRight => "alignRight",
            ElementType::ListItem => "list-item",
            ElementType::OrderedList => "orderedList",
            ElementType::UnorderedList => "unorderedList",
            ElementType::List => "list",
            ElementType::Link => "link",
            ElementType::Table => "table",
            ElementType::TableRow => "table-row",
            ElementType::TableCell => "table-cell",
            ElementType::Image => "image",
            ElementType::Video => "video",
            ElementType::Equation => "equation",
            ElementType::Section => "section",
            ElementType::Topic => "topic",
            ElementType::Title => "title",
            ElementType::Body => "body",
            ElementType::Paragraph => "paragraph",
            ElementType::Note => "note",
            ElementType::Figure => "figure",
            ElementType::Custom(tag) => tag,
        }
    }

    /// Containers that delegate their emptiness to a nested slot
    pub fn is_container(&self) -> bool {
        matches!(self, ElementType::Section | ElementType::Topic | ElementType::Body)
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            ElementType::HeadingOne
                | ElementType::HeadingTwo
                | ElementType::HeadingThree
                | ElementType::Heading
        )
    }

    pub fn is_alignment(&self) -> bool {
        matches!(
            self,
            ElementType::AlignLeft | ElementType::AlignCenter | ElementType::AlignRight
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            ElementType::OrderedList | ElementType::UnorderedList | ElementType::List
        )
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        match tag {
            "headingOne" => ElementType::HeadingOne,
            "headingTwo" => ElementType::HeadingTwo,
            "headingThree" => ElementType::HeadingThree,
            "heading" => ElementType::Heading,
            "blockquote" => ElementType::Blockquote,
            "alignLeft" => ElementType::AlignLeft,
            "alignCenter" => ElementType::AlignCenter,
            "alignRight" => ElementType::AlignRight,
            "list-item" => ElementType::ListItem,
            "orderedList" => ElementType::OrderedList,
            "unorderedList" => ElementType::UnorderedList,
            "list" => ElementType::List,
            "link" => ElementType::Link,
            "table" => ElementType::Table,
            "table-row" => ElementType::TableRow,
            "table-cell" => ElementType::TableCell,
            "image" => ElementType::Image,
            "video" => ElementType::Video,
            "equation" => ElementType::Equation,
            "section" => ElementType::Section,
            "topic" => ElementType::Topic,
            "title" => ElementType::Title,
            "body" => ElementType::Body,
            "paragraph" => ElementType::Paragraph,
            "note" => ElementType::Note,
            "figure" => ElementType::Figure,
            other => ElementType::Custom(other.to_string()),
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::from(tag.as_str())
    }
}

impl From<ElementType> for String {
    fn from(kind: ElementType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// Opaque attribute bag passed through to output verbatim
///
/// Keys are kept in sorted order so every consumer sees them in the same
/// order. The core never interprets values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check whether `name` is usable as an XML attribute name
    pub fn is_well_formed_name(name: &str) -> bool {
        static NAME: OnceLock<Option<Regex>> = OnceLock::new();
        NAME.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:-]*$").ok())
            .as_ref()
            .map(|re| re.is_match(name) && !name.starts_with("xmlns"))
            .unwrap_or(false)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// =============================================================================
// Text Leaves
// =============================================================================

/// A text leaf with formatting marks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(flatten)]
    pub marks: Marks,
    /// Set only while `text` is empty; the leaf then shows `default`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Text {
    /// Create a plain text leaf
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create an empty placeholder leaf
    pub fn placeholder() -> Self {
        Self {
            placeholder: true,
            ..Default::default()
        }
    }

    /// Create a text leaf with marks
    pub fn with_marks(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
            ..Default::default()
        }
    }

    /// Replace the text, dropping placeholder state once the leaf has content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if !self.text.is_empty() {
            self.placeholder = false;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// =============================================================================
// Elements
// =============================================================================

/// A typed element with ordered children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementType,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attr: Attributes,
    /// Text shown in place of an empty placeholder first child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
    /// List ordering for the generic `list` element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
    /// Target of links and embedded media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Figure image source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Figure caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Element {
    /// Create an element with no children
    pub fn new(kind: ElementType) -> Self {
        Self::with_children(kind, Vec::new())
    }

    /// Create an element with the given children
    pub fn with_children(kind: ElementType, children: Vec<Node>) -> Self {
        Self {
            kind,
            children,
            attr: Attributes::default(),
            default: None,
            placeholder: false,
            ordered: None,
            url: None,
            src: None,
            title: None,
        }
    }

    /// Create a paragraph holding one plain text leaf
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::with_children(ElementType::Paragraph, vec![Node::text(text)])
    }

    /// Create a paragraph holding one empty placeholder leaf
    pub fn placeholder_paragraph(default: impl Into<String>) -> Self {
        Self::with_children(ElementType::Paragraph, vec![Node::Text(Text::placeholder())])
            .with_default(default)
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attr.insert(key, value);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Check the element's type tag
    pub fn is(&self, kind: &ElementType) -> bool {
        self.kind == *kind
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Concatenated text of all descendant leaves
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

// =============================================================================
// Node
// =============================================================================

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    /// Create a plain text leaf node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::new(text))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Type tag for elements, None for text leaves
    pub fn kind(&self) -> Option<&ElementType> {
        self.as_element().map(|element| &element.kind)
    }

    /// Check if this node is an element of the given type
    pub fn is_element_of(&self, kind: &ElementType) -> bool {
        self.kind() == Some(kind)
    }

    /// Children of an element; text leaves have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_round_trips_tags() {
        for tag in ["headingOne", "list-item", "table-cell", "topic", "paragraph"] {
            assert_eq!(ElementType::from(tag).as_str(), tag);
        }
        let custom = ElementType::from("paragaph");
        assert_eq!(custom, ElementType::Custom("paragaph".to_string()));
        assert_eq!(custom.to_string(), "paragaph");
    }

    #[test]
    fn test_deserialize_editor_snapshot_node() {
        let json = r#"{
            "type": "topic",
            "children": [
                {
                    "type": "title",
                    "children": [{ "text": "", "placeholder": true, "bold": true }],
                    "placeholder": true,
                    "default": "topic title..."
                },
                { "type": "body", "children": [{ "type": "paragraph", "children": [{ "text": "Hi" }] }] }
            ]
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        let topic = node.as_element().unwrap();
        assert!(topic.is(&ElementType::Topic));

        let title = topic.children[0].as_element().unwrap();
        assert_eq!(title.default.as_deref(), Some("topic title..."));
        assert!(title.placeholder);

        let leaf = title.children[0].as_text().unwrap();
        assert!(leaf.placeholder);
        assert!(leaf.marks.is_bold());

        assert_eq!(node.text_content(), "Hi");
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let node = Node::from(Element::paragraph("x"));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"type":"paragraph","children":[{"text":"x"}]}"#);
    }

    #[test]
    fn test_element_without_children_field() {
        let node: Node = serde_json::from_str(r#"{"type": "image", "url": "a.png"}"#).unwrap();
        let image = node.as_element().unwrap();
        assert!(image.children.is_empty());
        assert_eq!(image.url.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_set_text_clears_placeholder() {
        let mut leaf = Text::placeholder();
        leaf.set_text("");
        assert!(leaf.placeholder);
        leaf.set_text("typed");
        assert!(!leaf.placeholder);
    }

    #[test]
    fn test_attribute_names() {
        assert!(Attributes::is_well_formed_name("id"));
        assert!(Attributes::is_well_formed_name("data-row"));
        assert!(Attributes::is_well_formed_name("outputclass"));
        assert!(Attributes::is_well_formed_name("xml:lang"));
        assert!(!Attributes::is_well_formed_name("1st"));
        assert!(!Attributes::is_well_formed_name("has space"));
        assert!(!Attributes::is_well_formed_name("xmlns"));
        assert!(!Attributes::is_well_formed_name(""));
    }
}
