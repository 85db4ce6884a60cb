//! In-memory XML element tree and its renderer
//!
//! The DITA builder assembles an [`XmlElement`] tree first and renders it in
//! a second pass, so containment decisions (such as moving a topic after its
//! parent's body) never have to be made while bytes are being written.

use crate::{Result, StoreError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Cursor;
use tracing::debug;

/// A node of the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An output element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    /// Render children on one line even when they are all elements
    pub inline_content: bool,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            inline_content: false,
        }
    }

    /// Element whose content is text-level (paragraphs, titles)
    pub fn inline(name: impl Into<String>) -> Self {
        Self {
            inline_content: true,
            ..Self::new(name)
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attr(key, value);
        self
    }

    /// Element holding a single text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((key.into(), value.into()));
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == key)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append text; empty strings add nothing
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Child elements in order
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element named `name`
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text of all descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Whether any direct child is text, making this mixed content
    fn has_text_children(&self) -> bool {
        self.children.iter().any(|child| matches!(child, XmlNode::Text(_)))
    }
}

/// Render a complete document with an XML declaration
///
/// Attributes are written in the order they were pushed. Mixed content is
/// written on one line so indentation never leaks into text.
pub fn render_document(root: &XmlElement, indent_width: usize) -> Result<String> {
    let mut writer = if indent_width > 0 {
        Writer::new_with_indent(Cursor::new(Vec::new()), b' ', indent_width)
    } else {
        Writer::new(Cursor::new(Vec::new()))
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner().into_inner();
    if indent_width > 0 {
        bytes.push(b'\n');
    }
    Ok(String::from_utf8(bytes)?)
}

/// Render an element without declaration or indentation
pub fn render_fragment(element: &XmlElement) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_element(&mut writer, element)?;
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        let value = xml_safe(value, &element.name);
        start.push_attribute((key.as_str(), &*value));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;

    if element.inline_content || element.has_text_children() {
        let mut inline = String::new();
        for child in &element.children {
            match child {
                XmlNode::Text(text) => {
                    let text = xml_safe(text, &element.name);
                    inline.push_str(&quick_xml::escape::partial_escape(&*text))
                }
                XmlNode::Element(child) => inline.push_str(&render_fragment(child)?),
            }
        }
        writer
            .write_event(Event::Text(BytesText::from_escaped(inline)))
            .map_err(xml_error)?;
    } else {
        for child in element.elements() {
            write_element(writer, child)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(xml_error)
}

/// Text with the characters XML 1.0 forbids removed
fn xml_safe<'t>(text: &'t str, element: &str) -> Cow<'t, str> {
    if !text.chars().any(is_forbidden_char) {
        return Cow::Borrowed(text);
    }
    debug!(element, "dropping characters not allowed in XML");
    Cow::Owned(text.chars().filter(|c| !is_forbidden_char(*c)).collect())
}

fn is_forbidden_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

fn xml_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::Xml(err.to_string())
}
