//! Document tree to DITA element tree
//!
//! One depth-first pass over the root blocks. Every block handler appends to
//! the element it is given; topics go to a separate sink so a topic found
//! anywhere below another topic ends up as that topic's next sibling instead
//! of inside its body.

use super::inline::{append_inline, is_inline};
use super::xml::XmlElement;
use super::{DITA_NAMESPACE, ROOT_TOPIC_ID, UNTITLED_TITLE};
use crate::ExportSettings;
use doc_model::{resolve_placeholder, Attributes, Document, Element, ElementType, Node, Path};
use tracing::{debug, warn};

pub(crate) struct Builder<'a> {
    settings: &'a ExportSettings,
    next_topic: usize,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(settings: &'a ExportSettings) -> Self {
        Self {
            settings,
            next_topic: 0,
        }
    }

    /// Build the root topic for `doc`
    pub(crate) fn build(mut self, doc: &Document) -> XmlElement {
        let mut root = XmlElement::new("topic")
            .with_attr("id", ROOT_TOPIC_ID)
            .with_attr("xmlns", DITA_NAMESPACE)
            .with_child(XmlElement::inline("title").with_text(self.settings.document_title.as_str()));

        let mut body = XmlElement::new("body");
        let mut topics = Vec::new();
        for (index, node) in doc.blocks().iter().enumerate() {
            self.block(node, &Path::new(vec![index]), &mut body, &mut topics);
        }

        root.push(body);
        for topic in topics {
            root.push(topic);
        }
        root
    }

    /// Emit one block into `parent`, sending topics to `topics`
    fn block(
        &mut self,
        node: &Node,
        path: &Path,
        parent: &mut XmlElement,
        topics: &mut Vec<XmlElement>,
    ) {
        let element = match node {
            Node::Element(element) => element,
            Node::Text(text) => {
                if !text.text.is_empty() {
                    let mut p = XmlElement::inline("p");
                    append_inline(&mut p, std::slice::from_ref(node), path, self.settings);
                    parent.push(p);
                }
                return;
            }
        };

        match &element.kind {
            ElementType::Topic => topics.extend(self.topic(element, path)),
            ElementType::Body => {
                self.children(element, path, parent, topics);
            }
            ElementType::Section => {
                let section = self.section(element, path, topics);
                parent.push(section);
            }
            ElementType::Paragraph | ElementType::Title | ElementType::Link => {
                parent.push(self.text_block("p", element, path));
            }
            kind if kind.is_heading() => {
                let mut p = XmlElement::inline("p").with_attr("outputclass", kind.as_str());
                self.fill_text(&mut p, element, path);
                parent.push(p);
            }
            kind if kind.is_alignment() => self.children(element, path, parent, topics),
            kind if kind.is_list() => {
                let list = self.list(element, path, topics);
                parent.push(list);
            }
            ElementType::Blockquote => {
                let lq = self.wrapper("lq", element, path, topics);
                parent.push(lq);
            }
            ElementType::Note => {
                let note = self.wrapper("note", element, path, topics);
                parent.push(note);
            }
            ElementType::Table => {
                if let Some(table) = self.table(element, path, topics) {
                    parent.push(table);
                }
            }
            ElementType::Figure => parent.push(self.figure(element, path)),
            ElementType::Image => match &element.url {
                Some(url) => {
                    let mut image = XmlElement::new("image").with_attr("href", url.as_str());
                    self.pass_through(&mut image, element, path);
                    parent.push(image);
                }
                None => debug!(path = %path, "skipping image without url"),
            },
            kind => debug!(path = %path, kind = %kind, "skipping unsupported node"),
        }
    }

    fn children(
        &mut self,
        element: &Element,
        path: &Path,
        parent: &mut XmlElement,
        topics: &mut Vec<XmlElement>,
    ) {
        for (index, child) in element.children.iter().enumerate() {
            self.block(child, &path.child(index), parent, topics);
        }
    }

    /// The topic followed by every topic found below it, in document order
    fn topic(&mut self, element: &Element, path: &Path) -> Vec<XmlElement> {
        let id = match element.attr.get("id") {
            Some(id) => id.to_string(),
            None => self.next_topic_id(),
        };

        let mut topic = XmlElement::new("topic")
            .with_attr("id", id)
            .with_attr("xmlns", DITA_NAMESPACE);
        self.pass_through(&mut topic, element, path);

        let mut title: Option<XmlElement> = None;
        let mut body = XmlElement::new("body");
        let mut nested = Vec::new();

        for (index, child) in element.children.iter().enumerate() {
            let child_path = path.child(index);
            match child {
                Node::Element(child) if child.is(&ElementType::Title) && title.is_none() => {
                    let mut xml = XmlElement::inline("title")
                        .with_text(self.title_text(child).unwrap_or_else(|| UNTITLED_TITLE.to_string()));
                    self.pass_through(&mut xml, child, &child_path);
                    title = Some(xml);
                }
                Node::Element(child) if child.is(&ElementType::Body) => {
                    self.pass_through(&mut body, child, &child_path);
                    self.children(child, &child_path, &mut body, &mut nested);
                }
                _ => self.block(child, &child_path, &mut body, &mut nested),
            }
        }

        topic.push(title.unwrap_or_else(|| XmlElement::inline("title").with_text(UNTITLED_TITLE)));
        topic.push(body);

        let mut out = Vec::with_capacity(1 + nested.len());
        out.push(topic);
        out.extend(nested);
        out
    }

    fn next_topic_id(&mut self) -> String {
        self.next_topic += 1;
        format!("{}{}", self.settings.topic_id_prefix, self.next_topic)
    }

    /// `<section>` whose leading heading or title becomes its `<title>`
    fn section(
        &mut self,
        element: &Element,
        path: &Path,
        topics: &mut Vec<XmlElement>,
    ) -> XmlElement {
        let mut section = XmlElement::new("section");
        self.pass_through(&mut section, element, path);

        let heading = element
            .children
            .first()
            .and_then(Node::as_element)
            .filter(|first| first.kind.is_heading() || first.is(&ElementType::Title));
        if let Some(heading) = heading {
            if let Some(text) = self.title_text(heading) {
                let mut title = XmlElement::inline("title").with_text(text);
                self.pass_through(&mut title, heading, &path.child(0));
                section.push(title);
            }
        }

        let skip = usize::from(heading.is_some());
        for (index, child) in element.children.iter().enumerate().skip(skip) {
            self.block(child, &path.child(index), &mut section, topics);
        }
        section
    }

    /// `<lq>` or `<note>`: a single paragraph for text runs, blocks otherwise
    fn wrapper(
        &mut self,
        name: &str,
        element: &Element,
        path: &Path,
        topics: &mut Vec<XmlElement>,
    ) -> XmlElement {
        let mut wrapper = XmlElement::new(name);
        self.pass_through(&mut wrapper, element, path);

        if element.children.iter().all(is_inline) {
            let mut p = XmlElement::inline("p");
            self.fill_text(&mut p, element, path);
            wrapper.push(p);
        } else {
            self.children(element, path, &mut wrapper, topics);
        }
        wrapper
    }

    /// `<ol>` or `<ul>` with one `<li>` per item
    fn list(&mut self, element: &Element, path: &Path, topics: &mut Vec<XmlElement>) -> XmlElement {
        let ordered = match element.kind {
            ElementType::OrderedList => true,
            ElementType::UnorderedList => false,
            _ => element.ordered.unwrap_or(false),
        };
        let mut list = XmlElement::new(if ordered { "ol" } else { "ul" });
        self.pass_through(&mut list, element, path);

        for (index, child) in element.children.iter().enumerate() {
            let item_path = path.child(index);
            match child {
                Node::Element(item) if item.is(&ElementType::ListItem) => {
                    let li = self.list_item(item, &item_path, topics);
                    list.push(li);
                }
                Node::Element(nested) if nested.kind.is_list() => {
                    let nested = self.list(nested, &item_path, topics);
                    list.push(XmlElement::new("li").with_child(nested));
                }
                Node::Text(text) if !text.text.is_empty() => {
                    let mut p = XmlElement::inline("p");
                    append_inline(&mut p, std::slice::from_ref(child), &item_path, self.settings);
                    list.push(XmlElement::new("li").with_child(p));
                }
                _ => debug!(path = %item_path, "skipping non-item list child"),
            }
        }
        list
    }

    /// Runs of inline children become paragraphs; nested lists and blocks
    /// follow in order
    fn list_item(&mut self, item: &Element, path: &Path, topics: &mut Vec<XmlElement>) -> XmlElement {
        let mut li = XmlElement::new("li");
        self.pass_through(&mut li, item, path);

        let mut run_start: Option<usize> = None;
        for (index, child) in item.children.iter().enumerate() {
            if is_inline(child) {
                run_start.get_or_insert(index);
                continue;
            }
            if let Some(start) = run_start.take() {
                self.push_run(&mut li, &item.children[start..index], path);
            }
            let child_path = path.child(index);
            match child {
                Node::Element(nested) if nested.kind.is_list() => {
                    let nested = self.list(nested, &child_path, topics);
                    li.push(nested);
                }
                _ => self.block(child, &child_path, &mut li, topics),
            }
        }
        if let Some(start) = run_start {
            self.push_run(&mut li, &item.children[start..], path);
        }

        if li.children.is_empty() {
            let mut p = XmlElement::inline("p");
            if let Some(text) = self.placeholder_text(item) {
                p.push_text(text);
            }
            li.push(p);
        }
        li
    }

    fn push_run(&self, li: &mut XmlElement, run: &[Node], path: &Path) {
        let mut p = XmlElement::inline("p");
        append_inline(&mut p, run, path, self.settings);
        if !p.children.is_empty() {
            li.push(p);
        }
    }

    /// CALS-style table; the first row is the header
    fn table(
        &mut self,
        element: &Element,
        path: &Path,
        topics: &mut Vec<XmlElement>,
    ) -> Option<XmlElement> {
        let rows: Vec<(usize, &Element)> = element
            .children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| match child {
                Node::Element(row) if row.is(&ElementType::TableRow) => Some((index, row)),
                _ => None,
            })
            .collect();

        let Some((_, first_row)) = rows.first() else {
            warn!(path = %path, "skipping table without rows");
            return None;
        };

        let cols = first_row
            .children
            .iter()
            .filter(|cell| cell.is_element_of(&ElementType::TableCell))
            .count();

        let mut table = XmlElement::new("table");
        self.pass_through(&mut table, element, path);
        let mut tgroup = XmlElement::new("tgroup").with_attr("cols", cols.to_string());
        let mut thead = XmlElement::new("thead");
        let mut tbody = XmlElement::new("tbody");

        for (position, (index, row)) in rows.iter().enumerate() {
            let row = self.row(row, &path.child(*index), topics);
            if position == 0 {
                thead.push(row);
            } else {
                tbody.push(row);
            }
        }

        tgroup.push(thead);
        tgroup.push(tbody);
        table.push(tgroup);
        Some(table)
    }

    fn row(&mut self, row: &Element, path: &Path, topics: &mut Vec<XmlElement>) -> XmlElement {
        let mut xml = XmlElement::new("row");
        self.pass_through(&mut xml, row, path);

        for (index, child) in row.children.iter().enumerate() {
            let cell_path = path.child(index);
            match child {
                Node::Element(cell) if cell.is(&ElementType::TableCell) => {
                    let mut entry = XmlElement::new("entry");
                    self.pass_through(&mut entry, cell, &cell_path);
                    self.children(cell, &cell_path, &mut entry, topics);
                    xml.push(entry);
                }
                _ => debug!(path = %cell_path, "skipping non-cell row child"),
            }
        }
        xml
    }

    /// `<figure>` with an optional caption and image
    fn figure(&self, element: &Element, path: &Path) -> XmlElement {
        let mut figure = XmlElement::new("figure");
        self.pass_through(&mut figure, element, path);

        let caption = element.title.clone().filter(|title| !title.is_empty()).or_else(|| {
            element
                .children
                .iter()
                .filter_map(Node::as_element)
                .find(|child| child.is(&ElementType::Title))
                .and_then(|title| self.title_text(title))
        });
        if let Some(caption) = caption {
            figure.push(XmlElement::inline("title").with_text(caption));
        }

        if let Some(href) = element.src.as_ref().or(element.url.as_ref()) {
            figure.push(XmlElement::new("image").with_attr("href", href.as_str()));
        }
        figure
    }

    /// Inline element named `name` carrying the element's text
    fn text_block(&self, name: &str, element: &Element, path: &Path) -> XmlElement {
        let mut xml = XmlElement::inline(name);
        self.fill_text(&mut xml, element, path);
        xml
    }

    /// Attributes and inline content of a text block, or its placeholder
    /// text when it has none
    fn fill_text(&self, xml: &mut XmlElement, element: &Element, path: &Path) {
        self.pass_through(xml, element, path);
        if element.is(&ElementType::Link) {
            append_inline(xml, std::slice::from_ref(&Node::Element(element.clone())), path, self.settings);
        } else if element.text_content().is_empty() {
            if let Some(text) = self.placeholder_text(element) {
                xml.push_text(text);
            }
        } else {
            append_inline(xml, &element.children, path, self.settings);
        }
    }

    fn title_text(&self, element: &Element) -> Option<String> {
        let text = element.text_content();
        if text.is_empty() {
            self.placeholder_text(element).map(str::to_string)
        } else {
            Some(text)
        }
    }

    /// Default text for an element with empty content
    fn placeholder_text<'e>(&self, element: &'e Element) -> Option<&'e str> {
        if !self.settings.emit_placeholder_defaults {
            return None;
        }
        resolve_placeholder(element)
            .filter(|text| !text.is_empty())
            .or(element.default.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// Copy the element's attribute bag onto `xml`, after the attributes
    /// the builder already set
    fn pass_through(&self, xml: &mut XmlElement, element: &Element, path: &Path) {
        for (key, value) in element.attr.iter() {
            if xml.has_attr(key) {
                continue;
            }
            if !Attributes::is_well_formed_name(key) {
                warn!(path = %path, attribute = key, "dropping attribute with malformed name");
                continue;
            }
            xml.push_attr(key, value);
        }
    }
}
