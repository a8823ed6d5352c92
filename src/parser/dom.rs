//! A small owned XML tree, used where markup must survive a round trip
//! (the EPUB 3 navigation document).

use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlElement as _, XmlReader};
use quick_xml::events::{BytesStart, Event};

/// A parsed XML document: an optional doctype and its root [`Element`].
#[derive(Clone, Debug, PartialEq)]
pub struct XmlDocument {
    pub(crate) doctype: Option<String>,
    pub(crate) root: Element,
}

impl XmlDocument {
    pub(crate) fn new(doctype: Option<String>, root: Element) -> Self {
        Self { doctype, root }
    }

    /// The raw doctype declaration content, such as `html`.
    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// A node within an [`Element`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    Comment(String),
}

/// An owned XML element with its attributes and children in document order.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Node>,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub(crate) fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// The qualified name, such as `nav` or `epub:switch`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(&self.name, |(_, local)| local)
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Retrieve the value of the attribute with the exact qualified `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text and comments.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// All descendant elements in document (pre-)order, excluding `self`.
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        let mut stack: Vec<&Element> = self.elements().rev().collect();

        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.elements().rev());
            Some(next)
        })
    }

    /// The text content of this element and its descendants,
    /// with whitespace runs collapsed into a single space.
    pub fn text(&self) -> String {
        let mut value = String::new();
        self.push_text(&mut value);
        xml::collapse_whitespace(&value)
    }

    fn push_text(&self, value: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => value.push_str(text),
                Node::Element(element) => element.push_text(value),
                Node::Comment(_) => {}
            }
        }
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();

        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_owned(), value)),
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Depth-first search including `self`.
    pub(crate) fn find(&self, predicate: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.elements().find_map(|child| child.find(predicate))
    }

    /// Mutable counterpart of [`Self::find`].
    pub(crate) fn find_mut(&mut self, predicate: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => element.find_mut(predicate),
            _ => None,
        })
    }

    fn from_start(start: &BytesStart) -> Self {
        Self {
            name: start.qualified_name(),
            attributes: start.xml_attributes().into_vec(),
            children: Vec::new(),
        }
    }

    fn push_str(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => self.children.push(Node::Text(text.to_owned())),
        }
    }
}

/// Parses `data` into an [`XmlDocument`].
///
/// Unclosed elements are closed at the end of input and stray end tags are ignored.
/// DTDs are never resolved.
pub(crate) fn parse(data: &[u8]) -> ParserResult<Option<XmlDocument>> {
    let mut reader = xml::new_reader(data);
    let mut stack: Vec<Element> = Vec::new();
    let mut doctype = None;
    let mut root = None;

    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None => {
                root.get_or_insert(element);
            }
        }
    }

    while let Some(result) = reader.next() {
        let event = result?;

        match &event {
            Event::Start(el) => stack.push(Element::from_start(el)),
            Event::Empty(el) => attach(&mut stack, &mut root, Element::from_start(el)),
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) => {
                if let Some(parent) = stack.last_mut() {
                    let mut text = String::new();
                    xml::push_text(&mut text, &event);
                    parent.push_str(&text);
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let comment = String::from_utf8_lossy(comment).into_owned();
                    parent.children.push(Node::Comment(comment));
                }
            }
            Event::DocType(content) => {
                doctype = Some(String::from_utf8_lossy(content).trim().to_owned());
            }
            _ => {}
        }
    }
    while let Some(element) = stack.pop() {
        attach(&mut stack, &mut root, element);
    }
    Ok(root.map(|root| XmlDocument::new(doctype, root)))
}
