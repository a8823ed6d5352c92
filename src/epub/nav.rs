//! The EPUB 3 navigation document.
//!
//! The whole XHTML tree is retained, so typed `nav` elements and their
//! nested `ol`/`li` lists are walked on demand rather than modelled.

pub use crate::parser::dom::{Element, Node, XmlDocument};

use crate::epub::consts;

const TOC: &str = "toc";

/// A `nav` element of the navigation document.
#[derive(Copy, Clone, Debug)]
pub struct Nav<'a> {
    element: &'a Element,
}

impl<'a> Nav<'a> {
    /// The space-separated `epub:type`, such as `toc`, `landmarks` or `page-list`.
    pub fn kind(&self) -> Option<&'a str> {
        self.element.attribute(consts::EPUB_TYPE)
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind()
            .is_some_and(|kinds| kinds.split_whitespace().any(|token| token == kind))
    }

    pub fn id(&self) -> Option<&'a str> {
        self.element.attribute(consts::ID)
    }

    /// The text of the first heading (`h1` through `h6`), if any.
    pub fn heading(&self) -> Option<String> {
        self.element
            .elements()
            .find(|el| is_heading(el.local_name()))
            .map(Element::text)
    }

    /// The top-level `ol` list.
    pub fn list(&self) -> Option<&'a Element> {
        self.element.elements().find(|el| el.local_name() == "ol")
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }
}

/// The parsed navigation document.
#[derive(Clone, Debug, PartialEq)]
pub struct NavDocument {
    pub(crate) document: XmlDocument,
}

impl NavDocument {
    pub(crate) fn new(document: XmlDocument) -> Self {
        Self { document }
    }

    /// A minimal document with an empty `toc` nav.
    pub(crate) fn template(title: &str) -> Self {
        let mut title_element = Element::new("title");
        if !title.is_empty() {
            title_element = title_element.with_child(Node::Text(title.to_owned()));
        }
        let head = Element::new("head").with_child(Node::Element(title_element));
        let nav = Element::new("nav")
            .with_attribute(consts::EPUB_TYPE, TOC)
            .with_attribute(consts::ID, TOC)
            .with_child(Node::Element(Element::new("ol")));
        let root = Element::new("html")
            .with_attribute("xmlns", consts::XHTML_NS)
            .with_attribute("xmlns:epub", consts::OPS_NS)
            .with_child(Node::Element(head))
            .with_child(Node::Element(
                Element::new("body").with_child(Node::Element(nav)),
            ));

        Self::new(XmlDocument::new(Some("html".to_owned()), root))
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    fn head(&self) -> Option<&Element> {
        self.document.root.elements().find(|el| el.local_name() == "head")
    }

    /// The text of `head > title`.
    pub fn title(&self) -> Option<String> {
        self.head()?
            .elements()
            .find(|el| el.local_name() == "title")
            .map(Element::text)
    }

    /// `link` elements of the head, such as stylesheets.
    pub fn links(&self) -> impl Iterator<Item = &Element> {
        self.head_elements("link")
    }

    /// `meta` elements of the head, such as a charset declaration.
    pub fn metas(&self) -> impl Iterator<Item = &Element> {
        self.head_elements("meta")
    }

    fn head_elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.head()
            .into_iter()
            .flat_map(|head| head.elements())
            .filter(move |el| el.local_name() == name)
    }

    /// Every `nav` element of the body, in document order.
    pub fn navs(&self) -> impl Iterator<Item = Nav<'_>> {
        self.document
            .root
            .descendants()
            .filter(|el| el.local_name() == "nav")
            .map(|element| Nav { element })
    }

    /// The first `nav` typed as `toc`.
    pub fn toc(&self) -> Option<Nav<'_>> {
        self.document
            .root
            .find(&is_toc_nav)
            .map(|element| Nav { element })
    }

    pub(crate) fn toc_list_mut(&mut self) -> Option<&mut Element> {
        self.document
            .root
            .find_mut(&is_toc_nav)?
            .children_mut()
            .iter_mut()
            .find_map(|child| match child {
                Node::Element(el) if el.local_name() == "ol" => Some(el),
                _ => None,
            })
    }
}

fn is_toc_nav(el: &Element) -> bool {
    el.local_name() == "nav"
        && el
            .attribute(consts::EPUB_TYPE)
            .is_some_and(|kinds| kinds.split_whitespace().any(|token| token == TOC))
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}
