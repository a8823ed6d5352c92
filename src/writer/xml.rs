use crate::parser::dom::{Element, Node, XmlDocument};
use crate::writer::WriterResult;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::borrow::Cow;
use std::io::Write;

pub(crate) struct XmlWriter<'a, W> {
    writer: quick_xml::Writer<W>,
    start_element: Option<BytesStart<'a>>,
}

impl<'a, W: Write> XmlWriter<'a, W> {
    /// Writer that indents nested elements by two spaces.
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer: quick_xml::Writer::new_with_indent(writer, b' ', 2),
            start_element: None,
        }
    }

    /// Writer that emits nodes exactly as given, for mixed content.
    pub(crate) fn new_compact(writer: W) -> Self {
        Self {
            writer: quick_xml::Writer::new(writer),
            start_element: None,
        }
    }

    pub(crate) fn write_utf8_declaration(&mut self) -> WriterResult<&mut Self> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(self)
    }

    pub(crate) fn write_doctype(&mut self, doctype: &str) -> WriterResult<&mut Self> {
        self.writer.get_mut().write_all(b"\n")?;
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped(doctype)))?;
        Ok(self)
    }

    /// Start an element: `<tag`
    pub(crate) fn start_element(&mut self, tag: &'a str) -> WriterResult<&mut Self> {
        // Close the previous element first (`<parent><nested`)
        self.finish_start_element()?;

        self.start_element = Some(BytesStart::new(tag));
        Ok(self)
    }

    /// Append an attribute to the [started](Self::start_element) element.
    /// A value of [`None`] is skipped.
    pub(crate) fn add_attribute<'b>(
        &mut self,
        name: &str,
        value: impl Into<Option<&'b str>>,
    ) -> &mut Self {
        if let (Some(element), Some(value)) = (&mut self.start_element, value.into()) {
            element.push_attribute(new_escaped_attribute(name, value));
        }
        self
    }

    pub(crate) fn add_attributes<'b>(
        &mut self,
        iter: impl IntoIterator<Item = (&'b str, &'b str)>,
    ) -> &mut Self {
        if let Some(element) = &mut self.start_element {
            element.extend_attributes(
                iter.into_iter()
                    .map(|(name, value)| new_escaped_attribute(name, value)),
            );
        }
        self
    }

    /// Finish writing a start element: **`<parent>`**
    ///
    /// See [`Self::finish_end_element`] to write the closing tag.
    pub(crate) fn finish_start_element(&mut self) -> WriterResult<()> {
        if let Some(element) = self.start_element.take() {
            self.writer.write_event(Event::Start(element))?;
        }
        Ok(())
    }

    /// Finish writing a parent element: **`<parent><inner/></parent>`**
    pub(crate) fn finish_end_element(&mut self, tag: &str) -> WriterResult<()> {
        self.finish_start_element()?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    /// The given `text` is **unescaped**.
    ///
    /// Finish writing a text element: **`<elem>text</elem>`**
    pub(crate) fn finish_text_element(&mut self, text: &str) -> WriterResult<()> {
        if let Some(element) = self.start_element.take() {
            self.writer.write_event(Event::Start(element.borrow()))?;
            self.writer
                .write_event(Event::Text(BytesText::from_escaped(escape(text))))?;
            self.writer.write_event(Event::End(element.to_end()))?;
        }
        Ok(())
    }

    /// Finish writing a self-closing element: **`<elem/>`**
    pub(crate) fn finish_empty_element(&mut self) -> WriterResult<()> {
        if let Some(element) = self.start_element.take() {
            self.writer.write_event(Event::Empty(element))?;
        }
        Ok(())
    }

    /// Writes `document` below the XML declaration, nodes verbatim.
    pub(crate) fn write_document(&mut self, document: &'a XmlDocument) -> WriterResult<()> {
        self.write_utf8_declaration()?;

        if let Some(doctype) = document.doctype() {
            self.write_doctype(doctype)?;
        }
        self.writer.get_mut().write_all(b"\n")?;
        self.write_dom_element(document.root())
    }

    fn write_dom_element(&mut self, element: &'a Element) -> WriterResult<()> {
        self.start_element(element.name())?.add_attributes(
            element
                .attributes()
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        if element.children().is_empty() {
            return self.finish_empty_element();
        }
        self.finish_start_element()?;

        for child in element.children() {
            match child {
                Node::Element(child) => self.write_dom_element(child)?,
                Node::Text(text) => {
                    self.writer.write_event(Event::Text(BytesText::new(text)))?;
                }
                Node::Comment(comment) => {
                    self.writer
                        .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
                }
            }
        }
        self.finish_end_element(element.name())
    }
}

fn new_escaped_attribute<'a>(name: &'a str, value: &'a str) -> Attribute<'a> {
    Attribute {
        key: quick_xml::name::QName(name.as_bytes()),
        value: match escape(value.trim()) {
            Cow::Borrowed(borrowed) => Cow::Borrowed(borrowed.as_bytes()),
            Cow::Owned(owned) => Cow::Owned(owned.into_bytes()),
        },
    }
}

fn get_entity(c: char) -> Option<&'static str> {
    Some(match c {
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&quot;",
        '&' => "&amp;",
        '\'' => "&apos;",
        // Whitespace that would otherwise be normalized away in attributes
        '\t' => "&#9;",
        '\n' => "&#10;",
        '\r' => "&#13;",
        '\u{00A0}' => "&#160;",
        _ => return None,
    })
}

pub(crate) fn escape(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(|c| get_entity(c).is_some()) else {
        return Cow::Borrowed(input);
    };
    let mut escaped = String::with_capacity(input.len() + 16);
    escaped.push_str(&input[..first]);

    for c in input[first..].chars() {
        match get_entity(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

macro_rules! write_element {
    // Empty (self-closing) element
    (writer: $w:expr, tag: $t:expr, $(attributes: $attrs:tt)?) => {
        $crate::writer::xml::write_element!(@helper $w, $t, $($attrs)?)
        .finish_empty_element()
    };
    // Text element
    (writer: $w:expr, tag: $t:expr, text: $text:expr, $(attributes: $attrs:tt)?) => {
        $crate::writer::xml::write_element!(@helper $w, $t, $($attrs)?)
        .finish_text_element($text)
    };
    // Parent element with inner content
    (writer: $w:expr, tag: $t:expr, $(attributes: $attrs:tt)? inner_content: $inner:block) => {{
        let tag = $t;
        $crate::writer::xml::write_element!(@helper $w, tag, $($attrs)?);
        $w.finish_start_element()?;
        $inner
        $w.finish_end_element(tag)
    }};

    (@helper $w:expr, $t:expr, { $($name:expr $(, if $cond:expr)? => $val:expr;)* }) => {{
        let mut element = $w.start_element($t)?;
        $(
        $(if $cond)? {
            element = element.add_attribute($name, $val);
        }
        )*
        element
    }};
    (@helper $w:expr, $t:expr,) => {
        $w.start_element($t)?
    };
}

pub(crate) use write_element;
