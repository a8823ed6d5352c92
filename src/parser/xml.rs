use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::util::utf;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

pub(crate) type ByteReader<'a> = Reader<&'a [u8]>;

/// Named entities resolved besides numeric character references.
#[rustfmt::skip]
const ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"), ("lt", "<"), ("gt", ">"), ("quot", "\""), ("apos", "'"),
    ("nbsp", "\u{a0}"), ("shy", "\u{ad}"), ("copy", "\u{a9}"), ("reg", "\u{ae}"),
    ("ndash", "\u{2013}"), ("mdash", "\u{2014}"), ("hellip", "\u{2026}"),
    ("lsquo", "\u{2018}"), ("rsquo", "\u{2019}"), ("ldquo", "\u{201c}"), ("rdquo", "\u{201d}"),
];

/// Creates a lenient reader over `data`, ignoring a leading UTF-8 BOM.
///
/// Mismatched end tags are tolerated, as real-world EPUB content
/// regularly contains them.
pub(crate) fn new_reader(data: &[u8]) -> ByteReader<'_> {
    let mut reader = Reader::from_reader(utf::strip_bom(data));
    reader.config_mut().check_end_names = false;
    reader
}

pub(crate) trait XmlReader<'a> {
    /// Iterator-like method to read the next [`Event`].
    fn next(&mut self) -> Option<ParserResult<Event<'a>>>;

    /// Retrieve consolidated text for a specified element up to its end tag,
    /// collapsing runs of whitespace into a single space.
    fn get_element_text(&mut self, start: &BytesStart) -> ParserResult<String> {
        self.get_raw_element_text(start)
            .map(|text| collapse_whitespace(&text))
    }

    /// Retrieve the text for a specified element up to its end tag, whitespace intact.
    fn get_raw_element_text(&mut self, start: &BytesStart) -> ParserResult<String> {
        let mut value = String::new();

        while let Some(result) = self.next() {
            let event = result?;

            if matches!(&event, Event::End(el) if el.name() == start.name()) {
                break;
            }
            push_text(&mut value, &event);
        }
        Ok(value)
    }

    /// Skips everything up to and including the end tag of `start`.
    fn skip_element(&mut self, start: &BytesStart) -> ParserResult<()> {
        let mut depth = 0_usize;

        while let Some(result) = self.next() {
            match result? {
                Event::Start(el) if el.name() == start.name() => depth += 1,
                Event::End(el) if el.name() == start.name() => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl<'a> XmlReader<'a> for ByteReader<'a> {
    fn next(&mut self) -> Option<ParserResult<Event<'a>>> {
        match self.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result.map_err(|error| FormatError::Unparsable(Box::new(error)))),
        }
    }
}

pub(crate) trait XmlElement {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool;

    /// Retrieves the unescaped value of the attribute with the exact qualified `name`.
    fn get_attribute(&self, name: &str) -> Option<String>;

    fn xml_attributes(&self) -> XmlAttributes;

    fn qualified_name(&self) -> String;
}

impl XmlElement for BytesStart<'_> {
    fn is_local_name(&self, target_local_name: impl AsRef<[u8]>) -> bool {
        self.local_name().as_ref() == target_local_name.as_ref()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes()
            .flatten()
            .find(|attribute| attribute.key.as_ref() == name.as_bytes())
            .map(|attribute| unescape(&String::from_utf8_lossy(&attribute.value)).into_owned())
    }

    fn xml_attributes(&self) -> XmlAttributes {
        XmlAttributes(
            self.attributes()
                .flatten()
                .map(|attribute| {
                    (
                        String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
                        unescape(&String::from_utf8_lossy(&attribute.value)).into_owned(),
                    )
                })
                .collect(),
        )
    }

    fn qualified_name(&self) -> String {
        String::from_utf8_lossy(self.name().as_ref()).into_owned()
    }
}

/// Owned, unescaped attributes of an element, consumed as they are interpreted.
pub(crate) struct XmlAttributes(Vec<(String, String)>);

impl XmlAttributes {
    /// Removes and returns the value of the attribute with the exact qualified `name`.
    pub(crate) fn take(&mut self, name: &str) -> Option<String> {
        self.0
            .iter()
            .position(|(key, _)| key == name)
            .map(|i| self.0.remove(i).1)
    }

    /// Same as [`Self::take`], although any namespace prefix is ignored,
    /// so that `opf:role` and `role` both match `role`.
    pub(crate) fn take_local(&mut self, local_name: &str) -> Option<String> {
        self.0
            .iter()
            .position(|(key, _)| local_part(key) == local_name)
            .map(|i| self.0.remove(i).1)
    }

    pub(crate) fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}

fn local_part(qualified_name: &str) -> &str {
    qualified_name
        .split_once(':')
        .map_or(qualified_name, |(_, local)| local)
}

/// Appends the textual content of `event`, resolving entity references.
pub(crate) fn push_text(value: &mut String, event: &Event) {
    match event {
        Event::Text(text) => value.push_str(
            &text
                .decode()
                .unwrap_or_else(|_| String::from_utf8_lossy(text.as_ref())),
        ),
        Event::CData(cdata) => value.push_str(
            &cdata
                .decode()
                .unwrap_or_else(|_| String::from_utf8_lossy(cdata.as_ref())),
        ),
        Event::GeneralRef(reference) => {
            let name = String::from_utf8_lossy(reference);

            match resolve_entity(&name) {
                Some(resolved) => value.push_str(&resolved),
                // Unknown entities are kept verbatim
                None => {
                    value.push('&');
                    value.push_str(&name);
                    value.push(';');
                }
            }
        }
        _ => {}
    }
}

pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn resolve_entity(name: &str) -> Option<Cow<'static, str>> {
    if let Some(code) = name.strip_prefix('#') {
        let code = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }
    ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, resolved)| Cow::Borrowed(*resolved))
}

/// Replaces entity and character references within `raw`.
///
/// Unrecognized references are left untouched.
pub(crate) fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    let mut value = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        value.push_str(&rest[..start]);
        rest = &rest[start..];

        let resolved = rest
            .find(';')
            .and_then(|end| Some((end, resolve_entity(&rest[1..end])?)));

        match resolved {
            Some((end, resolved)) => {
                value.push_str(&resolved);
                rest = &rest[end + 1..];
            }
            None => {
                value.push('&');
                rest = &rest[1..];
            }
        }
    }
    value.push_str(rest);
    Cow::Owned(value)
}
