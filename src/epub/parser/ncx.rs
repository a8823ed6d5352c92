use crate::epub::consts::{self, bytes};
use crate::epub::ncx::{NavPoint, NavTarget, NavTargetList, NcxDocument, NcxMeta};
use crate::epub::parser::number;
use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::parser::xml::{self, ByteReader, XmlElement, XmlReader};
use quick_xml::events::{BytesStart, Event};

/// An element of the NCX still awaiting its end tag.
enum Open {
    Point {
        point: NavPoint,
        label: Option<String>,
        src: Option<String>,
    },
    Target {
        target: NavTarget,
        label: Option<String>,
        src: Option<String>,
    },
    List {
        list: NavTargetList,
        is_page_list: bool,
    },
}

struct NcxParser<'a> {
    reader: ByteReader<'a>,
    /// Open nav points, targets and lists; the last is innermost
    stack: Vec<Open>,
    ncx: NcxDocument,
    has_head: bool,
    has_doc_title: bool,
    has_nav_map: bool,
}

/// Parses an EPUB 2 `.ncx` document.
///
/// `head`, `docTitle` and `navMap` are required,
/// as well as a label and content source for every `navPoint`.
pub(crate) fn parse_ncx(data: &[u8]) -> ParserResult<NcxDocument> {
    NcxParser {
        reader: xml::new_reader(data),
        stack: Vec::new(),
        ncx: NcxDocument::default(),
        has_head: false,
        has_doc_title: false,
        has_nav_map: false,
    }
    .parse()
}

impl NcxParser<'_> {
    fn parse(mut self) -> ParserResult<NcxDocument> {
        while let Some(event) = self.reader.next() {
            match event? {
                Event::Start(el) => self.handle_start(&el, false)?,
                Event::Empty(el) => self.handle_start(&el, true)?,
                Event::End(el) => match el.local_name().as_ref() {
                    bytes::NAV_POINT => self.pop_nav_point()?,
                    bytes::PAGE_TARGET | bytes::NAV_TARGET => self.pop_target(),
                    bytes::PAGE_LIST | bytes::NAV_LIST => self.pop_list(),
                    _ => {}
                },
                _ => {}
            }
        }

        let missing = [
            (self.has_head, "ncx head"),
            (self.has_doc_title, "ncx docTitle"),
            (self.has_nav_map, "ncx navMap"),
        ];
        if let Some((_, element)) = missing.iter().find(|(present, _)| !present) {
            return Err(FormatError::MissingElement((*element).to_owned()));
        }
        Ok(self.ncx)
    }

    fn handle_start(&mut self, el: &BytesStart, is_empty: bool) -> ParserResult<()> {
        let read_text = |parser: &mut Self| -> ParserResult<String> {
            if is_empty {
                Ok(String::new())
            } else {
                parser.reader.get_element_text(el)
            }
        };

        match el.local_name().as_ref() {
            bytes::HEAD => self.has_head = true,
            bytes::META => {
                let mut attributes = el.xml_attributes();
                self.ncx.metas.push(NcxMeta {
                    name: attributes.take(consts::NAME).unwrap_or_default(),
                    content: attributes.take(consts::CONTENT).unwrap_or_default(),
                    scheme: attributes.take(consts::SCHEME),
                });
            }
            bytes::DOC_TITLE => {
                self.has_doc_title = true;
                self.ncx.doc_title = read_text(self)?;
            }
            bytes::DOC_AUTHOR => {
                let author = read_text(self)?;
                self.ncx.doc_authors.push(author);
            }
            bytes::NAV_MAP => self.has_nav_map = true,
            bytes::NAV_POINT => {
                let mut attributes = el.xml_attributes();
                let point = NavPoint {
                    id: attributes.take(consts::ID).unwrap_or_default(),
                    class: attributes.take(consts::CLASS),
                    play_order: number(attributes.take(consts::PLAY_ORDER)),
                    ..NavPoint::default()
                };
                self.stack.push(Open::Point {
                    point,
                    label: None,
                    src: None,
                });
                if is_empty {
                    self.pop_nav_point()?;
                }
            }
            bytes::PAGE_TARGET | bytes::NAV_TARGET => {
                let mut attributes = el.xml_attributes();
                let target = NavTarget {
                    id: attributes.take(consts::ID),
                    class: attributes.take(consts::CLASS),
                    kind: attributes.take(consts::GUIDE_TYPE),
                    value: attributes.take(consts::VALUE),
                    play_order: number(attributes.take(consts::PLAY_ORDER)),
                    ..NavTarget::default()
                };
                self.stack.push(Open::Target {
                    target,
                    label: None,
                    src: None,
                });
                if is_empty {
                    self.pop_target();
                }
            }
            name @ (bytes::PAGE_LIST | bytes::NAV_LIST) => {
                let mut attributes = el.xml_attributes();
                let list = NavTargetList {
                    id: attributes.take(consts::ID),
                    class: attributes.take(consts::CLASS),
                    ..NavTargetList::default()
                };
                self.stack.push(Open::List {
                    list,
                    is_page_list: name == bytes::PAGE_LIST,
                });
                if is_empty {
                    self.pop_list();
                }
            }
            bytes::NAV_LABEL => {
                let text = read_text(self)?;

                match self.stack.last_mut() {
                    Some(Open::Point { label, .. } | Open::Target { label, .. }) => {
                        label.get_or_insert(text);
                    }
                    Some(Open::List { list, .. }) => {
                        list.label.get_or_insert(text);
                    }
                    None => {}
                }
            }
            bytes::CONTENT => {
                let content_src = el.get_attribute(consts::SRC);

                if let Some(Open::Point { src, .. } | Open::Target { src, .. }) = self.stack.last_mut() {
                    *src = content_src;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn pop_nav_point(&mut self) -> ParserResult<()> {
        let Some(Open::Point { mut point, label, src }) = self.stack.pop() else {
            return Ok(());
        };
        point.label = label.ok_or_else(|| FormatError::MissingNavLabel(point.id.clone()))?;
        point.content_src = src.ok_or_else(|| FormatError::MissingNavContent(point.id.clone()))?;

        match self.stack.last_mut() {
            Some(Open::Point { point: parent, .. }) => parent.children.push(point),
            _ => self.ncx.nav_map.push(point),
        }
        Ok(())
    }

    fn pop_target(&mut self) {
        let Some(Open::Target { mut target, label, src }) = self.stack.pop() else {
            return;
        };
        target.label = label.unwrap_or_default();
        target.content_src = src.unwrap_or_default();

        if let Some(Open::List { list, .. }) = self.stack.last_mut() {
            list.targets.push(target);
        }
    }

    fn pop_list(&mut self) {
        let Some(Open::List { list, is_page_list }) = self.stack.pop() else {
            return;
        };
        if is_page_list {
            self.ncx.page_list = Some(list);
        } else {
            self.ncx.nav_lists.push(list);
        }
    }
}
