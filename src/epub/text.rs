//! Plain-text extraction from (X)HTML documents.

use crate::parser::xml::{self, XmlElement, XmlReader};
use quick_xml::events::Event;

/// Elements whose content never contributes text.
const SKIPPED: &[&[u8]] = &[b"head", b"script", b"style", b"title"];

/// Elements that start and end a line.
#[rustfmt::skip]
const BLOCKS: &[&[u8]] = &[
    b"address", b"article", b"aside", b"blockquote", b"body", b"br", b"dd", b"div", b"dl",
    b"dt", b"figcaption", b"figure", b"footer", b"h1", b"h2", b"h3", b"h4", b"h5", b"h6",
    b"header", b"hr", b"li", b"main", b"nav", b"ol", b"p", b"pre", b"section", b"table",
    b"td", b"th", b"tr", b"ul",
];

/// Extracts the readable text of an (X)HTML document.
///
/// Each block-level element produces its own line, whitespace within a
/// line is collapsed and blank lines are dropped. Malformed markup ends
/// extraction early with whatever text was gathered.
pub(crate) fn html_to_text(html: &str) -> String {
    let mut reader = xml::new_reader(html.as_bytes());
    let mut lines = Vec::new();
    let mut line = String::new();

    let mut flush = |line: &mut String| {
        let collapsed = xml::collapse_whitespace(line);
        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
        line.clear();
    };

    while let Some(Ok(event)) = reader.next() {
        match &event {
            Event::Start(el) if SKIPPED.contains(&el.local_name().as_ref()) => {
                if reader.skip_element(el).is_err() {
                    break;
                }
            }
            Event::Start(el) | Event::Empty(el) if BLOCKS.contains(&el.local_name().as_ref()) => {
                flush(&mut line);
            }
            Event::End(el) => {
                if BLOCKS.contains(&el.local_name().as_ref()) {
                    flush(&mut line);
                }
            }
            Event::Empty(el) if el.is_local_name("img") => {
                if let Some(alt) = el.get_attribute("alt").filter(|alt| !alt.trim().is_empty()) {
                    line.push(' ');
                    line.push_str(&alt);
                    line.push(' ');
                }
            }
            _ => xml::push_text(&mut line, &event),
        }
    }
    flush(&mut line);
    lines.join("\n")
}
