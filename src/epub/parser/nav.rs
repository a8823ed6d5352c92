use crate::epub::nav::NavDocument;
use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::parser::dom;

/// Parses an EPUB 3 navigation document, retaining its whole tree.
///
/// The document requires an `html` root containing a `body`.
pub(crate) fn parse_nav(data: &[u8]) -> ParserResult<NavDocument> {
    let document = dom::parse(data)?
        .filter(|document| document.root.local_name() == "html")
        .ok_or_else(|| FormatError::MissingElement("nav html".into()))?;

    if !document.root.elements().any(|el| el.local_name() == "body") {
        return Err(FormatError::MissingElement("nav body".into()));
    }
    Ok(NavDocument::new(document))
}
