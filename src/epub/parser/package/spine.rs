use crate::epub::consts::{self, bytes};
use crate::epub::package::{ItemRef, Spine};
use crate::epub::parser::package::PackageParser;
use crate::epub::parser::tokens;
use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::parser::xml::XmlElement;
use quick_xml::events::BytesStart;

impl PackageParser<'_> {
    pub(super) fn parse_spine(&mut self, spine_start: &BytesStart, spine: &mut Spine) -> ParserResult<()> {
        Self::parse_spine_attributes(spine_start, spine);

        self.for_each_child(spine_start, |_, el, _| {
            if !el.is_local_name(bytes::ITEMREF) {
                return Ok(());
            }
            let mut attributes = el.xml_attributes();
            let idref = attributes
                .take(consts::IDREF)
                .ok_or_else(|| FormatError::MissingAttribute("spine itemref[idref]".into()))?;

            spine.item_refs.push(ItemRef {
                idref,
                id: attributes.take(consts::ID),
                // Only an explicit "no" makes an itemref non-linear
                linear: attributes
                    .take(consts::LINEAR)
                    .is_none_or(|linear| linear.trim() != "no"),
                properties: tokens(attributes.take(consts::PROPERTIES)),
            });
            Ok(())
        })
    }

    pub(super) fn parse_spine_attributes(spine_start: &BytesStart, spine: &mut Spine) {
        let mut attributes = spine_start.xml_attributes();
        spine.toc = attributes.take(consts::TOC);
        spine.page_progression_direction = attributes.take(consts::PAGE_PROGRESSION_DIRECTION);
    }
}
