use crate::epub::consts::{self, bytes};
use crate::epub::package::GuideReference;
use crate::epub::parser::package::PackageParser;
use crate::parser::ParserResult;
use crate::parser::xml::XmlElement;
use quick_xml::events::BytesStart;

impl PackageParser<'_> {
    pub(super) fn parse_guide(
        &mut self,
        guide_start: &BytesStart,
        guide: &mut Vec<GuideReference>,
    ) -> ParserResult<()> {
        self.for_each_child(guide_start, |_, el, _| {
            if !el.is_local_name(bytes::REFERENCE) {
                return Ok(());
            }
            let mut attributes = el.xml_attributes();

            match attributes.take(consts::HREF) {
                Some(href) => guide.push(GuideReference {
                    kind: attributes.take(consts::GUIDE_TYPE).unwrap_or_default(),
                    title: attributes.take(consts::GUIDE_TITLE),
                    href,
                }),
                None => log::warn!("Skipping guide reference without `href`"),
            }
            Ok(())
        })
    }
}
