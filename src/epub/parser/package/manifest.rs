use crate::epub::consts::{self, bytes};
use crate::epub::package::{Manifest, ManifestItem};
use crate::epub::parser::package::PackageParser;
use crate::epub::parser::tokens;
use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::parser::xml::XmlElement;
use quick_xml::events::BytesStart;

impl PackageParser<'_> {
    pub(super) fn parse_manifest(
        &mut self,
        manifest_start: &BytesStart,
        manifest: &mut Manifest,
    ) -> ParserResult<()> {
        self.for_each_child(manifest_start, |_, el, _| {
            if !el.is_local_name(bytes::ITEM) {
                return Ok(());
            }
            let item = new_item(el)?;

            if manifest.by_id(&item.id).is_some() {
                log::warn!("Duplicate manifest id `{}`; keeping the first", item.id);
            } else {
                manifest.push(item);
            }
            Ok(())
        })
    }
}

fn new_item(el: &BytesStart) -> ParserResult<ManifestItem> {
    let mut attributes = el.xml_attributes();
    let mut require = |name: &str| {
        attributes
            .take(name)
            .ok_or_else(|| FormatError::MissingAttribute(format!("manifest item[{name}]")))
    };
    let id = require(consts::ID)?;
    let href = require(consts::HREF)?;

    Ok(ManifestItem {
        id,
        href,
        media_type: attributes.take(consts::MEDIA_TYPE).unwrap_or_default(),
        properties: tokens(attributes.take(consts::PROPERTIES)),
        fallback: attributes.take(consts::FALLBACK),
        fallback_style: attributes.take(consts::FALLBACK_STYLE),
        required_namespace: attributes.take(consts::REQUIRED_NAMESPACE),
        required_modules: attributes.take(consts::REQUIRED_MODULES),
        media_overlay: attributes.take(consts::MEDIA_OVERLAY),
    })
}
