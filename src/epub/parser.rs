//! XML codecs turning raw EPUB documents into their models.

mod container;
mod nav;
mod ncx;
mod package;

pub(super) use container::parse_container;
pub(super) use nav::parse_nav;
pub(super) use ncx::parse_ncx;
pub(super) use package::parse_package;

use crate::util::StrExt;

/// Space-separated tokens, such as manifest `properties`.
fn tokens(value: Option<String>) -> Vec<String> {
    value.map(|value| value.tokens()).unwrap_or_default()
}

/// Parses a nullable integer attribute, such as `playOrder`.
fn number(value: Option<String>) -> Option<u32> {
    value.and_then(|value| value.trim().parse().ok())
}
