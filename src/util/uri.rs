//! Href handling: anchors, relative-to-absolute resolution and percent-encoding.
//!
//! Absolute archive paths always start with `/`, which denotes the container root.

use crate::errors::FormatError;
use percent_encoding::{AsciiSet, CONTROLS};
use std::borrow::Cow;

/// Characters escaped when producing the percent-encoded lookup variant of an href.
const HREF_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'^')
    .add(b'[')
    .add(b']');

/// Splits an href on the first `#` into its path and hash location.
pub(crate) fn split_href(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, anchor)) => (path, Some(anchor)),
        None => (href, None),
    }
}

/// The directory of `path`: everything before the last `/`, or empty.
pub(crate) fn parent(path: &str) -> &str {
    path.rfind('/').map_or("", |index| &path[..index])
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

pub(crate) fn encode(decoded: &str) -> Cow<'_, str> {
    percent_encoding::utf8_percent_encode(decoded, HREF_ENCODE_SET).into()
}

/// Resolves `href` against the document located at `base`, returning an
/// absolute archive path without the hash location.
///
/// - An href starting with `/` is already absolute and returned as-is.
/// - An href with a scheme (`http:`, `mailto:`) is returned unchanged.
/// - `./` segments are dropped and each `../` pops one directory level;
///   popping above the root fails.
///
/// Backslashes in either argument are treated as `/`.
pub(crate) fn resolve(href: &str, base: &str) -> Result<String, FormatError> {
    let href = href.replace('\\', "/");
    let (path, _) = split_href(&href);

    if path.starts_with('/') || has_scheme(path) {
        return Ok(path.to_owned());
    }

    let base = base.replace('\\', "/");

    // A bare `#anchor` refers to the base document itself.
    if path.is_empty() {
        return Ok(into_absolute(&base));
    }

    let mut segments: Vec<&str> = parent(&base)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(FormatError::NoRoomToNormalize {
                        href: href.clone(),
                        base: base.clone(),
                    });
                }
            }
            segment => segments.push(segment),
        }
    }

    Ok(format!("/{}", segments.join("/")))
}

/// Same as [`resolve`], although the path of `href` is percent-decoded first,
/// yielding the archive path of a manifest or navigation href.
pub(crate) fn resolve_decoded(href: &str, base: &str) -> Result<String, FormatError> {
    let (path, _) = split_href(href);
    resolve(&decode(path), base)
}

/// Produces the href that [`resolve`]s to `target` from the document at `base`.
///
/// Both arguments are absolute archive paths.
pub(crate) fn relativize(target: &str, base: &str) -> String {
    let base_dir: Vec<&str> = parent(base)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let target: Vec<&str> = target
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let common = base_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    // The file name itself never counts as a shared directory.
    let common = common.min(target.len().saturating_sub(1));

    let mut relative = "../".repeat(base_dir.len() - common);
    relative.push_str(&target[common..].join("/"));
    relative
}

/// Prefixes `path` with `/` when missing.
pub(crate) fn into_absolute(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Checks if `href` names a remote location, such as `http:` or `mailto:`.
pub(crate) fn has_scheme(href: &str) -> bool {
    match href.find(':') {
        // A colon after a slash belongs to a path segment, not a scheme.
        Some(colon) => !href[..colon].contains('/') && colon > 0,
        None => false,
    }
}
