//! Read access to the ZIP container backing a [`Book`](crate::Book).

mod zip;

pub(crate) use self::zip::ZipArchive;

use crate::errors::{ArchiveError, EpubResult, FormatError};
use crate::util::{uri, utf};

/// Per-entry ceiling on uncompressed size (2 GiB).
pub(crate) const MAX_ENTRY_SIZE: u64 = 2 * 1024 * 1024 * 1024;

pub(crate) trait Archive {
    /// Returns the stored name of the entry matching `path`,
    /// trying every variant of [`lookup_variants`] in order.
    fn find_entry(&self, path: &str) -> Option<String>;

    /// Reads the complete entry with the exact stored `name`.
    fn read_entry(&mut self, name: &str) -> EpubResult<Vec<u8>>;

    fn read_bytes(&mut self, path: &str) -> EpubResult<Vec<u8>> {
        let name = self
            .find_entry(path)
            .ok_or_else(|| ArchiveError::EntryNotFound {
                path: path.to_owned(),
            })?;
        self.read_entry(&name)
    }

    /// Reads an entry as text, removing a UTF-8 BOM and converting BOM-marked UTF-16.
    fn read_str(&mut self, path: &str) -> EpubResult<String> {
        let data = self.read_bytes(path)?;

        utf::into_utf8_str(data).map_err(|_| {
            FormatError::InvalidUtf8 {
                path: path.to_owned(),
            }
            .into()
        })
    }
}

/// Candidate entry names for `path`, most exact first and without duplicates:
/// as-is, leading slash toggled, `\` to `/`, `/` to `\`,
/// then percent-decoded and percent-encoded forms of each.
pub(crate) fn lookup_variants(path: &str) -> Vec<String> {
    let forward = path.replace('\\', "/");
    let backward = path.replace('/', "\\");
    let plain = [
        path.to_owned(),
        toggle_leading_slash(path),
        toggle_leading_slash(&forward),
        forward,
        toggle_leading_slash(&backward),
        backward,
    ];
    let decoded = plain.iter().map(|variant| uri::decode(variant).into_owned());
    let encoded = plain.iter().map(|variant| uri::encode(variant).into_owned());

    let mut variants: Vec<String> = Vec::new();

    for variant in plain.iter().cloned().chain(decoded).chain(encoded) {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

fn toggle_leading_slash(path: &str) -> String {
    match path.strip_prefix(['/', '\\']) {
        Some(relative) => relative.to_owned(),
        None => format!("/{path}"),
    }
}
