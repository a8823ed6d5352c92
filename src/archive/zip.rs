use crate::archive::{self, Archive, MAX_ENTRY_SIZE};
use crate::errors::{ArchiveError, ArchiveResult, EpubResult, FormatError};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive as Zip;

pub(crate) struct ZipArchive<R> {
    zip: Zip<R>,
    names: HashSet<String>,
}

impl ZipArchive<BufReader<File>> {
    pub(crate) fn open(path: &Path) -> ArchiveResult<Self> {
        if !path.is_file() {
            return Err(ArchiveError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| ArchiveError::UnreadableArchive {
            source,
            path: Some(path.to_path_buf()),
        })?;

        Self::new(BufReader::new(file), Some(path))
    }
}

impl<R: Read + Seek> ZipArchive<R> {
    /// `reader` (and optional `path` for a more descriptive error message).
    pub(crate) fn new(reader: R, path: Option<&Path>) -> ArchiveResult<Self> {
        let zip = Zip::new(reader).map_err(|error| ArchiveError::UnreadableArchive {
            source: io::Error::from(error),
            path: path.map(Path::to_path_buf),
        })?;
        let names = zip.file_names().map(str::to_owned).collect();

        Ok(Self { zip, names })
    }
}

impl<R: Read + Seek> Archive for ZipArchive<R> {
    fn find_entry(&self, path: &str) -> Option<String> {
        let mut variants = archive::lookup_variants(path).into_iter();

        // The first variant is the exact path
        if let Some(exact) = variants.next().filter(|exact| self.names.contains(exact)) {
            return Some(exact);
        }
        let found = variants.find(|variant| self.names.contains(variant));

        if let Some(name) = &found {
            log::warn!("Archive entry `{path}` only found as `{name}`");
        }
        found
    }

    fn read_entry(&mut self, name: &str) -> EpubResult<Vec<u8>> {
        let cannot_read = |source| ArchiveError::CannotRead {
            source,
            path: name.to_owned(),
        };
        let mut file = self
            .zip
            .by_name(name)
            .map_err(|error| cannot_read(io::Error::from(error)))?;
        let size = file.size();

        if size > MAX_ENTRY_SIZE {
            return Err(FormatError::ResourceTooLarge {
                path: name.to_owned(),
                size,
            }
            .into());
        }
        log::trace!("Reading archive entry `{name}` ({size} bytes)");

        let mut buffer = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
        file.read_to_end(&mut buffer).map_err(cannot_read)?;
        Ok(buffer)
    }
}
