use crate::errors::EpubError;
use crate::writer::WriterResult;
use std::io::Write;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub(crate) struct ZipWriter<W: Write> {
    inner: zip::ZipWriter<zip::write::StreamWriter<W>>,
    options: SimpleFileOptions,
}

impl<W: Write> ZipWriter<W> {
    /// Level `0` stores entries, while `1..=9` deflates them.
    pub(crate) fn new(writer: W, compression: u8) -> Self {
        let options = match compression {
            0 => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
            level => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(level.min(9)))),
        };

        Self {
            inner: zip::ZipWriter::new_stream(writer),
            options,
        }
    }

    fn start_zip_file_entry(&mut self, name: &str, options: SimpleFileOptions) -> WriterResult<()> {
        log::trace!("Writing archive entry `{name}`");
        self.inner
            // The archive root is implicit; entry names carry no leading '/'
            .start_file(name.trim_start_matches('/'), options)
            .map_err(from_zip_error)
    }

    pub(crate) fn start_uncompressed_file(&mut self, name: &str) -> WriterResult<()> {
        self.start_zip_file_entry(
            name,
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        )
    }

    pub(crate) fn start_file(&mut self, name: &str) -> WriterResult<()> {
        self.start_zip_file_entry(name, self.options)
    }

    pub(crate) fn finish(self) -> WriterResult<W> {
        self.inner
            .finish()
            .map_err(from_zip_error)
            .map(|stream_writer| stream_writer.into_inner())
    }
}

impl<W: Write> Write for ZipWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

fn from_zip_error(error: zip::result::ZipError) -> EpubError {
    EpubError::Io(match error {
        zip::result::ZipError::Io(error) => error,
        error => std::io::Error::other(error),
    })
}
