use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use snafu::{ResultExt, Snafu};

use crate::info::Info;
use crate::parser::{Parser, Version};
use crate::types::{Dictionary, IndirectObject, Stream};
use crate::writer;
use crate::xref::XrefEntry;

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// A parsed PDF document.
///
/// The source file stays mapped for the whole lifetime of the value:
/// stream payloads are byte ranges into it, not copies, so keep the
/// document alive while reading them. Parsing another file means building
/// a new `Document`; dropping the old one releases its mapping.
#[derive(Debug)]
pub struct Document {
    source: Mmap,
    pub(crate) version: Version,
    pub(crate) objects: Vec<IndirectObject>,
    pub(crate) xref_table: Vec<XrefEntry>,
    pub(crate) trailer: Dictionary,
    pub(crate) xref_offset: u64,
}

impl Document {
    /// Opens `path` and parses it whole.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).with_context(|_| error::OpenFileSnafu {
            path: path.to_path_buf(),
        })?;
        let source = unsafe { Mmap::map(&file) }.with_context(|_| error::MmapSnafu {
            path: path.to_path_buf(),
        })?;

        let mut parser = Parser::new(&source);
        parser.run().context(error::ParseSnafu)?;

        let version = parser.version;
        let objects = std::mem::take(&mut parser.objects);
        let xref_table = std::mem::take(&mut parser.xref_table);
        let trailer = std::mem::take(&mut parser.trailer);
        let xref_offset = parser.xref_offset;

        Ok(Self {
            source,
            version,
            objects,
            xref_table,
            trailer,
            xref_offset,
        })
    }

    /// Header version recorded from `%PDF-M.N`.
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn objects(&self) -> &[IndirectObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut Vec<IndirectObject> {
        &mut self.objects
    }

    pub fn add_object(&mut self, object: IndirectObject) {
        self.objects.push(object);
    }

    /// The object matching the id pair.
    ///
    /// Incremental updates append newer definitions of the same pair after
    /// the original ones, so the last match — the live version — wins.
    pub fn get_object(&self, id: u32, gen_id: u32) -> Option<&IndirectObject> {
        self.objects
            .iter()
            .rev()
            .find(|object| object.id == id && object.gen_id == gen_id)
    }

    pub fn get_object_mut(&mut self, id: u32, gen_id: u32) -> Option<&mut IndirectObject> {
        self.objects
            .iter_mut()
            .rev()
            .find(|object| object.id == id && object.gen_id == gen_id)
    }

    pub fn trailer(&self) -> &Dictionary {
        &self.trailer
    }

    pub fn trailer_mut(&mut self) -> &mut Dictionary {
        &mut self.trailer
    }

    pub fn xref_table(&self) -> &[XrefEntry] {
        &self.xref_table
    }

    /// Byte offset of the most recent cross-reference section; incremental
    /// updates chain their `/Prev` to it.
    pub fn xref_offset(&self) -> u64 {
        self.xref_offset
    }

    pub(crate) fn source(&self) -> &[u8] {
        &self.source
    }

    /// Payload bytes of a stream parsed from this document.
    pub fn stream_bytes<'a>(&'a self, stream: &'a Stream) -> &'a [u8] {
        stream.bytes(&self.source)
    }

    /// Typed view of the `/Info` dictionary, if the trailer names one and
    /// the referenced object was parsed.
    pub fn info(&self) -> Result<Option<Info>> {
        let Some(reference) = self.trailer.get("Info") else {
            return Ok(None);
        };

        let reference = reference
            .as_reference()
            .context(error::InfoReferenceSnafu)?;

        let Some(object) = self.get_object(reference.id, reference.gen_id) else {
            return Ok(None);
        };

        let info = Info::from_dictionary(&object.dictionary).context(error::InfoSnafu)?;
        Ok(Some(info))
    }

    /// Writes the document to `path`.
    ///
    /// With `update` set, appends the objects marked new plus a fresh xref
    /// section to the file — which must already hold the original bytes —
    /// leaving everything above untouched. Without it, emits a complete
    /// file from scratch.
    pub fn write(&mut self, path: impl AsRef<Path>, update: bool) -> Result<()> {
        if self.trailer.has_key("Encrypt") {
            return Err(error::Error::NotImplemented {
                what: "writing encrypted documents",
            }
            .into());
        }

        if update {
            writer::write_update(self, path.as_ref()).context(error::WriteSnafu)?;
        } else {
            writer::write_full(self, path.as_ref()).context(error::WriteSnafu)?;
        }

        Ok(())
    }
}

mod error {
    use std::path::PathBuf;

    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Unable to open {}", path.display()))]
        OpenFile {
            path: PathBuf,
            source: std::io::Error,
        },

        #[snafu(display("Failed to map {}", path.display()))]
        Mmap {
            path: PathBuf,
            source: std::io::Error,
        },

        #[snafu(display("Failed to parse document"))]
        Parse { source: crate::parser::Error },

        #[snafu(display("Failed to write document"))]
        Write { source: crate::writer::Error },

        #[snafu(display("Trailer `Info` entry is not a reference"))]
        InfoReference { source: crate::types::ObjectError },

        #[snafu(display("Invalid info dictionary"))]
        Info { source: crate::info::Error },

        #[snafu(display("Not implemented: {what}"))]
        NotImplemented { what: &'static str },
    }
}
