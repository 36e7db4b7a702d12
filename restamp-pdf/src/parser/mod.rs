mod array;
mod date;
mod dictionary;
mod header;
mod numeric;
mod object;
mod reader;
mod stream;
mod string;
mod tokenizer;
mod value;
mod xref;

use snafu::Snafu;
use tracing::debug;

pub use header::Version;

pub(crate) use date::pdf_date;

use crate::types::{Dictionary, IndirectObject};
use crate::xref::XrefEntry;
use reader::Reader;
use tokenizer::{Comments, OnEof, Token, finish_line, next_token};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// One pass over a PDF byte source.
///
/// The parser is a straight-line state machine: header, then top-level
/// tokens (objects, xref sections, startxref markers) until end of input,
/// then the xref/object linking pass. A failed parse leaves it in an
/// unspecified state; drop it.
pub(crate) struct Parser<'a> {
    reader: Reader<'a>,
    pub(crate) version: Version,
    pub(crate) objects: Vec<IndirectObject>,
    pub(crate) xref_table: Vec<XrefEntry>,
    pub(crate) trailer: Dictionary,
    pub(crate) xref_offset: u64,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            version: Version::default(),
            objects: Vec::new(),
            xref_table: Vec::new(),
            trailer: Dictionary::default(),
            xref_offset: 0,
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        self.version = self.parse_header()?;
        debug!(major = self.version.major, minor = self.version.minor, "parsed header");

        // The line right after the header may be an uncommented binary
        // marker; tolerate it once.
        let mut second_line = true;

        loop {
            let token = self.next_token(OnEof::Stop, Comments::Skip)?;

            if token.is_empty() {
                break;
            }

            if token == b"xref" {
                self.parse_xref(token)?;
            } else if matches!(token.first(), Some(b'1'..=b'9')) {
                self.parse_object(token)?;
            } else if token == b"startxref" {
                // startxref may also appear mid-document, without a trailer.
                self.parse_startxref()?;
            } else if second_line {
                finish_line(&mut self.reader);
            } else {
                return Err(error::Error::InvalidLine {
                    offset: token.offset(),
                }
                .into());
            }

            second_line = false;
        }

        self.link_xref();

        debug!(
            objects = self.objects.len(),
            xref_entries = self.xref_table.len(),
            "document parsed"
        );

        Ok(())
    }

    /// Synchronize the xref table with the parsed objects: every entry whose
    /// id pair matches an object gets cross-linked, and the object takes the
    /// entry's in-use marker.
    fn link_xref(&mut self) {
        for entry in &mut self.xref_table {
            let found = self
                .objects
                .iter()
                .position(|object| object.id == entry.object_id && object.gen_id == entry.gen_id);

            match found {
                Some(index) => {
                    entry.object_index = Some(index);
                    self.objects[index].used = entry.in_use;
                }
                None => debug!(
                    id = entry.object_id,
                    gen_id = entry.gen_id,
                    "xref entry without a parsed object"
                ),
            }
        }
    }

    pub(crate) fn next_token(&mut self, on_eof: OnEof, comments: Comments) -> Result<Token<'a>> {
        Ok(next_token(&mut self.reader, on_eof, comments)?)
    }
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Unexpected end of file at offset {offset}"))]
        TruncatedFile { offset: u64 },

        #[snafu(display("Invalid PDF header"))]
        InvalidHeader,

        #[snafu(display("Invalid line at offset {offset}"))]
        InvalidLine { offset: u64 },

        #[snafu(display("Invalid object at offset {offset}"))]
        InvalidObject { offset: u64 },

        #[snafu(display("Invalid token `{token}` at offset {offset}"))]
        InvalidToken { token: String, offset: u64 },

        #[snafu(display("Invalid name at offset {offset}"))]
        InvalidName { offset: u64 },

        #[snafu(display("Invalid hexa string at offset {offset}"))]
        InvalidHexaString { offset: u64 },

        #[snafu(display("Invalid stream at offset {offset}"))]
        InvalidStream { offset: u64 },

        #[snafu(display("Invalid trailer at offset {offset}"))]
        InvalidTrailer { offset: u64 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Object;

    fn parse(data: &[u8]) -> Parser<'_> {
        let mut parser = Parser::new(data);
        parser.run().unwrap();
        parser
    }

    #[test]
    fn test_minimal_document() {
        let data = b"%PDF-1.4\n1 0 obj\n<</Type /Catalog>>\nendobj\n";
        let parser = parse(data);

        assert_eq!(parser.version, Version { major: 1, minor: 4 });
        assert_eq!(parser.objects.len(), 1);
        assert_eq!(parser.objects[0].id, 1);
        assert_eq!(parser.objects[0].gen_id, 0);
        assert_eq!(parser.objects[0].source_offset, 9);
        assert!(!parser.objects[0].is_new);
        assert!(
            matches!(parser.objects[0].dictionary.get("Type"), Some(Object::Name(name)) if name.as_key() == "Catalog")
        );
    }

    #[test]
    fn test_second_line_garbage_is_tolerated_once() {
        let data = b"%PDF-1.0\n\xe2\xe3\xcf\xd3 binary\n1 0 obj\n 5\nendobj\n";
        let parser = parse(data);
        assert_eq!(parser.objects.len(), 1);

        let data = b"%PDF-1.0\n1 0 obj\n 5\nendobj\ngarbage here\n";
        let mut parser = Parser::new(data);
        assert!(parser.run().is_err());
    }

    #[test]
    fn test_xref_links_objects() {
        // Offsets below match the assembled byte layout.
        let mut data: Vec<u8> = Vec::new();
        data.extend_from_slice(b"%PDF-1.4\n");
        let first = data.len();
        data.extend_from_slice(b"1 0 obj\n<</Type /Catalog>>\nendobj\n");
        let xref_at = data.len();
        data.extend_from_slice(b"xref\n0 2\n0000000000 65535 f \n");
        data.extend_from_slice(format!("{first:010} 00000 n \n").as_bytes());
        data.extend_from_slice(b"trailer\n<</Size 2/Root 1 0 R>>\n");
        data.extend_from_slice(format!("startxref\n{xref_at}\n%%EOF").as_bytes());

        let parser = parse(&data);

        assert_eq!(parser.xref_offset, xref_at as u64);
        assert_eq!(parser.xref_table.len(), 2);
        assert_eq!(parser.xref_table[0].object_id, 0);
        assert!(!parser.xref_table[0].in_use);
        assert_eq!(parser.xref_table[0].object_index, None);
        assert_eq!(parser.xref_table[1].object_id, 1);
        assert_eq!(parser.xref_table[1].byte_offset, first as u64);
        assert!(parser.xref_table[1].in_use);
        assert_eq!(parser.xref_table[1].object_index, Some(0));
        assert!(parser.objects[0].used);
        assert!(parser.trailer.has_key("Root"));
    }
}
