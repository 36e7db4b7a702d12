use tracing::debug;

use super::error;
use super::numeric::{leading_u32, leading_u64};
use super::tokenizer::{Comments, OnEof, Token};
use super::{Parser, Result};
use crate::xref::XrefEntry;

impl<'a> Parser<'a> {
    /// A classical cross-reference table, entered with the `xref` keyword
    /// in hand. The keyword's offset is what `startxref` points at, so it
    /// is recorded as the document's xref offset.
    ///
    /// The table is read token-wise: a token of exactly ten characters is
    /// the byte offset of an entry (followed by its generation and `n`/`f`
    /// marker); anything else opens a new subsection and carries the base
    /// object id, with the entry count read and dropped. `trailer` ends the
    /// table.
    pub(crate) fn parse_xref(&mut self, keyword: Token<'a>) -> Result<()> {
        self.xref_offset = keyword.offset();
        let mut current_id = 0u32;

        loop {
            let first = self.next_token(OnEof::Fail, Comments::Skip)?;

            if first == b"trailer" {
                break;
            }

            let second = self.next_token(OnEof::Fail, Comments::Skip)?;

            if first.len() == 10 {
                let marker = self.next_token(OnEof::Fail, Comments::Skip)?;

                let (Some(byte_offset), Some(gen_id)) =
                    (leading_u64(first.bytes()), leading_u32(second.bytes()))
                else {
                    return Err(error::Error::InvalidToken {
                        token: first.to_lossy_string(),
                        offset: first.offset(),
                    }
                    .into());
                };

                self.xref_table.push(XrefEntry {
                    object_id: current_id,
                    byte_offset,
                    gen_id,
                    in_use: marker == b"n",
                    object_index: None,
                });
                current_id += 1;
            } else {
                let Some(base) = leading_u32(first.bytes()) else {
                    return Err(error::Error::InvalidToken {
                        token: first.to_lossy_string(),
                        offset: first.offset(),
                    }
                    .into());
                };
                current_id = base;
            }
        }

        debug!(entries = self.xref_table.len(), offset = self.xref_offset, "parsed xref table");

        self.parse_trailer()?;
        Ok(())
    }

    /// The trailer dictionary, merged over whatever earlier trailers put
    /// there (later updates win key by key). Returns false when no
    /// `startxref` follows; the unread token is pushed back for the
    /// top-level loop.
    pub(crate) fn parse_trailer(&mut self) -> Result<bool> {
        let token = self.next_token(OnEof::Fail, Comments::Skip)?;
        if token != b"<<" {
            return Err(error::Error::InvalidTrailer {
                offset: token.offset(),
            }
            .into());
        }

        let ctx = self.trailer.clone();
        let dictionary = self.parse_dictionary(&ctx)?;
        self.trailer.merge(dictionary);

        let token = self.next_token(OnEof::Fail, Comments::Skip)?;
        if token != b"startxref" {
            self.reader.seek(token.offset());
            return Ok(false);
        }

        self.parse_startxref()?;
        Ok(true)
    }

    /// The `startxref` tail: the offset number (already recorded when the
    /// xref itself was parsed) and the `%%EOF` marker.
    ///
    /// `%%EOF` is read under the capture-comment policy so that producers
    /// gluing the next object onto the marker line (`%%EOF1 0 obj`) are
    /// handled: the source is repositioned to the byte right after the
    /// five marker characters.
    pub(crate) fn parse_startxref(&mut self) -> Result<()> {
        let _offset = self.next_token(OnEof::Fail, Comments::Skip)?;

        let token = self.next_token(OnEof::Stop, Comments::Capture)?;
        if !token.bytes().starts_with(b"%%EOF") {
            return Err(error::Error::InvalidTrailer {
                offset: token.offset(),
            }
            .into());
        }

        if token.len() > 5 {
            self.reader.seek(token.offset() + 5);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Object;

    fn parse_xref_at(input: &[u8]) -> Parser<'_> {
        let mut parser = Parser::new(input);
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert_eq!(token.bytes(), b"xref");
        parser.parse_xref(token).unwrap();
        parser
    }

    #[test]
    fn test_xref_table_with_subsections() {
        let parser = parse_xref_at(
            b"xref\n0 2\n0000000000 65535 f \n0000000017 00000 n \n42 1\n0000001234 00001 n \ntrailer\n<</Size 43>>\nstartxref\n5\n%%EOF",
        );

        assert_eq!(parser.xref_offset, 0);
        assert_eq!(parser.xref_table.len(), 3);

        assert_eq!(parser.xref_table[0].object_id, 0);
        assert_eq!(parser.xref_table[0].gen_id, 65535);
        assert!(!parser.xref_table[0].in_use);

        assert_eq!(parser.xref_table[1].object_id, 1);
        assert_eq!(parser.xref_table[1].byte_offset, 17);
        assert!(parser.xref_table[1].in_use);

        // The second subsection restarts the running id at its base.
        assert_eq!(parser.xref_table[2].object_id, 42);
        assert_eq!(parser.xref_table[2].byte_offset, 1234);
        assert_eq!(parser.xref_table[2].gen_id, 1);

        assert_eq!(
            parser.trailer.get("Size"),
            Some(&Object::Numeric(crate::types::Numeric::integer(43)))
        );
    }

    #[test]
    fn test_trailer_without_startxref_rewinds() {
        let mut parser = Parser::new(b"<</Size 4>>\n6 0 obj\nendobj\n");
        let done = parser.parse_trailer().unwrap();
        assert!(!done);

        // The next token is the object id the trailer parser peeked at.
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert_eq!(token.bytes(), b"6");
    }

    #[test]
    fn test_eof_marker_with_glued_object() {
        let mut parser = Parser::new(b"startxref\n1234\n%%EOF3 0 obj\nendobj\n");
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert_eq!(token.bytes(), b"startxref");
        parser.parse_startxref().unwrap();

        // Repositioned right past the marker: the glued object is readable.
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert_eq!(token.bytes(), b"3");
    }

    #[test]
    fn test_missing_eof_marker() {
        let mut parser = Parser::new(b"startxref\n1234\nnope\n");
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert_eq!(token.bytes(), b"startxref");
        assert!(parser.parse_startxref().is_err());
    }
}
