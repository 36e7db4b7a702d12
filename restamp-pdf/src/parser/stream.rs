use tracing::debug;

use super::error;
use super::tokenizer::{Comments, OnEof};
use super::{Parser, Result};
use crate::types::{Dictionary, Numeric, Object, Stream, StreamData};

impl<'a> Parser<'a> {
    /// Locates a stream payload, entered right after the `stream` keyword.
    ///
    /// With an integer `/Length` and no `/Filter`, the fast path seeks
    /// straight past the payload and confirms `endstream` follows. When
    /// that fails, the payload is found by scanning line by line for the
    /// `endstream` keyword. `/Length` itself is required either way.
    ///
    /// Payload bytes are never copied; the returned stream records the
    /// absolute byte range within the source.
    pub(crate) fn parse_stream(&mut self, ctx: &Dictionary, offset: u64) -> Result<Stream> {
        let start = self.reader.offset();

        let Some(length) = ctx.get("Length") else {
            return Err(error::Error::InvalidStream { offset }.into());
        };

        if !ctx.has_key("Filter") {
            if let Object::Numeric(Numeric::Integer { value, .. }) = length {
                if *value >= 0 {
                    let end = start + *value as u64;
                    self.reader.seek(end);

                    let token = self.next_token(OnEof::Fail, Comments::Skip)?;
                    if token == b"endstream" {
                        return Ok(Stream {
                            dictionary: ctx.clone(),
                            data: StreamData::Source { start, end },
                        });
                    }

                    // No endstream where /Length said; fall back to the scan.
                    debug!(offset = start, length = value, "stream length does not line up");
                    self.reader.seek(start);
                }
            }
        }

        loop {
            let (line_start, line) = self.read_line()?;

            if let Some(position) = find(line, b"endstream") {
                let keyword = line_start + position as u64;

                // The end-of-line marker separating payload from keyword is
                // not part of the payload.
                let mut end = keyword;
                let data = self.reader.data();
                if end > start && matches!(data.get(end as usize - 1), Some(b'\n')) {
                    end -= 1;
                }
                if end > start && matches!(data.get(end as usize - 1), Some(b'\r')) {
                    end -= 1;
                }

                self.reader.seek(keyword + b"endstream".len() as u64);

                return Ok(Stream {
                    dictionary: ctx.clone(),
                    data: StreamData::Source { start, end },
                });
            }
        }
    }

    /// One line of input, skipping empty lines first. Running out of bytes
    /// mid-stream is a truncated file.
    fn read_line(&mut self) -> Result<(u64, &'a [u8])> {
        loop {
            match self.reader.peek_byte() {
                Some(b'\n' | b'\r') => {
                    self.reader.read_byte();
                }
                Some(_) => break,
                None => {
                    return Err(error::Error::TruncatedFile {
                        offset: self.reader.offset(),
                    }
                    .into());
                }
            }
        }

        let start = self.reader.offset();
        while let Some(byte) = self.reader.read_byte() {
            if byte == b'\n' || byte == b'\r' {
                let line = self.reader.slice(start, self.reader.offset() - 1);
                return Ok((start, line.unwrap_or_default()));
            }
        }

        Err(error::Error::TruncatedFile {
            offset: self.reader.offset(),
        }
        .into())
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8], dict: Dictionary) -> Result<Stream> {
        let mut parser = Parser::new(input);
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert_eq!(token.bytes(), b"stream");
        parser.parse_stream(&dict, token.offset())
    }

    fn length(value: i64) -> Dictionary {
        Dictionary::from([("Length", Object::Numeric(Numeric::integer(value)))])
    }

    #[test]
    fn test_fast_path_covers_exact_payload() {
        let stream = parse(b"stream\nHELLO\nendstream\n", length(5)).unwrap();
        assert_eq!(stream.data, StreamData::Source { start: 7, end: 12 });
        assert_eq!(stream.bytes(b"stream\nHELLO\nendstream\n"), b"HELLO");
    }

    #[test]
    fn test_scan_path_on_wrong_length() {
        let stream = parse(b"stream\nHELLO WORLD\nendstream\n", length(3)).unwrap();
        assert_eq!(stream.data, StreamData::Source { start: 7, end: 18 });
    }

    #[test]
    fn test_scan_path_with_filter() {
        let mut dict = length(11);
        dict.insert(
            "Filter",
            Some(Object::Name(crate::types::Name::from("/FlateDecode"))),
        );
        let stream = parse(b"stream\nBINARY BITS\nendstream\n", dict).unwrap();
        assert_eq!(stream.data, StreamData::Source { start: 7, end: 18 });
    }

    #[test]
    fn test_missing_length_is_invalid() {
        let err = parse(b"stream\nHELLO\nendstream\n", Dictionary::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid stream"), "got: {err}");
    }

    #[test]
    fn test_missing_endstream_is_truncated() {
        let err = parse(b"stream\nHELLO WORLD", length(99)).unwrap_err();
        assert!(err.to_string().contains("Unexpected end of file"), "got: {err}");
    }
}
