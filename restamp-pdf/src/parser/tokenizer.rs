use super::error;
use super::reader::Reader;

/// Characters that end a running token. The terminating byte is pushed back
/// so the next call sees it again.
const DELIMITERS: &[u8] = b" \t<>[]()/";
/// Sign characters split a token only when the previous byte was a space;
/// names and numbers legitimately contain `-` otherwise.
const SIGN_DELIMITERS: &[u8] = b"+-";
/// Characters that form a one-byte token on their own when seen first.
const START_DELIMITERS: &[u8] = b"<>[]()";

/// End-of-input policy for [`next_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnEof {
    /// Running out of bytes is a truncated file.
    Fail,
    /// Return whatever was accumulated, possibly an empty token.
    Stop,
}

/// Comment policy for [`next_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comments {
    /// Skip `%` to end of line; a token interrupted by a comment is returned.
    Skip,
    /// Capture `%` and the rest of the line as the token (used for `%%EOF`).
    Capture,
}

/// A token is a contiguous span of the source plus its absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    bytes: &'a [u8],
    offset: u64,
}

impl<'a> Token<'a> {
    pub(crate) fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Offset of the token's first byte; error messages report this position.
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn first(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    pub(crate) fn to_lossy_string(&self) -> String {
        String::from_utf8_lossy(self.bytes).into_owned()
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Token<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.bytes == *other
    }
}

/// Consume the rest of the current line, including its end-of-line marker.
/// `\r\n` and `\n\r` pairs are consumed as one marker.
pub(crate) fn finish_line(reader: &mut Reader<'_>) {
    while let Some(byte) = reader.read_byte() {
        if byte == b'\n' || byte == b'\r' {
            break;
        }
    }
    if let Some(byte) = reader.read_byte() {
        if byte != b'\n' && byte != b'\r' {
            reader.unread_byte();
        }
    }
}

/// Scan forward and return the next PDF token.
///
/// Whitespace before a token is swallowed; CR/LF ends a non-empty token; a
/// delimiter ends a non-empty token and is pushed back. A `<` or `>` start
/// delimiter peeks one byte further and doubles into `<<` or `>>`.
pub(crate) fn next_token<'a>(
    reader: &mut Reader<'a>,
    on_eof: OnEof,
    comments: Comments,
) -> Result<Token<'a>, error::Error> {
    let mut start = reader.offset();
    let mut len = 0u64;
    let mut prev = 0u8;

    'scan: loop {
        let Some(byte) = reader.read_byte() else {
            if let OnEof::Fail = on_eof {
                return Err(error::Error::TruncatedFile {
                    offset: reader.offset(),
                });
            }
            break;
        };

        if byte == b'%' {
            if let Comments::Capture = comments {
                if len == 0 {
                    start = reader.offset() - 1;
                }
                len += 1;
                loop {
                    match reader.read_byte() {
                        None => {
                            if let OnEof::Fail = on_eof {
                                return Err(error::Error::TruncatedFile {
                                    offset: reader.offset(),
                                });
                            }
                            break;
                        }
                        Some(b'\n' | b'\r') => break,
                        Some(_) => len += 1,
                    }
                }
                break 'scan;
            }

            finish_line(reader);
            if len > 0 {
                break;
            }
            prev = byte;
            continue;
        }

        // Leading whitespace, including NUL, is swallowed.
        if matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\0') && len == 0 {
            prev = byte;
            continue;
        }

        // A line break ends the token without pushback.
        if byte == b'\n' || byte == b'\r' {
            if len > 0 {
                break;
            }
            prev = byte;
            continue;
        }

        if len > 0 {
            if DELIMITERS.contains(&byte) {
                reader.unread_byte();
                break;
            }
            if prev == b' ' && SIGN_DELIMITERS.contains(&byte) {
                reader.unread_byte();
                break;
            }
            len += 1;
        } else {
            start = reader.offset() - 1;
            len = 1;
            if START_DELIMITERS.contains(&byte) {
                break;
            }
        }
        prev = byte;
    }

    let mut end = start + len;

    // Double `<` and `>` so dictionary delimiters come out whole.
    let bytes = reader.slice(start, end).unwrap_or_default();
    if bytes == b"<" || bytes == b">" {
        if let Some(byte) = reader.read_byte() {
            if byte == bytes[0] {
                end += 1;
            } else {
                reader.unread_byte();
            }
        }
    }

    Ok(Token {
        bytes: reader.slice(start, end).unwrap_or_default(),
        offset: start,
    })
}
