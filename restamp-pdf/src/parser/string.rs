use super::error;
use super::{Parser, Result};
use crate::types::PdfString;

impl Parser<'_> {
    /// Raw bytes of a balanced-parenthesis string, entered right after the
    /// `(` token.
    ///
    /// A depth counter tracks unescaped parentheses; escape state toggles
    /// on `\`, with `\\` collapsing back to unescaped. Escape sequences are
    /// passed through untouched — processing is deferred to output, which
    /// reproduces the source bytes.
    pub(crate) fn parse_literal_string(&mut self) -> PdfString {
        let mut bytes = Vec::new();
        let mut escaped = false;
        let mut depth = 1u32;

        while let Some(byte) = self.reader.read_byte() {
            if byte == b'(' && !escaped {
                depth += 1;
            } else if byte == b')' && !escaped {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }

            if byte == b'\\' && escaped {
                escaped = false;
            } else {
                escaped = byte == b'\\';
            }

            bytes.push(byte);
        }

        PdfString::Literal(bytes)
    }

    /// Digits up to the closing `>`, entered right after the `<` token.
    /// An odd digit count is an error, reported at the opening token's
    /// offset.
    pub(crate) fn parse_hexa_string(&mut self, offset: u64) -> Result<PdfString> {
        let start = self.reader.offset();
        let mut end = start;

        while let Some(byte) = self.reader.read_byte() {
            if byte == b'>' {
                break;
            }
            end += 1;
        }

        let digits = self.reader.slice(start, end).unwrap_or_default();
        if digits.len() % 2 != 0 {
            return Err(error::Error::InvalidHexaString { offset }.into());
        }

        let text = std::str::from_utf8(digits)
            .map_err(|_| error::Error::InvalidHexaString { offset })?;

        Ok(PdfString::Hexadecimal(text.to_string()))
    }
}
