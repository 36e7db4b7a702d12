use chrono::{DateTime, FixedOffset};
use snafu::{OptionExt, ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Represents string values in a PDF document.
///
/// PDF supports two kinds of string objects:
/// - Literal strings enclosed in parentheses `(content)`. The raw bytes
///   between the balanced parentheses are kept as-is, escape sequences
///   included, so serialization reproduces the source bytes.
/// - Hexadecimal strings enclosed in angle brackets `<48656C6C6F>`. The
///   digit text is kept undecoded; its length is always even.
#[derive(Debug, PartialEq, Clone)]
pub enum PdfString {
    /// Raw bytes between balanced parentheses, escapes verbatim.
    Literal(Vec<u8>),
    /// The digits between `<` and `>`.
    Hexadecimal(String),
}

impl PdfString {
    /// The stored bytes: literal content for literals, digit text for
    /// hexadecimal strings.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PdfString::Literal(data) => data.as_slice(),
            PdfString::Hexadecimal(data) => data.as_bytes(),
        }
    }

    /// Decoded text content: UTF-8 for literals, decoded digit pairs for
    /// hexadecimal strings.
    pub fn text(&self) -> Result<String> {
        match self {
            PdfString::Literal(data) => {
                Ok(String::from_utf8(data.clone()).context(error::Utf8Snafu)?)
            }
            PdfString::Hexadecimal(digits) => {
                let digits: Vec<char> = digits.chars().filter(|c| !c.is_whitespace()).collect();
                let mut bytes = Vec::with_capacity(digits.len() / 2 + 1);
                for pair in digits.chunks(2) {
                    let high = pair[0]
                        .to_digit(16)
                        .with_context(|| error::HexDigitSnafu { digit: pair[0] })?;
                    // An odd trailing digit reads as if followed by zero.
                    let low = match pair.get(1) {
                        Some(c) => c
                            .to_digit(16)
                            .with_context(|| error::HexDigitSnafu { digit: *c })?,
                        None => 0,
                    };
                    bytes.push((high * 16 + low) as u8);
                }
                Ok(String::from_utf8(bytes).context(error::Utf8Snafu)?)
            }
        }
    }

    /// Interpret the string as a PDF date (`D:YYYYMMDDHHmmSS+HH'mm'`).
    pub fn to_date(&self) -> Result<DateTime<FixedOffset>> {
        let text = self.text()?;
        let (_, date) = crate::parser::pdf_date(&text)
            .ok()
            .with_context(|| error::DateSnafu { text: text.clone() })?;
        Ok(date)
    }

    pub fn serialize(&self, out: &mut Vec<u8>) {
        match self {
            PdfString::Literal(data) => {
                out.push(b'(');
                out.extend_from_slice(data);
                out.push(b')');
            }
            PdfString::Hexadecimal(digits) => {
                out.push(b'<');
                out.extend_from_slice(digits.as_bytes());
                out.push(b'>');
            }
        }
    }
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("String is not valid UTF-8"))]
        Utf8 { source: std::string::FromUtf8Error },

        #[snafu(display("Invalid hexadecimal digit `{digit}`"))]
        HexDigit { digit: char },

        #[snafu(display("Invalid date string `{text}`"))]
        Date { text: String },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_decoding() {
        let literal = PdfString::Literal(b"Hello".to_vec());
        assert_eq!(literal.text().unwrap(), "Hello");

        let hex = PdfString::Hexadecimal("48656C6C6F".to_string());
        assert_eq!(hex.text().unwrap(), "Hello");

        let bad = PdfString::Hexadecimal("4G".to_string());
        assert!(bad.text().is_err());
    }

    #[test]
    fn test_serialization_is_verbatim() {
        // The escaped parenthesis stays escaped on the way out.
        let literal = PdfString::Literal(b"a\\)b".to_vec());
        let mut out = Vec::new();
        literal.serialize(&mut out);
        assert_eq!(out, b"(a\\)b)");

        let hex = PdfString::Hexadecimal("4AFF".to_string());
        let mut out = Vec::new();
        hex.serialize(&mut out);
        assert_eq!(out, b"<4AFF>");
    }

    #[test]
    fn test_to_date() {
        let date = PdfString::Literal(b"D:20211230134641+11'00'".to_vec());
        let parsed = date.to_date().unwrap();
        assert_eq!(parsed.timezone(), chrono::FixedOffset::east_opt(39600).unwrap());

        let not_a_date = PdfString::Literal(b"yesterday".to_vec());
        assert!(not_a_date.to_date().is_err());
    }
}
