use super::error;
use super::numeric::numeric;
use super::tokenizer::{Comments, OnEof, Token};
use super::{Parser, Result};
use crate::types::{Dictionary, IndirectReference, Name, Numeric, Object};

impl<'a> Parser<'a> {
    /// Dispatch on the first token of a value.
    ///
    /// `ctx` is the dictionary of the enclosing object; a `stream` keyword
    /// looks its `/Length` up there.
    pub(crate) fn parse_value(&mut self, token: Token<'a>, ctx: &Dictionary) -> Result<Object> {
        if token == b"<<" {
            return Ok(Object::Dictionary(self.parse_dictionary(ctx)?));
        }
        if token == b"[" {
            return Ok(Object::Array(self.parse_array(ctx)?));
        }
        if token == b"(" {
            return Ok(Object::String(self.parse_literal_string()));
        }
        if token == b"<" {
            return Ok(Object::String(self.parse_hexa_string(token.offset())?));
        }
        if token == b"stream" {
            return Ok(Object::Stream(self.parse_stream(ctx, token.offset())?));
        }
        if token == b"true" {
            return Ok(Object::Boolean(true));
        }
        if token == b"false" {
            return Ok(Object::Boolean(false));
        }
        if token == b"null" {
            return Ok(Object::Null);
        }

        match token.first() {
            Some(b'1'..=b'9') => self.parse_number_or_reference(token),
            Some(b'/') => Ok(Object::Name(self.parse_name(token)?)),
            Some(b'+' | b'-' | b'0' | b'.') => self.parse_number(token),
            _ => Err(error::Error::InvalidToken {
                token: token.to_lossy_string(),
                offset: token.offset(),
            }
            .into()),
        }
    }

    fn parse_number(&mut self, token: Token<'a>) -> Result<Object> {
        match numeric(token.bytes()) {
            Ok((_, value)) => Ok(Object::Numeric(value)),
            Err(_) => Err(error::Error::InvalidToken {
                token: token.to_lossy_string(),
                offset: token.offset(),
            }
            .into()),
        }
    }

    pub(crate) fn parse_name(&mut self, token: Token<'a>) -> Result<Name> {
        if token.first() != Some(b'/') {
            return Err(error::Error::InvalidName {
                offset: token.offset(),
            }
            .into());
        }

        let text = std::str::from_utf8(token.bytes()).map_err(|_| error::Error::InvalidName {
            offset: token.offset(),
        })?;

        Ok(Name::from(text))
    }

    /// A number in value position may turn out to be the first token of an
    /// `N G R` reference; only a lookahead over two more tokens can tell.
    /// On anything but `integer integer R` the source is repositioned right
    /// after the first number.
    pub(crate) fn parse_number_or_reference(&mut self, token: Token<'a>) -> Result<Object> {
        let Ok((_, first)) = numeric(token.bytes()) else {
            return Err(error::Error::InvalidToken {
                token: token.to_lossy_string(),
                offset: token.offset(),
            }
            .into());
        };

        // References cannot start with reals.
        let Numeric::Integer { value: id_value, .. } = first else {
            return Ok(Object::Numeric(first));
        };

        let rewind = self.reader.offset();
        let token2 = self.next_token(OnEof::Fail, Comments::Skip)?;
        let token3 = self.next_token(OnEof::Fail, Comments::Skip)?;

        if let Ok((_, Numeric::Integer { value: gen_value, .. })) = numeric(token2.bytes()) {
            if token3 == b"R" {
                if let (Ok(id), Ok(gen_id)) = (u32::try_from(id_value), u32::try_from(gen_value)) {
                    return Ok(Object::Reference(IndirectReference { id, gen_id }));
                }
            }
        }

        self.reader.seek(rewind);
        Ok(Object::Numeric(first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PdfString;

    fn parse_one(input: &[u8]) -> (Parser<'_>, Object) {
        let mut parser = Parser::new(input);
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        let ctx = Dictionary::default();
        let value = parser.parse_value(token, &ctx).unwrap();
        (parser, value)
    }

    #[test]
    fn test_value_dispatch() {
        #[derive(Debug)]
        struct TestCase {
            name: &'static str,
            input: &'static [u8],
            expected: Object,
        }

        let test_cases = [
            TestCase {
                name: "boolean literal",
                input: b"true ",
                expected: Object::Boolean(true),
            },
            TestCase {
                name: "null literal",
                input: b"null ",
                expected: Object::Null,
            },
            TestCase {
                name: "reference triple",
                input: b"7 0 R ",
                expected: Object::Reference(IndirectReference { id: 7, gen_id: 0 }),
            },
            TestCase {
                name: "name",
                input: b"/Catalog ",
                expected: Object::Name(Name::from("/Catalog")),
            },
            TestCase {
                name: "signed number",
                input: b"-3.5 ",
                expected: Object::Numeric(Numeric::Real {
                    value: -3.5,
                    explicit_sign: true,
                }),
            },
            TestCase {
                name: "zero-led number never starts a reference",
                input: b"0.5 0 R ",
                expected: Object::Numeric(Numeric::real(0.5)),
            },
            TestCase {
                name: "balanced parentheses string",
                input: b"(ab(cd)ef) ",
                expected: Object::String(PdfString::Literal(b"ab(cd)ef".to_vec())),
            },
            TestCase {
                name: "escaped parenthesis kept verbatim",
                input: b"(a\\)b) ",
                expected: Object::String(PdfString::Literal(b"a\\)b".to_vec())),
            },
            TestCase {
                name: "hexadecimal string",
                input: b"<AB> ",
                expected: Object::String(PdfString::Hexadecimal("AB".to_string())),
            },
        ];

        for case in &test_cases {
            let (_, value) = parse_one(case.input);
            assert_eq!(value, case.expected, "Test '{}' failed", case.name);
        }
    }

    #[test]
    fn test_number_lookahead_repositions() {
        // `7 0` followed by something that is not `R`: the integer stands,
        // and the `0` must be re-readable.
        let mut parser = Parser::new(b"7 0 obj");
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        let ctx = Dictionary::default();
        let value = parser.parse_value(token, &ctx).unwrap();
        assert_eq!(value, Object::Numeric(Numeric::integer(7)));

        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert_eq!(token.bytes(), b"0");
    }

    #[test]
    fn test_comment_between_reference_tokens() {
        let mut parser = Parser::new(b"1 %hi\n2 3 R ");
        let ctx = Dictionary::default();

        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        let first = parser.parse_value(token, &ctx).unwrap();
        assert_eq!(first, Object::Numeric(Numeric::integer(1)));

        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        let second = parser.parse_value(token, &ctx).unwrap();
        assert_eq!(
            second,
            Object::Reference(IndirectReference { id: 2, gen_id: 3 })
        );
    }

    #[test]
    fn test_atomic_values_round_trip() {
        let values = [
            Object::Null,
            Object::Boolean(false),
            Object::Numeric(Numeric::integer(42)),
            Object::Numeric(Numeric::Integer {
                value: 7,
                explicit_sign: true,
            }),
            Object::Numeric(Numeric::real(3.14)),
            // A negative always re-parses with its sign marked explicit.
            Object::Numeric(Numeric::Real {
                value: -2.0,
                explicit_sign: true,
            }),
            Object::Name(Name::from("/Root")),
            Object::String(PdfString::Literal(b"plain".to_vec())),
            Object::String(PdfString::Hexadecimal("4AFF".to_string())),
            Object::Reference(IndirectReference { id: 9, gen_id: 2 }),
        ];

        for value in values {
            let mut serialized = Vec::new();
            value.serialize(&mut serialized, &[]);
            // Trailing tokens keep the number-vs-reference lookahead fed.
            serialized.extend_from_slice(b" end end\n");

            let mut parser = Parser::new(&serialized);
            let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
            let reparsed = parser.parse_value(token, &Dictionary::default()).unwrap();
            assert_eq!(reparsed, value, "round trip failed for {value:?}");
        }
    }

    #[test]
    fn test_invalid_token_reports_offset() {
        let mut parser = Parser::new(b"  @wat ");
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        let ctx = Dictionary::default();
        let err = parser.parse_value(token, &ctx).unwrap_err();
        assert!(err.to_string().contains("offset 2"), "got: {err}");
    }
}
