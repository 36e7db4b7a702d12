use super::error;
use super::numeric::{leading_u32, numeric};
use super::tokenizer::{Comments, OnEof, Token};
use super::{Parser, Result};
use crate::types::{IndirectObject, Numeric};

impl<'a> Parser<'a> {
    /// The `N G obj … endobj` envelope, entered with the object id token
    /// already in hand.
    ///
    /// Inside the envelope, `<<` merges into the object's leading
    /// dictionary, a lone digit-led integer is the indirect-offset stub
    /// form, and everything else is a value appended to the object's data.
    pub(crate) fn parse_object(&mut self, first: Token<'a>) -> Result<()> {
        let offset = first.offset();

        let Some(id) = leading_u32(first.bytes()) else {
            return Err(error::Error::InvalidObject { offset }.into());
        };

        let token = self.next_token(OnEof::Fail, Comments::Skip)?;
        let Some(gen_id) = leading_u32(token.bytes()) else {
            return Err(error::Error::InvalidObject {
                offset: token.offset(),
            }
            .into());
        };

        let token = self.next_token(OnEof::Fail, Comments::Skip)?;
        if token != b"obj" {
            return Err(error::Error::InvalidObject {
                offset: token.offset(),
            }
            .into());
        }

        let mut object = IndirectObject::parsed(id, gen_id, offset);

        loop {
            let token = self.next_token(OnEof::Fail, Comments::Skip)?;

            if token == b"endobj" {
                break;
            }

            if token == b"<<" {
                let dictionary = self.parse_dictionary(&object.dictionary)?;
                object.dictionary.merge(dictionary);
            } else if matches!(token.first(), Some(b'1'..=b'9')) {
                match numeric(token.bytes()) {
                    Ok((_, Numeric::Integer { value, .. })) if value >= 0 => {
                        object.indirect_offset = Some(value as u64);
                    }
                    _ => {
                        return Err(error::Error::InvalidObject {
                            offset: token.offset(),
                        }
                        .into());
                    }
                }
            } else {
                let value = self.parse_value(token, &object.dictionary)?;
                object.data.push(value);
            }
        }

        self.objects.push(object);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Object, PdfString, StreamData};

    fn parse(input: &[u8]) -> IndirectObject {
        let mut parser = Parser::new(input);
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        parser.parse_object(token).unwrap();
        assert_eq!(parser.objects.len(), 1);
        parser.objects.remove(0)
    }

    #[test]
    fn test_object_with_dictionary() {
        let object = parse(b"12 0 obj\n<</Type /Catalog>>\nendobj\n");
        assert_eq!(object.id, 12);
        assert_eq!(object.gen_id, 0);
        assert_eq!(object.source_offset, 0);
        assert!(!object.is_new);
        assert!(object.dictionary.has_key("Type"));
        assert!(object.data.is_empty());
    }

    #[test]
    fn test_object_with_atomic_body() {
        let object = parse(b"2 0 obj (Hello) endobj\n");
        assert_eq!(
            object.data,
            vec![Object::String(PdfString::Literal(b"Hello".to_vec()))]
        );
    }

    #[test]
    fn test_repeated_dictionaries_merge() {
        let object = parse(b"4 0 obj <</A 1>> <</B 2>> endobj\n");
        assert!(object.dictionary.has_key("A"));
        assert!(object.dictionary.has_key("B"));
    }

    #[test]
    fn test_indirect_offset_stub() {
        let object = parse(b"6 0 obj\n   116\nendobj\n");
        assert_eq!(object.indirect_offset, Some(116));
        assert!(object.data.is_empty());
    }

    #[test]
    fn test_stream_body_uses_object_dictionary() {
        let object = parse(b"5 0 obj\n<</Length 5>>\nstream\nHELLO\nendstream\nendobj\n");
        let Object::Stream(stream) = &object.data[0] else {
            panic!("expected a stream, got {:?}", object.data);
        };
        assert_eq!(stream.data, StreamData::Source { start: 29, end: 34 });
        assert!(stream.dictionary.has_key("Length"));
    }

    #[test]
    fn test_invalid_envelope() {
        let mut parser = Parser::new(b"7 zero obj true endobj\n");
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert!(parser.parse_object(token).is_err());

        let mut parser = Parser::new(b"7 0 object true endobj\n");
        let token = parser.next_token(OnEof::Fail, Comments::Skip).unwrap();
        assert!(parser.parse_object(token).is_err());
    }
}
