use super::tokenizer::{Comments, OnEof};
use super::{Parser, Result};
use crate::types::Dictionary;

impl<'a> Parser<'a> {
    /// Key/value pairs until the matching `>>`, entered right after the
    /// `<<` token.
    ///
    /// Keys must be names and are stored without their leading slash. A key
    /// immediately followed by `>>` is recorded with no value at all — some
    /// producers emit such entries and they are preserved.
    pub(crate) fn parse_dictionary(&mut self, ctx: &Dictionary) -> Result<Dictionary> {
        let mut dictionary = Dictionary::default();

        loop {
            let token = self.next_token(OnEof::Fail, Comments::Skip)?;
            if token == b">>" {
                break;
            }

            let key = self.parse_name(token)?;

            let token = self.next_token(OnEof::Fail, Comments::Skip)?;
            if token == b">>" {
                dictionary.insert(key.as_key(), None);
                break;
            }

            let value = self.parse_value(token, ctx)?;
            dictionary.insert(key.as_key(), Some(value));
        }

        Ok(dictionary)
    }
}
