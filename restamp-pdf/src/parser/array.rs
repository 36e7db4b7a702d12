use super::tokenizer::{Comments, OnEof};
use super::{Parser, Result};
use crate::types::{Array, Dictionary};

impl<'a> Parser<'a> {
    /// Values until the closing `]`, entered right after the `[` token.
    pub(crate) fn parse_array(&mut self, ctx: &Dictionary) -> Result<Array> {
        let mut data = Vec::new();

        loop {
            let token = self.next_token(OnEof::Fail, Comments::Skip)?;
            if token == b"]" {
                break;
            }
            data.push(self.parse_value(token, ctx)?);
        }

        Ok(Array::from(data))
    }
}
