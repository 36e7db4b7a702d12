use crate::types::{Dictionary, Object};

/// An `N G R` token triple naming an indirect object.
///
/// Object identity is the `(id, gen_id)` pair.
#[derive(Debug, Default, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct IndirectReference {
    pub id: u32,
    pub gen_id: u32,
}

impl IndirectReference {
    pub fn serialize(&self, out: &mut Vec<u8>) {
        out.push(b' ');
        out.extend_from_slice(self.id.to_string().as_bytes());
        out.push(b' ');
        out.extend_from_slice(self.gen_id.to_string().as_bytes());
        out.extend_from_slice(b" R");
    }
}

/// A numbered PDF object enclosed in `N G obj … endobj`.
///
/// `dictionary` is the object's leading dictionary if any; `data` holds the
/// other top-level values inside the envelope, commonly a single stream or
/// one atomic value. `indirect_offset` is set instead when the body is a
/// lone integer standing in for an in-use offset, a stub form some
/// producers emit.
#[derive(Debug, PartialEq, Clone)]
pub struct IndirectObject {
    pub id: u32,
    pub gen_id: u32,
    /// Offset of the object header in the parsed source; zero for objects
    /// built by callers.
    pub source_offset: u64,
    pub dictionary: Dictionary,
    pub data: Vec<Object>,
    pub indirect_offset: Option<u64>,
    /// Created or modified since load. Only new objects are emitted by the
    /// incremental writer.
    pub is_new: bool,
    /// Mirror of the xref `n`/`f` marker.
    pub used: bool,
}

impl IndirectObject {
    /// A fresh object as a caller builds it: marked new, considered in use.
    pub fn new(id: u32, gen_id: u32) -> Self {
        Self {
            id,
            gen_id,
            source_offset: 0,
            dictionary: Dictionary::default(),
            data: Vec::new(),
            indirect_offset: None,
            is_new: true,
            used: true,
        }
    }

    /// An object materialized by the parser from the source.
    pub(crate) fn parsed(id: u32, gen_id: u32, source_offset: u64) -> Self {
        Self {
            source_offset,
            is_new: false,
            ..Self::new(id, gen_id)
        }
    }

    pub fn reference(&self) -> IndirectReference {
        IndirectReference {
            id: self.id,
            gen_id: self.gen_id,
        }
    }

    pub fn serialize(&self, out: &mut Vec<u8>, source: &[u8]) {
        out.extend_from_slice(self.id.to_string().as_bytes());
        out.push(b' ');
        out.extend_from_slice(self.gen_id.to_string().as_bytes());
        out.extend_from_slice(b" obj\n");

        if let Some(offset) = self.indirect_offset {
            out.extend_from_slice(b"   ");
            out.extend_from_slice(offset.to_string().as_bytes());
            out.push(b'\n');
        } else {
            // A stream in the body carries the object's dictionary itself;
            // emitting the envelope's copy too would double it.
            let has_stream = self
                .data
                .iter()
                .any(|value| matches!(value, Object::Stream(_)));
            if !self.dictionary.is_empty() && !has_stream {
                self.dictionary.serialize(out, source);
            }
            for value in &self.data {
                value.serialize(out, source);
            }
        }

        out.extend_from_slice(b"endobj\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Numeric;

    #[test]
    fn test_object_serialization() {
        let mut object = IndirectObject::new(12, 0);
        object.dictionary =
            Dictionary::from([("Length", Object::Numeric(Numeric::integer(5)))]);

        let mut out = Vec::new();
        object.serialize(&mut out, &[]);
        assert_eq!(out, b"12 0 obj\n<</Length 5>>\nendobj\n");
    }

    #[test]
    fn test_indirect_offset_stub() {
        let mut object = IndirectObject::new(3, 0);
        object.indirect_offset = Some(116);

        let mut out = Vec::new();
        object.serialize(&mut out, &[]);
        assert_eq!(out, b"3 0 obj\n   116\nendobj\n");
    }

    #[test]
    fn test_reference_serialization() {
        let mut out = Vec::new();
        IndirectReference { id: 7, gen_id: 0 }.serialize(&mut out);
        assert_eq!(out, b" 7 0 R");
    }
}
