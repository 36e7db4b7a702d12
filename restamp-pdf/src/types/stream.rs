use crate::types::Dictionary;

/// Where a stream's payload lives.
///
/// Parsed streams reference a byte range of the still-open source instead of
/// copying the payload; callers must keep the document alive for as long as
/// they read it. Streams built in memory own their bytes.
#[derive(Debug, PartialEq, Clone)]
pub enum StreamData {
    /// Absolute `[start..end)` byte range within the parsed source.
    Source { start: u64, end: u64 },
    Owned(Vec<u8>),
}

/// A stream object: the associated dictionary plus the payload location.
/// The payload is located, never interpreted — filters are somebody else's
/// job.
#[derive(Debug, PartialEq, Clone)]
pub struct Stream {
    pub dictionary: Dictionary,
    pub data: StreamData,
}

impl Stream {
    /// The payload bytes, resolved against the parsed source bytes.
    pub fn bytes<'a>(&'a self, source: &'a [u8]) -> &'a [u8] {
        match &self.data {
            StreamData::Source { start, end } => source
                .get(*start as usize..*end as usize)
                .unwrap_or_default(),
            StreamData::Owned(bytes) => bytes,
        }
    }

    pub fn serialize(&self, out: &mut Vec<u8>, source: &[u8]) {
        self.dictionary.serialize(out, source);
        out.extend_from_slice(b"stream\n");
        out.extend_from_slice(self.bytes(source));
        out.extend_from_slice(b"\nendstream\n");
    }
}
