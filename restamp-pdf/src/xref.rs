/// One record of a classical cross-reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrefEntry {
    pub object_id: u32,
    pub byte_offset: u64,
    pub gen_id: u32,
    /// The `n`/`f` marker: true for in-use entries.
    pub in_use: bool,
    /// Index of the matching object in the document's object list, filled
    /// in by the post-parse linking pass.
    pub object_index: Option<usize>,
}
