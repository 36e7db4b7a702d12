mod document;
mod info;
mod parser;
mod types;
mod writer;
mod xref;

pub use document::{Document, Error};
pub use info::{Info, Trap};
pub use parser::Version;
pub use types::{
    Array, Dictionary, IndirectObject, IndirectReference, Name, Numeric, Object, PdfString,
    Stream, StreamData,
};
pub use xref::XrefEntry;
