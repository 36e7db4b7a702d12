mod array;
mod dictionary;
mod indirect_object;
mod name;
mod numeric;
mod object;
mod stream;
mod string;

pub use array::Array;
pub use dictionary::Dictionary;
pub use indirect_object::{IndirectObject, IndirectReference};
pub use name::Name;
pub use numeric::Numeric;
pub use object::{Error as ObjectError, Object};
pub use stream::{Stream, StreamData};
pub use string::{Error as StringError, PdfString};
