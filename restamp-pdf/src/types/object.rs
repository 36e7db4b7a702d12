use snafu::{OptionExt, Snafu};

use crate::types::{Array, Dictionary, IndirectReference, Name, Numeric, PdfString, Stream};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Represents all fundamental object types of the PDF file syntax.
///
/// PDF documents are built from a hierarchy of objects that can be:
/// - Simple atomic values (null, boolean, numeric, string, name)
/// - Complex structures (array, dictionary, stream)
/// - References to numbered objects defined elsewhere
///
/// References stay id pairs rather than owning links — PDF permits cycles,
/// and resolution is a lookup in the document's object list.
///
/// # Examples
/// true                       // Boolean
/// 42                         // Numeric (Integer)
/// 3.14                       // Numeric (Real)
/// (Hello World)              // String (Literal)
/// <48656C6C6F>               // String (Hexadecimal)
/// /Type                      // Name
/// null                       // Null
/// [1 2 3]                    // Array
/// << /Key /Value >>          // Dictionary
/// 1 0 R                      // Reference
#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    /// Null object represented by the `null` literal
    Null,
    /// A boolean value (true/false literal)
    Boolean(bool),
    /// Numeric values (integer or real numbers)
    Numeric(Numeric),
    /// String values, literal `(string)` or hexadecimal `<ffffaa>`
    String(PdfString),
    /// Names starting with `/` followed by a sequence of characters
    Name(Name),
    /// Array object, contains 0 or more Objects
    Array(Array),
    /// Dictionary object, contains key-value pairs
    Dictionary(Dictionary),
    /// Reference to an indirect object defined elsewhere in the document
    Reference(IndirectReference),
    /// Stream object, a dictionary followed by a located byte payload
    Stream(Stream),
}

impl Object {
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Attempts to convert the object to an integer of type `T`.
    ///
    /// Only succeeds if the object is an integer and the value fits `T`.
    pub fn as_integer<T>(&self) -> Result<T>
    where
        T: TryFrom<i64>,
    {
        match self {
            Object::Numeric(Numeric::Integer { value, .. }) => Ok(TryInto::try_into(*value)
                .ok()
                .with_context(|| error::TypeConvertionSnafu {
                    object: self.clone(),
                })?),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Integer",
                got: self.clone(),
            }
            .into()),
        }
    }

    /// Attempts to convert the object to a floating-point number.
    ///
    /// Succeeds for any numeric; integers widen.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Object::Numeric(Numeric::Integer { value, .. }) => Ok(*value as f64),
            Object::Numeric(Numeric::Real { value, .. }) => Ok(*value),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Real",
                got: self.clone(),
            }
            .into()),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Object::Boolean(data) => Ok(*data),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Boolean",
                got: self.clone(),
            }
            .into()),
        }
    }

    pub fn as_name(&self) -> Result<&Name> {
        match self {
            Object::Name(name) => Ok(name),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Name",
                got: self.clone(),
            }
            .into()),
        }
    }

    pub fn as_string(&self) -> Result<&PdfString> {
        match self {
            Object::String(data) => Ok(data),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "String",
                got: self.clone(),
            }
            .into()),
        }
    }

    pub fn as_array(&self) -> Result<&Array> {
        match self {
            Object::Array(data) => Ok(data),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Array",
                got: self.clone(),
            }
            .into()),
        }
    }

    pub fn as_dictionary(&self) -> Result<&Dictionary> {
        match self {
            Object::Dictionary(data) => Ok(data),
            Object::Stream(stream) => Ok(&stream.dictionary),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Dictionary",
                got: self.clone(),
            }
            .into()),
        }
    }

    pub fn as_reference(&self) -> Result<&IndirectReference> {
        match self {
            Object::Reference(id) => Ok(id),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Reference",
                got: self.clone(),
            }
            .into()),
        }
    }

    pub fn as_stream(&self) -> Result<&Stream> {
        match self {
            Object::Stream(stream) => Ok(stream),
            _ => Err(error::Error::UnexpectedObjectType {
                expected: "Stream",
                got: self.clone(),
            }
            .into()),
        }
    }

    /// Canonical textual form of the value. Atomic numerics, booleans,
    /// null and references lead with a space; names, strings and the
    /// bracketed containers are self-delimiting. `source` supplies payload
    /// bytes for streams parsed out of it.
    pub fn serialize(&self, out: &mut Vec<u8>, source: &[u8]) {
        match self {
            Object::Null => out.extend_from_slice(b" null"),
            Object::Boolean(true) => out.extend_from_slice(b" true"),
            Object::Boolean(false) => out.extend_from_slice(b" false"),
            Object::Numeric(numeric) => numeric.serialize(out),
            Object::String(string) => string.serialize(out),
            Object::Name(name) => name.serialize(out),
            Object::Array(array) => array.serialize(out, source),
            Object::Dictionary(dictionary) => dictionary.serialize(out, source),
            Object::Reference(reference) => reference.serialize(out),
            Object::Stream(stream) => stream.serialize(out, source),
        }
    }
}

mod error {
    use snafu::Snafu;

    use super::Object;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Unexpected object type. Expected = {expected}. Got = {got:?}"))]
        UnexpectedObjectType { expected: &'static str, got: Object },

        #[snafu(display("Can't convert into Rust type. Object = {object:?}"))]
        TypeConvertion { object: Object },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let integer = Object::Numeric(Numeric::integer(300));
        assert_eq!(integer.as_integer::<i64>().unwrap(), 300);
        assert_eq!(integer.as_float().unwrap(), 300.0);
        assert!(integer.as_integer::<u8>().is_err());
        assert!(integer.as_bool().is_err());

        let reference = Object::Reference(IndirectReference { id: 2, gen_id: 0 });
        assert_eq!(reference.as_reference().unwrap().id, 2);

        assert!(Object::Null.is_null());
    }

    #[test]
    fn test_serialized_values_keep_separators() {
        let array = Object::Array(Array::from([
            Object::Numeric(Numeric::integer(1)),
            Object::Boolean(true),
            Object::Name(Name::from("/Three")),
        ]));

        let mut out = Vec::new();
        array.serialize(&mut out, &[]);
        assert_eq!(out, b"[ 1  true /Three]");
    }
}
