/// Represents numeric values in a PDF document.
///
/// PDF supports two types of numeric values:
/// - Integer values (signed 64-bit integers)
/// - Real values (IEEE double-precision floating-point numbers)
///
/// Both remember whether the source token carried an explicit `+`/`-`
/// prefix. The marker is a serialization concern, not a value one: some
/// producers write `+1` and expect it back, so round-trips re-emit an
/// explicit sign on non-negative values. Negative values print their own
/// `-` regardless.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Numeric {
    /// An integer value stored as a 64-bit signed integer.
    Integer { value: i64, explicit_sign: bool },
    /// A real (floating-point) value stored as IEEE double-precision.
    Real { value: f64, explicit_sign: bool },
}

impl Numeric {
    /// An integer without an explicit sign marker.
    pub fn integer(value: i64) -> Self {
        Numeric::Integer {
            value,
            explicit_sign: false,
        }
    }

    /// A real without an explicit sign marker.
    pub fn real(value: f64) -> Self {
        Numeric::Real {
            value,
            explicit_sign: false,
        }
    }

    /// Canonical textual form: a leading space, the optional explicit sign,
    /// then the decimal digits (reals always keep their point).
    pub fn serialize(&self, out: &mut Vec<u8>) {
        out.push(b' ');
        match *self {
            Numeric::Integer {
                value,
                explicit_sign,
            } => {
                if explicit_sign && value >= 0 {
                    out.push(b'+');
                }
                out.extend_from_slice(value.to_string().as_bytes());
            }
            Numeric::Real {
                value,
                explicit_sign,
            } => {
                if explicit_sign && value >= 0.0 {
                    out.push(b'+');
                }
                let mut text = value.to_string();
                if !text.contains('.') {
                    // A whole real must keep its point or it re-parses as an
                    // integer.
                    text.push_str(".0");
                }
                out.extend_from_slice(text.as_bytes());
            }
        }
    }
}
