use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit0, digit1, one_of},
    combinator::{opt, recognize},
};

use crate::types::Numeric;

/// Classifies a numeric token: an optional explicit sign, then either plain
/// digits (integer) or a decimal form (real). A leading `.` is read as `0.`.
///
/// Trailing bytes are left unconsumed — tokens may carry junk suffixes that
/// the number simply ignores, the way the original `stoi`-style conversion
/// did.
pub(crate) fn numeric(input: &[u8]) -> IResult<&[u8], Numeric> {
    let (remaining, (sign, body)) = (
        opt(one_of("+-")),
        alt((recognize((digit0, tag("."), digit0)), recognize(digit1))),
    )
        .parse(input)?;

    let explicit_sign = sign.is_some();
    let negative = sign == Some('-');

    if body.contains(&b'.') {
        let mut text = String::with_capacity(body.len() + 1);
        if body.first() == Some(&b'.') {
            text.push('0');
        }
        text.push_str(std::str::from_utf8(body).unwrap());

        let Ok(value) = text.parse::<f64>() else {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Float,
            )));
        };
        let value = if negative { -value } else { value };

        Ok((
            remaining,
            Numeric::Real {
                value,
                explicit_sign,
            },
        ))
    } else {
        let Ok(value) = std::str::from_utf8(body).unwrap().parse::<i64>() else {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Digit,
            )));
        };
        let value = if negative { -value } else { value };

        Ok((
            remaining,
            Numeric::Integer {
                value,
                explicit_sign,
            },
        ))
    }
}

/// Leading decimal digits of a token, ignoring whatever follows.
pub(crate) fn leading_u64(bytes: &[u8]) -> Option<u64> {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    std::str::from_utf8(&bytes[..digits]).ok()?.parse().ok()
}

pub(crate) fn leading_u32(bytes: &[u8]) -> Option<u32> {
    leading_u64(bytes)?.try_into().ok()
}
