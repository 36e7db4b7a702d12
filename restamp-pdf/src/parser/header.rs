use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while},
    character::complete::one_of,
    combinator::opt,
};

use super::error;

/// PDF header version pair. Recorded, not validated against feature use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

/// `%PDF-M.N` with single-digit major and minor, then the rest of the
/// header line. Leading blank lines are tolerated, and the line may end in
/// CR, LF, or either two-character combination.
fn version(input: &[u8]) -> IResult<&[u8], Version> {
    let digit = || one_of("0123456789");

    let (input, _) = take_while(|c| c == b'\r' || c == b'\n').parse(input)?;
    let (input, _) = tag("%PDF-").parse(input)?;
    let (input, (major, _, minor)) = (digit(), tag("."), digit()).parse(input)?;
    let (input, _) = take_while(|c| c != b'\r' && c != b'\n').parse(input)?;
    let (input, _) = (opt(one_of("\r\n")), opt(one_of("\r\n"))).parse(input)?;

    Ok((
        input,
        Version {
            major: major as u8 - b'0',
            minor: minor as u8 - b'0',
        },
    ))
}

impl super::Parser<'_> {
    pub(crate) fn parse_header(&mut self) -> super::Result<Version> {
        let data = self.reader.data();
        let (rest, parsed) = version(data).ok().ok_or(error::Error::InvalidHeader)?;
        self.reader.seek((data.len() - rest.len()) as u64);
        Ok(parsed)
    }
}
