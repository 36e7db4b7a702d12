use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use nom::{
    Finish, IResult, Parser,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{digit1, one_of},
    combinator::opt,
    error::Error,
    sequence::preceded,
};

/// Parses a PDF date string into a fixed-offset datetime.
///
/// The format is `D:YYYY[MM[DD[HH[mm[SS]]]]]` followed by an optional
/// timezone, `Z` or `±HH'mm'`. Components after the year default to their
/// minimum values; a missing timezone means UTC.
pub(crate) fn pdf_date(input: &str) -> Result<(&str, DateTime<FixedOffset>), Error<&str>> {
    let (input, (date, offset)) = (date, opt(timezone)).parse(input).finish()?;

    let offset = offset.unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());

    date.and_local_timezone(offset)
        .single()
        .map(|date| (input, date))
        .ok_or_else(|| Error::new(input, nom::error::ErrorKind::Verify))
}

fn date(input: &str) -> IResult<&str, NaiveDateTime> {
    let two_digits = || take_while_m_n(2, 2, |c: char| c.is_ascii_digit());

    let (input, _) = tag("D:").parse(input)?;
    let (input, year) = take_while_m_n(4, 4, |c: char| c.is_ascii_digit()).parse(input)?;
    let (input, components) = (
        opt(two_digits()),
        opt(two_digits()),
        opt(two_digits()),
        opt(two_digits()),
        opt(two_digits()),
    )
        .parse(input)?;

    let part = |value: Option<&str>, default| {
        value.map(|s| s.parse().unwrap()).unwrap_or(default)
    };
    let (month, day, hour, minute, second) = (
        part(components.0, 1),
        part(components.1, 1),
        part(components.2, 0),
        part(components.3, 0),
        part(components.4, 0),
    );

    let invalid = || nom::Err::Error(Error::new(input, nom::error::ErrorKind::Verify));
    let date =
        NaiveDate::from_ymd_opt(year.parse().unwrap(), month, day).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)?;

    Ok((input, NaiveDateTime::new(date, time)))
}

fn timezone(input: &str) -> IResult<&str, FixedOffset> {
    let (input, sign) = one_of("+-Z").parse(input)?;

    if sign == 'Z' {
        return Ok((input, FixedOffset::east_opt(0).unwrap()));
    }

    let (input, hours) = digit1.map_res(|s: &str| s.parse::<i32>()).parse(input)?;
    let (input, minutes) = opt(preceded(
        tag("'"),
        digit1.map_res(|s: &str| s.parse::<i32>()),
    ))
    .parse(input)?;
    let minutes = minutes.unwrap_or(0);

    let seconds = (hours * 3600 + minutes * 60) * if sign == '+' { 1 } else { -1 };

    FixedOffset::east_opt(seconds)
        .filter(|_| minutes < 60)
        .map(|offset| (input, offset))
        .ok_or_else(|| nom::Err::Failure(Error::new(input, nom::error::ErrorKind::Verify)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pdf_date_parser() {
        #[derive(Debug)]
        struct TestCase {
            name: &'static str,
            input: &'static str,
            expected: Option<DateTime<FixedOffset>>,
        }

        let at = |secs: i32, y, mo, d, h, mi, s| {
            FixedOffset::east_opt(secs)
                .unwrap()
                .with_ymd_and_hms(y, mo, d, h, mi, s)
                .unwrap()
        };

        let test_cases = [
            TestCase {
                name: "full date with positive offset",
                input: "D:20210421143000+02'00",
                expected: Some(at(7200, 2021, 4, 21, 14, 30, 0)),
            },
            TestCase {
                name: "UTC marker",
                input: "D:20210421143000Z",
                expected: Some(at(0, 2021, 4, 21, 14, 30, 0)),
            },
            TestCase {
                name: "negative offset",
                input: "D:20210421143000-05'00",
                expected: Some(at(-18000, 2021, 4, 21, 14, 30, 0)),
            },
            TestCase {
                name: "no timezone defaults to UTC",
                input: "D:20210421143000",
                expected: Some(at(0, 2021, 4, 21, 14, 30, 0)),
            },
            TestCase {
                name: "partial components",
                input: "D:202104",
                expected: Some(at(0, 2021, 4, 1, 0, 0, 0)),
            },
            TestCase {
                name: "offset without minutes",
                input: "D:20210421143000+02",
                expected: Some(at(7200, 2021, 4, 21, 14, 30, 0)),
            },
            TestCase {
                name: "missing prefix",
                input: "20210421143000",
                expected: None,
            },
            TestCase {
                name: "month out of range",
                input: "D:20211301143000",
                expected: None,
            },
            TestCase {
                name: "offset minutes out of range",
                input: "D:20210421143000+02'60",
                expected: None,
            },
        ];

        for case in &test_cases {
            let result = pdf_date(case.input);
            match case.expected {
                Some(expected) => {
                    let (_, parsed) = result.unwrap_or_else(|e| {
                        panic!("Test '{}' failed to parse: {e:?}", case.name)
                    });
                    assert_eq!(parsed, expected, "Test '{}' failed", case.name);
                }
                None => assert!(result.is_err(), "Test '{}' should fail", case.name),
            }
        }
    }
}
