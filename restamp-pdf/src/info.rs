use chrono::{DateTime, FixedOffset};
use smol_str::SmolStr;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::types::{Dictionary, Object};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Typed view of the document information dictionary.
#[derive(Debug, Default)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<FixedOffset>>,
    pub mod_date: Option<DateTime<FixedOffset>>,
    pub trapped: Trap,
    pub other: Vec<(String, String)>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum Trap {
    True,
    False,
    #[default]
    Unknown,
}

impl Info {
    pub fn from_dictionary(dictionary: &Dictionary) -> Result<Self> {
        let mut result = Self::default();

        for (key, value) in dictionary.iter() {
            let Some(value) = value else { continue };

            match key.as_str() {
                "Title" => result.title = Some(text(key, value)?),
                "Author" => result.author = Some(text(key, value)?),
                "Subject" => result.subject = Some(text(key, value)?),
                "Keywords" => result.keywords = Some(text(key, value)?),
                "Creator" => result.creator = Some(text(key, value)?),
                "Producer" => result.producer = Some(text(key, value)?),
                "CreationDate" => result.creation_date = Some(date(key, value)?),
                "ModDate" => result.mod_date = Some(date(key, value)?),
                "Trapped" => {
                    // Usually a name, but string-valued producers exist.
                    let value = match value {
                        Object::Name(name) => name.as_key().to_string(),
                        _ => text(key, value)?,
                    };

                    result.trapped = match value.as_str() {
                        "True" => Trap::True,
                        "False" => Trap::False,
                        "Unknown" => Trap::Unknown,
                        _ => {
                            return Err(error::Error::UnexpectedTrapValue { value }.into());
                        }
                    }
                }
                _ => match value.as_string().ok().and_then(|s| s.text().ok()) {
                    Some(text) => result.other.push((key.to_string(), text)),
                    None => debug!(key = key.as_str(), "skipping non-text info entry"),
                },
            }
        }

        Ok(result)
    }
}

fn text(key: &SmolStr, value: &Object) -> Result<String> {
    Ok(value
        .as_string()
        .with_context(|_| error::InvalidFieldSnafu { field: key.clone() })?
        .text()
        .context(error::PdfStringSnafu)?)
}

fn date(key: &SmolStr, value: &Object) -> Result<DateTime<FixedOffset>> {
    Ok(value
        .as_string()
        .with_context(|_| error::InvalidFieldSnafu { field: key.clone() })?
        .to_date()
        .context(error::PdfStringSnafu)?)
}

mod error {
    use smol_str::SmolStr;
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Wrong field {field} data format"))]
        InvalidField {
            field: SmolStr,
            source: crate::types::ObjectError,
        },

        #[snafu(display("Unexpected Trapped value. Value = {value}"))]
        UnexpectedTrapValue { value: String },

        #[snafu(display("Error while working with pdf string"))]
        PdfString { source: crate::types::StringError },
    }
}
