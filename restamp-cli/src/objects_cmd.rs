use std::path::Path;

use restamp_pdf::{Document, IndirectObject, Object};

fn describe(object: &IndirectObject) -> &'static str {
    if object.indirect_offset.is_some() {
        return "offset stub";
    }
    if object
        .data
        .iter()
        .any(|value| matches!(value, Object::Stream(_)))
    {
        return "stream";
    }
    if !object.dictionary.is_empty() {
        return "dictionary";
    }
    match object.data.first() {
        Some(Object::Array(_)) => "array",
        Some(Object::String(_)) => "string",
        Some(Object::Numeric(_)) => "number",
        Some(Object::Name(_)) => "name",
        Some(Object::Boolean(_)) => "boolean",
        Some(Object::Reference(_)) => "reference",
        Some(_) => "value",
        None => "empty",
    }
}

pub fn run(file: &Path) -> Result<(), i32> {
    let document = Document::parse(file).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    for object in document.objects() {
        let marker = if object.used { "" } else { " (free)" };
        println!(
            "{} {} obj @ {} [{}]{marker}",
            object.id,
            object.gen_id,
            object.source_offset,
            describe(object),
        );
    }

    Ok(())
}
