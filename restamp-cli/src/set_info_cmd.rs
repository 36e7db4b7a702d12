use std::path::Path;

use restamp_pdf::{Document, IndirectObject, IndirectReference, Object, PdfString};

/// Applies the given Info fields and appends an incremental update, so the
/// original bytes of the document survive untouched.
pub fn run(
    file: &Path,
    out: Option<&Path>,
    fields: [(&'static str, Option<&str>); 4],
) -> Result<(), i32> {
    if fields.iter().all(|(_, value)| value.is_none()) {
        eprintln!("Error: nothing to set; pass at least one of --title, --author, --subject, --keywords");
        return Err(2);
    }

    let target = out.unwrap_or(file);

    let mut document = Document::parse(file).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let existing = document
        .trailer()
        .get("Info")
        .and_then(|value| value.as_reference().ok())
        .copied()
        .filter(|reference| document.get_object(reference.id, reference.gen_id).is_some());

    let reference = match existing {
        Some(reference) => reference,
        None => {
            // No usable Info object; mint one and point the trailer at it.
            let id = document
                .objects()
                .iter()
                .map(|object| object.id)
                .max()
                .unwrap_or(0)
                + 1;
            let reference = IndirectReference { id, gen_id: 0 };
            document.add_object(IndirectObject::new(id, 0));
            document
                .trailer_mut()
                .insert("Info", Some(Object::Reference(reference)));
            reference
        }
    };

    let Some(object) = document.get_object_mut(reference.id, reference.gen_id) else {
        eprintln!("Error: information object disappeared");
        return Err(1);
    };

    for (key, value) in fields {
        if let Some(value) = value {
            object.dictionary.insert(
                key,
                Some(Object::String(PdfString::Literal(
                    value.as_bytes().to_vec(),
                ))),
            );
        }
    }
    object.is_new = true;

    if target != file {
        std::fs::copy(file, target).map_err(|e| {
            eprintln!("Error: cannot copy to {}: {e}", target.display());
            1
        })?;
    }

    document.write(target, true).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    println!("Updated {}", target.display());
    Ok(())
}
