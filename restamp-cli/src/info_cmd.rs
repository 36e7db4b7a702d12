use std::path::Path;

use restamp_pdf::Document;

pub fn run(file: &Path) -> Result<(), i32> {
    let document = Document::parse(file).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let version = document.version();
    println!("PDF version: {}.{}", version.major, version.minor);
    println!("Objects: {}", document.objects().len());
    println!("Xref entries: {}", document.xref_table().len());

    if let Some(root) = document.trailer().get("Root") {
        if let Ok(root) = root.as_reference() {
            println!("Root: {} {} R", root.id, root.gen_id);
        }
    }
    if let Some(size) = document.trailer().get("Size") {
        if let Ok(size) = size.as_integer::<i64>() {
            println!("Size: {size}");
        }
    }

    match document.info() {
        Ok(Some(info)) => {
            let fields = [
                ("Title", &info.title),
                ("Author", &info.author),
                ("Subject", &info.subject),
                ("Keywords", &info.keywords),
                ("Creator", &info.creator),
                ("Producer", &info.producer),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    println!("{label}: {value}");
                }
            }
            if let Some(date) = info.creation_date {
                println!("Created: {date}");
            }
            if let Some(date) = info.mod_date {
                println!("Modified: {date}");
            }
        }
        Ok(None) => println!("No document information dictionary"),
        Err(e) => eprintln!("Warning: unreadable information dictionary: {e}"),
    }

    Ok(())
}
